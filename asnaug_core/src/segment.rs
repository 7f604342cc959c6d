//! The three ordered output sections of an augmented graph.
//!
//! On disk every segment is a temporary file inside the output directory,
//! created up front and deleted when dropped, so an aborted run leaves nothing
//! behind. The final artifact is assembled in its own temporary file and only
//! renamed into place once all three segments have been copied.

use std::io::{self, BufWriter, Seek, SeekFrom, Write};
use std::path::Path;

use tempfile::NamedTempFile;

/// Problem, node and arc segments, concatenated in that order.
#[derive(Debug)]
pub struct Segments<W> {
    /// Problem line and every comment line.
    pub problem: W,
    /// Node declarations, original and mirror.
    pub node: W,
    /// Real, mirror and "stay unmatched" arcs.
    pub arc: W,
}

/// Segment writer backed by a temporary file.
pub type FileSegment = BufWriter<NamedTempFile>;

fn segment_file(dir: &Path, name: &str) -> io::Result<FileSegment> {
    let file = tempfile::Builder::new()
        .prefix(&format!("asnaug_{name}_"))
        .suffix(".txt")
        .rand_bytes(4)
        .tempfile_in(dir)?;
    Ok(BufWriter::new(file))
}

fn rewind(segment: FileSegment) -> io::Result<NamedTempFile> {
    let mut file = segment.into_inner().map_err(io::IntoInnerError::into_error)?;
    file.seek(SeekFrom::Start(0))?;
    Ok(file)
}

impl Segments<FileSegment> {
    /// Creates all three working files in `dir`.
    pub fn create_in(dir: &Path) -> io::Result<Self> {
        Ok(Self {
            problem: segment_file(dir, "problem")?,
            node: segment_file(dir, "node")?,
            arc: segment_file(dir, "arc")?,
        })
    }

    /// Copies the segments, in order, into a new file at `path`.
    ///
    /// The file appears at `path` only after every segment was copied.
    pub fn concatenate_into(self, path: &Path) -> io::Result<()> {
        let dir = path.parent().unwrap_or_else(|| Path::new("."));
        let mut out = BufWriter::new(
            tempfile::Builder::new()
                .prefix("asnaug_merge_")
                .suffix(".txt")
                .rand_bytes(4)
                .tempfile_in(dir)?,
        );

        for segment in [self.problem, self.node, self.arc] {
            let mut file = rewind(segment)?;
            io::copy(&mut file, &mut out)?;
        }

        let merged = out.into_inner().map_err(io::IntoInnerError::into_error)?;
        merged.persist(path).map_err(|e| e.error)?;
        Ok(())
    }
}

impl Segments<Vec<u8>> {
    /// Empty in-memory segments.
    pub const fn in_memory() -> Self {
        Self {
            problem: Vec::new(),
            node: Vec::new(),
            arc: Vec::new(),
        }
    }

    /// Problem, node and arc bytes, in that order.
    pub fn concatenate(self) -> Vec<u8> {
        let mut out = self.problem;
        out.extend(self.node);
        out.extend(self.arc);
        out
    }
}

impl<W: Write> Segments<W> {
    /// Flushes all three segments.
    pub fn flush(&mut self) -> io::Result<()> {
        self.problem.flush()?;
        self.node.flush()?;
        self.arc.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_files_concatenate_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let mut segments = Segments::create_in(dir.path()).unwrap();
        writeln!(segments.arc, "a 1 2 3").unwrap();
        writeln!(segments.node, "n 1").unwrap();
        writeln!(segments.problem, "p asn 2 1").unwrap();

        let target = dir.path().join("out.txt");
        segments.concatenate_into(&target).unwrap();

        assert_eq!(
            fs::read_to_string(&target).unwrap(),
            "p asn 2 1\nn 1\na 1 2 3\n"
        );
        // Only the artifact survives; working files are gone.
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_dropped_segments_leave_nothing() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut segments = Segments::create_in(dir.path()).unwrap();
            writeln!(segments.problem, "p asn 2 1").unwrap();
            segments.flush().unwrap();
            assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 3);
        }
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_in_memory_concatenate() {
        let mut segments = Segments::in_memory();
        segments.arc.extend_from_slice(b"a\n");
        segments.problem.extend_from_slice(b"p\n");
        segments.node.extend_from_slice(b"n\n");
        assert_eq!(segments.concatenate(), b"p\nn\na\n");
    }
}
