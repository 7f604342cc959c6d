//! Pre-scan that infers how many declared nodes are sources.
//!
//! Source nodes must be declared as one uninterrupted leading run of `n`
//! lines. Everything before the first `n` line is ignored; the run ends at the
//! first line of any other kind and the largest id inside it is the source
//! count. Later `n` lines (destinations) are not looked at.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use crate::error::{AugmentError, Result};
use crate::line::{GraphLine, classify};

/// Largest node id in the first run of node lines, `None` if there is no node line.
pub fn scan_source_count<R: BufRead>(reader: R) -> io::Result<Option<u64>> {
    let mut highest: Option<u64> = None;

    for line in reader.lines() {
        let line = line?;
        match (classify(&line), highest) {
            (GraphLine::Node(id), Some(max)) => highest = Some(max.max(id)),
            (GraphLine::Node(id), None) => highest = Some(id),
            (_, Some(_)) => break,
            (_, None) => {}
        }
    }

    Ok(highest)
}

/// Infers the source count of the graph file at `path`.
pub fn infer_source_count(path: &Path) -> Result<u64> {
    let reader = BufReader::new(File::open(path)?);
    let sources = scan_source_count(reader)?.ok_or_else(|| {
        AugmentError::MissingNodeDeclarations {
            path: path.to_path_buf(),
        }
    })?;
    tracing::debug!("inferred {} source nodes in {}", sources, path.display());
    Ok(sources)
}
