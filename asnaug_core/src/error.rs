use std::path::PathBuf;

use thiserror::Error;

/// Which tally disagreed with the augmented problem line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountKind {
    /// Node tally (node lines plus registered mirror nodes).
    Nodes,
    /// Arc lines written to the arc segment.
    Arcs,
}

impl std::fmt::Display for CountKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Nodes => write!(f, "node"),
            Self::Arcs => write!(f, "arc"),
        }
    }
}

/// Fatal conditions raised while augmenting one graph file.
///
/// Line numbers are 1-based and `text` is the raw line without its terminator.
#[derive(Debug, Error)]
pub enum AugmentError {
    /// A line matching none of the graph line shapes.
    #[error("Unrecognized line at line {line}: [{text}]")]
    MalformedLine { line: usize, text: String },

    /// A node or arc line before any problem line, or none at all.
    ///
    /// `at` is the offending line, or `None` when the input ended without one.
    #[error(
        "No problem line found{}",
        .at.as_ref().map(|(line, text)| format!(" before line {line}: [{text}]")).unwrap_or_default()
    )]
    MissingProblemLine { at: Option<(usize, String)> },

    /// A second `p` line.
    #[error("Multiple problem lines seen at line {line}: [{text}]")]
    DuplicateProblemLine { line: usize, text: String },

    /// A `p` line that is not `p asn <N> <M>`, or whose doubled counts overflow.
    #[error("Invalid problem line at line {line}: [{text}]")]
    InvalidProblemLine { line: usize, text: String },

    /// A node line outside `[1, N]`.
    #[error("Node id {id} outside node range [1, {limit}] at line {line}: [{text}]")]
    NodeIdOutOfRange {
        line: usize,
        text: String,
        id: u64,
        limit: u64,
    },

    /// An arc endpoint outside `[1, N]`.
    #[error("Arc endpoint {id} outside node range [1, {limit}] at line {line}: [{text}]")]
    ArcEndpointOutOfRange {
        line: usize,
        text: String,
        id: u64,
        limit: u64,
    },

    /// The inferred source count is zero or exceeds `N`.
    #[error("Source count {sources} outside node range [1, {nodes}] at line {line}: [{text}]")]
    SourceCountOutOfRange {
        line: usize,
        text: String,
        sources: u64,
        nodes: u64,
    },

    /// The pre-scan found no node line to infer sources from.
    #[error("No node lines in file [{path}]")]
    MissingNodeDeclarations { path: PathBuf },

    /// A tally disagrees with the augmented problem line.
    #[error("Seen {kind} count [{seen}] does not match computed [{expected}]")]
    CountMismatch {
        kind: CountKind,
        seen: u64,
        expected: u64,
    },

    /// The output directory does not exist.
    #[error("Cannot find output directory [{path}]")]
    OutputDirMissing { path: PathBuf },

    /// Reading the input or writing a segment failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AugmentError {
    /// The 1-based input line the error points at, when there is one.
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::MissingProblemLine { at } => at.as_ref().map(|(line, _)| *line),
            Self::MalformedLine { line, .. }
            | Self::DuplicateProblemLine { line, .. }
            | Self::InvalidProblemLine { line, .. }
            | Self::NodeIdOutOfRange { line, .. }
            | Self::ArcEndpointOutOfRange { line, .. }
            | Self::SourceCountOutOfRange { line, .. } => Some(*line),
            Self::MissingNodeDeclarations { .. }
            | Self::CountMismatch { .. }
            | Self::OutputDirMissing { .. }
            | Self::Io(_) => None,
        }
    }
}

/// Failures of the matching back-translator.
///
/// Unparsable or out-of-band solution lines are never errors; they are skipped.
#[derive(Debug, Error)]
pub enum TranslateError {
    /// `S = 0`, `S > N` or `2N` not representable.
    #[error("Invalid node counts: {sources} source nodes of {nodes} total nodes")]
    InvalidNodeCounts { sources: u64, nodes: u64 },

    /// Reading the solution or writing the output failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result of augmentation operations.
pub type Result<T> = std::result::Result<T, AugmentError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_is_reported_for_line_errors() {
        let err = AugmentError::MalformedLine {
            line: 4,
            text: "x 1".to_string(),
        };
        assert_eq!(err.line(), Some(4));
        assert_eq!(err.to_string(), "Unrecognized line at line 4: [x 1]");
    }

    #[test]
    fn test_missing_problem_line_with_and_without_position() {
        let at_line = AugmentError::MissingProblemLine {
            at: Some((2, "n 1".to_string())),
        };
        assert_eq!(at_line.line(), Some(2));
        assert_eq!(
            at_line.to_string(),
            "No problem line found before line 2: [n 1]"
        );

        let at_end = AugmentError::MissingProblemLine { at: None };
        assert_eq!(at_end.line(), None);
        assert_eq!(at_end.to_string(), "No problem line found");
    }

    #[test]
    fn test_count_mismatch_message() {
        let err = AugmentError::CountMismatch {
            kind: CountKind::Arcs,
            seen: 7,
            expected: 9,
        };
        assert_eq!(err.line(), None);
        assert_eq!(
            err.to_string(),
            "Seen arc count [7] does not match computed [9]"
        );
    }
}
