use serde::{Deserialize, Serialize};

/// Counts declared by the single problem line, plus the inferred source count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemSpec {
    /// `N`
    pub node_count: u64,
    /// `M`
    pub arc_count: u64,
    /// `S`, inferred from the leading node lines.
    pub source_count: u64,
}

impl ProblemSpec {
    /// Counts in problem-line order, then the source count.
    pub const fn new(node_count: u64, arc_count: u64, source_count: u64) -> Self {
        Self {
            node_count,
            arc_count,
            source_count,
        }
    }

    /// Number of destination nodes, `N - S`.
    pub const fn destination_count(&self) -> u64 {
        self.node_count.saturating_sub(self.source_count)
    }

    /// `{2N, 2M + N}`, or `None` when the doubled counts do not fit in a `u64`.
    pub fn augmented(&self) -> Option<AugmentedProblemSpec> {
        let node_count = self.node_count.checked_mul(2)?;
        let arc_count = self
            .arc_count
            .checked_mul(2)?
            .checked_add(self.node_count)?;
        Some(AugmentedProblemSpec {
            node_count,
            arc_count,
        })
    }
}

/// Counts of the augmented perfect-matching problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AugmentedProblemSpec {
    /// `2N`
    pub node_count: u64,
    /// `2M + N`
    pub arc_count: u64,
}

impl AugmentedProblemSpec {
    /// The problem line as written to the augmented artifact.
    pub fn problem_line(&self) -> String {
        format!("p asn {} {}", self.node_count, self.arc_count)
    }
}
