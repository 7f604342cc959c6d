//! Node-id arithmetic between the original and the augmented problem.
//!
//! With `N` original nodes of which the first `S` are sources, augmented
//! node-space `[1, 2N]` is cut into four contiguous bands, in this order:
//!
//! | band                  | range          | produced by            |
//! |-----------------------|----------------|------------------------|
//! | real sources          | `[1, S]`       | `adjusted_source`      |
//! | mirror destinations   | `(S, N]`       | `mirror_of_dest`       |
//! | real destinations     | `(N, 2N-S]`    | `adjusted_destination` |
//! | mirror sources        | `(2N-S, 2N]`   | `mirror_of_source`     |
//!
//! Augmented sources (real sources followed by mirror destinations) therefore
//! stay contiguous ahead of all augmented destinations.

use crate::problem::ProblemSpec;

/// Which band of augmented node-space an id falls in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Band {
    /// `[1, S]`
    RealSource,
    /// `(S, N]`
    MirrorDestination,
    /// `(N, 2N-S]`
    RealDestination,
    /// `(2N-S, 2N]`
    MirrorSource,
}

/// Stateless id mapper for one problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeMapper {
    nodes: u64,
    sources: u64,
}

impl NodeMapper {
    /// Mapper for `nodes` original nodes of which the first `sources` are
    /// sources. `None` unless `0 < sources <= nodes` and `2 * nodes` fits in a `u64`.
    pub const fn new(nodes: u64, sources: u64) -> Option<Self> {
        if sources == 0 || sources > nodes || nodes.checked_mul(2).is_none() {
            return None;
        }
        Some(Self { nodes, sources })
    }

    /// Mapper for counts the caller has already checked.
    #[contracts::debug_requires(sources > 0 && sources <= nodes, "source count must lie in [1, nodes]")]
    pub(crate) fn from_validated(nodes: u64, sources: u64) -> Self {
        Self { nodes, sources }
    }

    /// Mapper for a problem line's counts, `None` when they are inconsistent.
    pub const fn from_spec(spec: &ProblemSpec) -> Option<Self> {
        Self::new(spec.node_count, spec.source_count)
    }

    /// `N`
    pub const fn node_count(&self) -> u64 {
        self.nodes
    }

    /// `S`
    pub const fn source_count(&self) -> u64 {
        self.sources
    }

    /// Sources keep their original ids.
    pub const fn adjusted_source(&self, source: u64) -> u64 {
        source
    }

    /// Shifts a destination past every augmented source: `d - S + N`.
    #[contracts::debug_requires(dest >= 1 && dest <= self.nodes)]
    pub fn adjusted_destination(&self, dest: u64) -> u64 {
        dest + (self.nodes - self.sources)
    }

    /// Dummy twin of a source, placed after every real destination: `s + 2N - S`.
    #[contracts::debug_requires(source >= 1 && source <= self.nodes)]
    pub fn mirror_of_source(&self, source: u64) -> u64 {
        source + (2 * self.nodes - self.sources)
    }

    /// Dummy twin of a destination reuses the destination's original id; the
    /// real destination has already moved out of `(S, N]`.
    pub const fn mirror_of_dest(&self, dest: u64) -> u64 {
        dest
    }

    /// Inverse of [`Self::adjusted_destination`]: `b - N + S`.
    #[contracts::debug_requires(augmented > self.nodes - self.sources)]
    pub fn original_destination(&self, augmented: u64) -> u64 {
        augmented - (self.nodes - self.sources)
    }

    /// Upper edge of the real destination band, `2N - S`.
    pub const fn last_real_destination(&self) -> u64 {
        2 * self.nodes - self.sources
    }

    /// Classifies an augmented id, `None` outside `[1, 2N]`.
    pub const fn band(&self, id: u64) -> Option<Band> {
        if id == 0 {
            None
        } else if id <= self.sources {
            Some(Band::RealSource)
        } else if id <= self.nodes {
            Some(Band::MirrorDestination)
        } else if id <= self.last_real_destination() {
            Some(Band::RealDestination)
        } else if id <= 2 * self.nodes {
            Some(Band::MirrorSource)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_three_node_layout() {
        // Sources {1, 2}, destination {3}.
        let mapper = NodeMapper::new(3, 2).unwrap();
        assert_eq!(mapper.adjusted_source(1), 1);
        assert_eq!(mapper.adjusted_destination(3), 4);
        assert_eq!(mapper.mirror_of_source(1), 5);
        assert_eq!(mapper.mirror_of_source(2), 6);
        assert_eq!(mapper.mirror_of_dest(3), 3);
        assert_eq!(mapper.original_destination(4), 3);
        assert_eq!(mapper.last_real_destination(), 4);
    }

    #[test]
    fn test_bands() {
        let mapper = NodeMapper::new(10, 4).unwrap();
        assert_eq!(mapper.band(0), None);
        assert_eq!(mapper.band(1), Some(Band::RealSource));
        assert_eq!(mapper.band(4), Some(Band::RealSource));
        assert_eq!(mapper.band(5), Some(Band::MirrorDestination));
        assert_eq!(mapper.band(10), Some(Band::MirrorDestination));
        assert_eq!(mapper.band(11), Some(Band::RealDestination));
        assert_eq!(mapper.band(16), Some(Band::RealDestination));
        assert_eq!(mapper.band(17), Some(Band::MirrorSource));
        assert_eq!(mapper.band(20), Some(Band::MirrorSource));
        assert_eq!(mapper.band(21), None);
    }

    #[test]
    fn test_all_sources() {
        // S == N leaves the destination bands empty.
        let mapper = NodeMapper::new(3, 3).unwrap();
        assert_eq!(mapper.mirror_of_source(1), 4);
        assert_eq!(mapper.band(3), Some(Band::RealSource));
        assert_eq!(mapper.band(4), Some(Band::MirrorSource));
    }

    #[test]
    fn test_inconsistent_counts_rejected() {
        assert!(NodeMapper::new(3, 0).is_none());
        assert!(NodeMapper::new(3, 4).is_none());
        assert!(NodeMapper::new(u64::MAX, 1).is_none());
        assert!(NodeMapper::from_spec(&ProblemSpec::new(2, 1, 3)).is_none());
        assert_eq!(
            NodeMapper::from_spec(&ProblemSpec::new(3, 2, 2)),
            NodeMapper::new(3, 2)
        );
    }
}
