//! Configuration for augmentation and back-translation runs.
//!
//! Quick examples
//!
//! Defaults (sentinel `-1000000000`, artifact `augmented_graph.txt`):
//! ```
//! use asnaug_core::AugmentConfig;
//! let cfg = AugmentConfig::default();
//! assert_eq!(cfg.sentinel_weight, -1_000_000_000);
//! ```
//!
//! A solver with a wider weight range needs a more negative sentinel:
//! ```
//! use asnaug_core::AugmentConfig;
//! let cfg = AugmentConfig::default().with_sentinel_weight(-1_000_000_000_000);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::TranslateError;
use crate::mapper::NodeMapper;

/// Weight put on every "stay unmatched" arc unless configured otherwise.
pub const DEFAULT_SENTINEL_WEIGHT: i64 = -1_000_000_000;

/// File name of the augmented artifact inside the output directory.
pub const DEFAULT_ARTIFACT_NAME: &str = "augmented_graph.txt";

/// Augmentation settings.
///
/// - sentinel_weight: weight of arcs that pair a node with its own mirror
///   twin. A weight-maximising solver should only pick those when no real
///   partner is available, so it must be far below every real arc weight.
/// - artifact_name: file name of the final augmented graph.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AugmentConfig {
    /// Weight of the "stay unmatched" arcs.
    pub sentinel_weight: i64,
    /// File name of the augmented artifact.
    pub artifact_name: String,
}

impl AugmentConfig {
    /// Config with an explicit sentinel weight and artifact name.
    pub fn new(sentinel_weight: i64, artifact_name: impl Into<String>) -> Self {
        Self {
            sentinel_weight,
            artifact_name: artifact_name.into(),
        }
    }

    #[must_use]
    pub fn with_sentinel_weight(mut self, sentinel_weight: i64) -> Self {
        self.sentinel_weight = sentinel_weight;
        self
    }

    #[must_use]
    pub fn with_artifact_name(mut self, artifact_name: impl Into<String>) -> Self {
        self.artifact_name = artifact_name.into();
        self
    }
}

impl Default for AugmentConfig {
    fn default() -> Self {
        Self::new(DEFAULT_SENTINEL_WEIGHT, DEFAULT_ARTIFACT_NAME)
    }
}

/// Back-translation settings: the counts the original problem was augmented with.
///
/// Only ever holds `0 < source_count <= node_count`; deserialization runs the
/// same check as [`TranslateConfig::new`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TranslateCounts")]
pub struct TranslateConfig {
    source_count: u64,
    node_count: u64,
}

/// Unchecked wire form of [`TranslateConfig`].
#[derive(Deserialize)]
struct TranslateCounts {
    source_count: u64,
    node_count: u64,
}

impl TryFrom<TranslateCounts> for TranslateConfig {
    type Error = TranslateError;

    fn try_from(counts: TranslateCounts) -> Result<Self, Self::Error> {
        Self::new(counts.source_count, counts.node_count)
    }
}

impl TranslateConfig {
    /// Requires `0 < source_count <= node_count` and a node count whose
    /// augmented size `2 * node_count` is representable.
    pub fn new(source_count: u64, node_count: u64) -> Result<Self, TranslateError> {
        if NodeMapper::new(node_count, source_count).is_none() {
            return Err(TranslateError::InvalidNodeCounts {
                sources: source_count,
                nodes: node_count,
            });
        }
        Ok(Self {
            source_count,
            node_count,
        })
    }

    /// Source nodes of the original problem.
    pub const fn source_count(&self) -> u64 {
        self.source_count
    }

    /// Total nodes of the original problem.
    pub const fn node_count(&self) -> u64 {
        self.node_count
    }

    /// Id mapper for these counts.
    pub fn mapper(&self) -> NodeMapper {
        NodeMapper::from_validated(self.node_count, self.source_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_augment_defaults_and_setters() {
        let cfg = AugmentConfig::default()
            .with_sentinel_weight(-5)
            .with_artifact_name("out.asn");
        assert_eq!(cfg, AugmentConfig::new(-5, "out.asn"));
    }

    #[test]
    fn test_translate_config_validation() {
        assert!(TranslateConfig::new(2, 3).is_ok());
        assert!(TranslateConfig::new(3, 3).is_ok());
        assert!(matches!(
            TranslateConfig::new(0, 3),
            Err(TranslateError::InvalidNodeCounts { sources: 0, nodes: 3 })
        ));
        assert!(TranslateConfig::new(4, 3).is_err());
        assert!(TranslateConfig::new(1, u64::MAX).is_err());
    }

    #[test]
    fn test_translate_config_deserialize_validates() {
        let cfg: TranslateConfig =
            serde_json::from_str(r#"{"source_count":2,"node_count":3}"#).unwrap();
        assert_eq!(cfg, TranslateConfig::new(2, 3).unwrap());
        assert_eq!(cfg.mapper(), NodeMapper::new(3, 2).unwrap());

        let err = serde_json::from_str::<TranslateConfig>(r#"{"source_count":5,"node_count":3}"#)
            .unwrap_err();
        assert!(err.to_string().contains("5 source nodes of 3 total nodes"));
        assert!(
            serde_json::from_str::<TranslateConfig>(r#"{"source_count":0,"node_count":3}"#)
                .is_err()
        );
    }

    #[test]
    fn test_translate_config_serializes_counts() {
        let cfg = TranslateConfig::new(2, 3).unwrap();
        let json = serde_json::to_string(&cfg).unwrap();
        assert_eq!(json, r#"{"source_count":2,"node_count":3}"#);
        assert_eq!(serde_json::from_str::<TranslateConfig>(&json).unwrap(), cfg);
    }
}
