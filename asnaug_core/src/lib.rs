//! Assignment-problem augmentation for perfect-matching solvers.
//!
//! An assignment problem in the DIMACS `asn` line format is turned into a
//! perfect-matching problem by giving every node a mirror twin it can be
//! matched to instead of a real partner ([`augment_file`]). Once an external
//! solver has produced a matching, [`translate_file`] drops the matches that
//! involve mirror twins and maps the rest back to the original node ids.
//!
//! The crate only prepares solver input and interprets solver output; it does
//! not solve anything itself.

pub mod augment;
mod config;
pub mod error;
pub mod line;
pub mod mapper;
mod problem;
pub mod segment;
pub mod source_count;
pub mod translate;

pub use crate::augment::{AugmentOutcome, AugmentSession, AugmentSummary, augment_file};
pub use crate::config::*;
pub use crate::error::{AugmentError, CountKind, TranslateError};
pub use crate::mapper::{Band, NodeMapper};
pub use crate::problem::*;
pub use crate::segment::Segments;
pub use crate::source_count::infer_source_count;
pub use crate::translate::{
    MatchingTranslator, TranslateOutcome, TranslationReport, translate_file,
};
