//! Back-translation of a solver's matching into the original node numbering.
//!
//! Only `f <a> <b> <weight>` lines whose source is a real source (`[1, S]`)
//! and whose destination is a real, shifted destination (`[N+1, 2N-S]`)
//! survive; anything touching a mirror twin means "unmatched" in the original
//! problem and is dropped. Surviving destinations are shifted back with
//! `b - N + S`. Nothing here is fatal except I/O.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use tracing::{debug, info};

use crate::config::TranslateConfig;
use crate::error::TranslateError;
use crate::mapper::{Band, NodeMapper};

lazy_static! {
    static ref FLOW_LINE: Regex = Regex::new(r"^f\s+(\d+)\s+(\d+)\s+(-?\d+)").unwrap();
}

/// One `f` record of a solution file, weight kept as its literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlowRecord<'a> {
    /// Augmented source id.
    pub source: u64,
    /// Augmented destination id.
    pub dest: u64,
    /// Integer literal, possibly negative.
    pub weight: &'a str,
}

/// Parses an `f <a> <b> <weight>` line; `None` for anything else.
pub fn parse_flow(line: &str) -> Option<FlowRecord<'_>> {
    let caps = FLOW_LINE.captures(line)?;
    let weight = caps.get(3)?.as_str();
    Some(FlowRecord {
        source: caps[1].parse().ok()?,
        dest: caps[2].parse().ok()?,
        weight,
    })
}

/// Tally of one translation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TranslationReport {
    /// Matches written to the output, relabelled.
    pub kept: u64,
    /// Matches involving a mirror node.
    pub discarded: u64,
    /// Lines that are not flow records.
    pub skipped: u64,
}

/// Matching back-translator for one augmented problem.
#[derive(Debug, Clone, Copy)]
pub struct MatchingTranslator {
    mapper: NodeMapper,
}

impl MatchingTranslator {
    /// Translator for the counts a problem was augmented with.
    pub fn new(config: TranslateConfig) -> Self {
        Self {
            mapper: config.mapper(),
        }
    }

    /// Whether the match pairs a real source with a real destination.
    pub fn is_valid_match(&self, flow: &FlowRecord<'_>) -> bool {
        self.mapper.band(flow.source) == Some(Band::RealSource)
            && self.mapper.band(flow.dest) == Some(Band::RealDestination)
    }

    /// Relabels a kept match into original node space.
    pub fn translate(&self, flow: &FlowRecord<'_>) -> (u64, u64) {
        (flow.source, self.mapper.original_destination(flow.dest))
    }

    /// Streams `reader` to `writer`, keeping and relabelling genuine matches.
    pub fn translate_lines<R: BufRead, W: Write>(
        &self,
        reader: R,
        mut writer: W,
    ) -> io::Result<TranslationReport> {
        let mut report = TranslationReport::default();

        for line in reader.lines() {
            let line = line?;
            let Some(flow) = parse_flow(&line) else {
                debug!("Skipping line: [{}]", line);
                report.skipped += 1;
                continue;
            };

            if !self.is_valid_match(&flow) {
                debug!(
                    "Discarding match [{}, {}, {}]",
                    flow.source, flow.dest, flow.weight
                );
                report.discarded += 1;
                continue;
            }

            let (source, dest) = self.translate(&flow);
            debug!(
                "Keeping match [{}, {}, {}] -> [{}, {}, {}]",
                flow.source, flow.dest, flow.weight, source, dest, flow.weight
            );
            writeln!(writer, "f {} {} {}", source, dest, flow.weight)?;
            report.kept += 1;
        }

        writer.flush()?;
        Ok(report)
    }
}

/// Result of [`translate_file`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranslateOutcome {
    /// Solution file that was read.
    pub input: PathBuf,
    /// Translated matching.
    pub output: PathBuf,
    /// Per-line tally.
    pub report: TranslationReport,
}

/// Back-translates the solution file at `input` into `output`.
pub fn translate_file(
    config: TranslateConfig,
    input: &Path,
    output: &Path,
) -> Result<TranslateOutcome, TranslateError> {
    info!(
        "Processing matching file [{}]. Original problem had {} source nodes and {} total nodes...",
        input.display(),
        config.source_count(),
        config.node_count()
    );

    let reader = BufReader::new(File::open(input)?);
    let writer = BufWriter::new(File::create(output)?);
    let report = MatchingTranslator::new(config).translate_lines(reader, writer)?;

    info!(
        "Kept {} matches, discarded {}, skipped {} lines",
        report.kept, report.discarded, report.skipped
    );
    Ok(TranslateOutcome {
        input: input.to_path_buf(),
        output: output.to_path_buf(),
        report,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn translator(sources: u64, nodes: u64) -> MatchingTranslator {
        MatchingTranslator::new(TranslateConfig::new(sources, nodes).unwrap())
    }

    #[test]
    fn test_parse_flow() {
        let flow = parse_flow("f 1 4 -1000000000").unwrap();
        assert_eq!(flow.source, 1);
        assert_eq!(flow.dest, 4);
        assert_eq!(flow.weight, "-1000000000");
        assert!(parse_flow("f 1 4").is_none());
        assert!(parse_flow("c f 1 4 5").is_none());
        assert!(parse_flow("s 17").is_none());

        // Weights are copied as text, whatever their magnitude.
        let wide = parse_flow("f 1 4 -99999999999999999999").unwrap();
        assert_eq!(wide.weight, "-99999999999999999999");
    }

    #[test]
    fn test_translate_lines() {
        let input = "c solution\ns 5\nf 1 4 5\nf 2 6 -1000000000\nf 3 5 5\n";
        let mut out = Vec::new();
        let report = translator(2, 3)
            .translate_lines(input.as_bytes(), &mut out)
            .unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "f 1 3 5\n");
        assert_eq!(
            report,
            TranslationReport {
                kept: 1,
                discarded: 2,
                skipped: 2
            }
        );
    }

    #[test]
    fn test_missing_input_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let config = TranslateConfig::new(1, 2).unwrap();
        let err = translate_file(
            config,
            Path::new("/non/existent/file"),
            &dir.path().join("out.txt"),
        )
        .unwrap_err();
        assert!(matches!(err, TranslateError::Io(_)));
    }
}
