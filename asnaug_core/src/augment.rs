//! Graph augmentation: assignment problem in, perfect-matching problem out.
//!
//! Each node of the original problem gets a mirror twin it can be matched to
//! instead of a real partner. For an arc `(s, d, w)` the session writes
//!
//! 1. the real arc, relocated: `s -> d - S + N` with weight `w`;
//! 2. once per source: `s -> mirror(s)` with the sentinel weight;
//! 3. once per destination: the node line `mirror(d)` and
//!    `mirror(d) -> d - S + N` with the sentinel weight;
//! 4. the mirrored copy `mirror(d) -> mirror(s)` with weight `w`.
//!
//! See [`crate::mapper`] for the id arithmetic.

use std::collections::HashSet;
use std::fmt::Display;
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::AugmentConfig;
use crate::error::{AugmentError, CountKind, Result};
use crate::line::{ArcRecord, GraphLine, classify};
use crate::mapper::NodeMapper;
use crate::problem::{AugmentedProblemSpec, ProblemSpec};
use crate::segment::Segments;
use crate::source_count::infer_source_count;

/// Counts of a successfully augmented problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AugmentSummary {
    /// Counts of the input problem.
    pub problem: ProblemSpec,
    /// Counts written to the augmented problem line.
    pub augmented: AugmentedProblemSpec,
}

/// Result of [`augment_file`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AugmentOutcome {
    /// Graph file that was read.
    pub input: PathBuf,
    /// Input and augmented counts.
    pub summary: AugmentSummary,
    /// Path of the augmented graph.
    pub artifact: PathBuf,
}

#[derive(Debug, Clone, Copy)]
struct ActiveProblem {
    spec: ProblemSpec,
    augmented: AugmentedProblemSpec,
    mapper: NodeMapper,
}

/// Per-file augmentation state: one forward pass, nothing shared.
#[derive(Debug)]
pub struct AugmentSession<W: Write> {
    source_count: u64,
    sentinel: i64,
    segments: Segments<W>,
    problem: Option<ActiveProblem>,
    seen_sources: HashSet<u64>,
    seen_dests: HashSet<u64>,
    seen_nodes: u64,
    seen_arcs: u64,
    line_count: usize,
    sentinel_warned: bool,
}

impl<W: Write> AugmentSession<W> {
    /// Session writing into `segments`, with `source_count` from the pre-scan.
    pub fn new(source_count: u64, config: &AugmentConfig, segments: Segments<W>) -> Self {
        Self {
            source_count,
            sentinel: config.sentinel_weight,
            segments,
            problem: None,
            seen_sources: HashSet::new(),
            seen_dests: HashSet::new(),
            seen_nodes: 0,
            seen_arcs: 0,
            line_count: 0,
            sentinel_warned: false,
        }
    }

    /// Node tally so far: node lines written plus mirror sources registered.
    pub const fn seen_nodes(&self) -> u64 {
        self.seen_nodes
    }

    /// Arc lines written so far.
    pub const fn seen_arcs(&self) -> u64 {
        self.seen_arcs
    }

    /// Feeds the next input line, without its line terminator.
    pub fn process_line(&mut self, raw: &str) -> Result<()> {
        self.line_count += 1;
        match classify(raw) {
            GraphLine::Problem { nodes, arcs } => self.problem_line(raw, nodes, arcs),
            GraphLine::InvalidProblem => Err(self.problem_line_error(raw)),
            GraphLine::Comment => {
                writeln!(self.segments.problem, "{raw}")?;
                Ok(())
            }
            GraphLine::Node(id) => self.node_line(raw, id),
            GraphLine::Arc(arc) => self.arc_line(raw, arc),
            GraphLine::Unrecognized => Err(AugmentError::MalformedLine {
                line: self.line_count,
                text: raw.to_string(),
            }),
        }
    }

    /// Validates the tallies and hands back the filled segments.
    pub fn finish(mut self) -> Result<(AugmentSummary, Segments<W>)> {
        let Some(active) = self.problem else {
            return Err(AugmentError::MissingProblemLine { at: None });
        };

        if self.seen_nodes != active.augmented.node_count {
            return Err(AugmentError::CountMismatch {
                kind: CountKind::Nodes,
                seen: self.seen_nodes,
                expected: active.augmented.node_count,
            });
        }
        if self.seen_arcs != active.augmented.arc_count {
            return Err(AugmentError::CountMismatch {
                kind: CountKind::Arcs,
                seen: self.seen_arcs,
                expected: active.augmented.arc_count,
            });
        }

        self.segments.flush()?;
        let summary = AugmentSummary {
            problem: active.spec,
            augmented: active.augmented,
        };
        Ok((summary, self.segments))
    }

    fn problem_line_error(&self, raw: &str) -> AugmentError {
        if self.problem.is_some() {
            AugmentError::DuplicateProblemLine {
                line: self.line_count,
                text: raw.to_string(),
            }
        } else {
            AugmentError::InvalidProblemLine {
                line: self.line_count,
                text: raw.to_string(),
            }
        }
    }

    fn problem_line(&mut self, raw: &str, nodes: u64, arcs: u64) -> Result<()> {
        if self.problem.is_some() {
            return Err(self.problem_line_error(raw));
        }
        if self.source_count == 0 || self.source_count > nodes {
            return Err(AugmentError::SourceCountOutOfRange {
                line: self.line_count,
                text: raw.to_string(),
                sources: self.source_count,
                nodes,
            });
        }

        let spec = ProblemSpec::new(nodes, arcs, self.source_count);
        let (Some(augmented), Some(mapper)) = (spec.augmented(), NodeMapper::from_spec(&spec))
        else {
            return Err(self.problem_line_error(raw));
        };

        debug!(
            "problem: {} nodes ({} sources), {} arcs -> {} nodes, {} arcs",
            nodes, self.source_count, arcs, augmented.node_count, augmented.arc_count
        );
        writeln!(self.segments.problem, "{}", augmented.problem_line())?;

        self.problem = Some(ActiveProblem {
            spec,
            augmented,
            mapper,
        });
        Ok(())
    }

    fn active(&self, raw: &str) -> Result<ActiveProblem> {
        self.problem.ok_or_else(|| AugmentError::MissingProblemLine {
            at: Some((self.line_count, raw.to_string())),
        })
    }

    fn node_line(&mut self, raw: &str, id: u64) -> Result<()> {
        let active = self.active(raw)?;
        let limit = active.spec.node_count;
        if id == 0 || id > limit {
            return Err(AugmentError::NodeIdOutOfRange {
                line: self.line_count,
                text: raw.to_string(),
                id,
                limit,
            });
        }
        self.emit_node(id)
    }

    fn arc_line(&mut self, raw: &str, arc: ArcRecord<'_>) -> Result<()> {
        let active = self.active(raw)?;
        let limit = active.spec.node_count;
        for id in [arc.source, arc.dest] {
            if id == 0 || id > limit {
                return Err(AugmentError::ArcEndpointOutOfRange {
                    line: self.line_count,
                    text: raw.to_string(),
                    id,
                    limit,
                });
            }
        }

        self.check_arc_sides(raw, &arc);
        self.check_sentinel_dominance(&arc);

        let map = active.mapper;
        let source = map.adjusted_source(arc.source);
        let dest = map.adjusted_destination(arc.dest);
        let mirror_source = map.mirror_of_source(arc.source);
        let mirror_dest = map.mirror_of_dest(arc.dest);

        self.emit_arc(source, dest, arc.weight)?;

        if self.seen_sources.insert(arc.source) {
            // Mirror sources only ever appear as arc endpoints.
            self.seen_nodes += 1;
            self.emit_arc(source, mirror_source, self.sentinel)?;
        }

        if self.seen_dests.insert(arc.dest) {
            self.emit_node(mirror_dest)?;
            self.emit_arc(mirror_dest, dest, self.sentinel)?;
        }

        self.emit_arc(mirror_dest, mirror_source, arc.weight)
    }

    fn check_arc_sides(&self, raw: &str, arc: &ArcRecord<'_>) {
        if arc.source > self.source_count {
            warn!(
                "line {}: arc source {} is not among the {} leading source nodes: [{}]",
                self.line_count, arc.source, self.source_count, raw
            );
        }
        if arc.dest <= self.source_count {
            warn!(
                "line {}: arc destination {} lies in the source range [1, {}]: [{}]",
                self.line_count, arc.dest, self.source_count, raw
            );
        }
    }

    fn check_sentinel_dominance(&mut self, arc: &ArcRecord<'_>) {
        if self.sentinel_warned {
            return;
        }
        let Some(weight) = arc.weight_value() else {
            return;
        };
        if weight >= self.sentinel.unsigned_abs() as f64 {
            warn!(
                "line {}: weight {} is not dominated by the sentinel weight {}",
                self.line_count, arc.weight, self.sentinel
            );
            self.sentinel_warned = true;
        }
    }

    fn emit_node(&mut self, id: u64) -> Result<()> {
        writeln!(self.segments.node, "n {id}")?;
        self.seen_nodes += 1;
        Ok(())
    }

    fn emit_arc(&mut self, source: u64, dest: u64, weight: impl Display) -> Result<()> {
        writeln!(self.segments.arc, "a {source} {dest} {weight}")?;
        self.seen_arcs += 1;
        Ok(())
    }
}

/// Augments the graph file at `input`, writing the artifact into `output_dir`.
///
/// Working segments live in `output_dir` as temporary files and are removed
/// whether or not the run succeeds; the artifact only appears on success.
pub fn augment_file(
    input: &Path,
    output_dir: &Path,
    config: &AugmentConfig,
) -> Result<AugmentOutcome> {
    if !output_dir.is_dir() {
        return Err(AugmentError::OutputDirMissing {
            path: output_dir.to_path_buf(),
        });
    }

    info!("Processing graph file [{}]", input.display());
    let source_count = infer_source_count(input)?;

    let segments = Segments::create_in(output_dir)?;
    let mut session = AugmentSession::new(source_count, config, segments);

    let reader = BufReader::new(File::open(input)?);
    for line in reader.lines() {
        session.process_line(&line?)?;
    }

    let (summary, segments) = session.finish()?;
    let artifact = output_dir.join(&config.artifact_name);
    segments.concatenate_into(&artifact)?;
    info!("Wrote augmented graph file: {}", artifact.display());

    Ok(AugmentOutcome {
        input: input.to_path_buf(),
        summary,
        artifact,
    })
}
