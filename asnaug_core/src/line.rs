//! Line classification for the assignment-problem graph grammar.
//!
//! Every raw input line is turned into exactly one [`GraphLine`]; the
//! augmentation session and the source-count pre-scan both consume that tag
//! instead of re-running pattern checks of their own.
//!
//! Recognised shapes (leading token is case-insensitive):
//! - `p asn <N> <M>`
//! - `n <id>`
//! - `a <src> <dst> <weight>`
//! - `c <text>`

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref PROBLEM_TOKEN: Regex = Regex::new(r"(?i)^p(\s|$)").unwrap();
    static ref PROBLEM_LINE: Regex = Regex::new(r"(?i)^p\s+asn\s+(\d+)\s+(\d+)\s*$").unwrap();
    static ref NODE_LINE: Regex = Regex::new(r"(?i)^n\s+(\d+)\s*$").unwrap();
    static ref ARC_LINE: Regex =
        Regex::new(r"(?i)^a\s+(\d+)\s+(\d+)\s+(\d+(?:\.\d*)?|\.\d+)\s*$").unwrap();
    static ref COMMENT_LINE: Regex = Regex::new(r"(?i)^c(\s|$)").unwrap();
}

/// An arc as written in the input, weight kept as its literal text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArcRecord<'a> {
    /// Original source node id.
    pub source: u64,
    /// Original destination node id.
    pub dest: u64,
    /// Decimal weight literal, copied through untouched.
    pub weight: &'a str,
}

impl ArcRecord<'_> {
    /// Numeric value of the weight literal.
    pub fn weight_value(&self) -> Option<f64> {
        self.weight.parse().ok()
    }
}

/// One classified input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphLine<'a> {
    /// `p asn <N> <M>`
    Problem {
        /// `N`
        nodes: u64,
        /// `M`
        arcs: u64,
    },
    /// Starts with a `p` token but is not a valid assignment problem line.
    InvalidProblem,
    /// `n <id>`
    Node(u64),
    /// `a <src> <dst> <weight>`
    Arc(ArcRecord<'a>),
    /// `c ...`, passed through verbatim.
    Comment,
    /// Anything else, including malformed node and arc lines.
    Unrecognized,
}

/// Classifies a single line. Trailing `\n` / `\r\n` must already be stripped.
pub fn classify(line: &str) -> GraphLine<'_> {
    if let Some(caps) = ARC_LINE.captures(line) {
        let source = caps[1].parse();
        let dest = caps[2].parse();
        let weight = caps.get(3).map_or("", |m| m.as_str());
        return match (source, dest) {
            (Ok(source), Ok(dest)) => GraphLine::Arc(ArcRecord {
                source,
                dest,
                weight,
            }),
            _ => GraphLine::Unrecognized,
        };
    }

    if let Some(caps) = NODE_LINE.captures(line) {
        return caps[1]
            .parse()
            .map_or(GraphLine::Unrecognized, GraphLine::Node);
    }

    if COMMENT_LINE.is_match(line) {
        return GraphLine::Comment;
    }

    if PROBLEM_TOKEN.is_match(line) {
        return match PROBLEM_LINE.captures(line) {
            Some(caps) => match (caps[1].parse(), caps[2].parse()) {
                (Ok(nodes), Ok(arcs)) => GraphLine::Problem { nodes, arcs },
                _ => GraphLine::InvalidProblem,
            },
            None => GraphLine::InvalidProblem,
        };
    }

    GraphLine::Unrecognized
}
