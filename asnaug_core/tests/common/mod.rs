#![allow(dead_code)]

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock};

/// Routes library logging into the test harness output, once per binary.
pub fn init_test_logger() {
    static INIT: OnceLock<()> = OnceLock::new();
    let _ = INIT.get_or_init(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Shared in-memory sink for formatted log lines.
#[derive(Clone, Default)]
pub struct CapturedLog(Arc<Mutex<Vec<u8>>>);

impl io::Write for CapturedLog {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Runs `f` with a thread-local subscriber and returns its result together
/// with every warning and error logged meanwhile.
pub fn capture_warnings<T>(f: impl FnOnce() -> T) -> (T, String) {
    let log = CapturedLog::default();
    let sink = log.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::WARN)
        .with_ansi(false)
        .without_time()
        .with_writer(move || sink.clone())
        .finish();

    let result = tracing::subscriber::with_default(subscriber, f);
    let text = String::from_utf8_lossy(&log.0.lock().unwrap()).into_owned();
    (result, text)
}

/// Path to a named fixture file.
pub fn fixture_file(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Writes `contents` to `name` inside `dir` and returns the path.
pub fn write_input(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("Failed to write test input");
    path
}

/// Complete bipartite assignment problem: sources `1..=sources`, destinations after them.
pub fn complete_bipartite(sources: u64, dests: u64) -> String {
    let nodes = sources + dests;
    let mut out = format!("c complete {sources}x{dests}\np asn {nodes} {}\n", sources * dests);
    for id in 1..=sources {
        out.push_str(&format!("n {id}\n"));
    }
    out.push_str("c destinations\n");
    for id in sources + 1..=nodes {
        out.push_str(&format!("n {id}\n"));
    }
    for s in 1..=sources {
        for d in sources + 1..=nodes {
            out.push_str(&format!("a {s} {d} {}\n", s * 10 + d));
        }
    }
    out
}

/// Number of entries in `dir`.
pub fn dir_entries(dir: &Path) -> usize {
    fs::read_dir(dir).expect("Failed to read dir").count()
}
