//! Progress reporting during generation. Mirrors the teacher's `Reporter`
//! trait rather than pulling in a logging crate: a generation run is a
//! short, local, single-shot operation, not a long-lived service worth
//! structured log lines.

pub trait GenerationReporter {
    fn info(&mut self, msg: &str);
    fn warn(&mut self, msg: &str);
}

/// A reporter that discards everything, for library callers and tests that
/// don't want generation progress on stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentReporter;

impl GenerationReporter for SilentReporter {
    fn info(&mut self, _msg: &str) {}
    fn warn(&mut self, _msg: &str) {}
}
