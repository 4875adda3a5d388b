use serde::{Deserialize, Serialize};

/// One case whose outcome differed from its expectation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseFailure {
    pub line: usize,
    pub source: String,
    pub expected: String,
    pub actual: String,
}

/// Summary of a conformance run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConformanceReport {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    /// Cases filtered out by configuration or left unrun after a fail-fast stop
    pub skipped: usize,
    /// Listed failures, capped by `max_failures_reported`
    pub failures: Vec<CaseFailure>,
    pub stopped_early: bool,
}

impl ConformanceReport {
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.failed == 0
    }

    /// One-line summary, e.g. `42 cases: 41 passed, 1 failed, 0 skipped`
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "{} cases: {} passed, {} failed, {} skipped",
            self.total, self.passed, self.failed, self.skipped
        )
    }

    /// Human-readable rendering with one block per listed failure
    #[must_use]
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        for failure in &self.failures {
            out.push_str(&format!("FAIL line {}: {}\n", failure.line, failure.source));
            out.push_str(&format!("  expected: {}\n", failure.expected));
            out.push_str(&format!("  actual:   {}\n", failure.actual));
        }
        let unlisted = self.failed.saturating_sub(self.failures.len());
        if unlisted > 0 {
            out.push_str(&format!("... {unlisted} more failures not shown\n"));
        }
        if self.stopped_early {
            out.push_str("stopped after first failure\n");
        }
        out.push_str(&self.summary());
        out.push('\n');
        out
    }
}
