use unitmatch_matcher::StringMatcher;

use crate::case::Case;
use crate::config::RunnerConfig;
use crate::report::{CaseFailure, ConformanceReport};

/// Evaluates parsed cases against the matcher
#[derive(Debug, Clone, Default)]
pub struct Runner {
    config: RunnerConfig,
    matcher: StringMatcher,
}

impl Runner {
    pub fn new(config: RunnerConfig) -> Self {
        Self {
            config,
            matcher: StringMatcher::new(),
        }
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    pub fn run(&self, cases: &[Case]) -> ConformanceReport {
        let mut report = ConformanceReport {
            total: cases.len(),
            ..Default::default()
        };

        for (idx, case) in cases.iter().enumerate() {
            if !self.config.runs(case.call.operation) {
                log::debug!(
                    "Skipping line {}: {} not selected",
                    case.line,
                    case.call.operation.method_name()
                );
                report.skipped += 1;
                continue;
            }

            let actual = case.call.evaluate(&self.matcher);
            if actual == case.expected {
                report.passed += 1;
                continue;
            }

            log::warn!(
                "Line {}: {} expected {}, got {}",
                case.line,
                case.call,
                case.expected,
                actual
            );
            report.failed += 1;
            if report.failures.len() < self.config.max_failures_reported {
                report.failures.push(CaseFailure {
                    line: case.line,
                    source: case.source.clone(),
                    expected: case.expected.to_string(),
                    actual: actual.to_string(),
                });
            }

            if self.config.fail_fast {
                report.skipped += cases.len() - idx - 1;
                report.stopped_early = true;
                break;
            }
        }

        log::info!("{}", report.summary());
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_cases;
    use pretty_assertions::assert_eq;
    use unitmatch_matcher::Operation;

    const MIXED: &str = "\
'abc'.startsWith('a') => true
'abc'.endsWith('a') => true
'abc'.includes('z') => true
'abc'.includes('b') => true
";

    #[test]
    fn counts_passes_and_failures() {
        let cases = parse_cases(MIXED).unwrap();
        let report = Runner::default().run(&cases);
        assert_eq!(report.total, 4);
        assert_eq!(report.passed, 2);
        assert_eq!(report.failed, 2);
        assert_eq!(report.skipped, 0);
        assert_eq!(
            report.failures.iter().map(|f| f.line).collect::<Vec<_>>(),
            vec![2, 3]
        );
        assert_eq!(report.failures[0].actual, "false");
    }

    #[test]
    fn fail_fast_skips_the_rest() {
        let cases = parse_cases(MIXED).unwrap();
        let report = Runner::new(RunnerConfig::strict()).run(&cases);
        assert_eq!(report.passed, 1);
        assert_eq!(report.failed, 1);
        assert_eq!(report.skipped, 2);
        assert!(report.stopped_early);
    }

    #[test]
    fn operation_filter_and_failure_cap() {
        let cases = parse_cases(MIXED).unwrap();
        let config = RunnerConfig {
            operations: vec![Operation::Includes],
            max_failures_reported: 1,
            ..Default::default()
        };
        let report = Runner::new(config).run(&cases);
        assert_eq!(report.skipped, 2);
        assert_eq!(report.passed, 1);
        assert_eq!(report.failed, 1);
        assert_eq!(report.failures.len(), 1);

        let config = RunnerConfig {
            max_failures_reported: 1,
            ..Default::default()
        };
        let report = Runner::new(config).run(&cases);
        assert_eq!(report.failed, 2);
        assert_eq!(report.failures.len(), 1);
    }
}
