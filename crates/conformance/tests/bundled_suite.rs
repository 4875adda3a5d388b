use std::io::Write;

use pretty_assertions::assert_eq;
use unitmatch_conformance::{
    bundled_cases, parse_cases, ConformanceError, Outcome, Runner, RunnerConfig,
};
use unitmatch_matcher::{MatchErrorKind, Operation};

#[test]
fn bundled_suite_passes_completely() {
    let cases = bundled_cases().expect("bundled suite parses");
    assert!(cases.len() >= 80, "suite has {} cases", cases.len());

    let report = Runner::default().run(&cases);
    assert_eq!(report.failures, vec![]);
    assert_eq!(report.passed, cases.len());
    assert!(report.is_success());
}

#[test]
fn bundled_suite_covers_every_operation_and_error_kind() {
    let cases = bundled_cases().unwrap();
    for op in Operation::ALL {
        assert!(
            cases.iter().any(|c| c.call.operation == op),
            "no cases for {}",
            op.method_name()
        );
    }
    for kind in [MatchErrorKind::PatternArgument, MatchErrorKind::InvalidReceiver] {
        assert!(cases.iter().any(|c| c.expected == Outcome::Threw(kind)));
    }
}

#[test]
fn filtered_run_skips_other_operations() {
    let cases = bundled_cases().unwrap();
    let ends_with = cases
        .iter()
        .filter(|c| c.call.operation == Operation::EndsWith)
        .count();

    let report = Runner::new(RunnerConfig::only(Operation::EndsWith)).run(&cases);
    assert_eq!(report.passed, ends_with);
    assert_eq!(report.skipped, cases.len() - ends_with);
}

#[test]
fn wrong_expectations_are_reported_with_source() {
    let text = "\
'foo 1e100 bar'.includes(1e100) => true
'foo bar'.includes(/o/) => false
'foo bar'.includes('o') => true
";
    let cases = parse_cases(text).unwrap();
    let report = Runner::default().run(&cases);

    assert_eq!(report.failed, 2);
    assert_eq!(report.failures[0].line, 1);
    assert_eq!(report.failures[0].actual, "false");
    assert_eq!(report.failures[1].source, "'foo bar'.includes(/o/) => false");
    assert_eq!(report.failures[1].actual, "throws PatternArgument");
}

#[test]
fn config_file_drives_the_run() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "fail_fast = true").unwrap();
    writeln!(file, "operations = [\"startsWith\"]").unwrap();

    let config = RunnerConfig::from_path(file.path()).unwrap();
    assert!(config.fail_fast);

    let cases = parse_cases(
        "'a'.includes('a') => true\n'a'.startsWith('b') => true\n'a'.startsWith('a') => true\n",
    )
    .unwrap();
    let report = Runner::new(config).run(&cases);
    assert_eq!(report.skipped, 2);
    assert_eq!(report.failed, 1);
    assert!(report.stopped_early);
}

#[test]
fn missing_config_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = RunnerConfig::from_path(&dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ConformanceError::IoError(_)));
}

#[test]
fn parse_errors_point_at_the_line() {
    let err = parse_cases("'a'.includes('a') => true\n\n'a'.includes('a' => true\n").unwrap_err();
    match err {
        ConformanceError::ParseError { line, message, .. } => {
            assert_eq!(line, 3);
            assert_eq!(message, "expected ')'");
        }
        other => panic!("unexpected error {other:?}"),
    }
}
