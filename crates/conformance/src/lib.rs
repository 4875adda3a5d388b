//! Conformance cases for the unitmatch string-matching contract
//!
//! Case files hold one call per line together with its expected outcome:
//!
//! ```text
//! 'foo bar'.includes('bar', 4) => true
//! 'foo bar'.startsWith(/\w+/) => throws PatternArgument
//! unbound.endsWith('a') => throws InvalidReceiver
//! ```
//!
//! ## Example
//!
//! ```
//! use unitmatch_conformance::{parse_cases, Runner, RunnerConfig};
//!
//! let cases = parse_cases("'abc'.endsWith('bc') => true").unwrap();
//! let report = Runner::new(RunnerConfig::default()).run(&cases);
//! assert!(report.is_success());
//! ```

mod case;
mod config;
mod error;
mod lexer;
mod parser;
mod report;
mod runner;
mod suite;

pub use case::{Call, Case, Literal, Outcome, Receiver};
pub use config::RunnerConfig;
pub use error::{ConformanceError, Result};
pub use lexer::{tokenize, Token, TokenKind};
pub use parser::{parse_call, parse_case, parse_cases};
pub use report::{CaseFailure, ConformanceReport};
pub use runner::Runner;
pub use suite::{bundled_cases, BUNDLED_SUITE};
