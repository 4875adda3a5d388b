//! Ordered realization of a match request into scanner operands.
//!
//! ```text
//! receiver guard
//!     │
//!     ├──> receiver  → text        (string-hinted hooks)
//!     ├──> search    ≠ pattern?    (classification only, no hooks)
//!     ├──> position  → integer     (number-hinted hooks, default per operation)
//!     ├──> search    → text        (string-hinted hooks)
//!     │
//!     └──> clamp position into [0, len(text)]
//! ```
//!
//! Each step runs at most once and the first error ends the pipeline.

use serde::{Deserialize, Serialize};

use crate::canonical::{to_number, to_text};
use crate::error::{MatchError, Result};
use crate::number::{clamp_position, to_integer_or_infinity};
use crate::text::CodeUnits;
use crate::value::{ObjectKind, Value};

/// One of the three matching operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Operation {
    StartsWith,
    EndsWith,
    Includes,
}

impl Operation {
    pub const ALL: [Self; 3] = [Self::StartsWith, Self::EndsWith, Self::Includes];

    /// Method name as written in scripts
    #[must_use]
    pub const fn method_name(self) -> &'static str {
        match self {
            Self::StartsWith => "startsWith",
            Self::EndsWith => "endsWith",
            Self::Includes => "includes",
        }
    }

    #[must_use]
    pub fn from_method_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.method_name() == name)
    }
}

/// Arguments of one call, borrowed for the duration of the call
#[derive(Debug, Clone, Copy)]
pub struct MatchRequest<'a> {
    pub receiver: &'a Value,
    /// `None` when the argument was omitted
    pub search: Option<&'a Value>,
    /// `None` when the argument was omitted
    pub position: Option<&'a Value>,
}

impl<'a> MatchRequest<'a> {
    #[must_use]
    pub const fn new(receiver: &'a Value) -> Self {
        Self {
            receiver,
            search: None,
            position: None,
        }
    }

    /// Builder: set the search argument
    #[must_use]
    pub const fn search(mut self, search: &'a Value) -> Self {
        self.search = Some(search);
        self
    }

    /// Builder: set the position argument
    #[must_use]
    pub const fn position(mut self, position: &'a Value) -> Self {
        self.position = Some(position);
        self
    }
}

/// Primitive operands ready for scanning
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RealizedOperands {
    pub text: CodeUnits,
    pub pattern: CodeUnits,
    /// Already clamped into `[0, text.len()]`
    pub position: usize,
}

/// Runs the realization pipeline for one operation
pub struct ArgumentRealizer;

impl ArgumentRealizer {
    pub fn realize(operation: Operation, request: MatchRequest<'_>) -> Result<RealizedOperands> {
        Self::guard_receiver(request.receiver)?;

        let text = to_text(request.receiver).map_err(|err| match err {
            MatchError::NoPrimitive => MatchError::InvalidReceiver("object without primitive"),
            other => other,
        })?;
        log::debug!(
            "{}: receiver realized ({} code units)",
            operation.method_name(),
            text.len()
        );

        let absent = Value::Undefined;
        let search = request.search.unwrap_or(&absent);
        if search.is_match_pattern() {
            log::debug!("{}: rejected pattern argument", operation.method_name());
            return Err(MatchError::PatternArgument);
        }

        let position = match request.position {
            None | Some(Value::Undefined) => match operation {
                Operation::StartsWith | Operation::Includes => 0.0,
                Operation::EndsWith => text.len() as f64,
            },
            Some(value) => to_integer_or_infinity(to_number(value)?),
        };

        let pattern = to_text(search)?;

        let position = clamp_position(position, text.len());
        log::debug!(
            "{}: pattern of {} code units at position {position}",
            operation.method_name(),
            pattern.len()
        );

        Ok(RealizedOperands {
            text,
            pattern,
            position,
        })
    }

    fn guard_receiver(receiver: &Value) -> Result<()> {
        match receiver {
            Value::Undefined | Value::Null => {
                Err(MatchError::InvalidReceiver(receiver.type_name()))
            }
            Value::Object(object) if object.kind() == ObjectKind::Scope => {
                Err(MatchError::InvalidReceiver("scope record"))
            }
            _ => Ok(()),
        }
    }
}
