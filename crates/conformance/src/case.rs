use std::fmt;

use unitmatch_matcher::{
    number_to_text, CodeUnits, MatchError, MatchErrorKind, MatchRequest, Operation, PatternObject,
    ScopeRecord, StringMatcher, Value,
};

/// A literal written in a case line
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    Str(CodeUnits),
    Pattern { source: String, flags: String },
}

impl Literal {
    #[must_use]
    pub fn to_value(&self) -> Value {
        match self {
            Self::Undefined => Value::Undefined,
            Self::Null => Value::Null,
            Self::Bool(b) => Value::Bool(*b),
            Self::Number(n) => Value::Number(*n),
            Self::Str(s) => Value::String(s.clone()),
            Self::Pattern { source, flags } => {
                Value::object(PatternObject::new(source.as_str(), flags.as_str()))
            }
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Undefined => f.write_str("undefined"),
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => f.write_str(&number_to_text(*n)),
            Self::Str(s) => write!(f, "{:?}", s.to_string_lossy()),
            Self::Pattern { source, flags } => write!(f, "/{source}/{flags}"),
        }
    }
}

/// What the method is invoked on
#[derive(Debug, Clone, PartialEq)]
pub enum Receiver {
    Literal(Literal),
    /// Called without a receiver
    Unbound,
    /// Called with an execution-scope record as receiver
    Scope,
}

impl Receiver {
    #[must_use]
    pub fn to_value(&self) -> Value {
        match self {
            Self::Literal(literal) => literal.to_value(),
            Self::Unbound => Value::Undefined,
            Self::Scope => Value::object(ScopeRecord),
        }
    }
}

/// A single method invocation
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub receiver: Receiver,
    pub operation: Operation,
    /// Written arguments; omitted ones are absent
    pub args: Vec<Literal>,
}

impl Call {
    /// Evaluate the call, keeping the full error
    pub fn try_evaluate(&self, matcher: &StringMatcher) -> Result<bool, MatchError> {
        let receiver = self.receiver.to_value();
        let args: Vec<Value> = self.args.iter().map(Literal::to_value).collect();
        let request = MatchRequest {
            receiver: &receiver,
            search: args.first(),
            position: args.get(1),
        };
        matcher.evaluate(self.operation, request)
    }

    /// Evaluate the call, folding errors into an [`Outcome`]
    #[must_use]
    pub fn evaluate(&self, matcher: &StringMatcher) -> Outcome {
        match self.try_evaluate(matcher) {
            Ok(matched) => Outcome::Returned(matched),
            Err(err) => Outcome::Threw(err.kind()),
        }
    }
}

impl fmt::Display for Call {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.receiver {
            Receiver::Literal(literal) => write!(f, "{literal}")?,
            Receiver::Unbound => f.write_str("unbound")?,
            Receiver::Scope => f.write_str("scope")?,
        }
        write!(f, ".{}(", self.operation.method_name())?;
        for (idx, arg) in self.args.iter().enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{arg}")?;
        }
        f.write_str(")")
    }
}

/// Result of evaluating a call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Returned(bool),
    Threw(MatchErrorKind),
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Returned(value) => write!(f, "{value}"),
            Self::Threw(kind) => write!(f, "throws {kind}"),
        }
    }
}

/// A call together with its expected outcome
#[derive(Debug, Clone, PartialEq)]
pub struct Case {
    /// 1-indexed line in the source file
    pub line: usize,
    pub source: String,
    pub call: Call,
    pub expected: Outcome,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evaluates_calls_with_omitted_arguments() {
        let call = Call {
            receiver: Receiver::Literal(Literal::Str("foo undefined".into())),
            operation: Operation::EndsWith,
            args: vec![],
        };
        assert_eq!(call.evaluate(&StringMatcher::new()), Outcome::Returned(true));
    }

    #[test]
    fn folds_errors_into_outcome() {
        let call = Call {
            receiver: Receiver::Scope,
            operation: Operation::Includes,
            args: vec![Literal::Str("a".into())],
        };
        assert_eq!(
            call.evaluate(&StringMatcher::new()),
            Outcome::Threw(MatchErrorKind::InvalidReceiver)
        );
    }

    #[test]
    fn displays_in_case_syntax() {
        let call = Call {
            receiver: Receiver::Literal(Literal::Str("foo".into())),
            operation: Operation::StartsWith,
            args: vec![
                Literal::Pattern {
                    source: r"\w+".into(),
                    flags: String::new(),
                },
                Literal::Number(1e100),
            ],
        };
        assert_eq!(call.to_string(), r#""foo".startsWith(/\w+/, 1e+100)"#);
        assert_eq!(
            Outcome::Threw(MatchErrorKind::PatternArgument).to_string(),
            "throws PatternArgument"
        );
    }
}
