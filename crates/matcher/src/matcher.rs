use crate::error::Result;
use crate::realizer::{ArgumentRealizer, MatchRequest, Operation, RealizedOperands};
use crate::scanner::CodeUnitScanner;
use crate::value::Value;

/// Stateless entry point for the three matching operations
#[derive(Debug, Clone, Copy, Default)]
pub struct StringMatcher;

impl StringMatcher {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Realize the request and scan it for `operation`
    pub fn evaluate(&self, operation: Operation, request: MatchRequest<'_>) -> Result<bool> {
        let RealizedOperands {
            text,
            pattern,
            position,
        } = ArgumentRealizer::realize(operation, request)?;

        let text = text.as_units();
        let pattern = pattern.as_units();
        let matched = match operation {
            Operation::StartsWith => CodeUnitScanner::starts_with(text, pattern, position),
            Operation::EndsWith => CodeUnitScanner::ends_with(text, pattern, position),
            Operation::Includes => CodeUnitScanner::includes(text, pattern, position),
        };

        log::debug!("{} -> {matched}", operation.method_name());
        Ok(matched)
    }

    pub fn starts_with(
        &self,
        receiver: &Value,
        search: Option<&Value>,
        position: Option<&Value>,
    ) -> Result<bool> {
        self.evaluate(Operation::StartsWith, request(receiver, search, position))
    }

    pub fn ends_with(
        &self,
        receiver: &Value,
        search: Option<&Value>,
        position: Option<&Value>,
    ) -> Result<bool> {
        self.evaluate(Operation::EndsWith, request(receiver, search, position))
    }

    pub fn includes(
        &self,
        receiver: &Value,
        search: Option<&Value>,
        position: Option<&Value>,
    ) -> Result<bool> {
        self.evaluate(Operation::Includes, request(receiver, search, position))
    }
}

const fn request<'a>(
    receiver: &'a Value,
    search: Option<&'a Value>,
    position: Option<&'a Value>,
) -> MatchRequest<'a> {
    MatchRequest {
        receiver,
        search,
        position,
    }
}

/// `receiver.startsWith(search, position)`
pub fn starts_with(
    receiver: &Value,
    search: Option<&Value>,
    position: Option<&Value>,
) -> Result<bool> {
    StringMatcher.starts_with(receiver, search, position)
}

/// `receiver.endsWith(search, position)`
pub fn ends_with(
    receiver: &Value,
    search: Option<&Value>,
    position: Option<&Value>,
) -> Result<bool> {
    StringMatcher.ends_with(receiver, search, position)
}

/// `receiver.includes(search, position)`
pub fn includes(
    receiver: &Value,
    search: Option<&Value>,
    position: Option<&Value>,
) -> Result<bool> {
    StringMatcher.includes(receiver, search, position)
}
