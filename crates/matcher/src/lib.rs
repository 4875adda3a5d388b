//! # unitmatch matcher
//!
//! `startsWith`, `endsWith` and `includes` with scripting-language coercion
//! semantics, evaluated over UTF-16 code units.
//!
//! ## Architecture
//!
//! ```text
//! receiver, search?, position?
//!     │
//!     ├──> ArgumentRealizer
//!     │    ├─> guard receiver (undefined / null / scope record)
//!     │    ├─> receiver → text
//!     │    ├─> reject pattern search argument
//!     │    ├─> position → integer
//!     │    ├─> search → text
//!     │    └─> clamp position
//!     │
//!     └──> CodeUnitScanner → bool
//! ```
//!
//! Conversions of object values go through [`JsObject::to_primitive`], so
//! caller-supplied hooks run exactly once each, in pipeline order, and a
//! raised value comes back untouched inside [`MatchError::Conversion`].
//!
//! ## Example
//!
//! ```rust
//! use unitmatch_matcher::{includes, starts_with, Value};
//!
//! let text = Value::from("foo bar");
//! assert!(includes(&text, Some(&Value::from("bar")), Some(&Value::from(4))).unwrap());
//! assert!(starts_with(&text, Some(&Value::from("foo")), Some(&Value::from(-1))).unwrap());
//!
//! // An omitted search argument is the text "undefined"
//! assert!(!includes(&text, None, None).unwrap());
//! ```

mod canonical;
mod error;
mod matcher;
mod number;
mod realizer;
mod scanner;
mod text;
mod value;

pub use canonical::{to_canonical_number, to_canonical_text, to_number, to_text};
pub use error::{MatchError, MatchErrorKind, Result, Thrown};
pub use matcher::{ends_with, includes, starts_with, StringMatcher};
pub use number::{clamp_position, number_to_text, text_to_number, to_integer_or_infinity};
pub use realizer::{ArgumentRealizer, MatchRequest, Operation, RealizedOperands};
pub use scanner::CodeUnitScanner;
pub use text::CodeUnits;
pub use value::{
    Hint, Hook, HookOutput, JsObject, ObjectKind, PatternObject, Primitive, ScopeRecord, Value,
    WrapperObject,
};
