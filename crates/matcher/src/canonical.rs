//! Explicit coercions used at the pipeline's call sites.
//!
//! | primitive   | text                      | number            |
//! |-------------|---------------------------|-------------------|
//! | `undefined` | `"undefined"`             | `NaN`             |
//! | `null`      | `"null"`                  | `0`               |
//! | boolean     | `"true"` / `"false"`      | `1` / `0`         |
//! | number      | shortest round-trip form  | itself            |
//! | string      | itself                    | string grammar    |

use crate::error::Result;
use crate::number::{number_to_text, text_to_number};
use crate::text::CodeUnits;
use crate::value::{Hint, Primitive, Value};

/// Default textual representation of a primitive
#[must_use]
pub fn to_canonical_text(primitive: &Primitive) -> CodeUnits {
    match primitive {
        Primitive::Undefined => CodeUnits::from("undefined"),
        Primitive::Null => CodeUnits::from("null"),
        Primitive::Bool(true) => CodeUnits::from("true"),
        Primitive::Bool(false) => CodeUnits::from("false"),
        Primitive::Number(n) => CodeUnits::from(number_to_text(*n)),
        Primitive::String(s) => s.clone(),
    }
}

/// Default numeric representation of a primitive
#[must_use]
pub fn to_canonical_number(primitive: &Primitive) -> f64 {
    match primitive {
        Primitive::Undefined => f64::NAN,
        Primitive::Null | Primitive::Bool(false) => 0.0,
        Primitive::Bool(true) => 1.0,
        Primitive::Number(n) => *n,
        Primitive::String(s) => text_to_number(s),
    }
}

/// Convert any value to text, running its string-hinted hooks once
pub fn to_text(value: &Value) -> Result<CodeUnits> {
    let primitive = value.to_primitive(Hint::String)?;
    Ok(to_canonical_text(&primitive))
}

/// Convert any value to a number, running its number-hinted hooks once
pub fn to_number(value: &Value) -> Result<f64> {
    let primitive = value.to_primitive(Hint::Number)?;
    Ok(to_canonical_number(&primitive))
}
