//! Dynamic values accepted by the matcher.
//!
//! Primitives convert through a fixed table; objects convert through
//! [`JsObject::to_primitive`], which may run caller-supplied hooks with
//! observable effects.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::canonical::to_canonical_text;
use crate::error::{MatchError, Result, Thrown};
use crate::text::CodeUnits;

/// Preferred primitive type when converting an object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hint {
    String,
    Number,
}

/// Object classification consulted by the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    Ordinary,
    String,
    Number,
    Boolean,
    /// Compiled match pattern; rejected as a search argument
    Pattern,
    /// Execution-scope record; rejected as a receiver
    Scope,
}

impl ObjectKind {
    #[must_use]
    pub const fn class_name(self) -> &'static str {
        match self {
            Self::Ordinary => "Object",
            Self::String => "String",
            Self::Number => "Number",
            Self::Boolean => "Boolean",
            Self::Pattern => "RegExp",
            Self::Scope => "Scope",
        }
    }
}

/// A value with no conversion hooks
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    String(CodeUnits),
}

/// Conversion capability of an object value
pub trait JsObject: fmt::Debug {
    fn kind(&self) -> ObjectKind;

    /// Convert to a primitive, preferring `hint`.
    ///
    /// Errors raised by hooks must be returned as [`MatchError::Conversion`]
    /// carrying the raised value.
    fn to_primitive(&self, hint: Hint) -> Result<Primitive>;
}

/// Any value a caller can pass as receiver, search or position
#[derive(Debug, Clone)]
pub enum Value {
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    String(CodeUnits),
    Object(Rc<dyn JsObject>),
}

impl Value {
    pub fn string(text: impl Into<CodeUnits>) -> Self {
        Self::String(text.into())
    }

    pub fn object(object: impl JsObject + 'static) -> Self {
        Self::Object(Rc::new(object))
    }

    #[must_use]
    pub fn kind(&self) -> Option<ObjectKind> {
        match self {
            Self::Object(object) => Some(object.kind()),
            _ => None,
        }
    }

    /// True for values flagged as compiled match patterns
    #[must_use]
    pub fn is_match_pattern(&self) -> bool {
        self.kind() == Some(ObjectKind::Pattern)
    }

    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Undefined => "undefined",
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::Object(_) => "object",
        }
    }

    /// The primitive form of a non-object value
    #[must_use]
    pub fn as_primitive(&self) -> Option<Primitive> {
        match self {
            Self::Undefined => Some(Primitive::Undefined),
            Self::Null => Some(Primitive::Null),
            Self::Bool(b) => Some(Primitive::Bool(*b)),
            Self::Number(n) => Some(Primitive::Number(*n)),
            Self::String(s) => Some(Primitive::String(s.clone())),
            Self::Object(_) => None,
        }
    }

    /// Convert to a primitive, running object hooks when needed
    pub fn to_primitive(&self, hint: Hint) -> Result<Primitive> {
        match self {
            Self::Object(object) => object.to_primitive(hint),
            other => Ok(other.as_primitive().unwrap_or(Primitive::Undefined)),
        }
    }

    /// Human-readable form that never runs hooks
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::String(s) => format!("{:?}", s.to_string_lossy()),
            Self::Object(object) => format!("[object {}]", object.kind().class_name()),
            other => other
                .as_primitive()
                .map(|p| to_canonical_text(&p).to_string_lossy())
                .unwrap_or_default(),
        }
    }
}

impl PartialEq for Value {
    /// Primitives compare by value (`NaN` equals `NaN`), objects by identity
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Undefined, Self::Undefined) | (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Number(a), Self::Number(b)) => a == b || (a.is_nan() && b.is_nan()),
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Object(a), Self::Object(b)) => std::ptr::addr_eq(Rc::as_ptr(a), Rc::as_ptr(b)),
            _ => false,
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.into())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value.into())
    }
}

impl From<CodeUnits> for Value {
    fn from(value: CodeUnits) -> Self {
        Self::String(value)
    }
}

impl From<Primitive> for Value {
    fn from(value: Primitive) -> Self {
        match value {
            Primitive::Undefined => Self::Undefined,
            Primitive::Null => Self::Null,
            Primitive::Bool(b) => Self::Bool(b),
            Primitive::Number(n) => Self::Number(n),
            Primitive::String(s) => Self::String(s),
        }
    }
}

impl<T: JsObject + 'static> From<Rc<T>> for Value {
    fn from(value: Rc<T>) -> Self {
        Self::Object(value)
    }
}

/// What a conversion hook handed back
#[derive(Debug, Clone)]
pub enum HookOutput {
    /// The hook returned its own receiver object
    This,
    Value(Value),
}

/// A `toString` or `valueOf` override
pub type Hook = Rc<dyn Fn() -> std::result::Result<HookOutput, Thrown>>;

#[derive(Debug, Clone, Copy)]
enum Method {
    ToString,
    ValueOf,
}

/// A boxed primitive (or plain object) with overridable conversion hooks.
///
/// Hooks can be replaced between calls through a shared handle, so a
/// `Rc<WrapperObject>` can be reused across scenarios.
pub struct WrapperObject {
    kind: ObjectKind,
    inner: Primitive,
    to_string: RefCell<Option<Hook>>,
    value_of: RefCell<Option<Hook>>,
}

impl WrapperObject {
    fn with_inner(kind: ObjectKind, inner: Primitive) -> Self {
        Self {
            kind,
            inner,
            to_string: RefCell::new(None),
            value_of: RefCell::new(None),
        }
    }

    /// A `String` wrapper
    pub fn string(text: impl Into<CodeUnits>) -> Self {
        Self::with_inner(ObjectKind::String, Primitive::String(text.into()))
    }

    /// A `Number` wrapper
    #[must_use]
    pub fn number(value: f64) -> Self {
        Self::with_inner(ObjectKind::Number, Primitive::Number(value))
    }

    /// A `Boolean` wrapper
    #[must_use]
    pub fn boolean(value: bool) -> Self {
        Self::with_inner(ObjectKind::Boolean, Primitive::Bool(value))
    }

    /// A plain object whose default `valueOf` returns itself
    #[must_use]
    pub fn plain() -> Self {
        Self::with_inner(ObjectKind::Ordinary, Primitive::Undefined)
    }

    /// Builder: override `toString`
    #[must_use]
    pub fn with_to_string(
        self,
        hook: impl Fn() -> std::result::Result<HookOutput, Thrown> + 'static,
    ) -> Self {
        self.set_to_string(hook);
        self
    }

    /// Builder: override `valueOf`
    #[must_use]
    pub fn with_value_of(
        self,
        hook: impl Fn() -> std::result::Result<HookOutput, Thrown> + 'static,
    ) -> Self {
        self.set_value_of(hook);
        self
    }

    pub fn set_to_string(
        &self,
        hook: impl Fn() -> std::result::Result<HookOutput, Thrown> + 'static,
    ) {
        *self.to_string.borrow_mut() = Some(Rc::new(hook));
    }

    pub fn set_value_of(
        &self,
        hook: impl Fn() -> std::result::Result<HookOutput, Thrown> + 'static,
    ) {
        *self.value_of.borrow_mut() = Some(Rc::new(hook));
    }

    /// Drop both overrides, restoring the default conversions
    pub fn clear_hooks(&self) {
        self.to_string.borrow_mut().take();
        self.value_of.borrow_mut().take();
    }

    #[must_use]
    pub const fn inner(&self) -> &Primitive {
        &self.inner
    }

    fn call(&self, method: Method) -> Result<HookOutput> {
        let slot = match method {
            Method::ToString => &self.to_string,
            Method::ValueOf => &self.value_of,
        };
        // Clone out of the cell so a hook may replace itself while running
        let hook = slot.borrow().clone();
        match hook {
            Some(hook) => hook().map_err(MatchError::Conversion),
            None => Ok(self.default_method(method)),
        }
    }

    fn default_method(&self, method: Method) -> HookOutput {
        match (method, self.kind) {
            (Method::ToString, ObjectKind::Ordinary) => {
                HookOutput::Value(Value::from("[object Object]"))
            }
            (Method::ToString, _) => {
                HookOutput::Value(Value::String(to_canonical_text(&self.inner)))
            }
            (Method::ValueOf, ObjectKind::Ordinary) => HookOutput::This,
            (Method::ValueOf, _) => HookOutput::Value(Value::from(self.inner.clone())),
        }
    }
}

impl JsObject for WrapperObject {
    fn kind(&self) -> ObjectKind {
        self.kind
    }

    fn to_primitive(&self, hint: Hint) -> Result<Primitive> {
        let order = match hint {
            Hint::String => [Method::ToString, Method::ValueOf],
            Hint::Number => [Method::ValueOf, Method::ToString],
        };

        for method in order {
            match self.call(method)? {
                HookOutput::This | HookOutput::Value(Value::Object(_)) => {
                    log::debug!("{method:?} of {} returned an object", self.kind.class_name());
                }
                HookOutput::Value(value) => {
                    if let Some(primitive) = value.as_primitive() {
                        return Ok(primitive);
                    }
                }
            }
        }

        Err(MatchError::NoPrimitive)
    }
}

impl fmt::Debug for WrapperObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WrapperObject")
            .field("kind", &self.kind)
            .field("inner", &self.inner)
            .field("to_string_overridden", &self.to_string.borrow().is_some())
            .field("value_of_overridden", &self.value_of.borrow().is_some())
            .finish()
    }
}

/// A compiled match pattern such as `/\w+/g`.
///
/// Only its classification matters here; no matching engine is attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternObject {
    source: String,
    flags: String,
}

impl PatternObject {
    pub fn new(source: impl Into<String>, flags: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            flags: flags.into(),
        }
    }

    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    #[must_use]
    pub fn flags(&self) -> &str {
        &self.flags
    }
}

impl JsObject for PatternObject {
    fn kind(&self) -> ObjectKind {
        ObjectKind::Pattern
    }

    fn to_primitive(&self, _hint: Hint) -> Result<Primitive> {
        Ok(Primitive::String(CodeUnits::from(format!(
            "/{}/{}",
            self.source, self.flags
        ))))
    }
}

/// An execution-scope record, as seen by a function called without a receiver
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScopeRecord;

impl JsObject for ScopeRecord {
    fn kind(&self) -> ObjectKind {
        ObjectKind::Scope
    }

    fn to_primitive(&self, _hint: Hint) -> Result<Primitive> {
        Ok(Primitive::Undefined)
    }
}
