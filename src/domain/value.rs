//! Value coercion for param options
//!
//! A param option receives its value as a raw string. The option's [`Coercer`]
//! turns it into a typed value before it is recorded, so callers read back a
//! `u16` or a `PathBuf` rather than re-parsing strings themselves.
//!
//! Coercion is an explicit function chosen when the option is defined.
//! There is no lookup by type name at parse time.

use std::any::{type_name, Any};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("cannot convert '{value}' to {target}: {reason}")]
pub struct CoercionError {
    /// The raw value that was rejected
    pub value: String,

    /// Name of the type the coercer produces
    pub target: &'static str,

    /// Message from the underlying conversion
    pub reason: String,
}

/// A typed value produced by a [`Coercer`]
#[derive(Clone)]
pub struct AnyValue {
    inner: Arc<dyn Any + Send + Sync>,
    type_name: &'static str,
}

impl AnyValue {
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self {
            inner: Arc::new(value),
            type_name: type_name::<T>(),
        }
    }

    /// Returns the value if it holds a `T`
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.downcast_ref::<T>()
    }

    /// Returns the name of the stored type
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

impl fmt::Debug for AnyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AnyValue<{}>", self.type_name)
    }
}

type CoerceFn = dyn Fn(&str) -> Result<AnyValue, CoercionError> + Send + Sync;

/// Converts raw option values into typed values
#[derive(Clone)]
pub struct Coercer {
    target: &'static str,
    func: Arc<CoerceFn>,
}

impl Coercer {
    /// Wraps a conversion function producing `T`
    pub fn new<T, E, F>(func: F) -> Self
    where
        T: Any + Send + Sync,
        E: fmt::Display,
        F: Fn(&str) -> Result<T, E> + Send + Sync + 'static,
    {
        let target = type_name::<T>();
        Self {
            target,
            func: Arc::new(move |raw: &str| {
                func(raw).map(AnyValue::new).map_err(|e| CoercionError {
                    value: raw.to_string(),
                    target,
                    reason: e.to_string(),
                })
            }),
        }
    }

    /// Keeps the value as a `String`
    pub fn string() -> Self {
        Self::new(|raw: &str| Ok::<_, Infallible>(raw.to_string()))
    }

    /// Converts with `T`'s `FromStr` implementation
    pub fn parsed<T>() -> Self
    where
        T: FromStr + Any + Send + Sync,
        T::Err: fmt::Display,
    {
        Self::new(|raw: &str| raw.parse::<T>())
    }

    /// Name of the type this coercer produces
    pub fn target(&self) -> &'static str {
        self.target
    }

    pub fn coerce(&self, raw: &str) -> Result<AnyValue, CoercionError> {
        (self.func)(raw)
    }
}

impl Default for Coercer {
    fn default() -> Self {
        Self::string()
    }
}

impl fmt::Debug for Coercer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Coercer").field("target", &self.target).finish()
    }
}
