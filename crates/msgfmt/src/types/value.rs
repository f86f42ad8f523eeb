use std::collections::{BTreeMap, HashMap};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::hash::BuildHasher;

use serde::{Deserialize, Serialize};

/// A runtime value passed as a message argument.
///
/// # Example
///
/// ```
/// use msgfmt::Value;
///
/// let count: Value = 42.into();
/// assert_eq!(count.as_number(), Some(42));
///
/// let name: Value = "Alice".into();
/// assert_eq!(name.as_string(), Some("Alice"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// An integer, the usual input for plural selection.
    Number(i64),

    /// A floating-point number.
    Float(f64),

    /// A string value.
    String(String),
}

impl Value {
    /// Get this value as an integer, if it is one.
    pub fn as_number(&self) -> Option<i64> {
        match self {
            Value::Number(n) => Some(*n),
            Value::Float(_) | Value::String(_) => None,
        }
    }

    /// Get this value as a float. Integers widen.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Number(n) => Some(*n as f64),
            Value::String(_) => None,
        }
    }

    /// Get this value as a string, if it is one.
    pub fn as_string(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            Value::Number(_) | Value::Float(_) => None,
        }
    }

    /// The numeric form of this value.
    ///
    /// Strings holding an integer or a finite decimal are parsed; anything
    /// else is `None`.
    pub fn numeric(&self) -> Option<Value> {
        match self {
            Value::Number(_) | Value::Float(_) => Some(self.clone()),
            Value::String(s) => {
                let s = s.trim();
                if let Ok(n) = s.parse::<i64>() {
                    return Some(Value::Number(n));
                }
                s.parse::<f64>()
                    .ok()
                    .filter(|f| f.is_finite())
                    .map(Value::Float)
            }
        }
    }

    /// Subtract a plural offset.
    ///
    /// A zero offset returns the value unchanged, whatever its type. Otherwise
    /// the value must be numeric; `None` is returned for non-numeric values and
    /// on overflow.
    pub fn minus_offset(&self, offset: u64) -> Option<Value> {
        if offset == 0 {
            return Some(self.clone());
        }
        match self.numeric()? {
            Value::Number(n) => n.checked_sub(i64::try_from(offset).ok()?).map(Value::Number),
            Value::Float(f) => Some(Value::Float(f - offset as f64)),
            Value::String(_) => None,
        }
    }

    /// The value as a non-negative integer, if it is exactly one.
    pub(crate) fn exact_integer(&self) -> Option<u64> {
        match self.numeric()? {
            Value::Number(n) => u64::try_from(n).ok(),
            Value::Float(f) if f >= 0.0 && f.fract() == 0.0 && f < u64::MAX as f64 => {
                Some(f as u64)
            }
            Value::Float(_) | Value::String(_) => None,
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Value::Number(n) => write!(f, "{n}"),
            Value::Float(n) => write!(f, "{n}"),
            Value::String(s) => write!(f, "{s}"),
        }
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(i64::from(n))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n)
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Number(i64::from(n))
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        i64::try_from(n).map_or(Value::Float(n as f64), Value::Number)
    }
}

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        i64::try_from(n).map_or(Value::Float(n as f64), Value::Number)
    }
}

impl From<f32> for Value {
    fn from(n: f32) -> Self {
        Value::Float(f64::from(n))
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

/// A bag of message arguments looked up by name.
///
/// Maps are looked up by key. Slices, vectors and arrays are positional: the
/// argument `{0}` is the first element.
pub trait Args {
    /// Look up an argument.
    fn arg(&self, name: &str) -> Option<&Value>;
}

impl<S: BuildHasher> Args for HashMap<String, Value, S> {
    fn arg(&self, name: &str) -> Option<&Value> {
        self.get(name)
    }
}

impl Args for BTreeMap<String, Value> {
    fn arg(&self, name: &str) -> Option<&Value> {
        self.get(name)
    }
}

impl Args for [Value] {
    fn arg(&self, name: &str) -> Option<&Value> {
        name.parse::<usize>().ok().and_then(|index| self.get(index))
    }
}

impl Args for Vec<Value> {
    fn arg(&self, name: &str) -> Option<&Value> {
        self.as_slice().arg(name)
    }
}

impl<const N: usize> Args for [Value; N] {
    fn arg(&self, name: &str) -> Option<&Value> {
        self.as_slice().arg(name)
    }
}

impl<A: Args + ?Sized> Args for &A {
    fn arg(&self, name: &str) -> Option<&Value> {
        (**self).arg(name)
    }
}
