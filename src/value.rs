//! Typed payloads for map entries.
//!
//! The map itself is generic over its value type; `Value` is the payload
//! the diagnostic surface was designed around: text, or arrays of signed
//! integers of one of four widths. Each variant holds a `Cow`, so whether
//! the payload is owned by the map or borrowed from the caller is decided
//! explicitly at the call site and recorded in the type, not in a comment.

use core::fmt;
use std::borrow::Cow;

/// A tagged entry payload: text or a slice of signed integers.
///
/// Scalars are length-1 slices; [`Value::count`] reports the element
/// count either way. The tag and count exist for diagnostic printing only
/// and play no part in key hashing or equality.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value<'a> {
    Str(Cow<'a, str>),
    I8(Cow<'a, [i8]>),
    I16(Cow<'a, [i16]>),
    I32(Cow<'a, [i32]>),
    I64(Cow<'a, [i64]>),
}

/// Discriminant tag of a [`Value`], for diagnostics.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ValueKind {
    Str,
    I8,
    I16,
    I32,
    I64,
}

impl Value<'_> {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Str(_) => ValueKind::Str,
            Value::I8(_) => ValueKind::I8,
            Value::I16(_) => ValueKind::I16,
            Value::I32(_) => ValueKind::I32,
            Value::I64(_) => ValueKind::I64,
        }
    }

    /// Number of elements the payload addresses: 1 for a scalar or a
    /// string, the slice length for integer arrays.
    pub fn count(&self) -> usize {
        match self {
            Value::Str(_) => 1,
            Value::I8(xs) => xs.len(),
            Value::I16(xs) => xs.len(),
            Value::I32(xs) => xs.len(),
            Value::I64(xs) => xs.len(),
        }
    }
}

fn write_ints<T: fmt::Display>(f: &mut fmt::Formatter<'_>, xs: &[T]) -> fmt::Result {
    for (i, x) in xs.iter().enumerate() {
        if i > 0 {
            f.write_str(" ")?;
        }
        write!(f, "{x}")?;
    }
    Ok(())
}

impl fmt::Display for Value<'_> {
    /// Strings render as-is; integer payloads render space-separated.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => f.write_str(s),
            Value::I8(xs) => write_ints(f, xs),
            Value::I16(xs) => write_ints(f, xs),
            Value::I32(xs) => write_ints(f, xs),
            Value::I64(xs) => write_ints(f, xs),
        }
    }
}

impl<'a> From<&'a str> for Value<'a> {
    fn from(s: &'a str) -> Self {
        Value::Str(Cow::Borrowed(s))
    }
}

impl From<String> for Value<'_> {
    fn from(s: String) -> Self {
        Value::Str(Cow::Owned(s))
    }
}

macro_rules! int_value_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value<'_> {
                fn from(x: $ty) -> Self {
                    Value::$variant(Cow::Owned(vec![x]))
                }
            }
            impl<'a> From<&'a [$ty]> for Value<'a> {
                fn from(xs: &'a [$ty]) -> Self {
                    Value::$variant(Cow::Borrowed(xs))
                }
            }
            impl From<Vec<$ty>> for Value<'_> {
                fn from(xs: Vec<$ty>) -> Self {
                    Value::$variant(Cow::Owned(xs))
                }
            }
        )*
    };
}

int_value_from! {
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
}
