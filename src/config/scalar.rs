//! Coercion of raw environment strings into typed field values.

use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;

/// Kind of a bindable field, as seen by the override engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    String,
    Bool,
    Signed,
    Unsigned,
    Float,
    /// Declared as bindable but not settable from a string.
    Unsupported,
}

impl FieldKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::String => "string",
            FieldKind::Bool => "bool",
            FieldKind::Signed => "signed",
            FieldKind::Unsigned => "unsigned",
            FieldKind::Float => "float",
            FieldKind::Unsupported => "unsupported",
        }
    }
}

impl std::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a raw value could not be coerced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoerceError {
    /// The value does not parse as the field's numeric type.
    Invalid(String),
    /// The field's type has no string coercion.
    Unsupported,
}

/// A field type that can be bound to an environment variable.
pub trait EnvScalar: Sized {
    const KIND: FieldKind;

    /// Convert a non-empty raw environment value into `Self`.
    fn coerce(raw: &str) -> Result<Self, CoerceError>;
}

impl EnvScalar for String {
    const KIND: FieldKind = FieldKind::String;

    fn coerce(raw: &str) -> Result<Self, CoerceError> {
        Ok(raw.to_string())
    }
}

impl EnvScalar for bool {
    const KIND: FieldKind = FieldKind::Bool;

    /// Only the exact literal `true` is true. Anything else is false.
    fn coerce(raw: &str) -> Result<Self, CoerceError> {
        Ok(raw == "true")
    }
}

macro_rules! parsed_scalar {
    ($kind:expr => $($ty:ty),+ $(,)?) => {
        $(
            impl EnvScalar for $ty {
                const KIND: FieldKind = $kind;

                fn coerce(raw: &str) -> Result<Self, CoerceError> {
                    // Unsigned values take no sign at all, not even `+`.
                    if matches!(Self::KIND, FieldKind::Unsigned) && raw.starts_with('+') {
                        return Err(CoerceError::Invalid(format!(
                            "unexpected sign (expected {})",
                            stringify!($ty)
                        )));
                    }
                    raw.parse::<$ty>()
                        .map_err(|e| CoerceError::Invalid(format!("{} (expected {})", e, stringify!($ty))))
                }
            }
        )+
    };
}

parsed_scalar!(FieldKind::Signed => i8, i16, i32, i64, i128, isize);
parsed_scalar!(FieldKind::Unsigned => u8, u16, u32, u64, u128, usize);
parsed_scalar!(FieldKind::Float => f32, f64);

macro_rules! unsupported_scalar {
    ($(impl<$($g:ident),*> for $ty:ty;)+) => {
        $(
            impl<$($g),*> EnvScalar for $ty {
                const KIND: FieldKind = FieldKind::Unsupported;

                fn coerce(_raw: &str) -> Result<Self, CoerceError> {
                    Err(CoerceError::Unsupported)
                }
            }
        )+
    };
}

unsupported_scalar! {
    impl<> for char;
    impl<> for PathBuf;
    impl<T> for Vec<T>;
    impl<T> for Option<T>;
    impl<K, V, S> for HashMap<K, V, S>;
    impl<K, V> for BTreeMap<K, V>;
}
