//! Layered configuration loading.
//!
//! A configuration value is populated in two phases:
//! 1. **File** - an optional YAML (`.yaml`/`.yml`) or JSON (`.json`) file,
//!    selected by extension, is decoded into the target type
//! 2. **Environment** - every field declared in the target's binding table is
//!    overwritten by its environment variable when that variable is non-empty
//!
//! ## Coercion
//! - strings are taken verbatim
//! - booleans are `true` only for the exact value `true`
//! - integers and floats are parsed in base 10 into the declared width;
//!   malformed values abort the load
//! - any other bound type aborts with "unexpected field type"

mod bindings;
mod env;
mod loader;
mod scalar;

pub use bindings::{Binding, EnvBindings, FieldVisitor, declared_bindings};
pub use env::{EnvSource, ProcessEnv, apply_env_overrides, apply_env_overrides_from};
pub use loader::{Format, load, load_config, load_config_with, load_file};
pub use scalar::{CoerceError, EnvScalar, FieldKind};
