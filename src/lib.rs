//! envlayer: typed configuration from a file plus environment overrides
//!
//! This module exports the loader, the override engine and the binding
//! table machinery used by the `env_bindings!` macro.

pub mod cli;
pub mod config;
pub mod error;
pub mod format;

pub use config::{
    Binding, EnvBindings, EnvScalar, EnvSource, FieldKind, FieldVisitor, Format, ProcessEnv,
    apply_env_overrides, apply_env_overrides_from, declared_bindings, load, load_config,
    load_config_with, load_file,
};
pub use error::{ConfigError, ConfigResult, ErrorCode};
