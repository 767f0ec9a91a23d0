//! File loading followed by environment overrides.
//!
//! The loader reads an optional file, picks a decoder from the file
//! extension and decodes straight into the target type. The override engine
//! always runs afterwards, whether or not a file was loaded.

use super::bindings::EnvBindings;
use super::env::{EnvSource, ProcessEnv, apply_env_overrides_from};
use crate::error::{ConfigError, ConfigResult};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::Path;
use tracing::{debug, warn};

/// File format decoder, selected by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    Yaml,
    Json,
}

impl Format {
    /// Decoder for a file extension (including the leading dot).
    ///
    /// Matching is case-sensitive: `.YAML` has no decoder.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            ".yaml" | ".yml" => Some(Format::Yaml),
            ".json" => Some(Format::Json),
            _ => None,
        }
    }

    /// Decoder for a path, from the text after the last `.` of its file name.
    pub fn from_path(path: &Path) -> Option<Self> {
        extension_of(path).and_then(Self::from_extension)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Yaml => "yaml",
            Format::Json => "json",
        }
    }

    /// Decode raw bytes into a `T`.
    ///
    /// Returns `Ok(None)` for an empty YAML stream, which holds no document.
    pub fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<Option<T>, String> {
        match self {
            Format::Yaml if bytes.iter().all(u8::is_ascii_whitespace) => Ok(None),
            Format::Yaml => serde_yaml::from_slice(bytes)
                .map(Some)
                .map_err(|e| e.to_string()),
            Format::Json => serde_json::from_slice(bytes)
                .map(Some)
                .map_err(|e| e.to_string()),
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Extension of the file name, leading dot included.
fn extension_of(path: &Path) -> Option<&str> {
    let name = path.file_name()?.to_str()?;
    name.rfind('.').map(|idx| &name[idx..])
}

/// Load `path` into `target` without applying environment overrides.
///
/// An empty or all-whitespace path loads nothing. A file whose extension has
/// no decoder is read but not decoded. Fields the file does not mention take
/// the values `T`'s deserializer gives them, so targets should carry
/// `#[serde(default)]`. `target` is only written once the whole file has
/// decoded successfully.
pub fn load_file<T: DeserializeOwned>(path: &str, target: &mut T) -> ConfigResult<()> {
    let path = path.trim();
    if path.is_empty() {
        debug!("No config file given, skipping decode");
        return Ok(());
    }
    let path = Path::new(path);

    let bytes = std::fs::read(path).map_err(|source| ConfigError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let Some(format) = Format::from_path(path) else {
        warn!(
            "No decoder for config file {}, keeping current values",
            path.display()
        );
        return Ok(());
    };

    let decoded = format.decode(&bytes).map_err(|message| ConfigError::Decode {
        path: path.to_path_buf(),
        format,
        message,
    })?;

    match decoded {
        Some(value) => {
            *target = value;
            debug!(format = %format, "Loaded config file {}", path.display());
        }
        None => debug!("Config file {} holds no document", path.display()),
    }
    Ok(())
}

/// Load `path` into `target`, then apply overrides from the process
/// environment.
///
/// The first failure from either phase is returned; `target` may hold the
/// file values and any overrides applied before the failing field.
pub fn load_config<T>(path: &str, target: &mut T) -> ConfigResult<()>
where
    T: DeserializeOwned + EnvBindings,
{
    load_config_with(path, target, &ProcessEnv)
}

/// Like [`load_config`], reading overrides from `env`.
pub fn load_config_with<T, E>(path: &str, target: &mut T, env: &E) -> ConfigResult<()>
where
    T: DeserializeOwned + EnvBindings,
    E: EnvSource + ?Sized,
{
    load_file(path, target)?;
    apply_env_overrides_from(target, env)
}

/// Build a `T` from its defaults, `path` and the process environment.
pub fn load<T>(path: &str) -> ConfigResult<T>
where
    T: Default + DeserializeOwned + EnvBindings,
{
    let mut config = T::default();
    load_config(path, &mut config)?;
    Ok(config)
}
