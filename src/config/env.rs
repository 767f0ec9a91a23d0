//! Environment variable override engine.
//!
//! Walks a target's declared bindings depth-first in declaration order and
//! overwrites every bound field whose variable is set to a non-empty value.
//! The first failure at any depth stops the walk.

use super::bindings::{EnvBindings, FieldVisitor};
use super::scalar::{CoerceError, EnvScalar};
use crate::error::{ConfigError, ConfigResult};
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, trace};

/// Where override values are read from.
pub trait EnvSource {
    /// Current value of `name`, or `None` when unset.
    fn get(&self, name: &str) -> Option<String>;
}

/// The live process environment, read at lookup time.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn get(&self, name: &str) -> Option<String> {
        std::env::var_os(name).map(|v| v.to_string_lossy().into_owned())
    }
}

impl<S: std::hash::BuildHasher> EnvSource for HashMap<String, String, S> {
    fn get(&self, name: &str) -> Option<String> {
        HashMap::get(self, name).cloned()
    }
}

impl EnvSource for BTreeMap<String, String> {
    fn get(&self, name: &str) -> Option<String> {
        BTreeMap::get(self, name).cloned()
    }
}

impl<E: EnvSource + ?Sized> EnvSource for &E {
    fn get(&self, name: &str) -> Option<String> {
        (**self).get(name)
    }
}

/// Apply overrides from the process environment.
pub fn apply_env_overrides<T: EnvBindings>(target: &mut T) -> ConfigResult<()> {
    apply_env_overrides_from(target, &ProcessEnv)
}

/// Apply overrides read from `env`.
pub fn apply_env_overrides_from<T, E>(target: &mut T, env: &E) -> ConfigResult<()>
where
    T: EnvBindings,
    E: EnvSource + ?Sized,
{
    let mut overrides = Overrides {
        env,
        path: Vec::new(),
        applied: 0,
    };
    target.visit_fields(&mut overrides)?;
    debug!(applied = overrides.applied, "Environment overrides applied");
    Ok(())
}

/// Visitor that performs the overrides.
struct Overrides<'e, E: ?Sized> {
    env: &'e E,
    /// Names of the nested sections currently being walked.
    path: Vec<&'static str>,
    applied: usize,
}

impl<E: EnvSource + ?Sized> Overrides<'_, E> {
    fn field_path(&self, name: &str) -> String {
        let mut path = self.path.join(".");
        if !path.is_empty() {
            path.push('.');
        }
        path.push_str(name);
        path
    }
}

impl<E: EnvSource + ?Sized> FieldVisitor for Overrides<'_, E> {
    fn scalar<S: EnvScalar>(
        &mut self,
        name: &'static str,
        var: &'static str,
        field: &mut S,
    ) -> ConfigResult<()> {
        let raw = match self.env.get(var) {
            Some(raw) if !raw.is_empty() => raw,
            _ => {
                trace!(var, field = name, "No override");
                return Ok(());
            }
        };

        match S::coerce(&raw) {
            Ok(value) => {
                *field = value;
                self.applied += 1;
                debug!(var, field = %self.field_path(name), kind = %S::KIND, "Applied env override");
                Ok(())
            }
            Err(CoerceError::Invalid(message)) => Err(ConfigError::EnvParse {
                var: var.to_string(),
                field: self.field_path(name),
                message,
            }),
            Err(CoerceError::Unsupported) => Err(ConfigError::UnsupportedFieldType {
                var: var.to_string(),
                field: self.field_path(name),
                type_name: std::any::type_name::<S>(),
            }),
        }
    }

    fn nested<B: EnvBindings>(
        &mut self,
        name: &'static str,
        section: &mut B,
    ) -> ConfigResult<()> {
        self.path.push(name);
        section.visit_fields(self)?;
        self.path.pop();
        Ok(())
    }
}
