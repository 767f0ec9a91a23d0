//! Per-structure binding tables.
//!
//! A configuration type describes its environment bindings by implementing
//! [`EnvBindings`], usually through the [`env_bindings!`](crate::env_bindings)
//! macro. The implementation hands each bound field to a [`FieldVisitor`] in
//! declaration order: scalars together with their variable name, nested
//! sections so the visitor can descend into them.
//!
//! ```
//! use envlayer::env_bindings;
//!
//! #[derive(Default)]
//! struct Server {
//!     host: String,
//!     port: u16,
//! }
//!
//! #[derive(Default)]
//! struct AppConfig {
//!     server: Server,
//!     debug: bool,
//! }
//!
//! env_bindings! {
//!     Server {
//!         host = "SERVER_HOST",
//!         port = "SERVER_PORT",
//!     }
//! }
//!
//! env_bindings! {
//!     AppConfig {
//!         server => nested,
//!         debug = "APP_DEBUG",
//!     }
//! }
//!
//! let vars: std::collections::HashMap<String, String> =
//!     [("SERVER_PORT".to_string(), "9090".to_string())].into_iter().collect();
//! let mut config = AppConfig::default();
//! envlayer::apply_env_overrides_from(&mut config, &vars).unwrap();
//! assert_eq!(config.server.port, 9090);
//! ```

use super::scalar::{EnvScalar, FieldKind};
use crate::error::ConfigResult;
use serde::Serialize;

/// Receives the bound fields of a structure.
pub trait FieldVisitor {
    /// A scalar field bound to the environment variable `var`.
    fn scalar<S: EnvScalar>(
        &mut self,
        name: &'static str,
        var: &'static str,
        field: &mut S,
    ) -> ConfigResult<()>;

    /// A nested section, visited in place of the field itself.
    fn nested<B: EnvBindings>(&mut self, name: &'static str, section: &mut B) -> ConfigResult<()>;
}

/// A structure whose fields can be overridden from the environment.
pub trait EnvBindings {
    /// Hand every bound field to `visitor`, in declaration order.
    ///
    /// Must stop at and return the first error from the visitor.
    fn visit_fields<V: FieldVisitor>(&mut self, visitor: &mut V) -> ConfigResult<()>;
}

/// Schemaless documents carry no bindings.
impl EnvBindings for serde_yaml::Value {
    fn visit_fields<V: FieldVisitor>(&mut self, _visitor: &mut V) -> ConfigResult<()> {
        Ok(())
    }
}

/// Implements [`EnvBindings`] from a binding table.
///
/// Each entry is either `field = "VARIABLE"` for a scalar bound to an
/// environment variable, or `field => nested` for a nested section that
/// implements `EnvBindings` itself. Fields not listed are never touched.
/// Entries are visited in the order written.
#[macro_export]
macro_rules! env_bindings {
    (@fields $this:ident, $visitor:ident;) => {};
    (@fields $this:ident, $visitor:ident; $field:ident = $var:literal $(, $($rest:tt)*)?) => {
        $visitor.scalar(stringify!($field), $var, &mut $this.$field)?;
        $crate::env_bindings!(@fields $this, $visitor; $($($rest)*)?);
    };
    (@fields $this:ident, $visitor:ident; $field:ident => nested $(, $($rest:tt)*)?) => {
        $visitor.nested(stringify!($field), &mut $this.$field)?;
        $crate::env_bindings!(@fields $this, $visitor; $($($rest)*)?);
    };
    ($ty:ty { $($body:tt)* }) => {
        impl $crate::EnvBindings for $ty {
            #[allow(unused_variables)]
            fn visit_fields<V: $crate::FieldVisitor>(
                &mut self,
                visitor: &mut V,
            ) -> $crate::ConfigResult<()> {
                $crate::env_bindings!(@fields self, visitor; $($body)*);
                Ok(())
            }
        }
    };
}

/// One declared binding, as listed by [`declared_bindings`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Binding {
    /// Dotted path of the field from the root structure.
    pub path: String,
    pub var: &'static str,
    pub kind: FieldKind,
    pub type_name: &'static str,
}

/// List every binding declared by `T`, in the order overrides are applied.
pub fn declared_bindings<T: EnvBindings + Default>() -> Vec<Binding> {
    let mut collector = BindingCollector::default();
    let mut sample = T::default();
    let result = sample.visit_fields(&mut collector);
    debug_assert!(result.is_ok(), "binding collection never fails");
    collector.bindings
}

#[derive(Default)]
struct BindingCollector {
    prefix: Vec<&'static str>,
    bindings: Vec<Binding>,
}

impl FieldVisitor for BindingCollector {
    fn scalar<S: EnvScalar>(
        &mut self,
        name: &'static str,
        var: &'static str,
        _field: &mut S,
    ) -> ConfigResult<()> {
        let mut path: Vec<&str> = self.prefix.clone();
        path.push(name);
        self.bindings.push(Binding {
            path: path.join("."),
            var,
            kind: S::KIND,
            type_name: std::any::type_name::<S>(),
        });
        Ok(())
    }

    fn nested<B: EnvBindings>(&mut self, name: &'static str, section: &mut B) -> ConfigResult<()> {
        self.prefix.push(name);
        let result = section.visit_fields(self);
        self.prefix.pop();
        result
    }
}
