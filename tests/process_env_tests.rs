//! Tests against the live process environment.
//!
//! Every test uses its own variable names so parallel tests never observe
//! each other's values.

use envlayer::{FieldKind, apply_env_overrides, declared_bindings, env_bindings, load};
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
struct Settings {
    version: f64,
    unsigned: u64,
    label: String,
}

env_bindings! {
    Settings {
        version = "ENVLAYER_IT_VERSION",
        unsigned = "ENVLAYER_IT_UNSIGNED",
        label = "ENVLAYER_IT_LABEL",
    }
}

fn set(name: &str, value: &str) {
    // SAFETY: each test owns distinct variable names.
    unsafe {
        std::env::set_var(name, value);
    }
}

#[test]
fn test_process_env_float_and_unsigned() {
    set("ENVLAYER_IT_VERSION", "3.14159");
    set("ENVLAYER_IT_UNSIGNED", "65536");

    let settings: Settings = load("").unwrap();
    assert!((settings.version - 3.14159).abs() < f64::EPSILON);
    assert_eq!(settings.unsigned, 65536);
}

#[test]
fn test_process_env_read_at_call_time() {
    #[derive(Debug, Default)]
    struct Label {
        value: String,
    }
    env_bindings! { Label { value = "ENVLAYER_IT_LIVE_LABEL" } }

    let mut label = Label::default();
    set("ENVLAYER_IT_LIVE_LABEL", "first");
    apply_env_overrides(&mut label).unwrap();
    assert_eq!(label.value, "first");

    set("ENVLAYER_IT_LIVE_LABEL", "second");
    apply_env_overrides(&mut label).unwrap();
    assert_eq!(label.value, "second");
}

#[test]
fn test_declared_bindings_for_settings() {
    let bindings = declared_bindings::<Settings>();
    let vars: Vec<&str> = bindings.iter().map(|b| b.var).collect();
    assert_eq!(
        vars,
        vec!["ENVLAYER_IT_VERSION", "ENVLAYER_IT_UNSIGNED", "ENVLAYER_IT_LABEL"]
    );
    assert_eq!(bindings[0].kind, FieldKind::Float);
    assert_eq!(bindings[2].kind, FieldKind::String);
}
