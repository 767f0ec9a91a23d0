//! Check subcommand for the envlayer CLI
//!
//! Runs a config file through the loader and prints the decoded document,
//! or the loader's error with its error code.

use crate::config::load_config;
use crate::error::{ConfigError, ErrorCode};
use crate::format::OutputFormat;
use clap::Args;
use serde::Serialize;
use serde_yaml::Value;
use std::io::Write;

/// Arguments for the check subcommand
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Config file to check (.yaml, .yml or .json)
    #[arg(value_name = "FILE")]
    pub file: String,

    /// Output format: json (default) or yaml
    #[arg(short, long, default_value = "json", value_name = "FORMAT")]
    pub format: OutputFormat,
}

/// Outcome of a check, as reported to the user.
#[derive(Debug)]
pub enum CheckOutcome {
    /// The file decoded; carries the resulting document.
    Loaded(Value),
    /// The loader rejected the file.
    Failed(ConfigError),
}

impl CheckOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, CheckOutcome::Loaded(_))
    }

    /// Report body: the document itself, or `{code, message}` for failures.
    pub fn to_report(&self) -> Report<'_> {
        match self {
            CheckOutcome::Loaded(doc) => Report::Document(doc),
            CheckOutcome::Failed(err) => Report::Failure {
                code: err.code(),
                message: err.to_string(),
            },
        }
    }
}

/// Rendered form of a [`CheckOutcome`].
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Report<'a> {
    Document(&'a Value),
    Failure { code: ErrorCode, message: String },
}

/// Load `args.file` into a schemaless document.
pub fn check_file(args: &CheckArgs) -> CheckOutcome {
    let mut doc = Value::Null;
    match load_config(&args.file, &mut doc) {
        Ok(()) => CheckOutcome::Loaded(doc),
        Err(err) => CheckOutcome::Failed(err),
    }
}

/// Run the check and write the report to `out`.
///
/// Returns whether the file loaded successfully.
pub fn run_check<W: Write>(args: &CheckArgs, out: &mut W) -> anyhow::Result<bool> {
    let outcome = check_file(args);
    if let CheckOutcome::Failed(ref err) = outcome {
        tracing::error!("{}", err);
    }
    out.write_all(args.format.render(&outcome.to_report())?.as_bytes())?;
    Ok(outcome.is_success())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    fn args(file: String, format: OutputFormat) -> CheckArgs {
        CheckArgs { file, format }
    }

    #[test]
    fn test_check_yaml_prints_document_as_json() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("app.yaml");
        fs::write(&path, "server:\n  port: 8080\n").unwrap();

        let mut out = Vec::new();
        let ok = run_check(&args(path.to_string_lossy().to_string(), OutputFormat::Json), &mut out)
            .unwrap();
        assert!(ok);
        let printed: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(printed, json!({"server": {"port": 8080}}));
    }

    #[test]
    fn test_check_missing_file_reports_code() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nope.json");

        let mut out = Vec::new();
        let ok = run_check(&args(path.to_string_lossy().to_string(), OutputFormat::Json), &mut out)
            .unwrap();
        assert!(!ok);
        let printed: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(printed["code"], "FILE_READ_ERROR");
    }

    #[test]
    fn test_check_malformed_file_reports_decode_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("bad.json");
        fs::write(&path, "{ not json").unwrap();

        let outcome = check_file(&args(path.to_string_lossy().to_string(), OutputFormat::Yaml));
        assert!(!outcome.is_success());
        match outcome.to_report() {
            Report::Failure { code, .. } => assert_eq!(code, ErrorCode::DecodeError),
            other => panic!("unexpected report: {other:?}"),
        }
    }

    #[test]
    fn test_check_yaml_only_document_shapes() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("ports.yaml");
        fs::write(&path, "ports:\n  80: http\n  443: https\nmode: !Slow 5\nceiling: .inf\n")
            .unwrap();

        let outcome = check_file(&args(path.to_string_lossy().to_string(), OutputFormat::Yaml));
        let CheckOutcome::Loaded(doc) = &outcome else {
            panic!("unexpected outcome: {outcome:?}");
        };
        assert_eq!(doc["ports"][80], Value::from("http"));
        assert_eq!(doc["ceiling"].as_f64(), Some(f64::INFINITY));

        let mut out = Vec::new();
        let ok = run_check(&args(path.to_string_lossy().to_string(), OutputFormat::Yaml), &mut out)
            .unwrap();
        assert!(ok);
        let rendered = String::from_utf8(out).unwrap();
        assert!(rendered.contains("!Slow 5"));
        assert!(rendered.contains(".inf"));
    }
}
