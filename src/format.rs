//! Output formatting for decoded documents.

use serde::Serialize;

/// Output format for rendered documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

impl OutputFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "json" => Some(OutputFormat::Json),
            "yaml" | "yml" => Some(OutputFormat::Yaml),
            _ => None,
        }
    }

    /// Render `value` in this format, terminated by a newline.
    pub fn render<T: Serialize + ?Sized>(&self, value: &T) -> anyhow::Result<String> {
        let mut out = match self {
            OutputFormat::Json => serde_json::to_string_pretty(value)?,
            OutputFormat::Yaml => serde_yaml::to_string(value)?,
        };
        if !out.ends_with('\n') {
            out.push('\n');
        }
        Ok(out)
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OutputFormat::from_str(s)
            .ok_or_else(|| format!("Invalid format '{}'. Valid options: json, yaml", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_formats() {
        assert_eq!(OutputFormat::from_str("JSON"), Some(OutputFormat::Json));
        assert_eq!(OutputFormat::from_str("yml"), Some(OutputFormat::Yaml));
        assert_eq!(OutputFormat::from_str("toml"), None);
        assert!("markdown".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_render_json_and_yaml() {
        let doc = json!({"server": {"port": 8000}});
        let json_out = OutputFormat::Json.render(&doc).unwrap();
        assert!(json_out.contains("\"port\": 8000"));
        assert!(json_out.ends_with('\n'));

        let yaml_out = OutputFormat::Yaml.render(&doc).unwrap();
        assert!(yaml_out.contains("port: 8000"));
    }
}
