use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};

/// Maximum config file size (1 MB) - prevents memory exhaustion from malformed files
const MAX_CONFIG_SIZE: u64 = 1024 * 1024;

/// Name of the optional config file looked up next to the analyzed path
pub const CONFIG_FILE_NAME: &str = "go-perf.toml";

/// Settings for the command-line front end.
///
/// Nothing here changes what the detection engine finds; the heuristic
/// patterns and structural rules are compiled in.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub analysis: AnalysisConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_format")]
    pub format: String,

    #[serde(default = "default_color")]
    pub color: String,
}

fn default_format() -> String {
    "console".to_string()
}

fn default_color() -> String {
    "auto".to_string()
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            color: default_color(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Abort a directory run on the first unreadable file
    #[serde(default)]
    pub fail_fast: bool,

    /// Extra directory names to skip, on top of the built-in exclusions
    #[serde(default)]
    pub exclude: Vec<String>,
}

impl Config {
    /// Load config from go-perf.toml in the given path, or return default
    ///
    /// # Arguments
    ///
    /// * `path` - File or directory being analyzed; for a file, its parent
    ///   directory is searched
    ///
    /// # Errors
    ///
    /// Returns an error if the path doesn't exist or if the config file
    /// exists but cannot be read or parsed.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::config(format!(
                "Path does not exist: {}",
                path.display()
            )));
        }

        let dir_path = if path.is_file() {
            path.parent().unwrap_or(path)
        } else {
            path
        };

        let config_path = dir_path.join(CONFIG_FILE_NAME);
        if !config_path.exists() {
            return Ok(Config::default());
        }

        let metadata = std::fs::metadata(&config_path).map_err(|e| Error::io(&config_path, e))?;
        if metadata.len() > MAX_CONFIG_SIZE {
            return Err(Error::config(format!(
                "Config file too large ({} bytes, max {} bytes): {}",
                metadata.len(),
                MAX_CONFIG_SIZE,
                config_path.display()
            )));
        }

        let content =
            std::fs::read_to_string(&config_path).map_err(|e| Error::io(&config_path, e))?;
        let config: Config = toml::from_str(&content).map_err(|e| {
            Error::config(format!("{}: {}", config_path.display(), e))
        })?;
        config.validate()?;

        tracing::debug!(path = %config_path.display(), "loaded configuration");
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if !matches!(self.output.format.as_str(), "console" | "json") {
            return Err(Error::config(format!(
                "Unknown output format '{}' (expected \"console\" or \"json\")",
                self.output.format
            )));
        }
        if !matches!(self.output.color.as_str(), "auto" | "always" | "never") {
            return Err(Error::config(format!(
                "Unknown color mode '{}' (expected \"auto\", \"always\" or \"never\")",
                self.output.color
            )));
        }
        Ok(())
    }

    /// Generate default TOML config
    pub fn default_toml() -> &'static str {
        r#"# go-perf configuration

[output]
format = "console"  # "console", "json"
color = "auto"      # "auto", "always", "never"

[analysis]
# Stop a directory run at the first file that cannot be read.
# When false, unreadable files are reported and skipped.
fail_fast = false
# Directory names to skip in addition to hidden dirs, vendor and testdata.
exclude = []
"#
    }
}
