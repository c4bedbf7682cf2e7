//! Configuration file support for cleaning runs

use anyhow::{bail, Context, Result};
use medclean_core::{CleanConfig, KeyColumns};
use medclean_formats::{delimiter_for_path, CsvConfig, NaValues};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Settings read from a YAML or TOML file. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
    /// Duplicate key, in order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_columns: Option<Vec<String>>,
    /// Single ASCII character; defaults to tab for `.tsv` input, comma otherwise
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delimiter: Option<char>,
    /// Tokens read as missing values; replaces the built-in set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub na_values: Option<Vec<String>>,
}

impl FileConfig {
    /// Load configuration from a file (YAML or TOML)
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let extension = path.extension().and_then(|s| s.to_str()).unwrap_or("");

        match extension {
            "yaml" | "yml" => serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse YAML config: {}", path.display())),
            "toml" => toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display())),
            _ => Err(anyhow::anyhow!(
                "Unsupported config file format: {}. Use .yaml, .yml, or .toml",
                extension
            )),
        }
    }
}

/// Values given on the command line, which take precedence over the file
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub key_columns: Vec<String>,
    pub dry_run: bool,
}

/// Merge command-line values, file values and built-in defaults, in that order
pub fn resolve(overrides: Overrides, file: FileConfig) -> Result<CleanConfig> {
    let defaults = CleanConfig::default();

    let input = overrides.input.or(file.input).unwrap_or(defaults.input);
    let output = overrides.output.or(file.output).unwrap_or(defaults.output);

    let key_columns = if !overrides.key_columns.is_empty() {
        KeyColumns::new(overrides.key_columns)?
    } else if let Some(names) = file.key_columns {
        KeyColumns::new(names)?
    } else {
        defaults.key_columns
    };

    let delimiter = match file.delimiter {
        Some(c) if c.is_ascii() && c != '"' && c != '\n' && c != '\r' => c as u8,
        Some(c) => bail!("Invalid delimiter {:?}: must be a single ASCII character", c),
        None => delimiter_for_path(&input),
    };

    let na_values = file.na_values.map(NaValues::new).unwrap_or_default();

    Ok(CleanConfig {
        input,
        output,
        key_columns,
        csv: CsvConfig {
            delimiter,
            na_values,
            ..CsvConfig::default()
        },
        dry_run: overrides.dry_run,
    })
}
