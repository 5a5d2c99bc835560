use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use glob::Pattern;
use serde::{Deserialize, Serialize};

use crate::core::{
    options::{DEFAULT_MODULE_SOURCE_NAME, ExtractOptions},
    validate::{DEFAULT_ID_PATTERN, IdPattern},
};

pub const CONFIG_FILE_NAME: &str = ".intlrc.json";

pub const TEST_FILE_PATTERNS: &[&str] = &[
    "**/*.test.tsx",
    "**/*.test.ts",
    "**/*.test.jsx",
    "**/*.test.js",
    "**/*.spec.tsx",
    "**/*.spec.ts",
    "**/*.spec.jsx",
    "**/*.spec.js",
    "**/__tests__/**",
];

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default)]
    pub includes: Vec<String>,
    #[serde(default = "default_ignores")]
    pub ignores: Vec<String>,
    #[serde(default = "default_ignore_test_files")]
    pub ignore_test_files: bool,
    #[serde(default = "default_source_root")]
    pub source_root: String,
    #[serde(default = "default_messages_dir")]
    pub messages_dir: String,
    #[serde(default = "default_module_source_name")]
    pub module_source_name: String,
    #[serde(default)]
    pub additional_component_names: Vec<String>,
    #[serde(default)]
    pub enforce_descriptions: bool,
    #[serde(default = "default_enforce_default_message")]
    pub enforce_default_message: bool,
    #[serde(default)]
    pub remove_default_message: bool,
    #[serde(default)]
    pub extract_source_location: bool,
    #[serde(default)]
    pub extract_from_format_message_call: bool,
    #[serde(default = "default_id_interpolation_pattern")]
    pub id_interpolation_pattern: String,
}

fn default_ignores() -> Vec<String> {
    vec!["**/node_modules/**".to_string()]
}

fn default_ignore_test_files() -> bool {
    true
}

fn default_source_root() -> String {
    "./".to_string()
}

fn default_messages_dir() -> String {
    "./messages".to_string()
}

fn default_module_source_name() -> String {
    DEFAULT_MODULE_SOURCE_NAME.to_string()
}

fn default_enforce_default_message() -> bool {
    true
}

fn default_id_interpolation_pattern() -> String {
    DEFAULT_ID_PATTERN.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            includes: Vec::new(),
            ignores: default_ignores(),
            ignore_test_files: default_ignore_test_files(),
            source_root: default_source_root(),
            messages_dir: default_messages_dir(),
            module_source_name: default_module_source_name(),
            additional_component_names: Vec::new(),
            enforce_descriptions: false,
            enforce_default_message: default_enforce_default_message(),
            remove_default_message: false,
            extract_source_location: false,
            extract_from_format_message_call: false,
            id_interpolation_pattern: default_id_interpolation_pattern(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error if a glob pattern or the id interpolation pattern is
    /// invalid.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignores {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
        }

        // Includes without wildcards are literal directory paths.
        for pattern in &self.includes {
            if pattern.contains('*') || pattern.contains('?') {
                Pattern::new(pattern).with_context(|| {
                    format!("Invalid glob pattern in 'includes': \"{}\"", pattern)
                })?;
            }
        }

        self.id_pattern()?;

        if self.module_source_name.trim().is_empty() {
            anyhow::bail!("'moduleSourceName' must not be empty");
        }

        Ok(())
    }

    pub fn id_pattern(&self) -> Result<IdPattern> {
        self.id_interpolation_pattern
            .parse()
            .with_context(|| "Invalid 'idInterpolationPattern'".to_string())
    }

    /// The extraction policy this configuration describes.
    pub fn extract_options(&self) -> Result<ExtractOptions> {
        Ok(ExtractOptions {
            enforce_descriptions: self.enforce_descriptions,
            enforce_default_message: self.enforce_default_message,
            remove_default_message: self.remove_default_message,
            module_source_name: self.module_source_name.clone(),
            additional_component_names: self.additional_component_names.clone(),
            extract_source_location: self.extract_source_location,
            extract_from_format_message_call: self.extract_from_format_message_call,
            id_pattern: self.id_pattern()?,
            ..ExtractOptions::default()
        })
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    let mut json =
        serde_json::to_string_pretty(&config).context("Failed to generate default config.")?;
    json.push('\n');
    Ok(json)
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// Where the config was loaded from; `None` when using defaults.
    pub path: Option<PathBuf>,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                path: Some(path),
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            path: None,
        }),
    }
}
