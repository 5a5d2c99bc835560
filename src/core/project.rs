//! Project-level setup shared by all commands.
//!
//! Resolution order for every setting: command-line flag, then
//! `.intlrc.json`, then the built-in default.

use std::path::{Component, Path, PathBuf};

use anyhow::Result;
use tracing::{debug, info, warn};

use crate::{
    config::{CONFIG_FILE_NAME, Config, load_config},
    core::{
        catalog::CatalogLayout,
        file_scanner::{ScanOptions, scan_files},
        options::ExtractOptions,
    },
};

/// Settings given on the command line. `None` leaves the configured value.
#[derive(Debug, Clone, Default)]
pub struct ProjectOverrides {
    pub source_root: Option<PathBuf>,
    pub messages_dir: Option<PathBuf>,
    pub passes: Option<usize>,
    pub module_source_name: Option<String>,
    pub additional_component_names: Vec<String>,
    pub enforce_descriptions: Option<bool>,
    pub remove_default_message: Option<bool>,
    pub extract_source_location: Option<bool>,
    pub extract_from_format_message_call: Option<bool>,
    pub id_interpolation_pattern: Option<String>,
}

impl ProjectOverrides {
    fn apply(&self, config: &mut Config) {
        if let Some(dir) = &self.messages_dir {
            config.messages_dir = dir.to_string_lossy().to_string();
        }
        if let Some(name) = &self.module_source_name {
            config.module_source_name = name.clone();
        }
        for name in &self.additional_component_names {
            if !config.additional_component_names.contains(name) {
                config.additional_component_names.push(name.clone());
            }
        }
        if let Some(value) = self.enforce_descriptions {
            config.enforce_descriptions = value;
        }
        if let Some(value) = self.remove_default_message {
            config.remove_default_message = value;
        }
        if let Some(value) = self.extract_source_location {
            config.extract_source_location = value;
        }
        if let Some(value) = self.extract_from_format_message_call {
            config.extract_from_format_message_call = value;
        }
        if let Some(pattern) = &self.id_interpolation_pattern {
            config.id_interpolation_pattern = pattern.clone();
        }
    }
}

/// A loaded project: effective configuration and the files to process.
#[derive(Debug)]
pub struct ProjectContext {
    pub config: Config,
    /// Config file in effect, if any.
    pub config_path: Option<PathBuf>,
    /// Directory sources are scanned from; display paths are relative to it.
    pub source_root: PathBuf,
    pub options: ExtractOptions,
    pub layout: CatalogLayout,
    pub files: Vec<PathBuf>,
}

impl ProjectContext {
    pub fn new(overrides: &ProjectOverrides) -> Result<Self> {
        let project_dir = overrides
            .source_root
            .clone()
            .unwrap_or_else(|| PathBuf::from("."));

        let loaded = load_config(&project_dir)?;
        match &loaded.path {
            Some(path) => debug!(path = %path.display(), "loaded config"),
            None => info!("no {} found, using default configuration", CONFIG_FILE_NAME),
        }

        let mut config = loaded.config;
        overrides.apply(&mut config);
        config.validate()?;

        let mut options = config.extract_options()?;
        options.passes = overrides.passes.unwrap_or(1).max(1);

        let source_root = resolve_dir(&project_dir, &config.source_root);
        let messages_dir = resolve_dir(&project_dir, &config.messages_dir);

        let scan = scan_files(
            &source_root,
            &ScanOptions {
                includes: &config.includes,
                ignores: &config.ignores,
                ignore_test_files: config.ignore_test_files,
                exclude_dirs: vec![messages_dir.clone()],
            },
        );
        if scan.skipped_count > 0 {
            warn!(
                count = scan.skipped_count,
                "paths skipped due to access errors"
            );
        }
        debug!(files = scan.files.len(), root = %source_root.display(), "scanned sources");

        Ok(Self {
            layout: CatalogLayout::new(messages_dir, source_root.clone()),
            config_path: loaded.path,
            config,
            source_root,
            options,
            files: scan.files,
        })
    }
}

/// `dir` relative to `base`, unless it is absolute.
fn resolve_dir(base: &Path, dir: &str) -> PathBuf {
    let dir = Path::new(dir);
    if dir.is_absolute() {
        return dir.to_path_buf();
    }
    let mut resolved = base.to_path_buf();
    for component in dir.components() {
        match component {
            Component::CurDir => {}
            other => resolved.push(other),
        }
    }
    resolved
}
