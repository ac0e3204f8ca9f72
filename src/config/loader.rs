//! Configuration loading and management

use crate::constants::{mode, CONFIG_FILENAMES, DEFAULT_EXTENSIONS};
use crate::error::{Error, Result};
use crate::ext::PathExt;
use crate::renderer::{HelperFunctions, Templater};
use crate::template::{TemplateMode, TemplateSetBuilder};
use log::warn;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Describes a template set: where to find it and how to parse it.
#[derive(Debug, Clone, Deserialize)]
pub struct TemplateSetConfig {
    #[serde(default = "get_default_root")]
    pub root: PathBuf,
    #[serde(default = "get_default_mode")]
    pub mode: String,
    #[serde(default = "get_default_extensions")]
    pub extensions: Vec<String>,
    #[serde(default = "get_default_true")]
    pub helpers: bool,
    #[serde(default = "get_default_true")]
    pub strict: bool,
}

impl Default for TemplateSetConfig {
    fn default() -> Self {
        Self {
            root: get_default_root(),
            mode: get_default_mode(),
            extensions: get_default_extensions(),
            helpers: true,
            strict: true,
        }
    }
}

impl TemplateSetConfig {
    /// Checks the configuration and resolves its mode.
    pub fn validate(&self) -> Result<TemplateMode> {
        let mode = self.mode.parse::<TemplateMode>()?;
        if self.extensions.is_empty() {
            return Err(Error::ConfigValidation("extensions must not be empty".into()));
        }
        for ext in self.extensions.iter().filter(|ext| !ext.starts_with('.')) {
            warn!("Extension '{ext}' has no leading '.' and will not match any file");
        }
        Ok(mode)
    }

    /// Loads the first of `templet.json`, `templet.yaml`, `templet.yml` found
    /// in `config_dir`. A relative `root` is resolved against `config_dir`.
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_dir = config_dir.as_ref();

        for config_file_name in CONFIG_FILENAMES.iter() {
            let config_file_path = config_dir.join(config_file_name);

            if config_file_path.exists() {
                let content = std::fs::read_to_string(&config_file_path)?;
                let mut config = match config_file_path.dotted_extension() {
                    b".json" => Self::from_json_str(&content)?,
                    _ => Self::from_yaml_str(&content)?,
                };
                if config.root.is_relative() {
                    config.root = config_dir.join(&config.root);
                }
                return Ok(config);
            }
        }

        Err(Error::ConfigNotFound {
            config_dir: config_dir.to_str_checked()?.to_string(),
            config_files: CONFIG_FILENAMES.join(", "),
        })
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// A builder carrying every setting of this configuration. Fails on an
    /// invalid configuration without touching the filesystem.
    pub fn builder(&self) -> Result<TemplateSetBuilder> {
        let mode = self.validate()?;
        let mut builder = TemplateSetBuilder::new(&self.root)
            .mode(mode)
            .extensions(self.extensions.iter().cloned())
            .strict(self.strict);
        if self.helpers {
            builder = builder.helpers(HelperFunctions::new());
        }
        Ok(builder)
    }

    /// Validates, walks `root` and parses the collected files.
    pub fn build(&self) -> Result<Box<dyn Templater>> {
        self.builder()?.build()
    }
}

fn get_default_root() -> PathBuf {
    PathBuf::from(".")
}

fn get_default_mode() -> String {
    mode::HTML.to_string()
}

fn get_default_extensions() -> Vec<String> {
    DEFAULT_EXTENSIONS.iter().map(|ext| ext.to_string()).collect()
}

fn get_default_true() -> bool {
    true
}
