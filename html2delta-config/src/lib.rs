//! Configuration for html2delta front ends.
//!
//! The built-in values live in `defaults/html2delta.default.toml`, which is compiled in, so the
//! documented defaults are the ones the binary runs with. [`Loader`] stacks a project file, an
//! explicit `--config` file and flag overrides over them, in that order, and produces an
//! [`Html2DeltaConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, File, FileFormat};
use html2delta::ConvertOptions;
use serde::Deserialize;
use std::path::Path;

pub use config::{ConfigError, ValueKind};

const DEFAULT_TOML: &str = include_str!("../defaults/html2delta.default.toml");

/// Everything a conversion run can be configured with.
#[derive(Debug, Clone, Deserialize)]
pub struct Html2DeltaConfig {
    pub convert: ConvertConfig,
    pub output: OutputConfig,
}

/// Knobs forwarded to the converter.
#[derive(Debug, Clone, Deserialize)]
pub struct ConvertConfig {
    pub black_list: Vec<String>,
    pub max_depth: usize,
}

impl From<&ConvertConfig> for ConvertOptions {
    fn from(config: &ConvertConfig) -> Self {
        ConvertOptions {
            black_list: config.black_list.clone(),
            max_depth: config.max_depth,
        }
    }
}

/// How the Delta is written out.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub pretty: bool,
    pub compact: bool,
}

/// Builds an [`Html2DeltaConfig`] from the embedded defaults plus any number of layers.
///
/// Later layers win key by key, so a file only needs the settings it changes.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// A loader holding only the compiled-in defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Adds a TOML file that must exist; [`Loader::build`] fails if it does not.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Adds a TOML file that is skipped when absent, such as `./html2delta.toml`.
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Sets one dotted key, e.g. `convert.max_depth`, above every file layer.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Merges all layers and deserializes the result.
    pub fn build(self) -> Result<Html2DeltaConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// The compiled-in defaults with no extra layers.
pub fn load_defaults() -> Result<Html2DeltaConfig, ConfigError> {
    Loader::new().build()
}
