//! Configuration file loading.
//!
//! `.gettext-miner.json` maps target names to their settings. Targets keep
//! the order of the file. Building is two-phase: the JSON is first decoded
//! into typed settings, then each extractor and formatter is constructed
//! (and validated) from its settings.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::{Map, Value, json};

use crate::core::extract::{
    AnyExtractor, LatteExtractor, LatteSettings, NeonExtractor, NeonSettings, PhpExtractor,
    PhpSettings, SqlExtractor, SqlSettings,
};
use crate::core::format::{
    ArrayFileFormatter, ArrayFileSettings, Formatter, FormatterKind, GettextFormatter,
    GettextSettings,
};
use crate::core::{Miner, Target};
use crate::error::ConfigError;

pub const CONFIG_FILE_NAME: &str = ".gettext-miner.json";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TargetConfig {
    pub sources: Vec<String>,
    #[serde(default)]
    pub files: Vec<String>,
    pub extractors: Vec<ExtractorConfig>,
    pub output: OutputConfig,
}

/// One extractor entry, selected by its `"extractor"` name.
#[derive(Debug, Deserialize)]
#[serde(tag = "extractor")]
pub enum ExtractorConfig {
    #[serde(rename = "PHP")]
    Php(PhpSettings),
    Nette(PhpSettings),
    LegacyLatte(LatteSettings),
    Neon(NeonSettings),
    #[serde(rename = "SQL")]
    Sql(SqlSettings),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputConfig {
    pub destination: String,
    #[serde(default)]
    pub formatter: FormatterKind,
    /// Formatter specific settings, decoded once the formatter is known.
    #[serde(flatten)]
    pub settings: Map<String, Value>,
}

#[derive(Debug, Default)]
pub struct Config {
    pub targets: Vec<(String, TargetConfig)>,
}

impl ExtractorConfig {
    pub fn build(self) -> Result<AnyExtractor, ConfigError> {
        Ok(match self {
            ExtractorConfig::Php(settings) => PhpExtractor::new(settings)?.into(),
            ExtractorConfig::Nette(settings) => PhpExtractor::nette(settings)?.into(),
            ExtractorConfig::LegacyLatte(settings) => LatteExtractor::new(settings)?.into(),
            ExtractorConfig::Neon(settings) => NeonExtractor::new(settings)?.into(),
            ExtractorConfig::Sql(settings) => SqlExtractor::new(settings).into(),
        })
    }
}

impl OutputConfig {
    pub fn build(self) -> Result<Formatter> {
        let settings = Value::Object(self.settings);
        Ok(match self.formatter {
            FormatterKind::Gettext => {
                let settings: GettextSettings = serde_json::from_value(settings)
                    .context("Invalid Gettext output settings")?;
                GettextFormatter::new(settings)?.into()
            }
            FormatterKind::ArrayFile => {
                let settings: ArrayFileSettings = serde_json::from_value(settings)
                    .context("Invalid ArrayFile output settings")?;
                ArrayFileFormatter::new(settings).into()
            }
        })
    }
}

impl TargetConfig {
    pub fn build(self, name: &str, project_root: &Path) -> Result<Target> {
        if self.sources.is_empty() {
            return Err(ConfigError::target(name, "sources are missing or invalid.").into());
        }
        if self.extractors.is_empty() {
            return Err(ConfigError::target(name, "extractors are missing or invalid.").into());
        }

        let extractors = self
            .extractors
            .into_iter()
            .map(ExtractorConfig::build)
            .collect::<Result<Vec<_>, _>>()
            .with_context(|| format!("Target [{}]: invalid extractor configuration", name))?;
        let destination = self.output.destination.clone();
        let formatter = self
            .output
            .build()
            .with_context(|| format!("Target [{}]: invalid output configuration", name))?;

        Ok(Target::new(
            name,
            &destination,
            project_root,
            &self.sources,
            &self.files,
            extractors,
            formatter,
        ))
    }
}

impl Config {
    /// Decode the configuration text, keeping the target order of the file.
    pub fn parse(content: &str) -> Result<Self> {
        let raw: Map<String, Value> = serde_json::from_str(content)
            .context("The config file is empty or invalid.")?;
        let targets = raw
            .into_iter()
            .map(|(name, value)| {
                let target = serde_json::from_value(value).with_context(|| {
                    format!("Target [{}]: configuration is missing or invalid.", name)
                })?;
                Ok((name, target))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { targets })
    }

    /// Build every target into a miner, resolving paths against `project_root`.
    pub fn into_miner(self, project_root: &Path) -> Result<Miner> {
        let mut miner = Miner::new();
        for (name, target) in self.targets {
            miner.add_target(target.build(&name, project_root)?)?;
        }
        Ok(miner)
    }
}

pub fn default_config_json() -> Result<String> {
    let config = json!({
        "main": {
            "sources": ["app"],
            "extractors": [
                { "extractor": "PHP" },
                { "extractor": "LegacyLatte" }
            ],
            "output": {
                "destination": "locale/messages.pot",
                "formatter": "Gettext"
            }
        }
    });
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
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
    /// Directory holding the configuration file. Relative paths resolve against it.
    pub project_root: PathBuf,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    let path = find_config_file(start_dir)
        .with_context(|| format!("Cannot find {} in {:?}", CONFIG_FILE_NAME, start_dir))?;
    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;
    let config = Config::parse(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;
    let project_root = path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| start_dir.to_path_buf());
    Ok(ConfigLoadResult {
        config,
        project_root,
    })
}
