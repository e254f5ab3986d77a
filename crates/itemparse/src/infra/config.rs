//! Configuration management utilities.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use dirs_next::config_dir;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

static DEFAULT_CONFIG: Lazy<&'static str> =
    Lazy::new(|| include_str!("../../assets/default-config.toml"));
static DEFAULT_WORKSPACE_CONFIG_PATH: &str = ".itemparse/config.toml";

/// Layered configuration loaded from defaults, user, workspace, explicit file, and env.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub parser: Parser,
    #[serde(default)]
    pub classifier: ClassifierSettings,
    #[serde(default)]
    pub output: Output,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Parser {
    #[serde(default)]
    trim_lines: Option<bool>,
    #[serde(default)]
    wrap_fallback: Option<String>,
}

impl Parser {
    fn default_trim_lines() -> bool {
        true
    }

    fn default_wrap_fallback() -> &'static str {
        "infer"
    }

    pub fn trim_lines(&self) -> bool {
        self.trim_lines.unwrap_or_else(Self::default_trim_lines)
    }

    pub fn wrap_fallback(&self) -> &str {
        self.wrap_fallback
            .as_deref()
            .unwrap_or(Self::default_wrap_fallback())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ClassifierSettings {
    #[serde(default)]
    extended_letters: Option<bool>,
}

impl ClassifierSettings {
    pub fn extended_letters(&self) -> bool {
        self.extended_letters.unwrap_or(false)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Output {
    #[serde(default)]
    format: Option<String>,
    #[serde(default)]
    emit: Option<String>,
}

impl Output {
    fn default_format() -> &'static str {
        "plain"
    }

    fn default_emit() -> &'static str {
        "items"
    }

    pub fn format(&self) -> &str {
        self.format.as_deref().unwrap_or(Self::default_format())
    }

    pub fn emit(&self) -> &str {
        self.emit.as_deref().unwrap_or(Self::default_emit())
    }
}

/// Environment overrides for critical settings.
#[derive(Debug, Default, Clone)]
pub struct EnvOverrides {
    format: Option<String>,
    wrap_fallback: Option<String>,
}

impl EnvOverrides {
    fn from_env() -> Self {
        Self {
            format: env::var("ITEMPARSE_FORMAT").ok(),
            wrap_fallback: env::var("ITEMPARSE_WRAP_FALLBACK").ok(),
        }
    }

    #[cfg(test)]
    fn for_tests(format: &str, wrap_fallback: &str) -> Self {
        Self {
            format: Some(format.to_owned()),
            wrap_fallback: Some(wrap_fallback.to_owned()),
        }
    }
}

impl Config {
    /// Load configuration from defaults, user/global config, workspace config, and env overrides.
    pub fn load() -> Result<Self> {
        Self::load_with_extra(None)
    }

    /// Like [`Config::load`], with one more file layered above the workspace config.
    pub fn load_with_extra(extra: Option<&Path>) -> Result<Self> {
        let env = EnvOverrides::from_env();
        let global = global_config_path();
        let workspace = workspace_config_path()?;
        Self::load_with_layers(global, workspace, extra.map(Path::to_path_buf), env)
    }

    fn load_with_layers(
        global: Option<PathBuf>,
        workspace: Option<PathBuf>,
        extra: Option<PathBuf>,
        env_overrides: EnvOverrides,
    ) -> Result<Self> {
        let mut layers: Vec<Config> = Vec::new();

        layers.push(Self::from_str(&DEFAULT_CONFIG)?);

        if let Some(global_path) = global.filter(|path| path.exists()) {
            layers.push(Self::from_file(&global_path)?);
        }

        if let Some(workspace_path) = workspace.filter(|path| path.exists()) {
            layers.push(Self::from_file(&workspace_path)?);
        }

        if let Some(extra_path) = extra {
            layers.push(Self::from_file(&extra_path)?);
        }

        let merged = layers.into_iter().reduce(Config::merge).unwrap_or_default();
        Ok(apply_env_overrides(merged, env_overrides))
    }

    fn from_file(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        Self::from_str(&data)
            .with_context(|| format!("invalid config file: {}", path.display()))
    }

    fn from_str(contents: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(contents).with_context(|| "failed to parse TOML config".to_string())?;
        Ok(config)
    }

    fn merge(self, other: Self) -> Self {
        Self {
            parser: Parser {
                trim_lines: other.parser.trim_lines.or(self.parser.trim_lines),
                wrap_fallback: other.parser.wrap_fallback.or(self.parser.wrap_fallback),
            },
            classifier: ClassifierSettings {
                extended_letters: other
                    .classifier
                    .extended_letters
                    .or(self.classifier.extended_letters),
            },
            output: Output {
                format: other.output.format.or(self.output.format),
                emit: other.output.emit.or(self.output.emit),
            },
        }
    }
}

fn global_config_path() -> Option<PathBuf> {
    config_dir().map(|base| base.join("itemparse/config.toml"))
}

fn workspace_config_path() -> Result<Option<PathBuf>> {
    let cwd = env::current_dir()?;
    let root = find_repo_root(&cwd).unwrap_or(cwd);
    Ok(Some(root.join(DEFAULT_WORKSPACE_CONFIG_PATH)))
}

fn find_repo_root(start: &Path) -> Option<PathBuf> {
    let mut current = start;
    loop {
        if current.join(".git").exists() {
            return Some(current.to_path_buf());
        }
        match current.parent() {
            Some(parent) => current = parent,
            None => return None,
        }
    }
}

fn apply_env_overrides(mut config: Config, env: EnvOverrides) -> Config {
    if let Some(format) = env.format {
        config.output.format = Some(format);
    }
    if let Some(policy) = env.wrap_fallback {
        config.parser.wrap_fallback = Some(policy);
    }
    config
}
