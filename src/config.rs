use anyhow::{Context, Result};
use directories::{ProjectDirs, UserDirs};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub(crate) const CONFIG_FILE: &str = "config.toml";

/// User settings read from `config.toml`. Every key is optional.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct Config {
    /// Members seeded at startup; also the divisor for the quota.
    pub(crate) members: usize,
    /// Symbol printed in front of every amount.
    pub(crate) currency: String,
    /// File name used by `:export` when no path is given.
    pub(crate) export_file: String,
    pub(crate) export_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            members: 8,
            currency: "R$".into(),
            export_file: "relatorio_final_evento.xlsx".into(),
            export_dir: None,
        }
    }
}

impl Config {
    /// Load `config.toml` from `dir`, falling back to defaults when absent.
    pub(crate) fn load(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE);
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml(&contents)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    pub(crate) fn from_toml(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents)?;
        config.validate()
    }

    fn validate(self) -> Result<Self> {
        if self.members == 0 {
            anyhow::bail!("members must be at least 1");
        }
        if self.export_file.trim().is_empty() {
            anyhow::bail!("export_file must not be empty");
        }
        Ok(self)
    }

    pub(crate) fn with_members(mut self, members: usize) -> Result<Self> {
        self.members = members;
        self.validate()
    }

    /// Where `:export` writes when no path is given: the configured
    /// directory, else Documents, else home, else the working directory.
    pub(crate) fn default_export_path(&self) -> PathBuf {
        let dir = self.export_dir.clone().unwrap_or_else(|| {
            UserDirs::new()
                .map(|d| {
                    d.document_dir()
                        .unwrap_or_else(|| d.home_dir())
                        .to_path_buf()
                })
                .unwrap_or_else(|| PathBuf::from("."))
        });
        dir.join(&self.export_file)
    }
}

pub(crate) fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("com", "eventbudget", "EventBudget")
        .ok_or_else(|| anyhow::anyhow!("Could not determine configuration directory"))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.members, 8);
        assert_eq!(config.currency, "R$");
        assert_eq!(config.export_file, "relatorio_final_evento.xlsx");
    }

    #[test]
    fn test_empty_file_is_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.members, 8);
    }

    #[test]
    fn test_partial_file() {
        let config = Config::from_toml("members = 5\ncurrency = \"$\"\n").unwrap();
        assert_eq!(config.members, 5);
        assert_eq!(config.currency, "$");
        assert_eq!(config.export_file, "relatorio_final_evento.xlsx");
    }

    #[test]
    fn test_zero_members_rejected() {
        assert!(Config::from_toml("members = 0").is_err());
        assert!(Config::default().with_members(0).is_err());
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(Config::from_toml("member = 3").is_err());
    }

    #[test]
    fn test_export_dir_used() {
        let config = Config::from_toml("export_dir = \"/tmp/party\"\nexport_file = \"x.xlsx\"").unwrap();
        assert_eq!(config.default_export_path(), PathBuf::from("/tmp/party/x.xlsx"));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.members, 8);
    }

    #[test]
    fn test_load_from_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "members = 12").unwrap();
        assert_eq!(Config::load(dir.path()).unwrap().members, 12);

        std::fs::write(dir.path().join(CONFIG_FILE), "members = \"lots\"").unwrap();
        assert!(Config::load(dir.path()).is_err());
    }
}
