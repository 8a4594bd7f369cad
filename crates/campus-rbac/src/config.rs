use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{RbacError, Result};
use crate::menu::DEFAULT_ADMIN_ROLES;
use crate::templates::{PermissionGroupTemplate, default_templates};

/// Deployment configuration stored as TOML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampusConfig {
    #[serde(default)]
    pub rbac: RbacSettings,
    /// Role-editor taxonomy; the built-in table is used when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub templates: Option<Vec<PermissionGroupTemplate>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RbacSettings {
    /// Roles that see permission-gated navigation even without the permission.
    #[serde(default = "default_admin_roles")]
    pub admin_roles: Vec<String>,
}

impl Default for RbacSettings {
    fn default() -> Self {
        Self {
            admin_roles: default_admin_roles(),
        }
    }
}

fn default_admin_roles() -> Vec<String> {
    DEFAULT_ADMIN_ROLES.iter().map(|r| r.to_string()).collect()
}

impl CampusConfig {
    /// Load config from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(RbacError::ConfigNotFound(path.display().to_string()));
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self =
            toml::from_str(&content).map_err(|e| RbacError::TomlDe(e.to_string()))?;
        config.check()?;
        tracing::info!(path = %path.display(), "loaded campus config");
        Ok(config)
    }

    /// Like [`CampusConfig::load`], but a missing file yields the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        match Self::load(path) {
            Err(RbacError::ConfigNotFound(_)) => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                Self::default_config()
            }
            other => other,
        }
    }

    /// Save config to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| RbacError::TomlSer(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        tracing::info!(path = %path.display(), "saved campus config");
        Ok(())
    }

    /// Default config for `campus init`, with the template table spelled out
    /// so it can be edited.
    pub fn default_config() -> Result<Self> {
        Ok(Self {
            rbac: RbacSettings::default(),
            templates: Some(default_templates()?),
        })
    }

    /// Templates in effect.
    pub fn templates(&self) -> Result<Vec<PermissionGroupTemplate>> {
        match &self.templates {
            Some(templates) => Ok(templates.clone()),
            None => default_templates(),
        }
    }

    fn check(&self) -> Result<()> {
        let Some(templates) = &self.templates else {
            return Ok(());
        };
        let mut seen = std::collections::HashSet::new();
        for template in templates {
            if template.key.trim().is_empty() {
                return Err(RbacError::Config("template key must not be empty".into()));
            }
            if !seen.insert(template.key.as_str()) {
                return Err(RbacError::Config(format!(
                    "duplicate template key: {}",
                    template.key
                )));
            }
        }
        Ok(())
    }

    /// Resolve the config file path: `<base_dir>/campus.toml`
    pub fn default_path(base_dir: &Path) -> PathBuf {
        base_dir.join("campus.toml")
    }

    /// Resolve the default campus home directory: `~/.campus`
    pub fn default_base_dir() -> Result<PathBuf> {
        dirs::home_dir()
            .map(|h| h.join(".campus"))
            .ok_or_else(|| RbacError::Config("Cannot determine home directory".to_string()))
    }
}
