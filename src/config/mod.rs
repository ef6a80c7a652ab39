use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Top-level configuration from `.permfrost.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub audit: AuditConfig,
    #[serde(default)]
    pub enrichment: EnrichmentConfig,
}

/// Pipeline knobs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Roles whose name starts with one of these prefixes are
    /// platform-managed and excluded from the audit entirely.
    #[serde(default = "default_reserved_prefixes")]
    pub reserved_role_prefixes: Vec<String>,
    /// How many roles the summary highlights.
    #[serde(default = "default_top_roles")]
    pub top_roles: usize,
}

impl AuditConfig {
    pub fn is_reserved_role(&self, role_name: &str) -> bool {
        self.reserved_role_prefixes
            .iter()
            .any(|p| role_name.starts_with(p.as_str()))
    }
}

fn default_reserved_prefixes() -> Vec<String> {
    vec!["AWSServiceRoleFor".into(), "aws-".into()]
}

fn default_top_roles() -> usize {
    3
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            reserved_role_prefixes: default_reserved_prefixes(),
            top_roles: default_top_roles(),
        }
    }
}

/// Bounds for the optional enrichment pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichmentConfig {
    /// At most this many findings get enriched per run.
    #[serde(default = "default_max_findings")]
    pub max_findings: usize,
}

fn default_max_findings() -> usize {
    10
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            max_findings: default_max_findings(),
        }
    }
}

impl Config {
    /// Load config from a TOML file. Returns default if file doesn't exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Generate a starter config file.
    pub fn starter_toml() -> &'static str {
        r#"# Permfrost configuration

[audit]
# Role-name prefixes that mark platform-managed roles; these are skipped.
reserved_role_prefixes = ["AWSServiceRoleFor", "aws-"]

# How many roles the summary highlights.
top_roles = 3

[enrichment]
# At most this many findings are sent for analysis per run.
max_findings = 10
"#
    }
}
