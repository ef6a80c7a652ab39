//! Permfrost — IAM role auditor.
//!
//! Finds permissions that are both risky (wildcard grants) and unused
//! (no recorded recent activity on the granted service), scores them,
//! and aggregates the result per role. The pipeline is pure computation
//! over a collected role snapshot; collection and analysis enrichment
//! live behind traits ([`source::RoleSource`], [`enrich::Enricher`]).
//!
//! # Quick Start
//!
//! ```no_run
//! use std::path::Path;
//! use permfrost::{audit, AuditOptions};
//!
//! let options = AuditOptions::default();
//! let result = audit(Path::new("roles.json"), &options).unwrap();
//! println!("Roles flagged: {}", result.report.len());
//! ```

pub mod config;
pub mod enrich;
pub mod error;
pub mod flags;
pub mod model;
pub mod output;
pub mod pipeline;
pub mod report;
pub mod source;

use std::path::{Path, PathBuf};

use config::Config;
use error::Result;
use output::OutputFormat;
use pipeline::AuditStats;
use report::Report;
use source::{RoleSource, SnapshotSource};

/// Options for one audit invocation.
#[derive(Debug, Clone)]
pub struct AuditOptions {
    /// Path to config file (defaults to `.permfrost.toml` in the working
    /// directory).
    pub config_path: Option<PathBuf>,
    /// Output format.
    pub format: OutputFormat,
    /// CLI override for the top-roles summary count.
    pub top_override: Option<usize>,
}

impl Default for AuditOptions {
    fn default() -> Self {
        Self {
            config_path: None,
            format: OutputFormat::Console,
            top_override: None,
        }
    }
}

/// Complete audit result.
#[derive(Debug)]
pub struct AuditReport {
    pub report: Report,
    pub stats: AuditStats,
    /// How many roles the summary highlights.
    pub top_roles: usize,
}

/// Run a complete audit: load config, load the role snapshot, run the
/// pipeline. Enrichment is a separate, optional pass
/// ([`enrich::enrich_report`]) over the returned report.
pub fn audit(snapshot: &Path, options: &AuditOptions) -> Result<AuditReport> {
    let config_path = options
        .config_path
        .clone()
        .unwrap_or_else(|| PathBuf::from(".permfrost.toml"));
    let mut config = Config::load(&config_path)?;

    if let Some(top) = options.top_override {
        config.audit.top_roles = top;
    }

    let roles = SnapshotSource::new(snapshot).load()?;
    let (report, stats) = pipeline::run(&roles, &config.audit);

    Ok(AuditReport {
        report,
        stats,
        top_roles: config.audit.top_roles,
    })
}

/// Render an audit report in the specified format.
pub fn render_report(report: &AuditReport, format: OutputFormat) -> Result<String> {
    output::render(report, format)
}

#[cfg(test)]
mod integration_tests {
    use super::*;
    use crate::flags::RiskFlag;
    use std::path::Path;

    #[test]
    fn wildcard_role_without_usage_scores_fourteen() {
        let opts = AuditOptions::default();
        let result = audit(Path::new("tests/fixtures/roles_unused_wildcard.json"), &opts).unwrap();

        let entry = result.report.get("R1").unwrap();
        assert_eq!(entry.total_risk, 14);
        assert_eq!(entry.findings.len(), 1);
        assert_eq!(
            entry.findings[0].flags,
            vec![RiskFlag::WildcardAction, RiskFlag::WildcardResource]
        );
    }

    #[test]
    fn used_service_role_absent_from_report() {
        let opts = AuditOptions::default();
        let result = audit(Path::new("tests/fixtures/roles_used_service.json"), &opts).unwrap();
        assert!(result.report.get("R2").is_none());
        assert!(result.report.is_empty());
    }

    #[test]
    fn reserved_prefix_roles_skipped() {
        let opts = AuditOptions::default();
        let result = audit(Path::new("tests/fixtures/roles_reserved.json"), &opts).unwrap();
        assert!(result.report.is_empty());
        assert_eq!(result.stats.roles_skipped, 2);
        assert_eq!(result.stats.roles_audited, 0);
    }

    #[test]
    fn mixed_account_ranks_roles() {
        let opts = AuditOptions::default();
        let result = audit(Path::new("tests/fixtures/roles_mixed.json"), &opts).unwrap();

        let top = result.report.top_roles(2);
        assert_eq!(top[0].role_name, "DataPipeline");
        assert!(top[0].total_risk > top[1].total_risk);
        // Managed-policy findings follow inline ones for the same role.
        let pipeline = result.report.get("DataPipeline").unwrap();
        assert!(pipeline.findings.len() >= 2);
    }
}
