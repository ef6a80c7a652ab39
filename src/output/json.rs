use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::error::Result;
use crate::pipeline::AuditStats;
use crate::report::Report;
use crate::AuditReport;

#[derive(Serialize)]
struct JsonReport<'a> {
    run_id: Uuid,
    generated_at: DateTime<Utc>,
    stats: AuditStats,
    roles: &'a Report,
}

/// Render the full report as pretty JSON with run metadata.
pub fn render(audit: &AuditReport) -> Result<String> {
    let report = JsonReport {
        run_id: Uuid::new_v4(),
        generated_at: Utc::now(),
        stats: audit.stats,
        roles: &audit.report,
    };
    let json = serde_json::to_string_pretty(&report)?;
    Ok(json)
}
