use crate::AuditReport;

/// Plain-text summary: per-role blocks sorted by total risk descending,
/// then the top-N footer.
pub fn render(audit: &AuditReport) -> String {
    let mut output = String::new();

    if audit.report.is_empty() {
        output.push_str("\n  No unused risky permissions found.\n\n");
        return output;
    }

    output.push_str(&format!("Roles flagged: {}\n\n", audit.report.len()));

    for entry in audit.report.top_roles(audit.report.len()) {
        output.push_str(&format!("Role: {}\n", entry.role_name));
        output.push_str(&format!("Total Risk Score: {}\n", entry.total_risk));
        output.push_str(&format!("Findings: {}\n", entry.findings.len()));

        for finding in &entry.findings {
            output.push_str(&format!(
                "  - {} | {} | risk={}\n",
                finding.service, finding.action, finding.risk_score
            ));
        }

        output.push('\n');
    }

    output.push_str("Top risky roles:\n");
    for entry in audit.report.top_roles(audit.top_roles) {
        output.push_str(&format!("- {}: risk={}\n", entry.role_name, entry.total_risk));
    }

    output
}
