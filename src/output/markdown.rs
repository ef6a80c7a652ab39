use crate::enrich::Analysis;
use crate::AuditReport;

/// Markdown report: one section per role (highest risk first) with a
/// findings table, followed by any attached analyses.
pub fn render(audit: &AuditReport) -> String {
    let mut output = String::from("# IAM risk audit\n\n");

    if audit.report.is_empty() {
        output.push_str("No unused risky permissions found.\n");
        return output;
    }

    output.push_str(&format!(
        "{} role(s) with risky permissions and no recorded recent use.\n\n",
        audit.report.len()
    ));

    for entry in audit.report.top_roles(audit.report.len()) {
        output.push_str(&format!(
            "## {} — total risk {}\n\n",
            entry.role_name, entry.total_risk
        ));
        output.push_str("| Service | Action | Resource | Flags | Risk |\n");
        output.push_str("|---------|--------|----------|-------|------|\n");
        for finding in &entry.findings {
            let flags = finding
                .flags
                .iter()
                .map(|f| f.to_string())
                .collect::<Vec<_>>()
                .join(", ");
            output.push_str(&format!(
                "| {} | `{}` | `{}` | {} | {} |\n",
                finding.service, finding.action, finding.resource, flags, finding.risk_score
            ));
        }
        output.push('\n');

        for finding in &entry.findings {
            match &finding.analysis {
                Some(Analysis::Structured(a)) => {
                    output.push_str(&format!(
                        "### Analysis: `{}` ({})\n\n",
                        finding.action, a.risk_level
                    ));
                    output.push_str(&format!("{}\n\n", a.explanation));
                    output.push_str(&format!("**Abuse scenario.** {}\n\n", a.abuse_scenario));
                    if !a.remediation_recommendations.is_empty() {
                        output.push_str("**Remediation.**\n\n");
                        for rec in &a.remediation_recommendations {
                            output.push_str(&format!("- {rec}\n"));
                        }
                        output.push('\n');
                    }
                }
                Some(Analysis::Degraded { raw_response }) => {
                    output.push_str(&format!("### Analysis: `{}`\n\n", finding.action));
                    output.push_str(&format!("> {raw_response}\n\n"));
                }
                None => {}
            }
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enrich::{RiskLevel, StructuredAnalysis};
    use crate::flags::{RiskFlag, ScoredFinding};
    use crate::pipeline::AuditStats;
    use crate::report::Report;

    #[test]
    fn table_and_analysis_sections() {
        let mut report = Report::new();
        report.push(
            "R1",
            ScoredFinding {
                service: "s3".into(),
                action: "s3:*".into(),
                resource: "*".into(),
                flags: vec![RiskFlag::WildcardAction, RiskFlag::WildcardResource],
                risk_score: 14,
                analysis: Some(Analysis::Structured(StructuredAnalysis {
                    risk_level: RiskLevel::Critical,
                    explanation: "Full control of every bucket.".into(),
                    abuse_scenario: "Exfiltrate all objects.".into(),
                    remediation_recommendations: vec!["Scope to the needed bucket.".into()],
                })),
            },
        );
        let audit = AuditReport {
            report,
            stats: AuditStats::default(),
            top_roles: 3,
        };

        let md = render(&audit);
        assert!(md.contains("## R1 — total risk 14"));
        assert!(md.contains("| s3 | `s3:*` | `*` | WILDCARD_ACTION, WILDCARD_RESOURCE | 14 |"));
        assert!(md.contains("### Analysis: `s3:*` (critical)"));
        assert!(md.contains("- Scope to the needed bucket."));
    }

    #[test]
    fn degraded_analysis_rendered_as_quote() {
        let mut report = Report::new();
        report.push(
            "R1",
            ScoredFinding {
                service: "kms".into(),
                action: "kms:*".into(),
                resource: "*".into(),
                flags: vec![RiskFlag::WildcardAction],
                risk_score: 11,
                analysis: Some(Analysis::Degraded {
                    raw_response: "model said something unstructured".into(),
                }),
            },
        );
        let audit = AuditReport {
            report,
            stats: AuditStats::default(),
            top_roles: 3,
        };

        let md = render(&audit);
        assert!(md.contains("> model said something unstructured"));
    }
}
