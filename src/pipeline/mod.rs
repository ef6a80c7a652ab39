//! The per-role analysis pipeline: normalize → flag → usage-filter →
//! score → aggregate. Each stage produces a new value; roles never see
//! each other's data.

pub mod normalize;
pub mod score;
pub mod usage;

use serde::Serialize;

use crate::config::AuditConfig;
use crate::flags::{Finding, Flagger, ScoredFinding};
use crate::model::Role;
use crate::report::Report;

/// Counters for one pipeline run, carried into report metadata.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct AuditStats {
    pub roles_audited: usize,
    pub roles_skipped: usize,
    pub candidates: usize,
    pub retained: usize,
}

/// Run the full pipeline over a collected role set.
pub fn run(roles: &[Role], config: &AuditConfig) -> (Report, AuditStats) {
    let flagger = Flagger::new();
    let mut report = Report::new();
    let mut stats = AuditStats::default();

    for role in roles {
        if config.is_reserved_role(&role.role_name) {
            tracing::debug!(role = %role.role_name, "skipping reserved-prefix role");
            stats.roles_skipped += 1;
            continue;
        }
        stats.roles_audited += 1;

        let used = usage::used_service_set(&role.last_used_services);

        // Inline policies before managed, per-policy document order.
        let mut candidates: Vec<Finding> = Vec::new();
        for (name, doc) in &role.inline_policies {
            candidates.extend(normalize::normalize_statements(&role.role_name, name, doc));
        }
        for (name, doc) in &role.managed_policies {
            candidates.extend(normalize::normalize_statements(&role.role_name, name, doc));
        }

        for candidate in &mut candidates {
            candidate.flags = flagger.run(candidate);
        }
        stats.candidates += candidates.len();

        let kept = usage::filter_unused(candidates, &used);
        stats.retained += kept.len();

        for finding in kept {
            let risk_score = score::risk_score(&finding);
            let Finding {
                role,
                service,
                action,
                resource,
                flags,
                ..
            } = finding;
            report.push(
                &role,
                ScoredFinding {
                    service,
                    action,
                    resource,
                    flags,
                    risk_score,
                    analysis: None,
                },
            );
        }
    }

    tracing::info!(
        roles_audited = stats.roles_audited,
        roles_skipped = stats.roles_skipped,
        retained = stats.retained,
        "pipeline complete"
    );

    (report, stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LastAuthenticated, PolicyDocument, UsageRecord};
    use std::collections::BTreeMap;

    fn policy(json: &str) -> PolicyDocument {
        serde_json::from_str(json).unwrap()
    }

    fn role(name: &str, inline: &[(&str, &str)], usage: &[(&str, bool)]) -> Role {
        let mut inline_policies = BTreeMap::new();
        for (pname, doc) in inline {
            inline_policies.insert(pname.to_string(), policy(doc));
        }
        Role {
            role_name: name.into(),
            arn: format!("arn:aws:iam::123456789012:role/{name}"),
            last_used: None,
            last_used_services: usage
                .iter()
                .map(|(s, auth)| UsageRecord {
                    service_name: s.to_string(),
                    last_authenticated: Some(LastAuthenticated::Flag(*auth)),
                })
                .collect(),
            inline_policies,
            managed_policies: BTreeMap::new(),
        }
    }

    #[test]
    fn unused_wildcard_grant_is_reported() {
        let roles = vec![role(
            "R1",
            &[(
                "admin",
                r#"{"Statement": {"Effect": "Allow", "Action": "s3:*", "Resource": "*"}}"#,
            )],
            &[],
        )];
        let (report, stats) = run(&roles, &AuditConfig::default());
        assert_eq!(stats.roles_audited, 1);
        let entry = report.get("R1").unwrap();
        assert_eq!(entry.total_risk, 14);
        assert_eq!(entry.findings.len(), 1);
    }

    #[test]
    fn used_service_keeps_role_out_of_report() {
        let roles = vec![role(
            "R2",
            &[(
                "describe",
                r#"{"Statement": {"Effect": "Allow", "Action": "ec2:DescribeInstances", "Resource": "*"}}"#,
            )],
            &[("ec2", true)],
        )];
        let (report, _) = run(&roles, &AuditConfig::default());
        assert!(report.get("R2").is_none());
        assert!(report.is_empty());
    }

    #[test]
    fn reserved_prefix_role_skipped_entirely() {
        let roles = vec![role(
            "AWSServiceRoleForXYZ",
            &[(
                "anything",
                r#"{"Statement": {"Effect": "Allow", "Action": "*", "Resource": "*"}}"#,
            )],
            &[],
        )];
        let (report, stats) = run(&roles, &AuditConfig::default());
        assert!(report.is_empty());
        assert_eq!(stats.roles_skipped, 1);
        assert_eq!(stats.roles_audited, 0);
    }

    #[test]
    fn total_risk_sums_finding_scores() {
        let roles = vec![role(
            "R3",
            &[(
                "mixed",
                r#"{"Statement": [
                    {"Effect": "Allow", "Action": "s3:*", "Resource": "*"},
                    {"Effect": "Allow", "Action": "kms:Decrypt", "Resource": "*"}
                ]}"#,
            )],
            &[],
        )];
        let (report, _) = run(&roles, &AuditConfig::default());
        let entry = report.get("R3").unwrap();
        // 14 for the double wildcard, 9 for the resource-only wildcard.
        assert_eq!(entry.total_risk, 23);
        assert_eq!(entry.findings[0].risk_score, 14);
        assert_eq!(entry.findings[1].risk_score, 9);
    }
}
