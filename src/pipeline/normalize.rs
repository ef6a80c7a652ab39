//! Statement normalization: expand a policy document into one finding
//! candidate per (action, resource) pair, statement by statement, in
//! document order.

use crate::flags::Finding;
use crate::model::PolicyDocument;

/// The IAM namespace prefix of an action. A bare `*` has no namespace and
/// maps to `*`; an action without a `:` is its own service.
pub fn extract_service(action: &str) -> &str {
    if action == "*" {
        return "*";
    }
    match action.split_once(':') {
        Some((service, _)) => service,
        None => action,
    }
}

/// Expand one policy document into finding candidates: the full
/// (action × resource) cross-product of each statement. Statements with a
/// missing action or resource contribute nothing. Pure; effect passes
/// through unevaluated.
pub fn normalize_statements(role: &str, policy: &str, doc: &PolicyDocument) -> Vec<Finding> {
    let mut findings = Vec::new();

    for stmt in doc.statements() {
        for action in stmt.actions() {
            for resource in stmt.resources() {
                findings.push(Finding {
                    role: role.to_string(),
                    policy: policy.to_string(),
                    effect: stmt.effect.clone(),
                    service: extract_service(action).to_string(),
                    action: action.clone(),
                    resource: resource.clone(),
                    flags: Vec::new(),
                });
            }
        }
    }

    findings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{OneOrMany, Statement};
    use proptest::prelude::*;

    fn doc(json: &str) -> PolicyDocument {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn cross_product_per_statement() {
        let doc = doc(
            r#"{"Statement": [{
                "Effect": "Allow",
                "Action": ["s3:GetObject", "s3:PutObject"],
                "Resource": ["arn:a", "arn:b", "arn:c"]
            }]}"#,
        );
        let findings = normalize_statements("R", "p", &doc);
        assert_eq!(findings.len(), 6);
        // Document order: actions outer, resources inner.
        assert_eq!(findings[0].action, "s3:GetObject");
        assert_eq!(findings[0].resource, "arn:a");
        assert_eq!(findings[1].resource, "arn:b");
        assert_eq!(findings[3].action, "s3:PutObject");
    }

    #[test]
    fn scalar_statement_and_fields() {
        let doc = doc(r#"{"Statement": {"Effect": "Deny", "Action": "s3:*", "Resource": "*"}}"#);
        let findings = normalize_statements("R", "p", &doc);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].effect.as_deref(), Some("Deny"));
        assert_eq!(findings[0].service, "s3");
    }

    #[test]
    fn missing_action_contributes_nothing() {
        let doc = doc(r#"{"Statement": [{"Effect": "Allow", "Resource": "*"}]}"#);
        assert!(normalize_statements("R", "p", &doc).is_empty());
    }

    #[test]
    fn missing_effect_passes_through_as_none() {
        let doc = doc(r#"{"Statement": [{"Action": "iam:*", "Resource": "*"}]}"#);
        let findings = normalize_statements("R", "p", &doc);
        assert_eq!(findings[0].effect, None);
    }

    #[test]
    fn service_extraction() {
        assert_eq!(extract_service("*"), "*");
        assert_eq!(extract_service("s3:GetObject"), "s3");
        assert_eq!(extract_service("ec2:*"), "ec2");
        assert_eq!(extract_service("sts:AssumeRole:extra"), "sts");
        assert_eq!(extract_service("nodelimiter"), "nodelimiter");
    }

    proptest! {
        // Candidate count is exactly Σ over statements of |actions| × |resources|.
        #[test]
        fn finding_count_matches_cross_product(
            stmts in proptest::collection::vec(
                (
                    proptest::collection::vec("[a-z0-9]{1,8}:[A-Za-z*]{1,12}", 0..5),
                    proptest::collection::vec("[a-z:*/-]{1,16}", 0..5),
                ),
                0..6,
            )
        ) {
            let expected: usize = stmts.iter().map(|(a, r)| a.len() * r.len()).sum();
            let statements: Vec<Statement> = stmts
                .into_iter()
                .map(|(actions, resources)| Statement {
                    sid: None,
                    effect: Some("Allow".into()),
                    action: Some(OneOrMany::Many(actions)),
                    resource: Some(OneOrMany::Many(resources)),
                })
                .collect();
            let doc = PolicyDocument {
                version: None,
                statement: Some(OneOrMany::Many(statements)),
            };
            let findings = normalize_statements("R", "p", &doc);
            prop_assert_eq!(findings.len(), expected);
            // Service never contains the delimiter, so extraction is idempotent.
            for f in &findings {
                prop_assert_eq!(extract_service(&f.service), f.service.as_str());
            }
        }
    }
}
