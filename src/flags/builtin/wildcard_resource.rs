use crate::flags::{Finding, FlagDetector, FlagMetadata, RiskFlag};

/// WILDCARD_RESOURCE: the grant applies to every resource.
pub struct WildcardResourceDetector;

impl FlagDetector for WildcardResourceDetector {
    fn metadata(&self) -> FlagMetadata {
        FlagMetadata {
            flag: RiskFlag::WildcardResource,
            name: "Wildcard Resource".into(),
            description: "Resource is `*`, the grant is not scoped to any ARN".into(),
            weight: RiskFlag::WildcardResource.weight(),
        }
    }

    fn check(&self, finding: &Finding) -> bool {
        finding.resource == "*"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_resource(resource: &str) -> Finding {
        Finding {
            role: "R".into(),
            policy: "p".into(),
            effect: None,
            service: "s3".into(),
            action: "s3:GetObject".into(),
            resource: resource.into(),
            flags: vec![],
        }
    }

    #[test]
    fn fires_on_star() {
        assert!(WildcardResourceDetector.check(&with_resource("*")));
    }

    #[test]
    fn silent_on_scoped_arn() {
        assert!(!WildcardResourceDetector.check(&with_resource("arn:aws:s3:::bucket/*")));
    }
}
