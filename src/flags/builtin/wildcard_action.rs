use crate::flags::{Finding, FlagDetector, FlagMetadata, RiskFlag};

/// WILDCARD_ACTION: the grant covers every operation (`*`) or every
/// operation within one service (`svc:*`).
pub struct WildcardActionDetector;

impl FlagDetector for WildcardActionDetector {
    fn metadata(&self) -> FlagMetadata {
        FlagMetadata {
            flag: RiskFlag::WildcardAction,
            name: "Wildcard Action".into(),
            description: "Action grants every operation, or every operation of a service".into(),
            weight: RiskFlag::WildcardAction.weight(),
        }
    }

    fn check(&self, finding: &Finding) -> bool {
        finding.action == "*" || finding.action.ends_with(":*")
    }
}
