//! Usage cross-reference: drop candidates whose service shows recorded
//! recent use. Absence of usage evidence is the risk signal, so a role
//! with no records keeps every flagged candidate.

use std::collections::HashSet;

use crate::flags::Finding;
use crate::model::UsageRecord;

/// Lowercased names of services with at least one authenticated record.
pub fn used_service_set(records: &[UsageRecord]) -> HashSet<String> {
    records
        .iter()
        .filter(|r| r.is_authenticated())
        .map(|r| r.service_name.to_lowercase())
        .collect()
}

/// Keep only interesting candidates: at least one flag, a concrete service,
/// and no recorded use of that service (case-insensitive).
pub fn filter_unused(candidates: Vec<Finding>, used: &HashSet<String>) -> Vec<Finding> {
    candidates
        .into_iter()
        .filter(|f| {
            if !f.has_flags() || !f.has_concrete_service() {
                return false;
            }
            if used.contains(&f.service.to_lowercase()) {
                tracing::debug!(
                    role = %f.role,
                    service = %f.service,
                    "dropping flagged grant, service has recorded use"
                );
                return false;
            }
            true
        })
        .collect()
}
