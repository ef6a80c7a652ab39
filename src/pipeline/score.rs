//! Fixed-weight additive scoring. The constant terms are applied
//! unconditionally: every candidate reaching the scorer has already been
//! confirmed unused, and reserved-prefix roles never reach it. The terms
//! stay independent so new flags can be added without renormalizing.

use crate::flags::Finding;

/// The granted service has no recorded recent use.
pub const UNUSED_SERVICE_WEIGHT: u32 = 4;

/// The role is customer-managed, not platform-managed.
pub const CUSTOM_ROLE_WEIGHT: u32 = 2;

/// Risk score for one filtered candidate: flag weights plus the constant
/// terms. Pure and stateless.
pub fn risk_score(finding: &Finding) -> u32 {
    let flag_weight: u32 = finding.flags.iter().map(|f| f.weight()).sum();
    flag_weight + UNUSED_SERVICE_WEIGHT + CUSTOM_ROLE_WEIGHT
}
