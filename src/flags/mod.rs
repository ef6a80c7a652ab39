pub mod builtin;
pub mod finding;

use serde::Serialize;

pub use finding::{Finding, RiskFlag, ScoredFinding};

/// A flag detector is a pure predicate over a finding candidate.
/// Detectors are independent; each inspects only the candidate it is given.
pub trait FlagDetector: Send + Sync {
    /// Metadata about this detector (flag, weight, description).
    fn metadata(&self) -> FlagMetadata;

    /// Whether the flag fires for this candidate.
    fn check(&self, finding: &Finding) -> bool;
}

/// Metadata about a flag detector, used for `list-flags` output.
#[derive(Debug, Clone, Serialize)]
pub struct FlagMetadata {
    pub flag: RiskFlag,
    pub name: String,
    pub description: String,
    pub weight: u32,
}

/// Runs all registered detectors over finding candidates.
pub struct Flagger {
    detectors: Vec<Box<dyn FlagDetector>>,
}

impl Flagger {
    /// Create a flagger with all built-in detectors registered.
    pub fn new() -> Self {
        Self {
            detectors: builtin::all_detectors(),
        }
    }

    /// Flags that fire for a candidate, in registration order (action
    /// check before resource check) so snapshots stay deterministic.
    pub fn run(&self, finding: &Finding) -> Vec<RiskFlag> {
        self.detectors
            .iter()
            .filter(|d| d.check(finding))
            .map(|d| d.metadata().flag)
            .collect()
    }

    /// List metadata for all registered detectors.
    pub fn list_flags(&self) -> Vec<FlagMetadata> {
        self.detectors.iter().map(|d| d.metadata()).collect()
    }
}

impl Default for Flagger {
    fn default() -> Self {
        Self::new()
    }
}
