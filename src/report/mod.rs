//! Report aggregation: scored findings grouped by role in first-seen
//! order, with a stable top-N ranking over total risk.

use std::collections::HashMap;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::flags::ScoredFinding;

/// One role's aggregate: summed risk and its findings in discovery order.
#[derive(Debug, Clone)]
pub struct RoleEntry {
    pub role_name: String,
    pub total_risk: u32,
    pub findings: Vec<ScoredFinding>,
}

/// The audit report. Serializes as a mapping
/// `role_name -> { total_risk, findings }` preserving insertion order.
#[derive(Debug, Clone, Default)]
pub struct Report {
    entries: Vec<RoleEntry>,
    index: HashMap<String, usize>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a scored finding to its role, creating the role entry on
    /// first sight.
    pub fn push(&mut self, role_name: &str, finding: ScoredFinding) {
        match self.index.get(role_name) {
            Some(&i) => {
                let entry = &mut self.entries[i];
                entry.total_risk += finding.risk_score;
                entry.findings.push(finding);
            }
            None => {
                self.index.insert(role_name.to_string(), self.entries.len());
                self.entries.push(RoleEntry {
                    role_name: role_name.to_string(),
                    total_risk: finding.risk_score,
                    findings: vec![finding],
                });
            }
        }
    }

    pub fn get(&self, role_name: &str) -> Option<&RoleEntry> {
        self.index.get(role_name).map(|&i| &self.entries[i])
    }

    pub fn get_mut(&mut self, role_name: &str) -> Option<&mut RoleEntry> {
        self.index.get(role_name).map(|&i| &mut self.entries[i])
    }

    /// Roles in discovery order.
    pub fn roles(&self) -> impl Iterator<Item = &RoleEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Top-N roles by total risk, descending. The sort is stable, so ties
    /// keep discovery order.
    pub fn top_roles(&self, n: usize) -> Vec<&RoleEntry> {
        let mut ranked: Vec<&RoleEntry> = self.entries.iter().collect();
        ranked.sort_by(|a, b| b.total_risk.cmp(&a.total_risk));
        ranked.truncate(n);
        ranked
    }

    /// All role names, highest total risk first.
    pub fn ranked_role_names(&self) -> Vec<String> {
        self.top_roles(self.entries.len())
            .into_iter()
            .map(|e| e.role_name.clone())
            .collect()
    }
}

#[derive(Serialize)]
struct RoleBody<'a> {
    total_risk: u32,
    findings: &'a [ScoredFinding],
}

impl Serialize for Report {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(
                &entry.role_name,
                &RoleBody {
                    total_risk: entry.total_risk,
                    findings: &entry.findings,
                },
            )?;
        }
        map.end()
    }
}
