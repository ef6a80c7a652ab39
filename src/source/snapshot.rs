use std::path::{Path, PathBuf};

use super::RoleSource;
use crate::error::{AuditError, Result};
use crate::model::Role;

/// Reads a role snapshot from a JSON file: the serialized output of an
/// external collector, an array of role objects.
pub struct SnapshotSource {
    path: PathBuf,
}

impl SnapshotSource {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }
}

impl RoleSource for SnapshotSource {
    fn load(&self) -> Result<Vec<Role>> {
        let content = std::fs::read_to_string(&self.path)?;
        let roles: Vec<Role> =
            serde_json::from_str(&content).map_err(|e| AuditError::Snapshot {
                file: self.path.display().to_string(),
                message: e.to_string(),
            })?;
        tracing::debug!(
            file = %self.path.display(),
            roles = roles.len(),
            "loaded role snapshot"
        );
        Ok(roles)
    }
}
