pub mod snapshot;

pub use snapshot::SnapshotSource;

use crate::error::Result;
use crate::model::Role;

/// A role source produces the complete role set for one audit run.
/// Sources must return every role fully resolved or fail the run; the
/// pipeline never sees partial data. Live collection (paginated listing,
/// asynchronous last-accessed jobs, retry policy) lives behind this trait,
/// outside the crate.
pub trait RoleSource {
    fn load(&self) -> Result<Vec<Role>>;
}
