//! Persistence collaborator interface
//!
//! The engine never saves on its own; callers persist after an accepted change.

use crate::build::subject::BuildSubject;
use crate::core::error::{BuildError, Result};
use crate::core::types::SubjectId;
use ahash::AHashMap;

/// Storage for build subjects, keyed by id
pub trait PersistenceGateway {
    fn load(&self, id: SubjectId) -> Result<BuildSubject>;

    /// Upsert; saving the same subject twice is harmless
    fn save(&mut self, subject: &BuildSubject) -> Result<()>;
}

/// Serialize a subject to its JSON snapshot form
pub fn to_snapshot_json(subject: &BuildSubject) -> Result<String> {
    Ok(serde_json::to_string_pretty(subject)?)
}

pub fn from_snapshot_json(json: &str) -> Result<BuildSubject> {
    Ok(serde_json::from_str(json)?)
}

/// Keeps JSON snapshots in memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryGateway {
    snapshots: AHashMap<SubjectId, String>,
}

impl InMemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

impl PersistenceGateway for InMemoryGateway {
    fn load(&self, id: SubjectId) -> Result<BuildSubject> {
        let json = self
            .snapshots
            .get(&id)
            .ok_or_else(|| BuildError::SubjectNotFound(id.to_string()))?;
        from_snapshot_json(json)
    }

    fn save(&mut self, subject: &BuildSubject) -> Result<()> {
        self.snapshots.insert(subject.id, to_snapshot_json(subject)?);
        Ok(())
    }
}
