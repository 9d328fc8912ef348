//! Error types for scene registry operations.

use crate::types::{ObjectId, ProxyManagerId};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    #[error("Object not found: {0}")]
    NotFound(ObjectId),

    #[error("Object already exists: {0}")]
    DuplicateId(ObjectId),

    #[error("Unknown proxy manager: {0:?}")]
    UnknownManager(ProxyManagerId),

    /// Parent and child are owned by different proxy managers
    #[error("Cannot parent {child} under {parent}: different proxy managers")]
    CrossManagerParent { child: ObjectId, parent: ObjectId },

    #[error("Parenting {child} under {parent} would create a cycle")]
    Cycle { child: ObjectId, parent: ObjectId },
}

/// Result type alias for scene operations
pub type SceneResult<T> = Result<T, SceneError>;
