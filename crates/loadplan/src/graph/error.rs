use crate::{graph::SpaceUid, meta::MappingError};
use thiserror::Error as ThisError;

///
/// GraphError
///
/// Space-graph construction failures. Duplicate registrations and missing
/// join properties are plan-construction defects: fail fast, never retried.
///

#[derive(Debug, ThisError)]
pub enum GraphError {
    #[error("query space uid '{uid}' is already registered")]
    DuplicateSpaceUid { uid: SpaceUid },

    #[error("a join is already registered under uid '{uid}'")]
    DuplicateJoinUid { uid: SpaceUid },

    #[error("query space uid '{uid}' uses the shape reserved for generated uids")]
    ReservedUid { uid: SpaceUid },

    #[error("join from '{left}' to '{right}' requires a non-empty property name")]
    MissingJoinProperty { left: SpaceUid, right: SpaceUid },

    #[error("composite join '{left}' -> '{right}' has no identity columns to resolve")]
    CompositeJoinWithoutColumns { left: SpaceUid, right: SpaceUid },

    #[error("unknown query space uid '{uid}'")]
    UnknownSpaceUid { uid: SpaceUid },

    #[error(transparent)]
    Mapping(#[from] MappingError),
}
