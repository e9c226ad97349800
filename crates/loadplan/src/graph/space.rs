use crate::{
    graph::Join,
    meta::{CollectionMapping, CompositeMapping, EntityMapping, MappingError},
};
use derive_more::Display;
use std::{fmt, sync::Arc};

// Reserved shape for engine-generated uids. Explicit uids carrying this
// prefix are rejected at registration, so generated tokens never collide
// with caller-chosen ones.
const IMPLICIT_UID_PREFIX: &str = "<gen:";

///
/// SpaceUid
///
/// Registry-unique identifier of one query space.
///

#[derive(Clone, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct SpaceUid(String);

impl SpaceUid {
    #[must_use]
    pub fn new(uid: impl Into<String>) -> Self {
        Self(uid.into())
    }

    pub(crate) fn implicit(counter: u64) -> Self {
        Self(format!("{IMPLICIT_UID_PREFIX}{counter}>"))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_implicit(&self) -> bool {
        self.0.starts_with(IMPLICIT_UID_PREFIX)
    }
}

impl From<&str> for SpaceUid {
    fn from(uid: &str) -> Self {
        Self::new(uid)
    }
}

///
/// Disposition
///
/// The kind tag of a query space. Closed set; matched exhaustively.
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum Disposition {
    Entity,
    Collection,
    Composite,
}

///
/// SpaceSource
///
/// The mapping backing a space, per disposition.
///

#[derive(Clone)]
pub enum SpaceSource {
    Entity(Arc<dyn EntityMapping>),
    Collection(Arc<dyn CollectionMapping>),
    Composite(Arc<dyn CompositeMapping>),
}

impl SpaceSource {
    #[must_use]
    pub const fn disposition(&self) -> Disposition {
        match self {
            Self::Entity(_) => Disposition::Entity,
            Self::Collection(_) => Disposition::Collection,
            Self::Composite(_) => Disposition::Composite,
        }
    }

    fn mapping_name(&self) -> &str {
        match self {
            Self::Entity(mapping) => mapping.name(),
            Self::Collection(mapping) => mapping.role(),
            Self::Composite(mapping) => mapping.name(),
        }
    }
}

///
/// QuerySpace
///
/// One join-graph node: a table-backed reference participating in a query.
/// Outgoing joins are ordered; ancestry is resolved through the registry by
/// uid, never by back references.
///

pub struct QuerySpace {
    uid: SpaceUid,
    source: SpaceSource,
    joins: Vec<Join>,
}

impl QuerySpace {
    pub(super) fn new(uid: SpaceUid, source: SpaceSource) -> Self {
        Self {
            uid,
            source,
            joins: Vec::new(),
        }
    }

    #[must_use]
    pub const fn uid(&self) -> &SpaceUid {
        &self.uid
    }

    #[must_use]
    pub const fn disposition(&self) -> Disposition {
        self.source.disposition()
    }

    #[must_use]
    pub const fn source(&self) -> &SpaceSource {
        &self.source
    }

    #[must_use]
    pub fn joins(&self) -> &[Join] {
        &self.joins
    }

    pub(super) fn push_join(&mut self, join: Join) {
        self.joins.push(join);
    }

    /// Resolve a property path to columns on this space's mapping.
    pub fn resolve_property_columns(&self, path: &str) -> Result<Vec<String>, MappingError> {
        match &self.source {
            SpaceSource::Entity(mapping) => mapping.resolve_property_columns(path),
            SpaceSource::Composite(mapping) => mapping.resolve_property_columns(path),
            // Collection spaces expose no property paths of their own; index
            // and element access goes through the expanded sub-spaces.
            SpaceSource::Collection(mapping) => Err(MappingError::UnresolvableProperty {
                mapping: mapping.role().to_string(),
                path: path.to_string(),
            }),
        }
    }
}

impl fmt::Debug for QuerySpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuerySpace")
            .field("uid", &self.uid)
            .field("disposition", &self.disposition())
            .field("mapping", &self.source.mapping_name())
            .field("joins", &self.joins.len())
            .finish()
    }
}
