//! Metadata-provider seam: the mapping model consumed by space expansion.
//!
//! Mappings are supplied externally (persister layer, mapping binder) and
//! queried through these traits; the expansion engine never inspects mapping
//! internals beyond what they expose.

use crate::value::SemanticType;
use std::sync::Arc;
use thiserror::Error as ThisError;

///
/// MappingError
///
/// Mapping-resolution failures. Fatal for the current compile; carry the
/// offending mapping and path so callers can surface them with query text.
///

#[derive(Debug, ThisError)]
pub enum MappingError {
    #[error("could not resolve property path '{path}' on mapping '{mapping}'")]
    UnresolvableProperty { mapping: String, path: String },

    #[error("could not determine the owning mapping for fetch '{path}'")]
    NoOwningMapping { path: String },
}

///
/// EntityMapping
///
/// A table-backed entity mapping: identity columns, property-path column
/// resolution, and the multi-table flag consulted by join requiredness.
///

pub trait EntityMapping {
    fn name(&self) -> &str;

    /// Primary/foreign key column names, in mapped order.
    fn key_column_names(&self) -> Vec<String>;

    /// Whether the entity spans secondary tables (joined subclass or
    /// secondary-table mappings). Multi-table targets never join required.
    fn is_multi_table(&self) -> bool;

    fn resolve_property_columns(&self, path: &str) -> Result<Vec<String>, MappingError>;
}

///
/// CompositeMapping
///
/// An embedded/composite value mapping. Has no identity columns of its own;
/// it reuses the owner's identity.
///

pub trait CompositeMapping {
    fn name(&self) -> &str;

    fn resolve_property_columns(&self, path: &str) -> Result<Vec<String>, MappingError>;
}

///
/// CollectionMapping
///
/// A collection table mapping: key columns joining back to the owner, plus
/// index and element descriptors for the sub-join expansion.
///

pub trait CollectionMapping {
    fn role(&self) -> &str;

    /// Columns on the collection table joining to the owning entity.
    fn key_column_names(&self) -> Vec<String>;

    /// Index (map key / list position) columns on the collection table.
    fn index_column_names(&self) -> Vec<String>;

    /// Element columns on the collection table.
    fn element_column_names(&self) -> Vec<String>;

    /// What the collection index is, when the collection is indexed.
    fn index_reference(&self) -> Option<CollectionPartReference>;

    /// What the collection element is.
    fn element_reference(&self) -> CollectionPartReference;
}

///
/// CollectionPartReference
///
/// The target of a collection index or element: an entity association, an
/// embedded composite, or a basic value (which expands no sub-space).
///

#[derive(Clone)]
pub enum CollectionPartReference {
    Entity(Arc<dyn EntityMapping>),
    Composite(Arc<dyn CompositeMapping>),
    Basic(SemanticType),
}

///
/// AttributeMetadata
///
/// The association attribute being walked: its property name, nullability,
/// and (entity associations only) an explicit non-primary-key referenced
/// property that overrides key-column join resolution.
///

#[derive(Clone, Debug)]
pub struct AttributeMetadata {
    pub name: String,
    pub nullable: bool,
    pub unique_referenced_property: Option<String>,
}

impl AttributeMetadata {
    #[must_use]
    pub fn new(name: impl Into<String>, nullable: bool) -> Self {
        Self {
            name: name.into(),
            nullable,
            unique_referenced_property: None,
        }
    }

    #[must_use]
    pub fn with_unique_referenced_property(mut self, property: impl Into<String>) -> Self {
        self.unique_referenced_property = Some(property.into());
        self
    }
}
