//! Space expansion: walking a mapped attribute from a source space and
//! attaching the correct child space and join.

use crate::{
    graph::{
        AssociationTag, COLLECTION_ELEMENTS_JOIN, COLLECTION_ELEMENT_ID_JOIN,
        COLLECTION_INDEX_JOIN, Disposition, GraphError, Join, QuerySpaces, SpaceSource, SpaceUid,
    },
    meta::{
        AttributeMetadata, CollectionMapping, CollectionPartReference, CompositeMapping,
        EntityMapping, MappingError,
    },
};
use std::sync::Arc;

impl QuerySpaces {
    /// Register a root entity space. Roots are required by construction.
    pub fn add_root_entity(
        &mut self,
        uid: Option<SpaceUid>,
        mapping: Arc<dyn EntityMapping>,
    ) -> Result<SpaceUid, GraphError> {
        let uid = self.uid_or_implicit(uid)?;
        self.register_space(uid.clone(), SpaceSource::Entity(mapping), true)?;

        Ok(uid)
    }

    /// Expand an entity association from `source` into a joined entity space.
    pub fn expand_entity(
        &mut self,
        source: &SpaceUid,
        attribute: &AttributeMetadata,
        target: Arc<dyn EntityMapping>,
        uid: Option<SpaceUid>,
        include_join: bool,
    ) -> Result<SpaceUid, GraphError> {
        self.ensure_owning_source(source, &attribute.name)?;
        let required = self.joins_can_be_required(source)?
            && !target.is_multi_table()
            && !attribute.nullable;

        // An explicit non-primary-key referenced property overrides the
        // default key-column join target.
        let rhs_columns = match &attribute.unique_referenced_property {
            Some(property) => target.resolve_property_columns(property)?,
            None => target.key_column_names(),
        };

        let uid = self.uid_or_implicit(uid)?;
        self.register_space(uid.clone(), SpaceSource::Entity(target), false)?;
        if include_join {
            self.register_join(Join::new(
                source.clone(),
                uid.clone(),
                attribute.name.clone(),
                Vec::new(),
                Some(rhs_columns),
                required,
                AssociationTag::Entity,
            )?)?;
        }

        Ok(uid)
    }

    /// Expand a collection attribute from `source`, including the index and
    /// element sub-joins the collection's parts call for.
    pub fn expand_collection(
        &mut self,
        source: &SpaceUid,
        attribute: &AttributeMetadata,
        mapping: Arc<dyn CollectionMapping>,
        uid: Option<SpaceUid>,
        include_join: bool,
    ) -> Result<SpaceUid, GraphError> {
        self.ensure_owning_source(source, &attribute.name)?;
        let required = self.joins_can_be_required(source)? && !attribute.nullable;
        let rhs_columns = mapping.key_column_names();

        let uid = self.uid_or_implicit(uid)?;
        self.register_space(uid.clone(), SpaceSource::Collection(mapping.clone()), false)?;
        if include_join {
            self.register_join(Join::new(
                source.clone(),
                uid.clone(),
                attribute.name.clone(),
                Vec::new(),
                Some(rhs_columns),
                required,
                AssociationTag::Collection,
            )?)?;
        }

        if let Some(index) = mapping.index_reference() {
            self.expand_collection_part(
                &uid,
                index,
                mapping.index_column_names(),
                AssociationTag::CollectionIndex,
                COLLECTION_INDEX_JOIN,
            )?;
        }
        self.expand_collection_part(
            &uid,
            mapping.element_reference(),
            mapping.element_column_names(),
            AssociationTag::CollectionElement,
            COLLECTION_ELEMENT_ID_JOIN,
        )?;

        Ok(uid)
    }

    /// Expand an embedded/composite attribute. The composite reuses the
    /// parent's identity, so the join carries no right-hand columns and only
    /// the embedded value's own nullability feeds requiredness.
    pub fn expand_composite(
        &mut self,
        source: &SpaceUid,
        attribute: &AttributeMetadata,
        mapping: Arc<dyn CompositeMapping>,
        uid: Option<SpaceUid>,
        include_join: bool,
    ) -> Result<SpaceUid, GraphError> {
        self.ensure_owning_source(source, &attribute.name)?;
        let required = self.joins_can_be_required(source)? && !attribute.nullable;

        let uid = self.uid_or_implicit(uid)?;
        self.register_space(uid.clone(), SpaceSource::Composite(mapping), false)?;
        if include_join {
            self.register_join(Join::new(
                source.clone(),
                uid.clone(),
                attribute.name.clone(),
                Vec::new(),
                None,
                required,
                AssociationTag::Composite,
            )?)?;
        }

        Ok(uid)
    }

    // Expand one collection part (index or element) into a sub-space joined
    // under the collection space. The part's collection-table columns ride
    // the join as its left-hand side, since collection mappings resolve no
    // property paths. Basic parts expand nothing.
    fn expand_collection_part(
        &mut self,
        collection_uid: &SpaceUid,
        part: CollectionPartReference,
        lhs_columns: Vec<String>,
        association: AssociationTag,
        entity_label: &str,
    ) -> Result<(), GraphError> {
        match part {
            CollectionPartReference::Entity(target) => {
                let required =
                    self.joins_can_be_required(collection_uid)? && !target.is_multi_table();
                let rhs_columns = target.key_column_names();
                let uid = self.generate_implicit_uid();
                self.register_space(uid.clone(), SpaceSource::Entity(target), false)?;
                self.register_join(Join::new(
                    collection_uid.clone(),
                    uid,
                    part_label(association, entity_label),
                    lhs_columns,
                    Some(rhs_columns),
                    required,
                    association,
                )?)?;
            }
            CollectionPartReference::Composite(target) => {
                let required = self.joins_can_be_required(collection_uid)?;
                let uid = self.generate_implicit_uid();
                self.register_space(uid.clone(), SpaceSource::Composite(target), false)?;
                self.register_join(Join::new(
                    collection_uid.clone(),
                    uid,
                    part_label(association, COLLECTION_ELEMENTS_JOIN),
                    lhs_columns,
                    None,
                    required,
                    association,
                )?)?;
            }
            CollectionPartReference::Basic(_) => {}
        }

        Ok(())
    }

    // Collections own their parts through index/element expansion only; an
    // arbitrary attribute walked from a collection space has no owning
    // mapping.
    fn ensure_owning_source(
        &self,
        source: &SpaceUid,
        attribute_name: &str,
    ) -> Result<(), GraphError> {
        if self.space(source)?.disposition() == Disposition::Collection {
            return Err(MappingError::NoOwningMapping {
                path: attribute_name.to_string(),
            }
            .into());
        }

        Ok(())
    }

    // Explicit uids must not use the shape reserved for generated ones.
    fn uid_or_implicit(&mut self, uid: Option<SpaceUid>) -> Result<SpaceUid, GraphError> {
        match uid {
            Some(uid) if uid.is_implicit() => Err(GraphError::ReservedUid { uid }),
            Some(uid) => Ok(uid),
            None => Ok(self.generate_implicit_uid()),
        }
    }
}

// Index joins always carry the "index" label; element joins carry "id" when
// landing on an entity identifier and "elements" for composites.
fn part_label(association: AssociationTag, element_label: &str) -> String {
    match association {
        AssociationTag::CollectionIndex => COLLECTION_INDEX_JOIN.to_string(),
        _ => element_label.to_string(),
    }
}
