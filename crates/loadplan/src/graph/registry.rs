use crate::graph::{AssociationTag, GraphError, Join, QuerySpace, SpaceSource, SpaceUid};
use std::collections::{BTreeMap, BTreeSet};

///
/// QuerySpaces
///
/// Registry of one query's spaces: an arena of nodes with a flat uid-keyed
/// lookup, insertion-ordered roots, and a counter for implicit uids. Each
/// root forms a tree; ancestry is resolved by uid lookup only, so
/// self-referencing associations cannot create reference cycles.
///

#[derive(Default)]
pub struct QuerySpaces {
    arena: Vec<QuerySpace>,
    by_uid: BTreeMap<SpaceUid, usize>,
    roots: Vec<SpaceUid>,
    // joined space uid -> the uid of the space it was expanded from
    parents: BTreeMap<SpaceUid, SpaceUid>,
    join_uids: BTreeSet<SpaceUid>,
    implicit_counter: u64,
}

impl QuerySpaces {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    pub fn space(&self, uid: &SpaceUid) -> Result<&QuerySpace, GraphError> {
        self.by_uid
            .get(uid)
            .map(|index| &self.arena[*index])
            .ok_or_else(|| GraphError::UnknownSpaceUid { uid: uid.clone() })
    }

    /// Root spaces in registration order. This order drives emitted root
    /// ordering downstream.
    pub fn roots(&self) -> impl Iterator<Item = &QuerySpace> {
        self.roots.iter().map(|uid| {
            let index = self.by_uid[uid];
            &self.arena[index]
        })
    }

    pub fn spaces(&self) -> impl Iterator<Item = &QuerySpace> {
        self.arena.iter()
    }

    /// The uid of the space this one was expanded from, if it is not a root.
    #[must_use]
    pub fn parent_uid(&self, uid: &SpaceUid) -> Option<&SpaceUid> {
        self.parents.get(uid)
    }

    /// The join arriving at `uid`, if any.
    #[must_use]
    pub fn incoming_join(&self, uid: &SpaceUid) -> Option<&Join> {
        let parent = self.parents.get(uid)?;
        let index = self.by_uid.get(parent)?;
        self.arena[*index]
            .joins()
            .iter()
            .find(|join| join.right_uid() == uid)
    }

    /// Whether joins expanded beneath `uid` may still render as inner joins.
    ///
    /// Inherited top-down: the root is required by construction; once any
    /// join on the path from the root is optional, everything beneath it is
    /// optional too (an inner join nested under an outer join changes result
    /// cardinality). Walks the ancestor chain by uid, never locally.
    pub fn joins_can_be_required(&self, uid: &SpaceUid) -> Result<bool, GraphError> {
        // Validate the starting uid even when it has no ancestors.
        self.space(uid)?;

        let mut current = uid;
        while let Some(parent) = self.parents.get(current) {
            let connecting = self
                .incoming_join(current)
                .ok_or_else(|| GraphError::UnknownSpaceUid {
                    uid: current.clone(),
                })?;
            if !connecting.is_required() {
                return Ok(false);
            }
            current = parent;
        }

        Ok(true)
    }

    /// Attach a join between two already-registered spaces. This is the
    /// deferred counterpart of expanding with `include_join == false`: the
    /// space exists, its edge is supplied later. A second join arriving at
    /// the same right-hand uid fails fast.
    pub fn attach_join(
        &mut self,
        left: &SpaceUid,
        right: &SpaceUid,
        property_name: impl Into<String>,
        rhs_columns: Option<Vec<String>>,
        required: bool,
        association: AssociationTag,
    ) -> Result<(), GraphError> {
        self.space(right)?;
        self.register_join(Join::new(
            left.clone(),
            right.clone(),
            property_name,
            Vec::new(),
            rhs_columns,
            required,
            association,
        )?)
    }

    pub(super) fn generate_implicit_uid(&mut self) -> SpaceUid {
        self.implicit_counter += 1;
        SpaceUid::implicit(self.implicit_counter)
    }

    // Register a space under its uid; duplicate uids fail fast.
    pub(super) fn register_space(
        &mut self,
        uid: SpaceUid,
        source: SpaceSource,
        root: bool,
    ) -> Result<(), GraphError> {
        if self.by_uid.contains_key(&uid) {
            return Err(GraphError::DuplicateSpaceUid { uid });
        }

        let index = self.arena.len();
        self.arena.push(QuerySpace::new(uid.clone(), source));
        self.by_uid.insert(uid.clone(), index);
        if root {
            self.roots.push(uid);
        }

        Ok(())
    }

    // Attach a join to its left-hand space; duplicate right-hand uids fail
    // fast, exactly like duplicate spaces.
    pub(super) fn register_join(&mut self, join: Join) -> Result<(), GraphError> {
        let left = join.left_uid().clone();
        let right = join.right_uid().clone();

        let index = *self
            .by_uid
            .get(&left)
            .ok_or_else(|| GraphError::UnknownSpaceUid { uid: left.clone() })?;
        if !self.join_uids.insert(right.clone()) {
            return Err(GraphError::DuplicateJoinUid { uid: right });
        }

        self.parents.insert(right, left);
        self.arena[index].push_join(join);

        Ok(())
    }
}
