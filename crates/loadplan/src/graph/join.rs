use crate::graph::{GraphError, SpaceUid};
use derive_more::Display;

/// Internal edge label for the map/list key join of a collection space.
pub const COLLECTION_INDEX_JOIN: &str = "index";
/// Internal edge label for a composite element join.
pub const COLLECTION_ELEMENTS_JOIN: &str = "elements";
/// Internal edge label for an entity element join (lands on the element
/// entity's identifier).
pub const COLLECTION_ELEMENT_ID_JOIN: &str = "id";

///
/// AssociationTag
///
/// What kind of association an edge represents. Bookkeeping only; never
/// rendered into SQL.
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum AssociationTag {
    Entity,
    Composite,
    Collection,
    CollectionIndex,
    CollectionElement,
}

///
/// Join
///
/// A directed edge between two query spaces. `required == true` renders as
/// an inner join; `rhs_columns == None` marks a composite join, which has no
/// identity columns of its own.
///

#[derive(Clone, Debug)]
pub struct Join {
    left: SpaceUid,
    right: SpaceUid,
    property_name: String,
    lhs_columns: Vec<String>,
    rhs_columns: Option<Vec<String>>,
    required: bool,
    association: AssociationTag,
}

impl Join {
    pub(super) fn new(
        left: SpaceUid,
        right: SpaceUid,
        property_name: impl Into<String>,
        lhs_columns: Vec<String>,
        rhs_columns: Option<Vec<String>>,
        required: bool,
        association: AssociationTag,
    ) -> Result<Self, GraphError> {
        let property_name = property_name.into();
        if property_name.is_empty() {
            return Err(GraphError::MissingJoinProperty { left, right });
        }

        Ok(Self {
            left,
            right,
            property_name,
            lhs_columns,
            rhs_columns,
            required,
            association,
        })
    }

    #[must_use]
    pub const fn left_uid(&self) -> &SpaceUid {
        &self.left
    }

    #[must_use]
    pub const fn right_uid(&self) -> &SpaceUid {
        &self.right
    }

    #[must_use]
    pub fn property_name(&self) -> &str {
        &self.property_name
    }

    #[must_use]
    pub const fn is_required(&self) -> bool {
        self.required
    }

    #[must_use]
    pub const fn association(&self) -> AssociationTag {
        self.association
    }

    /// Left-hand columns feeding the join condition. Empty for property
    /// joins, whose left-hand columns resolve through the property path on
    /// the left space; collection index/element joins carry their
    /// collection-table columns here, since collection mappings resolve no
    /// property paths of their own.
    #[must_use]
    pub fn lhs_column_names(&self) -> &[String] {
        &self.lhs_columns
    }

    /// Whether this is an identity-less composite join.
    #[must_use]
    pub const fn is_composite(&self) -> bool {
        self.rhs_columns.is_none()
    }

    /// Raw right-hand column names; `None` for composite joins.
    #[must_use]
    pub fn rhs_column_names(&self) -> Option<&[String]> {
        self.rhs_columns.as_deref()
    }

    /// Alias-qualified right-hand join-condition columns. Requesting them on
    /// a composite join is a plan-construction defect.
    pub fn condition_columns(&self, rhs_alias: &str) -> Result<Vec<String>, GraphError> {
        let Some(columns) = &self.rhs_columns else {
            return Err(GraphError::CompositeJoinWithoutColumns {
                left: self.left.clone(),
                right: self.right.clone(),
            });
        };

        Ok(columns
            .iter()
            .map(|column| format!("{rhs_alias}.{column}"))
            .collect())
    }
}
