//! Query-space graph: join-connected spaces driving relational query
//! generation. Wiring only; construction lives in `registry` and `expand`.

mod error;
mod expand;
mod join;
mod registry;
mod space;


pub use error::GraphError;
pub use join::{
    AssociationTag, COLLECTION_ELEMENTS_JOIN, COLLECTION_ELEMENT_ID_JOIN, COLLECTION_INDEX_JOIN,
    Join,
};
pub use registry::QuerySpaces;
pub use space::{Disposition, QuerySpace, SpaceSource, SpaceUid};
