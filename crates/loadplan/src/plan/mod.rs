//! Compiled-plan surface: declared returns, auto-discovery, named-parameter
//! locations, and the row-transformer seam.

mod error;
mod params;
mod projection;
mod transform;


pub use error::PlanError;
pub use params::NamedParameterLocations;
pub use projection::{ColumnRef, NonScalarReturn, Projection, ScalarReturn};
pub use transform::{RowTransformer, TupleTransformer};

use crate::graph::QuerySpaces;

///
/// CompiledPlan
///
/// One compiled query: its statement text, space graph, parameter locations,
/// and projection. Immutable after compile; executions take their own
/// projection state so the auto-discovery mutation stays per-execution.
///

pub struct CompiledPlan {
    query: String,
    spaces: QuerySpaces,
    params: NamedParameterLocations,
    projection: Projection,
}

impl CompiledPlan {
    #[must_use]
    pub fn new(
        query: impl Into<String>,
        spaces: QuerySpaces,
        params: NamedParameterLocations,
        projection: Projection,
    ) -> Self {
        Self {
            query: query.into(),
            spaces,
            params,
            projection,
        }
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[must_use]
    pub const fn spaces(&self) -> &QuerySpaces {
        &self.spaces
    }

    #[must_use]
    pub const fn params(&self) -> &NamedParameterLocations {
        &self.params
    }

    #[must_use]
    pub const fn projection(&self) -> &Projection {
        &self.projection
    }

    /// Per-execution projection state. Auto-discovery writes into this copy,
    /// keeping the compiled plan safe to re-execute.
    #[must_use]
    pub fn execution_projection(&self) -> Projection {
        self.projection.clone()
    }
}
