//! Result-row processing: per-column processors built from a projection and
//! the row-shape collapse rules.

#[cfg(test)]
mod tests;

use crate::{
    driver::{DriverCursor, DriverError, ResultSetMetadata},
    plan::{ColumnRef, Projection, RowTransformer},
    value::{SemanticType, Value},
};
use thiserror::Error as ThisError;

///
/// RowError
///

#[derive(Debug, ThisError)]
pub enum RowError {
    #[error("driver failure while {action}")]
    Driver {
        action: &'static str,
        #[source]
        source: DriverError,
    },

    #[error("{expected} prehydrated non-scalar values required, received {received}")]
    NonScalarDataLength { expected: usize, received: usize },
}

///
/// ResultColumnProcessor
///
/// How one logical column of the processed row is produced. Closed set:
/// scalars read from the live driver row at a resolved position; non-scalars
/// index into the prehydrated object data for the current row.
///

#[derive(Clone, Debug)]
pub enum ResultColumnProcessor {
    Scalar { position: usize, ty: SemanticType },
    NonScalar { index: usize },
}

///
/// NonScalarSlot
///
/// Hydration recipe for one non-scalar return: which mapping to load and
/// where its key sits in the live row.
///

#[derive(Clone, Debug)]
pub struct NonScalarSlot {
    pub mapping: String,
    pub key_position: usize,
    pub key_type: SemanticType,
}

///
/// ProcessedRow
///
/// One materialized logical row. `Single` is the bare-value collapse of a
/// one-return row; `Holder` is the opaque output of a row transformer.
///

#[derive(Clone, Debug, PartialEq)]
pub enum ProcessedRow {
    Single(Value),
    Columns(Vec<Value>),
    Holder(Value),
}

impl ProcessedRow {
    #[must_use]
    pub fn width(&self) -> usize {
        match self {
            Self::Single(_) | Self::Holder(_) => 1,
            Self::Columns(values) => values.len(),
        }
    }

    /// Value at a 0-based logical column, when the row is indexable there.
    #[must_use]
    pub fn value_at(&self, column: usize) -> Option<&Value> {
        match self {
            Self::Single(value) | Self::Holder(value) => (column == 0).then_some(value),
            Self::Columns(values) => values.get(column),
        }
    }
}

///
/// RowProcessor
///
/// The per-execution column processors: non-scalar returns first (projection
/// order), then scalar returns, with aliases already resolved to positions
/// against the live metadata snapshot.
///

pub struct RowProcessor {
    processors: Vec<ResultColumnProcessor>,
    non_scalars: Vec<NonScalarSlot>,
    scalar_count: usize,
}

impl RowProcessor {
    /// Resolve a projection's column references against live metadata.
    pub fn build(projection: &Projection, metadata: &ResultSetMetadata) -> Result<Self, RowError> {
        let mut processors = Vec::new();
        let mut non_scalars = Vec::new();

        for (index, ret) in projection.non_scalar_returns().iter().enumerate() {
            non_scalars.push(NonScalarSlot {
                mapping: ret.mapping.clone(),
                key_position: resolve_position(&ret.key_column, metadata)?,
                key_type: ret.key_type.clone(),
            });
            processors.push(ResultColumnProcessor::NonScalar { index });
        }

        let scalar_count = projection.scalar_returns().len();
        for ret in projection.scalar_returns() {
            processors.push(ResultColumnProcessor::Scalar {
                position: resolve_position(&ret.column, metadata)?,
                ty: ret.ty.clone(),
            });
        }

        Ok(Self {
            processors,
            non_scalars,
            scalar_count,
        })
    }

    #[must_use]
    pub fn processors(&self) -> &[ResultColumnProcessor] {
        &self.processors
    }

    #[must_use]
    pub fn non_scalar_slots(&self) -> &[NonScalarSlot] {
        &self.non_scalars
    }

    #[must_use]
    pub fn column_count(&self) -> usize {
        self.processors.len()
    }

    /// Declared mapped type of a 0-based logical column.
    #[must_use]
    pub fn column_type(&self, column: usize) -> Option<SemanticType> {
        match self.processors.get(column)? {
            ResultColumnProcessor::Scalar { ty, .. } => Some(ty.clone()),
            ResultColumnProcessor::NonScalar { index } => Some(SemanticType::Entity {
                mapping: self.non_scalars[*index].mapping.clone(),
            }),
        }
    }

    /// Assemble the logical row for the driver's current position.
    ///
    /// With a transformer the full column array is always passed through;
    /// without one, a row of zero scalars and exactly one non-scalar
    /// collapses to the bare value.
    pub fn build_result_row(
        &self,
        non_scalar_data: &[Value],
        driver: &dyn DriverCursor,
        transformer: Option<&dyn RowTransformer>,
        aliases: &[String],
    ) -> Result<ProcessedRow, RowError> {
        if non_scalar_data.len() != self.non_scalars.len() {
            return Err(RowError::NonScalarDataLength {
                expected: self.non_scalars.len(),
                received: non_scalar_data.len(),
            });
        }

        let mut values = Vec::with_capacity(self.processors.len());
        for processor in &self.processors {
            let value = match processor {
                ResultColumnProcessor::NonScalar { index } => non_scalar_data[*index].clone(),
                ResultColumnProcessor::Scalar { position, ty } => driver
                    .read(*position, ty)
                    .map_err(|source| RowError::Driver {
                        action: "extracting a scalar result column",
                        source,
                    })?,
            };
            values.push(value);
        }

        if let Some(transformer) = transformer {
            return Ok(ProcessedRow::Holder(transformer.transform(values, aliases)));
        }

        if self.scalar_count == 0 && self.non_scalars.len() == 1 {
            let value = values.pop().unwrap_or(Value::Null);
            return Ok(ProcessedRow::Single(value));
        }

        Ok(ProcessedRow::Columns(values))
    }
}

// Resolve a column reference to a 1-based physical position.
fn resolve_position(column: &ColumnRef, metadata: &ResultSetMetadata) -> Result<usize, RowError> {
    match column {
        ColumnRef::Position(position) => Ok(*position),
        ColumnRef::Alias(alias) => {
            metadata
                .position_of(alias)
                .map_err(|source| RowError::Driver {
                    action: "resolving a result alias to a column position",
                    source,
                })
        }
    }
}
