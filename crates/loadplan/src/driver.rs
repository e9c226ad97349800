//! Driver seam: the cursor/statement handle the scrollable cursor wraps.
//!
//! Positions are 1-based on this boundary, matching the usual driver
//! contract; position 0 means "not on a row". The public 0-based row-number
//! contract lives entirely in the cursor layer.

use crate::value::{SemanticType, TypeCode, Value};
use thiserror::Error as ThisError;

///
/// DriverError
///
/// Failures reported by the backing driver. Never retried here; navigation
/// and metadata callers wrap these with an action description.
///

#[derive(Debug, ThisError)]
pub enum DriverError {
    #[error("driver reported failure: {message}")]
    Backend { message: String },

    #[error("no row at the current cursor position")]
    NoCurrentRow,

    #[error("no result column named '{name}'")]
    UnknownColumn { name: String },

    #[error("result column position {position} out of range ({count} columns)")]
    ColumnOutOfRange { position: usize, count: usize },

    #[error("driver cursor handle is closed")]
    Closed,
}

///
/// ColumnDescriptor
///
/// One physical result column as reported by live metadata introspection.
///

#[derive(Clone, Debug)]
pub struct ColumnDescriptor {
    pub name: String,
    pub code: TypeCode,
    pub precision: u16,
    pub scale: u16,
}

impl ColumnDescriptor {
    #[must_use]
    pub fn new(name: impl Into<String>, code: TypeCode, precision: u16, scale: u16) -> Self {
        Self {
            name: name.into(),
            code,
            precision,
            scale,
        }
    }
}

///
/// ResultSetMetadata
///
/// Owned snapshot of live result metadata, taken once per execution. Feeds
/// alias/position resolution and projection auto-discovery.
///

#[derive(Clone, Debug)]
pub struct ResultSetMetadata {
    columns: Vec<ColumnDescriptor>,
}

impl ResultSetMetadata {
    #[must_use]
    pub fn new(columns: Vec<ColumnDescriptor>) -> Self {
        Self { columns }
    }

    #[must_use]
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> impl Iterator<Item = &ColumnDescriptor> {
        self.columns.iter()
    }

    /// Column descriptor by 1-based position.
    pub fn column(&self, position: usize) -> Result<&ColumnDescriptor, DriverError> {
        position
            .checked_sub(1)
            .and_then(|index| self.columns.get(index))
            .ok_or(DriverError::ColumnOutOfRange {
                position,
                count: self.columns.len(),
            })
    }

    /// 1-based position of a column by name.
    pub fn position_of(&self, name: &str) -> Result<usize, DriverError> {
        self.columns
            .iter()
            .position(|column| column.name == name)
            .map(|index| index + 1)
            .ok_or_else(|| DriverError::UnknownColumn {
                name: name.to_string(),
            })
    }
}

///
/// DriverCursor
///
/// The driver-side scrollable handle. Every method is a potential blocking
/// I/O suspension point; cancellation is external (close the connection).
///

pub trait DriverCursor {
    fn next(&mut self) -> Result<bool, DriverError>;

    fn previous(&mut self) -> Result<bool, DriverError>;

    fn first(&mut self) -> Result<bool, DriverError>;

    fn last(&mut self) -> Result<bool, DriverError>;

    /// Move relative to the current position; negative deltas move backward.
    fn relative(&mut self, delta: i64) -> Result<bool, DriverError>;

    /// Move to a 1-based absolute position. Zero positions before the first
    /// row; negative positions count back from the last row.
    fn absolute(&mut self, position: i64) -> Result<bool, DriverError>;

    fn before_first(&mut self) -> Result<(), DriverError>;

    fn after_last(&mut self) -> Result<(), DriverError>;

    /// 1-based position of the current row; 0 when not on a row.
    fn row_position(&self) -> Result<i64, DriverError>;

    fn metadata(&self) -> Result<ResultSetMetadata, DriverError>;

    /// Extract the value at a 1-based column position from the current row,
    /// converted per the expected mapped type.
    fn read(&self, position: usize, ty: &SemanticType) -> Result<Value, DriverError>;

    fn close(&mut self) -> Result<(), DriverError>;
}

impl<T: DriverCursor + ?Sized> DriverCursor for &mut T {
    fn next(&mut self) -> Result<bool, DriverError> {
        (**self).next()
    }

    fn previous(&mut self) -> Result<bool, DriverError> {
        (**self).previous()
    }

    fn first(&mut self) -> Result<bool, DriverError> {
        (**self).first()
    }

    fn last(&mut self) -> Result<bool, DriverError> {
        (**self).last()
    }

    fn relative(&mut self, delta: i64) -> Result<bool, DriverError> {
        (**self).relative(delta)
    }

    fn absolute(&mut self, position: i64) -> Result<bool, DriverError> {
        (**self).absolute(position)
    }

    fn before_first(&mut self) -> Result<(), DriverError> {
        (**self).before_first()
    }

    fn after_last(&mut self) -> Result<(), DriverError> {
        (**self).after_last()
    }

    fn row_position(&self) -> Result<i64, DriverError> {
        (**self).row_position()
    }

    fn metadata(&self) -> Result<ResultSetMetadata, DriverError> {
        (**self).metadata()
    }

    fn read(&self, position: usize, ty: &SemanticType) -> Result<Value, DriverError> {
        (**self).read(position, ty)
    }

    fn close(&mut self) -> Result<(), DriverError> {
        (**self).close()
    }
}
