//! Typed column accessors. Each accessor checks the caller-declared type
//! against the column's mapped type before touching the cached value:
//! primitive accessors require an exact match, numeric widening accessors
//! accept assignable mappings. Null columns read as `None`.

use crate::{
    cursor::{CursorError, ScrollableCursor},
    driver::DriverCursor,
    session::SessionContext,
    value::{SemanticType, Value},
};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;

impl<D, S> ScrollableCursor<D, S>
where
    D: DriverCursor,
    S: SessionContext,
{
    pub fn get_bool(&self, column: usize) -> Result<Option<bool>, CursorError> {
        match self.typed_value(column, &SemanticType::Boolean, true)? {
            Value::Null => Ok(None),
            Value::Bool(value) => Ok(Some(*value)),
            other => Err(runtime_mismatch(SemanticType::Boolean, other)),
        }
    }

    pub fn get_i64(&self, column: usize) -> Result<Option<i64>, CursorError> {
        match self.typed_value(column, &SemanticType::Integer, true)? {
            Value::Null => Ok(None),
            Value::Int(value) => Ok(Some(*value)),
            other => Err(runtime_mismatch(SemanticType::Integer, other)),
        }
    }

    /// Widening accessor: accepts integer-mapped columns as well.
    pub fn get_f64(&self, column: usize) -> Result<Option<f64>, CursorError> {
        match self.typed_value(column, &SemanticType::Float, false)? {
            Value::Null => Ok(None),
            Value::Float(value) => Ok(Some(*value)),
            Value::Int(value) => Ok(Some(*value as f64)),
            other => Err(runtime_mismatch(SemanticType::Float, other)),
        }
    }

    /// Widening accessor: accepts integer-mapped columns as well.
    pub fn get_decimal(&self, column: usize) -> Result<Option<Decimal>, CursorError> {
        match self.typed_value(column, &SemanticType::Decimal, false)? {
            Value::Null => Ok(None),
            Value::Decimal(value) => Ok(Some(*value)),
            Value::Int(value) => Ok(Some(Decimal::from(*value))),
            other => Err(runtime_mismatch(SemanticType::Decimal, other)),
        }
    }

    pub fn get_text(&self, column: usize) -> Result<Option<String>, CursorError> {
        match self.typed_value(column, &SemanticType::Text, true)? {
            Value::Null => Ok(None),
            Value::Text(value) => Ok(Some(value.clone())),
            other => Err(runtime_mismatch(SemanticType::Text, other)),
        }
    }

    pub fn get_bytes(&self, column: usize) -> Result<Option<Vec<u8>>, CursorError> {
        match self.typed_value(column, &SemanticType::Bytes, true)? {
            Value::Null => Ok(None),
            Value::Bytes(value) => Ok(Some(value.clone())),
            other => Err(runtime_mismatch(SemanticType::Bytes, other)),
        }
    }

    pub fn get_date(&self, column: usize) -> Result<Option<NaiveDate>, CursorError> {
        match self.typed_value(column, &SemanticType::Date, true)? {
            Value::Null => Ok(None),
            Value::Date(value) => Ok(Some(*value)),
            other => Err(runtime_mismatch(SemanticType::Date, other)),
        }
    }

    pub fn get_time(&self, column: usize) -> Result<Option<NaiveTime>, CursorError> {
        match self.typed_value(column, &SemanticType::Time, true)? {
            Value::Null => Ok(None),
            Value::Time(value) => Ok(Some(*value)),
            other => Err(runtime_mismatch(SemanticType::Time, other)),
        }
    }

    /// Widening accessor: a date-mapped column reads as midnight.
    pub fn get_timestamp(&self, column: usize) -> Result<Option<NaiveDateTime>, CursorError> {
        match self.typed_value(column, &SemanticType::Timestamp, false)? {
            Value::Null => Ok(None),
            Value::Timestamp(value) => Ok(Some(*value)),
            Value::Date(value) => Ok(Some(value.and_time(NaiveTime::MIN))),
            other => Err(runtime_mismatch(SemanticType::Timestamp, other)),
        }
    }

    // Declared-type check shared by every typed accessor. Holder rows are
    // opaque constructed objects, never typed-indexable.
    fn typed_value(
        &self,
        column: usize,
        requested: &SemanticType,
        exact: bool,
    ) -> Result<&Value, CursorError> {
        if self.has_transformer() {
            return Err(CursorError::HolderRowAccess);
        }

        let declared =
            self.processor
                .column_type(column)
                .ok_or(CursorError::ColumnOutOfRange {
                    index: column,
                    width: self.processor.column_count(),
                })?;
        let compatible = if exact {
            *requested == declared
        } else {
            requested.assignable_from(&declared)
        };
        if !compatible {
            return Err(CursorError::TypeMismatch {
                requested: requested.clone(),
                declared,
            });
        }

        self.get(column)
    }
}

// The declared type matched but the extracted value did not; report the
// value's own mapped type.
fn runtime_mismatch(requested: SemanticType, value: &Value) -> CursorError {
    let declared = value.semantic_type().unwrap_or_else(|| requested.clone());
    CursorError::TypeMismatch {
        requested,
        declared,
    }
}
