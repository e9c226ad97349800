//! Materialized column values and the mapped value-type vocabulary.

mod heuristic;
mod semantic;

#[cfg(test)]
mod tests;

pub use heuristic::{HeuristicTypeResolver, TypeCode, TypeResolver};
pub use semantic::SemanticType;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

///
/// Value
///
/// A single materialized column or row value. Scalar variants cover the
/// driver-extractable types; `Entity` carries a hydrated object reference and
/// `Tuple` carries the output of a row transformer.
///

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Decimal(Decimal),
    Text(String),
    Bytes(Vec<u8>),
    Date(NaiveDate),
    Time(NaiveTime),
    Timestamp(NaiveDateTime),
    Entity { mapping: String, key: Box<Value> },
    Tuple(Vec<Value>),
}

impl Value {
    /// The mapped type this value naturally carries, if it has one.
    /// `Null` and `Tuple` have no standalone mapped type.
    #[must_use]
    pub fn semantic_type(&self) -> Option<SemanticType> {
        match self {
            Self::Null | Self::Tuple(_) => None,
            Self::Bool(_) => Some(SemanticType::Boolean),
            Self::Int(_) => Some(SemanticType::Integer),
            Self::Float(_) => Some(SemanticType::Float),
            Self::Decimal(_) => Some(SemanticType::Decimal),
            Self::Text(_) => Some(SemanticType::Text),
            Self::Bytes(_) => Some(SemanticType::Bytes),
            Self::Date(_) => Some(SemanticType::Date),
            Self::Time(_) => Some(SemanticType::Time),
            Self::Timestamp(_) => Some(SemanticType::Timestamp),
            Self::Entity { mapping, .. } => Some(SemanticType::Entity {
                mapping: mapping.clone(),
            }),
        }
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}
