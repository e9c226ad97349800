use crate::value::SemanticType;
use serde::{Deserialize, Serialize};

// Numeric columns with no fractional digits fit a 64-bit integer up to this
// many decimal digits; wider columns stay decimal.
const INTEGER_SAFE_PRECISION: u16 = 18;

///
/// TypeCode
///
/// Driver-reported column type codes, as surfaced by result metadata
/// introspection. Mirrors the usual wire-level type-code vocabulary.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum TypeCode {
    Bit,
    Boolean,
    TinyInt,
    SmallInt,
    Integer,
    BigInt,
    Real,
    Float,
    Double,
    Numeric,
    Decimal,
    Char,
    Varchar,
    LongVarchar,
    Clob,
    Binary,
    VarBinary,
    LongVarBinary,
    Blob,
    Date,
    Time,
    Timestamp,
    Other,
}

///
/// TypeResolver
///
/// Maps driver type information to a mapped value type. Implemented
/// externally per dialect; `HeuristicTypeResolver` is the default used by
/// projection auto-discovery.
///

pub trait TypeResolver {
    /// Infer a mapped type from a driver type code plus reported
    /// precision and scale.
    fn resolve(&self, code: TypeCode, precision: u16, scale: u16) -> SemanticType;

    /// Resolve a named type identifier, if this resolver knows it.
    fn resolve_named(&self, name: &str) -> Option<SemanticType>;
}

///
/// HeuristicTypeResolver
///

#[derive(Clone, Copy, Debug, Default)]
pub struct HeuristicTypeResolver;

impl TypeResolver for HeuristicTypeResolver {
    fn resolve(&self, code: TypeCode, precision: u16, scale: u16) -> SemanticType {
        match code {
            TypeCode::Bit | TypeCode::Boolean => SemanticType::Boolean,
            TypeCode::TinyInt | TypeCode::SmallInt | TypeCode::Integer | TypeCode::BigInt => {
                SemanticType::Integer
            }
            TypeCode::Real | TypeCode::Float | TypeCode::Double => SemanticType::Float,
            TypeCode::Numeric | TypeCode::Decimal => {
                // Exact numerics collapse to integer only when the declared
                // shape cannot carry a fraction and fits 64 bits.
                if scale == 0 && precision > 0 && precision <= INTEGER_SAFE_PRECISION {
                    SemanticType::Integer
                } else {
                    SemanticType::Decimal
                }
            }
            TypeCode::Char | TypeCode::Varchar | TypeCode::LongVarchar | TypeCode::Clob => {
                SemanticType::Text
            }
            TypeCode::Binary
            | TypeCode::VarBinary
            | TypeCode::LongVarBinary
            | TypeCode::Blob
            | TypeCode::Other => SemanticType::Bytes,
            TypeCode::Date => SemanticType::Date,
            TypeCode::Time => SemanticType::Time,
            TypeCode::Timestamp => SemanticType::Timestamp,
        }
    }

    fn resolve_named(&self, name: &str) -> Option<SemanticType> {
        let ty = match name {
            "boolean" => SemanticType::Boolean,
            "integer" | "long" | "short" => SemanticType::Integer,
            "float" | "double" => SemanticType::Float,
            "big-decimal" | "decimal" | "numeric" => SemanticType::Decimal,
            "string" | "text" => SemanticType::Text,
            "binary" | "blob" => SemanticType::Bytes,
            "date" => SemanticType::Date,
            "time" => SemanticType::Time,
            "timestamp" => SemanticType::Timestamp,
            _ => return None,
        };

        Some(ty)
    }
}
