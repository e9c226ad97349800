use serde::{Deserialize, Serialize};
use std::fmt;

///
/// SemanticType
///
/// The mapped type of a result column. A closed set: the expansion engine,
/// projection compiler, and typed cursor accessors all match exhaustively.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum SemanticType {
    Boolean,
    Integer,
    Float,
    Decimal,
    Text,
    Bytes,
    Date,
    Time,
    Timestamp,
    Entity { mapping: String },
    Composite { name: String },
}

impl SemanticType {
    /// Widening compatibility used by the numeric accessor family.
    ///
    /// `self` is the caller-requested type; `declared` is the column's mapped
    /// type. Exact matches are always assignable; numeric requests accept the
    /// narrower numeric mappings.
    #[must_use]
    pub fn assignable_from(&self, declared: &Self) -> bool {
        if self == declared {
            return true;
        }

        match self {
            Self::Decimal => matches!(declared, Self::Integer),
            Self::Float => matches!(declared, Self::Integer),
            Self::Timestamp => matches!(declared, Self::Date),
            _ => false,
        }
    }
}

impl fmt::Display for SemanticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Boolean => write!(f, "boolean"),
            Self::Integer => write!(f, "integer"),
            Self::Float => write!(f, "float"),
            Self::Decimal => write!(f, "big-decimal"),
            Self::Text => write!(f, "string"),
            Self::Bytes => write!(f, "binary"),
            Self::Date => write!(f, "date"),
            Self::Time => write!(f, "time"),
            Self::Timestamp => write!(f, "timestamp"),
            Self::Entity { mapping } => write!(f, "entity({mapping})"),
            Self::Composite { name } => write!(f, "composite({name})"),
        }
    }
}
