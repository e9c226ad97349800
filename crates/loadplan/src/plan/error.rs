use thiserror::Error as ThisError;

///
/// PlanError
///
/// Query-compilation failures surfaced with the offending statement text.
///

#[derive(Debug, ThisError)]
pub enum PlanError {
    #[error("named parameter '{name}' is not registered in query [{query}]")]
    UnknownNamedParameter { name: String, query: String },
}
