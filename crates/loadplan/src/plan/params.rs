use crate::plan::PlanError;
use std::collections::BTreeMap;

///
/// NamedParameterLocations
///
/// Statement positions for each named parameter. One name may bind several
/// positions when the parameter is reused in the statement text.
///

#[derive(Clone, Debug, Default)]
pub struct NamedParameterLocations {
    query: String,
    locations: BTreeMap<String, Vec<usize>>,
}

impl NamedParameterLocations {
    #[must_use]
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            locations: BTreeMap::new(),
        }
    }

    /// Record one statement position for `name`, in discovery order.
    pub fn register(&mut self, name: impl Into<String>, position: usize) {
        self.locations.entry(name.into()).or_default().push(position);
    }

    /// All statement positions bound to `name`. Unregistered names are a
    /// compilation error carrying the statement text.
    pub fn locations(&self, name: &str) -> Result<&[usize], PlanError> {
        self.locations
            .get(name)
            .map(Vec::as_slice)
            .ok_or_else(|| PlanError::UnknownNamedParameter {
                name: name.to_string(),
                query: self.query.clone(),
            })
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.locations.keys().map(String::as_str)
    }
}
