use crate::{
    driver::ResultSetMetadata,
    value::{SemanticType, TypeResolver},
};

///
/// ColumnRef
///
/// How a return locates its physical column: a pre-bound 1-based position or
/// an alias resolved against live metadata.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ColumnRef {
    Position(usize),
    Alias(String),
}

///
/// ScalarReturn
///

#[derive(Clone, Debug)]
pub struct ScalarReturn {
    pub column: ColumnRef,
    pub ty: SemanticType,
}

impl ScalarReturn {
    #[must_use]
    pub const fn new(column: ColumnRef, ty: SemanticType) -> Self {
        Self { column, ty }
    }
}

///
/// NonScalarReturn
///
/// An object-graph return: the owning mapping plus the key column used to
/// hydrate the reference through the session.
///

#[derive(Clone, Debug)]
pub struct NonScalarReturn {
    pub mapping: String,
    pub key_column: ColumnRef,
    pub key_type: SemanticType,
}

impl NonScalarReturn {
    #[must_use]
    pub fn new(mapping: impl Into<String>, key_column: ColumnRef, key_type: SemanticType) -> Self {
        Self {
            mapping: mapping.into(),
            key_column,
            key_type,
        }
    }
}

///
/// Projection
///
/// The compiled return list. An "open" projection (nothing declared) is
/// populated exactly once, after execution, from live result metadata.
///

#[derive(Clone, Debug, Default)]
pub struct Projection {
    scalars: Vec<ScalarReturn>,
    non_scalars: Vec<NonScalarReturn>,
    aliases: Vec<String>,
    types: Vec<SemanticType>,
    discovered: bool,
}

impl Projection {
    /// A projection with declared returns. Alias/type lists are seeded from
    /// the scalar returns.
    #[must_use]
    pub fn declared(scalars: Vec<ScalarReturn>, non_scalars: Vec<NonScalarReturn>) -> Self {
        let aliases = scalars
            .iter()
            .filter_map(|scalar| match &scalar.column {
                ColumnRef::Alias(alias) => Some(alias.clone()),
                ColumnRef::Position(_) => None,
            })
            .collect();
        let types = scalars.iter().map(|scalar| scalar.ty.clone()).collect();

        Self {
            scalars,
            non_scalars,
            aliases,
            types,
            discovered: false,
        }
    }

    /// An open "select everything" projection awaiting auto-discovery.
    #[must_use]
    pub fn open() -> Self {
        Self::default()
    }

    /// An open projection whose leading result aliases were declared without
    /// types. Discovery keeps the pre-bound aliases and only resolves column
    /// names past them.
    #[must_use]
    pub fn open_with_aliases(aliases: Vec<String>) -> Self {
        Self {
            aliases,
            ..Self::default()
        }
    }

    /// No returns declared and discovery has not run yet.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.scalars.is_empty() && self.non_scalars.is_empty() && !self.discovered
    }

    #[must_use]
    pub fn scalar_returns(&self) -> &[ScalarReturn] {
        &self.scalars
    }

    #[must_use]
    pub fn non_scalar_returns(&self) -> &[NonScalarReturn] {
        &self.non_scalars
    }

    #[must_use]
    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    #[must_use]
    pub fn types(&self) -> &[SemanticType] {
        &self.types
    }

    /// Populate an open projection from live result metadata: one scalar
    /// return per physical column, with the column name as alias when none
    /// was pre-bound and the type inferred heuristically.
    ///
    /// Runs at most once per projection instance; later calls are no-ops, so
    /// the discovered alias/type lists can never grow duplicates. Returns
    /// whether discovery ran.
    pub fn auto_discover(
        &mut self,
        metadata: &ResultSetMetadata,
        resolver: &dyn TypeResolver,
    ) -> bool {
        if !self.is_open() {
            return false;
        }

        for (index, column) in metadata.columns().enumerate() {
            let position = index + 1;
            let ty = resolver.resolve(column.code, column.precision, column.scale);
            // The column name becomes the alias only when none was pre-bound
            // at this position.
            if self.aliases.len() <= index {
                self.aliases.push(column.name.clone());
            }
            self.types.push(ty.clone());
            self.scalars
                .push(ScalarReturn::new(ColumnRef::Position(position), ty));
        }
        self.discovered = true;

        true
    }
}
