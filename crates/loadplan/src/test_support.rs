//! Shared fakes for module tests: in-memory mappings, a scrollable fake
//! driver, and a recording session context.

use crate::{
    driver::{ColumnDescriptor, DriverCursor, DriverError, ResultSetMetadata},
    meta::{
        CollectionMapping, CollectionPartReference, CompositeMapping, EntityMapping, MappingError,
    },
    row::ProcessedRow,
    session::{CursorId, SessionContext, SessionError},
    value::{SemanticType, Value},
};
use std::collections::BTreeMap;
use std::sync::Arc;

///
/// FakeEntityMapping
///

pub struct FakeEntityMapping {
    pub name: String,
    pub key_columns: Vec<String>,
    pub multi_table: bool,
    pub properties: BTreeMap<String, Vec<String>>,
}

impl FakeEntityMapping {
    pub fn new(name: &str, key_columns: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            key_columns: key_columns.iter().map(ToString::to_string).collect(),
            multi_table: false,
            properties: BTreeMap::new(),
        })
    }

    pub fn multi_table(name: &str, key_columns: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            key_columns: key_columns.iter().map(ToString::to_string).collect(),
            multi_table: true,
            properties: BTreeMap::new(),
        })
    }

    pub fn with_property(name: &str, key_columns: &[&str], path: &str, columns: &[&str]) -> Arc<Self> {
        let mut properties = BTreeMap::new();
        properties.insert(
            path.to_string(),
            columns.iter().map(ToString::to_string).collect(),
        );
        Arc::new(Self {
            name: name.to_string(),
            key_columns: key_columns.iter().map(ToString::to_string).collect(),
            multi_table: false,
            properties,
        })
    }
}

impl EntityMapping for FakeEntityMapping {
    fn name(&self) -> &str {
        &self.name
    }

    fn key_column_names(&self) -> Vec<String> {
        self.key_columns.clone()
    }

    fn is_multi_table(&self) -> bool {
        self.multi_table
    }

    fn resolve_property_columns(&self, path: &str) -> Result<Vec<String>, MappingError> {
        self.properties
            .get(path)
            .cloned()
            .ok_or_else(|| MappingError::UnresolvableProperty {
                mapping: self.name.clone(),
                path: path.to_string(),
            })
    }
}

///
/// FakeCompositeMapping
///

pub struct FakeCompositeMapping {
    pub name: String,
    pub properties: BTreeMap<String, Vec<String>>,
}

impl FakeCompositeMapping {
    pub fn new(name: &str) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            properties: BTreeMap::new(),
        })
    }
}

impl CompositeMapping for FakeCompositeMapping {
    fn name(&self) -> &str {
        &self.name
    }

    fn resolve_property_columns(&self, path: &str) -> Result<Vec<String>, MappingError> {
        self.properties
            .get(path)
            .cloned()
            .ok_or_else(|| MappingError::UnresolvableProperty {
                mapping: self.name.clone(),
                path: path.to_string(),
            })
    }
}

///
/// FakeCollectionMapping
///

pub struct FakeCollectionMapping {
    pub role: String,
    pub key_columns: Vec<String>,
    pub index_columns: Vec<String>,
    pub element_columns: Vec<String>,
    pub index: Option<CollectionPartReference>,
    pub element: CollectionPartReference,
}

impl FakeCollectionMapping {
    pub fn basic(role: &str, key_columns: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            role: role.to_string(),
            key_columns: key_columns.iter().map(ToString::to_string).collect(),
            index_columns: Vec::new(),
            element_columns: vec!["elem".to_string()],
            index: None,
            element: CollectionPartReference::Basic(SemanticType::Text),
        })
    }

    pub fn of_entities(
        role: &str,
        key_columns: &[&str],
        element: Arc<dyn EntityMapping>,
    ) -> Arc<Self> {
        Arc::new(Self {
            role: role.to_string(),
            key_columns: key_columns.iter().map(ToString::to_string).collect(),
            index_columns: Vec::new(),
            element_columns: vec!["elem_id".to_string()],
            index: None,
            element: CollectionPartReference::Entity(element),
        })
    }

    pub fn indexed_composites(
        role: &str,
        key_columns: &[&str],
        index: Arc<dyn EntityMapping>,
        element: Arc<dyn CompositeMapping>,
    ) -> Arc<Self> {
        Arc::new(Self {
            role: role.to_string(),
            key_columns: key_columns.iter().map(ToString::to_string).collect(),
            index_columns: vec!["idx".to_string()],
            element_columns: vec!["elem_a".to_string(), "elem_b".to_string()],
            index: Some(CollectionPartReference::Entity(index)),
            element: CollectionPartReference::Composite(element),
        })
    }
}

impl CollectionMapping for FakeCollectionMapping {
    fn role(&self) -> &str {
        &self.role
    }

    fn key_column_names(&self) -> Vec<String> {
        self.key_columns.clone()
    }

    fn index_column_names(&self) -> Vec<String> {
        self.index_columns.clone()
    }

    fn element_column_names(&self) -> Vec<String> {
        self.element_columns.clone()
    }

    fn index_reference(&self) -> Option<CollectionPartReference> {
        self.index.clone()
    }

    fn element_reference(&self) -> CollectionPartReference {
        self.element.clone()
    }
}

///
/// FakeDriver
///
/// In-memory scrollable result set. Position 0 is before-first and
/// `rows.len() + 1` is after-last, matching the 1-based driver contract.
///

pub struct FakeDriver {
    pub columns: Vec<ColumnDescriptor>,
    pub rows: Vec<Vec<Value>>,
    pub position: i64,
    pub closed: bool,
    pub fail_close: bool,
    pub close_calls: usize,
    /// Navigation calls left before the driver starts failing them.
    pub fail_navigation_after: Option<usize>,
}

impl FakeDriver {
    pub fn new(columns: Vec<ColumnDescriptor>, rows: Vec<Vec<Value>>) -> Self {
        Self {
            columns,
            rows,
            position: 0,
            closed: false,
            fail_close: false,
            close_calls: 0,
            fail_navigation_after: None,
        }
    }

    fn ensure_open(&self) -> Result<(), DriverError> {
        if self.closed {
            return Err(DriverError::Closed);
        }
        Ok(())
    }

    fn check_navigation(&mut self) -> Result<(), DriverError> {
        self.ensure_open()?;
        if let Some(remaining) = &mut self.fail_navigation_after {
            if *remaining == 0 {
                return Err(DriverError::Backend {
                    message: "navigation failed".to_string(),
                });
            }
            *remaining -= 1;
        }
        Ok(())
    }

    fn row_count(&self) -> i64 {
        self.rows.len() as i64
    }

    fn clamp(&mut self, target: i64) -> bool {
        if target < 1 {
            self.position = 0;
            false
        } else if target > self.row_count() {
            self.position = self.row_count() + 1;
            false
        } else {
            self.position = target;
            true
        }
    }
}

impl DriverCursor for FakeDriver {
    fn next(&mut self) -> Result<bool, DriverError> {
        self.check_navigation()?;
        let target = self.position + 1;
        Ok(self.clamp(target))
    }

    fn previous(&mut self) -> Result<bool, DriverError> {
        self.check_navigation()?;
        let target = self.position - 1;
        Ok(self.clamp(target))
    }

    fn first(&mut self) -> Result<bool, DriverError> {
        self.check_navigation()?;
        Ok(self.clamp(1))
    }

    fn last(&mut self) -> Result<bool, DriverError> {
        self.check_navigation()?;
        let target = self.row_count();
        Ok(self.clamp(target.max(0)))
    }

    fn relative(&mut self, delta: i64) -> Result<bool, DriverError> {
        self.check_navigation()?;
        let target = self.position + delta;
        Ok(self.clamp(target))
    }

    fn absolute(&mut self, position: i64) -> Result<bool, DriverError> {
        self.check_navigation()?;
        let target = if position < 0 {
            self.row_count() + 1 + position
        } else {
            position
        };
        Ok(self.clamp(target))
    }

    fn before_first(&mut self) -> Result<(), DriverError> {
        self.ensure_open()?;
        self.position = 0;
        Ok(())
    }

    fn after_last(&mut self) -> Result<(), DriverError> {
        self.ensure_open()?;
        self.position = self.row_count() + 1;
        Ok(())
    }

    fn row_position(&self) -> Result<i64, DriverError> {
        self.ensure_open()?;
        if self.position >= 1 && self.position <= self.row_count() {
            Ok(self.position)
        } else {
            Ok(0)
        }
    }

    fn metadata(&self) -> Result<ResultSetMetadata, DriverError> {
        self.ensure_open()?;
        Ok(ResultSetMetadata::new(self.columns.clone()))
    }

    fn read(&self, position: usize, _ty: &SemanticType) -> Result<Value, DriverError> {
        self.ensure_open()?;
        if self.position < 1 || self.position > self.row_count() {
            return Err(DriverError::NoCurrentRow);
        }
        let row = &self.rows[(self.position - 1) as usize];
        row.get(position - 1)
            .cloned()
            .ok_or(DriverError::ColumnOutOfRange {
                position,
                count: row.len(),
            })
    }

    fn close(&mut self) -> Result<(), DriverError> {
        self.close_calls += 1;
        self.closed = true;
        if self.fail_close {
            return Err(DriverError::Backend {
                message: "close failed".to_string(),
            });
        }
        Ok(())
    }
}

///
/// RecordingSession
///

#[derive(Default)]
pub struct RecordingSession {
    pub hydrated: Vec<(String, Value)>,
    pub rows_seen: usize,
    pub registered: Vec<CursorId>,
    pub released: Vec<CursorId>,
    pub fail_release: bool,
}

impl SessionContext for RecordingSession {
    fn hydrate_entity(&mut self, mapping: &str, key: Value) -> Result<Value, SessionError> {
        self.hydrated.push((mapping.to_string(), key.clone()));
        Ok(Value::Entity {
            mapping: mapping.to_string(),
            key: Box::new(key),
        })
    }

    fn after_row_materialized(&mut self, _row: &ProcessedRow) {
        self.rows_seen += 1;
    }

    fn register_cursor(&mut self, cursor: CursorId) {
        self.registered.push(cursor);
    }

    fn release_cursor(&mut self, cursor: CursorId) -> Result<(), SessionError> {
        self.released.push(cursor);
        if self.fail_release {
            return Err(SessionError::CleanupFailed {
                message: "release failed".to_string(),
            });
        }
        Ok(())
    }
}
