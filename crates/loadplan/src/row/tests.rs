use crate::{
    driver::{ColumnDescriptor, DriverCursor},
    plan::{ColumnRef, NonScalarReturn, Projection, ScalarReturn, TupleTransformer},
    row::{ProcessedRow, ResultColumnProcessor, RowError, RowProcessor},
    test_support::FakeDriver,
    value::{SemanticType, TypeCode, Value},
};

fn order_columns() -> Vec<ColumnDescriptor> {
    vec![
        ColumnDescriptor::new("order_id", TypeCode::BigInt, 0, 0),
        ColumnDescriptor::new("label", TypeCode::Varchar, 64, 0),
    ]
}

fn single_row_driver() -> FakeDriver {
    let mut driver = FakeDriver::new(
        order_columns(),
        vec![vec![Value::Int(7), Value::Text("first".to_string())]],
    );
    driver.next().expect("position on the only row");
    driver
}

fn entity_projection() -> Projection {
    Projection::declared(
        Vec::new(),
        vec![NonScalarReturn::new(
            "Order",
            ColumnRef::Alias("order_id".to_string()),
            SemanticType::Integer,
        )],
    )
}

#[test]
fn aliases_resolve_to_positions_at_build_time() {
    let driver = single_row_driver();
    let metadata = driver.metadata().expect("metadata snapshot");
    let processor =
        RowProcessor::build(&entity_projection(), &metadata).expect("processor build");

    assert_eq!(processor.non_scalar_slots()[0].key_position, 1);
    assert!(matches!(
        processor.processors()[0],
        ResultColumnProcessor::NonScalar { index: 0 }
    ));
}

#[test]
fn single_non_scalar_return_collapses_to_bare_value() {
    let driver = single_row_driver();
    let metadata = driver.metadata().expect("metadata snapshot");
    let processor =
        RowProcessor::build(&entity_projection(), &metadata).expect("processor build");

    let hydrated = Value::Entity {
        mapping: "Order".to_string(),
        key: Box::new(Value::Int(7)),
    };
    let row = processor
        .build_result_row(&[hydrated.clone()], &driver, None, &[])
        .expect("row build");

    assert_eq!(row, ProcessedRow::Single(hydrated));
}

#[test]
fn transformer_always_receives_the_full_column_array() {
    let driver = single_row_driver();
    let metadata = driver.metadata().expect("metadata snapshot");
    let processor =
        RowProcessor::build(&entity_projection(), &metadata).expect("processor build");

    let hydrated = Value::Entity {
        mapping: "Order".to_string(),
        key: Box::new(Value::Int(7)),
    };
    let row = processor
        .build_result_row(&[hydrated.clone()], &driver, Some(&TupleTransformer), &[])
        .expect("row build");

    assert_eq!(row, ProcessedRow::Holder(Value::Tuple(vec![hydrated])));
}

#[test]
fn mixed_returns_keep_non_scalars_before_scalars() {
    let driver = single_row_driver();
    let metadata = driver.metadata().expect("metadata snapshot");
    let projection = Projection::declared(
        vec![ScalarReturn::new(
            ColumnRef::Alias("label".to_string()),
            SemanticType::Text,
        )],
        vec![NonScalarReturn::new(
            "Order",
            ColumnRef::Position(1),
            SemanticType::Integer,
        )],
    );
    let processor = RowProcessor::build(&projection, &metadata).expect("processor build");

    let hydrated = Value::Entity {
        mapping: "Order".to_string(),
        key: Box::new(Value::Int(7)),
    };
    let row = processor
        .build_result_row(&[hydrated.clone()], &driver, None, &[])
        .expect("row build");

    assert_eq!(
        row,
        ProcessedRow::Columns(vec![hydrated, Value::Text("first".to_string())])
    );
    assert_eq!(
        processor.column_type(0),
        Some(SemanticType::Entity {
            mapping: "Order".to_string()
        })
    );
    assert_eq!(processor.column_type(1), Some(SemanticType::Text));
}

#[test]
fn missing_prehydrated_values_fail_instead_of_indexing() {
    let driver = single_row_driver();
    let metadata = driver.metadata().expect("metadata snapshot");
    let processor =
        RowProcessor::build(&entity_projection(), &metadata).expect("processor build");

    let err = processor
        .build_result_row(&[], &driver, None, &[])
        .expect_err("length mismatch must fail");
    assert!(matches!(
        err,
        RowError::NonScalarDataLength {
            expected: 1,
            received: 0
        }
    ));
}

#[test]
fn processed_row_indexing_respects_shape() {
    let single = ProcessedRow::Single(Value::Int(1));
    assert_eq!(single.value_at(0), Some(&Value::Int(1)));
    assert_eq!(single.value_at(1), None);

    let columns = ProcessedRow::Columns(vec![Value::Int(1), Value::Int(2)]);
    assert_eq!(columns.width(), 2);
    assert_eq!(columns.value_at(1), Some(&Value::Int(2)));
}
