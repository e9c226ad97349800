use crate::value::{HeuristicTypeResolver, SemanticType, TypeCode, TypeResolver, Value};
use rust_decimal::Decimal;

#[test]
fn scalar_values_report_their_mapped_type() {
    assert_eq!(
        Value::Text("abc".to_string()).semantic_type(),
        Some(SemanticType::Text)
    );
    assert_eq!(
        Value::Decimal(Decimal::new(125, 2)).semantic_type(),
        Some(SemanticType::Decimal)
    );
    assert_eq!(Value::Null.semantic_type(), None);
    assert_eq!(Value::Tuple(vec![Value::Int(1)]).semantic_type(), None);
}

#[test]
fn decimal_request_accepts_integer_mapping() {
    assert!(SemanticType::Decimal.assignable_from(&SemanticType::Integer));
    assert!(SemanticType::Decimal.assignable_from(&SemanticType::Decimal));
    assert!(!SemanticType::Decimal.assignable_from(&SemanticType::Text));
    assert!(!SemanticType::Integer.assignable_from(&SemanticType::Decimal));
}

#[test]
fn semantic_type_display_names_are_stable() {
    assert_eq!(SemanticType::Text.to_string(), "string");
    assert_eq!(SemanticType::Decimal.to_string(), "big-decimal");
    assert_eq!(
        SemanticType::Entity {
            mapping: "Order".to_string()
        }
        .to_string(),
        "entity(Order)"
    );
}

#[test]
fn heuristic_collapses_scaleless_numerics_to_integer() {
    let resolver = HeuristicTypeResolver;

    assert_eq!(
        resolver.resolve(TypeCode::Numeric, 10, 0),
        SemanticType::Integer
    );
    assert_eq!(
        resolver.resolve(TypeCode::Numeric, 10, 2),
        SemanticType::Decimal
    );
    // Wider than 64 bits stays decimal even with scale zero.
    assert_eq!(
        resolver.resolve(TypeCode::Numeric, 38, 0),
        SemanticType::Decimal
    );
    // Unknown precision is not trusted.
    assert_eq!(
        resolver.resolve(TypeCode::Decimal, 0, 0),
        SemanticType::Decimal
    );
}

#[test]
fn heuristic_maps_character_and_temporal_codes() {
    let resolver = HeuristicTypeResolver;

    assert_eq!(
        resolver.resolve(TypeCode::Varchar, 255, 0),
        SemanticType::Text
    );
    assert_eq!(
        resolver.resolve(TypeCode::Timestamp, 0, 0),
        SemanticType::Timestamp
    );
    assert_eq!(resolver.resolve(TypeCode::Other, 0, 0), SemanticType::Bytes);
}

#[test]
fn named_lookup_resolves_known_identifiers_only() {
    let resolver = HeuristicTypeResolver;

    assert_eq!(
        resolver.resolve_named("big-decimal"),
        Some(SemanticType::Decimal)
    );
    assert_eq!(resolver.resolve_named("string"), Some(SemanticType::Text));
    assert_eq!(resolver.resolve_named("geometry"), None);
}
