use super::*;

#[test]
fn config_defaults_are_sane() {
    let cfg = ReaderConfig::default();
    assert!(cfg.check_cancellation);
    assert_eq!(cfg.indicator_column, INDICATOR_COLUMN);
}

#[test]
fn config_builder_overrides_indicator_column() {
    let cfg = ReaderConfig::builder()
        .indicator_column("custom_indicator".to_string())
        .build();
    assert_eq!(cfg.indicator_column, "custom_indicator");
    assert!(cfg.check_cancellation);
}

#[test]
fn read_error_formats_cleanly() {
    let err = ReadError::TableNotFound {
        namespace: "ns".into(),
        table_name: "t".into(),
    };
    assert!(format!("{err}").contains("ns/t"));
}

#[test]
fn io_error_converts() {
    let e = io::Error::other("oops");
    let err: ReadError = e.into();
    assert!(matches!(err, ReadError::Io(_)));
}

#[test]
fn relation_consistency() {
    let rel = Relation {
        columns: vec!["id".into()],
        rows: vec![Row(vec![Cell::Int(1)])],
    };
    assert_eq!(rel.columns.len(), 1);
    assert_eq!(rel.rows[0].0.len(), 1);
    assert_eq!(rel.column_index("id"), Some(0));
    assert_eq!(rel.column_index("missing"), None);
    assert!(!rel.is_empty());
    assert!(Relation::empty().is_empty());
}

#[test]
fn cancellation_token_shares_state_across_clones() {
    let token = CancellationToken::new();
    let clone = token.clone();
    assert!(!token.is_cancelled());
    clone.cancel();
    assert!(token.is_cancelled());
}

#[test]
fn cell_from_value_literal() {
    assert_eq!(Cell::from(types::ValueLiteral::Int(3)), Cell::Int(3));
    assert_eq!(
        Cell::from(types::ValueLiteral::Str("x".into())),
        Cell::Str("x".into())
    );
}
