use super::*;
use common::VersionId;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn v1() -> VersionId {
    VersionId(1)
}

fn col(name: &str) -> Column {
    Column::new(v1(), name)
}

#[test]
fn leaf_renders_quoted_string() {
    let p = col("b").eq("x");
    assert_eq!(p.render("t0").unwrap(), r#"(t0."b" = 'x')"#);
}

#[test]
fn leaf_renders_bare_numeric() {
    let p = col("a").gt(10i64);
    assert_eq!(p.render("t0").unwrap(), r#"(t0."a" > 10)"#);
}

#[test]
fn between_renders_pair() {
    // S5 from spec §8
    let p = col("x").between(6i64, 8i64);
    assert_eq!(p.render("t0").unwrap(), r#"(t0."x" BETWEEN 6 AND 8)"#);
}

#[test]
fn in_renders_parenthesized_list() {
    let p = col("id").is_in([1i64, 2, 3]);
    assert_eq!(p.render("t0").unwrap(), r#"(t0."id" IN (1, 2, 3))"#);
}

#[test]
fn and_or_render_internal_nodes() {
    // S6 from spec §8: NOT((a=1) AND (b=1))
    let p = col("a").eq(1i64).and(col("b").eq(1i64));
    assert_eq!(
        p.render("t0").unwrap(),
        r#"((t0."a" = 1) AND (t0."b" = 1))"#
    );
}

#[test]
fn composite_negation_matches_de_morgan_expansion() {
    let p = col("a").eq(1i64).and(col("b").eq(1i64));
    let negated = p.not();
    let expected = col("a").ne(1i64).or(col("b").ne(1i64));
    assert_eq!(negated.render("t0").unwrap(), expected.render("t0").unwrap());
}

#[test]
fn negation_involution_round_trips_to_same_clause() {
    let p = col("a").eq(1i64).and(col("b").lt(5i64).or(col("c").is_in([1i64, 2])));
    assert_eq!(p.not().not().render("t0").unwrap(), p.render("t0").unwrap());
}

#[test]
fn de_morgan_and_and_or_are_duals() {
    let a = col("a").eq(1i64);
    let b = col("b").eq(2i64);
    assert_eq!(
        a.clone().and(b.clone()).not().render("t0").unwrap(),
        a.clone().not().or(b.clone().not()).render("t0").unwrap()
    );
    assert_eq!(
        a.clone().or(b.clone()).not().render("t0").unwrap(),
        a.not().and(b.not()).render("t0").unwrap()
    );
}

#[test]
fn column_and_reinterprets_self_as_boolean() {
    let flagged = Column::new(v1(), "active");
    let p = flagged.and(col("b").eq(1i64));
    assert_eq!(
        p.render("t0").unwrap(),
        r#"((t0."active" = TRUE) AND (t0."b" = 1))"#
    );
}

#[test]
fn column_not_negates_boolean_shortcut() {
    let flagged = Column::new(v1(), "active");
    assert_eq!(flagged.not().render("t0").unwrap(), r#"(t0."active" != TRUE)"#);
}

#[test]
fn cross_version_reference_fails_validation() {
    let other = VersionId(2);
    let p = Column::new(other, "x").eq(1i64);
    let err = p.validate_version(v1()).unwrap_err();
    assert!(matches!(err, ReadError::CrossTableReference { .. }));
}

#[test]
fn same_version_passes_validation() {
    let p = col("x").eq(1i64).and(col("y").eq(2i64));
    assert!(p.validate_version(v1()).is_ok());
}

#[test]
fn unescaped_quote_in_string_literal_fails_render() {
    let p = col("name").eq("O'Brien");
    let err = p.render("t0").unwrap_err();
    assert!(matches!(err, ReadError::InvalidLiteral(_)));
}

#[test]
fn timestamp_renders_rfc3339_profile() {
    use chrono::TimeZone;
    let ts = chrono::Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
    let p = col("t").eq(ts);
    let rendered = p.render("t0").unwrap();
    assert!(rendered.starts_with(r#"(t0."t" = '2024-06-01T00:00:00"#));
}

proptest! {
    #[test]
    fn not_is_involutive_for_any_simple_leaf(n in any::<i64>()) {
        let p = col("a").eq(n);
        prop_assert_eq!(p.not().not(), p);
    }

    #[test]
    fn between_complement_is_not_between(a in any::<i64>(), b in any::<i64>()) {
        let p = col("a").between(a, b);
        let negated = p.not();
        match negated {
            Predicate::Leaf { op, .. } => prop_assert_eq!(op, ComparisonOp::NotBetween),
            _ => prop_assert!(false, "expected a leaf"),
        }
    }
}
