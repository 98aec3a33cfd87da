use pretty_assertions::assert_eq;
use retroconv::formatter::values::convert_value;
use retroconv::{infer_value, TypedValue};

#[test]
fn test_precedence() {
    assert_eq!(infer_value("true"), TypedValue::Boolean(true));
    assert_eq!(infer_value("false"), TypedValue::Boolean(false));
    assert_eq!(infer_value("42"), TypedValue::Integer(42));
    assert_eq!(infer_value("3.14"), TypedValue::Float(3.14));
    assert_eq!(infer_value("hello"), TypedValue::String("hello".into()));
    assert_eq!(infer_value(""), TypedValue::String(String::new()));
}

#[test]
fn test_booleans_are_case_sensitive() {
    assert_eq!(infer_value("True"), TypedValue::String("True".into()));
    assert_eq!(infer_value("FALSE"), TypedValue::String("FALSE".into()));
}

#[test]
fn test_signed_numbers() {
    assert_eq!(infer_value("-7"), TypedValue::Integer(-7));
    assert_eq!(infer_value("+7"), TypedValue::Integer(7));
    assert_eq!(infer_value("-0.5"), TypedValue::Float(-0.5));
}

#[test]
fn test_integer_wins_over_float() {
    assert_eq!(infer_value("10").kind().to_string(), "integer");
    assert_eq!(infer_value("10.0").kind().to_string(), "float");
}

#[test]
fn test_out_of_range_and_non_finite_stay_strings() {
    assert_eq!(
        infer_value("99999999999999999999"),
        TypedValue::String("99999999999999999999".into())
    );
    assert_eq!(infer_value("inf"), TypedValue::String("inf".into()));
    assert_eq!(infer_value("NaN"), TypedValue::String("NaN".into()));
    assert_eq!(infer_value("1e999"), TypedValue::String("1e999".into()));
}

#[test]
fn test_exponent_floats() {
    assert_eq!(infer_value("1e3"), TypedValue::Float(1000.0));
}

#[test]
fn test_inference_can_be_disabled() {
    assert_eq!(convert_value("42", false), TypedValue::String("42".into()));
    assert_eq!(convert_value("42", true), TypedValue::Integer(42));
}
