//! Declarative request validation. Rules are evaluated in declaration order and
//! every failure is reported; nothing short-circuits inside a rule set.

use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::LazyLock;
use utoipa::ToSchema;

static INT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[-+]?[0-9]+$").expect("valid regex"));
static NUMERIC_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[-+]?[0-9]*\.?[0-9]+$").expect("valid regex"));

/// Where a rule looks for its field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    Params,
    Body,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Check {
    IsInt,
    NotEmpty,
    IsNumeric,
    IsBoolean,
    GreaterThanZero,
}

/// One independently evaluated constraint on one input field.
#[derive(Clone, Copy, Debug)]
pub struct Rule {
    pub location: Location,
    pub field: &'static str,
    pub check: Check,
    pub message: &'static str,
}

impl Rule {
    pub const fn param(field: &'static str, check: Check, message: &'static str) -> Self {
        Rule { location: Location::Params, field, check, message }
    }

    pub const fn body(field: &'static str, check: Check, message: &'static str) -> Self {
        Rule { location: Location::Body, field, check, message }
    }
}

/// One entry of the `errors` array in a 400 response.
#[derive(Clone, Debug, PartialEq, Serialize, ToSchema)]
pub struct FieldError {
    #[serde(rename = "type")]
    pub kind: String,
    /// Offending value; absent when the field was not supplied.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub value: Option<Value>,
    #[schema(example = "Not a valid ID")]
    pub msg: String,
    pub path: String,
    pub location: Location,
}

/// A named, ordered list of rules attached to a route.
pub trait RuleSet {
    const RULES: &'static [Rule];
}

pub struct IdRules;
pub struct CreateProductRules;
pub struct UpdateProductRules;

const ID_RULE: Rule = Rule::param("id", Check::IsInt, "Not a valid ID");
const NAME_RULE: Rule = Rule::body("name", Check::NotEmpty, "Name is required");
const PRICE_RULES: [Rule; 3] = [
    Rule::body("price", Check::GreaterThanZero, "Price must be greater than 0"),
    Rule::body("price", Check::NotEmpty, "Price is required"),
    Rule::body("price", Check::IsNumeric, "Price must be a number"),
];
const AVAILABILITY_RULE: Rule = Rule::body("availability", Check::IsBoolean, "Availability must be a boolean");

impl RuleSet for IdRules {
    const RULES: &'static [Rule] = &[ID_RULE];
}

impl RuleSet for CreateProductRules {
    const RULES: &'static [Rule] = &[NAME_RULE, PRICE_RULES[0], PRICE_RULES[1], PRICE_RULES[2]];
}

impl RuleSet for UpdateProductRules {
    const RULES: &'static [Rule] = &[
        ID_RULE,
        NAME_RULE,
        PRICE_RULES[0],
        PRICE_RULES[1],
        PRICE_RULES[2],
        AVAILABILITY_RULE,
    ];
}

pub struct RequestValidator;

impl RequestValidator {
    /// Run every rule against path params and body; returns all failures in rule order.
    pub fn validate(
        rules: &[Rule],
        params: &HashMap<String, String>,
        body: &Map<String, Value>,
    ) -> Vec<FieldError> {
        let mut errors = Vec::new();
        for rule in rules {
            let value = match rule.location {
                Location::Params => params.get(rule.field).map(|s| Value::String(s.clone())),
                Location::Body => body.get(rule.field).cloned(),
            };
            if !passes(rule.check, value.as_ref()) {
                errors.push(FieldError {
                    kind: "field".into(),
                    value,
                    msg: rule.message.into(),
                    path: rule.field.into(),
                    location: rule.location,
                });
            }
        }
        errors
    }
}

fn passes(check: Check, value: Option<&Value>) -> bool {
    match check {
        Check::IsInt => text_of(value).is_some_and(|s| INT_RE.is_match(&s)),
        Check::NotEmpty => text_of(value).is_some_and(|s| !s.is_empty()),
        Check::IsNumeric => text_of(value).is_some_and(|s| NUMERIC_RE.is_match(&s)),
        Check::IsBoolean => value.is_some_and(|v| loose_bool(v).is_some()),
        Check::GreaterThanZero => coerce_number(value).is_some_and(|n| n > 0.0),
    }
}

/// String form of a scalar. Missing and null read as empty; arrays and objects have none.
fn text_of(value: Option<&Value>) -> Option<String> {
    match value {
        None | Some(Value::Null) => Some(String::new()),
        Some(v) => loose_string(v),
    }
}

/// Loose numeric coercion: missing is NaN (None), null is 0, booleans are 0/1,
/// blank strings are 0, other strings must parse.
fn coerce_number(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Null => Some(0.0),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::String(s) if s.trim().is_empty() => Some(0.0),
        v => loose_number(v),
    }
}

/// Scalar value as text, the way a form field would read it.
pub fn loose_string(v: &Value) -> Option<String> {
    match v {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null => Some(String::new()),
        Value::Array(_) | Value::Object(_) => None,
    }
}

/// JSON numbers and numeric strings.
pub fn loose_number(v: &Value) -> Option<f64> {
    match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        _ => None,
    }
}

/// JSON booleans plus the strings/numbers `true`, `false`, `1`, `0`.
pub fn loose_bool(v: &Value) -> Option<bool> {
    if let Value::Bool(b) = v {
        return Some(*b);
    }
    match loose_string(v)?.as_str() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn body(v: Value) -> Map<String, Value> {
        match v {
            Value::Object(m) => m,
            _ => Map::new(),
        }
    }

    fn params(id: &str) -> HashMap<String, String> {
        HashMap::from([("id".to_string(), id.to_string())])
    }

    fn messages(errors: &[FieldError]) -> Vec<&str> {
        errors.iter().map(|e| e.msg.as_str()).collect()
    }

    #[test]
    fn create_with_empty_body_reports_every_rule() {
        let errors = RequestValidator::validate(CreateProductRules::RULES, &HashMap::new(), &Map::new());
        assert_eq!(
            messages(&errors),
            vec![
                "Name is required",
                "Price must be greater than 0",
                "Price is required",
                "Price must be a number",
            ]
        );
        assert!(errors.iter().all(|e| e.value.is_none()));
    }

    #[test]
    fn zero_price_fails_only_positivity() {
        let errors = RequestValidator::validate(
            CreateProductRules::RULES,
            &HashMap::new(),
            &body(json!({"name": "Test Product", "price": 0})),
        );
        assert_eq!(messages(&errors), vec!["Price must be greater than 0"]);
        assert_eq!(errors[0].value, Some(json!(0)));
    }

    #[test]
    fn non_numeric_price_fails_twice() {
        let errors = RequestValidator::validate(
            CreateProductRules::RULES,
            &HashMap::new(),
            &body(json!({"name": "Test Product", "price": "test"})),
        );
        assert_eq!(messages(&errors), vec!["Price must be greater than 0", "Price must be a number"]);
    }

    #[test]
    fn negative_price_fails_once() {
        let errors = RequestValidator::validate(
            CreateProductRules::RULES,
            &HashMap::new(),
            &body(json!({"name": "Test Product", "price": -5})),
        );
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn numeric_string_price_passes() {
        let errors = RequestValidator::validate(
            CreateProductRules::RULES,
            &HashMap::new(),
            &body(json!({"name": "Test Product", "price": "19.99"})),
        );
        assert!(errors.is_empty());
    }

    #[test]
    fn update_with_empty_body_reports_five_errors() {
        let errors = RequestValidator::validate(UpdateProductRules::RULES, &params("1"), &Map::new());
        assert_eq!(errors.len(), 5);
        assert_eq!(errors[4].msg, "Availability must be a boolean");
    }

    #[test]
    fn id_must_be_an_integer() {
        for bad in ["not-valid-url", "1.5", "1e3", ""] {
            let errors = RequestValidator::validate(IdRules::RULES, &params(bad), &Map::new());
            assert_eq!(messages(&errors), vec!["Not a valid ID"], "id {bad:?}");
            assert_eq!(errors[0].location, Location::Params);
        }
        for good in ["0", "42", "-3", "+7", "01", "007"] {
            assert!(RequestValidator::validate(IdRules::RULES, &params(good), &Map::new()).is_empty());
        }
    }

    #[test]
    fn boolean_rule_accepts_loose_forms() {
        for ok in [json!(true), json!(false), json!("true"), json!("0"), json!(1)] {
            assert!(loose_bool(&ok).is_some(), "{ok}");
        }
        for bad in [json!("yes"), json!(null), json!([true]), json!(2)] {
            assert!(loose_bool(&bad).is_none(), "{bad}");
        }
    }

    #[test]
    fn structured_values_fail_scalar_checks() {
        let errors = RequestValidator::validate(
            CreateProductRules::RULES,
            &HashMap::new(),
            &body(json!({"name": ["a"], "price": {"amount": 3}})),
        );
        assert_eq!(errors.len(), 4);
    }

    #[test]
    fn field_error_serializes_like_a_validator_entry() {
        let errors = RequestValidator::validate(IdRules::RULES, &params("abc"), &Map::new());
        let v = serde_json::to_value(&errors[0]).unwrap();
        assert_eq!(
            v,
            json!({"type": "field", "value": "abc", "msg": "Not a valid ID", "path": "id", "location": "params"})
        );
    }
}
