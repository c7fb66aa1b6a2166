//! Declarative payload validation for book requests.
//!
//! The book field set is fixed, so validation is a table of [`FieldSpec`]
//! entries checked by a pure function over the raw JSON body. Violation
//! messages keep the `instance.<field> ...` wording that API clients
//! already match on.

use serde_json::Value;

/// Expected JSON type for a payload field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    String,
    Integer,
}

impl FieldType {
    /// Type name as it appears in violation messages.
    pub fn name(self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Integer => "integer",
        }
    }

    /// Check a JSON value against this type. No coercion: a numeric
    /// string is not an integer.
    fn matches(self, value: &Value) -> bool {
        match self {
            FieldType::String => value.is_string(),
            FieldType::Integer => match value {
                Value::Number(n) => n.is_i64() || n.is_u64(),
                _ => false,
            },
        }
    }
}

/// One entry of the fixed book schema.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldType,
    pub required: bool,
}

/// The book payload schema. Order matters: violations are reported in
/// this order.
pub const BOOK_FIELDS: &[FieldSpec] = &[
    FieldSpec { name: "isbn", kind: FieldType::String, required: true },
    FieldSpec { name: "amazon_url", kind: FieldType::String, required: true },
    FieldSpec { name: "author", kind: FieldType::String, required: true },
    FieldSpec { name: "language", kind: FieldType::String, required: true },
    FieldSpec { name: "pages", kind: FieldType::Integer, required: true },
    FieldSpec { name: "publisher", kind: FieldType::String, required: true },
    FieldSpec { name: "title", kind: FieldType::String, required: true },
    FieldSpec { name: "year", kind: FieldType::Integer, required: true },
];

/// Validate a candidate book payload against [`BOOK_FIELDS`].
///
/// Returns the ordered list of violation messages; an empty list means
/// the payload is valid. Unknown extra fields are ignored.
pub fn validate(payload: &Value) -> Vec<String> {
    let mut violations = Vec::new();

    let Some(object) = payload.as_object() else {
        violations.push("instance is not of a type(s) object".to_string());
        return violations;
    };

    for field in BOOK_FIELDS {
        match object.get(field.name) {
            None => {
                if field.required {
                    violations.push(format!("instance requires property \"{}\"", field.name));
                }
            }
            Some(value) => {
                if !field.kind.matches(value) {
                    violations.push(format!(
                        "instance.{} is not of a type(s) {}",
                        field.name,
                        field.kind.name()
                    ));
                }
            }
        }
    }

    violations
}
