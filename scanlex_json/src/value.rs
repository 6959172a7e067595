use std::fmt;

/// Parsed JSON value; object members keep their source order
#[derive(Debug, Clone, PartialEq)]
pub enum JsonValue {
    Object(Vec<(String, JsonValue)>),
    Array(Vec<JsonValue>),
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl JsonValue {
    /// First member named `key`, for objects
    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        match self {
            JsonValue::Object(members) => members.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[JsonValue]> {
        match self {
            JsonValue::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            JsonValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            JsonValue::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Numeric value of either number variant
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            JsonValue::Integer(n) => Some(*n as f64),
            JsonValue::Float(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            JsonValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, JsonValue::Null)
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            JsonValue::Object(_) => "object",
            JsonValue::Array(_) => "array",
            JsonValue::String(_) => "string",
            JsonValue::Integer(_) | JsonValue::Float(_) => "number",
            JsonValue::Bool(_) => "boolean",
            JsonValue::Null => "null",
        }
    }

    /// Convert to a `serde_json::Value`.
    ///
    /// Duplicate object keys collapse to the last occurrence and non-finite
    /// floats become `null`, as serde_json cannot represent either.
    pub fn to_serde(&self) -> serde_json::Value {
        use serde_json::Value;

        match self {
            JsonValue::Object(members) => Value::Object(
                members
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_serde()))
                    .collect(),
            ),
            JsonValue::Array(items) => Value::Array(items.iter().map(JsonValue::to_serde).collect()),
            JsonValue::String(s) => Value::String(s.clone()),
            JsonValue::Integer(n) => Value::from(*n),
            JsonValue::Float(n) => serde_json::Number::from_f64(*n).map_or(Value::Null, Value::Number),
            JsonValue::Bool(b) => Value::Bool(*b),
            JsonValue::Null => Value::Null,
        }
    }
}

fn indent(out: &mut String, level: usize) {
    out.extend(std::iter::repeat("  ").take(level));
}

impl JsonValue {
    /// Indented JSON text, two spaces per level, members in source order
    pub fn to_pretty_string(&self) -> String {
        let mut out = String::new();
        self.write_pretty(&mut out, 0);
        out
    }

    fn write_pretty(&self, out: &mut String, level: usize) {
        match self {
            JsonValue::Object(members) if !members.is_empty() => {
                out.push_str("{\n");
                for (i, (key, value)) in members.iter().enumerate() {
                    if i > 0 {
                        out.push_str(",\n");
                    }
                    indent(out, level + 1);
                    out.push_str(&serde_json::Value::from(key.as_str()).to_string());
                    out.push_str(": ");
                    value.write_pretty(out, level + 1);
                }
                out.push('\n');
                indent(out, level);
                out.push('}');
            }
            JsonValue::Array(items) if !items.is_empty() => {
                out.push_str("[\n");
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        out.push_str(",\n");
                    }
                    indent(out, level + 1);
                    item.write_pretty(out, level + 1);
                }
                out.push('\n');
                indent(out, level);
                out.push(']');
            }
            other => out.push_str(&other.to_string()),
        }
    }
}

fn write_string(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    let quoted = serde_json::to_string(s).map_err(|_| fmt::Error)?;
    f.write_str(&quoted)
}

/// Compact JSON text with object members in source order
impl fmt::Display for JsonValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JsonValue::Object(members) => {
                f.write_str("{")?;
                for (i, (key, value)) in members.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write_string(f, key)?;
                    write!(f, ":{}", value)?;
                }
                f.write_str("}")
            }
            JsonValue::Array(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
            JsonValue::String(s) => write_string(f, s),
            other => write!(f, "{}", other.to_serde()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> JsonValue {
        JsonValue::Object(vec![
            ("name".to_string(), JsonValue::String("scan\"lex".to_string())),
            (
                "values".to_string(),
                JsonValue::Array(vec![
                    JsonValue::Integer(-3),
                    JsonValue::Float(2.5),
                    JsonValue::Bool(false),
                    JsonValue::Null,
                ]),
            ),
        ])
    }

    #[test]
    fn test_accessors() {
        let value = sample();
        assert_eq!(value.get("name").and_then(JsonValue::as_str), Some("scan\"lex"));
        let values = value.get("values").and_then(JsonValue::as_array).unwrap();
        assert_eq!(values[0].as_i64(), Some(-3));
        assert_eq!(values[0].as_f64(), Some(-3.0));
        assert_eq!(values[1].as_f64(), Some(2.5));
        assert_eq!(values[2].as_bool(), Some(false));
        assert!(values[3].is_null());
        assert!(value.get("missing").is_none());
        assert_eq!(value.type_name(), "object");
    }

    #[test]
    fn test_display_is_compact_json() {
        assert_eq!(
            sample().to_string(),
            r#"{"name":"scan\"lex","values":[-3,2.5,false,null]}"#
        );
    }

    #[test]
    fn test_display_keeps_member_order() {
        let value = JsonValue::Object(vec![
            ("z".to_string(), JsonValue::Integer(1)),
            ("a".to_string(), JsonValue::Object(vec![])),
        ]);
        assert_eq!(value.to_string(), r#"{"z":1,"a":{}}"#);
    }

    #[test]
    fn test_pretty_output() {
        let expected = "{\n  \"name\": \"scan\\\"lex\",\n  \"values\": [\n    -3,\n    2.5,\n    false,\n    null\n  ]\n}";
        assert_eq!(sample().to_pretty_string(), expected);
        assert_eq!(JsonValue::Array(vec![]).to_pretty_string(), "[]");
    }

    #[test]
    fn test_non_finite_float_becomes_null() {
        assert_eq!(JsonValue::Float(f64::INFINITY).to_serde(), serde_json::Value::Null);
    }
}
