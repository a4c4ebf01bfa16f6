pub mod reader;
pub mod writer;

use serde_json::Value;

pub use reader::{read_json_lines, JsonLines};
pub use writer::write_json_lines;

/// Whether a value counts as empty: null, false, zero, or an empty string, array or object.
pub fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().map_or(false, |f| f == 0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn falsy_values() {
        for v in [json!(null), json!(false), json!(0), json!(0.0), json!(""), json!([]), json!({})] {
            assert!(is_falsy(&v), "{} should be falsy", v);
        }
        for v in [json!(true), json!(-1), json!(" "), json!([0]), json!({"a": null})] {
            assert!(!is_falsy(&v), "{} should not be falsy", v);
        }
    }
}
