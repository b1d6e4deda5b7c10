use rusqlite::types::Value;

use crate::types::ScalarValue;

/// Bind scalar parameters to SQLite value types.
#[must_use]
pub fn convert_params(params: &[ScalarValue]) -> Vec<Value> {
    let mut vec_values = Vec::with_capacity(params.len());
    for p in params {
        let v = match p {
            ScalarValue::Text(s) => Value::Text(s.to_string()),
            ScalarValue::Int(i) => Value::Integer(*i),
            ScalarValue::Float(f) => Value::Real(*f),
        };
        vec_values.push(v);
    }
    vec_values
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalars_map_to_sqlite_storage_classes() {
        let params = vec![
            ScalarValue::Text("alice".into()),
            ScalarValue::Int(1),
            ScalarValue::Float(2.5),
        ];
        let converted = convert_params(&params);
        assert_eq!(
            converted,
            vec![
                Value::Text("alice".into()),
                Value::Integer(1),
                Value::Real(2.5),
            ]
        );
    }
}
