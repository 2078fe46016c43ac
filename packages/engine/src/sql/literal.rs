use std::fmt::Write;

use crate::Value;

/// Renders a value as a Db2 for i SQL literal.
pub fn quote_value(value: &Value) -> String {
    match value {
        Value::Null => "NULL".to_string(),
        Value::Boolean(value) => if *value { "1" } else { "0" }.to_string(),
        Value::Integer(value) => value.to_string(),
        Value::Real(value) => render_real(*value),
        Value::Text(value) => format!("'{}'", value.replace('\'', "''")),
        Value::Blob(bytes) => {
            let mut out = String::with_capacity(bytes.len() * 2 + 3);
            out.push_str("X'");
            for byte in bytes {
                let _ = write!(out, "{byte:02X}");
            }
            out.push('\'');
            out
        }
    }
}

// Finite reals use the exponent form so Db2 reads a floating-point constant,
// never an integer or a DECIMAL that could exceed its precision.
fn render_real(value: f64) -> String {
    if value.is_nan() {
        "DECFLOAT('NaN')".to_string()
    } else if value.is_infinite() && value > 0.0 {
        "DECFLOAT('Infinity')".to_string()
    } else if value.is_infinite() {
        "DECFLOAT('-Infinity')".to_string()
    } else {
        format!("{value:E}")
    }
}
