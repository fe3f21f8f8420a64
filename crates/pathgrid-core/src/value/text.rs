use crate::value::Value;
use serde_json::Number;
use std::num::FpCategory;

const OBJECT_TEXT: &str = "[object Object]";

pub(crate) fn display_text(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => number_text(n),
        Value::Text(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(array_element_text)
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => OBJECT_TEXT.to_string(),
    }
}

// Array joins render null elements as empty strings.
fn array_element_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        other => display_text(other),
    }
}

// Integers print as-is; floats use the shortest round-trip digits laid out
// the way script `String()` does.
fn number_text(n: &Number) -> String {
    if n.is_f64()
        && let Some(f) = n.as_f64()
    {
        return float_text(f);
    }

    n.to_string()
}

// Plain notation for decimal exponents in (-6, 21], scientific otherwise.
fn float_text(f: f64) -> String {
    if matches!(f.classify(), FpCategory::Zero) {
        return "0".to_string();
    }

    let sci = format!("{:e}", f.abs());
    let Some((mantissa, exponent)) = sci.split_once('e') else {
        return f.to_string();
    };
    let Ok(exponent) = exponent.parse::<i32>() else {
        return f.to_string();
    };

    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    let k = i32::try_from(digits.len()).unwrap_or(i32::MAX);
    let n = exponent + 1;

    let body = if k <= n && n <= 21 {
        format!("{digits}{}", zeros(n - k))
    } else if 0 < n && n <= 21 {
        let (int, frac) = digits.split_at(usize::try_from(n).unwrap_or(0));
        format!("{int}.{frac}")
    } else if -6 < n && n <= 0 {
        format!("0.{}{digits}", zeros(-n))
    } else {
        let (lead, rest) = digits.split_at(1);
        let sign = if exponent < 0 { '-' } else { '+' };
        let exp = exponent.unsigned_abs();
        if rest.is_empty() {
            format!("{lead}e{sign}{exp}")
        } else {
            format!("{lead}.{rest}e{sign}{exp}")
        }
    };

    if f.is_sign_negative() {
        format!("-{body}")
    } else {
        body
    }
}

fn zeros(count: i32) -> String {
    "0".repeat(usize::try_from(count).unwrap_or(0))
}
