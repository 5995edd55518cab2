//! Log sanitization utilities
//!
//! Keeps credentials and large payloads (TXT/DKIM data, raw XML bodies) out
//! of debug and error logs.

use crate::xmlrpc::Value;

/// Maximum number of bytes kept by [`truncate_for_log`].
const TRUNCATE_LIMIT: usize = 256;

/// Placeholder printed instead of a secret.
const MASK: &str = "***";

/// `str::floor_char_boundary` is not stable on our MSRV.
fn floor_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        return s.len();
    }
    let mut i = index;
    while i > 0 && !s.is_char_boundary(i) {
        i -= 1;
    }
    i
}

/// Truncates a string for logging, appending the total byte length when cut.
pub fn truncate_for_log(s: &str) -> String {
    if s.len() <= TRUNCATE_LIMIT {
        s.to_string()
    } else {
        format!(
            "{}... [truncated, total {} bytes]",
            &s[..floor_char_boundary(s, TRUNCATE_LIMIT)],
            s.len()
        )
    }
}

/// Renders call arguments for a debug log line.
///
/// The first `secret_count` arguments are masked. Strings are quoted, structs
/// show their keys only, arrays show their length.
pub fn summarize_params(params: &[Value], secret_count: usize) -> String {
    let rendered: Vec<String> = params
        .iter()
        .enumerate()
        .map(|(i, value)| {
            if i < secret_count {
                MASK.to_string()
            } else {
                summarize_value(value)
            }
        })
        .collect();
    truncate_for_log(&rendered.join(", "))
}

fn summarize_value(value: &Value) -> String {
    match value {
        Value::String(s) => format!("{s:?}"),
        Value::Int(i) => i.to_string(),
        Value::Boolean(b) => b.to_string(),
        Value::Struct(fields) => {
            let keys: Vec<&str> = fields.keys().map(String::as_str).collect();
            format!("{{{}}}", keys.join(", "))
        }
        Value::Array(items) => format!("[{} items]", items.len()),
        other => other.type_name().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xmlrpc::Struct;

    #[test]
    fn short_string_unchanged() {
        assert_eq!(truncate_for_log("OK"), "OK");
    }

    #[test]
    fn exactly_at_limit() {
        let s = "a".repeat(TRUNCATE_LIMIT);
        assert_eq!(truncate_for_log(&s), s);
    }

    #[test]
    fn long_body_truncated() {
        let s = "<value>".repeat(100);
        let result = truncate_for_log(&s);
        assert!(result.ends_with(&format!("[truncated, total {} bytes]", s.len())));
        assert!(result.len() < s.len());
    }

    #[test]
    fn truncation_respects_char_boundary() {
        let s = "å".repeat(200);
        let result = truncate_for_log(&s);
        assert!(result.contains("... [truncated, total 400 bytes]"));
    }

    #[test]
    fn credentials_are_masked() {
        let params = [
            Value::from("user@loopiaapi"),
            Value::from("hunter2"),
            Value::from("example.com"),
            Value::from("www"),
        ];
        let line = summarize_params(&params, 2);
        assert_eq!(line, r#"***, ***, "example.com", "www""#);
        assert!(!line.contains("hunter2"));
    }

    #[test]
    fn record_struct_shows_keys_only() {
        let mut record = Struct::new();
        record.insert("rdata".to_string(), Value::from("v=DKIM1; p=secretkey"));
        record.insert("ttl".to_string(), Value::Int(3600));

        let line = summarize_params(&[Value::from(record), Value::Int(7)], 0);
        assert_eq!(line, "{rdata, ttl}, 7");
        assert!(!line.contains("secretkey"));
    }
}
