//! CSV Encoding
//!
//! Minimal RFC 4180 writer for the flat response export. Fields containing
//! a comma, quote, or line break are quoted; embedded quotes are doubled.

/// Quote a field when it needs quoting
pub fn quote(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Append one record (with trailing newline) to the output buffer
pub fn write_record(out: &mut String, fields: &[&str]) {
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push_str(&quote(field));
    }
    out.push('\n');
}
