//! Append-style field encoding
//!
//! Encoders write directly into the event buffer. A record is one JSON
//! object; bound context is stored as a brace-less fragment of fields so it
//! can be spliced into any record with [`Encoder::append_object_data`].

use chrono::{DateTime, SecondsFormat, Utc};
use serde::de::IgnoredAny;
use serde::Serialize;
use std::time::Duration;

/// Contract used by events to append typed values.
///
/// Keys and values are appended separately: `append_key` writes the
/// separator and the key, the value method that follows writes the value.
pub trait Encoder {
    fn append_begin_marker(&self, dst: &mut Vec<u8>);
    fn append_end_marker(&self, dst: &mut Vec<u8>);
    fn append_line_break(&self, dst: &mut Vec<u8>);
    fn append_key(&self, dst: &mut Vec<u8>, key: &str);
    fn append_string(&self, dst: &mut Vec<u8>, val: &str);
    fn append_strings<S: AsRef<str>>(&self, dst: &mut Vec<u8>, vals: &[S]);
    fn append_bool(&self, dst: &mut Vec<u8>, val: bool);
    fn append_i64(&self, dst: &mut Vec<u8>, val: i64);
    fn append_u64(&self, dst: &mut Vec<u8>, val: u64);
    fn append_f64(&self, dst: &mut Vec<u8>, val: f64);
    fn append_null(&self, dst: &mut Vec<u8>);
    fn append_time(&self, dst: &mut Vec<u8>, val: &DateTime<Utc>);
    fn append_duration(&self, dst: &mut Vec<u8>, val: Duration);
    fn append_raw_json(&self, dst: &mut Vec<u8>, raw: &[u8]);
    fn append_serialize<T: Serialize + ?Sized>(&self, dst: &mut Vec<u8>, val: &T);
    fn append_object_data(&self, dst: &mut Vec<u8>, fragment: &[u8]);
}

/// JSON implementation of [`Encoder`]
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonEncoder;

impl JsonEncoder {
    /// Writes `val` as JSON; writing into a `Vec` only fails for values that
    /// cannot be represented, in which case `null` is written instead.
    fn write_value<T: Serialize + ?Sized>(dst: &mut Vec<u8>, val: &T) {
        let start = dst.len();
        if serde_json::to_writer(&mut *dst, val).is_err() {
            dst.truncate(start);
            dst.extend_from_slice(b"null");
        }
    }
}

impl Encoder for JsonEncoder {
    #[inline]
    fn append_begin_marker(&self, dst: &mut Vec<u8>) {
        dst.push(b'{');
    }

    #[inline]
    fn append_end_marker(&self, dst: &mut Vec<u8>) {
        dst.push(b'}');
    }

    #[inline]
    fn append_line_break(&self, dst: &mut Vec<u8>) {
        dst.push(b'\n');
    }

    fn append_key(&self, dst: &mut Vec<u8>, key: &str) {
        if let Some(&last) = dst.last() {
            if last != b'{' {
                dst.push(b',');
            }
        }
        Self::write_value(dst, key);
        dst.push(b':');
    }

    fn append_string(&self, dst: &mut Vec<u8>, val: &str) {
        Self::write_value(dst, val);
    }

    fn append_strings<S: AsRef<str>>(&self, dst: &mut Vec<u8>, vals: &[S]) {
        dst.push(b'[');
        for (i, val) in vals.iter().enumerate() {
            if i > 0 {
                dst.push(b',');
            }
            Self::write_value(dst, val.as_ref());
        }
        dst.push(b']');
    }

    fn append_bool(&self, dst: &mut Vec<u8>, val: bool) {
        let literal: &[u8] = if val { b"true" } else { b"false" };
        dst.extend_from_slice(literal);
    }

    fn append_i64(&self, dst: &mut Vec<u8>, val: i64) {
        Self::write_value(dst, &val);
    }

    fn append_u64(&self, dst: &mut Vec<u8>, val: u64) {
        Self::write_value(dst, &val);
    }

    /// NaN and infinities have no JSON form and encode as `null`
    fn append_f64(&self, dst: &mut Vec<u8>, val: f64) {
        Self::write_value(dst, &val);
    }

    fn append_null(&self, dst: &mut Vec<u8>) {
        dst.extend_from_slice(b"null");
    }

    fn append_time(&self, dst: &mut Vec<u8>, val: &DateTime<Utc>) {
        self.append_string(dst, &val.to_rfc3339_opts(SecondsFormat::Millis, true));
    }

    /// Durations are written as floating milliseconds
    fn append_duration(&self, dst: &mut Vec<u8>, val: Duration) {
        self.append_f64(dst, val.as_nanos() as f64 / 1_000_000.0);
    }

    /// Valid input is copied as-is, minus line breaks. In valid JSON those
    /// can only be whitespace, so the record stays on one line.
    fn append_raw_json(&self, dst: &mut Vec<u8>, raw: &[u8]) {
        if serde_json::from_slice::<IgnoredAny>(raw).is_err() {
            self.append_string(dst, &String::from_utf8_lossy(raw));
            return;
        }
        dst.extend(raw.iter().copied().filter(|b| !matches!(b, b'\n' | b'\r')));
    }

    fn append_serialize<T: Serialize + ?Sized>(&self, dst: &mut Vec<u8>, val: &T) {
        match serde_json::to_vec(val) {
            Ok(encoded) => dst.extend_from_slice(&encoded),
            Err(e) => self.append_string(dst, &format!("marshaling error: {}", e)),
        }
    }

    fn append_object_data(&self, dst: &mut Vec<u8>, fragment: &[u8]) {
        let fragment = fragment.strip_prefix(b"{").unwrap_or(fragment);
        if fragment.is_empty() {
            return;
        }
        if let Some(&last) = dst.last() {
            if last != b'{' {
                dst.push(b',');
            }
        }
        dst.extend_from_slice(fragment);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::collections::HashMap;

    const ENC: JsonEncoder = JsonEncoder;

    fn render(f: impl FnOnce(&mut Vec<u8>)) -> String {
        let mut buf = Vec::new();
        ENC.append_begin_marker(&mut buf);
        f(&mut buf);
        ENC.append_end_marker(&mut buf);
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_keys_are_comma_separated() {
        let out = render(|buf| {
            ENC.append_key(buf, "a");
            ENC.append_i64(buf, -3);
            ENC.append_key(buf, "b");
            ENC.append_bool(buf, true);
            ENC.append_key(buf, "c");
            ENC.append_null(buf);
        });
        assert_eq!(out, r#"{"a":-3,"b":true,"c":null}"#);
    }

    #[test]
    fn test_string_escaping() {
        let out = render(|buf| {
            ENC.append_key(buf, "msg");
            ENC.append_string(buf, "line\n\"quoted\"\ttab");
        });
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed["msg"], "line\n\"quoted\"\ttab");
    }

    #[test]
    fn test_non_finite_float_is_null() {
        let out = render(|buf| {
            ENC.append_key(buf, "ratio");
            ENC.append_f64(buf, f64::NAN);
            ENC.append_key(buf, "max");
            ENC.append_f64(buf, f64::INFINITY);
            ENC.append_key(buf, "half");
            ENC.append_f64(buf, 0.5);
        });
        assert_eq!(out, r#"{"ratio":null,"max":null,"half":0.5}"#);
    }

    #[test]
    fn test_strings_array() {
        let out = render(|buf| {
            ENC.append_key(buf, "tags");
            ENC.append_strings(buf, &["a", "b"]);
        });
        assert_eq!(out, r#"{"tags":["a","b"]}"#);
    }

    #[test]
    fn test_invalid_raw_json_degrades_to_string() {
        let out = render(|buf| {
            ENC.append_key(buf, "ok");
            ENC.append_raw_json(buf, br#"{"x":1}"#);
            ENC.append_key(buf, "bad");
            ENC.append_raw_json(buf, b"{not json");
        });
        assert_eq!(out, r#"{"ok":{"x":1},"bad":"{not json"}"#);
    }

    #[test]
    fn test_raw_json_is_kept_verbatim() {
        let out = render(|buf| {
            ENC.append_key(buf, "r");
            ENC.append_raw_json(buf, br#"{"id":12345678901234567890123,"a":1,"a":2}"#);
            ENC.append_key(buf, "list");
            ENC.append_raw_json(buf, b"[1,\r\n  2.50]\n");
        });
        assert_eq!(
            out,
            r#"{"r":{"id":12345678901234567890123,"a":1,"a":2},"list":[1,  2.50]}"#
        );
    }

    #[test]
    fn test_serialize_failure_is_marked() {
        // Non-string map keys cannot be represented in JSON
        let mut map = HashMap::new();
        map.insert(vec![1u8], 1);

        let out = render(|buf| {
            ENC.append_key(buf, "map");
            ENC.append_serialize(buf, &map);
            ENC.append_key(buf, "after");
            ENC.append_i64(buf, 1);
        });
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert!(parsed["map"].as_str().unwrap().starts_with("marshaling error"));
        assert_eq!(parsed["after"], 1);
    }

    #[test]
    fn test_time_and_duration() {
        let ts = Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap();
        let out = render(|buf| {
            ENC.append_key(buf, "at");
            ENC.append_time(buf, &ts);
            ENC.append_key(buf, "took");
            ENC.append_duration(buf, Duration::from_micros(1500));
        });
        assert_eq!(out, r#"{"at":"2024-05-01T12:30:00.000Z","took":1.5}"#);
    }

    #[test]
    fn test_object_data_splicing() {
        let mut fragment = Vec::new();
        ENC.append_key(&mut fragment, "svc");
        ENC.append_string(&mut fragment, "api");
        assert_eq!(fragment, br#""svc":"api""#);

        let mut buf = Vec::new();
        ENC.append_begin_marker(&mut buf);
        ENC.append_object_data(&mut buf, &fragment);
        ENC.append_object_data(&mut buf, b"{\"v\":2");
        ENC.append_object_data(&mut buf, b"");
        ENC.append_end_marker(&mut buf);
        assert_eq!(buf, br#"{"svc":"api","v":2}"#);
    }
}
