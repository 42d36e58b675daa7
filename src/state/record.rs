use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;
use serde_json::Value;

use crate::error::StoreError;

/// The one persisted entity: `{ "value": n, "lastUpdated": ms }`.
///
/// `last_updated` is advisory. Nothing reads it to resolve conflicts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CounterRecord {
    pub value: i64,
    pub last_updated: u64,
}

impl CounterRecord {
    /// Stamp `value` with the current wall clock.
    pub fn now(value: i64) -> Self {
        Self { value, last_updated: now_millis() }
    }
}

/// Milliseconds since the Unix epoch. A clock before 1970 reads as 0.
pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Serialize `value` with a fresh timestamp.
pub fn encode(value: i64) -> Result<Vec<u8>, StoreError> {
    encode_record(&CounterRecord::now(value))
}

pub fn encode_record(record: &CounterRecord) -> Result<Vec<u8>, StoreError> {
    serde_json::to_vec(record).map_err(StoreError::Encode)
}

/// Extract `value`, or 0 for anything that is not a JSON object with an
/// integer `value`. Negative values pass through untouched.
pub fn decode(bytes: &[u8]) -> i64 {
    decode_value(bytes).unwrap_or(0)
}

/// Strict form of [`decode`]: `None` where `decode` would fall back to 0.
pub fn decode_value(bytes: &[u8]) -> Option<i64> {
    let v: Value = serde_json::from_slice(bytes).ok()?;
    integer_value(&v)
}

/// `value` as an integer. Floats with no fractional part (`5.0`) count,
/// as long as they fit in an `i64`.
fn integer_value(v: &Value) -> Option<i64> {
    match v.get("value")? {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64)
                .map(|f| f as i64)
        }),
        _ => None,
    }
}

/// Full record, accepting `lastUpdated` as an integer or as a float
/// (widget extensions that work in floating-point seconds write
/// `seconds * 1000`). A missing or odd timestamp reads as 0.
pub fn decode_record(bytes: &[u8]) -> Option<CounterRecord> {
    let v: Value = serde_json::from_slice(bytes).ok()?;
    let value = integer_value(&v)?;
    let last_updated = match v.get("lastUpdated") {
        Some(Value::Number(n)) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
            .unwrap_or(0),
        _ => 0,
    };
    Some(CounterRecord { value, last_updated })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_writes_exactly_two_fields() {
        let before = now_millis();
        let bytes = encode(12).unwrap();
        let v: Value = serde_json::from_slice(&bytes).unwrap();
        let obj = v.as_object().unwrap();

        assert_eq!(obj.len(), 2);
        assert_eq!(obj["value"], Value::from(12));
        let stamp = obj["lastUpdated"].as_u64().unwrap();
        assert!(stamp >= before);
        assert!(stamp <= now_millis());
    }

    #[test]
    fn decode_reads_value_back() {
        assert_eq!(decode(&encode(0).unwrap()), 0);
        assert_eq!(decode(&encode(41).unwrap()), 41);
        assert_eq!(decode(&encode(i64::MAX).unwrap()), i64::MAX);
    }

    #[test]
    fn malformed_input_decodes_to_zero() {
        for bad in [
            &b"not json"[..],
            b"",
            b"{}",
            br#"{"value": "abc"}"#,
            br#"{"value": null}"#,
            br#"{"value": 2.5}"#,
            br#"{"value": 18446744073709551615}"#,
            b"[1, 2, 3]",
            b"7",
        ] {
            assert_eq!(decode(bad), 0, "input {:?}", String::from_utf8_lossy(bad));
        }
    }

    #[test]
    fn whole_floats_decode_as_integers() {
        assert_eq!(decode(br#"{"value": 5.0}"#), 5);
        assert_eq!(decode(br#"{"value": -2.0, "lastUpdated": 1}"#), -2);
        assert_eq!(decode(br#"{"value": 1e3}"#), 1000);
        assert_eq!(decode(br#"{"value": 1e30}"#), 0);
        assert_eq!(decode_record(br#"{"value": 7.0}"#).unwrap().value, 7);
    }

    #[test]
    fn negative_values_are_not_rejected() {
        assert_eq!(decode(br#"{"value": -3, "lastUpdated": 1}"#), -3);
    }

    #[test]
    fn record_accepts_float_timestamps() {
        let r = decode_record(br#"{"value": 4, "lastUpdated": 1700000000123.0}"#).unwrap();
        assert_eq!(r, CounterRecord { value: 4, last_updated: 1_700_000_000_123 });

        let r = decode_record(br#"{"value": 4}"#).unwrap();
        assert_eq!(r.last_updated, 0);

        assert!(decode_record(br#"{"lastUpdated": 5}"#).is_none());
    }
}
