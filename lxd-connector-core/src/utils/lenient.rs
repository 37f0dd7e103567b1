//! 面板参数的宽松反序列化
//!
//! 面板传来的数值字段可能是数字，也可能是数字字符串（`"8080"`、`"2"`），
//! 主机 ID 也可能是整数。这里统一接受两种形式。

use serde::{Deserialize, Deserializer};
use serde_json::Value;

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    String(String),
    I64(i64),
    U64(u64),
}

/// `"8080"` 或 `8080` -> `u16`
pub fn port<'de, D>(deserializer: D) -> Result<u16, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    let raw = match StringOrNumber::deserialize(deserializer)? {
        StringOrNumber::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|e| Error::custom(format!("Invalid port '{s}': {e}")))?,
        StringOrNumber::I64(n) => n,
        StringOrNumber::U64(n) => i64::try_from(n).unwrap_or(i64::MAX),
    };

    u16::try_from(raw).map_err(|_| Error::custom(format!("Port out of range: {raw}")))
}

/// `"42"` 或 `42` -> `String`
pub fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match StringOrNumber::deserialize(deserializer)? {
        StringOrNumber::String(s) => s,
        StringOrNumber::I64(n) => n.to_string(),
        StringOrNumber::U64(n) => n.to_string(),
    })
}

/// 表单整数字段：缺失、空或无法解析时为 0
pub fn int_or_zero<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(value_as_i64).unwrap_or(0))
}

/// 将 JSON 值解读为整数（接受数字与数字字符串）
pub fn value_as_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Deserialize)]
    struct Sample {
        #[serde(deserialize_with = "super::port")]
        port: u16,
        #[serde(deserialize_with = "super::string")]
        id: String,
        #[serde(default, deserialize_with = "super::int_or_zero")]
        dport: i64,
    }

    #[test]
    fn accepts_strings_and_numbers() {
        let a: Sample =
            serde_json::from_value(json!({"port": "8080", "id": 42, "dport": "20022"})).unwrap();
        assert_eq!(a.port, 8080);
        assert_eq!(a.id, "42");
        assert_eq!(a.dport, 20022);

        let b: Sample =
            serde_json::from_value(json!({"port": 8080, "id": "h-1", "dport": 20022})).unwrap();
        assert_eq!(b.port, 8080);
        assert_eq!(b.id, "h-1");
        assert_eq!(b.dport, 20022);
    }

    #[test]
    fn form_int_defaults_to_zero() {
        let missing: Sample = serde_json::from_value(json!({"port": 1, "id": "x"})).unwrap();
        assert_eq!(missing.dport, 0);

        let garbage: Sample =
            serde_json::from_value(json!({"port": 1, "id": "x", "dport": "abc"})).unwrap();
        assert_eq!(garbage.dport, 0);

        let negative: Sample =
            serde_json::from_value(json!({"port": 1, "id": "x", "dport": -5})).unwrap();
        assert_eq!(negative.dport, -5);
    }

    #[test]
    fn port_out_of_range_is_rejected() {
        let result: Result<Sample, _> =
            serde_json::from_value(json!({"port": 70000, "id": "x"}));
        assert!(result.is_err());
    }
}
