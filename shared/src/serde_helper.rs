//! 宽松反序列化辅助函数
//!
//! 后端资料接口的字段类型并不统一（`graduation_year` 是整数，未填写的字段是 `null`），
//! 表单层统一按字符串处理。

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// 将字符串 / 数字 / 布尔 / null 统一反序列化为字符串，null 和缺失为空字符串
pub fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(other) => other.to_string(),
    })
}

/// 空白字符串视为 None
pub fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "lenient_string")]
        value: String,
        #[serde(default, deserialize_with = "blank_as_none")]
        optional: Option<String>,
    }

    #[test]
    fn test_lenient_string_accepts_numbers_and_null() {
        let p: Probe = serde_json::from_str(r#"{"value": 2026}"#).unwrap();
        assert_eq!(p.value, "2026");

        let p: Probe = serde_json::from_str(r#"{"value": null}"#).unwrap();
        assert_eq!(p.value, "");

        let p: Probe = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(p.value, "");
        assert_eq!(p.optional, None);
    }

    #[test]
    fn test_blank_as_none() {
        let p: Probe = serde_json::from_str(r#"{"optional": "  "}"#).unwrap();
        assert_eq!(p.optional, None);

        let p: Probe = serde_json::from_str(r#"{"optional": "10-12 LPA"}"#).unwrap();
        assert_eq!(p.optional.as_deref(), Some("10-12 LPA"));
    }
}
