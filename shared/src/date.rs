//! 时间类型模块
//!
//! 后端以 RFC 3339 字符串返回 `posted_at` / `applied_at`。
//! `Timestamp` 原样保存该字符串，只在展示时解析，解析失败时回退为原文。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 展示用的日期格式，例如 `Mar 5, 2026`
const DATE_LABEL_FORMAT: &str = "%b %-d, %Y";

/// 后端下发的时间戳（原始字符串）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Timestamp(String);

impl Timestamp {
    /// 从原始字符串创建
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// 获取原始字符串
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 解析为 UTC 时间
    ///
    /// 返回 None 如果不是合法的 RFC 3339 字符串
    pub fn parse(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.0)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }

    /// 日期标签（用于卡片和列表）
    pub fn date_label(&self) -> String {
        match self.parse() {
            Some(dt) => dt.format(DATE_LABEL_FORMAT).to_string(),
            None => self.0.clone(),
        }
    }
}

impl From<&str> for Timestamp {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.date_label())
    }
}
