//! 应用配置
//!
//! 默认值为常量；API 地址和日志级别可在构建时通过环境变量覆盖：
//! `FRESHERJOBS_API_URL`、`FRESHERJOBS_LOG_LEVEL`。

use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "https://fresherjobs-api.onrender.com";
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);
pub const NOTICE_TIMEOUT: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// 后端根地址（无结尾斜杠）
    pub api_base_url: String,
    /// 搜索框输入停止多久后自动提交
    pub search_debounce: Duration,
    /// 成功提示自动消失的时间
    pub notice_timeout: Duration,
    pub log_level: log::Level,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            search_debounce: SEARCH_DEBOUNCE,
            notice_timeout: NOTICE_TIMEOUT,
            log_level: log::Level::Info,
        }
    }
}

/// 从 Context 获取配置
pub fn use_config() -> AppConfig {
    leptos::prelude::use_context::<AppConfig>().expect("AppConfig should be provided")
}

impl AppConfig {
    /// 读取构建时注入的覆盖值
    pub fn from_env() -> Self {
        Self::from_overrides(
            option_env!("FRESHERJOBS_API_URL"),
            option_env!("FRESHERJOBS_LOG_LEVEL"),
        )
    }

    pub fn from_overrides(api_base_url: Option<&str>, log_level: Option<&str>) -> Self {
        let mut config = Self::default();

        if let Some(url) = api_base_url.map(str::trim).filter(|u| !u.is_empty()) {
            config.api_base_url = url.trim_end_matches('/').to_string();
        }

        if let Some(level) = log_level.map(str::trim).filter(|l| !l.is_empty()) {
            match log::Level::from_str(level) {
                Ok(level) => config.log_level = level,
                Err(_) => {
                    log::warn!("[Config] unknown log level {:?}, keeping default", level)
                }
            }
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_overrides(None, None);
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.search_debounce, Duration::from_millis(300));
        assert_eq!(config.notice_timeout, Duration::from_secs(3));
        assert_eq!(config.log_level, log::Level::Info);
    }

    #[test]
    fn test_overrides_trim_trailing_slash() {
        let config = AppConfig::from_overrides(Some("http://127.0.0.1:8000/"), Some("debug"));
        assert_eq!(config.api_base_url, "http://127.0.0.1:8000");
        assert_eq!(config.log_level, log::Level::Debug);
    }

    #[test]
    fn test_blank_or_invalid_overrides_fall_back() {
        let config = AppConfig::from_overrides(Some("  "), Some("loud"));
        assert_eq!(config, AppConfig::default());
    }
}
