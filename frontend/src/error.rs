//! 错误分类模块
//!
//! 网关负责把传输结果归类为 `ApiError`，页面只根据 `ErrorKind` 决定如何展示。

use serde_json::Value;
use thiserror::Error;

// =========================================================
// 用户可见文案
// =========================================================

pub const MSG_UNAUTHENTICATED: &str = "Please log in to continue.";
pub const MSG_AUTHORIZATION: &str =
    "You are not authorized to do that. Are you logged in with the right account?";
pub const MSG_VALIDATION: &str = "The request was rejected. Please check your input.";
pub const MSG_NOT_FOUND: &str = "Not found.";
pub const MSG_SERVER: &str = "Something went wrong on the server. Please try again.";
pub const MSG_NETWORK: &str = "The job board service is unreachable. Please try again later.";
pub const MSG_DECODE: &str = "Received an unexpected response from the server.";

// =========================================================
// 传输层错误
// =========================================================

/// HTTP 传输错误（未拿到可用响应）
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("request build failed: {0}")]
    RequestBuild(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("response read failed: {0}")]
    ResponseRead(String),
}

// =========================================================
// 错误载荷
// =========================================================

/// 4xx 响应体
///
/// 后端返回三种形态：`{"error": "..."}`、`{"detail": "..."}`
/// 以及按字段分组的校验错误 `{"username": ["..."]}`。
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ErrorPayload(Value);

impl ErrorPayload {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// 从响应体解析；非 JSON 的纯文本原样作为消息保留，空响应体为 `Null`
    pub fn from_body(body: &str) -> Self {
        let text = body.trim();
        if text.is_empty() {
            return Self(Value::Null);
        }
        match serde_json::from_str(text) {
            Ok(value) => Self(value),
            Err(_) => {
                log::debug!("non-JSON error body kept as text ({} bytes)", text.len());
                Self(Value::String(text.to_string()))
            }
        }
    }

    #[cfg(test)]
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// `{"error": "..."}`
    pub fn error(&self) -> Option<&str> {
        self.0.get("error")?.as_str()
    }

    /// `{"detail": "..."}`
    pub fn detail(&self) -> Option<&str> {
        self.0.get("detail")?.as_str()
    }

    /// 第一条可展示的消息
    ///
    /// 顺序：`error` → `detail` → 第一个字段的第一条消息（保持后端的字段顺序）。
    pub fn first_message(&self) -> Option<String> {
        if let Some(msg) = self.error().or_else(|| self.detail()) {
            return Some(msg.to_string());
        }
        first_text(&self.0)
    }
}

fn first_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Array(items) => items.iter().find_map(first_text),
        Value::Object(map) => map.values().find_map(first_text),
        _ => None,
    }
}

// =========================================================
// 网关错误
// =========================================================

/// 错误类别，决定页面的展示方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// 需要认证但本地没有令牌（请求未发出）
    Unauthenticated,
    /// 4xx 校验失败，就近展示
    Validation,
    /// 401 / 403，提示检查登录身份
    Authorization,
    /// 404，独立的终止视图
    NotFound,
    /// 5xx
    Server,
    /// 未收到响应
    Network,
    /// 2xx 但响应体无法解析
    Decode,
}

impl ErrorKind {
    /// 机器可读的错误代码（用于日志）
    pub fn error_code(&self) -> &'static str {
        match self {
            ErrorKind::Unauthenticated => "UNAUTHENTICATED",
            ErrorKind::Validation => "VALIDATION",
            ErrorKind::Authorization => "AUTHORIZATION",
            ErrorKind::NotFound => "NOT_FOUND",
            ErrorKind::Server => "SERVER",
            ErrorKind::Network => "NETWORK",
            ErrorKind::Decode => "DECODE",
        }
    }
}

/// 网关调用结果的失败分支
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("authentication required but no access token is present")]
    Unauthenticated,
    #[error("client error {status}")]
    Client { status: u16, payload: ErrorPayload },
    #[error("server error {status}")]
    Server { status: u16 },
    #[error("network error: {0}")]
    Network(String),
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Unauthenticated => ErrorKind::Unauthenticated,
            ApiError::Client { status, .. } => match status {
                401 | 403 => ErrorKind::Authorization,
                404 => ErrorKind::NotFound,
                _ => ErrorKind::Validation,
            },
            ApiError::Server { .. } => ErrorKind::Server,
            ApiError::Network(_) => ErrorKind::Network,
            ApiError::Decode(_) => ErrorKind::Decode,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Client { status, .. } | ApiError::Server { status } => Some(*status),
            _ => None,
        }
    }

    pub fn payload(&self) -> Option<&ErrorPayload> {
        match self {
            ApiError::Client { payload, .. } => Some(payload),
            _ => None,
        }
    }

    /// 后端给出的消息（仅 4xx）
    pub fn backend_message(&self) -> Option<String> {
        self.payload().and_then(ErrorPayload::first_message)
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }

    /// 默认的用户提示文案
    pub fn user_message(&self) -> String {
        match self.kind() {
            ErrorKind::Unauthenticated => MSG_UNAUTHENTICATED.to_string(),
            ErrorKind::Authorization => self
                .backend_message()
                .unwrap_or_else(|| MSG_AUTHORIZATION.to_string()),
            ErrorKind::Validation => self
                .backend_message()
                .unwrap_or_else(|| MSG_VALIDATION.to_string()),
            ErrorKind::NotFound => MSG_NOT_FOUND.to_string(),
            ErrorKind::Server => MSG_SERVER.to_string(),
            ErrorKind::Network => MSG_NETWORK.to_string(),
            ErrorKind::Decode => MSG_DECODE.to_string(),
        }
    }
}

impl From<TransportError> for ApiError {
    fn from(e: TransportError) -> Self {
        match e {
            TransportError::RequestBuild(msg) | TransportError::Network(msg) => {
                ApiError::Network(msg)
            }
            TransportError::ResponseRead(msg) => ApiError::Decode(msg),
        }
    }
}
