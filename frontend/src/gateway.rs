//! API 网关模块
//!
//! 把页面动作翻译成对后端的 HTTP 调用，并把响应归类为 `ApiError` / 成功数据。
//! 单次请求-响应：不重试、不自动刷新令牌、不排队。

use crate::error::{ApiError, ErrorPayload, TransportError};
use async_trait::async_trait;
use fresherjobs_shared::protocol::{ApiRequest, HttpMethod};
use fresherjobs_shared::{AUTH_SCHEME_BEARER, HEADER_AUTHORIZATION};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;

// =========================================================
// 核心抽象层 (HTTP Interface Abstraction)
// =========================================================

/// 通用 HTTP 请求结构
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub url: String,
    pub method: HttpMethod,
    pub headers: HashMap<String, String>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn new(url: &str, method: HttpMethod) -> Self {
        Self {
            url: url.to_string(),
            method,
            headers: HashMap::new(),
            body: None,
        }
    }

    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers.insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_body(mut self, body: String) -> Self {
        self.body = Some(body);
        self
    }
}

/// 通用 HTTP 响应结构
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// HTTP 客户端特性 (Trait)
/// 浏览器环境下的 Future 不是 Send 的，因此使用 (?Send)
#[async_trait(?Send)]
pub trait HttpClient {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, TransportError>;
}

// =========================================================
// 网关
// =========================================================

#[derive(Debug, Clone)]
pub struct ApiGateway<C> {
    base_url: String,
    client: C,
}

impl<C: HttpClient> ApiGateway<C> {
    pub fn new(base_url: impl Into<String>, client: C) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, client }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[cfg(test)]
    pub fn client(&self) -> &C {
        &self.client
    }

    /// 拼接完整 URL；绝对 URL（分页游标）原样使用
    pub fn url(&self, path: &str) -> String {
        if url::Url::parse(path).is_ok() {
            path.to_string()
        } else if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// 发送一次调用
    ///
    /// `authenticated` 为 true 且没有令牌时直接返回 `Unauthenticated`，请求不会发出。
    pub async fn call(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<String>,
        authenticated: bool,
        access_token: Option<&str>,
    ) -> Result<Value, ApiError> {
        let mut req = HttpRequest::new(&self.url(path), method)
            .with_header("Accept", "application/json");

        if authenticated {
            let Some(token) = access_token.filter(|t| !t.is_empty()) else {
                log::warn!("[Gateway] {} {} needs a session; not sent", method, path);
                return Err(ApiError::Unauthenticated);
            };
            req = req.with_header(
                HEADER_AUTHORIZATION,
                &format!("{} {}", AUTH_SCHEME_BEARER, token),
            );
        }

        if let Some(body) = body {
            req = req
                .with_header("Content-Type", "application/json")
                .with_body(body);
        }

        log::debug!("[Gateway] {} {}", method, req.url);
        let response = self.client.send(req).await.map_err(|e| {
            log::warn!("[Gateway] {} {} transport failure: {}", method, path, e);
            ApiError::from(e)
        })?;

        classify(response).inspect_err(|e| {
            log::warn!(
                "[Gateway] {} {} failed [{}]: {}",
                method,
                path,
                e.kind().error_code(),
                e
            );
        })
    }

    /// 发送强类型请求并解析响应
    pub async fn send<R: ApiRequest>(
        &self,
        req: &R,
        access_token: Option<&str>,
    ) -> Result<R::Response, ApiError> {
        let body = req
            .body()
            .map_err(|e| ApiError::Decode(format!("request encode failed: {}", e)))?;
        let value = self
            .call(R::METHOD, &req.path(), body, R::AUTHENTICATED, access_token)
            .await?;
        decode(value)
    }
}

/// 按状态码归类响应
fn classify(response: HttpResponse) -> Result<Value, ApiError> {
    let HttpResponse { status, body } = response;
    match status {
        200..=299 => {
            if body.trim().is_empty() {
                return Ok(Value::Null);
            }
            serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
        }
        400..=499 => Err(ApiError::Client {
            status,
            payload: ErrorPayload::from_body(&body),
        }),
        500..=599 => Err(ApiError::Server { status }),
        other => Err(ApiError::Decode(format!("unexpected status {}", other))),
    }
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T, ApiError> {
    serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
}

// =========================================================
// 测试工具: MockHttpClient
// =========================================================


#[cfg(test)]
mod tests {
    use super::mock::MockHttpClient;
    use super::*;
    use crate::error::ErrorKind;
    use assert_matches::assert_matches;
    use fresherjobs_shared::protocol::{ApplyRequest, ListApplicationsRequest};
    use serde_json::json;

    const BASE: &str = "https://api.example.com";

    fn gateway() -> ApiGateway<MockHttpClient> {
        ApiGateway::new(format!("{}/", BASE), MockHttpClient::new())
    }

    #[test]
    fn test_url_joining() {
        let gw = gateway();
        assert_eq!(gw.base_url(), BASE);
        assert_eq!(gw.url("/api/jobs/"), "https://api.example.com/api/jobs/");
        assert_eq!(gw.url("api/jobs/"), "https://api.example.com/api/jobs/");
        assert_eq!(
            gw.url("https://other.example.com/api/jobs/?page=2"),
            "https://other.example.com/api/jobs/?page=2"
        );
    }

    #[tokio::test]
    async fn test_authenticated_call_without_token_is_not_sent() {
        let gw = gateway();
        let result = gw.send(&ListApplicationsRequest, None).await;
        assert_matches!(result, Err(ApiError::Unauthenticated));
        assert!(gw.client.requests.borrow().is_empty());

        let result = gw.send(&ListApplicationsRequest, Some("")).await;
        assert_matches!(result, Err(ApiError::Unauthenticated));
        assert!(gw.client.requests.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_bearer_header_attached_when_required() {
        let gw = gateway();
        gw.client.mock_response(
            HttpMethod::Get,
            "https://api.example.com/api/applications/",
            200,
            json!([]),
        );

        let apps = gw.send(&ListApplicationsRequest, Some("tok-1")).await.unwrap();
        assert!(apps.is_empty());

        let req = gw.client.last_request().unwrap();
        assert_eq!(req.headers.get("Authorization").unwrap(), "Bearer tok-1");
        assert!(req.body.is_none());
        assert!(!req.headers.contains_key("Content-Type"));
    }

    #[tokio::test]
    async fn test_public_call_never_carries_token() {
        let gw = gateway();
        gw.client.mock_response(
            HttpMethod::Get,
            "https://api.example.com/api/jobs/",
            200,
            json!({"results": [], "next": null, "previous": null}),
        );

        let value = gw
            .call(HttpMethod::Get, "/api/jobs/", None, false, Some("tok-1"))
            .await
            .unwrap();
        assert_eq!(value["results"], json!([]));
        let req = gw.client.last_request().unwrap();
        assert!(!req.headers.contains_key("Authorization"));
    }

    #[tokio::test]
    async fn test_client_error_surfaces_payload() {
        let gw = gateway();
        gw.client.mock_response(
            HttpMethod::Post,
            "https://api.example.com/api/jobs/3/apply/",
            400,
            json!({"error": "You have already applied for this job."}),
        );

        let req = ApplyRequest {
            job_id: 3,
            cover_letter: "Hi".into(),
        };
        let err = gw.send(&req, Some("tok")).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.status(), Some(400));
        assert_eq!(
            err.backend_message().as_deref(),
            Some("You have already applied for this job.")
        );

        let sent = gw.client.last_request().unwrap();
        assert_eq!(sent.headers.get("Content-Type").unwrap(), "application/json");
        assert_eq!(sent.body.as_deref(), Some(r#"{"cover_letter":"Hi"}"#));
    }

    #[tokio::test]
    async fn test_server_and_network_errors() {
        let gw = gateway();
        gw.client
            .mock_raw(HttpMethod::Get, "https://api.example.com/api/profile/", 503, "");
        let err = gw
            .call(HttpMethod::Get, "/api/profile/", None, true, Some("t"))
            .await
            .unwrap_err();
        assert_matches!(err, ApiError::Server { status: 503 });

        gw.client
            .mock_unreachable(HttpMethod::Get, "https://api.example.com/api/jobs/");
        let err = gw
            .call(HttpMethod::Get, "/api/jobs/", None, false, None)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Network);
    }

    #[tokio::test]
    async fn test_undecodable_success_body() {
        let gw = gateway();
        gw.client.mock_raw(
            HttpMethod::Get,
            "https://api.example.com/api/applications/",
            200,
            "<html>maintenance</html>",
        );
        let err = gw
            .send(&ListApplicationsRequest, Some("t"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decode);
    }

    #[tokio::test]
    async fn test_empty_success_body_is_null() {
        let gw = gateway();
        gw.client.mock_raw(
            HttpMethod::Patch,
            "https://api.example.com/api/applications/4/",
            204,
            "",
        );
        let value = gw
            .call(HttpMethod::Patch, "/api/applications/4/", None, true, Some("t"))
            .await
            .unwrap();
        assert_eq!(value, Value::Null);
    }

    #[tokio::test]
    async fn test_plain_text_client_error_keeps_message() {
        let gw = gateway();
        gw.client.mock_raw(
            HttpMethod::Get,
            "https://api.example.com/api/profile/",
            403,
            "Profile is locked.",
        );
        let err = gw
            .call(HttpMethod::Get, "/api/profile/", None, true, Some("t"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Authorization);
        assert_eq!(err.backend_message().as_deref(), Some("Profile is locked."));
        assert_eq!(err.user_message(), "Profile is locked.");
    }
}
