//! 职位平台 API
//!
//! 每个后端端点对应一个方法。需要认证的方法接收调用时刻的访问令牌，
//! 没有令牌时由网关直接返回 `ApiError::Unauthenticated`。

use crate::error::ApiError;
use crate::gateway::{ApiGateway, HttpClient};
use crate::web::FetchClient;
use fresherjobs_shared::protocol::{
    ApplyRequest, ApplyResponse, GetJobRequest, GetProfileRequest, JobPageRequest,
    ListApplicationsRequest, ListJobsRequest, RegisterRequest, RegisteredUser, StatusUpdated,
    TokenRequest, TokenResponse, UpdateStatusRequest,
};
use fresherjobs_shared::{
    Application, ApplicationId, ApplicationStatus, JobId, JobPosting, NewJob, Page, Profile,
};

/// 浏览器环境下使用的 API 客户端
pub type AppApi = JobBoardApi<FetchClient>;

/// 从 Context 获取 API 客户端
pub fn use_api() -> AppApi {
    leptos::prelude::use_context::<AppApi>().expect("AppApi should be provided")
}

#[derive(Debug, Clone)]
pub struct JobBoardApi<C> {
    gateway: ApiGateway<C>,
}

impl<C: HttpClient> JobBoardApi<C> {
    pub fn new(base_url: impl Into<String>, client: C) -> Self {
        Self {
            gateway: ApiGateway::new(base_url, client),
        }
    }

    pub fn gateway(&self) -> &ApiGateway<C> {
        &self.gateway
    }

    // =========================================================
    // 认证
    // =========================================================

    pub async fn login(&self, username: &str, password: &str) -> Result<TokenResponse, ApiError> {
        let req = TokenRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        self.gateway.send(&req, None).await
    }

    pub async fn register(&self, req: &RegisterRequest) -> Result<RegisteredUser, ApiError> {
        self.gateway.send(req, None).await
    }

    // =========================================================
    // 职位
    // =========================================================

    /// 职位列表；`search` 为空时返回未过滤列表
    pub async fn list_jobs(&self, search: Option<&str>) -> Result<Page<JobPosting>, ApiError> {
        let req = ListJobsRequest {
            search: search.map(str::to_string),
        };
        self.gateway.send(&req, None).await
    }

    /// 按后端给出的游标翻页
    pub async fn job_page(&self, cursor: &str) -> Result<Page<JobPosting>, ApiError> {
        let req = JobPageRequest {
            cursor: cursor.to_string(),
        };
        self.gateway.send(&req, None).await
    }

    pub async fn get_job(&self, id: JobId) -> Result<JobPosting, ApiError> {
        self.gateway.send(&GetJobRequest { id }, None).await
    }

    pub async fn create_job(
        &self,
        job: &NewJob,
        token: Option<&str>,
    ) -> Result<JobPosting, ApiError> {
        self.gateway.send(job, token).await
    }

    pub async fn apply(
        &self,
        req: &ApplyRequest,
        token: Option<&str>,
    ) -> Result<ApplyResponse, ApiError> {
        self.gateway.send(req, token).await
    }

    // =========================================================
    // 申请
    // =========================================================

    pub async fn list_applications(
        &self,
        token: Option<&str>,
    ) -> Result<Vec<Application>, ApiError> {
        self.gateway.send(&ListApplicationsRequest, token).await
    }

    pub async fn update_status(
        &self,
        application_id: ApplicationId,
        status: ApplicationStatus,
        token: Option<&str>,
    ) -> Result<StatusUpdated, ApiError> {
        let req = UpdateStatusRequest {
            application_id,
            status,
        };
        self.gateway.send(&req, token).await
    }

    // =========================================================
    // 个人资料
    // =========================================================

    pub async fn get_profile(&self, token: Option<&str>) -> Result<Profile, ApiError> {
        self.gateway.send(&GetProfileRequest, token).await
    }

    pub async fn update_profile(
        &self,
        profile: &Profile,
        token: Option<&str>,
    ) -> Result<Profile, ApiError> {
        self.gateway.send(profile, token).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::gateway::mock::MockHttpClient;
    use assert_matches::assert_matches;
    use fresherjobs_shared::protocol::{HttpMethod, SignupRole};
    use serde_json::{Value, json};

    const BASE: &str = "http://api.test";

    fn api() -> JobBoardApi<MockHttpClient> {
        JobBoardApi::new(BASE, MockHttpClient::new())
    }

    fn client(api: &JobBoardApi<MockHttpClient>) -> &MockHttpClient {
        api.gateway().client()
    }

    fn job_json(id: u64, title: &str) -> Value {
        json!({
            "id": id,
            "title": title,
            "description": "d",
            "requirements": "r",
            "job_type": "Full-time",
            "location": "Remote",
            "salary_range": null,
            "recruiter_name": "Acme",
            "posted_at": "2026-03-05T10:15:30Z"
        })
    }

    #[tokio::test]
    async fn test_login_returns_identity_and_tokens() {
        let api = api();
        client(&api).mock_response(
            HttpMethod::Post,
            "http://api.test/api/token/",
            200,
            json!({
                "access": "acc",
                "refresh": "ref",
                "username": "asha",
                "is_student": true,
                "is_recruiter": false
            }),
        );

        let resp = api.login("asha", "pw").await.unwrap();
        assert_eq!(resp.username, "asha");
        assert_eq!(resp.access, "acc");

        let sent = client(&api).last_request().unwrap();
        assert!(!sent.headers.contains_key("Authorization"));
        let body: Value = serde_json::from_str(sent.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, json!({"username": "asha", "password": "pw"}));
    }

    #[tokio::test]
    async fn test_bad_credentials_are_a_client_error() {
        let api = api();
        client(&api).mock_response(
            HttpMethod::Post,
            "http://api.test/api/token/",
            401,
            json!({"detail": "No active account found with the given credentials"}),
        );
        let err = api.login("asha", "nope").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Authorization);
    }

    #[tokio::test]
    async fn test_register_surfaces_field_errors() {
        let api = api();
        client(&api).mock_response(
            HttpMethod::Post,
            "http://api.test/api/register/",
            400,
            json!({"username": ["A user with that username already exists."]}),
        );
        let req = RegisterRequest::new(SignupRole::Student, "asha", "a@b.c", "pw", "Asha");
        let err = api.register(&req).await.unwrap_err();
        assert_eq!(
            err.backend_message().as_deref(),
            Some("A user with that username already exists.")
        );
    }

    #[tokio::test]
    async fn test_list_jobs_with_search_and_cursor() {
        let api = api();
        client(&api).mock_response(
            HttpMethod::Get,
            "http://api.test/api/jobs/?search=rust",
            200,
            json!({
                "results": [job_json(1, "Rust Intern")],
                "next": "http://api.test/api/jobs/?page=2&search=rust",
                "previous": null
            }),
        );
        client(&api).mock_response(
            HttpMethod::Get,
            "http://api.test/api/jobs/?page=2&search=rust",
            200,
            json!({
                "results": [job_json(2, "Rust Dev")],
                "next": null,
                "previous": "http://api.test/api/jobs/?search=rust"
            }),
        );

        let first = api.list_jobs(Some("rust")).await.unwrap();
        assert_eq!(first.results[0].title, "Rust Intern");

        let cursor = first.next.unwrap();
        let second = api.job_page(&cursor).await.unwrap();
        assert_eq!(second.results[0].id, 2);
        assert!(second.next.is_none());
    }

    #[tokio::test]
    async fn test_get_job_not_found() {
        let api = api();
        let err = api.get_job(99).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_apply_requires_session() {
        let api = api();
        let req = ApplyRequest {
            job_id: 1,
            cover_letter: String::new(),
        };
        assert_matches!(api.apply(&req, None).await, Err(ApiError::Unauthenticated));
        assert!(client(&api).requests.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_update_status_sends_patch() {
        let api = api();
        client(&api).mock_response(
            HttpMethod::Patch,
            "http://api.test/api/applications/5/update_status/",
            200,
            json!({"message": "Status updated to Hired", "status": "Hired"}),
        );

        let resp = api
            .update_status(5, ApplicationStatus::Hired, Some("tok"))
            .await
            .unwrap();
        assert_eq!(resp.status, ApplicationStatus::Hired);

        let sent = client(&api).last_request().unwrap();
        assert_eq!(sent.body.as_deref(), Some(r#"{"status":"Hired"}"#));
        assert_eq!(sent.headers.get("Authorization").unwrap(), "Bearer tok");
    }

    #[tokio::test]
    async fn test_profile_round_trip_uses_put() {
        let api = api();
        client(&api).mock_response(
            HttpMethod::Get,
            "http://api.test/api/profile/",
            200,
            json!({"full_name": "Asha", "graduation_year": 2026, "skills": null}),
        );
        let profile = api.get_profile(Some("tok")).await.unwrap();
        assert_eq!(profile.graduation_year, "2026");

        client(&api).mock_response(
            HttpMethod::Put,
            "http://api.test/api/profile/",
            200,
            json!({"full_name": "Asha R", "graduation_year": 2026}),
        );
        let updated = Profile {
            full_name: "Asha R".into(),
            ..profile
        };
        let saved = api.update_profile(&updated, Some("tok")).await.unwrap();
        assert_eq!(saved.full_name, "Asha R");
        assert_eq!(
            client(&api).last_request().unwrap().method,
            HttpMethod::Put
        );
    }

    #[tokio::test]
    async fn test_create_job_forbidden_for_students() {
        let api = api();
        client(&api).mock_response(
            HttpMethod::Post,
            "http://api.test/api/jobs/",
            403,
            json!({"detail": "You do not have permission to perform this action."}),
        );
        let err = api
            .create_job(&NewJob::default(), Some("tok"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Authorization);
    }
}
