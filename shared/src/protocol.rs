use crate::{
    Application, ApplicationId, ApplicationStatus, JobId, JobPosting, NewJob, Page, Profile,
    Session, Tokens,
};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::fmt;

// =========================================================
// 端点路径 (Endpoint Paths)
// =========================================================

pub const PATH_TOKEN: &str = "/api/token/";
pub const PATH_REGISTER: &str = "/api/register/";
pub const PATH_JOBS: &str = "/api/jobs/";
pub const PATH_APPLICATIONS: &str = "/api/applications/";
pub const PATH_PROFILE: &str = "/api/profile/";

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A trait that defines the request-response relationship and metadata for an API endpoint.
pub trait ApiRequest: Serialize {
    /// The response type returned by this request.
    type Response: DeserializeOwned;
    /// The HTTP method.
    const METHOD: HttpMethod;
    /// Whether the call must carry the bearer token.
    const AUTHENTICATED: bool;

    /// The URL path (or an absolute cursor URL).
    fn path(&self) -> String;

    /// JSON body; GET requests never carry one.
    fn body(&self) -> Result<Option<String>, serde_json::Error> {
        if matches!(Self::METHOD, HttpMethod::Get) {
            return Ok(None);
        }
        serde_json::to_string(self).map(Some)
    }
}

// =========================================================
// 认证 (Auth)
// =========================================================

/// Obtain a token pair
#[derive(Clone, Serialize)]
pub struct TokenRequest {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for TokenRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenRequest")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access: String,
    pub refresh: String,
    pub username: String,
    #[serde(default)]
    pub is_student: bool,
    #[serde(default)]
    pub is_recruiter: bool,
}

impl fmt::Debug for TokenResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenResponse")
            .field("access", &"<redacted>")
            .field("refresh", &"<redacted>")
            .field("username", &self.username)
            .field("is_student", &self.is_student)
            .field("is_recruiter", &self.is_recruiter)
            .finish()
    }
}

impl TokenResponse {
    /// 拆分为身份和令牌
    pub fn into_parts(self) -> (Session, Tokens) {
        (
            Session::new(self.username, self.is_student, self.is_recruiter),
            Tokens::new(self.access, self.refresh),
        )
    }
}

impl ApiRequest for TokenRequest {
    type Response = TokenResponse;
    const METHOD: HttpMethod = HttpMethod::Post;
    const AUTHENTICATED: bool = false;

    fn path(&self) -> String {
        PATH_TOKEN.to_string()
    }
}

/// 注册时选择的角色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SignupRole {
    #[default]
    Student,
    Recruiter,
}

/// Create an account
///
/// 角色决定发送哪个身份字段：学生发送 `full_name`，招聘方发送 `company_name`，
/// 另一个字段固定为空字符串。
#[derive(Clone, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub is_student: bool,
    pub is_recruiter: bool,
    pub full_name: String,
    pub company_name: String,
}

impl RegisterRequest {
    pub fn new(
        role: SignupRole,
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Self {
        let display_name = display_name.into();
        let (full_name, company_name) = match role {
            SignupRole::Student => (display_name, String::new()),
            SignupRole::Recruiter => (String::new(), display_name),
        };
        Self {
            username: username.into(),
            email: email.into(),
            password: password.into(),
            is_student: role == SignupRole::Student,
            is_recruiter: role == SignupRole::Recruiter,
            full_name,
            company_name,
        }
    }
}

impl fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("is_student", &self.is_student)
            .field("is_recruiter", &self.is_recruiter)
            .field("full_name", &self.full_name)
            .field("company_name", &self.company_name)
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RegisteredUser {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub is_student: bool,
    #[serde(default)]
    pub is_recruiter: bool,
}

impl ApiRequest for RegisterRequest {
    type Response = RegisteredUser;
    const METHOD: HttpMethod = HttpMethod::Post;
    const AUTHENTICATED: bool = false;

    fn path(&self) -> String {
        PATH_REGISTER.to_string()
    }
}

// =========================================================
// 职位 (Jobs)
// =========================================================

/// List jobs, optionally filtered by a search term
#[derive(Debug, Clone, Default, Serialize)]
pub struct ListJobsRequest {
    #[serde(skip)]
    pub search: Option<String>,
}

impl ApiRequest for ListJobsRequest {
    type Response = Page<JobPosting>;
    const METHOD: HttpMethod = HttpMethod::Get;
    const AUTHENTICATED: bool = false;

    fn path(&self) -> String {
        match self
            .search
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
        {
            Some(query) => {
                let encoded: String =
                    url::form_urlencoded::byte_serialize(query.as_bytes()).collect();
                format!("{}?search={}", PATH_JOBS, encoded)
            }
            None => PATH_JOBS.to_string(),
        }
    }
}

/// Follow a pagination cursor exactly as the backend returned it
#[derive(Debug, Clone, Serialize)]
pub struct JobPageRequest {
    #[serde(skip)]
    pub cursor: String,
}

impl ApiRequest for JobPageRequest {
    type Response = Page<JobPosting>;
    const METHOD: HttpMethod = HttpMethod::Get;
    const AUTHENTICATED: bool = false;

    fn path(&self) -> String {
        self.cursor.clone()
    }
}

/// Fetch a single job
#[derive(Debug, Clone, Serialize)]
pub struct GetJobRequest {
    #[serde(skip)]
    pub id: JobId,
}

impl ApiRequest for GetJobRequest {
    type Response = JobPosting;
    const METHOD: HttpMethod = HttpMethod::Get;
    const AUTHENTICATED: bool = false;

    fn path(&self) -> String {
        format!("{}{}/", PATH_JOBS, self.id)
    }
}

/// Create a job (recruiter assigned server-side)
impl ApiRequest for NewJob {
    type Response = JobPosting;
    const METHOD: HttpMethod = HttpMethod::Post;
    const AUTHENTICATED: bool = true;

    fn path(&self) -> String {
        PATH_JOBS.to_string()
    }
}

/// Apply to a job with a cover letter
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApplyRequest {
    #[serde(skip)]
    pub job_id: JobId,
    pub cover_letter: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ApplyResponse {
    #[serde(default)]
    pub message: String,
}

impl ApiRequest for ApplyRequest {
    type Response = ApplyResponse;
    const METHOD: HttpMethod = HttpMethod::Post;
    const AUTHENTICATED: bool = true;

    fn path(&self) -> String {
        format!("{}{}/apply/", PATH_JOBS, self.job_id)
    }
}

// =========================================================
// 申请 (Applications)
// =========================================================

/// List the caller's applications (scoped by the backend to role and identity)
#[derive(Debug, Clone, Serialize)]
pub struct ListApplicationsRequest;

impl ApiRequest for ListApplicationsRequest {
    type Response = Vec<Application>;
    const METHOD: HttpMethod = HttpMethod::Get;
    const AUTHENTICATED: bool = true;

    fn path(&self) -> String {
        PATH_APPLICATIONS.to_string()
    }
}

/// Move an application to a new status (recruiter only)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateStatusRequest {
    #[serde(skip)]
    pub application_id: ApplicationId,
    pub status: ApplicationStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusUpdated {
    #[serde(default)]
    pub message: String,
    pub status: ApplicationStatus,
}

impl ApiRequest for UpdateStatusRequest {
    type Response = StatusUpdated;
    const METHOD: HttpMethod = HttpMethod::Patch;
    const AUTHENTICATED: bool = true;

    fn path(&self) -> String {
        format!("{}{}/update_status/", PATH_APPLICATIONS, self.application_id)
    }
}

// =========================================================
// 个人资料 (Profile)
// =========================================================

#[derive(Debug, Clone, Serialize)]
pub struct GetProfileRequest;

impl ApiRequest for GetProfileRequest {
    type Response = Profile;
    const METHOD: HttpMethod = HttpMethod::Get;
    const AUTHENTICATED: bool = true;

    fn path(&self) -> String {
        PATH_PROFILE.to_string()
    }
}

/// Replace the profile with the full record
impl ApiRequest for Profile {
    type Response = Profile;
    const METHOD: HttpMethod = HttpMethod::Put;
    const AUTHENTICATED: bool = true;

    fn path(&self) -> String {
        PATH_PROFILE.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::JobType;
    use serde_json::{Value, json};

    fn body_json<R: ApiRequest>(req: &R) -> Value {
        let body = req.body().unwrap().expect("request should carry a body");
        serde_json::from_str(&body).unwrap()
    }

    #[test]
    fn test_recruiter_registration_payload() {
        let req = RegisterRequest::new(
            SignupRole::Recruiter,
            "acme-hr",
            "hr@acme.test",
            "pw",
            "Acme Corp",
        );
        assert_eq!(
            body_json(&req),
            json!({
                "username": "acme-hr",
                "email": "hr@acme.test",
                "password": "pw",
                "is_student": false,
                "is_recruiter": true,
                "full_name": "",
                "company_name": "Acme Corp"
            })
        );
    }

    #[test]
    fn test_student_registration_payload() {
        let req = RegisterRequest::new(SignupRole::Student, "asha", "a@b.c", "pw", "Asha Rao");
        let body = body_json(&req);
        assert_eq!(body["is_student"], true);
        assert_eq!(body["is_recruiter"], false);
        assert_eq!(body["full_name"], "Asha Rao");
        assert_eq!(body["company_name"], "");
    }

    #[test]
    fn test_passwords_are_not_debug_printed() {
        let req = TokenRequest {
            username: "asha".into(),
            password: "hunter2".into(),
        };
        assert!(!format!("{:?}", req).contains("hunter2"));
    }

    #[test]
    fn test_list_jobs_path_encodes_search() {
        assert_eq!(ListJobsRequest::default().path(), "/api/jobs/");
        let search = |q: &str| ListJobsRequest {
            search: Some(q.to_string()),
        };
        assert_eq!(search("   ").path(), "/api/jobs/");
        assert_eq!(search("rust & react").path(), "/api/jobs/?search=rust+%26+react");
    }

    #[test]
    fn test_get_requests_have_no_body() {
        assert!(ListJobsRequest::default().body().unwrap().is_none());
        assert!(GetProfileRequest.body().unwrap().is_none());
        assert!(ListApplicationsRequest.body().unwrap().is_none());
    }

    #[test]
    fn test_cursor_is_used_verbatim() {
        let cursor = "https://api.example.com/api/jobs/?page=2&search=rust";
        let req = JobPageRequest {
            cursor: cursor.to_string(),
        };
        assert_eq!(req.path(), cursor);
    }

    #[test]
    fn test_id_scoped_paths() {
        assert_eq!(GetJobRequest { id: 12 }.path(), "/api/jobs/12/");
        let apply = ApplyRequest {
            job_id: 12,
            cover_letter: String::new(),
        };
        assert_eq!(apply.path(), "/api/jobs/12/apply/");
        assert_eq!(body_json(&apply), json!({ "cover_letter": "" }));

        let update = UpdateStatusRequest {
            application_id: 5,
            status: ApplicationStatus::Hired,
        };
        assert_eq!(update.path(), "/api/applications/5/update_status/");
        assert_eq!(body_json(&update), json!({ "status": "Hired" }));
    }

    #[test]
    fn test_endpoint_auth_flags() {
        assert!(!TokenRequest::AUTHENTICATED);
        assert!(!RegisterRequest::AUTHENTICATED);
        assert!(!ListJobsRequest::AUTHENTICATED);
        assert!(!GetJobRequest::AUTHENTICATED);
        assert!(NewJob::AUTHENTICATED);
        assert!(ApplyRequest::AUTHENTICATED);
        assert!(ListApplicationsRequest::AUTHENTICATED);
        assert!(UpdateStatusRequest::AUTHENTICATED);
        assert!(GetProfileRequest::AUTHENTICATED);
        assert!(Profile::AUTHENTICATED);
        assert_eq!(Profile::METHOD, HttpMethod::Put);
        assert_eq!(UpdateStatusRequest::METHOD, HttpMethod::Patch);
    }

    #[test]
    fn test_new_job_body() {
        let job = NewJob {
            title: "Intern".into(),
            description: "d".into(),
            requirements: "r".into(),
            job_type: JobType::Contract,
            location: "Pune".into(),
            salary_range: String::new(),
        };
        assert_eq!(
            body_json(&job),
            json!({
                "title": "Intern",
                "description": "d",
                "requirements": "r",
                "job_type": "Contract",
                "location": "Pune",
                "salary_range": ""
            })
        );
    }

    #[test]
    fn test_token_response_into_parts() {
        let resp: TokenResponse = serde_json::from_value(json!({
            "access": "a",
            "refresh": "r",
            "username": "asha",
            "is_student": true,
            "is_recruiter": false
        }))
        .unwrap();
        let (session, tokens) = resp.into_parts();
        assert_eq!(session, Session::new("asha", true, false));
        assert_eq!(tokens, Tokens::new("a", "r"));
    }

    #[test]
    fn test_token_response_debug_is_redacted() {
        let resp: TokenResponse = serde_json::from_value(json!({
            "access": "secret-access",
            "refresh": "secret-refresh",
            "username": "asha"
        }))
        .unwrap();
        let rendered = format!("{:?}", resp);
        assert!(!rendered.contains("secret"));
        assert!(rendered.contains("asha"));
    }

    fn decode<R: ApiRequest>(value: serde_json::Value) -> R::Response {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_job_pages_decode_without_results_key() {
        let page = decode::<ListJobsRequest>(json!({"next": null, "previous": null}));
        assert!(page.is_empty());

        let page = decode::<JobPageRequest>(json!({
            "results": [{"id": 3, "title": "Rust Intern", "posted_at": "2026-03-05T10:15:30Z"}],
            "next": "https://api.test/api/jobs/?page=3",
            "previous": null
        }));
        assert_eq!(page.results[0].id, 3);
        assert_eq!(page.next.as_deref(), Some("https://api.test/api/jobs/?page=3"));
    }
}
