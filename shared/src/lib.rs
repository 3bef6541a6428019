//! FresherJobs 共享模型
//!
//! 前端与后端 REST API 之间传输的数据结构。
//! 字段命名与后端 JSON 保持一致，不做任何业务校验（校验由后端负责）。

pub mod date;
pub mod protocol;
pub mod serde_helper;

pub use date::Timestamp;

use serde::{Deserialize, Serialize};
use std::fmt;

// =========================================================
// 常量定义 (Constants)
// =========================================================

pub const HEADER_AUTHORIZATION: &str = "Authorization";
pub const AUTH_SCHEME_BEARER: &str = "Bearer";

pub type JobId = u64;
pub type ApplicationId = u64;

// =========================================================
// 会话 (Session)
// =========================================================

/// 当前登录身份
///
/// 两个角色标志相互独立，客户端不校验它们是否互斥。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub username: String,
    pub is_student: bool,
    pub is_recruiter: bool,
}

impl Session {
    pub fn new(username: impl Into<String>, is_student: bool, is_recruiter: bool) -> Self {
        Self {
            username: username.into(),
            is_student,
            is_recruiter,
        }
    }

    /// 归一化后的角色
    pub fn role(&self) -> Role {
        Role::from_flags(self.is_student, self.is_recruiter)
    }
}

/// 归一化角色
///
/// 两个标志同时为 true 时按招聘方处理（招聘方视图包含更多操作）；
/// 两个都为 false 时为 `Unknown`，按只读视图渲染。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Student,
    Recruiter,
    Unknown,
}

impl Role {
    pub fn from_flags(is_student: bool, is_recruiter: bool) -> Self {
        match (is_student, is_recruiter) {
            (_, true) => Role::Recruiter,
            (true, false) => Role::Student,
            (false, false) => Role::Unknown,
        }
    }

    pub fn is_recruiter(&self) -> bool {
        matches!(self, Role::Recruiter)
    }
}

/// 访问令牌与刷新令牌
///
/// 对客户端而言是不透明字符串。`Debug` 输出会隐藏内容，避免令牌进入日志。
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tokens {
    pub access: String,
    pub refresh: String,
}

impl Tokens {
    pub fn new(access: impl Into<String>, refresh: impl Into<String>) -> Self {
        Self {
            access: access.into(),
            refresh: refresh.into(),
        }
    }
}

impl fmt::Debug for Tokens {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tokens")
            .field("access", &"<redacted>")
            .field("refresh", &"<redacted>")
            .finish()
    }
}

// =========================================================
// 职位 (Job Posting)
// =========================================================

/// 发布职位时可选的类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum JobType {
    #[default]
    #[serde(rename = "Full-time")]
    FullTime,
    #[serde(rename = "Part-time")]
    PartTime,
    Internship,
    Contract,
}

impl JobType {
    pub const ALL: [JobType; 4] = [
        JobType::FullTime,
        JobType::PartTime,
        JobType::Internship,
        JobType::Contract,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            JobType::FullTime => "Full-time",
            JobType::PartTime => "Part-time",
            JobType::Internship => "Internship",
            JobType::Contract => "Contract",
        }
    }

    /// 从表单值解析，未知值返回 None
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == value)
    }
}

impl fmt::Display for JobType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 职位详情（由后端拥有，客户端只读）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobPosting {
    pub id: JobId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub requirements: String,
    /// 后端字符串，未知取值也原样展示
    #[serde(default)]
    pub job_type: String,
    #[serde(default)]
    pub location: String,
    #[serde(default, deserialize_with = "serde_helper::blank_as_none")]
    pub salary_range: Option<String>,
    #[serde(default)]
    pub recruiter_name: String,
    #[serde(default)]
    pub recruiter_id: Option<u64>,
    pub posted_at: Timestamp,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

/// 新职位（创建请求体）
///
/// 招聘方身份由后端根据令牌分配。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct NewJob {
    pub title: String,
    pub description: String,
    pub requirements: String,
    pub job_type: JobType,
    pub location: String,
    /// 可选字段，留空时发送空字符串
    pub salary_range: String,
}

// =========================================================
// 申请 (Application)
// =========================================================

/// 申请状态，完全由后端拥有
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ApplicationStatus {
    Applied,
    Shortlisted,
    Hired,
    Rejected,
}

impl ApplicationStatus {
    /// 招聘方可以设置的目标状态
    pub const RECRUITER_TARGETS: [ApplicationStatus; 3] = [
        ApplicationStatus::Shortlisted,
        ApplicationStatus::Hired,
        ApplicationStatus::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Applied => "Applied",
            ApplicationStatus::Shortlisted => "Shortlisted",
            ApplicationStatus::Hired => "Hired",
            ApplicationStatus::Rejected => "Rejected",
        }
    }

    /// 招聘方操作按钮文案
    pub fn action_label(&self) -> &'static str {
        match self {
            ApplicationStatus::Applied => "Reset",
            ApplicationStatus::Shortlisted => "Shortlist",
            ApplicationStatus::Hired => "Hire",
            ApplicationStatus::Rejected => "Reject",
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 申请记录
///
/// 同一个接口按调用者角色返回不同字段：
/// 学生看到 `company_name`，招聘方看到申请人信息和求职信。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Application {
    pub id: ApplicationId,
    #[serde(default)]
    pub job: Option<JobId>,
    #[serde(default)]
    pub job_title: String,
    pub status: ApplicationStatus,
    pub applied_at: Timestamp,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub applicant_name: Option<String>,
    #[serde(default)]
    pub applicant_email: Option<String>,
    #[serde(default, deserialize_with = "serde_helper::blank_as_none")]
    pub cover_letter: Option<String>,
}

// =========================================================
// 个人资料 (Profile)
// =========================================================

/// 个人资料
///
/// 学生与招聘方共用一个结构，按角色填充不同的子集。
/// 缺失或为 null 的字段一律为空字符串。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Profile {
    // 学生字段
    #[serde(default, deserialize_with = "serde_helper::lenient_string")]
    pub full_name: String,
    #[serde(default, deserialize_with = "serde_helper::lenient_string")]
    pub university: String,
    #[serde(default, deserialize_with = "serde_helper::lenient_string")]
    pub degree: String,
    #[serde(default, deserialize_with = "serde_helper::lenient_string")]
    pub graduation_year: String,
    #[serde(default, deserialize_with = "serde_helper::lenient_string")]
    pub skills: String,
    #[serde(default, deserialize_with = "serde_helper::lenient_string")]
    pub portfolio_link: String,

    // 招聘方字段
    #[serde(default, deserialize_with = "serde_helper::lenient_string")]
    pub company_name: String,
    #[serde(default, deserialize_with = "serde_helper::lenient_string")]
    pub location: String,
    #[serde(default, deserialize_with = "serde_helper::lenient_string")]
    pub about_company: String,
    #[serde(default, deserialize_with = "serde_helper::lenient_string")]
    pub company_website: String,
}

// =========================================================
// 分页 (Pagination)
// =========================================================

/// 分页列表信封
///
/// `next` / `previous` 是后端给出的不透明游标（完整 URL），客户端从不自行拼接。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    #[serde(default)]
    pub count: Option<u64>,
}

impl<T> Page<T> {
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            results: Vec::new(),
            next: None,
            previous: None,
            count: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_role_normalisation_never_panics() {
        assert_eq!(Role::from_flags(true, false), Role::Student);
        assert_eq!(Role::from_flags(false, true), Role::Recruiter);
        assert_eq!(Role::from_flags(true, true), Role::Recruiter);
        assert_eq!(Role::from_flags(false, false), Role::Unknown);
        assert!(Session::new("both", true, true).role().is_recruiter());
    }

    #[test]
    fn test_tokens_debug_is_redacted() {
        let tokens = Tokens::new("secret-access", "secret-refresh");
        let rendered = format!("{:?}", tokens);
        assert!(!rendered.contains("secret"));
    }

    #[test]
    fn test_job_posting_from_backend_json() {
        let job: JobPosting = serde_json::from_value(json!({
            "id": 7,
            "title": "Rust Intern",
            "description": "Build things",
            "requirements": "Rust",
            "job_type": "Internship",
            "salary_range": "",
            "location": "Remote",
            "posted_at": "2026-03-05T10:15:30Z",
            "is_active": true,
            "recruiter_name": "Acme",
            "recruiter_id": 3
        }))
        .unwrap();

        assert_eq!(job.id, 7);
        assert_eq!(job.salary_range, None);
        assert_eq!(job.recruiter_name, "Acme");
        assert_eq!(JobType::parse(&job.job_type), Some(JobType::Internship));
    }

    #[test]
    fn test_new_job_serialises_job_type_label() {
        let job = NewJob {
            title: "Backend".into(),
            job_type: JobType::PartTime,
            ..Default::default()
        };
        let value = serde_json::to_value(&job).unwrap();
        assert_eq!(value["job_type"], "Part-time");
        assert_eq!(value["salary_range"], "");
    }

    #[test]
    fn test_application_shapes_for_both_roles() {
        let student_view: Application = serde_json::from_value(json!({
            "id": 1,
            "job": 7,
            "job_title": "Rust Intern",
            "company_name": "Acme",
            "applicant_name": null,
            "applicant_email": null,
            "cover_letter": "",
            "applied_at": "2026-03-05T10:15:30Z",
            "status": "Applied"
        }))
        .unwrap();
        assert_eq!(student_view.company_name.as_deref(), Some("Acme"));
        assert_eq!(student_view.cover_letter, None);

        let recruiter_view: Application = serde_json::from_value(json!({
            "id": 2,
            "job_title": "Rust Intern",
            "applicant_name": "Asha",
            "applicant_email": "asha@example.com",
            "cover_letter": "Hello",
            "applied_at": "2026-03-05T10:15:30Z",
            "status": "Shortlisted"
        }))
        .unwrap();
        assert_eq!(recruiter_view.status, ApplicationStatus::Shortlisted);
        assert_eq!(recruiter_view.company_name, None);
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        let result: Result<ApplicationStatus, _> = serde_json::from_value(json!("Pending"));
        assert!(result.is_err());
    }

    #[test]
    fn test_profile_defaults_missing_fields_to_empty() {
        let profile: Profile = serde_json::from_value(json!({
            "id": 4,
            "user": {"username": "asha"},
            "full_name": "Asha",
            "graduation_year": 2026,
            "portfolio_link": null
        }))
        .unwrap();

        assert_eq!(profile.full_name, "Asha");
        assert_eq!(profile.graduation_year, "2026");
        assert_eq!(profile.portfolio_link, "");
        assert_eq!(profile.company_name, "");
    }

    #[test]
    fn test_page_envelope() {
        let page: Page<JobPosting> = serde_json::from_value(json!({
            "count": 0,
            "next": null,
            "previous": "https://api.example.com/api/jobs/?page=1",
            "results": []
        }))
        .unwrap();
        assert!(page.is_empty());
        assert!(page.next.is_none());
        assert!(page.previous.is_some());
    }

    #[test]
    fn test_page_of_jobs_without_results_key() {
        let page: Page<JobPosting> = serde_json::from_value(json!({"count": 0})).unwrap();
        assert!(page.is_empty());
        assert_eq!(page, Page::default());

        let page: Page<JobPosting> = serde_json::from_value(json!({
            "results": [{"id": 7, "title": "Junior Dev", "posted_at": "2026-03-05T10:15:30Z"}]
        }))
        .unwrap();
        assert_eq!(page.results.len(), 1);
        assert_eq!(page.results[0].title, "Junior Dev");
        assert!(page.results[0].is_active);
    }
}
