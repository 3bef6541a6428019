//! 发布职位表单状态

use crate::error::{ApiError, ErrorKind};
use fresherjobs_shared::{JobPosting, JobType, NewJob, Role};

pub const MSG_NOT_RECRUITER: &str =
    "Are you sure you are logged in as a recruiter? Students cannot post jobs.";
pub const MSG_POST_FAILED: &str = "Failed to post the job. Please try again.";

#[derive(Debug, Clone)]
pub struct JobForm {
    /// 提交者角色，决定失败提示
    pub role: Role,
    pub job: NewJob,
    pub submitting: bool,
    pub error: Option<String>,
}

impl JobForm {
    pub fn new(role: Role) -> Self {
        Self {
            role,
            job: NewJob::default(),
            submitting: false,
            error: None,
        }
    }

    /// 表单值无法识别时保持原类型
    pub fn set_job_type(&mut self, value: &str) {
        if let Some(job_type) = JobType::parse(value) {
            self.job.job_type = job_type;
        }
    }

    /// 开始提交；正在提交时返回 None
    pub fn begin_submit(&mut self) -> Option<NewJob> {
        if self.submitting {
            return None;
        }
        self.submitting = true;
        self.error = None;
        Some(self.job.clone())
    }

    /// 成功返回 true（页面随后跳转到列表）；失败时表单内容保留
    pub fn resolve(&mut self, result: Result<JobPosting, ApiError>) -> bool {
        self.submitting = false;
        match result {
            Ok(job) => {
                log::info!("[PostJob] created job #{}", job.id);
                true
            }
            Err(e) => {
                self.error = Some(post_job_error_message(&e, self.role));
                false
            }
        }
    }
}

/// 非招聘方发布职位时，后端返回 401/403 或 500
///
/// 招聘方收到的 500 是真正的服务端故障，不给角色提示。
pub fn post_job_error_message(err: &ApiError, role: Role) -> String {
    match err.kind() {
        ErrorKind::Authorization | ErrorKind::Unauthenticated => MSG_NOT_RECRUITER.to_string(),
        ErrorKind::Server if err.status() == Some(500) && !role.is_recruiter() => {
            MSG_NOT_RECRUITER.to_string()
        }
        ErrorKind::Validation => err
            .backend_message()
            .unwrap_or_else(|| MSG_POST_FAILED.to_string()),
        ErrorKind::Network | ErrorKind::Decode => err.user_message(),
        _ => MSG_POST_FAILED.to_string(),
    }
}
