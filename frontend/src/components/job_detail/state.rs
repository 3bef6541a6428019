//! 职位详情与申请状态
//!
//! 申请分两步：先打开求职信窗口，再提交。两步都在调用时检查会话。

use crate::components::notice::Notice;
use crate::error::{ApiError, ErrorKind};
use fresherjobs_shared::protocol::{ApplyRequest, ApplyResponse};
use fresherjobs_shared::{JobId, JobPosting};

pub const MSG_APPLIED: &str = "Application submitted successfully!";
pub const MSG_APPLY_FAILED: &str = "Failed to apply.";

#[derive(Debug, Clone, PartialEq)]
pub enum JobLoad {
    Loading,
    Loaded(JobPosting),
    /// 404，独立的终止视图
    NotFound,
    Failed(String),
}

/// 申请流程所处阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ApplyPhase {
    #[default]
    Idle,
    /// 求职信窗口已打开
    Composing,
    Submitting,
    /// 后端已确认，不能再次提交
    Applied,
}

/// 打开申请窗口的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenOutcome {
    Opened,
    RequireLogin,
    /// 已申请或正在提交
    Ignored,
}

/// 提交申请的结果
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Send(ApplyRequest),
    RequireLogin,
    Blocked,
}

#[derive(Debug, Clone)]
pub struct DetailState {
    pub job_id: JobId,
    pub load: JobLoad,
    pub phase: ApplyPhase,
    pub cover_letter: String,
    pub notice: Option<Notice>,
}

impl DetailState {
    pub fn new(job_id: JobId) -> Self {
        Self {
            job_id,
            load: JobLoad::Loading,
            phase: ApplyPhase::Idle,
            cover_letter: String::new(),
            notice: None,
        }
    }

    pub fn resolve_load(&mut self, result: Result<JobPosting, ApiError>) {
        self.load = match result {
            Ok(job) => JobLoad::Loaded(job),
            Err(e) if e.is_not_found() => JobLoad::NotFound,
            Err(e) => JobLoad::Failed(e.user_message()),
        };
    }

    pub fn job(&self) -> Option<&JobPosting> {
        match &self.load {
            JobLoad::Loaded(job) => Some(job),
            _ => None,
        }
    }

    /// 打开求职信窗口；`signed_in` 为调用时刻的会话状态
    pub fn open_apply(&mut self, signed_in: bool) -> OpenOutcome {
        if !signed_in {
            return OpenOutcome::RequireLogin;
        }
        match self.phase {
            ApplyPhase::Idle => {
                self.phase = ApplyPhase::Composing;
                OpenOutcome::Opened
            }
            ApplyPhase::Composing => OpenOutcome::Opened,
            ApplyPhase::Submitting | ApplyPhase::Applied => OpenOutcome::Ignored,
        }
    }

    /// 关闭窗口，保留已输入的求职信
    pub fn cancel_apply(&mut self) {
        if self.phase == ApplyPhase::Composing {
            self.phase = ApplyPhase::Idle;
        }
    }

    /// 提交申请；空求职信照常提交
    pub fn begin_submit(&mut self, signed_in: bool) -> SubmitOutcome {
        if !signed_in {
            return SubmitOutcome::RequireLogin;
        }
        if self.phase != ApplyPhase::Composing {
            return SubmitOutcome::Blocked;
        }
        self.phase = ApplyPhase::Submitting;
        self.notice = None;
        SubmitOutcome::Send(ApplyRequest {
            job_id: self.job_id,
            cover_letter: self.cover_letter.clone(),
        })
    }

    pub fn resolve_submit(&mut self, result: Result<ApplyResponse, ApiError>) {
        match result {
            Ok(_) => {
                self.phase = ApplyPhase::Applied;
                self.notice = Some(Notice::success(MSG_APPLIED));
            }
            Err(e) => {
                // 关闭窗口以便看到错误，可以再次申请
                self.phase = ApplyPhase::Idle;
                self.notice = Some(Notice::error(apply_error_message(&e)));
            }
        }
    }

    pub fn is_modal_open(&self) -> bool {
        matches!(self.phase, ApplyPhase::Composing | ApplyPhase::Submitting)
    }

    pub fn can_submit(&self) -> bool {
        self.phase == ApplyPhase::Composing
    }

    pub fn has_applied(&self) -> bool {
        self.phase == ApplyPhase::Applied
    }
}

/// 申请失败文案：优先使用后端的 `error`（如重复申请）
pub fn apply_error_message(err: &ApiError) -> String {
    match err.kind() {
        ErrorKind::Validation | ErrorKind::Authorization => err
            .backend_message()
            .unwrap_or_else(|| MSG_APPLY_FAILED.to_string()),
        _ => err.user_message(),
    }
}
