//! 注册表单状态
//!
//! 角色切换决定收集哪个身份字段。

use crate::error::{ApiError, ErrorKind};
use fresherjobs_shared::protocol::{RegisterRequest, SignupRole};

pub const MSG_REGISTER_FAILED: &str = "Registration failed. Please try again.";

#[derive(Debug, Clone, Default)]
pub struct RegisterForm {
    pub role: SignupRole,
    pub username: String,
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub company_name: String,
    pub submitting: bool,
    pub error: Option<String>,
}

impl RegisterForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// 当前角色对应的身份字段
    pub fn display_name(&self) -> &str {
        match self.role {
            SignupRole::Student => &self.full_name,
            SignupRole::Recruiter => &self.company_name,
        }
    }

    /// 开始提交；正在提交时返回 None
    pub fn begin_submit(&mut self) -> Option<RegisterRequest> {
        if self.submitting {
            return None;
        }
        self.submitting = true;
        self.error = None;
        Some(RegisterRequest::new(
            self.role,
            self.username.trim(),
            self.email.trim(),
            self.password.clone(),
            self.display_name().trim(),
        ))
    }

    /// 显示后端的第一条校验消息
    pub fn fail(&mut self, err: &ApiError) {
        self.submitting = false;
        self.error = Some(match err.kind() {
            ErrorKind::Validation | ErrorKind::Authorization => err
                .backend_message()
                .unwrap_or_else(|| MSG_REGISTER_FAILED.to_string()),
            ErrorKind::Network => err.user_message(),
            _ => MSG_REGISTER_FAILED.to_string(),
        });
    }

    pub fn succeed(&mut self) {
        self.submitting = false;
        self.password.clear();
    }
}
