//! 登录表单状态

use crate::auth::LoginError;

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    pub submitting: bool,
    pub error: Option<String>,
}

impl LoginForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// 开始提交；正在提交时返回 None
    pub fn begin_submit(&mut self) -> Option<(String, String)> {
        if self.submitting {
            return None;
        }
        self.submitting = true;
        self.error = None;
        Some((self.username.trim().to_string(), self.password.clone()))
    }

    pub fn fail(&mut self, err: &LoginError) {
        self.submitting = false;
        self.error = Some(err.user_message());
    }

    pub fn succeed(&mut self) {
        self.submitting = false;
        self.password.clear();
    }
}
