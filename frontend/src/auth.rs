//! 认证模块
//!
//! 管理用户认证状态，与路由系统解耦。
//! 路由服务通过注入的认证信号来检查认证状态。

use crate::api::JobBoardApi;
use crate::error::{ApiError, ErrorKind, MSG_NETWORK, MSG_SERVER};
use crate::gateway::HttpClient;
use crate::session::{SessionError, SessionStore};
use crate::web::BrowserStorage;
use fresherjobs_shared::Session;
use leptos::prelude::*;
use thiserror::Error;

pub const MSG_INVALID_CREDENTIALS: &str = "Invalid username or password. Please try again.";
pub const MSG_SESSION_NOT_SAVED: &str =
    "Signed in, but the session could not be saved in this browser. Please check storage settings.";

/// 认证上下文
///
/// 会话存储放在信号中，通过 Context 在组件间共享。
#[derive(Clone, Copy)]
pub struct AuthContext {
    store: RwSignal<SessionStore<BrowserStorage>>,
}

impl AuthContext {
    /// 创建认证上下文，同步读取已持久化的身份（首次渲染之前）
    pub fn new() -> Self {
        let store = SessionStore::open(BrowserStorage);
        match store.current() {
            Some(session) => log::info!("[Auth] restored session for {}", session.username),
            None => log::debug!("[Auth] no stored session"),
        }
        Self {
            store: RwSignal::new(store),
        }
    }

    /// 当前身份（响应式）
    pub fn session(&self) -> Option<Session> {
        self.store.with(|s| s.current().cloned())
    }

    pub fn session_untracked(&self) -> Option<Session> {
        self.store.with_untracked(|s| s.current().cloned())
    }

    /// 获取会话信号（用于路由服务注入）
    pub fn session_signal(&self) -> Signal<Option<Session>> {
        let store = self.store;
        Signal::derive(move || store.with(|s| s.current().cloned()))
    }

    /// 调用时刻的访问令牌
    pub fn access_token(&self) -> Option<String> {
        self.store.with_untracked(|s| s.access_token())
    }

    /// 重新读取存储，返回调用时刻的身份
    ///
    /// 存储内容与内存一致时不触发更新。
    pub fn refresh(&self) -> Option<Session> {
        let stored = self.store.with_untracked(|s| s.peek());
        let changed = self
            .store
            .with_untracked(|s| s.current() != stored.as_ref());
        if changed {
            log::info!("[Auth] stored session changed outside this page");
            self.store.update(|s| {
                s.load();
            });
        }
        stored
    }

    fn sign_in(
        &self,
        response: fresherjobs_shared::protocol::TokenResponse,
    ) -> Result<Session, SessionError> {
        self.store
            .try_update(|s| s.sign_in(response))
            .unwrap_or(Err(SessionError::Persist {
                key: crate::session::KEY_USERNAME,
            }))
    }

    fn clear(&self) {
        self.store.update(|s| s.clear());
    }
}

impl Default for AuthContext {
    fn default() -> Self {
        Self::new()
    }
}

/// 从 Context 获取认证上下文
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}

// =========================================================
// 登录 / 注销
// =========================================================

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LoginError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Session(#[from] SessionError),
}

impl LoginError {
    /// 客户端错误统一提示，不区分用户名错误还是密码错误
    pub fn user_message(&self) -> String {
        match self {
            LoginError::Api(e) => match e.kind() {
                ErrorKind::Network => MSG_NETWORK.to_string(),
                ErrorKind::Server => MSG_SERVER.to_string(),
                ErrorKind::Decode => e.user_message(),
                _ => MSG_INVALID_CREDENTIALS.to_string(),
            },
            LoginError::Session(_) => MSG_SESSION_NOT_SAVED.to_string(),
        }
    }
}

/// 登录并持久化会话
///
/// 持久化失败时用户保持匿名。
pub async fn login<C: HttpClient>(
    ctx: &AuthContext,
    api: &JobBoardApi<C>,
    username: &str,
    password: &str,
) -> Result<Session, LoginError> {
    let response = api.login(username, password).await?;
    let session = ctx.sign_in(response)?;
    Ok(session)
}

/// 注销并清除状态
///
/// 导航将由路由服务的认证状态监听自动处理。
pub fn logout(ctx: &AuthContext) {
    ctx.clear();
}
