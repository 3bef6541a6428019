//! 会话存储
//!
//! 把身份和令牌以五个扁平字符串持久化到键值存储（浏览器中为 localStorage）。
//! 只有登录流程调用 `set`，只有注销调用 `clear`。

use fresherjobs_shared::protocol::TokenResponse;
use fresherjobs_shared::{Session, Tokens};
use thiserror::Error;

pub const KEY_ACCESS_TOKEN: &str = "access_token";
pub const KEY_REFRESH_TOKEN: &str = "refresh_token";
pub const KEY_USERNAME: &str = "username";
pub const KEY_IS_STUDENT: &str = "is_student";
pub const KEY_IS_RECRUITER: &str = "is_recruiter";

/// 全部持久化键，`username` 放在最后写入
pub const SESSION_KEYS: [&str; 5] = [
    KEY_ACCESS_TOKEN,
    KEY_REFRESH_TOKEN,
    KEY_IS_STUDENT,
    KEY_IS_RECRUITER,
    KEY_USERNAME,
];

/// 键值存储接口
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    /// 写入成功返回 true
    fn set(&self, key: &str, value: &str) -> bool;
    /// 删除成功返回 true（键不存在也算成功）
    fn delete(&self, key: &str) -> bool;
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("failed to persist session key `{key}`")]
    Persist { key: &'static str },
}

/// 会话存储
///
/// `current` 是内存中的身份，与存储内容保持一致；写入失败时保持不变。
#[derive(Debug, Clone)]
pub struct SessionStore<S> {
    storage: S,
    current: Option<Session>,
}

impl<S: KeyValueStore> SessionStore<S> {
    /// 打开存储并同步读取已有身份
    pub fn open(storage: S) -> Self {
        let current = Self::read(&storage);
        Self { storage, current }
    }

    fn read(storage: &S) -> Option<Session> {
        let username = storage.get(KEY_USERNAME).filter(|u| !u.is_empty())?;
        let flag = |key: &str| storage.get(key).as_deref() == Some("true");
        Some(Session::new(
            username,
            flag(KEY_IS_STUDENT),
            flag(KEY_IS_RECRUITER),
        ))
    }

    /// 从存储读取身份（不修改内存状态）
    pub fn peek(&self) -> Option<Session> {
        Self::read(&self.storage)
    }

    /// 重新读取存储并更新内存状态
    pub fn load(&mut self) -> Option<Session> {
        self.current = self.peek();
        self.current.clone()
    }

    pub fn current(&self) -> Option<&Session> {
        self.current.as_ref()
    }

    /// 当前访问令牌；匿名时为 None
    pub fn access_token(&self) -> Option<String> {
        self.current.as_ref()?;
        self.storage
            .get(KEY_ACCESS_TOKEN)
            .filter(|t| !t.is_empty())
    }

    /// 持久化新的身份与令牌
    ///
    /// 全部写入或全部不写：任一键失败时恢复本次调用前的存储内容。
    pub fn set(&mut self, session: &Session, tokens: &Tokens) -> Result<(), SessionError> {
        let snapshot: Vec<(&'static str, Option<String>)> = SESSION_KEYS
            .iter()
            .map(|&key| (key, self.storage.get(key)))
            .collect();

        let values = [
            (KEY_ACCESS_TOKEN, tokens.access.as_str()),
            (KEY_REFRESH_TOKEN, tokens.refresh.as_str()),
            (KEY_IS_STUDENT, bool_str(session.is_student)),
            (KEY_IS_RECRUITER, bool_str(session.is_recruiter)),
            (KEY_USERNAME, session.username.as_str()),
        ];

        for (key, value) in values {
            if !self.storage.set(key, value) {
                log::error!("[Session] write of `{}` failed, rolling back", key);
                self.restore(&snapshot);
                return Err(SessionError::Persist { key });
            }
        }

        log::info!("[Session] signed in as {}", session.username);
        self.current = Some(session.clone());
        Ok(())
    }

    fn restore(&self, snapshot: &[(&'static str, Option<String>)]) {
        for (key, previous) in snapshot {
            let restored = match previous {
                Some(value) => self.storage.set(key, value),
                None => self.storage.delete(key),
            };
            if !restored {
                log::warn!("[Session] could not restore `{}`", key);
            }
        }
    }

    /// 从登录响应写入会话
    pub fn sign_in(&mut self, response: TokenResponse) -> Result<Session, SessionError> {
        let (session, tokens) = response.into_parts();
        self.set(&session, &tokens)?;
        Ok(session)
    }

    /// 清除全部键；可重复调用
    pub fn clear(&mut self) {
        for key in SESSION_KEYS {
            if !self.storage.delete(key) {
                log::warn!("[Session] could not remove `{}`", key);
            }
        }
        if self.current.take().is_some() {
            log::info!("[Session] signed out");
        }
    }
}

fn bool_str(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

// =========================================================
// 测试工具: MemoryStore
// =========================================================
