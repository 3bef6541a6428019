//! LocalStorage 封装模块
//!
//! 直接使用 `web_sys::Storage`，作为会话存储的浏览器后端。

use crate::session::KeyValueStore;

/// 浏览器 LocalStorage
///
/// 无状态，每次操作时重新获取 `window.localStorage`。
/// 隐私模式或存储被禁用时，读取返回 None，写入返回 false。
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

impl BrowserStorage {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }
}

impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok()?
    }

    fn set(&self, key: &str, value: &str) -> bool {
        Self::storage()
            .and_then(|s| s.set_item(key, value).ok())
            .is_some()
    }

    fn delete(&self, key: &str) -> bool {
        Self::storage()
            .and_then(|s| s.remove_item(key).ok())
            .is_some()
    }
}
