//! 页面存活标记
//!
//! 异步响应返回时页面可能已经卸载，回调在写入页面状态前先检查此标记。

use leptos::prelude::on_cleanup;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug, Clone)]
pub struct Liveness(Arc<AtomicBool>);

impl Liveness {
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(true)))
    }

    /// 绑定到当前响应式 owner，owner 清理时标记失效
    pub fn for_current_owner() -> Self {
        let liveness = Self::new();
        let handle = liveness.clone();
        on_cleanup(move || handle.end());
        liveness
    }

    pub fn is_alive(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    pub fn end(&self) {
        self.0.store(false, Ordering::Release);
    }
}

impl Default for Liveness {
    fn default() -> Self {
        Self::new()
    }
}
