use fresherjobs_frontend::App;
use fresherjobs_frontend::config::AppConfig;
use leptos::prelude::*;

// Use lol_alloc as the global allocator for smaller WASM size
#[cfg(target_arch = "wasm32")]
use lol_alloc::{AssumeSingleThreaded, FreeListAllocator};

#[cfg(target_arch = "wasm32")]
#[global_allocator]
static ALLOCATOR: AssumeSingleThreaded<FreeListAllocator> =
    unsafe { AssumeSingleThreaded::new(FreeListAllocator::new()) };

pub fn main() {
    console_error_panic_hook::set_once();
    // 重复初始化时忽略错误
    let _ = console_log::init_with_level(AppConfig::from_env().log_level);
    mount_to_body(App);
}
