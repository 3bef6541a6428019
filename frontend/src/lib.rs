//! FresherJobs 前端应用
//!
//! 采用 Context-Driven 架构：
//! - `web::route`: 路由定义与守卫
//! - `web::router`: 路由服务（核心引擎）
//! - `session` / `auth`: 会话持久化与认证状态
//! - `gateway` / `api`: 后端调用
//! - `components`: 页面组件，每个页面的状态机位于其 `state` 子模块

mod api;
mod auth;
pub mod config;
mod error;
mod gateway;
mod lifecycle;
mod session;
mod components {
    pub mod dashboard;
    pub mod job_detail;
    pub mod listing;
    pub mod login;
    pub mod navbar;
    pub mod notice;
    pub mod post_job;
    pub mod profile;
    pub mod register;
}

use crate::api::{AppApi, JobBoardApi};
use crate::auth::AuthContext;
use crate::components::dashboard::DashboardPage;
use crate::components::job_detail::JobDetailPage;
use crate::components::listing::ListingPage;
use crate::components::login::LoginPage;
use crate::components::post_job::PostJobPage;
use crate::components::profile::ProfilePage;
use crate::components::register::RegisterPage;
use crate::config::AppConfig;

use leptos::prelude::*;

// 原生 Web API 封装模块
pub(crate) mod web {
    mod http;
    pub mod route;
    pub mod router;
    mod storage;

    pub use http::FetchClient;
    pub use storage::BrowserStorage;
}

use web::FetchClient;
use web::route::AppRoute;
use web::router::{Link, Router, RouterOutlet};

/// 路由匹配函数
///
/// 根据 AppRoute 枚举返回对应的视图组件。
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Listing => view! { <ListingPage /> }.into_any(),
        AppRoute::JobDetail(id) => view! { <JobDetailPage id=id /> }.into_any(),
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::Register => view! { <RegisterPage /> }.into_any(),
        AppRoute::Dashboard => view! { <DashboardPage /> }.into_any(),
        AppRoute::PostJob => view! { <PostJobPage /> }.into_any(),
        AppRoute::Profile => view! { <ProfilePage /> }.into_any(),
        AppRoute::NotFound => view! {
            <div class="flex items-center justify-center min-h-screen bg-base-200">
                <div class="text-center space-y-4">
                    <h1 class="text-6xl font-bold text-error">"404"</h1>
                    <p class="text-xl">"Page not found."</p>
                    <Link to=AppRoute::Listing class="btn btn-primary">"Back to Jobs"</Link>
                </div>
            </div>
        }
        .into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 配置
    let config = AppConfig::from_env();
    let api: AppApi = JobBoardApi::new(config.api_base_url.clone(), FetchClient);
    log::info!("[App] using API at {}", api.gateway().base_url());
    provide_context(config);
    provide_context(api);

    // 2. 创建认证上下文（同步读取已保存的会话）
    let auth_ctx = AuthContext::new();
    provide_context(auth_ctx);

    // 3. 获取会话信号，用于注入路由服务
    let session = auth_ctx.session_signal();

    view! {
        <Router session=session>
            <RouterOutlet matcher=route_matcher />
        </Router>
    }
}
