//! 路由服务模块 - 核心引擎
//!
//! 封装了 web_sys 的 History API，实现高内聚：
//! 所有对 window.history 的操作都集中在此模块。
//! 实现了"监听 -> 守卫 -> 处理 -> 加载"的导航流程，守卫在页面挂载之前同步执行。

use leptos::prelude::*;
use wasm_bindgen::prelude::*;

use super::route::{AppRoute, GuardDecision, guard};
use fresherjobs_shared::Session;

/// 获取当前浏览器路径
fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

/// 推送 History 状态（内部工具函数）
fn push_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.push_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 替换 History 状态（内部工具函数，用于重定向）
fn replace_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 对目标路由执行守卫，返回最终应展示的路由
fn resolve(target: AppRoute, session: Option<&Session>) -> AppRoute {
    match guard(&target, session) {
        GuardDecision::Allow => target,
        GuardDecision::RedirectToLogin => {
            log::info!("[Router] Access to {} denied. Redirecting to login.", target);
            AppRoute::auth_failure_redirect()
        }
    }
}

/// 路由器服务
///
/// 封装所有路由操作，通过 Signal 驱动界面更新。
/// 通过注入会话信号实现与认证系统的解耦。
#[derive(Clone, Copy)]
pub struct RouterService {
    /// 当前路由（只读信号）
    current_route: ReadSignal<AppRoute>,
    /// 设置当前路由（写入信号）
    set_route: WriteSignal<AppRoute>,
    /// 当前会话（注入的信号，实现解耦）
    session: Signal<Option<Session>>,
}

impl RouterService {
    /// 创建新的路由服务
    ///
    /// 启动时即对当前 URL 执行守卫，受保护页面不会先挂载再跳转。
    fn new(session: Signal<Option<Session>>) -> Self {
        let requested = AppRoute::from_path(&current_path());
        let initial_route =
            session.with_untracked(|s| resolve(requested.clone(), s.as_ref()));
        if initial_route != requested {
            replace_history_state(&initial_route.to_path());
        }
        let (current_route, set_route) = signal(initial_route);

        Self {
            current_route,
            set_route,
            session,
        }
    }

    /// 获取当前路由信号
    pub fn current_route(&self) -> ReadSignal<AppRoute> {
        self.current_route
    }

    /// **核心方法：导航与守卫**
    ///
    /// 守卫拒绝时直接展示登录页，历史记录中写入的也是登录页路径。
    pub fn navigate(&self, target: AppRoute) {
        let route = self.session.with_untracked(|s| resolve(target, s.as_ref()));
        let path = route.to_path();
        push_history_state(&path);
        log::debug!("[Router] -> {}", path);
        self.set_route.set(route);
    }

    /// 初始化浏览器后退/前进按钮监听
    fn init_popstate_listener(&self) {
        let set_route = self.set_route;
        let session = self.session;

        let closure = Closure::<dyn Fn()>::new(move || {
            let target_route = AppRoute::from_path(&current_path());

            // popstate 时也执行守卫逻辑
            let route = session.with_untracked(|s| resolve(target_route.clone(), s.as_ref()));
            if route != target_route {
                replace_history_state(&route.to_path());
            }
            set_route.set(route);
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // 泄漏闭包以保持监听器存活
        closure.forget();
    }

    /// 设置认证状态变化时的自动重定向
    fn setup_auth_redirect(&self) {
        let current_route = self.current_route;
        let set_route = self.set_route;
        let session = self.session;

        // 使用 Effect 监听认证状态变化
        Effect::new(move |_| {
            let route = current_route.get_untracked();
            let decision = session.with(|s| guard(&route, s.as_ref()));

            // 用户登出，如果在受保护页面则重定向到登录
            if decision == GuardDecision::RedirectToLogin {
                let redirect = AppRoute::auth_failure_redirect();
                push_history_state(&redirect.to_path());
                set_route.set(redirect);
                log::info!("[Router] Auth state changed: logged out, redirecting to login.");
            }
        });
    }
}

/// 提供路由服务到 Context 并初始化
fn provide_router(session: Signal<Option<Session>>) -> RouterService {
    let router = RouterService::new(session);

    // 初始化监听器
    router.init_popstate_listener();
    router.setup_auth_redirect();

    provide_context(router);
    router
}

/// 从 Context 获取路由服务
pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

// ============================================================================
// UI 组件
// ============================================================================

/// 路由器根组件
///
/// 提供路由上下文，应在 App 根部使用。
#[component]
pub fn Router(
    /// 会话信号
    session: Signal<Option<Session>>,
    /// 子组件
    children: Children,
) -> impl IntoView {
    // 提供路由服务到 Context
    provide_router(session);

    children()
}

/// 路由出口组件
///
/// 根据当前路由状态渲染对应的组件。
#[component]
pub fn RouterOutlet(
    /// 路由匹配函数：接收当前路由，返回对应视图
    matcher: fn(AppRoute) -> AnyView,
) -> impl IntoView {
    let router = use_router();

    move || {
        let current = router.current_route().get();
        matcher(current)
    }
}

/// 站内链接
///
/// 拦截点击交给路由服务处理，保留 href 以便新标签页打开。
#[component]
pub fn Link(
    /// 目标路由
    to: AppRoute,
    #[prop(into, optional)] class: String,
    /// 子内容
    children: Children,
) -> impl IntoView {
    let router = use_router();
    let href = to.to_path();

    let on_click = move |ev: leptos::ev::MouseEvent| {
        if ev.ctrl_key() || ev.meta_key() || ev.shift_key() || ev.button() != 0 {
            return;
        }
        ev.prevent_default();
        router.navigate(to.clone());
    };

    view! {
        <a href=href class=class on:click=on_click>
            {children()}
        </a>
    }
}
