//! 路由定义模块 - 领域模型
//!
//! 这是纯粹的业务逻辑层，不依赖于 DOM 或 web_sys。
//! 定义了应用的所有路由、路径映射以及守卫规则。

use fresherjobs_shared::{JobId, Session};
use std::fmt::Display;

/// 应用路由枚举
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// 职位列表 (默认路由)
    #[default]
    Listing,
    /// 职位详情与申请
    JobDetail(JobId),
    Login,
    Register,
    /// 申请面板 (需要认证)
    Dashboard,
    /// 发布职位 (需要认证)
    PostJob,
    /// 个人资料 (需要认证)
    Profile,
    /// 页面未找到
    NotFound,
}

/// 守卫结论
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    RedirectToLogin,
}

impl AppRoute {
    /// 将 URL path 解析为路由枚举
    pub fn from_path(path: &str) -> Self {
        let trimmed = path.trim_end_matches('/');
        match trimmed {
            "" => Self::Listing,
            "/login" => Self::Login,
            "/register" => Self::Register,
            "/dashboard" => Self::Dashboard,
            "/post-job" => Self::PostJob,
            "/profile" => Self::Profile,
            other => match other.strip_prefix("/job/").map(str::parse::<JobId>) {
                Some(Ok(id)) => Self::JobDetail(id),
                _ => Self::NotFound,
            },
        }
    }

    /// 获取路由对应的 URL path
    pub fn to_path(&self) -> String {
        match self {
            Self::Listing => "/".to_string(),
            Self::JobDetail(id) => format!("/job/{}", id),
            Self::Login => "/login".to_string(),
            Self::Register => "/register".to_string(),
            Self::Dashboard => "/dashboard".to_string(),
            Self::PostJob => "/post-job".to_string(),
            Self::Profile => "/profile".to_string(),
            Self::NotFound => "/404".to_string(),
        }
    }

    /// **核心守卫逻辑：定义该路由是否需要认证**
    pub fn requires_auth(&self) -> bool {
        matches!(self, Self::Dashboard | Self::PostJob | Self::Profile)
    }

    /// 获取认证失败时的重定向目标
    pub fn auth_failure_redirect() -> Self {
        Self::Login
    }

    /// 登录成功后的落地页
    pub fn landing() -> Self {
        Self::Listing
    }
}

/// 守卫：受保护页面要求存在会话，角色由后端校验
pub fn guard(route: &AppRoute, session: Option<&Session>) -> GuardDecision {
    if route.requires_auth() && session.is_none() {
        GuardDecision::RedirectToLogin
    } else {
        GuardDecision::Allow
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_parsing() {
        assert_eq!(AppRoute::from_path("/"), AppRoute::Listing);
        assert_eq!(AppRoute::from_path(""), AppRoute::Listing);
        assert_eq!(AppRoute::from_path("/job/42"), AppRoute::JobDetail(42));
        assert_eq!(AppRoute::from_path("/job/42/"), AppRoute::JobDetail(42));
        assert_eq!(AppRoute::from_path("/job/abc"), AppRoute::NotFound);
        assert_eq!(AppRoute::from_path("/job/"), AppRoute::NotFound);
        assert_eq!(AppRoute::from_path("/post-job"), AppRoute::PostJob);
        assert_eq!(AppRoute::from_path("/dashboard/"), AppRoute::Dashboard);
        assert_eq!(AppRoute::from_path("/nope"), AppRoute::NotFound);
    }

    #[test]
    fn test_paths_round_trip() {
        for route in [
            AppRoute::Listing,
            AppRoute::JobDetail(7),
            AppRoute::Login,
            AppRoute::Register,
            AppRoute::Dashboard,
            AppRoute::PostJob,
            AppRoute::Profile,
        ] {
            assert_eq!(AppRoute::from_path(&route.to_path()), route);
        }
    }

    #[test]
    fn test_dashboard_allowed_only_with_session() {
        let session = Session::new("asha", true, false);
        assert_eq!(
            guard(&AppRoute::Dashboard, Some(&session)),
            GuardDecision::Allow
        );
        assert_eq!(
            guard(&AppRoute::Dashboard, None),
            GuardDecision::RedirectToLogin
        );
    }

    #[test]
    fn test_guarded_routes() {
        for route in [AppRoute::PostJob, AppRoute::Profile] {
            assert_eq!(guard(&route, None), GuardDecision::RedirectToLogin);
        }
        for route in [
            AppRoute::Listing,
            AppRoute::JobDetail(1),
            AppRoute::Login,
            AppRoute::Register,
            AppRoute::NotFound,
        ] {
            assert_eq!(guard(&route, None), GuardDecision::Allow);
        }
    }

    #[test]
    fn test_role_does_not_affect_guard() {
        // 角色校验由后端负责
        let student = Session::new("asha", true, false);
        assert_eq!(
            guard(&AppRoute::PostJob, Some(&student)),
            GuardDecision::Allow
        );
    }
}
