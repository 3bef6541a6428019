use crate::auth::{logout, use_auth};
use crate::web::route::AppRoute;
use crate::web::router::{Link, use_router};
use leptos::prelude::*;

/// 顶部导航栏
///
/// 匿名时显示登录/注册；登录后显示问候、面板入口和注销，
/// 招聘方额外显示发布职位入口。
#[component]
pub fn Navbar() -> impl IntoView {
    let auth = use_auth();
    let router = use_router();

    let session = Memo::new(move |_| auth.session());

    let on_logout = move |_| {
        logout(&auth);
        // 路由服务只在受保护页面上重定向，这里统一回到列表
        router.navigate(AppRoute::Listing);
    };

    view! {
        <div class="navbar bg-base-100 shadow-md px-4">
            <div class="flex-1">
                <Link to=AppRoute::Listing class="btn btn-ghost text-xl font-bold">
                    "Fresher" <span class="text-primary">"Jobs"</span>
                </Link>
            </div>
            <div class="flex-none gap-2">
                {move || match session.get() {
                    None => view! {
                        <Link to=AppRoute::Login class="btn btn-ghost">"Log in"</Link>
                        <Link to=AppRoute::Register class="btn btn-primary">"Sign up"</Link>
                    }
                    .into_any(),
                    Some(session) => {
                        let is_recruiter = session.role().is_recruiter();
                        view! {
                            <span class="hidden md:inline text-sm text-base-content/70 mr-2">
                                "Hi, " <span class="font-semibold">{session.username}</span>
                            </span>
                            {is_recruiter.then(|| view! {
                                <Link to=AppRoute::PostJob class="btn btn-primary btn-sm">"Post a job"</Link>
                            })}
                            <Link to=AppRoute::Dashboard class="btn btn-ghost btn-sm">"Dashboard"</Link>
                            <Link to=AppRoute::Profile class="btn btn-ghost btn-sm">"Profile"</Link>
                            <button class="btn btn-outline btn-error btn-sm" on:click=on_logout>
                                "Log out"
                            </button>
                        }
                        .into_any()
                    }
                }}
            </div>
        </div>
    }
}
