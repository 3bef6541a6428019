pub mod state;

use crate::api::use_api;
use crate::auth::use_auth;
use crate::components::navbar::Navbar;
use crate::components::notice::NoticeBanner;
use crate::config::use_config;
use crate::lifecycle::Liveness;
use crate::web::route::AppRoute;
use crate::web::router::{Link, use_router};
use fresherjobs_shared::{Application, ApplicationId, ApplicationStatus, Role};
use leptos::prelude::*;
use leptos::task::spawn_local;
use state::{ANONYMOUS_APPLICANT, BoardLoad, DashboardState};

#[component]
pub fn DashboardPage() -> impl IntoView {
    let api = StoredValue::new(use_api());
    let auth = use_auth();
    let router = use_router();
    let config = use_config();
    let alive = StoredValue::new(Liveness::for_current_owner());

    let role = auth
        .session_untracked()
        .map(|s| s.role())
        .unwrap_or(Role::Unknown);
    let state = RwSignal::new(DashboardState::new(role));
    let copy = state.with_untracked(|s| s.copy());

    // 初始加载
    {
        let api = api.get_value();
        let alive = alive.get_value();
        let token = auth.access_token();
        spawn_local(async move {
            let result = api.list_applications(token.as_deref()).await;
            if alive.is_alive() {
                state.try_update(|s| s.resolve_load(result));
            }
        });
    }

    let notice_timeout = config.notice_timeout;
    let on_status = move |id: ApplicationId, status: ApplicationStatus| {
        if state.try_update(|s| s.begin_update(id)) != Some(true) {
            return;
        }
        let api = api.get_value();
        let alive = alive.get_value();
        let token = auth.access_token();
        spawn_local(async move {
            let result = api.update_status(id, status, token.as_deref()).await;
            if !alive.is_alive() {
                return;
            }
            let Some(ticket) = state.try_update(|s| s.resolve_update(id, result)).flatten() else {
                return;
            };
            // 3秒后清除通知（期间有新通知则保留新的）
            set_timeout(
                move || {
                    if alive.is_alive() {
                        state.try_update(|s| s.expire_notice(ticket));
                    }
                },
                notice_timeout,
            );
        });
    };

    let empty_target = if role.is_recruiter() {
        AppRoute::PostJob
    } else {
        AppRoute::Listing
    };
    let notice = Signal::derive(move || state.with(|s| s.notice.clone()));
    let load = Memo::new(move |_| state.with(|s| s.load.clone()));
    let is_empty = Memo::new(move |_| state.with(|s| s.board.is_empty()));

    view! {
        <div class="min-h-screen bg-base-200">
            <Navbar />
            <div class="max-w-6xl mx-auto p-4 md:p-8 space-y-8">
                <div class="flex flex-col md:flex-row md:items-end md:justify-between gap-4">
                    <div>
                        <h1 class="text-4xl font-bold">{copy.title}</h1>
                        <p class="text-base-content/70 mt-2">{copy.subtitle}</p>
                    </div>
                    <button class="btn btn-ghost" on:click=move |_| router.navigate(AppRoute::Listing)>
                        "Back to Home"
                    </button>
                </div>

                <div class="toast toast-top toast-end z-50">
                    <NoticeBanner notice=notice />
                </div>

                <div class="card bg-base-100 shadow-xl">
                    <div class="card-body">
                        <div class="flex items-center justify-between">
                            <h2 class="card-title">{copy.section}</h2>
                            <span class="badge badge-neutral">
                                {move || state.with(|s| s.board.len())}
                            </span>
                        </div>

                        {move || match load.get() {
                            BoardLoad::Loading => view! {
                                <div class="flex justify-center py-10">
                                    <span class="loading loading-spinner loading-lg text-primary"></span>
                                </div>
                            }
                            .into_any(),
                            BoardLoad::Failed(message) => view! {
                                <div role="alert" class="alert alert-error">
                                    <span>{message}</span>
                                </div>
                            }
                            .into_any(),
                            BoardLoad::Loaded if is_empty.get() => view! {
                                <div class="text-center py-10 space-y-4">
                                    <p class="text-base-content/60">{copy.empty}</p>
                                    <Link to=empty_target.clone() class="btn btn-primary">
                                        {copy.empty_action}
                                    </Link>
                                </div>
                            }
                            .into_any(),
                            BoardLoad::Loaded => view! {
                                <div class="space-y-4">
                                    <For
                                        each=move || state.with(|s| s.board.rows().to_vec())
                                        key=|app| (app.id, app.status)
                                        children=move |app| {
                                            view! {
                                                <ApplicationRow
                                                    app=app
                                                    role=role
                                                    state=state
                                                    on_status=on_status
                                                />
                                            }
                                        }
                                    />
                                </div>
                            }
                            .into_any(),
                        }}
                    </div>
                </div>
            </div>
        </div>
    }
}

fn status_badge(status: ApplicationStatus) -> &'static str {
    match status {
        ApplicationStatus::Applied => "badge badge-info",
        ApplicationStatus::Shortlisted => "badge badge-warning",
        ApplicationStatus::Hired => "badge badge-success",
        ApplicationStatus::Rejected => "badge badge-error",
    }
}

/// 单条申请；招聘方额外显示申请人、求职信和状态按钮
#[component]
fn ApplicationRow<F>(
    app: Application,
    role: Role,
    state: RwSignal<DashboardState>,
    on_status: F,
) -> impl IntoView
where
    F: Fn(ApplicationId, ApplicationStatus) + Copy + Send + Sync + 'static,
{
    let id = app.id;
    let status = app.status;
    let applied = app.applied_at.date_label();
    let pending = move || state.with(|s| s.is_pending(id));

    let party = if role.is_recruiter() {
        let name = app
            .applicant_name
            .clone()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| ANONYMOUS_APPLICANT.to_string());
        let email = app.applicant_email.clone().unwrap_or_default();
        view! {
            <p class="font-semibold">{name}</p>
            <p class="text-sm text-base-content/60">{email}</p>
        }
        .into_any()
    } else {
        view! {
            <p class="font-semibold text-primary">{app.company_name.clone().unwrap_or_default()}</p>
        }
        .into_any()
    };

    let cover_letter = app.cover_letter.clone().filter(|_| role.is_recruiter());
    let job_link = app.job.map(AppRoute::JobDetail);

    view! {
        <div class="border border-base-300 rounded-box p-4 space-y-3">
            <div class="flex flex-col md:flex-row md:items-start md:justify-between gap-2">
                <div>
                    {match job_link {
                        Some(route) => view! {
                            <Link to=route class="text-lg font-bold link link-hover">
                                {app.job_title.clone()}
                            </Link>
                        }
                        .into_any(),
                        None => view! { <h3 class="text-lg font-bold">{app.job_title.clone()}</h3> }
                            .into_any(),
                    }}
                    {party}
                </div>
                <div class="flex flex-col items-end gap-1">
                    <span class=status_badge(status)>{status.as_str()}</span>
                    <span class="text-xs text-base-content/60">"Applied " {applied}</span>
                </div>
            </div>

            {cover_letter.map(|letter| view! {
                <div class="bg-base-200 rounded-box p-3">
                    <p class="text-xs font-semibold uppercase text-base-content/60">"Cover Letter"</p>
                    <p class="whitespace-pre-wrap text-sm">{letter}</p>
                </div>
            })}

            {role.is_recruiter().then(|| view! {
                <div class="join">
                    {ApplicationStatus::RECRUITER_TARGETS
                        .into_iter()
                        .map(|target| {
                            view! {
                                <button
                                    class="btn btn-sm join-item"
                                    disabled=move || pending() || status == target
                                    on:click=move |_| on_status(id, target)
                                >
                                    {target.action_label()}
                                </button>
                            }
                        })
                        .collect_view()}
                </div>
            })}
        </div>
    }
}
