//! 职位列表页
//!
//! 搜索、翻页和结果卡片。请求结果通过票号判定是否过期。

pub mod state;

use crate::api::{AppApi, use_api};
use crate::components::navbar::Navbar;
use crate::config::use_config;
use crate::lifecycle::Liveness;
use crate::web::route::AppRoute;
use crate::web::router::Link;
use fresherjobs_shared::JobPosting;
use leptos::prelude::*;
use leptos::task::spawn_local;
use state::{ListingFetch, ListingState, ListingView, Ticketed};

/// 发出请求并在票号仍为最新时应用结果
fn run_fetch(
    api: AppApi,
    alive: Liveness,
    state: RwSignal<ListingState>,
    req: Ticketed,
) {
    spawn_local(async move {
        let result = match &req.fetch {
            ListingFetch::Search(query) => api.list_jobs(query.as_deref()).await,
            ListingFetch::Cursor(cursor) => api.job_page(cursor).await,
        };
        if !alive.is_alive() {
            return;
        }
        state.try_update(|s| s.resolve(req.ticket, result));
    });
}

#[component]
pub fn ListingPage() -> impl IntoView {
    let api = StoredValue::new(use_api());
    let config = use_config();
    let alive = StoredValue::new(Liveness::for_current_owner());
    let state = RwSignal::new(ListingState::new());

    let dispatch = move |req: Option<Ticketed>| {
        if let Some(req) = req {
            run_fetch(api.get_value(), alive.get_value(), state, req);
        }
    };

    // 初始加载（未过滤）
    dispatch(state.try_update(|s| s.begin_search()));

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        dispatch(state.try_update(|s| s.begin_search()));
    };

    let debounce = config.search_debounce;
    let on_input = move |ev: leptos::ev::Event| {
        let query = event_target_value(&ev);
        let Some(keystroke) = state.try_update(|s| s.note_keystroke(query)) else {
            return;
        };
        let alive = alive.get_value();
        set_timeout(
            move || {
                if !alive.is_alive() {
                    return;
                }
                let due = state
                    .try_with_untracked(|s| s.debounce_due(keystroke))
                    .unwrap_or(false);
                if due {
                    dispatch(state.try_update(|s| s.begin_search()));
                }
            },
            debounce,
        );
    };

    let on_clear = move |_| dispatch(state.try_update(|s| s.begin_clear()));
    let on_next = move |_| dispatch(state.try_update(|s| s.begin_next()).flatten());
    let on_previous = move |_| dispatch(state.try_update(|s| s.begin_previous()).flatten());

    let view_kind = Memo::new(move |_| state.with(|s| s.view()));

    view! {
        <div class="min-h-screen bg-base-200">
            <Navbar />
            <div class="max-w-5xl mx-auto p-4 md:p-8 space-y-8">
                <div class="text-center space-y-4">
                    <h1 class="text-4xl md:text-5xl font-bold">"Find your first job."</h1>
                    <form class="join w-full max-w-2xl" on:submit=on_submit>
                        <input
                            type="text"
                            class="input input-bordered join-item w-full"
                            placeholder="Search for 'React Developer' or 'Python Intern'..."
                            prop:value=move || state.with(|s| s.query.clone())
                            on:input=on_input
                        />
                        <button type="submit" class="btn btn-primary join-item">"Search"</button>
                    </form>
                </div>

                <div class="flex items-center justify-between">
                    <h2 class="text-2xl font-bold">{move || state.with(|s| s.heading())}</h2>
                    <Show when=move || state.with(|s| s.committed.is_some())>
                        <button class="btn btn-ghost btn-sm" on:click=on_clear>"Clear search"</button>
                    </Show>
                </div>

                {move || match view_kind.get() {
                    ListingView::Loading => view! {
                        <div class="flex justify-center py-16">
                            <span class="loading loading-spinner loading-lg text-primary"></span>
                        </div>
                    }
                    .into_any(),
                    ListingView::Error => view! {
                        <div role="alert" class="alert alert-error">
                            <span>{move || state.with(|s| s.error.clone().unwrap_or_default())}</span>
                        </div>
                    }
                    .into_any(),
                    ListingView::Empty => view! {
                        <div class="text-center py-16 text-base-content/60">
                            "No jobs found matching your search."
                        </div>
                    }
                    .into_any(),
                    ListingView::Results => view! {
                        <div class="grid gap-4 md:grid-cols-2">
                            <For
                                each=move || state.with(|s| s.jobs.clone())
                                key=|job| job.id
                                children=move |job| view! { <JobCard job=job /> }
                            />
                        </div>
                    }
                    .into_any(),
                }}

                <Show when=move || state.with(|s| s.show_pager())>
                    <div class="join flex justify-center">
                        <button
                            class="join-item btn"
                            disabled=move || !state.with(|s| s.can_go_previous())
                            on:click=on_previous
                        >
                            "Previous"
                        </button>
                        <button
                            class="join-item btn"
                            disabled=move || !state.with(|s| s.can_go_next())
                            on:click=on_next
                        >
                            "Next"
                        </button>
                    </div>
                </Show>
            </div>
        </div>
    }
}

/// 职位卡片
#[component]
fn JobCard(job: JobPosting) -> impl IntoView {
    let posted = job.posted_at.date_label();

    view! {
        <div class="card bg-base-100 shadow-xl">
            <div class="card-body">
                <h3 class="card-title">{job.title}</h3>
                <p class="font-semibold text-primary">{job.recruiter_name}</p>
                <div class="flex flex-wrap gap-2 text-sm">
                    <span class="badge badge-primary badge-outline">{job.job_type}</span>
                    <span class="badge badge-ghost">{job.location}</span>
                    {job
                        .salary_range
                        .map(|salary| view! { <span class="badge badge-ghost">{salary}</span> })}
                </div>
                <div class="card-actions justify-between items-center mt-2">
                    <span class="text-xs text-base-content/60">"Posted " {posted}</span>
                    <Link to=AppRoute::JobDetail(job.id) class="btn btn-sm btn-primary">
                        "View details"
                    </Link>
                </div>
            </div>
        </div>
    }
}
