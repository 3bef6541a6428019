//! 职位详情页与申请窗口

pub mod state;

use crate::api::use_api;
use crate::auth::use_auth;
use crate::components::navbar::Navbar;
use crate::components::notice::NoticeBanner;
use crate::lifecycle::Liveness;
use crate::web::route::AppRoute;
use crate::web::router::{Link, use_router};
use fresherjobs_shared::{JobId, JobPosting};
use leptos::prelude::*;
use leptos::task::spawn_local;
use state::{DetailState, JobLoad, OpenOutcome, SubmitOutcome};

#[component]
pub fn JobDetailPage(id: JobId) -> impl IntoView {
    let api = StoredValue::new(use_api());
    let auth = use_auth();
    let router = use_router();
    let alive = StoredValue::new(Liveness::for_current_owner());
    let state = RwSignal::new(DetailState::new(id));

    // 挂载时加载职位
    {
        let api = api.get_value();
        let alive = alive.get_value();
        spawn_local(async move {
            let result = api.get_job(id).await;
            if alive.is_alive() {
                state.try_update(|s| s.resolve_load(result));
            }
        });
    }

    let on_open = move |_| {
        let signed_in = auth.refresh().is_some();
        if state.try_update(|s| s.open_apply(signed_in)) == Some(OpenOutcome::RequireLogin) {
            router.navigate(AppRoute::Login);
        }
    };

    let on_cancel = move |_| state.update(|s| s.cancel_apply());

    let on_submit = move |_| {
        let signed_in = auth.refresh().is_some();
        match state.try_update(|s| s.begin_submit(signed_in)) {
            Some(SubmitOutcome::Send(req)) => {
                let api = api.get_value();
                let alive = alive.get_value();
                let token = auth.access_token();
                spawn_local(async move {
                    let result = api.apply(&req, token.as_deref()).await;
                    if alive.is_alive() {
                        state.try_update(|s| s.resolve_submit(result));
                    }
                });
            }
            Some(SubmitOutcome::RequireLogin) => router.navigate(AppRoute::Login),
            Some(SubmitOutcome::Blocked) | None => {}
        }
    };

    let load = Memo::new(move |_| state.with(|s| s.load.clone()));
    let notice = Signal::derive(move || state.with(|s| s.notice.clone()));

    view! {
        <div class="min-h-screen bg-base-200">
            <Navbar />
            <div class="max-w-4xl mx-auto p-4 md:p-8 space-y-6">
                <Link to=AppRoute::Listing class="btn btn-ghost btn-sm">"← Back to Jobs"</Link>

                {move || match load.get() {
                    JobLoad::Loading => view! {
                        <div class="flex justify-center py-16">
                            <span class="loading loading-spinner loading-lg text-primary"></span>
                        </div>
                    }
                    .into_any(),
                    JobLoad::NotFound => view! {
                        <div class="text-center py-16">
                            <h1 class="text-3xl font-bold text-error">"Job not found."</h1>
                        </div>
                    }
                    .into_any(),
                    JobLoad::Failed(message) => view! {
                        <div role="alert" class="alert alert-error">
                            <span>{message}</span>
                        </div>
                    }
                    .into_any(),
                    JobLoad::Loaded(job) => view! {
                        <JobSummary job=job>
                            <div class="flex flex-col md:flex-row items-center gap-4">
                                <button
                                    class=move || {
                                        if state.with(|s| s.has_applied()) {
                                            "btn btn-success btn-outline"
                                        } else {
                                            "btn btn-primary"
                                        }
                                    }
                                    disabled=move || state.with(|s| s.has_applied())
                                    on:click=on_open
                                >
                                    {move || if state.with(|s| s.has_applied()) { "Applied!" } else { "Apply Now" }}
                                </button>
                                <NoticeBanner notice=notice />
                            </div>
                        </JobSummary>
                    }
                    .into_any(),
                }}
            </div>

            <Show when=move || state.with(|s| s.is_modal_open())>
                <div class="modal modal-open">
                    <div class="modal-box">
                        <h3 class="text-lg font-bold">"Write a Cover Letter"</h3>
                        <p class="py-2 text-sm text-base-content/70">
                            "Stand out by telling "
                            <span class="text-primary">
                                {move || state.with(|s| s.job().map(|j| j.recruiter_name.clone()).unwrap_or_default())}
                            </span>
                            " why you are a perfect fit for this role."
                        </p>
                        <textarea
                            class="textarea textarea-bordered w-full"
                            rows="6"
                            placeholder="Dear Hiring Manager, I am very interested in this role because..."
                            prop:value=move || state.with(|s| s.cover_letter.clone())
                            on:input=move |ev| {
                                let text = event_target_value(&ev);
                                state.update(|s| s.cover_letter = text);
                            }
                        ></textarea>
                        <div class="modal-action">
                            <button class="btn btn-ghost" on:click=on_cancel>"Cancel"</button>
                            <button
                                class="btn btn-primary"
                                disabled=move || !state.with(|s| s.can_submit())
                                on:click=on_submit
                            >
                                {move || if state.with(|s| s.can_submit()) {
                                    "Submit Application".into_any()
                                } else {
                                    view! { <span class="loading loading-spinner"></span> }.into_any()
                                }}
                            </button>
                        </div>
                    </div>
                </div>
            </Show>
        </div>
    }
}

/// 职位信息卡片；申请按钮区域由调用方传入
#[component]
fn JobSummary(job: JobPosting, children: Children) -> impl IntoView {
    let posted = job.posted_at.date_label();

    view! {
        <div class="card bg-base-100 shadow-xl">
            <div class="card-body space-y-4">
                <h1 class="text-4xl font-bold">{job.title}</h1>
                <p class="text-xl font-semibold text-primary">{job.recruiter_name}</p>
                <div class="flex flex-wrap gap-2">
                    <span class="badge badge-primary badge-lg">{job.job_type}</span>
                    <span class="badge badge-ghost badge-lg">{job.location}</span>
                    {job
                        .salary_range
                        .map(|salary| view! { <span class="badge badge-ghost badge-lg">{salary}</span> })}
                    <span class="badge badge-ghost badge-lg">"Posted " {posted}</span>
                </div>
                {children()}
            </div>
        </div>
        <div class="card bg-base-100 shadow-xl">
            <div class="card-body">
                <h2 class="card-title">"Job Description"</h2>
                <p class="whitespace-pre-wrap">{job.description}</p>
                <h2 class="card-title mt-6">"Requirements"</h2>
                <p class="whitespace-pre-wrap">{job.requirements}</p>
            </div>
        </div>
    }
}
