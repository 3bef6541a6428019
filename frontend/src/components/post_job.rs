//! 发布职位页（仅招聘方）

pub mod state;

use crate::api::use_api;
use crate::auth::use_auth;
use crate::components::navbar::Navbar;
use crate::lifecycle::Liveness;
use crate::web::route::AppRoute;
use crate::web::router::use_router;
use fresherjobs_shared::{JobType, NewJob, Role};
use leptos::prelude::*;
use leptos::task::spawn_local;
use state::JobForm;

/// 文本字段的读写绑定
fn text_field(
    form: RwSignal<JobForm>,
    read: fn(&NewJob) -> &String,
    write: fn(&mut NewJob) -> &mut String,
) -> (
    impl Fn() -> String + Copy + Send + Sync + 'static,
    impl Fn(leptos::ev::Event) + Copy + Send + Sync + 'static,
) {
    (
        move || form.with(|f| read(&f.job).clone()),
        move |ev: leptos::ev::Event| {
            let value = event_target_value(&ev);
            form.update(|f| *write(&mut f.job) = value);
        },
    )
}

#[component]
pub fn PostJobPage() -> impl IntoView {
    let api = StoredValue::new(use_api());
    let auth = use_auth();
    let router = use_router();
    let alive = StoredValue::new(Liveness::for_current_owner());
    let role = auth
        .session_untracked()
        .map(|s| s.role())
        .unwrap_or(Role::Unknown);
    let form = RwSignal::new(JobForm::new(role));

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let Some(job) = form.try_update(|f| f.begin_submit()).flatten() else {
            return;
        };

        let api = api.get_value();
        let alive = alive.get_value();
        let token = auth.access_token();
        spawn_local(async move {
            let result = api.create_job(&job, token.as_deref()).await;
            if !alive.is_alive() {
                return;
            }
            if form.try_update(|f| f.resolve(result)) == Some(true) {
                router.navigate(AppRoute::Listing);
            }
        });
    };

    let is_submitting = move || form.with(|f| f.submitting);

    let (title, on_title) = text_field(form, |j| &j.title, |j| &mut j.title);
    let (location, on_location) = text_field(form, |j| &j.location, |j| &mut j.location);
    let (salary, on_salary) = text_field(form, |j| &j.salary_range, |j| &mut j.salary_range);
    let (description, on_description) =
        text_field(form, |j| &j.description, |j| &mut j.description);
    let (requirements, on_requirements) =
        text_field(form, |j| &j.requirements, |j| &mut j.requirements);

    view! {
        <div class="min-h-screen bg-base-200">
            <Navbar />
            <div class="max-w-3xl mx-auto p-4 md:p-8">
                <div class="card bg-base-100 shadow-xl">
                    <form class="card-body space-y-2" on:submit=on_submit>
                        <h1 class="text-3xl font-bold">"Post a New Job"</h1>
                        <p class="text-base-content/70">"Find the best fresh talent for your team."</p>

                        <Show when=move || form.with(|f| f.error.is_some())>
                            <div role="alert" class="alert alert-error text-sm py-2">
                                <span>{move || form.with(|f| f.error.clone().unwrap_or_default())}</span>
                            </div>
                        </Show>

                        <div class="form-control">
                            <label class="label"><span class="label-text">"Job Title"</span></label>
                            <input
                                type="text"
                                class="input input-bordered"
                                placeholder="e.g. Frontend React Developer"
                                prop:value=title
                                on:input=on_title
                                required
                            />
                        </div>

                        <div class="grid md:grid-cols-2 gap-4">
                            <div class="form-control">
                                <label class="label"><span class="label-text">"Job Type"</span></label>
                                <select
                                    class="select select-bordered"
                                    prop:value=move || form.with(|f| f.job.job_type.as_str())
                                    on:change=move |ev| {
                                        let value = event_target_value(&ev);
                                        form.update(|f| f.set_job_type(&value));
                                    }
                                >
                                    {JobType::ALL
                                        .into_iter()
                                        .map(|t| view! { <option value=t.as_str()>{t.as_str()}</option> })
                                        .collect_view()}
                                </select>
                            </div>
                            <div class="form-control">
                                <label class="label"><span class="label-text">"Location"</span></label>
                                <input
                                    type="text"
                                    class="input input-bordered"
                                    placeholder="e.g. Remote, Bangalore, etc."
                                    prop:value=location
                                    on:input=on_location
                                    required
                                />
                            </div>
                        </div>

                        <div class="form-control">
                            <label class="label">
                                <span class="label-text">"Salary Range"</span>
                                <span class="label-text-alt">"Optional"</span>
                            </label>
                            <input
                                type="text"
                                class="input input-bordered"
                                placeholder="e.g. ₹5,00,000 - ₹8,00,000"
                                prop:value=salary
                                on:input=on_salary
                            />
                        </div>

                        <div class="form-control">
                            <label class="label"><span class="label-text">"Job Description"</span></label>
                            <textarea
                                class="textarea textarea-bordered h-32"
                                placeholder="Describe the role and responsibilities..."
                                prop:value=description
                                on:input=on_description
                                required
                            ></textarea>
                        </div>

                        <div class="form-control">
                            <label class="label"><span class="label-text">"Requirements"</span></label>
                            <textarea
                                class="textarea textarea-bordered h-32"
                                placeholder="List the skills, education, and experience required..."
                                prop:value=requirements
                                on:input=on_requirements
                                required
                            ></textarea>
                        </div>

                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=is_submitting>
                                {move || if is_submitting() {
                                    view! { <span class="loading loading-spinner"></span> "Posting..." }.into_any()
                                } else {
                                    "Post Job".into_any()
                                }}
                            </button>
                        </div>
                    </form>
                </div>
            </div>
        </div>
    }
}
