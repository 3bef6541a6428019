//! 注册页

pub mod state;

use crate::api::use_api;
use crate::lifecycle::Liveness;
use crate::web::route::AppRoute;
use crate::web::router::{Link, use_router};
use fresherjobs_shared::protocol::SignupRole;
use leptos::prelude::*;
use leptos::task::spawn_local;
use state::RegisterForm;

#[component]
pub fn RegisterPage() -> impl IntoView {
    let api = StoredValue::new(use_api());
    let router = use_router();
    let alive = StoredValue::new(Liveness::for_current_owner());
    let form = RwSignal::new(RegisterForm::new());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let Some(req) = form.try_update(|f| f.begin_submit()).flatten() else {
            return;
        };

        let api = api.get_value();
        let alive = alive.get_value();
        spawn_local(async move {
            let result = api.register(&req).await;
            if !alive.is_alive() {
                return;
            }
            match result {
                Ok(user) => {
                    log::info!("[Register] created account {}", user.username);
                    form.try_update(|f| f.succeed());
                    router.navigate(AppRoute::Login);
                }
                Err(e) => {
                    log::warn!("[Register] registration failed: {}", e);
                    form.try_update(|f| f.fail(&e));
                }
            }
        });
    };

    let is_submitting = move || form.with(|f| f.submitting);
    let is_recruiter = move || form.with(|f| f.role == SignupRole::Recruiter);

    let role_tab = move |role: SignupRole, label: &'static str| {
        view! {
            <button
                type="button"
                class=move || {
                    if form.with(|f| f.role == role) { "tab tab-active" } else { "tab" }
                }
                on:click=move |_| form.update(|f| f.role = role)
            >
                {label}
            </button>
        }
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <h1 class="text-3xl font-bold">"Join the Platform."</h1>
                    <p class="text-base-content/70">"Create an account to get started."</p>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <div role="tablist" class="tabs tabs-boxed mb-2">
                            {role_tab(SignupRole::Student, "I'm a Student")}
                            {role_tab(SignupRole::Recruiter, "I'm a Recruiter")}
                        </div>

                        <Show when=move || form.with(|f| f.error.is_some())>
                            <div role="alert" class="alert alert-error text-sm py-2">
                                <span>{move || form.with(|f| f.error.clone().unwrap_or_default())}</span>
                            </div>
                        </Show>

                        <div class="form-control">
                            <label class="label">
                                <span class="label-text">
                                    {move || if is_recruiter() { "Company Name" } else { "Full Name" }}
                                </span>
                            </label>
                            <input
                                type="text"
                                class="input input-bordered"
                                placeholder=move || if is_recruiter() { "TechCorp Inc." } else { "John Doe" }
                                prop:value=move || form.with(|f| f.display_name().to_string())
                                on:input=move |ev| {
                                    let value = event_target_value(&ev);
                                    form.update(|f| match f.role {
                                        SignupRole::Student => f.full_name = value,
                                        SignupRole::Recruiter => f.company_name = value,
                                    });
                                }
                                required
                            />
                        </div>
                        <div class="form-control">
                            <label class="label">
                                <span class="label-text">"Username"</span>
                            </label>
                            <input
                                type="text"
                                class="input input-bordered"
                                placeholder="Choose a username"
                                prop:value=move || form.with(|f| f.username.clone())
                                on:input=move |ev| {
                                    let value = event_target_value(&ev);
                                    form.update(|f| f.username = value);
                                }
                                required
                            />
                        </div>
                        <div class="form-control">
                            <label class="label">
                                <span class="label-text">"Email"</span>
                            </label>
                            <input
                                type="email"
                                class="input input-bordered"
                                placeholder="you@example.com"
                                prop:value=move || form.with(|f| f.email.clone())
                                on:input=move |ev| {
                                    let value = event_target_value(&ev);
                                    form.update(|f| f.email = value);
                                }
                                required
                            />
                        </div>
                        <div class="form-control">
                            <label class="label">
                                <span class="label-text">"Password"</span>
                            </label>
                            <input
                                type="password"
                                class="input input-bordered"
                                placeholder="••••••••"
                                prop:value=move || form.with(|f| f.password.clone())
                                on:input=move |ev| {
                                    let value = event_target_value(&ev);
                                    form.update(|f| f.password = value);
                                }
                                required
                            />
                        </div>
                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=is_submitting>
                                {move || if is_submitting() {
                                    view! { <span class="loading loading-spinner"></span> "Creating account..." }.into_any()
                                } else {
                                    "Create Account".into_any()
                                }}
                            </button>
                        </div>
                        <p class="text-center text-sm mt-2">
                            "Already have an account? "
                            <Link to=AppRoute::Login class="link link-primary">"Log in"</Link>
                        </p>
                    </form>
                </div>
            </div>
        </div>
    }
}
