pub mod state;

use crate::api::use_api;
use crate::auth::{login, use_auth};
use crate::lifecycle::Liveness;
use crate::web::route::AppRoute;
use crate::web::router::{Link, use_router};
use leptos::prelude::*;
use leptos::task::spawn_local;
use state::LoginForm;

#[component]
pub fn LoginPage() -> impl IntoView {
    let api = StoredValue::new(use_api());
    let auth = use_auth();
    let router = use_router();
    let alive = StoredValue::new(Liveness::for_current_owner());
    let form = RwSignal::new(LoginForm::new());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let Some((username, password)) = form.try_update(|f| f.begin_submit()).flatten() else {
            return;
        };

        let api = api.get_value();
        let alive = alive.get_value();
        spawn_local(async move {
            let result = login(&auth, &api, &username, &password).await;
            if !alive.is_alive() {
                return;
            }
            match result {
                Ok(session) => {
                    log::info!("[Login] signed in as {}", session.username);
                    form.try_update(|f| f.succeed());
                    router.navigate(AppRoute::landing());
                }
                Err(e) => {
                    log::warn!("[Login] sign-in failed: {}", e);
                    form.try_update(|f| f.fail(&e));
                }
            }
        });
    };

    let is_submitting = move || form.with(|f| f.submitting);

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <h1 class="text-3xl font-bold">"Welcome Back."</h1>
                    <p class="text-base-content/70">"Log in to continue your job search."</p>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <Show when=move || form.with(|f| f.error.is_some())>
                            <div role="alert" class="alert alert-error text-sm py-2">
                                <span>{move || form.with(|f| f.error.clone().unwrap_or_default())}</span>
                            </div>
                        </Show>

                        <div class="form-control">
                            <label class="label" for="username">
                                <span class="label-text">"Username"</span>
                            </label>
                            <input
                                id="username"
                                type="text"
                                placeholder="Enter your username"
                                on:input=move |ev| {
                                    let value = event_target_value(&ev);
                                    form.update(|f| f.username = value);
                                }
                                prop:value=move || form.with(|f| f.username.clone())
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="password">
                                <span class="label-text">"Password"</span>
                            </label>
                            <input
                                id="password"
                                type="password"
                                placeholder="••••••••"
                                on:input=move |ev| {
                                    let value = event_target_value(&ev);
                                    form.update(|f| f.password = value);
                                }
                                prop:value=move || form.with(|f| f.password.clone())
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=is_submitting>
                                {move || if is_submitting() {
                                    view! { <span class="loading loading-spinner"></span> "Logging in..." }.into_any()
                                } else {
                                    "Log In".into_any()
                                }}
                            </button>
                        </div>
                        <p class="text-center text-sm mt-2">
                            "Don't have an account? "
                            <Link to=AppRoute::Register class="link link-primary">"Sign up"</Link>
                        </p>
                    </form>
                </div>
            </div>
        </div>
    }
}
