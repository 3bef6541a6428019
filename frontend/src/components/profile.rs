//! 个人资料页
//!
//! 按角色标志显示学生字段和/或招聘方字段，保存时提交完整记录。

pub mod state;

use crate::api::use_api;
use crate::auth::use_auth;
use crate::components::navbar::Navbar;
use crate::components::notice::NoticeBanner;
use crate::config::use_config;
use crate::lifecycle::Liveness;
use fresherjobs_shared::Session;
use leptos::prelude::*;
use leptos::task::spawn_local;
use state::{ProfileField, ProfileForm};

#[component]
pub fn ProfilePage() -> impl IntoView {
    let api = StoredValue::new(use_api());
    let auth = use_auth();
    let config = use_config();
    let alive = StoredValue::new(Liveness::for_current_owner());

    // 路由守卫保证此处已登录
    let session = auth
        .session_untracked()
        .unwrap_or_else(|| Session::new("", false, false));
    let form = RwSignal::new(ProfileForm::new(&session));

    {
        let api = api.get_value();
        let alive = alive.get_value();
        let token = auth.access_token();
        spawn_local(async move {
            let result = api.get_profile(token.as_deref()).await;
            if alive.is_alive() {
                form.try_update(|f| f.resolve_load(result));
            }
        });
    }

    let notice_timeout = config.notice_timeout;
    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let Some(profile) = form.try_update(|f| f.begin_save()).flatten() else {
            return;
        };

        let api = api.get_value();
        let alive = alive.get_value();
        let token = auth.access_token();
        spawn_local(async move {
            let result = api.update_profile(&profile, token.as_deref()).await;
            if !alive.is_alive() {
                return;
            }
            let Some(ticket) = form.try_update(|f| f.resolve_save(result)).flatten() else {
                return;
            };
            set_timeout(
                move || {
                    if alive.is_alive() {
                        form.try_update(|f| f.expire_notice(ticket));
                    }
                },
                notice_timeout,
            );
        });
    };

    let is_saving = move || form.with(|f| f.saving);
    let notice = Signal::derive(move || form.with(|f| f.notice.clone()));
    let (show_student, show_recruiter) =
        form.with_untracked(|f| (f.shows_student_fields(), f.shows_recruiter_fields()));

    view! {
        <div class="min-h-screen bg-base-200">
            <Navbar />
            <div class="max-w-3xl mx-auto p-4 md:p-8">
                <div class="card bg-base-100 shadow-xl">
                    <form class="card-body space-y-4" on:submit=on_submit>
                        <div>
                            <h1 class="text-3xl font-bold">"My Profile"</h1>
                            <p class="text-base-content/70">{session.username.clone()}</p>
                        </div>

                        <NoticeBanner notice=notice />

                        <Show
                            when=move || !form.with(|f| f.loading)
                            fallback=|| view! {
                                <div class="flex justify-center py-10">
                                    <span class="loading loading-spinner loading-lg text-primary"></span>
                                </div>
                            }
                        >
                            {show_student.then(|| view! {
                                <FieldSection title="Academic Details" fields=&ProfileField::STUDENT_FIELDS form=form />
                            })}
                            {show_recruiter.then(|| view! {
                                <FieldSection title="Company Details" fields=&ProfileField::RECRUITER_FIELDS form=form />
                            })}

                            <div class="form-control mt-4">
                                <button class="btn btn-primary" disabled=is_saving>
                                    {move || if is_saving() {
                                        view! { <span class="loading loading-spinner"></span> "Saving..." }.into_any()
                                    } else {
                                        "Save Profile".into_any()
                                    }}
                                </button>
                            </div>
                        </Show>
                    </form>
                </div>
            </div>
        </div>
    }
}

#[component]
fn FieldSection(
    title: &'static str,
    fields: &'static [ProfileField],
    form: RwSignal<ProfileForm>,
) -> impl IntoView {
    view! {
        <div class="space-y-2">
            <h2 class="text-lg font-semibold border-b border-base-300 pb-1">{title}</h2>
            {fields
                .iter()
                .copied()
                .map(|field| view! { <FieldInput field=field form=form /> })
                .collect_view()}
        </div>
    }
}

#[component]
fn FieldInput(field: ProfileField, form: RwSignal<ProfileForm>) -> impl IntoView {
    let value = move || form.with(|f| field.get(&f.profile).to_string());
    let on_input = move |ev: leptos::ev::Event| {
        let text = event_target_value(&ev);
        form.update(|f| f.update(field, text));
    };

    let input = if field.is_multiline() {
        view! {
            <textarea
                class="textarea textarea-bordered h-24"
                placeholder=field.placeholder()
                prop:value=value
                on:input=on_input
            ></textarea>
        }
        .into_any()
    } else {
        view! {
            <input
                type="text"
                class="input input-bordered"
                placeholder=field.placeholder()
                prop:value=value
                on:input=on_input
            />
        }
        .into_any()
    };

    view! {
        <div class="form-control">
            <label class="label">
                <span class="label-text">{field.label()}</span>
            </label>
            {input}
        </div>
    }
}
