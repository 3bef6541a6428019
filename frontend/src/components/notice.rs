use leptos::prelude::*;

/// 页面提示（成功或错误）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub text: String,
    pub is_error: bool,
}

impl Notice {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: true,
        }
    }
}

/// 提示条
#[component]
pub fn NoticeBanner(#[prop(into)] notice: Signal<Option<Notice>>) -> impl IntoView {
    view! {
        <Show when=move || notice.with(Option::is_some)>
            <div
                role="alert"
                class=move || {
                    if notice.with(|n| n.as_ref().is_some_and(|n| n.is_error)) {
                        "alert alert-error text-sm py-2"
                    } else {
                        "alert alert-success text-sm py-2"
                    }
                }
            >
                <span>{move || notice.with(|n| n.as_ref().map(|n| n.text.clone()).unwrap_or_default())}</span>
            </div>
        </Show>
    }
}
