use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use leptos_router::NavigateOptions;
use wasm_bindgen_futures::spawn_local;

use crate::components::sidebar::AuthSidebar;
use crate::components::toast::ToastContext;
use crate::config::AppConfig;
use crate::gateway::HttpGateway;
use crate::session::{self, RegisterForm};

#[component]
pub fn RegisterPage() -> impl IntoView {
    let gateway = expect_context::<HttpGateway>();
    let config = expect_context::<AppConfig>();
    let toasts = expect_context::<ToastContext>();
    let navigate = use_navigate();

    let form = RwSignal::new(RegisterForm::default());

    let submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let registration = match form.with_untracked(|f| f.validate()) {
            Ok(r) => r,
            Err(e) => {
                form.update(|f| f.error = Some(e.to_string()));
                return;
            }
        };
        form.update(|f| {
            f.loading = true;
            f.error = None;
        });

        let gateway = gateway.clone();
        let navigate = navigate.clone();
        let delay = config.redirect_delay;
        spawn_local(async move {
            match session::register(&gateway, &registration).await {
                Ok(message) => {
                    toasts.success(message);
                    form.set(RegisterForm::default());
                    set_timeout(move || navigate("/login", NavigateOptions::default()), delay);
                }
                Err(e) => {
                    let message = e.to_string();
                    toasts.error(message.clone());
                    form.update(|f| {
                        f.loading = false;
                        f.error = Some(message);
                    });
                }
            }
        });
    };

    view! {
        <div class="auth-layout">
            <AuthSidebar />
            <div class="auth-panel">
                <form class="auth-form" on:submit=submit>
                    <h2>"Create your account"</h2>
                    <p class="auth-switch">
                        "Already have an account? " <a href="/login">"login"</a>
                    </p>
                    <Show when=move || form.with(|f| f.error.is_some())>
                        <p class="status-text status-error">
                            {move || form.with(|f| f.error.clone().unwrap_or_default())}
                        </p>
                    </Show>
                    <input
                        type="text"
                        placeholder="Name"
                        class="input"
                        required=true
                        prop:value=move || form.with(|f| f.name.clone())
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            form.update(|f| f.name = value);
                        }
                    />
                    <input
                        type="email"
                        placeholder="Email"
                        class="input"
                        required=true
                        prop:value=move || form.with(|f| f.email.clone())
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            form.update(|f| f.email = value);
                        }
                    />
                    <input
                        type="password"
                        placeholder="Password"
                        class="input"
                        required=true
                        prop:value=move || form.with(|f| f.password.clone())
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            form.update(|f| f.password = value);
                        }
                    />
                    <button
                        type="submit"
                        class="btn btn-primary"
                        disabled=move || form.with(|f| f.loading)
                    >
                        {move || if form.with(|f| f.loading) { "Registering..." } else { "Register" }}
                    </button>
                </form>
            </div>
        </div>
    }
}
