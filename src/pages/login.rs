use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use leptos_router::NavigateOptions;
use wasm_bindgen_futures::spawn_local;

use crate::components::sidebar::AuthSidebar;
use crate::components::toast::ToastContext;
use crate::config::AppConfig;
use crate::gateway::HttpGateway;
use crate::session::{self, LoginForm};
use crate::state::SessionContext;

#[component]
pub fn LoginPage() -> impl IntoView {
    let gateway = expect_context::<HttpGateway>();
    let config = expect_context::<AppConfig>();
    let session_ctx = expect_context::<SessionContext>();
    let toasts = expect_context::<ToastContext>();
    let navigate = use_navigate();

    let form = RwSignal::new(LoginForm::default());

    let submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        form.update(|f| f.start());
        let credentials = form.with_untracked(|f| f.credentials());
        let gateway = gateway.clone();
        let navigate = navigate.clone();
        let delay = config.redirect_delay;
        spawn_local(async move {
            let outcome = session::login(&gateway, &session_ctx.store(), &credentials).await;
            form.update(|f| f.finish(&outcome));
            match outcome {
                Ok(s) => {
                    session_ctx.refresh();
                    toasts.success(if s.is_admin {
                        "Logged in as Admin"
                    } else {
                        "Logged in as User"
                    });
                    set_timeout(move || navigate("/", NavigateOptions::default()), delay);
                }
                Err(_) => {
                    if let Some(message) = form.with_untracked(|f| f.error.clone()) {
                        toasts.error(message);
                    }
                }
            }
        });
    };

    view! {
        <div class="auth-layout">
            <AuthSidebar />
            <div class="auth-panel">
                <form class="auth-form" on:submit=submit>
                    <h2>"Sign in to your account"</h2>
                    <p class="auth-switch">
                        "Don't have an account " <a href="/register">"register"</a>
                    </p>
                    <Show when=move || form.with(|f| f.error.is_some())>
                        <p class="status-text status-error">
                            {move || form.with(|f| f.error.clone().unwrap_or_default())}
                        </p>
                    </Show>
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
                        {move || if form.with(|f| f.loading) { "Logging in..." } else { "Login" }}
                    </button>
                </form>
            </div>
        </div>
    }
}
