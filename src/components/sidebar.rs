use leptos::prelude::*;

/// Static welcome panel shown beside the login and register forms.
#[component]
pub fn AuthSidebar() -> impl IntoView {
    view! {
        <aside class="auth-sidebar">
            <h1 class="auth-sidebar-title">"Welcome to Trip Planner"</h1>
            <p class="auth-sidebar-subtitle">
                "Plan your perfect trip with our easy-to-use tools."
            </p>
        </aside>
    }
}
