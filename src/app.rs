use leptos::prelude::*;
use leptos_router::components::*;
use leptos_router::path;

use crate::components::navbar::Navbar;
use crate::components::toast::{ToastContext, ToastHost};
use crate::config::AppConfig;
use crate::gateway::HttpGateway;
use crate::session::LocalStorage;
use crate::pages::booked::BookedPage;
use crate::pages::booking::BookingPage;
use crate::pages::home::HomePage;
use crate::pages::info::{AboutPage, ContactPage};
use crate::pages::login::LoginPage;
use crate::pages::packages::PackagesPage;
use crate::pages::register::RegisterPage;
use crate::state::{HandoffContext, PlacesContext, SessionContext};

#[component]
pub fn App() -> impl IntoView {
    let config = AppConfig::from_build_env();
    let gateway = HttpGateway::new(&config.api_base_url);

    provide_context(ToastContext::new(config.toast_duration));
    provide_context(HandoffContext::new());

    let session = SessionContext::new(LocalStorage);
    session.listen_for_storage_changes();
    provide_context(session);

    // Places are fetched once and shared by the navbar search and home page
    let places = PlacesContext::new();
    places.load(gateway.clone());
    provide_context(places);

    provide_context(gateway);
    provide_context(config);

    view! {
        <Router>
            <div class="app-layout">
                <Navbar />
                <main class="content">
                    <Routes fallback=|| view! { <p>"Page not found"</p> }>
                        <Route path=path!("/") view=HomePage />
                        <Route path=path!("/about") view=AboutPage />
                        <Route path=path!("/contact") view=ContactPage />
                        <Route path=path!("/packages/:place") view=PackagesPage />
                        <Route path=path!("/form") view=BookingPage />
                        <Route path=path!("/booked") view=BookedPage />
                        <Route path=path!("/login") view=LoginPage />
                        <Route path=path!("/register") view=RegisterPage />
                    </Routes>
                </main>
                <ToastHost />
            </div>
        </Router>
    }
}
