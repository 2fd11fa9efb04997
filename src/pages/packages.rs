use leptos::prelude::*;
use leptos_router::hooks::{use_navigate, use_params_map};
use leptos_router::NavigateOptions;
use wasm_bindgen_futures::spawn_local;

use crate::components::package_card::PackageCard;
use crate::gateway::{Gateway, HttpGateway};
use crate::models::Package;
use crate::state::HandoffContext;

/// Embedded map of a place.
pub fn map_embed_url(place: &str) -> String {
    format!(
        "https://maps.google.com/maps?width=100%25&height=600&hl=en&q={}&t=&z=12&ie=UTF8&iwloc=B&output=embed",
        place.replace(' ', "+")
    )
}

/// A response is only shown if the route still points at the place it
/// was requested for.
fn is_current(requested: &str, current: &str) -> bool {
    requested == current
}

#[component]
pub fn PackagesPage() -> impl IntoView {
    let gateway = expect_context::<HttpGateway>();
    let handoff = expect_context::<HandoffContext>();
    let navigate = use_navigate();
    let params = use_params_map();

    let place = move || {
        params
            .with(|p| p.get("place").map(|s| s.to_string()))
            .unwrap_or_default()
    };

    // None once the page has been torn down
    let current_place = move || {
        params.try_with_untracked(|p| p.get("place").map(|s| s.to_string()).unwrap_or_default())
    };

    let (packages, set_packages) = signal::<Vec<Package>>(vec![]);
    let (loading, set_loading) = signal(true);
    let (error, set_error) = signal::<Option<String>>(None);

    // Refetch whenever the place in the URL changes
    Effect::new(move |_| {
        let place = place();
        let gateway = gateway.clone();
        set_loading.set(true);
        set_error.set(None);
        spawn_local(async move {
            let result = gateway.packages(&place).await;
            if !current_place().is_some_and(|current| is_current(&place, &current)) {
                tracing::debug!("Dropping stale packages for {}", place);
                return;
            }
            match result {
                Ok(list) => set_packages.set(list),
                Err(e) => {
                    set_packages.set(vec![]);
                    set_error.set(Some(format!("Error fetching packages: {}", e)));
                }
            }
            set_loading.set(false);
        });
    });

    let open_package = Callback::new(move |package: Package| {
        handoff.package.set(Some(package));
        navigate("/form", NavigateOptions::default());
    });

    view! {
        <div class="page packages-page">
            {move || {
                if loading.get() {
                    return view! { <p class="loading">"Loading..."</p> }.into_any();
                }
                if let Some(err) = error.get() {
                    return view! { <p class="status-text status-error">{err}</p> }.into_any();
                }
                let list = packages.get();
                if list.is_empty() {
                    return view! {
                        <p class="empty-state">{format!("No packages found for {}.", place())}</p>
                    }
                        .into_any();
                }
                view! {
                    <h1 class="page-title">{format!("Packages in {}", place())}</h1>
                    <div class="package-grid">
                        {list
                            .into_iter()
                            .map(|package| view! { <PackageCard package=package on_open=open_package /> })
                            .collect::<Vec<_>>()}
                    </div>
                }
                    .into_any()
            }}

            <section class="map-section">
                <h2>{move || format!("Explore {}", place())}</h2>
                <iframe
                    class="map-embed"
                    width="100%"
                    height="600"
                    title="Google Map"
                    src=move || map_embed_url(&place())
                ></iframe>
            </section>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_url_embeds_place() {
        let url = map_embed_url("Ooty");
        assert!(url.contains("q=Ooty&"), "{}", url);
        assert!(url.ends_with("output=embed"));
        assert!(map_embed_url("Tamil Nadu").contains("q=Tamil+Nadu&"));
    }

    #[test]
    fn test_response_for_previous_place_is_stale() {
        assert!(is_current("Ooty", "Ooty"));
        assert!(!is_current("Ooty", "Madurai"));
    }
}
