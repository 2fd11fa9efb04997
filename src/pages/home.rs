use leptos::prelude::*;

use crate::search::listing_route;
use crate::state::PlacesContext;

#[component]
pub fn HomePage() -> impl IntoView {
    let places = expect_context::<PlacesContext>();

    view! {
        <div class="page home-page">
            <h2>"Welcome to Travigo"</h2>
            <p class="page-description">
                "Pick a destination, choose a package, and book your trip in minutes."
            </p>

            {move || {
                if !places.loaded.get() {
                    return view! { <p class="loading">"Loading destinations..."</p> }.into_any();
                }
                let all = places.index.with(|index| index.places().to_vec());
                if all.is_empty() {
                    return view! { <p class="empty-state">"No destinations available right now."</p> }
                        .into_any();
                }
                view! {
                    <div class="card-grid">
                        {all
                            .into_iter()
                            .map(|place| {
                                let href = listing_route(&place.name);
                                view! {
                                    <div class="card">
                                        <h3>{place.name}</h3>
                                        <a href=href class="btn btn-primary">"View Packages"</a>
                                    </div>
                                }
                            })
                            .collect::<Vec<_>>()}
                    </div>
                }
                    .into_any()
            }}

            <div class="how-it-works">
                <h3>"How It Works"</h3>
                <div class="steps">
                    <div class="step">
                        <span class="step-number">"1"</span>
                        <div class="step-content">
                            <strong>"Search"</strong>
                            <p>"Type or say a destination to see its packages"</p>
                        </div>
                    </div>
                    <div class="step">
                        <span class="step-number">"2"</span>
                        <div class="step-content">
                            <strong>"Book"</strong>
                            <p>"Choose how many travellers and pay securely"</p>
                        </div>
                    </div>
                    <div class="step">
                        <span class="step-number">"3"</span>
                        <div class="step-content">
                            <strong>"Review"</strong>
                            <p>"Find your trips under Booked and tell others how it went"</p>
                        </div>
                    </div>
                </div>
            </div>
        </div>
    }
}
