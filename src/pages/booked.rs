use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::components::package_card::format_price;
use crate::components::review_modal::ReviewModal;
use crate::components::toast::ToastContext;
use crate::gateway::{Gateway, HttpGateway};
use crate::models::BookedPackage;
use crate::state::SessionContext;

#[component]
pub fn BookedPage() -> impl IntoView {
    let gateway = expect_context::<HttpGateway>();
    let session = expect_context::<SessionContext>();
    let toasts = expect_context::<ToastContext>();

    let (booked, set_booked) = signal::<Vec<BookedPackage>>(vec![]);
    let (loading, set_loading) = signal(true);
    let (error, set_error) = signal::<Option<String>>(None);
    let (selected, set_selected) = signal::<Option<BookedPackage>>(None);
    let (reviewed, set_reviewed) = signal::<Vec<String>>(vec![]);

    let customer = move || session.session.with(|s| s.name.clone());

    Effect::new(move |_| {
        let name = customer();
        if name.is_empty() {
            tracing::warn!("No stored name; bookings need a login");
            set_loading.set(false);
            return;
        }
        let gateway = gateway.clone();
        set_loading.set(true);
        set_error.set(None);
        spawn_local(async move {
            match gateway.booked(&name).await {
                Ok(list) => set_booked.set(list),
                Err(e) => set_error.set(Some(e.to_string())),
            }
            set_loading.set(false);
        });
    });

    let close_modal = Callback::new(move |_: ()| set_selected.set(None));
    let review_submitted = Callback::new(move |package_id: String| {
        set_reviewed.update(|ids| {
            if !ids.contains(&package_id) {
                ids.push(package_id);
            }
        });
        set_selected.set(None);
        toasts.success("Thanks for your review!");
    });

    view! {
        <div class="page booked-page">
            <h1 class="page-title">"Booked Packages"</h1>

            {move || {
                if customer().is_empty() {
                    return view! {
                        <p class="empty-state">
                            "Please " <a href="/login">"log in"</a> " to see your bookings."
                        </p>
                    }
                        .into_any();
                }
                if loading.get() {
                    return view! { <p class="loading">"Loading..."</p> }.into_any();
                }
                if let Some(err) = error.get() {
                    return view! { <p class="status-text status-error">{format!("Error: {}", err)}</p> }
                        .into_any();
                }
                let list = booked.get();
                if list.is_empty() {
                    return view! { <p class="empty-state">"No booked packages found."</p> }.into_any();
                }
                view! {
                    <div class="booked-grid">
                        {list.into_iter().map(|pkg| booked_card(pkg, reviewed, set_selected)).collect::<Vec<_>>()}
                    </div>
                }
                    .into_any()
            }}

            {move || {
                selected
                    .get()
                    .map(|pkg| {
                        view! {
                            <ReviewModal
                                place_id=pkg.package_details.id.clone()
                                user_id=pkg.customer.name.clone()
                                on_close=close_modal
                                on_submitted=review_submitted
                            />
                        }
                    })
            }}
        </div>
    }
}

fn booked_card(
    pkg: BookedPackage,
    reviewed: ReadSignal<Vec<String>>,
    set_selected: WriteSignal<Option<BookedPackage>>,
) -> impl IntoView {
    let details = pkg.package_details.clone();
    let package_id = details.id.clone();
    let is_reviewed = move || reviewed.with(|ids| ids.contains(&package_id));

    view! {
        <div class="booked-card">
            <h2>{details.title.clone()}</h2>
            <img class="booked-card-image" src=details.image_url.clone() alt=details.title.clone() />
            <p class="booked-description">{details.description.clone()}</p>
            <p><strong>"Location: "</strong>{details.place.clone()}</p>
            <p><strong>"Price: "</strong>{format_price(details.price)}</p>
            <p><strong>"Duration: "</strong>{details.duration.clone()}</p>
            <h3>"Features:"</h3>
            <ul class="feature-list">
                {details.features.iter().map(|f| view! { <li>{f.clone()}</li> }).collect::<Vec<_>>()}
            </ul>
            {move || {
                if is_reviewed() {
                    view! { <span class="status-text status-saved">"Reviewed"</span> }.into_any()
                } else {
                    let pkg = pkg.clone();
                    view! {
                        <button
                            class="btn btn-primary"
                            on:click=move |_| set_selected.set(Some(pkg.clone()))
                        >
                            "Leave a Review"
                        </button>
                    }
                        .into_any()
                }
            }}
        </div>
    }
}
