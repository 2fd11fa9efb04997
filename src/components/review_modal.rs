//! Review modal for one booked package.
//!
//! Holds only transient form state. A successful submission reports the
//! package id through `on_submitted`; closing reports nothing.

use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::gateway::HttpGateway;
use crate::review::{self, ReviewForm, MAX_RATING, MIN_RATING};

#[component]
pub fn ReviewModal(
    /// Booked package id the review is attached to.
    #[prop(into)]
    place_id: String,
    /// Customer name on the booking.
    #[prop(into)]
    user_id: String,
    on_close: Callback<()>,
    on_submitted: Callback<String>,
) -> impl IntoView {
    let gateway = expect_context::<HttpGateway>();

    let form = RwSignal::new(ReviewForm::new(&place_id, &user_id));
    let (submitting, set_submitting) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);

    let submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let current = form.get_untracked();
        if let Err(e) = current.validate() {
            set_error.set(Some(e.to_string()));
            return;
        }
        set_submitting.set(true);
        set_error.set(None);
        let gateway = gateway.clone();
        spawn_local(async move {
            match review::submit_review(&gateway, &current).await {
                Ok(package_id) => on_submitted.run(package_id),
                Err(e) => set_error.set(Some(format!("Failed to submit review: {}", e))),
            }
            set_submitting.set(false);
        });
    };

    view! {
        <div class="modal-backdrop">
            <div class="modal">
                <button class="modal-close" on:click=move |_| on_close.run(())>"X"</button>
                <h2>"Leave a Review"</h2>
                <form class="review-form" on:submit=submit>
                    <label for="review-rating">"Rating"</label>
                    <select
                        id="review-rating"
                        class="input"
                        prop:value=move || form.with(|f| f.rating.to_string())
                        on:change=move |ev| {
                            let rating = event_target_value(&ev).parse().unwrap_or(MAX_RATING);
                            form.update(|f| f.rating = rating);
                        }
                    >
                        {(MIN_RATING..=MAX_RATING)
                            .rev()
                            .map(|n| view! { <option value=n.to_string()>{"\u{2605}".repeat(n as usize)}</option> })
                            .collect::<Vec<_>>()}
                    </select>

                    <label for="review-comment">"Comment"</label>
                    <textarea
                        id="review-comment"
                        class="input"
                        rows="4"
                        prop:value=move || form.with(|f| f.comment.clone())
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            form.update(|f| f.comment = value);
                        }
                    ></textarea>

                    <Show when=move || error.get().is_some()>
                        <p class="status-text status-error">{move || error.get().unwrap_or_default()}</p>
                    </Show>

                    <button type="submit" class="btn btn-primary" disabled=move || submitting.get()>
                        {move || if submitting.get() { "Submitting..." } else { "Submit Review" }}
                    </button>
                </form>
            </div>
        </div>
    }
}
