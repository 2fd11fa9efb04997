use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use leptos_router::NavigateOptions;
use wasm_bindgen_futures::spawn_local;

use crate::booking::{BookingFlow, BookingForm, BookingState};
use crate::components::package_card::format_price;
use crate::components::toast::ToastContext;
use crate::config::AppConfig;
use crate::dom;
use crate::gateway::HttpGateway;
use crate::payment;
use crate::state::{HandoffContext, SessionContext};

#[component]
pub fn BookingPage() -> impl IntoView {
    let handoff = expect_context::<HandoffContext>();

    move || match handoff.package.get() {
        Some(package) => view! { <BookingView form=BookingForm::new(package) /> }.into_any(),
        None => view! {
            <div class="page booking-page">
                <p class="empty-state">"No package selected."</p>
                <a href="/" class="btn btn-primary">"Browse destinations"</a>
            </div>
        }
        .into_any(),
    }
}

#[component]
fn BookingView(form: BookingForm) -> impl IntoView {
    let gateway = expect_context::<HttpGateway>();
    let config = expect_context::<AppConfig>();
    let session = expect_context::<SessionContext>();
    let toasts = expect_context::<ToastContext>();
    let navigate = use_navigate();

    let package = form.package.clone();
    let form = RwSignal::new(form);
    let flow = RwSignal::new(BookingFlow::new());

    let (saving, set_saving) = signal(false);

    // Store the payment, then the booking. Re-runnable after a failure.
    let finalize = move || {
        let gateway = gateway.clone();
        let navigate = navigate.clone();
        set_saving.set(true);
        spawn_local(async move {
            let mut current = flow.get_untracked();
            match current.finalize(&gateway).await {
                Ok(draft) => {
                    toasts.success(format!("Thanks for Booking {}", draft.name));
                    form.update(|f| f.reset());
                    navigate("/booked", NavigateOptions::default());
                }
                Err(e) => toasts.error(e.to_string()),
            }
            flow.set(current);
            set_saving.set(false);
        });
    };

    let pay = move |_: leptos::ev::MouseEvent| {
        if flow.with_untracked(|f| matches!(f.state(), BookingState::PaymentConfirmed { .. })) {
            finalize();
            return;
        }

        let customer = session.session.with_untracked(|s| s.name.clone());
        if customer.is_empty() {
            toasts.error("Please log in before booking");
            return;
        }

        let draft = form.with_untracked(|f| f.draft(&customer));
        let mut next = flow.get_untracked();
        let begun = next.begin_payment(draft.clone());
        flow.set(next);
        if let Err(e) = begun {
            dom::alert(&e.to_string());
            return;
        }

        let finalize = finalize.clone();
        let on_success = move |payment_id: String| {
            let mut current = flow.get_untracked();
            let confirmed = current.confirm_payment(&payment_id);
            flow.set(current);
            match confirmed {
                Ok(()) => {
                    dom::alert(&format!("Payment successful: {}", payment_id));
                    finalize();
                }
                Err(e) => toasts.error(e.to_string()),
            }
        };
        let on_dismiss = move || {
            flow.update(|f| {
                let _ = f.dismiss();
            });
        };

        if let Err(e) = payment::open_checkout(&config, &draft, on_success, on_dismiss) {
            flow.update(|f| {
                let _ = f.dismiss();
            });
            toasts.error(e.to_string());
        }
    };

    let features = package.features.clone();
    let image_url = package.image_url.clone();

    view! {
        <div class="page booking-page">
            <section class="package-details">
                <h2>"Package Details"</h2>
                <h3 class="package-title">{package.title.clone()}</h3>
                <p class="package-price">{format!("Per Person {}", format_price(package.price))}</p>
                <p class="package-duration">{package.duration.clone()}</p>

                <h2>"Plan"</h2>
                {if features.is_empty() {
                    view! { <p class="empty-state">"No features available."</p> }.into_any()
                } else {
                    view! {
                        <div class="feature-grid">
                            {features
                                .into_iter()
                                .map(|feature| {
                                    view! {
                                        <div class="feature-card">
                                            <img src=image_url.clone() alt=feature.clone() />
                                            <h3>{feature}</h3>
                                        </div>
                                    }
                                })
                                .collect::<Vec<_>>()}
                        </div>
                    }
                        .into_any()
                }}
            </section>

            <section class="booking-form">
                <h2>"Booking Form"</h2>
                <form on:submit=|ev: leptos::ev::SubmitEvent| ev.prevent_default()>
                    <div class="form-group">
                        <label for="mobile">"Mobile"</label>
                        <input
                            id="mobile"
                            type="tel"
                            class="input"
                            required=true
                            prop:value=move || form.with(|f| f.mobile.clone())
                            on:input=move |ev| {
                                let value = event_target_value(&ev);
                                form.update(|f| f.mobile = value);
                            }
                        />
                    </div>
                    <div class="form-group">
                        <label for="email">"Email"</label>
                        <input
                            id="email"
                            type="email"
                            class="input"
                            required=true
                            prop:value=move || form.with(|f| f.email.clone())
                            on:input=move |ev| {
                                let value = event_target_value(&ev);
                                form.update(|f| f.email = value);
                            }
                        />
                    </div>
                    <div class="form-group">
                        <label for="count">"Count"</label>
                        <input
                            id="count"
                            type="number"
                            min="1"
                            class="input"
                            prop:value=move || form.with(|f| f.count_input().to_string())
                            on:input=move |ev| {
                                let value = event_target_value(&ev);
                                form.update(|f| f.set_count_input(&value));
                            }
                        />
                    </div>
                    <div class="form-group">
                        <label for="amount">"Total Amount"</label>
                        <input
                            id="amount"
                            type="text"
                            class="input"
                            readonly=true
                            prop:value=move || form.with(|f| format_price(f.amount()))
                        />
                    </div>
                    <button
                        type="button"
                        class="btn btn-primary btn-pay"
                        on:click=pay
                        disabled=move || {
                            saving.get()
                                || flow.with(|f| matches!(f.state(), BookingState::AwaitingPayment { .. }))
                        }
                    >
                        {move || {
                            if saving.get() {
                                return "Saving booking...";
                            }
                            match flow.with(|f| f.state().clone()) {
                                BookingState::AwaitingPayment { .. } => "Waiting for payment...",
                                BookingState::PaymentConfirmed { .. } => "Retry saving booking",
                                _ => "Pay Now",
                            }
                        }}
                    </button>
                </form>
            </section>
        </div>
    }
}
