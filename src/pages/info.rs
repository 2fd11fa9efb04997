use leptos::prelude::*;

#[component]
pub fn AboutPage() -> impl IntoView {
    view! {
        <div class="page about-page">
            <h2>"About us"</h2>
            <p class="page-description">
                "Travigo puts together hand-picked trips across Tamil Nadu, from the hills of Ooty and Kodaikanal to the temples of Madurai."
            </p>
            <p>"Every package lists its price per person, duration and day plan up front."</p>
        </div>
    }
}

#[component]
pub fn ContactPage() -> impl IntoView {
    view! {
        <div class="page contact-page">
            <h2>"Contact"</h2>
            <p class="page-description">"Questions about a booking? Reach us any day of the week."</p>
            <ul class="contact-list">
                <li>"Email: support@travigo.example"</li>
                <li>"Phone: +91 90000 00000"</li>
            </ul>
        </div>
    }
}
