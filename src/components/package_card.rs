use leptos::prelude::*;

use crate::models::Package;

pub fn format_price(price: f64) -> String {
    if price.fract() == 0.0 {
        format!("\u{20B9}{}", price as i64)
    } else {
        format!("\u{20B9}{:.2}", price)
    }
}

#[component]
pub fn PackageCard(
    package: Package,
    /// Invoked with the package when the user opens its details.
    #[prop(into)]
    on_open: Callback<Package>,
) -> impl IntoView {
    let price_line = format!("{} per person ({})", format_price(package.price), package.duration);
    let title = package.title.clone();
    let image_url = package.image_url.clone();

    view! {
        <div class="package-card">
            <h2 class="package-card-title">{title.clone()}</h2>
            <img class="package-card-image" src=image_url alt=title />
            <h3 class="package-card-price">{price_line}</h3>
            <button
                class="btn btn-primary"
                on:click=move |_| on_open.run(package.clone())
            >
                "About this package"
            </button>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_rupees_have_no_decimals() {
        assert_eq!(format_price(4999.0), "\u{20B9}4999");
        assert_eq!(format_price(1250.5), "\u{20B9}1250.50");
    }
}
