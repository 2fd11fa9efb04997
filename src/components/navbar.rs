use leptos::prelude::*;
use leptos_router::hooks::{use_location, use_navigate};
use leptos_router::NavigateOptions;

use crate::components::toast::ToastContext;
use crate::search::SearchBox;
use crate::state::{PlacesContext, SessionContext};
use crate::voice;

/// Top navigation with destination search and the account menu.
#[component]
pub fn Navbar() -> impl IntoView {
    let session = expect_context::<SessionContext>();
    let places = expect_context::<PlacesContext>();
    let toasts = expect_context::<ToastContext>();
    let navigate = use_navigate();
    let location = use_location();

    let search = RwSignal::new(SearchBox::default());
    let (show_dropdown, set_show_dropdown) = signal(false);

    // The booking page has no search box
    let show_search = move || location.pathname.get() != "/form";

    let on_search_input = move |ev: leptos::ev::Event| {
        let value = event_target_value(&ev);
        places
            .index
            .with_untracked(|index| search.update(|s| s.input(index, &value)));
    };

    let nav_select = navigate.clone();
    let select_place = move |name: String| {
        let route = search.try_update(|s| s.select(&name)).unwrap_or_default();
        nav_select(&route, NavigateOptions::default());
    };

    let nav_submit = navigate.clone();
    let submit_search = move |_: leptos::ev::MouseEvent| {
        if let Some(route) = search.try_update(|s| s.submit()).flatten() {
            nav_submit(&route, NavigateOptions::default());
        }
    };

    let nav_voice = navigate.clone();
    let voice_search = move |_: leptos::ev::MouseEvent| {
        let nav = nav_voice.clone();
        let started = voice::listen_once(move |transcript| {
            let route = places
                .index
                .with_untracked(|index| search.try_update(|s| s.voice(index, &transcript)))
                .flatten();
            if let Some(route) = route {
                nav(&route, NavigateOptions::default());
            }
        });
        if let Err(e) = started {
            toasts.error(e.to_string());
        }
    };

    let nav_logout = navigate.clone();
    let logout = move |_: leptos::ev::MouseEvent| {
        if session.logout() {
            set_show_dropdown.set(false);
            nav_logout("/", NavigateOptions::default());
        }
    };

    view! {
        <div class="navbar-wrapper">
            <nav class="navbar">
                <div class="navbar-brand">
                    <img
                        class="navbar-logo"
                        src="https://img.freepik.com/free-vector/detailed-travel-logo_23-2148616611.jpg"
                        alt=""
                    />
                    <h1 class="navbar-title">"Travigo"</h1>
                </div>

                <div class="navbar-center">
                    <ul class="nav-list">
                        <li class="nav-item"><a href="/" class="nav-link">"Home"</a></li>
                        <li class="nav-item"><a href="/about" class="nav-link">"About us"</a></li>
                        <li class="nav-item"><a href="/contact" class="nav-link">"Contact"</a></li>
                        <li class="nav-item"><a href="/booked" class="nav-link">"Booked"</a></li>
                    </ul>

                    <Show when=show_search>
                        <input
                            type="text"
                            class="input search-input"
                            placeholder="Search for a place"
                            prop:value=move || search.with(|s| s.query.clone())
                            on:input=on_search_input
                        />
                        <button
                            class="btn btn-search"
                            on:click=submit_search.clone()
                            disabled=move || search.with(|s| s.query.is_empty())
                        >
                            "Search"
                        </button>
                        <button
                            type="button"
                            class="btn btn-icon"
                            title="Voice Search"
                            on:click=voice_search.clone()
                        >
                            "\u{1F3A4}"
                        </button>
                    </Show>
                </div>

                <div class="navbar-account">
                    {move || {
                        let current = session.session.get();
                        if current.is_logged_in() {
                            let logout = logout.clone();
                            view! {
                                <div class="account">
                                    <span class="account-name">{current.name.clone()}</span>
                                    <button
                                        class="account-avatar"
                                        title="Account options"
                                        on:click=move |_| set_show_dropdown.update(|open| *open = !*open)
                                    >
                                        {current.initial()}
                                    </button>
                                    <Show when=move || show_dropdown.get()>
                                        <div class="account-menu">
                                            <div class="account-email">
                                                {move || session.session.with(|s| s.email.clone())}
                                            </div>
                                            <a
                                                href="/booked"
                                                class="account-menu-item"
                                                on:click=move |_| set_show_dropdown.set(false)
                                            >
                                                "Your Profile"
                                            </a>
                                            <button class="account-menu-item" on:click=logout.clone()>
                                                "Logout"
                                            </button>
                                        </div>
                                    </Show>
                                </div>
                            }
                                .into_any()
                        } else {
                            view! {
                                <div class="account">
                                    <a href="/login" class="btn btn-link">"Login"</a>
                                    <a href="/register" class="btn btn-primary">"Sign up"</a>
                                </div>
                            }
                                .into_any()
                        }
                    }}
                </div>
            </nav>

            {move || {
                let results = search.with(|s| s.results.clone());
                if results.is_empty() {
                    return view! { <div style="display:none"></div> }.into_any();
                }
                let select_place = select_place.clone();
                view! {
                    <ul class="search-results">
                        {results
                            .into_iter()
                            .map(|place| {
                                let name = place.name.clone();
                                let select_place = select_place.clone();
                                view! {
                                    <li
                                        class="search-result"
                                        on:click=move |_| select_place(name.clone())
                                    >
                                        {place.name}
                                    </li>
                                }
                            })
                            .collect::<Vec<_>>()}
                    </ul>
                }
                    .into_any()
            }}
        </div>
    }
}
