use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;

use crate::gateway::{Gateway, HttpGateway};
use crate::models::Package;
use crate::search::PlaceIndex;
use crate::session::{self, KeyValueStore, LocalStorage, Session};

/// Session shared with every component that needs it, backed by the
/// injected store (`localStorage` in the app).
#[derive(Clone, Copy)]
pub struct SessionContext<S = LocalStorage> {
    pub session: RwSignal<Session>,
    store: S,
}

impl<S> SessionContext<S>
where
    S: KeyValueStore + Copy + 'static,
{
    pub fn new(store: S) -> Self {
        let ctx = Self {
            session: RwSignal::new(Session::default()),
            store,
        };
        ctx.refresh();
        ctx
    }

    pub fn store(&self) -> S {
        self.store
    }

    /// Re-derive the session from the store.
    pub fn refresh(&self) {
        match Session::load(&self.store) {
            Ok(s) => self.session.set(s),
            Err(e) => tracing::warn!("Failed to read session: {}", e),
        }
    }

    /// Keep this tab in step with logins and logouts in other tabs.
    pub fn listen_for_storage_changes(self) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure =
            Closure::<dyn Fn(web_sys::StorageEvent)>::new(move |_: web_sys::StorageEvent| {
                self.refresh();
            });
        let _ = window
            .add_event_listener_with_callback("storage", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Ask, then clear the stored session. Returns whether the user logged out.
    pub fn logout(&self) -> bool {
        self.logout_with(|| crate::dom::confirm("Are you sure you want to log out?"))
    }

    pub fn logout_with(&self, confirm: impl FnOnce() -> bool) -> bool {
        match session::logout(&self.store, confirm) {
            Ok(true) => {
                self.session.set(Session::default());
                true
            }
            Ok(false) => false,
            Err(e) => {
                tracing::warn!("Logout failed: {}", e);
                self.refresh();
                false
            }
        }
    }
}

/// Place snapshot, fetched once at startup.
#[derive(Clone, Copy)]
pub struct PlacesContext {
    pub index: RwSignal<PlaceIndex>,
    pub loaded: RwSignal<bool>,
}

impl PlacesContext {
    pub fn new() -> Self {
        Self {
            index: RwSignal::new(PlaceIndex::default()),
            loaded: RwSignal::new(false),
        }
    }

    pub fn load(self, gateway: HttpGateway) {
        spawn_local(async move {
            match gateway.places().await {
                Ok(places) => {
                    tracing::info!("Loaded {} places", places.len());
                    self.index.set(PlaceIndex::new(places));
                }
                Err(e) => tracing::error!("Error fetching all places: {}", e),
            }
            self.loaded.set(true);
        });
    }
}

/// Package handed from the listing page to the booking page.
#[derive(Clone, Copy)]
pub struct HandoffContext {
    pub package: RwSignal<Option<Package>>,
}

impl HandoffContext {
    pub fn new() -> Self {
        Self {
            package: RwSignal::new(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{MemoryStore, AUTH_TOKEN_KEY, NAME_KEY};

    fn store() -> &'static MemoryStore {
        Box::leak(Box::new(MemoryStore::new()))
    }

    #[test]
    fn test_session_context_reads_injected_store() {
        let store = store();
        store.set(AUTH_TOKEN_KEY, "tok").unwrap();
        store.set(NAME_KEY, "Asha").unwrap();

        let ctx = SessionContext::new(store);
        let session = ctx.session.get_untracked();
        assert!(session.is_logged_in());
        assert_eq!(session.name, "Asha");
    }

    #[test]
    fn test_session_context_refresh_picks_up_changes() {
        let store = store();
        let ctx = SessionContext::new(store);
        assert!(!ctx.session.get_untracked().is_logged_in());

        store.set(AUTH_TOKEN_KEY, "tok").unwrap();
        ctx.refresh();
        assert!(ctx.session.get_untracked().is_logged_in());
    }

    #[test]
    fn test_session_context_logout_clears_store() {
        let store = store();
        store.set(AUTH_TOKEN_KEY, "tok").unwrap();
        let ctx = SessionContext::new(store);

        assert!(!ctx.logout_with(|| false));
        assert!(ctx.session.get_untracked().is_logged_in());

        assert!(ctx.logout_with(|| true));
        assert!(!ctx.session.get_untracked().is_logged_in());
        assert!(store.is_empty());
    }
}
