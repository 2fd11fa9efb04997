//! Destination search.
//!
//! Holds the place snapshot fetched once at startup and filters it against
//! live input. Every keystroke is a full linear scan over the snapshot.

use crate::models::Place;

/// Destinations the voice search recognizes directly.
pub const VOICE_DESTINATIONS: [&str; 6] = [
    "Coimbatore",
    "Ooty",
    "Kodaikanal",
    "Dindigul",
    "Tirunelveli",
    "Madurai",
];

/// Route of the package listing for a place name.
pub fn listing_route(place_name: &str) -> String {
    format!("/packages/{}", place_name)
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaceIndex {
    places: Vec<Place>,
}

impl PlaceIndex {
    pub fn new(places: Vec<Place>) -> Self {
        Self { places }
    }

    pub fn places(&self) -> &[Place] {
        &self.places
    }

    /// Places whose name starts with `query`, ignoring case, in snapshot order.
    /// An empty query matches nothing.
    pub fn filter(&self, query: &str) -> Vec<Place> {
        if query.is_empty() {
            return Vec::new();
        }
        let needle = query.to_lowercase();
        self.places
            .iter()
            .filter(|p| p.name.to_lowercase().starts_with(&needle))
            .cloned()
            .collect()
    }
}

/// What a recognized speech transcript resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoiceOutcome {
    /// The transcript named a known destination; go straight to it.
    Destination(String),
    /// Unrecognized; feed the transcript through the text filter.
    Query(String),
}

pub fn resolve_transcript(transcript: &str) -> VoiceOutcome {
    let spoken = transcript.to_lowercase();
    VOICE_DESTINATIONS
        .iter()
        .find(|name| spoken.contains(&name.to_lowercase()))
        .map(|name| VoiceOutcome::Destination(name.to_string()))
        .unwrap_or_else(|| VoiceOutcome::Query(transcript.to_string()))
}

/// Live search box state: query text plus the current result list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchBox {
    pub query: String,
    pub results: Vec<Place>,
}

impl SearchBox {
    pub fn input(&mut self, index: &PlaceIndex, value: &str) {
        self.query = value.to_string();
        self.results = index.filter(value);
    }

    /// Choosing a result clears the box and yields the listing route.
    pub fn select(&mut self, place_name: &str) -> String {
        self.query.clear();
        self.results.clear();
        listing_route(place_name)
    }

    /// Search button: navigates on the raw query, if there is one.
    pub fn submit(&mut self) -> Option<String> {
        if self.query.is_empty() {
            return None;
        }
        let route = listing_route(&self.query);
        self.query.clear();
        self.results.clear();
        Some(route)
    }

    /// Apply a voice transcript. Returns a route when it named a destination.
    pub fn voice(&mut self, index: &PlaceIndex, transcript: &str) -> Option<String> {
        match resolve_transcript(transcript) {
            VoiceOutcome::Destination(name) => Some(self.select(&name)),
            VoiceOutcome::Query(text) => {
                self.input(index, &text);
                None
            }
        }
    }
}
