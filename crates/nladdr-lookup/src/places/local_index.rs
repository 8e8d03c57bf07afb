use nladdr_core::{load_places_file, AppConfig, ConfigError, MatchKind, PlaceCandidate, PlaceRecord};

use super::dataset::builtin_places;

/// Maximum number of candidates returned by a local search.
pub const LOCAL_RESULT_LIMIT: usize = 8;

/// In-memory scored search over a fixed list of places.
#[derive(Debug, Clone)]
pub struct LocalPlaceIndex {
    places: Vec<PlaceRecord>,
}

impl LocalPlaceIndex {
    #[must_use]
    pub fn new(places: Vec<PlaceRecord>) -> Self {
        Self { places }
    }

    #[must_use]
    pub fn builtin() -> Self {
        Self::new(builtin_places())
    }

    /// Uses the YAML dataset at `NLADDR_PLACES_PATH` when configured, the
    /// built-in list otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the configured file cannot be loaded.
    pub fn from_config(config: &AppConfig) -> Result<Self, ConfigError> {
        match &config.places_path {
            Some(path) => {
                let places = load_places_file(path)?;
                tracing::info!(
                    path = %path.display(),
                    places = places.len(),
                    "loaded local places dataset"
                );
                Ok(Self::new(places))
            }
            None => Ok(Self::builtin()),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.places.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }

    /// Scores every place against `query` and returns the best
    /// [`LOCAL_RESULT_LIMIT`] matches, highest score first. Equal scores
    /// keep dataset order.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<PlaceCandidate> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        let mut scored: Vec<(MatchKind, &PlaceRecord)> = self
            .places
            .iter()
            .filter_map(|place| match_kind(place, &needle).map(|kind| (kind, place)))
            .collect();

        // sort_by_key is stable
        scored.sort_by_key(|(kind, _)| std::cmp::Reverse(kind.score()));
        scored
            .into_iter()
            .take(LOCAL_RESULT_LIMIT)
            .map(|(kind, place)| place.to_candidate(kind))
            .collect()
    }
}

fn match_kind(place: &PlaceRecord, needle: &str) -> Option<MatchKind> {
    let name = place.name.to_lowercase();
    if name == needle {
        Some(MatchKind::Exact)
    } else if name.starts_with(needle) {
        Some(MatchKind::Starts)
    } else if name.contains(needle) {
        Some(MatchKind::Contains)
    } else if place.municipality.to_lowercase().contains(needle) {
        Some(MatchKind::Municipality)
    } else if place.province.to_lowercase().contains(needle) {
        Some(MatchKind::Province)
    } else {
        None
    }
}
