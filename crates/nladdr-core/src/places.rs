use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// How a local place entry matched the query. Ordered from strongest to
/// weakest; [`MatchKind::score`] gives the fixed score for each kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchKind {
    Exact,
    Starts,
    Contains,
    Municipality,
    Province,
}

impl MatchKind {
    #[must_use]
    pub fn score(self) -> u8 {
        match self {
            MatchKind::Exact => 100,
            MatchKind::Starts => 90,
            MatchKind::Contains => 70,
            MatchKind::Municipality => 60,
            MatchKind::Province => 50,
        }
    }
}

impl std::fmt::Display for MatchKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchKind::Exact => write!(f, "exact"),
            MatchKind::Starts => write!(f, "starts"),
            MatchKind::Contains => write!(f, "contains"),
            MatchKind::Municipality => write!(f, "municipality"),
            MatchKind::Province => write!(f, "province"),
        }
    }
}

/// One place-search result.
///
/// `score` and `match_kind` are only set for results scored by the local
/// index; remote results keep the provider's order and carry neither.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceCandidate {
    pub id: String,
    pub name: String,
    pub municipality: Option<String>,
    pub province: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub score: Option<u8>,
    pub match_kind: Option<MatchKind>,
}

/// A settlement in the local fallback dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceRecord {
    pub id: String,
    pub name: String,
    pub municipality: String,
    pub province: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl PlaceRecord {
    /// Converts into a scored candidate.
    #[must_use]
    pub fn to_candidate(&self, kind: MatchKind) -> PlaceCandidate {
        PlaceCandidate {
            id: self.id.clone(),
            name: self.name.clone(),
            municipality: Some(self.municipality.clone()),
            province: Some(self.province.clone()),
            latitude: self.latitude,
            longitude: self.longitude,
            score: Some(kind.score()),
            match_kind: Some(kind),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PlacesFile {
    pub places: Vec<PlaceRecord>,
}

/// Load and validate a local place dataset from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_places_file(path: &Path) -> Result<Vec<PlaceRecord>, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::PlacesFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let places_file: PlacesFile =
        serde_yaml::from_str(&content).map_err(ConfigError::PlacesFileParse)?;

    validate_places(&places_file.places)?;

    Ok(places_file.places)
}

fn validate_places(places: &[PlaceRecord]) -> Result<(), ConfigError> {
    let mut seen_ids = HashSet::new();

    for place in places {
        if place.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "place name must be non-empty".to_string(),
            ));
        }

        if !seen_ids.insert(place.id.as_str()) {
            return Err(ConfigError::Validation(format!(
                "duplicate place id: '{}' (place '{}')",
                place.id, place.name
            )));
        }

        if let Some(lat) = place.latitude {
            if !(-90.0..=90.0).contains(&lat) {
                return Err(ConfigError::Validation(format!(
                    "place '{}' has latitude {lat} outside -90..=90",
                    place.name
                )));
            }
        }
        if let Some(lng) = place.longitude {
            if !(-180.0..=180.0).contains(&lng) {
                return Err(ConfigError::Validation(format!(
                    "place '{}' has longitude {lng} outside -180..=180",
                    place.name
                )));
            }
        }
    }

    Ok(())
}
