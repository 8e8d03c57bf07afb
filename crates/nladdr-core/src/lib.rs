pub mod address;
pub mod app_config;
pub mod config;
pub mod geocode;
pub mod places;
pub mod postcode;

pub use address::Address;
pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env, ConfigError};
pub use geocode::{Coordinates, GeocodeJobRecord, GeocodeStore};
pub use places::{load_places_file, MatchKind, PlaceCandidate, PlaceRecord};
pub use postcode::{HouseNumber, Postcode, ValidationError};
