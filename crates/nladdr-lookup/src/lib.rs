//! Address lookup, place search and batch geocoding against external
//! Dutch geodata providers.

pub mod alias;
pub mod batch;
pub mod cascade;
pub mod error;
pub mod fetch;
pub mod geocoder;
pub mod places;
pub mod providers;
pub mod rate_limit;

pub use batch::{
    run_geocode_batch, run_geocode_batch_paced, GeocodeSummary, RecordOutcome, SkipReason,
};
pub use cascade::AddressCascade;
pub use error::{
    AttemptOutcome, BatchError, LookupError, NotFoundReason, ProviderAttempt, ProviderError,
    ProviderErrorCause, ProviderResult, SearchError,
};
pub use fetch::build_http_client;
pub use geocoder::{Geocoder, NominatimGeocoder};
pub use places::{
    LocalPlaceIndex, PdokPlaceProvider, PlaceCache, PlaceProvider, PlaceSearchResolver,
};
pub use providers::{
    AddressProvider, NominatimProvider, OpenPostcodeProvider, PostcodeTechProvider,
};
pub use rate_limit::Throttle;
