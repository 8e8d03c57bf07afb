//! Free-text address → coordinates, used by the batch pipeline.

use async_trait::async_trait;
use reqwest::{Client, Url};

use nladdr_core::Coordinates;

use crate::alias::first_f64;
use crate::error::{ProviderError, ProviderErrorCause, ProviderResult};
use crate::fetch::{join_segments, parse_base_url, send_json, NotFoundPolicy};

pub const NAME: &str = "nominatim_geocoder";

#[async_trait]
pub trait Geocoder: Send + Sync {
    fn name(&self) -> &str;

    async fn geocode(&self, address: &str) -> ProviderResult<Coordinates>;
}

/// Nominatim free-form search limited to the Netherlands.
///
/// The public instance allows one request per second; every caller sharing
/// a geocoder should also share one [`Throttle`](crate::rate_limit::Throttle).
pub struct NominatimGeocoder {
    client: Client,
    base_url: Result<Url, ProviderError>,
}

impl NominatimGeocoder {
    #[must_use]
    pub fn new(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: parse_base_url(NAME, base_url),
        }
    }
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    fn name(&self) -> &str {
        NAME
    }

    async fn geocode(&self, address: &str) -> ProviderResult<Coordinates> {
        let base = self.base_url.as_ref().map_err(Clone::clone)?;
        let url = join_segments(NAME, base, &["search"])?;
        let request = self.client.get(url).query(&[
            ("q", address),
            ("format", "jsonv2"),
            ("limit", "1"),
            ("countrycodes", "nl"),
        ]);

        let Some(body) = send_json(NAME, request, NotFoundPolicy::Error).await? else {
            return Ok(None);
        };
        let Some(candidates) = body.as_array() else {
            return Err(ProviderError::new(
                NAME,
                ProviderErrorCause::MalformedResponse("expected a JSON array".into()),
            ));
        };
        let Some(first) = candidates.first() else {
            return Ok(None);
        };

        match (first_f64(first, &["lat"]), first_f64(first, &["lon"])) {
            (Some(latitude), Some(longitude)) => Ok(Some(Coordinates {
                latitude,
                longitude,
            })),
            _ => Err(ProviderError::new(
                NAME,
                ProviderErrorCause::MalformedResponse("candidate without lat/lon".into()),
            )),
        }
    }
}
