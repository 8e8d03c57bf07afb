//! Generic coordinate-search provider (OpenStreetMap Nominatim).
//!
//! Answers with an array of candidates; the first element is taken and its
//! nested `address` object mapped. A 404 is an error.

use async_trait::async_trait;
use reqwest::{Client, Url};

use nladdr_core::{Address, HouseNumber, Postcode};

use super::AddressProvider;
use crate::alias::AliasTable;
use crate::error::{ProviderError, ProviderErrorCause, ProviderResult};
use crate::fetch::{join_segments, parse_base_url, send_json, NotFoundPolicy};

pub const NAME: &str = "nominatim";

const ALIASES: AliasTable = AliasTable {
    street: &["address.road", "address.pedestrian", "address.street"],
    house_number: &["address.house_number"],
    addition: &[],
    postcode: &["address.postcode"],
    city: &[
        "address.city",
        "address.town",
        "address.village",
        "address.hamlet",
    ],
    municipality: &["address.municipality"],
    province: &["address.state", "address.province"],
    latitude: &["lat"],
    longitude: &["lon"],
    id: &["place_id"],
};

pub struct NominatimProvider {
    client: Client,
    base_url: Result<Url, ProviderError>,
}

impl NominatimProvider {
    #[must_use]
    pub fn new(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: parse_base_url(NAME, base_url),
        }
    }
}

#[async_trait]
impl AddressProvider for NominatimProvider {
    fn name(&self) -> &str {
        NAME
    }

    async fn resolve(
        &self,
        postcode: &Postcode,
        house_number: &HouseNumber,
    ) -> ProviderResult<Address> {
        let base = self.base_url.as_ref().map_err(Clone::clone)?;
        let url = join_segments(NAME, base, &["search"])?;

        let query = format!("{}, {}", house_number.as_str(), postcode.formatted());
        let request = self.client.get(url).query(&[
            ("q", query.as_str()),
            ("countrycodes", "nl"),
            ("format", "jsonv2"),
            ("addressdetails", "1"),
            ("limit", "1"),
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

        Ok(candidates
            .first()
            .and_then(|first| ALIASES.map_address(first, NAME, postcode, house_number)))
    }
}
