//! Keyed postcode API returning one English-named object per address.
//!
//! HTTP 404 from this provider means "no such address" and maps to no match.

use async_trait::async_trait;
use reqwest::{Client, Url};

use nladdr_core::{Address, HouseNumber, Postcode};

use super::AddressProvider;
use crate::alias::AliasTable;
use crate::error::{ProviderError, ProviderErrorCause, ProviderResult};
use crate::fetch::{is_empty_payload, join_segments, parse_base_url, send_json, NotFoundPolicy};

pub const NAME: &str = "postcode_tech";

const ALIASES: AliasTable = AliasTable {
    street: &["street"],
    house_number: &["number"],
    addition: &["addition"],
    postcode: &["postcode"],
    city: &["city"],
    municipality: &["municipality"],
    province: &["province"],
    latitude: &["geo.lat"],
    longitude: &["geo.lon"],
    id: &[],
};

pub struct PostcodeTechProvider {
    client: Client,
    base_url: Result<Url, ProviderError>,
    api_key: Option<String>,
}

impl PostcodeTechProvider {
    /// An invalid `base_url` or a missing key does not fail construction;
    /// the adapter then reports `NotConfigured` on every call without
    /// touching the network.
    #[must_use]
    pub fn new(client: Client, base_url: &str, api_key: Option<String>) -> Self {
        Self {
            client,
            base_url: parse_base_url(NAME, base_url),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
        }
    }
}

#[async_trait]
impl AddressProvider for PostcodeTechProvider {
    fn name(&self) -> &str {
        NAME
    }

    async fn resolve(
        &self,
        postcode: &Postcode,
        house_number: &HouseNumber,
    ) -> ProviderResult<Address> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(ProviderError::new(
                NAME,
                ProviderErrorCause::NotConfigured("NLADDR_POSTCODE_TECH_API_KEY is not set".into()),
            ));
        };
        let base = self.base_url.as_ref().map_err(Clone::clone)?;
        let url = join_segments(NAME, base, &["v1", "postcode", "full"])?;

        let (number, _) = house_number.split();
        let request = self
            .client
            .get(url)
            .bearer_auth(api_key)
            .query(&[("postcode", postcode.as_str()), ("number", number)]);

        let Some(body) = send_json(NAME, request, NotFoundPolicy::NoMatch).await? else {
            return Ok(None);
        };
        if is_empty_payload(&body) {
            return Ok(None);
        }

        Ok(ALIASES.map_address(&body, NAME, postcode, house_number))
    }
}
