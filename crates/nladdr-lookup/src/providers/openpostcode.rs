//! Keyless provider speaking Dutch field names.
//!
//! Unknown addresses come back as an empty object. A 404 means the route is
//! not served at all, so it is reported as an error rather than a no-match.

use async_trait::async_trait;
use reqwest::{Client, Url};

use nladdr_core::{Address, HouseNumber, Postcode};

use super::AddressProvider;
use crate::alias::AliasTable;
use crate::error::{ProviderError, ProviderResult};
use crate::fetch::{is_empty_payload, join_segments, parse_base_url, send_json, NotFoundPolicy};

pub const NAME: &str = "openpostcode";

const ALIASES: AliasTable = AliasTable {
    street: &["straat", "straatnaam"],
    house_number: &["huisnummer"],
    addition: &["huisletter", "toevoeging"],
    postcode: &["postcode"],
    city: &["woonplaats", "plaats"],
    municipality: &["gemeente"],
    province: &["provincie"],
    latitude: &["lat", "latitude"],
    longitude: &["lon", "lng", "longitude"],
    id: &["id"],
};

pub struct OpenPostcodeProvider {
    client: Client,
    base_url: Result<Url, ProviderError>,
}

impl OpenPostcodeProvider {
    #[must_use]
    pub fn new(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: parse_base_url(NAME, base_url),
        }
    }
}

#[async_trait]
impl AddressProvider for OpenPostcodeProvider {
    fn name(&self) -> &str {
        NAME
    }

    async fn resolve(
        &self,
        postcode: &Postcode,
        house_number: &HouseNumber,
    ) -> ProviderResult<Address> {
        let base = self.base_url.as_ref().map_err(Clone::clone)?;
        let (number, _) = house_number.split();
        let url = join_segments(NAME, base, &["api", postcode.as_str(), number])?;

        let request = self.client.get(url);
        let Some(body) = send_json(NAME, request, NotFoundPolicy::Error).await? else {
            return Ok(None);
        };
        if is_empty_payload(&body) {
            return Ok(None);
        }

        Ok(ALIASES.map_address(&body, NAME, postcode, house_number))
    }
}
