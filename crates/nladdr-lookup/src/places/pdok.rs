//! PDOK Locatieserver free-text search, restricted to settlements.

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;

use nladdr_core::PlaceCandidate;

use super::{PlaceProvider, MAX_RESULTS};
use crate::error::{ProviderError, ProviderErrorCause};
use crate::fetch::{join_segments, parse_base_url, send_json, NotFoundPolicy};

pub const NAME: &str = "pdok";

#[derive(Debug, Deserialize)]
struct FreeSearchResponse {
    response: DocList,
}

#[derive(Debug, Deserialize)]
struct DocList {
    #[serde(default)]
    docs: Vec<PdokDoc>,
}

#[derive(Debug, Deserialize)]
struct PdokDoc {
    id: String,
    #[serde(default)]
    weergavenaam: Option<String>,
    #[serde(default)]
    woonplaatsnaam: Option<String>,
    #[serde(default)]
    gemeentenaam: Option<String>,
    #[serde(default)]
    provincienaam: Option<String>,
    #[serde(default)]
    centroide_ll: Option<String>,
}

impl PdokDoc {
    fn into_candidate(self) -> Option<PlaceCandidate> {
        let name = self
            .woonplaatsnaam
            .or(self.weergavenaam)
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())?;
        let (longitude, latitude) = self
            .centroide_ll
            .as_deref()
            .and_then(parse_wkt_point)
            .unzip();

        Some(PlaceCandidate {
            id: self.id,
            name,
            municipality: self.gemeentenaam,
            province: self.provincienaam,
            latitude,
            longitude,
            score: None,
            match_kind: None,
        })
    }
}

/// Parses `"POINT(lon lat)"` into `(lon, lat)`.
fn parse_wkt_point(raw: &str) -> Option<(f64, f64)> {
    let inner = raw
        .trim()
        .strip_prefix("POINT(")?
        .strip_suffix(')')?;
    let mut parts = inner.split_whitespace();
    let lon = parts.next()?.parse::<f64>().ok()?;
    let lat = parts.next()?.parse::<f64>().ok()?;
    if parts.next().is_some() || !lon.is_finite() || !lat.is_finite() {
        return None;
    }
    Some((lon, lat))
}

pub struct PdokPlaceProvider {
    client: Client,
    base_url: Result<Url, ProviderError>,
}

impl PdokPlaceProvider {
    #[must_use]
    pub fn new(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: parse_base_url(NAME, base_url),
        }
    }
}

#[async_trait]
impl PlaceProvider for PdokPlaceProvider {
    fn name(&self) -> &str {
        NAME
    }

    async fn search(&self, query: &str) -> Result<Vec<PlaceCandidate>, ProviderError> {
        let base = self.base_url.as_ref().map_err(Clone::clone)?;
        let url = join_segments(
            NAME,
            base,
            &["bzk", "locatieserver", "search", "v3_1", "free"],
        )?;
        let rows = MAX_RESULTS.to_string();
        let request = self.client.get(url).query(&[
            ("q", query),
            ("fq", "type:woonplaats"),
            ("rows", rows.as_str()),
        ]);

        let Some(body) = send_json(NAME, request, NotFoundPolicy::Error).await? else {
            return Ok(Vec::new());
        };
        let parsed: FreeSearchResponse = serde_json::from_value(body).map_err(|e| {
            ProviderError::new(NAME, ProviderErrorCause::MalformedResponse(e.to_string()))
        })?;

        Ok(parsed
            .response
            .docs
            .into_iter()
            .filter_map(PdokDoc::into_candidate)
            .take(MAX_RESULTS)
            .collect())
    }
}
