//! `NominatimGeocoder` against wiremock.

use nladdr_core::Coordinates;
use nladdr_lookup::{build_http_client, Geocoder, NominatimGeocoder, ProviderErrorCause};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn geocoder(base_url: &str) -> NominatimGeocoder {
    let client = build_http_client(5, "nladdr-test/0.1").expect("client construction");
    NominatimGeocoder::new(client, base_url)
}

#[tokio::test]
async fn geocode_reads_string_coordinates() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "Vismarkt 1, Groningen"))
        .and(query_param("limit", "1"))
        .and(query_param("countrycodes", "nl"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "lat": "53.2174", "lon": "6.5642", "display_name": "Vismarkt" }
        ])))
        .mount(&server)
        .await;

    let result = geocoder(&server.uri())
        .geocode("Vismarkt 1, Groningen")
        .await
        .expect("call should succeed");
    assert_eq!(
        result,
        Some(Coordinates {
            latitude: 53.2174,
            longitude: 6.5642
        })
    );
}

#[tokio::test]
async fn geocode_empty_array_is_no_match() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;

    assert_eq!(geocoder(&server.uri()).geocode("nowhere").await.unwrap(), None);
}

#[tokio::test]
async fn geocode_rate_limit_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let err = geocoder(&server.uri()).geocode("Vismarkt 1").await.unwrap_err();
    assert_eq!(
        err.cause,
        ProviderErrorCause::RateLimited {
            retry_after_secs: None
        }
    );
}

#[tokio::test]
async fn geocode_object_instead_of_array_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"error": "bad"})),
        )
        .mount(&server)
        .await;

    let err = geocoder(&server.uri()).geocode("Vismarkt 1").await.unwrap_err();
    assert!(matches!(err.cause, ProviderErrorCause::MalformedResponse(_)));
}
