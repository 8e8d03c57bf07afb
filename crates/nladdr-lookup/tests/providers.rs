//! Integration tests for the postcode-lookup adapters using wiremock HTTP mocks.

use std::time::Duration;

use nladdr_core::{HouseNumber, Postcode};
use nladdr_lookup::{
    build_http_client, AddressProvider, NominatimProvider, OpenPostcodeProvider,
    PostcodeTechProvider, ProviderErrorCause,
};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client() -> reqwest::Client {
    build_http_client(5, "nladdr-test/0.1").expect("client construction should not fail")
}

fn input(postcode: &str, number: &str) -> (Postcode, HouseNumber) {
    (
        Postcode::parse(postcode).expect("valid postcode"),
        HouseNumber::parse(number).expect("valid house number"),
    )
}

// ---------------------------------------------------------------------------
// postcode_tech
// ---------------------------------------------------------------------------

#[tokio::test]
async fn postcode_tech_maps_english_fields() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/postcode/full"))
        .and(query_param("postcode", "9711AC"))
        .and(query_param("number", "10"))
        .and(header("authorization", "Bearer test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "street": "Oude Boteringestraat",
            "number": 10,
            "postcode": "9711 AC",
            "city": "Groningen",
            "municipality": "Groningen",
            "province": "Groningen",
            "geo": { "lat": 53.2195, "lon": 6.5634 }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = PostcodeTechProvider::new(client(), &server.uri(), Some("test-key".into()));
    let (pc, hn) = input("9711 ac", "10");
    let address = provider
        .resolve(&pc, &hn)
        .await
        .expect("call should succeed")
        .expect("address should resolve");

    assert_eq!(address.street, "Oude Boteringestraat");
    assert_eq!(address.house_number, "10");
    assert_eq!(address.postcode, "9711 AC");
    assert_eq!(address.city, "Groningen");
    assert_eq!(address.province.as_deref(), Some("Groningen"));
    assert_eq!(address.coordinates(), Some((53.2195, 6.5634)));
    assert_eq!(address.source, "postcode_tech");
    assert_eq!(
        address.full_address(),
        "Oude Boteringestraat 10, 9711 AC Groningen"
    );
}

#[tokio::test]
async fn postcode_tech_without_key_makes_no_request() {
    let server = MockServer::start().await;
    let provider = PostcodeTechProvider::new(client(), &server.uri(), None);
    let (pc, hn) = input("9711AC", "10");

    let err = provider.resolve(&pc, &hn).await.unwrap_err();
    assert!(matches!(err.cause, ProviderErrorCause::NotConfigured(_)));
    let received = server.received_requests().await.unwrap();
    assert!(received.is_empty(), "expected no HTTP requests");
}

#[tokio::test]
async fn postcode_tech_404_is_no_match() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/postcode/full"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let provider = PostcodeTechProvider::new(client(), &server.uri(), Some("k".into()));
    let (pc, hn) = input("1234AB", "1");
    assert_eq!(provider.resolve(&pc, &hn).await.unwrap(), None);
}

#[tokio::test]
async fn postcode_tech_401_is_auth_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let provider = PostcodeTechProvider::new(client(), &server.uri(), Some("bad".into()));
    let (pc, hn) = input("1234AB", "1");
    let err = provider.resolve(&pc, &hn).await.unwrap_err();
    assert_eq!(err.provider, "postcode_tech");
    assert_eq!(err.cause, ProviderErrorCause::Auth { status: 401 });
}

#[tokio::test]
async fn postcode_tech_429_carries_retry_after() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "30"))
        .mount(&server)
        .await;

    let provider = PostcodeTechProvider::new(client(), &server.uri(), Some("k".into()));
    let (pc, hn) = input("1234AB", "1");
    let err = provider.resolve(&pc, &hn).await.unwrap_err();
    assert_eq!(
        err.cause,
        ProviderErrorCause::RateLimited {
            retry_after_secs: Some(30)
        }
    );
}

// ---------------------------------------------------------------------------
// openpostcode
// ---------------------------------------------------------------------------

#[tokio::test]
async fn openpostcode_maps_dutch_fields_and_keeps_zero_addition() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/1012AB/5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "straatnaam": "Damrak",
            "huisnummer": "5",
            "toevoeging": "0",
            "postcode": "1012AB",
            "plaats": "Amsterdam",
            "gemeente": "Amsterdam",
            "provincie": "Noord-Holland",
            "latitude": "52.3760",
            "lng": "4.8970",
            "id": "0363200000123456"
        })))
        .mount(&server)
        .await;

    let provider = OpenPostcodeProvider::new(client(), &server.uri());
    let (pc, hn) = input("1012ab", "5");
    let address = provider.resolve(&pc, &hn).await.unwrap().unwrap();

    assert_eq!(address.street, "Damrak");
    assert_eq!(address.house_number_addition.as_deref(), Some("0"));
    assert_eq!(address.postcode, "1012 AB");
    assert_eq!(address.city, "Amsterdam");
    assert_eq!(address.municipality.as_deref(), Some("Amsterdam"));
    assert_eq!(address.latitude, Some(52.376));
    assert_eq!(address.longitude, Some(4.897));
    assert_eq!(address.provider_id.as_deref(), Some("0363200000123456"));
}

#[tokio::test]
async fn openpostcode_empty_object_is_no_match() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/1234AB/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .mount(&server)
        .await;

    let provider = OpenPostcodeProvider::new(client(), &server.uri());
    let (pc, hn) = input("1234AB", "1");
    assert_eq!(provider.resolve(&pc, &hn).await.unwrap(), None);
}

#[tokio::test]
async fn openpostcode_404_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let provider = OpenPostcodeProvider::new(client(), &server.uri());
    let (pc, hn) = input("1234AB", "1");
    let err = provider.resolve(&pc, &hn).await.unwrap_err();
    assert_eq!(err.cause, ProviderErrorCause::NotFound);
}

#[tokio::test]
async fn openpostcode_malformed_json_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let provider = OpenPostcodeProvider::new(client(), &server.uri());
    let (pc, hn) = input("1234AB", "1");
    let err = provider.resolve(&pc, &hn).await.unwrap_err();
    assert!(matches!(err.cause, ProviderErrorCause::MalformedResponse(_)));
}

#[tokio::test]
async fn openpostcode_server_error_is_upstream() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let provider = OpenPostcodeProvider::new(client(), &server.uri());
    let (pc, hn) = input("1234AB", "1");
    let err = provider.resolve(&pc, &hn).await.unwrap_err();
    assert_eq!(err.cause, ProviderErrorCause::Upstream { status: 503 });
}

#[tokio::test]
async fn slow_provider_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({}))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let client = build_http_client(1, "nladdr-test/0.1").unwrap();
    let provider = OpenPostcodeProvider::new(client, &server.uri());
    let (pc, hn) = input("1234AB", "1");
    let err = provider.resolve(&pc, &hn).await.unwrap_err();
    assert_eq!(err.cause, ProviderErrorCause::Timeout);
}

// ---------------------------------------------------------------------------
// nominatim
// ---------------------------------------------------------------------------

#[tokio::test]
async fn nominatim_takes_first_candidate_and_nested_address() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "10, 9711 AC"))
        .and(query_param("countrycodes", "nl"))
        .and(query_param("addressdetails", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {
                "place_id": 123,
                "lat": "53.2195",
                "lon": "6.5634",
                "address": {
                    "road": "Oude Boteringestraat",
                    "house_number": "10",
                    "postcode": "9711 AC",
                    "city": "Groningen",
                    "state": "Groningen"
                }
            },
            {
                "place_id": 456,
                "lat": "0",
                "lon": "0",
                "address": { "road": "Elsewhere", "town": "Nowhere" }
            }
        ])))
        .mount(&server)
        .await;

    let provider = NominatimProvider::new(client(), &server.uri());
    let (pc, hn) = input("9711AC", "10");
    let address = provider.resolve(&pc, &hn).await.unwrap().unwrap();

    assert_eq!(address.street, "Oude Boteringestraat");
    assert_eq!(address.city, "Groningen");
    assert_eq!(address.province.as_deref(), Some("Groningen"));
    assert_eq!(address.provider_id.as_deref(), Some("123"));
    assert_eq!(address.coordinates(), Some((53.2195, 6.5634)));
    assert_eq!(address.source, "nominatim");
}

#[tokio::test]
async fn nominatim_village_counts_as_city() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "lat": "52.7", "lon": "6.85", "address": { "road": "Kanaal A", "village": "Nieuw-Amsterdam" } }
        ])))
        .mount(&server)
        .await;

    let provider = NominatimProvider::new(client(), &server.uri());
    let (pc, hn) = input("7833AA", "3");
    let address = provider.resolve(&pc, &hn).await.unwrap().unwrap();
    assert_eq!(address.city, "Nieuw-Amsterdam");
    assert_eq!(address.house_number, "3");
    assert_eq!(address.postcode, "7833 AA");
}

#[tokio::test]
async fn nominatim_empty_array_is_no_match() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;

    let provider = NominatimProvider::new(client(), &server.uri());
    let (pc, hn) = input("1234AB", "1");
    assert_eq!(provider.resolve(&pc, &hn).await.unwrap(), None);
}

#[tokio::test]
async fn invalid_base_url_is_not_configured() {
    let provider = NominatimProvider::new(client(), "::not a url::");
    let (pc, hn) = input("1234AB", "1");
    let err = provider.resolve(&pc, &hn).await.unwrap_err();
    assert!(err.cause.is_configuration());
}
