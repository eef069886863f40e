//! Integration tests for the relay fallback loop using wiremock.
//!
//! Every relay route points at the same mock server under a different path,
//! so each test controls exactly how each route answers.

use forecast_core::{
    ClientSettings, Envelope, FetchError, ForecastClient, ForecastEntry, ForecastSource,
    GridCoordinate, IssueTimeWindow, RouteError, TransportRoute, UrlTemplate,
    fetch::DEFAULT_USER_AGENT,
};
use wiremock::matchers::{header, method, path, path_regex, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ENDPOINT: &str = "https://apis.example.kr/1360000/VilageFcstInfoService_2.0/getVilageFcst";

fn window() -> IssueTimeWindow {
    IssueTimeWindow {
        date: "20261016".into(),
        time: "1400".into(),
    }
}

fn coordinate() -> GridCoordinate {
    GridCoordinate::new(60, 121)
}

/// Four routes shaped like the public relays, all served by `server`.
fn routes(server: &MockServer) -> Vec<TransportRoute> {
    let uri = server.uri();
    vec![
        TransportRoute::new(
            "wrapped",
            UrlTemplate::Query {
                base: format!("{uri}/get"),
                param: "url".into(),
            },
            Envelope::Wrapped,
        ),
        TransportRoute::new(
            "encoded",
            UrlTemplate::EncodedPath {
                prefix: format!("{uri}/fetch/"),
            },
            Envelope::Raw,
        ),
        TransportRoute::new(
            "query",
            UrlTemplate::Query {
                base: format!("{uri}/proxy"),
                param: "quest".into(),
            },
            Envelope::Raw,
        ),
        TransportRoute::new(
            "raw",
            UrlTemplate::RawPath {
                prefix: format!("{uri}/raw/"),
            },
            Envelope::Raw,
        ),
    ]
}

fn client(routes: Vec<TransportRoute>) -> ForecastClient {
    ForecastClient::new(ClientSettings {
        endpoint: ENDPOINT.into(),
        routes,
        ..ClientSettings::default()
    })
    .unwrap()
}

fn forecast_body(code: &str, items: &[(&str, &str, &str)]) -> serde_json::Value {
    let item: Vec<_> = items
        .iter()
        .map(|(slot, category, value)| {
            serde_json::json!({
                "baseDate": "20261016",
                "baseTime": "1400",
                "category": category,
                "fcstDate": "20261016",
                "fcstTime": slot,
                "fcstValue": value,
                "nx": 60,
                "ny": 121
            })
        })
        .collect();

    let message = if code == "00" { "NORMAL_SERVICE" } else { "NO_DATA" };

    serde_json::json!({
        "response": {
            "header": { "resultCode": code, "resultMsg": message },
            "body": { "dataType": "JSON", "items": { "item": item }, "pageNo": 1, "numOfRows": 1000, "totalCount": items.len() }
        }
    })
}

#[tokio::test]
async fn last_route_succeeds_after_three_failures() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/get"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path_regex("^/fetch/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>rate limited</html>"))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/proxy"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body("03", &[])))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path_regex("^/raw/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(forecast_body("00", &[("1500", "TMP", "19"), ("1500", "SKY", "3")])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let items = client(routes(&server))
        .fetch_forecast(coordinate(), &window())
        .await
        .unwrap();

    assert_eq!(
        items,
        vec![
            ForecastEntry::new("1500", "TMP", "19"),
            ForecastEntry::new("1500", "SKY", "3"),
        ]
    );
}

#[tokio::test]
async fn all_routes_failing_is_exhaustion() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/get"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "status": {} })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path_regex("^/fetch/"))
        .respond_with(ResponseTemplate::new(429))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/proxy"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body("03", &[])))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path_regex("^/raw/"))
        .respond_with(ResponseTemplate::new(403))
        .expect(1)
        .mount(&server)
        .await;

    let err = client(routes(&server))
        .fetch_forecast(coordinate(), &window())
        .await
        .unwrap_err();

    let failures = match err {
        FetchError::AllRoutesExhausted { failures } => failures,
        other => panic!("expected exhaustion, got {other}"),
    };

    let names: Vec<_> = failures.iter().map(|f| f.route.as_str()).collect();
    assert_eq!(names, ["wrapped", "encoded", "query", "raw"]);

    assert!(matches!(failures[0].error, RouteError::MissingContents));
    assert!(matches!(failures[1].error, RouteError::Status(s) if s.as_u16() == 429));
    assert!(matches!(
        &failures[2].error,
        RouteError::Rejected { code, message } if code == "03" && message == "NO_DATA"
    ));
    assert!(matches!(failures[3].error, RouteError::Status(s) if s.as_u16() == 403));
}

#[tokio::test]
async fn wrapped_route_is_unwrapped_before_result_check() {
    let server = MockServer::start().await;
    let inner = forecast_body("00", &[("1400", "REH", "70")]).to_string();

    Mock::given(method("GET"))
        .and(path("/get"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "contents": inner,
            "status": { "http_code": 200 }
        })))
        .expect(1)
        .mount(&server)
        .await;

    // Success on the first route must short-circuit the rest.
    Mock::given(method("GET"))
        .and(path_regex("^/(fetch|proxy|raw)"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let items = client(routes(&server))
        .fetch_forecast(coordinate(), &window())
        .await
        .unwrap();

    assert_eq!(items, vec![ForecastEntry::new("1400", "REH", "70")]);
}

#[tokio::test]
async fn malformed_wrapped_contents_moves_to_next_route() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/get"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "contents": "<OpenAPI_ServiceResponse>SERVICE ERROR</OpenAPI_ServiceResponse>"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path_regex("^/fetch/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(forecast_body("00", &[("1400", "POP", "60")])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let items = client(routes(&server))
        .fetch_forecast(coordinate(), &window())
        .await
        .unwrap();

    assert_eq!(items, vec![ForecastEntry::new("1400", "POP", "60")]);
}

#[tokio::test]
async fn request_carries_headers_and_target_url() {
    let server = MockServer::start().await;
    let client = client(routes(&server)[..1].to_vec());
    let target = client.upstream_url(coordinate(), &window());

    let inner = forecast_body("00", &[]).to_string();
    Mock::given(method("GET"))
        .and(path("/get"))
        .and(query_param("url", target.as_str()))
        .and(header("accept", "application/json"))
        .and(header("user-agent", DEFAULT_USER_AGENT))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "contents": inner })))
        .expect(1)
        .mount(&server)
        .await;

    let items = client.fetch_forecast(coordinate(), &window()).await.unwrap();
    assert!(items.is_empty());
}

#[tokio::test]
async fn unreachable_relay_is_transport_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path_regex("^/raw/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(forecast_body("00", &[("1400", "WSD", "1.2")])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut chain = vec![TransportRoute::new(
        "closed",
        UrlTemplate::RawPath {
            prefix: "http://127.0.0.1:1/".into(),
        },
        Envelope::Raw,
    )];
    chain.extend(routes(&server).pop());

    let items = client(chain)
        .fetch_forecast(coordinate(), &window())
        .await
        .unwrap();

    assert_eq!(items, vec![ForecastEntry::new("1400", "WSD", "1.2")]);
}

#[tokio::test]
async fn empty_route_list_is_exhaustion() {
    let err = client(Vec::new())
        .fetch_forecast(coordinate(), &window())
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::AllRoutesExhausted { ref failures } if failures.is_empty()));
}
