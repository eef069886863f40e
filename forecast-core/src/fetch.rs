use async_trait::async_trait;
use reqwest::{Client, header::ACCEPT};
use std::{fmt::Debug, time::Duration};
use url::Url;

use crate::{
    city::GridCoordinate,
    error::{FetchError, RouteError, RouteFailure},
    model::{ForecastEntry, ForecastPayload, RESULT_OK, WrappedBody},
    route::{Envelope, TransportRoute, default_routes},
    window::IssueTimeWindow,
};

/// Village forecast endpoint of the public weather data portal.
pub const DEFAULT_ENDPOINT: &str =
    "https://apis.data.go.kr/1360000/VilageFcstInfoService_2.0/getVilageFcst";

/// Public demo key the page ships with.
pub const DEFAULT_SERVICE_KEY: &str =
    "0b6852c6797d0449bb3c040bba521b9825c6361c3b80afea0d1060ab45ae9381";

pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

const PAGE_NO: &str = "1";
const NUM_OF_ROWS: &str = "1000";
const DATA_TYPE: &str = "JSON";

#[async_trait]
pub trait ForecastSource: Send + Sync + Debug {
    async fn fetch_forecast(
        &self,
        coordinate: GridCoordinate,
        window: &IssueTimeWindow,
    ) -> Result<Vec<ForecastEntry>, FetchError>;
}

/// Everything needed to build a [`ForecastClient`].
#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub endpoint: String,
    pub service_key: String,
    pub user_agent: String,
    /// `None` leaves the transport's own behavior in place.
    pub timeout: Option<Duration>,
    pub routes: Vec<TransportRoute>,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            service_key: DEFAULT_SERVICE_KEY.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: None,
            routes: default_routes(),
        }
    }
}

/// Fetches the forecast series by trying each relay route in order.
#[derive(Debug, Clone)]
pub struct ForecastClient {
    http: Client,
    endpoint: Url,
    service_key: String,
    routes: Vec<TransportRoute>,
}

impl ForecastClient {
    pub fn new(settings: ClientSettings) -> Result<Self, FetchError> {
        let endpoint = Url::parse(&settings.endpoint)?;

        let mut builder = Client::builder().user_agent(settings.user_agent);
        if let Some(timeout) = settings.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            endpoint,
            service_key: settings.service_key,
            routes: settings.routes,
        })
    }

    /// Canonical upstream request URL for one grid cell and issue window.
    pub fn upstream_url(&self, coordinate: GridCoordinate, window: &IssueTimeWindow) -> Url {
        let nx = coordinate.x.to_string();
        let ny = coordinate.y.to_string();

        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("serviceKey", &self.service_key)
            .append_pair("pageNo", PAGE_NO)
            .append_pair("numOfRows", NUM_OF_ROWS)
            .append_pair("dataType", DATA_TYPE)
            .append_pair("base_date", &window.date)
            .append_pair("base_time", &window.time)
            .append_pair("nx", &nx)
            .append_pair("ny", &ny);
        url
    }

    async fn attempt(
        &self,
        route: &TransportRoute,
        target: &Url,
    ) -> Result<Vec<ForecastEntry>, RouteError> {
        let url = route.request_url(target)?;

        let res = self
            .http
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            return Err(RouteError::Status(status));
        }

        let body = res.text().await?;
        tracing::debug!(route = %route.name, bytes = body.len(), "relay response received");

        let payload = match route.envelope {
            Envelope::Raw => body,
            Envelope::Wrapped => {
                let wrapped: WrappedBody = serde_json::from_str(&body)?;
                wrapped.contents.ok_or(RouteError::MissingContents)?
            }
        };

        let parsed: ForecastPayload = serde_json::from_str(&payload)?;
        into_items(parsed)
    }
}

#[async_trait]
impl ForecastSource for ForecastClient {
    async fn fetch_forecast(
        &self,
        coordinate: GridCoordinate,
        window: &IssueTimeWindow,
    ) -> Result<Vec<ForecastEntry>, FetchError> {
        let target = self.upstream_url(coordinate, window);
        let total = self.routes.len();
        let mut failures = Vec::with_capacity(total);

        for (i, route) in self.routes.iter().enumerate() {
            tracing::info!(route = %route.name, "trying route {}/{}", i + 1, total);

            match self.attempt(route, &target).await {
                Ok(items) => {
                    tracing::info!(route = %route.name, items = items.len(), "forecast received");
                    return Ok(items);
                }
                Err(error) => {
                    tracing::warn!(route = %route.name, "route {}/{} failed: {error}", i + 1, total);
                    failures.push(RouteFailure {
                        route: route.name.clone(),
                        error,
                    });
                }
            }
        }

        Err(FetchError::AllRoutesExhausted { failures })
    }
}

fn into_items(payload: ForecastPayload) -> Result<Vec<ForecastEntry>, RouteError> {
    let response = payload.response.ok_or_else(|| rejected(None, None))?;
    let header = response.header.ok_or_else(|| rejected(None, None))?;

    if header.result_code.as_deref() != Some(RESULT_OK) {
        return Err(rejected(header.result_code, header.result_msg));
    }

    response
        .body
        .and_then(|b| b.items)
        .and_then(|i| i.item)
        .ok_or(RouteError::MissingItems)
}

fn rejected(code: Option<String>, message: Option<String>) -> RouteError {
    RouteError::Rejected {
        code: code.unwrap_or_else(|| "missing".to_string()),
        message: message.unwrap_or_else(|| "Unknown error".to_string()),
    }
}
