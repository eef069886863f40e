use serde::{Deserialize, Serialize};

/// Result code the forecast service uses for a normal response.
pub const RESULT_OK: &str = "00";

/// One (time slot, category, value) triple of the upstream series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastEntry {
    #[serde(rename = "fcstTime")]
    pub time_slot: String,
    pub category: String,
    #[serde(rename = "fcstValue")]
    pub value: String,
}

impl ForecastEntry {
    pub fn new(
        time_slot: impl Into<String>,
        category: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            time_slot: time_slot.into(),
            category: category.into(),
            value: value.into(),
        }
    }
}

/// Fields picked out of the series for the slot being displayed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrentConditions {
    pub temperature: String,
    pub humidity: String,
    pub wind_speed: String,
    pub rain_probability: String,
    pub sky_code: i32,
    pub precipitation_code: i32,
}

impl CurrentConditions {
    /// Stand-in values shown when no route could deliver a forecast.
    pub fn demo() -> Self {
        Self {
            temperature: "22".to_string(),
            humidity: "65".to_string(),
            wind_speed: "2.1".to_string(),
            rain_probability: "20".to_string(),
            sky_code: 1,
            precipitation_code: 0,
        }
    }
}

// Upstream wire shape:
// { response: { header: { resultCode, resultMsg }, body: { items: { item: [...] } } } }
// Every level is optional so a malformed payload surfaces as a route failure
// rather than a parse error.

#[derive(Debug, Deserialize)]
pub(crate) struct ForecastPayload {
    pub response: Option<PayloadResponse>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PayloadResponse {
    pub header: Option<PayloadHeader>,
    pub body: Option<PayloadBody>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PayloadHeader {
    pub result_code: Option<String>,
    pub result_msg: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PayloadBody {
    pub items: Option<PayloadItems>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PayloadItems {
    pub item: Option<Vec<ForecastEntry>>,
}

/// Relay envelope that carries the upstream body as a JSON string.
#[derive(Debug, Deserialize)]
pub(crate) struct WrappedBody {
    pub contents: Option<String>,
}
