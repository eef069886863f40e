//! What the display surface shows.

use serde::Serialize;

use crate::{
    city::City,
    icon::{WeatherIcon, map_icon},
    model::CurrentConditions,
};

/// Shown next to the report when it carries demo values.
pub const DEMO_NOTICE: &str = "현재 프록시 서비스 불안정으로 데모 데이터가 표시됩니다.";

/// The forecast service has no visibility field; the slot shows a constant.
pub const VISIBILITY: &str = "10km";

/// Filled display slots for one city.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub city: String,
    pub timestamp: String,
    pub temperature: String,
    pub humidity: String,
    pub wind_speed: String,
    pub rain_probability: String,
    pub visibility: String,
    pub icon_class: String,
    pub status_label: String,
    /// Set when no route delivered a forecast and demo values are shown.
    pub demo: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

impl Report {
    pub fn new(city: City, timestamp: String, conditions: &CurrentConditions, demo: bool) -> Self {
        let WeatherIcon {
            icon_class,
            status_label,
        } = map_icon(conditions.sky_code, conditions.precipitation_code);

        Self {
            city: city.name().to_string(),
            timestamp,
            temperature: conditions.temperature.clone(),
            humidity: format!("{}%", conditions.humidity),
            wind_speed: format!("{}m/s", conditions.wind_speed),
            rain_probability: format!("{}%", conditions.rain_probability),
            visibility: VISIBILITY.to_string(),
            icon_class: icon_class.to_string(),
            status_label: status_label.to_string(),
            demo,
            notice: demo.then(|| DEMO_NOTICE.to_string()),
        }
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }
}

/// Which part of the surface is visible. Loading, content and error are
/// mutually exclusive; `Idle` is the state before the first request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ViewState {
    #[default]
    Idle,
    Loading,
    Content(Report),
    Error(String),
}

impl ViewState {
    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }

    pub fn report(&self) -> Option<&Report> {
        match self {
            ViewState::Content(report) => Some(report),
            _ => None,
        }
    }
}
