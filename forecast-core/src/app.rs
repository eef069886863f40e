//! Request pipeline: city → issue window → fetch → select → report.

use chrono::NaiveDateTime;
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;
use tokio::sync::watch;

use crate::{
    city::City,
    fetch::ForecastSource,
    model::CurrentConditions,
    select::select_current,
    view::{Report, ViewState},
    window::{display_time, hour_slot, resolve},
};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum AppError {
    #[error("a forecast request is already in flight")]
    Busy,
}

/// Drives one forecast request at a time and publishes the display state.
#[derive(Debug)]
pub struct WeatherApp {
    source: Box<dyn ForecastSource>,
    view: watch::Sender<ViewState>,
    in_flight: AtomicBool,
}

impl WeatherApp {
    pub fn new(source: Box<dyn ForecastSource>) -> Self {
        let (view, _) = watch::channel(ViewState::Idle);
        Self {
            source,
            view,
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.view.subscribe()
    }

    pub fn state(&self) -> ViewState {
        self.view.borrow().clone()
    }

    /// Show an error in place of any report, e.g. for an unknown city.
    pub fn show_error(&self, message: impl Into<String>) {
        self.view.send_replace(ViewState::Error(message.into()));
    }

    /// Fetch and display the forecast for `city` as of local time `now`.
    ///
    /// A failure of every route is not an error: the demo report is shown
    /// instead. Only an overlapping request is refused.
    pub async fn request(&self, city: City, now: NaiveDateTime) -> Result<Report, AppError> {
        let _guard = InFlight::acquire(&self.in_flight).ok_or(AppError::Busy)?;

        self.view.send_replace(ViewState::Loading);

        let window = resolve(now);
        let timestamp = display_time(now);
        tracing::info!(
            city = city.slug(),
            base_date = %window.date,
            base_time = %window.time,
            "requesting forecast"
        );

        let report = match self.source.fetch_forecast(city.grid(), &window).await {
            Ok(entries) => {
                let current = select_current(&entries, &hour_slot(now));
                Report::new(city, timestamp, &current, false)
            }
            Err(err) => {
                tracing::error!(city = city.slug(), "{err}; showing demo data");
                for failure in err.route_failures() {
                    tracing::debug!(route = %failure.route, "{}", failure.error);
                }
                Report::new(city, timestamp, &CurrentConditions::demo(), true)
            }
        };

        self.view.send_replace(ViewState::Content(report.clone()));
        Ok(report)
    }
}

/// Holds the in-flight flag until dropped.
struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}
