//! Terminal rendering of the display state.

use anyhow::{Context, Result};
use forecast_core::{City, Report, ViewState};

pub fn loading(city: City) {
    eprintln!("{} 날씨 정보를 불러오는 중...", city.name());
}

pub fn text(state: &ViewState) {
    match state {
        ViewState::Idle | ViewState::Loading => {}
        ViewState::Content(report) => print!("{}", format_report(report)),
        ViewState::Error(message) => eprintln!("오류: {message}"),
    }
}

pub fn json(state: &ViewState) -> Result<()> {
    if let Some(out) = format_json(state)? {
        println!("{out}");
    }
    Ok(())
}

fn format_json(state: &ViewState) -> Result<Option<String>> {
    match state {
        ViewState::Content(report) => serde_json::to_string_pretty(report)
            .map(Some)
            .context("Failed to serialize report to JSON"),
        ViewState::Error(message) => Err(anyhow::anyhow!("{message}")),
        ViewState::Idle | ViewState::Loading => Ok(None),
    }
}

fn format_report(report: &Report) -> String {
    let mut out = format!(
        "{city}\n{time}\n\n  {status}  [{icon}]\n\n  기온      {temp}°C\n  습도      {hum}\n  풍속      {wind}\n  강수확률  {rain}\n  가시거리  {vis}\n",
        city = report.city,
        time = report.timestamp,
        status = report.status_label,
        icon = report.icon_class,
        temp = report.temperature,
        hum = report.humidity,
        wind = report.wind_speed,
        rain = report.rain_probability,
        vis = report.visibility,
    );

    if let Some(notice) = report.notice() {
        out.push_str(&format!("\n  ⓘ {notice}\n"));
    }
    out
}
