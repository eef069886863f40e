//! Picks the record set describing "now" out of the flat upstream series.

use std::collections::HashMap;

use crate::model::{CurrentConditions, ForecastEntry};

/// Placeholder for a value the series does not carry.
pub const MISSING: &str = "--";

pub const TEMPERATURE: &str = "TMP";
pub const HUMIDITY: &str = "REH";
pub const WIND_SPEED: &str = "WSD";
pub const RAIN_PROBABILITY: &str = "POP";
pub const SKY: &str = "SKY";
pub const PRECIPITATION: &str = "PTY";

const DEFAULT_SKY: i32 = 1;
const DEFAULT_PRECIPITATION: i32 = 0;

/// Extract the conditions for `now_slot` (`HH00`).
///
/// When no entry matches the slot exactly, the slot of the first entry in the
/// series is used instead, so the result may describe a different hour than
/// the one asked for.
pub fn select_current(entries: &[ForecastEntry], now_slot: &str) -> CurrentConditions {
    let mut slot = slot_values(entries, now_slot);

    if slot.is_empty() {
        if let Some(first) = entries.first() {
            tracing::debug!(
                requested = now_slot,
                fallback = first.time_slot.as_str(),
                "no forecast entries for current hour, using first slot"
            );
            slot = slot_values(entries, &first.time_slot);
        }
    }

    CurrentConditions {
        temperature: text(&slot, TEMPERATURE),
        humidity: text(&slot, HUMIDITY),
        wind_speed: text(&slot, WIND_SPEED),
        rain_probability: text(&slot, RAIN_PROBABILITY),
        sky_code: code(&slot, SKY).unwrap_or(DEFAULT_SKY),
        precipitation_code: code(&slot, PRECIPITATION).unwrap_or(DEFAULT_PRECIPITATION),
    }
}

fn slot_values<'a>(entries: &'a [ForecastEntry], slot: &str) -> HashMap<&'a str, &'a str> {
    entries
        .iter()
        .filter(|e| e.time_slot == slot)
        .map(|e| (e.category.as_str(), e.value.as_str()))
        .collect()
}

fn text(slot: &HashMap<&str, &str>, category: &str) -> String {
    slot.get(category)
        .filter(|v| !v.is_empty())
        .map_or_else(|| MISSING.to_string(), |v| (*v).to_string())
}

fn code(slot: &HashMap<&str, &str>, category: &str) -> Option<i32> {
    slot.get(category).and_then(|v| leading_int(v))
}

/// Parse the leading integer of `raw`, ignoring surrounding whitespace and
/// anything after the digits (`"3.0"` is 3).
fn leading_int(raw: &str) -> Option<i32> {
    let s = raw.trim();
    let digits_start = usize::from(s.starts_with(['-', '+']));
    let digits_len = s[digits_start..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();

    if digits_len == 0 {
        return None;
    }

    s[..digits_start + digits_len].parse().ok()
}
