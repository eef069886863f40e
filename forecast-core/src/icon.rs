use serde::Serialize;

/// Condition shown in the icon and status slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    Clear,
    PartlyCloudy,
    Overcast,
    Rain,
    Sleet,
    Snow,
}

impl Condition {
    /// Precipitation wins over sky state. A precipitation code outside the
    /// known set falls through to the sky code.
    pub fn from_codes(sky_code: i32, precipitation_code: i32) -> Self {
        match precipitation_code {
            1 | 4 => return Condition::Rain,
            2 => return Condition::Sleet,
            3 => return Condition::Snow,
            _ => {}
        }

        match sky_code {
            1 => Condition::Clear,
            3 => Condition::PartlyCloudy,
            _ => Condition::Overcast,
        }
    }

    pub fn icon_class(&self) -> &'static str {
        match self {
            Condition::Clear => "fas fa-sun weather-sunny",
            Condition::PartlyCloudy => "fas fa-cloud-sun weather-cloudy",
            Condition::Overcast => "fas fa-cloud weather-cloudy",
            Condition::Rain | Condition::Sleet => "fas fa-cloud-rain weather-rainy",
            Condition::Snow => "fas fa-snowflake weather-snowy",
        }
    }

    pub fn status_label(&self) -> &'static str {
        match self {
            Condition::Clear => "맑음",
            Condition::PartlyCloudy => "구름많음",
            Condition::Overcast => "흐림",
            Condition::Rain => "비",
            Condition::Sleet => "진눈깨비",
            Condition::Snow => "눈",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WeatherIcon {
    pub icon_class: &'static str,
    pub status_label: &'static str,
}

pub fn map_icon(sky_code: i32, precipitation_code: i32) -> WeatherIcon {
    let condition = Condition::from_codes(sky_code, precipitation_code);
    WeatherIcon {
        icon_class: condition.icon_class(),
        status_label: condition.status_label(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_sky_without_precipitation() {
        let icon = map_icon(1, 0);
        assert_eq!(icon.status_label, "맑음");
        assert_eq!(icon.icon_class, "fas fa-sun weather-sunny");
    }

    #[test]
    fn precipitation_overrides_sky() {
        assert_eq!(Condition::from_codes(3, 3), Condition::Snow);
        assert_eq!(Condition::from_codes(1, 1), Condition::Rain);
        assert_eq!(Condition::from_codes(1, 4), Condition::Rain);
        assert_eq!(Condition::from_codes(1, 2), Condition::Sleet);
    }

    #[test]
    fn sky_codes() {
        assert_eq!(Condition::from_codes(3, 0), Condition::PartlyCloudy);
        assert_eq!(Condition::from_codes(4, 0), Condition::Overcast);
        assert_eq!(Condition::from_codes(9, 0), Condition::Overcast);
    }

    #[test]
    fn unknown_precipitation_falls_through_to_sky() {
        assert_eq!(Condition::from_codes(1, 7), Condition::Clear);
    }

    #[test]
    fn sleet_shares_rain_icon() {
        let icon = map_icon(1, 2);
        assert_eq!(icon.icon_class, Condition::Rain.icon_class());
        assert_eq!(icon.status_label, "진눈깨비");
    }
}
