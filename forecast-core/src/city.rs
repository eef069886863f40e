use serde::{Deserialize, Serialize};
use std::{convert::TryFrom, fmt};

/// Forecast grid cell index used by the short-term forecast service.
///
/// This is the provider's own spatial grid, not latitude/longitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridCoordinate {
    pub x: u16,
    pub y: u16,
}

impl GridCoordinate {
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for GridCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "nx={} ny={}", self.x, self.y)
    }
}

/// The cities of Gyeonggi-do the client knows grid cells for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum City {
    Ansan,
    Suwon,
    Seongnam,
    Goyang,
    Yongin,
    Bucheon,
    Anyang,
    Namyangju,
    Hwaseong,
    Pyeongtaek,
}

impl City {
    /// Display name, as shown in the city slot.
    pub fn name(&self) -> &'static str {
        match self {
            City::Ansan => "안산시",
            City::Suwon => "수원시",
            City::Seongnam => "성남시",
            City::Goyang => "고양시",
            City::Yongin => "용인시",
            City::Bucheon => "부천시",
            City::Anyang => "안양시",
            City::Namyangju => "남양주시",
            City::Hwaseong => "화성시",
            City::Pyeongtaek => "평택시",
        }
    }

    /// ASCII alias accepted on the command line.
    pub fn slug(&self) -> &'static str {
        match self {
            City::Ansan => "ansan",
            City::Suwon => "suwon",
            City::Seongnam => "seongnam",
            City::Goyang => "goyang",
            City::Yongin => "yongin",
            City::Bucheon => "bucheon",
            City::Anyang => "anyang",
            City::Namyangju => "namyangju",
            City::Hwaseong => "hwaseong",
            City::Pyeongtaek => "pyeongtaek",
        }
    }

    pub const fn grid(&self) -> GridCoordinate {
        match self {
            City::Ansan => GridCoordinate::new(58, 121),
            City::Suwon => GridCoordinate::new(60, 121),
            City::Seongnam => GridCoordinate::new(62, 123),
            City::Goyang => GridCoordinate::new(57, 128),
            City::Yongin => GridCoordinate::new(64, 119),
            City::Bucheon => GridCoordinate::new(56, 125),
            City::Anyang => GridCoordinate::new(59, 123),
            City::Namyangju => GridCoordinate::new(64, 128),
            City::Hwaseong => GridCoordinate::new(57, 119),
            City::Pyeongtaek => GridCoordinate::new(62, 114),
        }
    }

    pub const fn all() -> &'static [City] {
        &[
            City::Ansan,
            City::Suwon,
            City::Seongnam,
            City::Goyang,
            City::Yongin,
            City::Bucheon,
            City::Anyang,
            City::Namyangju,
            City::Hwaseong,
            City::Pyeongtaek,
        ]
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<&str> for City {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let trimmed = value.trim();
        let lower = trimmed.to_lowercase();

        City::all()
            .iter()
            .copied()
            .find(|city| {
                let name = city.name();
                trimmed == name
                    || name.strip_suffix('시') == Some(trimmed)
                    || lower == city.slug()
            })
            .ok_or_else(|| {
                let supported: Vec<_> = City::all().iter().map(|c| c.slug()).collect();
                anyhow::anyhow!(
                    "Unknown city '{value}'. Supported cities: {}.",
                    supported.join(", ")
                )
            })
    }
}
