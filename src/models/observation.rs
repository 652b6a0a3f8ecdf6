use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::utils::constants::{
    AIR_TEMP_BOUNDS, PRESSURE_BOUNDS, RAINFALL_BOUNDS, REL_HUMIDITY_BOUNDS,
    SOLAR_RADIATION_BOUNDS, WIND_SPEED_BOUNDS,
};

/// One row of the station file as delivered.
///
/// Channel cells that are empty or not numeric deserialize as `None`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawObservation {
    #[serde(rename = "Year")]
    pub year: i32,
    #[serde(rename = "DOY")]
    pub day_of_year: u32,
    /// Time of day as HHMM without separator, e.g. 115 for 01:15
    #[serde(rename = "Time")]
    pub time: u32,
    #[serde(rename = "AirTemp", deserialize_with = "csv::invalid_option")]
    pub air_temp: Option<f64>,
    #[serde(rename = "RelHumid", deserialize_with = "csv::invalid_option")]
    pub rel_humidity: Option<f64>,
    #[serde(rename = "SolRad", deserialize_with = "csv::invalid_option")]
    pub solar_radiation: Option<f64>,
    #[serde(rename = "WS_2m", deserialize_with = "csv::invalid_option")]
    pub wind_speed: Option<f64>,
    #[serde(rename = "BP", deserialize_with = "csv::invalid_option")]
    pub pressure: Option<f64>,
    #[serde(rename = "Rainfall_Tot", deserialize_with = "csv::invalid_option")]
    pub rainfall: Option<f64>,
}

/// A sub-hourly reading indexed by its reconstructed timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub timestamp: NaiveDateTime,
    pub year: i32,
    pub day_of_year: u32,
    pub air_temp: Option<f64>,
    pub rel_humidity: Option<f64>,
    pub solar_radiation: Option<f64>,
    pub wind_speed: Option<f64>,
    pub pressure: Option<f64>,
    pub rainfall: Option<f64>,
}

impl Observation {
    pub fn from_raw(raw: &RawObservation, timestamp: NaiveDateTime) -> Self {
        Self {
            timestamp,
            year: raw.year,
            day_of_year: raw.day_of_year,
            air_temp: raw.air_temp,
            rel_humidity: raw.rel_humidity,
            solar_radiation: raw.solar_radiation,
            wind_speed: raw.wind_speed,
            pressure: raw.pressure,
            rainfall: raw.rainfall,
        }
    }

    pub fn value(&self, channel: Channel) -> Option<f64> {
        match channel {
            Channel::AirTemp => self.air_temp,
            Channel::RelHumidity => self.rel_humidity,
            Channel::SolarRadiation => self.solar_radiation,
            Channel::WindSpeed => self.wind_speed,
            Channel::Pressure => self.pressure,
            Channel::Rainfall => self.rainfall,
        }
    }

    pub fn set_value(&mut self, channel: Channel, value: Option<f64>) {
        let slot = match channel {
            Channel::AirTemp => &mut self.air_temp,
            Channel::RelHumidity => &mut self.rel_humidity,
            Channel::SolarRadiation => &mut self.solar_radiation,
            Channel::WindSpeed => &mut self.wind_speed,
            Channel::Pressure => &mut self.pressure,
            Channel::Rainfall => &mut self.rainfall,
        };
        *slot = value;
    }
}

/// How gaps in a channel are filled after the plausibility check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillPolicy {
    Interpolate,
    ZeroFill,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Channel {
    AirTemp,
    RelHumidity,
    SolarRadiation,
    WindSpeed,
    Pressure,
    Rainfall,
}

impl Channel {
    pub const ALL: [Channel; 6] = [
        Channel::AirTemp,
        Channel::RelHumidity,
        Channel::SolarRadiation,
        Channel::WindSpeed,
        Channel::Pressure,
        Channel::Rainfall,
    ];

    /// Open interval of physically plausible values.
    pub fn bounds(&self) -> (f64, f64) {
        match self {
            Channel::AirTemp => AIR_TEMP_BOUNDS,
            Channel::RelHumidity => REL_HUMIDITY_BOUNDS,
            Channel::SolarRadiation => SOLAR_RADIATION_BOUNDS,
            Channel::WindSpeed => WIND_SPEED_BOUNDS,
            Channel::Pressure => PRESSURE_BOUNDS,
            Channel::Rainfall => RAINFALL_BOUNDS,
        }
    }

    pub fn is_plausible(&self, value: f64) -> bool {
        let (low, high) = self.bounds();
        value > low && value < high
    }

    pub fn fill_policy(&self) -> FillPolicy {
        match self {
            Channel::Rainfall => FillPolicy::ZeroFill,
            _ => FillPolicy::Interpolate,
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Channel::AirTemp => "°C",
            Channel::RelHumidity => "%",
            Channel::SolarRadiation => "W/m²",
            Channel::WindSpeed => "m/s",
            Channel::Pressure => "kPa",
            Channel::Rainfall => "mm",
        }
    }

    /// Column name in the station file.
    pub fn column(&self) -> &'static str {
        match self {
            Channel::AirTemp => "AirTemp",
            Channel::RelHumidity => "RelHumid",
            Channel::SolarRadiation => "SolRad",
            Channel::WindSpeed => "WS_2m",
            Channel::Pressure => "BP",
            Channel::Rainfall => "Rainfall_Tot",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Channel::AirTemp => "air temperature",
            Channel::RelHumidity => "relative humidity",
            Channel::SolarRadiation => "solar radiation",
            Channel::WindSpeed => "wind speed",
            Channel::Pressure => "barometric pressure",
            Channel::Rainfall => "rainfall",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample() -> Observation {
        let timestamp = NaiveDate::from_yo_opt(2018, 120)
            .unwrap()
            .and_hms_opt(1, 15, 0)
            .unwrap();
        Observation {
            timestamp,
            year: 2018,
            day_of_year: 120,
            air_temp: Some(12.5),
            rel_humidity: Some(55.0),
            solar_radiation: None,
            wind_speed: Some(3.2),
            pressure: Some(90.1),
            rainfall: Some(0.0),
        }
    }

    #[test]
    fn test_air_temp_bounds_are_exclusive() {
        assert!(!Channel::AirTemp.is_plausible(45.0));
        assert!(Channel::AirTemp.is_plausible(44.9));
        assert!(!Channel::AirTemp.is_plausible(-30.0));
        assert!(Channel::AirTemp.is_plausible(-29.9));
    }

    #[test]
    fn test_all_channel_bounds() {
        for channel in Channel::ALL {
            let (low, high) = channel.bounds();
            assert!(!channel.is_plausible(low), "{} lower bound", channel);
            assert!(!channel.is_plausible(high), "{} upper bound", channel);
            assert!(channel.is_plausible((low + high) / 2.0));
        }
        assert!(!Channel::Rainfall.is_plausible(0.0));
        assert!(!Channel::RelHumidity.is_plausible(100.0));
    }

    #[test]
    fn test_fill_policy() {
        assert_eq!(Channel::Rainfall.fill_policy(), FillPolicy::ZeroFill);
        assert_eq!(Channel::WindSpeed.fill_policy(), FillPolicy::Interpolate);
    }

    #[test]
    fn test_value_accessors() {
        let mut obs = sample();
        assert_eq!(obs.value(Channel::AirTemp), Some(12.5));
        assert_eq!(obs.value(Channel::SolarRadiation), None);

        obs.set_value(Channel::SolarRadiation, Some(410.0));
        assert_eq!(obs.solar_radiation, Some(410.0));
    }

    #[test]
    fn test_raw_observation_from_csv() {
        let data = "Year,DOY,Time,AirTemp,RelHumid,SolRad,WS_2m,BP,Rainfall_Tot\n\
                    2018,120,115,12.5,55,,3.2,err,0\n";
        let mut reader = csv::Reader::from_reader(data.as_bytes());
        let rows: Vec<RawObservation> = reader
            .deserialize()
            .collect::<std::result::Result<_, _>>()
            .unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].time, 115);
        assert_eq!(rows[0].air_temp, Some(12.5));
        assert_eq!(rows[0].solar_radiation, None);
        assert_eq!(rows[0].pressure, None);
    }
}
