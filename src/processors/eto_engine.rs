//! FAO-56 Penman-Monteith reference evapotranspiration.
//!
//! All angles are radians. Coefficients are the literal FAO-56 values; note
//! that the slope of the vapour pressure curve uses 0.6106 while saturation
//! vapour pressure uses 0.6108.

use crate::models::{DailyAggregate, DailyRecord, EtoTerms, SiteConfig};
use crate::utils::constants::{
    ALBEDO, DAYS_PER_YEAR, MJ_TO_MM_WATER, PSYCHROMETRIC_COEFF, SOLAR_CONSTANT, STEFAN_BOLTZMANN,
};
use std::f64::consts::PI;
use tracing::{info, warn};

/// Site-wide quantities computed once before the daily loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AtmosphericConstants {
    /// kPa
    pub pressure: f64,
    /// kPa/°C
    pub psychrometric: f64,
    pub latitude_rad: f64,
    pub elevation_m: f64,
}

impl AtmosphericConstants {
    pub fn for_site(site: &SiteConfig) -> Self {
        let pressure = atmospheric_pressure(site.elevation_m);
        Self {
            pressure,
            psychrometric: psychrometric_constant(pressure),
            latitude_rad: site.latitude_rad(),
            elevation_m: site.elevation_m,
        }
    }
}

/// Atmospheric pressure from elevation, kPa
pub fn atmospheric_pressure(elevation_m: f64) -> f64 {
    101.3 * ((293.0 - 0.0065 * elevation_m) / 293.0).powf(5.26)
}

pub fn psychrometric_constant(pressure_kpa: f64) -> f64 {
    PSYCHROMETRIC_COEFF * pressure_kpa
}

/// Slope of the saturation vapour pressure curve at `t` °C, kPa/°C
pub fn vapor_pressure_slope(t: f64) -> f64 {
    4098.0 * (0.6106 * ((17.27 * t) / (t + 237.3)).exp()) / (t + 237.3).powi(2)
}

/// Saturation vapour pressure at `t` °C, kPa
pub fn saturation_vapor_pressure(t: f64) -> f64 {
    0.6108 * ((17.27 * t) / (t + 237.3)).exp()
}

pub fn actual_vapor_pressure(
    min_sat_vapor: f64,
    max_sat_vapor: f64,
    min_rel_humidity: f64,
    max_rel_humidity: f64,
) -> f64 {
    (min_sat_vapor * (max_rel_humidity / 100.0) + max_sat_vapor * (min_rel_humidity / 100.0)) / 2.0
}

/// Inverse relative Earth-Sun distance
pub fn earth_sun_distance(day_of_year: u32) -> f64 {
    1.0 + 0.033 * ((2.0 * PI / DAYS_PER_YEAR) * day_of_year as f64).cos()
}

pub fn solar_declination(day_of_year: u32) -> f64 {
    0.409 * ((2.0 * PI / DAYS_PER_YEAR) * day_of_year as f64 - 1.39).sin()
}

/// Sunset hour angle, or `None` during polar day or polar night when
/// `|tan(lat) * tan(decl)| > 1`.
pub fn sunset_hour_angle(latitude_rad: f64, declination: f64) -> Option<f64> {
    let x = -latitude_rad.tan() * declination.tan();
    if x.is_nan() || x.abs() > 1.0 {
        None
    } else {
        Some(x.acos())
    }
}

/// Extraterrestrial radiation, MJ/m²/day
pub fn extraterrestrial_radiation(
    latitude_rad: f64,
    earth_sun_distance: f64,
    declination: f64,
    sunset_angle: f64,
) -> f64 {
    let aa = sunset_angle * latitude_rad.sin() * declination.sin();
    let bb = latitude_rad.cos() * declination.cos() * sunset_angle.sin();
    ((24.0 * 60.0) / PI) * SOLAR_CONSTANT * earth_sun_distance * (aa + bb)
}

pub fn clear_sky_radiation(extraterrestrial: f64, elevation_m: f64) -> f64 {
    (0.75 + 2e-5 * elevation_m) * extraterrestrial
}

pub fn net_shortwave_radiation(solar_mj: f64) -> f64 {
    (1.0 - ALBEDO) * solar_mj
}

/// Mean of the fourth powers of the extreme temperatures in Kelvin
pub fn sb_flux(min_temp: f64, max_temp: f64) -> f64 {
    ((max_temp + 273.16).powi(4) + (min_temp + 273.16).powi(4)) / 2.0
}

pub fn net_longwave_radiation(
    sb_flux: f64,
    actual_vapor: f64,
    solar_mj: f64,
    clear_sky: f64,
) -> f64 {
    STEFAN_BOLTZMANN
        * (sb_flux
            * (0.34 - 0.14 * actual_vapor.sqrt())
            * (1.35 * (solar_mj / clear_sky) - 0.35))
}

/// Evaluate the whole chain for one day.
pub fn compute_terms(day: &DailyAggregate, constants: &AtmosphericConstants) -> EtoTerms {
    let gamma = constants.psychrometric;
    let t = day.avg_temp();
    let u2 = day.wind_speed;
    let solar_mj = day.solar_radiation_mj();

    let delta = vapor_pressure_slope(t);
    let denominator = delta + gamma * (1.0 + 0.34 * u2);
    let delta_term = delta / denominator;
    let psi_term = gamma / denominator;
    let temp_term = (900.0 / (t + 273.0)) * u2;

    let max_sat_vapor = saturation_vapor_pressure(day.max_temp);
    let min_sat_vapor = saturation_vapor_pressure(day.min_temp);
    let mean_sat_vapor = (min_sat_vapor + max_sat_vapor) / 2.0;
    let actual_vapor = actual_vapor_pressure(
        min_sat_vapor,
        max_sat_vapor,
        day.min_rel_humidity,
        day.max_rel_humidity,
    );

    let earth_sun_distance = earth_sun_distance(day.day_of_year);
    let solar_declination = solar_declination(day.day_of_year);
    let sunset_hour_angle =
        sunset_hour_angle(constants.latitude_rad, solar_declination).unwrap_or(f64::NAN);

    let extraterrestrial_radiation = extraterrestrial_radiation(
        constants.latitude_rad,
        earth_sun_distance,
        solar_declination,
        sunset_hour_angle,
    );
    let clear_sky_radiation = clear_sky_radiation(extraterrestrial_radiation, constants.elevation_m);
    let net_shortwave_radiation = net_shortwave_radiation(solar_mj);
    let sb_flux = sb_flux(day.min_temp, day.max_temp);
    let net_longwave_radiation =
        net_longwave_radiation(sb_flux, actual_vapor, solar_mj, clear_sky_radiation);

    let net_radiation = net_shortwave_radiation - net_longwave_radiation;
    let net_radiation_mm = net_radiation * MJ_TO_MM_WATER;

    let et_rad = delta_term * net_radiation_mm;
    let et_wind = psi_term * temp_term * (mean_sat_vapor - actual_vapor);

    EtoTerms {
        delta,
        delta_term,
        psi_term,
        temp_term,
        max_sat_vapor,
        min_sat_vapor,
        mean_sat_vapor,
        actual_vapor,
        earth_sun_distance,
        solar_declination,
        sunset_hour_angle,
        extraterrestrial_radiation,
        clear_sky_radiation,
        net_shortwave_radiation,
        sb_flux,
        net_longwave_radiation,
        net_radiation,
        net_radiation_mm,
        et_rad,
        et_wind,
        eto: et_rad + et_wind,
    }
}

/// Applies the Penman-Monteith chain to every day of a daily table.
pub struct EtoEngine {
    constants: AtmosphericConstants,
}

impl EtoEngine {
    pub fn new(site: &SiteConfig) -> Self {
        Self {
            constants: AtmosphericConstants::for_site(site),
        }
    }

    pub fn constants(&self) -> &AtmosphericConstants {
        &self.constants
    }

    /// Missing inputs surface as NaN terms, never as errors.
    pub fn compute(&self, days: &[DailyAggregate]) -> Vec<DailyRecord> {
        let records: Vec<DailyRecord> = days
            .iter()
            .map(|day| DailyRecord {
                aggregate: day.clone(),
                terms: compute_terms(day, &self.constants),
            })
            .collect();

        let empty = days.iter().filter(|d| !d.has_readings()).count();
        if empty > 0 {
            warn!(days = empty, "days without readings inside the observed span");
        }

        let polar = records
            .iter()
            .filter(|r| r.terms.sunset_hour_angle.is_nan())
            .count();
        if polar > 0 {
            warn!(days = polar, "sunset hour angle undefined at this latitude");
        }

        let undefined = records.iter().filter(|r| !r.has_defined_eto()).count();
        if undefined > 0 {
            warn!(days = undefined, "ETo undefined for some days");
        }

        info!(
            days = records.len(),
            pressure_kpa = self.constants.pressure,
            "computed reference evapotranspiration"
        );
        records
    }
}
