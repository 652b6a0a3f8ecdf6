use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::utils::constants::W_M2_TO_MJ_M2_DAY;

/// One calendar day of aggregated station readings.
///
/// Quantities that could not be computed (no readings in the bucket) are NaN.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyAggregate {
    pub date: NaiveDate,
    pub year: i32,
    pub day_of_year: u32,
    pub sample_count: usize,

    pub mean_air_temp: f64,
    pub mean_rel_humidity: f64,
    /// W/m²
    pub solar_radiation: f64,
    /// m/s at 2 m
    pub wind_speed: f64,
    /// kPa
    pub pressure: f64,

    pub min_temp: f64,
    pub max_temp: f64,
    pub min_rel_humidity: f64,
    pub max_rel_humidity: f64,

    /// Total over the day, mm
    pub rainfall: f64,
}

impl DailyAggregate {
    /// Mean daily temperature from the extremes, °C
    pub fn avg_temp(&self) -> f64 {
        (self.min_temp + self.max_temp) / 2.0
    }

    /// Solar radiation in MJ/m²/day
    pub fn solar_radiation_mj(&self) -> f64 {
        self.solar_radiation * W_M2_TO_MJ_M2_DAY
    }

    pub fn has_readings(&self) -> bool {
        self.sample_count > 0
    }
}

/// Every intermediate of the FAO-56 Penman-Monteith chain for one day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EtoTerms {
    /// Slope of the saturation vapour pressure curve, kPa/°C
    pub delta: f64,
    pub delta_term: f64,
    pub psi_term: f64,
    pub temp_term: f64,

    /// kPa
    pub max_sat_vapor: f64,
    pub min_sat_vapor: f64,
    pub mean_sat_vapor: f64,
    pub actual_vapor: f64,

    pub earth_sun_distance: f64,
    /// rad
    pub solar_declination: f64,
    /// rad, NaN when the sun never sets or never rises
    pub sunset_hour_angle: f64,

    /// MJ/m²/day
    pub extraterrestrial_radiation: f64,
    pub clear_sky_radiation: f64,
    pub net_shortwave_radiation: f64,
    pub sb_flux: f64,
    pub net_longwave_radiation: f64,
    pub net_radiation: f64,
    /// Net radiation as mm of evaporated water
    pub net_radiation_mm: f64,

    /// mm/day
    pub et_rad: f64,
    pub et_wind: f64,
    pub eto: f64,
}

/// A day of aggregates with its computed evapotranspiration terms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyRecord {
    pub aggregate: DailyAggregate,
    pub terms: EtoTerms,
}

impl DailyRecord {
    pub fn date(&self) -> NaiveDate {
        self.aggregate.date
    }

    pub fn eto(&self) -> f64 {
        self.terms.eto
    }

    pub fn has_defined_eto(&self) -> bool {
        self.terms.eto.is_finite()
    }
}

/// Flat export form of a [`DailyRecord`], one field per output column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyRow {
    pub date: NaiveDate,
    pub year: i32,
    pub day_of_year: u32,
    pub sample_count: u64,
    pub solar_radiation: f64,
    pub wind_speed: f64,
    pub pressure: f64,
    pub mean_air_temp: f64,
    pub mean_rel_humidity: f64,
    pub min_temp: f64,
    pub max_temp: f64,
    pub min_rel_humidity: f64,
    pub max_rel_humidity: f64,
    pub rainfall: f64,
    pub avg_temp: f64,
    pub solar_radiation_mj: f64,
    pub delta: f64,
    pub delta_term: f64,
    pub psi_term: f64,
    pub temp_term: f64,
    pub max_sat_vapor: f64,
    pub min_sat_vapor: f64,
    pub mean_sat_vapor: f64,
    pub actual_vapor: f64,
    pub earth_sun_distance: f64,
    pub solar_declination: f64,
    pub sunset_hour_angle: f64,
    pub extraterrestrial_radiation: f64,
    pub clear_sky_radiation: f64,
    pub net_shortwave_radiation: f64,
    pub sb_flux: f64,
    pub net_longwave_radiation: f64,
    pub net_radiation: f64,
    pub net_radiation_mm: f64,
    pub et_rad: f64,
    pub et_wind: f64,
    pub eto: f64,
}

impl DailyRow {
    /// A row for `date` with every measured and derived value missing.
    pub fn empty(date: NaiveDate, year: i32, day_of_year: u32, sample_count: u64) -> Self {
        let nan = f64::NAN;
        Self {
            date,
            year,
            day_of_year,
            sample_count,
            solar_radiation: nan,
            wind_speed: nan,
            pressure: nan,
            mean_air_temp: nan,
            mean_rel_humidity: nan,
            min_temp: nan,
            max_temp: nan,
            min_rel_humidity: nan,
            max_rel_humidity: nan,
            rainfall: nan,
            avg_temp: nan,
            solar_radiation_mj: nan,
            delta: nan,
            delta_term: nan,
            psi_term: nan,
            temp_term: nan,
            max_sat_vapor: nan,
            min_sat_vapor: nan,
            mean_sat_vapor: nan,
            actual_vapor: nan,
            earth_sun_distance: nan,
            solar_declination: nan,
            sunset_hour_angle: nan,
            extraterrestrial_radiation: nan,
            clear_sky_radiation: nan,
            net_shortwave_radiation: nan,
            sb_flux: nan,
            net_longwave_radiation: nan,
            net_radiation: nan,
            net_radiation_mm: nan,
            et_rad: nan,
            et_wind: nan,
            eto: nan,
        }
    }
}

impl From<&DailyRecord> for DailyRow {
    fn from(record: &DailyRecord) -> Self {
        let a = &record.aggregate;
        let t = &record.terms;
        Self {
            date: a.date,
            year: a.year,
            day_of_year: a.day_of_year,
            sample_count: a.sample_count as u64,
            solar_radiation: a.solar_radiation,
            wind_speed: a.wind_speed,
            pressure: a.pressure,
            mean_air_temp: a.mean_air_temp,
            mean_rel_humidity: a.mean_rel_humidity,
            min_temp: a.min_temp,
            max_temp: a.max_temp,
            min_rel_humidity: a.min_rel_humidity,
            max_rel_humidity: a.max_rel_humidity,
            rainfall: a.rainfall,
            avg_temp: a.avg_temp(),
            solar_radiation_mj: a.solar_radiation_mj(),
            delta: t.delta,
            delta_term: t.delta_term,
            psi_term: t.psi_term,
            temp_term: t.temp_term,
            max_sat_vapor: t.max_sat_vapor,
            min_sat_vapor: t.min_sat_vapor,
            mean_sat_vapor: t.mean_sat_vapor,
            actual_vapor: t.actual_vapor,
            earth_sun_distance: t.earth_sun_distance,
            solar_declination: t.solar_declination,
            sunset_hour_angle: t.sunset_hour_angle,
            extraterrestrial_radiation: t.extraterrestrial_radiation,
            clear_sky_radiation: t.clear_sky_radiation,
            net_shortwave_radiation: t.net_shortwave_radiation,
            sb_flux: t.sb_flux,
            net_longwave_radiation: t.net_longwave_radiation,
            net_radiation: t.net_radiation,
            net_radiation_mm: t.net_radiation_mm,
            et_rad: t.et_rad,
            et_wind: t.et_wind,
            eto: t.eto,
        }
    }
}

impl From<DailyRow> for DailyRecord {
    fn from(row: DailyRow) -> Self {
        DailyRecord {
            aggregate: DailyAggregate {
                date: row.date,
                year: row.year,
                day_of_year: row.day_of_year,
                sample_count: row.sample_count as usize,
                mean_air_temp: row.mean_air_temp,
                mean_rel_humidity: row.mean_rel_humidity,
                solar_radiation: row.solar_radiation,
                wind_speed: row.wind_speed,
                pressure: row.pressure,
                min_temp: row.min_temp,
                max_temp: row.max_temp,
                min_rel_humidity: row.min_rel_humidity,
                max_rel_humidity: row.max_rel_humidity,
                rainfall: row.rainfall,
            },
            terms: EtoTerms {
                delta: row.delta,
                delta_term: row.delta_term,
                psi_term: row.psi_term,
                temp_term: row.temp_term,
                max_sat_vapor: row.max_sat_vapor,
                min_sat_vapor: row.min_sat_vapor,
                mean_sat_vapor: row.mean_sat_vapor,
                actual_vapor: row.actual_vapor,
                earth_sun_distance: row.earth_sun_distance,
                solar_declination: row.solar_declination,
                sunset_hour_angle: row.sunset_hour_angle,
                extraterrestrial_radiation: row.extraterrestrial_radiation,
                clear_sky_radiation: row.clear_sky_radiation,
                net_shortwave_radiation: row.net_shortwave_radiation,
                sb_flux: row.sb_flux,
                net_longwave_radiation: row.net_longwave_radiation,
                net_radiation: row.net_radiation,
                net_radiation_mm: row.net_radiation_mm,
                et_rad: row.et_rad,
                et_wind: row.et_wind,
                eto: row.eto,
            },
        }
    }
}
