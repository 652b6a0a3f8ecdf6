use crate::models::DailyRow;

/// A floating point column of the daily export.
pub struct FloatColumn {
    pub name: &'static str,
    pub get: fn(&DailyRow) -> f64,
    pub set: fn(&mut DailyRow, f64),
}

macro_rules! float_columns {
    ($($field:ident),* $(,)?) => {
        /// Every `f64` column of [`DailyRow`], in export order.
        pub const FLOAT_COLUMNS: &[FloatColumn] = &[
            $(FloatColumn {
                name: stringify!($field),
                get: |row: &DailyRow| row.$field,
                set: |row: &mut DailyRow, value: f64| row.$field = value,
            }),*
        ];
    };
}

float_columns!(
    solar_radiation,
    wind_speed,
    pressure,
    mean_air_temp,
    mean_rel_humidity,
    min_temp,
    max_temp,
    min_rel_humidity,
    max_rel_humidity,
    rainfall,
    avg_temp,
    solar_radiation_mj,
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
    eto,
);

pub const DATE_COLUMN: &str = "date";
pub const YEAR_COLUMN: &str = "year";
pub const DAY_OF_YEAR_COLUMN: &str = "day_of_year";
pub const SAMPLE_COUNT_COLUMN: &str = "sample_count";

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::collections::HashSet;

    #[test]
    fn test_column_names_are_unique() {
        let names: HashSet<&str> = FLOAT_COLUMNS.iter().map(|c| c.name).collect();
        assert_eq!(names.len(), FLOAT_COLUMNS.len());
    }

    #[test]
    fn test_get_and_set() {
        let date = NaiveDate::from_ymd_opt(2018, 5, 1).unwrap();
        let mut row = DailyRow::empty(date, 2018, 121, 96);

        let eto = FLOAT_COLUMNS.iter().find(|c| c.name == "eto").unwrap();
        (eto.set)(&mut row, 5.5);

        assert_eq!(row.eto, 5.5);
        assert_eq!((eto.get)(&row), 5.5);
    }
}
