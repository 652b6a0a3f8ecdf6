use crate::error::{ProcessingError, Result};
use crate::models::{AggregationMode, DailyAggregate, Observation};
use chrono::{Datelike, NaiveDate};
use std::collections::BTreeMap;
use tracing::debug;

#[derive(Debug, Clone, Copy, Default)]
struct Mean {
    sum: f64,
    count: usize,
}

impl Mean {
    fn add(&mut self, value: Option<f64>) {
        if let Some(v) = value {
            self.sum += v;
            self.count += 1;
        }
    }

    fn value(&self) -> f64 {
        if self.count == 0 {
            f64::NAN
        } else {
            self.sum / self.count as f64
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Extrema {
    min: f64,
    max: f64,
}

impl Default for Extrema {
    fn default() -> Self {
        Self {
            min: f64::NAN,
            max: f64::NAN,
        }
    }
}

impl Extrema {
    fn add(&mut self, value: Option<f64>) {
        if let Some(v) = value {
            // NaN.min(v) == v, so the first reading seeds both ends
            self.min = self.min.min(v);
            self.max = self.max.max(v);
        }
    }
}

/// Mean-pass accumulator for one 24-hour bucket.
#[derive(Debug, Clone, Copy, Default)]
struct MeanBucket {
    samples: usize,
    air_temp: Mean,
    rel_humidity: Mean,
    solar_radiation: Mean,
    wind_speed: Mean,
    pressure: Mean,
    rainfall: f64,
}

/// Extrema-pass accumulator for one group.
#[derive(Debug, Clone, Copy, Default)]
struct ExtremaGroup {
    air_temp: Extrema,
    rel_humidity: Extrema,
}

impl ExtremaGroup {
    fn add(&mut self, obs: &Observation) {
        self.air_temp.add(obs.air_temp);
        self.rel_humidity.add(obs.rel_humidity);
    }
}

/// Resamples cleaned sub-hourly observations into one row per calendar day.
///
/// Buckets are aligned to midnight and cover every day from the first to the
/// last reading; a day with no readings still gets a row (NaN means, zero
/// rainfall). Means and extremes are computed in two separate passes.
pub struct DailyAggregator {
    mode: AggregationMode,
}

impl DailyAggregator {
    pub fn new() -> Self {
        Self {
            mode: AggregationMode::CalendarDay,
        }
    }

    pub fn with_mode(mut self, mode: AggregationMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn aggregate(&self, observations: &[Observation]) -> Result<Vec<DailyAggregate>> {
        if observations.is_empty() {
            return Err(ProcessingError::MissingData(
                "no observations to aggregate".to_string(),
            ));
        }

        let means = self.mean_pass(observations);
        let buckets = fill_calendar(&means);
        let extremes = match self.mode {
            AggregationMode::CalendarDay => self.extrema_by_calendar_day(observations, &buckets),
            AggregationMode::DayOfYear => self.extrema_by_day_of_year(observations, buckets.len())?,
        };

        let days: Vec<DailyAggregate> = buckets
            .into_iter()
            .zip(extremes)
            .map(|((date, bucket), extrema)| DailyAggregate {
                date,
                year: date.year(),
                day_of_year: date.ordinal(),
                sample_count: bucket.samples,
                mean_air_temp: bucket.air_temp.value(),
                mean_rel_humidity: bucket.rel_humidity.value(),
                solar_radiation: bucket.solar_radiation.value(),
                wind_speed: bucket.wind_speed.value(),
                pressure: bucket.pressure.value(),
                min_temp: extrema.air_temp.min,
                max_temp: extrema.air_temp.max,
                min_rel_humidity: extrema.rel_humidity.min,
                max_rel_humidity: extrema.rel_humidity.max,
                rainfall: bucket.rainfall,
            })
            .collect();

        debug!(days = days.len(), mode = %self.mode, "aggregated to daily");
        Ok(days)
    }

    fn mean_pass(&self, observations: &[Observation]) -> BTreeMap<NaiveDate, MeanBucket> {
        let mut buckets: BTreeMap<NaiveDate, MeanBucket> = BTreeMap::new();

        for obs in observations {
            let bucket = buckets.entry(obs.timestamp.date()).or_default();
            bucket.samples += 1;
            bucket.air_temp.add(obs.air_temp);
            bucket.rel_humidity.add(obs.rel_humidity);
            bucket.solar_radiation.add(obs.solar_radiation);
            bucket.wind_speed.add(obs.wind_speed);
            bucket.pressure.add(obs.pressure);
            // Extensive quantity: summed, not averaged
            bucket.rainfall += obs.rainfall.unwrap_or(0.0);
        }

        buckets
    }

    fn extrema_by_calendar_day(
        &self,
        observations: &[Observation],
        buckets: &[(NaiveDate, MeanBucket)],
    ) -> Vec<ExtremaGroup> {
        let mut groups: BTreeMap<NaiveDate, ExtremaGroup> = BTreeMap::new();
        for obs in observations {
            groups.entry(obs.timestamp.date()).or_default().add(obs);
        }

        buckets
            .iter()
            .map(|(date, _)| groups.get(date).copied().unwrap_or_default())
            .collect()
    }

    /// Groups by the DOY column and hands the groups out in ascending DOY
    /// order, one per bucket.
    fn extrema_by_day_of_year(
        &self,
        observations: &[Observation],
        bucket_count: usize,
    ) -> Result<Vec<ExtremaGroup>> {
        let mut groups: BTreeMap<u32, ExtremaGroup> = BTreeMap::new();
        for obs in observations {
            groups.entry(obs.day_of_year).or_default().add(obs);
        }

        if groups.len() != bucket_count {
            return Err(ProcessingError::AggregationMismatch {
                groups: groups.len(),
                buckets: bucket_count,
            });
        }

        Ok(groups.into_values().collect())
    }
}

impl Default for DailyAggregator {
    fn default() -> Self {
        Self::new()
    }
}

/// Expand the observed days into a contiguous calendar, inserting empty
/// buckets for days without readings.
fn fill_calendar(means: &BTreeMap<NaiveDate, MeanBucket>) -> Vec<(NaiveDate, MeanBucket)> {
    let (first, last) = match (means.keys().next(), means.keys().next_back()) {
        (Some(first), Some(last)) => (*first, *last),
        _ => return Vec::new(),
    };

    first
        .iter_days()
        .take_while(|date| *date <= last)
        .map(|date| (date, means.get(&date).copied().unwrap_or_default()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDateTime};

    fn at(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2018, 5, day)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    fn observation(timestamp: NaiveDateTime, air_temp: f64, rainfall: f64) -> Observation {
        Observation {
            timestamp,
            year: timestamp.year(),
            day_of_year: timestamp.ordinal(),
            air_temp: Some(air_temp),
            rel_humidity: Some(air_temp * 2.0),
            solar_radiation: Some(400.0),
            wind_speed: Some(3.0),
            pressure: Some(90.0),
            rainfall: Some(rainfall),
        }
    }

    fn two_days() -> Vec<Observation> {
        let mut obs = Vec::new();
        for (day, temps) in [(1, [5.0, 15.0, 25.0, 11.0]), (2, [8.0, 12.0, 30.0, 2.0])] {
            for (i, t) in temps.iter().enumerate() {
                let ts = at(day, 0, 15) + Duration::hours(6 * i as i64);
                obs.push(observation(ts, *t, 0.25 * (i as f64 + 1.0)));
            }
        }
        obs
    }

    #[test]
    fn test_rainfall_is_summed() {
        let days = DailyAggregator::new().aggregate(&two_days()).unwrap();

        assert_eq!(days.len(), 2);
        // 0.25 + 0.5 + 0.75 + 1.0
        assert_eq!(days[0].rainfall, 2.5);
        assert_eq!(days[1].rainfall, 2.5);
    }

    #[test]
    fn test_min_max_are_exact() {
        let days = DailyAggregator::new().aggregate(&two_days()).unwrap();

        assert_eq!(days[0].min_temp, 5.0);
        assert_eq!(days[0].max_temp, 25.0);
        assert_eq!(days[1].min_temp, 2.0);
        assert_eq!(days[1].max_temp, 30.0);
        assert_eq!(days[1].min_rel_humidity, 4.0);
        assert_eq!(days[1].max_rel_humidity, 60.0);
    }

    #[test]
    fn test_means_and_derived_columns() {
        let days = DailyAggregator::new().aggregate(&two_days()).unwrap();

        assert_eq!(days[0].mean_air_temp, 14.0);
        assert_eq!(days[0].solar_radiation, 400.0);
        assert_eq!(days[0].sample_count, 4);
        assert_eq!(days[0].avg_temp(), 15.0);
        assert_eq!(days[0].day_of_year, 121);
        assert_eq!(days[1].date, NaiveDate::from_ymd_opt(2018, 5, 2).unwrap());
    }

    #[test]
    fn test_end_of_day_reading_stays_in_day() {
        let obs = vec![
            observation(at(1, 0, 15), 10.0, 1.0),
            observation(at(1, 23, 59), 20.0, 1.0),
        ];

        let days = DailyAggregator::new().aggregate(&obs).unwrap();

        assert_eq!(days.len(), 1);
        assert_eq!(days[0].max_temp, 20.0);
        assert_eq!(days[0].rainfall, 2.0);
    }

    #[test]
    fn test_missing_day_gets_empty_row() {
        let obs = vec![
            observation(at(1, 12, 0), 10.0, 1.0),
            observation(at(3, 12, 0), 20.0, 1.0),
        ];

        let days = DailyAggregator::new().aggregate(&obs).unwrap();

        assert_eq!(days.len(), 3);
        assert!(!days[1].has_readings());
        assert!(days[1].mean_air_temp.is_nan());
        assert!(days[1].min_temp.is_nan());
        assert_eq!(days[1].rainfall, 0.0);
    }

    #[test]
    fn test_missing_values_are_skipped() {
        let mut obs = two_days();
        obs[0].air_temp = None;

        let days = DailyAggregator::new().aggregate(&obs).unwrap();

        assert_eq!(days[0].min_temp, 11.0);
        assert_eq!(days[0].mean_air_temp, 17.0);
    }

    #[test]
    fn test_day_of_year_mode_matches_calendar_mode() {
        let calendar = DailyAggregator::new().aggregate(&two_days()).unwrap();
        let legacy = DailyAggregator::new()
            .with_mode(AggregationMode::DayOfYear)
            .aggregate(&two_days())
            .unwrap();

        assert_eq!(calendar, legacy);
    }

    #[test]
    fn test_day_of_year_mode_rejects_gaps() {
        let obs = vec![
            observation(at(1, 12, 0), 10.0, 1.0),
            observation(at(3, 12, 0), 20.0, 1.0),
        ];

        let result = DailyAggregator::new()
            .with_mode(AggregationMode::DayOfYear)
            .aggregate(&obs);

        assert!(matches!(
            result,
            Err(ProcessingError::AggregationMismatch {
                groups: 2,
                buckets: 3
            })
        ));
    }

    #[test]
    fn test_day_of_year_mode_across_year_boundary() {
        let dec31 = NaiveDate::from_ymd_opt(2018, 12, 31)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        let jan1 = dec31 + Duration::days(1);
        let obs = vec![observation(dec31, 10.0, 0.0), observation(jan1, 20.0, 0.0)];

        let calendar = DailyAggregator::new().aggregate(&obs).unwrap();
        let legacy = DailyAggregator::new()
            .with_mode(AggregationMode::DayOfYear)
            .aggregate(&obs)
            .unwrap();

        assert_eq!(calendar[0].max_temp, 10.0);
        // DOY 1 sorts first, so the legacy grouping swaps the days
        assert_eq!(legacy[0].max_temp, 20.0);
    }

    #[test]
    fn test_empty_input() {
        assert!(DailyAggregator::new().aggregate(&[]).is_err());
    }
}
