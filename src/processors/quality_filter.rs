use crate::models::{Channel, FillPolicy, Observation};
use chrono::NaiveDateTime;
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

/// Rejected readings kept for the report listing
pub const MAX_LISTED_REJECTIONS: usize = 10;

/// Per-channel tally of what cleaning did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChannelStatistics {
    /// Readings present in the file but outside the plausible range
    pub rejected: usize,
    /// Readings of exactly zero on channels whose range excludes zero
    pub zero_readings: usize,
    /// Readings absent from the file
    pub missing_in_source: usize,
    pub interpolated: usize,
    pub zero_filled: usize,
    /// Gaps at the edges of the series that interpolation cannot reach
    pub unfilled: usize,
}

#[derive(Debug, Clone, Default)]
pub struct QualityReport {
    pub total_readings: usize,
    pub channels: BTreeMap<Channel, ChannelStatistics>,
    /// The first implausible readings, in channel then time order
    pub rejections: Vec<Rejection>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Rejection {
    pub timestamp: NaiveDateTime,
    pub channel: Channel,
    pub value: f64,
}

impl QualityReport {
    pub fn total_rejected(&self) -> usize {
        self.channels.values().map(|s| s.rejected).sum()
    }

    pub fn total_zero_readings(&self) -> usize {
        self.channels.values().map(|s| s.zero_readings).sum()
    }

    pub fn total_unfilled(&self) -> usize {
        self.channels.values().map(|s| s.unfilled).sum()
    }

    pub fn channel(&self, channel: Channel) -> ChannelStatistics {
        self.channels.get(&channel).cloned().unwrap_or_default()
    }

    pub fn summary(&self) -> String {
        let mut summary = String::new();

        summary.push_str("=== Data Quality Report ===\n");
        summary.push_str(&format!("Readings: {}\n", self.total_readings));
        summary.push_str(&format!(
            "{:<22}{:>10}{:>8}{:>10}{:>14}{:>10}{:>10}\n",
            "Channel", "Rejected", "Zero", "Missing", "Interpolated", "Zeroed", "Unfilled"
        ));
        for (channel, stats) in &self.channels {
            summary.push_str(&format!(
                "{:<22}{:>10}{:>8}{:>10}{:>14}{:>10}{:>10}\n",
                channel.to_string(),
                stats.rejected,
                stats.zero_readings,
                stats.missing_in_source,
                stats.interpolated,
                stats.zero_filled,
                stats.unfilled
            ));
        }

        if !self.rejections.is_empty() {
            summary.push_str(&format!(
                "\nFirst {} rejected readings:\n",
                self.rejections.len()
            ));
            for (i, r) in self.rejections.iter().enumerate() {
                summary.push_str(&format!(
                    "  {}. {} {} = {} {}\n",
                    i + 1,
                    r.timestamp,
                    r.channel,
                    r.value,
                    r.channel.unit()
                ));
            }
        }

        summary
    }
}

/// Bounds-checks each channel and fills the gaps it leaves.
///
/// Implausible readings become missing, never clamped. Rainfall gaps are
/// zero-filled; every other channel is linearly interpolated by row position
/// between its nearest valid neighbours. Gaps at either end of the series are
/// left missing.
pub struct QualityFilter {
    verbose: bool,
}

impl QualityFilter {
    pub fn new() -> Self {
        Self { verbose: false }
    }

    /// Log every rejected reading, not just the per-channel totals.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn clean(&self, observations: &[Observation]) -> (Vec<Observation>, QualityReport) {
        let mut cleaned = observations.to_vec();
        let mut report = QualityReport {
            total_readings: observations.len(),
            ..Default::default()
        };

        for channel in Channel::ALL {
            let mut stats = ChannelStatistics::default();
            let (low, _) = channel.bounds();

            let mut values: Vec<Option<f64>> = Vec::with_capacity(cleaned.len());
            for obs in &cleaned {
                let value = match obs.value(channel) {
                    None => {
                        stats.missing_in_source += 1;
                        None
                    }
                    Some(v) if channel.is_plausible(v) => Some(v),
                    // Idle sensors report 0, which sits on the excluded bound
                    Some(v) if v == 0.0 && low == 0.0 => {
                        stats.zero_readings += 1;
                        None
                    }
                    Some(v) => {
                        stats.rejected += 1;
                        if self.verbose {
                            debug!(timestamp = %obs.timestamp, %channel, value = v, "rejected reading");
                        }
                        if report.rejections.len() < MAX_LISTED_REJECTIONS {
                            report.rejections.push(Rejection {
                                timestamp: obs.timestamp,
                                channel,
                                value: v,
                            });
                        }
                        None
                    }
                };
                values.push(value);
            }

            let filled = match channel.fill_policy() {
                FillPolicy::ZeroFill => {
                    stats.zero_filled = values.iter().filter(|v| v.is_none()).count();
                    zero_fill(&values)
                }
                FillPolicy::Interpolate => {
                    let filled = interpolate_linear(&values);
                    let before = values.iter().filter(|v| v.is_none()).count();
                    let after = filled.iter().filter(|v| v.is_none()).count();
                    stats.interpolated = before - after;
                    stats.unfilled = after;
                    filled
                }
            };

            for (obs, value) in cleaned.iter_mut().zip(filled) {
                obs.set_value(channel, value);
            }

            if stats.unfilled > 0 {
                warn!(%channel, unfilled = stats.unfilled, "gaps at series edge left unfilled");
            }
            if stats.rejected > 0 {
                info!(%channel, rejected = stats.rejected, "implausible readings treated as missing");
            }
            if stats.zero_readings > 0 {
                debug!(%channel, zeros = stats.zero_readings, "zero readings treated as missing");
            }

            report.channels.insert(channel, stats);
        }

        (cleaned, report)
    }
}

impl Default for QualityFilter {
    fn default() -> Self {
        Self::new()
    }
}

pub fn zero_fill(values: &[Option<f64>]) -> Vec<Option<f64>> {
    values.iter().map(|v| Some(v.unwrap_or(0.0))).collect()
}

/// Fill interior gaps by linear interpolation over row position.
///
/// Timestamps are ignored, so the 23:59 end-of-day reading and rows around a
/// station outage are weighted as if evenly spaced.
pub fn interpolate_linear(values: &[Option<f64>]) -> Vec<Option<f64>> {
    let mut filled = values.to_vec();
    let known: Vec<(usize, f64)> = values
        .iter()
        .enumerate()
        .filter_map(|(i, v)| v.map(|v| (i, v)))
        .collect();

    for pair in known.windows(2) {
        let ((left, v1), (right, v2)) = (pair[0], pair[1]);
        let span = (right - left) as f64;
        for (i, slot) in filled.iter_mut().enumerate().take(right).skip(left + 1) {
            *slot = Some(v1 + (v2 - v1) * (i - left) as f64 / span);
        }
    }

    filled
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn start() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2018, 5, 1)
            .unwrap()
            .and_hms_opt(0, 15, 0)
            .unwrap()
    }

    fn observation(step: i64, air_temp: Option<f64>, rainfall: Option<f64>) -> Observation {
        let timestamp = start() + Duration::minutes(15 * step);
        Observation {
            timestamp,
            year: 2018,
            day_of_year: 121,
            air_temp,
            rel_humidity: Some(50.0),
            solar_radiation: Some(300.0),
            wind_speed: Some(2.5),
            pressure: Some(89.5),
            rainfall,
        }
    }

    #[test]
    fn test_out_of_range_becomes_missing_then_interpolated() {
        let input = vec![
            observation(0, Some(10.0), Some(0.5)),
            observation(1, Some(45.0), Some(0.5)),
            observation(2, Some(20.0), Some(0.5)),
        ];

        let (cleaned, report) = QualityFilter::new().clean(&input);

        assert_eq!(cleaned[1].air_temp, Some(15.0));
        assert_eq!(report.channel(Channel::AirTemp).rejected, 1);
        assert_eq!(report.channel(Channel::AirTemp).interpolated, 1);
        assert_eq!(report.rejections[0].value, 45.0);
    }

    #[test]
    fn test_values_inside_bounds_are_unchanged() {
        let input = vec![
            observation(0, Some(44.9), Some(199.9)),
            observation(1, Some(-29.9), Some(0.1)),
        ];

        let (cleaned, report) = QualityFilter::new().clean(&input);

        assert_eq!(cleaned, input);
        assert_eq!(report.total_rejected(), 0);
    }

    #[test]
    fn test_midpoint_interpolation() {
        let input = vec![
            observation(0, Some(12.0), Some(1.0)),
            observation(1, None, Some(1.0)),
            observation(2, Some(18.0), Some(1.0)),
        ];

        let (cleaned, _) = QualityFilter::new().clean(&input);

        assert_eq!(cleaned[1].air_temp, Some((12.0 + 18.0) / 2.0));
    }

    #[test]
    fn test_interpolation_weights_by_position() {
        // 00:15, 00:30 missing, then 01:30 after an outage
        let values = vec![Some(0.0), None, Some(4.0)];

        assert_eq!(interpolate_linear(&values), vec![Some(0.0), Some(2.0), Some(4.0)]);
    }

    #[test]
    fn test_end_of_day_reading_filled_by_position() {
        let day = |d: u32, h: u32, m: u32| {
            NaiveDate::from_ymd_opt(2018, 5, d)
                .unwrap()
                .and_hms_opt(h, m, 0)
                .unwrap()
        };
        let input: Vec<Observation> = [
            (day(1, 23, 45), Some(10.0)),
            (day(1, 23, 59), None),
            (day(2, 0, 15), Some(20.0)),
        ]
        .into_iter()
        .map(|(timestamp, air_temp)| Observation {
            timestamp,
            air_temp,
            ..observation(0, None, None)
        })
        .collect();

        let (cleaned, _) = QualityFilter::new().clean(&input);

        assert_eq!(cleaned[1].air_temp, Some(15.0));
    }

    #[test]
    fn test_zero_readings_reported_separately() {
        let input: Vec<Observation> = (0..40)
            .map(|step| Observation {
                solar_radiation: Some(0.0),
                ..observation(step, Some(if step % 2 == 0 { 60.0 } else { 10.0 }), Some(0.0))
            })
            .collect();

        let (cleaned, report) = QualityFilter::new().clean(&input);

        assert_eq!(report.channel(Channel::Rainfall).zero_readings, 40);
        assert_eq!(report.channel(Channel::Rainfall).rejected, 0);
        assert_eq!(report.channel(Channel::SolarRadiation).zero_readings, 40);
        assert_eq!(report.channel(Channel::AirTemp).rejected, 20);
        assert_eq!(report.total_rejected(), 20);
        assert_eq!(report.total_zero_readings(), 80);
        assert_eq!(report.rejections.len(), MAX_LISTED_REJECTIONS);
        assert!(report
            .rejections
            .iter()
            .all(|r| r.channel == Channel::AirTemp));
        assert!(cleaned.iter().all(|o| o.rainfall == Some(0.0)));
    }

    #[test]
    fn test_rainfall_gaps_are_zero_filled() {
        let input = vec![
            observation(0, Some(10.0), Some(2.0)),
            observation(1, Some(10.0), None),
            observation(2, Some(10.0), Some(250.0)),
            observation(3, Some(10.0), Some(0.0)),
            observation(4, Some(10.0), Some(4.0)),
        ];

        let (cleaned, report) = QualityFilter::new().clean(&input);
        let rain: Vec<Option<f64>> = cleaned.iter().map(|o| o.rainfall).collect();

        assert_eq!(rain, vec![Some(2.0), Some(0.0), Some(0.0), Some(0.0), Some(4.0)]);
        let stats = report.channel(Channel::Rainfall);
        assert_eq!(stats.zero_filled, 3);
        assert_eq!(stats.interpolated, 0);
    }

    #[test]
    fn test_edge_gaps_stay_missing() {
        let input = vec![
            observation(0, None, Some(1.0)),
            observation(1, Some(10.0), Some(1.0)),
            observation(2, Some(11.0), Some(1.0)),
            observation(3, Some(99.0), Some(1.0)),
        ];

        let (cleaned, report) = QualityFilter::new().clean(&input);

        assert_eq!(cleaned[0].air_temp, None);
        assert_eq!(cleaned[3].air_temp, None);
        assert_eq!(report.channel(Channel::AirTemp).unfilled, 2);
        assert_eq!(report.total_unfilled(), 2);
    }

    #[test]
    fn test_non_finite_values_are_rejected() {
        let input = vec![
            observation(0, Some(5.0), Some(1.0)),
            observation(1, Some(f64::NAN), Some(1.0)),
            observation(2, Some(7.0), Some(1.0)),
        ];

        let (cleaned, _) = QualityFilter::new().with_verbose(true).clean(&input);

        assert_eq!(cleaned[1].air_temp, Some(6.0));
    }

    #[test]
    fn test_input_is_not_mutated() {
        let input = vec![
            observation(0, Some(5.0), None),
            observation(1, Some(50.0), None),
            observation(2, Some(7.0), None),
        ];
        let snapshot = input.clone();

        let _ = QualityFilter::new().clean(&input);

        assert_eq!(input, snapshot);
    }

    #[test]
    fn test_summary_lists_channels() {
        let input = vec![observation(0, Some(50.0), None)];
        let (_, report) = QualityFilter::new().clean(&input);
        let summary = report.summary();

        assert!(summary.contains("air temperature"));
        assert!(summary.contains("rainfall"));
        assert!(summary.contains("First 1 rejected readings"));
    }
}
