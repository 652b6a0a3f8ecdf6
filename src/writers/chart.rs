use crate::error::Result;
use crate::models::DailyRecord;
use plotlars::{Axis, Legend, Line, Plot, Rgb, Shape, Text, TimeSeriesPlot};
use polars::prelude::*;
use std::path::Path;
use tracing::info;

pub const DATE_SERIES: &str = "date";
pub const ETO_SERIES: &str = "ETo (mm/day)";
pub const NET_RADIATION_SERIES: &str = "Net radiation (MJ/m²/day)";
pub const WIND_SERIES: &str = "Wind speed (m/s)";

/// Daily ETo (markers), total net radiation (dash-dot) and wind speed
/// (solid line) on one time axis.
pub struct EtoChart {
    data: DataFrame,
}

impl EtoChart {
    pub fn new(records: &[DailyRecord]) -> Result<Self> {
        let dates: Vec<String> = records
            .iter()
            .map(|r| r.date().format("%Y-%m-%d").to_string())
            .collect();
        let eto: Vec<f64> = records.iter().map(|r| r.eto()).collect();
        let net_radiation: Vec<f64> = records.iter().map(|r| r.terms.net_radiation).collect();
        let wind: Vec<f64> = records.iter().map(|r| r.aggregate.wind_speed).collect();

        let data = df!(
            DATE_SERIES => dates,
            ETO_SERIES => eto,
            NET_RADIATION_SERIES => net_radiation,
            WIND_SERIES => wind,
        )?;

        Ok(Self { data })
    }

    pub fn data(&self) -> &DataFrame {
        &self.data
    }

    /// Write a self-contained HTML page.
    pub fn write_html(&self, path: &Path) -> Result<()> {
        let target = path.display().to_string();
        self.build().write_html(&target);
        info!(path = %target, days = self.data.height(), "wrote chart");
        Ok(())
    }

    /// Open the chart in the default browser.
    pub fn show(&self) {
        self.build().plot();
    }

    fn build(&self) -> TimeSeriesPlot {
        TimeSeriesPlot::builder()
            .data(&self.data)
            .x(DATE_SERIES)
            .y(ETO_SERIES)
            .additional_series(vec![NET_RADIATION_SERIES, WIND_SERIES])
            .size(8)
            .colors(vec![Rgb(31, 119, 180), Rgb(214, 39, 40), Rgb(44, 160, 44)])
            .lines(vec![Line::Dot, Line::DashDot, Line::Solid])
            .with_shape(true)
            .shapes(vec![Shape::Circle, Shape::Square, Shape::Square])
            .plot_title(Text::from("Daily reference evapotranspiration").size(18))
            .legend(&Legend::new().x(0.05).y(0.95))
            .x_title("date")
            .y_title(Text::from("value").color(Rgb(0, 0, 0)))
            .y_axis(
                &Axis::new()
                    .value_color(Rgb(0, 0, 0))
                    .show_grid(false)
                    .zero_line_color(Rgb(0, 0, 0)),
            )
            .build()
    }
}
