use crate::analyzers::EtoAnalyzer;
use crate::cli::args::{Cli, Commands, SourceArgs};
use crate::error::Result;
use crate::models::DailyRecord;
use crate::processors::Pipeline;
use crate::settings::Settings;
use crate::utils::filename::{generate_default_csv_filename, generate_default_parquet_filename};
use crate::utils::progress::ProgressReporter;
use crate::writers::{CsvWriter, ParquetWriter};
use std::path::Path;
use tracing::debug;

pub fn run(cli: Cli) -> Result<()> {
    let verbose = cli.verbose;

    match cli.command {
        Commands::Process {
            source,
            elevation,
            latitude,
            aggregation,
            output_csv,
            output_parquet,
            output_dir,
            compression,
            chart,
            show_chart,
        } => {
            let settings = load_settings(&source)?
                .with_elevation(elevation)
                .with_latitude(latitude)
                .with_aggregation(aggregation);

            println!("Computing reference evapotranspiration...");
            println!("Data source: {}", settings.data_source);
            println!(
                "Site: {:.1} m, {:.4}°, {} aggregation",
                settings.site.elevation_m, settings.site.latitude_deg, settings.aggregation
            );

            // Fail on a bad codec before any data is fetched
            let parquet_writer = ParquetWriter::new().with_compression(&compression)?;

            let progress = ProgressReporter::new_spinner("Processing station data...", false);
            let pipeline = Pipeline::new(settings)?.with_verbose(verbose);
            let output = pipeline.run(Some(&progress))?;
            progress.finish_with_message(&format!("Computed {} daily records", output.records.len()));

            println!("\n{}", output.quality.summary());

            if output.records.is_empty() {
                println!("No daily records to write");
                return Ok(());
            }

            let stats = EtoAnalyzer::new().analyze(&output.records)?;
            println!("\n{}", stats.summary());

            if let Some(path) = &chart {
                create_parent_dir(path)?;
            }
            render_chart(&output.records, chart.as_deref(), show_chart)?;

            let csv_path = output_csv.or_else(|| {
                output_dir
                    .as_deref()
                    .map(generate_default_csv_filename)
            });
            let parquet_path = output_parquet.or_else(|| {
                output_dir
                    .as_deref()
                    .map(generate_default_parquet_filename)
            });

            if let Some(path) = csv_path {
                create_parent_dir(&path)?;
                CsvWriter::new().write_records(&output.records, &path)?;
                println!("Wrote CSV: {}", path.display());
            }

            if let Some(path) = parquet_path {
                create_parent_dir(&path)?;
                parquet_writer.write_records(&output.records, &path)?;
                let file_info = parquet_writer.get_file_info(&path)?;
                println!("Wrote Parquet: {}", path.display());
                println!("\n{}", file_info.summary());
            }

            println!("Processing complete!");
        }

        Commands::Validate { source } => {
            let settings = load_settings(&source)?;

            println!("Validating station data...");
            println!("Data source: {}", settings.data_source);

            let progress = ProgressReporter::new_spinner("Validating data...", false);
            let pipeline = Pipeline::new(settings)?.with_verbose(verbose);
            let raw = pipeline.load(Some(&progress))?;
            let (_observations, quality) = pipeline.clean(&raw, Some(&progress))?;
            progress.finish_with_message("Validation complete");

            println!("\n{}", quality.summary());

            if quality.total_rejected() == 0 && quality.total_unfilled() == 0 {
                println!("✅ All readings passed plausibility checks");
            } else {
                println!(
                    "⚠️  {} readings rejected, {} left unfilled",
                    quality.total_rejected(),
                    quality.total_unfilled()
                );
            }
            println!(
                "{} zero readings (idle rain gauge or night-time radiation) treated as missing",
                quality.total_zero_readings()
            );
        }

        Commands::Info { file, sample, json } => {
            let writer = ParquetWriter::new();
            let stats = EtoAnalyzer::new().analyze_parquet(&file)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
                return Ok(());
            }

            println!("Analyzing Parquet file: {}", file.display());
            let file_info = writer.get_file_info(&file)?;
            println!("\n{}", stats.summary());

            println!("\nFile Details:");
            println!("{}", file_info.summary());

            if sample > 0 {
                println!("\nSample Records (showing up to {} records):", sample);
                match writer.read_records(&file, sample) {
                    Ok(records) => {
                        for (i, record) in records.iter().enumerate() {
                            println!(
                                "{}. {} (DOY {}): ETo={:.2} mm, Tmin={:.1}°C, Tmax={:.1}°C, wind={:.2} m/s, rain={:.1} mm",
                                i + 1,
                                record.date(),
                                record.aggregate.day_of_year,
                                record.eto(),
                                record.aggregate.min_temp,
                                record.aggregate.max_temp,
                                record.aggregate.wind_speed,
                                record.aggregate.rainfall
                            );
                        }
                    }
                    Err(e) => println!("Error reading sample data: {}", e),
                }
            }
        }
    }

    Ok(())
}

fn load_settings(source: &SourceArgs) -> Result<Settings> {
    let settings = Settings::load(source.config.as_deref())?.with_data_source(source.input.clone());
    debug!(?settings, "resolved settings");
    Ok(settings)
}

#[cfg(feature = "plotting")]
fn render_chart(records: &[DailyRecord], path: Option<&Path>, show: bool) -> Result<()> {
    if path.is_none() && !show {
        return Ok(());
    }

    let chart = crate::writers::EtoChart::new(records)?;
    if let Some(path) = path {
        chart.write_html(path)?;
        println!("Wrote chart: {}", path.display());
    }
    if show {
        chart.show();
    }
    Ok(())
}

#[cfg(not(feature = "plotting"))]
fn render_chart(_records: &[DailyRecord], path: Option<&Path>, show: bool) -> Result<()> {
    if path.is_some() || show {
        tracing::warn!("built without the plotting feature, chart skipped");
    }
    Ok(())
}

fn create_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
