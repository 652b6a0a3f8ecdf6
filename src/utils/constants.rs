/// Bushland, TX 15-minute station data (spring 2018)
pub const DEFAULT_DATA_SOURCE: &str =
    "https://drive.google.com/uc?id=1K7vnCpK8tElmE-VfyMiN4pQSQEAkOrTE";

/// Bushland site: high plains of Texas
pub const DEFAULT_ELEVATION_M: f64 = 992.0;
pub const DEFAULT_LATITUDE_DEG: f64 = 35.1905;

/// Input column names
pub const COL_YEAR: &str = "Year";
pub const COL_DOY: &str = "DOY";
pub const COL_TIME: &str = "Time";

/// Encoded time of day
pub const MAX_ENCODED_TIME: u32 = 2400;
pub const END_OF_DAY_TIME: &str = "23:59";
pub const TIMESTAMP_FORMAT: &str = "%Y-%j %H:%M";

/// Plausibility bounds (exclusive)
pub const AIR_TEMP_BOUNDS: (f64, f64) = (-30.0, 45.0);
pub const REL_HUMIDITY_BOUNDS: (f64, f64) = (0.0, 100.0);
pub const SOLAR_RADIATION_BOUNDS: (f64, f64) = (0.0, 2000.0);
pub const WIND_SPEED_BOUNDS: (f64, f64) = (0.0, 18.0);
pub const PRESSURE_BOUNDS: (f64, f64) = (0.0, 120.0);
pub const RAINFALL_BOUNDS: (f64, f64) = (0.0, 200.0);

/// W/m² averaged over a day to MJ/m²/day
pub const W_M2_TO_MJ_M2_DAY: f64 = 0.0864;

/// FAO-56 constants
pub const SOLAR_CONSTANT: f64 = 0.0820; // MJ m^-2 min^-1
pub const ALBEDO: f64 = 0.23;
pub const STEFAN_BOLTZMANN: f64 = 4.903e-9; // MJ K^-4 m^-2 day^-1
pub const PSYCHROMETRIC_COEFF: f64 = 0.000665;
pub const MJ_TO_MM_WATER: f64 = 0.408;
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Environment prefix for settings overrides, e.g. ETO_SITE__LATITUDE_DEG
pub const ENV_PREFIX: &str = "ETO";

/// Processing defaults
pub const DEFAULT_ROW_GROUP_SIZE: usize = 10000;

/// Parquet compression options
pub const COMPRESSION_SNAPPY: &str = "snappy";
pub const COMPRESSION_GZIP: &str = "gzip";
pub const COMPRESSION_LZ4: &str = "lz4";
pub const COMPRESSION_ZSTD: &str = "zstd";
pub const COMPRESSION_NONE: &str = "none";
