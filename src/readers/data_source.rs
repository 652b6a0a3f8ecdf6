use crate::error::{ProcessingError, Result};
use std::fs::File;
use std::io::{BufReader, Cursor, Read};
use std::path::PathBuf;
use tracing::info;

/// Where the station file comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Remote(String),
    Local(PathBuf),
}

impl DataSource {
    /// `http://` and `https://` locators are fetched, anything else is a path.
    pub fn parse(locator: &str) -> Self {
        let trimmed = locator.trim();
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            DataSource::Remote(trimmed.to_string())
        } else {
            DataSource::Local(PathBuf::from(trimmed))
        }
    }

    /// Open the source for reading. A remote source is downloaded in full
    /// with a single blocking request.
    pub fn open(&self) -> Result<Box<dyn Read>> {
        match self {
            DataSource::Local(path) => {
                info!(path = %path.display(), "reading station file");
                let file = File::open(path)?;
                Ok(Box::new(BufReader::new(file)))
            }
            DataSource::Remote(url) => {
                info!(%url, "downloading station file");
                let bytes = fetch(url)?;
                info!(bytes = bytes.len(), "download complete");
                Ok(Box::new(Cursor::new(bytes)))
            }
        }
    }
}

fn fetch(url: &str) -> Result<Vec<u8>> {
    let to_error = |source| ProcessingError::Http {
        url: url.to_string(),
        source,
    };

    let response = reqwest::blocking::get(url)
        .and_then(|r| r.error_for_status())
        .map_err(to_error)?;
    let bytes = response.bytes().map_err(to_error)?;

    if bytes.is_empty() {
        return Err(ProcessingError::MissingData(format!(
            "empty response from {}",
            url
        )));
    }

    Ok(bytes.to_vec())
}

impl std::fmt::Display for DataSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataSource::Remote(url) => write!(f, "{}", url),
            DataSource::Local(path) => write!(f, "{}", path.display()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_locator() {
        assert_eq!(
            DataSource::parse("https://example.org/data.csv"),
            DataSource::Remote("https://example.org/data.csv".to_string())
        );
        assert_eq!(
            DataSource::parse(" data/bushland.csv "),
            DataSource::Local(PathBuf::from("data/bushland.csv"))
        );
    }

    #[test]
    fn test_open_local_file() -> Result<()> {
        let mut temp_file = NamedTempFile::new()?;
        write!(temp_file, "Year,DOY,Time")?;

        let source = DataSource::Local(temp_file.path().to_path_buf());
        let mut contents = String::new();
        source.open()?.read_to_string(&mut contents)?;

        assert_eq!(contents, "Year,DOY,Time");
        Ok(())
    }

    #[test]
    fn test_missing_local_file_is_fatal() {
        let source = DataSource::parse("/nonexistent/station.csv");
        assert!(matches!(source.open(), Err(ProcessingError::Io(_))));
    }
}
