//! Settings and exchange-rate-snapshot loading from files (§6.3, §6.4):
//! read the file, map an I/O failure and a parse failure to distinct
//! error variants.

use std::fs;
use std::path::Path;

use calc_core::Settings;

#[derive(Debug)]
pub enum ConfigError {
    Io(std::path::PathBuf, String),
    Parse(std::path::PathBuf, String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(path, e) => write!(f, "failed to read {}: {e}", path.display()),
            ConfigError::Parse(path, e) => write!(f, "failed to parse {}: {e}", path.display()),
        }
    }
}

impl std::error::Error for ConfigError {}

pub fn load_settings(path: &Path) -> Result<Settings, ConfigError> {
    let content = fs::read_to_string(path).map_err(|e| ConfigError::Io(path.to_path_buf(), e.to_string()))?;
    toml::from_str(&content).map_err(|e| ConfigError::Parse(path.to_path_buf(), e.to_string()))
}

pub fn load_rates_json(path: &Path) -> Result<String, ConfigError> {
    fs::read_to_string(path).map_err(|e| ConfigError::Io(path.to_path_buf(), e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_settings_overriding_just_the_given_fields() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, r#"
            angle_unit = "Degree"

            [format]
            precision = "Auto"
            decimal_separator = ","
            grouping_separator = "Comma"
            grouping_style = "Triples"
            date_template = "YYYY-MM-DD"
            time_format = "Hour24"
            datetime_order = "DateThenTime"
            imperial_variant = "Us"
            unit_display = "Symbol"
        "#).unwrap();
        let settings = load_settings(file.path()).unwrap();
        assert_eq!(settings.format.decimal_separator, ',');
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let result = load_settings(Path::new("/nonexistent/settings.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_, _))));
    }
}
