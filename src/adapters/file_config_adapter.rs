//! INI file configuration adapter backed by configparser.

use configparser::ini::Ini;
use std::path::Path;

use crate::domain::error::StocklabError;
use crate::ports::config_port::ConfigPort;

pub struct FileConfigAdapter {
    ini: Ini,
}

impl FileConfigAdapter {
    pub fn from_file(path: &Path) -> Result<Self, StocklabError> {
        let mut ini = Ini::new();
        ini.load(path).map_err(|e| StocklabError::ConfigParse {
            file: path.display().to_string(),
            reason: e,
        })?;
        Ok(Self { ini })
    }

    pub fn from_string(content: &str) -> Result<Self, StocklabError> {
        let mut ini = Ini::new();
        ini.read(content.to_string())
            .map_err(|e| StocklabError::ConfigParse {
                file: "<inline>".to_string(),
                reason: e,
            })?;
        Ok(Self { ini })
    }
}

impl ConfigPort for FileConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.ini.get(section, key)
    }

    fn get_int(&self, section: &str, key: &str, default: i64) -> i64 {
        self.ini
            .getint(section, key)
            .ok()
            .flatten()
            .unwrap_or(default)
    }

    fn get_double(&self, section: &str, key: &str, default: f64) -> f64 {
        self.ini
            .getfloat(section, key)
            .ok()
            .flatten()
            .unwrap_or(default)
    }
}
