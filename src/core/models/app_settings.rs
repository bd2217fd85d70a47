use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use super::LanguageHint;
use crate::global_constants;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub credential_file: PathBuf,
    pub spreadsheet_name: String,
    pub languages: LanguageHint,
    pub tesseract_command: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            credential_file: PathBuf::from(global_constants::DEFAULT_CREDENTIAL_FILE),
            spreadsheet_name: global_constants::DEFAULT_SPREADSHEET_NAME.to_string(),
            languages: LanguageHint::default(),
            tesseract_command: global_constants::DEFAULT_TESSERACT_COMMAND.to_string(),
        }
    }
}

impl AppSettings {
    /// Reads the optional settings file. Nothing is ever written back.
    pub fn load() -> anyhow::Result<Self> {
        let settings_path = Self::get_settings_file_path()?;
        Self::load_from_path(&settings_path)
    }

    pub fn load_from_path(settings_path: &Path) -> anyhow::Result<Self> {
        if !settings_path.exists() {
            log::info!("[SETTINGS] No settings file found, using defaults");
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(settings_path)
            .with_context(|| format!("Failed to read {}", settings_path.display()))?;
        let settings: AppSettings = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse {}", settings_path.display()))?;

        log::info!("[SETTINGS] Loaded settings from {:?}", settings_path);
        log::debug!("[SETTINGS] Spreadsheet: {}", settings.spreadsheet_name);
        log::debug!("[SETTINGS] Credential file: {:?}", settings.credential_file);

        Ok(settings)
    }

    fn get_settings_file_path() -> anyhow::Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?
            .join(global_constants::SETTINGS_DIRECTORY_NAME);

        Ok(config_dir.join(global_constants::SETTINGS_FILE_NAME))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_settings_default_values() {
        let settings = AppSettings::default();

        assert_eq!(
            settings.credential_file,
            PathBuf::from("your-service-account.json")
        );
        assert_eq!(settings.spreadsheet_name, "OCR Logs");
        assert_eq!(settings.languages.tesseract_code(), "tha+eng");
        assert_eq!(settings.tesseract_command, "tesseract");
    }

    #[test]
    fn test_app_settings_deserialization_fills_missing_fields() {
        let json = r#"{ "spreadsheet_name": "Receipts" }"#;

        let settings: AppSettings = serde_json::from_str(json).unwrap();

        assert_eq!(settings.spreadsheet_name, "Receipts");
        assert_eq!(settings.tesseract_command, "tesseract");
        assert_eq!(settings.languages, LanguageHint::default());
    }

    #[test]
    fn test_load_from_missing_path_returns_defaults() {
        let temp_dir = tempfile::tempdir().unwrap();

        let settings = AppSettings::load_from_path(&temp_dir.path().join("absent.json")).unwrap();

        assert_eq!(settings, AppSettings::default());
    }

    #[test]
    fn test_load_from_path_reads_written_settings() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("settings.json");
        let original = AppSettings {
            credential_file: PathBuf::from("/secrets/key.json"),
            spreadsheet_name: "Invoices".to_string(),
            languages: LanguageHint {
                primary: "deu".to_string(),
                secondary: "eng".to_string(),
            },
            tesseract_command: "/opt/tesseract/bin/tesseract".to_string(),
        };
        std::fs::write(&path, serde_json::to_string_pretty(&original).unwrap()).unwrap();

        let loaded = AppSettings::load_from_path(&path).unwrap();

        assert_eq!(loaded, original);
    }

    #[test]
    fn test_load_from_path_rejects_malformed_json() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("settings.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(AppSettings::load_from_path(&path).is_err());
    }
}
