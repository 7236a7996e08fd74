//! Reader configuration.
//!
//! Hosts usually hand over their plugin parameters as a flat string map;
//! [`LibrariumConfig::from_params`] turns that map into a typed config.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_FILE_NAME: &str = "Librarium";
pub const DEFAULT_BACKGROUND_IMAGE: &str = "Translucent";

const PARAM_FILE_NAME: &str = "File Name";
const PARAM_INCLUDE_BACKGROUND: &str = "Include Background Image";
const PARAM_BACKGROUND_IMAGE: &str = "Background Image";

/// Where the catalog lives and how the book scene looks.
#[derive(Debug, Clone, PartialEq)]
pub struct LibrariumConfig {
    /// Directory holding the catalog document.
    pub data_dir: PathBuf,
    /// Catalog file name without the `.json` extension.
    pub file_name: String,
    /// Draw a background picture behind the book scene.
    pub include_background: bool,
    /// Picture drawn when `include_background` is set.
    pub background_image: String,
    pub flow: FlowSettings,
}

/// Text flow metrics shared by the content view and the layout API.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowSettings {
    pub line_height: f32,
    /// Horizontal space taken by an inline icon, gap included.
    pub icon_advance: f32,
    pub base_font_size: u32,
}

impl Default for FlowSettings {
    fn default() -> Self {
        Self {
            line_height: 36.0,
            icon_advance: 36.0,
            base_font_size: 28,
        }
    }
}

impl Default for LibrariumConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            file_name: DEFAULT_FILE_NAME.to_string(),
            include_background: false,
            background_image: DEFAULT_BACKGROUND_IMAGE.to_string(),
            flow: FlowSettings::default(),
        }
    }
}

impl LibrariumConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    pub fn with_file_name(mut self, name: impl Into<String>) -> Self {
        self.file_name = name.into();
        self
    }

    pub fn with_background(mut self, image: impl Into<String>) -> Self {
        self.include_background = true;
        self.background_image = image.into();
        self
    }

    pub fn with_flow(mut self, flow: FlowSettings) -> Self {
        self.flow = flow;
        self
    }

    /// Build a config from host plugin parameters.
    ///
    /// Recognized keys are `File Name`, `Include Background Image` (on when
    /// the value contains a `t`, so `T` and `true` both enable it) and
    /// `Background Image`. Missing keys keep their defaults.
    pub fn from_params(params: &HashMap<String, String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(name) = params.get(PARAM_FILE_NAME) {
            config.file_name = name.trim().to_string();
        }
        if let Some(flag) = params.get(PARAM_INCLUDE_BACKGROUND) {
            config.include_background = flag.chars().any(|c| c.eq_ignore_ascii_case(&'t'));
        }
        if let Some(image) = params.get(PARAM_BACKGROUND_IMAGE) {
            config.background_image = image.trim().to_string();
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.file_name.is_empty() {
            return Err(Error::InvalidConfig("catalog file name is empty".to_string()));
        }
        if self.include_background && self.background_image.is_empty() {
            return Err(Error::InvalidConfig(
                "background enabled without an image".to_string(),
            ));
        }
        if !is_positive(self.flow.line_height) {
            return Err(Error::InvalidConfig(format!(
                "line height must be positive, got {}",
                self.flow.line_height
            )));
        }
        if !is_positive(self.flow.icon_advance) {
            return Err(Error::InvalidConfig(format!(
                "icon advance must be positive, got {}",
                self.flow.icon_advance
            )));
        }
        Ok(())
    }

    /// `<data_dir>/<file_name>.json`
    pub fn catalog_path(&self) -> PathBuf {
        self.data_dir.join(format!("{}.json", self.file_name))
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

/// Finite and above zero; rejects NaN.
fn is_positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let config = LibrariumConfig::default();
        assert_eq!(config.catalog_path(), PathBuf::from("data/Librarium.json"));
        assert!(!config.include_background);
        assert_eq!(config.background_image, "Translucent");
    }

    #[test]
    fn test_from_params() {
        let config = LibrariumConfig::from_params(&params(&[
            ("File Name", "Books"),
            ("Include Background Image", "T"),
            ("Background Image", "Parchment"),
        ]))
        .unwrap();
        assert_eq!(config.file_name, "Books");
        assert!(config.include_background);
        assert_eq!(config.background_image, "Parchment");
    }

    #[test]
    fn test_background_flag_parsing() {
        for (value, expected) in [("T", true), ("true", true), ("F", false), ("False", false), ("", false)] {
            let config =
                LibrariumConfig::from_params(&params(&[("Include Background Image", value)])).unwrap();
            assert_eq!(config.include_background, expected, "value {value:?}");
        }
    }

    #[test]
    fn test_empty_file_name_is_invalid() {
        let err = LibrariumConfig::from_params(&params(&[("File Name", "  ")])).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn test_flow_metrics_must_be_positive() {
        for bad in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            let config = LibrariumConfig::new().with_flow(FlowSettings {
                line_height: bad,
                ..FlowSettings::default()
            });
            assert!(
                matches!(config.validate(), Err(Error::InvalidConfig(_))),
                "line height {bad}"
            );

            let config = LibrariumConfig::new().with_flow(FlowSettings {
                icon_advance: bad,
                ..FlowSettings::default()
            });
            assert!(
                matches!(config.validate(), Err(Error::InvalidConfig(_))),
                "icon advance {bad}"
            );
        }
        assert!(LibrariumConfig::new().validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = LibrariumConfig::new()
            .with_data_dir("/games/demo/data")
            .with_file_name("Tomes")
            .with_background("Library");
        assert_eq!(config.catalog_path(), PathBuf::from("/games/demo/data/Tomes.json"));
        assert!(config.include_background);
        assert!(config.validate().is_ok());
    }
}
