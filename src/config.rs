use crate::{
    error::{Error, Result},
    greetings,
};
use serde::Deserialize;
use std::path::Path;

/// Settings read from the optional TOML file passed on the command line.
/// Lengths are in dp.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub title: String,
    pub width: f32,
    pub height: f32,
    pub page_inset: f32,
    pub heading_gap: f32,
    pub list_inset: f32,
    /// Distance scrolled per mouse wheel line or arrow key press.
    pub line_scroll: f32,
    /// Families tried, in order, for the default typeface.
    pub system_families: Vec<String>,
    /// System families registered under the `Noto` typeface when installed.
    pub noto_families: Vec<String>,
    pub greetings: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            title: "Fonts".to_owned(),
            width: 800.0,
            height: 700.0,
            page_inset: 30.0,
            heading_gap: 20.0,
            list_inset: 20.0,
            line_scroll: 40.0,
            system_families: [
                "sans-serif",
                "DejaVu Sans",
                "Liberation Sans",
                "Noto Sans",
                "Cantarell",
                "Helvetica",
                "Segoe UI",
            ]
            .iter()
            .map(|family| (*family).to_owned())
            .collect(),
            noto_families: [
                "Noto Sans",
                "Noto Sans CJK SC",
                "Noto Sans Devanagari",
                "Noto Sans Arabic",
                "Noto Sans Bengali",
                "Noto Sans Telugu",
                "Noto Sans Tamil",
                "Noto Sans Gurmukhi",
                "Noto Sans Gujarati",
                "Noto Sans Kannada",
                "Noto Sans Thai",
            ]
            .iter()
            .map(|family| (*family).to_owned())
            .collect(),
            greetings: greetings::default_greetings(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Config> {
        let contents = std::fs::read_to_string(path).map_err(|source| Error::ReadConfig {
            path: path.into(),
            source,
        })?;
        let config: Config = toml::from_str(&contents).map_err(|source| Error::ParseConfig {
            path: path.into(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.width > 0.0 && self.height > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "window size must be positive, got {}x{}",
                self.width, self.height
            )));
        }

        let lengths = [
            ("page_inset", self.page_inset),
            ("heading_gap", self.heading_gap),
            ("list_inset", self.list_inset),
            ("line_scroll", self.line_scroll),
        ];
        for (name, value) in lengths.iter() {
            if !(*value >= 0.0) {
                return Err(Error::InvalidConfig(format!(
                    "{} must not be negative, got {}",
                    name, value
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
            title = "More fonts"
            greetings = ["• Hej världen!"]
            "#,
        )
        .unwrap();

        assert_eq!(config.title, "More fonts");
        assert_eq!(config.greetings, vec!["• Hej världen!".to_owned()]);
        assert_eq!(config.width, 800.0);
        assert_eq!(config.page_inset, 30.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(toml::from_str::<Config>("colour = \"red\"").is_err());
    }

    #[test]
    fn validate_rejects_bad_lengths() {
        let config = Config {
            height: 0.0,
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));

        let config = Config {
            list_inset: -1.0,
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn load_reports_missing_file() {
        let err = Config::load(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, Error::ReadConfig { .. }));
    }
}
