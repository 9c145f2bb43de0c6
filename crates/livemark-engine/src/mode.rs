//! # Display Modes
//!
//! The three ways a document can be shown:
//!
//! - **`Source`**: raw text, no annotations at all
//! - **`LivePreview`**: annotations everywhere except the cursor's line
//! - **`Reading`**: annotations everywhere, cursor line included
//!
//! Modes only ever change through an explicit set-mode event; they are never
//! inferred from document content.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ParseModeError, ParseThemeError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DisplayMode {
    Source,
    #[default]
    LivePreview,
    Reading,
}

impl DisplayMode {
    /// Order used when cycling through modes.
    pub const CYCLE: [DisplayMode; 3] = [
        DisplayMode::Source,
        DisplayMode::LivePreview,
        DisplayMode::Reading,
    ];

    /// The mode after this one in [`DisplayMode::CYCLE`], wrapping around.
    pub fn next(self) -> Self {
        match self {
            DisplayMode::Source => DisplayMode::LivePreview,
            DisplayMode::LivePreview => DisplayMode::Reading,
            DisplayMode::Reading => DisplayMode::Source,
        }
    }

    /// Configuration/wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            DisplayMode::Source => "source",
            DisplayMode::LivePreview => "live-preview",
            DisplayMode::Reading => "reading",
        }
    }

    /// Human-readable label for status displays.
    pub fn label(self) -> &'static str {
        match self {
            DisplayMode::Source => "Source",
            DisplayMode::LivePreview => "Live Preview",
            DisplayMode::Reading => "Reading",
        }
    }

    /// Whether any annotations are produced in this mode.
    pub fn decorates(self) -> bool {
        self != DisplayMode::Source
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DisplayMode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "source" => Ok(DisplayMode::Source),
            "live-preview" => Ok(DisplayMode::LivePreview),
            "reading" => Ok(DisplayMode::Reading),
            other => Err(ParseModeError {
                value: other.to_string(),
            }),
        }
    }
}

/// Visual theme. Has no effect on which annotations are produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = ParseThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(ParseThemeError {
                value: other.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn default_mode_is_live_preview() {
        assert_eq!(DisplayMode::default(), DisplayMode::LivePreview);
    }

    #[test]
    fn three_cycles_return_to_start() {
        for start in DisplayMode::CYCLE {
            assert_eq!(start.next().next().next(), start);
        }
    }

    #[test]
    fn cycle_order_matches_constant() {
        assert_eq!(DisplayMode::Source.next(), DisplayMode::LivePreview);
        assert_eq!(DisplayMode::LivePreview.next(), DisplayMode::Reading);
        assert_eq!(DisplayMode::Reading.next(), DisplayMode::Source);
    }

    #[rstest]
    #[case("source", DisplayMode::Source)]
    #[case("live-preview", DisplayMode::LivePreview)]
    #[case("reading", DisplayMode::Reading)]
    #[case(" reading ", DisplayMode::Reading)]
    fn parses_mode_names(#[case] input: &str, #[case] expected: DisplayMode) {
        assert_eq!(input.parse::<DisplayMode>(), Ok(expected));
    }

    #[test]
    fn rejects_unknown_mode() {
        let err = "preview".parse::<DisplayMode>().unwrap_err();
        assert_eq!(err.value, "preview");
        assert!(err.to_string().contains("preview"));
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for mode in DisplayMode::CYCLE {
            assert_eq!(mode.to_string().parse::<DisplayMode>(), Ok(mode));
        }
    }

    #[test]
    fn labels_are_human_readable() {
        assert_eq!(DisplayMode::LivePreview.label(), "Live Preview");
        assert_eq!(DisplayMode::Source.label(), "Source");
        assert_eq!(DisplayMode::Reading.label(), "Reading");
    }

    #[test]
    fn only_source_disables_decoration() {
        assert!(!DisplayMode::Source.decorates());
        assert!(DisplayMode::LivePreview.decorates());
        assert!(DisplayMode::Reading.decorates());
    }

    #[test]
    fn themes_parse_and_default_to_dark() {
        assert_eq!(Theme::default(), Theme::Dark);
        assert_eq!("light".parse::<Theme>(), Ok(Theme::Light));
        assert!("solarized".parse::<Theme>().is_err());
    }
}
