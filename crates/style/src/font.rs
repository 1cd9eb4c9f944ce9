use serde::{Deserialize, Deserializer, Serialize, de};

use crate::legacy::LegacyStyle;
use crate::StyleParseError;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[derive(Default)]
pub enum FontWeight {
    Thin,
    Light,
    #[default]
    Regular,
    Medium,
    Bold,
    Black,
    Numeric(u16),
}

impl FontWeight {
    /// Returns the numeric weight value (100-900 scale).
    ///
    /// Standard CSS font-weight values:
    /// - Thin: 100
    /// - Light: 300
    /// - Regular: 400
    /// - Medium: 500
    /// - Bold: 700
    /// - Black: 900
    pub fn numeric_value(&self) -> u16 {
        match self {
            FontWeight::Thin => 100,
            FontWeight::Light => 300,
            FontWeight::Regular => 400,
            FontWeight::Medium => 500,
            FontWeight::Bold => 700,
            FontWeight::Black => 900,
            FontWeight::Numeric(n) => *n,
        }
    }

    /// Maps a raw numeric weight back onto the named variants where one exists.
    pub fn from_numeric(value: u16) -> Self {
        match value {
            100 => FontWeight::Thin,
            300 => FontWeight::Light,
            400 => FontWeight::Regular,
            500 => FontWeight::Medium,
            700 => FontWeight::Bold,
            900 => FontWeight::Black,
            n => FontWeight::Numeric(n),
        }
    }

    /// Parse a font weight from a string (e.g., "bold", "400")
    pub fn parse(s: &str) -> Result<Self, StyleParseError> {
        match s.to_lowercase().as_str() {
            "thin" => Ok(FontWeight::Thin),
            "light" => Ok(FontWeight::Light),
            "regular" | "normal" => Ok(FontWeight::Regular),
            "medium" => Ok(FontWeight::Medium),
            "bold" => Ok(FontWeight::Bold),
            "black" => Ok(FontWeight::Black),
            _ => s
                .parse::<u16>()
                .map(FontWeight::from_numeric)
                .map_err(|_| StyleParseError::InvalidValue {
                    property: "font-weight".to_string(),
                    value: s.to_string(),
                }),
        }
    }
}

impl<'de> Deserialize<'de> for FontWeight {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum FontWeightDef {
            Str(String),
            Num(u16),
        }

        match FontWeightDef::deserialize(deserializer)? {
            FontWeightDef::Str(s) => Self::parse(&s).map_err(de::Error::custom),
            FontWeightDef::Num(n) => Ok(FontWeight::from_numeric(n)),
        }
    }
}

/// Horizontal width class, following the OS/2 `usWidthClass` scale.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum FontWidth {
    UltraCondensed,
    ExtraCondensed,
    Condensed,
    SemiCondensed,
    #[default]
    Normal,
    SemiExpanded,
    Expanded,
    ExtraExpanded,
    UltraExpanded,
}

impl FontWidth {
    /// Returns the width class on the 1-9 scale.
    pub fn numeric_value(&self) -> u16 {
        match self {
            FontWidth::UltraCondensed => 1,
            FontWidth::ExtraCondensed => 2,
            FontWidth::Condensed => 3,
            FontWidth::SemiCondensed => 4,
            FontWidth::Normal => 5,
            FontWidth::SemiExpanded => 6,
            FontWidth::Expanded => 7,
            FontWidth::ExtraExpanded => 8,
            FontWidth::UltraExpanded => 9,
        }
    }

    /// Values outside 1-9 are clamped to the nearest class.
    pub fn from_numeric(value: u16) -> Self {
        match value {
            0 | 1 => FontWidth::UltraCondensed,
            2 => FontWidth::ExtraCondensed,
            3 => FontWidth::Condensed,
            4 => FontWidth::SemiCondensed,
            5 => FontWidth::Normal,
            6 => FontWidth::SemiExpanded,
            7 => FontWidth::Expanded,
            8 => FontWidth::ExtraExpanded,
            _ => FontWidth::UltraExpanded,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum FontSlant {
    #[default]
    Upright,
    Italic,
    Oblique,
}

/// A structured font style request or description.
///
/// The manager layer treats this as opaque data; only backends interpret it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(default)]
pub struct FontStyle {
    pub weight: FontWeight,
    pub width: FontWidth,
    pub slant: FontSlant,
}

impl FontStyle {
    pub fn new(weight: FontWeight, width: FontWidth, slant: FontSlant) -> Self {
        Self { weight, width, slant }
    }

    pub fn normal() -> Self {
        Self::default()
    }

    pub fn bold() -> Self {
        Self::new(FontWeight::Bold, FontWidth::Normal, FontSlant::Upright)
    }

    pub fn italic() -> Self {
        Self::new(FontWeight::Regular, FontWidth::Normal, FontSlant::Italic)
    }

    pub fn bold_italic() -> Self {
        Self::new(FontWeight::Bold, FontWidth::Normal, FontSlant::Italic)
    }

    /// Expands a coarse bold/italic bitmask into a full style.
    pub fn from_legacy(bits: LegacyStyle) -> Self {
        let weight = if bits.is_bold() {
            FontWeight::Bold
        } else {
            FontWeight::Regular
        };
        let slant = if bits.is_italic() {
            FontSlant::Italic
        } else {
            FontSlant::Upright
        };
        Self::new(weight, FontWidth::Normal, slant)
    }

    /// Collapses this style into the legacy bitmask. Weights of 600 and above count as bold.
    pub fn to_legacy(&self) -> LegacyStyle {
        let mut bits = LegacyStyle::NORMAL;
        if self.weight.numeric_value() >= 600 {
            bits |= LegacyStyle::BOLD;
        }
        if self.slant != FontSlant::Upright {
            bits |= LegacyStyle::ITALIC;
        }
        bits
    }

    /// A coarse dissimilarity score between two styles; lower is closer.
    ///
    /// Slant mismatches dominate, then width, then weight. Italic and oblique
    /// are treated as near neighbours.
    pub fn distance(&self, other: &FontStyle) -> u32 {
        let slant = match (self.slant, other.slant) {
            (a, b) if a == b => 0,
            (FontSlant::Italic, FontSlant::Oblique) | (FontSlant::Oblique, FontSlant::Italic) => 1,
            _ => 2,
        };
        let width = self.width.numeric_value().abs_diff(other.width.numeric_value()) as u32;
        let weight = self.weight.numeric_value().abs_diff(other.weight.numeric_value()) as u32;
        slant * 100_000 + width * 1_000 + weight
    }
}
