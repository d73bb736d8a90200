use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

/// Common viewport widths the grid is precomputed for.
#[derive(Debug, Clone, Copy, EnumIter, EnumString, Display, PartialEq, Eq, Hash)]
#[strum(serialize_all = "snake_case")]
pub enum ViewportPreset {
    Mobile,
    Tablet,
    Laptop,
    Desktop,
    Wide,
}

impl ViewportPreset {
    pub fn width(&self) -> f64 {
        match self {
            Self::Mobile => 375.0,
            Self::Tablet => 768.0,
            Self::Laptop => 1280.0,
            Self::Desktop => 1920.0,
            Self::Wide => 2560.0,
        }
    }
}

pub fn all_preset_widths() -> Vec<f64> {
    ViewportPreset::iter().map(|p| p.width()).collect()
}

/// Parses a comma separated list mixing preset names and pixel widths,
/// e.g. `"mobile,1024,wide"`.
pub fn parse_widths(list: &str) -> Result<Vec<f64>, String> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            if let Ok(preset) = s.parse::<ViewportPreset>() {
                return Ok(preset.width());
            }
            match s.parse::<f64>() {
                Ok(w) if w.is_finite() && w > 0.0 => Ok(w),
                _ => Err(format!("'{}' is neither a viewport preset nor a width", s)),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_parse_by_name() {
        assert_eq!("tablet".parse::<ViewportPreset>(), Ok(ViewportPreset::Tablet));
        assert_eq!(ViewportPreset::Desktop.to_string(), "desktop");
    }

    #[test]
    fn widths_mix_names_and_numbers() {
        assert_eq!(parse_widths("mobile, 1024 ,wide").unwrap(), vec![375.0, 1024.0, 2560.0]);
        assert!(parse_widths("phablet").is_err());
        assert!(parse_widths("-5").is_err());
    }

    #[test]
    fn preset_widths_ascend() {
        let widths = all_preset_widths();
        assert_eq!(widths.len(), 5);
        assert!(widths.windows(2).all(|w| w[0] < w[1]));
    }
}
