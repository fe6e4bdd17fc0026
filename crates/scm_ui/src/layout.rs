//! Layout values for drawn text: dimensions, alignment and case.

use std::str::FromStr;

use crate::error::UiError;

/// A length that is either absolute or relative to a screen dimension.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Dimension {
    /// Screen units.
    Fixed(f32),
    /// Percentage of the reference dimension (`25.0` means 25%).
    Percent(f32),
}

impl Dimension {
    /// Resolves against `reference` (screen width for x, height for y).
    #[must_use]
    pub fn resolve(self, reference: f32) -> f32 {
        match self {
            Self::Fixed(value) => value,
            Self::Percent(percent) => reference * percent / 100.0,
        }
    }
}

impl From<f32> for Dimension {
    fn from(value: f32) -> Self {
        Self::Fixed(value)
    }
}

impl FromStr for Dimension {
    type Err = UiError;

    /// Parses `"12.5"` as fixed and `"25%"` as a percentage.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || UiError::InvalidPercent(s.to_owned());
        let trimmed = s.trim();
        if let Some(percent) = trimmed.strip_suffix('%') {
            let value: f32 = percent.trim().parse().map_err(|_| invalid())?;
            return value.is_finite().then_some(Self::Percent(value)).ok_or_else(invalid);
        }
        let value: f32 = trimmed.parse().map_err(|_| invalid())?;
        value.is_finite().then_some(Self::Fixed(value)).ok_or_else(invalid)
    }
}

/// Parses an opacity string into a ratio: `"50%"` is `0.5`, `"0.25"` is `0.25`.
///
/// # Errors
///
/// [`UiError::InvalidPercent`] if the string is neither form.
pub fn parse_ratio(s: &str) -> Result<f32, UiError> {
    match s.parse::<Dimension>()? {
        Dimension::Percent(percent) => Ok(percent / 100.0),
        Dimension::Fixed(ratio) => Ok(ratio),
    }
}

/// Horizontal text alignment. Exactly one applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    /// Left aligned.
    #[default]
    Left,
    /// Centered on the x position.
    Center,
    /// Right aligned to the x position.
    Right,
}

/// Case transform applied right before the text is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextCase {
    /// Leave the text as is.
    #[default]
    Keep,
    /// UPPERCASE.
    Upper,
    /// lowercase.
    Lower,
}

impl TextCase {
    /// Applies the transform and trims trailing whitespace.
    #[must_use]
    pub fn apply(self, text: &str) -> String {
        let text = text.trim_end();
        match self {
            Self::Keep => text.to_owned(),
            Self::Upper => text.to_uppercase(),
            Self::Lower => text.to_lowercase(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimension_parse() {
        assert_eq!("25%".parse::<Dimension>().unwrap(), Dimension::Percent(25.0));
        assert_eq!(" 12.5 ".parse::<Dimension>().unwrap(), Dimension::Fixed(12.5));
        assert_eq!("-3".parse::<Dimension>().unwrap(), Dimension::Fixed(-3.0));
        for bad in ["", "%", "abc%", "12px", "inf", "NaN%"] {
            assert!(bad.parse::<Dimension>().is_err(), "{bad:?}");
        }
    }

    #[test]
    fn test_dimension_resolve() {
        assert!((Dimension::Percent(50.0).resolve(640.0) - 320.0).abs() < f32::EPSILON);
        assert!((Dimension::Percent(25.0).resolve(448.0) - 112.0).abs() < f32::EPSILON);
        assert!((Dimension::Fixed(10.0).resolve(448.0) - 10.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_parse_ratio() {
        assert!((parse_ratio("50%").unwrap() - 0.5).abs() < f32::EPSILON);
        assert!((parse_ratio("0.25").unwrap() - 0.25).abs() < f32::EPSILON);
        assert_eq!(parse_ratio("half"), Err(UiError::InvalidPercent("half".into())));
    }

    #[test]
    fn test_case_trims_trailing_whitespace_only() {
        assert_eq!(TextCase::Keep.apply("  Mission Passed!  \n"), "  Mission Passed!");
        assert_eq!(TextCase::Upper.apply("go go go \t"), "GO GO GO");
        assert_eq!(TextCase::Lower.apply("WASTED "), "wasted");
    }
}
