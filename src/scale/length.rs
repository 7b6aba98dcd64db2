use std::fmt;
use std::str::FromStr;

/// A requested size for one side of the frame.
///
/// Parsed from the command line: `720` is an absolute pixel count, `50%`
/// is relative to the matching side of the source. `0` is a valid value
/// (it asks for the video track to be removed).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Length {
    /// Absolute size in pixels.
    Pixels(u32),
    /// Percentage of the source dimension.
    Percent(f64),
}

impl Length {
    /// Resolve this length against a source dimension.
    ///
    /// ```
    /// use ffscale::scale::Length;
    ///
    /// assert_eq!(Length::Percent(50.0).resolve(1920), 960);
    /// assert_eq!(Length::Pixels(720).resolve(1920), 720);
    /// ```
    pub fn resolve(self, source: u32) -> u32 {
        match self {
            Length::Pixels(pixels) => pixels,
            Length::Percent(percent) => round_nearest(source as f64 * percent / 100.0),
        }
    }
}

/// Round to the nearest integer, halves away from zero.
///
/// The float-to-int cast saturates, so huge values clamp to `u32::MAX`
/// and negative values to 0.
pub fn round_nearest(value: f64) -> u32 {
    value.round() as u32
}

/// Error returned when a length cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid length '{input}': expected pixels (e.g. 720) or a percentage (e.g. 50%)")]
pub struct ParseLengthError {
    input: String,
}

impl FromStr for Length {
    type Err = ParseLengthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseLengthError {
            input: s.to_string(),
        };
        let trimmed = s.trim();

        if let Some(number) = trimmed.strip_suffix('%') {
            let percent: f64 = number.trim().parse().map_err(|_| err())?;
            if !percent.is_finite() || percent < 0.0 {
                return Err(err());
            }
            return Ok(Length::Percent(percent));
        }

        trimmed.parse().map(Length::Pixels).map_err(|_| err())
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Length::Pixels(pixels) => write!(f, "{}", pixels),
            Length::Percent(percent) => write!(f, "{}%", percent),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pixels() {
        assert_eq!("720".parse::<Length>(), Ok(Length::Pixels(720)));
        assert_eq!(" 1080 ".parse::<Length>(), Ok(Length::Pixels(1080)));
        assert_eq!("0".parse::<Length>(), Ok(Length::Pixels(0)));
    }

    #[test]
    fn test_parse_percent() {
        assert_eq!("50%".parse::<Length>(), Ok(Length::Percent(50.0)));
        assert_eq!("12.5%".parse::<Length>(), Ok(Length::Percent(12.5)));
        assert_eq!("0%".parse::<Length>(), Ok(Length::Percent(0.0)));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for input in ["", "%", "-5", "-5%", "abc", "50 px", "1.5", "inf%", "NaN%", "50%%"] {
            assert!(input.parse::<Length>().is_err(), "accepted {:?}", input);
        }
    }

    #[test]
    fn test_parse_error_message() {
        let err = "wide".parse::<Length>().unwrap_err();
        assert!(err.to_string().starts_with("invalid length 'wide'"));
    }

    #[test]
    fn test_resolve_percent() {
        assert_eq!(Length::Percent(50.0).resolve(1920), 960);
        assert_eq!(Length::Percent(200.0).resolve(1080), 2160);
        assert_eq!(Length::Percent(33.3).resolve(1080), 360);
        assert_eq!(Length::Percent(0.0).resolve(1080), 0);
    }

    #[test]
    fn test_resolve_percent_rounds_half_up() {
        // 25% of 1002 is exactly 250.5
        assert_eq!(Length::Percent(25.0).resolve(1002), 251);
        assert_eq!(Length::Percent(10.0).resolve(1004), 100);
    }

    #[test]
    fn test_resolve_pixels_ignores_source() {
        assert_eq!(Length::Pixels(640).resolve(1920), 640);
        assert_eq!(Length::Pixels(640).resolve(10), 640);
    }

    #[test]
    fn test_round_nearest_saturates() {
        assert_eq!(round_nearest(1e20), u32::MAX);
        assert_eq!(round_nearest(-3.0), 0);
        assert_eq!(round_nearest(2.5), 3);
        assert_eq!(round_nearest(2.4999), 2);
    }

    #[test]
    fn test_display() {
        assert_eq!(Length::Pixels(720).to_string(), "720");
        assert_eq!(Length::Percent(50.0).to_string(), "50%");
    }
}
