use crate::error::*;

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    Ps, Ns, Us, Ms,
}

impl TimeUnit {
    /// Matches a lower-case unit name. Returns `None` for anything else.
    pub fn from_string(s: impl AsRef<str>) -> Option<Self> {
        match s.as_ref() {
            "ms" => Some(Self::Ms),
            "us" => Some(Self::Us),
            "ns" => Some(Self::Ns),
            "ps" => Some(Self::Ps),
            _    => None
        }
    }

    /// Number of units in one second.
    pub fn per_second(&self) -> f64 {
        use TimeUnit::*;
        match self {
            Ms => 1e3,
            Us => 1e6,
            Ns => 1e9,
            Ps => 1e12,
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use TimeUnit::*;
        let s = match self {
            Ms => "ms",
            Us => "us",
            Ns => "ns",
            Ps => "ps",
        };
        f.write_str(s)
    }
}


/// Length of one VCD tick, e.g. `10 ps`.
///
/// Parsing collects every digit of the input as the multiplier and every
/// letter as the unit, so `"10ps"`, `"10 ps"` and `"1 0p s"` are the same.
/// A multiplier that is missing or does not fit is an error. An unknown unit
/// is not: the timescale silently becomes `1 us` while keeping the header
/// text, unless parsed with [`Timescale::parse_strict`].
#[derive(Debug, Clone, PartialEq)]
pub struct Timescale {
    multiplier: u32,
    unit: TimeUnit,
    fallback: bool,
    header: String,
}

impl Timescale {
    pub const DEFAULT: &'static str = "1 us";

    pub fn parse(s: impl AsRef<str>) -> Result<Self> {
        Self::parse_with(s.as_ref(), false)
    }

    pub fn parse_strict(s: impl AsRef<str>) -> Result<Self> {
        Self::parse_with(s.as_ref(), true)
    }

    fn parse_with(s: &str, strict: bool) -> Result<Self> {
        let digits: String = s.chars()
            .filter(|c| c.is_ascii_digit())
            .collect();
        let letters: String = s.chars()
            .filter(|c| c.is_alphabetic())
            .collect();

        let multiplier: u32 = digits.parse()
            .map_err(|_| Error::InvalidMultiplier(s.to_string()))?;
        let header = format!("{} {}", digits, letters);

        match TimeUnit::from_string(letters.to_lowercase()) {
            Some(_) if multiplier == 0 => Err(Error::InvalidMultiplier(s.to_string())),

            Some(unit) => Ok(Self {
                multiplier,
                unit,
                fallback: false,
                header,
            }),

            None if strict => Err(Error::UnknownUnit(letters)),

            None => Ok(Self {
                multiplier: 1,
                unit: TimeUnit::Us,
                fallback: true,
                header,
            }),
        }
    }

    pub fn multiplier(&self) -> u32 {
        self.multiplier
    }

    pub fn unit(&self) -> TimeUnit {
        self.unit
    }

    /// True if the unit was not recognized and `1 us` is used instead.
    pub fn is_fallback(&self) -> bool {
        self.fallback
    }

    /// Text for the `$timescale` section: digits and unit as given.
    pub fn header(&self) -> &str {
        &self.header
    }

    /// Converts a time in seconds into whole ticks, rounding down.
    ///
    /// Returns `None` if the result is negative, not finite or too large.
    pub fn ticks(&self, seconds: f64) -> Option<u64> {
        let ticks = (seconds * self.unit.per_second() / self.multiplier as f64).floor();

        if ticks.is_finite() && ticks >= 0.0 && ticks < u64::MAX as f64 {
            Some(ticks as u64)
        } else {
            None
        }
    }
}

impl Default for Timescale {
    fn default() -> Self {
        Self {
            multiplier: 1,
            unit: TimeUnit::Us,
            fallback: false,
            header: Self::DEFAULT.to_string(),
        }
    }
}

impl fmt::Display for Timescale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.multiplier, self.unit)
    }
}


#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_timescale_parse() {
        let ts = Timescale::parse("10ps").unwrap();
        assert_eq!(10, ts.multiplier());
        assert_eq!(TimeUnit::Ps, ts.unit());
        assert_eq!("10 ps", ts.header());
        assert!(!ts.is_fallback());

        let ts = Timescale::parse("1 us").unwrap();
        assert_eq!(Timescale::default(), ts);

        let ts = Timescale::parse("100 NS").unwrap();
        assert_eq!(100, ts.multiplier());
        assert_eq!(TimeUnit::Ns, ts.unit());
        assert_eq!("100 NS", ts.header());
    }

    #[test]
    fn test_timescale_fallback() {
        let ts = Timescale::parse("7xx").unwrap();
        assert!(ts.is_fallback());
        assert_eq!(1, ts.multiplier());
        assert_eq!(TimeUnit::Us, ts.unit());
        assert_eq!("7 xx", ts.header());

        // zero is only rejected when it would be used
        assert!(Timescale::parse("0 fs").unwrap().is_fallback());

        assert!(matches!(Timescale::parse_strict("7xx"), Err(Error::UnknownUnit(u)) if u == "xx"));
    }

    #[test]
    fn test_timescale_bad_multiplier() {
        assert!(matches!(Timescale::parse("us"), Err(Error::InvalidMultiplier(_))));
        assert!(matches!(Timescale::parse(""), Err(Error::InvalidMultiplier(_))));
        assert!(matches!(Timescale::parse("0 ns"), Err(Error::InvalidMultiplier(_))));
        assert!(matches!(Timescale::parse("99999999999 ps"), Err(Error::InvalidMultiplier(_))));
        // multiplier failure wins over the unit fallback
        assert!(matches!(Timescale::parse("xx"), Err(Error::InvalidMultiplier(_))));
    }

    #[test]
    fn test_timescale_ticks() {
        let ts = Timescale::parse("10ns").unwrap();
        assert_eq!(Some(5), ts.ticks(0.000000055));

        let ts = Timescale::default();
        assert_eq!(Some(123), ts.ticks(0.000123));
        assert_eq!(Some(0), ts.ticks(0.0));
        assert_eq!(Some(0), ts.ticks(0.0000007));

        let ts = Timescale::parse("7xx").unwrap();
        assert_eq!(Some(2), ts.ticks(0.000002));

        let ts = Timescale::parse("1ms").unwrap();
        assert_eq!(Some(1500), ts.ticks(1.5));

        assert_eq!(None, ts.ticks(-1.0));
        assert_eq!(None, ts.ticks(f64::NAN));
        assert_eq!(None, ts.ticks(f64::INFINITY));
    }
}
