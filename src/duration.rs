//! Duration parsing and formatting shared by every CMS update path.
//!
//! Durations are held as whole seconds (`u32`). Two textual encodings exist
//! at the boundary: clock form (`M:SS`, `MM:SS`, `H:MM:SS`) and YouTube's
//! ISO-8601 form (`PT1H2M3S`). Editors also type bare decimal minutes
//! (`3.75`) and labeled minutes (`5 min`), which are accepted on input only.

use crate::config::Environment;
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

static CLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+):([0-5]?\d)$").expect("clock pattern"));

static CLOCK_HOURS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+):([0-5]\d):([0-5]\d)$").expect("hour clock pattern"));

static DECIMAL_MINUTES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+(?:\.\d+)?)$").expect("decimal minutes pattern"));

static ISO_8601: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^PT(?:(\d+(?:\.\d+)?)H)?(?:(\d+(?:\.\d+)?)M)?(?:(\d+(?:\.\d+)?)S)?$")
        .expect("iso duration pattern")
});

static LABELED_MINUTES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(\d+(?:\.\d+)?)\s*(?:mins?|minutes?)$").expect("labeled minutes pattern")
});

/// Converts between raw duration strings and canonical seconds.
#[derive(Debug, Clone, Copy)]
pub struct DurationConverter {
    diagnostics: bool,
}

impl Default for DurationConverter {
    fn default() -> Self {
        Self {
            diagnostics: cfg!(debug_assertions),
        }
    }
}

impl DurationConverter {
    pub fn new(diagnostics: bool) -> Self {
        Self { diagnostics }
    }

    /// Production builds stay quiet about malformed CMS values.
    pub fn for_environment(env: Environment) -> Self {
        Self::new(!matches!(env, Environment::Production))
    }

    pub fn diagnostics(&self) -> bool {
        self.diagnostics
    }

    /// Parse a raw duration into whole seconds.
    ///
    /// Never fails: missing input, `""` and `"null"` give 0, and an
    /// unrecognized string gives 0 plus a warning when diagnostics are on.
    /// Formats are tried in a fixed order so that a bare number is always
    /// read as decimal minutes.
    pub fn parse(&self, input: Option<&str>) -> u32 {
        let raw = match input.map(str::trim) {
            None | Some("") | Some("null") => return 0,
            Some(raw) => raw,
        };

        match self.try_parse(raw) {
            Some(secs) => secs,
            None => {
                if self.diagnostics {
                    tracing::warn!("Unrecognized duration format: {:?}", raw);
                }
                0
            }
        }
    }

    /// Like [`parse`](Self::parse), but `None` when no format matches, so
    /// a real zero (`"0:00"`, `"PT0S"`) can be told apart from garbage.
    pub fn try_parse(&self, input: &str) -> Option<u32> {
        let raw = input.trim();

        if let Some(caps) = CLOCK.captures(raw) {
            return Some(to_secs(number(&caps[1]) * 60.0 + number(&caps[2])));
        }

        if let Some(caps) = CLOCK_HOURS.captures(raw) {
            return Some(to_secs(
                number(&caps[1]) * 3600.0 + number(&caps[2]) * 60.0 + number(&caps[3]),
            ));
        }

        if let Some(caps) = DECIMAL_MINUTES.captures(raw) {
            return Some(to_secs(number(&caps[1]) * 60.0));
        }

        if let Some(caps) = ISO_8601.captures(raw) {
            let part = |i: usize| caps.get(i).map_or(0.0, |m| number(m.as_str()));
            return Some(to_secs(part(1) * 3600.0 + part(2) * 60.0 + part(3)));
        }

        if let Some(caps) = LABELED_MINUTES.captures(raw) {
            return Some(to_secs(number(&caps[1]) * 60.0));
        }

        None
    }

    /// Parse a duration straight from a JSON value.
    ///
    /// Strings and numbers go through [`parse`](Self::parse). Objects and
    /// arrays are treated as no value instead of being stringified; use
    /// [`crate::cms::models::decode_duration`] at the store boundary.
    pub fn parse_value(&self, value: &Value) -> u32 {
        match value {
            Value::Null => 0,
            Value::String(s) => self.parse(Some(s.as_str())),
            Value::Number(n) => self.parse(Some(&n.to_string())),
            other => {
                if self.diagnostics {
                    tracing::warn!("Ignoring non-scalar duration value: {}", other);
                }
                0
            }
        }
    }

    /// Render seconds as `M:SS` or `H:MM:SS`.
    ///
    /// `None` and non-finite input give `""`. Zero is a real duration and
    /// renders as `"0:00"`. Negative input is clamped to zero.
    pub fn format(&self, seconds: Option<f64>) -> String {
        let Some(seconds) = seconds.filter(|s| s.is_finite()) else {
            return String::new();
        };
        if seconds < 0.0 && self.diagnostics {
            tracing::warn!("Negative duration {} clamped to 0", seconds);
        }
        format_secs(seconds.max(0.0).floor() as u32)
    }

    /// Re-render a YouTube ISO-8601 duration in clock form.
    pub fn iso_to_clock(&self, iso: &str) -> String {
        format_secs(self.parse(Some(iso)))
    }
}

/// Clock form of a whole number of seconds.
pub fn format_secs(secs: u32) -> String {
    let hours = secs / 3600;
    let mins = (secs % 3600) / 60;
    let secs = secs % 60;
    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, mins, secs)
    } else {
        format!("{}:{:02}", mins, secs)
    }
}

pub fn parse_duration(input: Option<&str>) -> u32 {
    DurationConverter::default().parse(input)
}

pub fn format_duration(seconds: Option<f64>) -> String {
    DurationConverter::default().format(seconds)
}

// Captures are all `\d+(\.\d+)?`, so this only fails on absurd lengths.
fn number(digits: &str) -> f64 {
    digits.parse().unwrap_or(0.0)
}

// Float to int casts saturate, so huge inputs pin at u32::MAX.
fn to_secs(value: f64) -> u32 {
    value.round() as u32
}
