//! Animated statistic counters shown in the hero section.

use std::time::{Duration, Instant};

const ANIMATION: Duration = Duration::from_millis(2000);
const FRAME: Duration = Duration::from_millis(16);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatFormat {
    /// `50.000+`
    Plus,
    /// `24/7`
    PerWeek,
    /// `1.200`
    Plain,
}

/// A number that counts up from zero to its target once started.
#[derive(Debug, Clone)]
pub struct StatCounter {
    target: u64,
    format: StatFormat,
    started_at: Option<Instant>,
}

impl StatCounter {
    /// Parse display text such as `"50.000+"` or `"24/7"`.
    ///
    /// The target is built from the digits of the text; for `n/7` only the
    /// digits before the slash count. Returns `None` when there are no digits.
    pub fn parse(text: &str) -> Option<Self> {
        let format = if text.contains('+') {
            StatFormat::Plus
        } else if text.contains('/') {
            StatFormat::PerWeek
        } else {
            StatFormat::Plain
        };

        let number = match format {
            // "24/7" counts to 24, not 247.
            StatFormat::PerWeek => text.split('/').next().unwrap_or_default(),
            _ => text,
        };
        let digits: String = number.chars().filter(char::is_ascii_digit).collect();
        let target = digits.parse().ok()?;

        Some(Self {
            target,
            format,
            started_at: None,
        })
    }

    pub const fn is_started(&self) -> bool {
        self.started_at.is_some()
    }

    /// Start counting. Later calls keep the original start time.
    pub fn start(&mut self, now: Instant) {
        self.started_at.get_or_insert(now);
    }

    pub fn value(&self, now: Instant) -> u64 {
        self.started_at
            .map_or(0, |started| self.value_at(now.saturating_duration_since(started)))
    }

    /// Counter value `elapsed` after the start.
    ///
    /// The count advances in 16 ms frames by `target / 125` and is floored.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    pub fn value_at(&self, elapsed: Duration) -> u64 {
        let frames = elapsed.as_millis() / FRAME.as_millis();
        let total = ANIMATION.as_millis() / FRAME.as_millis();
        if frames >= total {
            return self.target;
        }
        let increment = self.target as f64 / total as f64;
        let value = (frames as f64 * increment).floor() as u64;
        value.min(self.target)
    }

    pub fn display(&self, now: Instant) -> String {
        self.format_value(self.value(now))
    }

    pub fn format_value(&self, value: u64) -> String {
        match self.format {
            StatFormat::Plus => format!("{}+", group_thousands(value)),
            StatFormat::PerWeek => format!("{value}/7"),
            StatFormat::Plain => group_thousands(value),
        }
    }
}

/// Format with `.` as the thousands separator.
fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }
    grouped
}
