// ── Dashboard domain types ──
//
// Headline numbers and the activity feed. Values are display strings;
// the dashboard does not aggregate anything itself.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Visual emphasis of a stat card.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum StatVariant {
    #[default]
    Default,
    Success,
    Warning,
    Destructive,
}

/// Percentage change relative to a named period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trend {
    pub percent: i32,
    pub label: String,
}

impl Trend {
    /// Signed display form, e.g. "+12% from last week".
    pub fn display(&self) -> String {
        let sign = if self.percent >= 0 { "+" } else { "" };
        format!("{sign}{}% {}", self.percent, self.label)
    }

    pub fn is_positive(&self) -> bool {
        self.percent >= 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatCard {
    pub title: String,
    pub value: String,
    #[serde(default)]
    pub trend: Option<Trend>,
    #[serde(default)]
    pub variant: StatVariant,
}

/// A bounded network metric rendered as a gauge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkMetric {
    pub label: String,
    pub value: String,
    pub max: String,
}

impl NetworkMetric {
    /// Fill ratio in `[0, 1]`, from the leading integer of `value` over
    /// the leading integer of `max`. Units are ignored.
    pub fn ratio(&self) -> f64 {
        match (leading_integer(&self.value), leading_integer(&self.max)) {
            (Some(v), Some(m)) if m > 0 => (f64::from(v) / f64::from(m)).clamp(0.0, 1.0),
            _ => 0.0,
        }
    }
}

/// Leading run of ASCII digits, parsed. Stops at the first non-digit, so
/// "1,284" yields 1 and "99.8%" yields 99.
fn leading_integer(s: &str) -> Option<u32> {
    let digits: String = s
        .trim_start()
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().ok()
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ActivityStatus {
    Success,
    Info,
    Warning,
    Error,
}

/// One entry in the recent-activity feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub action: String,
    pub user: String,
    pub time: String,
    pub status: ActivityStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metric(value: &str, max: &str) -> NetworkMetric {
        NetworkMetric {
            label: "m".into(),
            value: value.into(),
            max: max.into(),
        }
    }

    #[test]
    fn ratio_uses_leading_integers() {
        assert!((metric("24ms", "100ms").ratio() - 0.24).abs() < f64::EPSILON);
        assert!((metric("99.8%", "100%").ratio() - 0.99).abs() < f64::EPSILON);
    }

    #[test]
    fn ratio_is_clamped_and_defaults_to_zero() {
        assert!((metric("847 GB", "1 TB").ratio() - 1.0).abs() < f64::EPSILON);
        assert!(metric("n/a", "100").ratio().abs() < f64::EPSILON);
        assert!(metric("5", "0").ratio().abs() < f64::EPSILON);
    }

    #[test]
    fn trend_display_signs_positive_values() {
        let up = Trend {
            percent: 12,
            label: "from last week".into(),
        };
        let down = Trend {
            percent: -3,
            label: "from last month".into(),
        };
        assert_eq!(up.display(), "+12% from last week");
        assert_eq!(down.display(), "-3% from last month");
        assert!(!down.is_positive());
    }
}
