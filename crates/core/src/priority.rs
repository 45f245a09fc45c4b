//! Priority tiers and their fixed configuration table

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::Error;

/// Task priority level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Default for Priority {
    fn default() -> Self {
        Self::Medium
    }
}

/// Display and timing settings for one priority tier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriorityConfig {
    pub label: &'static str,
    pub color: &'static str,
    pub icon: &'static str,
    pub reminder_delay_secs: u64,
}

const HIGH: PriorityConfig = PriorityConfig {
    label: "High",
    color: "#FF6B6B",
    icon: "alert-circle",
    reminder_delay_secs: 30,
};

const MEDIUM: PriorityConfig = PriorityConfig {
    label: "Medium",
    color: "#FFD93D",
    icon: "remove-circle",
    reminder_delay_secs: 60,
};

const LOW: PriorityConfig = PriorityConfig {
    label: "Low",
    color: "#6BCB77",
    icon: "arrow-down-circle",
    reminder_delay_secs: 120,
};

impl Priority {
    pub fn config(self) -> &'static PriorityConfig {
        match self {
            Self::High => &HIGH,
            Self::Medium => &MEDIUM,
            Self::Low => &LOW,
        }
    }

    /// Ordering weight; higher is more urgent
    pub fn rank(self) -> u8 {
        match self {
            Self::High => 3,
            Self::Medium => 2,
            Self::Low => 1,
        }
    }

    pub fn reminder_delay(self) -> Duration {
        Duration::from_secs(self.config().reminder_delay_secs)
    }

    pub fn label(self) -> &'static str {
        self.config().label
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            other => Err(Error::validation(format!("unknown priority `{}`", other))),
        }
    }
}
