//! Severity tiers for terminal HTTP status codes

use serde::{Deserialize, Serialize};

/// Severity tier of a terminal status code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Success,
    Warning,
    Danger,
}

impl Tier {
    /// Classify a status code. Total over all integers: `400..500` is a warning, `500` and
    /// above is danger, everything else (including negative sentinels) is success.
    pub fn classify(code: i32) -> Self {
        match code {
            400..=499 => Self::Warning,
            500..=i32::MAX => Self::Danger,
            _ => Self::Success,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Danger => "danger",
        }
    }

    /// CSS class of the summary badge shown next to the diagram title
    pub fn badge_class(&self) -> &'static str {
        match self {
            Self::Success => "badge badge-success",
            Self::Warning => "badge badge-warning",
            Self::Danger => "badge badge-danger",
        }
    }
}

/// Status code of the last response in a call chain, with its tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalStatus {
    pub code: i32,
    pub tier: Tier,
}

impl FinalStatus {
    /// Status of an empty call chain
    pub const NO_RESPONSE: FinalStatus = FinalStatus {
        code: -1,
        tier: Tier::Success,
    };

    pub fn from_code(code: i32) -> Self {
        Self {
            code,
            tier: Tier::classify(code),
        }
    }
}

impl From<http::StatusCode> for FinalStatus {
    fn from(status: http::StatusCode) -> Self {
        Self::from_code(i32::from(status.as_u16()))
    }
}
