//! Author fallback policy
//!
//! Decides when `actor.name` / `actor.link` are considered missing and the
//! provider's name / URL are used instead.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// When an actor field falls back to the provider's value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FallbackPolicy {
    /// Absent, null or empty string falls back
    #[default]
    Falsy,
    /// Only absent or null falls back; an empty string is kept
    Absent,
}

impl FallbackPolicy {
    /// Pick `preferred` unless the policy treats it as missing.
    pub fn resolve(self, preferred: Option<&str>, fallback: Option<&str>) -> Option<String> {
        let keep = match (self, preferred) {
            (_, None) => None,
            (FallbackPolicy::Falsy, Some("")) => None,
            (_, Some(value)) => Some(value),
        };
        keep.or(fallback).map(str::to_string)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FallbackPolicy::Falsy => "falsy",
            FallbackPolicy::Absent => "absent",
        }
    }
}

impl fmt::Display for FallbackPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FallbackPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "falsy" => Ok(FallbackPolicy::Falsy),
            "absent" => Ok(FallbackPolicy::Absent),
            other => Err(format!(
                "Invalid fallback policy: '{}'. Must be 'falsy' or 'absent'.",
                other
            )),
        }
    }
}
