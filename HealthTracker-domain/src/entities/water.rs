use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};

/// Running water intake total in millilitres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
pub struct WaterTotal(pub f64);

impl WaterTotal {
    /// Zero intake
    pub const ZERO: WaterTotal = WaterTotal(0.0);

    /// Total in millilitres
    pub fn millilitres(self) -> f64 {
        self.0
    }
}

impl fmt::Display for WaterTotal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1} ml", self.0)
    }
}

/// One-time confirmation to show after the total was reset.
///
/// Returned by the counter and never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResetConfirmation {
    pub title: &'static str,
    pub message: &'static str,
}

impl Default for ResetConfirmation {
    fn default() -> Self {
        Self {
            title: "Water Intake Reset",
            message: "Your daily water intake has been reset.",
        }
    }
}

/// Which increments the water counter accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AmountPolicy {
    /// Any finite amount; negative amounts lower the total
    #[default]
    AllowAny,
    /// Only finite amounts greater than zero
    PositiveOnly,
}

impl AmountPolicy {
    /// Whether `amount` may be added under this policy
    pub fn accepts(self, amount: f64) -> bool {
        match self {
            AmountPolicy::AllowAny => amount.is_finite(),
            AmountPolicy::PositiveOnly => amount.is_finite() && amount > 0.0,
        }
    }
}

impl fmt::Display for AmountPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AmountPolicy::AllowAny => write!(f, "allow-any"),
            AmountPolicy::PositiveOnly => write!(f, "positive-only"),
        }
    }
}

impl FromStr for AmountPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "allow-any" | "any" => Ok(AmountPolicy::AllowAny),
            "positive-only" | "positive" => Ok(AmountPolicy::PositiveOnly),
            other => Err(format!("Unknown water amount policy: {}", other)),
        }
    }
}
