use serde::{Deserialize, Serialize};

/// Reward tier derived from a streak length.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum BadgeTier {
    #[default]
    None,
    Bronze,
    Silver,
    Golden,
    Diamond,
}

impl BadgeTier {
    pub const BRONZE_DAYS: u32 = 3;
    pub const SILVER_DAYS: u32 = 7;
    pub const GOLDEN_DAYS: u32 = 30;
    pub const DIAMOND_DAYS: u32 = 90;

    /// Map a streak onto its tier. Each lower bound is inclusive.
    pub fn classify(streak: u32) -> Self {
        if streak >= Self::DIAMOND_DAYS {
            BadgeTier::Diamond
        } else if streak >= Self::GOLDEN_DAYS {
            BadgeTier::Golden
        } else if streak >= Self::SILVER_DAYS {
            BadgeTier::Silver
        } else if streak >= Self::BRONZE_DAYS {
            BadgeTier::Bronze
        } else {
            BadgeTier::None
        }
    }

    /// Same as [`BadgeTier::classify`] for signed upstream values; anything
    /// below zero earns nothing.
    pub fn classify_signed(streak: i64) -> Self {
        u32::try_from(streak)
            .map(Self::classify)
            .unwrap_or_else(|_| {
                if streak < 0 {
                    BadgeTier::None
                } else {
                    BadgeTier::Diamond
                }
            })
    }

    /// Wire name, absent for [`BadgeTier::None`].
    pub fn as_str(&self) -> Option<&'static str> {
        match self {
            BadgeTier::None => None,
            BadgeTier::Bronze => Some("bronze"),
            BadgeTier::Silver => Some("silver"),
            BadgeTier::Golden => Some("golden"),
            BadgeTier::Diamond => Some("diamond"),
        }
    }

    pub fn icon(&self) -> Option<&'static str> {
        match self {
            BadgeTier::None => None,
            BadgeTier::Bronze => Some("🥉"),
            BadgeTier::Silver => Some("🥈"),
            BadgeTier::Golden => Some("🏆"),
            BadgeTier::Diamond => Some("💎"),
        }
    }

    /// Display text such as `🥉 5 days`.
    pub fn label(&self, streak: u32) -> Option<String> {
        self.icon().map(|icon| format!("{icon} {streak} days"))
    }

    pub fn is_earned(&self) -> bool {
        !matches!(self, BadgeTier::None)
    }
}
