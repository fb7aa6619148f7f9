/// Discrete cue intensity selected by streak length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FeedbackTier {
    Tier0,
    Tier1,
    Tier2,
    Tier3,
}

impl FeedbackTier {
    /// Conventional asset stem for the tier's cue.
    ///
    /// Hosts that lack a tier-specific asset should fall back to
    /// `FeedbackTier::Tier0.cue_name()`.
    #[must_use]
    pub fn cue_name(self) -> &'static str {
        match self {
            FeedbackTier::Tier0 => "ding",
            FeedbackTier::Tier1 => "ding_10",
            FeedbackTier::Tier2 => "ding_20",
            FeedbackTier::Tier3 => "ding_30",
        }
    }
}

/// Minimum streak lengths for tiers 1, 2 and 3.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedbackThresholds {
    tier1: u32,
    tier2: u32,
    tier3: u32,
}

impl FeedbackThresholds {
    /// Returns `None` unless `0 < tier1 < tier2 < tier3`.
    #[must_use]
    pub fn new(tier1: u32, tier2: u32, tier3: u32) -> Option<Self> {
        (0 < tier1 && tier1 < tier2 && tier2 < tier3).then_some(Self {
            tier1,
            tier2,
            tier3,
        })
    }

    #[must_use]
    pub fn tier_for(&self, streak: u32) -> FeedbackTier {
        if streak >= self.tier3 {
            FeedbackTier::Tier3
        } else if streak >= self.tier2 {
            FeedbackTier::Tier2
        } else if streak >= self.tier1 {
            FeedbackTier::Tier1
        } else {
            FeedbackTier::Tier0
        }
    }

    #[must_use]
    pub fn tier1(&self) -> u32 {
        self.tier1
    }

    #[must_use]
    pub fn tier2(&self) -> u32 {
        self.tier2
    }

    #[must_use]
    pub fn tier3(&self) -> u32 {
        self.tier3
    }
}

impl Default for FeedbackThresholds {
    fn default() -> Self {
        Self {
            tier1: 10,
            tier2: 20,
            tier3: 30,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_thresholds_select_tiers() {
        let thresholds = FeedbackThresholds::default();
        assert_eq!(thresholds.tier_for(1), FeedbackTier::Tier0);
        assert_eq!(thresholds.tier_for(9), FeedbackTier::Tier0);
        assert_eq!(thresholds.tier_for(10), FeedbackTier::Tier1);
        assert_eq!(thresholds.tier_for(19), FeedbackTier::Tier1);
        assert_eq!(thresholds.tier_for(20), FeedbackTier::Tier2);
        assert_eq!(thresholds.tier_for(30), FeedbackTier::Tier3);
        assert_eq!(thresholds.tier_for(500), FeedbackTier::Tier3);
    }

    #[test]
    fn thresholds_must_ascend() {
        assert!(FeedbackThresholds::new(5, 10, 15).is_some());
        assert!(FeedbackThresholds::new(0, 10, 15).is_none());
        assert!(FeedbackThresholds::new(10, 10, 15).is_none());
        assert!(FeedbackThresholds::new(10, 20, 5).is_none());
    }

    #[test]
    fn cue_names_follow_tiers() {
        assert_eq!(FeedbackTier::Tier0.cue_name(), "ding");
        assert_eq!(FeedbackTier::Tier3.cue_name(), "ding_30");
    }
}
