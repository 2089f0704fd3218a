use crate::types::Rupees;
use serde::{Deserialize, Serialize};

/// Corpus at which the future self reaches each tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StageThresholds {
    pub growth:  Rupees,
    pub freedom: Rupees,
}

impl Default for StageThresholds {
    fn default() -> Self {
        Self {
            growth:  500_000.0,   // ₹5L
            freedom: 2_500_000.0, // ₹25L
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvolutionStage {
    Early,
    Growth,
    Freedom,
}

impl EvolutionStage {
    /// Tier for a corpus. Lower edges are inclusive.
    pub fn for_corpus(corpus: Rupees, thresholds: &StageThresholds) -> Self {
        if corpus >= thresholds.freedom {
            Self::Freedom
        } else if corpus >= thresholds.growth {
            Self::Growth
        } else {
            Self::Early
        }
    }

    /// Tier shown by the contribution slider's home preview.
    pub fn preview_for_contribution(contribution: Rupees) -> Self {
        if contribution >= 15_000.0 {
            Self::Freedom
        } else if contribution >= 5_000.0 {
            Self::Growth
        } else {
            Self::Early
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Early   => "Early Stage",
            Self::Growth  => "Growth Stage",
            Self::Freedom => "Freedom Stage",
        }
    }

    /// Headline and blurb shown when the stage is unlocked.
    pub fn unlock_message(&self) -> Option<(&'static str, &'static str)> {
        match self {
            Self::Early => None,
            Self::Growth => Some((
                "Growth Stage Unlocked!",
                "Your consistent contributions have upgraded your lifestyle. \
                 Better housing, new hobbies, financial stability!",
            )),
            Self::Freedom => Some((
                "Freedom Stage Achieved!",
                "You've reached Financial Freedom! Luxury travel, complete \
                 independence, and a life on your terms!",
            )),
        }
    }

    /// Headline and blurb for moving from `from` to `self`, up or down.
    pub fn transition_message(&self, from: Self) -> (&'static str, &'static str) {
        if *self > from {
            if let Some(message) = self.unlock_message() {
                return message;
            }
        }
        match self {
            Self::Early => (
                "Back to Early Stage",
                "Your corpus slipped below the Growth threshold. \
                 Raise your contribution to climb back up.",
            ),
            Self::Growth => (
                "Back to Growth Stage",
                "Your corpus slipped below the Freedom threshold. \
                 A bigger contribution will win it back.",
            ),
            Self::Freedom => ("Freedom Stage", "You are still living on your terms."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundaries_are_inclusive_on_lower_edge() {
        let t = StageThresholds::default();
        assert_eq!(EvolutionStage::for_corpus(499_999.0, &t), EvolutionStage::Early);
        assert_eq!(EvolutionStage::for_corpus(500_000.0, &t), EvolutionStage::Growth);
        assert_eq!(EvolutionStage::for_corpus(2_499_999.99, &t), EvolutionStage::Growth);
        assert_eq!(EvolutionStage::for_corpus(2_500_000.0, &t), EvolutionStage::Freedom);
    }

    #[test]
    fn slider_preview_tiers() {
        assert_eq!(EvolutionStage::preview_for_contribution(4_999.0), EvolutionStage::Early);
        assert_eq!(EvolutionStage::preview_for_contribution(5_000.0), EvolutionStage::Growth);
        assert_eq!(EvolutionStage::preview_for_contribution(15_000.0), EvolutionStage::Freedom);
    }

    #[test]
    fn every_transition_has_a_headline() {
        use EvolutionStage::*;
        for (from, to) in [(Early, Growth), (Growth, Freedom), (Early, Freedom)] {
            assert_eq!(to.transition_message(from), to.unlock_message().unwrap());
        }
        for (from, to) in [(Growth, Early), (Freedom, Growth), (Freedom, Early)] {
            let (headline, blurb) = to.transition_message(from);
            assert!(headline.starts_with("Back to"), "{from:?} -> {to:?}");
            assert!(!blurb.is_empty());
        }
    }
}
