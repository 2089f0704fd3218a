//! Read-only views handed to the rendering layer.
//!
//! A view is a self-contained copy of the state plus every derived figure
//! the HUD and dashboard show, so renderers never need engine access.

use crate::{
    allocation::AllocationProfile,
    clock::TurnStatus,
    shock::LifeShock,
    stage::EvolutionStage,
    types::{Month, Rupees, SessionId},
};
use serde::{Deserialize, Serialize};

/// Share of the corpus held in Tier I (the rest is Tier II).
pub const TIER1_SHARE: f64 = 0.8;

/// Tax saved per rupee contributed.
pub const TAX_SAVING_RATE: f64 = 0.3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    pub tier1:                 Rupees,
    pub tier2:                 Rupees,
    pub total:                 Rupees,
    pub projected_at_retirement: Rupees,
    pub monthly_contribution:  Rupees,
    pub tax_saved:             Rupees,
    pub expected_return:       f64,
}

impl Dashboard {
    pub fn new(
        total_corpus:            Rupees,
        total_saved:             Rupees,
        monthly_contribution:    Rupees,
        projected_at_retirement: Rupees,
        expected_return:         f64,
    ) -> Self {
        Self {
            tier1: total_corpus * TIER1_SHARE,
            tier2: total_corpus * (1.0 - TIER1_SHARE),
            total: total_corpus,
            projected_at_retirement,
            monthly_contribution,
            tax_saved: total_saved * TAX_SAVING_RATE,
            expected_return,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForgeStateView {
    pub session_id:             SessionId,
    pub month:                  Month,
    pub turn_status:            TurnStatus,
    pub monthly_contribution:   Rupees,
    pub total_corpus:           Rupees,
    pub total_saved:            Rupees,
    pub resilience:             f64,
    pub shadow_resilience:      f64,
    pub streak_count:           u32,
    pub protection_tokens:      u32,
    pub evolution_stage:        EvolutionStage,
    pub allocation:             AllocationProfile,
    pub expected_return:        f64,
    pub guild_progress:         Rupees,
    pub guild_target:           Rupees,
    pub minigame_score:         u32,
    pub last_shock:             Option<LifeShock>,
    pub divergence_score:       u32,
    pub freedom_days_remaining: u32,
    pub projected_retirement_age: u32,
    pub dashboard:              Dashboard,
}

impl ForgeStateView {
    /// Guild progress as a percentage of the target, capped at 100.
    pub fn guild_percent(&self) -> f64 {
        if self.guild_target <= 0.0 {
            return 100.0;
        }
        (self.guild_progress / self.guild_target * 100.0).min(100.0)
    }
}
