//! The simulation aggregate. Owned by `ForgeEngine`; nothing else
//! mutates it. The month lives on the engine's `TurnClock`.

use crate::{
    allocation::AllocationProfile,
    config::EngineSettings,
    model::blended_return_with,
    shock::LifeShock,
    stage::EvolutionStage,
    types::Rupees,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForgeState {
    pub monthly_contribution: Rupees,
    /// Recomputed from scratch every turn, never accumulated.
    pub total_corpus:         Rupees,
    /// Contributions actually paid, one per resolved turn.
    pub total_saved:          Rupees,
    pub resilience:           f64,
    pub shadow_resilience:    f64,
    pub streak_count:         u32,
    pub protection_tokens:    u32,
    pub evolution_stage:      EvolutionStage,
    pub allocation:           AllocationProfile,
    pub expected_return:      f64,
    pub guild_progress:       Rupees,
    pub guild_target:         Rupees,
    pub minigame_score:       u32,
    pub monthly_expenses:     Rupees,
    pub last_shock:           Option<LifeShock>,
}

impl ForgeState {
    pub fn new(settings: &EngineSettings) -> Self {
        let allocation = settings.initial_allocation;
        Self {
            monthly_contribution: settings.initial_contribution,
            total_corpus:         0.0,
            total_saved:          0.0,
            resilience:           settings.initial_resilience,
            shadow_resilience:    settings.initial_resilience,
            streak_count:         0,
            protection_tokens:    settings.initial_tokens,
            evolution_stage:      EvolutionStage::Early,
            allocation,
            expected_return:      blended_return_with(&allocation, &settings.sleeve_returns),
            guild_progress:       0.0,
            guild_target:         settings.guild_target,
            minigame_score:       0,
            monthly_expenses:     settings.monthly_expenses,
            last_shock:           None,
        }
    }

    /// Gap between future self and shadow twin, boosted by corpus.
    pub fn divergence_score(&self, corpus_unit: Rupees) -> u32 {
        let raw = self.resilience - self.shadow_resilience + self.total_corpus / corpus_unit;
        raw.round().max(0.0) as u32
    }
}
