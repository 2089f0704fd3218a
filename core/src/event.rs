//! Events the engine emits for the rendering layer.
//!
//! RULE: Renderers react to events; they never diff state to guess what
//! happened. Every event is also appended to the session journal.

use crate::{
    allocation::AllocationProfile,
    shock::ShockOutcome,
    stage::EvolutionStage,
    types::{Month, Rupees, SessionId},
};
use serde::{Deserialize, Serialize};

/// Variants are appended — never removed or reordered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ForgeEvent {
    // ── Engine events ──────────────────────────────
    SessionStarted {
        session_id: SessionId,
        seed:       Option<u64>,
    },
    TurnStarted {
        month: Month,
    },
    TurnCompleted {
        month: Month,
    },

    // ── Turn events ────────────────────────────────
    MonthSynced {
        month:        Month,
        total_corpus: Rupees,
        total_saved:  Rupees,
        guild_progress: Rupees,
    },
    StreakBonus {
        month:  Month,
        streak: u32,
    },
    StageTransition {
        month:    Month,
        from:     EvolutionStage,
        to:       EvolutionStage,
        headline: String,
        blurb:    String,
    },
    LifeShockResolved {
        month:   Month,
        outcome: ShockOutcome,
    },

    // ── Player actions ─────────────────────────────
    ProtectionTokenUsed {
        month:            Month,
        tokens_remaining: u32,
        streak:           u32,
    },
    AllocationChanged {
        month:           Month,
        allocation:      AllocationProfile,
        expected_return: f64,
    },
    ContributionChanged {
        month:    Month,
        previous: Rupees,
        current:  Rupees,
    },
    InflationBonusClaimed {
        month: Month,
        score: u32,
        bonus: Rupees,
    },
}

impl ForgeEvent {
    /// Stable name for the journal's event_type column.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::SessionStarted { .. }        => "session_started",
            Self::TurnStarted { .. }           => "turn_started",
            Self::TurnCompleted { .. }         => "turn_completed",
            Self::MonthSynced { .. }           => "month_synced",
            Self::StreakBonus { .. }           => "streak_bonus",
            Self::StageTransition { .. }       => "stage_transition",
            Self::LifeShockResolved { .. }     => "life_shock_resolved",
            Self::ProtectionTokenUsed { .. }   => "protection_token_used",
            Self::AllocationChanged { .. }     => "allocation_changed",
            Self::ContributionChanged { .. }   => "contribution_changed",
            Self::InflationBonusClaimed { .. } => "inflation_bonus_claimed",
        }
    }

    /// Which part of the engine produced the event.
    pub fn source(&self) -> &'static str {
        match self {
            Self::SessionStarted { .. } | Self::TurnStarted { .. } | Self::TurnCompleted { .. } => {
                "engine"
            }
            Self::MonthSynced { .. }
            | Self::StreakBonus { .. }
            | Self::StageTransition { .. }
            | Self::LifeShockResolved { .. } => "turn",
            _ => "player",
        }
    }
}
