//! Turn engine for Future Forge.
//!
//! TURN ORDER (fixed, documented, never reordered):
//!   1. Month advances by one
//!   2. Corpus recomputed from scratch; contribution added to total saved
//!   3. Streak increments; bonus every `streak_bonus_interval` turns
//!   4. Stage re-evaluated against corpus thresholds
//!   5. Guild progress grows by the contribution, capped at the target
//!   6. Life shock on every `shock_interval`-th month
//!
//! RULES:
//!   - A turn is begin → resolve → finish. The gaps are where the UI
//!     animates; a second begin in either gap is rejected.
//!   - All randomness flows through the injected RandomSource.
//!   - Every state change is recorded in the session journal.

use crate::{
    allocation::AllocationProfile,
    clock::{TurnClock, TurnStatus},
    config::ForgeConfig,
    error::{ForgeError, ForgeResult},
    event::ForgeEvent,
    journal::SessionJournal,
    model::{blended_return_with, projected_corpus, retirement_age},
    rng::{RandomSource, RngBank, RngSlot},
    shock::ShockOutcome,
    snapshot::{Dashboard, ForgeStateView},
    stage::EvolutionStage,
    state::ForgeState,
    types::{Month, Rupees, SessionId},
};

/// What one turn produced: the post-turn view and the events to render.
#[derive(Debug, Clone)]
pub struct TurnResult {
    pub snapshot: ForgeStateView,
    pub events:   Vec<ForgeEvent>,
}

impl TurnResult {
    pub fn shock(&self) -> Option<&ShockOutcome> {
        self.events.iter().find_map(|e| match e {
            ForgeEvent::LifeShockResolved { outcome, .. } => Some(outcome),
            _ => None,
        })
    }

    pub fn has_streak_bonus(&self) -> bool {
        self.events.iter().any(|e| matches!(e, ForgeEvent::StreakBonus { .. }))
    }

    pub fn stage_transition(&self) -> Option<(EvolutionStage, EvolutionStage)> {
        self.events.iter().find_map(|e| match e {
            ForgeEvent::StageTransition { from, to, .. } => Some((*from, *to)),
            _ => None,
        })
    }
}

pub struct ForgeEngine {
    session_id:     SessionId,
    clock:          TurnClock,
    config:         ForgeConfig,
    state:          ForgeState,
    rng:            Box<dyn RandomSource>,
    journal:        SessionJournal,
}

impl ForgeEngine {
    /// Engine whose shocks are drawn from a PCG stream derived from `seed`.
    pub fn new(session_id: SessionId, seed: u64, config: ForgeConfig) -> ForgeResult<Self> {
        let rng = RngBank::new(seed).for_slot(RngSlot::LifeShock);
        Self::start(session_id, Some(seed), config, Box::new(rng))
    }

    /// Engine with a caller-supplied random source (scripted shocks, replays).
    pub fn with_source(
        session_id: SessionId,
        config:     ForgeConfig,
        rng:        Box<dyn RandomSource>,
    ) -> ForgeResult<Self> {
        Self::start(session_id, None, config, rng)
    }

    /// Default config, fresh v4 session id.
    pub fn build(seed: u64) -> ForgeResult<Self> {
        Self::new(uuid::Uuid::new_v4().to_string(), seed, ForgeConfig::default())
    }

    fn start(
        session_id: SessionId,
        seed:       Option<u64>,
        config:     ForgeConfig,
        rng:        Box<dyn RandomSource>,
    ) -> ForgeResult<Self> {
        config.settings.validate()?;

        let mut engine = Self {
            state: ForgeState::new(&config.settings),
            clock: TurnClock::new(),
            journal: SessionJournal::new(),
            session_id,
            config,
            rng,
        };
        engine.record(ForgeEvent::SessionStarted {
            session_id: engine.session_id.clone(),
            seed,
        })?;
        log::info!("session {} started (seed {seed:?})", engine.session_id);
        Ok(engine)
    }

    // ── Turn lifecycle ─────────────────────────────────────────

    /// Open a turn. The caller may pause here before resolving.
    pub fn begin_turn(&mut self) -> ForgeResult<Month> {
        let month = self.clock.begin().inspect_err(|_| {
            log::warn!("begin_turn rejected: turn already in progress");
        })?;
        // Filed under the month being played, not the one just finished.
        self.journal.append(&self.session_id, month, &ForgeEvent::TurnStarted { month })?;
        Ok(month)
    }

    /// Apply the turn's mutation. Runs exactly once per opened turn.
    pub fn resolve_turn(&mut self) -> ForgeResult<TurnResult> {
        let settings = &self.config.settings;
        let month = self.clock.advance()?;
        let mut events = Vec::new();

        // 1–2. Corpus is a projection of the whole history at today's rate.
        let contribution = self.state.monthly_contribution;
        self.state.total_corpus = projected_corpus(contribution, month)?;
        self.state.total_saved += contribution;

        // 3. Streak.
        self.state.streak_count += 1;
        if self.state.streak_count.is_multiple_of(settings.streak_bonus_interval) {
            events.push(ForgeEvent::StreakBonus {
                month,
                streak: self.state.streak_count,
            });
        }

        // 4. Stage.
        let new_stage =
            EvolutionStage::for_corpus(self.state.total_corpus, &settings.stage_thresholds);
        if new_stage != self.state.evolution_stage {
            let (headline, blurb) = new_stage.transition_message(self.state.evolution_stage);
            log::info!(
                "month={month} stage {:?} -> {new_stage:?}",
                self.state.evolution_stage
            );
            events.push(ForgeEvent::StageTransition {
                month,
                from:     self.state.evolution_stage,
                to:       new_stage,
                headline: headline.to_string(),
                blurb:    blurb.to_string(),
            });
            self.state.evolution_stage = new_stage;
        }

        // 5. Guild.
        self.state.guild_progress =
            (self.state.guild_progress + contribution).min(self.state.guild_target);

        events.insert(0, ForgeEvent::MonthSynced {
            month,
            total_corpus:   self.state.total_corpus,
            total_saved:    self.state.total_saved,
            guild_progress: self.state.guild_progress,
        });

        // 6. Shock.
        if month.is_multiple_of(settings.shock_interval) {
            let outcome = self.resolve_shock();
            events.push(ForgeEvent::LifeShockResolved { month, outcome });
        }

        log::debug!(
            "month={month} corpus={:.2} streak={} resilience={:.1}/{:.1}",
            self.state.total_corpus,
            self.state.streak_count,
            self.state.resilience,
            self.state.shadow_resilience
        );

        for event in &events {
            self.record(event.clone())?;
        }

        Ok(TurnResult { snapshot: self.view(), events })
    }

    /// Close a resolved turn and return to idle.
    pub fn finish_turn(&mut self) -> ForgeResult<ForgeStateView> {
        let month = self.clock.finish()?;
        self.record(ForgeEvent::TurnCompleted { month })?;
        Ok(self.view())
    }

    /// begin + resolve + finish with no pauses in between.
    pub fn advance_turn(&mut self) -> ForgeResult<TurnResult> {
        self.begin_turn()?;
        let mut result = self.resolve_turn()?;
        result.snapshot = self.finish_turn()?;
        Ok(result)
    }

    /// Run n turns back to back. Used for testing and fast-forward.
    pub fn run_turns(&mut self, n: u32) -> ForgeResult<Vec<TurnResult>> {
        (0..n).map(|_| self.advance_turn()).collect()
    }

    fn resolve_shock(&mut self) -> ShockOutcome {
        let shock = self.config.shocks.pick(self.rng.as_mut());
        let outcome = self.config.settings.shock_rules.resolve(
            shock,
            self.state.total_corpus,
            self.state.resilience,
            self.state.shadow_resilience,
        );
        self.state.resilience = outcome.resilience;
        self.state.shadow_resilience = outcome.shadow_resilience;
        self.state.last_shock = Some(outcome.shock.clone());
        outcome
    }

    // ── Player actions ─────────────────────────────────────────

    /// Spend a token to extend the streak without a contribution.
    pub fn use_protection_token(&mut self) -> ForgeResult<ForgeStateView> {
        if self.state.protection_tokens == 0 {
            log::warn!("protection token requested with none left");
            return Err(ForgeError::NoTokensAvailable);
        }
        self.state.protection_tokens -= 1;
        self.state.streak_count += 1;
        self.record(ForgeEvent::ProtectionTokenUsed {
            month:            self.clock.month,
            tokens_remaining: self.state.protection_tokens,
            streak:           self.state.streak_count,
        })?;
        Ok(self.view())
    }

    pub fn set_allocation(
        &mut self,
        equity:    u32,
        corporate: u32,
        govt:      u32,
    ) -> ForgeResult<ForgeStateView> {
        let allocation = AllocationProfile::new(equity, corporate, govt);
        allocation.validate().inspect_err(|e| log::warn!("{e}"))?;

        self.state.allocation = allocation;
        self.state.expected_return =
            blended_return_with(&allocation, &self.config.settings.sleeve_returns);
        self.record(ForgeEvent::AllocationChanged {
            month:           self.clock.month,
            allocation,
            expected_return: self.state.expected_return,
        })?;
        Ok(self.view())
    }

    pub fn apply_preset(&mut self, name: &str) -> ForgeResult<ForgeStateView> {
        let profile = self
            .config
            .presets
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
            .map(|p| p.profile())
            .ok_or_else(|| ForgeError::invalid("preset", name))?;
        self.set_allocation(profile.equity, profile.corporate, profile.govt)
    }

    /// Takes effect at the next turn, repricing every elapsed month.
    pub fn set_monthly_contribution(&mut self, amount: Rupees) -> ForgeResult<ForgeStateView> {
        if !(amount.is_finite() && amount > 0.0) {
            return Err(ForgeError::invalid("monthly_contribution", amount));
        }
        let previous = self.state.monthly_contribution;
        self.state.monthly_contribution = amount;
        self.record(ForgeEvent::ContributionChanged {
            month: self.clock.month,
            previous,
            current: amount,
        })?;
        Ok(self.view())
    }

    /// Credit the inflation-defense reward. The next turn's recomputation
    /// replaces the corpus, bonus included.
    pub fn claim_inflation_bonus(&mut self, score: u32) -> ForgeResult<ForgeStateView> {
        let bonus = f64::from(score) * self.config.settings.inflation_bonus_per_point;
        self.state.total_corpus += bonus;
        self.state.minigame_score += score;
        self.record(ForgeEvent::InflationBonusClaimed {
            month: self.clock.month,
            score,
            bonus,
        })?;
        Ok(self.view())
    }

    // ── Queries ────────────────────────────────────────────────

    /// "What-if" projection; never touches state.
    pub fn projection(&self, contribution: Rupees, months: Month) -> ForgeResult<Rupees> {
        projected_corpus(contribution, months)
    }

    /// Retirement age for a contribution at the session's expenses.
    pub fn retirement_age(&self, contribution: Rupees) -> ForgeResult<u32> {
        let settings = &self.config.settings;
        retirement_age(
            contribution,
            self.state.monthly_expenses,
            settings.current_age,
            settings.horizon_months(),
        )
    }

    pub fn view(&self) -> ForgeStateView {
        let settings = &self.config.settings;
        let s = &self.state;

        // Contributions are validated on entry, so these cannot fail.
        let projected_retirement_age = self
            .retirement_age(s.monthly_contribution)
            .unwrap_or(settings.freedom_age);
        let projected_at_retirement = self
            .projection(s.monthly_contribution, settings.horizon_months())
            .unwrap_or(0.0);

        let elapsed_days = self.clock.month.saturating_mul(settings.days_per_month);

        ForgeStateView {
            session_id:             self.session_id.clone(),
            month:                  self.clock.month,
            turn_status:            self.clock.status,
            monthly_contribution:   s.monthly_contribution,
            total_corpus:           s.total_corpus,
            total_saved:            s.total_saved,
            resilience:             s.resilience,
            shadow_resilience:      s.shadow_resilience,
            streak_count:           s.streak_count,
            protection_tokens:      s.protection_tokens,
            evolution_stage:        s.evolution_stage,
            allocation:             s.allocation,
            expected_return:        s.expected_return,
            guild_progress:         s.guild_progress,
            guild_target:           s.guild_target,
            minigame_score:         s.minigame_score,
            last_shock:             s.last_shock.clone(),
            divergence_score:       s.divergence_score(settings.divergence_corpus_unit),
            freedom_days_remaining: settings.freedom_days.saturating_sub(elapsed_days),
            projected_retirement_age,
            dashboard: Dashboard::new(
                s.total_corpus,
                s.total_saved,
                s.monthly_contribution,
                projected_at_retirement,
                s.expected_return,
            ),
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Months fully played. Moves only inside `resolve_turn`.
    pub fn month(&self) -> Month {
        self.clock.month
    }

    pub fn turn_status(&self) -> TurnStatus {
        self.clock.status
    }

    pub fn config(&self) -> &ForgeConfig {
        &self.config
    }

    pub fn journal(&self) -> &SessionJournal {
        &self.journal
    }

    fn record(&mut self, event: ForgeEvent) -> ForgeResult<()> {
        self.journal.append(&self.session_id, self.clock.month, &event)
    }
}
