//! Life shocks — periodic adverse events and their damage arithmetic.
//!
//! The future self is shielded by its corpus; the shadow twin has no
//! corpus and takes amplified damage. Both resiliences saturate at their
//! floors rather than erroring.

use crate::{
    error::{ForgeError, ForgeResult},
    rng::RandomSource,
    types::Rupees,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LifeShock {
    pub id:          String,
    pub icon:        String,
    pub label:       String,
    pub description: String,
    pub insight:     String,
    pub damage:      f64,
}

/// Non-empty list of shocks to draw from.
#[derive(Debug, Clone, PartialEq)]
pub struct ShockCatalog {
    shocks: Vec<LifeShock>,
}

impl ShockCatalog {
    pub fn new(shocks: Vec<LifeShock>) -> ForgeResult<Self> {
        if shocks.is_empty() {
            return Err(ForgeError::invalid("shock_catalog", "empty"));
        }
        if let Some(bad) = shocks.iter().find(|s| !(s.damage.is_finite() && s.damage > 0.0)) {
            return Err(ForgeError::invalid("shock_damage", format!("{}={}", bad.id, bad.damage)));
        }
        Ok(Self { shocks })
    }

    /// The catalog shipped with the engine.
    pub fn builtin() -> Self {
        Self { shocks: default_shocks() }
    }

    /// Uniform draw.
    pub fn pick(&self, rng: &mut dyn RandomSource) -> &LifeShock {
        &self.shocks[rng.next_index(self.shocks.len())]
    }

    pub fn shocks(&self) -> &[LifeShock] {
        &self.shocks
    }

    pub fn len(&self) -> usize {
        self.shocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shocks.is_empty()
    }
}

/// Constants governing how damage is split between the two selves.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShockRules {
    /// Corpus at which protection would reach 100% before the cap.
    pub protection_scale:  Rupees,
    pub max_protection:    f64,
    pub shadow_multiplier: f64,
    pub resilience_floor:  f64,
    pub shadow_floor:      f64,
    pub resilience_max:    f64,
}

impl Default for ShockRules {
    fn default() -> Self {
        Self {
            protection_scale:  1_000_000.0,
            max_protection:    0.9,
            shadow_multiplier: 1.5,
            resilience_floor:  5.0,
            shadow_floor:      0.0,
            resilience_max:    100.0,
        }
    }
}

/// Everything a shock did, for rendering and the journal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShockOutcome {
    pub shock:             LifeShock,
    pub corpus_protection: f64,
    pub future_damage:     f64,
    pub shadow_damage:     f64,
    pub resilience:        f64,
    pub shadow_resilience: f64,
}

impl ShockRules {
    /// Rejects rules whose floors sit above the ceiling or whose factors are
    /// not usable numbers.
    pub fn validate(&self) -> ForgeResult<()> {
        let finite = [
            ("protection_scale", self.protection_scale),
            ("max_protection", self.max_protection),
            ("shadow_multiplier", self.shadow_multiplier),
            ("resilience_floor", self.resilience_floor),
            ("shadow_floor", self.shadow_floor),
            ("resilience_max", self.resilience_max),
        ];
        for (what, value) in finite {
            if !value.is_finite() {
                return Err(ForgeError::invalid(what, value));
            }
        }
        if self.protection_scale <= 0.0 {
            return Err(ForgeError::invalid("protection_scale", self.protection_scale));
        }
        if !(0.0..=1.0).contains(&self.max_protection) {
            return Err(ForgeError::invalid("max_protection", self.max_protection));
        }
        if self.shadow_multiplier < 0.0 {
            return Err(ForgeError::invalid("shadow_multiplier", self.shadow_multiplier));
        }
        if self.resilience_floor > self.resilience_max {
            return Err(ForgeError::invalid(
                "resilience_floor",
                format!("{} above resilience_max {}", self.resilience_floor, self.resilience_max),
            ));
        }
        if self.shadow_floor > self.resilience_max {
            return Err(ForgeError::invalid(
                "shadow_floor",
                format!("{} above resilience_max {}", self.shadow_floor, self.resilience_max),
            ));
        }
        Ok(())
    }

    /// Fraction of damage absorbed by the corpus, capped at `max_protection`.
    pub fn corpus_protection(&self, total_corpus: Rupees) -> f64 {
        (total_corpus.max(0.0) / self.protection_scale).min(self.max_protection)
    }

    /// Apply one shock to both resiliences.
    pub fn resolve(
        &self,
        shock:             &LifeShock,
        total_corpus:      Rupees,
        resilience:        f64,
        shadow_resilience: f64,
    ) -> ShockOutcome {
        let corpus_protection = self.corpus_protection(total_corpus);
        let future_damage = shock.damage * (1.0 - corpus_protection);
        let shadow_damage = shock.damage * self.shadow_multiplier;

        ShockOutcome {
            shock: shock.clone(),
            corpus_protection,
            future_damage,
            shadow_damage,
            // Floor wins over the ceiling, so unvalidated rules saturate
            // instead of panicking.
            resilience: (resilience - future_damage)
                .min(self.resilience_max)
                .max(self.resilience_floor),
            shadow_resilience: (shadow_resilience - shadow_damage)
                .min(self.resilience_max)
                .max(self.shadow_floor),
        }
    }
}

pub fn default_shocks() -> Vec<LifeShock> {
    let shock = |id: &str, icon: &str, label: &str, description: &str, insight: &str, damage: f64| {
        LifeShock {
            id:          id.into(),
            icon:        icon.into(),
            label:       label.into(),
            description: description.into(),
            insight:     insight.into(),
            damage,
        }
    };
    vec![
        shock(
            "medical_emergency", "🏥", "Medical Emergency",
            "An unexpected hospital stay drains your savings.",
            "A steady corpus means a health scare is a setback, not a crisis.",
            25.0,
        ),
        shock(
            "job_loss", "💼", "Job Loss",
            "Your company restructures and your role is cut.",
            "Months of runway turn a layoff into a career pivot.",
            30.0,
        ),
        shock(
            "market_crash", "📉", "Market Crash",
            "Markets fall sharply and stay down for a year.",
            "Long horizons and regular contributions ride out downturns.",
            20.0,
        ),
        shock(
            "family_expense", "👪", "Family Expense",
            "A family wedding needs your support.",
            "Planned savings let you help without borrowing.",
            15.0,
        ),
        shock(
            "inflation_spike", "🔥", "Inflation Spike",
            "Prices jump and your money buys less every month.",
            "Growth assets outpace inflation; idle cash does not.",
            18.0,
        ),
    ]
}
