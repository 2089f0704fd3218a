use crate::{
    allocation::{default_presets, AllocationPreset, AllocationProfile},
    error::{ForgeError, ForgeResult},
    model::SleeveReturns,
    shock::{LifeShock, ShockCatalog, ShockRules},
    stage::StageThresholds,
    types::{Month, Rupees},
};
use serde::{Deserialize, Serialize};

/// Scalar tunables from `engine/forge_config.json`.
/// Every field is optional in the file; missing ones keep the default.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    pub current_age:          u32,
    pub freedom_age:          u32,
    pub initial_contribution: Rupees,
    pub monthly_expenses:     Rupees,
    pub initial_tokens:       u32,
    pub initial_resilience:   f64,
    /// Life shock every N months.
    pub shock_interval:       Month,
    /// Streak bonus every N consecutive turns.
    pub streak_bonus_interval: u32,
    pub guild_target:         Rupees,
    /// Corpus credited per inflation-defense point.
    pub inflation_bonus_per_point: Rupees,
    pub freedom_days:         u32,
    pub days_per_month:       u32,
    /// Corpus that adds one point of divergence.
    pub divergence_corpus_unit: Rupees,
    pub stage_thresholds:     StageThresholds,
    pub shock_rules:          ShockRules,
    pub sleeve_returns:       SleeveReturns,
    pub initial_allocation:   AllocationProfile,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            current_age:               30,
            freedom_age:               60,
            initial_contribution:      5_000.0,
            monthly_expenses:          40_000.0,
            initial_tokens:            2,
            initial_resilience:        100.0,
            shock_interval:            3,
            streak_bonus_interval:     3,
            guild_target:              1_000_000.0,
            inflation_bonus_per_point: 1_000.0,
            freedom_days:              10_950,
            days_per_month:            30,
            divergence_corpus_unit:    50_000.0,
            stage_thresholds:          StageThresholds::default(),
            shock_rules:               ShockRules::default(),
            sleeve_returns:            SleeveReturns::default(),
            initial_allocation:        AllocationProfile::default(),
        }
    }
}

/// Oldest freedom age a settings file may ask for.
pub const MAX_AGE: u32 = 120;

impl EngineSettings {
    /// Months between the current age and the freedom age.
    pub fn horizon_months(&self) -> Month {
        self.freedom_age.saturating_sub(self.current_age).saturating_mul(12)
    }

    /// Checks everything the turn loop relies on but serde cannot.
    pub fn validate(&self) -> ForgeResult<()> {
        if self.current_age >= self.freedom_age {
            return Err(ForgeError::invalid(
                "freedom_age",
                format!("{} not after current_age {}", self.freedom_age, self.current_age),
            ));
        }
        if self.freedom_age > MAX_AGE {
            return Err(ForgeError::invalid("freedom_age", self.freedom_age));
        }
        if self.shock_interval == 0 {
            return Err(ForgeError::invalid("shock_interval", 0));
        }
        if self.streak_bonus_interval == 0 {
            return Err(ForgeError::invalid("streak_bonus_interval", 0));
        }
        let positive = [
            ("initial_contribution", self.initial_contribution),
            ("monthly_expenses", self.monthly_expenses),
            ("divergence_corpus_unit", self.divergence_corpus_unit),
        ];
        for (what, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ForgeError::invalid(what, value));
            }
        }
        self.shock_rules.validate()?;
        self.initial_allocation.validate()
    }
}

#[derive(Debug, Clone, Deserialize)]
struct ShockCatalogFile {
    shocks: Vec<LifeShock>,
}

#[derive(Debug, Clone, Deserialize)]
struct PresetFile {
    presets: Vec<AllocationPreset>,
}

#[derive(Debug, Clone)]
pub struct ForgeConfig {
    pub settings: EngineSettings,
    pub shocks:   ShockCatalog,
    pub presets:  Vec<AllocationPreset>,
}

impl Default for ForgeConfig {
    fn default() -> Self {
        Self {
            settings: EngineSettings::default(),
            shocks:   ShockCatalog::builtin(),
            presets:  default_presets(),
        }
    }
}

impl ForgeConfig {
    /// Load from the data/ directory.
    /// In tests, use ForgeConfig::default() or with_shocks().
    pub fn load(data_dir: &str) -> anyhow::Result<Self> {
        let settings_path = format!("{data_dir}/engine/forge_config.json");
        let settings_content = std::fs::read_to_string(&settings_path)
            .map_err(|e| anyhow::anyhow!("Cannot read {settings_path}: {e}"))?;
        let settings: EngineSettings = serde_json::from_str(&settings_content)?;

        let shock_path = format!("{data_dir}/shocks/life_shocks.json");
        let shock_content = std::fs::read_to_string(&shock_path)
            .map_err(|e| anyhow::anyhow!("Cannot read {shock_path}: {e}"))?;
        let shock_file: ShockCatalogFile = serde_json::from_str(&shock_content)?;
        let shocks = ShockCatalog::new(shock_file.shocks)
            .map_err(|e| anyhow::anyhow!("{shock_path}: {e}"))?;

        let preset_path = format!("{data_dir}/allocation/presets.json");
        let preset_content = std::fs::read_to_string(&preset_path)
            .map_err(|e| anyhow::anyhow!("Cannot read {preset_path}: {e}"))?;
        let preset_file: PresetFile = serde_json::from_str(&preset_content)?;
        for preset in &preset_file.presets {
            preset
                .profile()
                .validate()
                .map_err(|e| anyhow::anyhow!("{preset_path}: preset '{}': {e}", preset.name))?;
        }

        settings
            .validate()
            .map_err(|e| anyhow::anyhow!("{settings_path}: {e}"))?;

        Ok(Self {
            settings,
            shocks,
            presets: preset_file.presets,
        })
    }

    /// Default config with a custom shock catalog. Used to pin shocks in tests.
    pub fn with_shocks(shocks: ShockCatalog) -> Self {
        Self { shocks, ..Self::default() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_settings_file_keeps_defaults() {
        let settings: EngineSettings =
            serde_json::from_str(r#"{ "current_age": 25, "initial_tokens": 5 }"#).unwrap();
        assert_eq!(settings.current_age, 25);
        assert_eq!(settings.initial_tokens, 5);
        assert_eq!(settings.freedom_age, 60);
        assert_eq!(settings.horizon_months(), 420);
    }

    #[test]
    fn missing_data_dir_reports_path() {
        let err = ForgeConfig::load("/definitely/not/here").unwrap_err();
        assert!(err.to_string().contains("forge_config.json"), "{err}");
    }
}
