//! Asset allocation across the three NPS sleeves.
//!
//! A stored allocation always satisfies `validate()`: every sleeve in
//! [MIN_SLEEVE, MAX_SLEEVE] and the three summing to exactly 100.

use crate::error::{ForgeError, ForgeResult};
use serde::{Deserialize, Serialize};

pub const MIN_SLEEVE: u32 = 5;
pub const MAX_SLEEVE: u32 = 85;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sleeve {
    Equity,
    Corporate,
    Govt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationProfile {
    pub equity:    u32,
    pub corporate: u32,
    pub govt:      u32,
}

impl Default for AllocationProfile {
    fn default() -> Self {
        Self { equity: 50, corporate: 30, govt: 20 }
    }
}

impl AllocationProfile {
    pub fn new(equity: u32, corporate: u32, govt: u32) -> Self {
        Self { equity, corporate, govt }
    }

    pub fn total(&self) -> u32 {
        self.equity + self.corporate + self.govt
    }

    pub fn get(&self, sleeve: Sleeve) -> u32 {
        match sleeve {
            Sleeve::Equity    => self.equity,
            Sleeve::Corporate => self.corporate,
            Sleeve::Govt      => self.govt,
        }
    }

    fn slot(&mut self, sleeve: Sleeve) -> &mut u32 {
        match sleeve {
            Sleeve::Equity    => &mut self.equity,
            Sleeve::Corporate => &mut self.corporate,
            Sleeve::Govt      => &mut self.govt,
        }
    }

    pub fn validate(&self) -> ForgeResult<()> {
        let reject = |reason: String| ForgeError::InvalidAllocation {
            equity:    self.equity,
            corporate: self.corporate,
            govt:      self.govt,
            reason,
        };

        for (name, value) in [
            ("equity", self.equity),
            ("corporate", self.corporate),
            ("govt", self.govt),
        ] {
            if !(MIN_SLEEVE..=MAX_SLEEVE).contains(&value) {
                return Err(reject(format!(
                    "{name} {value}% outside [{MIN_SLEEVE}, {MAX_SLEEVE}]"
                )));
            }
        }
        if self.total() != 100 {
            return Err(reject(format!("sleeves sum to {}, expected 100", self.total())));
        }
        Ok(())
    }

    /// Move one slider and pull the other two back to a 100% total.
    ///
    /// Half the difference (floored) goes to the first remaining sleeve,
    /// the second takes whatever is left. Neither drops below zero. The
    /// result is not validated; the slider may pass through out-of-range
    /// positions before the player confirms.
    pub fn rebalance(&self, sleeve: Sleeve, value: u32) -> Self {
        let mut next = *self;
        let value = value.min(100);
        *next.slot(sleeve) = value;

        let total = i64::from(next.total());
        if total == 100 {
            return next;
        }

        let diff = 100 - total;
        let [first, second] = others(sleeve);
        let first_value = (i64::from(next.get(first)) + diff.div_euclid(2)).max(0);
        let second_value = (100 - i64::from(value) - first_value).max(0);
        *next.slot(first) = first_value as u32;
        *next.slot(second) = second_value as u32;
        next
    }
}

fn others(sleeve: Sleeve) -> [Sleeve; 2] {
    match sleeve {
        Sleeve::Equity    => [Sleeve::Corporate, Sleeve::Govt],
        Sleeve::Corporate => [Sleeve::Equity, Sleeve::Govt],
        Sleeve::Govt      => [Sleeve::Equity, Sleeve::Corporate],
    }
}

/// A named one-click allocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationPreset {
    pub name:      String,
    pub equity:    u32,
    pub corporate: u32,
    pub govt:      u32,
}

impl AllocationPreset {
    pub fn profile(&self) -> AllocationProfile {
        AllocationProfile::new(self.equity, self.corporate, self.govt)
    }
}

pub fn default_presets() -> Vec<AllocationPreset> {
    vec![
        AllocationPreset { name: "Conservative".into(), equity: 25, corporate: 35, govt: 40 },
        AllocationPreset { name: "Balanced".into(),     equity: 50, corporate: 30, govt: 20 },
        AllocationPreset { name: "Aggressive".into(),   equity: 75, corporate: 15, govt: 10 },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_profile_is_valid() {
        assert!(AllocationProfile::default().validate().is_ok());
    }

    #[test]
    fn rebalance_keeps_total_at_hundred() {
        let p = AllocationProfile::default().rebalance(Sleeve::Equity, 60);
        // diff = -10: corporate takes -5, govt gets the rest.
        assert_eq!(p, AllocationProfile::new(60, 25, 15));
        assert_eq!(p.total(), 100);
    }

    #[test]
    fn rebalance_floors_odd_differences() {
        let p = AllocationProfile::default().rebalance(Sleeve::Govt, 23);
        // diff = -3, floor(-1.5) = -2 applied to equity.
        assert_eq!(p, AllocationProfile::new(48, 29, 23));
    }

    #[test]
    fn rebalance_never_goes_negative() {
        let p = AllocationProfile::new(5, 10, 85).rebalance(Sleeve::Corporate, 90);
        assert_eq!(p, AllocationProfile::new(0, 90, 10));
    }

    #[test]
    fn out_of_range_sleeve_rejected() {
        let err = AllocationProfile::new(90, 5, 5).validate().unwrap_err();
        assert!(matches!(err, ForgeError::InvalidAllocation { equity: 90, .. }));
    }

    #[test]
    fn default_presets_are_valid() {
        for preset in default_presets() {
            assert!(preset.profile().validate().is_ok(), "{} invalid", preset.name);
        }
    }
}
