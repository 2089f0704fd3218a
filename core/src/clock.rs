//! Turn clock. Owns the month counter and the turn status.
//!
//! A turn moves Idle → Advancing { resolved: false } → Advancing
//! { resolved: true } → Idle. The two Advancing states are the pauses the
//! UI animates through; neither can be skipped or cancelled.

use crate::{
    error::{ForgeError, ForgeResult},
    types::Month,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TurnStatus {
    Idle,
    Advancing { resolved: bool },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnClock {
    pub month:  Month,
    pub status: TurnStatus,
}

impl Default for TurnClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TurnClock {
    pub fn new() -> Self {
        Self { month: 0, status: TurnStatus::Idle }
    }

    pub fn is_advancing(&self) -> bool {
        matches!(self.status, TurnStatus::Advancing { .. })
    }

    /// Open a turn. Rejects rather than queues a second one.
    pub fn begin(&mut self) -> ForgeResult<Month> {
        if self.is_advancing() {
            return Err(ForgeError::TurnInProgress);
        }
        self.status = TurnStatus::Advancing { resolved: false };
        Ok(self.month + 1)
    }

    /// Step the month. Only valid once per opened turn.
    pub fn advance(&mut self) -> ForgeResult<Month> {
        match self.status {
            TurnStatus::Advancing { resolved: false } => {
                self.month += 1;
                self.status = TurnStatus::Advancing { resolved: true };
                Ok(self.month)
            }
            _ => Err(ForgeError::TurnNotStarted),
        }
    }

    pub fn finish(&mut self) -> ForgeResult<Month> {
        match self.status {
            TurnStatus::Advancing { resolved: true } => {
                self.status = TurnStatus::Idle;
                Ok(self.month)
            }
            TurnStatus::Advancing { resolved: false } => Err(ForgeError::TurnNotResolved),
            TurnStatus::Idle => Err(ForgeError::TurnNotStarted),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_cycle_steps_one_month() {
        let mut clock = TurnClock::new();
        assert_eq!(clock.begin().unwrap(), 1);
        assert_eq!(clock.advance().unwrap(), 1);
        assert_eq!(clock.finish().unwrap(), 1);
        assert_eq!(clock.status, TurnStatus::Idle);
    }

    #[test]
    fn advance_twice_in_one_turn_rejected() {
        let mut clock = TurnClock::new();
        clock.begin().unwrap();
        clock.advance().unwrap();
        assert!(matches!(clock.advance(), Err(ForgeError::TurnNotStarted)));
        assert_eq!(clock.month, 1);
    }

    #[test]
    fn advance_without_begin_rejected() {
        let mut clock = TurnClock::new();
        assert!(matches!(clock.advance(), Err(ForgeError::TurnNotStarted)));
        assert_eq!(clock.month, 0);
    }
}
