//! Future Forge — retirement corpus projection and the turn-based
//! "future self vs. shadow twin" simulation that drives the game.

pub mod allocation;
pub mod clock;
pub mod config;
pub mod engine;
pub mod error;
pub mod event;
pub mod format;
pub mod journal;
pub mod model;
pub mod rng;
pub mod shock;
pub mod snapshot;
pub mod stage;
pub mod state;
pub mod types;

pub use engine::{ForgeEngine, TurnResult};
pub use error::{ForgeError, ForgeResult};
