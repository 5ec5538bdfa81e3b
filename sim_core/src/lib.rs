//! # Sim Core
//!
//! The Tesserae simulation engine. It compiles an authored [`GameGraph`] into a
//! mutable [`GameState`] and advances it one frame at a time.
//!
//! ## Frame pipeline
//!
//! Every call to [`GameEngine::update`] runs, in this order:
//!
//! 1. **movement**: integrate held keys into the player position and apply world bounds
//! 2. **effects**: count down status effects and recompute derived stats
//! 3. **behavior**: move enemies according to their AI behavior
//! 4. **collision**: detect collisions and proximity activations, firing the
//!    connected edges through the event executor
//! 5. **invincibility**: expire the post-hit invincibility window
//!
//! The engine is single-threaded and owns its state exclusively. Hosts read it
//! through shared references or snapshots and mutate it only via `update` and
//! `reset`.
//!
//! [`GameGraph`]: game_graph::GameGraph

pub mod behavior;
pub mod clock;
pub mod collision;
pub mod config;
pub mod effects;
pub mod engine;
pub mod error;
pub mod events;
pub mod input;
pub mod movement;
pub mod pickup;
pub mod report;
pub mod state;

pub use clock::*;
pub use config::*;
pub use engine::*;
pub use error::*;
pub use events::TriggerKind;
pub use input::*;
pub use report::*;
pub use state::*;
