//! Simulation driver - owns the game state and runs the frame pipeline.

use game_graph::GameGraph;

use crate::behavior;
use crate::clock::{Clock, SystemClock};
use crate::collision;
use crate::config::EngineConfig;
use crate::effects;
use crate::error::Result;
use crate::input::KeyState;
use crate::movement;
use crate::report::{FrameEvent, FrameReport};
use crate::state::{compile, GameObject, GameState, Player};

/// A running game.
///
/// The engine exclusively owns its [`GameState`]. Hosts drive it with
/// [`update`](Self::update) and [`reset`](Self::reset) and read it through the
/// accessors, which hand out shared references or owned snapshots.
pub struct GameEngine<C: Clock = SystemClock> {
    state: GameState,
    config: EngineConfig,
    clock: C,
}

impl GameEngine {
    /// Compile `graph` with the default configuration and the system clock.
    pub fn new(graph: &GameGraph) -> Self {
        Self::build(graph, EngineConfig::default(), SystemClock::new())
    }

    /// Compile `graph` with a custom configuration, which is validated first.
    pub fn with_config(graph: &GameGraph, config: EngineConfig) -> Result<Self> {
        Self::with_clock(graph, config, SystemClock::new())
    }
}

impl<C: Clock> GameEngine<C> {
    /// Compile `graph` with an explicit configuration and time source.
    ///
    /// Fails if the configuration does not pass [`EngineConfig::validate`].
    pub fn with_clock(graph: &GameGraph, config: EngineConfig, clock: C) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(graph, config, clock))
    }

    fn build(graph: &GameGraph, config: EngineConfig, clock: C) -> Self {
        let state = compile(graph, &config);
        Self {
            state,
            config,
            clock,
        }
    }

    /// Advance the simulation by `delta_ms` with the given keys held.
    ///
    /// # Pipeline
    ///
    /// 1. Advance game time
    /// 2. Move the player and apply world bounds
    /// 3. Count down effects and recompute derived stats
    /// 4. Move enemies
    /// 5. Detect collisions and proximity triggers, firing connected edges
    /// 6. Expire invincibility
    ///
    /// The clock is read once, so every deadline set during the frame is
    /// measured from the same instant.
    pub fn update(&mut self, delta_ms: f64, keys: &KeyState) -> FrameReport {
        let was_over = self.is_game_over();
        let state = &mut self.state;

        // Step 1: Game time
        state.game_time += delta_ms;
        let mut report = FrameReport::new(state.game_time);

        // Step 2: Movement
        movement::integrate(
            &mut state.player,
            &state.world_bounds,
            keys,
            delta_ms,
            &self.config,
        );

        // Step 3: Effects
        effects::tick(&mut state.player, delta_ms, &self.config);

        // Step 4: Behavior
        behavior::update_enemies(state, delta_ms, &self.config);

        // Step 5: Collisions and triggers
        let now = self.clock.now_ms();
        collision::detect_and_resolve(state, now, &self.config, &mut report);

        // Step 6: Invincibility
        state.player.expire_invincibility(now);

        if !was_over && self.is_game_over() {
            tracing::info!(game_time = self.state.game_time, "game over");
            report.push(FrameEvent::GameOver);
        }

        report
    }

    /// Discard the current run and recompile `graph` from scratch.
    pub fn reset(&mut self, graph: &GameGraph) {
        self.state = compile(graph, &self.config);
        tracing::info!(
            objects = self.state.objects.len(),
            connections = self.state.connections.len(),
            "game reset"
        );
    }

    /// The player has run out of health.
    pub fn is_game_over(&self) -> bool {
        self.state.player.health <= 0.0
    }

    pub fn game_state(&self) -> &GameState {
        &self.state
    }

    /// An owned copy of the current state.
    pub fn snapshot(&self) -> GameState {
        self.state.clone()
    }

    /// The current state as JSON, for hosts that render outside Rust.
    pub fn snapshot_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(&self.state)
    }

    pub fn player(&self) -> &Player {
        &self.state.player
    }

    /// Every game object in authored order, including inactive ones.
    pub fn game_objects(&self) -> Vec<&GameObject> {
        self.state.objects.iter().collect()
    }

    pub fn active_game_objects(&self) -> Vec<&GameObject> {
        self.state.active_objects().collect()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }
}
