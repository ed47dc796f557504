use std::time::{Duration, Instant};

use crate::games::SessionRng;
use crate::{log, log_debug};
use super::clock::{GameClock, TickHook};
use super::game_state::{SnakeGameState, StepOutcome};
use super::input::{direction_for_key, KeyInput, SwipeTracker};
use super::settings::SnakeSettings;
use super::types::{Direction, Point};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GamePhase {
    NotStarted,
    Running,
    GameOver,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Flash {
    cell: Point,
    expires_at: Instant,
}

/// Owns one game: its state, its clock, and the input that steers it.
///
/// The clock only exists while the game is running and the widget is visible,
/// so a hidden or finished game can never receive a tick. Starting the clock
/// requires a tokio runtime context.
pub struct GameController {
    settings: SnakeSettings,
    rng: SessionRng,
    state: Option<SnakeGameState>,
    clock: Option<GameClock>,
    on_tick: Option<TickHook>,
    swipe: SwipeTracker,
    visible: bool,
    flash: Option<Flash>,
    best_score: u32,
}

impl GameController {
    pub fn new(settings: SnakeSettings, rng: SessionRng) -> Self {
        let swipe = SwipeTracker::new(settings.swipe_threshold_px);
        Self {
            settings,
            rng,
            state: None,
            clock: None,
            on_tick: None,
            swipe,
            visible: true,
            flash: None,
            best_score: 0,
        }
    }

    pub fn with_tick_hook(mut self, hook: TickHook) -> Self {
        self.on_tick = Some(hook);
        self
    }

    pub fn settings(&self) -> &SnakeSettings {
        &self.settings
    }

    pub fn phase(&self) -> GamePhase {
        match &self.state {
            None => GamePhase::NotStarted,
            Some(state) if state.is_game_over() => GamePhase::GameOver,
            Some(_) => GamePhase::Running,
        }
    }

    pub fn state(&self) -> Option<&SnakeGameState> {
        self.state.as_ref()
    }

    pub fn score(&self) -> u32 {
        self.state.as_ref().map_or(0, |s| s.score())
    }

    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    pub fn is_game_over(&self) -> bool {
        self.phase() == GamePhase::GameOver
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn clock_running(&self) -> bool {
        self.clock.is_some()
    }

    /// Begins a fresh run. While a run is in progress this is a restart.
    pub fn start(&mut self) {
        self.stop_clock();
        self.swipe.reset();
        self.flash = None;

        let state = SnakeGameState::new(&self.settings, &mut self.rng);
        log!(
            "Game started: grid {}x{}, food at {}",
            state.field_size().width,
            state.field_size().height,
            state.food().map_or_else(|| "-".to_string(), |p| p.to_string())
        );
        self.state = Some(state);
        self.sync_clock();
    }

    pub fn restart(&mut self) {
        self.start();
    }

    /// Hiding the widget stops the clock outright. Showing it resumes a running game.
    pub fn set_visible(&mut self, visible: bool) {
        if self.visible == visible {
            return;
        }
        self.visible = visible;
        self.swipe.reset();
        log_debug!("Widget visibility changed: {}", visible);
        self.sync_clock();
    }

    pub fn handle_key(&mut self, key: KeyInput) -> bool {
        match direction_for_key(key) {
            Some(direction) => self.steer(direction),
            None => false,
        }
    }

    pub fn touch_start(&mut self, id: u64, x: f32, y: f32) {
        if self.accepts_input() {
            self.swipe.touch_start(id, x, y);
        }
    }

    pub fn touch_end(&mut self, id: u64, x: f32, y: f32) -> bool {
        if !self.accepts_input() {
            return false;
        }
        match self.swipe.touch_end(id, x, y) {
            Some(direction) => self.steer(direction),
            None => false,
        }
    }

    pub fn touch_cancel(&mut self, id: u64) {
        self.swipe.touch_cancel(id);
    }

    /// Queues a turn for the next tick. Only the pending direction changes here.
    pub fn steer(&mut self, direction: Direction) -> bool {
        if !self.accepts_input() {
            return false;
        }
        match self.state.as_mut() {
            Some(state) => state.request_direction(direction),
            None => false,
        }
    }

    /// Runs one simulation step for every tick the clock has delivered.
    pub fn pump(&mut self) -> usize {
        let delivered = match self.clock.as_mut() {
            Some(clock) => clock.drain(),
            None => return 0,
        };

        let mut applied = 0;
        for _ in 0..delivered {
            if self.phase() != GamePhase::Running {
                break;
            }
            self.tick();
            applied += 1;
        }
        applied
    }

    /// A single simulation step. No-op unless a run is in progress.
    pub fn tick(&mut self) -> StepOutcome {
        let Some(state) = self.state.as_mut() else {
            return StepOutcome::Halted;
        };
        let outcome = state.step(&mut self.rng);
        let score = state.score();
        let interval = state.interval();

        if self.flash.is_some_and(|f| f.expires_at <= Instant::now()) {
            self.flash = None;
        }

        match outcome {
            StepOutcome::Grew { eaten_at } => {
                self.best_score = self.best_score.max(score);
                self.flash = Some(Flash {
                    cell: eaten_at,
                    expires_at: Instant::now() + self.settings.flash_duration(),
                });
                if let Some(clock) = &self.clock {
                    clock.set_interval(interval);
                }
            }
            StepOutcome::GameOver(reason) => {
                self.best_score = self.best_score.max(score);
                self.stop_clock();
                self.swipe.reset();
                log!("Game over: snake {}. Score: {}", reason, score);
            }
            StepOutcome::Moved | StepOutcome::Halted => {}
        }
        outcome
    }

    /// The segment highlighted after the last meal, while its flash lasts.
    pub fn flashing_cell(&self, now: Instant) -> Option<Point> {
        self.flash
            .filter(|flash| now < flash.expires_at)
            .map(|flash| flash.cell)
    }

    /// Time until the next tick is due, for hosts that schedule repaints.
    pub fn tick_interval(&self) -> Option<Duration> {
        self.clock.as_ref().map(|clock| clock.interval())
    }

    fn accepts_input(&self) -> bool {
        self.visible && self.phase() == GamePhase::Running
    }

    fn sync_clock(&mut self) {
        let should_run = self.visible && self.phase() == GamePhase::Running;
        match (should_run, self.clock.is_some()) {
            (true, false) => {
                let interval = self
                    .state
                    .as_ref()
                    .map_or(self.settings.initial_interval(), |s| s.interval());
                self.clock = Some(GameClock::start(interval, self.on_tick.clone()));
            }
            (false, true) => self.stop_clock(),
            _ => {}
        }
    }

    fn stop_clock(&mut self) {
        if self.clock.take().is_some() {
            log_debug!("Game clock stopped");
        }
    }

    #[cfg(test)]
    fn install_state(&mut self, state: SnakeGameState) {
        self.stop_clock();
        self.state = Some(state);
        self.sync_clock();
    }
}
