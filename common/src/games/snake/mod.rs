mod clock;
mod controller;
mod game_state;
mod input;
mod settings;
mod entity;
mod types;

pub use clock::{GameClock, TickHook};
pub use controller::{GameController, GamePhase};
pub use game_state::{SnakeGameState, StepOutcome, INITIAL_DIRECTION};
pub use input::{direction_for_key, direction_for_swipe, KeyInput, SwipeTracker};
pub use settings::SnakeSettings;
pub use entity::Snake;
pub use types::{Direction, FieldSize, GameEndReason, Point};
