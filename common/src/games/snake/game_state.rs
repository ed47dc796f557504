use std::time::Duration;

use crate::games::SessionRng;
use crate::log_debug;
use super::settings::SnakeSettings;
use super::entity::Snake;
use super::types::{Direction, FieldSize, GameEndReason, Point};

/// Random draws tried before falling back to an explicit scan of free cells.
const FOOD_SAMPLE_ATTEMPTS: usize = 100;

pub const INITIAL_DIRECTION: Direction = Direction::Right;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    Moved,
    Grew { eaten_at: Point },
    GameOver(GameEndReason),
    /// The state was already terminal, nothing changed.
    Halted,
}

#[derive(Clone, Debug)]
pub struct SnakeGameState {
    snake: Snake,
    food: Option<Point>,
    field_size: FieldSize,
    score: u32,
    interval: Duration,
    tick: u64,
    game_end_reason: Option<GameEndReason>,
    settings: SnakeSettings,
}

impl SnakeGameState {
    pub fn new(settings: &SnakeSettings, rng: &mut SessionRng) -> Self {
        let field_size = settings.field_size();
        let snake = Snake::new(settings.start_position(), INITIAL_DIRECTION);
        let food = spawn_food(&snake, &field_size, rng);
        Self {
            snake,
            food,
            field_size,
            score: 0,
            interval: settings.initial_interval(),
            tick: 0,
            game_end_reason: None,
            settings: settings.clone(),
        }
    }

    /// A running state with an explicit body (head first) and food cell.
    pub fn with_layout(
        settings: &SnakeSettings,
        segments: &[Point],
        food: Point,
        direction: Direction,
    ) -> Option<Self> {
        let field_size = settings.field_size();
        if !segments.iter().all(|p| field_size.contains(*p)) || !field_size.contains(food) {
            return None;
        }
        let snake = Snake::from_segments(segments, direction)?;
        if snake.contains(&food) {
            return None;
        }
        Some(Self {
            snake,
            food: Some(food),
            field_size,
            score: 0,
            interval: settings.initial_interval(),
            tick: 0,
            game_end_reason: None,
            settings: settings.clone(),
        })
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Option<Point> {
        self.food
    }

    pub fn field_size(&self) -> FieldSize {
        self.field_size
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    pub fn direction(&self) -> Direction {
        self.snake.direction
    }

    pub fn is_game_over(&self) -> bool {
        self.game_end_reason.is_some()
    }

    pub fn game_end_reason(&self) -> Option<GameEndReason> {
        self.game_end_reason
    }

    /// Accepts a turn for the next tick. Returns false when it was ignored.
    pub fn request_direction(&mut self, direction: Direction) -> bool {
        if self.is_game_over() {
            return false;
        }
        self.snake.request_direction(direction)
    }

    /// Advances the game by one tick.
    pub fn step(&mut self, rng: &mut SessionRng) -> StepOutcome {
        if self.is_game_over() {
            return StepOutcome::Halted;
        }

        let direction = self.snake.pending_direction.unwrap_or(self.snake.direction);
        let next_head = self.snake.head().step(direction);

        // Checked before anything moves so a fatal tick leaves the state as it was.
        if !self.field_size.contains(next_head) {
            return self.finish(GameEndReason::WallCollision);
        }
        if self.snake.contains(&next_head) {
            return self.finish(GameEndReason::SelfCollision);
        }

        self.snake.apply_pending_direction();
        self.tick += 1;

        let ate = self.food == Some(next_head);
        self.snake.advance(next_head, ate);
        if !ate {
            return StepOutcome::Moved;
        }

        self.score += 1;
        self.interval = self.settings.next_interval(self.interval);
        self.food = spawn_food(&self.snake, &self.field_size, rng);
        log_debug!(
            "ate food at {}. Score: {}, interval: {}ms",
            next_head,
            self.score,
            self.interval.as_millis()
        );

        if self.food.is_none() {
            return self.finish(GameEndReason::BoardFilled);
        }
        StepOutcome::Grew { eaten_at: next_head }
    }

    fn finish(&mut self, reason: GameEndReason) -> StepOutcome {
        self.game_end_reason = Some(reason);
        StepOutcome::GameOver(reason)
    }
}

/// Picks a free cell for food, `None` when the snake covers the whole field.
fn spawn_food(snake: &Snake, field_size: &FieldSize, rng: &mut SessionRng) -> Option<Point> {
    if snake.len() >= field_size.cell_count() {
        return None;
    }

    for _ in 0..FOOD_SAMPLE_ATTEMPTS {
        let pos = Point::new(
            rng.random_range(0..field_size.width),
            rng.random_range(0..field_size.height),
        );
        if !snake.contains(&pos) {
            return Some(pos);
        }
    }

    let free: Vec<Point> = field_size.cells().filter(|p| !snake.contains(p)).collect();
    rng.choose(&free).copied()
}
