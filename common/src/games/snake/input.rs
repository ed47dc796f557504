use super::types::Direction;

/// Host-independent key identity. Hosts translate their own key events into this.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyInput {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Char(char),
}

pub fn direction_for_key(key: KeyInput) -> Option<Direction> {
    match key {
        KeyInput::ArrowUp => Some(Direction::Up),
        KeyInput::ArrowDown => Some(Direction::Down),
        KeyInput::ArrowLeft => Some(Direction::Left),
        KeyInput::ArrowRight => Some(Direction::Right),
        KeyInput::Char(c) => match c.to_ascii_lowercase() {
            'w' => Some(Direction::Up),
            's' => Some(Direction::Down),
            'a' => Some(Direction::Left),
            'd' => Some(Direction::Right),
            _ => None,
        },
    }
}

/// Maps a finished drag to a direction. Screen coordinates, y grows downward.
pub fn direction_for_swipe(dx: f32, dy: f32, threshold: f32) -> Option<Direction> {
    if !dx.is_finite() || !dy.is_finite() {
        return None;
    }
    if dx.abs().max(dy.abs()) < threshold {
        return None;
    }
    if dx.abs() > dy.abs() {
        Some(if dx > 0.0 { Direction::Right } else { Direction::Left })
    } else {
        Some(if dy > 0.0 { Direction::Down } else { Direction::Up })
    }
}

#[derive(Clone, Copy, Debug)]
struct ActiveTouch {
    id: u64,
    x: f32,
    y: f32,
}

/// Pairs touch-start with touch-end for a single finger.
///
/// A second finger landing while one is tracked cancels the gesture, so
/// pinches and other multi-touch input never turn the snake.
#[derive(Debug)]
pub struct SwipeTracker {
    threshold: f32,
    active: Option<ActiveTouch>,
    fingers_down: usize,
}

impl SwipeTracker {
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold,
            active: None,
            fingers_down: 0,
        }
    }

    pub fn touch_start(&mut self, id: u64, x: f32, y: f32) {
        self.fingers_down += 1;
        if self.fingers_down == 1 {
            self.active = Some(ActiveTouch { id, x, y });
        } else {
            self.active = None;
        }
    }

    pub fn touch_end(&mut self, id: u64, x: f32, y: f32) -> Option<Direction> {
        self.fingers_down = self.fingers_down.saturating_sub(1);
        let start = self.active.filter(|touch| touch.id == id)?;
        self.active = None;
        direction_for_swipe(x - start.x, y - start.y, self.threshold)
    }

    pub fn touch_cancel(&mut self, id: u64) {
        self.fingers_down = self.fingers_down.saturating_sub(1);
        if self.active.is_some_and(|touch| touch.id == id) {
            self.active = None;
        }
    }

    pub fn reset(&mut self) {
        self.active = None;
        self.fingers_down = 0;
    }

    pub fn is_tracking(&self) -> bool {
        self.active.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrows_and_wasd() {
        assert_eq!(direction_for_key(KeyInput::ArrowUp), Some(Direction::Up));
        assert_eq!(direction_for_key(KeyInput::ArrowLeft), Some(Direction::Left));
        assert_eq!(direction_for_key(KeyInput::Char('w')), Some(Direction::Up));
        assert_eq!(direction_for_key(KeyInput::Char('A')), Some(Direction::Left));
        assert_eq!(direction_for_key(KeyInput::Char('S')), Some(Direction::Down));
        assert_eq!(direction_for_key(KeyInput::Char('d')), Some(Direction::Right));
        assert_eq!(direction_for_key(KeyInput::Char('q')), None);
    }

    #[test]
    fn test_small_drag_is_a_tap() {
        assert_eq!(direction_for_swipe(10.0, -12.0, 30.0), None);
        assert_eq!(direction_for_swipe(29.9, 0.0, 30.0), None);
        assert_eq!(direction_for_swipe(30.0, 0.0, 30.0), Some(Direction::Right));
    }

    #[test]
    fn test_dominant_axis_wins() {
        assert_eq!(direction_for_swipe(-80.0, 20.0, 30.0), Some(Direction::Left));
        assert_eq!(direction_for_swipe(20.0, 80.0, 30.0), Some(Direction::Down));
        assert_eq!(direction_for_swipe(5.0, -60.0, 30.0), Some(Direction::Up));
    }

    #[test]
    fn test_tracker_pairs_start_and_end() {
        let mut tracker = SwipeTracker::new(30.0);
        tracker.touch_start(1, 100.0, 100.0);
        assert!(tracker.is_tracking());
        assert_eq!(tracker.touch_end(1, 100.0, 20.0), Some(Direction::Up));
        assert!(!tracker.is_tracking());
        assert_eq!(tracker.touch_end(1, 0.0, 0.0), None);
    }

    #[test]
    fn test_second_finger_cancels_gesture() {
        let mut tracker = SwipeTracker::new(30.0);
        tracker.touch_start(1, 100.0, 100.0);
        tracker.touch_start(2, 150.0, 100.0);
        assert_eq!(tracker.touch_end(2, 300.0, 100.0), None);
        assert_eq!(tracker.touch_end(1, 300.0, 100.0), None);

        tracker.touch_start(3, 0.0, 0.0);
        assert_eq!(tracker.touch_end(3, 0.0, 90.0), Some(Direction::Down));
    }

    #[test]
    fn test_cancel_discards_gesture() {
        let mut tracker = SwipeTracker::new(30.0);
        tracker.touch_start(4, 0.0, 0.0);
        tracker.touch_cancel(4);
        assert!(!tracker.is_tracking());
        assert_eq!(tracker.touch_end(4, 200.0, 0.0), None);
    }
}
