use std::collections::{HashSet, VecDeque};

use super::types::{Direction, Point};

/// Head-first body plus a set mirror for O(1) occupancy checks.
#[derive(Clone, Debug)]
pub struct Snake {
    body: VecDeque<Point>,
    body_set: HashSet<Point>,
    pub direction: Direction,
    pub pending_direction: Option<Direction>,
}

impl Snake {
    pub fn new(start_pos: Point, direction: Direction) -> Self {
        Self {
            body: VecDeque::from([start_pos]),
            body_set: HashSet::from([start_pos]),
            direction,
            pending_direction: None,
        }
    }

    /// Builds a snake from head-first segments. Rejects empty or self-overlapping bodies.
    pub fn from_segments(segments: &[Point], direction: Direction) -> Option<Self> {
        if segments.is_empty() {
            return None;
        }
        let body: VecDeque<Point> = segments.iter().copied().collect();
        let body_set: HashSet<Point> = segments.iter().copied().collect();
        if body_set.len() != body.len() {
            return None;
        }
        Some(Self {
            body,
            body_set,
            direction,
            pending_direction: None,
        })
    }

    pub fn head(&self) -> Point {
        *self.body.front().expect("Snake body should never be empty")
    }

    pub fn tail(&self) -> Point {
        *self.body.back().expect("Snake body should never be empty")
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn contains(&self, point: &Point) -> bool {
        self.body_set.contains(point)
    }

    pub fn segments(&self) -> impl ExactSizeIterator<Item = &Point> {
        self.body.iter()
    }

    /// Queues a turn for the next tick unless it reverses the current travel direction.
    pub fn request_direction(&mut self, direction: Direction) -> bool {
        if direction.is_opposite(&self.direction) {
            return false;
        }
        self.pending_direction = Some(direction);
        true
    }

    pub fn apply_pending_direction(&mut self) -> Direction {
        if let Some(next) = self.pending_direction.take() {
            self.direction = next;
        }
        self.direction
    }

    /// Pushes `next_head`, which must not already be on the body. Without growth the tail is
    /// dropped and returned.
    pub fn advance(&mut self, next_head: Point, grow: bool) -> Option<Point> {
        self.body.push_front(next_head);
        self.body_set.insert(next_head);
        if grow {
            return None;
        }
        let tail = self.body.pop_back()?;
        self.body_set.remove(&tail);
        Some(tail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_without_growth_keeps_length() {
        let mut snake = Snake::from_segments(
            &[Point::new(3, 3), Point::new(2, 3), Point::new(1, 3)],
            Direction::Right,
        )
        .unwrap();
        let removed = snake.advance(Point::new(4, 3), false);
        assert_eq!(removed, Some(Point::new(1, 3)));
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Point::new(4, 3));
        assert!(!snake.contains(&Point::new(1, 3)));
    }

    #[test]
    fn test_advance_with_growth_keeps_tail() {
        let mut snake = Snake::new(Point::new(8, 8), Direction::Right);
        assert_eq!(snake.advance(Point::new(9, 8), true), None);
        assert_eq!(snake.len(), 2);
        assert_eq!(snake.tail(), Point::new(8, 8));
    }

    #[test]
    fn test_overlapping_segments_rejected() {
        assert!(Snake::from_segments(&[Point::new(1, 1), Point::new(1, 1)], Direction::Up).is_none());
        assert!(Snake::from_segments(&[], Direction::Up).is_none());
    }

    #[test]
    fn test_reverse_request_ignored() {
        let mut snake = Snake::new(Point::new(8, 8), Direction::Right);
        assert!(!snake.request_direction(Direction::Left));
        assert_eq!(snake.pending_direction, None);
        assert!(snake.request_direction(Direction::Up));
        // Still judged against the current travel direction, not the queued one.
        assert!(!snake.request_direction(Direction::Left));
        assert_eq!(snake.apply_pending_direction(), Direction::Up);
    }
}
