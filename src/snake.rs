use std::collections::VecDeque;

use crate::grid::Point;
use Direction::*;
use EatOutcome::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    pub fn opposite(self) -> Direction {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }

    /// Unit offset in grid space; y grows downwards.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }

    pub fn head_char(self) -> char {
        match self {
            Up => '^',
            Down => 'v',
            Left => '<',
            Right => '>',
        }
    }
}

/// Whether a step landed the head on the food.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EatOutcome {
    Success,
    Failure
}

#[derive(Clone, Debug)]
pub struct Snake {
    body: VecDeque<Point>,
}

impl Snake {
    /// Lays out `length` segments from `head` along the positive x axis.
    /// `length` must be at least 1.
    pub fn new(head: Point, length: usize, cell_size: i32) -> Self {
        let body = (0..length as i32)
            .map(|i| Point::new(head.x + i * cell_size, head.y))
            .collect();
        Snake { body }
    }

    #[cfg(test)]
    pub(crate) fn from_segments(body: Vec<Point>) -> Self {
        assert!(!body.is_empty());
        Snake { body: body.into() }
    }

    pub fn head(&self) -> Point {
        self.body[0]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Owned copy of the body, head first.
    pub fn segments(&self) -> Vec<Point> {
        self.body.iter().copied().collect()
    }

    #[cfg(test)]
    pub fn occupies(&self, p: Point) -> bool {
        self.body.contains(&p)
    }

    pub fn bites_itself(&self) -> bool {
        let head = self.head();
        self.body.iter().skip(1).any(|&p| p == head)
    }

    /// Pushes `new_head` and drops the tail unless the head landed on `food`.
    pub fn step_and_eat(&mut self, new_head: Point, food: Point) -> EatOutcome {
        self.body.push_front(new_head);

        if new_head == food {
            Success
        } else {
            self.body.pop_back();
            Failure
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck::{quickcheck, Arbitrary, Gen};

    impl Arbitrary for Direction {
        fn arbitrary(g: &mut Gen) -> Direction {
            *g.choose(&[Up, Down, Left, Right]).unwrap()
        }
    }

    #[test]
    fn new_lays_body_along_x() {
        let snake = Snake::new(Point::new(320, 240), 5, 10);
        assert_eq!(snake.segments(), vec![
            Point::new(320, 240),
            Point::new(330, 240),
            Point::new(340, 240),
            Point::new(350, 240),
            Point::new(360, 240),
        ]);
        assert!(!snake.bites_itself());
    }

    #[test]
    fn head_is_a_copy() {
        let snake = Snake::new(Point::new(10, 10), 2, 10);
        let mut head = snake.head();
        head.x -= 10;
        assert_eq!(snake.head(), Point::new(10, 10));
        assert_ne!(head, snake.head());
    }

    #[test]
    fn step_without_food_moves() {
        let mut snake = Snake::new(Point::new(300, 200), 5, 10);
        let outcome = snake.step_and_eat(Point::new(290, 200), Point::new(0, 0));

        assert_eq!(outcome, Failure);
        assert_eq!(snake.len(), 5);
        assert_eq!(snake.head(), Point::new(290, 200));
        assert!(!snake.occupies(Point::new(340, 200)));
    }

    #[test]
    fn step_onto_food_grows() {
        let mut snake = Snake::new(Point::new(100, 100), 5, 10);
        let outcome = snake.step_and_eat(Point::new(100, 90), Point::new(100, 90));

        assert_eq!(outcome, Success);
        assert_eq!(snake.len(), 6);
        assert!(snake.occupies(Point::new(140, 100)));
    }

    #[test]
    fn turning_back_into_the_neck_bites() {
        let mut snake = Snake::new(Point::new(100, 100), 3, 10);
        snake.step_and_eat(Point::new(110, 100), Point::new(0, 0));
        assert!(snake.bites_itself());
    }

    #[test]
    fn opposites_are_symmetric() {
        for &d in &[Up, Down, Left, Right] {
            assert_ne!(d, d.opposite());
            assert_eq!(d, d.opposite().opposite());
        }
    }

    fn length_tracks_eats_prop(moves: Vec<Direction>, food_every: u8) -> bool {
        let food_every = food_every as usize % 4 + 1;
        let mut snake = Snake::new(Point::new(0, 0), 3, 10);

        for (i, dir) in moves.into_iter().enumerate() {
            let before = snake.len();
            let new_head = snake.head().step(dir, 10);
            let food = if i % food_every == 0 { new_head } else { Point::new(-1, -1) };

            let grew = snake.step_and_eat(new_head, food) == Success;
            let expected = if grew { before + 1 } else { before };
            if snake.len() != expected || snake.head() != new_head {
                return false;
            }
        }
        true
    }

    #[test]
    fn length_tracks_eats() {
        quickcheck(length_tracks_eats_prop as fn(Vec<Direction>, u8) -> bool);
    }
}
