//! Collision checks
//!
//! Everything here is a pure comparison on grid cells. Self-collision lives
//! on `Snake` since it needs the private body.

use super::fruit::Fruit;
use super::grid::Coord;
use super::snake::Snake;

/// True if the head sits on the fruit's cell
#[inline]
pub fn fruit_eaten(head: Coord, fruit: Coord) -> bool {
    head == fruit
}

/// Outcome of checking the snake after a move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionResult {
    None,
    Fruit,
    SelfHit,
}

/// Resolve the snake against itself first, then against the fruit.
///
/// A head that lands on both its own body and the fruit is a self-hit: the
/// session ends before the fruit could count.
pub fn resolve(snake: &Snake, fruit: &Fruit) -> CollisionResult {
    if snake.self_collision() {
        CollisionResult::SelfHit
    } else if fruit_eaten(snake.head_position(), fruit.position) {
        CollisionResult::Fruit
    } else {
        CollisionResult::None
    }
}
