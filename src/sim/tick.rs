//! Fixed-rate simulation tick
//!
//! One tick is one snake move followed by collision resolution.

use super::collision::{CollisionResult, resolve};
use super::fruit::Fruit;
use super::state::{EndCause, GameEvent, GameSession, SessionStatus};
use crate::error::SimError;

/// What a single tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Session was not running; nothing changed
    Skipped,
    /// Snake moved onto an empty cell
    Moved,
    /// Snake ate this fruit; a new one has been placed
    Ate(Fruit),
    /// Snake ran into itself; the session has ended
    Died,
}

/// Advance the session by one tick
pub fn tick(session: &mut GameSession) -> Result<TickOutcome, SimError> {
    if session.status != SessionStatus::Running {
        return Ok(TickOutcome::Skipped);
    }

    session.elapsed_ticks += 1;
    session.snake.advance();

    match resolve(&session.snake, &session.fruit) {
        CollisionResult::SelfHit => {
            session.finish(EndCause::Collision);
            Ok(TickOutcome::Died)
        }
        CollisionResult::Fruit => {
            let eaten = session.fruit;

            // Place the next fruit before scoring; a full board ends the
            // session with the score as it stood
            let occupied = session.snake.occupied_cells();
            match session.spawner.spawn_fruit(&occupied) {
                Ok(fruit) => session.fruit = fruit,
                Err(e) => {
                    log::error!("Cannot place fruit: {}", e);
                    session.finish(EndCause::SpawnExhausted);
                    return Err(e);
                }
            }
            session.score += 1;
            session.snake.grow();

            log::debug!(
                "Ate {} at ({}, {}), score {}",
                eaten.kind.name(),
                eaten.position.x,
                eaten.position.y,
                session.score
            );
            session.events.push(GameEvent::FruitEaten {
                score: session.score,
                kind: eaten.kind,
            });
            Ok(TickOutcome::Ate(eaten))
        }
        CollisionResult::None => Ok(TickOutcome::Moved),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{DEFAULT_TICK_RATE, GRID_SIZE};
    use crate::sim::grid::{CELL_COUNT, Orientation};
    use crate::sim::snake::{Segment, Snake};
    use glam::IVec2;

    fn running(seed: u64) -> GameSession {
        let mut session = GameSession::new(seed, DEFAULT_TICK_RATE).unwrap();
        session.start();
        session
    }

    #[test]
    fn test_tick_skipped_unless_running() {
        let mut session = GameSession::new(1, DEFAULT_TICK_RATE).unwrap();
        let head = session.snake().head_position();
        assert_eq!(tick(&mut session), Ok(TickOutcome::Skipped));
        assert_eq!(session.snake().head_position(), head);
        assert_eq!(session.elapsed_ticks(), 0);
    }

    #[test]
    fn test_tick_eats_fruit() {
        let mut session = running(12345);
        session.place_fruit(IVec2::new(6, 4)).unwrap();

        let outcome = tick(&mut session).unwrap();
        assert!(matches!(outcome, TickOutcome::Ate(f) if f.position == IVec2::new(6, 4)));
        assert_eq!(session.score(), 1);
        assert_eq!(session.snake().len(), 5);
        assert_eq!(session.elapsed_ticks(), 1);
        assert!(!session.occupied_cells().contains(&session.fruit().position));
        assert!(matches!(
            session.drain_events().last(),
            Some(GameEvent::FruitEaten { score: 1, .. })
        ));
    }

    #[test]
    fn test_tick_moves_without_scoring() {
        let mut session = running(12345);
        session.place_fruit(IVec2::new(0, 0)).unwrap();
        assert_eq!(tick(&mut session), Ok(TickOutcome::Moved));
        assert_eq!(session.score(), 0);
        assert_eq!(session.snake().head_position(), IVec2::new(6, 4));
    }

    #[test]
    fn test_self_hit_ends_session() {
        let mut session = running(2);
        // Grow to five so a tight square bites the body
        session.place_fruit(IVec2::new(6, 4)).unwrap();
        tick(&mut session).unwrap();
        session.place_fruit(IVec2::new(0, 0)).ok();

        let turns = [Orientation::Up, Orientation::Right, Orientation::Down];
        let mut outcome = TickOutcome::Moved;
        for turn in turns {
            session.steer(turn);
            outcome = tick(&mut session).unwrap();
        }
        assert_eq!(outcome, TickOutcome::Died);
        assert!(session.is_over());
        assert_eq!(session.elapsed_ticks(), 4);

        // Terminal: further ticks change nothing
        assert_eq!(tick(&mut session), Ok(TickOutcome::Skipped));
        assert_eq!(session.elapsed_ticks(), 4);
        assert!(matches!(
            session.drain_events().last(),
            Some(GameEvent::Ended {
                cause: EndCause::Collision,
                score: 1,
                elapsed_ticks: 4
            })
        ));
    }

    /// Snake covering every cell but (0, 0), head at (1, 0) facing it
    fn board_filling_snake() -> Snake {
        let path: Vec<IVec2> = (0..GRID_SIZE)
            .flat_map(|y| {
                let row: Vec<i32> = if y % 2 == 0 {
                    (0..GRID_SIZE).collect()
                } else {
                    (0..GRID_SIZE).rev().collect()
                };
                row.into_iter().map(move |x| IVec2::new(x, y))
            })
            .collect();
        let segments = (1..path.len())
            .map(|i| {
                let step = path[i - 1] - path[i];
                let orientation = Orientation::ALL
                    .into_iter()
                    .find(|o| o.delta() == step)
                    .unwrap();
                Segment {
                    position: path[i],
                    orientation,
                }
            })
            .collect();
        Snake::from_segments(segments)
    }

    #[test]
    fn test_full_board_ends_without_scoring() {
        let mut session = running(6);
        session.snake = board_filling_snake();
        // Pending growth keeps the tail cell filled after the move
        session.snake.grow();
        session.fruit.position = IVec2::new(0, 0);
        assert_eq!(session.occupied_cells().len(), CELL_COUNT - 1);

        let result = tick(&mut session);
        assert!(matches!(
            result,
            Err(SimError::SpawnExhausted {
                occupied: CELL_COUNT,
                ..
            })
        ));
        assert!(session.is_over());
        assert_eq!(session.score(), 0);
        // The move consumed the old growth; nothing new was queued
        assert_eq!(session.snake().pending_growth(), 0);
        assert_eq!(session.snake().len(), CELL_COUNT);
        assert_eq!(
            session.drain_events(),
            vec![
                GameEvent::Started,
                GameEvent::Ended {
                    cause: EndCause::SpawnExhausted,
                    score: 0,
                    elapsed_ticks: 1
                },
            ]
        );
        assert_eq!(tick(&mut session), Ok(TickOutcome::Skipped));
    }

    #[test]
    fn test_determinism() {
        let mut a = running(99999);
        let mut b = running(99999);
        let turns = [
            Orientation::Up,
            Orientation::Left,
            Orientation::Down,
            Orientation::Left,
        ];
        for i in 0..40 {
            a.steer(turns[i % turns.len()]);
            b.steer(turns[i % turns.len()]);
            assert_eq!(tick(&mut a), tick(&mut b));
        }
        assert_eq!(a.snapshot(), b.snapshot());
    }
}
