//! Player seats and match start/stop
//!
//! Seat 0 plays the left paddle, seat 1 the right. A match runs while both
//! seats are filled; any departure stops it and re-racks the field.

use glam::DVec3;

use super::state::{NO_PLAYER, PlayerId, World};
use crate::consts::*;

/// Outcome of a session call, in the order it happened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    Joined { seat: usize, player: PlayerId },
    Left { seat: usize, player: PlayerId },
    MatchStarted,
    MatchStopped,
    /// Seats full, or the reserved id 0 was used
    Rejected { player: PlayerId },
}

/// Seat a player in the first free seat; starts the match once both are filled.
///
/// The same id may fill both seats (the identity source owns uniqueness).
pub fn login(world: &mut World, id: PlayerId) -> Vec<SessionEvent> {
    if id == NO_PLAYER {
        log::warn!("login with reserved player id 0 ignored");
        return vec![SessionEvent::Rejected { player: id }];
    }

    let Some(seat) = world.state.players.iter().position(|&p| p == NO_PLAYER) else {
        log::debug!("player {id} turned away, seats full");
        return vec![SessionEvent::Rejected { player: id }];
    };

    world.state.players[seat] = id;
    log::debug!("player {id} took seat {seat}");
    let mut events = vec![SessionEvent::Joined { seat, player: id }];

    if world.state.both_seated() {
        start_game(world);
        events.push(SessionEvent::MatchStarted);
    }
    events
}

/// Reset scores and serve. The ball keeps its current position.
pub fn start_game(world: &mut World) {
    let state = &mut world.state;
    state.score = [0; PLAYER_COUNT];
    state.vel[BALL] = world.tuning.serve_velocity;
    log::info!("match started: {:?}", state.players);
}

/// Vacate the seat held by `id` and stop the match
pub fn disconnect(world: &mut World, id: PlayerId) -> Vec<SessionEvent> {
    let Some(seat) = world.state.seat_of(id) else {
        return Vec::new();
    };

    world.state.players[seat] = NO_PLAYER;
    log::debug!("player {id} left seat {seat}");
    stop_game(world);

    vec![
        SessionEvent::Left { seat, player: id },
        SessionEvent::MatchStopped,
    ]
}

/// Re-rack paddles and freeze the ball at the origin
pub fn stop_game(world: &mut World) {
    let x = world.tuning.paddle_x;
    let state = &mut world.state;
    state.pos[LEFT_PADDLE] = DVec3::new(-x, 0.0, 0.0);
    state.pos[RIGHT_PADDLE] = DVec3::new(x, 0.0, 0.0);
    state.pos[BALL] = DVec3::ZERO;
    state.vel[BALL] = DVec3::ZERO;
    log::info!("match stopped, score {:?}", state.score);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_logins_start_match() {
        let mut world = World::default();
        world.state.score = [3, 9];

        assert_eq!(
            login(&mut world, 10),
            vec![SessionEvent::Joined { seat: 0, player: 10 }]
        );
        assert_eq!(world.state.vel[BALL], DVec3::ZERO);

        assert_eq!(
            login(&mut world, 20),
            vec![
                SessionEvent::Joined { seat: 1, player: 20 },
                SessionEvent::MatchStarted
            ]
        );
        assert_eq!(world.state.players, [10, 20]);
        assert_eq!(world.state.score, [0, 0]);
        assert_eq!(world.state.vel[BALL], DVec3::new(2.0, 3.0, 0.0));
    }

    #[test]
    fn test_third_login_rejected() {
        let mut world = World::default();
        login(&mut world, 1);
        login(&mut world, 2);
        world.state.score = [1, 1];

        assert_eq!(login(&mut world, 3), vec![SessionEvent::Rejected { player: 3 }]);
        assert_eq!(world.state.players, [1, 2]);
        // No restart
        assert_eq!(world.state.score, [1, 1]);
    }

    #[test]
    fn test_reserved_id_rejected() {
        let mut world = World::default();
        assert_eq!(login(&mut world, NO_PLAYER), vec![SessionEvent::Rejected { player: 0 }]);
        assert_eq!(world.state.players, [NO_PLAYER, NO_PLAYER]);
        assert!(disconnect(&mut world, NO_PLAYER).is_empty());
    }

    #[test]
    fn test_same_id_fills_both_seats() {
        let mut world = World::default();
        login(&mut world, 7);
        let events = login(&mut world, 7);
        assert_eq!(world.state.players, [7, 7]);
        assert!(events.contains(&SessionEvent::MatchStarted));
    }

    #[test]
    fn test_refill_left_seat_restarts() {
        let mut world = World::default();
        login(&mut world, 1);
        login(&mut world, 2);
        disconnect(&mut world, 1);
        assert_eq!(world.state.players, [NO_PLAYER, 2]);

        let events = login(&mut world, 3);
        assert_eq!(world.state.players, [3, 2]);
        assert_eq!(events.last(), Some(&SessionEvent::MatchStarted));
    }

    #[test]
    fn test_disconnect_freezes_field() {
        let mut world = World::default();
        login(&mut world, 1);
        login(&mut world, 2);
        world.state.pos[LEFT_PADDLE].y = 30.0;
        world.state.pos[RIGHT_PADDLE].y = -12.0;
        world.state.pos[BALL] = DVec3::new(40.0, 5.0, 0.0);
        world.state.score = [2, 1];

        let events = disconnect(&mut world, 2);
        assert_eq!(
            events,
            vec![
                SessionEvent::Left { seat: 1, player: 2 },
                SessionEvent::MatchStopped
            ]
        );
        assert_eq!(world.state.players, [1, NO_PLAYER]);
        assert_eq!(world.state.pos[LEFT_PADDLE], DVec3::new(-75.0, 0.0, 0.0));
        assert_eq!(world.state.pos[RIGHT_PADDLE], DVec3::new(75.0, 0.0, 0.0));
        assert_eq!(world.state.pos[BALL], DVec3::ZERO);
        assert_eq!(world.state.vel[BALL], DVec3::ZERO);
        // Scores survive until the next start
        assert_eq!(world.state.score, [2, 1]);
    }

    #[test]
    fn test_disconnect_unknown_is_noop() {
        let mut world = World::default();
        login(&mut world, 1);
        world.state.pos[BALL] = DVec3::new(1.0, 1.0, 0.0);
        assert!(disconnect(&mut world, 99).is_empty());
        assert_eq!(world.state.pos[BALL], DVec3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_start_keeps_ball_position() {
        let mut world = World::default();
        world.state.pos[BALL] = DVec3::new(12.0, -4.0, 0.0);
        start_game(&mut world);
        assert_eq!(world.state.pos[BALL], DVec3::new(12.0, -4.0, 0.0));
        assert_eq!(world.state.vel[BALL], DVec3::new(2.0, 3.0, 0.0));
    }
}
