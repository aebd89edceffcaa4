//! Fixed-step simulation tick
//!
//! One call advances the world by exactly one step: input sampling,
//! collision resolution (walls, paddles, goals), then integration. Tick rate
//! is whatever rate the driver calls at.

use glam::DVec3;

use super::collision::{ball_box_collision, resolve_contact, wall_collision};
use super::state::{Action, PlayerId, World};
use crate::consts::*;

/// Source of player input, queried per occupied seat each tick
pub trait InputOracle {
    fn is_active(&self, player: PlayerId, action: Action) -> bool;
}

impl<F> InputOracle for F
where
    F: Fn(PlayerId, Action) -> bool,
{
    fn is_active(&self, player: PlayerId, action: Action) -> bool {
        self(player, action)
    }
}

/// Something notable that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickEvent {
    /// Entity was clamped against the top or bottom wall
    WallBounce { entity: usize },
    /// Ball overlapped a paddle and was pushed out
    PaddleHit { paddle: usize },
    /// Seat `scorer` scored; ball re-served
    Goal { scorer: usize },
}

/// Advance the world by one step
pub fn tick(world: &mut World, input: &impl InputOracle) -> Vec<TickEvent> {
    let mut events = Vec::new();

    process_input(world, input);
    collision_check(world, &mut events);
    integrate(world);

    events
}

/// Recompute paddle vertical velocity from held actions.
///
/// Paddles keep their current velocity unless both seats are filled.
fn process_input(world: &mut World, input: &impl InputOracle) {
    let state = &mut world.state;
    if !state.both_seated() {
        return;
    }

    let speed = world.tuning.paddle_speed;
    for (paddle, seat) in [(LEFT_PADDLE, 0), (RIGHT_PADDLE, 1)] {
        let player = state.players[seat];
        let mut vy = 0.0;
        if input.is_active(player, Action::Up) {
            vy += speed;
        }
        if input.is_active(player, Action::Down) {
            vy -= speed;
        }
        state.vel[paddle].y = vy;
    }
}

fn collision_check(world: &mut World, events: &mut Vec<TickEvent>) {
    let tuning = &world.tuning;
    let state = &mut world.state;
    let half_height = tuning.field_height / 2.0;

    for entity in 0..ENTITY_COUNT {
        let extent_y = state.size[entity].y;
        if wall_collision(&mut state.pos[entity], &mut state.vel[entity], extent_y, half_height) {
            events.push(TickEvent::WallBounce { entity });
        }
    }

    let radius = state.ball_radius();
    let mut hit = false;
    for paddle in [LEFT_PADDLE, RIGHT_PADDLE] {
        let contact =
            ball_box_collision(state.pos[BALL], radius, state.pos[paddle], state.size[paddle]);
        if let Some(contact) = contact {
            let (pos, vel) = (&mut state.pos[BALL], &mut state.vel[BALL]);
            let reflected = resolve_contact(pos, vel, &contact);
            log::trace!("ball hit paddle {paddle} (reflected: {reflected})");
            events.push(TickEvent::PaddleHit { paddle });
            hit = true;
        }
    }

    // A paddle pinned near a wall can push the ball past it
    if hit {
        let extent_y = state.size[BALL].y;
        if wall_collision(&mut state.pos[BALL], &mut state.vel[BALL], extent_y, half_height) {
            events.push(TickEvent::WallBounce { entity: BALL });
        }
    }

    let serve = tuning.serve_velocity;
    let ball_x = state.pos[BALL].x;
    let scorer = if ball_x < -tuning.goal_line_x {
        // Past the left paddle: right seat scores, serve towards the right
        state.vel[BALL] = serve;
        Some(1)
    } else if ball_x > tuning.goal_line_x {
        state.vel[BALL] = DVec3::new(-serve.x, serve.y, serve.z);
        Some(0)
    } else {
        None
    };

    if let Some(seat) = scorer {
        state.pos[BALL] = DVec3::ZERO;
        state.score[seat] += 1;
        log::debug!("goal for seat {seat}, score {:?}", state.score);
        events.push(TickEvent::Goal { scorer: seat });
    }
}

fn integrate(world: &mut World) {
    let state = &mut world.state;
    for (pos, vel) in state.pos.iter_mut().zip(state.vel.iter()) {
        *pos += *vel;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::session::login;
    use proptest::prelude::*;

    fn idle(_: PlayerId, _: Action) -> bool {
        false
    }

    fn seated_world() -> World {
        let mut world = World::default();
        login(&mut world, 1);
        login(&mut world, 2);
        world
    }

    #[test]
    fn test_input_frozen_until_both_seated() {
        let mut world = World::default();
        login(&mut world, 1);
        world.state.vel[LEFT_PADDLE].y = 2.0;

        let all_up = |_: PlayerId, a: Action| a == Action::Up;
        tick(&mut world, &all_up);
        assert_eq!(world.state.vel[LEFT_PADDLE].y, 2.0);
        assert_eq!(world.state.pos[LEFT_PADDLE].y, 2.0);
    }

    #[test]
    fn test_input_is_additive() {
        let mut world = seated_world();

        // Player 1 holds both (cancels), player 2 holds Down
        let input = |p: PlayerId, a: Action| p == 1 || a == Action::Down;
        tick(&mut world, &input);
        assert_eq!(world.state.vel[LEFT_PADDLE].y, 0.0);
        assert_eq!(world.state.vel[RIGHT_PADDLE].y, -5.0);
        assert_eq!(world.state.pos[RIGHT_PADDLE].y, -5.0);

        // Released: velocity recomputed from scratch
        tick(&mut world, &idle);
        assert_eq!(world.state.vel[RIGHT_PADDLE].y, 0.0);
        assert_eq!(world.state.pos[RIGHT_PADDLE].y, -5.0);
    }

    #[test]
    fn test_paddle_stops_at_wall() {
        let mut world = seated_world();
        let up = |_: PlayerId, a: Action| a == Action::Up;
        for _ in 0..30 {
            tick(&mut world, &up);
        }
        // Input overrides the bounce each tick, so the paddle jitters at the top
        let y = world.state.pos[LEFT_PADDLE].y;
        assert!((45.0..=55.0).contains(&y), "paddle at {y}");

        world.state.pos[LEFT_PADDLE].y = 58.0;
        let events = tick(&mut world, &idle);
        assert!(events.contains(&TickEvent::WallBounce { entity: LEFT_PADDLE }));
        assert_eq!(world.state.pos[LEFT_PADDLE].y, 50.0);
    }

    #[test]
    fn test_ball_integrates() {
        let mut world = seated_world();
        assert_eq!(world.state.vel[BALL], DVec3::new(2.0, 3.0, 0.0));
        tick(&mut world, &idle);
        assert_eq!(world.state.pos[BALL], DVec3::new(2.0, 3.0, 0.0));
    }

    #[test]
    fn test_goal_left_side() {
        let mut world = seated_world();
        world.state.score = [4, 7];
        world.state.pos[BALL] = DVec3::new(-101.0, 0.0, 0.0);
        world.state.vel[BALL] = DVec3::new(-2.0, 0.0, 0.0);

        let events = tick(&mut world, &idle);
        assert!(events.contains(&TickEvent::Goal { scorer: 1 }));
        assert_eq!(world.state.score, [4, 8]);
        assert_eq!(world.state.vel[BALL], DVec3::new(2.0, 3.0, 0.0));
        // Reset happens before integration
        assert_eq!(world.state.pos[BALL], DVec3::new(2.0, 3.0, 0.0));
    }

    #[test]
    fn test_goal_right_side() {
        let mut world = seated_world();
        world.state.pos[BALL] = DVec3::new(100.5, 10.0, 0.0);

        let events = tick(&mut world, &idle);
        assert_eq!(events, vec![TickEvent::Goal { scorer: 0 }]);
        assert_eq!(world.state.score, [1, 0]);
        assert_eq!(world.state.vel[BALL], DVec3::new(-2.0, 3.0, 0.0));
        assert_eq!(world.state.pos[BALL], DVec3::new(-2.0, 3.0, 0.0));
    }

    #[test]
    fn test_ball_bounces_off_paddle() {
        let mut world = seated_world();
        world.state.pos[BALL] = DVec3::new(63.0, 0.0, 0.0);
        world.state.vel[BALL] = DVec3::new(2.0, 0.0, 0.0);

        let events = tick(&mut world, &idle);
        assert!(events.contains(&TickEvent::PaddleHit { paddle: RIGHT_PADDLE }));
        let vel = world.state.vel[BALL];
        assert!((vel - DVec3::new(-2.0, 0.0, 0.0)).length() < 1e-12);
        // Pushed out to 62.5, then moved one step
        assert!((world.state.pos[BALL].x - 60.5).abs() < 1e-12);
    }

    #[test]
    fn test_determinism() {
        let mut a = seated_world();
        let mut b = seated_world();
        let input = |p: PlayerId, a: Action| (p == 1) == (a == Action::Up);

        for _ in 0..500 {
            tick(&mut a, &input);
            tick(&mut b, &input);
        }
        assert_eq!(a.state, b.state);
    }

    proptest! {
        #[test]
        fn prop_entities_stay_inside_walls(
            presses in proptest::collection::vec(0u8..16, 1..300),
            by in -50.0f64..50.0,
            vx in -4.0f64..4.0,
            vy in -8.0f64..8.0,
        ) {
            let mut world = seated_world();
            world.state.pos[BALL].y = by;
            world.state.vel[BALL] = DVec3::new(vx, vy, 0.0);

            for bits in presses {
                let input = move |p: PlayerId, a: Action| {
                    let shift = (p - 1) * 2 + u32::from(a == Action::Down);
                    bits & (1 << shift) != 0
                };
                process_input(&mut world, &input);
                let mut events = Vec::new();
                collision_check(&mut world, &mut events);

                for entity in 0..ENTITY_COUNT {
                    let limit = 60.0 - world.state.size[entity].y / 2.0;
                    let y = world.state.pos[entity].y;
                    prop_assert!(y <= limit && y >= -limit, "entity {} at y={}", entity, y);
                }
                integrate(&mut world);
            }
        }
    }
}
