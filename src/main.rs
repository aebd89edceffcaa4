//! Paddle Sync headless driver
//!
//! Runs a bot match against the authoritative simulation and fans the state
//! out to in-process clients: full snapshots for joiners, deltas afterwards.
//! Every message is decoded by a replica and checked against the server.
//!
//! Usage: `paddle-sync [tuning.json]`, tick count from `PADDLE_SYNC_TICKS`.

use std::error::Error;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use paddle_sync::consts::*;
use paddle_sync::net::{EncodeMode, FULL_MESSAGE_LEN, Replica, encode};
use paddle_sync::settings::Tuning;
use paddle_sync::sim::{
    Action, InputOracle, PlayerId, SessionEvent, TickEvent, World, disconnect, login, tick,
};

const DEFAULT_TICKS: u64 = 3600;
const SEED: u64 = 0x5EED_BA11;

/// Bot players chasing the ball's height, with some hesitation
struct BotInput {
    held: Vec<(PlayerId, Action)>,
}

impl BotInput {
    fn sample(world: &World, rng: &mut Pcg32) -> Self {
        let state = &world.state;
        let ball_y = state.pos[BALL].y;
        let mut held = Vec::new();

        for (paddle, seat) in [(LEFT_PADDLE, 0), (RIGHT_PADDLE, 1)] {
            // Idle one tick in five
            if rng.random_bool(0.2) {
                continue;
            }
            let dy = ball_y - state.pos[paddle].y;
            if dy > 2.0 {
                held.push((state.players[seat], Action::Up));
            } else if dy < -2.0 {
                held.push((state.players[seat], Action::Down));
            }
        }
        Self { held }
    }
}

impl InputOracle for BotInput {
    fn is_active(&self, player: PlayerId, action: Action) -> bool {
        self.held.contains(&(player, action))
    }
}

/// An in-process consumer of the state stream
struct Client {
    name: &'static str,
    replica: Replica,
    needs_full: bool,
    bytes: usize,
}

impl Client {
    fn new(name: &'static str) -> Self {
        Self {
            name,
            replica: Replica::new(),
            needs_full: true,
            bytes: 0,
        }
    }
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let tuning = match std::env::args().nth(1) {
        Some(path) => Tuning::load(path)?,
        None => Tuning::default(),
    };
    let ticks = match std::env::var("PADDLE_SYNC_TICKS") {
        Ok(raw) => raw.parse::<u64>()?,
        Err(_) => DEFAULT_TICKS,
    };

    log::info!("Paddle Sync starting ({ticks} ticks, seed {SEED:#x})");

    let mut world = World::new(tuning);
    let mut rng = Pcg32::seed_from_u64(SEED);
    let mut clients = vec![Client::new("left"), Client::new("right")];

    for id in [1, 2] {
        log_session(&login(&mut world, id));
    }

    for step in 0..ticks {
        if step == ticks / 3 {
            log::info!("spectator joining at tick {step}");
            clients.push(Client::new("spectator"));
        }

        let input = BotInput::sample(&world, &mut rng);
        for event in tick(&mut world, &input) {
            match event {
                TickEvent::Goal { scorer } => {
                    log::info!("tick {step}: seat {scorer} scores, {:?}", world.state.score)
                }
                TickEvent::PaddleHit { paddle } => log::debug!("tick {step}: paddle {paddle} hit"),
                TickEvent::WallBounce { .. } => {}
            }
        }

        broadcast(&world, &mut clients)?;
        world.commit_baseline();
    }

    log_session(&disconnect(&mut world, 1));
    broadcast(&world, &mut clients)?;
    world.commit_baseline();

    for client in &clients {
        log::info!(
            "{}: {} messages, {} bytes ({} as full snapshots)",
            client.name,
            client.replica.applied(),
            client.bytes,
            client.replica.applied() as usize * FULL_MESSAGE_LEN
        );
    }
    log::info!("final score {:?}", world.state.score);
    Ok(())
}

/// Send this tick's state to every client and verify their replicas
fn broadcast(world: &World, clients: &mut [Client]) -> Result<(), Box<dyn Error>> {
    let mut buf = Vec::with_capacity(FULL_MESSAGE_LEN);
    for client in clients.iter_mut() {
        let mode = if client.needs_full {
            EncodeMode::Full
        } else {
            EncodeMode::Delta
        };

        buf.clear();
        client.bytes += encode(&mut buf, world, mode)?;
        client.replica.apply(&buf)?;
        client.needs_full = false;

        if client.replica.state() != &world.state {
            return Err(format!("{} replica diverged from server state", client.name).into());
        }
    }
    Ok(())
}

fn log_session(events: &[SessionEvent]) {
    for event in events {
        log::info!("{event:?}");
    }
}
