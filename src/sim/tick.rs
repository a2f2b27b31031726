//! Per-frame simulation step and collision resolution
//!
//! One `tick` call performs the whole update-and-collide pass, in a strict
//! order that hosts can rely on for replay:
//!
//! 1. player inputs (rotate/thrust) are applied, then every live entity
//!    advances by dt
//! 2. a fire intent may spawn a shot (cooldown-gated)
//! 3. the field spawner may introduce new asteroids (they first move next
//!    frame)
//! 4. player-vs-asteroid pass; a hit ends the session and short-circuits
//! 5. shot-vs-asteroid pass; each asteroid absorbs at most one shot per
//!    frame, each shot is spent on its first hit
//!
//! All entity add/remove happens inside this call; there is no other
//! mutation path, so a fixed input script and seed replay exactly.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::body::Body;
use super::field::{MAX_SPIN, spawn_edge_body};
use super::state::{Entity, EntityId, GameEvent, Kind, Tier, World};
use crate::config::ShotPolicy;
use crate::{forward_vector, normalize_angle};

/// Float slack so a cooldown that is an exact multiple of dt reads as
/// expired instead of lingering at ~1e-8
const COOLDOWN_SLACK: f32 = 1e-4;

/// Input intents for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Turn direction: -1 (clockwise), 0, +1 (counter-clockwise)
    pub rotate: i8,
    /// Accelerate along the current heading
    pub thrust: bool,
    /// Fire a shot (silently ignored while the cooldown runs)
    pub fire: bool,
}

/// Advance the session by dt. Returns true iff the session ended during
/// this call; a finished session ignores further ticks until
/// `World::reset_session`.
///
/// dt must be non-negative; hosts should clamp stalls to
/// [`crate::consts::MAX_FRAME_DT`] before calling.
pub fn tick(world: &mut World, input: &TickInput, dt: f32) -> bool {
    world.events.clear();
    if world.over {
        return false;
    }
    world.elapsed += dt;

    apply_player_inputs(world, input, dt);
    advance_entities(world, dt);

    if input.fire {
        try_shoot(world);
    }

    spawn_due_asteroids(world, dt);

    if resolve_player_collisions(world) {
        world.normalize_order();
        return true;
    }

    resolve_shot_collisions(world);
    world.normalize_order();
    false
}

/// Rotation and thrust affect velocity/heading for this frame's
/// integration, so they run before the advance pass.
fn apply_player_inputs(world: &mut World, input: &TickInput, dt: f32) {
    let rotation_speed = world.config().rotation_speed;
    let acceleration = world.config().acceleration;
    let drag = world.config().drag;

    let Some(player) = world.player_mut() else {
        return;
    };

    let dir = input.rotate.clamp(-1, 1) as f32;
    if dir != 0.0 {
        player.body.rotation = normalize_angle(player.body.rotation + dir * rotation_speed * dt);
    }
    if input.thrust {
        player.body.vel += forward_vector(player.body.rotation) * acceleration * dt;
    }
    if drag > 0.0 {
        player.body.vel *= (1.0 - drag * dt).max(0.0);
    }
}

/// Integrate every live entity. The player's shoot cooldown counts down
/// here; asteroids get their cosmetic spin; shots follow the configured
/// off-field policy.
fn advance_entities(world: &mut World, dt: f32) {
    let bounds = world.config().bounds();
    let policy = world.config().shot_policy;

    let mut gone_shots: Vec<EntityId> = Vec::new();
    for entity in &mut world.entities {
        let Entity { id, body, kind } = entity;
        match kind {
            Kind::Player { cooldown } => {
                body.advance(dt, bounds);
                *cooldown = (*cooldown - dt).max(0.0);
            }
            Kind::Shot => match policy {
                ShotPolicy::Wrap => body.advance(dt, bounds),
                ShotPolicy::Despawn => {
                    body.integrate(dt);
                    if !body.intersects_field(bounds) {
                        gone_shots.push(*id);
                    }
                }
            },
            Kind::Asteroid { spin, .. } => {
                body.advance(dt, bounds);
                body.rotation = normalize_angle(body.rotation + *spin * dt);
            }
        }
    }

    if !gone_shots.is_empty() {
        log::debug!("{} shot(s) left the field", gone_shots.len());
        world.entities.retain(|e| !gone_shots.contains(&e.id));
    }
}

/// Spawn a shot at the player's nose if the cooldown allows it
fn try_shoot(world: &mut World) {
    let shot_speed = world.config().shot_speed;
    let shot_radius = world.config().shot_radius;
    let period = world.config().shoot_cooldown;

    let Some(player) = world.player_mut() else {
        return;
    };
    let Kind::Player { cooldown } = &mut player.kind else {
        return;
    };
    if *cooldown > COOLDOWN_SLACK {
        return;
    }
    *cooldown = period;

    let rotation = player.body.rotation;
    let pos = player.body.nose();
    let vel = player.body.vel + forward_vector(rotation) * shot_speed;

    let id = world.next_entity_id();
    world.entities.push(Entity {
        id,
        body: Body::new(pos, vel, rotation, shot_radius),
        kind: Kind::Shot,
    });
    world.events.push(GameEvent::ShotFired);
    log::debug!("shot {id} fired");
}

/// Advance the field timer and introduce any asteroids that came due.
/// Fresh asteroids are not advanced again this frame.
fn spawn_due_asteroids(world: &mut World, dt: f32) {
    let due = world.spawner.advance(dt);
    if due == 0 {
        return;
    }
    let config = world.config().clone();
    for _ in 0..due {
        let (body, spin) = spawn_edge_body(&mut world.rng, &config);
        let id = world.next_entity_id();
        world.entities.push(Entity {
            id,
            body,
            kind: Kind::Asteroid {
                tier: Tier::Large,
                spin,
            },
        });
        world.events.push(GameEvent::AsteroidSpawned { tier: Tier::Large });
        log::debug!(
            "asteroid {id} spawned at ({:.0}, {:.0})",
            body.pos.x,
            body.pos.y
        );
    }
}

/// Player-vs-asteroid pass. The first overlap ends the session; nothing
/// else is resolved this frame once the player is gone.
fn resolve_player_collisions(world: &mut World) -> bool {
    let Some(player_body) = world.player().map(|e| e.body) else {
        return false;
    };
    let hit = world
        .asteroids()
        .any(|asteroid| asteroid.body.overlaps(&player_body));
    if hit {
        world.over = true;
        world.events.push(GameEvent::PlayerDied);
        log::info!("player destroyed after {:.1}s", world.elapsed);
    }
    hit
}

/// Shot-vs-asteroid pass, in id order on both sides. An asteroid absorbs
/// at most one shot per frame; a spent shot is never tested again.
fn resolve_shot_collisions(world: &mut World) {
    let asteroid_hits: Vec<(EntityId, Body, Tier)> = world
        .asteroids()
        .filter_map(|e| match e.kind {
            Kind::Asteroid { tier, .. } => Some((e.id, e.body, tier)),
            _ => None,
        })
        .collect();
    let shot_list: Vec<(EntityId, Body)> = world.shots().map(|e| (e.id, e.body)).collect();

    let mut dead: Vec<EntityId> = Vec::new();
    let mut children: Vec<Entity> = Vec::new();

    for (asteroid_id, asteroid_body, tier) in asteroid_hits {
        let hit = shot_list.iter().find(|(shot_id, shot_body)| {
            !dead.contains(shot_id) && asteroid_body.overlaps(shot_body)
        });
        let Some((shot_id, _)) = hit else {
            continue;
        };
        dead.push(*shot_id);
        dead.push(asteroid_id);

        match tier.smaller() {
            Some(next_tier) => {
                let angle_range = world.config().split_angle_range;
                let multiplier = world.config().split_speed_multiplier;
                let radius = next_tier.radius(world.config());
                let (vel_a, vel_b) =
                    split_velocities(&mut world.rng, angle_range, multiplier, asteroid_body.vel);
                for vel in [vel_a, vel_b] {
                    let spin = world.rng.random_range(-MAX_SPIN..=MAX_SPIN);
                    let id = world.next_entity_id();
                    children.push(Entity {
                        id,
                        body: Body::new(asteroid_body.pos, vel, 0.0, radius),
                        kind: Kind::Asteroid {
                            tier: next_tier,
                            spin,
                        },
                    });
                }
                world.events.push(GameEvent::AsteroidSplit { tier });
                log::debug!("asteroid {asteroid_id} split into two {next_tier:?}");
            }
            None => {
                world.events.push(GameEvent::AsteroidDestroyed { tier });
                log::debug!("asteroid {asteroid_id} destroyed");
            }
        }
    }

    if !dead.is_empty() {
        world.entities.retain(|e| !dead.contains(&e.id));
        world.entities.extend(children);
    }
}

/// Velocities for the two split children: the parent velocity rotated by
/// +a and -a (a drawn once per split) and scaled so children outrun the
/// parent. The opposite rotations keep the children off each other's path.
fn split_velocities(
    rng: &mut Pcg32,
    angle_range: (f32, f32),
    multiplier: f32,
    parent_vel: Vec2,
) -> (Vec2, Vec2) {
    let (min, max) = angle_range;
    let angle = if max > min {
        rng.random_range(min..max)
    } else {
        min
    };
    (
        Vec2::from_angle(angle).rotate(parent_vel) * multiplier,
        Vec2::from_angle(-angle).rotate(parent_vel) * multiplier,
    )
}
