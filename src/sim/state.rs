//! Session state and entity registry
//!
//! All state that must be persisted for replay/determinism lives here.
//! Entities of every kind share one registry keyed by a stable id; passes
//! iterate the registry in id order and filter by kind, so there is no
//! per-type collection to keep in sync.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::body::Body;
use super::field::FieldSpawner;
use crate::config::{Config, ConfigError};

/// Stable entity identifier; ids are never reused within a session
pub type EntityId = u32;

/// Asteroid size class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tier {
    Large,
    Medium,
    Small,
}

impl Tier {
    /// The tier a split produces, or `None` for the terminal tier
    pub fn smaller(self) -> Option<Tier> {
        match self {
            Tier::Large => Some(Tier::Medium),
            Tier::Medium => Some(Tier::Small),
            Tier::Small => None,
        }
    }

    /// Collision/render radius for this tier
    pub fn radius(self, config: &Config) -> f32 {
        match self {
            Tier::Large => config.large_radius,
            Tier::Medium => config.medium_radius,
            Tier::Small => config.small_radius,
        }
    }
}

/// Entity kind tag plus kind-specific state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Kind {
    /// The ship; `cooldown` is seconds until the next shot is allowed
    Player { cooldown: f32 },
    Shot,
    /// `spin` is cosmetic rotation only, velocity stays constant
    Asteroid { tier: Tier, spin: f32 },
}

impl Kind {
    #[inline]
    pub fn is_player(&self) -> bool {
        matches!(self, Kind::Player { .. })
    }

    /// Capability: participates in the shot-vs-asteroid pass as a shot
    #[inline]
    pub fn collides_as_shot(&self) -> bool {
        matches!(self, Kind::Shot)
    }

    /// Capability: participates in both collision passes as an asteroid
    #[inline]
    pub fn collides_as_asteroid(&self) -> bool {
        matches!(self, Kind::Asteroid { .. })
    }
}

/// A registry entry: id, shared kinematics, kind tag
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub body: Body,
    pub kind: Kind,
}

/// Scalar events surfaced to the presentation layer, recorded per tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    ShotFired,
    AsteroidSpawned { tier: Tier },
    /// A Large/Medium asteroid was hit and produced two children
    AsteroidSplit { tier: Tier },
    /// A Small asteroid was hit and removed outright
    AsteroidDestroyed { tier: Tier },
    PlayerDied,
}

/// Drawable entity tag for hosts (no kind-specific state leaks out)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrawKind {
    Player,
    Shot,
    Asteroid { tier: Tier },
}

/// One renderable entity: everything a host needs to draw it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DrawEntity {
    pub kind: DrawKind,
    pub pos: Vec2,
    pub rotation: f32,
    pub radius: f32,
}

/// Read-only view of the world for rendering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub entities: Vec<DrawEntity>,
    /// Session time in seconds (the survival score)
    pub elapsed: f32,
    pub over: bool,
}

/// Complete session state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    config: Config,
    /// Session seed, kept so `reset_session` replays identically
    seed: u64,
    pub(crate) rng: Pcg32,
    /// All live entities, sorted by id
    pub entities: Vec<Entity>,
    pub(crate) spawner: FieldSpawner,
    pub(crate) elapsed: f32,
    pub(crate) over: bool,
    pub(crate) events: Vec<GameEvent>,
    next_id: EntityId,
}

impl World {
    /// Start a session. Fails on invalid configuration; a session never
    /// runs with inconsistent constants.
    pub fn new(config: Config, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        let spawner = FieldSpawner::new(&config);
        let mut world = Self {
            config,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            entities: Vec::new(),
            spawner,
            elapsed: 0.0,
            over: false,
            events: Vec::new(),
            next_id: 1,
        };
        world.spawn_player();
        Ok(world)
    }

    /// Reinitialize: player at field center, no shots or asteroids, spawn
    /// timer and clock reset, RNG re-seeded. A restarted session with the
    /// same inputs replays identically.
    pub fn reset_session(&mut self) {
        log::info!("session reset (seed {})", self.seed);
        self.rng = Pcg32::seed_from_u64(self.seed);
        self.entities.clear();
        self.spawner.reset(&self.config);
        self.elapsed = 0.0;
        self.over = false;
        self.events.clear();
        self.next_id = 1;
        self.spawn_player();
    }

    /// Allocate a new entity id
    pub(crate) fn next_entity_id(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn spawn_player(&mut self) {
        let center = self.config.center();
        let id = self.next_entity_id();
        self.entities.push(Entity {
            id,
            body: Body::new(center, Vec2::ZERO, 0.0, self.config.player_radius),
            kind: Kind::Player { cooldown: 0.0 },
        });
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Seconds survived this session
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Whether the player has died (terminal until `reset_session`)
    pub fn is_over(&self) -> bool {
        self.over
    }

    /// Events recorded by the most recent tick
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// The live player entity (exactly one per running session)
    pub fn player(&self) -> Option<&Entity> {
        self.entities.iter().find(|e| e.kind.is_player())
    }

    pub(crate) fn player_mut(&mut self) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.kind.is_player())
    }

    /// Live asteroids, in id order
    pub fn asteroids(&self) -> impl Iterator<Item = &Entity> {
        self.entities
            .iter()
            .filter(|e| e.kind.collides_as_asteroid())
    }

    /// Live shots, in id order
    pub fn shots(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter().filter(|e| e.kind.collides_as_shot())
    }

    /// Renderable view plus session clock
    pub fn snapshot(&self) -> Snapshot {
        let entities = self
            .entities
            .iter()
            .map(|e| DrawEntity {
                kind: match e.kind {
                    Kind::Player { .. } => DrawKind::Player,
                    Kind::Shot => DrawKind::Shot,
                    Kind::Asteroid { tier, .. } => DrawKind::Asteroid { tier },
                },
                pos: e.body.pos,
                rotation: e.body.rotation,
                radius: e.body.radius,
            })
            .collect();
        Snapshot {
            entities,
            elapsed: self.elapsed,
            over: self.over,
        }
    }

    /// Restore id ordering after out-of-order mutation
    pub(crate) fn normalize_order(&mut self) {
        self.entities.sort_by_key(|e| e.id);
    }
}
