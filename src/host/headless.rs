//! Headless reference world
//!
//! A deliberately small stand-in for a real physics engine: explicit Euler
//! integration, circles for round bodies, boxes for boundaries, and an O(n²)
//! overlap pass. Good enough to drive the game end-to-end without a screen.

use std::collections::{BTreeMap, BTreeSet};
use std::f32::consts::TAU;

use glam::Vec2;

use super::Host;
use crate::sim::{
    BodyPolicy, Category, ContactEvent, EntityId, EntitySpec, Event, GamePhase, Motion,
};
use crate::tuning::{Tuning, TuningError};

/// Collision shape derived from the category
#[derive(Debug, Clone, Copy)]
enum Shape {
    Circle { center: Vec2, radius: f32 },
    Rect { center: Vec2, half: Vec2 },
}

impl Shape {
    fn overlaps(&self, other: &Shape) -> bool {
        match (*self, *other) {
            (Shape::Circle { center: a, radius: ra }, Shape::Circle { center: b, radius: rb }) => {
                a.distance_squared(b) < (ra + rb) * (ra + rb)
            }
            (Shape::Circle { center, radius }, Shape::Rect { center: rc, half })
            | (Shape::Rect { center: rc, half }, Shape::Circle { center, radius }) => {
                let closest = center.clamp(rc - half, rc + half);
                center.distance_squared(closest) < radius * radius
            }
            (Shape::Rect { center: a, half: ha }, Shape::Rect { center: b, half: hb }) => {
                let d = (a - b).abs();
                d.x < ha.x + hb.x && d.y < ha.y + hb.y
            }
        }
    }
}

#[derive(Debug, Clone)]
struct Body {
    spec: EntitySpec,
    position: Vec2,
    velocity: Vec2,
    rotation: f32,
    /// Seconds spent on a linear path
    path_time: f32,
    arrived: bool,
}

impl Body {
    fn new(spec: EntitySpec) -> Self {
        Self {
            position: spec.position,
            spec,
            velocity: Vec2::ZERO,
            rotation: 0.0,
            path_time: 0.0,
            arrived: false,
        }
    }

    fn policy(&self) -> BodyPolicy {
        self.spec.policy()
    }

    fn shape(&self) -> Shape {
        match self.spec.category {
            Category::Boundary => Shape::Rect {
                center: self.position,
                half: self.spec.size / 2.0,
            },
            _ => Shape::Circle {
                center: self.position,
                radius: self.spec.radius(),
            },
        }
    }

    /// Push a round body out of a box it sank into, vertically only
    fn push_out_of(&mut self, center: Vec2, half: Vec2) {
        let radius = self.spec.radius();
        if (self.position.x - center.x).abs() > half.x + radius {
            return;
        }
        let top = center.y + half.y;
        let bottom = center.y - half.y;
        if self.position.y >= center.y {
            if self.position.y - radius < top {
                self.position.y = top + radius;
                self.velocity.y = self.velocity.y.max(0.0);
            }
        } else if self.position.y + radius > bottom {
            self.position.y = bottom - radius;
            self.velocity.y = self.velocity.y.min(0.0);
        }
    }
}

/// In-process world implementing [`Host`]
#[derive(Debug, Clone)]
pub struct HeadlessWorld {
    gravity: Vec2,
    mass: f32,
    spawn_interval: f32,
    /// Sorted by id for deterministic iteration
    bodies: BTreeMap<EntityId, Body>,
    timer_running: bool,
    timer_elapsed: f32,
    /// Pairs overlapping at the end of the last step
    touching: BTreeSet<(EntityId, EntityId)>,
    score: u64,
    phase: GamePhase,
}

impl HeadlessWorld {
    /// World driven by `tuning`; rejects settings the timer and
    /// integrator cannot run with (e.g. a zero spawn interval)
    pub fn new(tuning: &Tuning) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self {
            gravity: tuning.gravity_vec(),
            mass: tuning.player_mass,
            spawn_interval: tuning.spawn_interval_secs,
            bodies: BTreeMap::new(),
            timer_running: false,
            timer_elapsed: 0.0,
            touching: BTreeSet::new(),
            score: 0,
            phase: GamePhase::Running,
        })
    }

    /// Advance time by `dt` seconds and report what happened
    pub fn advance(&mut self, dt: f32) -> Vec<Event> {
        let mut events = Vec::new();

        if self.timer_running {
            self.timer_elapsed += dt;
            while self.timer_elapsed >= self.spawn_interval {
                self.timer_elapsed -= self.spawn_interval;
                events.push(Event::SpawnTimer);
            }
        }

        let boundary = Category::Boundary.policy();
        let walls: Vec<(Vec2, Vec2)> = self
            .bodies
            .values()
            .filter(|b| b.spec.category == Category::Boundary)
            .map(|b| (b.position, b.spec.size / 2.0))
            .collect();

        for (id, body) in self.bodies.iter_mut() {
            match body.spec.motion {
                Motion::None => {}
                Motion::Physics => {
                    let policy = body.policy();
                    if policy.affected_by_gravity {
                        body.velocity += self.gravity * dt;
                    }
                    body.position += body.velocity * dt;
                    if policy.blocked_by(&boundary) {
                        for (center, half) in &walls {
                            body.push_out_of(*center, *half);
                        }
                    }
                }
                Motion::Linear { from, to, duration } => {
                    if !body.arrived {
                        body.path_time += dt;
                        let t = (body.path_time / duration).min(1.0);
                        body.position = from.lerp(to, t);
                        if t >= 1.0 {
                            body.arrived = true;
                            events.push(Event::ItemExited(*id));
                        }
                    }
                }
            }
            if let Some(spin) = body.spec.spin {
                body.rotation = (body.rotation + spin.radians_per_sec * dt).rem_euclid(TAU);
            }
        }

        events.extend(self.detect_contacts());
        events
    }

    /// Report pairs that started overlapping since the last step
    fn detect_contacts(&mut self) -> Vec<Event> {
        let bodies: Vec<&Body> = self.bodies.values().collect();
        let mut touching = BTreeSet::new();
        let mut events = Vec::new();

        for (i, a) in bodies.iter().enumerate() {
            for b in &bodies[i + 1..] {
                if !a.policy().reports_contact_with(&b.policy()) {
                    continue;
                }
                if !a.shape().overlaps(&b.shape()) {
                    continue;
                }
                let pair = (a.spec.id, b.spec.id);
                if !self.touching.contains(&pair) {
                    events.push(Event::Contact(ContactEvent::new(
                        (a.spec.id, a.spec.category),
                        (b.spec.id, b.spec.category),
                    )));
                }
                touching.insert(pair);
            }
        }

        self.touching = touching;
        events
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.bodies.contains_key(&id)
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Ids of bodies in `category`, ascending
    pub fn ids_of(&self, category: Category) -> Vec<EntityId> {
        self.bodies
            .values()
            .filter(|b| b.spec.category == category)
            .map(|b| b.spec.id)
            .collect()
    }

    pub fn position(&self, id: EntityId) -> Option<Vec2> {
        self.bodies.get(&id).map(|b| b.position)
    }

    pub fn velocity(&self, id: EntityId) -> Option<Vec2> {
        self.bodies.get(&id).map(|b| b.velocity)
    }

    pub fn rotation(&self, id: EntityId) -> Option<f32> {
        self.bodies.get(&id).map(|b| b.rotation)
    }

    pub fn timer_running(&self) -> bool {
        self.timer_running
    }

    /// Last score pushed to the display
    pub fn score(&self) -> u64 {
        self.score
    }

    /// Last phase pushed to the display
    pub fn phase(&self) -> GamePhase {
        self.phase
    }
}

impl Host for HeadlessWorld {
    fn spawn(&mut self, spec: &EntitySpec) {
        if self.bodies.insert(spec.id, Body::new(spec.clone())).is_some() {
            log::warn!("Entity {} spawned twice, replaced", spec.id);
        }
    }

    fn remove(&mut self, id: EntityId) {
        if self.bodies.remove(&id).is_some() {
            self.touching.retain(|(a, b)| *a != id && *b != id);
        }
    }

    fn apply_impulse(&mut self, id: EntityId, impulse: Vec2) {
        match self.bodies.get_mut(&id) {
            Some(body) if body.spec.motion == Motion::Physics => {
                body.velocity += impulse / self.mass;
            }
            Some(_) => log::warn!("Impulse on non-physics entity {} ignored", id),
            None => log::warn!("Impulse on missing entity {} ignored", id),
        }
    }

    fn reset_body(&mut self, id: EntityId, position: Vec2) {
        if let Some(body) = self.bodies.get_mut(&id) {
            body.position = position;
            body.velocity = Vec2::ZERO;
        }
    }

    fn set_spawn_timer(&mut self, running: bool) {
        if running && !self.timer_running {
            self.timer_elapsed = 0.0;
        }
        self.timer_running = running;
    }

    fn score_changed(&mut self, score: u64) {
        self.score = score;
    }

    fn phase_changed(&mut self, phase: GamePhase) {
        self.phase = phase;
    }
}
