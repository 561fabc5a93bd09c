//! Hitscan weapon: cooldown gate plus an instant ray test against enemies.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::enemy::{Enemy, EnemyId};

/// Damage dealt to the enemy a shot hits.
pub const WEAPON_DAMAGE: u32 = 25;

/// Hits farther than this along the ray are ignored.
pub const WEAPON_RANGE: f32 = 50.0;

/// Minimum seconds between two shots.
pub const WEAPON_COOLDOWN: f32 = 0.5;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaponTuning {
    pub damage: u32,
    pub range: f32,
    pub cooldown_secs: f32,
}

impl Default for WeaponTuning {
    fn default() -> Self {
        Self {
            damage: WEAPON_DAMAGE,
            range: WEAPON_RANGE,
            cooldown_secs: WEAPON_COOLDOWN,
        }
    }
}

/// Half-line from `origin` along unit `direction`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Closest enemy along a ray.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    /// Index into the slice that was tested.
    pub index: usize,
    pub distance: f32,
    pub point: Vec3,
}

/// What a trigger pull did.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ShotOutcome {
    /// Still cooling down; nothing changed.
    Cooldown,
    /// Fired, nothing in range on the ray.
    Miss,
    /// Fired and damaged `enemy`.
    Hit {
        enemy: EnemyId,
        point: Vec3,
        distance: f32,
        killed: bool,
    },
}

impl ShotOutcome {
    /// True when the weapon actually went off (recoil should play).
    pub fn fired(&self) -> bool {
        !matches!(self, ShotOutcome::Cooldown)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Weapon {
    pub damage: u32,
    pub range: f32,
    pub cooldown_secs: f32,
    last_shot: Option<f64>,
}

impl Weapon {
    pub fn new(tuning: &WeaponTuning) -> Self {
        Self {
            damage: tuning.damage,
            range: tuning.range,
            cooldown_secs: tuning.cooldown_secs,
            last_shot: None,
        }
    }

    /// Time of the last successful shot, if any.
    pub fn last_shot(&self) -> Option<f64> {
        self.last_shot
    }

    /// Whether a shot at `now` would pass the cooldown gate.
    pub fn ready(&self, now: f64) -> bool {
        match self.last_shot {
            Some(last) => now - last >= f64::from(self.cooldown_secs),
            None => true,
        }
    }

    /// Pull the trigger at time `now` (seconds since startup, full precision).
    ///
    /// During cooldown this is a no-op: the timestamp is left alone so the
    /// window keeps measuring from the last shot that actually fired.
    pub fn shoot(&mut self, now: f64, ray: Ray, enemies: &mut [Enemy]) -> ShotOutcome {
        if !self.ready(now) {
            trace!("Shot rejected: cooling down");
            return ShotOutcome::Cooldown;
        }
        self.last_shot = Some(now);

        let Some(hit) = nearest_hit(ray, enemies, self.range) else {
            return ShotOutcome::Miss;
        };

        let enemy = &mut enemies[hit.index];
        let killed = enemy.damage(self.damage);
        debug!(
            "Hit enemy {:?} at {:.1}m (health {}){}",
            enemy.id,
            hit.distance,
            enemy.health(),
            if killed { ", killed" } else { "" }
        );

        ShotOutcome::Hit {
            enemy: enemy.id,
            point: hit.point,
            distance: hit.distance,
            killed,
        }
    }
}

/// Nearest living enemy whose hit box the ray enters within `max_distance`.
pub fn nearest_hit(ray: Ray, enemies: &[Enemy], max_distance: f32) -> Option<RayHit> {
    enemies
        .iter()
        .enumerate()
        .filter(|(_, enemy)| enemy.is_alive())
        .filter_map(|(index, enemy)| {
            let half_extents = enemy.size * 0.5;
            let t = ray_box_distance(
                ray,
                enemy.position,
                half_extents,
                enemy.rotation(),
                max_distance,
            )?;
            Some(RayHit {
                index,
                distance: t,
                point: ray.at(t),
            })
        })
        .min_by(|a, b| a.distance.total_cmp(&b.distance))
}

/// Slab test against a box rotated by `rotation` around its center.
///
/// Returns the entry distance along the ray. A ray starting inside the box
/// hits at distance 0.
fn ray_box_distance(
    ray: Ray,
    center: Vec3,
    half_extents: Vec3,
    rotation: Quat,
    max_distance: f32,
) -> Option<f32> {
    // Work in the box's local frame, where it is axis-aligned.
    let inverse = rotation.inverse();
    let origin = inverse * (ray.origin - center);
    let dir = inverse * ray.direction;

    let mut tmin = 0.0_f32;
    let mut tmax = max_distance;

    for axis in 0..3 {
        let o = origin[axis];
        let d = dir[axis];
        let min = -half_extents[axis];
        let max = half_extents[axis];

        if d.abs() < 1e-6 {
            if o < min || o > max {
                return None;
            }
            continue;
        }

        let inv_d = 1.0 / d;
        let mut t1 = (min - o) * inv_d;
        let mut t2 = (max - o) * inv_d;
        if t1 > t2 {
            std::mem::swap(&mut t1, &mut t2);
        }

        tmin = tmin.max(t1);
        tmax = tmax.min(t2);
        if tmin > tmax {
            return None;
        }
    }

    Some(tmin)
}
