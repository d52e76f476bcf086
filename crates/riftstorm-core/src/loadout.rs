//! Weapon and hull tables.

use crate::enums::{HullType, WeaponId};
use crate::types::Rgb;

/// Firing characteristics of a weapon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeaponSpec {
    pub name: &'static str,
    pub color: Rgb,
    pub speed: f32,
    /// Angular gap between simultaneous shots, or jitter for single shots.
    pub spread: f32,
    pub damage_mult: f32,
    /// Ticks between volleys before fire-rate upgrades.
    pub fire_delay: f32,
    pub size: f32,
    pub pierce: u32,
    pub homing: f32,
    pub count: u32,
    pub lifetime: f32,
    pub recoil: f32,
    pub knockback: f32,
    pub beam: bool,
}

pub fn weapon_spec(weapon: WeaponId) -> WeaponSpec {
    match weapon {
        WeaponId::Pulse => WeaponSpec {
            name: "Pulse Rifle",
            color: 0xffe600,
            speed: 16.0,
            spread: 0.05,
            damage_mult: 1.0,
            fire_delay: 6.0,
            size: 4.0,
            pierce: 0,
            homing: 0.0,
            count: 1,
            lifetime: 80.0,
            recoil: 0.5,
            knockback: 3.0,
            beam: false,
        },
        WeaponId::Shotgun => WeaponSpec {
            name: "Scattergun",
            color: 0xff5500,
            speed: 12.0,
            spread: 0.35,
            damage_mult: 0.7,
            fire_delay: 45.0,
            size: 3.0,
            pierce: 1,
            homing: 0.0,
            count: 6,
            lifetime: 45.0,
            recoil: 4.0,
            knockback: 6.0,
            beam: false,
        },
        WeaponId::Railgun => WeaponSpec {
            name: "Arc Caster",
            color: 0x00ffff,
            speed: 50.0,
            spread: 0.0,
            damage_mult: 2.5,
            fire_delay: 90.0,
            size: 12.0,
            pierce: 99,
            homing: 0.0,
            count: 1,
            lifetime: 25.0,
            recoil: 5.0,
            knockback: 1.0,
            beam: true,
        },
        WeaponId::Void => WeaponSpec {
            name: "Void Ray",
            color: 0xaa00ff,
            speed: 12.0,
            spread: 0.15,
            damage_mult: 1.4,
            fire_delay: 8.0,
            size: 8.0,
            pierce: 0,
            homing: 0.2,
            count: 1,
            lifetime: 100.0,
            recoil: 0.2,
            knockback: 8.0,
            beam: false,
        },
    }
}

/// Starting loadout of a hull.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HullSpec {
    pub name: &'static str,
    pub hp: f32,
    pub speed_mod: f32,
    pub weapon: WeaponId,
    pub orbitals: u32,
}

pub fn hull_spec(hull: HullType) -> HullSpec {
    match hull {
        HullType::Interceptor => HullSpec {
            name: "Interceptor",
            hp: 300.0,
            speed_mod: 1.2,
            weapon: WeaponId::Pulse,
            orbitals: 0,
        },
        HullType::Bastion => HullSpec {
            name: "Bastion",
            hp: 800.0,
            speed_mod: 0.9,
            weapon: WeaponId::Shotgun,
            orbitals: 0,
        },
        HullType::Architect => HullSpec {
            name: "Architect",
            hp: 450.0,
            speed_mod: 1.0,
            weapon: WeaponId::Railgun,
            orbitals: crate::constants::ARCHITECT_STARTING_ORBITALS,
        },
    }
}
