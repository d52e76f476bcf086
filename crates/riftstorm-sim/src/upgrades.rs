//! Upgrade catalog, level-up offers and upgrade application.

use std::collections::BTreeMap;
use std::f32::consts::TAU;

use rand::Rng;

use riftstorm_core::components::{Orbital, Player};
use riftstorm_core::constants::*;
use riftstorm_core::enums::{UpgradeId, UpgradeKind, WeaponId};
use riftstorm_core::state::UpgradeOption;

/// Static description of a stat upgrade.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UpgradeDef {
    pub id: UpgradeId,
    pub name: &'static str,
    pub description: &'static str,
    pub weight: f32,
    pub max_stack: u32,
}

pub const UPGRADES: [UpgradeDef; 16] = [
    UpgradeDef {
        id: UpgradeId::Multishot,
        name: "Split Stream",
        description: "Adds +1 projectile to your primary fire.",
        weight: 1.0,
        max_stack: 6,
    },
    UpgradeDef {
        id: UpgradeId::FireRate,
        name: "Hyper Loader",
        description: "Increases fire rate by 20%.",
        weight: 1.2,
        max_stack: 5,
    },
    UpgradeDef {
        id: UpgradeId::Speed,
        name: "Ion Thrusters",
        description: "Increases movement speed by 15%.",
        weight: 1.0,
        max_stack: 4,
    },
    UpgradeDef {
        id: UpgradeId::DashCooldown,
        name: "Phase Engine",
        description: "Reduces dash cooldown.",
        weight: 0.8,
        max_stack: 3,
    },
    UpgradeDef {
        id: UpgradeId::Magnet,
        name: "Grav-Field",
        description: "Increases item pickup range.",
        weight: 1.0,
        max_stack: 4,
    },
    UpgradeDef {
        id: UpgradeId::MaxHp,
        name: "Nano-Weave Hull",
        description: "Increases Max HP by 50 and fully heals.",
        weight: 0.8,
        max_stack: 8,
    },
    UpgradeDef {
        id: UpgradeId::Damage,
        name: "Amp Core",
        description: "Increases all damage by 20%.",
        weight: 1.0,
        max_stack: 10,
    },
    UpgradeDef {
        id: UpgradeId::Pierce,
        name: "Tungsten Rounds",
        description: "Projectiles pierce +1 additional enemy.",
        weight: 0.6,
        max_stack: 5,
    },
    UpgradeDef {
        id: UpgradeId::Homing,
        name: "Tracker AI",
        description: "Projectiles home in on targets more aggressively.",
        weight: 0.7,
        max_stack: 5,
    },
    UpgradeDef {
        id: UpgradeId::Orbital,
        name: "Guardian Orb",
        description: "Adds a protective orbital that damages enemies.",
        weight: 0.5,
        max_stack: 4,
    },
    UpgradeDef {
        id: UpgradeId::Bounce,
        name: "Ricochet Rounds",
        description: "Projectiles bounce off walls and enemies (+1 Bounce).",
        weight: 0.5,
        max_stack: 3,
    },
    UpgradeDef {
        id: UpgradeId::Split,
        name: "Cluster Munitions",
        description: "Projectiles split into shards on impact.",
        weight: 0.4,
        max_stack: 1,
    },
    UpgradeDef {
        id: UpgradeId::Explosive,
        name: "Proximity Fuse",
        description: "Projectiles detonate in an area on impact.",
        weight: 0.4,
        max_stack: 1,
    },
    UpgradeDef {
        id: UpgradeId::ElemFire,
        name: "Plasma Core",
        description: "Attacks apply a BURN effect.",
        weight: 0.6,
        max_stack: 5,
    },
    UpgradeDef {
        id: UpgradeId::ElemIce,
        name: "Cryo Emitter",
        description: "Attacks FREEZE enemies, slowing them.",
        weight: 0.6,
        max_stack: 3,
    },
    UpgradeDef {
        id: UpgradeId::ElemVolt,
        name: "Voltaic Coil",
        description: "Attacks chain LIGHTNING to nearby foes.",
        weight: 0.5,
        max_stack: 3,
    },
];

/// Weapon evolution offered once its requirement is met.
#[derive(Clone, Copy)]
pub struct EvolutionDef {
    pub id: UpgradeId,
    pub name: &'static str,
    pub description: &'static str,
    pub weapon: WeaponId,
    requirement: fn(&Player) -> bool,
}

impl EvolutionDef {
    /// Evolutions only apply to the base weapon.
    pub fn eligible(&self, player: &Player) -> bool {
        player.weapon == WeaponId::Pulse && (self.requirement)(player)
    }
}

pub const EVOLUTIONS: [EvolutionDef; 3] = [
    EvolutionDef {
        id: UpgradeId::EvoShotgun,
        name: "EVOLVE: SCATTERGUN",
        description: "Transform weapon into a high-spread, multi-projectile flak cannon.",
        weapon: WeaponId::Shotgun,
        requirement: wants_scattergun,
    },
    EvolutionDef {
        id: UpgradeId::EvoRailgun,
        name: "EVOLVE: RAIL DRIVER",
        description: "Transform weapon into a high-velocity piercing beam emitter.",
        weapon: WeaponId::Railgun,
        requirement: wants_rail_driver,
    },
    EvolutionDef {
        id: UpgradeId::EvoVoid,
        name: "EVOLVE: VOID RAY",
        description: "Transform weapon into a corrupting energy stream.",
        weapon: WeaponId::Void,
        requirement: wants_void_ray,
    },
];

fn wants_scattergun(p: &Player) -> bool {
    p.stats.multishot >= 3
}

fn wants_rail_driver(p: &Player) -> bool {
    p.stats.pierce >= 2
}

fn wants_void_ray(p: &Player) -> bool {
    p.stats.homing >= 0.4
}

pub fn upgrade_def(id: UpgradeId) -> Option<&'static UpgradeDef> {
    UPGRADES.iter().find(|u| u.id == id)
}

pub fn evolution_def(id: UpgradeId) -> Option<&'static EvolutionDef> {
    EVOLUTIONS.iter().find(|e| e.id == id)
}

/// Roll up to [`LEVEL_UP_OPTIONS`] choices: the first eligible evolution,
/// then weighted draws without replacement among non-maxed upgrades.
pub fn roll_options<R: Rng + ?Sized>(
    rng: &mut R,
    player: &Player,
    stacks: &BTreeMap<UpgradeId, u32>,
) -> Vec<UpgradeOption> {
    let mut options = Vec::with_capacity(LEVEL_UP_OPTIONS);

    if let Some(evo) = EVOLUTIONS.iter().find(|e| e.eligible(player)) {
        options.push(UpgradeOption {
            id: evo.id,
            kind: UpgradeKind::Weapon,
            name: evo.name.to_string(),
            description: evo.description.to_string(),
            current_stack: 0,
        });
    }

    let stack_of = |id: UpgradeId| stacks.get(&id).copied().unwrap_or(0);
    let mut valid: Vec<&UpgradeDef> = UPGRADES
        .iter()
        .filter(|u| stack_of(u.id) < u.max_stack)
        .collect();

    while options.len() < LEVEL_UP_OPTIONS && !valid.is_empty() {
        let total: f32 = valid.iter().map(|u| u.weight).sum();
        let mut roll = rng.gen::<f32>() * total;
        let mut pick = valid.len() - 1;
        for (i, u) in valid.iter().enumerate() {
            roll -= u.weight;
            if roll <= 0.0 {
                pick = i;
                break;
            }
        }
        let chosen = valid.remove(pick);
        options.push(UpgradeOption {
            id: chosen.id,
            kind: UpgradeKind::Stat,
            name: chosen.name.to_string(),
            description: chosen.description.to_string(),
            current_stack: stack_of(chosen.id),
        });
    }

    options
}

/// Outcome of applying an upgrade.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Applied {
    Stat,
    /// Weapon changed; carries the new weapon.
    Evolved(WeaponId),
}

/// Apply `id` to the player. Stat upgrades bump their stack count.
pub fn apply_upgrade(
    id: UpgradeId,
    player: &mut Player,
    orbitals: &mut Vec<Orbital>,
    stacks: &mut BTreeMap<UpgradeId, u32>,
) -> Applied {
    if let Some(evo) = evolution_def(id) {
        player.weapon = evo.weapon;
        return Applied::Evolved(evo.weapon);
    }

    *stacks.entry(id).or_insert(0) += 1;
    let stats = &mut player.stats;
    match id {
        UpgradeId::Multishot => stats.multishot += 1,
        UpgradeId::FireRate => stats.fire_rate_mod += 0.2,
        UpgradeId::Speed => stats.speed_mod += 0.15,
        UpgradeId::DashCooldown => {
            player.max_dash_cooldown =
                (player.max_dash_cooldown - DASH_COOLDOWN_STEP).max(DASH_MIN_COOLDOWN);
        }
        UpgradeId::Magnet => stats.magnet_range += 60.0,
        UpgradeId::MaxHp => {
            player.max_hp += 50.0;
            player.hp = player.max_hp;
        }
        UpgradeId::Damage => stats.damage_mod += 0.2,
        UpgradeId::Pierce => stats.pierce += 1,
        UpgradeId::Homing => stats.homing += 0.15,
        UpgradeId::Orbital => {
            stats.orbitals += 1;
            add_orbital(orbitals);
        }
        UpgradeId::Bounce => stats.bounce += 1,
        UpgradeId::Split => stats.split += 1,
        UpgradeId::Explosive => stats.explosive += 1,
        UpgradeId::ElemFire => stats.elemental.fire += 1,
        UpgradeId::ElemIce => stats.elemental.ice += 1,
        UpgradeId::ElemVolt => stats.elemental.volt += 1,
        UpgradeId::EvoShotgun | UpgradeId::EvoRailgun | UpgradeId::EvoVoid => {}
    }
    Applied::Stat
}

/// Add an orb and re-space the ring evenly.
pub fn add_orbital(orbitals: &mut Vec<Orbital>) {
    orbitals.push(Orbital::default());
    let n = orbitals.len() as f32;
    for (i, orb) in orbitals.iter_mut().enumerate() {
        orb.angle = TAU / n * i as f32;
    }
}
