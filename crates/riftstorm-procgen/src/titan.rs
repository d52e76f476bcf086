//! Titan-frame boss generator.
//!
//! Builds a symmetric modular skeleton from a seed and wave number. The
//! generator owns its own linear congruential stream so that a seed alone
//! reproduces a boss, independent of the simulation RNG.

use std::f32::consts::{FRAC_PI_2, PI, TAU};

use riftstorm_core::components::BossModule;
use riftstorm_core::enums::ModuleKind;
use riftstorm_core::types::{Rgb, Vec2};

use crate::shapes;

const LCG_MUL: u64 = 9301;
const LCG_ADD: u64 = 49297;
const LCG_MOD: u64 = 233_280;

/// Outline variant roll range; wrapped into each kind's table.
const SHAPE_ROLLS: u32 = 5;

const CORE_COLORS: [Rgb; 4] = [0xff0000, 0xff5500, 0xff00ff, 0xffffff];
const SYMMETRIES: [u32; 4] = [2, 3, 4, 6];
const TIER_KINDS: [ModuleKind; 5] = [
    ModuleKind::Turret,
    ModuleKind::Shield,
    ModuleKind::Wing,
    ModuleKind::Spike,
    ModuleKind::Engine,
];

const ADJECTIVES: [&str; 9] = [
    "VOID", "OMEGA", "APEX", "ZERO", "INFINITE", "IRON", "STEEL", "NEON", "HYPER",
];
const NOUNS: [&str; 7] = [
    "TITAN",
    "DREADNOUGHT",
    "WARDEN",
    "GUARDIAN",
    "EXECUTIONER",
    "SERAPH",
    "COLOSSUS",
];

/// `s = (s * 9301 + 49297) mod 233280`, yielding `s / 233280`.
#[derive(Debug, Clone)]
pub struct Lcg {
    state: u64,
}

impl Lcg {
    pub fn new(seed: u64) -> Self {
        // Only the residue matters, and reducing first keeps the multiply in range.
        Self {
            state: seed % LCG_MOD,
        }
    }

    /// Next value in `[0, 1)`.
    pub fn next_f32(&mut self) -> f32 {
        self.state = (self.state * LCG_MUL + LCG_ADD) % LCG_MOD;
        (self.state as f64 / LCG_MOD as f64) as f32
    }

    pub fn range(&mut self, min: f32, max: f32) -> f32 {
        min + self.next_f32() * (max - min)
    }

    /// Integer in `[min, max)`.
    pub fn int(&mut self, min: u32, max: u32) -> u32 {
        self.range(min as f32, max as f32).floor() as u32
    }

    pub fn pick<T: Copy>(&mut self, items: &[T]) -> T {
        let i = self.int(0, items.len() as u32) as usize;
        items[i.min(items.len() - 1)]
    }
}

/// Boss-wide stat multipliers derived from the blueprint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BossStats {
    pub hp_mult: f32,
    pub speed: f32,
    pub mass: f32,
}

/// Generator output: skeleton, display name and stats.
#[derive(Debug, Clone, PartialEq)]
pub struct BossBlueprint {
    pub name: String,
    /// Core first, then tiers from the inside out.
    pub modules: Vec<BossModule>,
    pub symmetry: u32,
    pub tiers: u32,
    pub stats: BossStats,
}

impl BossBlueprint {
    pub fn core_color(&self) -> Rgb {
        self.modules.first().map_or(CORE_COLORS[0], |m| m.color)
    }

    pub fn turret_count(&self) -> usize {
        self.modules
            .iter()
            .filter(|m| m.kind == ModuleKind::Turret)
            .count()
    }
}

pub struct TitanGenerator {
    rng: Lcg,
    wave: u32,
}

impl TitanGenerator {
    pub fn new(seed: u64, wave: u32) -> Self {
        Self {
            rng: Lcg::new(seed),
            wave,
        }
    }

    pub fn generate(mut self) -> BossBlueprint {
        let wave = self.wave;
        let wave_f = wave as f32;
        let core_size = 50.0 + (wave_f * 5.0).min(100.0);

        let core_color = self.rng.pick(&CORE_COLORS);
        let core_variant = self
            .rng
            .int(0, shapes::variant_count(ModuleKind::Core) as u32);

        let mut modules = vec![BossModule {
            kind: ModuleKind::Core,
            offset: Vec2::ZERO,
            rotation: 0.0,
            size: core_size,
            color: core_color,
            health: 1.0,
            max_health: 1.0,
            shape: shapes::shape(ModuleKind::Core, core_variant as usize),
        }];

        let symmetry = self.rng.pick(&SYMMETRIES);
        let tiers = self.rng.int(1, 3 + wave / 5);
        let name = format!(
            "{}-{} MK.{}",
            self.rng.pick(&ADJECTIVES),
            self.rng.pick(&NOUNS),
            wave
        );

        for tier in 0..tiers {
            let dist = core_size * (0.8 + tier as f32 * 0.6);
            let kind = self.rng.pick(&TIER_KINDS);
            let color = tier_color(kind, core_color);
            let angle_offset = self.rng.range(0.0, PI);
            let health = 100.0 * wave_f;

            for i in 0..symmetry {
                let angle = TAU / symmetry as f32 * i as f32 + angle_offset;
                let facing = match kind {
                    ModuleKind::Wing | ModuleKind::Spike | ModuleKind::Engine => FRAC_PI_2,
                    _ => 0.0,
                };
                let variant = self.rng.int(0, SHAPE_ROLLS);
                modules.push(BossModule {
                    kind,
                    offset: Vec2::from_angle(angle) * dist,
                    rotation: angle + facing,
                    size: 1.0,
                    color,
                    health,
                    max_health: health,
                    shape: shapes::shape(kind, variant as usize),
                });
            }
        }

        let stats = BossStats {
            hp_mult: 1.0 + wave_f * 0.5,
            speed: 1.5 + self.rng.next_f32() * 2.0,
            mass: 5000.0 + wave_f * 1000.0,
        };

        BossBlueprint {
            name,
            modules,
            symmetry,
            tiers,
            stats,
        }
    }
}

fn tier_color(kind: ModuleKind, core: Rgb) -> Rgb {
    match kind {
        ModuleKind::Shield => 0x00ccff,
        ModuleKind::Turret => 0xffaa00,
        ModuleKind::Spike => 0xcccccc,
        ModuleKind::Engine => 0xffaa44,
        ModuleKind::Core | ModuleKind::Wing => core,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lcg_matches_reference_sequence() {
        let mut lcg = Lcg::new(1);
        // (1 * 9301 + 49297) % 233280 = 58598
        assert!((lcg.next_f32() - 58598.0 / 233280.0).abs() < 1e-6);
        // (58598 * 9301 + 49297) % 233280
        let expected = (58598u64 * 9301 + 49297) % 233_280;
        assert!((lcg.next_f32() - expected as f32 / 233280.0).abs() < 1e-6);
    }

    #[test]
    fn lcg_reduces_large_seeds() {
        let mut a = Lcg::new(u64::MAX);
        let mut b = Lcg::new(u64::MAX % 233_280);
        for _ in 0..16 {
            assert_eq!(a.next_f32(), b.next_f32());
        }
    }

    #[test]
    fn int_stays_in_range() {
        let mut lcg = Lcg::new(99);
        for _ in 0..1000 {
            let v = lcg.int(1, 4);
            assert!((1..4).contains(&v));
        }
    }
}
