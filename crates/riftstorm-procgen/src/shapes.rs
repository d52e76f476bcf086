//! Outline tables for boss modules, as flat `x, y` pairs in local space.

use riftstorm_core::enums::ModuleKind;
use riftstorm_core::types::Vec2;

const CORE: &[&[f32]] = &[
    &[-20.0, -20.0, 20.0, -20.0, 20.0, 20.0, -20.0, 20.0],
    &[-20.0, -30.0, 20.0, -30.0, 30.0, 0.0, 20.0, 30.0, -20.0, 30.0, -30.0, 0.0],
    &[0.0, -30.0, 25.0, 20.0, 0.0, 40.0, -25.0, 20.0],
];

const WING: &[&[f32]] = &[
    &[0.0, 0.0, 40.0, -20.0, 50.0, 10.0, 20.0, 30.0],
    &[0.0, -10.0, 30.0, -30.0, 30.0, 30.0, 0.0, 10.0],
    &[0.0, 0.0, 60.0, -10.0, 40.0, 20.0],
];

const TURRET: &[&[f32]] = &[
    &[-8.0, -8.0, 8.0, -8.0, 8.0, 8.0, -8.0, 8.0],
    &[0.0, -15.0, 10.0, 10.0, -10.0, 10.0],
    &[-5.0, -10.0, 5.0, -10.0, 5.0, 10.0, -5.0, 10.0],
];

const SHIELD: &[&[f32]] = &[
    &[-10.0, -30.0, 10.0, -30.0, 20.0, 0.0, 10.0, 30.0, -10.0, 30.0],
    &[0.0, -40.0, 15.0, -20.0, 15.0, 20.0, 0.0, 40.0],
];

const SPIKE: &[&[f32]] = &[
    &[0.0, 0.0, 10.0, -40.0, 20.0, 0.0],
    &[0.0, 0.0, 5.0, -50.0, 15.0, -10.0, 25.0, 0.0],
];

const ENGINE: &[&[f32]] = &[
    &[-15.0, -20.0, 15.0, -20.0, 20.0, 20.0, -20.0, 20.0],
    &[-10.0, -30.0, 10.0, -30.0, 15.0, 10.0, -15.0, 10.0],
    &[0.0, -25.0, 12.0, 15.0, -12.0, 15.0],
];

fn table(kind: ModuleKind) -> &'static [&'static [f32]] {
    match kind {
        ModuleKind::Core => CORE,
        ModuleKind::Wing => WING,
        ModuleKind::Turret => TURRET,
        ModuleKind::Shield => SHIELD,
        ModuleKind::Spike => SPIKE,
        ModuleKind::Engine => ENGINE,
    }
}

/// Number of outline variants for a module kind.
pub fn variant_count(kind: ModuleKind) -> usize {
    table(kind).len()
}

/// Outline for `kind`, wrapping `variant` into the table.
pub fn shape(kind: ModuleKind, variant: usize) -> Vec<Vec2> {
    let list = table(kind);
    list[variant % list.len()]
        .chunks_exact(2)
        .map(|xy| Vec2::new(xy[0], xy[1]))
        .collect()
}
