//! Starfield and nebula generation.
//!
//! Decorative only; drawn from the simulation RNG so a run's backdrop follows
//! its seed.

use rand::Rng;

use riftstorm_core::components::{Nebula, Star};
use riftstorm_core::types::{Rgb, Vec2};

/// Nebula tint for a sector. Every fifth wave reads as hostile red.
pub fn threat_color(wave: u32) -> Rgb {
    if wave % 5 == 0 {
        0xff0000
    } else if wave % 3 == 0 {
        0xaa00ff
    } else {
        0x00aaff
    }
}

pub fn generate_stars<R: Rng + ?Sized>(rng: &mut R, size: Vec2, count: usize) -> Vec<Star> {
    (0..count)
        .map(|_| Star {
            pos: Vec2::new(rng.gen::<f32>() * size.x, rng.gen::<f32>() * size.y),
            size: rng.gen_range(0.5..2.0),
            depth: rng.gen_range(0.1..1.0),
        })
        .collect()
}

pub fn generate_nebula<R: Rng + ?Sized>(rng: &mut R, size: Vec2, wave: u32) -> Nebula {
    Nebula {
        pos: Vec2::new(rng.gen::<f32>() * size.x, rng.gen::<f32>() * size.y),
        radius: rng.gen_range(500.0..1500.0),
        color: threat_color(wave),
        opacity: rng.gen_range(0.1..0.3),
        seed: rng.gen::<f32>() * 100.0,
    }
}

/// Replace `out` with `count` fresh nebulae, reusing its allocation.
pub fn regenerate_nebulae<R: Rng + ?Sized>(
    rng: &mut R,
    size: Vec2,
    wave: u32,
    count: usize,
    out: &mut Vec<Nebula>,
) {
    out.clear();
    out.extend((0..count).map(|_| generate_nebula(rng, size, wave)));
}
