//! Procedural content for RIFTSTORM.
//!
//! Seeded boss skeletons (`titan`), their module outlines (`shapes`) and the
//! decorative starfield/nebula backdrop (`backdrop`).

pub mod backdrop;
pub mod shapes;
pub mod titan;

pub use titan::{BossBlueprint, BossStats, Lcg, TitanGenerator};
