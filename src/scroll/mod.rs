// Scroll module: script offset animation and overlay geometry

mod ease;
mod engine;
mod layout;

pub use ease::CubicBezier;
pub use engine::{ScrollEngine, ScrollTiming};
pub use layout::{OverlayStyle, ScrollLayout};
