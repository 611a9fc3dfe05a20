//! Mouth gesture detection.
//!
//! Turns the per-frame mouth landmark geometry into a Mouth Aspect Ratio
//! (MAR) and debounces it into a discrete jump trigger. A jump fires only
//! when an above-threshold reading follows a run of below-threshold ones.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
