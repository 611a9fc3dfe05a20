//! Bird and wall physics.
//!
//! The bird falls under an ever-growing gravity accumulator until a jump
//! impulse lifts it for a fixed number of ticks. A single wall pair scrolls
//! left and wraps back with a fresh random gap offset, scoring a point each
//! time. Leaving the play band respawns the bird and resets the score.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
