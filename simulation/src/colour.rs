//! Agent colouring
//!
//! Random body colours for newborns and the fade applied to corpses.

use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Colour {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn grey(shade: u8) -> Self {
        Self::new(shade, shade, shade)
    }
}

/// Generate a random RGB colour
pub fn random_colour<R: Rng + ?Sized>(rng: &mut R) -> Colour {
    Colour::new(rng.gen(), rng.gen(), rng.gen())
}

/// Colour of a corpse `fraction` of the way through decomposition.
///
/// Starts black at the moment of death and fades to white; fractions past
/// 1.0 are capped.
pub fn decomposition_colour(fraction: f64) -> Colour {
    let fraction = fraction.clamp(0.0, 1.0);
    Colour::grey((255.0 * fraction) as u8)
}
