//! Player / pursuer contact

use super::state::{Player, Pursuer, Shape};

/// Result of a player touching a pursuer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capture {
    /// Not touching, or touching a pursuer that is not yet active
    Miss,
    /// An active, chasing pursuer caught the player
    PlayerCaught,
    /// The player ate a vulnerable pursuer
    PursuerEaten,
}

/// Are the two circles touching (distance <= sum of radii)?
#[inline]
pub fn touching(a: &impl Shape, b: &impl Shape) -> bool {
    a.position().distance(b.position()) <= a.radius() + b.radius()
}

/// Classify contact between the player and one pursuer
pub fn check(player: &Player, pursuer: &Pursuer) -> Capture {
    if !touching(player, pursuer) {
        return Capture::Miss;
    }
    if pursuer.is_vulnerable() {
        Capture::PursuerEaten
    } else if pursuer.active {
        Capture::PlayerCaught
    } else {
        Capture::Miss
    }
}
