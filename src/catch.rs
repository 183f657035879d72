//! Catch probability model
//!
//! Harder Pokémon have more base experience. A throw rolls 0..100 and
//! succeeds when the roll beats the Pokémon's difficulty.

use rand::Rng;

use crate::api::Pokemon;

/// Highest difficulty a Pokémon can have; a roll never exceeds 99, so such a
/// Pokémon can never be caught
pub const MAX_DIFFICULTY: u32 = 100;

/// Base experience points per point of difficulty
const EXPERIENCE_PER_DIFFICULTY: u32 = 5;

/// Difficulty in `0..=MAX_DIFFICULTY` for a given base experience
pub fn difficulty(base_experience: u32) -> u32 {
    (base_experience / EXPERIENCE_PER_DIFFICULTY).min(MAX_DIFFICULTY)
}

/// Whether a roll in `0..100` catches a Pokémon with this base experience
pub fn is_caught(base_experience: u32, roll: u32) -> bool {
    roll > difficulty(base_experience)
}

/// Rolls for a catch attempt
pub fn attempt_catch<R: Rng + ?Sized>(pokemon: &Pokemon, rng: &mut R) -> bool {
    let roll = rng.gen_range(0..100);
    is_caught(pokemon.base_experience, roll)
}
