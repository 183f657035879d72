//! The player's collection of caught Pokémon

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::api::Pokemon;

/// A Pokémon in the Pokédex and when it was caught
#[derive(Debug, Clone)]
pub struct CaughtPokemon {
    pub pokemon: Pokemon,
    pub caught_at: DateTime<Utc>,
}

/// Caught Pokémon keyed by the name or id the player threw at, listed in key order
#[derive(Debug, Default)]
pub struct Pokedex {
    entries: BTreeMap<String, CaughtPokemon>,
}

impl Pokedex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a catch under `key`. Catching with the same key again replaces the record.
    pub fn add(&mut self, key: &str, pokemon: Pokemon) {
        self.entries.insert(
            key.to_string(),
            CaughtPokemon {
                pokemon,
                caught_at: Utc::now(),
            },
        );
    }

    pub fn get(&self, name: &str) -> Option<&CaughtPokemon> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CaughtPokemon> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
