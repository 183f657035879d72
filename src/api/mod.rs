//! PokeAPI client and response types

pub mod client;
pub mod types;

pub use client::{ApiError, PokeApiClient, POKEAPI_BASE_URL};
pub use types::{
    LocationAreaDetail, LocationAreaPage, NamedApiResource, Pokemon, PokemonEncounter, PokemonStat,
    PokemonType,
};
