//! PokeAPI response shapes
//!
//! Only the fields the commands render are mapped; everything else in the
//! responses is ignored by serde.

use serde::{Deserialize, Serialize};

/// A `{ name, url }` reference to another API resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedApiResource {
    pub name: String,
    pub url: String,
}

/// One page of the `location-area` listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationAreaPage {
    #[serde(default)]
    pub count: u32,
    /// URL of the next page, absent on the last page
    pub next: Option<String>,
    /// URL of the previous page, absent on the first page
    pub previous: Option<String>,
    pub results: Vec<NamedApiResource>,
}

/// A single location area and the Pokémon that can be encountered there
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationAreaDetail {
    pub name: String,
    #[serde(default)]
    pub pokemon_encounters: Vec<PokemonEncounter>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PokemonEncounter {
    pub pokemon: NamedApiResource,
}

/// The subset of a `pokemon` resource the Pokédex keeps
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pokemon {
    pub name: String,
    #[serde(default)]
    pub height: u32,
    #[serde(default)]
    pub weight: u32,
    /// Some forms report `null`; treated as the easiest catch
    #[serde(default, deserialize_with = "null_as_zero")]
    pub base_experience: u32,
    #[serde(default)]
    pub stats: Vec<PokemonStat>,
    #[serde(default)]
    pub types: Vec<PokemonType>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonStat {
    pub base_stat: u32,
    pub stat: NamedApiResource,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonType {
    pub slot: u8,
    #[serde(rename = "type")]
    pub kind: NamedApiResource,
}

fn null_as_zero<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<u32>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_area_page_parses_cursors() {
        let json = r#"{
            "count": 1089,
            "next": "https://pokeapi.co/api/v2/location-area/?offset=20&limit=20",
            "previous": null,
            "results": [
                {"name": "canalave-city-area", "url": "https://pokeapi.co/api/v2/location-area/1/"}
            ]
        }"#;

        let page: LocationAreaPage = serde_json::from_str(json).expect("Should parse page");

        assert_eq!(page.count, 1089);
        assert_eq!(
            page.next.as_deref(),
            Some("https://pokeapi.co/api/v2/location-area/?offset=20&limit=20")
        );
        assert!(page.previous.is_none());
        assert_eq!(page.results[0].name, "canalave-city-area");
    }

    #[test]
    fn test_location_area_detail_ignores_unknown_fields() {
        let json = r#"{
            "id": 1,
            "name": "canalave-city-area",
            "encounter_method_rates": [],
            "pokemon_encounters": [
                {"pokemon": {"name": "tentacool", "url": "https://pokeapi.co/api/v2/pokemon/72/"}, "version_details": []}
            ]
        }"#;

        let detail: LocationAreaDetail = serde_json::from_str(json).expect("Should parse detail");

        assert_eq!(detail.pokemon_encounters.len(), 1);
        assert_eq!(detail.pokemon_encounters[0].pokemon.name, "tentacool");
    }

    #[test]
    fn test_pokemon_parses_stats_and_types() {
        let json = r#"{
            "name": "pidgey",
            "height": 3,
            "weight": 18,
            "base_experience": 50,
            "stats": [
                {"base_stat": 40, "effort": 0, "stat": {"name": "hp", "url": ""}}
            ],
            "types": [
                {"slot": 1, "type": {"name": "normal", "url": ""}},
                {"slot": 2, "type": {"name": "flying", "url": ""}}
            ]
        }"#;

        let pokemon: Pokemon = serde_json::from_str(json).expect("Should parse pokemon");

        assert_eq!(pokemon.base_experience, 50);
        assert_eq!(pokemon.stats[0].stat.name, "hp");
        assert_eq!(pokemon.stats[0].base_stat, 40);
        assert_eq!(pokemon.types[1].kind.name, "flying");
    }

    #[test]
    fn test_pokemon_null_base_experience_is_zero() {
        let json = r#"{"name": "pikachu-rock-star", "height": 4, "weight": 60, "base_experience": null}"#;

        let pokemon: Pokemon = serde_json::from_str(json).expect("Should parse pokemon");

        assert_eq!(pokemon.base_experience, 0);
        assert!(pokemon.stats.is_empty());
    }
}
