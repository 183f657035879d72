//! Command execution state and handlers
//!
//! A `Session` owns everything the commands share: the pagination cursors,
//! the response cache, the API client, the Pokédex and the catch RNG.

use std::io::{self, Write};

use rand::rngs::StdRng;
use thiserror::Error;
use tracing::debug;

use super::Command;
use crate::api::{ApiError, PokeApiClient};
use crate::cache::Cache;
use crate::catch;
use crate::pokedex::Pokedex;

/// Errors a command can report back to the REPL
#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Wrong number of arguments
    #[error("usage: {0}")]
    Usage(&'static str),

    #[error("you haven't caught {0}")]
    NotCaught(String),

    #[error("you haven't caught any pokemon")]
    EmptyPokedex,

    /// Writing command output failed
    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),
}

/// What the REPL should do after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// State shared by all commands for the lifetime of the REPL
#[derive(Debug)]
pub struct Session {
    client: PokeApiClient,
    cache: Cache,
    page_size: u32,
    /// Listing URL `map` fetches next
    next: Option<String>,
    /// Listing URL `mapb` fetches next
    previous: Option<String>,
    pokedex: Pokedex,
    rng: StdRng,
}

impl Session {
    pub fn new(client: PokeApiClient, cache: Cache, page_size: u32, rng: StdRng) -> Self {
        Self {
            client,
            cache,
            page_size,
            next: None,
            previous: None,
            pokedex: Pokedex::new(),
            rng,
        }
    }

    pub fn cache(&self) -> &Cache {
        &self.cache
    }

    pub fn pokedex(&self) -> &Pokedex {
        &self.pokedex
    }

    pub fn next_page(&self) -> Option<&str> {
        self.next.as_deref()
    }

    pub fn previous_page(&self) -> Option<&str> {
        self.previous.as_deref()
    }

    /// Ends the session, handing back the cache so its reaper can be stopped
    pub fn into_cache(self) -> Cache {
        self.cache
    }

    /// Runs `command` with `args`, writing its output to `out`
    pub async fn execute<W: Write>(
        &mut self,
        command: Command,
        args: &[String],
        out: &mut W,
    ) -> Result<Flow, CommandError> {
        debug!(command = command.name(), ?args, "executing command");

        match command {
            Command::Help => self.help(out)?,
            Command::Exit => {
                writeln!(out, "Closing the Pokedex... Goodbye!")?;
                return Ok(Flow::Exit);
            }
            Command::Map => self.map(out).await?,
            Command::MapBack => self.map_back(out).await?,
            Command::Explore => {
                let area = single_arg(args, "explore <area_name>")?;
                self.explore(area, out).await?;
            }
            Command::Catch => {
                let name = single_arg(args, "catch <pokemon_name>")?;
                self.catch(name, out).await?;
            }
            Command::Inspect => {
                let name = single_arg(args, "inspect <pokemon_name>")?;
                self.inspect(name, out)?;
            }
            Command::Pokedex => self.list_pokedex(out)?,
        }

        Ok(Flow::Continue)
    }

    fn help<W: Write>(&self, out: &mut W) -> Result<(), CommandError> {
        writeln!(out)?;
        writeln!(out, "Welcome to the Pokedex!")?;
        writeln!(out, "Usage:")?;
        writeln!(out)?;
        for command in Command::all() {
            let invocation = match command.usage() {
                Some(usage) => format!("{} {}", command.name(), usage),
                None => command.name().to_string(),
            };
            writeln!(out, "{}: {}", invocation, command.description())?;
        }
        writeln!(out)?;
        Ok(())
    }

    async fn map<W: Write>(&mut self, out: &mut W) -> Result<(), CommandError> {
        let url = match (&self.next, &self.previous) {
            (Some(next), _) => next.clone(),
            // Fetched pages before and the last one had no successor
            (None, Some(_)) => {
                writeln!(out, "you're on the last page")?;
                return Ok(());
            }
            (None, None) => self.client.location_areas_url(self.page_size),
        };

        self.show_location_page(&url, out).await
    }

    async fn map_back<W: Write>(&mut self, out: &mut W) -> Result<(), CommandError> {
        let Some(url) = self.previous.clone() else {
            writeln!(out, "you're on the first page")?;
            return Ok(());
        };

        self.show_location_page(&url, out).await
    }

    async fn show_location_page<W: Write>(
        &mut self,
        url: &str,
        out: &mut W,
    ) -> Result<(), CommandError> {
        let page = self.client.location_areas(&self.cache, url).await?;

        self.next = page.next;
        self.previous = page.previous;

        for area in &page.results {
            writeln!(out, "{}", area.name)?;
        }
        Ok(())
    }

    async fn explore<W: Write>(&mut self, area: &str, out: &mut W) -> Result<(), CommandError> {
        let detail = self.client.location_area(&self.cache, area).await?;

        writeln!(out, "Exploring {}...", area)?;
        writeln!(out, "Found Pokemon:")?;
        for encounter in &detail.pokemon_encounters {
            writeln!(out, " - {}", encounter.pokemon.name)?;
        }
        Ok(())
    }

    async fn catch<W: Write>(&mut self, name: &str, out: &mut W) -> Result<(), CommandError> {
        let pokemon = self.client.pokemon(&self.cache, name).await?;

        writeln!(out, "Throwing a Pokeball at {}...", pokemon.name)?;
        if catch::attempt_catch(&pokemon, &mut self.rng) {
            writeln!(out, "{} was caught!", pokemon.name)?;
            writeln!(out, "You may now inspect it with the inspect command.")?;
            self.pokedex.add(name, pokemon);
        } else {
            writeln!(out, "{} escaped!", pokemon.name)?;
        }
        Ok(())
    }

    fn inspect<W: Write>(&self, name: &str, out: &mut W) -> Result<(), CommandError> {
        let caught = self
            .pokedex
            .get(name)
            .ok_or_else(|| CommandError::NotCaught(name.to_string()))?;
        let pokemon = &caught.pokemon;

        writeln!(out, "Name: {}", pokemon.name)?;
        writeln!(out, "Height: {}", pokemon.height)?;
        writeln!(out, "Weight: {}", pokemon.weight)?;
        writeln!(out, "Base Experience: {}", pokemon.base_experience)?;
        writeln!(out, "Stats:")?;
        for stat in &pokemon.stats {
            writeln!(out, "  -{}: {}", stat.stat.name, stat.base_stat)?;
        }
        writeln!(out, "Types:")?;
        for pokemon_type in &pokemon.types {
            writeln!(out, "  - {}", pokemon_type.kind.name)?;
        }
        writeln!(out, "Caught: {}", caught.caught_at.format("%Y-%m-%d %H:%M:%S UTC"))?;
        Ok(())
    }

    fn list_pokedex<W: Write>(&self, out: &mut W) -> Result<(), CommandError> {
        if self.pokedex.is_empty() {
            return Err(CommandError::EmptyPokedex);
        }

        writeln!(out, "Your Pokedex:")?;
        for caught in self.pokedex.iter() {
            writeln!(out, " - {}", caught.pokemon.name)?;
        }
        Ok(())
    }
}

/// Returns the only argument, or a usage error
fn single_arg<'a>(args: &'a [String], usage: &'static str) -> Result<&'a str, CommandError> {
    match args {
        [arg] => Ok(arg.as_str()),
        _ => Err(CommandError::Usage(usage)),
    }
}
