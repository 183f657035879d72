//! REPL commands
//!
//! The command set is closed: every command is a `Command` variant, and the
//! registry built from `Command::all()` is the only name lookup the REPL uses.

mod session;

pub use session::{CommandError, Flow, Session};

/// Commands the Pokedex understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Help,
    Exit,
    Map,
    MapBack,
    Explore,
    Catch,
    Inspect,
    Pokedex,
}

impl Command {
    /// Returns every command, in the order `help` lists them.
    pub fn all() -> &'static [Command] {
        &[
            Command::Help,
            Command::Exit,
            Command::Map,
            Command::MapBack,
            Command::Explore,
            Command::Catch,
            Command::Inspect,
            Command::Pokedex,
        ]
    }

    /// The word typed at the prompt
    pub fn name(&self) -> &'static str {
        match self {
            Command::Help => "help",
            Command::Exit => "exit",
            Command::Map => "map",
            Command::MapBack => "mapb",
            Command::Explore => "explore",
            Command::Catch => "catch",
            Command::Inspect => "inspect",
            Command::Pokedex => "pokedex",
        }
    }

    /// Argument placeholder shown by `help`, if the command takes one
    pub fn usage(&self) -> Option<&'static str> {
        match self {
            Command::Explore => Some("<area_name>"),
            Command::Catch | Command::Inspect => Some("<pokemon_name>"),
            _ => None,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Command::Help => "Displays a help message",
            Command::Exit => "Exit the Pokedex",
            Command::Map => "Displays the next page of location areas",
            Command::MapBack => "Displays the previous page of location areas",
            Command::Explore => "Lists the Pokemon found in a location area",
            Command::Catch => "Throws a Pokeball at a Pokemon",
            Command::Inspect => "Shows details of a caught Pokemon",
            Command::Pokedex => "Lists every Pokemon you have caught",
        }
    }

    /// Resolves a typed command name. Returns `None` for unknown names.
    pub fn from_name(name: &str) -> Option<Command> {
        Command::all().iter().copied().find(|command| command.name() == name)
    }
}
