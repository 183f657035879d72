//! Read-dispatch-print loop
//!
//! Reads one line at a time, resolves the first word against the command
//! registry and hands the rest to the session. Command errors are printed and
//! the loop carries on; only `exit` or end of input stop it.

use std::io::{self, Write};

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::debug;

use crate::commands::{Command, Flow, Session};

/// Prompt printed before each line of input
pub const PROMPT: &str = "Pokedex > ";

/// Splits a line into lowercase words, ignoring extra whitespace
pub fn clean_input(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_lowercase).collect()
}

/// Runs the REPL until `exit` or end of input
///
/// Lines are decoded lossily, so bytes that are not UTF-8 become an unknown
/// command instead of ending the loop.
///
/// # Returns
/// * `Ok(())` when the loop ends normally
/// * `Err` only if reading input or writing the prompt fails
pub async fn run<R, W>(session: &mut Session, mut input: R, out: &mut W) -> io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut buf = Vec::new();

    loop {
        write!(out, "{}", PROMPT)?;
        out.flush()?;

        buf.clear();
        if input.read_until(b'\n', &mut buf).await? == 0 {
            writeln!(out)?;
            debug!("end of input");
            return Ok(());
        }

        let line = String::from_utf8_lossy(&buf);
        let words = clean_input(&line);
        let Some((name, args)) = words.split_first() else {
            continue;
        };

        let Some(command) = Command::from_name(name) else {
            writeln!(out, "Unknown command")?;
            continue;
        };

        match session.execute(command, args, out).await {
            Ok(Flow::Continue) => {}
            Ok(Flow::Exit) => return Ok(()),
            Err(e) => writeln!(out, "Error: {}", e)?,
        }
    }
}
