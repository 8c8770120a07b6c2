use clap::{Args, Subcommand};
use hn_core::Result;
use std::io::Write;
use crate::manager::StoryManager;

#[derive(Args, Debug, Clone, Default)]
pub struct StoryArgs {
    #[command(subcommand)]
    pub command: Option<StoryCommands>,
}

#[derive(Subcommand, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StoryCommands {
    /// Print the current top stories (default)
    #[default]
    Top,
    /// Show where the cache lives and what it holds
    Status,
    /// Delete the cached stories and checksum
    Clear,
}

/// Runs `args` against `manager`, writing user-facing output to `out`.
pub async fn handle_command<W: Write>(args: StoryArgs, manager: &StoryManager, out: &mut W) -> Result<()> {
    match args.command.unwrap_or_default() {
        StoryCommands::Top => {
            let report = manager.run().await?;
            out.write_all(&report.output)?;
            writeln!(out, "{}", report.summary())?;
        }
        StoryCommands::Status => {
            let status = manager.status().await;
            match status.location {
                Some(dir) => writeln!(out, "cache: {}", dir.display())?,
                None => writeln!(out, "cache: in memory")?,
            }
            match status.cached_bytes {
                Some(bytes) => writeln!(out, "stories: {} bytes", bytes)?,
                None => writeln!(out, "stories: none")?,
            }
            writeln!(out, "checksum: {}", status.checksum.as_deref().unwrap_or("none"))?;
        }
        StoryCommands::Clear => {
            manager.clear().await?;
            writeln!(out, "cache cleared")?;
        }
    }
    out.flush()?;
    Ok(())
}
