use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "qb", about = concat!("questboard v", env!("CARGO_PKG_VERSION"), " - pick a task, earn some xp"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Use a different data directory
    #[arg(short = 'C', long = "data-dir", global = true)]
    pub data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List all tasks
    List,
    /// Show task details
    Show(IdArg),
    /// Add a task
    Add(AddArgs),
    /// Delete a task
    Rm(IdArg),
    /// Set the "last worked on" note
    Note(NoteArgs),
    /// Gain XP on a task
    Xp(XpArgs),
    /// Add or remove resource URLs
    Res(ResCmd),
    /// Pick a random task
    Pick,
}

#[derive(Args)]
pub struct IdArg {
    /// Task ID
    pub id: u64,
}

#[derive(Args)]
pub struct AddArgs {
    /// Task name
    pub name: String,
}

#[derive(Args)]
pub struct NoteArgs {
    /// Task ID
    pub id: u64,
    /// Note text (stored verbatim)
    pub text: String,
}

#[derive(Args)]
pub struct XpArgs {
    /// Task ID
    pub id: u64,
    /// Number of gains (10 xp each)
    #[arg(short = 'n', long, default_value = "1")]
    pub times: u32,
}

#[derive(Args)]
pub struct ResCmd {
    #[command(subcommand)]
    pub action: ResAction,
}

#[derive(Subcommand)]
pub enum ResAction {
    /// Append a resource URL
    Add(ResArgs),
    /// Remove every copy of a resource URL
    Rm(ResArgs),
}

#[derive(Args)]
pub struct ResArgs {
    /// Task ID
    pub id: u64,
    /// Resource URL
    pub url: String,
}
