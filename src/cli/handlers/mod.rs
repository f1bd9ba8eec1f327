use std::path::Path;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::config_io;
use crate::ops::Board;

type CmdResult = Result<(), Box<dyn std::error::Error>>;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> CmdResult {
    let json = cli.json;
    let data_dir = config_io::data_dir(cli.data_dir.as_deref());

    match cli.command {
        // No subcommand is the TUI, launched from main.rs
        None => Ok(()),
        Some(cmd) => {
            let mut board = open_board(&data_dir)?;
            match cmd {
                // Read commands
                Commands::List => cmd_list(&board, json),
                Commands::Show(args) => cmd_show(&board, args, json),
                Commands::Pick => cmd_pick(&mut board, json),

                // Write commands
                Commands::Add(args) => cmd_add(&mut board, args, json),
                Commands::Rm(args) => cmd_rm(&mut board, args),
                Commands::Note(args) => cmd_note(&mut board, args),
                Commands::Xp(args) => cmd_xp(&mut board, args, json),
                Commands::Res(args) => cmd_res(&mut board, args),
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn open_board(data_dir: &Path) -> Result<Board, Box<dyn std::error::Error>> {
    let config = config_io::read_config(data_dir)?;
    tracing::debug!(dir = %data_dir.display(), key = %config.storage.key, "opening board");
    Ok(Board::open_dir(data_dir, &config.storage.key)?)
}

/// Focus a task for an editor command
fn select_task(board: &mut Board, id: u64) -> CmdResult {
    if board.select(id) {
        Ok(())
    } else {
        Err(format!("task not found: {}", id).into())
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> CmdResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_list(board: &Board, json: bool) -> CmdResult {
    if json {
        let tasks: Vec<TaskJson> = board.tasks().iter().map(task_to_json).collect();
        return print_json(&tasks);
    }
    if board.tasks().is_empty() {
        println!("no tasks");
        return Ok(());
    }
    for task in board.tasks() {
        println!("{}", format_task_line(task));
    }
    Ok(())
}

fn cmd_show(board: &Board, args: IdArg, json: bool) -> CmdResult {
    let task = board
        .task(args.id)
        .ok_or_else(|| format!("task not found: {}", args.id))?;
    if json {
        return print_json(&task_to_json(task));
    }
    for line in format_task_detail(task) {
        println!("{}", line);
    }
    Ok(())
}

fn cmd_pick(board: &mut Board, json: bool) -> CmdResult {
    let picked = board
        .pick_random(&mut rand::thread_rng())
        .and_then(|id| board.task(id));
    match (picked, json) {
        (Some(task), true) => print_json(&task_to_json(task)),
        (None, true) => print_json(&serde_json::Value::Null),
        (Some(task), false) => {
            for line in format_task_detail(task) {
                println!("{}", line);
            }
            Ok(())
        }
        (None, false) => {
            println!("no tasks");
            Ok(())
        }
    }
}

// ---------------------------------------------------------------------------
// Write commands
// ---------------------------------------------------------------------------

fn cmd_add(board: &mut Board, args: AddArgs, json: bool) -> CmdResult {
    let id = board.add_task(&args.name)?;
    if json {
        return print_json(&AddedJson { id });
    }
    if let Some(id) = id {
        println!("{}", id);
    }
    Ok(())
}

fn cmd_rm(board: &mut Board, args: IdArg) -> CmdResult {
    if !board.delete_task(args.id)? {
        return Err(format!("task not found: {}", args.id).into());
    }
    println!("{} deleted", args.id);
    Ok(())
}

fn cmd_note(board: &mut Board, args: NoteArgs) -> CmdResult {
    select_task(board, args.id)?;
    board.set_note(&args.text)?;
    println!("{} note updated", args.id);
    Ok(())
}

fn cmd_xp(board: &mut Board, args: XpArgs, json: bool) -> CmdResult {
    select_task(board, args.id)?;
    board.gain_xp_times(args.times)?;
    let task = board
        .selected()
        .ok_or_else(|| format!("task not found: {}", args.id))?;
    if json {
        return print_json(&task_to_json(task));
    }
    println!("{} xp {} ({}%)", task.id, task.xp, task.xp_progress());
    Ok(())
}

fn cmd_res(board: &mut Board, args: ResCmd) -> CmdResult {
    match args.action {
        ResAction::Add(a) => {
            select_task(board, a.id)?;
            if board.add_resource(Some(&a.url))? {
                println!("{} resource added", a.id);
            }
        }
        ResAction::Rm(a) => {
            select_task(board, a.id)?;
            board.remove_resource(&a.url)?;
            println!("{} resource removed", a.id);
        }
    }
    Ok(())
}
