use clap::Parser;
use questboard::cli::commands::Cli;
use questboard::cli::handlers;
use questboard::io::config_io;
use questboard::logging;

fn main() {
    let cli = Cli::parse();

    match cli.command {
        None => {
            // No subcommand → launch TUI
            let data_dir = config_io::data_dir(cli.data_dir.as_deref());
            logging::init_file(&data_dir.join("questboard.log"));
            if let Err(e) = questboard::tui::run(&data_dir) {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
        Some(_) => {
            logging::init_stderr();
            if let Err(e) = handlers::dispatch(cli) {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
    }
}
