// FILE: crates/cli/src/main.rs

use anyhow::{Context, Result};
use bookfetch_config::ConfigManager;
use clap::{Arg, ArgAction, Command};

mod commands;

fn build_cli() -> Command {
    Command::new("bookfetch")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Book downloader (Internet Archive + Gutenberg + Standard Ebooks) with EPUB->PDF and audiobook->PDF conversion")
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("DIR")
                .help("Directory holding config.toml")
                .global(true),
        )
        .arg(Arg::new("title").short('t').long("title").value_name("TITLE").help("Title to search for"))
        .arg(Arg::new("author").short('a').long("author").value_name("AUTHOR").help("Author to filter by"))
        .arg(
            Arg::new("sites")
                .long("sites")
                .value_name("LIST")
                .help("Comma-separated sites: archive,gutenberg"),
        )
        .arg(
            Arg::new("standard-url")
                .long("standard-url")
                .value_name("URL")
                .help("Direct Standard Ebooks book page URL to download"),
        )
        .arg(Arg::new("output").short('o').long("output").value_name("DIR").help("Output directory"))
        .arg(
            Arg::new("convert")
                .long("convert")
                .help("Convert downloads to PDF when PDF is not available")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("audiobook-audio")
                .long("audiobook-audio")
                .value_name("FILE")
                .help("Local audiobook audio file to transcribe"),
        )
        .arg(
            Arg::new("audiobook-transcript")
                .long("audiobook-transcript")
                .value_name("FILE")
                .help("Existing transcript text file to render"),
        )
        .arg(Arg::new("audiobook-title").long("audiobook-title").value_name("TITLE").help("Title to use in the audiobook PDF"))
        .arg(Arg::new("audiobook-author").long("audiobook-author").value_name("AUTHOR").help("Author to use in the audiobook PDF"))
        .arg(
            Arg::new("use-whisper")
                .long("use-whisper")
                .help("Transcribe the audio locally when whisper is installed")
                .action(ArgAction::SetTrue),
        )
        .subcommand(
            Command::new("config")
                .about("Manage the configuration file")
                .subcommand_required(true)
                .subcommand(Command::new("init").about("Write a default config file if none exists"))
                .subcommand(Command::new("show").about("Print the effective configuration"))
                .subcommand(Command::new("validate").about("Check the config file for invalid values")),
        )
}

fn config_manager(dir: Option<&String>) -> Result<ConfigManager> {
    match dir {
        Some(dir) => Ok(ConfigManager::with_directory(dir)),
        None => ConfigManager::new().context("Failed to locate configuration directory"),
    }
}

fn main() -> Result<()> {
    let matches = build_cli().get_matches();
    let manager = config_manager(matches.get_one::<String>("config"))?;
    let loaded = manager
        .load()
        .with_context(|| format!("Failed to load {}", manager.config_path().display()))?;

    let default_level = loaded.config.app.log_level.to_string();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();
    commands::report_load(&loaded);

    match matches.subcommand() {
        Some(("config", sub_matches)) => commands::config_command(&manager, &loaded, sub_matches),
        _ => commands::fetch(&matches, &loaded),
    }
}
