// FILE: crates/cli/src/commands.rs

use anyhow::{bail, Context, Result};
use bookfetch_config::{Config, ConfigManager, ConfigOrigin, LoadedConfig};
use bookfetch_conversion::HostCapabilities;
use bookfetch_core::{AudiobookSpec, Request, SourceKind};
use bookfetch_pipeline::{PipelineBuilder, ProducedArtifact};
use clap::ArgMatches;
use console::style;
use std::path::PathBuf;

fn arg<'a>(matches: &'a ArgMatches, name: &str) -> Option<&'a str> {
    matches.get_one::<String>(name).map(String::as_str)
}

/// Builds the request from flags, falling back to config defaults
///
/// Returns `None` when the flags ask for nothing.
pub fn request_from_matches(matches: &ArgMatches, config: &Config) -> Result<Option<Request>> {
    let output = arg(matches, "output")
        .map(PathBuf::from)
        .unwrap_or_else(|| config.app.output_dir.clone());

    let sites = match arg(matches, "sites") {
        Some(list) => SourceKind::parse_list(list).context("Invalid --sites value")?,
        None => config.app.default_sites.clone(),
    };

    let mut request = Request::new(output)
        .with_sources(sites)
        .with_convert(matches.get_flag("convert") || config.app.convert_by_default);

    if let Some(title) = arg(matches, "title") {
        request = request.with_title(title);
    }
    if let Some(author) = arg(matches, "author") {
        request = request.with_author(author);
    }
    if let Some(url) = arg(matches, "standard-url") {
        request = request.with_reference(url);
    }

    let audio = arg(matches, "audiobook-audio");
    let transcript = arg(matches, "audiobook-transcript");
    if audio.is_some() || transcript.is_some() {
        let mut spec = AudiobookSpec::new().with_transcription(matches.get_flag("use-whisper"));
        if let Some(audio) = audio {
            spec = spec.with_audio(audio);
        }
        if let Some(transcript) = transcript {
            spec = spec.with_transcript(transcript);
        }
        if let Some(title) = arg(matches, "audiobook-title") {
            spec = spec.with_title(title);
        }
        if let Some(author) = arg(matches, "audiobook-author") {
            spec = spec.with_author(author);
        }
        request = request.with_audiobook(spec);
    }

    let has_work =
        request.search_title().is_some() || request.reference.is_some() || request.audiobook.is_some();
    Ok(has_work.then_some(request))
}

/// Logs what loading the config turned up; called once the logger is running
pub fn report_load(loaded: &LoadedConfig) {
    match &loaded.origin {
        ConfigOrigin::File(path) => log::debug!("Loaded configuration from {}", path.display()),
        ConfigOrigin::Defaults => log::debug!("No config file found, using defaults"),
    }
    for note in &loaded.notes {
        log::warn!("{}", note);
    }
    for problem in &loaded.problems {
        log::warn!("Invalid configuration: {}", problem);
    }
}

/// Runs one fetch and prints what it produced
pub fn fetch(matches: &ArgMatches, loaded: &LoadedConfig) -> Result<()> {
    if !loaded.is_valid() {
        bail!(
            "{} configuration problem(s); run `bookfetch config validate` for details",
            loaded.problems.len()
        );
    }
    let config = &loaded.config;

    let Some(request) = request_from_matches(matches, config)? else {
        bail!("Nothing to do: pass --title, --standard-url, --audiobook-audio or --audiobook-transcript");
    };

    print_request(&request);
    HostCapabilities::detect(&config.conversion).log_summary();

    let pipeline = PipelineBuilder::from_config(config)
        .build()
        .context("Failed to set up the download pipeline")?;
    let produced = pipeline
        .run(&request)
        .context("Download run failed")?;

    print_results(&produced);
    Ok(())
}

fn print_request(request: &Request) {
    println!("{}", style("Starting search and download:").bold().cyan());
    if let Some(title) = &request.title {
        println!("  Title: {}", title);
    }
    if let Some(author) = &request.author {
        println!("  Author: {}", author);
    }
    if let Some(url) = &request.reference {
        println!("  Standard Ebooks URL: {}", url);
    }
    let sites: Vec<&str> = request.sources.iter().map(SourceKind::name).collect();
    println!("  Sites: {}", sites.join(", "));
    println!("  Output: {}", request.output_dir.display());
    println!("  Convert to PDF: {}", request.convert);
    if let Some(spec) = &request.audiobook {
        if let Some(audio) = &spec.audio_path {
            println!("  Audiobook audio: {}", audio.display());
        }
        if let Some(transcript) = &spec.transcript_path {
            println!("  Audiobook transcript: {}", transcript.display());
        }
        if spec.transcribe {
            println!("  Whisper transcription requested");
        }
    }
}

fn print_results(produced: &[ProducedArtifact]) {
    if produced.is_empty() {
        println!(
            "\n{}",
            style("No files were downloaded or created. Try a different query or check network/permissions.")
                .yellow()
        );
        return;
    }

    println!("\n{} Files downloaded/created:", style("✓").green().bold());
    for artifact in produced {
        println!(
            "  - {} {}",
            artifact.path.display(),
            style(format!("({}, {})", artifact.format, artifact.origin)).dim()
        );
    }
}

/// `config init|show|validate`
pub fn config_command(manager: &ConfigManager, loaded: &LoadedConfig, matches: &ArgMatches) -> Result<()> {
    match matches.subcommand() {
        Some(("init", _)) => {
            let created = manager
                .initialize()
                .context("Failed to write default configuration")?;
            if created {
                println!("{} Created {}", style("✓").green().bold(), manager.config_path().display());
            } else {
                println!("Config already exists at {}", manager.config_path().display());
            }
            Ok(())
        }
        Some(("show", _)) => {
            let text = toml::to_string_pretty(&loaded.config).context("Failed to serialize configuration")?;
            match &loaded.origin {
                ConfigOrigin::File(path) => println!("# {}", path.display()),
                ConfigOrigin::Defaults => println!("# defaults ({} not found)", manager.config_path().display()),
            }
            print!("{}", text);
            Ok(())
        }
        Some(("validate", _)) => {
            for note in &loaded.notes {
                println!("  {} {}", style("!").yellow().bold(), note);
            }
            if loaded.is_valid() {
                println!("{} Configuration is valid", style("✓").green().bold());
                return Ok(());
            }
            for problem in &loaded.problems {
                println!("  {} {}", style("✗").red().bold(), problem);
            }
            bail!("{} configuration problem(s) found", loaded.problems.len())
        }
        _ => bail!("Unknown config action"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{Arg, ArgAction, Command};

    fn parse(args: &[&str]) -> ArgMatches {
        let mut cmd = Command::new("bookfetch").arg(
            Arg::new("convert").long("convert").action(ArgAction::SetTrue),
        );
        cmd = cmd.arg(Arg::new("use-whisper").long("use-whisper").action(ArgAction::SetTrue));
        for name in [
            "title",
            "author",
            "sites",
            "standard-url",
            "output",
            "audiobook-audio",
            "audiobook-transcript",
            "audiobook-title",
            "audiobook-author",
        ] {
            cmd = cmd.arg(Arg::new(name).long(name));
        }
        let mut argv = vec!["bookfetch"];
        argv.extend_from_slice(args);
        cmd.try_get_matches_from(argv).unwrap()
    }

    #[test]
    fn test_nothing_to_do() {
        let request = request_from_matches(&parse(&[]), &Config::default()).unwrap();
        assert!(request.is_none());

        let request = request_from_matches(&parse(&["--title", "  "]), &Config::default()).unwrap();
        assert!(request.is_none());
    }

    #[test]
    fn test_config_defaults_fill_gaps() {
        let mut config = Config::default();
        config.app.output_dir = PathBuf::from("/srv/books");
        config.app.default_sites = vec![SourceKind::Gutenberg];
        config.app.convert_by_default = true;

        let request = request_from_matches(&parse(&["--title", "Emma"]), &config)
            .unwrap()
            .unwrap();
        assert_eq!(request.output_dir, PathBuf::from("/srv/books"));
        assert_eq!(request.sources, vec![SourceKind::Gutenberg]);
        assert!(request.convert);
    }

    #[test]
    fn test_flags_override_config() {
        let request = request_from_matches(
            &parse(&[
                "--title",
                "Emma",
                "--author",
                "Austen",
                "--sites",
                "archive",
                "--output",
                "out",
            ]),
            &Config::default(),
        )
        .unwrap()
        .unwrap();

        assert_eq!(request.author.as_deref(), Some("Austen"));
        assert_eq!(request.sources, vec![SourceKind::Archive]);
        assert_eq!(request.output_dir, PathBuf::from("out"));
        assert!(request.audiobook.is_none());
    }

    #[test]
    fn test_unknown_site_rejected() {
        assert!(request_from_matches(&parse(&["--title", "Emma", "--sites", "nowhere"]), &Config::default()).is_err());
    }

    #[test]
    fn test_audiobook_flags() {
        let request = request_from_matches(
            &parse(&[
                "--audiobook-audio",
                "book.mp3",
                "--audiobook-title",
                "Book",
                "--use-whisper",
            ]),
            &Config::default(),
        )
        .unwrap()
        .unwrap();

        let spec = request.audiobook.unwrap();
        assert_eq!(spec.audio_path, Some(PathBuf::from("book.mp3")));
        assert_eq!(spec.title.as_deref(), Some("Book"));
        assert!(spec.transcribe);
        assert!(spec.transcript_path.is_none());
    }

    #[test]
    fn test_audiobook_title_alone_is_not_work() {
        let request =
            request_from_matches(&parse(&["--audiobook-title", "Book"]), &Config::default()).unwrap();
        assert!(request.is_none());
    }

    fn command_tree() -> Command {
        Command::new("config")
            .subcommand(Command::new("init"))
            .subcommand(Command::new("validate"))
    }

    #[test]
    fn test_config_init_and_validate() {
        let dir = tempfile::TempDir::new().unwrap();
        let manager = ConfigManager::with_directory(dir.path());
        let loaded = manager.load().unwrap();

        let init = command_tree().try_get_matches_from(["config", "init"]).unwrap();
        config_command(&manager, &loaded, &init).unwrap();
        assert!(manager.config_path().exists());

        let loaded = manager.load().unwrap();
        assert_eq!(loaded.origin, ConfigOrigin::File(manager.config_path()));
        let validate = command_tree().try_get_matches_from(["config", "validate"]).unwrap();
        config_command(&manager, &loaded, &validate).unwrap();
    }

    #[test]
    fn test_invalid_config_is_reported_and_refused() {
        let dir = tempfile::TempDir::new().unwrap();
        let manager = ConfigManager::with_directory(dir.path());
        std::fs::write(manager.config_path(), "[network]\ntimeout_secs = 0\n").unwrap();

        let loaded = manager.load().unwrap();
        assert_eq!(loaded.problems.len(), 1);
        report_load(&loaded);

        let validate = command_tree().try_get_matches_from(["config", "validate"]).unwrap();
        let err = config_command(&manager, &loaded, &validate).unwrap_err();
        assert!(err.to_string().contains("1 configuration problem"));

        let err = fetch(&parse(&["--title", "Emma"]), &loaded).unwrap_err();
        assert!(err.to_string().contains("bookfetch config validate"));
    }
}
