//! scanlex - tokenize files with a configurable grammar
//!
//! `scanlex tokens <FILE>` prints every token of a file, using a TOML grammar
//! profile or the built-in C-like grammar. `scanlex json <FILE>` parses a
//! JSON document with the tokenizer-based parser and prints it back.

mod profile;

use clap::{Parser, Subcommand, ValueEnum};
use profile::GrammarProfile;
use scanlex::config::runtime::{parse_log_level, LogLevel, LoggingPreferences, TokenizerPreferences};
use scanlex::logging::{self, codes};
use scanlex::{log_error, log_info, log_success, Token, TokenListBuilder};
use scanlex_json::JsonParser;
use std::error::Error;
use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};

/// Configurable lexical scanner
#[derive(Parser, Debug)]
#[command(name = "scanlex")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Tokenize files with a configurable grammar", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Print log events to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Minimum log level (error, warning, info, debug)
    #[arg(long, global = true, value_parser = parse_level)]
    log_level: Option<LogLevel>,

    /// Emit log events to stderr as JSON lines
    #[arg(long, global = true)]
    log_json: bool,
}

fn parse_level(level: &str) -> Result<LogLevel, String> {
    parse_log_level(level).ok_or_else(|| format!("unknown log level '{}'", level))
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the tokens of a file
    Tokens(TokensCommand),

    /// Parse a JSON document and print it back
    Json(JsonCommand),
}

#[derive(Parser, Debug)]
struct TokensCommand {
    /// File to tokenize
    file: PathBuf,

    /// Grammar profile (TOML); the built-in C-like grammar when omitted
    #[arg(short, long)]
    profile: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Skip blanks, comments and line ends
    #[arg(short, long)]
    significant_only: bool,

    /// Log every token at debug level
    #[arg(long)]
    trace: bool,
}

#[derive(Parser, Debug)]
struct JsonCommand {
    /// JSON document to parse
    file: PathBuf,

    /// Print on a single line
    #[arg(short, long)]
    compact: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// One `type:'..' value:'..' at L.C` line per token
    Text,
    /// One JSON object per line
    Json,
}

fn open(path: &Path) -> Result<BufReader<File>, Box<dyn Error>> {
    let file = File::open(path).map_err(|e| format!("cannot open {}: {}", path.display(), e))?;
    Ok(BufReader::new(file))
}

fn write_token(out: &mut dyn Write, token: &Token, format: OutputFormat) -> Result<(), Box<dyn Error>> {
    match format {
        OutputFormat::Text => writeln!(out, "{}", token)?,
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string(token)?)?,
    }
    Ok(())
}

fn run_tokens(command: &TokensCommand, out: &mut dyn Write) -> Result<(), Box<dyn Error>> {
    let profile = match &command.profile {
        Some(path) => {
            let profile = GrammarProfile::load(path).map_err(|e| {
                log_error!(e.error_code(), "Grammar profile rejected", "reason" => &e);
                e
            })?;
            log_success!(codes::success::PROFILE_LOADED, "Grammar profile loaded", "path" => path.display());
            profile
        }
        None => GrammarProfile::c_like(),
    };
    let builder = profile.to_builder()?;
    let mut source = open(&command.file)?;

    let mut preferences = TokenizerPreferences::default();
    preferences.trace_tokens |= command.trace;

    if command.significant_only {
        let collector = TokenListBuilder::new(builder).with_preferences(preferences);
        for token in collector.collect_significant(&mut source)? {
            write_token(out, &token, command.format)?;
        }
        return Ok(());
    }

    let mut tokenizer = builder.build_with_preferences(preferences);
    for token in tokenizer.tokens(&mut source) {
        write_token(out, &token?, command.format)?;
    }
    Ok(())
}

fn run_json(command: &JsonCommand, out: &mut dyn Write) -> Result<(), Box<dyn Error>> {
    let mut source = open(&command.file)?;
    if let Some(value) = JsonParser::new()?.parse(&mut source)? {
        if command.compact {
            writeln!(out, "{}", value)?;
        } else {
            writeln!(out, "{}", value.to_pretty_string())?;
        }
    }
    Ok(())
}

fn run(cli: &Cli, out: &mut dyn Write) -> Result<(), Box<dyn Error>> {
    match &cli.command {
        Commands::Tokens(command) => run_tokens(command, out),
        Commands::Json(command) => run_json(command, out),
    }
}

fn logging_preferences(cli: &Cli) -> LoggingPreferences {
    let mut preferences = LoggingPreferences::default();
    preferences.enable_console_logging |= cli.verbose || cli.log_json;
    preferences.use_structured_logging |= cli.log_json;
    if let Some(level) = cli.log_level {
        preferences.min_log_level = level;
    }
    preferences
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let started = logging::config::init_runtime_preferences(logging_preferences(&cli))
        .and_then(|_| logging::init_global_logging());
    if let Err(e) = started {
        eprintln!("error: [{}] {}", codes::system::INITIALIZATION_FAILURE, e);
        std::process::exit(1);
    }
    log_info!("scanlex starting", "version" => env!("CARGO_PKG_VERSION"));

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if let Err(e) = run(&cli, &mut out) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use scanlex::logging::LoggingService;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn file_with(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    fn run_args(args: &[&str]) -> Result<String, Box<dyn Error>> {
        let cli = Cli::try_parse_from(args)?;
        let mut out = Vec::new();
        run(&cli, &mut out)?;
        Ok(String::from_utf8(out)?)
    }

    #[test]
    fn test_tokens_with_builtin_grammar() {
        let input = file_with("f(x) >= 1; // done\n");
        let path = input.path().to_str().unwrap();

        let output = run_args(&["scanlex", "tokens", path]).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "type:'other' value:'f' at 1.1");
        assert_eq!(lines[1], "type:'atomic' value:'(' at 1.2");
        assert!(lines.contains(&"type:'atomic' value:'>=' at 1.6"));
        assert!(lines.contains(&"type:'comment' value:' done' at 1.12"));
        assert_eq!(lines.last(), Some(&"type:'eof' value:'' at 2.1"));
    }

    #[test]
    fn test_significant_only_json_output() {
        let input = file_with("a ; b\n");
        let path = input.path().to_str().unwrap();

        let output =
            run_args(&["scanlex", "tokens", path, "--significant-only", "--format", "json"]).unwrap();
        let values: Vec<serde_json::Value> = output
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(values.len(), 3);
        assert_eq!(values[1]["class"], "atom");
        assert_eq!(values[1]["value"], ";");
        assert_eq!(values[2]["column"], 4);
    }

    #[test]
    fn test_tokens_with_profile() {
        let profile = file_with("atoms = [\"=\"]\nblanks = [\" \"]\neol = [\"lf\"]\n");
        let input = file_with("key = value\n");

        let output = run_args(&[
            "scanlex",
            "tokens",
            input.path().to_str().unwrap(),
            "--profile",
            profile.path().to_str().unwrap(),
            "--significant-only",
        ])
        .unwrap();
        assert_eq!(
            output.lines().collect::<Vec<_>>(),
            vec![
                "type:'other' value:'key' at 1.1",
                "type:'atomic' value:'=' at 1.5",
                "type:'other' value:'value' at 1.7",
            ]
        );
    }

    #[test]
    fn test_scan_error_is_reported() {
        let input = file_with("/* open\n");
        let error = run_args(&["scanlex", "tokens", input.path().to_str().unwrap()]).unwrap_err();
        assert_eq!(error.to_string(), "unterminated comment starting with '/*' at 1:1");
    }

    #[test]
    fn test_missing_input_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nothing.txt");
        let error = run_args(&["scanlex", "json", path.to_str().unwrap()]).unwrap_err();
        assert!(error.to_string().starts_with("cannot open"));
    }

    #[test]
    fn test_json_command() {
        let input = file_with("{ \"b\": [1, 2.5], \"a\": null }\n");
        let path = input.path().to_str().unwrap();

        let compact = run_args(&["scanlex", "json", path, "--compact"]).unwrap();
        assert_eq!(compact, "{\"b\":[1,2.5],\"a\":null}\n");

        let pretty = run_args(&["scanlex", "json", path]).unwrap();
        assert!(pretty.starts_with("{\n  \"b\": [\n    1,"));
    }

    #[test]
    fn test_logging_flags() {
        let cli = Cli::try_parse_from(["scanlex", "json", "a.json", "-v", "--log-level", "debug"]).unwrap();
        let preferences = logging_preferences(&cli);
        assert!(preferences.enable_console_logging);
        assert_eq!(preferences.min_log_level, LogLevel::Debug);

        assert!(Cli::try_parse_from(["scanlex", "--log-level", "loud", "json", "a.json"]).is_err());
    }

    #[test]
    fn test_quiet_run_keeps_log_events_out_of_stdout() {
        let cli = Cli::try_parse_from(["scanlex", "tokens", "in.txt", "--format", "json"]).unwrap();
        let preferences = logging_preferences(&cli);
        if std::env::var_os("SCANLEX_LOGGING_ENABLE_CONSOLE").is_none() {
            assert!(!preferences.enable_console_logging);
            assert!(LoggingService::from_preferences(&preferences).is_silent());
        }

        // The global logger may already exist when tests share a process
        let _ = logging::config::init_runtime_preferences(preferences);
        let _ = logging::init_global_logging();

        let input = file_with("a ; b\n");
        let path = input.path().to_str().unwrap();
        let output = run_args(&["scanlex", "tokens", path, "--format", "json"]).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 7);
        for line in lines {
            let value: serde_json::Value = serde_json::from_str(line).unwrap();
            assert!(value.get("class").is_some(), "{}", line);
        }
    }

    #[test]
    fn test_log_json_enables_stderr_logging() {
        let cli = Cli::try_parse_from(["scanlex", "--log-json", "json", "a.json"]).unwrap();
        let preferences = logging_preferences(&cli);
        assert!(preferences.enable_console_logging);
        assert!(preferences.use_structured_logging);
        assert!(!LoggingService::from_preferences(&preferences).is_silent());
    }

    #[test]
    fn test_trace_flag_keeps_output() {
        let input = file_with("a;\n");
        let path = input.path().to_str().unwrap();
        let plain = run_args(&["scanlex", "tokens", path]).unwrap();
        let traced = run_args(&["scanlex", "tokens", path, "--trace"]).unwrap();
        assert_eq!(plain, traced);

        let significant = run_args(&["scanlex", "tokens", path, "--significant-only"]).unwrap();
        let significant_traced =
            run_args(&["scanlex", "tokens", path, "--significant-only", "--trace"]).unwrap();
        assert_eq!(significant, significant_traced);
        assert_eq!(significant.lines().count(), 2);
    }

    #[test]
    fn test_json_error_position() {
        let input = file_with("{\"a\" 1}\n");
        let error = run_args(&["scanlex", "json", input.path().to_str().unwrap()]).unwrap_err();
        assert_eq!(error.to_string(), "':' expected at 1:6");
    }
}
