//! Command-line interface for kjv
//! This binary extracts a structured Bible from a plain-text dump and browses the result.
//!
//! Usage:
//!   kjv extract `<source>` [-o `<output>`] [-f `<format>`]   - Build a store from a text dump
//!   kjv books `<store>`                                   - List books in encounter order
//!   kjv chapters `<store>` `<book>`                         - List the chapters of a book
//!   kjv verses `<store>` `<book>` `<chapter>`                 - Print the verses of a chapter
//!   kjv search `<store>` `<query>` [-n `<limit>`] [--json]    - Case-insensitive substring search
//!   kjv list-formats                                      - List available store formats
//!
//! Every command accepts `--config <file>` (layered over the built-in defaults)
//! and `-v` / `-vv` for info / debug logging on stderr.

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use kjv_config::{KjvConfig, Loader};
use kjv_parser::kjv::browsing::Browser;
use kjv_parser::kjv::loader::DocumentLoader;
use kjv_parser::kjv::pipeline::ExtractionPipeline;
use kjv_parser::kjv::store::{JsonFormat, StoreRegistry};
use std::fmt::Display;
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn main() {
    let matches = build_cli().get_matches();

    init_tracing(matches.get_count("verbose"));
    let config = load_config(matches.get_one::<String>("config"));

    // Handle subcommands
    match matches.subcommand() {
        Some(("extract", sub)) => {
            let source = sub.get_one::<String>("source").unwrap();
            let output = sub.get_one::<String>("output").unwrap();
            let format = sub.get_one::<String>("format");
            handle_extract_command(&config, source, output, format.map(String::as_str));
        }
        Some(("books", sub)) => handle_books_command(&open_store(&config, sub)),
        Some(("chapters", sub)) => {
            let book = sub.get_one::<String>("book").unwrap();
            handle_chapters_command(&open_store(&config, sub), book);
        }
        Some(("verses", sub)) => {
            let book = sub.get_one::<String>("book").unwrap();
            let chapter = sub.get_one::<String>("chapter").unwrap();
            handle_verses_command(&open_store(&config, sub), book, chapter);
        }
        Some(("search", sub)) => {
            let query = sub.get_one::<String>("query").unwrap();
            let limit = sub
                .get_one::<usize>("limit")
                .copied()
                .unwrap_or(config.search.max_results);
            let browser = open_store(&config, sub).with_max_results(limit);
            handle_search_command(&browser, query, sub.get_flag("json"));
        }
        Some(("list-formats", _)) => handle_list_formats_command(&config),
        _ => unreachable!(),
    }
}

fn build_cli() -> Command {
    let store_arg = Arg::new("store")
        .help("Path to an extracted store (.json, .yaml)")
        .required(true)
        .index(1);

    Command::new("kjv")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Extract and browse the King James Bible from a plain-text dump")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .help("Configuration file layered over the defaults"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::Count)
                .help("Log more (-v info, -vv debug)"),
        )
        .subcommand(
            Command::new("extract")
                .about("Extract book/chapter/verse structure from a text dump")
                .arg(
                    Arg::new("source")
                        .help("Path to the plain-text source")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Where to write the store")
                        .default_value("kjv-data.json"),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Store format (default: from the output extension, then config)"),
                ),
        )
        .subcommand(
            Command::new("books")
                .about("List books in the order they were found")
                .arg(store_arg.clone()),
        )
        .subcommand(
            Command::new("chapters")
                .about("List the chapters of a book")
                .arg(store_arg.clone())
                .arg(Arg::new("book").required(true).index(2)),
        )
        .subcommand(
            Command::new("verses")
                .about("Print the verses of a chapter")
                .arg(store_arg.clone())
                .arg(Arg::new("book").required(true).index(2))
                .arg(Arg::new("chapter").required(true).index(3)),
        )
        .subcommand(
            Command::new("search")
                .about("Find verses containing a phrase, ignoring case")
                .arg(store_arg)
                .arg(Arg::new("query").required(true).index(2))
                .arg(
                    Arg::new("limit")
                        .long("limit")
                        .short('n')
                        .value_parser(value_parser!(usize))
                        .help("Maximum number of results (default from config)"),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Print results as JSON"),
                ),
        )
        .subcommand(Command::new("list-formats").about("List available store formats"))
}

fn init_tracing(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn exit_with(context: &str, err: impl Display) -> ! {
    eprintln!("{}: {}", context, err);
    std::process::exit(1);
}

fn load_config(path: Option<&String>) -> KjvConfig {
    let mut loader = Loader::new();
    if let Some(path) = path {
        debug!(path = %path, "loading configuration");
        loader = loader.with_file(path);
    }
    loader
        .build()
        .unwrap_or_else(|e| exit_with("Configuration error", e))
}

fn store_registry(config: &KjvConfig) -> StoreRegistry {
    let mut registry = StoreRegistry::with_defaults();
    registry.register(JsonFormat {
        pretty: config.store.pretty,
    });
    registry
}

/// Pick a store format: explicit, then by extension, then the configured default.
fn resolve_format(
    registry: &StoreRegistry,
    path: &Path,
    explicit: Option<&str>,
    config: &KjvConfig,
) -> String {
    explicit
        .or_else(|| registry.format_for_path(path))
        .unwrap_or(config.store.format.as_str())
        .to_string()
}

fn open_store(config: &KjvConfig, matches: &ArgMatches) -> Browser {
    let path = PathBuf::from(matches.get_one::<String>("store").unwrap());
    let registry = store_registry(config);
    let format = resolve_format(&registry, &path, None, config);
    Browser::from_store(&path, &registry, &format)
        .unwrap_or_else(|e| exit_with("Error loading store", e))
        .with_max_results(config.search.max_results)
}

/// Handle the extract command
fn handle_extract_command(config: &KjvConfig, source: &str, output: &str, format: Option<&str>) {
    let canon = config
        .extract
        .canon()
        .unwrap_or_else(|e| exit_with("Configuration error", e));
    let loader = DocumentLoader::from_path(source)
        .unwrap_or_else(|e| exit_with("Error reading source", e))
        .with_start_marker(config.extract.start_marker());

    let registry = store_registry(config);
    let output = PathBuf::from(output);
    let format = resolve_format(&registry, &output, format, config);

    let pipeline = ExtractionPipeline::with_canon(canon)
        .with_rules(config.extract.classifier_rules())
        .with_progress_interval(config.extract.progress_interval);
    let report = pipeline
        .extract_to_store(&loader, &registry, &output, &format)
        .unwrap_or_else(|e| exit_with("Extraction failed", e));

    println!("{}", report);
}

/// Handle the books command
fn handle_books_command(browser: &Browser) {
    for book in browser.list_books() {
        println!("{}", book);
    }
}

/// Handle the chapters command
fn handle_chapters_command(browser: &Browser, book: &str) {
    let chapters = browser.list_chapters(book);
    if chapters.is_empty() {
        println!("No chapters found for '{}'", book);
        return;
    }
    println!("{}", chapters.join(" "));
}

/// Handle the verses command
fn handle_verses_command(browser: &Browser, book: &str, chapter: &str) {
    let verses = browser.list_verses(book, chapter);
    if verses.is_empty() {
        println!("No verses found for {} {}", book, chapter);
        return;
    }
    for (number, text) in verses {
        println!("{} {}", number, text.trim_end_matches('\r'));
    }
}

/// Handle the search command
fn handle_search_command(browser: &Browser, query: &str, json: bool) {
    let hits = browser.search_substring(query);
    if json {
        let output = serde_json::to_string_pretty(&hits)
            .unwrap_or_else(|e| exit_with("Error formatting results", e));
        println!("{}", output);
        return;
    }
    if hits.is_empty() {
        println!("No results for '{}'", query);
        return;
    }
    for hit in &hits {
        println!("{} {}:{} {}", hit.book, hit.chapter, hit.verse, hit.text);
    }
}

/// Handle the list-formats command
fn handle_list_formats_command(config: &KjvConfig) {
    let registry = store_registry(config);
    println!("Available store formats:\n");
    for name in registry.list_formats() {
        if let Some(format) = registry.get(&name) {
            println!("  {}", name);
            println!("    {}", format.description());
            println!();
        }
    }
}
