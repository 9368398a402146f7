use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use studyrec_core::config::{Config, Settings};
use studyrec_core::query::validate_query;
use studyrec_core::sample::sample_catalog;
use studyrec_core::{Catalog, MaterialRecord, Recommendation};
use studyrec_engine::StudyRecommender;

#[derive(Parser)]
#[command(name = "studyrec", about = "Recommend study materials by text similarity")]
struct Cli {
    /// Catalog file (.csv or .json). Defaults to `catalog.path`, then the built-in sample.
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Rank materials against a free-text query
    Recommend {
        query: String,
        #[arg(long)]
        top_n: Option<usize>,
        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },
    /// Materials whose category contains NAME
    Category { name: String },
    /// Materials whose tags contain NAME
    Tag { name: String },
    /// Every material in the catalog
    List,
    /// Interactive prompt
    Interactive,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::load().map_err(|e| { eprintln!("Error loading config: {}", e); e })?;
    let settings = config.settings()?;
    let recommender = build_recommender(cli.catalog, &settings)?;

    match cli.command {
        Command::Recommend { query, top_n, json } => {
            let query = validate_query(&query)?;
            let results = recommender.recommend(query, top_n.unwrap_or(settings.engine.default_top_n))?;
            if json {
                println!("{}", serde_json::to_string_pretty(&results)?);
            } else {
                print_results(&results, query);
            }
        }
        Command::Category { name } => print_materials(&recommender.search_by_category(&name), &format!("category '{}'", name)),
        Command::Tag { name } => print_materials(&recommender.search_by_tag(&name), &format!("tag '{}'", name)),
        Command::List => print_materials(recommender.all_materials(), "catalog"),
        Command::Interactive => interactive_loop(&recommender)?,
    }
    Ok(())
}

fn build_recommender(flag: Option<PathBuf>, settings: &Settings) -> anyhow::Result<StudyRecommender> {
    let catalog = match flag.or_else(|| settings.catalog.resolved_path()) {
        Some(path) => Catalog::load(&path).with_context(|| format!("loading catalog {}", path.display()))?,
        None => {
            info!("no catalog configured, using the built-in sample");
            sample_catalog()?
        }
    };
    let recommender = StudyRecommender::fit(catalog, settings.engine.clone()).context("fitting recommender")?;
    Ok(recommender)
}

fn print_results(results: &[Recommendation], query: &str) {
    if results.is_empty() {
        println!("❌ Nothing found for '{}'", query);
        return;
    }
    println!("\n📚 Recommended materials for '{}':", query);
    println!("{}", "-".repeat(60));
    for r in results {
        println!("ID: {}", r.id);
        println!("📖 {}", r.title);
        println!("📝 {}", r.description);
        println!("🏷️  Category: {}", r.category);
        println!("🔖 Tags: {}", r.tags);
        println!("⭐ Similarity: {:.3}", r.similarity);
        println!("{}", "-".repeat(60));
    }
}

fn print_materials(records: &[MaterialRecord], label: &str) {
    if records.is_empty() {
        println!("❌ No materials for {}", label);
        return;
    }
    println!("\n📂 {} material(s) for {}:", records.len(), label);
    for r in records {
        println!("   - [{}] {} ({})", r.id, r.title, r.category);
    }
}

fn interactive_loop(recommender: &StudyRecommender) -> anyhow::Result<()> {
    println!("🔍 Study Recommender");
    println!("====================");
    println!("📊 Materials loaded: {}", recommender.all_materials().len());
    println!();
    show_help();

    let top_n = recommender.settings().default_top_n;
    loop {
        print!("studyrec> ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }
        let input = input.trim();
        if input.is_empty() {
            continue;
        }

        match parse_repl_line(input) {
            ReplCommand::Help => show_help(),
            ReplCommand::Quit => {
                println!("👋 Goodbye!");
                break;
            }
            ReplCommand::List => print_materials(recommender.all_materials(), "catalog"),
            ReplCommand::Category(name) => {
                print_materials(&recommender.search_by_category(name), &format!("category '{}'", name))
            }
            ReplCommand::Tag(name) => print_materials(&recommender.search_by_tag(name), &format!("tag '{}'", name)),
            ReplCommand::Usage(usage) => println!("ℹ️  Usage: {}", usage),
            ReplCommand::Unknown(cmd) => println!("❓ Unknown command: {} (try /help)", cmd),
            ReplCommand::Query(query) => match validate_query(query).and_then(|q| recommender.recommend(q, top_n)) {
                Ok(results) => print_results(&results, query),
                Err(e) => println!("❌ {}", e),
            },
        }
    }
    Ok(())
}

#[derive(Debug, PartialEq, Eq)]
enum ReplCommand<'a> {
    Help,
    Quit,
    List,
    Category(&'a str),
    Tag(&'a str),
    /// A known command missing its argument.
    Usage(&'static str),
    Unknown(&'a str),
    Query(&'a str),
}

/// Parses one trimmed, non-empty prompt line.
fn parse_repl_line(input: &str) -> ReplCommand<'_> {
    let (cmd, arg) = input.split_once(' ').map_or((input, ""), |(cmd, rest)| (cmd, rest.trim()));
    match (cmd, arg) {
        ("/help" | "/h", _) => ReplCommand::Help,
        ("/quit" | "/q" | "quit" | "exit", _) => ReplCommand::Quit,
        ("/list" | "/l", _) => ReplCommand::List,
        ("/category" | "/c", "") => ReplCommand::Usage("/category <name>"),
        ("/category" | "/c", name) => ReplCommand::Category(name),
        ("/tag" | "/t", "") => ReplCommand::Usage("/tag <name>"),
        ("/tag" | "/t", name) => ReplCommand::Tag(name),
        (cmd, _) if cmd.starts_with('/') => ReplCommand::Unknown(cmd),
        _ => ReplCommand::Query(input),
    }
}

fn show_help() {
    println!("🎯 Commands:");
    println!("  /help            - Show this help message");
    println!("  /category <name> - Materials in a category");
    println!("  /tag <name>      - Materials with a tag");
    println!("  /list            - List all materials");
    println!("  /quit            - Exit");
    println!("  <query>          - Recommend materials for the query");
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_without_argument_get_usage() {
        assert_eq!(parse_repl_line("/category"), ReplCommand::Usage("/category <name>"));
        assert_eq!(parse_repl_line("/t"), ReplCommand::Usage("/tag <name>"));
        assert_eq!(parse_repl_line("/category   ML"), ReplCommand::Category("ML"));
        assert_eq!(parse_repl_line("/tag data"), ReplCommand::Tag("data"));
    }

    #[test]
    fn other_lines() {
        assert_eq!(parse_repl_line("/stats"), ReplCommand::Unknown("/stats"));
        assert_eq!(parse_repl_line("exit"), ReplCommand::Quit);
        assert_eq!(parse_repl_line("python programming"), ReplCommand::Query("python programming"));
    }
}
