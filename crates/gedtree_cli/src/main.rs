//! `gedtree` command-line entry point.
//!
//! # Responsibility
//! - Load a GEDCOM file with `gedtree_core` and print one view of it.
//! - Start file logging only when a log directory is supplied.
//!
//! # Invariants
//! - Results go to stdout as pretty JSON (or CSV for `search --csv`).
//! - Errors go to stderr with a non-zero exit status.

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use gedtree_core::{
    analyze, hits_to_csv, init_logging, BiblicalNameFilter, FamilyTreeData, Gender, GedcomParser,
    LogLevel, SearchField, SearchIndex, SearchQuery,
};
use log::info;
use serde_json::json;
use std::path::{Path, PathBuf};

#[derive(Debug, Parser)]
#[command(name = "gedtree", version, about = "Parse GEDCOM genealogies into family-tree JSON")]
struct Cli {
    /// Emit only individuals whose name looks biblical.
    #[arg(long, global = true)]
    biblical_only: bool,

    /// error|warn|info|debug|trace; defaults to debug in debug builds, info otherwise.
    #[arg(long, global = true, env = "GEDTREE_LOG_LEVEL")]
    log_level: Option<String>,

    /// Directory for rotated log files; logging is off when unset.
    #[arg(long, global = true, env = "GEDTREE_LOG_DIR")]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Resolved person records keyed by id.
    Tree(FileArg),
    /// Individual, family and sex counts.
    Stats(FileArg),
    /// Individuals without parents.
    Roots(FileArg),
    /// Dangling references and unnamed individuals.
    Validate(FileArg),
    /// Scored search over names, titles, descriptions and verses.
    Search(SearchArgs),
    /// Gender, generation, lifespan and name summaries.
    Analytics(FileArg),
}

#[derive(Debug, Args)]
struct FileArg {
    /// GEDCOM file to read.
    file: PathBuf,
}

#[derive(Debug, Args)]
struct SearchArgs {
    file: PathBuf,
    query: String,
    /// Field to search (repeatable): name|title|description|verses.
    #[arg(long = "field")]
    fields: Vec<String>,
    /// male|female
    #[arg(long)]
    gender: Option<String>,
    #[arg(long, default_value_t = 20)]
    limit: u32,
    /// Print Name,Title,Description,Birth Year,Death Year rows instead of JSON.
    #[arg(long)]
    csv: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(dir) = &cli.log_dir {
        let dir = absolute_dir(dir)?;
        let level = cli
            .log_level
            .as_deref()
            .unwrap_or(LogLevel::default_for_build().as_str());
        init_logging(level, &dir)
            .with_context(|| format!("failed to start logging in `{}`", dir.display()))?;
    }

    let mut parser = GedcomParser::new();
    if cli.biblical_only {
        parser = parser.with_filter(Box::new(BiblicalNameFilter));
    }

    let output = match &cli.command {
        Command::Tree(arg) => {
            let data = load(&mut parser, &arg.file)?;
            serde_json::to_string_pretty(&data)?
        }
        Command::Stats(arg) => {
            load(&mut parser, &arg.file)?;
            serde_json::to_string_pretty(&parser.statistics())?
        }
        Command::Roots(arg) => {
            load(&mut parser, &arg.file)?;
            let roots: Vec<_> = parser
                .find_roots()
                .into_iter()
                .map(|individual| json!({ "id": individual.id, "name": individual.name }))
                .collect();
            serde_json::to_string_pretty(&roots)?
        }
        Command::Validate(arg) => {
            load(&mut parser, &arg.file)?;
            serde_json::to_string_pretty(&parser.validate())?
        }
        Command::Search(args) => {
            let data = load(&mut parser, &args.file)?;
            run_search(&data, args)?
        }
        Command::Analytics(arg) => {
            let data = load(&mut parser, &arg.file)?;
            serde_json::to_string_pretty(&analyze(&data))?
        }
    };

    println!("{output}");
    Ok(())
}

fn load(parser: &mut GedcomParser, path: &Path) -> Result<FamilyTreeData> {
    let data = parser
        .parse_file(path)
        .with_context(|| format!("failed to load `{}`", path.display()))?;
    info!(
        "event=cli_load module=cli status=ok path={} emitted={}",
        path.display(),
        data.len()
    );
    Ok(data)
}

fn run_search(data: &FamilyTreeData, args: &SearchArgs) -> Result<String> {
    let mut query = SearchQuery::new(args.query.clone());
    query.limit = args.limit;
    if !args.fields.is_empty() {
        query.fields = args
            .fields
            .iter()
            .map(|field| SearchField::parse(field))
            .collect::<Result<_, _>>()?;
    }
    if let Some(gender) = &args.gender {
        let Some(parsed) = Gender::parse(gender) else {
            bail!("unknown gender `{gender}`; expected male|female");
        };
        query.gender = Some(parsed);
    }

    let hits = SearchIndex::build(data).search(&query)?;
    if args.csv {
        return Ok(hits_to_csv(&hits, data)?);
    }
    Ok(serde_json::to_string_pretty(&hits)?)
}

fn absolute_dir(dir: &Path) -> Result<PathBuf> {
    if dir.is_absolute() {
        return Ok(dir.to_path_buf());
    }
    let cwd = std::env::current_dir().context("failed to resolve current directory")?;
    Ok(cwd.join(dir))
}
