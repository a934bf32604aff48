//! CLI entry point for `sqlcleaver`.

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use sqlcleaver::error::Error;
use sqlcleaver::output::renderer::{RenderOptions, Renderer};
use sqlcleaver::output::reporter::Reporter;
use sqlcleaver::output::splitter::Splitter;
use sqlcleaver::parser::dialect::{self, DEFAULT_DIALECT};
use sqlcleaver::parser::segmenter::{self, Segmenter};
use sqlcleaver::transform::Transform;
use sqlcleaver::transform::drop_guard::DropGuard;
use sqlcleaver::transform::grep::Grep;
use sqlcleaver::transform::list_fields::{FieldFormat, ListFields};
use sqlcleaver::transform::pretty_print::PrettyPrint;
use sqlcleaver::transform::rename::{RenameRule, TableNameReplace};
use sqlcleaver::transform::truncate_guard::TruncateGuard;
use sqlparser::ast::Statement;

#[derive(Parser)]
#[command(
    name = "sqlcleaver",
    version,
    about = "Split, filter, and rewrite large SQL dumps one statement at a time"
)]
struct Cli {
    /// Suppress progress output on stderr
    #[arg(long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
#[command(rename_all = "snake_case")]
enum Command {
    /// Split a dump into per-table section files
    Split {
        /// Input SQL script
        sql_file: PathBuf,
        /// Input SQL dialect
        #[arg(long, default_value = DEFAULT_DIALECT)]
        dialect: String,
        /// Output SQL dialect (defaults to --dialect)
        #[arg(long)]
        output_dialect: Option<String>,
        /// Output directory (defaults to sqlcleaver_INPUT_FILENAME)
        #[arg(long)]
        output_directory: Option<PathBuf>,
        /// Pretty-print statements in the section files
        #[arg(long)]
        pretty: bool,
    },
    /// Pretty-print every statement
    Pp {
        /// Input SQL script
        sql_file: PathBuf,
        /// Input SQL dialect
        #[arg(long, default_value = DEFAULT_DIALECT)]
        dialect: String,
        /// Output SQL dialect (defaults to --dialect)
        #[arg(long)]
        output_dialect: Option<String>,
    },
    /// Keep only statements whose rendered text contains PATTERN
    Grep {
        /// Input SQL script
        sql_file: PathBuf,
        /// Substring to look for in the rendered statement
        pattern: String,
        /// Keep non-matching statements instead
        #[arg(long)]
        invert: bool,
        /// Input SQL dialect
        #[arg(long, default_value = DEFAULT_DIALECT)]
        dialect: String,
        /// Output SQL dialect (defaults to --dialect)
        #[arg(long)]
        output_dialect: Option<String>,
    },
    /// Rename tables matching a regex, consistently across each statement
    TableNameReplace {
        /// Input SQL script
        sql_file: PathBuf,
        /// Pattern matched against bare table names
        table_name_regex: String,
        /// Replacement template ($1-style capture references)
        table_name_replacement: String,
        /// Input SQL dialect
        #[arg(long, default_value = DEFAULT_DIALECT)]
        dialect: String,
        /// Output SQL dialect (defaults to --dialect)
        #[arg(long)]
        output_dialect: Option<String>,
    },
    /// Inject a TRUNCATE TABLE guard before each table's first insert
    TableTruncate {
        /// Input SQL script
        sql_file: PathBuf,
        /// Input SQL dialect
        #[arg(long, default_value = DEFAULT_DIALECT)]
        dialect: String,
        /// Output SQL dialect (defaults to --dialect)
        #[arg(long)]
        output_dialect: Option<String>,
    },
    /// Inject a DROP TABLE IF EXISTS guard before every CREATE TABLE
    TableDrop {
        /// Input SQL script
        sql_file: PathBuf,
        /// Input SQL dialect
        #[arg(long, default_value = DEFAULT_DIALECT)]
        dialect: String,
        /// Output SQL dialect (defaults to --dialect)
        #[arg(long)]
        output_dialect: Option<String>,
    },
    /// List referenced fields as CSV or JSONL
    ListFields {
        /// Input SQL script
        sql_file: PathBuf,
        /// Output encoding
        #[arg(long, default_value = "csv")]
        output_format: FieldFormat,
        /// Input SQL dialect
        #[arg(long, default_value = DEFAULT_DIALECT)]
        dialect: String,
    },
}

fn main() {
    let cli = Cli::parse();
    let reporter = if cli.quiet {
        Reporter::silent()
    } else {
        Reporter::stderr()
    };

    if let Err(error) = run(cli.command, &reporter) {
        eprintln!("{error}");
        process::exit(2);
    }
}

fn run(command: Command, reporter: &Reporter) -> Result<(), Error> {
    match command {
        Command::Split {
            sql_file,
            dialect,
            output_dialect,
            output_directory,
            pretty,
        } => {
            let output_directory =
                output_directory.unwrap_or_else(|| default_output_directory(&sql_file));
            let mut options =
                RenderOptions::compact(output_dialect.as_deref().unwrap_or(&dialect));
            options.pretty = pretty;
            let renderer = Renderer::new(&options)?;
            let statements = load_statements(&sql_file, &dialect, reporter)?;
            Splitter::new(output_directory, renderer, reporter).split(&statements)?;
            Ok(())
        }
        Command::Pp {
            sql_file,
            dialect,
            output_dialect,
        } => {
            let renderer = Renderer::new(&RenderOptions::display(
                output_dialect.as_deref().unwrap_or(&dialect),
            ))?;
            emit(&PrettyPrint::new(renderer), &sql_file, &dialect, reporter)
        }
        Command::Grep {
            sql_file,
            pattern,
            invert,
            dialect,
            output_dialect,
        } => {
            let renderer = Renderer::new(&RenderOptions::display(
                output_dialect.as_deref().unwrap_or(&dialect),
            ))?;
            emit(&Grep::new(pattern, invert, renderer), &sql_file, &dialect, reporter)
        }
        Command::TableNameReplace {
            sql_file,
            table_name_regex,
            table_name_replacement,
            dialect,
            output_dialect,
        } => {
            let rule = RenameRule::new(&table_name_regex, &table_name_replacement)?;
            let renderer = Renderer::new(&RenderOptions::compact(
                output_dialect.as_deref().unwrap_or(&dialect),
            ))?;
            emit(
                &TableNameReplace::new(rule, renderer),
                &sql_file,
                &dialect,
                reporter,
            )
        }
        Command::TableTruncate {
            sql_file,
            dialect,
            output_dialect,
        } => {
            let renderer = Renderer::new(&RenderOptions::compact(
                output_dialect.as_deref().unwrap_or(&dialect),
            ))?;
            let guard = TruncateGuard::new(&dialect, renderer, reporter)?;
            emit(&guard, &sql_file, &dialect, reporter)
        }
        Command::TableDrop {
            sql_file,
            dialect,
            output_dialect,
        } => {
            let renderer = Renderer::new(&RenderOptions::compact(
                output_dialect.as_deref().unwrap_or(&dialect),
            ))?;
            let guard = DropGuard::new(&dialect, renderer, reporter)?;
            emit(&guard, &sql_file, &dialect, reporter)
        }
        Command::ListFields {
            sql_file,
            output_format,
            dialect,
        } => emit(&ListFields::new(output_format), &sql_file, &dialect, reporter),
    }
}

/// Segment the input file, report failed chunks, and run one transform over
/// the surviving statements, printing its output.
fn emit(
    transform: &dyn Transform,
    sql_file: &Path,
    dialect: &str,
    reporter: &Reporter,
) -> Result<(), Error> {
    let statements = load_statements(sql_file, dialect, reporter)?;
    println!("{}", transform.apply(statements));
    Ok(())
}

fn load_statements(
    sql_file: &Path,
    dialect_name: &str,
    reporter: &Reporter,
) -> Result<Vec<Statement>, Error> {
    let dialect = dialect::resolve(dialect_name)?;
    reporter.note("reading file");
    let sql = std::fs::read_to_string(sql_file)?;
    reporter.note("tokenizing");
    let outcomes = Segmenter::new(&*dialect).segment(&sql)?;
    reporter.note("done tokenizing");
    Ok(segmenter::collect_parsed(outcomes, reporter))
}

fn default_output_directory(sql_file: &Path) -> PathBuf {
    let stem = sql_file
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("output");
    PathBuf::from(format!("sqlcleaver_{stem}"))
}
