//! notegrid CLI - evaluate and inspect table blobs

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use notegrid::prelude::*;
use notegrid::column_to_letters;
use notegrid_formula::function_registry;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "notegrid")]
#[command(author, version, about = "Evaluate and inspect notegrid table blobs")]
struct Cli {
    /// Log evaluation details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the display value of every cell
    Eval {
        /// Blob file ("-" for stdin)
        input: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// Show one cell's raw and display value
    Cell {
        /// Blob file ("-" for stdin)
        input: PathBuf,

        /// Cell address in A1 notation
        address: String,
    },

    /// Print an empty blob
    New {
        /// Number of rows (default: 3)
        #[arg(long)]
        rows: Option<usize>,

        /// Number of columns (default: 3)
        #[arg(long)]
        cols: Option<usize>,
    },

    /// List the built-in functions
    Functions,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Tab-separated rows with column headers
    Table,
    /// JSON array of rows
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Eval { input, format } => eval(&input, format),
        Commands::Cell { input, address } => show_cell(&input, &address),
        Commands::New { rows, cols } => new_blob(rows, cols),
        Commands::Functions => list_functions(),
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Read a blob from a file, or stdin for "-"
fn read_input(input: &Path) -> Result<String> {
    if input == Path::new("-") {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read blob from stdin")?;
        return Ok(text);
    }
    std::fs::read_to_string(input).with_context(|| format!("Failed to read '{}'", input.display()))
}

fn load(input: &Path) -> Result<TableBlock> {
    let text = read_input(input)?;
    let table = TableBlock::from_blob(&text, GridConfig::default());
    tracing::debug!(
        rows = table.row_count(),
        cols = table.col_count(),
        "loaded {}",
        input.display()
    );
    Ok(table)
}

fn eval(input: &Path, format: OutputFormat) -> Result<()> {
    let table = load(input)?;
    let values = table.display_grid();

    let output = match format {
        OutputFormat::Json => {
            let mut json =
                serde_json::to_string_pretty(&values).context("Failed to encode values")?;
            json.push('\n');
            json
        }
        OutputFormat::Table => render_table(&values, table.col_count()),
    };

    io::stdout()
        .write_all(output.as_bytes())
        .context("Failed to write to stdout")?;
    Ok(())
}

/// Tab-separated rows, with column letters across the top and row numbers down the side
fn render_table(values: &[Vec<String>], cols: usize) -> String {
    let mut out = String::new();
    for col in 0..cols {
        out.push('\t');
        out.push_str(&column_to_letters(col));
    }
    out.push('\n');

    for (row, cells) in values.iter().enumerate() {
        out.push_str(&(row + 1).to_string());
        for value in cells {
            out.push('\t');
            out.push_str(value);
        }
        out.push('\n');
    }
    out
}

fn show_cell(input: &Path, address: &str) -> Result<()> {
    let table = load(input)?;
    let cell: CellRef = address
        .parse()
        .with_context(|| format!("Invalid cell address '{}'", address))?;

    let Some(raw) = table.raw_value(cell.row, cell.col) else {
        bail!(
            "Cell {} is outside the {}x{} grid",
            cell,
            table.row_count(),
            table.col_count()
        );
    };

    println!("Cell: {}", cell);
    println!("Raw: {}", raw);
    println!("Value: {}", table.display_value(cell.row, cell.col));
    println!("Formula: {}", table.is_formula(cell.row, cell.col));
    Ok(())
}

fn new_blob(rows: Option<usize>, cols: Option<usize>) -> Result<()> {
    let defaults = GridConfig::default();
    let config = GridConfig {
        default_rows: rows.unwrap_or(defaults.default_rows),
        default_cols: cols.unwrap_or(defaults.default_cols),
    };
    let blob = TableBlock::new(config)
        .to_blob()
        .context("Failed to encode grid")?;
    println!("{}", blob);
    Ok(())
}

fn list_functions() -> Result<()> {
    for def in function_registry().definitions() {
        let arity = match def.max_args {
            Some(max) if max == def.min_args => format!("{}", max),
            Some(max) => format!("{}-{}", def.min_args, max),
            None => format!("{}+", def.min_args),
        };
        let volatile = if def.volatile { "\tvolatile" } else { "" };
        println!("{}\t{}{}", def.name, arity, volatile);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_table_headers() {
        let values = vec![
            vec!["1".to_string(), "x".to_string()],
            vec!["".to_string(), "#REF!".to_string()],
        ];
        assert_eq!(
            render_table(&values, 2),
            "\tA\tB\n1\t1\tx\n2\t\t#REF!\n"
        );
    }
}
