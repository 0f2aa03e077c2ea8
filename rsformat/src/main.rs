//! # rsformat
//!
//! A CLI tool for rendering JSON result sets as grid text, tables, pivots,
//! pretty JSON or CSV.
//!
//! ## Overview
//!
//! rsformat is built on top of rsformatlib and provides a command-line
//! interface to its result engine. The input is a JSON array of flat
//! objects; the output is the selected view of it, after filtering and
//! sorting.
//!
//! ## Features
//!
//! - **Multiple formats**: Table (default), grid, transposed, structured
//! - **Live query options**: Filter text and header-click sort toggles
//! - **Vertical merging**: Repeated leading-column values span rows
//! - **CSV export**: BOM-prefixed, fully quoted, CRLF-delimited
//!
//! ## Usage
//!
//! ```bash
//! # Render a file as a text grid
//! rsformat results.json --format grid
//!
//! # Read stdin, show IDs, keep rows containing "sales"
//! cat results.json | rsformat - --show-id --filter sales
//!
//! # Sort by a column descending (two header clicks)
//! rsformat results.json --sort amount --sort amount
//!
//! # Export CSV
//! rsformat results.json --filter sales --csv out.csv
//! ```

use std::fs::{self, File};
use std::io::{self, BufReader, Write};
use std::process::ExitCode;

use anyhow::Context;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use console::{Style, Term};
use log::debug;
use rsformatlib::{
    CsvExport, Dataset, EngineConfig, OptionKey, RenderedOutput, ResultEngine, ViewOptions,
};

/// Build the clap Command structure
fn build_command() -> Command {
    Command::new("rsformat")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Arthur Debert")
        .about("Render JSON result sets as grids, tables, pivots, JSON or CSV")
        .arg(
            Arg::new("path")
                .help("JSON file holding an array of objects (- for stdin)")
                .default_value("-"),
        )
        .arg(
            Arg::new("format")
                .short('F')
                .long("format")
                .help("Output format: table, grid, transposed, structured"),
        )
        .arg(
            Arg::new("columns")
                .short('c')
                .long("columns")
                .value_delimiter(',')
                .action(ArgAction::Append)
                .help("Columns to show, in order (comma-separated)"),
        )
        .arg(
            Arg::new("show-id")
                .long("show-id")
                .action(ArgAction::SetTrue)
                .help("Prepend a 1-based ID column"),
        )
        .arg(
            Arg::new("transpose")
                .long("transpose")
                .action(ArgAction::SetTrue)
                .help("Show the pivoted view regardless of --format"),
        )
        .arg(
            Arg::new("rowspan")
                .long("rowspan")
                .value_parser(value_parser!(i64))
                .allow_negative_numbers(true)
                .help("Number of leading columns to merge vertically (0-10)"),
        )
        .arg(
            Arg::new("no-break")
                .long("no-break")
                .action(ArgAction::SetTrue)
                .help("Keep line breaks in table cells as-is"),
        )
        .arg(
            Arg::new("filter")
                .short('f')
                .long("filter")
                .help("Keep rows where any value contains this text (case-insensitive)"),
        )
        .arg(
            Arg::new("sort")
                .long("sort")
                .action(ArgAction::Append)
                .help("Toggle sort on a column (repeat to cycle asc, desc, off)"),
        )
        .arg(
            Arg::new("markup")
                .long("markup")
                .action(ArgAction::SetTrue)
                .help("Emit embeddable markup instead of plain text"),
        )
        .arg(
            Arg::new("csv")
                .long("csv")
                .value_name("FILE")
                .help("Write the CSV export to FILE instead of rendering (- for stdout)"),
        )
}

/// Read the dataset from a file or stdin
fn load_dataset(path: &str) -> anyhow::Result<Dataset> {
    if path == "-" {
        let stdin = io::stdin();
        return Dataset::from_reader(stdin.lock()).context("failed to read dataset from stdin");
    }
    let file = File::open(path).with_context(|| format!("failed to open {}", path))?;
    Dataset::from_reader(BufReader::new(file)).with_context(|| format!("failed to load {}", path))
}

/// Build the initial view options from flags
fn view_options(matches: &ArgMatches) -> ViewOptions {
    let mut options = ViewOptions::new()
        .show_id(matches.get_flag("show-id"))
        .transpose(matches.get_flag("transpose"))
        .newline_to_break(!matches.get_flag("no-break"));
    if let Some(format) = matches.get_one::<String>("format") {
        options = options.format(format.as_str());
    }
    options
}

/// Construct the engine and replay the query flags against it
fn build_engine(matches: &ArgMatches) -> anyhow::Result<ResultEngine> {
    let path = matches
        .get_one::<String>("path")
        .map(String::as_str)
        .unwrap_or("-");
    let dataset = load_dataset(path)?;
    let columns: Option<Vec<String>> = matches
        .get_many::<String>("columns")
        .map(|v| v.map(|s| s.trim().to_string()).collect());

    let config = EngineConfig::new().initial_view(view_options(matches));
    let mut engine = ResultEngine::with_config(dataset, columns, config);

    if let Some(depth) = matches.get_one::<i64>("rowspan") {
        engine.set_option(OptionKey::RowspanDepth, *depth)?;
    }
    if let Some(filter) = matches.get_one::<String>("filter") {
        engine.set_filter_text(filter.as_str())?;
    }
    for column in matches.get_many::<String>("sort").into_iter().flatten() {
        let state = engine
            .toggle_sort(column)
            .with_context(|| format!("cannot sort by '{}'", column))?;
        debug!("sort is now {:?} {:?}", state.column, state.direction);
    }
    Ok(engine)
}

/// Write the CSV export to a file or stdout
fn write_csv(engine: &ResultEngine, target: &str) -> anyhow::Result<()> {
    let bytes = match engine.export_csv()? {
        CsvExport::NoData => {
            eprintln!("{}", engine.config().no_data_text);
            return Ok(());
        }
        CsvExport::Csv(bytes) => bytes,
    };
    if target == "-" {
        let mut stdout = io::stdout().lock();
        stdout.write_all(&bytes)?;
        stdout.flush()?;
    } else {
        fs::write(target, &bytes).with_context(|| format!("failed to write {}", target))?;
    }
    Ok(())
}

/// Bold the header line of a grid
fn style_grid(text: &str) -> String {
    let header = Style::new().bold();
    match text.split_once('\n') {
        Some((first, rest)) => format!("{}\n{}", header.apply_to(first), rest),
        None => header.apply_to(text).to_string(),
    }
}

/// Render the selected view to stdout
fn print_output(engine: &ResultEngine, markup: bool) -> anyhow::Result<()> {
    let output = engine.render()?;
    let on_terminal = Term::stdout().is_term();

    let text = if markup {
        output.to_markup()
    } else {
        match &output {
            RenderedOutput::Grid(grid) if on_terminal => style_grid(&grid.text),
            other => other.to_text(),
        }
    };

    let mut stdout = io::stdout().lock();
    write!(stdout, "{}", text)?;
    if !text.ends_with('\n') {
        writeln!(stdout)?;
    }

    if on_terminal && !output.is_no_data() {
        let dim = Style::new().dim();
        eprintln!("{}", dim.apply_to(engine.summary()?));
    }
    Ok(())
}

fn run(matches: &ArgMatches) -> anyhow::Result<()> {
    let engine = build_engine(matches)?;
    match matches.get_one::<String>("csv") {
        Some(target) => write_csv(&engine, target),
        None => print_output(&engine, matches.get_flag("markup")),
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let matches = build_command().get_matches();

    match run(&matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}
