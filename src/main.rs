use anyhow::{Context, Result};
use clap::Parser;
use std::{
    io::{self, Write},
    path::{Path, PathBuf},
};
use tracing_subscriber::EnvFilter;
use xlsx2md::{ConverterBuilder, DateFormat, TableStyle};

/// Convert every worksheet of a spreadsheet into one Markdown document
#[derive(Parser)]
#[command(name = "xlsx2md", version, about, long_about = None)]
pub struct Cli {
    /// Spreadsheet to convert (.xlsx, .xlsm, .xlsb, .xls or .ods)
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Markdown file to write; defaults to INPUT with a .md extension, `-` prints to stdout
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Top-level heading (defaults to the input file name without extension)
    #[arg(short, long)]
    title: Option<String>,

    /// strftime pattern for date cells, e.g. "%Y/%m/%d" (defaults to ISO 8601)
    #[arg(short, long, value_name = "PATTERN")]
    date_format: Option<String>,

    /// Pad table columns to a common display width
    #[arg(short, long)]
    aligned: bool,

    /// Log progress to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut builder = ConverterBuilder::new();
    if let Some(title) = &cli.title {
        builder = builder.with_title(title);
    }
    if let Some(pattern) = &cli.date_format {
        builder = builder.with_date_format(DateFormat::Custom(pattern.clone()));
    }
    if cli.aligned {
        builder = builder.with_table_style(TableStyle::Aligned);
    }
    let converter = builder.build().context("Invalid conversion options")?;

    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| cli.input.with_extension("md"));

    if output == Path::new("-") {
        let document = converter
            .load_document(&cli.input)
            .with_context(|| format!("Unable to convert: {}", cli.input.display()))?;
        return print_document(|handle| document.write_to(handle));
    }

    let document = converter
        .convert_file(&cli.input, &output)
        .with_context(|| format!("Unable to convert: {}", cli.input.display()))?;

    println!(
        "Converted {} worksheet(s) from {} to {}",
        document.sections().len(),
        cli.input.display(),
        output.display()
    );

    Ok(())
}

fn init_logging(verbose: bool) {
    let default_directive = if verbose {
        "xlsx2md=debug"
    } else {
        "xlsx2md=warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive)),
        )
        .with_writer(io::stderr)
        .init();
}

fn print_document<F>(write: F) -> Result<()>
where
    F: FnOnce(&mut io::StdoutLock<'static>) -> io::Result<()>,
{
    let mut handle = io::stdout().lock();

    match write(&mut handle) {
        Ok(_) => {}
        Err(err) if should_ignore_pipe_error(&err) => return Ok(()),
        Err(err) => return Err(err).context("Failed to print document"),
    }

    match handle.flush() {
        Ok(_) => Ok(()),
        Err(err) if should_ignore_pipe_error(&err) => Ok(()),
        Err(err) => Err(err).context("Failed to flush stdout"),
    }
}

fn should_ignore_pipe_error(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::BrokenPipe | io::ErrorKind::WouldBlock
    )
}
