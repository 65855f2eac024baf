//! Command-line HTML to Markdown converter.

use std::io::{BufRead, Read, Write};
use std::path::{Path, PathBuf};

use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use tagdown::Options;
use thiserror::Error;

#[derive(Debug, Error)]
enum CliError {
    #[error("Error reading file {path}: {source}")]
    ReadInput {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Error reading stdin: {0}")]
    ReadStdin(#[source] std::io::Error),
    #[error("Error writing file {path}: {source}")]
    WriteOutput {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid {option} value {value:?}: must be one of {allowed}")]
    InvalidMarker {
        option: &'static str,
        value: char,
        allowed: &'static str,
    },
}

/// Simple and fast HTML to Markdown converter with table support.
#[derive(Debug, Parser)]
#[command(name = "tagdown", version, about)]
struct Cli {
    /// Input HTML file. Reads stdin when omitted or set to "-".
    file: Option<PathBuf>,

    /// Convert the given HTML text instead of reading a file.
    #[arg(short, long, value_name = "HTML", conflicts_with = "file")]
    input: Option<String>,

    /// Write the Markdown to this file instead of stdout.
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Print the generated Markdown even when writing to a file.
    #[arg(short, long)]
    print: bool,

    /// Overwrite the output file without asking.
    #[arg(short, long)]
    replace: bool,

    /// Do not insert soft line breaks into long lines.
    #[arg(long)]
    no_wrap: bool,

    /// Do not trim whitespace from output lines.
    #[arg(long)]
    no_trim: bool,

    /// Bullet character for unordered lists.
    #[arg(long, value_name = "CHAR", default_value = "-")]
    bullet: char,

    /// Character after the number of ordered list items.
    #[arg(long, value_name = "CHAR", default_value = ".")]
    ordered_suffix: char,

    /// Drop the document title instead of rendering it as a heading.
    #[arg(long)]
    skip_title: bool,

    /// Leave tables as emitted instead of aligning their columns.
    #[arg(long)]
    no_format_tables: bool,

    /// Log conversion details to stderr.
    #[arg(long)]
    debug: bool,

    /// Print a shell completion script and exit.
    #[arg(long, value_name = "SHELL")]
    generate_completion: Option<Shell>,
}

impl Cli {
    fn conversion_options(&self) -> Result<Options, CliError> {
        if !matches!(self.bullet, '-' | '+' | '*') {
            return Err(CliError::InvalidMarker {
                option: "--bullet",
                value: self.bullet,
                allowed: "'-', '+', '*'",
            });
        }

        if !matches!(self.ordered_suffix, '.' | ')') {
            return Err(CliError::InvalidMarker {
                option: "--ordered-suffix",
                value: self.ordered_suffix,
                allowed: "'.', ')'",
            });
        }

        Ok(Options {
            wrap_lines: !self.no_wrap,
            trim_whitespace: !self.no_trim,
            unordered_bullet: self.bullet,
            ordered_suffix: self.ordered_suffix,
            include_title_as_heading: !self.skip_title,
            format_tables: !self.no_format_tables,
        })
    }
}

fn read_input(cli: &Cli) -> Result<String, CliError> {
    if let Some(html) = &cli.input {
        return Ok(html.clone());
    }

    match &cli.file {
        Some(path) if path.as_os_str() != "-" => {
            std::fs::read_to_string(path).map_err(|source| CliError::ReadInput {
                path: path.clone(),
                source,
            })
        }
        _ => {
            let mut html = String::new();
            std::io::stdin()
                .read_to_string(&mut html)
                .map_err(CliError::ReadStdin)?;
            Ok(html)
        }
    }
}

/// Asks on stdout whether `path` may be overwritten. Repeats on invalid
/// answers; end of input counts as no.
fn confirm_overwrite(path: &Path) -> bool {
    let stdin = std::io::stdin();
    let mut answer = String::new();

    loop {
        print!("{} already exists, override? [y/n] ", path.display());
        let _ = std::io::stdout().flush();

        answer.clear();
        match stdin.lock().read_line(&mut answer) {
            Ok(0) | Err(_) => return false,
            Ok(_) => {}
        }

        match answer.trim() {
            "" => {}
            "y" | "Y" => return true,
            "n" | "N" => return false,
            _ => println!("Invalid input"),
        }
    }
}

fn write_output(cli: &Cli, md: &str) -> Result<(), CliError> {
    let Some(path) = &cli.output else {
        return Ok(());
    };

    if path.exists() && !cli.replace && !confirm_overwrite(path) {
        println!("Markdown not written.");
        return Ok(());
    }

    std::fs::write(path, md).map_err(|source| CliError::WriteOutput {
        path: path.clone(),
        source,
    })?;
    println!("Markdown written to {}", path.display());

    Ok(())
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let html = read_input(cli)?;
    let options = cli.conversion_options()?;

    let (md, ok) = tagdown::convert_with_options(&html, &options);
    if !ok {
        log::warn!("input left unclosed html structures; output may be degraded");
    }

    if cli.print || cli.output.is_none() {
        print!("{md}");
    }

    write_output(cli, &md)?;

    Ok(())
}

fn main() {
    let cli = Cli::parse();

    let mut builder = env_logger::Builder::from_default_env();
    if cli.debug {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.init();

    if let Some(shell) = cli.generate_completion {
        let mut command = Cli::command();
        clap_complete::generate(shell, &mut command, "tagdown", &mut std::io::stdout());
        return;
    }

    if let Err(err) = run(&cli) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
