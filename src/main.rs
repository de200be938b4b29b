// dlref: Markdown API reference for doc-commented Datalog AST definitions

use std::error::Error as _;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use crossterm::style::Stylize;
use crossterm::tty::IsTty;
use tracing::info;
use tracing_subscriber::EnvFilter;

use dlref::config::DEFAULT_INPUT;
use dlref::preprocess::{DEFAULT_ARGS, DEFAULT_PROGRAM};
use dlref::render::{DEFAULT_FENCE_LANGUAGE, DEFAULT_TITLE};
use dlref::{Config, Error, ExtractMode, Markdown, Preprocessor, RenderOptions};

/// Generate a Markdown API reference from a Datalog AST definition file
#[derive(Parser, Debug)]
#[command(name = "dlref", version)]
struct Args {
    /// Definition file to document
    #[arg(value_name = "INPUT", default_value = DEFAULT_INPUT)]
    input: PathBuf,

    /// Preprocessor program
    #[arg(short, long, value_name = "PROG", default_value = DEFAULT_PROGRAM)]
    preprocessor: String,

    /// Argument passed to the preprocessor before the input path (repeatable,
    /// replaces the default `-C -P`)
    #[arg(
        short = 'a',
        long = "preprocessor-arg",
        value_name = "ARG",
        allow_hyphen_values = true
    )]
    preprocessor_args: Vec<String>,

    /// Run the preprocessor without the default `-C -P` arguments
    #[arg(long)]
    no_default_args: bool,

    /// Write the reference to a file instead of stdout
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// How section bodies are delimited
    #[arg(short, long, value_enum, default_value_t = ExtractMode::Lazy)]
    mode: ExtractMode,

    /// Document title
    #[arg(long, default_value = DEFAULT_TITLE)]
    title: String,

    /// Language tag of the signature code fences
    #[arg(long, value_name = "TAG", default_value = DEFAULT_FENCE_LANGUAGE)]
    lang: String,

    /// Succeed even when no sections are found
    #[arg(long)]
    allow_empty: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn config(&self) -> Config {
        Config {
            input: self.input.clone(),
            preprocessor: Preprocessor::new(&self.preprocessor, self.preprocessor_args()),
            mode: self.mode,
            render: RenderOptions {
                title: self.title.clone(),
                fence_language: self.lang.clone(),
            },
            allow_empty: self.allow_empty,
        }
    }

    /// Explicit `-a` values, else the defaults unless `--no-default-args`
    fn preprocessor_args(&self) -> Vec<String> {
        if self.preprocessor_args.is_empty() && !self.no_default_args {
            DEFAULT_ARGS.map(String::from).to_vec()
        } else {
            self.preprocessor_args.clone()
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_tty())
        .init();
}

fn run(args: &Args) -> Result<(), Error> {
    let config = args.config();
    let reference = dlref::generate(&config)?;
    let markdown = Markdown::new(&reference, &config.render);

    let mut writer: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(File::create(path).map_err(Error::Write)?)),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    write!(writer, "{}", markdown).map_err(Error::Write)?;
    writer.flush().map_err(Error::Write)?;

    if let Some(path) = &args.output {
        info!(output = %path.display(), "wrote reference");
    }

    Ok(())
}

fn report(err: &Error) {
    let stderr = io::stderr();
    let (prefix, cause) = if stderr.is_tty() {
        ("error:".red().bold().to_string(), "caused by:".yellow().to_string())
    } else {
        ("error:".to_string(), "caused by:".to_string())
    };

    eprintln!("{} {}", prefix, err);
    let mut source = err.source();
    while let Some(inner) = source {
        eprintln!("  {} {}", cause, inner);
        source = inner.source();
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err);
            ExitCode::FAILURE
        }
    }
}
