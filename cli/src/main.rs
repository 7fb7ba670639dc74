//! pdfnav CLI - line-addressable PDF navigation

use std::fs;
use std::io::{self, BufRead, BufWriter};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use pdfnav::export::export_document;
use pdfnav::{
    CallerId, CleanupPreset, Document, DocumentId, JsonLinesSink, Loader, Navigation, Navigator,
    ProcessBudget, Session, ToolBox,
};

#[derive(Parser)]
#[command(name = "pdfnav")]
#[command(version)]
#[command(about = "Read PDFs a page, a line or a match at a time", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct LoadArgs {
    /// Input PDF file
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Extraction budget (high, medium, low, professional, free)
    #[arg(long, default_value = "low")]
    budget: ProcessBudget,

    /// Line cleanup preset
    #[arg(long, value_enum)]
    cleanup: Option<CleanupLevel>,

    /// Keep going when a page fails to extract
    #[arg(long)]
    lenient: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a page
    Page {
        #[command(flatten)]
        load: LoadArgs,

        /// Page number (1-indexed)
        #[arg(value_name = "PAGE")]
        page: u32,
    },

    /// Go to a page or a global line
    Goto {
        #[command(flatten)]
        load: LoadArgs,

        /// Page number (1-indexed)
        #[arg(short, long)]
        page: Option<u32>,

        /// Global line number (1-indexed)
        #[arg(short, long)]
        line: Option<u32>,
    },

    /// Jump to a search match
    Search {
        #[command(flatten)]
        load: LoadArgs,

        /// Text to search for (case-insensitive)
        #[arg(value_name = "TERM")]
        term: String,

        /// Which match to show (1-based)
        #[arg(short = 'm', long = "match")]
        match_number: Option<usize>,
    },

    /// Show the first or last n lines
    Scroll {
        #[command(flatten)]
        load: LoadArgs,

        /// Window direction
        #[arg(value_enum)]
        direction: Direction,

        /// Number of lines
        #[arg(value_name = "N")]
        n: usize,
    },

    /// Show document information
    Info {
        #[command(flatten)]
        load: LoadArgs,
    },

    /// Print tool descriptors as JSON
    Tools {
        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Run one JSON tool call
    Call {
        #[command(flatten)]
        load: LoadArgs,

        /// Tool call, e.g. '{"tool":"goto","page":2}'
        #[arg(value_name = "JSON")]
        call: String,

        /// Caller identity
        #[arg(long, default_value = "cli")]
        user: String,
    },

    /// Export the document and its lines as JSON Lines
    Export {
        #[command(flatten)]
        load: LoadArgs,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Owner of the exported document
        #[arg(long, default_value = "cli")]
        user: String,
    },

    /// Read JSON tool calls from stdin, one per line
    Repl {
        #[command(flatten)]
        load: LoadArgs,

        /// Caller identity
        #[arg(long, default_value = "cli")]
        user: String,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum CleanupLevel {
    /// Unicode normalization only
    Minimal,
    /// Ligatures, replacement chars, trailing whitespace
    Standard,
    /// Standard plus compatibility normalization and space collapsing
    Aggressive,
}

impl From<CleanupLevel> for CleanupPreset {
    fn from(level: CleanupLevel) -> Self {
        match level {
            CleanupLevel::Minimal => CleanupPreset::Minimal,
            CleanupLevel::Standard => CleanupPreset::Standard,
            CleanupLevel::Aggressive => CleanupPreset::Aggressive,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Direction {
    /// Last n lines
    Up,
    /// First n lines
    Down,
}

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Page { load, page } => cmd_page(&load, page),
        Commands::Goto { load, page, line } => cmd_goto(&load, page, line),
        Commands::Search {
            load,
            term,
            match_number,
        } => cmd_search(&load, &term, match_number),
        Commands::Scroll { load, direction, n } => cmd_scroll(&load, direction, n),
        Commands::Info { load } => cmd_info(&load),
        Commands::Tools { compact } => cmd_tools(compact),
        Commands::Call { load, call, user } => cmd_call(&load, &call, &user),
        Commands::Export { load, output, user } => cmd_export(&load, output.as_deref(), &user),
        Commands::Repl { load, user } => cmd_repl(&load, &user),
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

/// Read and index the input, with a spinner while extraction runs.
fn load_document(args: &LoadArgs) -> CliResult<(Document, Vec<u8>)> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.set_message(format!("Indexing {}...", args.input.display()));

    let mut loader = Loader::new().with_budget(args.budget);
    if let Some(level) = args.cleanup {
        loader = loader.with_cleanup(level.into());
    }
    if args.lenient {
        loader = loader.lenient();
    }

    let data = fs::read(&args.input)?;
    log::debug!("Read {} bytes from {}", data.len(), args.input.display());
    let doc = loader.load_bytes(args.input.display().to_string(), &data);
    pb.finish_and_clear();

    Ok((doc?, data))
}

fn print_navigation(result: Navigation) {
    if result.is_rendered() {
        println!("{}", result);
    } else {
        println!("{}", result.to_string().yellow());
    }
}

fn cmd_page(load: &LoadArgs, page: u32) -> CliResult<()> {
    let (doc, _) = load_document(load)?;
    print_navigation(Navigator::new(&doc).goto(Some(page), None));
    Ok(())
}

fn cmd_goto(load: &LoadArgs, page: Option<u32>, line: Option<u32>) -> CliResult<()> {
    let (doc, _) = load_document(load)?;
    print_navigation(Navigator::new(&doc).goto(page, line));
    Ok(())
}

fn cmd_search(load: &LoadArgs, term: &str, match_number: Option<usize>) -> CliResult<()> {
    let (doc, _) = load_document(load)?;
    print_navigation(Navigator::new(&doc).search_next_match(term, match_number));
    Ok(())
}

fn cmd_scroll(load: &LoadArgs, direction: Direction, n: usize) -> CliResult<()> {
    let (doc, _) = load_document(load)?;
    let nav = Navigator::new(&doc);
    let output = match direction {
        Direction::Up => nav.scroll_up(n),
        Direction::Down => nav.scroll_down(n),
    };
    println!("{}", output);
    Ok(())
}

fn cmd_info(load: &LoadArgs) -> CliResult<()> {
    let (doc, data) = load_document(load)?;

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), load.input.display());
    if let Ok(pdfnav::SourceKind::Pdf { version }) = pdfnav::detect_source(&data) {
        println!("{}: PDF {}", "Format".bold(), version);
    }
    println!("{}: {}", "Budget".bold(), load.budget);
    println!("{}: {}", "Pages".bold(), doc.total_pages());
    println!("{}: {}", "Lines".bold(), doc.total_lines());

    println!();
    println!("{}", "Page Ranges".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    for (index, range) in doc.page_ranges().iter().enumerate() {
        if range.is_empty() {
            println!("  {} {}", format!("{:>4}", index + 1).bold(), "(no text)".dimmed());
        } else {
            println!(
                "  {} lines {}-{}",
                format!("{:>4}", index + 1).bold(),
                range.start,
                range.end
            );
        }
    }

    Ok(())
}

fn cmd_tools(compact: bool) -> CliResult<()> {
    let specs = ToolBox::specs();
    let json = if compact {
        serde_json::to_string(&specs)?
    } else {
        serde_json::to_string_pretty(&specs)?
    };
    println!("{}", json);
    Ok(())
}

fn open_toolbox(load: &LoadArgs, user: &str) -> CliResult<ToolBox> {
    let (doc, data) = load_document(load)?;
    let caller = CallerId::new(user);
    let id = DocumentId::from_source(&data, &caller);
    Ok(ToolBox::new(Session::new(id, Arc::new(doc), caller)))
}

fn cmd_call(load: &LoadArgs, call: &str, user: &str) -> CliResult<()> {
    let mut tools = open_toolbox(load, user)?;
    println!("{}", tools.dispatch_json(call));
    Ok(())
}

fn cmd_repl(load: &LoadArgs, user: &str) -> CliResult<()> {
    let mut tools = open_toolbox(load, user)?;
    eprintln!(
        "{} {} ({} pages, {} lines)",
        "Loaded".green(),
        load.input.display(),
        tools.session().document().total_pages(),
        tools.session().document().total_lines()
    );
    eprintln!("{}", "One JSON tool call per line; Ctrl-D to quit.".dimmed());

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        println!("{}", tools.dispatch_json(&line));
    }

    Ok(())
}

fn cmd_export(load: &LoadArgs, output: Option<&Path>, user: &str) -> CliResult<()> {
    let (doc, data) = load_document(load)?;
    let owner = CallerId::new(user);

    let id = match output {
        Some(path) => {
            let file = fs::File::create(path)?;
            let mut sink = JsonLinesSink::new(BufWriter::new(file));
            let id = export_document(&doc, &data, &owner, load.budget, &mut sink)?;
            eprintln!("{} {}", "Saved to".green(), path.display());
            id
        }
        None => {
            let stdout = io::stdout();
            let mut sink = JsonLinesSink::new(stdout.lock());
            export_document(&doc, &data, &owner, load.budget, &mut sink)?
        }
    };

    eprintln!("{}: {}", "Document id".bold(), id);
    Ok(())
}
