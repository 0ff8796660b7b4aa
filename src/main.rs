// algoscope: step-through algorithm visualizer with time-travel playback

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing_subscriber::EnvFilter;

use algoscope::config::Config;
use algoscope::dispatch::{
    format_values, lookup, random_values, registry, AlgorithmSpec, Category, Dispatcher, RawInput,
};
use algoscope::playback::PlaybackEngine;
use algoscope::trace::RunResult;
use algoscope::ui::App;

#[derive(Parser)]
#[command(name = "algoscope", version, about = "Step through classic algorithms one snapshot at a time")]
struct Cli {
    /// Algorithm id, e.g. "bubble-sort" (see --list).
    algorithm: Option<String>,

    /// Comma-separated integers.
    #[arg(long)]
    values: Option<String>,

    /// Search target.
    #[arg(long)]
    target: Option<String>,

    /// Operation for data-structure algorithms, e.g. "insert-end".
    #[arg(long)]
    operation: Option<String>,

    /// Value the operation works with.
    #[arg(long)]
    operand: Option<String>,

    /// First string for LCS.
    #[arg(long)]
    first: Option<String>,

    /// Second string for LCS.
    #[arg(long)]
    second: Option<String>,

    /// Knapsack items as "weight:value, ...".
    #[arg(long)]
    items: Option<String>,

    /// Knapsack capacity.
    #[arg(long)]
    capacity: Option<String>,

    /// Directed graph edges as "from-to[:weight], ...".
    #[arg(long)]
    graph: Option<String>,

    /// Start node for graph traversals.
    #[arg(long)]
    start: Option<String>,

    /// Board size for N-Queens.
    #[arg(short = 'n')]
    n: Option<String>,

    /// Huffman frequencies as "symbol:count, ...".
    #[arg(long)]
    frequencies: Option<String>,

    /// Postfix expression, space separated.
    #[arg(long)]
    expression: Option<String>,

    /// Matrix chain dimensions, comma separated.
    #[arg(long)]
    dimensions: Option<String>,

    /// Replace --values with a random array.
    #[arg(long)]
    random: bool,

    /// Seed for randomized algorithms and --random.
    #[arg(long)]
    seed: Option<u64>,

    /// TOML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Initial playback speed multiplier.
    #[arg(long)]
    speed: Option<f64>,

    /// List available algorithms and exit.
    #[arg(long)]
    list: bool,

    /// Print every step and the summary instead of starting the TUI.
    #[arg(long)]
    summary_only: bool,

    /// Write logs to this file.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn raw_input(&self) -> RawInput {
        RawInput {
            values: self.values.clone(),
            target: self.target.clone(),
            operation: self.operation.clone(),
            operand: self.operand.clone(),
            first: self.first.clone(),
            second: self.second.clone(),
            items: self.items.clone(),
            capacity: self.capacity.clone(),
            graph: self.graph.clone(),
            start: self.start.clone(),
            n: self.n.clone(),
            frequencies: self.frequencies.clone(),
            expression: self.expression.clone(),
            dimensions: self.dimensions.clone(),
        }
    }
}

/// Install the tracing subscriber.
///
/// Logs go to stderr unless a log file is given. The TUI owns the terminal,
/// so without a log file it runs with no subscriber at all.
fn init_logging(log_file: Option<&Path>, tui: bool) -> io::Result<()> {
    if tui && log_file.is_none() {
        return Ok(());
    }
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    match log_file {
        Some(path) => {
            let file = File::create(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(io::stderr)
                .init();
        }
    }
    Ok(())
}

fn print_registry() {
    let mut current: Option<Category> = None;
    for spec in registry() {
        if current != Some(spec.category) {
            if current.is_some() {
                println!();
            }
            println!("{}", spec.category.label());
            current = Some(spec.category);
        }
        println!("  {:<24} {}", spec.id, spec.description);
        if !spec.operations.is_empty() {
            let ops: Vec<&str> = spec.operations.iter().map(|op| op.as_str()).collect();
            println!("  {:<24} operations: {}", "", ops.join(", "));
        }
    }
}

fn print_run(spec: &AlgorithmSpec, run: &RunResult) {
    println!("{} ({} steps)", spec.name, run.len());
    for (i, step) in run.steps().iter().enumerate() {
        match step.line {
            Some(line) => println!("{:>4}  [line {:>2}] {}", i + 1, line, step.message),
            None => println!("{:>4}            {}", i + 1, step.message),
        }
    }
    println!();
    for (label, value) in run.summary().entries() {
        println!("{:<16} {}", label, value);
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.list {
        print_registry();
        return Ok(());
    }

    let tui = !cli.summary_only;
    init_logging(cli.log_file.as_deref(), tui)?;

    let config = match &cli.config {
        Some(path) => match Config::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        },
        None => Config::default(),
    };

    let Some(id) = cli.algorithm.as_deref() else {
        eprintln!("Error: No algorithm given");
        eprintln!();
        eprintln!("Usage: algoscope <ALGORITHM> [OPTIONS]");
        eprintln!("Run `algoscope --list` to see the available algorithms.");
        std::process::exit(1);
    };

    let Some(spec) = lookup(id) else {
        eprintln!("Error: unknown algorithm '{}'", id);
        eprintln!("Run `algoscope --list` to see the available algorithms.");
        std::process::exit(1);
    };

    let seed = cli.seed.or(config.run.seed);
    let mut raw = RawInput::sample(spec).merge(cli.raw_input());
    if cli.random {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        raw.values = Some(format_values(&random_values(&mut rng)));
    }

    let run = match Dispatcher::with_seed(seed).run(spec.id, &raw) {
        Ok(run) => run,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    if cli.summary_only {
        print_run(spec, &run);
        return Ok(());
    }

    let mut engine = PlaybackEngine::new(config.playback.settings());
    if let Some(speed) = cli.speed {
        engine.set_speed(speed);
    }
    engine.load(run);
    if config.playback.autoplay {
        engine.play();
    }

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(engine, spec);
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}
