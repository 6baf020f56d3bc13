//! CLI entry point for dusauce

use std::fs::File;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::process;

use clap::{ArgAction, Parser, ValueEnum};
use dusauce::tree::DEFAULT_RELATIVE_THRESHOLD;
use dusauce::{
    BuildConfig, BuiltTree, Controller, DEFAULT_CHUNK_SIZE, ListingFormatter, NumberFormat,
    OutputConfig, Sort, SortKey, TreeBuilder, ViewConfig, expanded_rows, print_json,
};

/// Color output mode
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum ColorMode {
    /// Auto-detect based on terminal and environment
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Determine whether to use color output based on mode and environment.
fn should_use_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => {
            // Respect NO_COLOR environment variable (https://no-color.org/)
            if std::env::var_os("NO_COLOR").is_some() {
                return false;
            }
            if std::env::var_os("FORCE_COLOR").is_some() {
                return true;
            }
            if std::env::var("TERM").map(|t| t == "dumb").unwrap_or(false) {
                return false;
            }
            std::io::stdout().is_terminal()
        }
    }
}

/// Sort order selectable on the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
enum SortArg {
    /// Largest first
    Size,
    /// Alphabetical
    Name,
}

impl From<SortArg> for SortKey {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Size => SortKey::Size,
            SortArg::Name => SortKey::Name,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "dusauce")]
#[command(about = "Browse du output as an interactive, collapsible tree")]
#[command(after_help = "Produce input with e.g. `du -k /home > home.du`, then run `dusauce home.du`.")]
#[command(version)]
struct Args {
    /// File containing the output of du
    file: PathBuf,

    /// Only parse entries of at least SIZE (in du units, usually kB)
    #[arg(short = 't', long = "threshold", value_name = "SIZE", default_value_t = 0)]
    threshold: u64,

    /// Only parse entries of at least FRACTION times the total size
    #[arg(
        short = 'T',
        long = "relative-threshold",
        value_name = "FRACTION",
        default_value_t = DEFAULT_RELATIVE_THRESHOLD,
        value_parser = parse_fraction
    )]
    relative_threshold: f64,

    /// Bytes read per step while reading the file backward
    #[arg(
        long = "chunk-size",
        value_name = "BYTES",
        default_value_t = DEFAULT_CHUNK_SIZE,
        value_parser = parse_chunk_size
    )]
    chunk_size: usize,

    /// Start with human-readable sizes (kiB, MiB, ...)
    #[arg(short = 'H', long = "human")]
    human: bool,

    /// Print the fully expanded tree instead of starting the browser
    #[arg(short = 'p', long = "print", conflicts_with = "json")]
    print: bool,

    /// Print the tree as JSON instead of starting the browser
    #[arg(long = "json")]
    json: bool,

    /// Initial sort order
    #[arg(short = 's', long = "sort", value_name = "KEY")]
    sort: Option<SortArg>,

    /// Reverse the initial sort order
    #[arg(short = 'r', long = "reverse", requires = "sort")]
    reverse: bool,

    /// Control color output of --print: auto, always, never
    #[arg(long = "color", value_name = "WHEN", default_value = "auto")]
    color: ColorMode,

    /// Don't report progress while reading
    #[arg(short = 'q', long = "quiet")]
    quiet: bool,

    /// Log more detail to stderr (-v info, -vv debug)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,
}

/// Parse a non-negative, finite fraction.
fn parse_fraction(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .trim()
        .parse()
        .map_err(|_| format!("invalid number: {}", s))?;
    if !value.is_finite() || value < 0.0 {
        return Err(format!("must be a non-negative number: {}", s));
    }
    Ok(value)
}

/// Parse a chunk size of at least one byte.
fn parse_chunk_size(s: &str) -> Result<usize, String> {
    match s.trim().parse::<usize>() {
        Ok(0) => Err("must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(_) => Err(format!("invalid number: {}", s)),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    let interactive = !args.print && !args.json;
    if interactive && !std::io::stdout().is_terminal() {
        eprintln!("dusauce: stdout is not a terminal; use --print or --json");
        process::exit(1);
    }

    let file = File::open(&args.file).unwrap_or_else(|e| {
        eprintln!("dusauce: cannot open '{}': {}", args.file.display(), e);
        process::exit(1);
    });

    let build_config = BuildConfig {
        absolute_threshold: args.threshold,
        relative_threshold: args.relative_threshold,
        chunk_size: args.chunk_size,
        ..Default::default()
    };
    log::info!("reading {} with {:?}", args.file.display(), build_config);

    let mut builder = TreeBuilder::new(build_config);
    if !args.quiet {
        builder = builder.with_progress(|p| {
            eprintln!("dusauce: {} lines read, {} nodes created", p.lines, p.nodes);
        });
    }

    let BuiltTree { mut tree, threshold } = match builder.build_from_reader(file) {
        Ok(built) => built,
        Err(e) => {
            eprintln!("dusauce: {}: {}", args.file.display(), e);
            process::exit(1);
        }
    };
    log::info!(
        "{} nodes, hiding entries below {}",
        tree.node_count(),
        threshold
    );

    let sort = args.sort.map(|arg| {
        let key = SortKey::from(arg);
        Sort {
            key,
            descending: key.default_descending() != args.reverse,
        }
    });
    let number_format = if args.human {
        NumberFormat::Human
    } else {
        NumberFormat::Grouped
    };

    let result = if args.json {
        print_json(&tree)
    } else if args.print {
        let output_config = OutputConfig {
            use_color: should_use_color(args.color),
            number_format,
            sort,
        };
        let root_size = tree.node(tree.root()).size();
        let rows = expanded_rows(&mut tree, &output_config, threshold);
        ListingFormatter::new(output_config).print(&rows, root_size)
    } else {
        let mut controller = Controller::new(
            tree,
            ViewConfig {
                threshold,
                sort,
                number_format,
                ..Default::default()
            },
        );
        dusauce::tui::run(&mut controller)
    };

    if let Err(e) = result {
        eprintln!("dusauce: error writing output: {}", e);
        process::exit(1);
    }
}
