//! `shifts` CLI — split a work shift into sub-shifts from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Split 22:00-06:00 into 8 shifts of 1 hour
//! shifts split --start 22:00 --end 06:00 -n 8
//!
//! # No exact split: print the three alternatives, first shift gets +10 min
//! shifts split --start 22:00 --end 06:00 -n 9 --first-extra 10
//!
//! # Machine-readable output
//! shifts split --start 22:00 --end 06:00 -n 9 --format json
//!
//! # One shift per present name in the pool, shuffled, two names per shift
//! shifts roster add Dana Eli Noa Tal
//! shifts split --start 22:00 --end 06:00 --from-roster --pairing --auto --seed 7
//!
//! # Minute-level split ignoring the 5-minute grid
//! shifts direct --start 22:00 --end 06:00 -n 9
//!
//! # Snap a time to the grid
//! shifts round 22:03
//! ```

mod store;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use rand::rngs::StdRng;
use rand::SeedableRng;
use shift_engine::roster::pair_names;
use shift_engine::{
    assign_names, auto_shift_count, direct_split, partition, render_outcome, render_partition,
    round_clock_time, AssignmentMode, ClockTime, Granularity, Interval, Language,
    PartitionReport, PartitionRequest,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "shifts",
    version,
    about = "Split a work shift into equal sub-shifts"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Name pool file
    #[arg(long, global = true, env = "SHIFTS_ROSTER", default_value = "roster.json")]
    roster: PathBuf,

    /// Log decisions to stderr (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Split into equal, grid-aligned shifts, or list the alternatives
    Split {
        #[command(flatten)]
        interval: IntervalArgs,
        #[command(flatten)]
        assign: AssignArgs,
        /// Minutes added to the first shift in the "maximize" alternative
        #[arg(long)]
        first_extra: Option<u32>,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Split to the minute, ignoring the grid
    Direct {
        #[command(flatten)]
        interval: IntervalArgs,
        #[command(flatten)]
        assign: AssignArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Snap a time of day to the nearest grid mark
    Round {
        /// Time as HH:MM
        time: String,
        /// Grid step in minutes
        #[arg(long, default_value_t = 5)]
        granularity: u32,
    },
    /// Edit the name pool
    Roster {
        #[command(subcommand)]
        action: RosterAction,
    },
}

#[derive(Args)]
struct IntervalArgs {
    /// Shift start as HH:MM
    #[arg(long)]
    start: String,
    /// Shift end as HH:MM (at or before start means the next day)
    #[arg(long)]
    end: String,
    /// Grid step in minutes
    #[arg(long, default_value_t = 5)]
    granularity: u32,
    /// Snap start and end to the grid first
    #[arg(long)]
    snap: bool,
}

#[derive(Args)]
struct AssignArgs {
    /// Number of shifts
    #[arg(
        short = 'n',
        long,
        value_parser = clap::value_parser!(u32).range(1..=1440),
        required_unless_present = "auto"
    )]
    count: Option<u32>,
    /// Derive the number of shifts from the names
    #[arg(long, conflicts_with = "count")]
    auto: bool,
    /// Comma-separated names, assigned in order
    #[arg(long, value_delimiter = ',')]
    names: Vec<String>,
    /// Take present names from the name pool (always shuffled)
    #[arg(long, conflicts_with = "names")]
    from_roster: bool,
    /// Two names per shift
    #[arg(long)]
    pairing: bool,
    /// Shuffle the names before assigning
    #[arg(long)]
    shuffle: bool,
    /// Seed for shuffling (implies --shuffle)
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Args)]
struct OutputArgs {
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
    /// Language for text output: en or he
    #[arg(long, default_value = "en")]
    lang: Language,
    /// Output file (writes to stdout if omitted)
    #[arg(short, long)]
    output: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Tab-separated tables, ready to paste
    Text,
    Json,
}

#[derive(Subcommand)]
enum RosterAction {
    /// Show every name, present ones marked [x]
    List,
    /// Add names (present)
    Add {
        #[arg(required = true)]
        names: Vec<String>,
    },
    /// Remove a name
    Remove { name: String },
    /// Mark a name present
    Present { name: String },
    /// Mark a name absent
    Absent { name: String },
    /// Flip a name's presence
    Toggle { name: String },
    /// Remove every name
    Clear,
}

/// Labels to put on segments, plus how many people they seat.
struct Assignment {
    people: usize,
    labels: Vec<String>,
    mode: AssignmentMode,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Split {
            interval,
            assign,
            first_extra,
            output,
        } => {
            let (span, granularity) = resolve_interval(&interval)?;
            let assignment = resolve_names(&assign, &cli.roster)?;
            let shift_count = resolve_count(&assign, &assignment)?;

            let request = PartitionRequest::new(span, shift_count)
                .with_granularity(granularity)
                .with_names(assignment.labels);
            let outcome = partition(&request).context("Failed to partition shift")?;

            let rendered = match output.format {
                OutputFormat::Text => render_outcome(&outcome, first_extra, output.lang)?,
                OutputFormat::Json => {
                    let report = PartitionReport::new(&outcome, first_extra)?;
                    serde_json::to_string_pretty(&report)? + "\n"
                }
            };
            write_output(output.output.as_deref(), &rendered)?;
        }
        Commands::Direct {
            interval,
            assign,
            output,
        } => {
            let (span, _) = resolve_interval(&interval)?;
            let assignment = resolve_names(&assign, &cli.roster)?;
            let shift_count = resolve_count(&assign, &assignment)?;

            let split = direct_split(span, shift_count, &assignment.labels)
                .context("Failed to split shift")?;

            let rendered = match output.format {
                OutputFormat::Text => render_partition(&split, output.lang),
                OutputFormat::Json => {
                    serde_json::to_string_pretty(&PartitionReport::single(split))? + "\n"
                }
            };
            write_output(output.output.as_deref(), &rendered)?;
        }
        Commands::Round { time, granularity } => {
            let granularity = Granularity::new(granularity)?;
            let time: ClockTime = time.parse()?;
            println!("{}", round_clock_time(time, granularity));
        }
        Commands::Roster { action } => run_roster(action, &cli.roster)?,
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with_writer(std::io::stderr)
        .init();
}

/// Parse start and end, snapping them to the grid when asked.
fn resolve_interval(args: &IntervalArgs) -> Result<(Interval, Granularity)> {
    let granularity = Granularity::new(args.granularity)?;
    let mut interval = Interval::parse(&args.start, &args.end)?;
    if args.snap {
        let snapped = Interval::new(
            round_clock_time(interval.start, granularity),
            round_clock_time(interval.end, granularity),
        );
        if snapped != interval {
            tracing::info!(
                from = %format!("{}-{}", interval.start, interval.end),
                to = %format!("{}-{}", snapped.start, snapped.end),
                "snapped interval to grid"
            );
        }
        interval = snapped;
    }
    Ok((interval, granularity))
}

fn resolve_names(args: &AssignArgs, roster: &Path) -> Result<Assignment> {
    let mode = if args.pairing {
        AssignmentMode::Paired
    } else {
        AssignmentMode::Single
    };

    let (names, shuffle) = if args.from_roster {
        (store::load(roster)?.present_names(), true)
    } else {
        let names: Vec<String> = args
            .names
            .iter()
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .collect();
        (names, args.shuffle || args.seed.is_some())
    };

    let labels = if shuffle {
        let mut rng = match args.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        assign_names(&names, mode, &mut rng)
    } else if mode == AssignmentMode::Paired {
        pair_names(&names)
    } else {
        names.clone()
    };

    Ok(Assignment {
        people: names.len(),
        labels,
        mode,
    })
}

fn resolve_count(args: &AssignArgs, assignment: &Assignment) -> Result<u32> {
    if args.auto {
        let count = auto_shift_count(assignment.people, assignment.mode);
        tracing::debug!(people = assignment.people, count, "derived shift count from names");
        return Ok(count);
    }
    args.count
        .context("--count is required unless --auto is given")
}

fn run_roster(action: RosterAction, path: &Path) -> Result<()> {
    let mut pool = store::load(path)?;

    match action {
        RosterAction::List => {
            for entry in pool.entries() {
                let mark = if entry.present { 'x' } else { ' ' };
                println!("[{}] {}", mark, entry.name);
            }
            return Ok(());
        }
        RosterAction::Add { names } => {
            for name in &names {
                pool.add(name)
                    .with_context(|| format!("Failed to add {:?}", name))?;
            }
            println!("Added {} name(s)", names.len());
        }
        RosterAction::Remove { name } => {
            let removed = pool.remove(&name)?;
            println!("Removed {}", removed.name);
        }
        RosterAction::Present { name } => {
            pool.set_present(&name, true)?;
            println!("{} is present", name.trim());
        }
        RosterAction::Absent { name } => {
            pool.set_present(&name, false)?;
            println!("{} is absent", name.trim());
        }
        RosterAction::Toggle { name } => {
            let present = pool.toggle(&name)?;
            let state = if present { "present" } else { "absent" };
            println!("{} is {}", name.trim(), state);
        }
        RosterAction::Clear => {
            pool.clear();
            println!("Cleared name pool");
        }
    }

    store::save(path, &pool)
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}
