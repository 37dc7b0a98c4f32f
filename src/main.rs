use clap::{Args, Parser, Subcommand, ValueEnum};
use sqrt_pyramid::graph::Pyramid;
use sqrt_pyramid::model::{self, Status};
use sqrt_pyramid::puzzle::{self, KnownSpec, PuzzleSpec};
use sqrt_pyramid::render;
use sqrt_pyramid::solve::{self, Order};
use tracing_subscriber::EnvFilter;

pub type Result<T> = anyhow::Result<T>;

#[derive(Parser)]
#[command(name = "sqrt-pyramid")]
#[command(about = "Fill in a square-root pyramid from a few known blocks", long_about = None)]
struct Cli {
    /// Log more (-v debug, -vv trace). RUST_LOG takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve a puzzle given as a file and/or known slots.
    Solve {
        /// JSON puzzle file.
        #[arg(long)]
        puzzle: Option<String>,

        /// Pyramid depth (required without a puzzle file).
        #[arg(long)]
        rows: Option<usize>,

        /// Known slot as ROW,COL=VALUE; repeatable.
        #[arg(short, long = "known")]
        known: Vec<String>,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// Solve the built-in worked example.
    Example {
        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(Args)]
struct OutputArgs {
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Fixed number of decimals in text output.
    #[arg(long)]
    precision: Option<usize>,

    /// Draw the pyramid after every sweep that deduced something.
    #[arg(long)]
    steps: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.cmd {
        Commands::Solve {
            puzzle,
            rows,
            known,
            output,
        } => {
            // 1) Merge the puzzle file with command-line overrides.
            let mut spec = match &puzzle {
                Some(path) => puzzle::load_puzzle_file(path)?,
                None => PuzzleSpec::default(),
            };
            if rows.is_some() {
                spec.rows = rows;
            }
            let seeds = puzzle::parse_seeds(known.as_slice())?;
            spec.known.extend(seeds.into_iter().map(KnownSpec::from));

            // 2) Build, propagate, report.
            let pyramid = spec.validate_and_build()?;
            run(pyramid, &output)?;
        }
        Commands::Example { output } => {
            let pyramid = puzzle::worked_example().validate_and_build()?;
            run(pyramid, &output)?;
        }
    }

    Ok(())
}

fn init_tracing(verbose: u8) {
    let fallback = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(mut pyramid: Pyramid, output: &OutputArgs) -> Result<()> {
    let text = output.format == Format::Text;

    if text {
        println!("\nProblem:");
        print!("{}", render::render_pyramid(&pyramid, output.precision));
    }

    let mut sweep_no = 0;
    let convergence = solve::propagate_with(&mut pyramid, |p, sweep| {
        sweep_no += 1;
        if text && output.steps && !sweep.is_stable() {
            let order = match sweep.order {
                Order::TopDown => "top-down",
                Order::BottomUp => "bottom-up",
            };
            println!(
                "\nAfter sweep {} ({}, {} deduced):",
                sweep_no,
                order,
                sweep.assignments.len()
            );
            print!("{}", render::render_pyramid(p, output.precision));
        }
    })?;

    let data = model::build_report_data(&pyramid, &convergence);
    if !text {
        println!("{}", render::render_json_report(&data)?);
        return Ok(());
    }

    match data.status {
        Status::Solved => println!("\nSolution:"),
        Status::Partial => println!("\nPartial solution:"),
    }
    print!("{}", render::render_pyramid(&pyramid, output.precision));
    println!(
        "\n{} deduced in {} sweeps; {} of {} slots unknown",
        data.totals.deduced, data.totals.sweeps, data.totals.unknown, data.totals.slots
    );
    for bad in &data.inconsistencies {
        tracing::warn!(
            parent = %bad.parent,
            expected = bad.expected,
            actual = bad.actual,
            "seeded values contradict each other"
        );
    }
    Ok(())
}
