use clap::{Parser, ValueEnum};
use colored::Colorize;
use elevator_fsm::{
    Elevator, ElevatorError, Variant,
    observers::{DetailedView, StatusView, TransitionLogger},
    scenario::{self, Step, Transcript, TranscriptEntry},
    trigger, visualization,
};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Which elevator flavour to drive
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum VariantArg {
    /// Bare state machine
    Classic,
    /// State machine as the model of an MVC trio, with two console views
    Mvc,
}

impl From<VariantArg> for Variant {
    fn from(arg: VariantArg) -> Self {
        match arg {
            VariantArg::Classic => Self::Classic,
            VariantArg::Mvc => Self::Mvc,
        }
    }
}

/// How to print the transcript
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Colored narrative
    Text,
    /// JSON transcript on stdout
    Json,
}

/// Command-line arguments for the elevator demo
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Elevator variant to run
    #[arg(long, value_enum, default_value_t = VariantArg::Classic)]
    variant: VariantArg,

    /// Run these triggers instead of the scripted demo, e.g. "call 5, load, unload"
    #[arg(short, long)]
    script: Option<String>,

    /// Output format of the transcript
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Write a DOT graph of the machine to this file
    #[arg(long)]
    dot: Option<String>,

    /// Print the transition history table at the end
    #[arg(long)]
    history: bool,

    /// Enable verbose output with detailed transition logs
    #[arg(short, long)]
    verbose: bool,
}

/// Install the tracing subscriber; logs go to stderr so stdout stays a transcript
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    if let Err(err) = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
    {
        eprintln!("failed to initialise logging: {err}");
    }
}

/// Print one transcript entry
fn print_entry(entry: &TranscriptEntry) {
    let status = format!(
        "{} -> {} (floor {}, overloaded {})",
        entry.from, entry.after.state, entry.after.floor, entry.after.overloaded
    );
    let status = if entry.from == entry.after.state { status.normal() } else { status.cyan() };
    println!("  {} {}", format!("[{}]", entry.action).yellow(), entry.message);
    println!("  {status}");
}

/// Run the steps, printing each one as it happens
fn run_text(elevator: &mut Elevator, steps: &[Step]) -> Transcript {
    let mut transcript = Transcript::default();
    for (i, step) in steps.iter().enumerate() {
        println!("\n{}", format!("[Step {}] {}", i.saturating_add(1), step.caption).bold());
        let entry = scenario::run_step(elevator, step);
        print_entry(&entry);
        transcript.entries.push(entry);
    }
    transcript
}

fn main() -> Result<(), ElevatorError> {
    let args = Args::parse();
    init_logging(args.verbose);

    let variant = Variant::from(args.variant);
    let steps = match &args.script {
        Some(script) => scenario::script_steps(&trigger::parse_script(script)?),
        None => match variant {
            Variant::Classic => scenario::classic_scenario(),
            Variant::Mvc => scenario::mvc_scenario(),
        },
    };

    let mut elevator = Elevator::new(variant);
    elevator.subscribe(Box::new(TransitionLogger::default()));
    if variant == Variant::Mvc && args.format == Format::Text {
        elevator.subscribe(Box::new(StatusView));
        elevator.subscribe(Box::new(DetailedView));
    }
    info!(?variant, steps = steps.len(), "starting elevator run");

    match args.format {
        Format::Text => {
            let title = match variant {
                Variant::Classic => "--- Elevator System (State Machine) ---",
                Variant::Mvc => "--- Elevator System (MVC) ---",
            };
            println!("{}", title.green().bold());
            println!("Initial state: {elevator}");

            let transcript = run_text(&mut elevator, &steps);
            if let Some(state) = transcript.final_state() {
                println!("\n{} {state}", "Final state:".green().bold());
            }
        }
        Format::Json => {
            let transcript = scenario::run(&mut elevator, &steps);
            println!("{}", serde_json::to_string_pretty(&transcript)?);
        }
    }

    if args.history {
        println!("\n{}", visualization::history_table(elevator.history()));
        for (state, count) in visualization::visit_counts(elevator.history()) {
            println!("  {state}: {count} times");
        }
    }

    if let Some(path) = &args.dot {
        let dot = visualization::generate_dot(&elevator);
        visualization::save_dot_to_file(&dot, path)?;
        info!(path = %path, "DOT graph written");
    }

    Ok(())
}
