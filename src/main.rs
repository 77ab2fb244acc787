use anyhow::{bail, Context, Result};
use carnot_qsim::circuit::{self, templates, Circuit};
use carnot_qsim::config::SimConfig;
use carnot_qsim::core::Simulator;
use carnot_qsim::runtime::{self, ExecutionResult};
use clap::{Parser, Subcommand, ValueEnum};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "carnot-qsim", version, about = "Small quantum state-vector simulator")]
struct Cli {
    /// Path to a TOML config file (default: ~/.carnot-qsim/config.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run built-in demonstration circuits
    Demo,
    /// Execute a circuit document and print probabilities and Bloch vectors
    Run {
        file: PathBuf,
        /// Also sample the prepared state this many times
        #[arg(long)]
        shots: Option<usize>,
    },
    /// Print a circuit document as OpenQASM 2.0
    Qasm { file: PathBuf },
    /// Print the Bloch vector of one qubit after running a circuit document
    Bloch {
        file: PathBuf,
        #[arg(long, default_value_t = 0)]
        target: usize,
    },
    /// Emit a built-in template circuit
    Template {
        /// empty | bell | ghz | rxdemo
        name: String,
        #[arg(long, default_value_t = 2)]
        qubits: usize,
        #[arg(long, value_enum, default_value_t = Format::Json)]
        format: Format,
    },
    /// Check the engine against circuits with known answers
    Selftest,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Json,
    Qasm,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config =
        SimConfig::load_or_default(cli.config.as_deref()).context("loading configuration")?;
    init_tracing(&config.log_level);

    match cli.command.unwrap_or(Command::Demo) {
        Command::Demo => run_demos(&config),
        Command::Run { file, shots } => cli_run(&config, &file, shots),
        Command::Qasm { file } => {
            let circuit = load_circuit(&config, &file)?;
            println!("{}", circuit.to_qasm());
            Ok(())
        }
        Command::Bloch { file, target } => cli_bloch(&config, &file, target),
        Command::Template { name, qubits, format } => cli_template(&name, qubits, format),
        Command::Selftest => cli_selftest(&config),
    }
}

fn init_tracing(default_level: &str) {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn load_circuit(config: &SimConfig, path: &Path) -> Result<Circuit> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading circuit document {}", path.display()))?;
    circuit::parse_document(&text, config.max_qubits)
        .with_context(|| format!("parsing circuit document {}", path.display()))
}

fn rng_for(config: &SimConfig) -> StdRng {
    match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

// ── Commands ──────────────────────────────────────────────────────────────

fn cli_run(config: &SimConfig, path: &Path, shots: Option<usize>) -> Result<()> {
    let circuit = load_circuit(config, path)?;
    print!("{circuit}");
    println!();

    let result = runtime::execute(&circuit).context("executing circuit")?;
    print_result(&result, config.tolerance);

    if let Some(shots) = shots {
        let mut rng = rng_for(config);
        let hist = result.shots(shots, &mut rng)?;
        println!("Sampling {shots} shots:");
        for (label, count) in hist.labelled() {
            println!("  |{label}⟩  {count}");
        }
    }
    Ok(())
}

fn cli_bloch(config: &SimConfig, path: &Path, target: usize) -> Result<()> {
    let circuit = load_circuit(config, path)?;
    if target >= circuit.qubits {
        bail!("target qubit {target} out of range for {} qubits", circuit.qubits);
    }
    let result = runtime::execute(&circuit)?;
    println!("q{target}: {}", result.bloch(target));
    Ok(())
}

fn cli_template(name: &str, qubits: usize, format: Format) -> Result<()> {
    let Some(circuit) = templates::by_name(name, qubits) else {
        bail!(
            "unknown template '{name}' (expected one of: {})",
            templates::TEMPLATE_NAMES.join(", ")
        );
    };
    match format {
        Format::Json => println!("{}", circuit.to_document().to_json_pretty()?),
        Format::Qasm => println!("{}", circuit.to_qasm()),
    }
    Ok(())
}

fn cli_selftest(config: &SimConfig) -> Result<()> {
    let results = runtime::run_self_tests(config.tolerance);
    for r in &results {
        println!("{r}");
    }
    if !runtime::all_passed(&results) {
        bail!("self-test failed");
    }
    Ok(())
}

fn print_result(result: &ExecutionResult, threshold: f64) {
    println!("Norm before normalization: {:.6}", result.norm_before);
    println!("Probabilities:");
    for (label, p) in result.significant_states(threshold) {
        println!("  |{label}⟩  {:>7.2}%", p * 100.0);
    }
    println!("Bloch vectors:");
    for (q, b) in result.bloch_all().iter().enumerate() {
        println!("  q{q}: {b}");
    }
    println!();
}

// ── Demos ─────────────────────────────────────────────────────────────────

fn run_demos(config: &SimConfig) -> Result<()> {
    println!("━━━ Demo 1: Superposition ━━━━━━━━━━━━━━━━━━━━━━━━");
    let mut sim = Simulator::new(1);
    sim.h(0);
    sim.print_state();
    println!("Bloch: {}\n", sim.bloch(0));

    println!("━━━ Demo 2: Bell State |Φ+⟩ ━━━━━━━━━━━━━━━━━━━━━");
    let bell = templates::bell();
    print!("{}", bell.to_qasm());
    println!("\n");
    print_result(&runtime::execute(&bell)?, config.tolerance);

    println!("━━━ Demo 3: GHZ State (3 qubits) ━━━━━━━━━━━━━━━━");
    let ghz = templates::ghz(3);
    let mut rng = rng_for(config);
    let hist = runtime::run_shots(&ghz, config.shots, &mut rng)?;
    println!(
        "Sampling {} shots:  |000⟩={}  |111⟩={}  other={}",
        hist.shots,
        hist.count(0),
        hist.count(7),
        hist.shots - hist.count(0) - hist.count(7)
    );
    println!();

    println!("━━━ Demo 4: RX quarter turns ━━━━━━━━━━━━━━━━━━━━━");
    let mut sim = Simulator::new(1);
    for step in 1..=4 {
        sim.rx(0, std::f64::consts::FRAC_PI_2);
        println!(
            "  after {step}×RX(π/2): P(|1⟩) = {:.4}  {}",
            sim.probabilities()[1],
            sim.bloch(0)
        );
    }
    println!();
    Ok(())
}
