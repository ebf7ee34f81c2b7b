//! PIO state machine simulator CLI.
//!
//! This binary provides a single entry point for dry-running PIO programs. It performs:
//! 1. **Run:** Load a program, stage out-buffer words, drive outside pins, and print the cycle trace.
//! 2. **Check:** Load a program and list its decoded instructions and label table.
//! 3. **Script run:** Execute a Python harness with the `piosim` module injected.

use clap::{Args, Parser, Subcommand};
use pyo3::prelude::*;
use pyo3::types::PyList;
use std::ffi::CString;
use std::io::Write;
use std::process;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use piosim_core::Simulator;
use piosim_core::common::PioError;
use piosim_core::config::Config;
use piosim_core::sim::loader::{self, Program};
use piosim_core::sim::simulator::StopReason;
use piosim_core::stats::STATS_SECTIONS;

#[derive(Parser, Debug)]
#[command(
    name = "piosim",
    author,
    version,
    about = "PIO state machine simulator",
    long_about = "Dry-run a PIO program cycle by cycle, check that it assembles, or run a Python harness.\n\nExamples:\n  piosim run -p tx.pio --word 0xAB --word 0xCD\n  piosim run -p rx.pio --pin 3=1@40 --max-cycles 200\n  piosim check -p tx.pio\n  piosim harness/backscatter.py"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a program until it stalls, drains its out buffer, fails, or hits the cycle limit.
    Run(RunArgs),

    /// Assemble a program and list its decoded instructions and labels.
    Check {
        /// Program text to check.
        #[arg(short, long)]
        program: String,
    },

    /// Run a Python harness with `piosim` injected. Script gets argv as sys.argv.
    Script {
        /// Script path (e.g. harness/backscatter.py).
        path: String,

        /// Arguments for the script (sys.argv[1:]).
        #[arg(allow_hyphen_values = true, trailing_var_arg = true)]
        args: Vec<String>,
    },

    /// `piosim <script.py> [args...]`: shorthand for `script`.
    #[command(external_subcommand)]
    External(Vec<String>),
}

/// Options of the `run` subcommand.
#[derive(Args, Debug)]
struct RunArgs {
    /// Program text to execute.
    #[arg(short, long)]
    program: String,

    /// 32-bit word to stage in the out buffer (decimal, 0x hex, or 0b binary). Repeatable; the first word is shifted out first.
    #[arg(short, long = "word", value_parser = parse_word_arg)]
    words: Vec<u32>,

    /// Outside pin level as `<idx>=<0|1>`, optionally `@<cycle>` to apply it later. Repeatable.
    #[arg(long = "pin", value_parser = parse_pin_arg)]
    pins: Vec<PinArg>,

    /// Stop after this many cycles (overrides `general.max_cycles`).
    #[arg(long)]
    max_cycles: Option<u64>,

    /// JSON configuration file.
    #[arg(short, long)]
    config: Option<String>,

    /// Do not print the per-cycle trace.
    #[arg(short, long)]
    quiet: bool,

    /// Print the machine state when the run ends.
    #[arg(long)]
    dump_state: bool,

    /// Statistics sections to print (summary, cycles, instruction_mix, control). Default: all.
    #[arg(long = "stats", value_parser = clap::builder::PossibleValuesParser::new(STATS_SECTIONS.iter().copied()))]
    stats: Vec<String>,
}

/// A `--pin` argument: level to drive and, optionally, when.
#[derive(Clone, Copy, Debug)]
struct PinArg {
    pin: u32,
    level: bool,
    cycle: u64,
}

fn parse_word_arg(text: &str) -> Result<u32, String> {
    loader::parse_word(text).ok_or_else(|| format!("`{text}` is not a 32-bit word"))
}

fn parse_pin_arg(text: &str) -> Result<PinArg, String> {
    let (assignment, cycle) = match text.split_once('@') {
        Some((assignment, cycle)) => (
            assignment,
            cycle
                .parse()
                .map_err(|_| format!("`{cycle}` is not a cycle number"))?,
        ),
        None => (text, 0),
    };
    let (pin, level) = assignment
        .split_once('=')
        .ok_or_else(|| format!("expected <idx>=<0|1>, got `{text}`"))?;
    let pin = pin
        .parse()
        .map_err(|_| format!("`{pin}` is not a pin index"))?;
    let level = match level {
        "0" => false,
        "1" => true,
        _ => return Err(format!("pin level must be 0 or 1, got `{level}`")),
    };
    Ok(PinArg { pin, level, cycle })
}

fn main() {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Run(args)) => cmd_run(&args),
        Some(Commands::Check { program }) => cmd_check(&program),
        Some(Commands::Script { path, args }) => run_python_script(&path, args),
        Some(Commands::External(argv)) => match argv.split_first() {
            Some((script, rest)) if script.ends_with(".py") => {
                run_python_script(script, rest.to_vec());
            }
            _ => {
                let name = argv.first().map_or("", String::as_str);
                eprintln!("error: unrecognized subcommand '{name}'");
                eprintln!("  piosim --help  for full options");
                process::exit(2);
            }
        },
        None => {
            eprintln!("PIO Simulator - pass a subcommand or a .py script");
            eprintln!();
            eprintln!("  piosim run -p <program> [--word W]...   Run a program");
            eprintln!("  piosim check -p <program>               Assemble and list");
            eprintln!("  piosim <script.py> [args...]            Run a Python harness");
            eprintln!("  piosim script <script.py>               Same, explicit subcommand");
            eprintln!();
            eprintln!("  piosim --help  for full options");
            process::exit(1);
        }
    }
}

/// Installs a `fmt` subscriber filtered by `RUST_LOG`, defaulting to warnings only.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Reads a file or exits with a message naming it.
fn read_or_exit(path: &str, what: &str) -> String {
    loader::read_program(path).unwrap_or_else(|e| {
        eprintln!("Error reading {what} {path}: {e}");
        process::exit(1);
    })
}

/// Loads the JSON config file, or the defaults when none is given.
fn load_config(path: Option<&str>) -> Config {
    let Some(path) = path else {
        return Config::default();
    };
    let text = read_or_exit(path, "config");
    serde_json::from_str(&text).unwrap_or_else(|e| {
        eprintln!("Invalid config {path}: {e}");
        process::exit(1);
    })
}

/// Runs a program and prints its trace, then the statistics.
///
/// A run that ends because the out buffer is fully drained is the normal end of a
/// transmission and exits with code 0. Any other error dumps the state and exits with 1.
fn cmd_run(args: &RunArgs) {
    let config = load_config(args.config.as_deref());
    let source = read_or_exit(&args.program, "program");

    let mut sim = Simulator::load(&source, &args.words, &config).unwrap_or_else(|e| {
        eprintln!("{}: {e}", args.program);
        process::exit(1);
    });
    for pin in &args.pins {
        debug!(pin = pin.pin, level = pin.level, cycle = pin.cycle, "pin scheduled");
        sim.schedule_pin(pin.cycle, pin.pin, pin.level);
    }
    info!(program = %args.program, words = args.words.len(), "run started");

    println!("[*] Program: {} ({} lines)", args.program, sim.state.program().len());
    println!(
        "    words={}  bits={}  max_delay={}",
        args.words.len(),
        sim.state.out_buffer.len(),
        config.assembler.max_delay
    );
    println!();

    let quiet = args.quiet;
    let result = sim.run_with(args.max_cycles, |trace| {
        if !quiet {
            println!("{trace}");
        }
    });

    let code = match result {
        Ok(outcome) => {
            info!(cycles = outcome.cycles, reason = ?outcome.reason, "run stopped");
            match outcome.reason {
                StopReason::CycleLimit => {
                    println!("\n[*] Cycle limit reached after {} cycles", outcome.cycles);
                }
                StopReason::Stalled => {
                    println!("\n[*] Stalled on WAIT after {} cycles", outcome.cycles);
                }
            }
            0
        }
        Err(e) if matches!(e.kind, PioError::BufferUnderflow { available: 0, .. }) => {
            info!(cycle = e.cycle, "out buffer drained");
            println!("\n[*] Out buffer drained at cycle {}", e.cycle);
            0
        }
        Err(e) => {
            eprintln!("\n[!] {e}");
            sim.state.dump_state();
            1
        }
    };

    if args.dump_state && code == 0 {
        sim.state.dump_state();
    }
    sim.stats.print_sections(&args.stats);
    let _ = std::io::stdout().flush();
    process::exit(code);
}

/// Assembles a program and lists every line with its index, then the label table.
fn cmd_check(path: &str) {
    let source = read_or_exit(path, "program");
    let program = Program::parse(&source).unwrap_or_else(|e| {
        eprintln!("{path}: {e}");
        process::exit(1);
    });

    for (index, instruction) in program.instructions().iter().enumerate() {
        println!("{index:>4}  {instruction}");
    }
    println!();
    println!("labels:");
    for (name, index) in program.labels().iter() {
        println!("  {name:<20} {index}");
    }
}

/// Runs a Python script with `piosim` injected into `sys.modules` and `sys.argv` set.
///
/// The script is executed as `__main__`. Exits the process with code 1 on script error or missing file.
///
/// # Arguments
///
/// * `script_path` - Path to the `.py` file.
/// * `script_args` - Arguments passed as `sys.argv[1:]`.
fn run_python_script(script_path: &str, script_args: Vec<String>) {
    let script_content = read_or_exit(script_path, "script");

    let result = Python::with_gil(|py| -> PyResult<()> {
        let sys = py.import("sys")?;
        let path = sys.getattr("path")?;
        let _ = path.call_method1("append", (".",))?;

        let m = PyModule::new(py, "piosim")?;
        piosim_py::register_piosim_module(&m)?;
        sys.getattr("modules")?.set_item("piosim", m)?;

        let mut full_args = vec![script_path.to_string()];
        full_args.extend(script_args);
        sys.setattr("argv", PyList::new(py, &full_args)?)?;

        let to_c = |s: &str| {
            CString::new(s).map_err(|e| pyo3::exceptions::PyValueError::new_err(e.to_string()))
        };
        let code_c = to_c(&script_content)?;
        let file_c = to_c(script_path)?;
        let name_c = to_c("__main__")?;

        let _ = PyModule::from_code(py, &code_c, &file_c, &name_c)?;
        Ok(())
    });

    if let Err(e) = result {
        Python::with_gil(|py| e.print(py));
        process::exit(1);
    }
}
