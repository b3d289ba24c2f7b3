use clap::Parser;
use std::error::Error;
use std::path::PathBuf;
use std::process;

use penrose::{
    decode, frame_line, programs, resolve_input, run, table_listing, Output, RunConfig, Verbosity,
    DEFAULT_MAX_STEPS, DEFAULT_MAX_TAPE_LEN,
};

/// Execute a Penrose-style Turing machine as described in "The Emperor's
/// New Mind". The machine specification (using Penrose's encoding) and the
/// initial tape can be given inline or via a file, with the file taking
/// precedence.
///
/// If no tape is given, the decoded specification is printed in the format
/// used by Penrose, except that state numbers are printed in hexadecimal
/// instead of binary. With a tape, the verbosity level controls the output.
#[derive(Parser)]
#[clap(author, version, about, long_about = None, arg_required_else_help = true)]
struct Cli {
    /// Turing machine specification
    #[clap(short = 'm', long = "tm", value_name = "TM")]
    tm: Option<String>,

    /// Read the Turing machine specification from a file
    #[clap(long, value_name = "FILE")]
    tm_file: Option<PathBuf>,

    /// Run a built-in machine by name (see --list-programs)
    #[clap(short, long, value_name = "NAME", conflicts_with_all = ["tm", "tm_file"])]
    program: Option<String>,

    /// List the built-in machines and exit
    #[clap(long)]
    list_programs: bool,

    /// Initial tape
    #[clap(short, long, value_name = "TAPE")]
    tape: Option<String>,

    /// Read the initial tape from a file
    #[clap(long, value_name = "FILE")]
    tape_file: Option<PathBuf>,

    /// Stop if the number of cells in the working tape exceeds N
    #[clap(long, value_name = "N", default_value_t = DEFAULT_MAX_TAPE_LEN)]
    max_tape_length: usize,

    /// Stop if the number of machine steps exceeds N
    #[clap(long, value_name = "N", default_value_t = DEFAULT_MAX_STEPS)]
    max_steps: u64,

    /// Verbosity (repeat for more, e.g. -vv for a frame per step)
    #[clap(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    if let Err(e) = try_main(Cli::parse()) {
        eprintln!("{e}");
        process::exit(1);
    }
}

fn try_main(cli: Cli) -> Result<(), Box<dyn Error>> {
    if cli.list_programs {
        for program in programs::PROGRAMS.iter() {
            println!("{:<12} {}", program.name, program.description);
        }
        return Ok(());
    }

    let spec = match &cli.program {
        Some(name) => Some(
            programs::find(name)
                .ok_or_else(|| format!("no built-in machine named {name}"))?
                .encoding
                .to_string(),
        ),
        None => resolve_input(cli.tm.as_deref(), cli.tm_file.as_deref())?,
    };
    let spec = spec.ok_or("a Turing machine specification is required (--tm, --tm-file or --program)")?;

    let table = decode(&spec)?;

    let tape = resolve_input(cli.tape.as_deref(), cli.tape_file.as_deref())?;
    let Some(tape) = tape else {
        print!("{}", table_listing(&table));
        return Ok(());
    };

    if cli.max_tape_length == 0 {
        return Err("maximum tape length must be a positive integer".into());
    }
    if cli.max_steps == 0 {
        return Err("maximum number of steps must be a positive integer".into());
    }

    let config = RunConfig {
        max_tape_len: cli.max_tape_length,
        max_steps: cli.max_steps,
        verbosity: Verbosity::from_level(cli.verbose),
    };

    match run(&table, &tape, &config)? {
        Output::Tape(final_tape) => println!("{final_tape}"),
        Output::Trace(frames) => {
            for frame in &frames {
                println!("{}", frame_line(frame));
            }
        }
    }

    Ok(())
}
