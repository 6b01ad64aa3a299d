//! UVM command-line front end
//!
//! Assembles source lists, runs programs and prints disassembly listings.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uvm_assembler::{assemble, assemble_intermediate, assemble_with_listing, parse_source, Listing};
use uvm_runtime::{load_program, write_snapshot, VMConfig, VM};
use uvm_spec::{ProgramFormat, SourceProgram};

#[derive(Parser, Debug)]
#[command(name = "uvm")]
#[command(about = "Assembler and interpreter for the UVM stack machine")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Assemble a source list into a program
    Assemble {
        /// Source file: JSON instruction list, or assembly text for other extensions
        source: PathBuf,

        /// Output program file
        output: PathBuf,

        /// Write the intermediate JSON document instead of binary
        #[arg(long)]
        intermediate: bool,

        /// Print the per-instruction encoding listing
        #[arg(long)]
        test: bool,
    },

    /// Run a program and print the final machine state
    Run {
        /// Program file
        program: PathBuf,

        /// Program format (default: from the file extension)
        #[arg(long, value_enum)]
        format: Option<FormatArg>,

        /// Data memory size in cells
        #[arg(long, default_value_t = uvm_spec::DEFAULT_MEMORY_SIZE)]
        memory_size: usize,

        /// Code memory capacity in bytes
        #[arg(long, default_value_t = uvm_spec::DEFAULT_CODE_SIZE)]
        code_size: usize,

        /// Step ceiling
        #[arg(long, default_value_t = uvm_spec::DEFAULT_MAX_STEPS)]
        max_steps: u64,

        /// Log every executed instruction
        #[arg(long)]
        trace: bool,

        /// Write a memory snapshot to this path after the run
        #[arg(long)]
        dump: Option<PathBuf>,

        /// First snapshot address
        #[arg(long, default_value_t = 0)]
        dump_start: usize,

        /// Snapshot end address, exclusive
        #[arg(long)]
        dump_end: Option<usize>,
    },

    /// Print the disassembly of a binary program
    Disasm {
        /// Binary program file
        binary: PathBuf,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatArg {
    Binary,
    Intermediate,
}

impl From<FormatArg> for ProgramFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Binary => ProgramFormat::Binary,
            FormatArg::Intermediate => ProgramFormat::Intermediate,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = match cli.command {
        Command::Run { trace: true, .. } => "uvm=info,uvm_runtime=debug",
        _ => "uvm=info",
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Command::Assemble {
            source,
            output,
            intermediate,
            test,
        } => cmd_assemble(&source, &output, intermediate, test),
        Command::Run {
            program,
            format,
            memory_size,
            code_size,
            max_steps,
            trace,
            dump,
            dump_start,
            dump_end,
        } => {
            let config = VMConfig {
                memory_size,
                code_size,
                max_steps,
                trace,
            };
            let format = format
                .map(ProgramFormat::from)
                .unwrap_or_else(|| ProgramFormat::from_path(&program));
            let dump = dump.map(|path| (path, dump_start, dump_end));
            cmd_run(&program, format, config, dump)
        }
        Command::Disasm { binary } => cmd_disasm(&binary),
    }
}

fn read_source(path: &Path) -> Result<SourceProgram> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read source {}", path.display()))?;

    let source = match ProgramFormat::from_path(path) {
        ProgramFormat::Intermediate => SourceProgram::from_json(&text)
            .with_context(|| format!("Invalid source list in {}", path.display()))?,
        ProgramFormat::Binary => parse_source(&text)
            .with_context(|| format!("Invalid assembly text in {}", path.display()))?,
    };
    Ok(source)
}

/// Assemble `source` into the output file contents, plus the listing when `test` is set
fn assemble_outputs(
    source: &SourceProgram,
    source_identifier: String,
    intermediate: bool,
    test: bool,
) -> Result<(Vec<u8>, Option<Listing>)> {
    let listing = if test {
        Some(assemble_with_listing(source)?)
    } else {
        None
    };

    let bytes = match (&listing, intermediate) {
        (_, true) => assemble_intermediate(source, source_identifier)?
            .to_json()?
            .into_bytes(),
        (Some(listing), false) => listing.binary.clone(),
        (None, false) => assemble(source)?,
    };
    Ok((bytes, listing))
}

fn cmd_assemble(source_path: &Path, output: &Path, intermediate: bool, test: bool) -> Result<()> {
    let source = read_source(source_path)?;

    let (bytes, listing) =
        assemble_outputs(&source, source_path.display().to_string(), intermediate, test)?;
    if let Some(listing) = listing {
        println!("{}", listing);
    }

    std::fs::write(output, &bytes)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    info!(
        instructions = source.len(),
        bytes = bytes.len(),
        "assembled {} -> {}",
        source_path.display(),
        output.display()
    );
    Ok(())
}

fn cmd_run(
    path: &Path,
    format: ProgramFormat,
    config: VMConfig,
    dump: Option<(PathBuf, usize, Option<usize>)>,
) -> Result<()> {
    let program = load_program(path, format)
        .with_context(|| format!("Failed to load program {}", path.display()))?;

    let mut vm = VM::new(program, config);
    let result = vm.run();

    println!("Stack: {:?}", result.stack);
    println!("Program counter: {}", result.pc);
    println!("Steps: {}", result.steps);
    println!("Halt: {}", result.halt_reason);
    let preview = &vm.memory().as_slice()[..vm.memory().size().min(20)];
    println!("Memory (first {} cells): {:?}", preview.len(), preview);

    if let Some((dump_path, start, end)) = dump {
        let snapshot = vm.snapshot(start, end);
        write_snapshot(&dump_path, &snapshot)
            .with_context(|| format!("Failed to write snapshot {}", dump_path.display()))?;
        info!(range = %snapshot.range, "snapshot written to {}", dump_path.display());
    }
    Ok(())
}

fn cmd_disasm(path: &Path) -> Result<()> {
    let code = std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    print!("{}", uvm_disassembler::disassemble(&code));
    Ok(())
}
