use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use log::info;

use qch8::diagnostics::{dump_frame, dump_memory, dump_registers};
use qch8::Chip8;

#[cfg(feature = "window")]
mod display;
#[cfg(feature = "window")]
mod keymap;
mod run;

#[derive(Parser, Debug)]
#[command(name = "chip8")]
#[command(about = "Runs a CHIP-8 ROM", long_about = None)]
struct Args {
    /// Path to a raw CHIP-8 ROM
    rom: PathBuf,

    /// Seed for the machine's random numbers; drawn from the OS when absent
    #[arg(long)]
    seed: Option<u64>,

    /// Logical steps to run before stopping (headless only)
    #[arg(long, default_value_t = 600)]
    steps: usize,

    /// Logical steps per second
    #[arg(long, default_value_t = qch8::constants::TIMER_HZ)]
    hz: u32,

    /// Pace steps in real time instead of running flat out
    #[arg(long, action = ArgAction::SetTrue)]
    realtime: bool,

    /// Print the display when the run ends
    #[arg(long, action = ArgAction::SetTrue)]
    dump_frame: bool,

    /// Print the registers when the run ends
    #[arg(long, action = ArgAction::SetTrue)]
    dump_registers: bool,

    /// Show registers as characters rather than hex
    #[arg(long, action = ArgAction::SetTrue)]
    ascii: bool,

    /// Print a hex dump of memory when the run ends
    #[arg(long, action = ArgAction::SetTrue)]
    dump_memory: bool,

    /// Open a window and take input from the keyboard
    #[cfg(feature = "window")]
    #[arg(long, action = ArgAction::SetTrue)]
    window: bool,

    /// Size of one CHIP-8 pixel in the window
    #[cfg(feature = "window")]
    #[arg(long, default_value_t = 10)]
    scale: u32,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let rom = fs::read(&args.rom)
        .with_context(|| format!("unable to read ROM {}", args.rom.display()))?;
    let mut chip8 = match args.seed {
        Some(seed) => Chip8::with_seed(seed),
        None => Chip8::new(),
    };
    chip8
        .load_rom(&rom)
        .with_context(|| format!("unable to load ROM {}", args.rom.display()))?;
    info!("loaded {} ({} bytes)", args.rom.display(), rom.len());

    let options = run::Options {
        steps: args.steps,
        hz: args.hz,
        realtime: args.realtime,
    };
    // dumps are printed even when the machine stopped on an error
    let outcome = launch(&mut chip8, &args, &options);

    if args.dump_frame {
        println!("{}", dump_frame(chip8.frame()));
    }
    if args.dump_registers {
        println!("{}", dump_registers(chip8.state(), args.ascii));
    }
    if args.dump_memory {
        print!("{}", dump_memory(chip8.state()));
    }

    outcome
}

#[cfg(feature = "window")]
fn launch(chip8: &mut Chip8, args: &Args, options: &run::Options) -> Result<()> {
    if args.window {
        run::run_window(chip8, options, args.scale)
    } else {
        run::run_headless(chip8, options)
    }
}

#[cfg(not(feature = "window"))]
fn launch(chip8: &mut Chip8, _args: &Args, options: &run::Options) -> Result<()> {
    run::run_headless(chip8, options)
}
