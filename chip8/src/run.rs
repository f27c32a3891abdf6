use std::thread;
use std::time::Instant;

use anyhow::{Context, Result};
use log::info;

use qch8::{Chip8, FixedTimestep};

pub struct Options {
    /// Step budget for headless runs
    pub steps: usize,
    /// Logical steps per second
    pub hz: u32,
    /// Whether headless runs are paced in real time
    pub realtime: bool,
}

fn step(chip8: &mut Chip8) -> Result<()> {
    chip8
        .step()
        .with_context(|| format!("machine stopped at {:04X}", chip8.state().pc))?;
    Ok(())
}

/// Runs with no display or input until halted or out of steps
pub fn run_headless(chip8: &mut Chip8, options: &Options) -> Result<()> {
    let taken = if options.realtime {
        run_realtime(chip8, options)?
    } else {
        chip8
            .run(options.steps)
            .with_context(|| format!("machine stopped at {:04X}", chip8.state().pc))?
    };
    info!(
        "ran {} steps, {}",
        taken,
        if chip8.is_halted() { "halted" } else { "out of steps" }
    );
    Ok(())
}

/// Feeds wall clock time through a fixed timestep so steps happen at `hz`
fn run_realtime(chip8: &mut Chip8, options: &Options) -> Result<usize> {
    let mut timestep = FixedTimestep::from_hz(options.hz);
    let mut last_cycle = Instant::now();
    let mut taken = 0;

    while taken < options.steps && !chip8.is_halted() {
        let current_time = Instant::now();
        let due = timestep.advance(current_time - last_cycle);
        last_cycle = current_time;

        for _ in 0..due {
            if taken == options.steps || chip8.is_halted() {
                break;
            }
            step(chip8)?;
            taken += 1;
        }

        thread::sleep(timestep.step().saturating_sub(timestep.pending()));
    }
    Ok(taken)
}

/// Runs in an SDL2 window until it's closed or the machine halts
#[cfg(feature = "window")]
pub fn run_window(chip8: &mut Chip8, options: &Options, scale: u32) -> Result<()> {
    use sdl2::event::Event;
    use sdl2::keyboard::Keycode;

    use crate::display::Display;
    use crate::keymap::keymap;

    let sdl = sdl2::init().map_err(anyhow::Error::msg)?;
    let mut display = Display::new(&sdl, scale)?;
    let mut events = sdl.event_pump().map_err(anyhow::Error::msg)?;
    display.render(chip8.frame())?;

    let mut timestep = FixedTimestep::from_hz(options.hz);
    let mut last_cycle = Instant::now();

    'event: loop {
        // Handle input
        for event in events.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => break 'event,
                Event::KeyDown {
                    keycode: Some(key), ..
                } => {
                    if let Some(kc) = keymap(key) {
                        chip8.key_press(kc);
                    }
                }
                Event::KeyUp {
                    keycode: Some(key), ..
                } => {
                    if let Some(kc) = keymap(key) {
                        chip8.key_release(kc);
                    }
                }
                _ => continue,
            };
        }

        // Update state
        let current_time = Instant::now();
        for _ in 0..timestep.advance(current_time - last_cycle) {
            step(chip8)?;
        }
        last_cycle = current_time;

        // If the draw flag is set, unset it and render the current frame
        if let Some(frame) = chip8.take_frame() {
            display.render(&frame)?;
        }
        if chip8.is_halted() {
            info!("machine halted, closing window");
            break 'event;
        }

        thread::sleep(timestep.step().saturating_sub(timestep.pending()));
    }
    Ok(())
}
