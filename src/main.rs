use std::time::{Duration, Instant};
use std::{fs, process};

use clap::Parser;

use chipvm::display::Screen;
use chipvm::keyboard;
use chipvm::sound::Beeper;
use chipvm::timer::TickClock;
use chipvm::{Chip8Error, Emulator, Quirks};

#[derive(Parser)]
#[command(name = "chipvm")]
#[command(about = "A CHIP-8 virtual machine")]
struct Args {
    /// ROM image to run
    rom: String,

    /// Instructions executed per second
    #[arg(long, default_value_t = 700)]
    ips: u32,

    /// Fix the CXNN random stream for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// 8XY6/8XYE shift Vx in place instead of reading Vy
    #[arg(long)]
    shift_in_place: bool,

    /// BNNN jumps to XNN + Vx instead of NNN + V0
    #[arg(long)]
    jump_offset_vx: bool,

    /// Sprites wrap around the screen edge instead of clipping
    #[arg(long)]
    sprite_wrap: bool,
}

fn load(emu: &mut Emulator, path: &str) -> Result<(), Chip8Error> {
    let rom = fs::read(path)?;
    emu.load_rom(&rom)
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let quirks = Quirks {
        shift_in_place: args.shift_in_place,
        jump_offset_vx: args.jump_offset_vx,
        sprite_wrap: args.sprite_wrap,
    };
    let mut emu = match args.seed {
        Some(seed) => Emulator::with_seed(quirks, seed),
        None => Emulator::new(quirks),
    };

    if let Err(err) = load(&mut emu, &args.rom) {
        eprintln!("{}: {err}", args.rom);
        process::exit(1);
    }

    let mut screen = match Screen::new() {
        Ok(screen) => screen,
        Err(err) => {
            eprintln!("display: {err}");
            process::exit(1);
        }
    };
    let beeper = Beeper::new();

    // The CPU and the timers run on independent schedules: instructions
    // against the --ips budget, timer ticks at a fixed 60 Hz.
    let step_period = Duration::from_secs(1) / args.ips.max(1);
    let mut next_step = Instant::now();
    let mut ticks = TickClock::new();

    while screen.is_open() {
        keyboard::latch_keys(&screen.window, &mut emu);

        while Instant::now() >= next_step {
            next_step += step_period;
            if let Err(fault) = emu.step() {
                eprintln!("halted: {fault}");
                process::exit(1);
            }
        }
        for _ in 0..ticks.due() {
            emu.tick_timers();
        }
        beeper.set_active(emu.sound_active());

        if let Err(err) = screen.present(&emu.framebuffer()) {
            eprintln!("display: {err}");
            process::exit(1);
        }
    }
}
