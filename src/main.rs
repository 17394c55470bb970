//! NES emulator entry point.
//!
//! Loads a cartridge and runs it in a window, or headless for a fixed number of frames.
//! Usage: tandem [OPTIONS] <ROM>

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::{LevelFilter, error, info};
use minifb::{Key, Scale, Window, WindowOptions};
use tandem::{Button, Cartridge, CartridgeError, Console, FRAME_HEIGHT, FRAME_WIDTH};

const KEY_MAP: [(Key, Button); 9] = [
    (Key::Up, Button::Up),
    (Key::Down, Button::Down),
    (Key::Left, Button::Left),
    (Key::Right, Button::Right),
    (Key::Z, Button::A),
    (Key::X, Button::B),
    (Key::RightShift, Button::Select),
    (Key::Backspace, Button::Select),
    (Key::Enter, Button::Start),
];

#[derive(Clone, Copy, Debug, ValueEnum)]
enum WindowScale {
    #[value(name = "1")]
    X1,
    #[value(name = "2")]
    X2,
    #[value(name = "4")]
    X4,
    #[value(name = "8")]
    X8,
}

impl From<WindowScale> for Scale {
    fn from(scale: WindowScale) -> Self {
        match scale {
            WindowScale::X1 => Scale::X1,
            WindowScale::X2 => Scale::X2,
            WindowScale::X4 => Scale::X4,
            WindowScale::X8 => Scale::X8,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Tandem NES emulator
#[derive(Parser, Debug)]
#[command(name = "tandem")]
#[command(about = "A cycle-accurate NES emulator", long_about = None)]
struct Args {
    /// Path to the iNES ROM file
    rom: PathBuf,

    /// Window scale factor
    #[arg(long, value_enum, default_value = "2")]
    scale: WindowScale,

    /// Log level; `trace` prints a nestest-format line per instruction
    #[arg(long, value_enum, default_value = "info")]
    log_level: LogLevel,

    /// Start PC in hex instead of the reset vector (e.g. C000 for nestest)
    #[arg(long, value_parser = parse_hex)]
    entry: Option<u16>,

    /// Run this many frames without a window, then exit
    #[arg(long)]
    frames: Option<u64>,
}

#[derive(Debug, thiserror::Error)]
enum AppError {
    #[error(transparent)]
    Cartridge(#[from] CartridgeError),
    #[error("window: {0}")]
    Window(#[from] minifb::Error),
}

fn parse_hex(s: &str) -> Result<u16, String> {
    let digits = s.trim_start_matches("0x").trim_start_matches('$');
    u16::from_str_radix(digits, 16).map_err(|e| format!("invalid address {s:?}: {e}"))
}

fn main() {
    let args = Args::parse();

    if let Err(e) = tandem::logger::init(args.log_level.into()) {
        eprintln!("Failed to install logger: {}", e);
    }

    if let Err(e) = run(&args) {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), AppError> {
    let cart = Cartridge::load(&args.rom)?;
    let mut console = Console::new(cart);
    if let Some(pc) = args.entry {
        console.set_pc(pc);
    }

    match args.frames {
        Some(frames) => run_headless(&mut console, frames),
        None => run_window(&mut console, args.scale.into())?,
    }
    Ok(())
}

fn run_headless(console: &mut Console, frames: u64) {
    for _ in 0..frames {
        console.run_frame();
    }
    let cpu = console.cpu();
    info!(
        "ran {} frames, PC=${:04X} A:{:02X} X:{:02X} Y:{:02X} P:{:02X} SP:{:02X} CYC:{}",
        console.frame_count(),
        cpu.pc,
        cpu.a,
        cpu.x,
        cpu.y,
        cpu.status,
        cpu.sp,
        cpu.cycles
    );
}

fn run_window(console: &mut Console, scale: Scale) -> Result<(), AppError> {
    let mut window = Window::new(
        "Tandem",
        FRAME_WIDTH,
        FRAME_HEIGHT,
        WindowOptions {
            scale,
            ..WindowOptions::default()
        },
    )?;
    window.set_target_fps(60);

    while window.is_open() && !window.is_key_down(Key::Escape) {
        for button in Button::ALL {
            let pressed = KEY_MAP
                .iter()
                .any(|&(key, mapped)| mapped == button && window.is_key_down(key));
            console.set_button(button, pressed);
        }

        let frame = console.run_frame();
        window.update_with_buffer(frame, FRAME_WIDTH, FRAME_HEIGHT)?;
    }
    Ok(())
}
