// famicore - command-line entry point
//
// Usage: famicore <rom.nes> [--overlay]
//
// Exit code 0 on clean shutdown, non-zero when the ROM fails to load.

use famicore::config::Config;
use famicore::console::Console;
use famicore::display::{run_window, WindowConfig};
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init();

    let mut rom_path = None;
    let mut overlay = false;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--overlay" => overlay = true,
            "--help" | "-h" => {
                print_usage();
                return ExitCode::SUCCESS;
            }
            _ if rom_path.is_none() => rom_path = Some(arg),
            other => {
                eprintln!("unexpected argument: {}", other);
                print_usage();
                return ExitCode::FAILURE;
            }
        }
    }

    let Some(rom_path) = rom_path else {
        print_usage();
        return ExitCode::FAILURE;
    };

    let console = match Console::from_ines_file(&rom_path) {
        Ok(console) => console,
        Err(e) => {
            eprintln!("failed to load {}: {}", rom_path, e);
            return ExitCode::FAILURE;
        }
    };

    let config = Config::load_or_default();

    // Keep the audio stream alive for the lifetime of the window
    #[cfg(feature = "audio")]
    let _audio = if config.audio.enabled {
        match famicore::audio::AudioPlayback::new(console.sample_queue()) {
            Ok(playback) => Some(playback),
            Err(e) => {
                log::warn!("audio unavailable: {}", e);
                None
            }
        }
    } else {
        None
    };

    let window_config = WindowConfig::new()
        .with_scale(config.video.scale)
        .with_overlay(overlay);

    match run_window(window_config, console) {
        Ok(()) => {
            // Persist settings on clean shutdown so famicore.toml exists
            // for the user to edit
            if let Err(e) = config.save() {
                log::warn!("failed to persist config: {}", e);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("display error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn print_usage() {
    eprintln!("usage: famicore <rom.nes> [--overlay]");
    eprintln!();
    eprintln!("  --overlay    show live stats in the window title");
}
