//! Kinetic Pointer CLI
//!
//! Contactless hand-gesture pointer control.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use kinetic_pointer::{
    config::Config,
    core::{ActionEvent, PointerPipeline},
    output::{PointerSink, PrintSink},
    perception::{FrameSource, PerceptionCollector, PerceptionUpdate, ReplaySource, StdinSource},
    session::create_shared_log_with_persistence,
    GESTURE_GUIDE, VERSION,
};

/// Exit code when the perception source cannot be acquired.
const EXIT_PERCEPTION_UNAVAILABLE: i32 = 2;

#[derive(Parser)]
#[command(name = "kinetic-pointer")]
#[command(version = VERSION)]
#[command(about = "Contactless hand-gesture pointer control", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the pointer controller
    Run {
        /// Read frames from a recorded JSONL file instead of stdin
        #[arg(long)]
        replay: Option<PathBuf>,

        /// Print actions instead of injecting them into the OS
        #[arg(long)]
        dry_run: bool,

        /// Also print every Move event in dry-run mode
        #[arg(long)]
        verbose: bool,

        /// Override the configured smoothing factor
        #[arg(long)]
        smoothing: Option<f64>,

        /// Override the configured debounce frame count
        #[arg(long)]
        debounce: Option<u32>,
    },

    /// Run a recording through the pipeline offline and print the actions
    Replay {
        /// Recorded JSONL session file
        file: PathBuf,
    },

    /// Show cumulative session statistics
    Status,

    /// Show configuration
    Config,

    /// Display the gesture guide
    Gestures,
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            replay,
            dry_run,
            verbose,
            smoothing,
            debounce,
        } => cmd_run(replay, dry_run, verbose, smoothing, debounce),
        Commands::Replay { file } => cmd_replay(&file),
        Commands::Status => cmd_status(),
        Commands::Config => cmd_config(),
        Commands::Gestures => println!("{GESTURE_GUIDE}"),
    }
}

fn cmd_run(
    replay: Option<PathBuf>,
    dry_run: bool,
    verbose: bool,
    smoothing: Option<f64>,
    debounce: Option<u32>,
) {
    println!("Kinetic Pointer v{VERSION}");
    println!();

    let mut config = Config::load().unwrap_or_default();
    if let Some(factor) = smoothing {
        config.smoothing_factor = factor;
    }
    if let Some(frames) = debounce {
        config.debounce_frames = frames;
    }
    if let Err(e) = config.validate() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
    if let Err(e) = config.ensure_directories() {
        eprintln!("Warning: Could not create directories: {e}");
    }

    // Build the output sink; injection failure at startup is fatal.
    let (mut sink, screen) = make_sink(&config, dry_run, verbose);

    println!("Starting control...");
    println!("  Screen: {}x{}", screen.0, screen.1);
    println!("  Smoothing factor: {}", config.smoothing_factor);
    println!("  Debounce frames: {}", config.debounce_frames);
    println!(
        "  Active region: {:.0}%..{:.0}% x, {:.0}%..{:.0}% y",
        config.active_region.x_start * 100.0,
        config.active_region.x_end * 100.0,
        config.active_region.y_start * 100.0,
        config.active_region.y_end * 100.0
    );
    println!("  Injection: {}", if dry_run { "dry-run" } else { "enabled" });
    println!();
    println!("Move hand to the top-left corner or press Ctrl+C to stop");
    println!();

    // Build the perception source
    let source: Box<dyn FrameSource + Send> = match replay {
        Some(path) => match ReplaySource::open(&path, config.capture.fps) {
            Ok(source) => Box::new(source),
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(EXIT_PERCEPTION_UNAVAILABLE);
            }
        },
        None => Box::new(StdinSource::new()),
    };

    let session_log =
        create_shared_log_with_persistence(config.data_path.join("session_stats.json"));
    println!("Session ID: {}", session_log.session_id());

    let mut pipeline = PointerPipeline::from_config(&config, screen.0, screen.1);

    let mut collector = PerceptionCollector::new();
    if let Err(e) = collector.start(source) {
        eprintln!("Error starting perception collector: {e}");
        std::process::exit(EXIT_PERCEPTION_UNAVAILABLE);
    }

    // Set up Ctrl+C handler
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc::set_handler(move || {
        r.store(false, Ordering::SeqCst);
    })
    .expect("Error setting Ctrl+C handler");

    // Main control loop: strictly one tick at a time
    let receiver = collector.receiver().clone();
    let mut failsafe_exit = false;

    while running.load(Ordering::SeqCst) {
        let events = match receiver.recv_timeout(Duration::from_millis(100)) {
            Ok(PerceptionUpdate::Frame(frame)) => {
                session_log.record_frame();
                pipeline.process(Some(&frame))
            }
            Ok(PerceptionUpdate::HandLost) => {
                session_log.record_dropped_frame();
                pipeline.process(None)
            }
            Ok(PerceptionUpdate::Closed) => {
                println!("Perception source closed");
                break;
            }
            Err(crossbeam_channel::RecvTimeoutError::Timeout) => continue,
            Err(crossbeam_channel::RecvTimeoutError::Disconnected) => {
                eprintln!("Perception collector disconnected unexpectedly");
                break;
            }
        };

        for event in &events {
            match event {
                ActionEvent::ClickDown(_) => session_log.record_click(),
                ActionEvent::ScrollDelta(_) => session_log.record_scroll(),
                ActionEvent::Exit => {
                    println!();
                    println!("Fail-safe triggered, exiting");
                    session_log.record_failsafe_exit();
                    failsafe_exit = true;
                }
                _ => {}
            }

            // Sink failures must never affect control decisions
            if let Err(e) = sink.apply(event) {
                eprintln!("Warning: {e}");
            }
        }

        if failsafe_exit {
            break;
        }
    }

    // Flush a held button before teardown so no emulated button sticks
    if let Some(up) = pipeline.shutdown() {
        if let Err(e) = sink.apply(&up) {
            eprintln!("Warning: {e}");
        }
    }

    println!();
    println!("Stopping...");
    collector.stop();

    if let Err(e) = session_log.save() {
        eprintln!("Warning: Could not save session stats: {e}");
    }

    println!();
    println!("{}", session_log.summary());
}

/// Build the output sink and determine the screen size.
#[cfg(feature = "inject")]
fn make_sink(config: &Config, dry_run: bool, verbose: bool) -> (Box<dyn PointerSink>, (u32, u32)) {
    use kinetic_pointer::output::EnigoSink;

    if dry_run {
        return (Box::new(PrintSink { verbose }), fallback_screen(config));
    }

    match EnigoSink::new() {
        Ok(sink) => {
            let screen = sink
                .display_size()
                .unwrap_or_else(|_| fallback_screen(config));
            (Box::new(sink), screen)
        }
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("Run with --dry-run to print actions without injecting.");
            std::process::exit(EXIT_PERCEPTION_UNAVAILABLE);
        }
    }
}

#[cfg(not(feature = "inject"))]
fn make_sink(config: &Config, dry_run: bool, verbose: bool) -> (Box<dyn PointerSink>, (u32, u32)) {
    if !dry_run {
        eprintln!("Note: built without the `inject` feature; printing actions instead.");
    }
    (Box::new(PrintSink { verbose }), fallback_screen(config))
}

fn fallback_screen(config: &Config) -> (u32, u32) {
    config
        .screen
        .map(|s| (s.width, s.height))
        .unwrap_or((1920, 1080))
}

fn cmd_replay(file: &PathBuf) {
    let config = Config::load().unwrap_or_default();
    if let Err(e) = config.validate() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    // Unpaced: run the whole recording through as fast as it parses
    let mut source = match ReplaySource::open(file, 0) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(EXIT_PERCEPTION_UNAVAILABLE);
        }
    };

    let screen = fallback_screen(&config);
    let mut pipeline = PointerPipeline::from_config(&config, screen.0, screen.1);
    let mut sink = PrintSink { verbose: true };

    let mut tick: u64 = 0;
    loop {
        let frame = match source.next_frame() {
            Ok(frame) => frame,
            Err(_) => break,
        };
        tick += 1;

        for event in pipeline.process(frame.as_ref()) {
            print!("[{tick:06}] ");
            if let Err(e) = sink.apply(&event) {
                eprintln!("Warning: {e}");
            }
            if event == ActionEvent::Exit {
                println!("Replay hit the fail-safe after {tick} ticks");
                return;
            }
        }
    }

    println!("Replay finished after {tick} ticks");
}

fn cmd_status() {
    let config = Config::load().unwrap_or_default();

    println!("Kinetic Pointer Status");
    println!("======================");
    println!();

    let stats_path = config.data_path.join("session_stats.json");
    if stats_path.exists() {
        if let Ok(content) = std::fs::read_to_string(&stats_path) {
            if let Ok(stats) = serde_json::from_str::<serde_json::Value>(&content) {
                println!("Cumulative Statistics:");
                if let Some(v) = stats.get("frames_processed") {
                    println!("  Hand frames processed: {v}");
                }
                if let Some(v) = stats.get("frames_dropped") {
                    println!("  Frames dropped: {v}");
                }
                if let Some(v) = stats.get("clicks_emitted") {
                    println!("  Clicks emitted: {v}");
                }
                if let Some(v) = stats.get("scrolls_emitted") {
                    println!("  Scroll events emitted: {v}");
                }
                if let Some(v) = stats.get("failsafe_exits") {
                    println!("  Fail-safe exits: {v}");
                }
            }
        }
    } else {
        println!("No previous session data found.");
    }
}

fn cmd_config() {
    let config = Config::load().unwrap_or_default();

    println!("Configuration");
    println!("=============");
    println!();
    println!("Config file: {:?}", Config::config_path());
    match config.validate() {
        Ok(()) => println!("Validation: OK"),
        Err(e) => println!("Validation: {e}"),
    }
    println!();
    println!(
        "{}",
        serde_json::to_string_pretty(&config).unwrap_or_else(|_| "Error".to_string())
    );
}
