#![forbid(unsafe_code)]

//! Headless harness for the weather animation core.
//!
//! Mounts whatever the requested scene calls for, drives it for a fixed
//! number of frames, prints a JSON summary on stdout, and optionally writes
//! the final composited frame as a PPM.
//!
//! # Running
//!
//! ```sh
//! cargo run -p hearth-harness -- --weather=storm --frames=900 --seed=7
//! HEARTH_LOG=debug cargo run -p hearth-harness -- --weather=aurora --snapshot=aurora.ppm
//! ```

mod cli;
mod snapshot;

use std::process::ExitCode;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use hearth_core::scene::{SceneContext, TimeOfDay};
use hearth_fx::{FRAME, FxConfig, ScenePlan, SceneDirector};
use hearth_render::{PackedRgba, SoftwareProvider, Surface};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use cli::{Command, HELP_TEXT, Opts, VERSION};

fn init_logging() {
    let filter = EnvFilter::try_from_env("HEARTH_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn sky(time: TimeOfDay) -> PackedRgba {
    match time {
        TimeOfDay::Dawn => PackedRgba::from_hex(0x4a5a7a),
        TimeOfDay::Day => PackedRgba::from_hex(0x7a9cc6),
        TimeOfDay::Dusk => PackedRgba::from_hex(0x2c2444),
        TimeOfDay::Night => PackedRgba::from_hex(0x0b1026),
    }
}

fn load_config(opts: &Opts) -> Result<FxConfig, Box<dyn std::error::Error>> {
    let mut config = match &opts.config {
        Some(path) => FxConfig::load(path)?,
        None => FxConfig::default(),
    };
    config.apply_process_env()?;
    if let Some(seed) = opts.seed {
        config.seed = Some(seed);
    }
    if let Some((w, h)) = opts.size {
        config.width = w;
        config.height = h;
    }
    config.validate()?;
    Ok(config)
}

fn run(opts: &Opts) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(opts)?;
    let (width, height) = (config.width, config.height);
    let ctx = SceneContext::new(opts.time, opts.weather);
    let mut plan = ScenePlan::for_scene(&ctx);
    if let Some(intensity) = opts.intensity {
        plan = plan.with_intensity(intensity);
    }

    let strikes = Arc::new(AtomicUsize::new(0));
    let mut director = SceneDirector::new(config, Box::new(SoftwareProvider::default()));
    let counter = Arc::clone(&strikes);
    director.set_flash_callback(Arc::new(move || {
        counter.fetch_add(1, Ordering::Relaxed);
    }));
    director.mount_plan(plan);
    info!(
        weather = ctx.weather.as_str(),
        time = ctx.time_of_day.as_str(),
        effects = director.plan().effects().len(),
        frames = opts.frames,
        "running"
    );

    for _ in 0..opts.frames {
        director.frame_all(FRAME);
    }

    let mut frame = Surface::new(width, height);
    director.composite(&mut frame);
    if let Some(path) = &opts.snapshot {
        snapshot::write_ppm(path, &frame, sky(ctx.time_of_day))?;
        info!(path = %path.display(), "snapshot written");
    }

    let effects: Vec<_> = director
        .mounts()
        .map(|m| {
            serde_json::json!({
                "name": m.name(),
                "state": format!("{:?}", m.state()),
                "draw_calls": m.draw_calls(),
            })
        })
        .collect();
    let summary = serde_json::json!({
        "weather": ctx.weather.as_str(),
        "time_of_day": ctx.time_of_day.as_str(),
        "frames": opts.frames,
        "size": [width, height],
        "effects": effects,
        "lit_pixels": frame.lit_pixels(),
        "lightning_strikes": strikes.load(Ordering::Relaxed),
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);

    director.dispose();
    Ok(())
}

fn main() -> ExitCode {
    let command = match cli::parse(std::env::args().skip(1)) {
        Ok(command) => command,
        Err(err) => {
            eprintln!("error: {err}\n\n{HELP_TEXT}");
            return ExitCode::from(2);
        }
    };
    let opts = match command {
        Command::Help => {
            println!("{HELP_TEXT}");
            return ExitCode::SUCCESS;
        }
        Command::Version => {
            println!("hearth-harness {VERSION}");
            return ExitCode::SUCCESS;
        }
        Command::Run(opts) => opts,
    };

    init_logging();
    match run(&opts) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "harness failed");
            ExitCode::FAILURE
        }
    }
}
