#![forbid(unsafe_code)]

//! Command-line argument parsing for the harness.
//!
//! Parses args by hand. Flags use the `--name=value` form.

use std::fmt;
use std::path::PathBuf;

use hearth_core::scene::{IntensityLevel, TimeOfDay, WeatherCondition};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const HELP_TEXT: &str = "\
hearth-harness: run the weather animation core headless

USAGE:
    hearth-harness [OPTIONS]

OPTIONS:
    --weather=NAME       clear|cloudy|rain|snow|fog|storm|aurora (default: snow)
    --time=NAME          dawn|day|dusk|night (default: night)
    --hour=H             Derive the time of day from an hour, 0-23
    --intensity=LEVEL    Override effect intensity: low|medium|high
                         (also light|moderate|heavy)
    --frames=N           Frames to simulate (default: 600)
    --size=WxH           Surface size in pixels (default: from config)
    --seed=N             Fixed seed for a reproducible run
    --config=PATH        Load FxConfig from a JSON file
    --snapshot=PATH      Write the final frame as a binary PPM
    --help, -h           Show this help message
    --version, -V        Show version

ENVIRONMENT VARIABLES:
    HEARTH_LOG           Log filter (default: info)
    HEARTH_FX_SEED       Fixed seed; --seed wins
    HEARTH_FX_QUALITY    off|minimal|reduced|full
    HEARTH_FX_DISABLE    1|true renders nothing";

/// Parsed command-line options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opts {
    pub weather: WeatherCondition,
    pub time: TimeOfDay,
    pub intensity: Option<IntensityLevel>,
    pub frames: u32,
    pub size: Option<(u32, u32)>,
    pub seed: Option<u64>,
    pub config: Option<PathBuf>,
    pub snapshot: Option<PathBuf>,
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            weather: WeatherCondition::Snow,
            time: TimeOfDay::Night,
            intensity: None,
            frames: 600,
            size: None,
            seed: None,
            config: None,
            snapshot: None,
        }
    }
}

/// What the invocation asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Run(Opts),
    Help,
    Version,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliError(String);

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for CliError {}

fn invalid(flag: &str, value: &str, expected: &str) -> CliError {
    CliError(format!("invalid {flag} value {value:?}: expected {expected}"))
}

/// Parse `args` (without the program name).
pub fn parse<I, S>(args: I) -> Result<Command, CliError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut opts = Opts::default();
    for arg in args {
        let arg = arg.as_ref();
        match arg {
            "--help" | "-h" => return Ok(Command::Help),
            "--version" | "-V" => return Ok(Command::Version),
            other => {
                let Some((flag, val)) = other.split_once('=') else {
                    return Err(CliError(format!("unknown argument: {other}")));
                };
                match flag {
                    "--weather" => {
                        opts.weather = val.parse().map_err(|e| CliError(format!("{e}")))?;
                    }
                    "--time" => {
                        opts.time = val.parse().map_err(|e| CliError(format!("{e}")))?;
                    }
                    "--hour" => {
                        let hour: u8 = val
                            .parse()
                            .ok()
                            .filter(|h| *h < 24)
                            .ok_or_else(|| invalid(flag, val, "an hour 0-23"))?;
                        opts.time = TimeOfDay::from_hour(hour);
                    }
                    "--intensity" => {
                        opts.intensity =
                            Some(val.parse().map_err(|e| CliError(format!("{e}")))?);
                    }
                    "--frames" => {
                        opts.frames = val
                            .parse()
                            .map_err(|_| invalid(flag, val, "a frame count"))?;
                    }
                    "--size" => opts.size = Some(parse_size(val)?),
                    "--seed" => {
                        opts.seed = Some(
                            val.parse()
                                .map_err(|_| invalid(flag, val, "an unsigned integer"))?,
                        );
                    }
                    "--config" => opts.config = Some(PathBuf::from(val)),
                    "--snapshot" => opts.snapshot = Some(PathBuf::from(val)),
                    _ => return Err(CliError(format!("unknown flag: {flag}"))),
                }
            }
        }
    }
    Ok(Command::Run(opts))
}

fn parse_size(val: &str) -> Result<(u32, u32), CliError> {
    let parsed = val.split_once(['x', 'X']).and_then(|(w, h)| {
        let w = w.trim().parse::<u32>().ok()?;
        let h = h.trim().parse::<u32>().ok()?;
        (w > 0 && h > 0).then_some((w, h))
    });
    parsed.ok_or_else(|| invalid("--size", val, "WIDTHxHEIGHT, both non-zero"))
}
