//! Speedometer simulator for desktop.
//!
//! Replays a GPS drive through the speedometer core: either a synthetic
//! drive with repeated launches or a recorded trace. Prints the resolved
//! screen layout for the chosen viewport, then the run results.

// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_sign_loss)]

mod drive;
mod session;
mod timing;
mod trace;

use std::path::PathBuf;
use std::thread;
use std::time::Instant;

use anyhow::{Result, ensure};
use clap::{Parser, ValueEnum};
use heapless::String as HString;
use speedo_common::log_buffer::push_secs;
use speedo_common::theme::Layout;
use speedo_common::{AccelPreset, GpsFix, SpeedUnit, Viewport};

use crate::drive::SyntheticDrive;
use crate::session::Session;
use crate::timing::FIX_INTERVAL;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PresetArg {
    #[value(name = "0-60mph")]
    ZeroToSixtyMph,
    #[value(name = "0-100")]
    ZeroToHundred,
    #[value(name = "0-200")]
    ZeroToTwoHundred,
    #[value(name = "80-120")]
    EightyToHundredTwenty,
    #[value(name = "100-200")]
    HundredToTwoHundred,
}

impl From<PresetArg> for AccelPreset {
    fn from(arg: PresetArg) -> Self {
        match arg {
            PresetArg::ZeroToSixtyMph => Self::ZeroToSixtyMph,
            PresetArg::ZeroToHundred => Self::ZeroToHundredKmh,
            PresetArg::ZeroToTwoHundred => Self::ZeroToTwoHundredKmh,
            PresetArg::EightyToHundredTwenty => Self::EightyToHundredTwentyKmh,
            PresetArg::HundredToTwoHundred => Self::HundredToTwoHundredKmh,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum UnitArg {
    Kmh,
    Mph,
    Mps,
}

impl From<UnitArg> for SpeedUnit {
    fn from(arg: UnitArg) -> Self {
        match arg {
            UnitArg::Kmh => Self::Kmh,
            UnitArg::Mph => Self::Mph,
            UnitArg::Mps => Self::MetersPerSecond,
        }
    }
}

/// Replay a GPS drive through the speedometer core.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Viewport width (dp)
    #[arg(long, default_value_t = 390.0)]
    width: f32,

    /// Viewport height (dp)
    #[arg(long, default_value_t = 844.0)]
    height: f32,

    /// Acceleration run to time
    #[arg(long, value_enum, default_value_t = PresetArg::ZeroToHundred)]
    preset: PresetArg,

    /// Display unit for speeds
    #[arg(long, value_enum, default_value_t = UnitArg::Kmh)]
    unit: UnitArg,

    /// Launches in the synthetic drive
    #[arg(long, default_value_t = 3)]
    runs: u32,

    /// Top speed of the synthetic drive, in the display unit
    #[arg(long)]
    top_speed: Option<f32>,

    /// Speed limit for the readout color, in the display unit
    #[arg(long)]
    limit: Option<f32>,

    /// Replay a recorded CSV trace instead of the synthetic drive
    #[arg(long)]
    trace: Option<PathBuf>,

    /// Pace fixes at the GPS rate instead of replaying as fast as possible
    #[arg(long)]
    realtime: bool,
}

/// Synthetic top speed when none is given (km/h).
const DEFAULT_TOP_SPEED_KMH: f32 = 230.0;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    ensure!(
        args.width > 0.0 && args.height > 0.0,
        "viewport must have a positive size, got {}x{}",
        args.width,
        args.height
    );

    let unit = SpeedUnit::from(args.unit);
    let preset = AccelPreset::from(args.preset);

    print_layout(&Viewport::new(args.width, args.height));

    let fixes: Box<dyn Iterator<Item = GpsFix>> = match &args.trace {
        Some(path) => Box::new(trace::load(path)?.into_iter()),
        None => {
            let top_speed_mps = args
                .top_speed
                .map_or(SpeedUnit::Kmh.to_mps(DEFAULT_TOP_SPEED_KMH), |v| unit.to_mps(v));
            ensure!(top_speed_mps > 0.0, "top speed must be positive");
            log::info!(
                "drive: {} runs to {:.0} {}",
                args.runs,
                unit.from_mps(top_speed_mps),
                unit.label()
            );
            Box::new(SyntheticDrive::new(args.runs, top_speed_mps))
        }
    };

    let mut session = Session::new(preset, args.limit.map(|v| unit.to_mps(v)));
    let started = Instant::now();
    for fix in fixes {
        let fix_start = Instant::now();
        session.feed(fix);
        if args.realtime
            && let Some(rest) = FIX_INTERVAL.checked_sub(fix_start.elapsed())
        {
            thread::sleep(rest);
        }
    }
    log::info!("replayed {} fixes in {:?}", session.fixes(), started.elapsed());

    print_summary(&session, unit);
    Ok(())
}

fn print_layout(viewport: &Viewport) {
    let layout = Layout::for_viewport(viewport);
    let readout = layout.readout_font.character_size;

    println!(
        "Viewport {}x{}: {:?}, {:?}",
        viewport.width, viewport.height, layout.tier, layout.orientation
    );
    println!(
        "  padding {}  spacing {}  icon {}",
        layout.padding, layout.spacing, layout.icon_size
    );
    println!(
        "  readout font {}x{} px, scaled readout {:.1}, gauge {:.0}",
        readout.width, readout.height, layout.readout_size, layout.gauge_diameter
    );
}

fn print_summary(
    session: &Session,
    unit: SpeedUnit,
) {
    let speed = session.speed();
    let label = unit.label();

    println!();
    println!("Max speed  {:.1} {label}", unit.from_mps(speed.max()));
    if let Some(avg) = speed.average() {
        println!("Average    {:.1} {label}", unit.from_mps(avg));
    }
    if let Some((lo, hi)) = speed.graph_range() {
        println!(
            "Graph      {} points, {:.1}..{:.1} {label}",
            speed.graph_len(),
            unit.from_mps(lo),
            unit.from_mps(hi)
        );
    }
    println!("Fixes      {} ({} rejected)", session.fixes(), session.rejected());

    let preset = session.preset();
    let history = session.history();
    println!();
    println!("{} runs: {}", preset.label(), history.count(preset));
    for (i, result) in history.iter().enumerate() {
        println!(
            "  #{:<2} {}  peak {:.1} {label}",
            history.len() - i,
            secs(result.elapsed_ms),
            unit.from_mps(result.peak_speed_mps)
        );
    }
    if let Some(best) = history.best(preset) {
        println!("  best {}", secs(best.elapsed_ms));
    }

    println!();
    for entry in session.log().iter() {
        println!("{} [{:>6}] {}", entry.level.prefix(), entry.timestamp_ms, entry.message);
    }
}

fn secs(ms: u64) -> HString<12> {
    let mut s = HString::new();
    push_secs(&mut s, ms);
    s.push_str(" s").ok();
    s
}
