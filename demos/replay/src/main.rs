//! replay: run a recorded or synthetic sensor trace through a guidance
//! session.
//!
//! Without arguments the demo uses a small embedded catalog around Marina
//! Beach, Chennai, and a synthetic walk from the first catalog point to the
//! last.  Alerts are spoken through a logging speech sink and written, with
//! the position trace, to `output/replay`.
//!
//! ```text
//! RUST_LOG=debug cargo run -p replay -- --destination lot-b --coalesce-ms 500
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use wf_catalog::{Catalog, LoadMode, load_points_csv, load_points_json, load_points_json_str};
use wf_core::GuidanceConfig;
use wf_guidance::{GuidanceSession, SpeechObserver, TracingSpeech};
use wf_output::{CsvWriter, GuidanceOutputObserver, OutputWriter};
use wf_sensor::{DeliveryPolicy, Replay, SensorSample, SyntheticWalk, load_trace_csv};

// ── Embedded catalog ──────────────────────────────────────────────────────────

// Same shape as the points endpoint: mixed key spellings, one record without
// coordinates (skipped), one unknown feature type.
const CATALOG_JSON: &str = r#"[
  {"_id": "gate-3",  "latitude": 13.0827, "longitude": 80.2707, "featureType": "ramp",     "placeName": "Gate 3"},
  {"_id": "tactile", "lat": 13.0831,      "lng": 80.2715,       "type": "tactile",         "name": "Promenade"},
  {"_id": "lift",    "latitude": 13.0838, "longitude": 80.2728, "featureType": "elevator", "placeName": "Lighthouse"},
  {"_id": "steps",   "latitude": 13.0843, "longitude": 80.2739, "featureType": "stairs"},
  {"_id": "ghost",   "featureType": "ramp", "placeName": "No coordinates"},
  {"_id": "loop",    "latitude": 13.0846, "longitude": 80.2744, "featureType": "hearing-loop", "title": "Info Kiosk"},
  {"_id": "lot-b",   "latitude": 13.0850, "longitude": 80.2750, "featureType": "parking",  "placeName": "Lot B"}
]"#;

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Catalog file (.json in the points endpoint shape, or .csv)
    #[arg(short, long)]
    catalog: Option<PathBuf>,

    /// Sensor trace CSV; a synthetic walk is generated when omitted
    #[arg(short, long)]
    trace: Option<PathBuf>,

    /// Guidance configuration JSON; missing fields take their defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Catalog id of the navigation destination
    #[arg(short, long)]
    destination: Option<String>,

    /// Output directory
    #[arg(short, long, default_value = "output/replay")]
    output: PathBuf,

    /// Output backend
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Csv)]
    format: OutputFormat,

    /// Strict mode: stop on the first bad catalog record
    #[arg(long)]
    strict: bool,

    /// Coalesce samples arriving within this many milliseconds
    #[arg(long)]
    coalesce_ms: Option<u64>,

    /// Seed for the synthetic walk
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum OutputFormat {
    Csv,
    Sqlite,
}

// ── Loading ───────────────────────────────────────────────────────────────────

fn load_config(path: Option<&Path>) -> Result<GuidanceConfig> {
    let Some(path) = path else {
        return Ok(GuidanceConfig::default());
    };
    let body = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let config: GuidanceConfig =
        serde_json::from_str(&body).with_context(|| format!("parsing {}", path.display()))?;
    config.validate()?;
    Ok(config)
}

fn load_catalog(path: Option<&Path>, mode: LoadMode) -> Result<Catalog> {
    let catalog = match path {
        None => load_points_json_str(CATALOG_JSON, mode)?,
        Some(p) if p.extension().is_some_and(|e| e.eq_ignore_ascii_case("csv")) => load_points_csv(p, mode)?,
        Some(p) => load_points_json(p, mode)?,
    };
    Ok(catalog)
}

fn load_samples(cli: &Cli, catalog: &Catalog) -> Result<Vec<SensorSample>> {
    if let Some(path) = &cli.trace {
        return Ok(load_trace_csv(path)?);
    }
    let (Some(first), Some(last)) = (catalog.points().first(), catalog.points().last()) else {
        bail!("a synthetic walk needs a non-empty catalog");
    };
    let to = match &cli.destination {
        Some(id) => catalog.by_id(id).map(|p| p.location).unwrap_or(last.location),
        None => last.location,
    };
    Ok(SyntheticWalk::new(first.location, to, cli.seed).generate()?)
}

// ── Run ───────────────────────────────────────────────────────────────────────

fn run<W: OutputWriter>(cli: &Cli, mut session: GuidanceSession, samples: Vec<SensorSample>, writer: W) -> Result<()> {
    let speech = SpeechObserver::new(TracingSpeech::default(), session.config().speech_rate);
    let mut obs = (speech, GuidanceOutputObserver::new(writer));

    let replay = match cli.coalesce_ms {
        Some(ms) => Replay::new(DeliveryPolicy::Coalesce, ms),
        None => Replay::default(),
    };

    let t0 = Instant::now();
    let summary = replay.run(&mut session, samples, &mut obs)?;
    let view = session.view();
    let totals = session.end_with(&mut obs);
    let elapsed = t0.elapsed();

    if let Some(e) = obs.1.take_error() {
        warn!("output error: {e}");
    }

    println!("Replay complete in {:.3} s", elapsed.as_secs_f64());
    println!(
        "  samples   : {} ({} locations, {} headings, {} rejected, {} coalesced)",
        summary.samples, summary.locations, summary.headings, summary.rejected, summary.coalesced
    );
    println!("  alerts    : {} raised, {} spoken", totals.alerts_raised, obs.0.sink().spoken());
    println!("  announced : {}", totals.announced);
    println!("  duration  : {} ms of session time", totals.duration_ms);
    if let Some(label) = view.distance_label() {
        println!(
            "  final     : {} to {}, bearing {}, heading {}",
            label,
            view.destination_name.as_deref().unwrap_or("destination"),
            view.bearing_label(),
            view.heading_label(),
        );
    }
    println!("  output    : {}", cli.output.display());
    Ok(())
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let mode = if cli.strict { LoadMode::Strict } else { LoadMode::Permissive };

    let config = load_config(cli.config.as_deref())?;
    let catalog = Arc::new(load_catalog(cli.catalog.as_deref(), mode)?);
    info!(points = catalog.len(), "catalog loaded");

    let samples = load_samples(&cli, &catalog)?;
    info!(samples = samples.len(), "sensor trace ready");

    let mut session = GuidanceSession::new(Arc::clone(&catalog), config)?;
    if let Some(id) = &cli.destination {
        session.set_destination_by_id(id)?;
    }

    fs::create_dir_all(&cli.output)?;
    match cli.format {
        OutputFormat::Csv => run(&cli, session, samples, CsvWriter::new(&cli.output)?),
        #[cfg(feature = "sqlite")]
        OutputFormat::Sqlite => run(&cli, session, samples, wf_output::SqliteWriter::new(&cli.output)?),
        #[cfg(not(feature = "sqlite"))]
        OutputFormat::Sqlite => bail!("SQLite output needs the `sqlite` feature"),
    }
}
