//! CLI application for facial aesthetics metrics.
//!
//! Usage:
//!   facial-aesthetics <front.json>                          # Human-readable output
//!   facial-aesthetics <front.json> --profile <profile.json> # Include profile metrics
//!   facial-aesthetics <front.json> --json                   # JSON output
//!   facial-aesthetics <front.json> --prompt                 # Flat key: value block
//!   facial-aesthetics <front.json> -o report.json           # Save to file

use clap::Parser;
use facial_aesthetics::{
    Config, DetectResponse, FaceObservation, MetricAggregator, MetricRecord, MetricReport,
};
use std::path::{Path, PathBuf};
use tracing::{debug, info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "facial-aesthetics")]
#[command(author, version, about = "Facial aesthetics metrics and rating", long_about = None)]
struct Args {
    /// Provider detect response for the front photo (JSON)
    #[arg(required = true)]
    front: PathBuf,

    /// Provider detect response for the profile photo (JSON)
    #[arg(long)]
    profile: Option<PathBuf>,

    /// Config file (default: config.toml, if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output as JSON
    #[arg(short, long, conflicts_with = "prompt")]
    json: bool,

    /// Output as a flat key: value block
    #[arg(long)]
    prompt: bool,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();

    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::load_or_default(Config::default_path())?,
    };

    let level = if args.verbose {
        Level::DEBUG
    } else {
        config.logging.max_level()
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let front = load_face(&args.front)?;
    let profile = args.profile.as_deref().map(load_face).transpose()?;

    let aggregator = MetricAggregator::new(config.landmarks.clone());
    let metrics = aggregator.compute_all(&front, profile.as_ref());
    let report = MetricReport::try_new(metrics)?;
    info!(
        score = report.rating.composite_score,
        category = %report.rating.category,
        "analysis complete"
    );

    let output_str = if args.json {
        report.to_json()?
    } else if args.prompt {
        report.prompt_block(config.report.skip_unavailable)
    } else {
        format_human_readable(&args.front, profile.is_some(), &report)
    };

    if let Some(ref path) = args.output {
        std::fs::write(path, &output_str)?;
        info!("Output written to {:?}", path);
    } else {
        println!("{}", output_str);
    }

    Ok(())
}

fn load_face(path: &Path) -> facial_aesthetics::Result<FaceObservation> {
    debug!("Loading provider response {:?}...", path);
    let text = std::fs::read_to_string(path)?;
    let face = DetectResponse::from_json(&text)?.into_face()?;
    debug!("Found {} landmark(s)", face.landmarks.len());
    Ok(face)
}

const GROUPS: [(&str, &[&str]); 6] = [
    (
        "Eyes",
        &["canthal_tilt", "interpupil_distance", "eye_whr"],
    ),
    (
        "Proportions",
        &[
            "mid_face_ratio",
            "facial_thirds",
            "facial_width_height_ratio",
            "bizygomatic_width",
            "bigonial_width",
            "symmetry_score",
        ],
    ),
    (
        "Lower face",
        &["lip_fullness", "jaw_prominence", "nose_width", "nose_length"],
    ),
    (
        "Profile",
        &[
            "gonial_angle",
            "nose_projection",
            "chin_projection",
            "nose_chin_distance",
        ],
    ),
    (
        "Attributes",
        &[
            "age",
            "gender",
            "beauty_male",
            "beauty_female",
            "beauty_avg",
            "yaw",
            "pitch",
            "roll",
        ],
    ),
    ("Skin", &["skin_score", "health", "acne", "stain"]),
];

fn format_human_readable(front: &Path, has_profile: bool, report: &MetricReport) -> String {
    let mut s = String::new();

    s.push_str(&format!("Front: {}\n", front.display()));
    s.push_str(&format!(
        "Profile view: {}\n",
        if has_profile { "yes" } else { "no" }
    ));

    for (title, keys) in GROUPS {
        s.push_str(&format!("\n{}:\n", title));
        push_group(&mut s, &report.metrics, keys);
    }

    s.push_str("\nRating:\n");
    s.push_str(&format!(
        "  Composite: {:.2} / 10\n",
        report.rating.composite_score
    ));
    s.push_str(&format!("  Category:  {}\n", report.rating.category));

    s
}

fn push_group(s: &mut String, metrics: &MetricRecord, keys: &[&str]) {
    for key in keys {
        if let Some(value) = metrics.get(key) {
            s.push_str(&format!("  {:<26} {}\n", format!("{}:", key), value));
        }
    }
}
