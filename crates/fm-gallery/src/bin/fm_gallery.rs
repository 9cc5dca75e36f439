use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use fm_core::Image;
use fm_init::{
    Classification, EdgePolicy, InitConfig, PixelState, UNREACHED_TIME, build_queue_from,
    classify_u8,
};
use image::GrayImage;
use log::info;
use serde::{Deserialize, Serialize};

#[derive(Parser, Debug)]
#[command(name = "fm_gallery")]
#[command(about = "Inspect fast-marching initialization on mask fixtures")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write the state grid, arrival field and counts for a mask
    #[command(name = "classify")]
    Classify(CommonArgs),
    /// Write the initial frontier queue in pop order
    #[command(name = "frontier")]
    Frontier(CommonArgs),
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum EdgePolicyArg {
    Replicate,
    Known,
}

impl From<EdgePolicyArg> for EdgePolicy {
    fn from(arg: EdgePolicyArg) -> Self {
        match arg {
            EdgePolicyArg::Replicate => EdgePolicy::Replicate,
            EdgePolicyArg::Known => EdgePolicy::Known,
        }
    }
}

#[derive(Args, Debug, Clone)]
struct CommonArgs {
    /// Mask image; any pixel > 0 is damaged
    #[arg(long, required = true)]
    input: PathBuf,
    /// Optional expected counts to check against
    #[arg(long)]
    truth: Option<PathBuf>,
    #[arg(long, default_value = "docs/fig/raw")]
    out: PathBuf,
    /// JSON file holding an `InitConfig`
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    erosion_radius: Option<u32>,
    #[arg(long, value_enum)]
    edge_policy: Option<EdgePolicyArg>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TruthEnvelope {
    case: String,
    width: usize,
    height: usize,
    #[serde(default)]
    notes: Option<String>,
    #[serde(default)]
    truth: serde_json::Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CountsTruthPayload {
    band: usize,
    inside: usize,
}

#[derive(Debug, Clone, Serialize)]
struct StateCounts {
    known: usize,
    band: usize,
    inside: usize,
}

#[derive(Debug, Clone, Serialize)]
struct MetaClassify {
    mask_size: [usize; 2],
    padded_size: [usize; 2],
    halo: usize,
    config: InitConfig,
    counts: StateCounts,
    sentinel: f32,
    state_encoding: &'static str,
}

#[derive(Debug, Clone, Serialize)]
struct MetaFrontier {
    mask_size: [usize; 2],
    config: InitConfig,
    queue_len: usize,
    order: &'static str,
    coordinates: &'static str,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match cli.cmd {
        Command::Classify(args) => run_classify(args),
        Command::Frontier(args) => run_frontier(args),
    }
}

fn run_classify(args: CommonArgs) -> Result<()> {
    let case_dir = prepare_case(&args, "classify")?;
    let cfg = resolve_config(&args)?;
    let mask = load_input_u8(&args.input)?;
    let grids = classify_u8(&mask.as_view(), &cfg)
        .with_context(|| format!("classifying mask {}", args.input.display()))?;
    check_truth(&args, "classify", &mask, &grids)?;

    save_u8_image(case_dir.join("states.png"), &grids.states().map(state_to_u8))?;
    save_luma_raw(
        case_dir.join("arrival.png"),
        grids.arrival().width(),
        grids.arrival().height(),
        f32_to_u8_vis(grids.arrival().data()),
    )?;

    let (pw, ph) = grids.dims();
    write_json(
        case_dir.join("meta.json"),
        &MetaClassify {
            mask_size: [mask.width(), mask.height()],
            padded_size: [pw, ph],
            halo: grids.halo(),
            config: cfg,
            counts: counts_of(&grids),
            sentinel: UNREACHED_TIME,
            state_encoding: "known=0 band=128 inside=255",
        },
    )?;

    info!("wrote classification to {}", case_dir.display());
    Ok(())
}

fn run_frontier(args: CommonArgs) -> Result<()> {
    let case_dir = prepare_case(&args, "frontier")?;
    let cfg = resolve_config(&args)?;
    let mask = load_input_u8(&args.input)?;
    let grids = classify_u8(&mask.as_view(), &cfg)
        .with_context(|| format!("classifying mask {}", args.input.display()))?;
    check_truth(&args, "frontier", &mask, &grids)?;

    let queue = build_queue_from(&grids).context("building frontier queue")?;
    let queue_len = queue.len();

    let path = case_dir.join("frontier.csv");
    let mut file =
        fs::File::create(&path).with_context(|| format!("creating {}", path.display()))?;
    writeln!(file, "order,time,x,y").context("writing csv header")?;
    for (i, entry) in queue.into_ordered().enumerate() {
        writeln!(file, "{i},{},{},{}", entry.time, entry.x, entry.y).context("writing csv row")?;
    }

    write_json(
        case_dir.join("meta.json"),
        &MetaFrontier {
            mask_size: [mask.width(), mask.height()],
            config: cfg,
            queue_len,
            order: "ascending time, ties row-major",
            coordinates: "padded grid (mask pixel + halo)",
        },
    )?;

    info!("wrote {queue_len} frontier entries to {}", path.display());
    Ok(())
}

fn resolve_config(args: &CommonArgs) -> Result<InitConfig> {
    let mut cfg = match &args.config {
        Some(path) => {
            ensure_file_exists(path, "config")?;
            read_json::<InitConfig>(path)?
        }
        None => InitConfig::default(),
    };

    if let Some(radius) = args.erosion_radius {
        cfg.erosion_radius = radius;
    }
    if let Some(policy) = args.edge_policy {
        cfg.edge_policy = policy.into();
    }
    Ok(cfg)
}

fn prepare_case(args: &CommonArgs, case_name: &str) -> Result<PathBuf> {
    ensure_file_exists(&args.input, "input")?;
    if let Some(truth) = &args.truth {
        ensure_file_exists(truth, "truth")?;
    }

    let case_dir = args.out.join(case_name);
    fs::create_dir_all(&case_dir)
        .with_context(|| format!("creating output directory {}", case_dir.display()))?;

    let copy = case_dir.join(input_copy_name(&args.input));
    fs::copy(&args.input, &copy).with_context(|| {
        format!("copying input {} -> {}", args.input.display(), copy.display())
    })?;

    Ok(case_dir)
}

/// `input.<ext>` keeping the source extension; `input` when there is none.
fn input_copy_name(input: &Path) -> PathBuf {
    let mut name = PathBuf::from("input");
    if let Some(ext) = input.extension() {
        name.set_extension(ext);
    }
    name
}

fn check_truth(
    args: &CommonArgs,
    case_name: &str,
    mask: &Image<u8>,
    grids: &Classification,
) -> Result<()> {
    let Some(path) = &args.truth else {
        return Ok(());
    };

    let truth: TruthEnvelope = read_json(path)
        .with_context(|| format!("reading truth json at {}", path.display()))?;

    if truth.case != case_name {
        bail!(
            "truth case mismatch: expected '{}', got '{}'.",
            case_name,
            truth.case
        );
    }
    if truth.width != mask.width() || truth.height != mask.height() {
        bail!(
            "truth dimensions ({}, {}) do not match input dimensions ({}, {}).",
            truth.width,
            truth.height,
            mask.width(),
            mask.height()
        );
    }

    let payload: CountsTruthPayload = serde_json::from_value(truth.truth.clone())
        .with_context(|| format!("parsing counts payload for case '{}'", truth.case))?;
    let counts = counts_of(grids);
    if payload.band != counts.band || payload.inside != counts.inside {
        bail!(
            "state counts mismatch: expected band={} inside={}, got band={} inside={}.",
            payload.band,
            payload.inside,
            counts.band,
            counts.inside
        );
    }
    Ok(())
}

fn counts_of(grids: &Classification) -> StateCounts {
    StateCounts {
        known: grids.count(PixelState::Known),
        band: grids.count(PixelState::Band),
        inside: grids.count(PixelState::Inside),
    }
}

fn state_to_u8(state: &PixelState) -> u8 {
    match state {
        PixelState::Known => 0,
        PixelState::Band => 128,
        PixelState::Inside => 255,
    }
}

fn load_input_u8(path: &Path) -> Result<Image<u8>> {
    let dyn_img =
        image::open(path).with_context(|| format!("opening input image {}", path.display()))?;
    let luma = dyn_img.to_luma8();
    let (w, h) = luma.dimensions();
    let data = luma.into_raw();

    Image::from_vec(w as usize, h as usize, data)
        .with_context(|| format!("constructing fm-core image from {}", path.display()))
}

fn save_u8_image(path: PathBuf, img: &Image<u8>) -> Result<()> {
    save_luma_raw(path, img.width(), img.height(), img.data().to_vec())
}

fn save_luma_raw(path: PathBuf, width: usize, height: usize, data: Vec<u8>) -> Result<()> {
    let gray = GrayImage::from_raw(width as u32, height as u32, data)
        .context("constructing GrayImage from raw bytes")?;
    gray.save(&path)
        .with_context(|| format!("saving image {}", path.display()))
}

/// Min-max stretch to 0..=255. A flat field maps to all zeros.
fn f32_to_u8_vis(data: &[f32]) -> Vec<u8> {
    if data.is_empty() {
        return Vec::new();
    }

    let (min_v, max_v) = data
        .iter()
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });

    if (max_v - min_v).abs() < 1e-12 {
        return vec![0u8; data.len()];
    }

    let scale = 255.0 / (max_v - min_v);
    data.iter()
        .map(|&v| ((v - min_v) * scale).round().clamp(0.0, 255.0) as u8)
        .collect()
}

fn write_json(path: PathBuf, value: &impl Serialize) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(value).context("serializing json")?;
    fs::write(&path, bytes).with_context(|| format!("writing json {}", path.display()))
}

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T> {
    let data = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_slice(&data).with_context(|| format!("parsing json {}", path.display()))
}

fn ensure_file_exists(path: &Path, what: &str) -> Result<()> {
    if !path.exists() {
        bail!("{} file does not exist: {}", what, path.display());
    }
    if !path.is_file() {
        bail!("{} path is not a file: {}", what, path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use super::{f32_to_u8_vis, input_copy_name, state_to_u8};
    use fm_init::PixelState;

    #[test]
    fn input_copy_keeps_source_extension() {
        assert_eq!(
            input_copy_name(Path::new("fixtures/hole.bmp")),
            PathBuf::from("input.bmp")
        );
        assert_eq!(
            input_copy_name(Path::new("masks/scratch.png")),
            PathBuf::from("input.png")
        );
        assert_eq!(input_copy_name(Path::new("raw_mask")), PathBuf::from("input"));
    }

    #[test]
    fn vis_stretch_maps_extremes() {
        assert_eq!(f32_to_u8_vis(&[0.0, 2.5e5, 1.0e6]), vec![0, 64, 255]);
        assert_eq!(f32_to_u8_vis(&[2.0, 2.0]), vec![0, 0]);
        assert!(f32_to_u8_vis(&[]).is_empty());
    }

    #[test]
    fn state_encoding_is_distinct() {
        let encoded =
            [PixelState::Known, PixelState::Band, PixelState::Inside].map(|s| state_to_u8(&s));
        assert_eq!(encoded, [0, 128, 255]);
    }
}
