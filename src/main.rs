//! Demo binary: renders one animation to numbered PPM frames.
//!
//! ```text
//! halo [options.toml | animation-tag] [--frames N] [--seconds S] [--out DIR]
//! ```
//!
//! Frames are paced by the governor over a synthetic clock, so a run is
//! deterministic in frame count regardless of host speed.

use std::path::{Path, PathBuf};

use halo::{
    governor, AnimationConfig, Canvas, HaloError, Loader, LoaderOptions,
    MotionKind, Mount, MountSel, Options,
};
use web_time::{Duration, Instant};

struct Args {
    source: Option<String>,
    frames: u32,
    seconds: f32,
    out: PathBuf,
}

fn next_value(
    args: &mut impl Iterator<Item = String>,
    flag: &str,
) -> Result<String, HaloError> {
    args.next().ok_or_else(|| {
        HaloError::InvalidConfig(format!("{flag} needs a value"))
    })
}

fn parse_args() -> Result<Args, HaloError> {
    let mut parsed = Args {
        source: None,
        frames: 120,
        seconds: 2.0,
        out: PathBuf::from("frames"),
    };
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--frames" => {
                parsed.frames = next_value(&mut args, "--frames")?
                    .parse()
                    .map_err(|e| {
                        HaloError::InvalidConfig(format!("--frames: {e}"))
                    })?;
            }
            "--seconds" => {
                parsed.seconds = next_value(&mut args, "--seconds")?
                    .parse()
                    .map_err(|e| {
                        HaloError::InvalidConfig(format!("--seconds: {e}"))
                    })?;
            }
            "--out" => {
                parsed.out =
                    PathBuf::from(next_value(&mut args, "--out")?);
            }
            flag if flag.starts_with("--") => {
                return Err(HaloError::InvalidConfig(format!(
                    "unknown flag {flag}"
                )));
            }
            _ if parsed.source.is_some() => {
                return Err(HaloError::InvalidConfig(format!(
                    "unexpected argument {arg}"
                )));
            }
            _ => parsed.source = Some(arg),
        }
    }
    Ok(parsed)
}

/// A TOML path loads a full options file; anything else must be an
/// animation tag rendered with defaults.
fn load_options(source: Option<&str>) -> Result<Options, HaloError> {
    let Some(source) = source else {
        return Ok(Options::default());
    };
    let path = Path::new(source);
    if path.extension().is_some_and(|ext| ext == "toml") || path.exists() {
        return Options::load(path);
    }
    let kind: MotionKind = source.parse()?;
    Ok(Options {
        config: AnimationConfig::default(),
        motion: kind.default_params(),
    })
}

/// P6 with the straight-alpha frame composited over black.
fn write_ppm(path: &Path, canvas: &Canvas) -> Result<(), HaloError> {
    let (width, height) = (canvas.width(), canvas.height());
    let mut data =
        Vec::with_capacity(20 + (width as usize) * (height as usize) * 3);
    data.extend_from_slice(format!("P6\n{width} {height}\n255\n").as_bytes());
    for px in canvas.pixels().chunks_exact(4) {
        let alpha = u16::from(px[3]);
        for channel in &px[..3] {
            data.push(((u16::from(*channel) * alpha) / 255) as u8);
        }
    }
    std::fs::write(path, data).map_err(HaloError::Io)
}

fn run() -> Result<(), HaloError> {
    let args = parse_args()?;
    let options = load_options(args.source.as_deref())?;
    let kind = options.motion.kind();
    std::fs::create_dir_all(&args.out).map_err(HaloError::Io)?;

    let mount = Mount::default();
    let mut loader = Loader::new(LoaderOptions {
        mount: MountSel::from(&mount),
        config: options.config,
        motion: options.motion,
        auto_start: true,
    })?;

    let budget = governor::global().budget_for(kind);
    let interval =
        Duration::from_secs_f64(1.0 / f64::from(budget.max_fps.max(1)));
    log::info!(
        "rendering {kind} at {} fps into {}",
        budget.max_fps,
        args.out.display()
    );

    let base = Instant::now();
    let mut written = 0u32;
    let mut ticks = 0u32;
    while written < args.frames && loader.elapsed() < args.seconds {
        ticks += 1;
        if !loader.tick(base + interval * ticks) {
            continue;
        }
        let path = args.out.join(format!("frame_{written:04}.ppm"));
        let mut saved = Ok(());
        mount.with_frames(|canvas| saved = write_ppm(&path, canvas));
        saved?;
        written += 1;
        log::debug!("frame {written} at t={:.3}s", loader.elapsed());
    }
    loader.destroy();
    log::info!("wrote {written} frames");
    Ok(())
}

fn main() {
    env_logger::init();
    if let Err(e) = run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}
