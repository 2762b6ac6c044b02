use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;

use lumacheck_core::analysis::domain::illumination_result::IlluminationResult;
use lumacheck_core::detection::infrastructure::landmark_file_detector::FileLandmarkDetector;
use lumacheck_core::pipeline::analysis_logger::StdoutAnalysisLogger;
use lumacheck_core::pipeline::check_illumination_use_case::CheckIlluminationUseCase;
use lumacheck_core::pipeline::frame_scheduler::FrameScheduler;
use lumacheck_core::pipeline::infrastructure::interval_tick_source::IntervalTickSource;
use lumacheck_core::pipeline::result_sink::ChannelResultSink;
use lumacheck_core::video::infrastructure::image_sequence_source::{
    ImageSequenceError, ImageSequenceSource,
};

/// Face illumination analysis over a sequence of frames.
#[derive(Parser)]
#[command(name = "lumacheck")]
struct Cli {
    /// Input frames (image files), analyzed in order as a video feed.
    #[arg(required = true)]
    frames: Vec<PathBuf>,

    /// Landmark geometry JSON: a single object applied to every frame,
    /// or an array with one entry (or null) per frame.
    #[arg(long)]
    landmarks: PathBuf,

    /// Analysis rate in cycles per second.
    #[arg(long, default_value = "30.0")]
    fps: f64,

    /// Write shadow/saturation overlay PNGs into this directory.
    #[arg(long)]
    save_masks: Option<PathBuf>,

    /// Emit one JSON object per cycle instead of plain text.
    #[arg(long)]
    json: bool,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    if cli.fps <= 0.0 {
        return Err("--fps must be positive".into());
    }
    if let Some(dir) = &cli.save_masks {
        std::fs::create_dir_all(dir)?;
    }

    let frame_count = cli.frames.len();
    let source = ImageSequenceSource::open(cli.frames)?;
    let detector = FileLandmarkDetector::from_path(&cli.landmarks)?;
    log::info!("analyzing {frame_count} frames at {} cycles/s", cli.fps);

    let (result_tx, result_rx) = crossbeam_channel::unbounded();
    let mut use_case = CheckIlluminationUseCase::new(
        Box::new(source),
        Box::new(detector),
        Box::new(ChannelResultSink::new(result_tx)),
        Box::new(StdoutAnalysisLogger::new()),
    );
    let scheduler = FrameScheduler::new();
    let mut ticks = IntervalTickSource::from_refresh_rate(cli.fps);

    let worker = std::thread::spawn(move || -> Result<(), String> {
        match use_case.run(&scheduler, &mut ticks) {
            Ok(()) => Ok(()),
            // Running out of frames is the normal end of a replayed feed.
            Err(e)
                if matches!(
                    e.downcast_ref::<ImageSequenceError>(),
                    Some(ImageSequenceError::EndOfSequence)
                ) =>
            {
                Ok(())
            }
            Err(e) => Err(e.to_string()),
        }
    });

    for result in result_rx {
        report(&result, cli.json);
        if let Some(dir) = &cli.save_masks {
            save_masks(&result, dir)?;
        }
    }

    worker.join().map_err(|_| "analysis thread panicked")??;
    Ok(())
}

fn report(result: &IlluminationResult, json: bool) {
    if json {
        println!(
            "{}",
            serde_json::json!({
                "frame": result.frame_index,
                "shadow_ratio": result.shadow_ratio,
                "saturation_ratio": result.saturation_ratio,
                "background_saturation_ratio": result.background_saturation_ratio,
            })
        );
    } else {
        println!(
            "frame {:4}  shadow {:5.1}%  saturation {:5.1}%  background saturation {:5.1}%",
            result.frame_index,
            result.shadow_ratio * 100.0,
            result.saturation_ratio * 100.0,
            result.background_saturation_ratio * 100.0,
        );
    }
}

fn save_masks(result: &IlluminationResult, dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    result
        .shadow_mask
        .to_image()
        .save(dir.join(format!("shadow_{:04}.png", result.frame_index)))?;
    result
        .saturation_mask
        .to_image()
        .save(dir.join(format!("saturation_{:04}.png", result.frame_index)))?;
    Ok(())
}
