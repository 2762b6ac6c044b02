use std::time::Instant;

use crate::analysis::domain::illumination_result::IlluminationResult;
use crate::analysis::domain::luminance_classifier::LuminanceClassifier;
use crate::analysis::domain::mask_generator::MaskGenerator;
use crate::detection::domain::landmark_detector::LandmarkDetector;
use crate::masking::domain::mask_rasterizer::MaskRasterizer;
use crate::pipeline::analysis_logger::AnalysisLogger;
use crate::pipeline::frame_scheduler::{FrameScheduler, TickSource};
use crate::pipeline::result_sink::ResultSink;
use crate::video::domain::frame_source::FrameSource;

/// What one analysis cycle produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CycleOutcome {
    /// A result was published to the sink.
    Published,
    /// No face this cycle: detector returned nothing or failed, the
    /// silhouette was degenerate, or the mask contained no pixels.
    NoFace,
}

/// Orchestrates an illumination analysis session.
///
/// Each cycle: grab the current frame → ask the external detector for
/// landmarks → rasterize the face mask → classify pixels → paint
/// overlays → publish one [`IlluminationResult`]. Detector failures and
/// degenerate geometry degrade to a resultless cycle and the session
/// continues; a frame-source error propagates and halts the session.
pub struct CheckIlluminationUseCase {
    source: Box<dyn FrameSource>,
    detector: Box<dyn LandmarkDetector>,
    sink: Box<dyn ResultSink>,
    logger: Box<dyn AnalysisLogger>,
    rasterizer: MaskRasterizer,
    classifier: LuminanceClassifier,
    generator: MaskGenerator,
}

impl CheckIlluminationUseCase {
    pub fn new(
        source: Box<dyn FrameSource>,
        detector: Box<dyn LandmarkDetector>,
        sink: Box<dyn ResultSink>,
        logger: Box<dyn AnalysisLogger>,
    ) -> Self {
        let (width, height) = source.dimensions();
        Self {
            source,
            detector,
            sink,
            logger,
            rasterizer: MaskRasterizer::new(width, height),
            classifier: LuminanceClassifier::new(),
            generator: MaskGenerator::new(),
        }
    }

    /// Runs cycles against `scheduler` until it is stopped or a frame
    /// source error ends the session, then emits the logger summary.
    pub fn run(
        &mut self,
        scheduler: &FrameScheduler,
        ticks: &mut dyn TickSource,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let result = scheduler.run(ticks, &mut || self.run_cycle().map(|_| ()));
        self.logger.summary();
        result
    }

    /// One full detect → mask → classify → generate → publish pass.
    pub fn run_cycle(&mut self) -> Result<CycleOutcome, Box<dyn std::error::Error>> {
        let frame = self.source.grab()?;

        let detect_start = Instant::now();
        let geometry = match self.detector.detect(&frame) {
            Ok(geometry) => geometry,
            Err(e) => {
                log::warn!("landmark detection failed on frame {}: {e}", frame.index());
                None
            }
        };
        self.logger
            .timing("detect", detect_start.elapsed().as_secs_f64() * 1000.0);

        let Some(geometry) = geometry else {
            log::debug!("no face on frame {}", frame.index());
            return Ok(CycleOutcome::NoFace);
        };

        let analyze_start = Instant::now();
        let Some(mask) = self.rasterizer.rasterize(&geometry) else {
            log::debug!("degenerate silhouette on frame {}", frame.index());
            return Ok(CycleOutcome::NoFace);
        };

        let scan = self.classifier.classify(&frame, &mask);
        let masks = self.generator.generate(&scan);
        let Some(result) = IlluminationResult::from_cycle(&scan, masks, frame.index()) else {
            log::debug!("zero face pixels on frame {}", frame.index());
            return Ok(CycleOutcome::NoFace);
        };
        self.logger
            .timing("analyze", analyze_start.elapsed().as_secs_f64() * 1000.0);
        self.logger.metric("shadow_ratio", result.shadow_ratio);
        self.logger.metric("saturation_ratio", result.saturation_ratio);

        self.sink.publish(result);
        Ok(CycleOutcome::Published)
    }
}
