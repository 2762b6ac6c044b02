use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::detection::domain::landmark_detector::LandmarkDetector;
use crate::detection::domain::landmark_geometry::{LandmarkGeometry, Point};
use crate::shared::frame::Frame;

#[derive(Error, Debug)]
pub enum LandmarkFileError {
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse landmark file: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Deserialize)]
struct GeometryDoc {
    #[serde(default)]
    silhouette: Vec<[f64; 2]>,
    #[serde(default)]
    lips_outer: Vec<[f64; 2]>,
    #[serde(default)]
    lips_inner: Vec<[f64; 2]>,
    #[serde(default)]
    left_eye: Vec<[f64; 2]>,
    #[serde(default)]
    right_eye: Vec<[f64; 2]>,
    #[serde(default)]
    left_eyebrow: Vec<[f64; 2]>,
    #[serde(default)]
    right_eyebrow: Vec<[f64; 2]>,
    #[serde(default)]
    nose: Vec<[f64; 2]>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LandmarkDoc {
    PerFrame(Vec<Option<GeometryDoc>>),
    Single(GeometryDoc),
}

enum Script {
    Single(LandmarkGeometry),
    PerFrame(Vec<Option<LandmarkGeometry>>),
}

/// Replays landmark geometry from a JSON fixture, standing in for a live
/// mesh detector in the CLI and in integration-style tests.
///
/// A single geometry object applies to every frame. An array is indexed
/// by frame index, with `null` entries meaning "no face found" and frames
/// past the end of the array likewise yielding no face.
pub struct FileLandmarkDetector {
    script: Script,
}

impl FileLandmarkDetector {
    pub fn from_path(path: &Path) -> Result<Self, LandmarkFileError> {
        let text = fs::read_to_string(path).map_err(|source| LandmarkFileError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, LandmarkFileError> {
        let doc: LandmarkDoc = serde_json::from_str(text)?;
        let script = match doc {
            LandmarkDoc::Single(geometry) => Script::Single(to_geometry(geometry)),
            LandmarkDoc::PerFrame(entries) => Script::PerFrame(
                entries
                    .into_iter()
                    .map(|entry| entry.map(to_geometry))
                    .collect(),
            ),
        };
        Ok(Self { script })
    }
}

fn to_geometry(doc: GeometryDoc) -> LandmarkGeometry {
    fn points(raw: Vec<[f64; 2]>) -> Vec<Point> {
        raw.into_iter().map(|[x, y]| (x, y)).collect()
    }

    LandmarkGeometry {
        silhouette: points(doc.silhouette),
        lips_outer: points(doc.lips_outer),
        lips_inner: points(doc.lips_inner),
        left_eye: points(doc.left_eye),
        right_eye: points(doc.right_eye),
        left_eyebrow: points(doc.left_eyebrow),
        right_eyebrow: points(doc.right_eyebrow),
        nose: points(doc.nose),
    }
}

impl LandmarkDetector for FileLandmarkDetector {
    fn detect(
        &mut self,
        frame: &Frame,
    ) -> Result<Option<LandmarkGeometry>, Box<dyn std::error::Error>> {
        Ok(match &self.script {
            Script::Single(geometry) => Some(geometry.clone()),
            Script::PerFrame(entries) => entries.get(frame.index()).cloned().flatten(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame_at(index: usize) -> Frame {
        Frame::new(vec![0; 4 * 4 * 3], 4, 4, 3, index)
    }

    #[test]
    fn test_single_geometry_applies_to_every_frame() {
        let mut detector = FileLandmarkDetector::from_json(
            r#"{"silhouette": [[0, 0], [10, 0], [10, 10], [0, 10]]}"#,
        )
        .unwrap();

        for index in [0, 1, 99] {
            let geometry = detector.detect(&frame_at(index)).unwrap().unwrap();
            assert_eq!(geometry.silhouette.len(), 4);
            assert_eq!(geometry.silhouette[1], (10.0, 0.0));
            assert!(geometry.lips_outer.is_empty());
        }
    }

    #[test]
    fn test_per_frame_array_with_null_gaps() {
        let mut detector = FileLandmarkDetector::from_json(
            r#"[
                {"silhouette": [[0, 0], [4, 0], [2, 4]]},
                null,
                {"silhouette": [[1, 1], [3, 1], [2, 3]], "nose": [[2, 2], [2.5, 2], [2, 2.5]]}
            ]"#,
        )
        .unwrap();

        assert!(detector.detect(&frame_at(0)).unwrap().is_some());
        assert!(detector.detect(&frame_at(1)).unwrap().is_none());
        let third = detector.detect(&frame_at(2)).unwrap().unwrap();
        assert_eq!(third.nose.len(), 3);
    }

    #[test]
    fn test_frames_past_the_script_have_no_face() {
        let mut detector = FileLandmarkDetector::from_json(
            r#"[{"silhouette": [[0, 0], [4, 0], [2, 4]]}]"#,
        )
        .unwrap();
        assert!(detector.detect(&frame_at(5)).unwrap().is_none());
    }

    #[test]
    fn test_malformed_json_is_a_parse_error() {
        let result = FileLandmarkDetector::from_json("{not json");
        assert!(matches!(result, Err(LandmarkFileError::Parse(_))));
    }

    #[test]
    fn test_missing_file_is_an_io_error() {
        let result = FileLandmarkDetector::from_path(Path::new("/nonexistent/landmarks.json"));
        assert!(matches!(result, Err(LandmarkFileError::Io { .. })));
    }

    #[test]
    fn test_from_path_reads_fixture() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("landmarks.json");
        fs::write(&path, r#"{"silhouette": [[0, 0], [8, 0], [4, 8]]}"#).unwrap();

        let mut detector = FileLandmarkDetector::from_path(&path).unwrap();
        let geometry = detector.detect(&frame_at(0)).unwrap().unwrap();
        assert_eq!(geometry.silhouette.len(), 3);
    }
}
