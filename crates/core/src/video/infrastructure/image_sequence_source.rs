use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::shared::frame::Frame;
use crate::video::domain::frame_source::FrameSource;

#[derive(Error, Debug)]
pub enum ImageSequenceError {
    #[error("image sequence is empty")]
    Empty,
    #[error("end of image sequence")]
    EndOfSequence,
    #[error("failed to decode {path:?}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("{path:?} is {actual_width}x{actual_height}, sequence is {width}x{height}")]
    DimensionMismatch {
        path: PathBuf,
        width: u32,
        height: u32,
        actual_width: u32,
        actual_height: u32,
    },
}

/// Adapts a list of image files to the live [`FrameSource`] contract.
///
/// Each `grab` decodes the next file in order as an RGB frame with a
/// monotonically increasing index, so a directory of stills replays as a
/// video feed. The first image fixes the sequence dimensions; any later
/// frame of a different size is rejected. Exhaustion surfaces as
/// [`ImageSequenceError::EndOfSequence`], which callers can downcast to
/// end a session cleanly.
pub struct ImageSequenceSource {
    paths: VecDeque<PathBuf>,
    width: u32,
    height: u32,
    pending: Option<Frame>,
    next_index: usize,
}

impl ImageSequenceSource {
    /// Decodes the first image eagerly to fix the sequence dimensions.
    pub fn open(paths: Vec<PathBuf>) -> Result<Self, ImageSequenceError> {
        let mut paths = VecDeque::from(paths);
        let first_path = paths.pop_front().ok_or(ImageSequenceError::Empty)?;
        let first = decode(&first_path, 0)?;
        Ok(Self {
            paths,
            width: first.width(),
            height: first.height(),
            pending: Some(first),
            next_index: 1,
        })
    }
}

fn decode(path: &Path, index: usize) -> Result<Frame, ImageSequenceError> {
    let decoded = image::open(path).map_err(|source| ImageSequenceError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    let rgb = decoded.to_rgb8();
    let (width, height) = rgb.dimensions();
    Ok(Frame::new(rgb.into_raw(), width, height, 3, index))
}

impl FrameSource for ImageSequenceSource {
    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn grab(&mut self) -> Result<Frame, Box<dyn std::error::Error>> {
        if let Some(frame) = self.pending.take() {
            return Ok(frame);
        }

        let path = self.paths.pop_front().ok_or(ImageSequenceError::EndOfSequence)?;
        let frame = decode(&path, self.next_index)?;
        if (frame.width(), frame.height()) != (self.width, self.height) {
            return Err(Box::new(ImageSequenceError::DimensionMismatch {
                path,
                width: self.width,
                height: self.height,
                actual_width: frame.width(),
                actual_height: frame.height(),
            }));
        }
        self.next_index += 1;
        Ok(frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_test_image(dir: &Path, name: &str, width: u32, height: u32, rgb: [u8; 3]) -> PathBuf {
        let path = dir.join(name);
        let mut img = image::RgbImage::new(width, height);
        for pixel in img.pixels_mut() {
            *pixel = image::Rgb(rgb);
        }
        img.save(&path).unwrap();
        path
    }

    #[test]
    fn test_open_empty_sequence_fails() {
        let result = ImageSequenceSource::open(vec![]);
        assert!(matches!(result, Err(ImageSequenceError::Empty)));
    }

    #[test]
    fn test_open_fixes_dimensions_from_first_image() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_test_image(dir.path(), "a.png", 64, 48, [10, 20, 30]);
        let source = ImageSequenceSource::open(vec![path]).unwrap();
        assert_eq!(source.dimensions(), (64, 48));
    }

    #[test]
    fn test_grab_yields_frames_in_order_with_indices() {
        let dir = tempfile::tempdir().unwrap();
        let paths = vec![
            write_test_image(dir.path(), "a.png", 8, 8, [10, 0, 0]),
            write_test_image(dir.path(), "b.png", 8, 8, [0, 20, 0]),
            write_test_image(dir.path(), "c.png", 8, 8, [0, 0, 30]),
        ];
        let mut source = ImageSequenceSource::open(paths).unwrap();

        let first = source.grab().unwrap();
        assert_eq!(first.index(), 0);
        assert_eq!(&first.data()[..3], &[10, 0, 0]);

        let second = source.grab().unwrap();
        assert_eq!(second.index(), 1);
        assert_eq!(&second.data()[..3], &[0, 20, 0]);

        let third = source.grab().unwrap();
        assert_eq!(third.index(), 2);
        assert_eq!(&third.data()[..3], &[0, 0, 30]);
    }

    #[test]
    fn test_exhaustion_is_end_of_sequence() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_test_image(dir.path(), "a.png", 8, 8, [1, 2, 3]);
        let mut source = ImageSequenceSource::open(vec![path]).unwrap();
        source.grab().unwrap();

        let err = source.grab().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ImageSequenceError>(),
            Some(ImageSequenceError::EndOfSequence)
        ));
    }

    #[test]
    fn test_undecodable_file_is_a_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"not an image").unwrap();

        let result = ImageSequenceSource::open(vec![path]);
        assert!(matches!(result, Err(ImageSequenceError::Decode { .. })));
    }

    #[test]
    fn test_mismatched_dimensions_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let paths = vec![
            write_test_image(dir.path(), "a.png", 8, 8, [0, 0, 0]),
            write_test_image(dir.path(), "b.png", 16, 8, [0, 0, 0]),
        ];
        let mut source = ImageSequenceSource::open(paths).unwrap();
        source.grab().unwrap();

        let err = source.grab().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ImageSequenceError>(),
            Some(ImageSequenceError::DimensionMismatch { .. })
        ));
    }
}
