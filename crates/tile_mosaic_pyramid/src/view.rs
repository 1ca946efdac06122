//! Handoff of realized pyramids to a rendering backend.

use crate::error::{Error, Result};
use crate::raw_bytes::IntoRawBytes;
use crate::volume::Volume;

use tile_mosaic_core::Axis5;

use log::info;

/// A realized pyramid in the form viewers consume: one volume per level, all of the same rank,
/// highest resolution first, plus the axis whose indices should render as separate channels
/// rather than as a slider.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MultiscaleImage {
    levels: Vec<Volume>,
    channel_axis: Axis5,
}

impl MultiscaleImage {
    /// Bundles realized levels for a viewer.
    ///
    /// Only the plane dimensions may vary across levels; every level must agree with level 0 on
    /// `t`, `c`, and `z`.
    pub fn new(levels: Vec<Volume>, channel_axis: Axis5) -> Result<Self> {
        if let Some((first, rest)) = levels.split_first() {
            for (i, level) in rest.iter().enumerate() {
                let expected = first.shape();
                let actual = level.shape();
                if (actual.t, actual.c, actual.z) != (expected.t, expected.c, expected.z) {
                    return Err(Error::LevelShapeMismatch {
                        level: i + 1,
                        expected: *expected,
                        actual: *actual,
                    });
                }
            }
        }

        Ok(Self {
            levels,
            channel_axis,
        })
    }

    #[inline]
    pub fn levels(&self) -> &[Volume] {
        &self.levels[..]
    }

    #[inline]
    pub fn num_levels(&self) -> u8 {
        self.levels.len() as u8
    }

    #[inline]
    pub fn channel_axis(&self) -> Axis5 {
        self.channel_axis
    }
}

/// The boundary a rendering backend implements to receive images. Keeping it narrow means the
/// pyramid machinery never depends on how pixels end up on screen.
pub trait ViewerSink {
    fn view_multiscale(&mut self, image: &MultiscaleImage);
}

/// A stand-in viewer that reports what it was handed through the logging facade instead of
/// opening a window.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogViewer;

impl ViewerSink for LogViewer {
    fn view_multiscale(&mut self, image: &MultiscaleImage) {
        info!(
            "viewing {} level(s) with channel axis {:?}",
            image.num_levels(),
            image.channel_axis()
        );
        for (level, volume) in image.levels().iter().enumerate() {
            info!(
                "level {}: shape {:?}, {} byte(s) of pixels",
                level,
                volume.shape(),
                volume.into_raw_bytes().len()
            );
        }
    }
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pyramid::PyramidSpec;
    use crate::synth::SyntheticTiles;
    use crate::volume::Volume5;

    use tile_mosaic_core::{Point2i, VolumeShape};

    fn realized_levels() -> Vec<Volume> {
        let spec = PyramidSpec {
            shape: VolumeShape::new(2, 2, 1, 16, 16),
            tile_shape: Point2i([8, 8]),
            levels: 3,
        };

        spec.build().unwrap().realize_all(&SyntheticTiles).unwrap()
    }

    #[test]
    fn bundles_levels_with_channel_axis() {
        let image = MultiscaleImage::new(realized_levels(), Axis5::C).unwrap();

        assert_eq!(image.num_levels(), 3);
        assert_eq!(image.channel_axis(), Axis5::C);
        assert_eq!(image.levels()[1].shape(), &VolumeShape::new(2, 2, 1, 8, 8));
    }

    #[test]
    fn rejects_levels_with_mixed_outer_dimensions() {
        let mut levels = realized_levels();
        levels[2] = Volume5::fill(VolumeShape::new(1, 2, 1, 4, 4), 0);

        let result = MultiscaleImage::new(levels, Axis5::C);

        assert!(matches!(
            result,
            Err(Error::LevelShapeMismatch { level: 2, .. })
        ));
    }

    #[test]
    fn empty_level_list_is_fine() {
        let image = MultiscaleImage::new(Vec::new(), Axis5::T).unwrap();

        assert_eq!(image.num_levels(), 0);
    }

    #[test]
    fn sinks_observe_the_handoff() {
        #[derive(Default)]
        struct RecordingSink {
            shapes: Vec<VolumeShape>,
            channel_axis: Option<Axis5>,
        }

        impl ViewerSink for RecordingSink {
            fn view_multiscale(&mut self, image: &MultiscaleImage) {
                self.shapes = image.levels().iter().map(|v| *v.shape()).collect();
                self.channel_axis = Some(image.channel_axis());
            }
        }

        let image = MultiscaleImage::new(realized_levels(), Axis5::C).unwrap();

        let mut sink = RecordingSink::default();
        sink.view_multiscale(&image);

        assert_eq!(sink.channel_axis, Some(Axis5::C));
        assert_eq!(
            sink.shapes,
            vec![
                VolumeShape::new(2, 2, 1, 16, 16),
                VolumeShape::new(2, 2, 1, 8, 8),
                VolumeShape::new(2, 2, 1, 4, 4),
            ]
        );
    }

    #[test]
    fn log_viewer_accepts_any_image() {
        let image = MultiscaleImage::new(realized_levels(), Axis5::C).unwrap();

        // Only asserts that the handoff completes; output goes to the logger.
        LogViewer.view_multiscale(&image);
    }
}
