use std::time::Instant;

use edgekit_image::Image;

use crate::{
    error::TransformError,
    transform::{parse_transform_list, TransformEngine, TransformKind},
};

/// Which mapper runs the stages of a pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mapper {
    /// One output sample per coordinate.
    #[default]
    Pixel,
    /// Non-overlapping windows of the given size.
    Window(usize),
}

/// An ordered list of transforms applied one after the other.
///
/// The output of each stage is the input of the next one; the previous image
/// is dropped as soon as the next stage has produced its output.
#[derive(Debug, Clone, PartialEq)]
pub struct Pipeline {
    stages: Vec<TransformKind>,
    mapper: Mapper,
}

impl Pipeline {
    /// Create a pipeline running `stages` with the pixel mapper.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::EmptyPipeline`] if there is no stage.
    pub fn new(stages: Vec<TransformKind>) -> Result<Self, TransformError> {
        if stages.is_empty() {
            return Err(TransformError::EmptyPipeline);
        }
        Ok(Self {
            stages,
            mapper: Mapper::Pixel,
        })
    }

    /// Create a pipeline from a comma separated list of transform names.
    ///
    /// See [`parse_transform_list`] for the accepted syntax.
    pub fn from_names(list: &str) -> Result<Self, TransformError> {
        Self::new(parse_transform_list(list)?)
    }

    /// The canonical edge detection pipeline.
    pub fn edge_detection() -> Self {
        Self {
            stages: TransformKind::EDGE_PIPELINE.to_vec(),
            mapper: Mapper::Pixel,
        }
    }

    /// Run every stage through the given mapper.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::InvalidWindowSize`] for a zero window size.
    pub fn with_mapper(mut self, mapper: Mapper) -> Result<Self, TransformError> {
        if let Mapper::Window(0) = mapper {
            return Err(TransformError::InvalidWindowSize(0));
        }
        self.mapper = mapper;
        Ok(self)
    }

    /// The stages in execution order.
    pub fn stages(&self) -> &[TransformKind] {
        &self.stages
    }

    /// The mapper used by every stage.
    pub fn mapper(&self) -> Mapper {
        self.mapper
    }

    /// Run the pipeline on `image`.
    ///
    /// # Examples
    ///
    /// ```
    /// use edgekit_image::{ColorSample, Image, Point};
    /// use edgekit_imgproc::{Pipeline, TransformEngine, TransformOptions};
    ///
    /// let engine = TransformEngine::new(TransformOptions::default()).unwrap();
    /// let pipeline = Pipeline::from_names("invert,invert").unwrap();
    ///
    /// let image = Image::from_size_val([3, 2].into(), ColorSample::Rgba([1, 2, 3, 4]));
    /// let out = pipeline.run(&engine, image.clone()).unwrap();
    /// assert_eq!(out, image);
    /// ```
    pub fn run(&self, engine: &TransformEngine, image: Image) -> Result<Image, TransformError> {
        self.run_inspect(engine, image, |_, _| Ok::<(), TransformError>(()))
    }

    /// Run the pipeline on `image`, handing every intermediate result to `inspect`.
    ///
    /// The run stops at the first error returned by a stage or by `inspect`.
    pub fn run_inspect<F, E>(
        &self,
        engine: &TransformEngine,
        image: Image,
        mut inspect: F,
    ) -> Result<Image, E>
    where
        F: FnMut(TransformKind, &Image) -> Result<(), E>,
        E: From<TransformError>,
    {
        let mut image = image;
        for &kind in &self.stages {
            let start = Instant::now();
            image = match self.mapper {
                Mapper::Pixel => engine.apply_pixel(&image, kind)?,
                Mapper::Window(window_size) => engine.apply_window(&image, kind, window_size)?,
            };
            log::debug!("stage {kind} done in {:?}", start.elapsed());
            inspect(kind, &image)?;
        }
        Ok(image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::TransformOptions;
    use edgekit_image::{ColorSample, Point};

    #[test]
    fn test_pipeline_config() {
        assert_eq!(Pipeline::new(vec![]), Err(TransformError::EmptyPipeline));
        assert_eq!(
            Pipeline::from_names("nope").err(),
            Some(TransformError::UnknownTransform("nope".to_string()))
        );
        assert_eq!(
            Pipeline::edge_detection().with_mapper(Mapper::Window(0)),
            Err(TransformError::InvalidWindowSize(0))
        );
        let pipeline = Pipeline::from_names("all").unwrap();
        assert_eq!(pipeline, Pipeline::edge_detection());
        assert_eq!(pipeline.mapper(), Mapper::Pixel);
    }

    #[test]
    fn test_pipeline_inspect_order() -> Result<(), TransformError> {
        let engine = TransformEngine::new(TransformOptions::default())?;
        let pipeline = Pipeline::from_names("invert,greyscale")?.with_mapper(Mapper::Window(2))?;
        let image = Image::from_size_val([3, 3].into(), ColorSample::Rgba([0, 0, 65535, 65535]));

        let mut seen = Vec::new();
        let out = pipeline.run_inspect(&engine, image, |kind, img| {
            seen.push((kind, img.at(Point::new(1, 1))));
            Ok::<(), TransformError>(())
        })?;

        let inverted = ColorSample::Rgba([65535, 65535, 0, 65535]);
        let y = inverted.luma();
        assert_eq!(
            seen,
            vec![
                (TransformKind::Invert, inverted),
                (TransformKind::Greyscale, ColorSample::Rgba([y, y, y, 65535])),
            ]
        );
        assert_eq!(out.at(Point::new(2, 2)), ColorSample::Rgba([y, y, y, 65535]));
        Ok(())
    }

    #[test]
    fn test_pipeline_inspect_error_stops() {
        #[derive(Debug, PartialEq)]
        enum StageError {
            Transform(TransformError),
            Stop,
        }
        impl From<TransformError> for StageError {
            fn from(e: TransformError) -> Self {
                StageError::Transform(e)
            }
        }

        let engine = TransformEngine::new(TransformOptions::default()).unwrap();
        let pipeline = Pipeline::from_names("invert,invert,invert").unwrap();
        let image = Image::from_size_val([2, 2].into(), ColorSample::Gray(3));

        let mut calls = 0;
        let res = pipeline.run_inspect(&engine, image, |_, _| {
            calls += 1;
            if calls == 2 {
                Err(StageError::Stop)
            } else {
                Ok(())
            }
        });
        assert_eq!(res, Err(StageError::Stop));
        assert_eq!(calls, 2);
    }
}
