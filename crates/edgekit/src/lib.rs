//! Parallel Canny-style edge detection on raster images.
//!
//! ```
//! use edgekit::image::{ColorSample, Image};
//! use edgekit::imgproc::{Pipeline, TransformEngine, TransformOptions};
//!
//! let engine = TransformEngine::new(TransformOptions::default()).unwrap();
//! let image = Image::from_size_val([16, 16].into(), ColorSample::Gray(1000));
//! let edges = Pipeline::edge_detection().run(&engine, image).unwrap();
//! assert_eq!((edges.width(), edges.height()), (16, 16));
//! ```

#[doc(inline)]
pub use edgekit_image as image;

#[doc(inline)]
pub use edgekit_imgproc as imgproc;
