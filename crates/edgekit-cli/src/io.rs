use std::path::{Path, PathBuf};

use edgekit::image::{Bounds, Image, ImageError, ImageSize, CHANNELS};
use edgekit::imgproc::TransformError;
use image::{DynamicImage, ImageBuffer, Rgba};

/// An error type for reading, processing and writing image files.
#[derive(thiserror::Error, Debug)]
pub enum IoError {
    /// Error when the file does not exist.
    #[error("File does not exist: {0}")]
    FileDoesNotExist(PathBuf),

    /// Invalid file extension.
    #[error("File does not have a valid extension: {0}")]
    InvalidFileExtension(PathBuf),

    /// Error to open or write the file.
    #[error("Failed to manipulate the file. {0}")]
    FileError(#[from] std::io::Error),

    /// Error to create the image.
    #[error("Failed to create image. {0}")]
    ImageCreationError(#[from] ImageError),

    /// Error to decode or encode the image.
    #[error("Failed to decode the image. {0}")]
    ImageDecodeError(#[from] image::ImageError),

    /// Error while running a transform.
    #[error(transparent)]
    Transform(#[from] TransformError),
}

/// The file formats the tool reads and writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    /// Written as 16-bit RGBA.
    Png,
    /// Written as 8-bit RGB.
    Jpeg,
}

impl FileFormat {
    /// Pick the format from the file extension, ignoring case.
    pub fn from_path(path: &Path) -> Result<Self, IoError> {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());
        match ext.as_deref() {
            Some("png") => Ok(FileFormat::Png),
            Some("jpg") | Some("jpeg") => Ok(FileFormat::Jpeg),
            _ => Err(IoError::InvalidFileExtension(path.to_path_buf())),
        }
    }
}

/// Decode a png or jpeg file into a 16-bit RGBA image anchored at the origin.
pub fn read_image(path: impl AsRef<Path>) -> Result<Image, IoError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(IoError::FileDoesNotExist(path.to_path_buf()));
    }
    FileFormat::from_path(path)?;

    let decoded = image::open(path)?.to_rgba16();
    let size = ImageSize {
        width: decoded.width() as usize,
        height: decoded.height() as usize,
    };
    let image = Image::new(Bounds::from_size(size), decoded.into_raw())?;
    Ok(image)
}

/// Encode `image` to `path`, choosing the format from the extension.
pub fn write_image(path: impl AsRef<Path>, image: &Image) -> Result<(), IoError> {
    let path = path.as_ref();
    let format = FileFormat::from_path(path)?;

    let len = image.as_slice().len();
    let buffer: ImageBuffer<Rgba<u16>, Vec<u16>> = ImageBuffer::from_raw(
        image.width() as u32,
        image.height() as u32,
        image.as_slice().to_vec(),
    )
    .ok_or(ImageError::InvalidChannelShape(
        len,
        image.width() * image.height() * CHANNELS,
    ))?;

    match format {
        FileFormat::Png => buffer.save_with_format(path, image::ImageFormat::Png)?,
        FileFormat::Jpeg => DynamicImage::ImageRgba16(buffer)
            .to_rgb8()
            .save_with_format(path, image::ImageFormat::Jpeg)?,
    }
    Ok(())
}

/// The path of a derived image: `<dir>/<tag>_<file name>`.
pub fn derived_path(path: &Path, tag: &str) -> Result<PathBuf, IoError> {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| IoError::InvalidFileExtension(path.to_path_buf()))?;
    Ok(path.with_file_name(format!("{tag}_{file_name}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use edgekit::image::{ColorSample, Point};

    fn gradient() -> Image {
        Image::from_fn(Bounds::from_size([5, 3].into()), |p| {
            let v = (p.x * 10000 + p.y * 1000) as u16;
            ColorSample::Rgba([v, 65535 - v, 7, 65535])
        })
    }

    #[test]
    fn test_file_format() {
        assert_eq!(
            FileFormat::from_path(Path::new("a/b.PNG")).unwrap(),
            FileFormat::Png
        );
        assert_eq!(
            FileFormat::from_path(Path::new("b.jpeg")).unwrap(),
            FileFormat::Jpeg
        );
        assert!(matches!(
            FileFormat::from_path(Path::new("b.tiff")),
            Err(IoError::InvalidFileExtension(_))
        ));
        assert!(FileFormat::from_path(Path::new("noext")).is_err());
    }

    #[test]
    fn test_derived_path() {
        let out = derived_path(Path::new("/tmp/pics/cat.png"), "sobel").unwrap();
        assert_eq!(out, PathBuf::from("/tmp/pics/sobel_cat.png"));
        let out = derived_path(Path::new("cat.jpg"), "output").unwrap();
        assert_eq!(out, PathBuf::from("output_cat.jpg"));
    }

    #[test]
    fn test_png_roundtrip_is_lossless() -> Result<(), IoError> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("gradient.png");
        let image = gradient();

        write_image(&path, &image)?;
        let back = read_image(&path)?;
        assert_eq!(back, image);
        Ok(())
    }

    #[test]
    fn test_jpeg_write_keeps_size() -> Result<(), IoError> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("gradient.jpg");

        write_image(&path, &gradient())?;
        let back = read_image(&path)?;
        assert_eq!(back.size(), ImageSize { width: 5, height: 3 });
        assert_eq!(back.at(Point::new(0, 0)).alpha(), 65535);
        Ok(())
    }

    #[test]
    fn test_read_missing_file() {
        assert!(matches!(
            read_image("/definitely/not/here.png"),
            Err(IoError::FileDoesNotExist(_))
        ));
    }
}
