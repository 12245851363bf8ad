//! Recipe image selection and validation.
//!
//! Validation is by declared MIME type and size only; the bytes are never decoded.

use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;

use image::{ImageFormat, ImageReader};

use crate::error::ImageError;

/// Maximum file size for recipe images (5MB).
pub const MAX_FILE_SIZE: usize = 5 * 1024 * 1024;

/// Content type used when nothing better can be determined.
pub const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// A file chosen by the user, as handed over by the picker or a drop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    pub file_name: String,
    /// Declared MIME type (e.g., "image/png").
    pub content_type: String,
    /// Shared so that state snapshots don't copy the payload.
    pub data: Arc<[u8]>,
}

impl ImageFile {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        data: impl Into<Arc<[u8]>>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            data: data.into(),
        }
    }

    /// Load a file from disk. The content type comes from the extension,
    /// falling back to sniffing the bytes.
    pub fn from_path(path: &Path) -> Result<Self, ImageError> {
        let data = std::fs::read(path)
            .map_err(|e| ImageError::Unreadable(format!("{}: {}", path.display(), e)))?;

        let content_type = ImageFormat::from_path(path)
            .ok()
            .map(|f| f.to_mime_type().to_string())
            .or_else(|| sniff_content_type(&data))
            .unwrap_or_else(|| FALLBACK_CONTENT_TYPE.to_string());

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string());

        Ok(Self::new(file_name, content_type, data))
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Size in megabytes with two decimals, e.g. "1.25 MB".
    pub fn size_label(&self) -> String {
        format!("{:.2} MB", self.size() as f64 / 1024.0 / 1024.0)
    }

    pub fn validate(&self) -> Result<(), ImageError> {
        validate_image_file(self.size(), &self.content_type)
    }
}

/// Check a candidate image by size and declared content type.
///
/// Size is checked first, so an oversized non-image reports `FileTooLarge`.
pub fn validate_image_file(size: usize, content_type: &str) -> Result<(), ImageError> {
    if size > MAX_FILE_SIZE {
        return Err(ImageError::FileTooLarge { size });
    }
    if !content_type.starts_with("image/") {
        return Err(ImageError::InvalidFileType {
            content_type: content_type.to_string(),
        });
    }
    Ok(())
}

/// Guess a MIME type from the leading bytes.
pub fn sniff_content_type(data: &[u8]) -> Option<String> {
    let reader = ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .ok()?;
    reader.format().map(|f| f.to_mime_type().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_limit_accepted() {
        assert_eq!(validate_image_file(MAX_FILE_SIZE, "image/png"), Ok(()));
        assert_eq!(MAX_FILE_SIZE, 5_242_880);
    }

    #[test]
    fn test_one_byte_over_limit_rejected() {
        assert_eq!(
            validate_image_file(MAX_FILE_SIZE + 1, "image/png"),
            Err(ImageError::FileTooLarge { size: 5_242_881 })
        );
    }

    #[test]
    fn test_non_image_type_rejected() {
        assert_eq!(
            validate_image_file(10, "text/plain"),
            Err(ImageError::InvalidFileType {
                content_type: "text/plain".to_string()
            })
        );
    }

    #[test]
    fn test_size_checked_before_type() {
        assert!(matches!(
            validate_image_file(MAX_FILE_SIZE + 1, "text/plain"),
            Err(ImageError::FileTooLarge { .. })
        ));
    }

    #[test]
    fn test_size_label() {
        let file = ImageFile::new("cake.png", "image/png", vec![0u8; 1024 * 1024 + 262_144]);
        assert_eq!(file.size_label(), "1.25 MB");
    }

    #[test]
    fn test_sniff_png_header() {
        let png_magic = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0];
        assert_eq!(sniff_content_type(&png_magic).as_deref(), Some("image/png"));
    }

    #[test]
    fn test_sniff_unknown_bytes() {
        assert_eq!(sniff_content_type(b"not an image"), None);
    }

    #[test]
    fn test_from_path_uses_extension() {
        let dir = std::env::temp_dir().join(format!("essenza-image-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("pie.jpg");
        std::fs::write(&path, b"jpeg-ish").unwrap();

        let file = ImageFile::from_path(&path).unwrap();
        assert_eq!(file.file_name, "pie.jpg");
        assert_eq!(file.content_type, "image/jpeg");
        assert_eq!(file.size(), 8);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_from_missing_path() {
        let result = ImageFile::from_path(Path::new("/definitely/not/here.png"));
        assert!(matches!(result, Err(ImageError::Unreadable(_))));
    }
}
