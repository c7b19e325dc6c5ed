//! Image upload policy.

use crate::error::UploadError;

/// Form field that carries the post image.
pub const IMAGE_FIELD: &str = "image";

/// URL prefix under which stored images are served.
pub const UPLOADS_ROUTE: &str = "/uploads";

const ALLOWED_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];
const ALLOWED_CONTENT_TYPES: [&str; 3] = ["image/jpeg", "image/jpg", "image/png"];

/// An image that passed the type filter, buffered until it is stored.
///
/// Only [`ImageUpload::accept`] builds one, so every value holds a JPG or PNG
/// by extension and declared content type.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    file_name: String,
    content_type: String,
    bytes: Vec<u8>,
}

impl ImageUpload {
    /// Check an incoming file against the type filter.
    ///
    /// The extension (case-insensitive) must be `jpg`, `jpeg` or `png` AND
    /// the declared content type must be a JPEG or PNG image.
    pub fn accept(original_name: &str, content_type: Option<&str>) -> Result<Self, UploadError> {
        let file_name = base_name(original_name);
        let content_type = content_type
            .and_then(|ct| ct.split(';').next())
            .map(|essence| essence.trim().to_ascii_lowercase())
            .unwrap_or_default();

        if file_name.is_empty() || !has_allowed_extension(file_name) {
            return Err(UploadError::UnsupportedType);
        }
        if !ALLOWED_CONTENT_TYPES.contains(&content_type.as_str()) {
            return Err(UploadError::UnsupportedType);
        }

        Ok(Self {
            file_name: file_name.to_string(),
            content_type,
            bytes: Vec::new(),
        })
    }

    pub fn extend(&mut self, chunk: &[u8]) {
        self.bytes.extend_from_slice(chunk);
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Name under which the file is stored: `{millis}-{original name}`.
    pub fn stored_name(&self, timestamp_millis: i64) -> String {
        format!("{}-{}", timestamp_millis, self.file_name)
    }
}

/// Final path component of a client-supplied file name.
fn base_name(name: &str) -> &str {
    name.rsplit(['/', '\\']).next().unwrap_or_default().trim()
}

fn has_allowed_extension(file_name: &str) -> bool {
    match file_name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => {
            ALLOWED_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str())
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_jpeg_and_png() {
        assert!(ImageUpload::accept("cat.png", Some("image/png")).is_ok());
        assert!(ImageUpload::accept("cat.JPG", Some("image/jpeg")).is_ok());
        assert!(ImageUpload::accept("cat.jpeg", Some("image/jpeg; charset=binary")).is_ok());
    }

    #[test]
    fn test_rejects_other_types() {
        for (name, ct) in [
            ("cat.gif", Some("image/gif")),
            ("cat.gif", Some("image/png")),
            ("cat.png", Some("text/plain")),
            ("cat.png", None),
            ("cat.pngx", Some("image/png")),
            (".png", Some("image/png")),
            ("cat", Some("image/png")),
        ] {
            assert!(
                matches!(ImageUpload::accept(name, ct), Err(UploadError::UnsupportedType)),
                "{name} / {ct:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_strips_client_directories() {
        let upload = ImageUpload::accept("../../etc/cat.png", Some("image/png")).unwrap();
        assert_eq!(upload.file_name(), "cat.png");

        let upload = ImageUpload::accept("C:\\photos\\dog.jpg", Some("image/jpeg")).unwrap();
        assert_eq!(upload.file_name(), "dog.jpg");
    }

    #[test]
    fn test_stored_name_prefixes_timestamp() {
        let mut upload = ImageUpload::accept("cat.png", Some("image/png")).unwrap();
        upload.extend(b"\x89PNG");
        assert_eq!(upload.stored_name(1700000000000), "1700000000000-cat.png");
        assert_eq!(upload.bytes(), b"\x89PNG");
    }
}
