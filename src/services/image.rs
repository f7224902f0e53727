//! Product image encoding.

use base64::Engine;

/// An uploaded image attached to a new product.
#[derive(Debug, Clone)]
pub struct ImageFile {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub data: Vec<u8>,
}

impl ImageFile {
    /// The upload's `image/*` content type, else a guess from the file name.
    pub fn mime(&self) -> String {
        match &self.content_type {
            Some(ct) if ct.starts_with("image/") => ct.clone(),
            _ => mime_guess::from_path(self.file_name.as_deref().unwrap_or_default())
                .first_or_octet_stream()
                .to_string(),
        }
    }
}

/// Encode the image as a `data:` URI.
pub fn encode_data_uri(image: &ImageFile) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(&image.data);
    format!("data:{};base64,{}", image.mime(), encoded)
}
