use crate::error::EquipmentError;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::fmt;
use std::fs;
use std::path::Path;

/// Magic-byte signatures of the image formats an agent can attach.
const SIGNATURES: &[(&[u8], &str)] = &[
    (b"\x89PNG\r\n\x1a\n", "image/png"),
    (b"\xFF\xD8\xFF", "image/jpeg"),
    (b"GIF87a", "image/gif"),
    (b"GIF89a", "image/gif"),
];

/// Sizes of the known BMP info headers (CORE, INFO, V2..V5).
const BMP_DIB_HEADER_SIZES: [u32; 6] = [12, 40, 52, 56, 108, 124];

/// A self-contained image, encoded as `data:<mime>;base64,<payload>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DataUri {
    uri: String,
    mime_len: usize,
}

impl DataUri {
    /// Encodes raw image bytes. The image type is detected from the content,
    /// not from a file name.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, EquipmentError> {
        let mime = sniff_mime(bytes).ok_or_else(|| {
            EquipmentError::UnsupportedImage("content is not a PNG, JPEG, GIF, WebP or BMP image".to_string())
        })?;
        let uri = format!("data:{};base64,{}", mime, STANDARD.encode(bytes));
        Ok(Self {
            uri,
            mime_len: mime.len(),
        })
    }

    /// Reads a local image file and encodes it.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, EquipmentError> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|e| EquipmentError::ImageRead {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_bytes(&bytes)
    }

    pub fn mime_type(&self) -> &str {
        &self.uri["data:".len().."data:".len() + self.mime_len]
    }

    pub fn as_str(&self) -> &str {
        &self.uri
    }

    /// Decodes the payload back into raw bytes.
    pub fn decode(&self) -> Result<Vec<u8>, EquipmentError> {
        let payload = self
            .uri
            .split_once(',')
            .map(|(_, payload)| payload)
            .unwrap_or_default();
        STANDARD
            .decode(payload)
            .map_err(|e| EquipmentError::UnsupportedImage(e.to_string()))
    }
}

impl fmt::Display for DataUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.uri)
    }
}

fn sniff_mime(bytes: &[u8]) -> Option<&'static str> {
    if bytes.len() >= 12 && &bytes[..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
        return Some("image/webp");
    }
    if is_bmp(bytes) {
        return Some("image/bmp");
    }
    SIGNATURES
        .iter()
        .find(|(signature, _)| bytes.starts_with(signature))
        .map(|(_, mime)| *mime)
}

/// `BM` alone is too weak a signature; also require a known info header size
/// right after the 14-byte file header.
fn is_bmp(bytes: &[u8]) -> bool {
    if bytes.len() < 26 || !bytes.starts_with(b"BM") {
        return false;
    }
    let dib_size = u32::from_le_bytes([bytes[14], bytes[15], bytes[16], bytes[17]]);
    BMP_DIB_HEADER_SIZES.contains(&dib_size)
}
