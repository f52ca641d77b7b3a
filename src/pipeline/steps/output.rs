use encoding_rs::Encoding;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::borrow::Cow;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;
use tracing::{info, instrument};

use crate::constants::OUTPUT_INDENT;
use crate::error::{ConvertError, Result};
use crate::types::ComponentRecord;

/// Render records as a JSON array with 4-space indentation. Non-ASCII text
/// is kept as-is.
pub fn render_json(records: &[ComponentRecord]) -> Result<String> {
    let mut buf = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(OUTPUT_INDENT));
    records.serialize(&mut serializer)?;
    String::from_utf8(buf).map_err(|e| ConvertError::Io(io::Error::new(io::ErrorKind::InvalidData, e)))
}

/// Write the document to `path` in the given encoding, replacing any
/// existing file, then confirm it is on disk. Returns the size in bytes.
#[instrument(skip_all, fields(output = %path.display(), records = records.len()))]
pub fn write_output(
    records: &[ComponentRecord],
    path: &Path,
    encoding: &'static Encoding,
) -> Result<u64> {
    info!("💾 Saving to JSON file: {}", path.display());

    let json = render_json(records)?;
    let bytes = encode_document(&json, encoding)?;

    {
        let mut file = File::create(path)?;
        file.write_all(&bytes)?;
        file.flush()?;
    }

    let size = match fs::metadata(path) {
        Ok(meta) if meta.is_file() && meta.len() > 0 => meta.len(),
        Ok(_) => return Err(ConvertError::WriteVerification(path.to_path_buf())),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(ConvertError::WriteVerification(path.to_path_buf()))
        }
        Err(e) => return Err(e.into()),
    };

    info!("✅ Successfully saved {} components ({} bytes)", records.len(), size);
    Ok(size)
}

/// Encode the rendered document. UTF-16 is written with a byte order mark;
/// every other charset goes through `Encoding::encode`, which would otherwise
/// fall back to UTF-8 for UTF-16.
pub fn encode_document<'a>(json: &'a str, encoding: &'static Encoding) -> Result<Cow<'a, [u8]>> {
    if encoding == encoding_rs::UTF_16LE || encoding == encoding_rs::UTF_16BE {
        let big_endian = encoding == encoding_rs::UTF_16BE;
        let mut bytes = Vec::with_capacity(2 + json.len() * 2);
        for unit in std::iter::once(0xFEFF).chain(json.encode_utf16()) {
            let pair = if big_endian { unit.to_be_bytes() } else { unit.to_le_bytes() };
            bytes.extend_from_slice(&pair);
        }
        return Ok(Cow::Owned(bytes));
    }

    let (bytes, used, had_errors) = encoding.encode(json);
    if had_errors || used != encoding {
        return Err(ConvertError::Encoding {
            encoding: encoding.name(),
        });
    }
    Ok(bytes)
}
