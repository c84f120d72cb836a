//! Raw input files as handed to the orchestrator.

/// An uploaded file before classification.
///
/// Ephemeral: created per upload and discarded once parsing completes or
/// fails. Content is kept as bytes so archive containers can be expanded;
/// text formats are decoded on demand.
#[derive(Debug, Clone)]
pub struct RawFile {
    /// File name as supplied by the uploader (or archive member path)
    pub name: String,

    /// Raw content bytes
    pub content: Vec<u8>,
}

impl RawFile {
    /// Create a raw file from a name and content bytes.
    pub fn new(name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    /// Whether the file name marks a zip container.
    pub fn is_archive(&self) -> bool {
        self.name.to_lowercase().ends_with(".zip")
    }

    /// Decode the content as text, lossily, with any leading UTF-8 BOM
    /// stripped.
    pub fn text(&self) -> String {
        let text = String::from_utf8_lossy(&self.content);
        match text.strip_prefix('\u{feff}') {
            Some(stripped) => stripped.to_string(),
            None => text.into_owned(),
        }
    }
}
