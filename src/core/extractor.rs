//! Text extraction from files, behind a pluggable capability registry.

use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

/// Document formats the application knows about but ships no decoder for.
/// Extraction degrades to a "support not installed" sentinel instead of an
/// error, so a missing decoder is a normal state, not a failure.
const OPTIONAL_FORMATS: &[&str] = &["pdf", "docx", "pptx", "xlsx"];

/// Result of a text extraction attempt.
///
/// `Sentinel` carries a human-readable diagnostic (shown in previews) and is
/// treated by the engine as "no usable content": it is never searched, so a
/// pattern that happens to occur inside the marker text cannot produce a
/// false positive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractedText {
    Text(String),
    Sentinel(String),
}

impl ExtractedText {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ExtractedText::Text(t) => Some(t),
            ExtractedText::Sentinel(_) => None,
        }
    }
}

/// Extracts searchable text from one file format.
///
/// Implementations must never panic or propagate errors past this boundary;
/// any internal failure becomes a [`ExtractedText::Sentinel`].
pub trait TextExtractor: Send + Sync {
    fn extract(&self, path: &Path) -> ExtractedText;
}

/// Capability map from lowercase extension to decoder, populated at startup.
pub struct ExtractorRegistry {
    decoders: HashMap<String, Box<dyn TextExtractor>>,
}

impl ExtractorRegistry {
    /// An empty registry; every extraction yields a sentinel.
    pub fn empty() -> Self {
        Self {
            decoders: HashMap::new(),
        }
    }

    /// The default capability set: plain text and CSV.
    pub fn with_defaults() -> Self {
        let mut registry = Self::empty();
        registry.register("txt", Box::new(PlainTextExtractor));
        registry.register("csv", Box::new(CsvExtractor));
        registry
    }

    pub fn register(&mut self, extension: &str, extractor: Box<dyn TextExtractor>) {
        self.decoders
            .insert(extension.to_lowercase(), extractor);
    }

    /// Extracts text from `path`, dispatching on its lowercase extension.
    pub fn extract(&self, path: &Path) -> ExtractedText {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();

        match self.decoders.get(&ext) {
            Some(decoder) => decoder.extract(path),
            None if OPTIONAL_FORMATS.contains(&ext.as_str()) => ExtractedText::Sentinel(
                format!("[{} support not installed]", ext.to_uppercase()),
            ),
            None => ExtractedText::Sentinel(format!("[Unsupported format: .{ext}]")),
        }
    }
}

impl Default for ExtractorRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Direct read with lossy UTF-8 decoding; encoding errors are replaced, not
/// fatal.
pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract(&self, path: &Path) -> ExtractedText {
        match std::fs::read(path) {
            Ok(bytes) => ExtractedText::Text(String::from_utf8_lossy(&bytes).into_owned()),
            Err(e) => ExtractedText::Sentinel(format!("[Error reading file: {e}]")),
        }
    }
}

/// Flattens CSV records into one space-joined text blob.
pub struct CsvExtractor;

impl TextExtractor for CsvExtractor {
    fn extract(&self, path: &Path) -> ExtractedText {
        let file = match File::open(path) {
            Ok(f) => f,
            Err(e) => return ExtractedText::Sentinel(format!("[Error reading file: {e}]")),
        };
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(file);

        let mut text = String::new();
        for record in reader.records() {
            match record {
                Ok(record) => {
                    for field in record.iter() {
                        text.push_str(field);
                        text.push(' ');
                    }
                }
                Err(e) => return ExtractedText::Sentinel(format!("[Error reading file: {e}]")),
            }
        }
        ExtractedText::Text(text)
    }
}
