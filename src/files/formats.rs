//! Supported media table.
//!
//! See <https://docs.mocomoco.ai/faq> for the formats the service accepts.

use std::path::Path;

/// Whether a format carries audio only or video.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Audio,
    Video,
}

/// One accepted file format.
#[derive(Debug, Clone, Copy)]
pub struct MediaFormat {
    /// Lowercase extension without the leading dot.
    pub extension: &'static str,
    pub content_type: &'static str,
    pub kind: MediaKind,
}

const fn format(extension: &'static str, content_type: &'static str, kind: MediaKind) -> MediaFormat {
    MediaFormat {
        extension,
        content_type,
        kind,
    }
}

/// Formats accepted by mocoVoice, in display order.
pub const SUPPORTED_FORMATS: &[MediaFormat] = &[
    format("wav", "audio/x-wav", MediaKind::Audio),
    format("mp3", "audio/mpeg", MediaKind::Audio),
    format("m4a", "audio/mp4", MediaKind::Audio),
    format("caf", "audio/x-caf", MediaKind::Audio),
    format("aiff", "audio/x-aiff", MediaKind::Audio),
    format("wma", "audio/x-ms-wma", MediaKind::Audio),
    format("flac", "audio/flac", MediaKind::Audio),
    format("ogg", "audio/ogg", MediaKind::Audio),
    format("aac", "audio/aac", MediaKind::Audio),
    format("avi", "video/x-msvideo", MediaKind::Video),
    format("mp4", "video/mp4", MediaKind::Video),
    format("rmvb", "application/vnd.rn-realmedia-vbr", MediaKind::Video),
    format("flv", "video/x-flv", MediaKind::Video),
    format("mov", "video/quicktime", MediaKind::Video),
    format("wm", "video/x-ms-wm", MediaKind::Video),
];

/// Lowercased extension of `path`, if it has one.
pub fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
}

/// Look up the format for `path` by its extension, ignoring case.
pub fn lookup(path: &Path) -> Option<&'static MediaFormat> {
    let ext = extension_of(path)?;
    SUPPORTED_FORMATS.iter().find(|f| f.extension == ext)
}

/// Check if path has a supported media extension.
pub fn is_supported(path: &Path) -> bool {
    lookup(path).is_some()
}

/// Content type to upload `path` with.
pub fn content_type_for(path: &Path) -> Option<&'static str> {
    lookup(path).map(|f| f.content_type)
}

/// Dotted extensions of the given kind, e.g. `".wav"`.
pub fn extensions_of_kind(kind: MediaKind) -> Vec<String> {
    SUPPORTED_FORMATS
        .iter()
        .filter(|f| f.kind == kind)
        .map(|f| format!(".{}", f.extension))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_ignores_case() {
        assert_eq!(content_type_for(Path::new("a.WAV")), Some("audio/x-wav"));
        assert_eq!(content_type_for(Path::new("/x/y/clip.Mp4")), Some("video/mp4"));
    }

    #[test]
    fn test_unsupported_and_missing_extensions() {
        assert!(!is_supported(Path::new("notes.txt")));
        assert!(!is_supported(Path::new("audio")));
        assert!(!is_supported(Path::new("archive.wav.zip")));
        assert!(!is_supported(Path::new(".wav")));
    }

    #[test]
    fn test_table_has_unique_lowercase_extensions() {
        let mut seen = std::collections::HashSet::new();
        for f in SUPPORTED_FORMATS {
            assert_eq!(f.extension, f.extension.to_lowercase());
            assert!(seen.insert(f.extension), "duplicate {}", f.extension);
        }
        assert_eq!(SUPPORTED_FORMATS.len(), 15);
    }

    #[test]
    fn test_extensions_by_kind() {
        let audio = extensions_of_kind(MediaKind::Audio);
        let video = extensions_of_kind(MediaKind::Video);
        assert_eq!(audio.len() + video.len(), SUPPORTED_FORMATS.len());
        assert_eq!(audio[0], ".wav");
        assert!(video.contains(&".rmvb".to_string()));
    }
}
