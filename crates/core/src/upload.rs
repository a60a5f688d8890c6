//! Naming rules for uploaded media.
//!
//! Stored names are `<stem>-<millis>[.<ext>]` where stem and extension are
//! reduced to ASCII alphanumerics, `-` and `_`. Two uploads of the same name
//! within the same millisecond collide; the later one overwrites.

/// Public URL prefix under which stored uploads are served.
pub const UPLOAD_URL_PREFIX: &str = "/uploads";

/// Stem used when the original name has no usable characters.
const FALLBACK_STEM: &str = "file";

/// Replace every character outside `[A-Za-z0-9_-]` with `_`.
pub fn sanitize_component(raw: &str) -> String {
    raw.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Build the on-disk name for an upload received at `timestamp_millis`.
///
/// Any directory components in `original` are discarded first.
pub fn stored_file_name(original: Option<&str>, timestamp_millis: i64) -> String {
    let original = original.unwrap_or_default();
    let basename = original
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default();

    let (stem, ext) = match basename.rsplit_once('.') {
        Some((stem, ext)) => (stem, Some(ext)),
        None => (basename, None),
    };

    let mut stem = sanitize_component(stem);
    if stem.is_empty() {
        stem = FALLBACK_STEM.to_string();
    }

    match ext.map(sanitize_component).filter(|e| !e.is_empty()) {
        Some(ext) => format!("{stem}-{timestamp_millis}.{ext}"),
        None => format!("{stem}-{timestamp_millis}"),
    }
}

/// Public URL for a stored upload name.
pub fn public_url(stored_name: &str) -> String {
    format!("{UPLOAD_URL_PREFIX}/{stored_name}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_safe_characters() {
        assert_eq!(sanitize_component("cover_image-01"), "cover_image-01");
    }

    #[test]
    fn replaces_unsafe_characters() {
        assert_eq!(sanitize_component("my photo (1)"), "my_photo__1_");
        assert_eq!(sanitize_component("café"), "caf_");
    }

    #[test]
    fn appends_timestamp_before_extension() {
        assert_eq!(
            stored_file_name(Some("holiday photo.jpg"), 1_700_000_000_000),
            "holiday_photo-1700000000000.jpg"
        );
    }

    #[test]
    fn multi_dot_names_keep_last_extension() {
        assert_eq!(
            stored_file_name(Some("archive.tar.gz"), 5),
            "archive_tar-5.gz"
        );
    }

    #[test]
    fn strips_directories() {
        assert_eq!(stored_file_name(Some("../../etc/passwd"), 9), "passwd-9");
        assert_eq!(stored_file_name(Some("C:\\tmp\\a.png"), 9), "a-9.png");
    }

    #[test]
    fn falls_back_when_name_is_missing_or_empty() {
        assert_eq!(stored_file_name(None, 3), "file-3");
        assert_eq!(stored_file_name(Some(".png"), 3), "file-3.png");
    }

    #[test]
    fn builds_public_url() {
        assert_eq!(public_url("a-1.png"), "/uploads/a-1.png");
    }
}
