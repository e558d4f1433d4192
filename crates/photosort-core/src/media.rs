use std::path::Path;

/// Filename without its final extension.
pub fn file_stem(filename: &str) -> &str {
    Path::new(filename)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(filename)
}

/// Final extension with its dot, lower-cased; empty when there is none.
/// Case is the only normalization applied.
pub fn file_extension(filename: &str) -> String {
    Path::new(filename)
        .extension()
        .and_then(|s| s.to_str())
        .map(|ext| format!(".{}", ext.to_lowercase()))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stem_drops_the_extension() {
        assert_eq!(file_stem("IMG_20230115_143000.JPG"), "IMG_20230115_143000");
        assert_eq!(file_stem("archive.tar.gz"), "archive.tar");
        assert_eq!(file_stem("noext"), "noext");
    }

    #[test]
    fn extension_is_lowercased_and_keeps_its_dot() {
        assert_eq!(file_extension("photo.JPG"), ".jpg");
        assert_eq!(file_extension("clip.Mp4"), ".mp4");
        assert_eq!(file_extension("noext"), "");
        assert_eq!(file_extension(".hidden"), "");
    }
}
