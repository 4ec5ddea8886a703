//! Asset-directory walking and content-type detection.

use std::path::{Path, PathBuf};

use crate::error::DeployError;

/// A file to upload: its local path, destination key, and content type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetFile {
    /// Local path of the file.
    pub path: PathBuf,
    /// Object key relative to the asset directory, `/`-separated.
    pub key: String,
    /// MIME type sent as `Content-Type`.
    pub content_type: String,
}

/// Collect every file under `dir`, recursively, sorted by key.
///
/// # Errors
/// Fails when the directory cannot be read.
pub fn collect_assets(dir: &Path) -> Result<Vec<AssetFile>, DeployError> {
    let mut files = Vec::new();
    walk(dir, dir, &mut files)?;
    files.sort_by(|a, b| a.key.cmp(&b.key));
    Ok(files)
}

fn walk(root: &Path, dir: &Path, out: &mut Vec<AssetFile>) -> Result<(), DeployError> {
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_dir() {
            walk(root, &path, out)?;
        } else {
            let key = path
                .strip_prefix(root)
                .unwrap_or(&path)
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            let content_type = content_type_for(&path);
            out.push(AssetFile {
                path,
                key,
                content_type,
            });
        }
    }
    Ok(())
}

/// Best-effort MIME type from the file extension.
#[must_use]
pub fn content_type_for(path: &Path) -> String {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "html" | "htm" => mime::TEXT_HTML_UTF_8.to_string(),
        "css" => mime::TEXT_CSS.to_string(),
        "js" | "mjs" => mime::APPLICATION_JAVASCRIPT.to_string(),
        "json" | "map" => mime::APPLICATION_JSON.to_string(),
        "txt" => mime::TEXT_PLAIN_UTF_8.to_string(),
        "xml" => mime::TEXT_XML.to_string(),
        "png" => mime::IMAGE_PNG.to_string(),
        "jpg" | "jpeg" => mime::IMAGE_JPEG.to_string(),
        "gif" => mime::IMAGE_GIF.to_string(),
        "svg" => mime::IMAGE_SVG.to_string(),
        "pdf" => mime::APPLICATION_PDF.to_string(),
        "ico" => "image/x-icon".to_owned(),
        "webp" => "image/webp".to_owned(),
        "woff" => "font/woff".to_owned(),
        "woff2" => "font/woff2".to_owned(),
        _ => mime::APPLICATION_OCTET_STREAM.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_detect_common_content_types() {
        assert_eq!(
            content_type_for(Path::new("index.html")),
            "text/html; charset=utf-8"
        );
        assert_eq!(content_type_for(Path::new("site.css")), "text/css");
        assert_eq!(
            content_type_for(Path::new("app.js")),
            "application/javascript"
        );
        assert_eq!(content_type_for(Path::new("logo.svg")), "image/svg+xml");
        assert_eq!(content_type_for(Path::new("favicon.ico")), "image/x-icon");
        assert_eq!(
            content_type_for(Path::new("blob.bin")),
            "application/octet-stream"
        );
        assert_eq!(
            content_type_for(Path::new("no_extension")),
            "application/octet-stream"
        );
    }

    #[test]
    fn test_should_collect_files_recursively_with_relative_keys() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("index.html"), "home").unwrap();
        std::fs::write(dir.path().join("error.html"), "oops").unwrap();
        std::fs::create_dir(dir.path().join("img")).unwrap();
        std::fs::write(dir.path().join("img").join("logo.png"), [0u8; 4]).unwrap();

        let files = collect_assets(dir.path()).unwrap();
        let keys: Vec<&str> = files.iter().map(|f| f.key.as_str()).collect();
        assert_eq!(keys, vec!["error.html", "img/logo.png", "index.html"]);
        assert_eq!(files[1].content_type, "image/png");
    }

    #[test]
    fn test_should_fail_on_missing_directory() {
        assert!(collect_assets(Path::new("/definitely/not/here")).is_err());
    }
}
