use std::path::Path;

/// A locally chosen chart image. The bytes are never inspected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub bytes: Vec<u8>,
    pub mime: Option<String>,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let name = name.into();
        let mime = guess_image_mime(&name).map(str::to_string);
        Self { name, bytes, mime }
    }

    pub async fn from_path(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "chart".to_string());

        Ok(Self::new(name, bytes))
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Extension-based hint only; unknown extensions are uploaded without a content type.
fn guess_image_mime(name: &str) -> Option<&'static str> {
    let ext = Path::new(name).extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "bmp" => Some("image/bmp"),
        "svg" => Some("image/svg+xml"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_is_guessed_from_extension() {
        assert_eq!(SelectedFile::new("chart.PNG", vec![1]).mime.as_deref(), Some("image/png"));
        assert_eq!(SelectedFile::new("btc.jpeg", vec![]).mime.as_deref(), Some("image/jpeg"));
        assert_eq!(SelectedFile::new("notes.txt", vec![]).mime, None);
        assert_eq!(SelectedFile::new("no_extension", vec![]).mime, None);
    }

    #[tokio::test]
    async fn test_from_path_reads_name_and_bytes() {
        let path = std::env::temp_dir().join(format!("selected_file_{}.png", std::process::id()));
        tokio::fs::write(&path, b"\x89PNG").await.unwrap();

        let file = SelectedFile::from_path(&path).await.unwrap();
        tokio::fs::remove_file(&path).await.unwrap();

        assert!(file.name.starts_with("selected_file_"));
        assert_eq!(file.bytes, b"\x89PNG");
        assert_eq!(file.len(), 4);
        assert_eq!(file.mime.as_deref(), Some("image/png"));
    }

    #[tokio::test]
    async fn test_from_path_missing_file_errors() {
        let result = SelectedFile::from_path("/definitely/not/here.png").await;
        assert!(result.is_err());
    }
}
