use std::path::Path;

use crate::error::AppResult;

/// Writes uploaded image bytes under `<root>/posts/` and returns the
/// relative path stored on the post. Filenames are sanitized and prefixed
/// with a timestamp so repeated uploads of `small.gif` never collide.
pub async fn save_upload(root: &Path, filename: &str, bytes: &[u8]) -> AppResult<String> {
    let name = format!(
        "{}-{}",
        chrono::Utc::now().timestamp_micros(),
        sanitize(filename)
    );

    let dir = root.join("posts");
    tokio::fs::create_dir_all(&dir).await?;
    tokio::fs::write(dir.join(&name), bytes).await?;

    Ok(format!("posts/{name}"))
}

fn sanitize(filename: &str) -> String {
    let clean: String = filename
        .chars()
        .map(|c| match c {
            'a'..='z' | 'A'..='Z' | '0'..='9' | '.' | '-' | '_' => c,
            _ => '_',
        })
        .collect();

    if clean.is_empty() {
        "upload".to_owned()
    } else {
        clean
    }
}
