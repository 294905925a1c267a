use std::path::Path;
use tracing::warn;

const UPLOADS_URL_PATH: &str = "/static/uploads";
const IMAGE_EXTENSIONS: [&str; 6] = ["jpg", "jpeg", "png", "gif", "bmp", "webp"];
pub const DEFAULT_AVATAR: &str = const_str::concat!(UPLOADS_URL_PATH, "/default.png");

pub fn get_avatar_url(filename: &str) -> String {
    format!("{UPLOADS_URL_PATH}/{filename}")
}

/// Returns the public path of the first `{user_id}.{ext}` upload found,
/// or the default avatar.
pub async fn find_avatar(upload_dir: &Path, user_id: i64) -> String {
    for ext in IMAGE_EXTENSIONS {
        let filename = format!("{user_id}.{ext}");
        match tokio::fs::try_exists(upload_dir.join(&filename)).await {
            Ok(true) => return get_avatar_url(&filename),
            Ok(false) => {}
            Err(e) => warn!(user_id, "Failed to check avatar {filename}: {e}"),
        }
    }
    DEFAULT_AVATAR.to_owned()
}
