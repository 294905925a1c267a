use sqlx::{Pool, Sqlite};
use std::path::Path;

pub trait Context: Sync + Send {
    fn db(&self) -> &Pool<Sqlite>;
    /// Directory holding uploaded avatars named `{user_id}.{ext}`.
    fn upload_dir(&self) -> &Path;
    fn echoes_path(&self) -> &Path;
}
