use sqlx::{Pool, Sqlite};
use std::path::PathBuf;

#[derive(Clone)]
pub struct AppState {
    pub db: Pool<Sqlite>,
    pub upload_dir: PathBuf,
    pub echoes_path: PathBuf,
}
