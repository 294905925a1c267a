pub mod avatars;
pub mod context;
pub mod env;
pub mod error;
pub mod init;
pub mod state;
