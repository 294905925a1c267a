pub mod echoes;
pub mod relationships;
pub mod users;
