pub mod api;
pub mod relationships;
pub mod users;
