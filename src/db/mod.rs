pub mod connection;
pub mod farmers;
pub mod users;

pub use connection::Database;
