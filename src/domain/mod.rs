pub mod aggregate;
pub mod farmer;
pub mod format;
pub mod harvest;
pub mod user;
pub mod validation;
