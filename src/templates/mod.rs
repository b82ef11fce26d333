pub mod components;
pub mod layouts;
pub mod pages;

// Re-exports for convenience
pub use components::errors_list;
pub use layouts::desktop::desktop_layout;
