pub mod context;
pub mod entry;
