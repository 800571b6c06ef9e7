/// Program builder module - compile, link and own shader programs

pub mod config;
pub mod program_builder;
pub mod linked_program;

pub use config::*;
pub use program_builder::*;
pub use linked_program::*;
