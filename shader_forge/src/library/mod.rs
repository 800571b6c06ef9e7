/// Named collections of linked programs

pub mod program_library;

pub use program_library::*;
