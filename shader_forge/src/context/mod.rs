/// Rendering context module - the capability provider consumed by the builder

pub mod render_context;
pub mod shader;

pub use render_context::*;
pub use shader::*;
