/// Headless reference backend
///
/// `ReferenceContext` implements `RenderContext` on top of a GLSL ES 1.00
/// front end so the builder can be exercised without a GPU.

pub mod glsl;
pub mod reference_context;

pub use reference_context::*;
