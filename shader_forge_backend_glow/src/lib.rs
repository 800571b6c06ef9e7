/*!
# Shader Forge - glow Backend

OpenGL / OpenGL ES / WebGL implementation of the shader_forge `RenderContext`
trait, built on the glow bindings.

Any `glow::HasContext` works: a native context created with glutin or SDL,
or a WebGL context on wasm32.
*/

mod glow_context;

pub use glow_context::{stage_to_gl, GlowContext};
