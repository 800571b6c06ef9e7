/// RenderContext trait - GL-style object API used to build programs

use std::fmt::Debug;
use std::hash::Hash;

use crate::context::ShaderStage;
use crate::error::Result;

/// Capability provider for shader and program objects
///
/// Mirrors the GL object model: shaders and programs are created empty,
/// fed with source, compiled or linked, then queried for a status and an
/// info log. Handles are opaque values meaningful only to the context that
/// created them.
///
/// Backends decide their handle types. The status and log queries never fail;
/// only object creation may report `Error::BackendError` (for example after a
/// lost context).
pub trait RenderContext {
    /// Shader object handle
    type Shader: Copy + Eq + Hash + Debug;
    /// Program object handle
    type Program: Copy + Eq + Hash + Debug;
    /// Uniform location handle
    type UniformLocation: Clone + Debug;

    // ===== SHADER OBJECTS =====

    /// Create an empty shader object for `stage`
    fn create_shader(&mut self, stage: ShaderStage) -> Result<Self::Shader>;

    /// Replace the source text of a shader object
    fn shader_source(&mut self, shader: Self::Shader, source: &str);

    /// Compile the current source of a shader object
    fn compile_shader(&mut self, shader: Self::Shader);

    /// Whether the last compilation succeeded
    fn shader_compile_status(&self, shader: Self::Shader) -> bool;

    /// Compiler log of the last compilation
    fn shader_info_log(&self, shader: Self::Shader) -> String;

    /// Release a shader object
    ///
    /// A shader still attached to a program stays alive until it is detached
    /// or the program is deleted.
    fn delete_shader(&mut self, shader: Self::Shader);

    // ===== PROGRAM OBJECTS =====

    /// Create an empty program object
    fn create_program(&mut self) -> Result<Self::Program>;

    fn attach_shader(&mut self, program: Self::Program, shader: Self::Shader);

    fn detach_shader(&mut self, program: Self::Program, shader: Self::Shader);

    /// Link the shaders currently attached to a program
    fn link_program(&mut self, program: Self::Program);

    /// Whether the last link succeeded
    fn program_link_status(&self, program: Self::Program) -> bool;

    /// Linker log of the last link
    fn program_info_log(&self, program: Self::Program) -> String;

    /// Release a program object
    fn delete_program(&mut self, program: Self::Program);

    /// Make a program current for subsequent draws, or clear it with `None`
    fn use_program(&mut self, program: Option<Self::Program>);

    // ===== INTERFACE QUERIES =====

    /// Location of an active vertex attribute
    fn attrib_location(&self, program: Self::Program, name: &str) -> Option<u32>;

    /// Location of an active uniform
    fn uniform_location(&self, program: Self::Program, name: &str) -> Option<Self::UniformLocation>;
}
