/// LinkedProgram - a successfully linked vertex + fragment program

use std::fmt;

use crate::context::RenderContext;

/// Program whose link status reported success
///
/// Owned by the caller. Activate it before issuing draws that depend on it and
/// dispose it at end of life; dropping it without `dispose` leaves the backend
/// objects alive.
pub struct LinkedProgram<C: RenderContext> {
    program: C::Program,
    /// Attached (vertex, fragment) shaders, `None` when detached after link
    shaders: Option<(C::Shader, C::Shader)>,
}

impl<C: RenderContext> LinkedProgram<C> {
    pub(crate) fn new(program: C::Program, shaders: Option<(C::Shader, C::Shader)>) -> Self {
        Self { program, shaders }
    }

    /// Backend program handle
    pub fn handle(&self) -> C::Program {
        self.program
    }

    /// Vertex and fragment shaders still attached to the program
    pub fn attached_shaders(&self) -> Option<(C::Shader, C::Shader)> {
        self.shaders
    }

    /// Make this program current
    pub fn activate(&self, ctx: &mut C) {
        ctx.use_program(Some(self.program));
    }

    /// Location of the vertex attribute `name`, if active
    pub fn attrib_location(&self, ctx: &C, name: &str) -> Option<u32> {
        ctx.attrib_location(self.program, name)
    }

    /// Location of the uniform `name`, if active
    pub fn uniform_location(&self, ctx: &C, name: &str) -> Option<C::UniformLocation> {
        ctx.uniform_location(self.program, name)
    }

    /// Delete the program and the shaders attached to it
    pub fn dispose(self, ctx: &mut C) {
        if let Some((vertex, fragment)) = self.shaders {
            for shader in [vertex, fragment] {
                ctx.detach_shader(self.program, shader);
                ctx.delete_shader(shader);
            }
        }
        ctx.delete_program(self.program);

        crate::forge_debug!("shader_forge::Builder", "program {:?} disposed", self.program);
    }
}

impl<C: RenderContext> fmt::Debug for LinkedProgram<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LinkedProgram")
            .field("program", &self.program)
            .field("shaders", &self.shaders)
            .finish()
    }
}
