/// GlowContext - RenderContext over a glow GL context

use glow::HasContext;
use shader_forge::forge::context::{RenderContext, ShaderStage};
use shader_forge::forge::Result;

const LOG_SOURCE: &str = "shader_forge::glow";

/// Trace one GL call when the `gl-call-trace` feature is enabled
macro_rules! gl_trace {
    ($($arg:tt)*) => {
        #[cfg(feature = "gl-call-trace")]
        shader_forge::forge_trace!(LOG_SOURCE, $($arg)*);
    };
}

/// GL shader type constant for a stage
pub fn stage_to_gl(stage: ShaderStage) -> u32 {
    match stage {
        ShaderStage::Vertex => glow::VERTEX_SHADER,
        ShaderStage::Fragment => glow::FRAGMENT_SHADER,
    }
}

/// glow-backed rendering context
///
/// # Example
///
/// ```no_run
/// use shader_forge::forge::build::ProgramBuilder;
/// use shader_forge_backend_glow::GlowContext;
///
/// # fn demo(gl: glow::Context) -> shader_forge::forge::Result<()> {
/// // SAFETY: the GL context stays current on this thread
/// let mut ctx = unsafe { GlowContext::new(gl) };
/// let program = ProgramBuilder::new().link(
///     &mut ctx,
///     "void main() { gl_Position = vec4(0.0, 0.0, 0.0, 1.0); gl_PointSize = 20.0; }",
///     "precision mediump float; void main() { gl_FragColor = vec4(1.0, 0.5, 0.0, 1.0); }",
/// )?;
/// program.activate(&mut ctx);
/// # Ok(())
/// # }
/// ```
pub struct GlowContext<G: HasContext = glow::Context> {
    gl: G,
}

impl<G: HasContext> GlowContext<G> {
    /// Wrap a GL context
    ///
    /// # Safety
    ///
    /// `gl` must be current on the calling thread every time a method of the
    /// returned context is called, and must outlive every handle it creates.
    pub unsafe fn new(gl: G) -> Self {
        Self { gl }
    }

    /// Underlying glow context, for draw calls and state not covered here
    pub fn gl(&self) -> &G {
        &self.gl
    }

    pub fn into_inner(self) -> G {
        self.gl
    }
}

impl<G: HasContext> RenderContext for GlowContext<G> {
    type Shader = G::Shader;
    type Program = G::Program;
    type UniformLocation = G::UniformLocation;

    fn create_shader(&mut self, stage: ShaderStage) -> Result<G::Shader> {
        gl_trace!("glCreateShader({})", stage);
        // SAFETY: context is current (GlowContext::new contract)
        let shader = unsafe { self.gl.create_shader(stage_to_gl(stage)) };
        shader.map_err(|e| {
            shader_forge::forge_err!(LOG_SOURCE, "Failed to create {} shader: {}", stage, e)
        })
    }

    fn shader_source(&mut self, shader: G::Shader, source: &str) {
        gl_trace!("glShaderSource({:?}, {} bytes)", shader, source.len());
        unsafe { self.gl.shader_source(shader, source) }
    }

    fn compile_shader(&mut self, shader: G::Shader) {
        gl_trace!("glCompileShader({:?})", shader);
        unsafe { self.gl.compile_shader(shader) }
    }

    fn shader_compile_status(&self, shader: G::Shader) -> bool {
        unsafe { self.gl.get_shader_compile_status(shader) }
    }

    fn shader_info_log(&self, shader: G::Shader) -> String {
        unsafe { self.gl.get_shader_info_log(shader) }
    }

    fn delete_shader(&mut self, shader: G::Shader) {
        gl_trace!("glDeleteShader({:?})", shader);
        unsafe { self.gl.delete_shader(shader) }
    }

    fn create_program(&mut self) -> Result<G::Program> {
        gl_trace!("glCreateProgram()");
        let program = unsafe { self.gl.create_program() };
        program.map_err(|e| {
            shader_forge::forge_err!(LOG_SOURCE, "Failed to create program: {}", e)
        })
    }

    fn attach_shader(&mut self, program: G::Program, shader: G::Shader) {
        gl_trace!("glAttachShader({:?}, {:?})", program, shader);
        unsafe { self.gl.attach_shader(program, shader) }
    }

    fn detach_shader(&mut self, program: G::Program, shader: G::Shader) {
        gl_trace!("glDetachShader({:?}, {:?})", program, shader);
        unsafe { self.gl.detach_shader(program, shader) }
    }

    fn link_program(&mut self, program: G::Program) {
        gl_trace!("glLinkProgram({:?})", program);
        unsafe { self.gl.link_program(program) }
    }

    fn program_link_status(&self, program: G::Program) -> bool {
        unsafe { self.gl.get_program_link_status(program) }
    }

    fn program_info_log(&self, program: G::Program) -> String {
        unsafe { self.gl.get_program_info_log(program) }
    }

    fn delete_program(&mut self, program: G::Program) {
        gl_trace!("glDeleteProgram({:?})", program);
        unsafe { self.gl.delete_program(program) }
    }

    fn use_program(&mut self, program: Option<G::Program>) {
        gl_trace!("glUseProgram({:?})", program);
        unsafe { self.gl.use_program(program) }
    }

    fn attrib_location(&self, program: G::Program, name: &str) -> Option<u32> {
        unsafe { self.gl.get_attrib_location(program, name) }
    }

    fn uniform_location(&self, program: G::Program, name: &str) -> Option<G::UniformLocation> {
        unsafe { self.gl.get_uniform_location(program, name) }
    }
}
