/// ProgramBuilder - turns a vertex/fragment source pair into a linked program
///
/// The builder owns no GPU state. Every call borrows the rendering context it
/// works on, owns the intermediate handles until they are either handed to the
/// caller inside a `LinkedProgram` or deleted, and never retries: a compile or
/// link failure is a deterministic function of the source text.

use crate::builder::{BuilderConfig, LinkedProgram};
use crate::context::{RenderContext, ShaderSource, ShaderStage};
use crate::error::{non_empty_log, Error, ProgramLinkError, Result, ShaderCompileError};

const LOG_SOURCE: &str = "shader_forge::Builder";

// ===== COMPILED SHADER =====

/// Shader object whose compilation succeeded
///
/// Owned by the builder until consumed by `ProgramBuilder::link_compiled`.
pub struct CompiledShader<C: RenderContext> {
    handle: C::Shader,
    stage: ShaderStage,
}

impl<C: RenderContext> std::fmt::Debug for CompiledShader<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompiledShader")
            .field("handle", &self.handle)
            .field("stage", &self.stage)
            .finish()
    }
}

impl<C: RenderContext> CompiledShader<C> {
    pub fn handle(&self) -> C::Shader {
        self.handle
    }

    pub fn stage(&self) -> ShaderStage {
        self.stage
    }

    /// Delete the shader object without linking it
    pub fn release(self, ctx: &mut C) {
        ctx.delete_shader(self.handle);
    }
}

// ===== PROGRAM BUILDER =====

/// Shader program builder
///
/// # Example
///
/// ```no_run
/// use shader_forge::forge::build::ProgramBuilder;
/// use shader_forge::forge::reference::ReferenceContext;
///
/// let mut ctx = ReferenceContext::new();
/// let builder = ProgramBuilder::new();
/// let program = builder.link(
///     &mut ctx,
///     "attribute vec2 a_position; void main() { gl_Position = vec4(a_position, 0.0, 1.0); }",
///     "precision mediump float; void main() { gl_FragColor = vec4(1.0, 0.0, 0.0, 1.0); }",
/// )?;
/// program.activate(&mut ctx);
/// # Ok::<(), shader_forge::forge::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ProgramBuilder {
    config: BuilderConfig,
}

impl ProgramBuilder {
    /// Builder with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: BuilderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    /// Compile one stage
    ///
    /// # Errors
    ///
    /// - `Error::ShaderCompile` when the backend rejects the source; the shader
    ///   object is deleted before returning.
    /// - `Error::BackendError` when the shader object cannot be created.
    pub fn compile<C: RenderContext>(
        &self,
        ctx: &mut C,
        source: &str,
        stage: ShaderStage,
    ) -> Result<CompiledShader<C>> {
        let shader = ctx.create_shader(stage)?;

        let code = self.config.decorate(source);
        ctx.shader_source(shader, &code);
        ctx.compile_shader(shader);

        if !ctx.shader_compile_status(shader) {
            let diagnostic = non_empty_log(ctx.shader_info_log(shader));
            ctx.delete_shader(shader);

            crate::forge_error!(LOG_SOURCE, "[{}] {} shader compile failed: {}",
                self.config.label, stage, diagnostic.trim_end());

            return Err(Error::ShaderCompile(ShaderCompileError { stage, diagnostic }));
        }

        crate::forge_debug!(LOG_SOURCE, "[{}] {} shader compiled ({:?})",
            self.config.label, stage, shader);

        Ok(CompiledShader { handle: shader, stage })
    }

    /// Compile a tagged source
    pub fn compile_source<C: RenderContext>(
        &self,
        ctx: &mut C,
        source: ShaderSource<'_>,
    ) -> Result<CompiledShader<C>> {
        self.compile(ctx, source.code, source.stage)
    }

    /// Compile both stages and link them into a program
    ///
    /// The vertex stage is compiled first. If it fails, the fragment stage is
    /// never compiled. If the fragment stage fails, the compiled vertex shader
    /// is deleted before the error is returned, so no handle leaks on any path.
    ///
    /// # Errors
    ///
    /// - `Error::ShaderCompile` for the first stage that does not compile
    /// - `Error::ProgramLink` when the stages do not link
    /// - `Error::BackendError` when an object cannot be created
    pub fn link<C: RenderContext>(
        &self,
        ctx: &mut C,
        vertex_src: &str,
        fragment_src: &str,
    ) -> Result<LinkedProgram<C>> {
        let vertex = self.compile(ctx, vertex_src, ShaderStage::Vertex)?;

        let fragment = match self.compile(ctx, fragment_src, ShaderStage::Fragment) {
            Ok(fragment) => fragment,
            Err(err) => {
                vertex.release(ctx);
                return Err(err);
            }
        };

        self.link_compiled(ctx, vertex, fragment)
    }

    /// Link a pair of tagged sources, checking the tags first
    ///
    /// # Errors
    ///
    /// `Error::InvalidResource` if the sources are not tagged vertex then
    /// fragment, otherwise the same errors as `link`.
    pub fn link_sources<C: RenderContext>(
        &self,
        ctx: &mut C,
        vertex: ShaderSource<'_>,
        fragment: ShaderSource<'_>,
    ) -> Result<LinkedProgram<C>> {
        if vertex.stage != ShaderStage::Vertex || fragment.stage != ShaderStage::Fragment {
            crate::forge_error!(LOG_SOURCE, "[{}] expected vertex and fragment sources, got {} and {}",
                self.config.label, vertex.stage, fragment.stage);
            return Err(Error::InvalidResource(format!(
                "expected vertex and fragment sources, got {} and {}",
                vertex.stage, fragment.stage
            )));
        }

        self.link(ctx, vertex.code, fragment.code)
    }

    /// Link two already compiled stages
    ///
    /// Takes ownership of both shaders. On success they stay attached to the
    /// returned program (or are detached and deleted when
    /// `BuilderConfig::detach_after_link` is set). On failure the program is
    /// deleted, and the shaders too when
    /// `BuilderConfig::release_shaders_on_link_failure` is set.
    pub fn link_compiled<C: RenderContext>(
        &self,
        ctx: &mut C,
        vertex: CompiledShader<C>,
        fragment: CompiledShader<C>,
    ) -> Result<LinkedProgram<C>> {
        if vertex.stage != ShaderStage::Vertex || fragment.stage != ShaderStage::Fragment {
            let message = format!(
                "expected vertex and fragment shaders, got {} and {}",
                vertex.stage, fragment.stage
            );
            crate::forge_error!(LOG_SOURCE, "[{}] {}", self.config.label, message);
            vertex.release(ctx);
            fragment.release(ctx);
            return Err(Error::InvalidResource(message));
        }

        let program = match ctx.create_program() {
            Ok(program) => program,
            Err(err) => {
                vertex.release(ctx);
                fragment.release(ctx);
                return Err(err);
            }
        };

        ctx.attach_shader(program, vertex.handle);
        ctx.attach_shader(program, fragment.handle);
        ctx.link_program(program);

        if !ctx.program_link_status(program) {
            let diagnostic = non_empty_log(ctx.program_info_log(program));
            ctx.delete_program(program);

            if self.config.release_shaders_on_link_failure {
                vertex.release(ctx);
                fragment.release(ctx);
            } else {
                crate::forge_warn!(LOG_SOURCE, "[{}] keeping shaders {:?} and {:?} after link failure",
                    self.config.label, vertex.handle, fragment.handle);
            }

            crate::forge_error!(LOG_SOURCE, "[{}] program link failed: {}",
                self.config.label, diagnostic.trim_end());

            return Err(Error::ProgramLink(ProgramLinkError { diagnostic }));
        }

        let shaders = if self.config.detach_after_link {
            for shader in [vertex.handle, fragment.handle] {
                ctx.detach_shader(program, shader);
                ctx.delete_shader(shader);
            }
            None
        } else {
            Some((vertex.handle, fragment.handle))
        };

        crate::forge_info!(LOG_SOURCE, "[{}] program {:?} linked", self.config.label, program);

        Ok(LinkedProgram::new(program, shaders))
    }
}

#[cfg(test)]
#[path = "program_builder_tests.rs"]
mod tests;
