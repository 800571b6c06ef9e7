/// ReferenceContext - headless RenderContext backed by the GLSL ES 1.00 front end
///
/// Behaves like a WebGL 1 context for everything the builder touches: object
/// creation and deletion (including deferred deletion of attached shaders and
/// of the current program), compile and link status, info logs, and attribute
/// and uniform locations. Nothing is ever drawn.

use bitflags::bitflags;
use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};

use crate::context::{RenderContext, ShaderStage};
use crate::error::{Error, Result};
use crate::reference::glsl::{self, ShaderInterface};

const LOG_SOURCE: &str = "shader_forge::reference";

/// Minimum GL_MAX_VERTEX_ATTRIBS guaranteed by WebGL 1
pub const MAX_VERTEX_ATTRIBS: u32 = 8;

new_key_type! {
    /// Shader object handle
    pub struct ShaderKey;
    /// Program object handle
    pub struct ProgramKey;
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ShaderFlags: u8 {
        /// Last compilation succeeded
        const COMPILED = 1 << 0;
        /// Deleted while attached; freed on last detach
        const DELETE_PENDING = 1 << 1;
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ProgramFlags: u8 {
        /// Last link succeeded
        const LINKED = 1 << 0;
        /// Deleted while current; freed when no longer current
        const DELETE_PENDING = 1 << 1;
    }
}

/// GL error codes recorded by the reference context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlError {
    InvalidValue,
    InvalidOperation,
}

#[derive(Debug)]
struct ShaderObject {
    stage: ShaderStage,
    source: String,
    flags: ShaderFlags,
    info_log: String,
    interface: Option<ShaderInterface>,
    attach_count: u32,
}

#[derive(Debug, Default)]
struct LinkedInterface {
    attributes: FxHashMap<String, u32>,
    uniforms: FxHashMap<String, u32>,
}

#[derive(Debug)]
struct ProgramObject {
    attached: Vec<ShaderKey>,
    flags: ProgramFlags,
    info_log: String,
    linked: Option<LinkedInterface>,
}

/// Headless rendering context
///
/// # Example
///
/// ```no_run
/// use shader_forge::forge::context::{RenderContext, ShaderStage};
/// use shader_forge::forge::reference::ReferenceContext;
///
/// let mut ctx = ReferenceContext::new();
/// let shader = ctx.create_shader(ShaderStage::Vertex)?;
/// ctx.shader_source(shader, "void main() { gl_Position = vec4(0.0) }");
/// ctx.compile_shader(shader);
/// assert!(!ctx.shader_compile_status(shader));
/// println!("{}", ctx.shader_info_log(shader));
/// # Ok::<(), shader_forge::forge::Error>(())
/// ```
#[derive(Debug, Default)]
pub struct ReferenceContext {
    shaders: SlotMap<ShaderKey, ShaderObject>,
    programs: SlotMap<ProgramKey, ProgramObject>,
    current: Option<ProgramKey>,
    context_lost: bool,
    errors: Vec<GlError>,
    journal: bool,
    calls: Vec<String>,
}

impl ReferenceContext {
    /// Context with the call journal off; calls are still traced to the logger
    pub fn new() -> Self {
        Self::default()
    }

    /// Context that also keeps every call in `calls()`
    pub fn with_call_journal() -> Self {
        Self {
            journal: true,
            ..Self::default()
        }
    }

    // ===== INSPECTION =====

    /// Shader objects still alive, including ones pending deletion
    pub fn live_shader_count(&self) -> usize {
        self.shaders.len()
    }

    /// Program objects still alive, including ones pending deletion
    pub fn live_program_count(&self) -> usize {
        self.programs.len()
    }

    /// Equivalent of glIsShader
    pub fn is_shader(&self, shader: ShaderKey) -> bool {
        self.shaders.contains_key(shader)
    }

    /// Equivalent of glIsProgram
    pub fn is_program(&self, program: ProgramKey) -> bool {
        self.programs.contains_key(program)
    }

    pub fn shader_flags(&self, shader: ShaderKey) -> Option<ShaderFlags> {
        self.shaders.get(shader).map(|s| s.flags)
    }

    pub fn program_flags(&self, program: ProgramKey) -> Option<ProgramFlags> {
        self.programs.get(program).map(|p| p.flags)
    }

    /// Source text last given to a shader
    pub fn shader_source_text(&self, shader: ShaderKey) -> Option<&str> {
        self.shaders.get(shader).map(|s| s.source.as_str())
    }

    /// Interface extracted by the last successful compilation
    pub fn shader_interface(&self, shader: ShaderKey) -> Option<&ShaderInterface> {
        self.shaders.get(shader).and_then(|s| s.interface.as_ref())
    }

    /// Shaders attached to a program, in attach order
    pub fn attached_shaders(&self, program: ProgramKey) -> Vec<ShaderKey> {
        self.programs
            .get(program)
            .map(|p| p.attached.clone())
            .unwrap_or_default()
    }

    pub fn current_program(&self) -> Option<ProgramKey> {
        self.current
    }

    /// Simulate a lost context: object creation fails until restored
    pub fn set_context_lost(&mut self, lost: bool) {
        self.context_lost = lost;
    }

    /// GL errors recorded since the last call, oldest first (glGetError)
    pub fn take_errors(&mut self) -> Vec<GlError> {
        std::mem::take(&mut self.errors)
    }

    /// Journal of every context call since the journal was enabled, in order.
    /// Always empty while the journal is off.
    pub fn calls(&self) -> &[String] {
        &self.calls
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    /// Turn the call journal on or off; turning it off drops what it holds
    pub fn set_call_journal(&mut self, enabled: bool) {
        self.journal = enabled;
        if !enabled {
            self.calls = Vec::new();
        }
    }

    pub fn is_call_journal_enabled(&self) -> bool {
        self.journal
    }

    // ===== INTERNAL =====

    fn record(&mut self, call: String) {
        crate::forge_trace!(LOG_SOURCE, "{}", call);
        if self.journal {
            self.calls.push(call);
        }
    }

    fn gl_error(&mut self, error: GlError, reason: &str) {
        crate::forge_warn!(LOG_SOURCE, "{:?}: {}", error, reason);
        self.errors.push(error);
    }

    fn destroy_program(&mut self, program: ProgramKey) {
        let Some(object) = self.programs.remove(program) else {
            return;
        };
        for shader in object.attached {
            self.release_attachment(shader);
        }
    }

    fn release_attachment(&mut self, shader: ShaderKey) {
        let free = match self.shaders.get_mut(shader) {
            Some(object) => {
                object.attach_count = object.attach_count.saturating_sub(1);
                object.attach_count == 0 && object.flags.contains(ShaderFlags::DELETE_PENDING)
            }
            None => false,
        };
        if free {
            self.shaders.remove(shader);
        }
    }

    /// Check both stages against each other and assign locations
    fn link_interfaces(
        vertex: &ShaderInterface,
        fragment: &ShaderInterface,
    ) -> std::result::Result<LinkedInterface, Vec<String>> {
        let mut problems = Vec::new();

        for (interface, stage) in [(vertex, ShaderStage::Vertex), (fragment, ShaderStage::Fragment)] {
            if !interface.has_main {
                problems.push(format!("ERROR: Missing entry point: main() not found in {} shader", stage));
            }
        }

        for varying in &fragment.varyings {
            match vertex.varying(&varying.name) {
                Some(declared) if declared.ty != varying.ty => problems.push(format!(
                    "ERROR: Types must match for varying '{}': {} in vertex shader, {} in fragment shader",
                    varying.name, declared.ty, varying.ty
                )),
                Some(_) => {}
                None if fragment.is_referenced(&varying.name) => problems.push(format!(
                    "ERROR: Varying '{}' is read by the fragment shader but not declared in the vertex shader",
                    varying.name
                )),
                None => {}
            }
        }

        for uniform in &fragment.uniforms {
            if let Some(declared) = vertex.uniform(&uniform.name) {
                if declared.ty != uniform.ty {
                    problems.push(format!(
                        "ERROR: Uniform '{}' differs on type between shaders: {} in vertex shader, {} in fragment shader",
                        uniform.name, declared.ty, uniform.ty
                    ));
                }
            }
        }

        let mut linked = LinkedInterface::default();
        let mut next_attribute = 0;
        for attribute in vertex.attributes.iter().filter(|a| vertex.is_referenced(&a.name)) {
            linked.attributes.insert(attribute.name.clone(), next_attribute);
            next_attribute += attribute.ty.base.attribute_slots();
        }
        if next_attribute > MAX_VERTEX_ATTRIBS {
            problems.push(format!(
                "ERROR: Too many vertex attributes: {} slots used, {} available",
                next_attribute, MAX_VERTEX_ATTRIBS
            ));
        }

        let active_uniforms = vertex
            .uniforms
            .iter()
            .filter(|u| vertex.is_referenced(&u.name))
            .chain(fragment.uniforms.iter().filter(|u| fragment.is_referenced(&u.name)));
        for uniform in active_uniforms {
            let next = linked.uniforms.len() as u32;
            linked.uniforms.entry(uniform.name.clone()).or_insert(next);
        }

        if problems.is_empty() {
            Ok(linked)
        } else {
            Err(problems)
        }
    }
}

impl RenderContext for ReferenceContext {
    type Shader = ShaderKey;
    type Program = ProgramKey;
    type UniformLocation = u32;

    fn create_shader(&mut self, stage: ShaderStage) -> Result<ShaderKey> {
        if self.context_lost {
            crate::forge_error!(LOG_SOURCE, "create_shader({}) failed: context lost", stage);
            return Err(Error::BackendError(format!("cannot create {} shader: context lost", stage)));
        }
        let shader = self.shaders.insert(ShaderObject {
            stage,
            source: String::new(),
            flags: ShaderFlags::empty(),
            info_log: String::new(),
            interface: None,
            attach_count: 0,
        });
        self.record(format!("create_shader({}) -> {:?}", stage, shader));
        Ok(shader)
    }

    fn shader_source(&mut self, shader: ShaderKey, source: &str) {
        self.record(format!("shader_source({:?})", shader));
        match self.shaders.get_mut(shader) {
            Some(object) => object.source = source.to_string(),
            None => self.gl_error(GlError::InvalidValue, "shader_source on unknown shader"),
        }
    }

    fn compile_shader(&mut self, shader: ShaderKey) {
        self.record(format!("compile_shader({:?})", shader));
        let Some(object) = self.shaders.get_mut(shader) else {
            self.gl_error(GlError::InvalidValue, "compile_shader on unknown shader");
            return;
        };

        match glsl::compile(&object.source, object.stage) {
            Ok(interface) => {
                object.flags.insert(ShaderFlags::COMPILED);
                object.info_log.clear();
                object.interface = Some(interface);
            }
            Err(diagnostics) => {
                object.flags.remove(ShaderFlags::COMPILED);
                object.info_log = glsl::format_log(&diagnostics);
                object.interface = None;
            }
        }
    }

    fn shader_compile_status(&self, shader: ShaderKey) -> bool {
        self.shaders
            .get(shader)
            .is_some_and(|s| s.flags.contains(ShaderFlags::COMPILED))
    }

    fn shader_info_log(&self, shader: ShaderKey) -> String {
        self.shaders
            .get(shader)
            .map(|s| s.info_log.clone())
            .unwrap_or_default()
    }

    fn delete_shader(&mut self, shader: ShaderKey) {
        self.record(format!("delete_shader({:?})", shader));
        let attached = match self.shaders.get_mut(shader) {
            Some(object) => {
                object.flags.insert(ShaderFlags::DELETE_PENDING);
                object.attach_count > 0
            }
            None => {
                self.gl_error(GlError::InvalidValue, "delete_shader on unknown shader");
                return;
            }
        };
        if !attached {
            self.shaders.remove(shader);
        }
    }

    fn create_program(&mut self) -> Result<ProgramKey> {
        if self.context_lost {
            crate::forge_error!(LOG_SOURCE, "create_program failed: context lost");
            return Err(Error::BackendError("cannot create program: context lost".to_string()));
        }
        let program = self.programs.insert(ProgramObject {
            attached: Vec::new(),
            flags: ProgramFlags::empty(),
            info_log: String::new(),
            linked: None,
        });
        self.record(format!("create_program() -> {:?}", program));
        Ok(program)
    }

    fn attach_shader(&mut self, program: ProgramKey, shader: ShaderKey) {
        self.record(format!("attach_shader({:?}, {:?})", program, shader));
        let Some(stage) = self.shaders.get(shader).map(|s| s.stage) else {
            self.gl_error(GlError::InvalidValue, "attach_shader with unknown shader");
            return;
        };
        let Some(object) = self.programs.get(program) else {
            self.gl_error(GlError::InvalidValue, "attach_shader to unknown program");
            return;
        };

        let duplicate = object.attached.iter().any(|&attached| {
            attached == shader || self.shaders.get(attached).is_some_and(|s| s.stage == stage)
        });
        if duplicate {
            self.gl_error(GlError::InvalidOperation, "a shader of this stage is already attached");
            return;
        }

        if let Some(object) = self.programs.get_mut(program) {
            object.attached.push(shader);
        }
        if let Some(object) = self.shaders.get_mut(shader) {
            object.attach_count += 1;
        }
    }

    fn detach_shader(&mut self, program: ProgramKey, shader: ShaderKey) {
        self.record(format!("detach_shader({:?}, {:?})", program, shader));
        let Some(object) = self.programs.get_mut(program) else {
            self.gl_error(GlError::InvalidValue, "detach_shader from unknown program");
            return;
        };
        let Some(index) = object.attached.iter().position(|&s| s == shader) else {
            self.gl_error(GlError::InvalidOperation, "shader is not attached to program");
            return;
        };
        object.attached.remove(index);
        self.release_attachment(shader);
    }

    fn link_program(&mut self, program: ProgramKey) {
        self.record(format!("link_program({:?})", program));
        let Some(object) = self.programs.get(program) else {
            self.gl_error(GlError::InvalidValue, "link_program on unknown program");
            return;
        };

        let mut vertex = None;
        let mut fragment = None;
        let mut problems = Vec::new();
        for &shader in &object.attached {
            let Some(shader_object) = self.shaders.get(shader) else {
                continue;
            };
            match (&shader_object.interface, shader_object.flags.contains(ShaderFlags::COMPILED)) {
                (Some(interface), true) => match shader_object.stage {
                    ShaderStage::Vertex => vertex = Some(interface),
                    ShaderStage::Fragment => fragment = Some(interface),
                },
                _ => problems.push(format!(
                    "ERROR: Attached {} shader is not compiled",
                    shader_object.stage
                )),
            }
        }

        let result = match (vertex, fragment) {
            (Some(vertex), Some(fragment)) if problems.is_empty() => {
                Self::link_interfaces(vertex, fragment)
            }
            (vertex, fragment) => {
                if vertex.is_none() && problems.is_empty() {
                    problems.push("ERROR: No compiled vertex shader attached".to_string());
                }
                if fragment.is_none() && problems.is_empty() {
                    problems.push("ERROR: No compiled fragment shader attached".to_string());
                }
                Err(problems)
            }
        };

        if let Some(object) = self.programs.get_mut(program) {
            match result {
                Ok(linked) => {
                    object.flags.insert(ProgramFlags::LINKED);
                    object.info_log.clear();
                    object.linked = Some(linked);
                }
                Err(problems) => {
                    object.flags.remove(ProgramFlags::LINKED);
                    object.info_log = problems.join("\n") + "\n";
                    object.linked = None;
                }
            }
        }
    }

    fn program_link_status(&self, program: ProgramKey) -> bool {
        self.programs
            .get(program)
            .is_some_and(|p| p.flags.contains(ProgramFlags::LINKED))
    }

    fn program_info_log(&self, program: ProgramKey) -> String {
        self.programs
            .get(program)
            .map(|p| p.info_log.clone())
            .unwrap_or_default()
    }

    fn delete_program(&mut self, program: ProgramKey) {
        self.record(format!("delete_program({:?})", program));
        if !self.programs.contains_key(program) {
            self.gl_error(GlError::InvalidValue, "delete_program on unknown program");
            return;
        }
        if self.current == Some(program) {
            if let Some(object) = self.programs.get_mut(program) {
                object.flags.insert(ProgramFlags::DELETE_PENDING);
            }
        } else {
            self.destroy_program(program);
        }
    }

    fn use_program(&mut self, program: Option<ProgramKey>) {
        self.record(format!("use_program({:?})", program));
        if let Some(program) = program {
            if !self.program_link_status(program) {
                self.gl_error(GlError::InvalidOperation, "use_program on a program that is not linked");
                return;
            }
        }

        let previous = std::mem::replace(&mut self.current, program);
        if let Some(previous) = previous {
            let pending = self
                .program_flags(previous)
                .is_some_and(|f| f.contains(ProgramFlags::DELETE_PENDING));
            if pending && program != Some(previous) {
                self.destroy_program(previous);
            }
        }
    }

    fn attrib_location(&self, program: ProgramKey, name: &str) -> Option<u32> {
        self.programs
            .get(program)?
            .linked
            .as_ref()?
            .attributes
            .get(name)
            .copied()
    }

    fn uniform_location(&self, program: ProgramKey, name: &str) -> Option<u32> {
        self.programs
            .get(program)?
            .linked
            .as_ref()?
            .uniforms
            .get(name)
            .copied()
    }
}

#[cfg(test)]
#[path = "reference_context_tests.rs"]
mod tests;
