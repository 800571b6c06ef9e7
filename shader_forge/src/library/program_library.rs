/// ProgramLibrary - named set of programs built by one ProgramBuilder
///
/// Scenes that switch between several programs (one per material, one per
/// effect) keep them here under a name and activate them by that name.
/// Programs are kept in insertion order.

use rustc_hash::FxHashMap;

use crate::builder::{LinkedProgram, ProgramBuilder};
use crate::context::RenderContext;
use crate::error::{Error, Result};

const LOG_SOURCE: &str = "shader_forge::Library";

// ===== PROGRAM LIBRARY =====

/// Named linked programs
pub struct ProgramLibrary<C: RenderContext> {
    builder: ProgramBuilder,
    programs: FxHashMap<String, LinkedProgram<C>>,
    order: Vec<String>,
}

impl<C: RenderContext> ProgramLibrary<C> {
    /// Empty library building with `builder`
    pub fn new(builder: ProgramBuilder) -> Self {
        Self {
            builder,
            programs: FxHashMap::default(),
            order: Vec::new(),
        }
    }

    pub fn builder(&self) -> &ProgramBuilder {
        &self.builder
    }

    /// Build a program and store it under `name`
    ///
    /// # Errors
    ///
    /// `Error::InvalidResource` if `name` is already taken (nothing is
    /// compiled in that case), otherwise the errors of `ProgramBuilder::link`.
    pub fn build(
        &mut self,
        ctx: &mut C,
        name: &str,
        vertex_src: &str,
        fragment_src: &str,
    ) -> Result<&LinkedProgram<C>> {
        if self.programs.contains_key(name) {
            crate::forge_error!(LOG_SOURCE, "Program '{}' already exists", name);
            return Err(Error::InvalidResource(format!("Program '{}' already exists", name)));
        }

        let program = self.builder.link(ctx, vertex_src, fragment_src)?;

        crate::forge_debug!(LOG_SOURCE, "Program '{}' stored as {:?}", name, program.handle());

        self.order.push(name.to_string());
        Ok(self.programs.entry(name.to_string()).or_insert(program))
    }

    pub fn get(&self, name: &str) -> Option<&LinkedProgram<C>> {
        self.programs.get(name)
    }

    /// Make the program stored under `name` current
    ///
    /// # Errors
    ///
    /// `Error::InvalidResource` if no program has that name.
    pub fn activate(&self, ctx: &mut C, name: &str) -> Result<()> {
        let program = self.lookup(name)?;
        program.activate(ctx);
        Ok(())
    }

    /// Dispose the program stored under `name`
    ///
    /// # Errors
    ///
    /// `Error::InvalidResource` if no program has that name.
    pub fn remove(&mut self, ctx: &mut C, name: &str) -> Result<()> {
        self.lookup(name)?;
        if let Some(program) = self.programs.remove(name) {
            program.dispose(ctx);
        }
        self.order.retain(|n| n != name);
        Ok(())
    }

    /// Dispose every program, oldest first
    pub fn dispose_all(&mut self, ctx: &mut C) {
        let count = self.order.len();
        for name in self.order.drain(..) {
            if let Some(program) = self.programs.remove(&name) {
                program.dispose(ctx);
            }
        }

        if count > 0 {
            crate::forge_debug!(LOG_SOURCE, "Disposed {} program(s)", count);
        }
    }

    pub fn len(&self) -> usize {
        self.programs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.programs.is_empty()
    }

    /// Program names in insertion order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    fn lookup(&self, name: &str) -> Result<&LinkedProgram<C>> {
        match self.programs.get(name) {
            Some(program) => Ok(program),
            None => {
                crate::forge_error!(LOG_SOURCE, "Unknown program '{}'", name);
                Err(Error::InvalidResource(format!("Unknown program '{}'", name)))
            }
        }
    }
}

impl<C: RenderContext> std::fmt::Debug for ProgramLibrary<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProgramLibrary")
            .field("builder", &self.builder)
            .field("programs", &self.order)
            .finish()
    }
}

#[cfg(test)]
#[path = "program_library_tests.rs"]
mod tests;
