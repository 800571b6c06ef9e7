/// GLSL ES 1.00 front end used by the reference context
///
/// Parses a complete shader, reports driver-style diagnostics and extracts the
/// stage interface (attributes, varyings, uniforms) needed to link programs.
/// There is no code generation and no type checking: a shader that passes
/// this front end is only known to be well-formed and to use declared names.

pub mod lexer;
mod parser;
pub mod types;

use std::fmt;

use rustc_hash::FxHashSet;

use crate::context::ShaderStage;
pub use types::{GlslType, StorageQualifier, VariableType};

/// One compiler message, rendered as `ERROR: 0:<line>: '<token>' : <message>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub line: u32,
    pub token: String,
    pub message: String,
}

impl Diagnostic {
    pub fn new(line: u32, token: &str, message: &str) -> Self {
        Self {
            line,
            token: token.to_string(),
            message: message.to_string(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ERROR: 0:{}: '{}' : {}", self.line, self.token, self.message)
    }
}

/// Global variable that is part of the stage interface
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceVariable {
    pub name: String,
    pub ty: VariableType,
    pub precision: Option<String>,
    pub line: u32,
}

/// Everything the linker needs to know about one compiled stage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderInterface {
    pub stage: ShaderStage,
    pub attributes: Vec<InterfaceVariable>,
    pub varyings: Vec<InterfaceVariable>,
    pub uniforms: Vec<InterfaceVariable>,
    /// Identifiers read or written anywhere in an expression
    pub referenced: FxHashSet<String>,
    pub has_main: bool,
}

impl ShaderInterface {
    pub fn new(stage: ShaderStage) -> Self {
        Self {
            stage,
            attributes: Vec::new(),
            varyings: Vec::new(),
            uniforms: Vec::new(),
            referenced: FxHashSet::default(),
            has_main: false,
        }
    }

    /// Statically used by the shader code
    pub fn is_referenced(&self, name: &str) -> bool {
        self.referenced.contains(name)
    }

    pub fn varying(&self, name: &str) -> Option<&InterfaceVariable> {
        self.varyings.iter().find(|v| v.name == name)
    }

    pub fn uniform(&self, name: &str) -> Option<&InterfaceVariable> {
        self.uniforms.iter().find(|v| v.name == name)
    }

    pub fn attribute(&self, name: &str) -> Option<&InterfaceVariable> {
        self.attributes.iter().find(|v| v.name == name)
    }
}

/// Compile `source` for `stage`
///
/// Returns the stage interface, or every diagnostic found. A syntax error
/// stops parsing; semantic errors found before it are reported too.
pub fn compile(source: &str, stage: ShaderStage) -> Result<ShaderInterface, Vec<Diagnostic>> {
    let tokens = lexer::tokenize(source).map_err(|d| vec![d])?;
    parser::Parser::new(&tokens, stage).parse()
}

/// Render diagnostics as an info log, one line each
pub fn format_log(diagnostics: &[Diagnostic]) -> String {
    let mut log = String::new();
    for diagnostic in diagnostics {
        log.push_str(&diagnostic.to_string());
        log.push('\n');
    }
    log
}

#[cfg(test)]
#[path = "glsl_tests.rs"]
mod tests;
