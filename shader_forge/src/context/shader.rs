/// Shader stage and shader source types

use std::fmt;

/// Shader stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    /// Per-vertex transform into clip space
    Vertex,
    /// Per-pixel color
    Fragment,
}

impl ShaderStage {
    /// Both stages, in compile order
    pub const ALL: [ShaderStage; 2] = [ShaderStage::Vertex, ShaderStage::Fragment];

    pub fn name(self) -> &'static str {
        match self {
            ShaderStage::Vertex => "vertex",
            ShaderStage::Fragment => "fragment",
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Source text tagged with its stage
///
/// Borrowed from the caller for the duration of compilation only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShaderSource<'a> {
    pub stage: ShaderStage,
    pub code: &'a str,
}

impl<'a> ShaderSource<'a> {
    pub fn vertex(code: &'a str) -> Self {
        Self { stage: ShaderStage::Vertex, code }
    }

    pub fn fragment(code: &'a str) -> Self {
        Self { stage: ShaderStage::Fragment, code }
    }
}
