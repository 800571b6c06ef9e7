/*!
# Shader Forge

Compile and link vertex + fragment shader programs through a GL-style
rendering context.

Turning two source strings into a usable program takes a dozen context calls,
and every failure path has to release what was created so far. This crate
wraps that sequence once, reports the backend's diagnostic verbatim, and never
leaks a shader or program object.

## Architecture

- **RenderContext**: Trait over the GL object API (shaders, programs, status and log queries)
- **ProgramBuilder**: Compiles both stages and links them, cleaning up on failure
- **LinkedProgram**: Caller-owned handle to a linked program
- **ProgramLibrary**: Named set of linked programs
- **ReferenceContext**: Headless context with a GLSL ES 1.00 front end, used by tests

Hardware backends live in their own crates (`shader_forge_backend_glow`).
*/

// Internal modules
mod error;
mod sink;
pub mod log;
pub mod context;
pub mod builder;
pub mod library;
pub mod reference;

// Main forge namespace module
pub mod forge {
    // Error types
    pub use crate::error::{Error, Result, ShaderCompileError, ProgramLinkError};

    // Logger sink
    pub use crate::sink::Forge;

    // Logging sub-module (types only, macros are exported at crate root)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger, CaptureLogger};
    }

    // Rendering context abstraction
    pub mod context {
        pub use crate::context::*;
    }

    // Program builder
    pub mod build {
        pub use crate::builder::*;
    }

    // Program library
    pub mod library {
        pub use crate::library::*;
    }

    // Headless reference backend
    pub mod reference {
        pub use crate::reference::*;
    }
}
