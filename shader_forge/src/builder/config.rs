/// Builder configuration

/// Configuration shared by every program a builder produces
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuilderConfig {
    /// Line prepended (followed by a newline) to every source before compiling,
    /// e.g. `#version 300 es` or a shared `precision mediump float;`.
    /// Compiler line numbers are shifted by one when set.
    pub version_header: Option<String>,
    /// Delete both compiled shaders when linking fails
    pub release_shaders_on_link_failure: bool,
    /// Detach and delete the shaders once the program linked successfully
    pub detach_after_link: bool,
    /// Name used as prefix in log messages
    pub label: String,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            version_header: None,
            release_shaders_on_link_failure: true,
            detach_after_link: false,
            label: "shader_forge".to_string(),
        }
    }
}

impl BuilderConfig {
    pub fn with_version_header(mut self, header: impl Into<String>) -> Self {
        self.version_header = Some(header.into());
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_detach_after_link(mut self, detach: bool) -> Self {
        self.detach_after_link = detach;
        self
    }

    pub fn with_release_shaders_on_link_failure(mut self, release: bool) -> Self {
        self.release_shaders_on_link_failure = release;
        self
    }

    /// Final text handed to the backend for `code`
    pub(crate) fn decorate<'a>(&self, code: &'a str) -> std::borrow::Cow<'a, str> {
        match &self.version_header {
            Some(header) => std::borrow::Cow::Owned(format!("{}\n{}", header, code)),
            None => std::borrow::Cow::Borrowed(code),
        }
    }
}
