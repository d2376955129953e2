//! Per-call traversal state.

use crate::error::DepthExceeded;
use crate::options::CodecOptions;
use crate::path::format_pointer;

/// Where an encode or decode currently is inside the document.
///
/// A fresh scope is created for every codec call, so nothing is shared
/// between calls or threads.
#[derive(Debug, Clone)]
pub struct Scope {
    path: Vec<String>,
    max_depth: usize,
}

impl Scope {
    pub fn new(options: &CodecOptions) -> Self {
        Self {
            path: Vec::new(),
            max_depth: options.max_depth,
        }
    }

    /// Current nesting level; the document root is level 0.
    pub fn depth(&self) -> usize {
        self.path.len()
    }

    /// JSON Pointer of the value currently being visited.
    pub fn pointer(&self) -> String {
        format_pointer(&self.path)
    }

    /// Runs `f` one level deeper, under the path step `step`.
    ///
    /// On error the step is left on the path so that the pointer of any
    /// error built afterwards still names the failing location.
    pub fn nested<T, E>(
        &mut self,
        step: impl Into<String>,
        f: impl FnOnce(&mut Self) -> Result<T, E>,
    ) -> Result<T, E>
    where
        E: From<DepthExceeded>,
    {
        self.path.push(step.into());
        if self.path.len() > self.max_depth {
            return Err(DepthExceeded {
                limit: self.max_depth,
                pointer: self.pointer(),
            }
            .into());
        }
        let out = f(self)?;
        self.path.pop();
        Ok(out)
    }
}
