//! A loaded module: identity, source text, and its scope.

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::Arc;

use crate::runtime::scope::Scope;

pub type ModuleRef = Rc<RefCell<Module>>;

/// Modules are created when a file (or host registry entry) is resolved and
/// stay alive for the whole run; imports memoize through the environment.
#[derive(Debug)]
pub struct Module {
    pub name: Arc<str>,
    pub filename: String,
    /// Directory the module was loaded from; user imports resolve relative
    /// to it. Empty for REPL and host modules.
    pub directory: PathBuf,
    pub content: String,
    pub scope: Scope,
}

impl Module {
    pub fn new(
        name: Arc<str>,
        filename: impl Into<String>,
        directory: impl Into<PathBuf>,
        content: impl Into<String>,
    ) -> ModuleRef {
        Rc::new(RefCell::new(Module {
            name,
            filename: filename.into(),
            directory: directory.into(),
            content: content.into(),
            scope: Scope::new(),
        }))
    }
}
