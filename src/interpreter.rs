//! The tree-walking interpreter: module loading, imports, and the driver
//! loop that feeds parsed statements to the evaluator in `eval`.

pub mod eval;
pub mod ops;

use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use rustc_hash::FxHashMap;

use crate::ast::{Node, NodeKind};
use crate::error::{ErrorKind, Result, ShibaError};
use crate::lexer::Tokenizer;
use crate::parser::Parser;
use crate::runtime::environment::Environment;
use crate::runtime::module::{Module, ModuleRef};
use crate::runtime::object::Object;
use crate::token::Location;

pub use eval::ProcessResult;

/// Source file extension; `import a/b` resolves to `a/b.sb`.
pub const SOURCE_EXTENSION: &str = "sb";

/// Environment variable naming the standard-module directory. Unset means
/// the stdlib resolution step is skipped.
pub const STDLIB_DIR_VAR: &str = "SHIBA_LIB";

/// Environment variable enabling evaluator tracing; any value but "0" turns
/// it on.
pub const DEBUG_VAR: &str = "SHIBA_DBG";

pub struct Interpreter {
    pub(crate) env: Environment,
    pub(crate) host_modules: FxHashMap<String, Vec<(String, Object)>>,
    pub(crate) output: Vec<String>,
    pub(crate) debug: bool,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter {
    pub fn new() -> Self {
        Self {
            env: Environment::new(),
            host_modules: FxHashMap::default(),
            output: Vec::new(),
            debug: std::env::var(DEBUG_VAR).is_ok_and(|value| value != "0"),
        }
    }

    /// Registers a host-stdlib module. `import name` falls back to this
    /// registry after file resolution fails; the members become the root
    /// scope of a synthetic module.
    pub fn register_host_module(&mut self, name: impl Into<String>, members: Vec<(String, Object)>) {
        self.host_modules.insert(name.into(), members);
    }

    /// Drains the lines produced by `print` since the last drain.
    pub fn take_output(&mut self) -> Vec<String> {
        std::mem::take(&mut self.output)
    }

    /// Creates a module and registers it. Registration happens before
    /// evaluation so that import cycles terminate instead of recursing.
    pub fn module_from_source(
        &mut self,
        name: &str,
        filename: &str,
        directory: &Path,
        content: &str,
    ) -> ModuleRef {
        let module = Module::new(Arc::from(name), filename, directory, content);
        self.env.insert(module.clone());
        module
    }

    /// Loads and runs a source file. The module is named after the file stem.
    pub fn run_file(&mut self, path: &Path) -> anyhow::Result<()> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("cannot read {}", path.display()))?;
        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "main".to_string());
        let directory = path.parent().unwrap_or_else(|| Path::new("")).to_path_buf();
        let module = self.module_from_source(
            &name,
            &path.to_string_lossy(),
            &directory,
            &content,
        );
        self.run_module(&module)?;
        Ok(())
    }

    /// Runs a source string as the `main` module. Used by tests and
    /// embedders that do not have a file.
    pub fn run_source(&mut self, content: &str) -> Result<()> {
        let module = self.module_from_source("main", "main.sb", Path::new(""), content);
        self.run_module(&module)
    }

    /// Parses and evaluates the module's top level, one statement at a time.
    pub fn run_module(&mut self, module: &ModuleRef) -> Result<()> {
        let (name, content) = {
            let module = module.borrow();
            (module.name.clone(), module.content.clone())
        };
        let mut parser = Parser::new(Tokenizer::new(name, &content));
        loop {
            let node = parser.parse_statement()?;
            if node.kind == NodeKind::Eof {
                break;
            }
            match self.eval_statement(module, &node)? {
                ProcessResult::Exit => break,
                // A top-level `return` ends the module like falling off the
                // end of the file does.
                ProcessResult::Return(_) => break,
                ProcessResult::Break => {
                    return Err(ShibaError::new(
                        ErrorKind::ControlFlow { keyword: "break" },
                        node.location().clone(),
                    ));
                }
                ProcessResult::Continue => {
                    return Err(ShibaError::new(
                        ErrorKind::ControlFlow {
                            keyword: "continue",
                        },
                        node.location().clone(),
                    ));
                }
                ProcessResult::Obj(_) | ProcessResult::Nop => {}
            }
        }
        Ok(())
    }

    /// Evaluates one statement against a module, with tracing.
    pub fn eval_statement(&mut self, module: &ModuleRef, node: &Node) -> Result<ProcessResult> {
        self.eval(module, node)
    }

    /// `import` resolution: memoized module, then a user file next to the
    /// importer, then the stdlib directory, then the host registry.
    pub(crate) fn import_module(
        &mut self,
        importer: &ModuleRef,
        target: &str,
        location: &Location,
    ) -> Result<Object> {
        if let Some(module) = self.env.get(target) {
            return Ok(Object::Module(module));
        }

        let relative = format!("{target}.{SOURCE_EXTENSION}");
        let user_path = importer.borrow().directory.join(&relative);
        if user_path.is_file() {
            return self.import_file(target, &user_path, location);
        }

        if let Ok(stdlib_dir) = std::env::var(STDLIB_DIR_VAR) {
            let stdlib_path = Path::new(&stdlib_dir).join(&relative);
            if stdlib_path.is_file() {
                return self.import_file(target, &stdlib_path, location);
            }
        }

        if let Some(members) = self.host_modules.remove(target) {
            let module = Module::new(Arc::from(target), "", "", "");
            for (name, object) in members {
                module.borrow_mut().scope.set(&name, object);
            }
            self.env.insert(module.clone());
            return Ok(Object::Module(module));
        }

        Err(ShibaError::new(
            ErrorKind::Import {
                name: target.to_string(),
            },
            location.clone(),
        ))
    }

    fn import_file(&mut self, target: &str, path: &Path, location: &Location) -> Result<Object> {
        let content = fs::read_to_string(path).map_err(|_| {
            ShibaError::new(
                ErrorKind::Import {
                    name: target.to_string(),
                },
                location.clone(),
            )
        })?;
        let directory = path.parent().unwrap_or_else(|| Path::new("")).to_path_buf();
        let module =
            self.module_from_source(target, &path.to_string_lossy(), &directory, &content);
        // The early registration exists for cycle termination only; a module
        // whose top level failed must not be handed out by later imports.
        if let Err(error) = self.run_module(&module) {
            self.env.remove(target);
            return Err(error);
        }
        Ok(Object::Module(module))
    }

    pub(crate) fn trace(&self, node: &Node) {
        if self.debug {
            println!("[shiba] eval {} at {}", node.kind.name(), node.location());
        }
    }
}
