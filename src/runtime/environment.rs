//! Process-wide module table.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::runtime::module::ModuleRef;

/// Maps module names to loaded modules. Membership here is what makes
/// `import` idempotent: a name already present is never re-evaluated.
#[derive(Debug, Default)]
pub struct Environment {
    modules: FxHashMap<Arc<str>, ModuleRef>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<ModuleRef> {
        self.modules.get(name).cloned()
    }

    pub fn insert(&mut self, module: ModuleRef) {
        let name = module.borrow().name.clone();
        self.modules.insert(name, module);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.modules.contains_key(name)
    }

    /// Drops a registration. Used when a module's top level fails partway,
    /// so a later import retries instead of seeing the half-evaluated state.
    pub fn remove(&mut self, name: &str) -> Option<ModuleRef> {
        self.modules.remove(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::module::Module;

    #[test]
    fn registers_and_finds_modules() {
        let mut env = Environment::new();
        assert!(!env.contains("main"));
        env.insert(Module::new(Arc::from("main"), "main.sb", "", "a = 1\n"));
        assert!(env.contains("main"));
        let module = env.get("main").expect("module registered");
        assert_eq!(&*module.borrow().name, "main");
        env.remove("main").expect("module removed");
        assert!(!env.contains("main"));
    }
}
