//! Per-module name resolution state.
//!
//! Two-level shape: a stack of function frames (root frame plus one per
//! active call), each holding a stack of block scopes. `if`/`for` bodies push
//! a block; calls push a frame. Every push is paired with a pop on all exit
//! paths, including error propagation; the evaluator owns that discipline.
//!
//! Lookup order: innermost block outward within the current frame, then the
//! module root frame. Writes update an existing binding where it lives and
//! otherwise create one in the innermost current block. Struct definitions
//! occupy a parallel name space of the same shape.

use std::rc::Rc;

use rustc_hash::FxHashMap;

use crate::runtime::object::{Object, StructDef};

#[derive(Debug, Default)]
struct BlockScope {
    vars: FxHashMap<String, Object>,
    structs: FxHashMap<String, Rc<StructDef>>,
}

#[derive(Debug)]
struct FunctionFrame {
    blocks: Vec<BlockScope>,
}

impl FunctionFrame {
    fn new() -> Self {
        Self {
            blocks: vec![BlockScope::default()],
        }
    }
}

#[derive(Debug)]
pub struct Scope {
    frames: Vec<FunctionFrame>,
}

impl Default for Scope {
    fn default() -> Self {
        Self::new()
    }
}

impl Scope {
    pub fn new() -> Self {
        Self {
            frames: vec![FunctionFrame::new()],
        }
    }

    pub fn push_frame(&mut self) {
        self.frames.push(FunctionFrame::new());
    }

    /// The root frame is never popped.
    pub fn pop_frame(&mut self) {
        debug_assert!(self.frames.len() > 1);
        self.frames.pop();
    }

    pub fn push_block(&mut self) {
        self.current_frame_mut().blocks.push(BlockScope::default());
    }

    /// The bottom block of a frame is never popped.
    pub fn pop_block(&mut self) {
        let frame = self.current_frame_mut();
        debug_assert!(frame.blocks.len() > 1);
        frame.blocks.pop();
    }

    pub fn frame_depth(&self) -> usize {
        self.frames.len()
    }

    pub fn block_depth(&self) -> usize {
        self.current_frame().blocks.len()
    }

    pub fn get(&self, name: &str) -> Option<Object> {
        let current = self.current_frame();
        for block in current.blocks.iter().rev() {
            if let Some(value) = block.vars.get(name) {
                return Some(value.clone());
            }
        }
        if self.frames.len() > 1 {
            for block in self.frames[0].blocks.iter().rev() {
                if let Some(value) = block.vars.get(name) {
                    return Some(value.clone());
                }
            }
        }
        None
    }

    /// Updates the binding where it resolves, or creates it in the innermost
    /// current block.
    pub fn set(&mut self, name: &str, value: Object) {
        if let Some(slot) = self.lookup_mut(name) {
            *slot = value;
            return;
        }
        self.define(name, value);
    }

    /// Unconditionally binds in the innermost current block. Used for
    /// parameters, receiver fields, and loop bindings.
    pub fn define(&mut self, name: &str, value: Object) {
        let frame = self.current_frame_mut();
        let block = frame
            .blocks
            .last_mut()
            .unwrap_or_else(|| unreachable!("frame always has a bottom block"));
        block.vars.insert(name.to_string(), value);
    }

    pub fn get_struct(&self, name: &str) -> Option<Rc<StructDef>> {
        let current = self.current_frame();
        for block in current.blocks.iter().rev() {
            if let Some(def) = block.structs.get(name) {
                return Some(def.clone());
            }
        }
        if self.frames.len() > 1 {
            for block in self.frames[0].blocks.iter().rev() {
                if let Some(def) = block.structs.get(name) {
                    return Some(def.clone());
                }
            }
        }
        None
    }

    pub fn set_struct(&mut self, name: &str, def: Rc<StructDef>) {
        let frame = self.current_frame_mut();
        let block = frame
            .blocks
            .last_mut()
            .unwrap_or_else(|| unreachable!("frame always has a bottom block"));
        block.structs.insert(name.to_string(), def);
    }

    fn lookup_mut(&mut self, name: &str) -> Option<&mut Object> {
        let current = self.frames.len() - 1;
        let block_count = self.frames[current].blocks.len();
        for idx in (0..block_count).rev() {
            if self.frames[current].blocks[idx].vars.contains_key(name) {
                return self.frames[current].blocks[idx].vars.get_mut(name);
            }
        }
        if current > 0 {
            let root_blocks = self.frames[0].blocks.len();
            for idx in (0..root_blocks).rev() {
                if self.frames[0].blocks[idx].vars.contains_key(name) {
                    return self.frames[0].blocks[idx].vars.get_mut(name);
                }
            }
        }
        None
    }

    fn current_frame(&self) -> &FunctionFrame {
        self.frames
            .last()
            .unwrap_or_else(|| unreachable!("root frame is never popped"))
    }

    fn current_frame_mut(&mut self) -> &mut FunctionFrame {
        self.frames
            .last_mut()
            .unwrap_or_else(|| unreachable!("root frame is never popped"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inner_blocks_see_outer_bindings() {
        let mut scope = Scope::new();
        scope.set("a", Object::Int(1));
        scope.push_block();
        assert_eq!(scope.get("a").map(|v| v.to_output()), Some("1".into()));
        scope.pop_block();
    }

    #[test]
    fn writing_an_existing_name_updates_it_where_it_lives() {
        let mut scope = Scope::new();
        scope.set("a", Object::Int(1));
        scope.push_block();
        scope.set("a", Object::Int(2));
        scope.pop_block();
        assert_eq!(scope.get("a").map(|v| v.to_output()), Some("2".into()));
    }

    #[test]
    fn writing_a_new_name_creates_it_in_the_innermost_block() {
        let mut scope = Scope::new();
        scope.push_block();
        scope.set("tmp", Object::Int(5));
        scope.pop_block();
        assert!(scope.get("tmp").is_none());
    }

    #[test]
    fn function_frames_hide_caller_locals_but_see_module_globals() {
        let mut scope = Scope::new();
        scope.set("global", Object::Int(1));
        scope.push_block();
        scope.set("block_local", Object::Int(2));

        scope.push_frame();
        assert!(scope.get("global").is_some());
        // Block locals of the root frame are still root-frame bindings and
        // remain visible; a second frame's locals would not be.
        scope.push_frame();
        scope.define("callee_local", Object::Int(3));
        scope.pop_frame();
        assert!(scope.get("callee_local").is_none());
        scope.pop_frame();
        scope.pop_block();
    }

    #[test]
    fn frame_writes_update_module_globals() {
        let mut scope = Scope::new();
        scope.set("counter", Object::Int(0));
        scope.push_frame();
        scope.set("counter", Object::Int(1));
        scope.pop_frame();
        assert_eq!(scope.get("counter").map(|v| v.to_output()), Some("1".into()));
    }

    #[test]
    fn define_always_binds_locally() {
        let mut scope = Scope::new();
        scope.set("x", Object::Int(1));
        scope.push_frame();
        scope.define("x", Object::Int(9));
        assert_eq!(scope.get("x").map(|v| v.to_output()), Some("9".into()));
        scope.pop_frame();
        assert_eq!(scope.get("x").map(|v| v.to_output()), Some("1".into()));
    }

    #[test]
    fn struct_name_space_is_separate_from_variables() {
        let mut scope = Scope::new();
        scope.set("P", Object::Int(1));
        scope.set_struct(
            "P",
            Rc::new(StructDef {
                name: "P".to_string(),
                fields: vec!["x".to_string()],
                methods: Default::default(),
            }),
        );
        assert!(scope.get("P").is_some());
        assert!(scope.get_struct("P").is_some());
        assert!(scope.get_struct("Q").is_none());
    }

    #[test]
    fn depth_accessors_track_pushes() {
        let mut scope = Scope::new();
        assert_eq!(scope.frame_depth(), 1);
        assert_eq!(scope.block_depth(), 1);
        scope.push_block();
        scope.push_frame();
        assert_eq!(scope.frame_depth(), 2);
        assert_eq!(scope.block_depth(), 1);
        scope.pop_frame();
        assert_eq!(scope.block_depth(), 2);
        scope.pop_block();
        assert_eq!(scope.block_depth(), 1);
    }
}
