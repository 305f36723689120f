//! The evaluator: walks AST nodes against a module and produces a
//! [`ProcessResult`] per step.
//!
//! Control transfers (`break`, `continue`, `return`, end-of-file) propagate
//! through the result value rather than through errors, so every construct on
//! the way up decides whether to absorb or forward them. Scope pushes are
//! paired with pops on every exit path, error or not; the `let result = ...;
//! pop; result?` shape below is what enforces that.

use std::cell::RefCell;
use std::rc::Rc;

use rustc_hash::FxHashMap;

use crate::ast::{AssignOp, BinaryOp, Node, NodeKind};
use crate::error::{ErrorKind, Result, ShibaError};
use crate::interpreter::{Interpreter, ops};
use crate::runtime::builtins::{BuiltinEffect, BuiltinFunction};
use crate::runtime::module::ModuleRef;
use crate::runtime::object::{FunctionObject, Object, StructDef, StructInstance};
use crate::runtime::sequence::Sequence;
use crate::token::Location;

/// Outcome of one evaluator step.
#[derive(Debug)]
pub enum ProcessResult {
    Obj(Object),
    Nop,
    Exit,
    Continue,
    Break,
    Return(Option<Object>),
}

impl Interpreter {
    pub(crate) fn eval(&mut self, module: &ModuleRef, node: &Node) -> Result<ProcessResult> {
        self.trace(node);
        match &node.kind {
            NodeKind::Int(value) => Ok(ProcessResult::Obj(Object::Int(*value))),
            NodeKind::Float(value) => Ok(ProcessResult::Obj(Object::Float(*value))),
            NodeKind::Str(value) => Ok(ProcessResult::Obj(Object::str(value.as_str()))),
            NodeKind::Bool(value) => Ok(ProcessResult::Obj(Object::Bool(*value))),
            NodeKind::List(elements) => {
                let mut values = Vec::with_capacity(elements.len());
                for element in elements {
                    values.push(self.eval_expr(module, element)?);
                }
                Ok(ProcessResult::Obj(Object::list(values)))
            }
            NodeKind::Dict(keys, values) => {
                let mut dict = crate::runtime::dict::DictObject::new();
                for (key_expr, value_expr) in keys.iter().zip(values) {
                    let key = self.eval_expr(module, key_expr)?;
                    let value = self.eval_expr(module, value_expr)?;
                    dict.set(&key, value);
                }
                Ok(ProcessResult::Obj(Object::dict(dict)))
            }
            NodeKind::Ident(name) => {
                let found = module.borrow().scope.get(name);
                if let Some(value) = found {
                    return Ok(ProcessResult::Obj(value));
                }
                if let Some(builtin) = BuiltinFunction::from_name(name) {
                    return Ok(ProcessResult::Obj(Object::Builtin(builtin)));
                }
                Err(ShibaError::new(
                    ErrorKind::UndefinedIdent { name: name.clone() },
                    node.location().clone(),
                ))
            }
            NodeKind::Index { target, index } => {
                let value = self.eval_index(module, target, index, node.location())?;
                Ok(ProcessResult::Obj(value))
            }
            NodeKind::Slice { target, start, end } => {
                let value = self.eval_slice(module, target, start, end, node.location())?;
                Ok(ProcessResult::Obj(value))
            }
            NodeKind::Selector { target, name } => {
                let value = self.eval_selector(module, target, name, node.location())?;
                Ok(ProcessResult::Obj(value))
            }
            NodeKind::Unary { op, operand } => {
                let value = self.eval_expr(module, operand)?;
                let result = ops::unary(*op, &value)
                    .map_err(|kind| ShibaError::new(kind, node.location().clone()))?;
                Ok(ProcessResult::Obj(result))
            }
            NodeKind::Binary { op, left, right } => match op {
                    BinaryOp::And | BinaryOp::Or => {
                        let value = self.eval_logical(module, *op, left, right)?;
                        Ok(ProcessResult::Obj(value))
                    }
                    _ => {
                        let lhs = self.eval_expr(module, left)?;
                        let rhs = self.eval_expr(module, right)?;
                        let result = ops::binary(*op, &lhs, &rhs)
                            .map_err(|kind| ShibaError::new(kind, node.location().clone()))?;
                        Ok(ProcessResult::Obj(result))
                    }
                },
            NodeKind::Assign {
                op,
                targets,
                values,
            } => {
                self.eval_assign(module, *op, targets, values)?;
                Ok(ProcessResult::Nop)
            }
            NodeKind::If {
                conds,
                blocks,
                else_block,
            } => {
                module.borrow_mut().scope.push_block();
                let result = self.eval_if(module, conds, blocks, else_block.as_deref());
                module.borrow_mut().scope.pop_block();
                result
            }
            NodeKind::For {
                target,
                counter,
                element,
                body,
            } => {
                module.borrow_mut().scope.push_block();
                let result = self.run_for_loop(module, target, counter, element, body);
                module.borrow_mut().scope.pop_block();
                result
            }
            NodeKind::Loop { cond, body } => {
                module.borrow_mut().scope.push_block();
                let result = self.run_cond_loop(module, cond, body);
                module.borrow_mut().scope.pop_block();
                result
            }
            NodeKind::FunctionDef { name, params, body } => {
                let function = Rc::new(FunctionObject {
                    module: module.borrow().name.clone(),
                    name: name.clone(),
                    params: params.clone(),
                    body: body.clone(),
                });
                module
                    .borrow_mut()
                    .scope
                    .set(name, Object::Function(function));
                Ok(ProcessResult::Nop)
            }
            NodeKind::StructDef {
                name,
                fields,
                methods,
            } => {
                let def = self.build_struct_def(module, name, fields, methods, node.location())?;
                module.borrow_mut().scope.set_struct(name, def);
                Ok(ProcessResult::Nop)
            }
            NodeKind::StructInit { type_name, fields } => {
                let value = self.eval_struct_init(module, type_name, fields, node.location())?;
                Ok(ProcessResult::Obj(value))
            }
            NodeKind::Call { callee, args } => {
                let value = self.eval_call(module, callee, args, node.location())?;
                Ok(ProcessResult::Obj(value))
            }
            NodeKind::Return(value) => {
                let value = match value {
                    Some(expr) => Some(self.eval_expr(module, expr)?),
                    None => None,
                };
                Ok(ProcessResult::Return(value))
            }
            NodeKind::Break => Ok(ProcessResult::Break),
            NodeKind::Continue => Ok(ProcessResult::Continue),
            NodeKind::Import { target } => {
                let object = self.import_module(module, target, node.location())?;
                let binding = target.rsplit('/').next().unwrap_or(target);
                module.borrow_mut().scope.set(binding, object);
                Ok(ProcessResult::Nop)
            }
            NodeKind::Comment(_) => Ok(ProcessResult::Nop),
            NodeKind::Eof => Ok(ProcessResult::Exit),
        }
    }

    /// Evaluates in expression position; anything but a value is an
    /// evaluator bug surfaced as `Internal`.
    pub(crate) fn eval_expr(&mut self, module: &ModuleRef, node: &Node) -> Result<Object> {
        match self.eval(module, node)? {
            ProcessResult::Obj(value) => Ok(value),
            _ => Err(ShibaError::new(
                ErrorKind::Internal("statement in expression position".to_string()),
                node.location().clone(),
            )),
        }
    }

    /// Runs a statement sequence, forwarding the first control transfer.
    fn eval_body(&mut self, module: &ModuleRef, nodes: &[Node]) -> Result<ProcessResult> {
        for node in nodes {
            match self.eval(module, node)? {
                ProcessResult::Obj(_) | ProcessResult::Nop => {}
                result => return Ok(result),
            }
        }
        Ok(ProcessResult::Nop)
    }

    fn eval_if(
        &mut self,
        module: &ModuleRef,
        conds: &[Node],
        blocks: &[Vec<Node>],
        else_block: Option<&[Node]>,
    ) -> Result<ProcessResult> {
        for (cond, block) in conds.iter().zip(blocks) {
            if self.eval_expr(module, cond)?.is_truthy() {
                return self.eval_body(module, block);
            }
        }
        if let Some(block) = else_block {
            return self.eval_body(module, block);
        }
        Ok(ProcessResult::Nop)
    }

    fn run_for_loop(
        &mut self,
        module: &ModuleRef,
        target: &Node,
        counter: &str,
        element: &str,
        body: &[Node],
    ) -> Result<ProcessResult> {
        let value = self.eval_expr(module, target)?;
        let Some(sequence) = Sequence::of(&value) else {
            return Err(ShibaError::new(
                ErrorKind::TypeMismatch {
                    expected: "iterable".to_string(),
                    actual: value.kind_name().to_string(),
                },
                target.location().clone(),
            ));
        };
        let mut index = 0usize;
        while let Some(item) = sequence.get(index) {
            {
                let mut module = module.borrow_mut();
                module.scope.define(counter, Object::Int(index as i64));
                module.scope.define(element, item);
            }
            match self.eval_body(module, body)? {
                ProcessResult::Break => return Ok(ProcessResult::Nop),
                ProcessResult::Continue | ProcessResult::Obj(_) | ProcessResult::Nop => {}
                result => return Ok(result),
            }
            index += 1;
        }
        Ok(ProcessResult::Nop)
    }

    fn run_cond_loop(
        &mut self,
        module: &ModuleRef,
        cond: &Node,
        body: &[Node],
    ) -> Result<ProcessResult> {
        loop {
            if !self.eval_expr(module, cond)?.is_truthy() {
                return Ok(ProcessResult::Nop);
            }
            match self.eval_body(module, body)? {
                ProcessResult::Break => return Ok(ProcessResult::Nop),
                ProcessResult::Continue | ProcessResult::Obj(_) | ProcessResult::Nop => {}
                result => return Ok(result),
            }
        }
    }

    fn eval_logical(
        &mut self,
        module: &ModuleRef,
        op: BinaryOp,
        left: &Node,
        right: &Node,
    ) -> Result<Object> {
        let lhs = self.eval_expr(module, left)?;
        let Object::Bool(lhs_value) = lhs else {
            return Err(ShibaError::new(
                ErrorKind::TypeMismatch {
                    expected: "bool".to_string(),
                    actual: lhs.kind_name().to_string(),
                },
                left.location().clone(),
            ));
        };
        let short_circuit = match op {
            BinaryOp::And => !lhs_value,
            _ => lhs_value,
        };
        if short_circuit {
            return Ok(Object::Bool(lhs_value));
        }
        let rhs = self.eval_expr(module, right)?;
        let Object::Bool(rhs_value) = rhs else {
            return Err(ShibaError::new(
                ErrorKind::TypeMismatch {
                    expected: "bool".to_string(),
                    actual: rhs.kind_name().to_string(),
                },
                right.location().clone(),
            ));
        };
        Ok(Object::Bool(rhs_value))
    }

    fn eval_index(
        &mut self,
        module: &ModuleRef,
        target: &Node,
        index: &Node,
        location: &Location,
    ) -> Result<Object> {
        let container = self.eval_expr(module, target)?;
        let key = self.eval_expr(module, index)?;
        if let Object::Dict(dict) = &container {
            return dict.borrow().get(&key).ok_or_else(|| {
                ShibaError::new(
                    ErrorKind::DictKeyNotFound {
                        key: key.to_repr(),
                    },
                    location.clone(),
                )
            });
        }
        let Some(sequence) = Sequence::of(&container) else {
            return Err(ShibaError::new(
                ErrorKind::TypeMismatch {
                    expected: "string, list, or dict".to_string(),
                    actual: container.kind_name().to_string(),
                },
                target.location().clone(),
            ));
        };
        let position = self.expect_int(&key, index.location())?;
        let length = sequence.len();
        if position < 0 || position as usize >= length {
            return Err(ShibaError::new(
                ErrorKind::InvalidIndex {
                    index: position,
                    length,
                },
                location.clone(),
            ));
        }
        sequence.get(position as usize).ok_or_else(|| {
            ShibaError::new(
                ErrorKind::Internal("sequence index vanished".to_string()),
                location.clone(),
            )
        })
    }

    fn eval_slice(
        &mut self,
        module: &ModuleRef,
        target: &Node,
        start: &Node,
        end: &Node,
        location: &Location,
    ) -> Result<Object> {
        let container = self.eval_expr(module, target)?;
        let Some(sequence) = Sequence::of(&container) else {
            return Err(ShibaError::new(
                ErrorKind::TypeMismatch {
                    expected: "string or list".to_string(),
                    actual: container.kind_name().to_string(),
                },
                target.location().clone(),
            ));
        };
        let start_value = self.eval_expr(module, start)?;
        let end_value = self.eval_expr(module, end)?;
        let a = self.expect_int(&start_value, start.location())?;
        let b = self.expect_int(&end_value, end.location())?;
        let length = sequence.len();
        if a < 0 || a as usize > length {
            return Err(ShibaError::new(
                ErrorKind::InvalidIndex { index: a, length },
                location.clone(),
            ));
        }
        if b < a || b as usize > length {
            return Err(ShibaError::new(
                ErrorKind::InvalidIndex { index: b, length },
                location.clone(),
            ));
        }
        Ok(sequence.slice(a as usize, b as usize))
    }

    fn eval_selector(
        &mut self,
        module: &ModuleRef,
        target: &Node,
        name: &str,
        location: &Location,
    ) -> Result<Object> {
        let object = self.eval_expr(module, target)?;
        match &object {
            Object::Module(target_module) => {
                let found = {
                    let target_module = target_module.borrow();
                    target_module.scope.get(name).or_else(|| {
                        target_module
                            .scope
                            .get_struct(name)
                            .map(Object::StructDef)
                    })
                };
                found.ok_or_else(|| {
                    ShibaError::new(
                        ErrorKind::UndefinedIdent {
                            name: name.to_string(),
                        },
                        location.clone(),
                    )
                })
            }
            Object::Struct(instance) => {
                if let Some(value) = instance.borrow().field(name) {
                    return Ok(value);
                }
                StructInstance::method(instance, name).ok_or_else(|| {
                    ShibaError::new(
                        ErrorKind::UndefinedIdent {
                            name: name.to_string(),
                        },
                        location.clone(),
                    )
                })
            }
            _ => Err(ShibaError::new(
                ErrorKind::TypeMismatch {
                    expected: "module or struct".to_string(),
                    actual: object.kind_name().to_string(),
                },
                target.location().clone(),
            )),
        }
    }

    fn build_struct_def(
        &mut self,
        module: &ModuleRef,
        name: &str,
        fields: &[String],
        methods: &[Node],
        location: &Location,
    ) -> Result<Rc<StructDef>> {
        let mut method_map = FxHashMap::default();
        for method in methods {
            let NodeKind::FunctionDef {
                name: method_name,
                params,
                body,
            } = &method.kind
            else {
                return Err(ShibaError::new(
                    ErrorKind::Internal("struct method is not a function definition".to_string()),
                    location.clone(),
                ));
            };
            method_map.insert(
                method_name.clone(),
                Rc::new(FunctionObject {
                    module: module.borrow().name.clone(),
                    name: method_name.clone(),
                    params: params.clone(),
                    body: body.clone(),
                }),
            );
        }
        Ok(Rc::new(StructDef {
            name: name.to_string(),
            fields: fields.to_vec(),
            methods: method_map,
        }))
    }

    fn eval_struct_init(
        &mut self,
        module: &ModuleRef,
        type_name: &str,
        fields: &[(String, Node)],
        location: &Location,
    ) -> Result<Object> {
        let def = module.borrow().scope.get_struct(type_name);
        let Some(def) = def else {
            return Err(ShibaError::new(
                ErrorKind::UndefinedIdent {
                    name: type_name.to_string(),
                },
                location.clone(),
            ));
        };
        let mut field_map = FxHashMap::default();
        for name in &def.fields {
            field_map.insert(name.clone(), Object::Nil);
        }
        for (name, expr) in fields {
            if !def.fields.iter().any(|field| field == name) {
                return Err(ShibaError::new(
                    ErrorKind::TypeMismatch {
                        expected: format!("field of {type_name}"),
                        actual: name.clone(),
                    },
                    expr.location().clone(),
                ));
            }
            let value = self.eval_expr(module, expr)?;
            field_map.insert(name.clone(), value);
        }
        Ok(Object::Struct(Rc::new(RefCell::new(StructInstance {
            def,
            fields: field_map,
        }))))
    }

    fn eval_call(
        &mut self,
        module: &ModuleRef,
        callee: &Node,
        args: &[Node],
        location: &Location,
    ) -> Result<Object> {
        let callee_value = self.eval_expr(module, callee)?;
        let mut arg_values = Vec::with_capacity(args.len());
        for arg in args {
            arg_values.push(self.eval_expr(module, arg)?);
        }
        match &callee_value {
            Object::Builtin(builtin) => {
                match builtin
                    .call(&arg_values)
                    .map_err(|kind| ShibaError::new(kind, location.clone()))?
                {
                    BuiltinEffect::Print(line) => {
                        self.output.push(line);
                        Ok(Object::Nil)
                    }
                    BuiltinEffect::Value(value) => Ok(value),
                }
            }
            Object::HostFunction(function) => (function.func)(&arg_values)
                .map_err(|message| ShibaError::new(ErrorKind::Host(message), location.clone())),
            Object::Function(function) => self.call_function(function, None, arg_values, location),
            Object::Method(method) => {
                self.call_function(&method.function, Some(&method.receiver), arg_values, location)
            }
            _ => Err(ShibaError::new(
                ErrorKind::TypeMismatch {
                    expected: "callable".to_string(),
                    actual: callee_value.kind_name().to_string(),
                },
                callee.location().clone(),
            )),
        }
    }

    /// Calls a function or method: the frame goes on the defining module's
    /// scope, receiver fields bind before parameters.
    fn call_function(
        &mut self,
        function: &Rc<FunctionObject>,
        receiver: Option<&Rc<RefCell<StructInstance>>>,
        args: Vec<Object>,
        location: &Location,
    ) -> Result<Object> {
        if args.len() != function.params.len() {
            return Err(ShibaError::new(
                ErrorKind::TypeMismatch {
                    expected: format!("{} arguments", function.params.len()),
                    actual: format!("{} arguments", args.len()),
                },
                location.clone(),
            ));
        }
        let target = self.env.get(&function.module).ok_or_else(|| {
            ShibaError::new(
                ErrorKind::Internal(format!("defining module '{}' not loaded", function.module)),
                location.clone(),
            )
        })?;

        target.borrow_mut().scope.push_frame();
        if let Some(receiver) = receiver {
            let fields: Vec<(String, Object)> = {
                let instance = receiver.borrow();
                instance
                    .def
                    .fields
                    .iter()
                    .map(|name| {
                        let value = instance.fields.get(name).cloned().unwrap_or(Object::Nil);
                        (name.clone(), value)
                    })
                    .collect()
            };
            let mut target_module = target.borrow_mut();
            for (name, value) in fields {
                target_module.scope.define(&name, value);
            }
        }
        {
            let mut target_module = target.borrow_mut();
            for (param, arg) in function.params.iter().zip(args) {
                target_module.scope.define(param, arg);
            }
        }

        let result = self.eval_body(&target, &function.body);
        target.borrow_mut().scope.pop_frame();

        match result? {
            ProcessResult::Return(value) => Ok(value.unwrap_or(Object::Nil)),
            ProcessResult::Break => Err(ShibaError::new(
                ErrorKind::ControlFlow { keyword: "break" },
                location.clone(),
            )),
            ProcessResult::Continue => Err(ShibaError::new(
                ErrorKind::ControlFlow {
                    keyword: "continue",
                },
                location.clone(),
            )),
            _ => Ok(Object::Nil),
        }
    }

    fn eval_assign(
        &mut self,
        module: &ModuleRef,
        op: AssignOp,
        targets: &[Node],
        values: &[Node],
    ) -> Result<()> {
        match op {
            AssignOp::Assign => {
                for (target, value_expr) in targets.iter().zip(values) {
                    let value = self.eval_expr(module, value_expr)?;
                    self.assign_value(module, target, value, op)?;
                }
                Ok(())
            }
            AssignOp::Unpack => {
                let value = self.eval_expr(module, &values[0])?;
                // A single target takes the whole value; unpacking proper
                // starts at two targets.
                if targets.len() == 1 {
                    return self.assign_value(module, &targets[0], value, AssignOp::Assign);
                }
                let Some(sequence) = Sequence::of(&value) else {
                    return Err(ShibaError::new(
                        ErrorKind::TypeMismatch {
                            expected: "iterable".to_string(),
                            actual: value.kind_name().to_string(),
                        },
                        values[0].location().clone(),
                    ));
                };
                if sequence.len() != targets.len() {
                    return Err(ShibaError::new(
                        ErrorKind::TypeMismatch {
                            expected: format!("{} elements", targets.len()),
                            actual: format!("{} elements", sequence.len()),
                        },
                        values[0].location().clone(),
                    ));
                }
                for (index, target) in targets.iter().enumerate() {
                    let element = sequence.get(index).ok_or_else(|| {
                        ShibaError::new(
                            ErrorKind::Internal("unpack element vanished".to_string()),
                            target.location().clone(),
                        )
                    })?;
                    self.assign_value(module, target, element, AssignOp::Assign)?;
                }
                Ok(())
            }
            _ => self.eval_compound_assign(module, op, &targets[0], &values[0]),
        }
    }

    fn eval_compound_assign(
        &mut self,
        module: &ModuleRef,
        op: AssignOp,
        target: &Node,
        value_expr: &Node,
    ) -> Result<()> {
        let rhs = self.eval_expr(module, value_expr)?;
        let current = match self.eval_expr(module, target) {
            Ok(value) => Some(value),
            // An undefined plain name takes the right-hand side unmodified.
            Err(error)
                if matches!(error.kind, ErrorKind::UndefinedIdent { .. })
                    && matches!(target.kind, NodeKind::Ident(_)) =>
            {
                None
            }
            Err(error) => return Err(error),
        };
        let value = match current {
            Some(current) => {
                let binary_op = op.binary_op().ok_or_else(|| {
                    ShibaError::new(
                        ErrorKind::Internal(format!("no binary op for '{op}'")),
                        target.location().clone(),
                    )
                })?;
                ops::binary(binary_op, &current, &rhs).map_err(|kind| {
                    let kind = match kind {
                        ErrorKind::InvalidBinaryOp { lhs, rhs, .. } => ErrorKind::InvalidAssignOp {
                            op: op.to_string(),
                            lhs,
                            rhs,
                        },
                        other => other,
                    };
                    ShibaError::new(kind, target.location().clone())
                })?
            }
            None => rhs,
        };
        self.assign_value(module, target, value, op)
    }

    /// Binds `value` at an assignment target. Dict misses insert; list
    /// writes require an existing index; strings and modules reject writes.
    fn assign_value(
        &mut self,
        module: &ModuleRef,
        target: &Node,
        value: Object,
        op: AssignOp,
    ) -> Result<()> {
        match &target.kind {
            NodeKind::Ident(name) => {
                module.borrow_mut().scope.set(name, value);
                Ok(())
            }
            NodeKind::Index {
                target: container_expr,
                index,
            } => {
                let container = self.eval_expr(module, container_expr)?;
                let key = self.eval_expr(module, index)?;
                match &container {
                    Object::Dict(dict) => {
                        dict.borrow_mut().set(&key, value);
                        Ok(())
                    }
                    Object::List(elements) => {
                        let position = self.expect_int(&key, index.location())?;
                        let length = elements.borrow().len();
                        if position < 0 || position as usize >= length {
                            return Err(ShibaError::new(
                                ErrorKind::InvalidIndex {
                                    index: position,
                                    length,
                                },
                                index.location().clone(),
                            ));
                        }
                        elements.borrow_mut()[position as usize] = value;
                        Ok(())
                    }
                    Object::Str(_) => Err(ShibaError::new(
                        ErrorKind::InvalidAssignOp {
                            op: op.to_string(),
                            lhs: "string",
                            rhs: value.kind_name(),
                        },
                        target.location().clone(),
                    )),
                    _ => Err(ShibaError::new(
                        ErrorKind::TypeMismatch {
                            expected: "list or dict".to_string(),
                            actual: container.kind_name().to_string(),
                        },
                        container_expr.location().clone(),
                    )),
                }
            }
            NodeKind::Selector {
                target: object_expr,
                name,
            } => {
                let object = self.eval_expr(module, object_expr)?;
                match &object {
                    Object::Struct(instance) => {
                        let known = instance.borrow().def.fields.iter().any(|field| field == name);
                        if !known {
                            return Err(ShibaError::new(
                                ErrorKind::UndefinedIdent { name: name.clone() },
                                target.location().clone(),
                            ));
                        }
                        instance.borrow_mut().fields.insert(name.clone(), value);
                        Ok(())
                    }
                    Object::Module(_) => Err(ShibaError::new(
                        ErrorKind::InvalidAssignOp {
                            op: op.to_string(),
                            lhs: "module",
                            rhs: value.kind_name(),
                        },
                        target.location().clone(),
                    )),
                    _ => Err(ShibaError::new(
                        ErrorKind::TypeMismatch {
                            expected: "struct".to_string(),
                            actual: object.kind_name().to_string(),
                        },
                        object_expr.location().clone(),
                    )),
                }
            }
            _ => Err(ShibaError::new(
                ErrorKind::TypeMismatch {
                    expected: "assignable target".to_string(),
                    actual: target.kind.name().to_string(),
                },
                target.location().clone(),
            )),
        }
    }

    fn expect_int(&self, value: &Object, location: &Location) -> Result<i64> {
        match value {
            Object::Int(value) => Ok(*value),
            _ => Err(ShibaError::new(
                ErrorKind::TypeMismatch {
                    expected: "int".to_string(),
                    actual: value.kind_name().to_string(),
                },
                location.clone(),
            )),
        }
    }
}
