//! Runtime value model and the mutable state it lives in: objects, the
//! ordered dictionary, scopes, modules, and the process-wide environment.

pub mod builtins;
pub mod dict;
pub mod environment;
pub mod module;
pub mod object;
pub mod scope;
pub mod sequence;
