//! Shiba: a small, dynamically typed scripting language.
//!
//! The pipeline is a lazy tokenizer ([`lexer`]), a recursive-descent parser
//! with backtracking ([`parser`]), and a tree-walking evaluator
//! ([`interpreter`]) over the runtime value model in [`runtime`]. Programs
//! are `.sb` files; the binary also offers a REPL.
//!
//! ```
//! use shiba::interpreter::Interpreter;
//!
//! let mut interpreter = Interpreter::new();
//! interpreter.run_source("print(2 + 3)\n").unwrap();
//! assert_eq!(interpreter.take_output(), ["5"]);
//! ```

pub mod ast;
pub mod error;
pub mod interpreter;
pub mod lexer;
pub mod parser;
pub mod runtime;
pub mod token;
