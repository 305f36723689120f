use std::io::{self, BufRead, Write};
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use shiba::ast::NodeKind;
use shiba::error::{ErrorKind, ShibaError};
use shiba::interpreter::{Interpreter, ProcessResult};
use shiba::lexer::Tokenizer;
use shiba::parser::Parser;
use shiba::runtime::module::ModuleRef;
use shiba::runtime::object::Object;

const PROMPT: &str = "shiba>>> ";
const CONTINUATION_PROMPT: &str = "shiba... ";

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.as_slice() {
        [] => repl(),
        [path] => run_file(path),
        _ => {
            eprintln!("usage: shiba [file.sb]");
            ExitCode::FAILURE
        }
    }
}

fn run_file(path: &str) -> ExitCode {
    let mut interpreter = Interpreter::new();
    let result = interpreter.run_file(Path::new(path));
    for line in interpreter.take_output() {
        println!("{line}");
    }
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{error:#}");
            ExitCode::FAILURE
        }
    }
}

fn repl() -> ExitCode {
    let mut interpreter = Interpreter::new();
    let module = interpreter.module_from_source("repl", "", Path::new(""), "");
    let stdin = io::stdin();
    let mut buffer = String::new();

    prompt(PROMPT);
    for line in stdin.lock().lines() {
        let Ok(line) = line else { break };
        // Newlines are normalized to spaces; statements are self-delimiting.
        buffer.push_str(&line);
        buffer.push(' ');
        match feed(&mut interpreter, &module, &buffer) {
            BufferState::Complete => {
                buffer.clear();
                prompt(PROMPT);
            }
            BufferState::Incomplete => prompt(CONTINUATION_PROMPT),
        }
    }
    ExitCode::SUCCESS
}

enum BufferState {
    Complete,
    Incomplete,
}

/// Parses the whole buffer, then evaluates it. A parse failure caused by
/// running out of input keeps the buffer for the next line; any other error
/// is reported and the buffer is discarded.
fn feed(interpreter: &mut Interpreter, module: &ModuleRef, buffer: &str) -> BufferState {
    let mut parser = Parser::new(Tokenizer::new(Arc::from("repl"), buffer));
    let mut nodes = Vec::new();
    loop {
        match parser.parse_statement() {
            Ok(node) if node.kind == NodeKind::Eof => break,
            Ok(node) => nodes.push(node),
            Err(error) if error.is_unexpected_eof() => return BufferState::Incomplete,
            Err(error) => {
                eprintln!("{error}");
                return BufferState::Complete;
            }
        }
    }

    for node in &nodes {
        let result = interpreter.eval_statement(module, node);
        for line in interpreter.take_output() {
            println!("{line}");
        }
        match result {
            Ok(ProcessResult::Obj(value)) => {
                if !matches!(value, Object::Nil) {
                    println!("{}", value.to_output());
                }
            }
            Ok(ProcessResult::Break) => {
                report_control(node, "break");
                break;
            }
            Ok(ProcessResult::Continue) => {
                report_control(node, "continue");
                break;
            }
            Ok(_) => {}
            Err(error) => {
                eprintln!("{error}");
                break;
            }
        }
    }
    BufferState::Complete
}

fn report_control(node: &shiba::ast::Node, keyword: &'static str) {
    let error = ShibaError::new(ErrorKind::ControlFlow { keyword }, node.location().clone());
    eprintln!("{error}");
}

fn prompt(text: &str) {
    print!("{text}");
    let _ = io::stdout().flush();
}
