//! The tlox pipeline: scan, parse, check and interpret source code.

pub mod builtin_functions;
pub mod logging;

use std::io::Write;
use thiserror::Error;
use tlox_interp::{Interpreter, RuntimeError};
use tlox_parser::parser::Parser;
use tlox_parser::printer::AstPrinter;
use tlox_passes::return_check::ReturnCheck;
use tlox_source::{Source, SyntaxError};

/// Exit status for a command line usage error.
pub const EXIT_USAGE: i32 = 64;
/// Exit status after lexical, syntax or static errors.
pub const EXIT_DATA_ERR: i32 = 65;
/// Exit status when the script cannot be read.
pub const EXIT_NO_INPUT: i32 = 66;
/// Exit status after a runtime error.
pub const EXIT_SOFTWARE: i32 = 70;
/// Exit status when reading interactive input fails.
pub const EXIT_IO_ERR: i32 = 74;

/// Why a run of the pipeline failed.
#[derive(Debug, Error)]
pub enum RunError {
    /// Compile time errors. Nothing was evaluated.
    #[error("{}", render_syntax_errors(.0))]
    Syntax(Vec<SyntaxError>),
    /// Evaluation stopped at a runtime error.
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

impl RunError {
    /// The process exit status for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            RunError::Syntax(_) => EXIT_DATA_ERR,
            RunError::Runtime(_) => EXIT_SOFTWARE,
        }
    }
}

fn render_syntax_errors(errors: &[SyntaxError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Creates an interpreter writing to `out` with the builtin functions defined.
pub fn new_interpreter<W: Write>(out: W) -> Interpreter<W> {
    let mut interpreter = Interpreter::new(out);
    builtin_functions::add_builtin_fns(&mut interpreter);
    interpreter
}

/// Runs `content` in `interpreter`. Globals defined by earlier runs stay visible.
/// If any error is found before evaluation, nothing is evaluated.
pub fn run<W: Write>(content: &str, interpreter: &mut Interpreter<W>) -> Result<(), RunError> {
    let source = Source::new(content);
    let ast = Parser::new(&source).parse_program();

    // checking a partial tree only produces follow-up errors
    if source.has_no_errors() {
        ReturnCheck::new(&source).check_program(&ast);
    }
    if !source.has_no_errors() {
        return Err(RunError::Syntax(source.errors.errors()));
    }

    tracing::trace!(ast = %AstPrinter::print_program(&ast), "parsed program");
    interpreter.interpret(&ast)?;
    Ok(())
}

/// Runs `content` in a fresh interpreter and returns everything it printed.
pub fn interpret(content: &str) -> Result<String, RunError> {
    let mut interpreter = new_interpreter(Vec::new());
    run(content, &mut interpreter)?;
    Ok(String::from_utf8_lossy(interpreter.output()).into_owned())
}
