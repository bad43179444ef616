pub mod ast;
pub mod java;

use crate::parsing::ast::CompilationUnit;
use thiserror::Error;

pub use java::JavaParser;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("syntax error at line {line}, column {column}: {message}")]
    Syntax {
        line: usize,
        column: usize,
        message: String,
    },
    #[error("failed to load grammar: {0}")]
    Language(String),
    #[error("parser produced no syntax tree")]
    NoTree,
}

/// Turns the text of one source unit into a syntax tree.
pub trait SourceParser {
    /// File extension (without the dot) of the units this parser accepts
    fn extension(&self) -> &'static str;

    fn parse(&mut self, source: &str) -> Result<CompilationUnit, ParseError>;
}
