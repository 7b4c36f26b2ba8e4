// JaxScript front end
//
// Tokenizes, parses and evaluates JaxScript, a tiny scripting language whose
// only statement is `display('text')`.

// Public modules
pub mod ast;
pub mod error;
pub mod evaluator;
pub mod lexer;
pub mod parser;
pub mod repl;
pub mod runner;

// Re-export commonly used items
pub use ast::{Program, Stmt};
pub use error::{JaxError, LexError, Span, SyntaxError};
pub use evaluator::{evaluate, Evaluator};
pub use lexer::{tokenize, Lexer, Token, TokenKind};
pub use parser::{parse, Parser};

// Re-export main functions
pub use repl::start as start_repl;
pub use runner::{execute, run};
