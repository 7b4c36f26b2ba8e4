use crate::ast::{Program, Stmt};
use log::debug;

/// Walks a program in order, collecting one output line per statement.
#[derive(Debug, Default)]
pub struct Evaluator {
    lines: Vec<String>,
}

impl Evaluator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn evaluate_program(mut self, program: &Program) -> String {
        for statement in &program.statements {
            self.execute_statement(statement);
        }

        debug!("Produced {} output lines", self.lines.len());
        self.lines.join("\n")
    }

    fn execute_statement(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Display { value, .. } => self.lines.push(value.clone()),
        }
    }
}

pub fn evaluate(program: &Program) -> String {
    Evaluator::new().evaluate_program(program)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Span;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn display(value: &str) -> Stmt {
        Stmt::Display {
            value: value.to_string(),
            span: Span::new(0, 0),
        }
    }

    #[rstest]
    #[case(vec![], "")]
    #[case(vec!["a"], "a")]
    #[case(vec!["a", "b", "c"], "a\nb\nc")]
    #[case(vec!["", ""], "\n")]
    #[case(vec!["x\n"], "x\n")]
    fn joins_lines_without_trailing_newline(#[case] values: Vec<&str>, #[case] expected: &str) {
        let program = Program {
            statements: values.into_iter().map(display).collect(),
        };
        assert_eq!(evaluate(&program), expected);
    }
}
