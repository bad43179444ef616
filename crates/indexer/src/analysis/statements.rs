use crate::parsing::ast::{Expression, Receiver, Statement};
use std::fmt;

pub const UNKNOWN_ACTION: &str = "Unknown action";

/// What a single top-level body statement does. Classification looks at the
/// statement itself only and never descends into nested blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementAction<'a> {
    /// `foo();` or `helper.foo();`
    Call { member: &'a str },
    /// `target = value;`
    Assignment { target: &'a str, value: &'a str },
    /// `Type name = ...;`, described by its first declarator
    LocalDeclaration {
        variable: &'a str,
        type_name: &'a str,
    },
    Unknown,
}

impl<'a> StatementAction<'a> {
    pub fn classify(statement: &'a Statement) -> Self {
        match statement {
            Statement::Expression { expression, .. } => match expression {
                Expression::MethodInvocation { receiver, member } => match receiver {
                    Receiver::None | Receiver::Name(_) => StatementAction::Call { member },
                    Receiver::Complex(_) => StatementAction::Unknown,
                },
                Expression::Assignment { target, value, .. } => {
                    StatementAction::Assignment { target, value }
                }
                Expression::Other { .. } => StatementAction::Unknown,
            },
            Statement::LocalVariable(declaration) => match declaration.declarators.first() {
                Some(variable) => StatementAction::LocalDeclaration {
                    variable,
                    type_name: &declaration.variable_type.name,
                },
                None => StatementAction::Unknown,
            },
            Statement::LocalType(_) | Statement::Other { .. } => StatementAction::Unknown,
        }
    }

    pub fn called_member(&self) -> Option<&'a str> {
        match *self {
            StatementAction::Call { member } => Some(member),
            _ => None,
        }
    }
}

impl fmt::Display for StatementAction<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatementAction::Call { member } => write!(f, "Calls method: {member}"),
            StatementAction::Assignment { target, value } => {
                write!(f, "Assigns value {value} to {target}")
            }
            StatementAction::LocalDeclaration {
                variable,
                type_name,
            } => write!(f, "Declares variable {variable} of type {type_name}"),
            StatementAction::Unknown => f.write_str(UNKNOWN_ACTION),
        }
    }
}
