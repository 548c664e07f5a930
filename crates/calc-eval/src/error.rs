//! Evaluator-level error taxonomy (spec §7). Type errors are a thin layer
//! over [`calc_value::RuntimeError`]: most failures the evaluator produces
//! are already one of the value model's closed error kinds; `TypeError`
//! covers the cases that are purely about operand *shape* (wrong `Value`
//! variant for an operator) rather than a runtime computation failing.

use std::fmt;

use calc_value::RuntimeError;

#[derive(Debug, Clone, PartialEq)]
pub enum TypeError {
    OperatorMismatch { operator: &'static str, left: &'static str, right: &'static str },
    UnaryMismatch { operator: &'static str, operand: &'static str },
    ConditionNotBoolean { found: &'static str },
    NotCallable { name: String },
}

impl fmt::Display for TypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeError::OperatorMismatch { operator, left, right } => {
                write!(f, "`{operator}` is not defined for {left} and {right}")
            }
            TypeError::UnaryMismatch { operator, operand } => write!(f, "`{operator}` is not defined for {operand}"),
            TypeError::ConditionNotBoolean { found } => write!(f, "condition must be boolean, found {found}"),
            TypeError::NotCallable { name } => write!(f, "`{name}` is not a function"),
        }
    }
}

impl std::error::Error for TypeError {}

#[derive(Debug, Clone, PartialEq)]
pub enum EvalError {
    Type(TypeError),
    Runtime(RuntimeError),
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvalError::Type(e) => write!(f, "{e}"),
            EvalError::Runtime(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for EvalError {}

impl From<TypeError> for EvalError {
    fn from(e: TypeError) -> Self {
        EvalError::Type(e)
    }
}

impl From<RuntimeError> for EvalError {
    fn from(e: RuntimeError) -> Self {
        EvalError::Runtime(e)
    }
}
