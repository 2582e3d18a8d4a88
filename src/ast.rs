use std::{fmt, rc::Rc};

/// Represents a literal value in the language.
///
/// `LiteralValue` covers all raw, constant values that can appear directly in
/// source code: numbers, strings and booleans.
/// Strings are reference counted so that evaluating a literal never copies the
/// text.
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    /// A 64-bit signed integer literal, such as `42`.
    Integer(i64),
    /// A 64-bit floating-point literal, such as `3.14` or `2.`.
    Float(f64),
    /// A string literal with escapes already resolved.
    Str(Rc<str>),
    /// A boolean literal value: `true` or `false`.
    Bool(bool),
}

impl From<i64> for LiteralValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for LiteralValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for LiteralValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for LiteralValue {
    fn from(value: &str) -> Self {
        Self::Str(value.into())
    }
}

/// One of the four built-in type names usable in annotations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeTag {
    /// `i32`: integer values.
    I32,
    /// `f64`: floating-point values; integers are accepted as well.
    F64,
    /// `str`: string values.
    Str,
    /// `bool`: boolean values.
    Bool,
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::I32 => "i32",
            Self::F64 => "f64",
            Self::Str => "str",
            Self::Bool => "bool",
        };
        write!(f, "{name}")
    }
}

/// An abstract syntax tree (AST) node representing an expression in the
/// language.
///
/// Expressions are the value-producing half of the node set: literals,
/// variable references, binary operations and function calls. Every variant
/// records the source line it started on for error reporting.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A literal value (number, string or boolean).
    Literal {
        /// The constant value.
        value: LiteralValue,
        /// Line number in the source code.
        line:  usize,
    },
    /// Reference to a variable by name.
    Variable {
        /// Name of the variable.
        name: String,
        /// Line number in the source code.
        line: usize,
    },
    /// A binary operation (arithmetic or comparison).
    BinaryOp {
        /// Left operand.
        left:  Box<Self>,
        /// The operator.
        op:    BinaryOperator,
        /// Right operand.
        right: Box<Self>,
        /// Line number of the operator.
        line:  usize,
    },
    /// Function call expression (e.g. `add(1, 2)`).
    FunctionCall {
        /// Name of the function being called.
        name:      String,
        /// Arguments to the function, in source order.
        arguments: Vec<Self>,
        /// Line number in the source code.
        line:      usize,
    },
}

impl Expr {
    /// Gets the line number from `self`.
    /// ## Example
    /// ```
    /// use pyrust::ast::Expr;
    ///
    /// let expr = Expr::Variable { name: "x".to_string(),
    ///                             line: 5, };
    ///
    /// assert_eq!(expr.line_number(), 5);
    /// ```
    #[must_use]
    pub const fn line_number(&self) -> usize {
        match self {
            Self::Literal { line, .. }
            | Self::Variable { line, .. }
            | Self::BinaryOp { line, .. }
            | Self::FunctionCall { line, .. } => *line,
        }
    }
}

/// Tears the tree down with an explicit work list, so dropping uses constant
/// native stack however deeply operator chains nest.
impl Drop for Expr {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        detach_children(self, &mut pending);
        while let Some(mut expr) = pending.pop() {
            detach_children(&mut expr, &mut pending);
        }
    }
}

/// Moves the direct children of `expr` into `pending`, leaving leaves behind.
fn detach_children(expr: &mut Expr, pending: &mut Vec<Expr>) {
    const fn leaf() -> Expr {
        Expr::Literal { value: LiteralValue::Bool(false),
                        line:  0, }
    }

    match expr {
        Expr::BinaryOp { left, right, .. } => {
            pending.push(std::mem::replace(&mut **left, leaf()));
            pending.push(std::mem::replace(&mut **right, leaf()));
        },
        Expr::FunctionCall { arguments, .. } => pending.append(arguments),
        Expr::Literal { .. } | Expr::Variable { .. } => {},
    }
}

/// A single `name: type` entry of a function's parameter list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    /// The parameter name, bound as a mutable local on each call.
    pub name:     String,
    /// The declared type. Recorded but not enforced at call time.
    pub type_tag: TypeTag,
}

/// Represents a user-defined function definition.
///
/// The definition is shared (`Rc`) between the statement that declares it and
/// the runtime function table, so executing the declaration never copies the
/// body.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDef {
    /// The name of the function.
    pub name:        String,
    /// The parameters, in declaration order.
    pub params:      Vec<Parameter>,
    /// The optional `-> type` annotation.
    pub return_type: Option<TypeTag>,
    /// The statements executed when the function is called.
    pub body:        Vec<Statement>,
    /// Line number in the source code.
    pub line:        usize,
}

/// Represents a statement.
///
/// A program, a function body and every `{ ... }` block are ordered sequences
/// of statements.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// `let [mut] name [: type] = value` or `name = value`.
    ///
    /// Whether this defines a new binding or updates an existing one is
    /// decided at runtime; see the evaluator.
    Assignment {
        /// The name of the variable.
        name:     String,
        /// The declared type, if any. A typed assignment always defines.
        type_tag: Option<TypeTag>,
        /// Whether a newly created binding may be reassigned later.
        mutable:  bool,
        /// The value which is being assigned.
        value:    Expr,
        /// Line number in the source code.
        line:     usize,
    },
    /// `if condition { ... } [else { ... }]`.
    If {
        /// The condition; must evaluate to a boolean.
        condition:   Expr,
        /// Statements run when the condition holds.
        then_branch: Vec<Self>,
        /// Statements run otherwise, if present.
        else_branch: Option<Vec<Self>>,
        /// Line number in the source code.
        line:        usize,
    },
    /// `while condition { ... }`.
    While {
        /// The condition, re-evaluated before every iteration.
        condition: Expr,
        /// The loop body.
        body:      Vec<Self>,
        /// Line number in the source code.
        line:      usize,
    },
    /// A user-defined function declaration.
    Function(Rc<FunctionDef>),
    /// `return [value]`.
    Return {
        /// The returned expression, if any.
        value: Option<Expr>,
        /// Line number in the source code.
        line:  usize,
    },
    /// `print(value)`.
    Print {
        /// The expression to print.
        value: Expr,
        /// Line number in the source code.
        line:  usize,
    },
    /// A bare function call evaluated for its effect.
    Expression {
        /// The expression to evaluate.
        expr: Expr,
        /// Line number in the source code.
        line: usize,
    },
}

impl Statement {
    /// Gets the line number from `self`.
    #[must_use]
    pub fn line_number(&self) -> usize {
        match self {
            Self::Function(def) => def.line,
            Self::Assignment { line, .. }
            | Self::If { line, .. }
            | Self::While { line, .. }
            | Self::Return { line, .. }
            | Self::Print { line, .. }
            | Self::Expression { line, .. } => *line,
        }
    }
}

/// Represents a binary operator.
///
/// Binary operators include arithmetic and comparisons. All of them are
/// left-associative and strict.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BinaryOperator {
    /// Addition or string concatenation (`+`)
    Add,
    /// Subtraction (`-`)
    Sub,
    /// Multiplication (`*`)
    Mul,
    /// True division (`/`)
    Div,
    /// Less than (`<`)
    Less,
    /// Greater than (`>`)
    Greater,
    /// Less than or equal (`<=`)
    LessEqual,
    /// Greater than or equal (`>=`)
    GreaterEqual,
    /// Equal to (`==`)
    Equal,
    /// Not equal to (`!=`)
    NotEqual,
}

impl BinaryOperator {
    /// Returns `true` for `==`, `!=`, `<`, `>`, `<=` and `>=`.
    #[must_use]
    pub const fn is_comparison(self) -> bool {
        matches!(self,
                 Self::Less
                 | Self::Greater
                 | Self::LessEqual
                 | Self::GreaterEqual
                 | Self::Equal
                 | Self::NotEqual)
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use BinaryOperator::{
            Add, Div, Equal, Greater, GreaterEqual, Less, LessEqual, Mul, NotEqual, Sub,
        };
        let operator = match self {
            Add => "+",
            Sub => "-",
            Mul => "*",
            Div => "/",
            Less => "<",
            Greater => ">",
            LessEqual => "<=",
            GreaterEqual => ">=",
            Equal => "==",
            NotEqual => "!=",
        };
        write!(f, "{operator}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dropping_a_very_deep_chain() {
        let mut expr = Expr::Literal { value: 1.into(),
                                       line:  1, };
        for _ in 0..200_000 {
            expr = Expr::BinaryOp { left:  Box::new(expr),
                                    op:    BinaryOperator::Add,
                                    right: Box::new(Expr::Variable { name: "x".to_string(),
                                                                     line: 1, }),
                                    line:  1, };
        }

        drop(expr);
    }
}
