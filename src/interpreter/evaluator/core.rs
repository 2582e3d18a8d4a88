use std::{
    collections::HashMap,
    io::{self, Write},
    rc::Rc,
};

use tracing::debug;

use crate::{
    ast::{Expr, Statement},
    error::{Error, RuntimeError},
    interpreter::{
        evaluator::{binary::eval_binary, function::Function,
                    scope::{Scope, ScopeRef}},
        lexer::tokenize,
        parser::core::parse,
        value::core::Value,
    },
    util::stack::ensure_sufficient_stack,
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// How a statement or block finished.
///
/// `Return` travels outward through enclosing blocks, loops and branches
/// until the function call that is executing them consumes it.
#[derive(Debug, Clone, PartialEq)]
pub enum Completion {
    /// Execution reached the end; continue with the next statement.
    Normal,
    /// A `return` statement ran.
    Return {
        /// The returned value, or `None` for a bare `return`.
        value: Option<Value>,
        /// Line of the `return` statement.
        line:  usize,
    },
}

/// Stores the runtime evaluation context.
///
/// This struct holds the interpreter state: the global scope, the table of
/// user-defined functions and the sink that `print` writes to.
///
/// ## Usage
///
/// `Context` is created once and reused for a whole program, or for every
/// line of a REPL session. Functions live in their own flat namespace,
/// separate from the variable scopes, so a function defined anywhere is
/// callable from everywhere once its definition has run.
pub struct Context<W: Write = io::Stdout> {
    globals:              ScopeRef,
    /// A mapping from function names to their definitions and closures.
    /// Redefining a name replaces the previous entry.
    pub(crate) functions: HashMap<String, Rc<Function>>,
    pub(crate) out:       W,
}

impl Context<io::Stdout> {
    /// Creates a new evaluation context that prints to standard output.
    #[must_use]
    pub fn new() -> Self {
        Self::with_output(io::stdout())
    }
}

impl Default for Context<io::Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> Context<W> {
    /// Creates a new evaluation context with an empty global scope and no
    /// user-defined functions, printing to `out`.
    ///
    /// # Example
    /// ```
    /// use pyrust::interpreter::evaluator::core::Context;
    ///
    /// let mut ctx = Context::with_output(Vec::new());
    /// ctx.run("print(1 + 2)").unwrap();
    ///
    /// assert_eq!(ctx.output(), b"3\n");
    /// ```
    pub fn with_output(out: W) -> Self {
        Self { globals: Scope::root(),
               functions: HashMap::new(),
               out }
    }

    /// Returns the output sink.
    #[must_use]
    pub const fn output(&self) -> &W {
        &self.out
    }

    /// Consumes the context and returns its output sink.
    pub fn into_output(self) -> W {
        self.out
    }

    /// Returns the program-lifetime global scope.
    #[must_use]
    pub const fn globals(&self) -> &ScopeRef {
        &self.globals
    }

    /// Scans, parses and executes `source` as one program.
    ///
    /// # Errors
    /// Returns the first scan, parse or runtime error. Output printed before
    /// a runtime error has already been written to the sink.
    pub fn run(&mut self, source: &str) -> Result<(), Error> {
        let tokens = tokenize(source)?;
        let program = parse(&tokens)?;
        self.execute(&program)?;
        Ok(())
    }

    /// Evaluates one interactive line against the persistent state.
    ///
    /// Statements run in order in the global scope. The values produced by
    /// bare function-call statements are collected and returned so the
    /// caller can echo them; every other statement kind is silent.
    ///
    /// # Errors
    /// Returns the first scan, parse or runtime error. Statements before the
    /// failing one keep their effects.
    ///
    /// # Example
    /// ```
    /// use pyrust::interpreter::{evaluator::core::Context, value::core::Value};
    ///
    /// let mut ctx = Context::with_output(Vec::new());
    /// ctx.eval_line("fn two() -> i32 { return 2 }").unwrap();
    ///
    /// assert_eq!(ctx.eval_line("two()").unwrap(), vec![Value::Integer(2)]);
    /// ```
    pub fn eval_line(&mut self, source: &str) -> Result<Vec<Value>, Error> {
        let tokens = tokenize(source)?;
        let program = parse(&tokens)?;
        let globals = Rc::clone(&self.globals);

        let mut echoed = Vec::new();
        for statement in &program {
            if let Statement::Expression { expr, .. } = statement {
                echoed.extend(self.eval(expr, &globals)?);
                continue;
            }
            Self::reject_return(self.execute_statement(statement, &globals)?)?;
        }

        Ok(echoed)
    }

    /// Executes a whole program in the global scope.
    ///
    /// # Errors
    /// Returns the first runtime error. A `return` reached outside of any
    /// function body is reported as `ReturnOutsideFunction`.
    pub fn execute(&mut self, statements: &[Statement]) -> EvalResult<()> {
        let globals = Rc::clone(&self.globals);
        let completion = self.execute_block(statements, &globals)?;
        Self::reject_return(completion)
    }

    fn reject_return(completion: Completion) -> EvalResult<()> {
        match completion {
            Completion::Normal => Ok(()),
            Completion::Return { line, .. } => {
                debug!(line, "return outside of function");
                Err(RuntimeError::ReturnOutsideFunction { line })
            },
        }
    }

    /// Executes `statements` in order in `scope`.
    ///
    /// Stops at the first statement that completes with `Return` and hands
    /// that completion to the caller.
    pub fn execute_block(&mut self,
                         statements: &[Statement],
                         scope: &ScopeRef)
                         -> EvalResult<Completion> {
        for statement in statements {
            let completion = self.execute_statement(statement, scope)?;
            if matches!(completion, Completion::Return { .. }) {
                return Ok(completion);
            }
        }
        Ok(Completion::Normal)
    }

    /// Evaluates an expression and returns the resulting value.
    ///
    /// This is the main entry point for expression evaluation.
    /// Operands are evaluated left to right; no operator short-circuits.
    ///
    /// # Parameters
    /// - `expr`: Expression to evaluate.
    /// - `scope`: Scope that variable references resolve in.
    ///
    /// # Returns
    /// `Some(Value)` for expressions that produce a value, or `None` for a
    /// call to a function that finished without returning one.
    pub fn eval(&mut self, expr: &Expr, scope: &ScopeRef) -> EvalResult<Option<Value>> {
        match expr {
            Expr::Literal { value, .. } => Ok(Some(Value::from(value))),
            Expr::Variable { name, line } => {
                let value = scope.borrow().lookup(name);
                value.map(Some)
                     .ok_or_else(|| RuntimeError::UnknownVariable { name: name.clone(),
                                                                    line: *line, })
            },
            Expr::BinaryOp { left,
                             op,
                             right,
                             line, } => ensure_sufficient_stack(|| {
                let left = self.eval_child(left, scope)?;
                let right = self.eval_child(right, scope)?;
                eval_binary(*op, &left, &right, *line).map(Some)
            }),
            Expr::FunctionCall { name,
                                 arguments,
                                 line, } => self.call_function(name, arguments, *line, scope),
        }
    }

    /// Evaluates a subexpression and ensures that it produces a value.
    ///
    /// Operands, arguments, initializers, conditions and `print` all need an
    /// actual value; a call that returned nothing is reported as
    /// `MissingValue` on the expression's line.
    pub fn eval_child(&mut self, expr: &Expr, scope: &ScopeRef) -> EvalResult<Value> {
        self.eval(expr, scope)?
            .ok_or(RuntimeError::MissingValue { line: expr.line_number() })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn run(source: &str) -> Result<String, Error> {
        let mut ctx = Context::with_output(Vec::new());
        ctx.run(source)?;
        Ok(String::from_utf8(ctx.into_output()).unwrap())
    }

    #[test]
    fn variables_resolve_through_globals() {
        assert_eq!(run("let x = 4\nlet y = x * 2\nprint(y)").unwrap(), "8\n");
    }

    #[test]
    fn undefined_variable() {
        assert!(matches!(run("print(1)\nprint(nope)"),
                         Err(Error::Runtime(RuntimeError::UnknownVariable { line: 2, .. }))));
    }

    #[test]
    fn top_level_return_is_rejected() {
        let mut ctx = Context::with_output(Vec::new());
        let result = ctx.run("print(1)\nreturn 5\nprint(2)");

        assert!(matches!(result,
                         Err(Error::Runtime(RuntimeError::ReturnOutsideFunction { line: 2 }))));
        assert_eq!(ctx.output(), b"1\n");
    }

    #[test]
    fn return_inside_top_level_loop_is_rejected() {
        assert!(matches!(run("while true {\n return\n}"),
                         Err(Error::Runtime(RuntimeError::ReturnOutsideFunction { line: 2 }))));
    }

    #[test]
    fn absent_value_where_value_required() {
        let source = "fn nothing() {\n print(0)\n}\nlet x = nothing()";

        assert!(matches!(run(source),
                         Err(Error::Runtime(RuntimeError::MissingValue { line: 4 }))));
        assert!(matches!(run("fn f() { return }\nprint(f() + 1)"),
                         Err(Error::Runtime(RuntimeError::MissingValue { line: 2 }))));
    }

    #[test]
    fn long_operator_chain_evaluates() {
        let source = format!("print({})", vec!["1"; 5000].join(" + "));

        assert_eq!(run(&source).unwrap(), "5000\n");
    }

    #[test]
    fn deeply_nested_parentheses_evaluate() {
        let source = format!("print({}2 * 3{})", "(".repeat(3000), ")".repeat(3000));

        assert_eq!(run(&source).unwrap(), "6\n");
    }

    #[test]
    fn eval_line_echoes_call_results_only() {
        let mut ctx = Context::with_output(Vec::new());

        assert_eq!(ctx.eval_line("fn sq(n: i32) -> i32 { return n * n }").unwrap(),
                   Vec::new());
        assert_eq!(ctx.eval_line("let a = sq(3)").unwrap(), Vec::new());
        assert_eq!(ctx.eval_line("sq(a)").unwrap(), vec![Value::Integer(81)]);
        assert_eq!(ctx.eval_line("print(a)").unwrap(), Vec::new());
        assert_eq!(ctx.output(), b"9\n");
    }

    #[test]
    fn eval_line_keeps_state_after_error() {
        let mut ctx = Context::with_output(Vec::new());
        ctx.eval_line("let mut n = 1").unwrap();

        assert!(ctx.eval_line("n = n / 0").is_err());
        assert!(ctx.eval_line("print(").is_err());
        ctx.eval_line("n = n + 1").unwrap();

        assert_eq!(ctx.globals().borrow().lookup("n"), Some(Value::Integer(2)));
    }
}
