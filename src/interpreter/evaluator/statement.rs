use std::{io::Write, rc::Rc};

use tracing::{debug, trace};

use crate::{
    ast::{Expr, Statement, TypeTag},
    error::RuntimeError,
    interpreter::evaluator::{
        core::{Completion, Context, EvalResult},
        function::Function,
        scope::ScopeRef,
    },
};

impl<W: Write> Context<W> {
    /// Executes a single statement in `scope`.
    ///
    /// Handles assignments, conditionals, loops, function definitions,
    /// `return`, `print` and bare call statements. Only `return` (directly,
    /// or from inside a nested `if`/`while`) completes with
    /// [`Completion::Return`].
    ///
    /// # Parameters
    /// - `statement`: Statement to execute.
    /// - `scope`: Scope in which names are resolved and defined.
    ///
    /// # Returns
    /// How the statement finished.
    pub fn execute_statement(&mut self,
                             statement: &Statement,
                             scope: &ScopeRef)
                             -> EvalResult<Completion> {
        trace!(line = statement.line_number(), "executing statement");

        match statement {
            Statement::Assignment { name,
                                    type_tag,
                                    mutable,
                                    value,
                                    line, } => {
                self.execute_assignment(name, *type_tag, *mutable, value, *line, scope)?;
                Ok(Completion::Normal)
            },
            Statement::If { condition,
                            then_branch,
                            else_branch,
                            line, } => {
                if self.eval_condition(condition, *line, scope)? {
                    self.execute_block(then_branch, scope)
                } else if let Some(else_branch) = else_branch {
                    self.execute_block(else_branch, scope)
                } else {
                    Ok(Completion::Normal)
                }
            },
            Statement::While { condition,
                               body,
                               line, } => {
                while self.eval_condition(condition, *line, scope)? {
                    let completion = self.execute_block(body, scope)?;
                    if matches!(completion, Completion::Return { .. }) {
                        return Ok(completion);
                    }
                }
                Ok(Completion::Normal)
            },
            Statement::Function(def) => {
                debug!(function = %def.name, arity = def.params.len(), "defining function");
                let function = Function { def:     Rc::clone(def),
                                          closure: Rc::clone(scope), };
                self.functions.insert(def.name.clone(), Rc::new(function));
                Ok(Completion::Normal)
            },
            Statement::Return { value, line } => {
                let value = match value {
                    Some(expr) => self.eval(expr, scope)?,
                    None => None,
                };
                Ok(Completion::Return { value,
                                        line: *line })
            },
            Statement::Print { value, line } => {
                let value = self.eval_child(value, scope)?;
                writeln!(self.out, "{value}").and_then(|()| self.out.flush())
                                             .map_err(|source| RuntimeError::Output { source,
                                                                                     line: *line })?;
                Ok(Completion::Normal)
            },
            Statement::Expression { expr, .. } => {
                self.eval(expr, scope)?;
                Ok(Completion::Normal)
            },
        }
    }

    /// Evaluates an `if`/`while` condition, which must be a boolean.
    fn eval_condition(&mut self,
                      condition: &Expr,
                      line: usize,
                      scope: &ScopeRef)
                      -> EvalResult<bool> {
        self.eval_child(condition, scope)?.as_bool(line)
    }

    /// Executes an assignment statement.
    ///
    /// The value is evaluated first. Then:
    /// - With a type tag, the value's kind is checked against the tag and a
    ///   new binding is always created in `scope`.
    /// - Without a tag, if the name resolves anywhere on the scope chain the
    ///   nearest binding is updated (subject to its mutability). Otherwise a
    ///   new binding is created in `scope` with the statement's `mut` flag.
    ///
    /// # Errors
    /// - `TypeMismatch` if the value does not fit the tag. No binding is
    ///   created in that case.
    /// - `AlreadyDefined` if a fresh definition collides in `scope`.
    /// - `ImmutableAssignment` if the resolved binding is immutable.
    fn execute_assignment(&mut self,
                          name: &str,
                          type_tag: Option<TypeTag>,
                          mutable: bool,
                          value: &Expr,
                          line: usize,
                          scope: &ScopeRef)
                          -> EvalResult<()> {
        let value = self.eval_child(value, scope)?;

        if let Some(tag) = type_tag {
            if !value.matches_tag(tag) {
                return Err(RuntimeError::TypeMismatch { expected: tag,
                                                        found: value.kind_name(),
                                                        line });
            }
            return scope.borrow_mut().define(name, value, mutable, line);
        }

        let resolved = scope.borrow().lookup(name).is_some();
        if resolved {
            scope.borrow_mut().assign(name, value, line)
        } else {
            scope.borrow_mut().define(name, value, mutable, line)
        }
    }
}
