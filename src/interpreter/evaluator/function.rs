use std::{io::Write, rc::Rc};

use tracing::debug;

use crate::{
    ast::{Expr, FunctionDef},
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{Completion, Context, EvalResult},
            scope::{Scope, ScopeRef},
        },
        value::core::Value,
    },
    util::stack::ensure_sufficient_stack,
};

/// A user-defined function as stored in the function table.
///
/// Pairs the shared definition with the scope that was current when the
/// definition executed. Calls resolve free variables through that scope, not
/// through the caller's.
#[derive(Debug)]
pub struct Function {
    /// The parsed definition.
    pub def:     Rc<FunctionDef>,
    /// The captured defining scope.
    pub closure: ScopeRef,
}

impl<W: Write> Context<W> {
    /// Executes a user-defined function call.
    ///
    /// The function is retrieved from the function table by name and its
    /// parameter count must match the number of supplied arguments. The
    /// arguments are evaluated left to right in the caller's `scope`. A fresh
    /// scope whose parent is the function's closure receives one mutable
    /// binding per parameter, and the body runs in it.
    ///
    /// Parameter and return annotations are not checked.
    ///
    /// # Parameters
    /// - `name`: Function name.
    /// - `arguments`: Unevaluated argument expressions.
    /// - `line`: Line number for error reporting.
    /// - `scope`: The caller's scope.
    ///
    /// # Returns
    /// The value of the first `return` executed in the body, or `None` when
    /// the body finishes without one or returns without a value.
    ///
    /// # Errors
    /// - `UnknownFunction` if no function with this name has been defined.
    /// - `ArgumentCountMismatch` for the wrong number of arguments.
    /// - `AlreadyDefined` if two parameters share a name.
    /// - Any error raised while evaluating arguments or the body.
    pub(crate) fn call_function(&mut self,
                                name: &str,
                                arguments: &[Expr],
                                line: usize,
                                scope: &ScopeRef)
                                -> EvalResult<Option<Value>> {
        let function =
            self.functions
                .get(name)
                .cloned()
                .ok_or_else(|| RuntimeError::UnknownFunction { name: name.to_string(),
                                                               line })?;

        let params = &function.def.params;
        if arguments.len() != params.len() {
            return Err(RuntimeError::ArgumentCountMismatch { name: name.to_string(),
                                                             expected: params.len(),
                                                             found: arguments.len(),
                                                             line });
        }

        let values = arguments.iter()
                              .map(|argument| self.eval_child(argument, scope))
                              .collect::<EvalResult<Vec<_>>>()?;

        let frame = Scope::child(&function.closure);
        {
            let mut frame = frame.borrow_mut();
            for (param, value) in params.iter().zip(values) {
                frame.define(&param.name, value, true, line)?;
            }
        }

        debug!(function = name, arity = params.len(), line, "calling function");

        let completion =
            ensure_sufficient_stack(|| self.execute_block(&function.def.body, &frame))?;

        Ok(match completion {
            Completion::Return { value, .. } => value,
            Completion::Normal => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::{
        error::{Error, RuntimeError},
        interpreter::evaluator::core::Context,
    };

    fn run(source: &str) -> (Result<(), Error>, String) {
        let mut ctx = Context::with_output(Vec::new());
        let result = ctx.run(source);
        (result, String::from_utf8(ctx.into_output()).unwrap())
    }

    #[test]
    fn return_value_becomes_call_result() {
        let (result, out) = run("fn add(x: i32, y: i32) -> i32 {\n return x + y\n}\nprint(add(5, \
                                 3))");

        assert!(result.is_ok());
        assert_eq!(out, "8\n");
    }

    #[test]
    fn return_inside_loop_ends_the_body() {
        let source = "fn first_over(limit: i32) -> i32 {\n let mut n = 0\n while true {\n if n * \
                      n > limit {\n return n\n }\n n = n + 1\n }\n print(\"unreachable\")\n}\nprint(\
                      first_over(50))";
        let (result, out) = run(source);

        assert!(result.is_ok(), "{result:?}");
        assert_eq!(out, "8\n");
    }

    #[test]
    fn recursion() {
        let source = "fn fact(n: i32) -> i32 {\n if n <= 1 {\n return 1\n }\n return n * fact(n - \
                      1)\n}\nprint(fact(20))";
        let (result, out) = run(source);

        assert!(result.is_ok(), "{result:?}");
        assert_eq!(out, "2432902008176640000\n");
    }

    #[test]
    fn deep_recursion_does_not_overflow_the_stack() {
        let source = "fn depth(n: i32) -> i32 {\n if n == 0 {\n return 0\n }\n return 1 + \
                      depth(n - 1)\n}\nprint(depth(20000))";
        let (result, out) = run(source);

        assert!(result.is_ok(), "{result:?}");
        assert_eq!(out, "20000\n");
    }

    #[test]
    fn parameters_are_mutable_locals() {
        let source = "let n = 10\nfn bump(n: i32) -> i32 {\n n = n + 1\n return n\n}\nprint(bump(1))\n\
                      print(n)";
        let (result, out) = run(source);

        assert!(result.is_ok(), "{result:?}");
        assert_eq!(out, "2\n10\n");
    }

    #[test]
    fn closure_sees_defining_scope_not_caller() {
        let source = "fn outer() {\n let secret = 42\n fn reveal() -> i32 {\n return secret\n \
                      }\n}\nfn caller() {\n let secret = 0\n print(reveal())\n}\nouter()\ncaller()";
        let (result, out) = run(source);

        assert!(result.is_ok(), "{result:?}");
        assert_eq!(out, "42\n");
    }

    #[test]
    fn call_frames_do_not_leak_bindings() {
        let (result, _) = run("fn f() {\n let local = 1\n}\nf()\nprint(local)");

        assert!(matches!(result,
                         Err(Error::Runtime(RuntimeError::UnknownVariable { line: 5, .. }))));
    }

    #[test]
    fn function_body_can_update_globals() {
        let source = "let mut count = 0\nfn tick() {\n count = count + 1\n}\ntick()\ntick()\n\
                      print(count)";
        let (result, out) = run(source);

        assert!(result.is_ok(), "{result:?}");
        assert_eq!(out, "2\n");
    }

    #[test]
    fn redefinition_replaces_previous_function() {
        let source = "fn v() -> i32 { return 1 }\nfn v() -> i32 { return 2 }\nprint(v())";
        let (result, out) = run(source);

        assert!(result.is_ok(), "{result:?}");
        assert_eq!(out, "2\n");
    }

    #[test]
    fn unknown_function() {
        let (result, _) = run("print(missing(1))");

        assert!(matches!(result,
                         Err(Error::Runtime(RuntimeError::UnknownFunction { line: 1, .. }))));
    }

    #[test]
    fn argument_count_is_checked_before_arguments_run() {
        let (result, out) = run("fn one(a: i32) {\n print(a)\n}\none(1, undefined)");

        assert_eq!(out, "");
        assert!(matches!(result,
                         Err(Error::Runtime(RuntimeError::ArgumentCountMismatch { expected: 1,
                                                                                  found: 2,
                                                                                  .. }))));
    }

    #[test]
    fn function_and_variable_namespaces_are_separate() {
        let (result, out) = run("let f = 3\nfn f() -> i32 { return 4 }\nprint(f + f())");

        assert!(result.is_ok(), "{result:?}");
        assert_eq!(out, "7\n");
    }
}
