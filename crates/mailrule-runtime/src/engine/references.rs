//! Scope-aware reference collection over the CEL syntax tree
//!
//! Comprehension macros bind a loop variable that is visible only inside
//! their predicate. Every other identifier is free and must be declared by the
//! environment, whether or not execution would ever reach it.

use cel_parser::{Expression, Member};

/// Macros that bind a loop variable for the duration of their predicate
const BINDING_MACROS: &[&str] = &["all", "exists", "exists_one", "map", "filter"];

/// Free variables and called functions, in order of first appearance
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct FreeReferences<'e> {
    pub variables: Vec<&'e str>,
    pub functions: Vec<&'e str>,
}

/// Collect the free references of `expr`
///
/// Fails when a binding macro is called without a loop variable and a
/// predicate, a shape the interpreter cannot execute.
pub(crate) fn free_references(expr: &Expression) -> Result<FreeReferences<'_>, String> {
    let mut walker = Walker::default();
    walker.visit(expr)?;
    Ok(walker.found)
}

#[derive(Default)]
struct Walker<'e> {
    scope: Vec<&'e str>,
    found: FreeReferences<'e>,
}

impl<'e> Walker<'e> {
    fn visit(&mut self, expr: &'e Expression) -> Result<(), String> {
        match expr {
            Expression::Arithmetic(left, _, right)
            | Expression::Relation(left, _, right)
            | Expression::Or(left, right)
            | Expression::And(left, right) => {
                self.visit(left)?;
                self.visit(right)
            }
            Expression::Ternary(cond, then, otherwise) => {
                self.visit(cond)?;
                self.visit(then)?;
                self.visit(otherwise)
            }
            Expression::Unary(_, operand) => self.visit(operand),
            Expression::Member(target, member) => {
                self.visit(target)?;
                match &**member {
                    Member::Attribute(_) => Ok(()),
                    Member::Index(index) => self.visit(index),
                    Member::Fields(fields) => fields.iter().try_for_each(|(_, v)| self.visit(v)),
                }
            }
            Expression::FunctionCall(name, target, args) => {
                self.visit_call(name, target.as_deref(), args)
            }
            Expression::List(items) => items.iter().try_for_each(|item| self.visit(item)),
            Expression::Map(entries) => entries.iter().try_for_each(|(key, value)| {
                self.visit(key)?;
                self.visit(value)
            }),
            Expression::Atom(_) => Ok(()),
            Expression::Ident(name) => {
                let name = name.as_str();
                if !self.scope.contains(&name) && !self.found.variables.contains(&name) {
                    self.found.variables.push(name);
                }
                Ok(())
            }
        }
    }

    fn visit_call(
        &mut self,
        name: &'e Expression,
        target: Option<&'e Expression>,
        args: &'e [Expression],
    ) -> Result<(), String> {
        let Expression::Ident(function) = name else {
            // Not a valid call; the interpreter rejects it at runtime
            self.visit(name)?;
            return self.visit_arguments(target, args);
        };
        let function = function.as_str();
        if !self.found.functions.contains(&function) {
            self.found.functions.push(function);
        }

        if !BINDING_MACROS.iter().any(|m| *m == function) {
            return self.visit_arguments(target, args);
        }

        // `range.all(x, p)` or `all(range, x, p)`
        let (range, rest) = match (target, args.split_first()) {
            (Some(range), _) => (range, args),
            (None, Some((range, rest))) => (range, rest),
            (None, None) => return Err(format!("{function}() expects a range")),
        };
        let [Expression::Ident(var), body] = rest else {
            return Err(format!(
                "{function}() expects a loop variable and a predicate"
            ));
        };

        self.visit(range)?;
        self.scope.push(var.as_str());
        let result = self.visit(body);
        self.scope.pop();
        result
    }

    fn visit_arguments(
        &mut self,
        target: Option<&'e Expression>,
        args: &'e [Expression],
    ) -> Result<(), String> {
        if let Some(target) = target {
            self.visit(target)?;
        }
        args.iter().try_for_each(|arg| self.visit(arg))
    }
}
