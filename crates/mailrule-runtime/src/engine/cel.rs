//! CEL engine backed by `cel-interpreter`

use super::references::free_references;
use super::{Bindings, ExpressionEngine};
use crate::error::{Result, RuntimeError};
use cel_interpreter::objects::{Key, Map};
use cel_interpreter::{Context, ExecutionError, Program, Value as CelValue};
use mailrule_core::{Environment, Value};
use std::any::Any;
use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

/// Functions registered by `cel_interpreter::Context::default()`
const STANDARD_FUNCTIONS: &[&str] = &[
    "contains", "size", "has", "map", "filter", "all", "max", "min", "startsWith", "endsWith",
    "string", "bytes", "double", "exists", "exists_one", "int", "uint", "matches", "duration",
    "timestamp", "getFullYear", "getMonth", "getDayOfYear", "getDayOfMonth", "getDate",
    "getDayOfWeek", "getHours", "getMinutes", "getSeconds", "getMilliseconds",
];

/// Common Expression Language engine
#[derive(Debug, Clone, Copy, Default)]
pub struct CelEngine;

impl CelEngine {
    pub fn new() -> Self {
        Self
    }
}

/// A parsed CEL expression together with the environment it was checked against
#[derive(Debug)]
pub struct CelProgram {
    program: Program,
    environment: Environment,
}

impl CelProgram {
    pub fn environment(&self) -> &Environment {
        &self.environment
    }
}

impl ExpressionEngine for CelEngine {
    type Program = CelProgram;

    fn name(&self) -> &'static str {
        "cel"
    }

    fn compile(&self, expression: &str, env: &Environment) -> Result<CelProgram> {
        let program =
            Program::compile(expression).map_err(|e| RuntimeError::Compile(e.to_string()))?;

        let syntax =
            cel_parser::parse(expression).map_err(|e| RuntimeError::Compile(e.to_string()))?;
        let references = free_references(&syntax).map_err(RuntimeError::Compile)?;

        if let Some(name) = references.variables.iter().find(|v| !env.is_declared(v)) {
            return Err(RuntimeError::UndeclaredReference(name.to_string()));
        }
        if let Some(name) = references
            .functions
            .iter()
            .find(|f| !STANDARD_FUNCTIONS.iter().any(|known| known == *f))
        {
            return Err(RuntimeError::UndeclaredReference(name.to_string()));
        }

        tracing::trace!(expression = %expression, "compiled cel expression");

        Ok(CelProgram {
            program,
            environment: env.clone(),
        })
    }

    fn evaluate(&self, program: &CelProgram, bindings: &Bindings) -> Result<Value> {
        let mut context = Context::default();

        for decl in program.environment.variables() {
            let value = bindings.get(&decl.name).ok_or_else(|| {
                RuntimeError::Binding(format!("variable '{}' is not bound", decl.name))
            })?;
            if !decl.var_type.accepts(value) {
                return Err(RuntimeError::Binding(format!(
                    "variable '{}' expects {}, got {}",
                    decl.name,
                    decl.var_type,
                    value.type_name()
                )));
            }
            let value = to_cel(value).map_err(|found| {
                RuntimeError::Binding(format!(
                    "variable '{}' holds an {found} value, which cannot be bound",
                    decl.name
                ))
            })?;
            context.add_variable_from_value(&decl.name, value);
        }

        // The interpreter's integer arithmetic panics on division by zero and
        // on overflow; neither may escape as a panic.
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| program.program.execute(&context)));
        match outcome {
            Ok(Ok(value)) => Ok(from_cel(&value)),
            Ok(Err(ExecutionError::UndeclaredReference(name))) => {
                Err(RuntimeError::UndeclaredReference(name.to_string()))
            }
            Ok(Err(e)) => Err(RuntimeError::Execution(e.to_string())),
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                tracing::debug!(message = %message, "cel execution panicked");
                Err(RuntimeError::Execution(message))
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "expression execution aborted".to_string()
    }
}

/// Convert a `Value` into a CEL value
///
/// Fails with the type name of the first value that has no CEL counterpart.
fn to_cel(value: &Value) -> std::result::Result<CelValue, &'static str> {
    Ok(match value {
        Value::Null => CelValue::Null,
        Value::Bool(b) => CelValue::Bool(*b),
        Value::Int(i) => CelValue::Int(*i),
        Value::UInt(u) => CelValue::UInt(*u),
        Value::Float(f) => CelValue::Float(*f),
        Value::String(s) => CelValue::String(Arc::new(s.clone())),
        Value::Bytes(b) => CelValue::Bytes(Arc::new(b.clone())),
        Value::Array(items) => CelValue::List(Arc::new(
            items.iter().map(to_cel).collect::<std::result::Result<_, _>>()?,
        )),
        Value::Object(map) => {
            let fields = map
                .iter()
                .map(|(k, v)| Ok((Arc::new(k.clone()), to_cel(v)?)))
                .collect::<std::result::Result<HashMap<Arc<String>, CelValue>, &'static str>>()?;
            CelValue::Map(Map::from(fields))
        }
        Value::Opaque(_) => return Err(value.type_name()),
    })
}

/// Convert a CEL result back into a `Value`
fn from_cel(value: &CelValue) -> Value {
    match value {
        CelValue::Null => Value::Null,
        CelValue::Bool(b) => Value::Bool(*b),
        CelValue::Int(i) => Value::Int(*i),
        CelValue::UInt(u) => Value::UInt(*u),
        CelValue::Float(f) => Value::Float(*f),
        CelValue::String(s) => Value::String(s.to_string()),
        CelValue::Bytes(b) => Value::Bytes(b.to_vec()),
        CelValue::List(items) => Value::Array(items.iter().map(from_cel).collect()),
        CelValue::Map(map) => Value::Object(
            map.map
                .iter()
                .map(|(k, v)| (key_to_string(k), from_cel(v)))
                .collect(),
        ),
        other => Value::Opaque(format!("{other:?}")),
    }
}

fn key_to_string(key: &Key) -> String {
    match key {
        Key::String(s) => s.to_string(),
        Key::Int(i) => i.to_string(),
        Key::Uint(u) => u.to_string(),
        Key::Bool(b) => b.to_string(),
    }
}
