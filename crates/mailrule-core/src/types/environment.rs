//! Environment declarations
//!
//! An environment names the variables a predicate may reference and the type
//! each one is bound with. Engines compile against it; the evaluator binds
//! values for exactly these names.

use crate::error::{CoreError, Result};
use crate::types::Value;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Name of the single variable the email environment declares
pub const EMAIL_VARIABLE: &str = "email";

const RESERVED_WORDS: &[&str] = &[
    "true", "false", "null", "in", "as", "break", "const", "continue", "else", "for", "function",
    "if", "import", "let", "loop", "package", "namespace", "return", "var", "void", "while",
];

/// Declared type of a variable
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VarType {
    /// Any value
    Dyn,
    Bool,
    Int,
    String,
    /// Homogeneous list
    List(Box<VarType>),
    /// Map from key type to value type
    Map(Box<VarType>, Box<VarType>),
}

impl VarType {
    /// `map(string, dyn)`
    pub fn string_map() -> Self {
        VarType::Map(Box::new(VarType::String), Box::new(VarType::Dyn))
    }

    /// Whether a bound value conforms to this type
    pub fn accepts(&self, value: &Value) -> bool {
        match (self, value) {
            (VarType::Dyn, _) => true,
            (VarType::Bool, Value::Bool(_)) => true,
            (VarType::Int, Value::Int(_)) => true,
            (VarType::String, Value::String(_)) => true,
            (VarType::List(item), Value::Array(items)) => items.iter().all(|v| item.accepts(v)),
            // Object keys are always strings, so only a string or dyn key type can match.
            (VarType::Map(key, val), Value::Object(map)) => {
                matches!(**key, VarType::String | VarType::Dyn) && map.values().all(|v| val.accepts(v))
            }
            _ => false,
        }
    }
}

impl fmt::Display for VarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VarType::Dyn => write!(f, "dyn"),
            VarType::Bool => write!(f, "bool"),
            VarType::Int => write!(f, "int"),
            VarType::String => write!(f, "string"),
            VarType::List(item) => write!(f, "list({item})"),
            VarType::Map(key, val) => write!(f, "map({key}, {val})"),
        }
    }
}

/// A declared variable
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableDecl {
    pub name: String,
    pub var_type: VarType,
}

impl VariableDecl {
    pub fn new(name: impl Into<String>, var_type: VarType) -> Self {
        Self {
            name: name.into(),
            var_type,
        }
    }
}

/// Validated set of variable declarations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Environment {
    variables: Vec<VariableDecl>,
}

impl Environment {
    /// The environment rule predicates run in: `email` as `map(string, dyn)`
    pub fn email() -> Self {
        Self {
            variables: vec![VariableDecl::new(EMAIL_VARIABLE, VarType::string_map())],
        }
    }

    pub fn builder() -> EnvironmentBuilder {
        EnvironmentBuilder::default()
    }

    pub fn variables(&self) -> &[VariableDecl] {
        &self.variables
    }

    pub fn get(&self, name: &str) -> Option<&VariableDecl> {
        self.variables.iter().find(|v| v.name == name)
    }

    pub fn is_declared(&self, name: &str) -> bool {
        self.get(name).is_some()
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::email()
    }
}

/// Builder for `Environment`; validation happens in `build`
#[derive(Debug, Default)]
pub struct EnvironmentBuilder {
    variables: Vec<VariableDecl>,
}

impl EnvironmentBuilder {
    /// Declare a variable
    pub fn declare(mut self, name: impl Into<String>, var_type: VarType) -> Self {
        self.variables.push(VariableDecl::new(name, var_type));
        self
    }

    pub fn build(self) -> Result<Environment> {
        if self.variables.is_empty() {
            return Err(CoreError::Environment("no variables declared".to_string()));
        }

        let mut seen = HashSet::new();
        for decl in &self.variables {
            if !is_identifier(&decl.name) {
                return Err(CoreError::Environment(format!(
                    "'{}' is not a valid identifier",
                    decl.name
                )));
            }
            if RESERVED_WORDS.contains(&decl.name.as_str()) {
                return Err(CoreError::Environment(format!(
                    "'{}' is a reserved word",
                    decl.name
                )));
            }
            if !seen.insert(decl.name.as_str()) {
                return Err(CoreError::Environment(format!(
                    "variable '{}' declared more than once",
                    decl.name
                )));
            }
        }

        Ok(Environment {
            variables: self.variables,
        })
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
