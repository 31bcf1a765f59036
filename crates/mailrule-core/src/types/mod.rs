//! Type system for mailrule
//!
//! This module contains:
//! - The email record model
//! - Dynamic values
//! - Environment declarations

pub mod email;
pub mod environment;
pub mod value;

pub use email::{Attachment, Email};
pub use environment::{Environment, EnvironmentBuilder, VarType, VariableDecl};
pub use value::Value;
