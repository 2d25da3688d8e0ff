//! Runtime values stored in the constant pool.
//!
//! The virtual machine owns the full object model; the compiler only needs to
//! box literal values into it without loss.

use core::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Object {
    Integer(i64),
}

impl From<i64> for Object {
    fn from(value: i64) -> Self {
        Object::Integer(value)
    }
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Object::Integer(value) => write!(f, "{}", value),
        }
    }
}
