use core::fmt;

use crate::Vec;
use crate::code::{Instructions, write_listing};
use crate::object::Object;

/// Finished compiler output, handed to the virtual machine by value.
#[derive(Clone, PartialEq, Eq)]
pub struct Bytecode {
    instructions: Instructions,
    constants: Vec<Object>,
}

impl Bytecode {
    pub(crate) fn new(instructions: Instructions, constants: Vec<Object>) -> Self {
        Self {
            instructions,
            constants,
        }
    }

    pub fn instructions(&self) -> &Instructions {
        &self.instructions
    }

    pub fn constants(&self) -> &[Object] {
        &self.constants
    }

    pub fn into_parts(self) -> (Instructions, Vec<Object>) {
        (self.instructions, self.constants)
    }
}

impl fmt::Debug for Bytecode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Bytecode {{")?;

        if !self.constants.is_empty() {
            writeln!(f, "  constants: [")?;
            for (i, constant) in self.constants.iter().enumerate() {
                writeln!(f, "    [{}] = {}", i, constant)?;
            }
            writeln!(f, "  ]")?;
        } else {
            writeln!(f, "  constants: []")?;
        }

        writeln!(f, "  instructions:")?;
        write_listing(f, &self.instructions, "    ")?;

        write!(f, "}}")
    }
}
