//! Configuration options for compilation.

/// Largest table size addressable by a 2-byte operand.
pub const MAX_INDEXED_ENTRIES: usize = u16::MAX as usize + 1;

/// Configuration options for compilation.
///
/// These options control compile-time resource limits. Limits above
/// [`MAX_INDEXED_ENTRIES`] have no effect, since indices are encoded in two
/// bytes.
///
/// # Example
///
/// ```
/// use monkey_core::compiler::CompilationOptions;
///
/// let options = CompilationOptions {
///     max_constants: 1024,
///     ..CompilationOptions::default()
/// };
/// assert_eq!(options.constant_limit(), 1024);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilationOptions {
    /// Maximum number of entries in the constant pool.
    ///
    /// Default: 65536
    pub max_constants: usize,

    /// Maximum number of global bindings.
    ///
    /// Default: 65536
    pub max_globals: usize,
}

impl CompilationOptions {
    /// Effective constant pool limit.
    pub fn constant_limit(&self) -> usize {
        self.max_constants.min(MAX_INDEXED_ENTRIES)
    }

    /// Effective global binding limit.
    pub fn global_limit(&self) -> usize {
        self.max_globals.min(MAX_INDEXED_ENTRIES)
    }
}

impl Default for CompilationOptions {
    fn default() -> Self {
        Self {
            max_constants: MAX_INDEXED_ENTRIES,
            max_globals: MAX_INDEXED_ENTRIES,
        }
    }
}
