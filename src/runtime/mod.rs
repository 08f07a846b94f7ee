/// The value stack, loop stack, dictionary, variable table, and the `Int` big-integer type they
/// are all built from.
pub mod data_structures;

/// The process-wide error type and `Result` alias used throughout the interpreter.
pub mod error;

/// The outer interpreter and the bytecode engine it drives.
pub mod interpreter;
