/// Tokenizing, bytecode types, and the structured-control compiler.
pub mod lang;

/// The REPL driver and file-inclusion facility.
pub mod repl;

/// Data structures, error type, and the interpreter built from them.
pub mod runtime;
