/// The instruction set and per-word bytecode container the compiler emits into and the
/// interpreter executes.
pub mod code;

/// A forward-only cursor over a line of source text, shared by the tokenizer and the quoted
/// string parsing `."` and `LOAD` need.
pub mod source_buffer;

/// Splits a line of source into tokens, with support for reading quoted arguments out of the
/// remaining line text.
pub mod tokenizing;

/// The structured-control compiler: translates `IF/ELSE/THEN`, `DO/LOOP`, `BEGIN/WHILE/REPEAT`,
/// and `CASE/OF/ENDOF/ENDCASE` into a flat instruction stream with back-patched branch targets.
pub mod compiler;

/// The table of bare primitive names that compile to a single operand-less opcode, plus the
/// keyword set the compiler itself consumes.
pub mod primitives;
