/// The `Int` big-integer newtype every other data structure here is built from.
pub mod bigint;

/// The dictionary of compiled words, looked up by name and indexed by slot.
pub mod dictionary;

/// The runtime loop stack backing `DO`/`LOOP`/`I`.
pub mod loop_stack;

/// The named big-integer cells `VARIABLE` declares.
pub mod variables;

/// The value stack, the sole data workspace of execution.
pub mod value_stack;
