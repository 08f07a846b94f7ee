/// An operand that either carries a small immediate value directly, or indexes the enclosing
/// word's string pool.
///
/// This is the one place the original C source overloads a single `long int operand` field by
/// value range (is it small enough to be a literal, or does it index into `strings`?). Kept here
/// as an explicit two-variant enum rather than a range check on `Opcode::Push`'s payload, the same
/// treatment given to `CALL` below.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Operand {
    /// A small immediate value, used directly without consulting the string pool. Variable
    /// accessor words are built from this: their body is a single `Push(Literal(k))`.
    Literal(i64),

    /// An index into the enclosing word's string pool. Used for numeric literals too large to
    /// fit as a small immediate; the text is parsed into an `Int` at execution time.
    StringIndex(usize),
}

/// The virtual machine's instruction set.
///
/// Each variant carries its operand typed to the role it plays (code offset, string-pool index,
/// dictionary index) instead of a single untyped `i64`, which is how the overloaded `CALL`
/// operand (dictionary index vs. filename string index) is split into two distinct opcodes,
/// `Call` and `Include`.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Opcode {
    Push(Operand),
    Add,
    Sub,
    Mul,
    Div,
    Dup,
    Swap,
    Over,
    Rot,
    Drop,
    Eq,
    Lt,
    Gt,
    And,
    Or,
    Not,
    I,
    Do,
    Loop,

    /// Absolute instruction index to jump to if the top of the stack is zero.
    BranchFalse(usize),

    /// Absolute instruction index to jump to unconditionally.
    Branch(usize),

    /// Call a word by its dictionary index.
    Call(usize),

    /// Interpret a file by its string-pool index (replaces the overloaded `CALL` the original
    /// source used for `LOAD`).
    Include(usize),

    End,

    /// Print the string at this string-pool index verbatim.
    DotQuote(usize),

    Cr,
    DotS,
    Flush,
    Dot,
    Case,

    /// Absolute instruction index of the matching `ENDOF`'s target, to jump to on mismatch.
    Of(usize),

    /// Absolute instruction index of `ENDCASE`.
    Endof(usize),

    Endcase,
    Exit,
    Begin,

    /// Absolute instruction index to jump to (the matching `REPEAT`'s following instruction) if
    /// the top of the stack is zero.
    While(usize),

    /// Absolute instruction index of the matching `BEGIN`.
    Repeat(usize),

    BitAnd,
    BitOr,
    BitXor,
    BitNot,
    Lshift,
    Rshift,
    Words,

    /// Dictionary index to truncate the dictionary to.
    Forget(usize),

    /// String-pool index holding the new variable's name.
    Variable(usize),

    Fetch,
    Store,
    Pick,
}

/// A compiled word: a name, its instruction stream, and the pool of string literals that
/// stream's `StringIndex` operands, `DotQuote`, `Include`, and `Variable` instructions point
/// into.
#[derive(Clone, Debug, Default)]
pub struct Word {
    pub name: String,
    pub code: Vec<Opcode>,
    pub strings: Vec<String>,
}

impl Word {
    pub fn new(name: String) -> Word {
        Word { name, code: Vec::new(), strings: Vec::new() }
    }

    /// The index the next emitted instruction will have. Used by the compiler as the `HERE`
    /// reference point for back-patching.
    pub fn here(&self) -> usize {
        self.code.len()
    }

    /// Append a string literal to the pool, returning its index. Numeric literals too large for
    /// a small immediate, `."` text, `LOAD` filenames, and `VARIABLE` names are all stored this
    /// way.
    pub fn add_string(&mut self, text: String) -> usize {
        let index = self.strings.len();
        self.strings.push(text);
        index
    }
}
