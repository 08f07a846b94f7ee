use crate::lang::code::Opcode;

/// Map a token to the single, operand-less opcode it emits, if it names one of the "simple"
/// primitives — the ones that require no back-patching and no quoted/named argument.
///
/// Structured control words (`IF`, `DO`, `CASE`, …), `."`, `LOAD`, `FORGET`, and `VARIABLE` are
/// handled separately by the compiler, since each of those either manages the compile-time
/// control stack or consumes extra text from the rest of the line. The token spellings here are
/// exactly the ones the original Forth-with-GMP source recognizes.
pub fn simple_opcode(token: &str) -> Option<Opcode> {
    let opcode = match token {
        "+" => Opcode::Add,
        "-" => Opcode::Sub,
        "*" => Opcode::Mul,
        "/" => Opcode::Div,
        "DUP" => Opcode::Dup,
        "SWAP" => Opcode::Swap,
        "OVER" => Opcode::Over,
        "ROT" => Opcode::Rot,
        "DROP" => Opcode::Drop,
        "=" => Opcode::Eq,
        "<" => Opcode::Lt,
        ">" => Opcode::Gt,
        "AND" => Opcode::And,
        "OR" => Opcode::Or,
        "NOT" => Opcode::Not,
        "I" => Opcode::I,
        "CR" => Opcode::Cr,
        ".S" => Opcode::DotS,
        "." => Opcode::Dot,
        "FLUSH" => Opcode::Flush,
        "EXIT" => Opcode::Exit,
        "&" => Opcode::BitAnd,
        "|" => Opcode::BitOr,
        "^" => Opcode::BitXor,
        "~" => Opcode::BitNot,
        "LSHIFT" => Opcode::Lshift,
        "RSHIFT" => Opcode::Rshift,
        "WORDS" => Opcode::Words,
        "@" => Opcode::Fetch,
        "!" => Opcode::Store,
        "PICK" => Opcode::Pick,

        _ => return None,
    };

    Some(opcode)
}

/// Does this token open a structured-control construct (`IF`, `DO`, `BEGIN`, `CASE`)?
///
/// Used by the outer interpreter to decide when a top-level line outside any colon-definition
/// must switch from running tokens immediately to accumulating an ephemeral word through the
/// same back-patching compiler a colon-definition's body uses — `100 0 DO I . LOOP` typed
/// directly at the prompt only produces a correct loop if `DO`'s entire span of tokens compiles
/// into one word before any of them runs.
pub fn opens_structured_control(token: &str) -> bool {
    matches!(token, "IF" | "DO" | "BEGIN" | "CASE")
}
