use crate::{
    lang::{
        code::{Opcode, Operand, Word},
        primitives,
        tokenizing::{Token, TokenStream},
    },
    runtime::data_structures::dictionary::Dictionary,
};

/// Compile-time control stack capacity.
pub const CONTROL_STACK_CAPACITY: usize = 100;

/// What kind of open structured-control construct a control-stack entry represents.
///
/// `BEGIN` and `WHILE` reuse the `Do` and `If` tags rather than growing two more variants — there
/// is no runtime difference, only which opcode was emitted at `addr`.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ControlKind {
    If,
    Do,
    Case,
    Of,
    Endof,
}

#[derive(Clone, Copy, Debug)]
pub struct ControlEntry {
    pub kind: ControlKind,
    pub addr: usize,
}

/// The compile-time-only stack of open structured-control constructs. Exists for the lifetime of
/// a single colon-definition and has no runtime counterpart.
#[derive(Default)]
pub struct ControlStack {
    entries: Vec<ControlEntry>,
}

impl ControlStack {
    pub fn new() -> ControlStack {
        ControlStack { entries: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn push(&mut self, entry: ControlEntry) -> Result<(), String> {
        if self.entries.len() >= CONTROL_STACK_CAPACITY {
            return Err("Control stack full".to_string());
        }

        self.entries.push(entry);
        Ok(())
    }

    /// Pop the top entry if (and only if) it has the expected kind. A mismatched or empty stack
    /// is left untouched so the caller can report the imbalance without further corrupting it.
    fn pop_expecting(&mut self, kind: ControlKind) -> Option<ControlEntry> {
        match self.entries.last() {
            Some(entry) if entry.kind == kind => self.entries.pop(),
            _ => None,
        }
    }

    /// Discard everything on the stack. Used when a colon-definition is abandoned mid-compile.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// The outcome of compiling one token into the current word.
///
/// Compile-time problems — unbalanced control constructs, unknown words, malformed quoted
/// arguments — are diagnostics, not runtime errors: they print a message and move on without
/// setting the process-wide error flag.
pub enum CompileStep {
    Ok,
    Diagnostic(String),
}

fn push_or_diagnostic(control: &mut ControlStack, entry: ControlEntry) -> CompileStep {
    match control.push(entry) {
        Ok(()) => CompileStep::Ok,
        Err(message) => CompileStep::Diagnostic(message),
    }
}

/// Back-patch the branch target of a previously emitted jump instruction.
fn patch(word: &mut Word, addr: usize, target: usize) {
    match &mut word.code[addr] {
        Opcode::BranchFalse(t) => *t = target,
        Opcode::Branch(t) => *t = target,
        Opcode::Of(t) => *t = target,
        Opcode::Endof(t) => *t = target,
        Opcode::While(t) => *t = target,
        other => unreachable!("{:?} at {} is not a branch instruction", other, addr),
    }
}

/// Compile one token into `word`, consuming further input from `tokens` for the handful of
/// keywords that take a trailing name or quoted argument.
pub fn compile_token(
    word: &mut Word,
    control: &mut ControlStack,
    dictionary: &Dictionary,
    token: &Token,
    tokens: &mut TokenStream,
) -> CompileStep {
    let text = match token {
        Token::Number(value) => {
            let index = word.add_string(value.to_decimal_string());
            word.code.push(Opcode::Push(Operand::StringIndex(index)));
            return CompileStep::Ok;
        }
        Token::Word(text) => text.as_str(),
    };

    if let Some(opcode) = primitives::simple_opcode(text) {
        word.code.push(opcode);
        return CompileStep::Ok;
    }

    match text {
        "IF" => {
            let addr = word.here();
            word.code.push(Opcode::BranchFalse(0));
            push_or_diagnostic(control, ControlEntry { kind: ControlKind::If, addr })
        }

        "ELSE" => match control.pop_expecting(ControlKind::If) {
            Some(if_entry) => {
                let addr = word.here();
                word.code.push(Opcode::Branch(0));
                let target = word.here();
                patch(word, if_entry.addr, target);
                push_or_diagnostic(control, ControlEntry { kind: ControlKind::If, addr })
            }
            None => CompileStep::Diagnostic("ELSE without matching IF".to_string()),
        },

        "THEN" => match control.pop_expecting(ControlKind::If) {
            Some(if_entry) => {
                let target = word.here();
                patch(word, if_entry.addr, target);
                CompileStep::Ok
            }
            None => CompileStep::Diagnostic("THEN without matching IF".to_string()),
        },

        "DO" => {
            let addr = word.here();
            word.code.push(Opcode::Do);
            push_or_diagnostic(control, ControlEntry { kind: ControlKind::Do, addr })
        }

        "LOOP" => match control.pop_expecting(ControlKind::Do) {
            Some(_) => {
                word.code.push(Opcode::Loop);
                CompileStep::Ok
            }
            None => CompileStep::Diagnostic("LOOP without matching DO".to_string()),
        },

        "BEGIN" => {
            let addr = word.here();
            word.code.push(Opcode::Begin);
            push_or_diagnostic(control, ControlEntry { kind: ControlKind::Do, addr })
        }

        "WHILE" => {
            let addr = word.here();
            word.code.push(Opcode::While(0));
            push_or_diagnostic(control, ControlEntry { kind: ControlKind::If, addr })
        }

        "REPEAT" => {
            let while_entry = match control.pop_expecting(ControlKind::If) {
                Some(entry) => entry,
                None => return CompileStep::Diagnostic("REPEAT without matching WHILE".to_string()),
            };
            let begin_entry = match control.pop_expecting(ControlKind::Do) {
                Some(entry) => entry,
                None => return CompileStep::Diagnostic("REPEAT without matching BEGIN".to_string()),
            };

            word.code.push(Opcode::Repeat(begin_entry.addr));
            let target = word.here();
            patch(word, while_entry.addr, target);
            CompileStep::Ok
        }

        "CASE" => {
            let addr = word.here();
            word.code.push(Opcode::Case);
            push_or_diagnostic(control, ControlEntry { kind: ControlKind::Case, addr })
        }

        "OF" => {
            let addr = word.here();
            word.code.push(Opcode::Of(0));
            push_or_diagnostic(control, ControlEntry { kind: ControlKind::Of, addr })
        }

        "ENDOF" => match control.pop_expecting(ControlKind::Of) {
            Some(of_entry) => {
                let addr = word.here();
                word.code.push(Opcode::Endof(0));
                let target = word.here();
                patch(word, of_entry.addr, target);
                push_or_diagnostic(control, ControlEntry { kind: ControlKind::Endof, addr })
            }
            None => CompileStep::Diagnostic("ENDOF without matching OF".to_string()),
        },

        "ENDCASE" => {
            let endcase_addr = word.here();
            let after_endcase = endcase_addr + 1;

            // A matched clause's ENDOF must jump past ENDCASE, not onto it, or the selector drop
            // ENDCASE performs on the fall-through path would also run on a match.
            while let Some(endof_entry) = control.pop_expecting(ControlKind::Endof) {
                patch(word, endof_entry.addr, after_endcase);
            }

            match control.pop_expecting(ControlKind::Case) {
                Some(_) => {
                    word.code.push(Opcode::Endcase);
                    CompileStep::Ok
                }
                None => CompileStep::Diagnostic("ENDCASE without matching CASE".to_string()),
            }
        }

        ".\"" => match tokens.read_dot_quote_text() {
            Ok(text) => {
                let index = word.add_string(text);
                word.code.push(Opcode::DotQuote(index));
                CompileStep::Ok
            }
            Err(err) => CompileStep::Diagnostic(err.message().to_string()),
        },

        "LOAD" => match tokens.read_quoted_string() {
            Ok(path) => {
                let index = word.add_string(path);
                word.code.push(Opcode::Include(index));
                CompileStep::Ok
            }
            Err(err) => CompileStep::Diagnostic(err.message().to_string()),
        },

        "FORGET" => match tokens.next_word_text() {
            Ok(name) => match dictionary.find_index(&name) {
                Some(index) => {
                    word.code.push(Opcode::Forget(index));
                    CompileStep::Ok
                }
                None => CompileStep::Diagnostic(format!("Unknown word: {}", name)),
            },
            Err(err) => CompileStep::Diagnostic(err.message().to_string()),
        },

        "VARIABLE" => match tokens.next_word_text() {
            Ok(name) => {
                let index = word.add_string(name);
                word.code.push(Opcode::Variable(index));
                CompileStep::Ok
            }
            Err(err) => CompileStep::Diagnostic(err.message().to_string()),
        },

        _ => match dictionary.find_index(text) {
            Some(index) => {
                word.code.push(Opcode::Call(index));
                CompileStep::Ok
            }
            None => CompileStep::Diagnostic(format!("Unknown word: {}", text)),
        },
    }
}
