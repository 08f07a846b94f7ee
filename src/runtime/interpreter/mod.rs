use crate::{
    lang::{
        code::{Opcode, Operand, Word},
        compiler::{self, CompileStep, ControlStack},
        primitives,
        tokenizing::{Token, TokenStream},
    },
    runtime::{
        data_structures::{
            dictionary::Dictionary, loop_stack::LoopStack, value_stack::ValueStack,
            variables::VariableTable,
        },
        error,
    },
};
use std::io::{self, Write};

/// The bytecode dispatch loop (`execute`) and everything it calls into.
pub mod bytecode;

/// What happened after interpreting one token in immediate mode.
///
/// A runtime error aborts the rest of the line (`Abort`), an unknown word or a malformed quoted
/// argument is a diagnostic that does not (`Continue`), and a `LOAD` tells the caller to suppress
/// the REPL's usual `Stack:` print (`Included`).
enum TokenOutcome {
    Continue,
    Included,
    Abort,
}

/// The interpreter's full process-wide state: the value stack, loop stack, dictionary, and
/// variable table, plus the pieces of state that exist only while a colon-definition is open.
#[derive(Default)]
pub struct Interpreter {
    pub value_stack: ValueStack,
    pub loop_stack: LoopStack,
    pub dictionary: Dictionary,
    pub variables: VariableTable,

    compiling: bool,
    current_word: Option<Word>,
    current_word_index: usize,
    control: ControlStack,
}

impl Interpreter {
    pub fn new() -> Interpreter {
        Interpreter::default()
    }

    /// Interpret one line of input. Returns `true` if the line performed a file inclusion, so the
    /// REPL knows to suppress its usual `Stack:` print.
    pub fn interpret_line(&mut self, line: &str) -> bool {
        // Loop entries left open by a runtime error earlier in the session don't survive past
        // the top-level line that opened them: every fresh top-level call starts with a clean
        // loop stack.
        self.loop_stack.clear();

        let mut tokens = TokenStream::new(line);
        let mut included = false;

        // A structured-control keyword seen outside a colon-definition switches this line from
        // running tokens one at a time to accumulating them into an ephemeral word through the
        // same back-patching compiler a colon-definition uses, the same way `:`/`;` do for a
        // named definition — `IF`/`DO`/`BEGIN`/`CASE` only produce correct branch targets once
        // their whole span has compiled. The accumulated word runs as soon as its control stack
        // empties back out, and the line resumes running tokens immediately after that.
        let mut pending: Option<(Word, ControlStack)> = None;

        while let Some(token) = tokens.next_token() {
            if self.compiling {
                self.compile_one(&token, &mut tokens);
                continue;
            }

            if let Some((word, control)) = pending.as_mut() {
                match compiler::compile_token(word, control, &self.dictionary, &token, &mut tokens) {
                    CompileStep::Ok => {}
                    CompileStep::Diagnostic(message) => println!("{}", message),
                }

                if control.is_empty() {
                    let (mut word, _) = pending.take().unwrap();
                    word.code.push(Opcode::End);
                    if matches!(self.run_to_outcome(&word), TokenOutcome::Abort) {
                        break;
                    }
                }
                continue;
            }

            if let Token::Word(text) = &token {
                if primitives::opens_structured_control(text) {
                    let mut word = Word::new(String::new());
                    let mut control = ControlStack::new();
                    match compiler::compile_token(&mut word, &mut control, &self.dictionary, &token, &mut tokens) {
                        CompileStep::Ok => {}
                        CompileStep::Diagnostic(message) => println!("{}", message),
                    }
                    pending = Some((word, control));
                    continue;
                }
            }

            match self.interpret_token(&token, &mut tokens) {
                TokenOutcome::Continue => {}
                TokenOutcome::Included => included = true,
                TokenOutcome::Abort => break,
            }
        }

        if pending.is_some() {
            println!("Unbalanced control construct");
        }

        included
    }

    fn interpret_token(&mut self, token: &Token, tokens: &mut TokenStream) -> TokenOutcome {
        match token {
            Token::Number(value) => match self.value_stack.push(value.clone()) {
                Ok(()) => TokenOutcome::Continue,
                Err(err) => abort(err.message()),
            },
            Token::Word(text) => self.interpret_word(text, tokens),
        }
    }

    fn interpret_word(&mut self, text: &str, tokens: &mut TokenStream) -> TokenOutcome {
        if text == ":" {
            return self.begin_definition(tokens);
        }

        if let Some(opcode) = primitives::simple_opcode(text) {
            return self.run_ephemeral(vec![opcode]);
        }

        match text {
            "LOAD" => self.immediate_load(tokens),
            ".\"" => self.immediate_dot_quote(tokens),
            "FORGET" => self.immediate_forget(tokens),
            "VARIABLE" => self.immediate_variable(tokens),
            _ => match self.dictionary.find_index(text) {
                Some(index) => self.call_by_index(index),
                None => {
                    println!("Unknown word: {}", text);
                    TokenOutcome::Continue
                }
            },
        }
    }

    fn begin_definition(&mut self, tokens: &mut TokenStream) -> TokenOutcome {
        match tokens.next_word_text() {
            Ok(name) => match self.dictionary.reserve(name.clone()) {
                Ok(index) => {
                    self.current_word_index = index;
                    self.current_word = Some(Word::new(name));
                    self.compiling = true;
                    self.control.clear();
                    TokenOutcome::Continue
                }
                Err(err) => abort(err.message()),
            },
            Err(err) => {
                println!("{}", err.message());
                TokenOutcome::Continue
            }
        }
    }

    fn compile_one(&mut self, token: &Token, tokens: &mut TokenStream) {
        if matches!(token, Token::Word(text) if text == ";") {
            self.finish_definition();
            return;
        }

        let Some(word) = self.current_word.as_mut() else {
            return;
        };

        match compiler::compile_token(word, &mut self.control, &self.dictionary, token, tokens) {
            CompileStep::Ok => {}
            CompileStep::Diagnostic(message) => println!("{}", message),
        }
    }

    fn finish_definition(&mut self) {
        if let Some(mut word) = self.current_word.take() {
            word.code.push(Opcode::End);
            self.dictionary.commit(self.current_word_index, word);
        }

        self.compiling = false;
        self.control.clear();
    }

    fn immediate_load(&mut self, tokens: &mut TokenStream) -> TokenOutcome {
        match tokens.read_quoted_string() {
            Ok(path) => {
                self.run_include(&path);
                TokenOutcome::Included
            }
            Err(err) => {
                println!("{}", err.message());
                TokenOutcome::Continue
            }
        }
    }

    fn immediate_dot_quote(&mut self, tokens: &mut TokenStream) -> TokenOutcome {
        match tokens.read_dot_quote_text() {
            Ok(text) => {
                print!("{}", text);
                let _ = io::stdout().flush();
                TokenOutcome::Continue
            }
            Err(err) => {
                println!("{}", err.message());
                TokenOutcome::Continue
            }
        }
    }

    fn immediate_forget(&mut self, tokens: &mut TokenStream) -> TokenOutcome {
        let name = match tokens.next_word_text() {
            Ok(name) => name,
            Err(err) => {
                println!("{}", err.message());
                return TokenOutcome::Continue;
            }
        };

        match self.dictionary.find_index(&name) {
            Some(index) => match self.dictionary.forget(index) {
                Ok(()) => TokenOutcome::Continue,
                Err(err) => abort(err.message()),
            },
            None => {
                println!("Unknown word: {}", name);
                TokenOutcome::Continue
            }
        }
    }

    fn immediate_variable(&mut self, tokens: &mut TokenStream) -> TokenOutcome {
        let name = match tokens.next_word_text() {
            Ok(name) => name,
            Err(err) => {
                println!("{}", err.message());
                return TokenOutcome::Continue;
            }
        };

        match self.declare_variable(name) {
            Ok(()) => TokenOutcome::Continue,
            Err(err) => abort(err.message()),
        }
    }

    /// Declare a new variable cell and its dictionary accessor word. Shared by the immediate-mode
    /// path and the compiled `Opcode::Variable` handler in `bytecode.rs`.
    fn declare_variable(&mut self, name: String) -> error::Result<()> {
        let index = self.variables.declare(name.clone())?;

        let mut accessor = Word::new(name);
        accessor.code.push(Opcode::Push(Operand::Literal(index as i64)));
        accessor.code.push(Opcode::End);
        self.dictionary.insert(accessor)?;

        Ok(())
    }

    /// Open `path` and feed each of its lines back through `interpret_line`, as if typed at the
    /// REPL. A missing file prints a message and does nothing further — it is not a runtime
    /// error.
    fn run_include(&mut self, path: &str) {
        match std::fs::read_to_string(path) {
            Ok(contents) => {
                for line in contents.lines() {
                    self.interpret_line(line);
                }
            }
            Err(_) => println!("Cannot open file: {}", path),
        }
    }
}

fn abort(message: &str) -> TokenOutcome {
    println!("Error: {}", message);
    TokenOutcome::Abort
}
