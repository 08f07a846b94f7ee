use crate::{
    lang::code::{Operand, Opcode, Word},
    runtime::{
        data_structures::bigint::Int,
        error::{self, script_error, script_error_str},
        interpreter::{Interpreter, TokenOutcome},
    },
};

impl Interpreter {
    /// Execute the dictionary word at `index` to completion, printing `Error: …` and aborting
    /// the enclosing line if it raises a runtime error.
    pub(super) fn call_by_index(&mut self, index: usize) -> TokenOutcome {
        match self.dictionary.get(index).cloned() {
            Some(word) => self.run_to_outcome(&word),
            None => {
                println!("Error: invalid word index {}", index);
                TokenOutcome::Abort
            }
        }
    }

    /// Build and execute a one-instruction ephemeral word, the way immediate-mode primitives run.
    pub(super) fn run_ephemeral(&mut self, opcodes: Vec<Opcode>) -> TokenOutcome {
        let mut word = Word::new(String::new());
        word.code = opcodes;
        word.code.push(Opcode::End);

        self.run_to_outcome(&word)
    }

    pub(super) fn run_to_outcome(&mut self, word: &Word) -> TokenOutcome {
        match self.execute(word) {
            Ok(()) => TokenOutcome::Continue,
            Err(err) => {
                println!("Error: {}", err.message());
                TokenOutcome::Abort
            }
        }
    }

    /// Run `word`'s bytecode to completion, or until a runtime error aborts this activation. A
    /// nested `CALL` recurses into this same function on the same value stack, loop stack, and
    /// dictionary; an error anywhere unwinds every nested activation at once by propagating back
    /// up through `?`.
    pub fn execute(&mut self, word: &Word) -> error::Result<()> {
        let mut ip: usize = 0;

        while ip < word.code.len() {
            // The targets the compiler back-patches into branch-style opcodes are already the
            // absolute index of the instruction that should run next, so a branch just assigns
            // `next_ip` directly.
            let mut next_ip = ip + 1;

            match &word.code[ip] {
                Opcode::Push(operand) => {
                    let value = self.resolve_operand(word, operand)?;
                    self.value_stack.push(value)?;
                }

                Opcode::Add => {
                    let (a, b) = self.pop_two()?;
                    self.value_stack.push(b.add(&a))?;
                }
                Opcode::Sub => {
                    let (a, b) = self.pop_two()?;
                    self.value_stack.push(b.sub(&a))?;
                }
                Opcode::Mul => {
                    let (a, b) = self.pop_two()?;
                    self.value_stack.push(b.mul(&a))?;
                }
                Opcode::Div => {
                    let (a, b) = self.pop_two()?;
                    match b.div(&a) {
                        Some(quotient) => self.value_stack.push(quotient)?,
                        None => return script_error_str("Division by zero"),
                    }
                }

                Opcode::Dup => {
                    let top = self.value_stack.peek_from_top(0)?;
                    self.value_stack.push(top)?;
                }
                Opcode::Swap => {
                    let (a, b) = self.pop_two()?;
                    self.value_stack.push(a)?;
                    self.value_stack.push(b)?;
                }
                Opcode::Over => {
                    let second = self.value_stack.peek_from_top(1)?;
                    self.value_stack.push(second)?;
                }
                Opcode::Rot => {
                    let top = self.value_stack.pop()?;
                    let middle = self.value_stack.pop()?;
                    let bottom = self.value_stack.pop()?;
                    self.value_stack.push(middle)?;
                    self.value_stack.push(top)?;
                    self.value_stack.push(bottom)?;
                }
                Opcode::Drop => {
                    self.value_stack.pop()?;
                }

                Opcode::Eq => {
                    let (a, b) = self.pop_two()?;
                    self.value_stack.push(bool_to_int(b == a))?;
                }
                Opcode::Lt => {
                    let (a, b) = self.pop_two()?;
                    self.value_stack.push(bool_to_int(b < a))?;
                }
                Opcode::Gt => {
                    let (a, b) = self.pop_two()?;
                    self.value_stack.push(bool_to_int(b > a))?;
                }
                Opcode::And => {
                    let (a, b) = self.pop_two()?;
                    self.value_stack.push(bool_to_int(!a.is_zero() && !b.is_zero()))?;
                }
                Opcode::Or => {
                    let (a, b) = self.pop_two()?;
                    self.value_stack.push(bool_to_int(!a.is_zero() || !b.is_zero()))?;
                }
                Opcode::Not => {
                    let a = self.value_stack.pop()?;
                    self.value_stack.push(bool_to_int(a.is_zero()))?;
                }

                Opcode::I => {
                    let index = self
                        .loop_stack
                        .top()
                        .ok_or(())
                        .or_else(|_| script_error_str("I used outside of a loop"))?
                        .index
                        .clone();
                    self.value_stack.push(index)?;
                }
                Opcode::Do => {
                    // The value pushed last (and so popped first) is the loop's starting index;
                    // the one pushed before it is the limit — `10 0 DO` counts from 0 to 9.
                    let start = self.value_stack.pop()?;
                    let limit = self.value_stack.pop()?;
                    self.loop_stack.push(start, limit, next_ip)?;
                }
                Opcode::Loop => {
                    let frame = self
                        .loop_stack
                        .top_mut()
                        .ok_or(())
                        .or_else(|_| script_error_str("LOOP without a matching DO"))?;
                    frame.index.increment();

                    if frame.index < frame.limit {
                        next_ip = frame.return_addr;
                    } else {
                        self.loop_stack.pop();
                    }
                }

                Opcode::BranchFalse(target) => {
                    let a = self.value_stack.pop()?;
                    if a.is_zero() {
                        next_ip = *target;
                    }
                }
                Opcode::Branch(target) => next_ip = *target,

                Opcode::Call(index) => {
                    let callee = self
                        .dictionary
                        .get(*index)
                        .cloned()
                        .ok_or(())
                        .or_else(|_| script_error_str("CALL: invalid dictionary index"))?;
                    self.execute(&callee)?;
                }
                Opcode::Include(string_index) => {
                    let path = word
                        .strings
                        .get(*string_index)
                        .ok_or(())
                        .or_else(|_| script_error_str("INCLUDE: invalid string index"))?
                        .clone();
                    self.run_include(&path);
                }

                Opcode::End => break,

                Opcode::DotQuote(string_index) => {
                    let text = word
                        .strings
                        .get(*string_index)
                        .ok_or(())
                        .or_else(|_| script_error_str("DOT_QUOTE: invalid string index"))?;
                    print!("{}", text);
                    let _ = std::io::Write::flush(&mut std::io::stdout());
                }
                Opcode::Cr => println!(),
                Opcode::DotS => println!("{}", self.format_stack()),
                Opcode::Flush => self.value_stack.clear(),
                Opcode::Dot => {
                    let a = self.value_stack.pop()?;
                    println!("{}", a);
                }

                // `CASE` and `BEGIN` are no-op markers; the control-flow work happens entirely in
                // the opcodes that reference them by address.
                Opcode::Case => {}
                Opcode::Begin => {}

                Opcode::Of(target) => {
                    let selector = self.value_stack.pop()?;
                    let switched_on = self.value_stack.pop()?;

                    if selector == switched_on {
                        // consumed; fall through into the clause body
                    } else {
                        self.value_stack.push(switched_on)?;
                        next_ip = *target;
                    }
                }
                Opcode::Endof(target) => next_ip = *target,
                Opcode::Endcase => {
                    self.value_stack.pop()?;
                }

                Opcode::Exit => next_ip = word.code.len() - 1,

                Opcode::While(target) => {
                    let a = self.value_stack.pop()?;
                    if a.is_zero() {
                        next_ip = *target;
                    }
                }
                Opcode::Repeat(target) => next_ip = *target,

                Opcode::BitAnd => {
                    let (a, b) = self.pop_two()?;
                    self.value_stack.push(b.bit_and(&a))?;
                }
                Opcode::BitOr => {
                    let (a, b) = self.pop_two()?;
                    self.value_stack.push(b.bit_or(&a))?;
                }
                Opcode::BitXor => {
                    let (a, b) = self.pop_two()?;
                    self.value_stack.push(b.bit_xor(&a))?;
                }
                Opcode::BitNot => {
                    let a = self.value_stack.pop()?;
                    self.value_stack.push(a.bit_not())?;
                }
                Opcode::Lshift => {
                    let (count, value) = self.pop_two()?;
                    let count = narrow_shift_count(&count)?;
                    self.value_stack.push(value.shl(count))?;
                }
                Opcode::Rshift => {
                    let (count, value) = self.pop_two()?;
                    let count = narrow_shift_count(&count)?;
                    self.value_stack.push(value.shr(count))?;
                }

                Opcode::Words => println!("{}", self.dictionary.names().collect::<Vec<_>>().join(" ")),

                Opcode::Forget(index) => self.dictionary.forget(*index)?,

                Opcode::Variable(string_index) => {
                    let name = word
                        .strings
                        .get(*string_index)
                        .ok_or(())
                        .or_else(|_| script_error_str("VARIABLE: invalid string index"))?
                        .clone();
                    self.declare_variable(name)?;
                }
                Opcode::Fetch => {
                    let index = self.value_stack.pop()?;
                    let index = index
                        .to_usize()
                        .ok_or(())
                        .or_else(|_| script_error_str("FETCH: invalid variable index"))?;
                    let value = self.variables.fetch(index)?;
                    self.value_stack.push(value)?;
                }
                Opcode::Store => {
                    let index = self.value_stack.pop()?;
                    let value = self.value_stack.pop()?;
                    let index = index
                        .to_usize()
                        .ok_or(())
                        .or_else(|_| script_error_str("STORE: invalid variable index"))?;
                    self.variables.store(index, value)?;
                }
                Opcode::Pick => {
                    let n = self.value_stack.pop()?;
                    let n = n.to_usize().ok_or(()).or_else(|_| script_error_str("PICK: invalid index"))?;
                    let value = self.value_stack.peek_from_top(n)?;
                    self.value_stack.push(value)?;
                }
            }

            ip = next_ip;
        }

        Ok(())
    }

    /// Pop the top two values, returning `(a, b)`: `a` is the value that was on top, `b` the one
    /// below it. Every binary primitive computes `op(b, a)`.
    fn pop_two(&mut self) -> error::Result<(Int, Int)> {
        let a = self.value_stack.pop()?;
        let b = self.value_stack.pop()?;
        Ok((a, b))
    }

    fn resolve_operand(&self, word: &Word, operand: &Operand) -> error::Result<Int> {
        match operand {
            Operand::Literal(value) => Ok(Int::from_i64(*value)),
            Operand::StringIndex(index) => {
                let text = word
                    .strings
                    .get(*index)
                    .ok_or(())
                    .or_else(|_| script_error_str("PUSH: invalid string index"))?;

                Int::parse_decimal(text)
                    .ok_or(())
                    .or_else(|_| script_error(format!("Malformed numeric literal: {}", text)))
            }
        }
    }

    /// Render the value stack bottom-to-top, in the format both `DOT_S` and the REPL's
    /// end-of-line print use.
    pub fn format_stack(&self) -> String {
        let values: Vec<String> = self.value_stack.as_slice().iter().map(|value| value.to_string()).collect();
        format!("Stack: {}", values.join(" "))
    }
}

fn bool_to_int(value: bool) -> Int {
    if value {
        Int::from_i64(1)
    } else {
        Int::zero()
    }
}

fn narrow_shift_count(value: &Int) -> error::Result<u32> {
    value.to_u32().ok_or(()).or_else(|_| script_error_str("Shift count must be a non-negative small integer"))
}
