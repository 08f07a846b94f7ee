use crate::runtime::{
    data_structures::bigint::Int,
    error::{self, script_error_str},
};

/// The data stack's maximum depth.
pub const STACK_CAPACITY: usize = 1000;

/// The value stack: the sole data workspace of execution.
///
/// A successful `push` grows the stack by one, a successful `pop` shrinks it by one;
/// underflow/overflow report an error without otherwise mutating the stack.
#[derive(Default)]
pub struct ValueStack {
    values: Vec<Int>,
}

impl ValueStack {
    pub fn new() -> ValueStack {
        ValueStack { values: Vec::new() }
    }

    /// Current stack depth.
    pub fn depth(&self) -> usize {
        self.values.len()
    }

    /// Examine the full stack, bottom to top. Used by `.s` and by tests.
    pub fn as_slice(&self) -> &[Int] {
        &self.values
    }

    /// Push a value. Fails without mutating the stack if the stack is already at capacity.
    pub fn push(&mut self, value: Int) -> error::Result<()> {
        if self.values.len() >= STACK_CAPACITY {
            return script_error_str("Stack overflow");
        }

        self.values.push(value);
        Ok(())
    }

    /// Pop the top value. Fails without mutating the stack if the stack is empty.
    pub fn pop(&mut self) -> error::Result<Int> {
        self.values.pop().ok_or(()).or_else(|_| script_error_str("Stack underflow"))
    }

    /// Duplicate the value `n` below the top onto the top, leaving the original in place.
    /// `n = 0` is equivalent to `DUP`. Called after the index operand itself has already been
    /// popped off the stack.
    ///
    /// Returns an error, and leaves the stack untouched, if `n` is out of range.
    pub fn peek_from_top(&self, n: usize) -> error::Result<Int> {
        if n >= self.values.len() {
            return script_error_str("PICK: stack underflow or invalid index");
        }

        let index = self.values.len() - 1 - n;
        Ok(self.values[index].clone())
    }

    /// Empty the stack. Used by `FLUSH`.
    pub fn clear(&mut self) {
        self.values.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_then_pop_round_trips() {
        let mut stack = ValueStack::new();
        stack.push(Int::from_i64(5)).unwrap();
        assert_eq!(stack.pop().unwrap(), Int::from_i64(5));
    }

    #[test]
    fn pop_on_empty_stack_is_underflow_and_leaves_stack_alone() {
        let mut stack = ValueStack::new();
        assert!(stack.pop().is_err());
        assert_eq!(stack.depth(), 0);
    }

    #[test]
    fn push_past_capacity_is_overflow_and_leaves_stack_alone() {
        let mut stack = ValueStack::new();
        for _ in 0..STACK_CAPACITY {
            stack.push(Int::zero()).unwrap();
        }
        assert!(stack.push(Int::zero()).is_err());
        assert_eq!(stack.depth(), STACK_CAPACITY);
    }

    #[test]
    fn pick_zero_is_dup_of_top() {
        let mut stack = ValueStack::new();
        stack.push(Int::from_i64(1)).unwrap();
        stack.push(Int::from_i64(2)).unwrap();
        assert_eq!(stack.peek_from_top(0).unwrap(), Int::from_i64(2));
    }
}
