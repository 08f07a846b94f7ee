use crate::runtime::{data_structures::bigint::Int, error::{self, script_error_str}};

/// Runtime loop stack capacity.
pub const LOOP_STACK_CAPACITY: usize = 100;

/// A single `DO`/`LOOP` activation record.
///
/// `index` and `limit` are arbitrary precision, so that loop counters never silently truncate.
pub struct LoopFrame {
    pub index: Int,
    pub limit: Int,

    /// The instruction index `LOOP` jumps back to when the loop continues: the index of the
    /// instruction immediately following `DO`.
    pub return_addr: usize,
}

/// The runtime loop stack used by `DO`/`LOOP`/`I`. Supports nesting up to its capacity.
#[derive(Default)]
pub struct LoopStack {
    frames: Vec<LoopFrame>,
}

impl LoopStack {
    pub fn new() -> LoopStack {
        LoopStack { frames: Vec::new() }
    }

    pub fn push(&mut self, index: Int, limit: Int, return_addr: usize) -> error::Result<()> {
        if self.frames.len() >= LOOP_STACK_CAPACITY {
            return script_error_str("Loop stack overflow");
        }

        self.frames.push(LoopFrame { index, limit, return_addr });
        Ok(())
    }

    /// The innermost loop's activation record, if any loop is open.
    pub fn top(&self) -> Option<&LoopFrame> {
        self.frames.last()
    }

    pub fn top_mut(&mut self) -> Option<&mut LoopFrame> {
        self.frames.last_mut()
    }

    pub fn pop(&mut self) -> Option<LoopFrame> {
        self.frames.pop()
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Discard any frames left open by an aborted `DO/LOOP`, scrubbed at the start of the next
    /// top-level `interpret` call.
    pub fn clear(&mut self) {
        self.frames.clear();
    }
}
