use crate::runtime::{data_structures::bigint::Int, error::{self, script_error_str}};

/// Variable table capacity.
pub const VARIABLE_CAPACITY: usize = 100;

/// A single named big-integer cell.
pub struct Variable {
    pub name: String,
    pub value: Int,
}

/// The ordered table of variable cells created by `VARIABLE`.
///
/// Each entry is reached by index from `@`/`!`; the dictionary accessor word that pushes that
/// index is created alongside the cell by the interpreter, not by this table, since building the
/// accessor word also touches the dictionary.
#[derive(Default)]
pub struct VariableTable {
    cells: Vec<Variable>,
}

impl VariableTable {
    pub fn new() -> VariableTable {
        VariableTable { cells: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Declare a new variable cell initialized to zero, returning its index.
    pub fn declare(&mut self, name: String) -> error::Result<usize> {
        if self.cells.len() >= VARIABLE_CAPACITY {
            return script_error_str("Variable table full");
        }

        self.cells.push(Variable { name, value: Int::zero() });
        Ok(self.cells.len() - 1)
    }

    pub fn fetch(&self, index: usize) -> error::Result<Int> {
        self.cells
            .get(index)
            .map(|cell| cell.value.clone())
            .ok_or(())
            .or_else(|_| script_error_str("FETCH: invalid variable index"))
    }

    pub fn store(&mut self, index: usize, value: Int) -> error::Result<()> {
        match self.cells.get_mut(index) {
            Some(cell) => {
                cell.value = value;
                Ok(())
            }
            None => script_error_str("STORE: invalid variable index"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declared_variable_starts_at_zero() {
        let mut vars = VariableTable::new();
        let index = vars.declare("X".to_string()).unwrap();
        assert_eq!(vars.fetch(index).unwrap(), Int::zero());
    }

    #[test]
    fn store_then_fetch_round_trips() {
        let mut vars = VariableTable::new();
        let index = vars.declare("X".to_string()).unwrap();
        vars.store(index, Int::from_i64(42)).unwrap();
        assert_eq!(vars.fetch(index).unwrap(), Int::from_i64(42));
    }

    #[test]
    fn invalid_index_is_an_error() {
        let vars = VariableTable::new();
        assert!(vars.fetch(0).is_err());
    }
}
