use super::Address;
use std::collections::HashMap;

/// Purpose of a resolved link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    /// Terminator of the block this line opens or continues.
    End,
    /// Next ELSEIF/ELSE or CASE in a chain, else the terminator.
    NextClause,
    /// Opener of the block this line closes.
    Opener,
    /// GOTO, GOSUB and CALL destinations; the block an EXIT or CONTINUE leaves.
    Target,
    Catch,
    Finally,
}

/// ## Resolved line links
///
/// Written by the analyzer, read by the runtime. Statements themselves
/// never change after parsing.

#[derive(Debug, Default, Clone)]
pub struct LinkTable {
    links: HashMap<(Address, Slot), Address>,
}

impl LinkTable {
    pub fn new() -> LinkTable {
        LinkTable::default()
    }

    pub fn clear(&mut self) {
        self.links.clear();
    }

    pub fn set(&mut self, line: Address, slot: Slot, target: Address) {
        self.links.insert((line, slot), target);
    }

    pub fn get(&self, line: Address, slot: Slot) -> Option<Address> {
        self.links.get(&(line, slot)).copied()
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}
