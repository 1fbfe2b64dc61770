//! Temporary variable names for lowering passes.

use jsdown_ast::{NodeArena, NodeIndex, SyntaxKind};
use rustc_hash::FxHashSet;

/// Source of fresh temporary names.
///
/// Names returned by one creator must never repeat and must not collide with
/// identifiers the program already uses. One creator serves a whole
/// compilation unit.
pub trait TmpVarNameCreator {
    fn create_tmp_var_name(&mut self) -> String;
}

impl<F> TmpVarNameCreator for F
where
    F: FnMut() -> String,
{
    fn create_tmp_var_name(&mut self) -> String {
        self()
    }
}

/// Generates `_a` .. `_z`, then `_0`, `_1`, ... skipping reserved names.
#[derive(Debug, Default)]
pub struct UniqueNameGenerator {
    counter: u32,
    /// Identifiers already present in the program
    reserved: FxHashSet<String>,
    /// Names handed out so far
    generated: FxHashSet<String>,
}

impl UniqueNameGenerator {
    pub fn new() -> UniqueNameGenerator {
        UniqueNameGenerator::default()
    }

    pub fn reserve_name(&mut self, name: impl Into<String>) {
        self.reserved.insert(name.into());
    }

    /// Reserve the text of every `Name` node under `root`.
    pub fn reserve_names_in(&mut self, arena: &NodeArena, root: NodeIndex) {
        for index in arena.descendants_preorder(root) {
            if arena.is_kind(index, SyntaxKind::Name) {
                if let Some(text) = arena.text(index) {
                    self.reserved.insert(text.to_owned());
                }
            }
        }
    }

    pub fn is_reserved(&self, name: &str) -> bool {
        self.reserved.contains(name) || self.generated.contains(name)
    }

    /// Number of names handed out so far.
    pub fn generated_count(&self) -> usize {
        self.generated.len()
    }

    fn name_for(counter: u32) -> String {
        if counter < 26 {
            format!("_{}", (b'a' + counter as u8) as char)
        } else {
            format!("_{}", counter - 26)
        }
    }
}

impl TmpVarNameCreator for UniqueNameGenerator {
    fn create_tmp_var_name(&mut self) -> String {
        loop {
            let name = Self::name_for(self.counter);
            self.counter += 1;
            if !self.is_reserved(&name) {
                self.generated.insert(name.clone());
                return name;
            }
        }
    }
}

#[cfg(test)]
#[path = "../tests/tmp_names_tests.rs"]
mod tests;
