//! The authoritative list of modules and cables.
//!
//! Enumeration is insertion-ordered so rendering is deterministic.

use std::collections::HashMap;

use super::{Cable, Module, ModuleId};

/// In-memory patch graph.
///
/// The store hands out module ids itself, so an id is never reused even
/// after the module that held it is removed.
#[derive(Debug, Default)]
pub struct PatchGraph {
    /// Modules in insertion order.
    modules: Vec<Module>,
    /// Position of each module in `modules`.
    index: HashMap<ModuleId, usize>,
    /// Cables in insertion order.
    cables: Vec<Cable>,
    /// Next id to hand out.
    next_id: u64,
}

impl PatchGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserves a fresh module id.
    pub fn allocate_id(&mut self) -> ModuleId {
        self.next_id += 1;
        ModuleId(self.next_id)
    }

    /// Returns the number of modules.
    pub fn module_count(&self) -> usize {
        self.modules.len()
    }

    /// Returns the number of cables.
    pub fn cable_count(&self) -> usize {
        self.cables.len()
    }

    /// All modules, in insertion order.
    pub fn modules(&self) -> &[Module] {
        &self.modules
    }

    /// Mutable access to all modules, for bulk repositioning.
    pub fn modules_mut(&mut self) -> &mut [Module] {
        &mut self.modules
    }

    /// All cables, in insertion order.
    pub fn cables(&self) -> &[Cable] {
        &self.cables
    }

    // ========================================================================
    // Modules
    // ========================================================================

    /// Adds a module.
    ///
    /// Returns false (and leaves the graph unchanged) if the id is taken.
    pub fn add_module(&mut self, module: Module) -> bool {
        if self.index.contains_key(&module.id) {
            return false;
        }
        self.next_id = self.next_id.max(module.id.0);
        self.index.insert(module.id, self.modules.len());
        self.modules.push(module);
        true
    }

    /// Looks up a module by id.
    pub fn find_module(&self, id: ModuleId) -> Option<&Module> {
        self.index.get(&id).and_then(|&i| self.modules.get(i))
    }

    /// Looks up a module by id for mutation.
    pub fn find_module_mut(&mut self, id: ModuleId) -> Option<&mut Module> {
        let i = *self.index.get(&id)?;
        self.modules.get_mut(i)
    }

    /// Returns true if a module with this id is present.
    pub fn contains_module(&self, id: ModuleId) -> bool {
        self.index.contains_key(&id)
    }

    /// Removes a module together with every cable touching it.
    ///
    /// The removed cables are returned so the caller can clean up the
    /// backend edges and curves they mirror.
    pub fn remove_module(&mut self, id: ModuleId) -> Option<(Module, Vec<Cable>)> {
        let index = self.index.remove(&id)?;
        let module = self.modules.remove(index);
        for (i, later) in self.modules.iter().enumerate().skip(index) {
            self.index.insert(later.id, i);
        }
        let cables = self.remove_cables(|c| c.ends.touches(id));
        Some((module, cables))
    }

    // ========================================================================
    // Cables
    // ========================================================================

    /// Adds a cable.
    ///
    /// Both endpoints must already be in the graph.
    pub fn add_cable(&mut self, cable: Cable) {
        debug_assert!(
            self.contains_module(cable.ends.from) && self.contains_module(cable.ends.to),
            "cable endpoints must exist"
        );
        self.cables.push(cable);
    }

    /// Removes every cable matching the predicate in one pass.
    pub fn remove_cables<F>(&mut self, mut predicate: F) -> Vec<Cable>
    where
        F: FnMut(&Cable) -> bool,
    {
        let mut removed = Vec::new();
        let mut kept = Vec::with_capacity(self.cables.len());
        for cable in self.cables.drain(..) {
            if predicate(&cable) {
                removed.push(cable);
            } else {
                kept.push(cable);
            }
        }
        self.cables = kept;
        removed
    }

    /// Cables plugged into a specific input.
    pub fn incoming(&self, module: ModuleId, port: &str) -> impl Iterator<Item = &Cable> + '_ {
        let port = port.to_owned();
        self.cables
            .iter()
            .filter(move |c| c.ends.terminates_at(module, &port))
    }

    /// Cables with either end on the module.
    pub fn cables_touching(&self, module: ModuleId) -> impl Iterator<Item = &Cable> + '_ {
        self.cables.iter().filter(move |c| c.ends.touches(module))
    }
}
