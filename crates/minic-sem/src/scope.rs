//! Scope tree for name resolution.
//!
//! Scopes, once created, are never removed — only the "current scope"
//! cursor moves back to a parent on exit. This means the tree built
//! during one analysis pass doubles as the permanent record dumped into
//! the `symbol_table` field of the output bundle at the end: level 0 is
//! the always-present global scope, and every block or function body
//! entered along the way is preserved at its depth, bindings and all.

use indexmap::IndexMap;

use crate::types::Type;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId(u32);

impl ScopeId {
    fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, Copy)]
pub enum ScopeKind {
    Global,
    Function,
    Block,
}

#[derive(Debug)]
pub struct Scope {
    pub bindings: IndexMap<String, Type>,
    pub parent: Option<ScopeId>,
    pub kind: ScopeKind,
}

/// Every scope ever entered, addressed by `ScopeId`. Scopes are appended
/// and never removed — `exit` only moves the `current` cursor back to a
/// parent — so the backing vec doubles as the permanent record dumped
/// into the `symbol_table` field at the end of analysis.
pub struct ScopeTree {
    scopes: Vec<Scope>,
    current: ScopeId,
}

impl ScopeTree {
    pub fn new() -> Self {
        let root = Scope {
            bindings: IndexMap::new(),
            parent: None,
            kind: ScopeKind::Global,
        };
        Self { scopes: vec![root], current: ScopeId(0) }
    }

    fn get(&self, id: ScopeId) -> &Scope {
        &self.scopes[id.index()]
    }

    fn get_mut(&mut self, id: ScopeId) -> &mut Scope {
        &mut self.scopes[id.index()]
    }

    pub fn enter(&mut self, kind: ScopeKind) -> ScopeId {
        let id = ScopeId(self.scopes.len() as u32);
        self.scopes.push(Scope {
            bindings: IndexMap::new(),
            parent: Some(self.current),
            kind,
        });
        self.current = id;
        id
    }

    pub fn exit(&mut self) {
        if let Some(parent) = self.get(self.current).parent {
            self.current = parent;
        }
    }

    /// Defines `name` in the current scope. Returns `false` if `name` is
    /// already bound in this exact scope (a redeclaration).
    pub fn define(&mut self, name: &str, ty: Type) -> bool {
        let scope = self.get_mut(self.current);
        if scope.bindings.contains_key(name) {
            return false;
        }
        scope.bindings.insert(name.to_string(), ty);
        true
    }

    pub fn resolve(&self, name: &str) -> Option<Type> {
        let mut id = self.current;
        loop {
            let scope = self.get(id);
            if let Some(ty) = scope.bindings.get(name) {
                return Some(*ty);
            }
            id = scope.parent?;
        }
    }

    pub fn level_of(&self, id: ScopeId) -> u32 {
        let mut depth = 0;
        let mut cur = id;
        while let Some(parent) = self.get(cur).parent {
            depth += 1;
            cur = parent;
        }
        depth
    }

    pub fn all_scopes(&self) -> impl Iterator<Item = (ScopeId, &Scope)> {
        self.scopes.iter().enumerate().map(|(i, s)| (ScopeId(i as u32), s))
    }
}

impl Default for ScopeTree {
    fn default() -> Self {
        Self::new()
    }
}
