//! Grammar registry
//!
//! A [`GrammarRegistry`] is populated once at startup and then sealed
//! into a [`SealedRegistry`]. Sealing is one-way: the sealed form has no
//! mutating methods, so concurrent readers never need a lock.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use super::builtin;
use super::grammar::Grammar;
use super::loader;
use crate::error::{HighlightError, Result};

/// Registry under construction
#[derive(Debug, Default)]
pub struct GrammarRegistry {
    /// Grammars in registration order
    grammars: Vec<Grammar>,
    /// Lowercased id or alias -> index in `grammars`
    names: HashMap<String, usize>,
}

impl GrammarRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the built-in grammars
    pub fn with_builtins() -> Result<Self> {
        let mut registry = Self::new();
        for grammar in builtin::all_grammars()? {
            registry.register(grammar)?;
        }
        Ok(registry)
    }

    /// Register a grammar
    ///
    /// Fails if its id or any alias is already taken; an existing grammar
    /// is never replaced.
    pub fn register(&mut self, grammar: Grammar) -> Result<()> {
        let keys = lookup_keys(&grammar);
        self.check_free(&keys, &mut HashSet::new())?;
        self.insert(grammar, keys);
        Ok(())
    }

    /// Fail if any key is taken here or already in `claimed`, then claim them
    fn check_free(&self, keys: &[String], claimed: &mut HashSet<String>) -> Result<()> {
        for key in keys {
            if self.names.contains_key(key) || !claimed.insert(key.clone()) {
                return Err(HighlightError::DuplicateGrammar(key.clone()));
            }
        }
        Ok(())
    }

    fn insert(&mut self, grammar: Grammar, keys: Vec<String>) {
        let index = self.grammars.len();
        for key in keys {
            self.names.insert(key, index);
        }
        debug!(grammar = grammar.id(), index, "registered grammar");
        self.grammars.push(grammar);
    }

    /// Register every `*.toml` grammar file in a directory
    ///
    /// Files are visited in name order so registration order, and with it
    /// tie-breaking during detection, is stable. Returns how many
    /// grammars were added.
    ///
    /// All or nothing: every file is parsed and checked against the
    /// registry and each other first. A bad file, or an id or alias that
    /// clashes, fails the call with nothing registered.
    pub fn load_dir(&mut self, dir: &Path) -> Result<usize> {
        let mut paths: Vec<_> = fs::read_dir(dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.extension().is_some_and(|ext| ext == "toml"))
            .collect();
        paths.sort();

        let mut claimed = HashSet::new();
        let mut pending = Vec::with_capacity(paths.len());
        for path in &paths {
            let grammar = loader::load_file(path)?;
            let keys = lookup_keys(&grammar);
            self.check_free(&keys, &mut claimed)?;
            pending.push((grammar, keys));
        }

        let added = pending.len();
        for (grammar, keys) in pending {
            self.insert(grammar, keys);
        }
        debug!(dir = %dir.display(), added, "loaded grammar directory");
        Ok(added)
    }

    /// Look up a grammar by id or alias (case-insensitive)
    pub fn get(&self, id: &str) -> Result<&Grammar> {
        self.names
            .get(&id.to_lowercase())
            .map(|&i| &self.grammars[i])
            .ok_or_else(|| HighlightError::NotFound(id.to_string()))
    }

    /// Iterate grammars in registration order
    pub fn all(&self) -> impl Iterator<Item = &Grammar> + '_ {
        self.grammars.iter()
    }

    /// Number of registered grammars
    pub fn len(&self) -> usize {
        self.grammars.len()
    }

    /// Whether no grammar is registered
    pub fn is_empty(&self) -> bool {
        self.grammars.is_empty()
    }

    /// Freeze the registry
    pub fn seal(self) -> SealedRegistry {
        debug!(grammars = self.grammars.len(), "sealed grammar registry");
        SealedRegistry {
            inner: Arc::new(self),
        }
    }
}

/// Lowercased id followed by lowercased aliases
fn lookup_keys(grammar: &Grammar) -> Vec<String> {
    let mut keys = vec![grammar.id().to_lowercase()];
    keys.extend(grammar.aliases().iter().map(|a| a.to_lowercase()));
    keys
}

/// Read-only, shareable registry
///
/// Cloning is cheap and every clone sees the same grammars.
#[derive(Debug, Clone)]
pub struct SealedRegistry {
    inner: Arc<GrammarRegistry>,
}

impl SealedRegistry {
    /// Look up a grammar by id or alias (case-insensitive)
    pub fn get(&self, id: &str) -> Result<&Grammar> {
        self.inner.get(id)
    }

    /// Registration index of a grammar id or alias
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.inner.names.get(&id.to_lowercase()).copied()
    }

    /// Iterate grammars in registration order
    pub fn all(&self) -> impl Iterator<Item = &Grammar> + '_ {
        self.inner.all()
    }

    /// Grammar ids in registration order
    pub fn names(&self) -> Vec<&str> {
        self.inner.all().map(Grammar::id).collect()
    }

    /// Number of registered grammars
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Whether no grammar is registered
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
