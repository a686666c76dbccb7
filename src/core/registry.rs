use std::collections::HashMap;
use std::sync::Arc;

use crate::core::domain::Language;
use crate::core::traits::backend::ExecutionBackend;

/// Maps a language tag to its execution backend. A language with no registered
/// backend is the "unsupported" case; new backends plug in without touching
/// the engine.
#[derive(Clone, Debug, Default)]
pub struct BackendRegistry {
    backends: HashMap<Language, Arc<dyn ExecutionBackend>>,
}

impl BackendRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, language: Language, backend: Arc<dyn ExecutionBackend>) {
        self.backends.insert(language, backend);
    }

    pub fn get(&self, language: Language) -> Option<Arc<dyn ExecutionBackend>> {
        self.backends.get(&language).cloned()
    }

    pub fn supports(&self, language: Language) -> bool {
        self.backends.contains_key(&language)
    }
}
