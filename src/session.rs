//! Per-caller sessions over shared documents.
//!
//! A [`Document`] is immutable and shared behind an `Arc`; each caller
//! gets its own [`Session`] owning its own [`Clipboard`], so clips from
//! different callers never land in the same list.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};
use md5::{Digest, Md5};
use serde::{Deserialize, Serialize};

use crate::clipboard::Clipboard;
use crate::model::Document;
use crate::navigator::Navigator;
use crate::render::render_page;

/// Identifier of a loaded document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    /// Wrap an existing identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Derive an identifier from the source bytes, the owner and the load
    /// time (hex MD5).
    pub fn generate(data: &[u8], owner: &CallerId, created_at: DateTime<Utc>) -> Self {
        let mut hasher = Md5::new();
        hasher.update(data);
        hasher.update(owner.as_str().as_bytes());
        hasher.update(created_at.to_rfc3339().as_bytes());
        Self(format!("{:x}", hasher.finalize()))
    }

    /// Derive an identifier stamped with the current time.
    pub fn from_source(data: &[u8], owner: &CallerId) -> Self {
        Self::generate(data, owner, Utc::now())
    }

    /// Get the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of a caller (user, agent run, connection).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CallerId(String);

impl CallerId {
    /// Wrap a caller identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CallerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CallerId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for CallerId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// One caller's view of one document.
#[derive(Debug, Clone)]
pub struct Session {
    document_id: DocumentId,
    document: Arc<Document>,
    caller: CallerId,
    clipboard: Clipboard,
}

impl Session {
    /// Open a session with an empty clipboard.
    pub fn new(document_id: DocumentId, document: Arc<Document>, caller: impl Into<CallerId>) -> Self {
        Self {
            document_id,
            document,
            caller: caller.into(),
            clipboard: Clipboard::new(),
        }
    }

    /// Identifier of the document.
    pub fn document_id(&self) -> &DocumentId {
        &self.document_id
    }

    /// The shared document.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// The caller owning this session.
    pub fn caller(&self) -> &CallerId {
        &self.caller
    }

    /// This session's clipboard.
    pub fn clipboard(&self) -> &Clipboard {
        &self.clipboard
    }

    /// Navigator over the session's document.
    pub fn navigator(&self) -> Navigator<'_> {
        Navigator::new(&self.document)
    }

    /// Render a page without highlights.
    pub fn page(&self, page: u32) -> String {
        render_page(&self.document, page)
    }

    /// See [`Navigator::goto`].
    pub fn goto(&self, page: Option<u32>, line: Option<u32>) -> String {
        self.navigator().goto(page, line).into_text()
    }

    /// See [`Navigator::scroll_up`].
    pub fn scroll_up(&self, n: usize) -> String {
        self.navigator().scroll_up(n)
    }

    /// See [`Navigator::scroll_down`].
    pub fn scroll_down(&self, n: usize) -> String {
        self.navigator().scroll_down(n)
    }

    /// See [`Navigator::search_next_match`].
    pub fn search_next_match(&self, term: &str, ordinal: Option<usize>) -> String {
        self.navigator().search_next_match(term, ordinal).into_text()
    }

    /// See [`Clipboard::clip`].
    pub fn clip(&mut self, start: u32, end: u32) -> String {
        self.clipboard.clip(&self.document, start, end)
    }

    /// See [`Clipboard::use_memory`].
    pub fn use_memory(&self, prompt: &str) -> String {
        self.clipboard.use_memory(prompt)
    }
}

/// Loaded documents, shared between callers.
#[derive(Debug, Default)]
pub struct DocumentRegistry {
    documents: RwLock<HashMap<DocumentId, Arc<Document>>>,
}

impl DocumentRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a document, replacing any document with the same id.
    pub fn insert(&self, id: DocumentId, document: Document) -> Arc<Document> {
        let document = Arc::new(document);
        self.documents
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(id, document.clone());
        document
    }

    /// Get a document by id.
    pub fn get(&self, id: &DocumentId) -> Option<Arc<Document>> {
        self.documents
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(id)
            .cloned()
    }

    /// Remove a document. Open sessions keep their copy of the `Arc`.
    pub fn remove(&self, id: &DocumentId) -> Option<Arc<Document>> {
        self.documents
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .remove(id)
    }

    /// Open a fresh session for a caller.
    pub fn open_session(&self, id: &DocumentId, caller: impl Into<CallerId>) -> Option<Session> {
        let document = self.get(id)?;
        let caller = caller.into();
        log::debug!("Opening session on {} for {}", id, caller);
        Some(Session::new(id.clone(), document, caller))
    }

    /// Number of documents.
    pub fn len(&self) -> usize {
        self.documents
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    /// Check if the registry holds no documents.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> Document {
        Document::build("s.pdf", vec![vec!["Intro", "Scope"], vec!["Findings"]])
    }

    #[test]
    fn test_document_id_generate_is_stable() {
        let owner = CallerId::new("alice");
        let at = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
        let a = DocumentId::generate(b"%PDF-1.7", &owner, at);
        let b = DocumentId::generate(b"%PDF-1.7", &owner, at);
        assert_eq!(a, b);
        assert_eq!(a.as_str().len(), 32);

        let other = DocumentId::generate(b"%PDF-1.7", &CallerId::new("bob"), at);
        assert_ne!(a, other);
    }

    #[test]
    fn test_session_operations() {
        let mut session = Session::new(DocumentId::new("doc"), Arc::new(sample()), "alice");
        assert!(session
            .goto(None, Some(3))
            .contains("|003| <highlight match=\"None\"></highlight> Findings"));
        assert!(session.page(1).contains("|001| Intro"));
        assert_eq!(session.clip(1, 2), "Clipped lines 1 to 2.");
        assert_eq!(session.use_memory("p"), "Intro\nScope");
        assert_eq!(session.caller().as_str(), "alice");
    }

    #[test]
    fn test_sessions_have_separate_clipboards() {
        let registry = DocumentRegistry::new();
        let id = DocumentId::new("doc");
        registry.insert(id.clone(), sample());

        let mut alice = registry.open_session(&id, "alice").unwrap();
        let bob = registry.open_session(&id, "bob").unwrap();

        alice.clip(1, 1);
        assert_eq!(alice.use_memory(""), "Intro");
        assert_eq!(bob.use_memory(""), "No memory clipped.");
    }

    #[test]
    fn test_registry_lookup() {
        let registry = DocumentRegistry::new();
        assert!(registry.is_empty());
        let id = DocumentId::new("doc");
        registry.insert(id.clone(), sample());
        assert_eq!(registry.len(), 1);
        assert!(registry.open_session(&DocumentId::new("missing"), "x").is_none());

        let session = registry.open_session(&id, "x").unwrap();
        registry.remove(&id);
        assert!(registry.get(&id).is_none());
        // The session still holds the document
        assert_eq!(session.document().total_lines(), 3);
    }
}
