//! Token vocabulary with stable integer ids.

use crate::CoreError;
use std::collections::HashMap;

/// A fixed token→id mapping built once over a corpus vocabulary.
///
/// Ids are dense (`0..len`) and assigned in first-encounter order, so two
/// vocabularies built from the same token sequence are identical. The mapping
/// is injective and never changes after construction; graph builders receive
/// a `Vocabulary` explicitly instead of reading any shared tokenizer state.
///
/// # Example
///
/// ```rust
/// use semnet_core::Vocabulary;
///
/// let vocab = Vocabulary::from_tokens(["wash", "dish", "wash", "bowl"]);
/// assert_eq!(vocab.len(), 3);
/// assert_eq!(vocab.id("dish"), Some(1));
/// assert_eq!(vocab.token(2), Some("bowl"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    token_to_id: HashMap<String, usize>,
    tokens: Vec<String>,
}

impl Vocabulary {
    /// Create an empty vocabulary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a vocabulary from an iterator of tokens.
    ///
    /// Repeated tokens keep their first id.
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut vocab = Self::new();
        for token in tokens {
            vocab.insert(token.into());
        }
        vocab
    }

    /// Insert a token, returning its id (the existing id if already present).
    pub fn insert(&mut self, token: impl Into<String>) -> usize {
        let token = token.into();
        if let Some(&id) = self.token_to_id.get(&token) {
            return id;
        }
        let id = self.tokens.len();
        self.token_to_id.insert(token.clone(), id);
        self.tokens.push(token);
        id
    }

    /// Look up the id of a token.
    pub fn id(&self, token: &str) -> Option<usize> {
        self.token_to_id.get(token).copied()
    }

    /// Look up the id of a token, failing on absent tokens.
    ///
    /// A miss here is a data-contract violation between the corpus and the
    /// query set, so it is reported rather than treated as zero relatedness.
    pub fn require_id(&self, token: &str) -> Result<usize, CoreError> {
        self.id(token).ok_or_else(|| CoreError::UnknownToken {
            token: token.to_string(),
        })
    }

    /// The token carrying the given id.
    pub fn token(&self, id: usize) -> Option<&str> {
        self.tokens.get(id).map(String::as_str)
    }

    /// Number of distinct tokens.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Iterate over (id, token) pairs in id order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> {
        self.tokens.iter().enumerate().map(|(i, t)| (i, t.as_str()))
    }
}
