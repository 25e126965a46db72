//! Text normalization for lexical matching and semantic chunking

use regex::Regex;

/// Chunks at or below this many characters are treated as noise.
pub const MIN_CHUNK_CHARS: usize = 5;

pub struct TextNormalizer {
    disallowed_regex: Regex,
    whitespace_regex: Regex,
    sentence_end_regex: Regex,
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextNormalizer {
    pub fn new() -> Self {
        let disallowed_regex = Regex::new(r"[^a-z0-9+\-#/.\s]")
            .expect("Invalid disallowed-character regex");

        let whitespace_regex = Regex::new(r"\s+")
            .expect("Invalid whitespace regex");

        let sentence_end_regex = Regex::new(r"[.!?]\s+")
            .expect("Invalid sentence boundary regex");

        Self {
            disallowed_regex,
            whitespace_regex,
            sentence_end_regex,
        }
    }

    /// Lower-case, replace anything outside `[a-z0-9+-#/. ]` with a space,
    /// collapse whitespace and trim. The result is always ASCII.
    pub fn normalize_lexical(&self, text: &str) -> String {
        let lowered = text.to_lowercase();
        let stripped = self.disallowed_regex.replace_all(&lowered, " ");
        self.collapse_whitespace(&stripped)
    }

    /// Collapse whitespace and trim, preserving case.
    pub fn normalize_semantic(&self, text: &str) -> String {
        self.collapse_whitespace(text)
    }

    /// Split normalized text into sentence-like chunks.
    ///
    /// A boundary is a `.`, `!` or `?` followed by whitespace; the punctuation stays
    /// with the chunk it ends. Chunks of [`MIN_CHUNK_CHARS`] characters or fewer are dropped.
    pub fn chunk(&self, text: &str) -> Vec<String> {
        let mut chunks = Vec::new();
        let mut start = 0;

        for boundary in self.sentence_end_regex.find_iter(text) {
            // punctuation is a single ASCII byte
            self.push_chunk(&mut chunks, &text[start..boundary.start() + 1]);
            start = boundary.end();
        }
        self.push_chunk(&mut chunks, &text[start..]);

        chunks
    }

    /// Normalize for semantic matching and split into chunks.
    pub fn semantic_chunks(&self, text: &str) -> Vec<String> {
        self.chunk(&self.normalize_semantic(text))
    }

    fn push_chunk(&self, chunks: &mut Vec<String>, raw: &str) {
        let chunk = raw.trim();
        if chunk.chars().count() > MIN_CHUNK_CHARS {
            chunks.push(chunk.to_string());
        }
    }

    fn collapse_whitespace(&self, text: &str) -> String {
        self.whitespace_regex.replace_all(text, " ").trim().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lexical_normalization() {
        let normalizer = TextNormalizer::new();
        let text = "  Senior C++ / C# Engineer!\n\tNode.js, CI/CD & AWS (3+ yrs)  ";

        assert_eq!(
            normalizer.normalize_lexical(text),
            "senior c++ / c# engineer node.js ci/cd aws 3+ yrs"
        );
    }

    #[test]
    fn test_lexical_normalization_strips_non_ascii() {
        let normalizer = TextNormalizer::new();
        assert_eq!(normalizer.normalize_lexical("Café — Déploiement"), "caf d ploiement");
        assert_eq!(normalizer.normalize_lexical("   \n\t "), "");
    }

    #[test]
    fn test_semantic_normalization_preserves_case() {
        let normalizer = TextNormalizer::new();
        assert_eq!(
            normalizer.normalize_semantic("Built  APIs\nin   Rust.  "),
            "Built APIs in Rust."
        );
    }

    #[test]
    fn test_chunking_at_sentence_boundaries() {
        let normalizer = TextNormalizer::new();
        let chunks = normalizer.semantic_chunks(
            "We use Kubernetes daily. Must know Terraform! Any Go? Yes. Version 1.2 is fine",
        );

        assert_eq!(
            chunks,
            vec![
                "We use Kubernetes daily.",
                "Must know Terraform!",
                "Any Go?",
                "Version 1.2 is fine",
            ]
        );
    }

    #[test]
    fn test_short_chunks_dropped() {
        let normalizer = TextNormalizer::new();
        // "Hello." is six characters and survives, "Hi." does not
        assert_eq!(normalizer.semantic_chunks("Hi. Hello."), vec!["Hello."]);
        assert!(normalizer.semantic_chunks("   ").is_empty());
        assert!(normalizer.semantic_chunks("Ok!").is_empty());
    }
}
