//! Language-tagged text blocks.
//!
//! Descriptions, decodes, and titles in Define-XML are lists of
//! `TranslatedText` variants. The resolution rules here are the only place the
//! model picks one variant over another.

use serde::{Deserialize, Serialize};

/// One language variant of a text block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslatedText {
    /// Value of `xml:lang`, if present.
    pub lang: Option<String>,
    pub value: String,
}

impl TranslatedText {
    pub fn new(lang: Option<String>, value: impl Into<String>) -> Self {
        Self {
            lang,
            value: value.into(),
        }
    }

    fn matches_lang(&self, lang: &str) -> bool {
        self.lang
            .as_deref()
            .is_some_and(|tag| tag.eq_ignore_ascii_case(lang))
    }
}

/// An ordered list of language-tagged text variants.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MultiLangText(Vec<TranslatedText>);

impl MultiLangText {
    pub fn new(texts: Vec<TranslatedText>) -> Self {
        Self(texts)
    }

    /// Builds a block holding one untagged variant.
    pub fn plain(value: impl Into<String>) -> Self {
        Self(vec![TranslatedText::new(None, value)])
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn variants(&self) -> &[TranslatedText] {
        &self.0
    }

    /// Resolves the block to a single text for display.
    ///
    /// - no variants: `None`
    /// - one variant: that text, whatever its language tag
    /// - several variants: the first whose tag equals `lang` ignoring ASCII
    ///   case, otherwise `None`
    ///
    /// With several variants and no `lang`, nothing is chosen. Callers that need
    /// to notice dropped text should treat `None` on a non-empty block as notable.
    pub fn resolve(&self, lang: Option<&str>) -> Option<&str> {
        match self.0.as_slice() {
            [] => None,
            [only] => Some(only.value.as_str()),
            many => {
                let lang = lang?;
                many.iter()
                    .find(|text| text.matches_lang(lang))
                    .map(|text| text.value.as_str())
            }
        }
    }

    /// Returns the text only when the block holds exactly one variant.
    ///
    /// Used for decodes, where an ambiguous block is never guessed.
    pub fn single(&self) -> Option<&str> {
        match self.0.as_slice() {
            [only] => Some(only.value.as_str()),
            _ => None,
        }
    }
}

impl From<Vec<TranslatedText>> for MultiLangText {
    fn from(texts: Vec<TranslatedText>) -> Self {
        Self(texts)
    }
}

/// A name under which an entity is known in another context (`Alias`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alias {
    pub context: String,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tagged(lang: &str, value: &str) -> TranslatedText {
        TranslatedText::new(Some(lang.to_string()), value)
    }

    #[test]
    fn empty_block_resolves_to_nothing() {
        let text = MultiLangText::default();
        assert_eq!(text.resolve(Some("en")), None);
        assert_eq!(text.resolve(None), None);
    }

    #[test]
    fn single_variant_ignores_language() {
        let text = MultiLangText::new(vec![tagged("fr", "Événements indésirables")]);
        assert_eq!(text.resolve(Some("en")), Some("Événements indésirables"));
        assert_eq!(text.resolve(None), Some("Événements indésirables"));
    }

    #[test]
    fn several_variants_pick_requested_language() {
        let text = MultiLangText::new(vec![
            tagged("en", "Adverse Events"),
            tagged("fr", "Événements indésirables"),
        ]);
        assert_eq!(text.resolve(Some("fr")), Some("Événements indésirables"));
        assert_eq!(text.resolve(Some("EN")), Some("Adverse Events"));
        assert_eq!(text.resolve(Some("de")), None);
        assert_eq!(text.resolve(None), None);
    }

    #[test]
    fn untagged_variants_never_match_a_language() {
        let text = MultiLangText::new(vec![
            TranslatedText::new(None, "first"),
            TranslatedText::new(None, "second"),
        ]);
        assert_eq!(text.resolve(Some("en")), None);
    }

    #[test]
    fn single_requires_exactly_one_variant() {
        assert_eq!(MultiLangText::default().single(), None);
        assert_eq!(MultiLangText::plain("Mild").single(), Some("Mild"));
        let two = MultiLangText::new(vec![tagged("en", "Mild"), tagged("de", "Leicht")]);
        assert_eq!(two.single(), None);
    }
}
