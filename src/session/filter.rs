use crate::segment::SentenceSpan;

/// Lowercased AND-search terms, de-duplicated in first-seen order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchTerms {
    terms: Vec<String>,
}

impl SearchTerms {
    pub fn parse(query: &str) -> Self {
        Self::from_terms(query.split_whitespace())
    }

    pub fn from_terms<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut unique: Vec<String> = Vec::new();
        for term in terms {
            let term = term.as_ref().trim().to_lowercase();
            if !term.is_empty() && !unique.contains(&term) {
                unique.push(term);
            }
        }
        Self { terms: unique }
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.terms
    }

    /// True when every term occurs in `text`, ignoring case.
    pub fn matches(&self, text: &str) -> bool {
        let lowered = text.to_lowercase();
        self.terms.iter().all(|term| lowered.contains(term.as_str()))
    }
}

/// Keeps the spans that contain every term, in their original order.
///
/// No terms means no matches, never "everything".
pub fn apply_filter<I>(terms: &SearchTerms, spans: I) -> Vec<SentenceSpan>
where
    I: IntoIterator<Item = SentenceSpan>,
{
    if terms.is_empty() {
        return Vec::new();
    }
    spans
        .into_iter()
        .filter(|span| terms.matches(&span.text))
        .collect()
}
