use proptest::prelude::*;
use sentence_sift::{EditSession, SearchTerms, Segmenter, UnicodeSegmenter, apply_filter};

const WORDS: &[&str] = &[
    "cat", "Dog", "bird", "CATALOG", "runs", "sleeps", "fast", "über", "naïve", "tea",
];

fn sentence() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(WORDS), 1..5).prop_map(|words| {
        let mut text = words.join(" ");
        if let Some(first) = text.get_mut(0..1) {
            first.make_ascii_uppercase();
        }
        text.push('.');
        text
    })
}

fn document() -> impl Strategy<Value = String> {
    prop::collection::vec(sentence(), 0..12).prop_map(|sentences| sentences.join(" "))
}

#[derive(Clone, Debug)]
enum Action {
    Select(usize),
    Next,
    Previous,
    Replace(String),
}

fn action() -> impl Strategy<Value = Action> {
    prop_oneof![
        (0usize..12).prop_map(Action::Select),
        Just(Action::Next),
        Just(Action::Previous),
        sentence().prop_map(Action::Replace),
        Just(Action::Replace(String::new())),
    ]
}

fn char_slice(text: &str, start: usize, end: usize) -> String {
    text.chars().skip(start).take(end - start).collect()
}

proptest! {
    #[test]
    fn filter_keeps_exactly_sentences_with_every_term(
        text in document(),
        query in prop::collection::vec(prop::sample::select(WORDS), 0..3),
    ) {
        let terms = SearchTerms::from_terms(&query);
        let spans = UnicodeSegmenter::default().segment(&text).unwrap();
        let kept = apply_filter(&terms, spans.clone());

        if terms.is_empty() {
            prop_assert!(kept.is_empty());
        } else {
            let expected: Vec<_> = spans
                .into_iter()
                .filter(|span| {
                    let lowered = span.text.to_lowercase();
                    query.iter().all(|term| lowered.contains(&term.to_lowercase()))
                })
                .collect();
            prop_assert_eq!(kept, expected);
        }
    }

    #[test]
    fn offsets_stay_consistent_across_edits(
        text in document(),
        actions in prop::collection::vec(action(), 0..24),
    ) {
        let mut session = EditSession::with_text(&text, Box::new(UnicodeSegmenter::default()));
        session.find_matches("cat").unwrap();

        for action in actions {
            let before: Vec<_> = session.matches().entries().to_vec();
            let cursor = session.cursor();
            match action {
                Action::Select(idx) => { session.select_index(idx); }
                Action::Next => { session.next(); }
                Action::Previous => { session.previous(); }
                Action::Replace(new_text) => {
                    let outcome = session.replace(&new_text).unwrap();
                    if let (Some(outcome), Some(idx)) = (outcome, cursor) {
                        let old = &before[idx];
                        let delta = new_text.chars().count() as isize - old.len() as isize;
                        prop_assert_eq!(outcome.length_delta, delta);

                        let after = session.matches().entries();
                        prop_assert_eq!(&after[..idx], &before[..idx]);
                        let later_after = if outcome.still_matches { &after[idx + 1..] } else { &after[idx..] };
                        for (moved, original) in later_after.iter().zip(&before[idx + 1..]) {
                            prop_assert_eq!(&moved.text, &original.text);
                            prop_assert_eq!(moved.start as isize, original.start as isize + delta);
                            prop_assert_eq!(moved.end as isize, original.end as isize + delta);
                        }
                    }
                }
            }

            let document = session.document_text();
            for entry in session.matches().entries() {
                prop_assert_eq!(char_slice(&document, entry.start, entry.end), entry.text.clone());
                prop_assert!(entry.text.to_lowercase().contains("cat"));
            }
            if let Some(idx) = session.cursor() {
                prop_assert!(idx < session.matches().len());
            } else if cursor.is_some() {
                prop_assert!(session.matches().is_empty());
            }
        }
    }
}
