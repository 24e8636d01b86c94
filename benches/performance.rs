use sentence_sift::{
    EditSession, Segmenter, UnicodeSegmenter,
    render::{self, Highlights},
    theme::Theme,
};
use std::time::{Duration, Instant};

/// Performance benchmarks for sentence-sift
///
/// Run with: cargo test --release --bench performance -- --nocapture
///
/// This measures:
/// - Sentence segmentation
/// - Re-filtering a whole document
/// - Replace-and-reconcile with many downstream matches
/// - Document rendering with highlights
const SMALL_DOC_SENTENCES: usize = 100;
const MEDIUM_DOC_SENTENCES: usize = 1_000;
const LARGE_DOC_SENTENCES: usize = 10_000;

const ITERATIONS: usize = 50;

const SAMPLE_WORDS: &[&str] = &[
    "lorem", "ipsum", "dolor", "sit", "amet", "cat", "consectetur", "adipiscing", "elit", "sed",
    "do", "eiusmod", "tempor", "dog", "incididunt", "labore", "magna", "aliqua", "café", "über",
];

/// Sentences of six words; every third one mentions "cat".
fn create_test_text(num_sentences: usize) -> String {
    let mut text = String::new();
    for i in 0..num_sentences {
        if i > 0 {
            text.push_str(if i % 12 == 0 { "\n\n" } else { " " });
        }
        text.push_str("Sentence");
        for j in 0..6 {
            text.push(' ');
            let word = if i % 3 == 0 && j == 2 {
                "cat"
            } else {
                SAMPLE_WORDS[(i * 7 + j * 3) % SAMPLE_WORDS.len()]
            };
            text.push_str(word);
        }
        text.push('.');
    }
    text
}

struct BenchmarkResult {
    name: String,
    iterations: usize,
    total_duration: Duration,
    avg_duration: Duration,
    min_duration: Duration,
    max_duration: Duration,
}

impl BenchmarkResult {
    fn print(&self) {
        println!("\n{}", "=".repeat(70));
        println!("Benchmark: {}", self.name);
        println!("{}", "=".repeat(70));
        println!("Iterations:     {}", self.iterations);
        println!("Total time:     {:?}", self.total_duration);
        println!("Average:        {:?}", self.avg_duration);
        println!("Min:            {:?}", self.min_duration);
        println!("Max:            {:?}", self.max_duration);

        if self.avg_duration.as_millis() > 100 {
            println!("\nWARNING: Average duration > 100ms (user-perceptible lag)");
        } else if self.avg_duration.as_millis() > 16 {
            println!("\nWARNING: Average duration > 16ms (may drop frames)");
        }
    }
}

fn benchmark<F>(name: &str, iterations: usize, mut f: F) -> BenchmarkResult
where
    F: FnMut(),
{
    let mut durations = Vec::with_capacity(iterations);

    for _ in 0..3 {
        f();
    }

    for _ in 0..iterations {
        let start = Instant::now();
        f();
        durations.push(start.elapsed());
    }

    let total_duration: Duration = durations.iter().sum();
    let avg_duration = total_duration / iterations.max(1) as u32;
    let min_duration = durations.iter().min().copied().unwrap_or_default();
    let max_duration = durations.iter().max().copied().unwrap_or_default();

    BenchmarkResult {
        name: name.to_string(),
        iterations,
        total_duration,
        avg_duration,
        min_duration,
        max_duration,
    }
}

fn sizes() -> Vec<(&'static str, String)> {
    vec![
        ("Small (100 sentences)", create_test_text(SMALL_DOC_SENTENCES)),
        ("Medium (1000 sentences)", create_test_text(MEDIUM_DOC_SENTENCES)),
        ("Large (10000 sentences)", create_test_text(LARGE_DOC_SENTENCES)),
    ]
}

fn iterations_for(name: &str) -> usize {
    if name.starts_with("Large") { 5 } else { ITERATIONS }
}

#[test]
fn bench_segmentation() {
    let segmenter = UnicodeSegmenter::default();
    for (name, text) in sizes() {
        let expected = text.matches("Sentence").count();
        assert_eq!(segmenter.segment(&text).unwrap().len(), expected);

        let result = benchmark(&format!("segment - {name}"), iterations_for(name), || {
            let _ = segmenter.segment(&text);
        });
        result.print();
    }
}

#[test]
fn bench_find_matches() {
    for (name, text) in sizes() {
        let mut session = EditSession::with_text(&text, Box::new(UnicodeSegmenter::default()));
        let result = benchmark(&format!("find_matches - {name}"), iterations_for(name), || {
            let _ = session.find_matches("cat sentence");
        });
        result.print();
        assert!(!session.matches().is_empty());
    }
}

#[test]
fn bench_replace_first_match() {
    for (name, text) in sizes() {
        let mut session = EditSession::with_text(&text, Box::new(UnicodeSegmenter::default()));
        session.find_matches("cat").unwrap();
        session.select_index(0);

        let mut grow = true;
        let result = benchmark(&format!("replace + shift - {name}"), iterations_for(name), || {
            let replacement = if grow {
                "Sentence with a much longer cat in it than before."
            } else {
                "Short cat."
            };
            grow = !grow;
            let _ = session.replace(replacement);
        });
        result.print();

        let document = session.document();
        for entry in session.matches().entries() {
            assert_eq!(document.slice(entry.start..entry.end).as_deref(), Some(entry.text.as_str()));
        }
    }
}

#[test]
fn bench_render_document() {
    let theme = Theme::default();
    for (name, text) in sizes() {
        let mut session = EditSession::with_text(&text, Box::new(UnicodeSegmenter::default()));
        session.find_matches("cat").unwrap();
        session.select_index(session.matches().len() / 2);
        let highlights = Highlights::from_session(&session);

        let result = benchmark(&format!("render_document - {name}"), iterations_for(name), || {
            let _ = render::render_document(&text, &highlights, &theme, 80);
        });
        result.print();
    }
}
