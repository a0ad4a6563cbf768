//! Performance benchmarks for Startup CLI.
//!
//! This module contains benchmarks for:
//! - Markdown section extraction on growing problem documents
//! - Terminal formatting of long LLM responses
//! - Slash command parsing
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use startup_cli::commands::parse_input;
use startup_cli::core::{extract_section, format_llm_response};

// ============================================================================
// Mock Data Fixtures
// ============================================================================

mod fixtures {
    /// A problem document after `analyses` rounds of appended feedback.
    pub fn problem_document(analyses: usize) -> String {
        let mut doc = String::from(
            "# Problem Definition\n\n## Problem Statement\nSmall clinics lose revenue when patients miss appointments.\n\n## Analysis Date\n2025-01-01\n\n---\n\n",
        );
        for i in 0..analyses {
            doc.push_str(&format!(
                "\n## AI Analysis and Feedback\n\n### Round {i}\nThe problem is specific but needs evidence.\n\n- Interview ten clinic managers\n- Measure no-show rates\n\n---\n\n*Analysis generated on 2025-01-01 10:00:00*\n"
            ));
        }
        doc
    }

    /// An LLM response of `paragraphs` long paragraphs with markdown structure.
    pub fn llm_response(paragraphs: usize) -> String {
        let sentence = "Focus on the customers who feel the pain most acutely and talk to them every week. ";
        (0..paragraphs)
            .map(|i| format!("## Step {i}\n\n{}\n\n- action item one\n- action item two\n", sentence.repeat(6)))
            .collect()
    }
}

// ============================================================================
// Extraction Benchmarks
// ============================================================================

fn bench_extract_section(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract/problem_document");

    for analyses in [0, 10, 100, 1000].iter() {
        let doc = fixtures::problem_document(*analyses);

        group.throughput(Throughput::Bytes(doc.len() as u64));
        group.bench_with_input(BenchmarkId::new("first_section", analyses), &doc, |b, doc| {
            b.iter(|| black_box(extract_section(black_box(doc))));
        });
    }

    group.finish();
}

fn bench_extract_late_content(c: &mut Criterion) {
    // Many empty headings before the first content line.
    let doc: String = (0..500).map(|i| format!("## Heading {i}\n\n---\n")).collect::<String>() + "Finally some content\n";

    c.bench_function("extract/late_content", |b| b.iter(|| black_box(extract_section(black_box(&doc)))));
}

// ============================================================================
// Formatting Benchmarks
// ============================================================================

fn bench_format_response(c: &mut Criterion) {
    let mut group = c.benchmark_group("format/llm_response");

    for paragraphs in [1, 10, 50].iter() {
        let response = fixtures::llm_response(*paragraphs);

        group.throughput(Throughput::Bytes(response.len() as u64));
        group.bench_with_input(BenchmarkId::new("wrap", paragraphs), &response, |b, response| {
            b.iter(|| black_box(format_llm_response(black_box(response))));
        });
    }

    group.finish();
}

// ============================================================================
// Input Parsing Benchmarks
// ============================================================================

fn bench_parse_input(c: &mut Criterion) {
    let inputs = ["/build customer-segment", "/problem Clinics lose revenue", "/unknown", "How do I price my product?"];

    c.bench_function("parse/input_mix", |b| {
        b.iter(|| {
            for input in &inputs {
                black_box(parse_input(black_box(input)));
            }
        });
    });
}

criterion_group!(extract_benches, bench_extract_section, bench_extract_late_content,);

criterion_group!(format_benches, bench_format_response,);

criterion_group!(parse_benches, bench_parse_input,);

criterion_main!(extract_benches, format_benches, parse_benches,);
