use criterion::{criterion_group, criterion_main, Criterion};
use yaml_atom_engine::node::{Document, NodeId};
use yaml_atom_engine::{Atom, Chomping, Emitter, EmitterConfig, MappingStyle, ScalarStyle};

/// A double-quoted scalar with enough escapes and wide characters to push
/// every branch of the decode loop, repeated until it's a few hundred KB —
/// stands in for the teacher's `VERY_LARGE_YAML` fixture, which this crate
/// has no parser to read in the first place.
fn large_double_quoted_source() -> String {
    let line = "caf\\u00e9 says \\\"hi\\\"\\tthen a tab and a \\n newline, plus plain runs ";
    line.repeat(4000)
}

fn large_plain_source() -> String {
    "the quick brown fox jumps over the lazy dog ".repeat(4000)
}

fn atom_decode(c: &mut Criterion) {
    let quoted = large_double_quoted_source();
    let plain = large_plain_source();

    c.bench_function("atom decode double-quoted large", |b| {
        b.iter(|| {
            let atom = Atom::from_double_quoted(&quoted);
            drain(atom.iter())
        });
    });

    c.bench_function("atom decode plain large", |b| {
        b.iter(|| {
            let atom = Atom::from_plain(&plain);
            drain(atom.iter())
        });
    });
}

/// Pull every chunk to exhaustion, the way a real consumer would.
fn drain(mut iter: yaml_atom_engine::AtomIter<'_>) -> usize {
    let mut total = 0usize;
    while let Some(chunk) = iter.next_chunk().unwrap() {
        total += chunk.len();
    }
    total
}

/// A document with a thousand-entry block mapping of plain scalars, keyed
/// in descending order, wide enough to exercise indentation, width
/// wrapping, and (with `sort_keys`) the tree walker's key-sort pass.
fn build_large_mapping() -> Document {
    let mut doc = Document::new(None, Vec::new(), true, true);
    let map = doc.add_mapping(None, MappingStyle::Block);
    for i in 0..1000 {
        let key = format!("key-{:04}", 999 - i);
        let k: NodeId = doc.add_scalar(None, key, ScalarStyle::Plain);
        let v: NodeId = doc.add_scalar(None, format!("value number {i} with some extra text padding"), ScalarStyle::Plain);
        doc.append_mapping_pair(map, k, v);
    }
    doc
}

fn emitter_dump(c: &mut Criterion) {
    let doc = build_large_mapping();

    c.bench_function("emitter dump large block mapping", |b| {
        b.iter(|| {
            let mut buf = Vec::with_capacity(64 * 1024);
            let mut emitter = Emitter::new(&mut buf, EmitterConfig::default());
            emitter.emit_document(&doc).unwrap();
            buf.len()
        });
    });

    c.bench_function("emitter dump large block mapping sorted", |b| {
        b.iter(|| {
            let mut buf = Vec::with_capacity(64 * 1024);
            let mut config = EmitterConfig::default();
            config.sort_keys = true;
            let mut emitter = Emitter::new(&mut buf, config);
            emitter.emit_document(&doc).unwrap();
            buf.len()
        });
    });
}

fn atom_literal_block(c: &mut Criterion) {
    let body = "    indented line of block content here\n".repeat(2000);

    c.bench_function("atom decode literal block large", |b| {
        b.iter(|| {
            let atom = Atom::from_literal(&body, Chomping::Clip, 4);
            drain(atom.iter())
        });
    });
}

criterion_group!(benches, atom_decode, emitter_dump, atom_literal_block);
criterion_main!(benches);
