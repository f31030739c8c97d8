use criterion::{black_box, criterion_group, criterion_main, Criterion};
use postagger::CorpusModel;

const SENTENCES: [&str; 4] = [
    "DT the NN dog VBD barked",
    "DT a JJ big NN cat VBD slept IN on DT the NN mat",
    "PRP it VBD ran RB quickly",
    "NNP Fido VBZ likes NNS bones",
];

/// A tagged corpus of `n` sentences separated by `<s> <s>`.
fn corpus(n: usize) -> String {
    let mut corpus = String::from("<s> <s>");
    for sentence in SENTENCES.iter().cycle().take(n) {
        corpus.push(' ');
        corpus.push_str(sentence);
        corpus.push_str(" <s> <s>\n");
    }
    corpus
}

fn train(corpus: &str) -> CorpusModel {
    CorpusModel::from_reader(corpus.as_bytes()).expect("failed to train")
}

fn train_benchmark(c: &mut Criterion) {
    let corpus = corpus(10_000);
    c.bench_function("train", |b| b.iter(|| train(black_box(&corpus))));
}

criterion_group!(benchmarks, train_benchmark);
criterion_main!(benchmarks);
