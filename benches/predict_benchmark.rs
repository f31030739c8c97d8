use criterion::{black_box, criterion_group, criterion_main, Criterion};
use postagger::{CorpusModel, Options, Smoothing, Tagger, Viterbi};

const CORPUS: &str = "\
<s> <s> DT the NN dog VBD barked <s> <s>
DT a JJ big NN cat VBD slept IN on DT the NN mat <s> <s>
PRP it VBD ran RB quickly <s> <s>
NNP Fido VBZ likes NNS bones <s> <s>
";

const TEXT: &str = "the big dog barked <s> Rex likes 42 snacks <s> a frobnicated cat slept on the mat";

fn predict(viterbi: &Viterbi, sentences: &[Vec<&str>]) {
    for words in sentences {
        viterbi.tag(words).expect("failed to tag");
    }
}

fn predict_benchmark(c: &mut Criterion) {
    let model = CorpusModel::from_reader(CORPUS.as_bytes()).expect("failed to train");
    let sentences: Vec<Vec<&str>> = TEXT
        .split("<s>")
        .map(|s| s.split_whitespace().collect())
        .collect();

    for smoothing in [Smoothing::Raw, Smoothing::AddOne, Smoothing::GoodTuring] {
        let options = Options {
            smoothing,
            ..Options::default()
        };
        let viterbi = Viterbi::new(&model, &options).expect("failed to create decoder");
        c.bench_function(&format!("predict/{}", smoothing), |b| {
            b.iter(|| predict(black_box(&viterbi), black_box(&sentences)))
        });
    }
}

criterion_group!(benchmarks, predict_benchmark);
criterion_main!(benchmarks);
