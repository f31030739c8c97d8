extern crate postagger;

use postagger::{CorpusModel, Error, Trainer};

const CORPUS: &str = "\
<s> <s> DT The NN dog VBD barked <s> <s>
DT the NN cat VBD slept <s> <s>
DT a JJ big NN dog VBD ran <s> <s>
PRP it VBD barked <s> <s>
NNP Fido VBD ran IN to DT the NN park <s> <s>
";

#[test]
fn test_scenario_one() {
    let model = CorpusModel::from_reader("<s> <s> DT The NN dog VBD barked".as_bytes()).unwrap();
    assert_eq!(model.tag_count("DT"), 1);
    assert_eq!(model.tag_count("NN"), 1);
    assert_eq!(model.tag_count("VBD"), 1);
    assert_eq!(model.tag_count("<s>"), 0);
    assert_eq!(model.bigram_count("<s>", "DT"), 1);
    assert_eq!(model.bigram_count("DT", "NN"), 1);
    assert_eq!(model.bigram_count("NN", "VBD"), 1);
    assert_eq!(model.num_bigrams(), 3);
    assert_eq!(model.vocabulary_size(), 3);
    assert!(model.knows("barked"));
    assert!(!model.knows("<s>"));
}

#[test]
fn test_count_invariants() {
    let model = CorpusModel::from_reader(CORPUS.as_bytes()).unwrap();
    let mut num_tokens = 0;
    for tag in model.tags() {
        let words = model.words_for_tag(tag).unwrap();
        assert_eq!(words.values().sum::<u64>(), model.tag_count(tag), "{}", tag);
        num_tokens += model.tag_count(tag);
    }
    // every counted pair contributes one bigram
    assert_eq!(num_tokens, model.num_bigrams());
    let bigrams: u64 = model.bigrams().map(|(_, _, count)| count).sum();
    assert_eq!(bigrams, model.num_bigrams());

    for tag in model.tags() {
        for (word, &count) in model.words_for_tag(tag).unwrap() {
            assert_eq!(model.tags_for_word(word).unwrap()[tag], count);
        }
    }
    assert_eq!(model.most_frequent_tag(), Some("<s>"));
    assert_eq!(model.most_frequent_tag_count(), 5);
    assert_eq!(model.tag_count("VBD"), 5);
}

#[test]
fn test_incremental_training_matches_batch() {
    let mut trainer = Trainer::new();
    let tokens: Vec<&str> = CORPUS.split_whitespace().collect();
    for pair in tokens.chunks(2) {
        trainer.append(pair[0], pair[1]);
    }
    assert_eq!(trainer.len(), tokens.len() / 2);
    let model = trainer.train();
    assert_eq!(model, CorpusModel::from_reader(CORPUS.as_bytes()).unwrap());
}

#[test]
fn test_odd_token_count() {
    let ret = CorpusModel::from_reader("<s> <s> DT The NN".as_bytes());
    match ret {
        Err(Error::OddTokenCount { count, token }) => {
            assert_eq!(count, 5);
            assert_eq!(token, "NN");
        }
        other => panic!("test fail: {:?}", other),
    }
}

#[test]
fn test_empty_corpus() {
    let model = CorpusModel::from_reader("".as_bytes()).unwrap();
    assert!(model.is_empty());
    assert_eq!(model, CorpusModel::default());
    assert_eq!(model.most_frequent_tag(), None);
}
