use std::collections::BTreeMap;
use std::fmt::{self, Display};
use std::iter::zip;

/// Tag-wise performance values.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct TagMeasure {
    /// Number of correct predictions.
    pub num_correct: usize,
    /// Number of occurrences of the tag in the gold-standard data.
    pub num_observation: usize,
    /// Number of predictions.
    pub num_prediction: usize,
    pub precision: f64,
    pub recall: f64,
    /// F1 score.
    pub fmeasure: f64,
}

impl TagMeasure {
    fn update(&mut self) {
        self.precision = 0.0;
        self.recall = 0.0;
        self.fmeasure = 0.0;
        if self.num_prediction > 0 {
            self.precision = self.num_correct as f64 / self.num_prediction as f64;
        }
        if self.num_observation > 0 {
            self.recall = self.num_correct as f64 / self.num_observation as f64;
        }
        if self.precision + self.recall > 0.0 {
            self.fmeasure = self.precision * self.recall * 2.0 / (self.precision + self.recall);
        }
    }
}

/// Overall performance of a tagger against gold-standard sentences.
#[derive(Debug, Default)]
pub struct Evaluation {
    /// Tag-wise evaluations, in tag order.
    tbl: BTreeMap<String, TagMeasure>,

    /// Number of correctly predicted items.
    item_total_correct: usize,
    /// Total number of items.
    item_total_num: usize,
    item_accuracy: f64,

    /// Number of sentences tagged without any error.
    sent_total_correct: usize,
    sent_total_num: usize,
    sent_accuracy: f64,

    macro_precision: f64,
    macro_recall: f64,
    macro_fmeasure: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Estimation {
    pub precision: f64,
    pub recall: f64,
    pub fmeasure: f64,
    pub item_accuracy: f64,
    pub sentence_accuracy: f64,
}

impl Evaluation {
    /// Adds one sentence. Items beyond the shorter of the two sequences count as errors.
    pub fn accumulate<R, P>(&mut self, reference: &[R], prediction: &[P])
    where
        R: AsRef<str>,
        P: AsRef<str>,
    {
        let mut matched = 0;
        for (r, p) in zip(reference, prediction) {
            let (r, p) = (r.as_ref(), p.as_ref());
            self.tbl.entry(r.to_string()).or_default().num_observation += 1;
            self.tbl.entry(p.to_string()).or_default().num_prediction += 1;
            if r == p {
                self.tbl.entry(r.to_string()).or_default().num_correct += 1;
                matched += 1;
            }
        }
        self.item_total_num += reference.len();
        self.item_total_correct += matched;

        if matched == reference.len() && reference.len() == prediction.len() {
            self.sent_total_correct += 1;
        }
        self.sent_total_num += 1;
    }

    pub fn evaluate(&mut self) -> Estimation {
        self.macro_precision = 0.0;
        self.macro_recall = 0.0;
        self.macro_fmeasure = 0.0;
        let mut num_tags = 0;
        for lev in self.tbl.values_mut() {
            lev.update();
            if lev.num_observation == 0 {
                continue;
            }
            num_tags += 1;
            self.macro_precision += lev.precision;
            self.macro_recall += lev.recall;
            self.macro_fmeasure += lev.fmeasure;
        }
        if num_tags > 0 {
            self.macro_precision /= num_tags as f64;
            self.macro_recall /= num_tags as f64;
            self.macro_fmeasure /= num_tags as f64;
        }

        self.item_accuracy = 0.0;
        self.sent_accuracy = 0.0;
        if self.item_total_num > 0 {
            self.item_accuracy = self.item_total_correct as f64 / self.item_total_num as f64;
        }
        if self.sent_total_num > 0 {
            self.sent_accuracy = self.sent_total_correct as f64 / self.sent_total_num as f64;
        }
        Estimation {
            precision: self.macro_precision,
            recall: self.macro_recall,
            fmeasure: self.macro_fmeasure,
            item_accuracy: self.item_accuracy,
            sentence_accuracy: self.sent_accuracy,
        }
    }

    pub fn tag(&self, tag: &str) -> Option<&TagMeasure> {
        self.tbl.get(tag)
    }
}

impl Display for Evaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Performance by tag (#match, #model, #ref) (precision, recall, F1):"
        )?;
        for (tag, lev) in &self.tbl {
            if lev.num_observation == 0 {
                writeln!(
                    f,
                    "    {}: ({}, {}, {}) (******, ******, ******)",
                    tag, lev.num_correct, lev.num_prediction, lev.num_observation
                )?;
            } else {
                writeln!(
                    f,
                    "    {}: ({}, {}, {}) ({:.4}, {:.4}, {:.4})",
                    tag,
                    lev.num_correct,
                    lev.num_prediction,
                    lev.num_observation,
                    lev.precision,
                    lev.recall,
                    lev.fmeasure
                )?;
            }
        }
        writeln!(
            f,
            "Macro-average precision, recall, F1: ({:.6}, {:.6}, {:.6})",
            self.macro_precision, self.macro_recall, self.macro_fmeasure
        )?;
        writeln!(
            f,
            "Item accuracy: {} / {} ({:.4})",
            self.item_total_correct, self.item_total_num, self.item_accuracy
        )?;
        write!(
            f,
            "Sentence accuracy: {} / {} ({:.4})",
            self.sent_total_correct, self.sent_total_num, self.sent_accuracy
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accumulate_and_evaluate() {
        let mut evaluation = Evaluation::default();
        evaluation.accumulate(&["DT", "NN", "VBD"], &["DT", "NN", "VBD"]);
        evaluation.accumulate(&["DT", "NN"], &["DT", "VB"]);
        let est = evaluation.evaluate();

        assert_eq!(evaluation.item_total_correct, 4);
        assert_eq!(evaluation.item_total_num, 5);
        assert!((est.item_accuracy - 0.8).abs() < 1e-12);
        assert!((est.sentence_accuracy - 0.5).abs() < 1e-12);

        let nn = evaluation.tag("NN").unwrap();
        assert_eq!((nn.num_correct, nn.num_prediction, nn.num_observation), (1, 1, 2));
        assert!((nn.recall - 0.5).abs() < 1e-12);
        assert_eq!(nn.precision, 1.0);
        // VB was predicted but never observed, so it is left out of the macro average
        let vb = evaluation.tag("VB").unwrap();
        assert_eq!(vb.num_observation, 0);
        assert!((est.recall - (1.0 + 0.5 + 1.0) / 3.0).abs() < 1e-12);
    }

    #[test]
    fn length_mismatch_counts_as_error() {
        let mut evaluation = Evaluation::default();
        evaluation.accumulate(&["DT", "NN"], &["DT"]);
        let est = evaluation.evaluate();
        assert!((est.item_accuracy - 0.5).abs() < 1e-12);
        assert_eq!(est.sentence_accuracy, 0.0);
    }

    #[test]
    fn evaluate_is_repeatable() {
        let mut evaluation = Evaluation::default();
        evaluation.accumulate(&["A", "B"], &["A", "A"]);
        let first = evaluation.evaluate();
        let second = evaluation.evaluate();
        assert_eq!(first, second);
        let report = evaluation.to_string();
        assert!(report.contains("Item accuracy: 1 / 2 (0.5000)"));
        assert!(report.contains("    B: (0, 0, 1) (0.0000, 0.0000, 0.0000)"));
    }

    #[test]
    fn empty_evaluation() {
        let mut evaluation = Evaluation::default();
        let est = evaluation.evaluate();
        assert_eq!(est.precision, 0.0);
        assert_eq!(est.item_accuracy, 0.0);
    }
}
