use std::{
    error::Error as StdError,
    fs::File,
    io::{self, BufReader, BufWriter, Write},
    path::{Path, PathBuf},
    time::Instant,
};

use clap::{Args, Parser, Subcommand};
use postagger::{
    corpus::{read_tagged_sentences, TaggedPairs},
    CorpusModel, Error, Evaluation, MostFrequentTagger, Options, Smoothing, Tagger, Trainer,
    Viterbi,
};

/// Bigram HMM part-of-speech tagger
#[derive(Debug, Parser)]
#[command(version)]
#[command(propagate_version = true)]
struct Argv {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Train a model from tagged corpora (TAG WORD TAG WORD ...) and write it to MODEL
    Train {
        /// write the model to a file (MODEL); `.json` selects JSON, anything else BSON
        #[arg(short, long, value_name = "MODEL")]
        model: PathBuf,
        #[arg(required = true, value_name = "CORPUS")]
        corpora: Vec<PathBuf>,
    },
    /// Tag raw text read from FILEs, or from STDIN if none are given
    Tag {
        /// read a model from a file (MODEL)
        #[arg(short, long, value_name = "MODEL")]
        model: PathBuf,
        /// train from this corpus and save to MODEL if MODEL does not exist
        #[arg(short, long, value_name = "CORPUS")]
        corpus: Option<PathBuf>,
        /// tag this text instead of reading files
        #[arg(short, long)]
        text: Option<String>,
        #[command(flatten)]
        config: Config,
        files: Vec<PathBuf>,
    },
    /// Report the performance of the model on tagged corpora
    Eval {
        /// read a model from a file (MODEL)
        #[arg(short, long, value_name = "MODEL")]
        model: PathBuf,
        /// evaluate the most-frequent-tag baseline instead of the Viterbi decoder
        #[arg(short, long)]
        baseline: bool,
        #[command(flatten)]
        config: Config,
        #[arg(required = true, value_name = "GOLD")]
        gold: Vec<PathBuf>,
    },
    /// Output the model stored in the file (MODEL) in a plain-text format
    Dump {
        #[arg(short, long, value_name = "MODEL")]
        model: PathBuf,
    },
}

#[derive(Debug, Args)]
struct Config {
    /// read options from a JSON file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// set an option, e.g. -p unknown.plural_prefix=
    #[arg(short = 'p', value_name = "NAME=VALUE")]
    parameters: Vec<String>,
    #[arg(short, long)]
    smoothing: Option<Smoothing>,
}

impl Config {
    fn options(&self) -> Result<Options, Error> {
        let mut options = match &self.config {
            Some(path) => Options::from_path(path)?,
            None => Options::default(),
        };
        for param in &self.parameters {
            options.set_param(param)?;
        }
        if let Some(smoothing) = self.smoothing {
            options.smoothing = smoothing;
        }
        log::info!("options: {:?}", options);
        Ok(options)
    }
}

fn open(path: &Path) -> Result<BufReader<File>, Error> {
    Ok(BufReader::new(File::open(path)?))
}

fn train(corpora: &[PathBuf]) -> Result<CorpusModel, Error> {
    let begin = Instant::now();
    let mut trainer = Trainer::new();
    for path in corpora {
        log::info!("reading {}", path.display());
        trainer.append_pairs(TaggedPairs::from_reader(open(path)?))?;
    }
    let model = trainer.train();
    log::info!("training took {:?}", begin.elapsed());
    Ok(model)
}

fn tag(
    model: &Path,
    corpus: Option<&Path>,
    text: Option<&str>,
    config: &Config,
    files: &[PathBuf],
) -> Result<(), Error> {
    let options = config.options()?;
    let model = CorpusModel::load_or_train(model, corpus)?;
    let viterbi = Viterbi::new(&model, &options)?;
    let begin = Instant::now();
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let mut num_sentences = 0;
    if let Some(text) = text {
        let text = format!("{} {}", options.boundary, text);
        num_sentences += viterbi.tag_stream(text.as_bytes(), &mut out)?;
    } else if files.is_empty() {
        num_sentences += viterbi.tag_stream(io::stdin().lock(), &mut out)?;
    } else {
        for path in files {
            num_sentences += viterbi.tag_stream(open(path)?, &mut out)?;
        }
    }
    out.flush()?;
    log::info!(
        "tagged {} sentences in {:?}",
        num_sentences,
        begin.elapsed()
    );
    Ok(())
}

fn eval(model: &Path, baseline: bool, config: &Config, gold: &[PathBuf]) -> Result<(), Error> {
    let options = config.options()?;
    let model = CorpusModel::from_path(model)?;
    let tagger: Box<dyn Tagger + '_> = if baseline {
        Box::new(MostFrequentTagger::new(&model))
    } else {
        Box::new(Viterbi::new(&model, &options)?)
    };
    let begin = Instant::now();
    let mut evaluation = Evaluation::default();
    for path in gold {
        let pairs = TaggedPairs::from_reader(open(path)?);
        let sentences = read_tagged_sentences(pairs, &options.boundary)?;
        for (i, sentence) in sentences.iter().enumerate() {
            let words: Vec<&str> = sentence.words.iter().map(String::as_str).collect();
            match tagger.tag(&words) {
                Ok(prediction) => evaluation.accumulate(&sentence.tags, &prediction.tags()),
                Err(e) => {
                    log::error!("failed to tag sentence {} of {}: {}", i, path.display(), e);
                    evaluation.accumulate::<_, &str>(&sentence.tags, &[]);
                }
            }
        }
    }
    evaluation.evaluate();
    println!("{}", evaluation);
    println!("Elapsed time: {:?}", begin.elapsed());
    Ok(())
}

fn main() -> Result<(), Box<dyn StdError>> {
    env_logger::init();
    let argv = Argv::parse();
    log::info!("argv: {:?}", argv);
    match argv.command {
        Command::Train { model, corpora } => {
            train(&corpora)?.save(&model)?;
        }
        Command::Tag {
            model,
            corpus,
            text,
            config,
            files,
        } => tag(&model, corpus.as_deref(), text.as_deref(), &config, &files)?,
        Command::Eval {
            model,
            baseline,
            config,
            gold,
        } => eval(&model, baseline, &config, &gold)?,
        Command::Dump { model } => {
            let model = CorpusModel::from_path(&model)?;
            let stdout = io::stdout();
            let mut out = BufWriter::new(stdout.lock());
            model.dump(&mut out)?;
            out.flush()?;
        }
    }
    Ok(())
}
