use std::fs::File;
use std::io::{prelude::*, stdin, BufReader};
use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use traghetto::{CorpusCounter, Model, Predictor, BOUNDARY};

#[derive(Parser, Debug)]
#[command(about = "A program to tag words with Traghetto.")]
struct Args {
    /// The labeled corpus to train from before tagging
    #[arg(long)]
    corpus: PathBuf,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    log::info!("Loading training corpus...");
    let counter = CorpusCounter::from_reader(BufReader::new(File::open(&args.corpus)?))?;
    let model = Model::new(counter);
    let mut predictor = Predictor::new(&model);

    log::info!("Start tagging");
    let mut n_words = 0;
    let start = Instant::now();
    for line in stdin().lock().lines() {
        let line = line?;
        predictor.reset();
        let mut prev_word = BOUNDARY.to_string();
        let mut tagged = Vec::new();
        for word in line.split_whitespace() {
            let word = word.to_lowercase();
            let tag = predictor.predict(&word, &prev_word);
            tagged.push(format!("{word}/{tag}"));
            prev_word = word;
            n_words += 1;
        }
        println!("{}", tagged.join(" "));
    }
    let duration = start.elapsed();
    log::info!("Elapsed: {} [sec]", duration.as_secs_f64());
    log::info!(
        "Speed: {} [words/sec]",
        n_words as f64 / duration.as_secs_f64()
    );

    Ok(())
}
