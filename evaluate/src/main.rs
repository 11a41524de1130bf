use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use clap::Parser;
use traghetto::{CorpusCounter, Model, Predictor};

#[derive(Parser, Debug)]
#[command(about = "A program to evaluate the accuracy of Traghetto.")]
struct Args {
    /// The labeled corpus to train from
    #[arg(long)]
    train: PathBuf,

    /// The held-out labeled corpus to score against
    #[arg(long)]
    test: PathBuf,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    log::info!("Loading training corpus...");
    let counter = CorpusCounter::from_reader(BufReader::new(File::open(&args.train)?))?;
    let model = Model::new(counter);

    log::info!("Start evaluation");
    let mut predictor = Predictor::new(&model);
    let evaluation = predictor.evaluate(BufReader::new(File::open(&args.test)?))?;

    println!("Words: {}", evaluation.n_words);
    println!("Mismatches: {}", evaluation.n_mismatches);
    println!("Accuracy: {}", evaluation.accuracy());
    println!("Error rate: {}", evaluation.error_rate());

    Ok(())
}
