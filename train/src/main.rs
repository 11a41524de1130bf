use std::fs::File;
use std::io::{prelude::*, BufReader};
use std::path::PathBuf;

use clap::Parser;
use traghetto::{CorpusCounter, Model};

#[derive(Parser, Debug)]
#[command(about = "A program to train taggers of Traghetto.")]
struct Args {
    /// A labeled training corpus (word/tag lines, ###/### boundaries)
    #[arg(long, required = true)]
    corpus: Vec<PathBuf>,

    /// Print the transition probability table as TSV on stdout
    #[arg(long)]
    dump_transitions: bool,

    /// Print the emission probability table as TSV on stdout
    #[arg(long)]
    dump_emissions: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut counter = CorpusCounter::new();
    for path in &args.corpus {
        log::info!("Loading {path:?} ...");
        let f = BufReader::new(File::open(path)?);
        for line in f.lines() {
            counter.push_line(&line?)?;
        }
    }
    log::info!("# of tags: {}", counter.tag_count().len());
    log::info!("# of words: {}", counter.word_to_tag_count().len());

    let model = Model::new(counter);
    log::info!("Finish training.");

    if args.dump_transitions {
        for (prev_tag, row) in model.transition_probabilities() {
            for (tag, prob) in row {
                println!("{prev_tag}\t{tag}\t{prob}");
            }
        }
    }
    if args.dump_emissions {
        for (tag, row) in model.emission_probabilities() {
            for (word, prob) in row {
                println!("{tag}\t{word}\t{prob}");
            }
        }
    }

    Ok(())
}
