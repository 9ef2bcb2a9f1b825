//! sentiment: learns per-word sentiment from scored movie reviews and scores new ones.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use sentiment::{Corpus, Stopwords, analyze_review, prompt, run_interactive};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "sentiment")]
#[command(version, about = "Scores movie reviews from per-word sentiment", long_about = None)]
struct Cli {
    /// Training reviews, one `<score> <word>...` per line (prompted for when omitted)
    #[arg(value_name = "REVIEWS")]
    reviews: Option<PathBuf>,

    /// Words to ignore, one per line
    #[arg(long, value_name = "PATH", default_value = "stopwords.txt")]
    stopwords: PathBuf,

    /// Print the traversals of the word tree and the per-word table
    #[arg(long)]
    print_trees: bool,

    /// Review to analyze instead of prompting (repeatable)
    #[arg(long = "review", value_name = "TEXT")]
    review: Vec<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let reviews = match cli.reviews {
        Some(path) => path,
        None => prompt(&mut input, &mut out, "Enter filename: ")?
            .map(|line| PathBuf::from(line.trim()))
            .context("no reviews file given")?,
    };

    let mut corpus = Corpus::load(&reviews)
        .with_context(|| format!("failed to load reviews from {}", reviews.display()))?;
    report(&mut out, &corpus, cli.print_trees)?;

    let stopwords = Stopwords::load(&cli.stopwords)
        .with_context(|| format!("failed to load stopwords from {}", cli.stopwords.display()))?;
    corpus.remove_stopwords(&stopwords);
    writeln!(out, "After removing stopwords:")?;
    report(&mut out, &corpus, cli.print_trees)?;

    if cli.review.is_empty() {
        run_interactive(&mut input, &mut out, &corpus, &stopwords)?;
    } else {
        for review in &cli.review {
            writeln!(out)?;
            analyze_review(review, &corpus, &stopwords).write_to(&mut out)?;
        }
    }
    out.flush()?;
    Ok(())
}

fn report(out: &mut impl Write, corpus: &Corpus, print_trees: bool) -> io::Result<()> {
    corpus.write_summary(out)?;
    if print_trees {
        corpus.write_trees(out)?;
    }
    Ok(())
}
