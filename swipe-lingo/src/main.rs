use std::path::PathBuf;

use clap::Parser;
use config::Config;
use controller::{Controller, Settings};
use dictionary::{Dictionary, WordList, WordSource};

mod audio;
mod config;
mod controller;
mod logging;
mod spring;
mod ui;

/// Swipe through random words and learn what they mean.
#[derive(Debug, Parser)]
#[command(name = "swipe-lingo", version)]
struct Args {
    /// Config file to use instead of the default location
    #[arg(long)]
    config: Option<PathBuf>,
    /// Fetch the next word while the current one is shown
    #[arg(long)]
    prefetch: bool,
    /// Drag distance a release must exceed to dismiss the card
    #[arg(long)]
    threshold: Option<f32>,
    /// Newline separated list of words to draw from
    #[arg(long)]
    word_list: Option<PathBuf>,
    /// Write logs to this file
    #[arg(long, env = "SWIPE_LINGO_LOG")]
    log_file: Option<PathBuf>,
}

impl Args {
    fn apply(&self, config: &mut Config) {
        if self.prefetch {
            config.prefetch = true;
        }
        if let Some(threshold) = self.threshold {
            config.swipe_threshold = threshold;
        }
        if let Some(word_list) = &self.word_list {
            config.word_list = Some(word_list.clone());
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logging::init(args.log_file.as_deref());

    let mut config = match &args.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    args.apply(&mut config);
    config.validate()?;
    tracing::info!(?config, "starting");

    let words: Box<dyn WordSource> = match &config.word_list {
        Some(path) => Box::new(WordList::from_file(path)?),
        None => Box::new(WordList::builtin()),
    };
    let dictionary = Dictionary::builder()
        .base_url(config.api_base_url.clone())
        .timeout(config.request_timeout())
        .build()?;
    let controller = Controller::new(Settings::from(&config), words);

    ui::run(&config, controller, dictionary).await
}
