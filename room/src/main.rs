//! # Tasks
//! 1. room: owns the game, handles every request in order
//! 2. ticker: only alive while a round is being drawn
//! 3. observer: renders what the room publishes
//! 4. main: reads stdin and forwards requests
use std::path::PathBuf;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

use sketch::consts::*;
use sketch::input::{Command, Input, HELP};
use sketch::logger;
use sketch::observer::{Observer, Render};
use sketch::room::{Config, ConfigError, Interval, Room, RoomReq, Scoring, WordBank};

#[derive(Parser, Debug)]
#[clap(author, version, about = "Pass-the-keyboard draw and guess", long_about = None)]
struct Args {
    /// Seconds per round
    #[clap(short, long, default_value_t = ROUND_SECS)]
    duration: u32,
    #[clap(long, default_value_t = DRAWER_BONUS)]
    drawer_bonus: u32,
    #[clap(long, default_value_t = GUESSER_BONUS)]
    guesser_bonus: u32,
    /// Comma separated names, in seat order
    #[clap(short, long, default_value = DEFAULT_ROSTER)]
    players: String,
    /// Seat that draws first
    #[clap(long, default_value_t = 0)]
    first_drawer: usize,
    /// Comma separated word list, replaces the built-in one
    #[clap(short, long)]
    words: Option<String>,
    /// JSON lexicon file, replaces the built-in list
    #[clap(short, long, parse(from_os_str), conflicts_with = "words")]
    lexicon: Option<PathBuf>,
    /// Fixes the word sequence
    #[clap(long)]
    seed: Option<u64>,
    /// Print snapshots as JSON lines instead of text
    #[clap(long)]
    json: bool,
    #[clap(long, default_value = "info")]
    log_level: tracing::Level,
}

impl Args {
    fn config(&self) -> Result<Config, ConfigError> {
        let word_bank = match (&self.lexicon, &self.words) {
            (Some(path), _) => WordBank::from_file(path, self.seed)?,
            (None, Some(words)) => WordBank::new(words.split(','), self.seed)?,
            (None, None) => WordBank::builtin(self.seed),
        };
        let mut config = Config::new(word_bank);
        config.duration = self.duration;
        config.scoring = Scoring {
            drawer_bonus: self.drawer_bonus,
            guesser_bonus: self.guesser_bonus,
        };
        config.roster = self.players.split(',')
            .map(|name| name.trim().to_string())
            .collect();
        config.first_drawer = self.first_drawer;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init(args.log_level);

    let mut room = Room::new(args.config()?, Interval)?;
    let room_tx = room.get_tx();
    let render = if args.json { Render::Json } else { Render::Text };
    let observer = Observer::new(render, room.subscribe_snapshot(), room.subscribe_events());
    let handle_room = tokio::spawn(async move { room.run().await });

    let input = Input::new()?;
    if !args.json {
        println!("{}", HELP);
    }
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match input.parse(&line) {
            Some(Command::Req(req)) => {
                if room_tx.send(req).await.is_err() {
                    break;
                }
            },
            Some(Command::Help) => println!("{}", HELP),
            Some(Command::Quit) => break,
            None => {},
        }
    }

    info!("leaving");
    let _ = room_tx.send(RoomReq::Shutdown).await;
    drop(room_tx);
    handle_room.await??;
    observer.join().await;
    Ok(())
}
