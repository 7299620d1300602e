use protocol::{JsonMessage, RoomEvent, RoomSnapshot, Stage, TurnEnd};
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Render {
    Text,
    /// One snapshot per line.
    Json,
}

/// Read-only presentation of the room on stdout.
#[derive(Debug)]
pub struct Observer {
    _handle: JoinHandle<()>,
}

impl Observer {
    pub fn new(render: Render, mut snapshots: watch::Receiver<RoomSnapshot>, mut events: broadcast::Receiver<RoomEvent>) -> Self {
        let _handle = tokio::spawn(async move {
            match render {
                Render::Json => {
                    print_json(&snapshots.borrow_and_update());
                    while snapshots.changed().await.is_ok() {
                        print_json(&snapshots.borrow_and_update());
                    }
                },
                Render::Text => {
                    println!("{}", board(&snapshots.borrow()));
                    loop {
                        match events.recv().await {
                            Ok(event) => {
                                if let Some(line) = describe(&event) {
                                    println!("{}", line);
                                }
                                if shows_board(&event) {
                                    println!("{}", board(&snapshots.borrow()));
                                }
                            },
                            Err(broadcast::error::RecvError::Lagged(n)) => {
                                warn!(skipped = n, "observer fell behind");
                            },
                            Err(broadcast::error::RecvError::Closed) => break,
                        }
                    }
                },
            }
        });

        Self { _handle }
    }

    pub async fn join(self) {
        let _ = self._handle.await;
    }
}

fn print_json(snapshot: &RoomSnapshot) {
    match snapshot.to_json() {
        Ok(line) => println!("{}", line),
        Err(err) => warn!(%err, "snapshot not encodable"),
    }
}

pub fn format_time(secs: u32) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

fn shows_board(event: &RoomEvent) -> bool {
    matches!(event, RoomEvent::TurnStart { .. } | RoomEvent::TurnEnd(_) | RoomEvent::NextTurn { .. })
}

pub fn describe(event: &RoomEvent) -> Option<String> {
    match event {
        RoomEvent::SurfaceCleared => Some("~ canvas cleared ~".to_string()),
        RoomEvent::TurnStart { round, drawer } => Some(format!("round {} begins, seat {} draws", round, drawer)),
        RoomEvent::Topic { topic_word } => Some(format!("(drawer only) the word is: {}", topic_word)),
        RoomEvent::CountDown(rest) => {
            if *rest <= 10 || rest % 10 == 0 {
                Some(format!("{} left", format_time(*rest)))
            } else {
                None
            }
        },
        RoomEvent::Guess(record) => Some(format!(
            "{}: {} {}",
            record.player,
            record.text,
            if record.correct { "✓" } else { "✗" }
        )),
        RoomEvent::TurnEnd(TurnEnd::Guessed { by }) => Some(format!("{} got it!", by)),
        RoomEvent::TurnEnd(TurnEnd::TimesUp) => Some("time's up!".to_string()),
        RoomEvent::NextTurn { round, drawer } => Some(format!("next up: round {}, seat {} draws", round, drawer)),
    }
}

pub fn board(snapshot: &RoomSnapshot) -> String {
    let stage = match snapshot.stage {
        Stage::Waiting => "waiting",
        Stage::Drawing => "drawing",
        Stage::Finished => "finished",
    };
    let mut out = format!(
        "== round {} | {} | {}",
        snapshot.round,
        stage,
        format_time(snapshot.time_remaining)
    );
    if let Some(ref topic) = snapshot.topic {
        out.push_str(&format!(" | word: {}", topic));
    }
    for p in &snapshot.players {
        out.push_str(&format!(
            "\n  [{}] {:<12} {:>4}{}",
            p.idx,
            p.name,
            p.score,
            if p.drawing { "  (drawing)" } else { "" }
        ));
    }
    out
}
