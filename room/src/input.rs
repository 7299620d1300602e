use regex::Regex;

use crate::room::RoomReq;
use crate::types::PlayerId;

pub const HELP: &str = "\
commands:
  start          begin the round
  next           move to the next drawer
  clear          wipe the canvas
  as <seat> <w>  guess <w> for the player in <seat>
  quit           leave
anything else is a guess for the first player who is not drawing";

#[derive(Debug, PartialEq)]
pub enum Command {
    Req(RoomReq),
    Help,
    Quit,
}

/// Turns stdin lines into room requests.
pub struct Input {
    guess_as: Regex,
}

impl Input {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            guess_as: Regex::new(r"^as\s+(\d+)\s+(.+)$")?,
        })
    }

    pub fn parse(&self, line: &str) -> Option<Command> {
        let line = line.trim();
        let cmd = match line.to_lowercase().as_str() {
            "" => return None,
            "start" | "s" => Command::Req(RoomReq::StartRound),
            "next" | "n" => Command::Req(RoomReq::NextRound),
            "clear" | "c" => Command::Req(RoomReq::ClearSurface),
            "quit" | "q" | "exit" => Command::Quit,
            "help" | "?" => Command::Help,
            _ => {
                if let Some(caps) = self.guess_as.captures(line) {
                    match caps[1].parse::<PlayerId>() {
                        Ok(seat) => Command::Req(RoomReq::Guess {
                            player: Some(seat),
                            text: caps[2].to_string(),
                        }),
                        Err(_) => Command::Help,
                    }
                } else {
                    Command::Req(RoomReq::Guess {
                        player: None,
                        text: line.to_string(),
                    })
                }
            }
        };
        Some(cmd)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords() {
        let input = Input::new().unwrap();
        assert_eq!(input.parse("start"), Some(Command::Req(RoomReq::StartRound)));
        assert_eq!(input.parse(" NEXT "), Some(Command::Req(RoomReq::NextRound)));
        assert_eq!(input.parse("c"), Some(Command::Req(RoomReq::ClearSurface)));
        assert_eq!(input.parse("q"), Some(Command::Quit));
        assert_eq!(input.parse("?"), Some(Command::Help));
        assert_eq!(input.parse("   "), None);
    }

    #[test]
    fn guesses() {
        let input = Input::new().unwrap();
        assert_eq!(
            input.parse("  Cat "),
            Some(Command::Req(RoomReq::Guess { player: None, text: "Cat".into() }))
        );
        assert_eq!(
            input.parse("as 2 big cat"),
            Some(Command::Req(RoomReq::Guess { player: Some(2), text: "big cat".into() }))
        );
        assert_eq!(input.parse("as 999 cat"), Some(Command::Help));
    }
}
