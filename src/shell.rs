// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Line-oriented command language for the terminal player.
//!
//! Episode numbers are 1-based on the command line and 0-based everywhere
//! else.

use crate::error::ShellError;
use crate::player::{Episode, MediaEvent, PlayerCommand};

pub const HELP: &str = "\
Commands:
  play <n>     play episode n on its own
  start <n>    play the whole list starting at episode n (also list-play)
  next, n      next episode (random while shuffling)
  prev, p      previous episode
  toggle, t    play/pause
  pause        pause
  resume       resume
  loop, l      toggle looping
  shuffle, s   toggle shuffling
  ended        report that the current episode finished
  clear        clear the player
  list         show loaded episodes
  status       show the player bar
  json         dump the player state as JSON
  help, h      this help
  quit, q      exit";

/// A parsed line of user input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellCommand {
    PlayEpisode(usize),
    PlayFrom(usize),
    Next,
    Previous,
    TogglePlay,
    Pause,
    Resume,
    ToggleLoop,
    ToggleShuffle,
    Ended,
    Clear,
    List,
    Status,
    Json,
    Help,
    Quit,
}

/// Something the front-end must show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    List,
    Status,
    Json,
    Help,
}

/// What a command resolves to once the loaded episodes are known
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellAction {
    Player(PlayerCommand),
    Media(MediaEvent),
    Show(View),
    Quit,
}

impl ShellCommand {
    /// Parse one input line; blank lines yield `None`
    pub fn parse(line: &str) -> Result<Option<Self>, ShellError> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Ok(None);
        };
        let verb = verb.to_lowercase();

        let command = match verb.as_str() {
            "play" => ShellCommand::PlayEpisode(episode_number(&verb, words.next())?),
            "start" | "list-play" => ShellCommand::PlayFrom(episode_number(&verb, words.next())?),
            "next" | "n" => ShellCommand::Next,
            "prev" | "previous" | "p" => ShellCommand::Previous,
            "toggle" | "t" => ShellCommand::TogglePlay,
            "pause" => ShellCommand::Pause,
            "resume" => ShellCommand::Resume,
            "loop" | "l" => ShellCommand::ToggleLoop,
            "shuffle" | "s" => ShellCommand::ToggleShuffle,
            "ended" => ShellCommand::Ended,
            "clear" => ShellCommand::Clear,
            "list" | "ls" => ShellCommand::List,
            "status" => ShellCommand::Status,
            "json" => ShellCommand::Json,
            "help" | "h" | "?" => ShellCommand::Help,
            "quit" | "q" | "exit" => ShellCommand::Quit,
            other => return Err(ShellError::UnknownCommand(other.to_string())),
        };

        Ok(Some(command))
    }

    /// Turn the command into an action against the loaded episode list
    pub fn resolve(self, library: &[Episode]) -> Result<ShellAction, ShellError> {
        let action = match self {
            ShellCommand::PlayEpisode(index) => {
                let episode = library
                    .get(index)
                    .ok_or(ShellError::NoSuchEpisode {
                        number: index + 1,
                        available: library.len(),
                    })?
                    .clone();
                ShellAction::Player(PlayerCommand::Play(episode))
            }
            ShellCommand::PlayFrom(index) => {
                if index >= library.len() {
                    return Err(ShellError::NoSuchEpisode {
                        number: index + 1,
                        available: library.len(),
                    });
                }
                ShellAction::Player(PlayerCommand::PlayList {
                    list: library.to_vec(),
                    index,
                })
            }
            ShellCommand::Next => ShellAction::Player(PlayerCommand::PlayNext),
            ShellCommand::Previous => ShellAction::Player(PlayerCommand::PlayPrevious),
            ShellCommand::TogglePlay => ShellAction::Player(PlayerCommand::TogglePlay),
            ShellCommand::Pause => ShellAction::Media(MediaEvent::Paused),
            ShellCommand::Resume => ShellAction::Media(MediaEvent::Played),
            ShellCommand::ToggleLoop => ShellAction::Player(PlayerCommand::ToggleLoop),
            ShellCommand::ToggleShuffle => ShellAction::Player(PlayerCommand::ToggleShuffle),
            ShellCommand::Ended => ShellAction::Media(MediaEvent::Ended),
            ShellCommand::Clear => ShellAction::Player(PlayerCommand::ClearPlayerState),
            ShellCommand::List => ShellAction::Show(View::List),
            ShellCommand::Status => ShellAction::Show(View::Status),
            ShellCommand::Json => ShellAction::Show(View::Json),
            ShellCommand::Help => ShellAction::Show(View::Help),
            ShellCommand::Quit => ShellAction::Quit,
        };

        Ok(action)
    }
}

fn episode_number(verb: &str, arg: Option<&str>) -> Result<usize, ShellError> {
    let arg = arg.ok_or_else(|| ShellError::MissingArgument {
        command: verb.to_string(),
    })?;

    match arg.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n - 1),
        _ => Err(ShellError::InvalidEpisodeNumber {
            value: arg.to_string(),
        }),
    }
}
