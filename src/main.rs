use std::io::Write;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use console::Emoji;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use podplay::{
    Episode, MediaDirective, PlaybackState, PlayerStore, ReqwestClient, ShellAction, ShellCommand,
    StateObserver, View, format_duration, load_episodes, shell,
};

// Emoji with fallback for terminals without Unicode support
static MICROPHONE: Emoji<'_, '_> = Emoji("🎙️  ", "");
static SEARCH: Emoji<'_, '_> = Emoji("🔍 ", "[~] ");
static HEADPHONES: Emoji<'_, '_> = Emoji("🎧 ", "[i] ");
static PLAYING: Emoji<'_, '_> = Emoji("▶️  ", "> ");
static PAUSED: Emoji<'_, '_> = Emoji("⏸️  ", "|| ");
static SPEAKER: Emoji<'_, '_> = Emoji("🔊 ", "[media] ");
static CROSS: Emoji<'_, '_> = Emoji("✗ ", "x ");

/// Play podcast episodes from an RSS feed or a JSON episode list
#[derive(Parser, Debug)]
#[command(name = "podplay")]
#[command(about = "Play podcast episodes from an RSS feed or a JSON episode list")]
#[command(version)]
struct Args {
    /// RSS feed URL, path to a local RSS file, or path to a .json episode list
    source: String,

    /// Start playing the list at this episode number (1-based)
    #[arg(short, long)]
    start: Option<NonZeroUsize>,

    /// Enable shuffle from the start
    #[arg(long)]
    shuffle: bool,

    /// Enable looping from the start
    #[arg(long = "loop")]
    looping: bool,

    /// Seed for the shuffle order, for reproducible sessions
    #[arg(long)]
    seed: Option<u64>,

    /// Quiet mode - do not print media element directives
    #[arg(short, long)]
    quiet: bool,
}

/// Stand-in for the audio element: prints whatever it is told to do
#[derive(Default)]
struct MediaPrinter {
    last: Mutex<Option<MediaDirective>>,
}

impl StateObserver for MediaPrinter {
    fn state_changed(&self, snapshot: &Arc<PlaybackState>) {
        let directive = snapshot.media_directive();
        let mut last = self.last.lock().unwrap();

        if *last == directive {
            return;
        }

        match &directive {
            Some(d) => {
                let source_changed = last.as_ref().is_none_or(|l| l.source_url != d.source_url);
                if source_changed {
                    println!("{SPEAKER}{} {}", "load".dimmed(), d.source_url.cyan());
                }
                println!(
                    "{SPEAKER}{} loop={}",
                    if d.is_playing { "play" } else { "pause" }.dimmed(),
                    d.is_looping
                );
            }
            None => println!("{SPEAKER}{}", "unload".dimmed()),
        }

        *last = directive;
    }
}

fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

fn truncate_title(title: &str, max_len: usize) -> String {
    if title.chars().count() <= max_len {
        title.to_string()
    } else {
        let kept: String = title.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

/// Row of the loaded list that is playing right now
///
/// When the playlist is the loaded list the position is exact; a single
/// episode started with `play` is matched by value.
fn current_row(episodes: &[Episode], state: &PlaybackState) -> Option<usize> {
    let current = state.current_episode()?;

    if state.episode_list == episodes {
        Some(state.current_episode_index)
    } else {
        episodes.iter().position(|episode| episode == current)
    }
}

fn print_episode_list(episodes: &[Episode], state: &PlaybackState) {
    if episodes.is_empty() {
        println!("{}", "No episodes loaded".dimmed());
        return;
    }

    let current = current_row(episodes, state);

    for (i, episode) in episodes.iter().enumerate() {
        let marker = if current == Some(i) {
            "*".green().bold()
        } else {
            " ".normal()
        };
        println!(
            "{marker} {:>3}. {}  {}  {}",
            (i + 1).to_string().cyan(),
            truncate_title(&episode.title, 50),
            episode.members.dimmed(),
            format_duration(episode.duration).yellow()
        );
    }
}

fn print_player_bar(state: &PlaybackState) {
    let Some(episode) = state.current_episode() else {
        println!("{}", "Select an episode to listen to".dimmed());
        return;
    };

    let icon = if state.is_playing { PLAYING } else { PAUSED };
    let flag = |on: bool, name: &str| {
        if on {
            name.green().bold()
        } else {
            name.dimmed()
        }
    };

    println!(
        "{icon}{} {} [{}/{}]  {}  {}  {}{}",
        episode.title.bold(),
        format!("({})", episode.members).dimmed(),
        (state.current_episode_index + 1).to_string().cyan(),
        state.episode_list.len().to_string().cyan(),
        format_duration(episode.duration).yellow(),
        flag(state.is_looping, "loop"),
        flag(state.is_shuffling, "shuffle"),
        if state.has_previous() || state.has_next() {
            format!(
                "  {}{}",
                if state.has_previous() { "<prev " } else { "" },
                if state.has_next() { "next>" } else { "" }
            )
            .dimmed()
            .to_string()
        } else {
            String::new()
        }
    );
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging();

    println!(
        "\n{}{} {}\n",
        MICROPHONE,
        "podplay".bold().magenta(),
        "- Podcast Player".dimmed()
    );

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {wide_msg}")?);
    spinner.enable_steady_tick(std::time::Duration::from_millis(100));
    spinner.set_message(format!("{SEARCH}Loading {}", args.source.cyan()));

    let client = ReqwestClient::new();
    let loaded = load_episodes(&client, &args.source).await;
    spinner.finish_and_clear();
    let loaded = loaded.with_context(|| format!("Failed to load episodes from {}", args.source))?;

    println!(
        "{HEADPHONES}{} • {} episodes\n",
        loaded.title.bold().green(),
        loaded.episodes.len().to_string().cyan()
    );

    let episodes = loaded.episodes;

    let mut store = match args.seed {
        Some(seed) => PlayerStore::with_seed(seed),
        None => PlayerStore::new(),
    };
    if !args.quiet {
        store.subscribe(Arc::new(MediaPrinter::default()));
    }

    if args.shuffle {
        store.toggle_shuffle();
    }
    if args.looping {
        store.toggle_loop();
    }

    print_episode_list(&episodes, store.state());

    if let Some(number) = args.start {
        let index = number.get() - 1;
        store
            .play_list(episodes.clone(), index)
            .with_context(|| format!("Cannot start at episode {number}"))?;
        print_player_bar(store.state());
    }

    println!("\nType {} for a list of commands.", "help".cyan());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("{} ", ">".magenta().bold());
        std::io::stdout().flush().context("Failed to flush stdout")?;

        let Some(line) = lines.next_line().await.context("Failed to read input")? else {
            break;
        };

        let action = ShellCommand::parse(&line)
            .and_then(|command| command.map(|c| c.resolve(&episodes)).transpose());

        let action = match action {
            Ok(Some(action)) => action,
            Ok(None) => continue,
            Err(e) => {
                println!("{CROSS}{}", e.to_string().red());
                continue;
            }
        };

        match action {
            ShellAction::Player(command) => {
                if let Err(e) = store.dispatch(command) {
                    println!("{CROSS}{}", e.to_string().red());
                    continue;
                }
                print_player_bar(store.state());
            }
            ShellAction::Media(event) => {
                store.handle_media_event(event);
                print_player_bar(store.state());
            }
            ShellAction::Show(View::List) => print_episode_list(&episodes, store.state()),
            ShellAction::Show(View::Status) => print_player_bar(store.state()),
            ShellAction::Show(View::Json) => {
                let json = serde_json::to_string_pretty(store.state())
                    .context("Failed to serialize player state")?;
                println!("{json}");
            }
            ShellAction::Show(View::Help) => println!("{}", shell::HELP),
            ShellAction::Quit => break,
        }
    }

    println!();
    Ok(())
}
