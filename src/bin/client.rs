use clap::Parser;
use colored::{ColoredString, Colorize};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::warn;

use uno_net::client::{ClientMirror, ClientStage, Connection};
use uno_net::config::{ClientConfig, DEFAULT_PORT};
use uno_net::error::MirrorError;
use uno_net::game::{Card, Color, PlayerRecord};
use uno_net::protocol::Message;
use uno_net::telemetry::init_tracing;

#[derive(Parser)]
#[command(name = "uno-client")]
#[command(about = "Console client for an UNO table server")]
struct Args {
    /// Server host
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Server port
    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Name shown to the other players
    #[arg(short, long, default_value = "player")]
    name: String,
}

enum Command {
    Start,
    Play(usize, Option<Color>),
    Draw,
    Quit,
}

fn parse_command(line: &str) -> Option<Command> {
    let mut words = line.split_whitespace();
    match words.next()? {
        "start" | "s" => Some(Command::Start),
        "draw" | "d" => Some(Command::Draw),
        "quit" | "q" => Some(Command::Quit),
        "play" | "p" => {
            let index = words.next()?.parse().ok()?;
            let color = match words.next() {
                Some(word) => Some(parse_color(word)?),
                None => None,
            };
            Some(Command::Play(index, color))
        }
        _ => None,
    }
}

fn parse_color(word: &str) -> Option<Color> {
    match word.to_ascii_lowercase().as_str() {
        "r" | "red" => Some(Color::RED),
        "y" | "yellow" => Some(Color::YELLOW),
        "b" | "blue" => Some(Color::BLUE),
        "g" | "green" => Some(Color::GREEN),
        _ => None,
    }
}

fn paint(card: &Card) -> ColoredString {
    let text = card.to_string();
    match card.color() {
        Color::RED => text.red(),
        Color::YELLOW => text.yellow(),
        Color::BLUE => text.blue(),
        Color::GREEN => text.green(),
        Color::WILD => text.bold(),
    }
}

fn render(mirror: &ClientMirror) {
    let turn = mirror.turn();
    println!("------------------------------------");
    if let Some(top) = mirror.top_card() {
        println!("Top card: {}", paint(&top));
    }
    if turn.pending_draw() > 0 {
        println!("Pending draw: {}", turn.pending_draw().to_string().red());
    }
    for (seat, p) in turn.players().iter().enumerate() {
        let marker = if seat == turn.current_player() { ">" } else { " " };
        let uno = if p.is_uno() { " UNO!" } else { "" };
        println!("{} {:<16} {:>3} cards{}", marker, p.name(), p.hand_size(), uno);
    }
    let playable = mirror.playable_cards();
    for (idx, card) in mirror.hand().cards().iter().enumerate() {
        let hint = if playable.contains(&idx) { "*" } else { " " };
        println!("{:>3}{} {}", idx, hint, paint(card));
    }
    match mirror.stage() {
        ClientStage::Active => println!("{}", "Your turn: play <index> [color] | draw".green()),
        ClientStage::Idle => println!("Waiting for seat {}", turn.current_player()),
        _ => {}
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing("warn");
    let args = Args::parse();
    let config = ClientConfig {
        host: args.host,
        port: args.port,
        name: args.name,
    };

    let mut conn = Connection::connect(config.address()).await?;
    let mut mirror = ClientMirror::new(&config.name);
    conn.send(mirror.connected()).await?;
    println!("Connected to {} as {}. Type `start` when ready.", config.address(), config.name);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            incoming = conn.recv() => {
                let Some(incoming) = incoming else {
                    println!("{}", "Server closed the connection".red());
                    break;
                };
                let msg = match incoming {
                    Ok(msg) => msg,
                    Err(e) => {
                        warn!(error = %e, "undecodable message from server");
                        continue;
                    }
                };
                let ended = msg == Message::EndGame;
                match mirror.apply(msg) {
                    Ok(()) if ended => println!("{}", "Round over. Type `start` to play again.".yellow()),
                    Ok(()) => render(&mirror),
                    Err(MirrorError::Rejected) => println!("{}", "Request rejected".red()),
                    Err(e) => println!("{} {}", "Out of sync:".red(), e),
                }
            }
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                let request = match parse_command(&line) {
                    Some(Command::Quit) => break,
                    Some(Command::Start) => mirror.start(),
                    Some(Command::Draw) => mirror.draw(),
                    Some(Command::Play(index, color)) => match mirror.play(index, color) {
                        Some(msg) => msg,
                        None => {
                            println!("No card at {} (wilds need a color: r/y/b/g)", index);
                            continue;
                        }
                    },
                    None => {
                        println!("Commands: start | play <index> [color] | draw | quit");
                        continue;
                    }
                };
                conn.send(request).await?;
            }
        }
    }
    Ok(())
}
