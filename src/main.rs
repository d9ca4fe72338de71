use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(author, version, about = "Play chess in the terminal, or run a perft count")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// log filter used when RUST_LOG is not set (error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// interactive game on stdin (default)
    Play,
    /// count the leaf nodes of the legal move tree from the initial position
    Perft {
        depth: u32,
    },
}

fn main() {
    let cli = Cli::parse();
    let env = env_logger::Env::default().default_filter_or(cli.log_level.as_str());
    env_logger::Builder::from_env(env)
        .target(env_logger::Target::Stderr)
        .init();

    println!("gambit v{}", env!("CARGO_PKG_VERSION"));

    match cli.command.unwrap_or(Command::Play) {
        Command::Perft { depth } => gambit::run_perft(depth),
        Command::Play => gambit::console::Console::default().run(),
    }
}
