//! ito bot - main binary
//!
//! Runs the bot against a line-oriented console, or simulates rounds.

use anyhow::Context;
use clap::{Parser, Subcommand};
use ito_bot::{
    bot::{run_console, Bot, Console, ConsoleMessenger, OutputFormat},
    config::BotConfig,
    core::{GuildId, GuildRef},
    simulate::{run_simulation, SimulationConfig, Strategy},
};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "ito-bot")]
#[command(about = "ito - cooperative number card game bot", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Drive the bot from stdin, one `[#channel ]name: command` per line
    Console {
        /// JSON configuration file
        #[arg(long, env = "ITO_CONFIG", value_name = "FILE")]
        config: Option<PathBuf>,

        /// User name allowed to run `quit`
        #[arg(long, env = "ITO_ADMIN")]
        admin: Option<String>,

        /// Bind the game to this channel at startup
        #[arg(long)]
        channel: Option<String>,

        /// Guild (server) name reported for every message
        #[arg(long)]
        guild: Option<String>,

        /// Life for each round (1-3)
        #[arg(long)]
        life: Option<i64>,

        /// Cards per player (1-3)
        #[arg(long)]
        level: Option<i64>,

        /// Discussion theme
        #[arg(long)]
        theme: Option<String>,

        /// Set random seed for reproducible deals
        #[arg(long, env = "ITO_SEED")]
        seed: Option<u64>,

        /// Output format for delivered messages
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Play automated rounds and report how often they clear
    Simulate {
        /// Number of rounds to play
        #[arg(long, short = 'g', default_value_t = 1000)]
        games: usize,

        /// Players per round
        #[arg(long, short = 'p', default_value_t = 4)]
        players: usize,

        /// Cards per player (1-3)
        #[arg(long, default_value_t = 1)]
        level: i64,

        /// Life per round (1-3)
        #[arg(long, default_value_t = 3)]
        life: i64,

        /// How the next player is chosen
        #[arg(long, value_enum, default_value = "random")]
        strategy: Strategy,

        /// Random seed for reproducible runs
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Console {
            config,
            admin,
            channel,
            guild,
            life,
            level,
            theme,
            seed,
            format,
        } => {
            let file = match config {
                Some(path) => BotConfig::load(&path)
                    .with_context(|| format!("loading config from {}", path.display()))?,
                None => BotConfig::default(),
            };
            let flags = BotConfig {
                admin,
                channel,
                guild,
                life,
                level,
                theme,
                seed,
            };
            run_console_mode(file.merge(flags), format).await?
        }
        Commands::Simulate {
            games,
            players,
            level,
            life,
            strategy,
            seed,
        } => {
            let config = SimulationConfig {
                games,
                players,
                level,
                life,
                strategy,
                seed,
            };
            run_simulate_mode(&config)?
        }
    }

    Ok(())
}

async fn run_console_mode(config: BotConfig, format: OutputFormat) -> anyhow::Result<()> {
    let mut engine = config.build_engine().context("invalid game settings")?;
    let mut console = Console::new(GuildRef::new(GuildId::new(1), config.guild_name()), config.channel_name());

    if config.channel.is_some() {
        engine.set_channel(console.default_channel());
        engine.set_guild(console.guild().clone());
    }

    let mut bot = Bot::new(engine);
    if let Some(admin) = &config.admin {
        bot = bot.with_admin(console.user(admin).id);
    }

    log::info!(
        "ito bot ready in #{} ({})",
        config.channel_name(),
        config.guild_name()
    );

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let mut messenger = ConsoleMessenger::new(std::io::stdout().lock(), format);
    let handled = run_console(&bot, &mut console, stdin, &mut messenger).await?;

    log::info!("handled {handled} messages, bye");
    Ok(())
}

fn run_simulate_mode(config: &SimulationConfig) -> anyhow::Result<()> {
    log::info!(
        "simulating {} rounds: {} players, level {}, life {}, {:?} strategy",
        config.games,
        config.players,
        config.level,
        config.life,
        config.strategy
    );

    let start = Instant::now();
    let stats = run_simulation(config).context("simulation failed")?;
    let elapsed = start.elapsed();

    println!("{stats}");
    println!(
        "Elapsed:        {:.2}ms ({:.0} rounds/sec)",
        elapsed.as_secs_f64() * 1000.0,
        stats.games as f64 / elapsed.as_secs_f64().max(f64::EPSILON)
    );
    Ok(())
}
