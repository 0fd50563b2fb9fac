//! Command handlers
//!
//! Guards have already passed when these run. Engine errors bubble up and
//! are rendered as informational messages by the caller.

use crate::bot::render::{command_title, Colour, Delivery, Embed, HandView};
use crate::bot::{Command, Control, Invocation, Reply, Setting};
use crate::core::{PlayerName, UserId};
use crate::game::{GameEngine, Outcome, PlayReport, TableView, MIN_PLAYERS};
use crate::{ItoError, Result};

pub(super) fn run(engine: &mut GameEngine, invocation: &Invocation, command: Command) -> Result<Reply> {
    match command {
        Command::Entry => entry(engine, invocation),
        Command::Exit => exit(engine, invocation),
        Command::Start => start(engine, invocation),
        Command::Stop => stop(engine, invocation),
        Command::Put => put(engine, invocation),
        Command::Setting { setting: None } => Ok(Reply::to_channel(invocation, settings_help())),
        Command::Setting { setting: Some(setting) } => setting_command(engine, invocation, setting),
        Command::Neko => Ok(Reply::to_channel(
            invocation,
            Embed::new("Neko", "Meow", Colour::DarkBlue),
        )),
        Command::Quit => {
            log::info!("shutdown requested by {}", invocation.author);
            let mut reply = Reply::to_channel(
                invocation,
                Embed::new("Quit command", "Shutting down. Bye!", Colour::DarkBlue),
            );
            reply.control = Control::Shutdown;
            Ok(reply)
        }
    }
}

fn roster(engine: &GameEngine) -> Vec<PlayerName> {
    engine.player_names().into_iter().cloned().collect()
}

fn entry(engine: &mut GameEngine, invocation: &Invocation) -> Result<Reply> {
    let embed = match engine.register_player(invocation.author.clone()) {
        Ok(()) => {
            log::info!("{} joined", invocation.author);
            Embed::new("Entry command", "A new player joined!", Colour::DarkBlue)
        }
        Err(ItoError::AlreadyRegistered(_)) => {
            log::debug!("{} is already registered", invocation.author);
            Embed::new("Entry command", "You are already registered", Colour::Gold)
        }
        Err(err) => return Err(err),
    };
    Ok(Reply::to_channel(invocation, embed.roster(&roster(engine))))
}

fn exit(engine: &mut GameEngine, invocation: &Invocation) -> Result<Reply> {
    engine.remove_player(invocation.author.id)?;
    log::info!("{} left", invocation.author);
    let embed = Embed::new("Exit command", "A player left", Colour::DarkBlue).roster(&roster(engine));
    Ok(Reply::to_channel(invocation, embed))
}

/// Channel, life, level and theme, shared by the start messages
fn game_info(embed: Embed, engine: &GameEngine, table: &TableView) -> Embed {
    let channel = engine.channel().map(|c| c.name.as_str()).unwrap_or("-");
    embed
        .field("Channel", channel, false)
        .life_and_level(table)
        .theme(&table.theme)
}

fn start(engine: &mut GameEngine, invocation: &Invocation) -> Result<Reply> {
    if engine.players().len() < MIN_PLAYERS {
        let embed = Embed::new(
            "Start command",
            format!("Play with {MIN_PLAYERS} or more players!"),
            Colour::Gold,
        )
        .roster(&roster(engine));
        return Ok(Reply::to_channel(invocation, embed));
    }

    engine.deal_and_start()?;
    log::info!(
        "round started: {} players, level {}, life {}",
        engine.players().len(),
        engine.level(),
        engine.life()
    );

    let table = engine.table();
    let mut deliveries = Vec::with_capacity(table.seats.len() + 1);
    for (player, seat) in engine.players().iter().zip(&table.seats) {
        log::debug!("dealt {}: {}", player.name(), seat.open);
        let dm = game_info(Embed::new("Game start!!!", "Game info", Colour::DarkBlue), engine, &table)
            .field("Your cards (keep them secret!)", seat.open.as_str(), false);
        deliveries.push(Delivery::direct(&player.user, dm));
    }

    let shared = game_info(Embed::new("Game start!!!", "Game info", Colour::DarkBlue), engine, &table)
        .seats(&table, HandView::Closed);
    deliveries.push(Delivery::channel(&invocation.channel, shared));

    Ok(Reply {
        deliveries,
        control: Control::Continue,
    })
}

fn stop(engine: &mut GameEngine, invocation: &Invocation) -> Result<Reply> {
    engine.reset_round();
    log::info!("round stopped by {}", invocation.author);
    Ok(Reply::to_channel(
        invocation,
        Embed::new("Stop command", "The game was stopped", Colour::DarkBlue),
    ))
}

fn put(engine: &mut GameEngine, invocation: &Invocation) -> Result<Reply> {
    let report = engine.play_from(invocation.author.id)?;
    let embed = play_embed(engine, &report);
    Ok(Reply::to_channel(invocation, embed))
}

fn name_of(engine: &GameEngine, table: &TableView, id: UserId) -> String {
    table
        .seat(id)
        .map(|seat| seat.name.to_string())
        .or_else(|| engine.player(id).ok().map(|p| p.name().to_string()))
        .unwrap_or_else(|| id.to_string())
}

fn play_embed(engine: &GameEngine, report: &PlayReport) -> Embed {
    let table = &report.table;
    let player = name_of(engine, table, report.player);
    let played = report
        .card
        .map(|card| format!("{player} played {card}"))
        .unwrap_or_default();
    let forced = report
        .penalties
        .iter()
        .map(|p| format!("{}: {}", name_of(engine, table, p.player), p.card))
        .collect::<Vec<_>>()
        .join("\n");

    let embed = match report.outcome {
        Outcome::NoCard => {
            return Embed::new("Put command", "You have no cards left", Colour::Gold)
                .life_and_level(table)
                .theme(&table.theme)
                .seats(table, HandView::Closed);
        }
        Outcome::GameOver => {
            log::info!("game over");
            Embed::new(
                "Game over",
                "A smaller card was still in someone's hand.\nNo life left. The game is over.",
                Colour::Magenta,
            )
            .life_and_level(table)
            .seats(table, HandView::Open)
        }
        Outcome::GameClear => {
            log::info!("game clear with {} life left", table.life);
            Embed::new("Game clear", "Every card is on the table. Well done!", Colour::Green)
                .life_and_level(table)
                .seats(table, HandView::Open)
        }
        Outcome::Failure => {
            log::debug!("failure: {} card(s) forced out", report.penalty_count());
            Embed::new(
                "Failure",
                "A smaller card was still in someone's hand.\nOne life is lost for each card forced out.\nPlay the next smallest card.",
                Colour::Gold,
            )
            .life_and_level(table)
            .theme(&table.theme)
            .seats(table, HandView::Closed)
        }
        Outcome::Success => {
            log::debug!("success");
            Embed::new("Success", "Nice! Play the next smallest card.", Colour::Green)
                .life_and_level(table)
                .theme(&table.theme)
                .seats(table, HandView::Closed)
        }
    };

    let embed = embed.field("Played", played, false);
    if forced.is_empty() {
        embed
    } else {
        embed.field("Forced out", forced, false)
    }
}

fn settings_help() -> Embed {
    let description = Command::catalogue()
        .into_iter()
        .map(|(name, about)| format!("`{name}` : {about}"))
        .collect::<Vec<_>>()
        .join("\n");
    Embed::new("Settings", description, Colour::DarkBlue)
}

fn setting_command(engine: &mut GameEngine, invocation: &Invocation, setting: Setting) -> Result<Reply> {
    let embed = match setting {
        Setting::Theme { words } => {
            engine.set_theme(words.join(" "))?;
            log::info!("theme set to {:?}", engine.theme());
            Embed::new("Set theme command", "Theme updated", Colour::DarkBlue).theme(engine.theme())
        }
        Setting::Life { value } => {
            engine.set_life(value)?;
            Embed::new("Set life command", format!("Life set to {value}"), Colour::DarkBlue)
        }
        Setting::Level { value } => {
            engine.set_level(value)?;
            Embed::new("Set level command", format!("Level set to {value}"), Colour::DarkBlue)
        }
        Setting::Channel => {
            if let Some(guild) = &invocation.guild {
                engine.set_guild(guild.clone());
            }
            engine.set_channel(invocation.channel.clone());
            log::info!("channel set to #{}", invocation.channel.name);
            Embed::new(
                command_title("setting channel"),
                "The game will be played here",
                Colour::DarkBlue,
            )
            .field("Channel", invocation.channel.name.as_str(), false)
        }
    };
    Ok(Reply::to_channel(invocation, embed))
}
