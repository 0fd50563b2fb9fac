//! Chat command flows through the bot, guards included

use ito_bot::{
    bot::{Bot, Colour, Control, Destination, Invocation, Reply},
    core::{Card, ChannelId, ChannelRef, GuildId, GuildRef, UserHandle, UserId},
    game::GameEngine,
};

fn invocation(user: u64, name: &str, channel: u64) -> Invocation {
    Invocation {
        author: UserHandle::new(UserId::new(user), name),
        channel: ChannelRef::new(ChannelId::new(channel), format!("channel-{channel}")),
        guild: Some(GuildRef::new(GuildId::new(1), "guild")),
    }
}

fn alice() -> Invocation {
    invocation(1, "alice", 10)
}

fn bob() -> Invocation {
    invocation(2, "bob", 10)
}

fn only_embed(reply: &Reply) -> &ito_bot::bot::Embed {
    assert_eq!(reply.deliveries.len(), 1, "expected one delivery: {reply:?}");
    &reply.deliveries[0].embed
}

async fn joined_bot() -> Bot {
    let bot = Bot::new(GameEngine::with_seed(1));
    bot.handle(&alice(), "/entry").await;
    bot.handle(&bob(), "/entry").await;
    bot
}

#[tokio::test]
async fn test_entry_binds_channel_and_lists_players() {
    let bot = Bot::new(GameEngine::new());

    let reply = bot.handle(&alice(), "/entry").await;
    let embed = only_embed(&reply);
    assert_eq!(embed.colour, Colour::DarkBlue);
    assert_eq!(embed.field_value("Players"), Some("alice"));
    assert_eq!(bot.engine().await.channel().map(|c| c.id), Some(ChannelId::new(10)));

    let reply = bot.handle(&alice(), "/entry").await;
    assert_eq!(only_embed(&reply).colour, Colour::Gold);

    // Another channel is turned away
    let reply = bot.handle(&invocation(2, "bob", 99), "/entry").await;
    let embed = only_embed(&reply);
    assert_eq!(embed.field_value("Channel"), Some("channel-10"));
    assert_eq!(bot.engine().await.players().len(), 1);
}

#[tokio::test]
async fn test_start_needs_two_players() {
    let bot = Bot::new(GameEngine::new());
    bot.handle(&alice(), "/entry").await;

    let reply = bot.handle(&alice(), "/start").await;
    assert_eq!(only_embed(&reply).colour, Colour::Gold);
    assert!(!bot.engine().await.is_ongoing());
}

#[tokio::test]
async fn test_start_sends_secret_hands_privately() {
    let bot = joined_bot().await;
    let reply = bot.handle(&alice(), "/start").await;

    let direct: Vec<_> = reply.direct().collect();
    let shared: Vec<_> = reply.shared().collect();
    assert_eq!(direct.len(), 2);
    assert_eq!(shared.len(), 1);

    let engine = bot.engine().await;
    for delivery in direct {
        let Destination::Direct(user) = &delivery.destination else {
            panic!("expected a direct message");
        };
        let hand = engine.player(user.id).unwrap().hand.render_open();
        assert_eq!(
            delivery.embed.field_value("Your cards (keep them secret!)"),
            Some(hand.as_str())
        );
    }

    // The channel only sees masked hands
    let shared = &shared[0].embed;
    assert_eq!(shared.field_value("alice"), Some("?"));
    assert_eq!(shared.field_value("bob"), Some("?"));
    assert_eq!(shared.field_value("Life"), Some("3"));
}

#[tokio::test]
async fn test_put_until_clear_in_order() {
    let bot = joined_bot().await;
    bot.handle(&alice(), "/start").await;

    let (first, second) = {
        let engine = bot.engine().await;
        let low = |id| engine.player(UserId::new(id)).unwrap().hand.lowest_concealed();
        if low(1) < low(2) {
            (alice(), bob())
        } else {
            (bob(), alice())
        }
    };

    let reply = bot.handle(&first, "/put").await;
    let embed = only_embed(&reply);
    assert_eq!(embed.title, "Success");
    assert!(embed.field_value("Played").is_some());

    let reply = bot.handle(&second, "/put").await;
    let embed = only_embed(&reply);
    assert_eq!(embed.title, "Game clear");
    // Open hands are shown once the round is over
    assert!(!embed.fields.iter().any(|f| f.value.contains('?')));
    assert!(!bot.engine().await.is_ongoing());
}

#[tokio::test]
async fn test_put_failure_and_game_over() {
    let bot = Bot::new(GameEngine::new());
    let carol = invocation(3, "carol", 10);
    for who in [alice(), bob(), carol.clone()] {
        bot.handle(&who, "/entry").await;
    }
    bot.handle(&alice(), "/setting life 1").await;
    {
        let mut engine = bot.engine().await;
        let cards = [70, 20, 90].map(|v| Card::new(v).unwrap()).to_vec();
        // alice 90, bob 20, carol 70
        engine.start_with_cards(cards).unwrap();
    }

    let reply = bot.handle(&alice(), "/put").await;
    let embed = only_embed(&reply);
    assert_eq!(embed.title, "Game over");
    assert_eq!(embed.colour, Colour::Magenta);
    assert_eq!(embed.field_value("Life"), Some("0"));
    assert_eq!(embed.field_value("Forced out"), Some("bob: 20\ncarol: 70"));
    assert_eq!(bot.engine().await.life(), 1);
}

#[tokio::test]
async fn test_guards_follow_phase() {
    let bot = joined_bot().await;

    let reply = bot.handle(&alice(), "/put").await;
    assert!(only_embed(&reply).description.contains("not started"));

    bot.handle(&alice(), "/start").await;
    for command in ["/entry", "/exit", "/setting life 2", "/setting theme x", "/start"] {
        let reply = bot.handle(&alice(), command).await;
        assert!(
            only_embed(&reply).description.contains("already running"),
            "{command} should be rejected mid-round"
        );
    }

    let stranger = invocation(5, "eve", 10);
    let reply = bot.handle(&stranger, "/put").await;
    let embed = only_embed(&reply);
    assert_eq!(embed.field_value("Players"), Some("alice\nbob"));

    let reply = bot.handle(&bob(), "/stop").await;
    assert_eq!(only_embed(&reply).title, "Stop command");
    let engine = bot.engine().await;
    assert!(!engine.is_ongoing());
    assert_eq!(engine.players().len(), 2);
}

#[tokio::test]
async fn test_settings() {
    let bot = joined_bot().await;

    let reply = bot.handle(&alice(), "/setting life 5").await;
    assert_eq!(only_embed(&reply).colour, Colour::Gold);

    bot.handle(&alice(), "/setting life 2").await;
    bot.handle(&alice(), "/setting level 3").await;
    let reply = bot.handle(&bob(), "/setting theme Animals you could beat in a fight").await;
    assert_eq!(
        only_embed(&reply).field_value("Theme"),
        Some("Animals you could beat in a fight")
    );

    let engine = bot.engine().await;
    assert_eq!(engine.life(), 2);
    assert_eq!(engine.level(), 3);

    drop(engine);
    let reply = bot.handle(&alice(), "/setting").await;
    assert!(only_embed(&reply).description.contains("`put`"));
}

#[tokio::test]
async fn test_setting_channel_moves_the_game() {
    let bot = joined_bot().await;
    let elsewhere = invocation(1, "alice", 20);

    bot.handle(&elsewhere, "/setting channel").await;
    assert_eq!(bot.engine().await.channel().map(|c| c.id), Some(ChannelId::new(20)));

    let reply = bot.handle(&bob(), "/start").await;
    assert!(only_embed(&reply).description.contains("another channel"));
}

#[tokio::test]
async fn test_quit_is_admin_only() {
    let bot = Bot::new(GameEngine::new()).with_admin(UserId::new(1));

    let reply = bot.handle(&bob(), "/quit").await;
    assert_eq!(reply.control, Control::Continue);

    let reply = bot.handle(&alice(), "/quit").await;
    assert_eq!(reply.control, Control::Shutdown);
}

#[tokio::test]
async fn test_unknown_command() {
    let bot = Bot::new(GameEngine::new());
    let reply = bot.handle(&alice(), "/dance").await;
    assert_eq!(only_embed(&reply).title, "Unknown command");

    let reply = bot.handle(&alice(), "/neko").await;
    assert_eq!(only_embed(&reply).description, "Meow");
}
