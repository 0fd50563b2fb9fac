//! Preconditions run before a command reaches the engine

use crate::bot::Invocation;
use crate::core::{ChannelRef, PlayerName, UserId};
use crate::game::GameEngine;

/// A single precondition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guard {
    /// Bind the game to the invoking channel if nothing is bound yet
    BindChannel,
    /// Only in the bound channel
    InChannel,
    /// Only between rounds
    OffGame,
    /// Only during a round
    InGame,
    /// Only for registered players
    Registered,
    /// Only for the configured admin
    Admin,
}

/// Why a guard stopped a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    WrongChannel { bound: ChannelRef },
    NotStarted,
    AlreadyStarted,
    NotRegistered { roster: Vec<PlayerName> },
    NotAdmin,
}

impl Guard {
    /// Check this guard; `BindChannel` may bind the engine as a side effect
    pub fn check(
        self,
        engine: &mut GameEngine,
        invocation: &Invocation,
        admin: Option<UserId>,
    ) -> Result<(), Rejection> {
        match self {
            Guard::BindChannel => {
                if engine.channel().is_none() {
                    log::debug!(
                        "{} bound the game to #{}",
                        invocation.author,
                        invocation.channel.name
                    );
                    engine.set_channel(invocation.channel.clone());
                    if let Some(guild) = &invocation.guild {
                        engine.set_guild(guild.clone());
                    }
                }
                Ok(())
            }
            Guard::InChannel => match engine.channel() {
                Some(bound) if bound.id != invocation.channel.id => Err(Rejection::WrongChannel {
                    bound: bound.clone(),
                }),
                _ => Ok(()),
            },
            Guard::OffGame if engine.is_ongoing() => Err(Rejection::AlreadyStarted),
            Guard::InGame if !engine.is_ongoing() => Err(Rejection::NotStarted),
            Guard::Registered if !engine.is_registered(invocation.author.id) => {
                Err(Rejection::NotRegistered {
                    roster: engine.player_names().into_iter().cloned().collect(),
                })
            }
            Guard::Admin if admin != Some(invocation.author.id) => Err(Rejection::NotAdmin),
            Guard::OffGame | Guard::InGame | Guard::Registered | Guard::Admin => Ok(()),
        }
    }
}

/// Run every guard in order, stopping at the first rejection
pub fn check_all(
    guards: &[Guard],
    engine: &mut GameEngine,
    invocation: &Invocation,
    admin: Option<UserId>,
) -> Result<(), Rejection> {
    guards
        .iter()
        .try_for_each(|guard| guard.check(engine, invocation, admin))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ChannelId, UserHandle};

    fn invocation(user: u64, channel: u64) -> Invocation {
        Invocation {
            author: UserHandle::new(UserId::new(user), format!("user{user}")),
            channel: ChannelRef::new(ChannelId::new(channel), format!("chan{channel}")),
            guild: None,
        }
    }

    #[test]
    fn test_first_channel_wins() {
        let mut engine = GameEngine::new();
        let guards = [Guard::BindChannel, Guard::InChannel];

        assert_eq!(check_all(&guards, &mut engine, &invocation(1, 10), None), Ok(()));
        assert_eq!(engine.channel().map(|c| c.id), Some(ChannelId::new(10)));

        let rejected = check_all(&guards, &mut engine, &invocation(1, 20), None);
        assert!(matches!(rejected, Err(Rejection::WrongChannel { bound }) if bound.id == ChannelId::new(10)));
    }

    #[test]
    fn test_phase_guards() {
        let mut engine = GameEngine::with_seed(3);
        let inv = invocation(1, 10);
        assert_eq!(Guard::InGame.check(&mut engine, &inv, None), Err(Rejection::NotStarted));
        assert_eq!(Guard::OffGame.check(&mut engine, &inv, None), Ok(()));

        engine.register_player(inv.author.clone()).unwrap();
        engine.register_player(invocation(2, 10).author).unwrap();
        engine.deal_and_start().unwrap();
        assert_eq!(Guard::OffGame.check(&mut engine, &inv, None), Err(Rejection::AlreadyStarted));
        assert_eq!(Guard::InGame.check(&mut engine, &inv, None), Ok(()));
    }

    #[test]
    fn test_registered_guard_lists_roster() {
        let mut engine = GameEngine::new();
        engine.register_player(invocation(1, 10).author).unwrap();

        let rejected = Guard::Registered.check(&mut engine, &invocation(2, 10), None);
        assert_eq!(
            rejected,
            Err(Rejection::NotRegistered { roster: vec![PlayerName::new("user1")] })
        );
        assert_eq!(Guard::Registered.check(&mut engine, &invocation(1, 10), None), Ok(()));
    }

    #[test]
    fn test_admin_guard() {
        let mut engine = GameEngine::new();
        let admin = Some(UserId::new(1));
        assert_eq!(Guard::Admin.check(&mut engine, &invocation(1, 10), admin), Ok(()));
        assert_eq!(Guard::Admin.check(&mut engine, &invocation(2, 10), admin), Err(Rejection::NotAdmin));
        assert_eq!(Guard::Admin.check(&mut engine, &invocation(1, 10), None), Err(Rejection::NotAdmin));
    }
}
