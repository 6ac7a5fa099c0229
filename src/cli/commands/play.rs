//! Play command - Console games between humans and computer players

use std::{io, path::PathBuf, sync::Arc};

use anyhow::Result;
use clap::Parser;
use dialoguer::{Input, Select};

use crate::{
    Error,
    adapters::MsgPackRepository,
    players::{AgentFactory, PlayerKind},
    ports::Agent,
    tictactoe::{GameController, GameOutcome, Grid, Player},
};

#[derive(Parser, Debug)]
#[command(about = "Play tic-tac-toe in the console")]
pub struct PlayArgs {
    /// Directory holding the trained agents
    #[arg(long, default_value = "data")]
    pub data_dir: PathBuf,
}

fn console_error(err: dialoguer::Error) -> Error {
    Error::Io {
        operation: "read from console".to_string(),
        source: io::Error::other(err),
    }
}

/// Human player reading moves from the terminal.
///
/// Positions are entered 1-9; anything else, or an occupied cell, is
/// rejected and prompted again.
struct ConsolePlayer {
    side: Player,
}

impl Agent for ConsolePlayer {
    fn select_move(&mut self, grid: &Grid) -> crate::Result<usize> {
        let position: usize = Input::new()
            .with_prompt(format!("{}, select your move (1-9)", self.side))
            .validate_with(|input: &usize| -> Result<(), String> {
                match input.checked_sub(1) {
                    Some(pos) if grid.is_valid_move(pos) => Ok(()),
                    Some(pos) if pos < 9 => Err(format!("Cell {input} is taken")),
                    _ => Err("Enter a number from 1 to 9".to_string()),
                }
            })
            .interact_text()
            .map_err(console_error)?;
        Ok(position - 1)
    }

    fn name(&self) -> &str {
        PlayerKind::Human.description()
    }

    fn set_side(&mut self, side: Player) {
        self.side = side;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    SamePlayersAndPieces,
    SwapPieces,
    DifferentPlayers,
    Quit,
}

impl Action {
    const ALL: [Action; 4] = [
        Action::SamePlayersAndPieces,
        Action::SwapPieces,
        Action::DifferentPlayers,
        Action::Quit,
    ];

    fn label(self) -> &'static str {
        match self {
            Action::SamePlayersAndPieces => "Same players and pieces",
            Action::SwapPieces => "Same players and different pieces",
            Action::DifferentPlayers => "Different players",
            Action::Quit => "Quit",
        }
    }
}

/// An agent together with the player type it was built from
struct Seat {
    kind: PlayerKind,
    agent: Box<dyn Agent>,
}

impl Seat {
    fn is_human(&self) -> bool {
        self.kind == PlayerKind::Human
    }
}

struct ConsoleGame {
    factory: AgentFactory,
}

impl ConsoleGame {
    /// Build a computer player for `side`, falling back to an untrained
    /// learner when no trained one can be loaded
    fn build(&self, kind: PlayerKind, side: Player) -> crate::Result<Seat> {
        let agent = match self.factory.create(kind, side) {
            Ok(agent) => agent,
            Err(err) => {
                log::warn!("could not load trained {kind} player for {side}: {err}");
                AgentFactory::new(*self.factory.params()).create(kind, side)?
            }
        };
        Ok(Seat { kind, agent })
    }

    fn select_player(&self, side: Player) -> Result<Seat> {
        let labels: Vec<&str> = PlayerKind::ALL.iter().map(|kind| kind.description()).collect();
        let choice = Select::new()
            .with_prompt(format!("Select {side} player"))
            .items(&labels)
            .default(0)
            .interact()
            .map_err(console_error)?;

        let kind = PlayerKind::ALL[choice];
        if kind == PlayerKind::Human {
            return Ok(Seat {
                kind,
                agent: Box::new(ConsolePlayer { side }),
            });
        }
        Ok(self.build(kind, side)?)
    }

    /// Exchange pieces. Learners are rebuilt with the values trained for
    /// their new side; other players move over as they are.
    fn swap_seats(&self, x_seat: Seat, o_seat: Seat) -> crate::Result<(Seat, Seat)> {
        let reseat = |seat: Seat, side: Player| -> crate::Result<Seat> {
            if seat.kind.is_learner() {
                self.build(seat.kind, side)
            } else {
                Ok(seat)
            }
        };
        Ok((reseat(o_seat, Player::X)?, reseat(x_seat, Player::O)?))
    }

    fn select_action(&self) -> Result<Action> {
        let labels: Vec<&str> = Action::ALL.iter().map(|action| action.label()).collect();
        let choice = Select::new()
            .with_prompt("Select action")
            .items(&labels)
            .default(0)
            .interact()
            .map_err(console_error)?;
        Ok(Action::ALL[choice])
    }

    fn play_one_game(&self, x_seat: Seat, o_seat: Seat) -> Result<(Seat, Seat)> {
        let humans = [x_seat.is_human(), o_seat.is_human()];
        let kinds = (x_seat.kind, o_seat.kind);
        let mut controller = GameController::new(x_seat.agent, o_seat.agent);
        let outcome = loop {
            let side = controller.turn();
            println!("It's your turn, {side}");
            println!("{}", controller.grid());

            let (outcome, position) = controller.advance()?;
            if !humans[side.index()] {
                println!("{} plays {}", controller.player(side).name(), position + 1);
            }
            println!();

            if let Some(outcome) = outcome {
                break outcome;
            }
        };

        println!("Game over");
        println!("{}", controller.grid());
        match outcome {
            GameOutcome::Win(side) => println!("{side} wins!"),
            GameOutcome::Draw => println!("It's a draw"),
        }
        println!();

        let (x_agent, o_agent) = controller.into_players();
        Ok((
            Seat {
                kind: kinds.0,
                agent: x_agent,
            },
            Seat {
                kind: kinds.1,
                agent: o_agent,
            },
        ))
    }

    fn run(&self) -> Result<()> {
        let mut seats = (self.select_player(Player::X)?, self.select_player(Player::O)?);
        loop {
            seats = self.play_one_game(seats.0, seats.1)?;
            seats = match self.select_action()? {
                Action::SamePlayersAndPieces => seats,
                Action::SwapPieces => self.swap_seats(seats.0, seats.1)?,
                Action::DifferentPlayers => {
                    (self.select_player(Player::X)?, self.select_player(Player::O)?)
                }
                Action::Quit => return Ok(()),
            };
        }
    }
}

pub fn execute(args: PlayArgs) -> Result<()> {
    let factory = AgentFactory::default()
        .with_repository(Arc::new(MsgPackRepository::new(&args.data_dir)));
    ConsoleGame { factory }.run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        adapters::InMemoryRepository,
        ports::AgentRepository,
        td_learning::{LearnerKind, TdAgent, TdParams},
        tictactoe::Cell,
    };

    fn learned_states(seat: &mut Seat) -> usize {
        seat.agent.as_trainable().map_or(0, |agent| agent.num_states())
    }

    #[test]
    fn test_swapped_learners_use_values_of_new_side() {
        let repository = InMemoryRepository::new();
        let mut x_agent = TdAgent::new(TdParams::default());
        x_agent.set_value(&[Cell::Empty; 9], 0.5);
        repository.save(&x_agent).unwrap();

        let mut o_agent = TdAgent::new(TdParams::default());
        o_agent.set_side(Player::O);
        o_agent.set_value(&[Cell::Empty; 9], 0.5);
        o_agent.set_value(&[Cell::X; 9], 0.5);
        repository.save(&o_agent).unwrap();

        let game = ConsoleGame {
            factory: AgentFactory::default().with_repository(Arc::new(repository)),
        };
        let learner = PlayerKind::Learner(LearnerKind::Td);
        let x_seat = game.build(learner, Player::X).unwrap();
        let o_seat = game.build(PlayerKind::Random, Player::O).unwrap();

        let (new_x, mut new_o) = game.swap_seats(x_seat, o_seat).unwrap();
        assert_eq!(new_x.kind, PlayerKind::Random);
        assert_eq!(new_o.kind, learner);
        assert_eq!(learned_states(&mut new_o), 2);

        let (mut back_x, back_o) = game.swap_seats(new_x, new_o).unwrap();
        assert_eq!(back_x.kind, learner);
        assert_eq!(back_o.kind, PlayerKind::Random);
        assert_eq!(learned_states(&mut back_x), 1);
    }

    #[test]
    fn test_only_human_seats_are_human() {
        let human = Seat {
            kind: PlayerKind::Human,
            agent: Box::new(ConsolePlayer { side: Player::X }),
        };
        assert!(human.is_human());
        let game = ConsoleGame {
            factory: AgentFactory::default(),
        };
        assert!(!game.build(PlayerKind::Random, Player::O).unwrap().is_human());
    }
}
