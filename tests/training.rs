//! Game driving, training runs and persistence of trained learners

use tempfile::TempDir;
use td_tictactoe::{
    Error,
    adapters::{InMemoryRepository, MsgPackRepository},
    pipeline::{
        BatchKind, CompeteConfig, Trainer, TrainerConfig, TrainingStats, compete_against_random,
        play_game, play_training_game,
    },
    players::RandomPlayer,
    ports::{Agent, AgentRepository, Trainable},
    td_learning::{LearnerKind, TdAgent, TdParams},
    tictactoe::{GameController, GameOutcome, Player},
};

fn learner(kind: LearnerKind, seed: u64) -> TdAgent {
    TdAgent::with_kind(kind, TdParams::default()).with_seed(seed)
}

#[test]
fn test_random_game_runs_to_completion() {
    let mut x_player = RandomPlayer::new("X").with_seed(1);
    let mut o_player = RandomPlayer::new("O").with_seed(2);

    let mut controller = GameController::new(&mut x_player, &mut o_player);
    let mut moves = 0;
    let outcome = loop {
        moves += 1;
        if let (Some(outcome), _) = controller.advance().unwrap() {
            break outcome;
        }
    };

    assert!((5..=9).contains(&moves));
    assert_eq!(controller.outcome(), Some(outcome));
    assert!(matches!(controller.advance(), Err(Error::GameOver)));
}

#[test]
fn test_training_game_records_every_state() {
    let mut x_agent = learner(LearnerKind::Td, 3);
    let mut random = RandomPlayer::default().with_seed(4);
    x_agent.enable_learning();

    let (_, moves) = play_game(&mut x_agent, &mut random).unwrap();
    assert!(x_agent.trajectory().is_empty());

    play_training_game(&mut x_agent, &mut random).unwrap();
    let trajectory = x_agent.trajectory();
    assert!(trajectory.len() >= 5);
    assert!(moves.len() >= 5);

    // the last recorded state is terminal and worth its fixed reward
    let last = *trajectory.last().unwrap();
    let value = x_agent.value(&last).unwrap();
    assert!(value == 0.0 || value == 0.5 || value == 1.0);
}

#[test]
fn test_trained_learners_beat_random() {
    let config = TrainerConfig::default()
        .with_num_games(3_000)
        .with_batch_size(500)
        .with_seed(5);
    let mut trainer = Trainer::new(
        config,
        learner(LearnerKind::TdSymmetric, 5),
        learner(LearnerKind::TdSymmetric, 6),
    )
    .unwrap();
    let stats = trainer.run(|_, _, _| {}).unwrap();

    let series = stats.series(BatchKind::CompeteXVsRandom);
    assert_eq!(series.len(), 6);
    let last = series[series.len() - 1];
    assert!(last.x_wins > last.o_wins);

    let (mut x_agent, mut o_agent) = trainer.into_agents();
    let report = compete_against_random(
        &CompeteConfig {
            num_games: 200,
            seed: Some(8),
        },
        &mut x_agent,
        &mut o_agent,
        |_| {},
    )
    .unwrap();
    assert!(report.x.loss_percentage() < 25.0);
}

#[test]
fn test_training_stats_json_roundtrip() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("stats.json");

    let config = TrainerConfig::default()
        .with_num_games(40)
        .with_batch_size(20)
        .with_seed(2);
    let mut trainer =
        Trainer::new(config, learner(LearnerKind::Td, 1), learner(LearnerKind::Td, 2)).unwrap();
    let stats = trainer.run(|_, _, _| {}).unwrap();

    stats.save(&path).unwrap();
    let loaded = TrainingStats::load(&path).unwrap();
    assert_eq!(loaded, stats);
    assert_eq!(loaded.batch_size, 20);
}

#[test]
fn test_msgpack_repository_roundtrip() {
    let temp_dir = TempDir::new().unwrap();
    let repo = MsgPackRepository::new(temp_dir.path());

    let params = TdParams::default()
        .with_alpha(0.25)
        .with_epsilon(0.05)
        .with_draw_rewards(0.4, 0.6);
    let mut o_agent = TdAgent::symmetric(params).with_seed(1);
    o_agent.set_side(Player::O);
    o_agent.enable_learning();
    let mut random = RandomPlayer::default().with_seed(2);
    for _ in 0..20 {
        play_training_game(&mut random, &mut o_agent).unwrap();
    }

    repo.save(&o_agent).unwrap();
    assert!(repo.path_for(LearnerKind::TdSymmetric, Player::O).exists());

    let loaded = repo.load(LearnerKind::TdSymmetric, Player::O).unwrap();
    assert_eq!(loaded.values(), o_agent.values());
    assert_eq!(loaded.params(), o_agent.params());
    assert_eq!(loaded.side(), Player::O);
    assert!(!loaded.is_learning());

    assert!(repo.load(LearnerKind::TdSymmetric, Player::X).is_err());
    assert!(repo.load(LearnerKind::Td, Player::O).is_err());
}

#[test]
fn test_repositories_interchangeable() {
    fn roundtrip(repo: &dyn AgentRepository) -> TdAgent {
        let mut agent = learner(LearnerKind::Td, 4);
        agent.set_value(&[td_tictactoe::tictactoe::Cell::Empty; 9], 0.3);
        repo.save(&agent).unwrap();
        repo.load(LearnerKind::Td, Player::X).unwrap()
    }

    let temp_dir = TempDir::new().unwrap();
    let from_file = roundtrip(&MsgPackRepository::new(temp_dir.path()));
    let from_memory = roundtrip(&InMemoryRepository::new());
    assert_eq!(from_file.values(), from_memory.values());
    assert_eq!(from_file.name(), from_memory.name());
}

#[test]
fn test_rewards_reach_both_learners() {
    let mut x_agent = learner(LearnerKind::Td, 10);
    let mut o_agent = learner(LearnerKind::Td, 11);
    x_agent.enable_learning();
    o_agent.enable_learning();

    let outcome = play_training_game(&mut x_agent, &mut o_agent).unwrap();
    for (agent, side) in [(&x_agent, Player::X), (&o_agent, Player::O)] {
        let last = *agent.trajectory().last().unwrap();
        let expected = match outcome {
            GameOutcome::Win(winner) if winner == side => 1.0,
            GameOutcome::Win(_) => 0.0,
            GameOutcome::Draw => 0.5,
        };
        assert_eq!(agent.value(&last), Some(expected));
    }
}
