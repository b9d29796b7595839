use pixel_snake::game::{Difficulty, Direction, GameConfig, TickOutcome, level_for_score};
use pixel_snake::input::{Button, Command, InputEvent, InputRouter};
use pixel_snake::persistence::{HighScoreStore, JsonFileStore, MemoryStore};
use pixel_snake::render::{DisplaySink, NullSink, RecordingSink};
use pixel_snake::session::{Phase, Session};
use rand::{Rng, SeedableRng, rngs::StdRng};
use tempfile::TempDir;

fn small_config() -> GameConfig {
    GameConfig {
        canvas_size: 80,
        cell_size: 10,
        origin: pixel_snake::game::Cell::new(4, 4),
        ..Default::default()
    }
}

fn new_session(seed: u64) -> Session<MemoryStore, RecordingSink, StdRng> {
    Session::with_rng(
        &small_config(),
        MemoryStore::new(),
        RecordingSink::new(),
        StdRng::seed_from_u64(seed),
    )
    .unwrap()
}

/// Steer one step closer to the food
///
/// When the food lies straight behind, any turn that stays on the board is
/// taken instead.
fn steer_toward_food<S: HighScoreStore, D: DisplaySink>(session: &mut Session<S, D, StdRng>) {
    let tile_count = session.snapshot().tile_count;
    let state = session.state().unwrap();
    let head = state.snake.head();
    let food = state.food;

    let mut choices = Vec::new();
    if food.col > head.col {
        choices.push(Direction::Right);
    } else if food.col < head.col {
        choices.push(Direction::Left);
    }
    if food.row > head.row {
        choices.push(Direction::Down);
    } else if food.row < head.row {
        choices.push(Direction::Up);
    }
    choices.extend(Direction::ALL.into_iter().filter(|&direction| {
        let next = head.moved_in_direction(direction);
        (0..tile_count).contains(&next.col) && (0..tile_count).contains(&next.row)
    }));

    for direction in choices {
        if session.steer(direction) {
            return;
        }
    }
}

/// Chase the food until it is eaten, returning the points it gave
fn eat_one_food<S: HighScoreStore, D: DisplaySink>(
    session: &mut Session<S, D, StdRng>,
) -> Option<u32> {
    for _ in 0..200 {
        steer_toward_food(session);
        match session.tick()? {
            TickOutcome::Moved {
                ate_food: true,
                points,
            } => return Some(points),
            TickOutcome::Ended(_) => return None,
            _ => {}
        }
    }
    None
}

#[test]
fn random_play_keeps_invariants() {
    let mut steering = StdRng::seed_from_u64(99);

    for seed in 0..20 {
        let mut session = new_session(seed);
        assert!(session.start_game());

        let mut last_score = 0;
        for _ in 0..500 {
            if session.phase() != Phase::Running {
                break;
            }

            let direction = Direction::ALL[steering.gen_range(0..4)];
            session.steer(direction);

            let before = session.state().unwrap().snake.len();
            let outcome = session.tick().unwrap();
            let snapshot = session.display().last().unwrap().clone();

            match outcome {
                TickOutcome::Held => assert_eq!(snapshot.snake.len(), before),
                TickOutcome::Moved { ate_food, .. } => {
                    let expected = if ate_food { before + 1 } else { before };
                    assert_eq!(snapshot.snake.len(), expected);
                    let food = snapshot.food.unwrap();
                    assert!(!snapshot.snake.contains(&food));
                }
                TickOutcome::Ended(_) => {
                    assert_eq!(snapshot.phase, Phase::GameOver);
                    assert!(!session.timer().is_active());
                }
            }

            assert!(snapshot.score >= last_score);
            assert_eq!(snapshot.level, level_for_score(snapshot.score));
            last_score = snapshot.score;
        }
    }
}

#[test]
fn high_score_is_max_of_runs() {
    let mut steering = StdRng::seed_from_u64(5);
    let mut session = new_session(11);
    let mut best = 0;

    for _ in 0..10 {
        if session.phase() == Phase::GameOver {
            assert!(session.play_again());
        } else {
            assert!(session.start_game());
        }
        assert_eq!(session.state().unwrap().score(), 0);

        let previous = session.high_score();
        while session.phase() == Phase::Running {
            session.steer(Direction::ALL[steering.gen_range(0..4)]);
            session.tick();
        }

        let score = session.state().unwrap().score();
        best = best.max(score);
        assert_eq!(session.high_score(), previous.max(score));
        assert_eq!(session.is_new_high_score(), score > previous);
    }

    assert_eq!(session.high_score(), best);
}

#[test]
fn high_score_survives_restart() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("high_score.json");

    let mut session = Session::with_rng(
        &GameConfig::default(),
        JsonFileStore::new(&path),
        NullSink,
        StdRng::seed_from_u64(1),
    )
    .unwrap();
    assert_eq!(session.high_score(), 0);

    session.start_game();
    let points = eat_one_food(&mut session);
    assert_eq!(points, Some(15));

    // Keep going straight until the wall ends the run
    for _ in 0..40 {
        if session.tick().is_none() {
            break;
        }
    }
    assert_eq!(session.phase(), Phase::GameOver);

    let first = session.high_score();
    assert!(first >= 15);
    assert!(session.is_new_high_score());
    assert!(path.exists());

    let reopened = Session::new(&GameConfig::default(), JsonFileStore::new(&path), NullSink).unwrap();
    assert_eq!(reopened.high_score(), first);
}

#[test]
fn router_and_session_together() {
    let mut session = new_session(2);
    let mut router = InputRouter::default();

    // Steering before a run is dropped by the router
    router.route(InputEvent::SwipeStart { x: 0.0, y: 0.0 }, session.phase());
    assert_eq!(
        router.route(InputEvent::SwipeEnd { x: 100.0, y: 0.0 }, session.phase()),
        None
    );

    let start = router
        .route(InputEvent::ButtonPress(Button::Start), session.phase())
        .unwrap();
    assert!(session.apply(start));
    assert_eq!(session.phase(), Phase::Running);

    router.route(InputEvent::SwipeStart { x: 0.0, y: 0.0 }, session.phase());
    let steer = router
        .route(InputEvent::SwipeEnd { x: 0.0, y: -60.0 }, session.phase())
        .unwrap();
    assert_eq!(steer, Command::Steer(Direction::Up));
    assert!(session.apply(steer));
    assert_eq!(session.state().unwrap().heading(), Some(Direction::Up));

    // Straight back down is refused
    assert!(!session.apply(Command::Steer(Direction::Down)));

    assert!(session.apply(Command::Press(Button::Pause)));
    assert!(!session.apply(Command::Press(Button::Pause)));
    assert!(session.apply(Command::Press(Button::MainMenu)));
    assert_eq!(session.phase(), Phase::Idle);
    assert!(!session.timer().is_active());

    assert!(!session.apply(Command::Quit));
}

#[test]
fn difficulty_changes_points_per_food() {
    for (difficulty, expected) in [
        (Difficulty::Easy, 10),
        (Difficulty::Medium, 15),
        (Difficulty::Hard, 20),
    ] {
        let mut session = new_session(8);
        session.select_difficulty(difficulty);
        assert!(session.start_game());

        let eaten = eat_one_food(&mut session);

        assert_eq!(eaten, Some(expected), "{difficulty}");
        assert_eq!(session.state().unwrap().score(), expected);
        assert_eq!(session.phase(), Phase::Running);
    }
}
