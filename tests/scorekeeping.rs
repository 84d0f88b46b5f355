use std::sync::Arc;

use futures::future::BoxFuture;
use gongzhu_ledger::{
    commentary::{GenerationError, TextGenerator},
    config::AppConfig,
    dao::{
        credentials::ApiKey,
        kv::{MemoryStore, SharedStore},
        ledger_store::{PLAYERS_KEY, ROUNDS_KEY},
    },
    logging::init_tracing,
    state::{
        AppState,
        ledger::{Deltas, Player, PlayerId},
        schedule::{Course, DayOfWeek},
    },
};

fn deltas(entries: &[(&str, i64)]) -> Deltas {
    entries
        .iter()
        .map(|(id, delta)| (PlayerId::from(*id), *delta))
        .collect()
}

fn totals(app: &AppState) -> Vec<i64> {
    app.scorekeeper
        .state()
        .players()
        .iter()
        .map(Player::total_score)
        .collect()
}

#[test]
fn worked_example_survives_restart() {
    init_tracing();
    let store: SharedStore = Arc::new(MemoryStore::new());
    let mut app = AppState::with_store(AppConfig::default(), store.clone());

    let first = app
        .scorekeeper
        .record_round(deltas(&[("p1", -100), ("p2", 0), ("p3", 0), ("p4", 100)]));
    assert_eq!(totals(&app), [-100, 0, 0, 100]);

    let second = app.scorekeeper.record_round(deltas(&[("p1", 50), ("p3", -50)]));
    assert_eq!(totals(&app), [-50, 0, -50, 100]);

    assert!(app.scorekeeper.delete_round(&first));
    assert_eq!(totals(&app), [50, 0, -50, 0]);

    let restarted = AppState::with_store(AppConfig::default(), store.clone());
    assert_eq!(totals(&restarted), [50, 0, -50, 0]);
    let rounds = restarted.scorekeeper.state().rounds();
    assert_eq!(rounds.len(), 1);
    assert_eq!(rounds[0].id(), &second);

    let raw_players = store.get(PLAYERS_KEY).unwrap().unwrap();
    assert!(raw_players.contains("\"totalScore\":50"));
    assert!(store.get(ROUNDS_KEY).unwrap().is_some());
}

#[test]
fn file_backed_state_round_trips() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = AppConfig {
        storage_dir: dir.path().to_path_buf(),
        ..AppConfig::default()
    };

    let mut app = AppState::open(config.clone()).unwrap();
    app.scorekeeper.rename_player(&PlayerId::from("p2"), "Wei");
    app.scorekeeper.record_round(deltas(&[("p2", 100), ("p1", -100)]));
    app.credentials().set_api_key(" key-123 ").unwrap();
    app.timetable
        .save_course(Course {
            name: "Operating Systems".into(),
            day: DayOfWeek::Thu,
            ..Course::draft()
        })
        .unwrap();

    let reopened = AppState::open(config).unwrap();
    assert_eq!(reopened.scorekeeper.state(), app.scorekeeper.state());
    assert_eq!(reopened.timetable.day(DayOfWeek::Thu).len(), 1);
    assert_eq!(reopened.credentials().api_key().unwrap().expose(), "key-123");
}

struct EchoStandings;

impl TextGenerator for EchoStandings {
    fn generate(
        &self,
        _api_key: &ApiKey,
        prompt: String,
    ) -> BoxFuture<'static, Result<String, GenerationError>> {
        Box::pin(async move {
            let standings = prompt
                .lines()
                .skip_while(|line| *line != "Current Standings:")
                .nth(1)
                .unwrap_or_default()
                .to_string();
            Ok(standings)
        })
    }
}

#[tokio::test]
async fn commentary_reads_but_never_mutates() {
    let mut app = AppState::with_store(AppConfig::default(), Arc::new(MemoryStore::new()));
    app.scorekeeper.record_round(deltas(&[("p1", -100), ("p4", 100)]));
    let before = app.scorekeeper.state().clone();

    let commentator = app.commentator(EchoStandings);
    let err = commentator
        .analyze(app.scorekeeper.state())
        .await
        .unwrap_err();
    assert!(err.needs_configuration());

    app.credentials().set_api_key("abc").unwrap();
    let text = commentator.analyze(app.scorekeeper.state()).await.unwrap();
    assert_eq!(text, "North (北): -100, West (西): 0, South (南): 0, East (东): 100");
    assert_eq!(app.scorekeeper.state(), &before);
}
