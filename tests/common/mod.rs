#![allow(dead_code)]

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, patch},
    Json, Router,
};
use serde::Deserialize;
use std::collections::BTreeSet;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DayMode {
    #[default]
    Ok,
    ServerError,
    Garbage,
}

#[derive(Debug, Default)]
pub struct Inner {
    pub completed: BTreeSet<String>,
    pub habits: Vec<(String, String)>,
    pub day_mode: DayMode,
    pub fail_toggle: bool,
    pub day_queries: Vec<String>,
    pub toggles: Vec<String>,
}

#[derive(Clone, Default)]
pub struct FakeState(pub Arc<Mutex<Inner>>);

impl FakeState {
    pub fn with<R>(&self, f: impl FnOnce(&mut Inner) -> R) -> R {
        f(&mut self.0.lock().unwrap())
    }
}

/// A stand-in for the remote habit service: one day with "Read" done and
/// "Run" still open.
pub struct FakeHabitService {
    pub base_url: String,
    pub state: FakeState,
}

#[derive(Debug, Deserialize)]
struct DayQuery {
    date: String,
}

async fn get_day(State(state): State<FakeState>, Query(query): Query<DayQuery>) -> Response {
    state.with(|inner| {
        inner.day_queries.push(query.date);
        match inner.day_mode {
            DayMode::ServerError => {
                (StatusCode::INTERNAL_SERVER_ERROR, "database unavailable").into_response()
            }
            DayMode::Garbage => (StatusCode::OK, "<html>oops</html>").into_response(),
            DayMode::Ok => {
                let possible: Vec<_> = inner
                    .habits
                    .iter()
                    .map(|(id, title)| serde_json::json!({ "id": id, "title": title }))
                    .collect();
                Json(serde_json::json!({
                    "completedHabits": inner.completed,
                    "possibleHabits": possible,
                }))
                .into_response()
            }
        }
    })
}

async fn toggle_habit(State(state): State<FakeState>, Path(id): Path<String>) -> Response {
    state.with(|inner| {
        inner.toggles.push(id.clone());
        if inner.fail_toggle {
            return (StatusCode::INTERNAL_SERVER_ERROR, "toggle failed").into_response();
        }
        if !inner.completed.remove(&id) {
            inner.completed.insert(id);
        }
        StatusCode::OK.into_response()
    })
}

pub async fn spawn_fake_service() -> FakeHabitService {
    let state = FakeState::default();
    state.with(|inner| {
        inner.completed.insert("h1".to_owned());
        inner.habits = vec![
            ("h1".to_owned(), "Read".to_owned()),
            ("h2".to_owned(), "Run".to_owned()),
        ];
    });

    let app = Router::new()
        .route("/day", get(get_day))
        .route("/habits/:id/toggle", patch(toggle_habit))
        .with_state(state.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind fake service");
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    FakeHabitService {
        base_url: format!("http://{addr}"),
        state,
    }
}

/// A base url nothing is listening on.
pub fn unreachable_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{port}")
}
