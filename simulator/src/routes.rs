//! HTTP routes of the simulated module

use crate::{Fault, Simulator};
use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use thinking_cleaner_shared::{encode, endpoints, StatusKind, StatusSnapshot};
use tracing::{debug, warn};

type Params = Query<Vec<(String, String)>>;

pub(crate) fn router(sim: Simulator) -> Router {
    Router::new()
        .route("/status.json", get(simple_status))
        .route("/full_status.json", get(full_status))
        .route("/command.json", get(command))
        .route("/:name", get(bare_command))
        .with_state(sim)
}

async fn simple_status(State(sim): State<Simulator>, Query(query): Params) -> Response {
    status(&sim, StatusKind::Simple, query)
}

async fn full_status(State(sim): State<Simulator>, Query(query): Params) -> Response {
    status(&sim, StatusKind::Full, query)
}

fn status(sim: &Simulator, kind: StatusKind, query: Vec<(String, String)>) -> Response {
    match sim.record(kind.endpoint(), query) {
        Fault::ServerError => return StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        Fault::MalformedBody => {
            return (
                [(header::CONTENT_TYPE, "application/json")],
                "{\"action\":\"status\",\"result\":",
            )
                .into_response()
        }
        Fault::None => {}
    }

    let device = sim.device();
    let snapshot = match kind {
        StatusKind::Simple => StatusSnapshot::Simple(device.simple_status()),
        StatusKind::Full => StatusSnapshot::Full(device.full_status()),
    };

    match encode(&snapshot) {
        Ok(body) => ([(header::CONTENT_TYPE, "application/json")], body).into_response(),
        Err(e) => {
            warn!("Could not encode {} status: {}", kind, e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

async fn command(State(sim): State<Simulator>, Query(query): Params) -> Response {
    let fault = sim.record(endpoints::COMMAND, query.clone());
    let name = query
        .iter()
        .find(|(k, _)| k == endpoints::COMMAND_PARAM)
        .map(|(_, v)| v.clone())
        .unwrap_or_default();
    run(&sim, fault, &name, &query)
}

async fn bare_command(
    State(sim): State<Simulator>,
    Path(name): Path<String>,
    Query(query): Params,
) -> Response {
    let fault = sim.record(&name, query.clone());
    run(&sim, fault, &name, &query)
}

fn run(sim: &Simulator, fault: Fault, name: &str, query: &[(String, String)]) -> Response {
    if fault == Fault::ServerError {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }

    let accepted = sim.apply(name, query);
    debug!("Command {:?} {}", name, if accepted { "applied" } else { "rejected" });

    // Command replies carry no data, only an echo of the action
    Json(json!({
        "action": name,
        "result": if accepted { "success" } else { "failed" },
    }))
    .into_response()
}
