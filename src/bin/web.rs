//! Single binary web server: JSON API over the season engine, one in-memory season per session.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default.
//! Override with env: HOST (e.g. 0.0.0.0), PORT (e.g. 8080), SEASON_IDLE_HOURS (e.g. 12).

use actix_web::{
    delete, get, post, put,
    web::{Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use season_bracket::{
    abort_competition, add_late_entrant, bracket_points_table, finish_competition,
    generate_demo_entrants, qualification_points_table, record_score, record_winner,
    reset_championship, standings_to_csv, start_bracket, start_competition, ChampionshipStanding,
    EntrantId, MatchId, SeasonError, SeasonState,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Host-side session id for one season.
type SeasonId = Uuid;

/// Per-season entry: season state + last activity time (for auto-cleanup).
struct SeasonEntry {
    season: SeasonState,
    last_activity: Instant,
}

type AppState = Data<RwLock<HashMap<SeasonId, SeasonEntry>>>;

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(serde::Serialize)]
struct CreatedSeason<'a> {
    id: SeasonId,
    season: &'a SeasonState,
}

#[derive(Deserialize)]
struct SeasonLengthBody {
    total_competitions: u32,
}

#[derive(Deserialize)]
struct RegisterBody {
    name: String,
}

#[derive(Deserialize)]
struct ScoreBody {
    entrant_id: EntrantId,
    score: Option<i64>,
}

#[derive(Deserialize)]
struct LateEntrantBody {
    name: String,
    score: Option<i64>,
}

#[derive(Deserialize)]
struct DemoBody {
    #[serde(default = "default_demo_count")]
    count: usize,
}

fn default_demo_count() -> usize {
    7
}

#[derive(Deserialize)]
struct SetWinnerBody {
    match_id: MatchId,
    entrant_id: EntrantId,
}

/// Path segment: season id (e.g. /api/seasons/{id})
#[derive(Deserialize)]
struct SeasonPath {
    id: SeasonId,
}

/// Path segments: season id and entrant id (e.g. /api/seasons/{id}/standings/{entrant_id})
#[derive(Deserialize)]
struct SeasonEntrantPath {
    id: SeasonId,
    entrant_id: EntrantId,
}

fn bad_request(e: SeasonError) -> HttpResponse {
    HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() }))
}

fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({ "error": "No season" }))
}

/// Run `action` on one season under the write lock, refresh its activity time and
/// answer with the updated season (or the error as 400).
fn with_season<F>(state: &AppState, id: SeasonId, action: F) -> HttpResponse
where
    F: FnOnce(&mut SeasonState) -> Result<(), SeasonError>,
{
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&id) {
        Some(e) => e,
        None => return not_found(),
    };
    entry.last_activity = Instant::now();
    match action(&mut entry.season) {
        Ok(()) => HttpResponse::Ok().json(&entry.season),
        Err(e) => bad_request(e),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "season-bracket",
    })
}

/// Award tables (qualification rank and bracket placement).
#[get("/api/points-table")]
async fn api_points_table() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "qualification": qualification_points_table(),
        "bracket": bracket_points_table(),
    }))
}

/// Create a new season (returns its id; client stores id for subsequent requests).
#[post("/api/seasons")]
async fn api_create_season(state: AppState) -> HttpResponse {
    let id = Uuid::new_v4();
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = g.entry(id).or_insert(SeasonEntry {
        season: SeasonState::new(),
        last_activity: Instant::now(),
    });
    log::info!("Created season {}", id);
    HttpResponse::Ok().json(CreatedSeason {
        id,
        season: &entry.season,
    })
}

/// Get a season by id (404 if not found). Touching it refreshes last_activity.
#[get("/api/seasons/{id}")]
async fn api_get_season(state: AppState, path: Path<SeasonPath>) -> HttpResponse {
    with_season(&state, path.id, |_| Ok(()))
}

/// Replace a season with an external state blob. Blobs that fail validation reset the season.
#[put("/api/seasons/{id}/state")]
async fn api_import_state(state: AppState, path: Path<SeasonPath>, body: String) -> HttpResponse {
    with_season(&state, path.id, |season| {
        *season = SeasonState::from_json_or_default(&body);
        Ok(())
    })
}

/// Standings table as CSV, best first.
#[get("/api/seasons/{id}/standings.csv")]
async fn api_standings_csv(state: AppState, path: Path<SeasonPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get(&path.id) {
        Some(e) => e,
        None => return not_found(),
    };
    match standings_to_csv(&entry.season.ranked_standings()) {
        Ok(csv) => HttpResponse::Ok()
            .content_type("text/csv; charset=utf-8")
            .body(csv),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Set the number of competitions in the season.
#[put("/api/seasons/{id}/length")]
async fn api_set_season_length(
    state: AppState,
    path: Path<SeasonPath>,
    body: Json<SeasonLengthBody>,
) -> HttpResponse {
    with_season(&state, path.id, |s| s.set_total_competitions(body.total_competitions))
}

/// Register a season participant (names unique, case-insensitive).
#[post("/api/seasons/{id}/standings")]
async fn api_register(state: AppState, path: Path<SeasonPath>, body: Json<RegisterBody>) -> HttpResponse {
    with_season(&state, path.id, |s| s.register(body.name.as_str()).map(|_| ()))
}

/// Merge a standing registered through another channel. Duplicates are ignored.
#[post("/api/seasons/{id}/standings/merge")]
async fn api_merge_standing(
    state: AppState,
    path: Path<SeasonPath>,
    body: Json<ChampionshipStanding>,
) -> HttpResponse {
    let standing = body.into_inner();
    with_season(&state, path.id, |s| {
        if !s.merge_standing(standing) {
            log::debug!("Ignored duplicate registration");
        }
        Ok(())
    })
}

/// Remove a participant from the season (between competitions only).
#[delete("/api/seasons/{id}/standings/{entrant_id}")]
async fn api_remove_standing(state: AppState, path: Path<SeasonEntrantPath>) -> HttpResponse {
    with_season(&state, path.id, |s| s.remove_standing(path.entrant_id))
}

/// Clear all points and the season length; participants stay.
#[post("/api/seasons/{id}/reset")]
async fn api_reset(state: AppState, path: Path<SeasonPath>) -> HttpResponse {
    with_season(&state, path.id, |s| {
        reset_championship(s);
        Ok(())
    })
}

/// Open qualification for the next competition.
#[post("/api/seasons/{id}/competition/start")]
async fn api_start_competition(state: AppState, path: Path<SeasonPath>) -> HttpResponse {
    with_season(&state, path.id, start_competition)
}

/// Submit or clear a qualification score.
#[put("/api/seasons/{id}/competition/scores")]
async fn api_record_score(state: AppState, path: Path<SeasonPath>, body: Json<ScoreBody>) -> HttpResponse {
    with_season(&state, path.id, |s| record_score(s, body.entrant_id, body.score))
}

/// Add an entrant during qualification.
#[post("/api/seasons/{id}/competition/entrants")]
async fn api_add_late_entrant(
    state: AppState,
    path: Path<SeasonPath>,
    body: Json<LateEntrantBody>,
) -> HttpResponse {
    with_season(&state, path.id, |s| add_late_entrant(s, &body.name, body.score).map(|_| ()))
}

/// Fill qualification with random demo entrants.
#[post("/api/seasons/{id}/competition/demo")]
async fn api_demo_entrants(state: AppState, path: Path<SeasonPath>, body: Option<Json<DemoBody>>) -> HttpResponse {
    let count = body.map(|b| b.count).unwrap_or_else(default_demo_count);
    with_season(&state, path.id, |s| {
        generate_demo_entrants(s, count, &mut rand::thread_rng()).map(|_| ())
    })
}

/// Seed qualified entrants and build the bracket.
#[post("/api/seasons/{id}/competition/bracket")]
async fn api_start_bracket(state: AppState, path: Path<SeasonPath>) -> HttpResponse {
    with_season(&state, path.id, start_bracket)
}

/// Set the winner of a bracket match or the third-place playoff.
#[put("/api/seasons/{id}/competition/winner")]
async fn api_set_winner(state: AppState, path: Path<SeasonPath>, body: Json<SetWinnerBody>) -> HttpResponse {
    with_season(&state, path.id, |s| {
        let advance = record_winner(s, body.match_id, body.entrant_id)?;
        if !advance.applied {
            log::debug!("Ignored result for match {}", body.match_id);
        }
        Ok(())
    })
}

/// Apply the finished competition's points to the standings.
#[post("/api/seasons/{id}/competition/finish")]
async fn api_finish_competition(state: AppState, path: Path<SeasonPath>) -> HttpResponse {
    with_season(&state, path.id, finish_competition)
}

/// Discard the competition in progress.
#[post("/api/seasons/{id}/competition/abort")]
async fn api_abort_competition(state: AppState, path: Path<SeasonPath>) -> HttpResponse {
    with_season(&state, path.id, abort_competition)
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_idle_hours() -> u64 {
    12
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let idle_hours: u64 = std::env::var("SEASON_IDLE_HOURS")
        .ok()
        .and_then(|h| h.parse().ok())
        .unwrap_or_else(default_idle_hours);
    let idle_timeout = Duration::from_secs(idle_hours.saturating_mul(3600));
    let bind = (host.as_str(), port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(RwLock::new(HashMap::<SeasonId, SeasonEntry>::new()));

    // Background task: every 30 minutes, remove seasons idle past the timeout
    let state_cleanup = state.clone();
    actix_web::rt::spawn(async move {
        let mut interval = actix_web::rt::time::interval(Duration::from_secs(30 * 60));
        loop {
            interval.tick().await;
            let mut g = match state_cleanup.write() {
                Ok(guard) => guard,
                Err(_) => continue,
            };
            let before = g.len();
            g.retain(|_, entry| entry.last_activity.elapsed() < idle_timeout);
            let removed = before - g.len();
            if removed > 0 {
                log::info!("Cleaned up {} idle season(s) (no activity for {}h)", removed, idle_hours);
            }
        }
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(api_points_table)
            .service(api_create_season)
            .service(api_get_season)
            .service(api_import_state)
            .service(api_standings_csv)
            .service(api_set_season_length)
            .service(api_register)
            .service(api_merge_standing)
            .service(api_remove_standing)
            .service(api_reset)
            .service(api_start_competition)
            .service(api_record_score)
            .service(api_add_late_entrant)
            .service(api_demo_entrants)
            .service(api_start_bracket)
            .service(api_set_winner)
            .service(api_finish_competition)
            .service(api_abort_competition)
    })
    .bind(bind)?
    .run()
    .await
}
