use crate::session::{self, Session, FLASH_COOKIE, LAST_RACE_COOKIE, PLAYER_COOKIE};
use crate::state::{AppState, ClockMode};
use crate::views;
use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Form, Router,
};
use paddock_core::{Event, PlayerId, TeamState};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

pub fn make_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(dashboard_handler))
        .route("/avanzar", get(advance_handler))
        .route("/iniciar_rd/:component", get(start_research_handler))
        .route("/carrera", get(race_handler))
        .route(
            "/bienvenida",
            get(onboarding_form_handler).post(onboarding_submit_handler),
        )
        .route("/reset", get(reset_handler))
        .route("/healthz", get(healthz_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Store failures surface as a bare 500; the cause goes to the log.
pub struct AppError(anyhow::Error);

impl<E: Into<anyhow::Error>> From<E> for AppError {
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!("request failed: {:#}", self.0);
        (StatusCode::INTERNAL_SERVER_ERROR, "internal error").into_response()
    }
}

type HandlerResult = Result<Response, AppError>;

fn with_cookies(mut response: Response, cookies: &[String]) -> Response {
    for cookie in cookies {
        match HeaderValue::from_str(cookie) {
            Ok(value) => {
                response.headers_mut().append(header::SET_COOKIE, value);
            }
            Err(err) => tracing::warn!("dropping unencodable cookie: {err}"),
        }
    }
    response
}

fn redirect_home(flash: Option<&str>) -> Response {
    let cookies: Vec<String> = flash.map(session::set_flash).into_iter().collect();
    with_cookies(Redirect::to("/").into_response(), &cookies)
}

/// No usable player: forget the identity and go to onboarding.
fn redirect_to_onboarding() -> Response {
    with_cookies(
        Redirect::to("/bienvenida").into_response(),
        &[session::clear(PLAYER_COOKIE)],
    )
}

fn log_events(player_id: &PlayerId, events: &[Event]) {
    for event in events {
        match event {
            Event::TeamFounded { director, .. } => {
                tracing::info!(%player_id, %director, "team founded");
            }
            Event::DayAdvanced { from, to } => {
                tracing::debug!(%player_id, from, to, "day advanced");
            }
            Event::ClockAnchored { started_at_unix_s } => {
                tracing::info!(%player_id, started_at_unix_s, "player joined real-time clock");
            }
            Event::ResearchStarted {
                component,
                cost,
                completes_on_day,
            } => {
                tracing::info!(%player_id, %component, cost, completes_on_day, "research started");
            }
            Event::ResearchCompleted {
                component,
                new_level,
            } => {
                tracing::info!(%player_id, %component, new_level, "research completed");
            }
            Event::ResearchAbandoned { component } => {
                tracing::warn!(%player_id, %component, "research abandoned, component missing");
            }
            Event::RaceFinished { position, payout } => {
                tracing::info!(%player_id, position, payout, "race finished");
            }
        }
    }
}

fn load_session_team(app: &AppState, session: &Session) -> anyhow::Result<Option<TeamState>> {
    let Some(player_id) = &session.player_id else {
        return Ok(None);
    };
    let team = app.store.load_team(player_id)?;
    if team.is_none() {
        tracing::debug!(%player_id, "session points at unknown player");
    }
    Ok(team)
}

/// Bring the team up to today's date and persist if anything moved.
///
/// In manual mode the day stays put but a due project still completes.
fn sync_and_save(app: &AppState, team: &mut TeamState) -> anyhow::Result<()> {
    let events = match app.clock {
        ClockMode::RealTime => paddock_core::sync_to_clock(team, (app.now)(), &app.content),
        ClockMode::Manual => {
            let day = team.player.day;
            paddock_core::sync_calendar(team, day)
        }
    };
    if !events.is_empty() {
        log_events(&team.player.id, &events);
        app.store.save_team(team)?;
    }
    Ok(())
}

/// Session team, already synced to today. `None` means "go to onboarding".
fn current_team(app: &AppState, session: &Session) -> anyhow::Result<Option<TeamState>> {
    let Some(mut team) = load_session_team(app, session)? else {
        return Ok(None);
    };
    sync_and_save(app, &mut team)?;
    Ok(Some(team))
}

pub async fn dashboard_handler(State(app): State<AppState>, headers: HeaderMap) -> HandlerResult {
    let session = Session::from_headers(&headers);
    let Some(team) = current_team(&app, &session)? else {
        return Ok(redirect_to_onboarding());
    };

    let html = views::dashboard(
        &team,
        &app.content.constants,
        session.flash.as_deref(),
        app.clock,
    );
    let cookies: Vec<String> = session
        .flash
        .as_ref()
        .map(|_| session::clear(FLASH_COOKIE))
        .into_iter()
        .collect();
    Ok(with_cookies(Html(html).into_response(), &cookies))
}

pub async fn advance_handler(State(app): State<AppState>, headers: HeaderMap) -> HandlerResult {
    let session = Session::from_headers(&headers);
    let Some(mut team) = current_team(&app, &session)? else {
        return Ok(redirect_to_onboarding());
    };

    if app.clock == ClockMode::RealTime {
        return Ok(redirect_home(Some(
            "El calendario avanza solo: cada día real son cuatro días de juego.",
        )));
    }

    let events = paddock_core::advance_day(&mut team);
    log_events(&team.player.id, &events);
    app.store.save_team(&team)?;
    Ok(redirect_home(None))
}

pub async fn start_research_handler(
    State(app): State<AppState>,
    Path(component): Path<String>,
    headers: HeaderMap,
) -> HandlerResult {
    let session = Session::from_headers(&headers);
    let Some(mut team) = current_team(&app, &session)? else {
        return Ok(redirect_to_onboarding());
    };

    match paddock_core::start_research(&mut team, &component, &app.content.constants) {
        Ok(event) => {
            log_events(&team.player.id, std::slice::from_ref(&event));
            app.store.save_team(&team)?;
            Ok(redirect_home(Some(format!("I+D iniciada en {component}.").as_str())))
        }
        Err(err) => {
            tracing::debug!(player_id = %team.player.id, "research refused: {err}");
            Ok(redirect_home(Some(views::research_error_message(&err).as_str())))
        }
    }
}

pub async fn race_handler(State(app): State<AppState>, headers: HeaderMap) -> HandlerResult {
    let session = Session::from_headers(&headers);
    let Some(mut team) = current_team(&app, &session)? else {
        return Ok(redirect_to_onboarding());
    };

    match paddock_core::run_race(&mut team, session.last_race_day, &app.content.constants) {
        Ok((result, event)) => {
            log_events(&team.player.id, std::slice::from_ref(&event));
            app.store.save_team(&team)?;
            let html = views::race_result(&team, &result);
            Ok(with_cookies(
                Html(html).into_response(),
                &[session::set_last_race(team.player.day)],
            ))
        }
        Err(err) => {
            tracing::debug!(player_id = %team.player.id, "race refused: {err}");
            Ok(redirect_home(Some(views::race_error_message(&err).as_str())))
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct OnboardingForm {
    #[serde(default)]
    nombre: String,
}

pub async fn onboarding_form_handler(
    State(app): State<AppState>,
    headers: HeaderMap,
) -> HandlerResult {
    let session = Session::from_headers(&headers);
    if load_session_team(&app, &session)?.is_some() {
        return Ok(Redirect::to("/").into_response());
    }
    Ok(Html(views::onboarding(None)).into_response())
}

pub async fn onboarding_submit_handler(
    State(app): State<AppState>,
    Form(form): Form<OnboardingForm>,
) -> HandlerResult {
    let player_id = paddock_core::generate_player_id(&mut rand::thread_rng());
    match paddock_core::found_team(player_id, &form.nombre, (app.now)(), &app.content) {
        Ok((team, event)) => {
            app.store.create_team(&team)?;
            log_events(&team.player.id, std::slice::from_ref(&event));
            Ok(with_cookies(
                Redirect::to("/").into_response(),
                &[
                    session::set_player(&team.player.id),
                    session::clear(LAST_RACE_COOKIE),
                ],
            ))
        }
        Err(err) => {
            let html = views::onboarding(Some(views::onboarding_error_message(&err)));
            Ok(Html(html).into_response())
        }
    }
}

pub async fn reset_handler(State(app): State<AppState>, headers: HeaderMap) -> HandlerResult {
    let session = Session::from_headers(&headers);
    if app.reset_wipes_store {
        app.store.reset()?;
    } else if let Some(player_id) = &session.player_id {
        tracing::info!(%player_id, "session reset");
    }
    Ok(with_cookies(
        Redirect::to("/bienvenida").into_response(),
        &[
            session::clear(PLAYER_COOKIE),
            session::clear(FLASH_COOKIE),
            session::clear(LAST_RACE_COOKIE),
        ],
    ))
}

pub async fn healthz_handler() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}
