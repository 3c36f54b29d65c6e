//! Cookie-backed session: player identity, one-shot flash message and the
//! day of the last race run from this browser.

use axum::http::{header, HeaderMap};
use paddock_core::PlayerId;

pub const PLAYER_COOKIE: &str = "jugador_id";
pub const FLASH_COOKIE: &str = "flash";
pub const LAST_RACE_COOKIE: &str = "ultima_carrera";

#[derive(Debug, Default, PartialEq, Eq)]
pub struct Session {
    pub player_id: Option<PlayerId>,
    pub flash: Option<String>,
    pub last_race_day: Option<u32>,
}

impl Session {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let mut session = Self::default();
        for (name, value) in cookie_pairs(headers) {
            match name {
                PLAYER_COOKIE if !value.is_empty() => {
                    session.player_id = urlencoding::decode(value)
                        .ok()
                        .map(|id| PlayerId(id.into_owned()));
                }
                FLASH_COOKIE if !value.is_empty() => {
                    session.flash = urlencoding::decode(value).ok().map(|m| m.into_owned());
                }
                LAST_RACE_COOKIE => session.last_race_day = value.parse().ok(),
                _ => {}
            }
        }
        session
    }
}

fn cookie_pairs(headers: &HeaderMap) -> impl Iterator<Item = (&str, &str)> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|line| line.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
}

pub fn set_player(id: &PlayerId) -> String {
    format!(
        "{PLAYER_COOKIE}={}; Path=/; HttpOnly; SameSite=Lax",
        urlencoding::encode(&id.0)
    )
}

pub fn set_flash(message: &str) -> String {
    format!(
        "{FLASH_COOKIE}={}; Path=/; HttpOnly; SameSite=Lax",
        urlencoding::encode(message)
    )
}

pub fn set_last_race(day: u32) -> String {
    format!("{LAST_RACE_COOKIE}={day}; Path=/; HttpOnly; SameSite=Lax")
}

pub fn clear(name: &str) -> String {
    format!("{name}=; Path=/; Max-Age=0")
}
