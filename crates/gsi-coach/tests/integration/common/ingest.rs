//! HTTP client helpers and snapshot builders for the ingestion endpoint.

use std::net::SocketAddr;

use reqwest::{Method, StatusCode};
use serde_json::{json, Value};

pub const IN_PROGRESS: &str = "DOTA_GAMERULES_STATE_GAME_IN_PROGRESS";
pub const WAITING_FOR_PLAYERS: &str = "DOTA_GAMERULES_STATE_WAIT_FOR_PLAYERS_TO_LOAD";

/// Send one request to `/` and return the status code.
pub async fn send(addr: SocketAddr, method: Method, body: Vec<u8>) -> StatusCode {
    reqwest::Client::new()
        .request(method, format!("http://{addr}/"))
        .header(reqwest::header::CONTENT_TYPE, "application/json")
        .body(body)
        .send()
        .await
        .unwrap()
        .status()
}

pub async fn post(addr: SocketAddr, snapshot: &Value) -> StatusCode {
    send(addr, Method::POST, serde_json::to_vec(snapshot).unwrap()).await
}

/// Snapshot with only the map section.
pub fn bare(phase: &str, clock: i32) -> Value {
    json!({ "map": { "clock_time": clock, "game_state": phase } })
}

/// Minute-ten power rune situation: low gold, buyback unaffordable, charged
/// wand at 25% health, no teleport.
pub fn power_rune_tick() -> Value {
    json!({
        "map": { "clock_time": 610, "game_state": IN_PROGRESS },
        "player": {
            "name": "tester",
            "gold": 200,
            "gpm": 455,
            "kills": 3,
            "deaths": 1,
            "assists": 4,
            "last_hits": 61,
            "denies": 9
        },
        "hero": {
            "name": "npc_dota_hero_queenofpain",
            "level": 11,
            "alive": true,
            "health": 300,
            "max_health": 1200,
            "health_percent": 25,
            "mana": 400,
            "max_mana": 800,
            "mana_percent": 50,
            "buyback_cost": 500,
            "buyback_cooldown": 0
        },
        "items": {
            "slot0": { "name": "item_magic_wand", "charges": 20 },
            "slot1": { "name": "item_bottle", "charges": 2 },
            "slot2": { "name": "empty" },
            "teleport0": { "name": "empty" }
        }
    })
}
