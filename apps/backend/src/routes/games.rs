//! Game and player HTTP routes, mounted under `/api/games`.

use actix_web::{guard, web, HttpRequest, HttpResponse, Result};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::db::txn::with_txn;
use crate::domain::PlayerChanges;
use crate::entities::games::GameStatus;
use crate::error::AppError;
use crate::extractors::{Caller, GameId, PlayerId, ValidatedJson};
use crate::logging::security;
use crate::middleware::JwtExtract;
use crate::repos::game_players::GamePlayer;
use crate::services::game_players::GamePlayerService;
use crate::services::games::{GameService, GameWithPlayers, NewPlayer};
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreatePlayerRequest {
    pub symbol: String,
    #[serde(default)]
    pub address: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateGameRequest {
    #[serde(default)]
    pub players: Vec<CreatePlayerRequest>,
}

/// Balance as sent by clients: a JSON number or a decimal string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AmountInput {
    Number(serde_json::Number),
    Text(String),
}

impl AmountInput {
    fn into_raw(self) -> String {
        match self {
            AmountInput::Number(n) => n.to_string(),
            AmountInput::Text(s) => s,
        }
    }
}

/// Sparse player update. Absent (or null) fields are left unchanged.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateGamePlayerRequest {
    pub symbol: Option<String>,
    pub address: Option<String>,
    pub trade_locked_balance: Option<AmountInput>,
    pub in_jail: Option<bool>,
}

impl UpdateGamePlayerRequest {
    fn into_changes(self) -> PlayerChanges {
        PlayerChanges {
            symbol: self.symbol,
            address: self.address,
            trade_locked_balance: self.trade_locked_balance.map(AmountInput::into_raw),
            in_jail: self.in_jail,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateGameStatusRequest {
    pub status: GameStatus,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GamePlayerResponse {
    pub id: i64,
    pub game_id: i64,
    pub symbol: String,
    pub address: String,
    pub trade_locked_balance: String,
    pub in_jail: bool,
}

impl From<GamePlayer> for GamePlayerResponse {
    fn from(p: GamePlayer) -> Self {
        Self {
            id: p.id,
            game_id: p.game_id,
            symbol: p.symbol,
            address: p.address,
            trade_locked_balance: p.trade_locked_balance,
            in_jail: p.in_jail,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GameResponse {
    pub id: i64,
    pub status: GameStatus,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
    pub players: Vec<GamePlayerResponse>,
}

impl From<GameWithPlayers> for GameResponse {
    fn from(g: GameWithPlayers) -> Self {
        Self {
            id: g.game.id,
            status: g.game.status,
            created_at: g.game.created_at,
            updated_at: g.game.updated_at,
            players: g.players.into_iter().map(Into::into).collect(),
        }
    }
}

/// POST /api/games
///
/// Creates a pending game with its initial players. 201 with the game.
async fn create_game(
    http_req: HttpRequest,
    body: ValidatedJson<CreateGameRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let players: Vec<NewPlayer> = body
        .into_inner()
        .players
        .into_iter()
        .map(|p| NewPlayer {
            symbol: p.symbol,
            address: p.address,
        })
        .collect();

    let created = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move { Ok(GameService::new().create(txn, players).await?) })
    })
    .await?;

    Ok(HttpResponse::Created().json(GameResponse::from(created)))
}

/// GET /api/games/{game_id}
async fn get_game(
    http_req: HttpRequest,
    game_id: GameId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let id = game_id.0;

    let game = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move { Ok(GameService::new().find_game(txn, id).await?) })
    })
    .await?;

    Ok(HttpResponse::Ok().json(GameResponse::from(game)))
}

/// GET /api/games/{game_id}/players/{player_id}
async fn get_player(
    http_req: HttpRequest,
    game_id: GameId,
    player_id: PlayerId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let (gid, pid) = (game_id.0, player_id.0);

    let player = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move { Ok(GamePlayerService::new().find_player(txn, gid, pid).await?) })
    })
    .await?;

    Ok(HttpResponse::Ok().json(GamePlayerResponse::from(player)))
}

/// PATCH /api/games/{game_id}/players/{player_id}
///
/// Applies a sparse change set to the player. `symbol` is locked once the game
/// has started and `in_jail` needs an admin caller. Returns the full player.
async fn update_player(
    http_req: HttpRequest,
    game_id: GameId,
    player_id: PlayerId,
    caller: Caller,
    body: ValidatedJson<UpdateGamePlayerRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let (gid, pid) = (game_id.0, player_id.0);
    let changes = body.into_inner().into_changes();
    let role = caller.role;

    let result = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move {
            Ok(GamePlayerService::new()
                .update(txn, gid, pid, changes, role)
                .await?)
        })
    })
    .await;

    let player = match result {
        Err(AppError::Forbidden { code, detail }) => {
            security::permission_denied(&caller.sub, gid, &detail);
            return Err(AppError::Forbidden { code, detail });
        }
        other => other?,
    };

    Ok(HttpResponse::Ok().json(GamePlayerResponse::from(player)))
}

/// PATCH /api/games/{game_id}/status
///
/// Admin-only lifecycle move (`pending` -> `started` -> `ended`).
async fn update_status(
    http_req: HttpRequest,
    game_id: GameId,
    caller: Caller,
    body: ValidatedJson<UpdateGameStatusRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let id = game_id.0;
    let target = body.into_inner().status;
    let role = caller.role;

    let result = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move {
            Ok(GameService::new()
                .transition_status(txn, id, target, role)
                .await?)
        })
    })
    .await;

    let game = match result {
        Err(AppError::Forbidden { code, detail }) => {
            security::permission_denied(&caller.sub, id, &detail);
            return Err(AppError::Forbidden { code, detail });
        }
        other => other?,
    };

    Ok(HttpResponse::Ok().json(GameResponse::from(game)))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("").route(web::post().to(create_game)))
        .service(web::resource("/{game_id}").route(web::get().to(get_game)))
        .service(
            web::resource("/{game_id}/status")
                .wrap(JwtExtract)
                .route(web::patch().to(update_status)),
        )
        // Same path twice: only PATCH goes through JwtExtract.
        .service(
            web::resource("/{game_id}/players/{player_id}")
                .guard(guard::Patch())
                .wrap(JwtExtract)
                .route(web::patch().to(update_player)),
        )
        .service(
            web::resource("/{game_id}/players/{player_id}").route(web::get().to(get_player)),
        );
}
