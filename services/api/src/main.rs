//! REST surface over the settlement engine.
//!
//! Routes translate between wire amounts (decimal currency) and the
//! engine's integer cents, and map engine errors onto HTTP statuses.
//! Everything stateful lives in the engine; this process holds the store
//! behind one mutex and serializes operations through it.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Context;
use axum::extract::{Path, Query, State as AxumState};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

use crashpoint_engine::{ops, round_query, LedgerError, Memory};
use crashpoint_types::api::{
    amount_to_cents, cents_to_amount, cents_to_signed_amount, BalanceResponse,
    BetHistoryResponse, BetRoundView,
    CrashRoundRequest, CurrentRoundResponse, DepositRequest, ErrorBody, GameRoundView,
    LedgerEntryView, LedgerResponse, PlaceBetRequest, PlaceBetResponse, RecentRoundsResponse,
    RegisterUserRequest, RegisterUserResponse, RoundDetailsResponse, RoundResponse,
    RoundStatisticsView, StartRoundRequest, StatisticsResponse, UserView,
};
use crashpoint_types::{ResultType, RoundStatus, UserId};

#[derive(Clone, Debug)]
struct ApiConfig {
    host: String,
    port: u16,
    webhook_url: Option<String>,
}

impl ApiConfig {
    fn from_env() -> Self {
        Self {
            host: std::env::var("CRASHPOINT_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: read_u16("CRASHPOINT_PORT", 8080),
            webhook_url: std::env::var("CRASHPOINT_WEBHOOK_URL").ok(),
        }
    }
}

fn read_u16(key: &str, fallback: u16) -> u16 {
    std::env::var(key)
        .ok()
        .and_then(|raw| raw.parse::<u16>().ok())
        .unwrap_or(fallback)
}

/// Fire-and-forget webhook for round lifecycle events.
#[derive(Clone)]
struct Notifier {
    client: reqwest::Client,
    url: String,
}

impl Notifier {
    fn new(url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            url,
        }
    }

    fn notify(&self, event: serde_json::Value) {
        let client = self.client.clone();
        let url = self.url.clone();
        tokio::spawn(async move {
            if let Err(err) = client.post(&url).json(&event).send().await {
                warn!(%err, "webhook notification failed");
            }
        });
    }
}

#[derive(Clone)]
struct AppState {
    store: Arc<Mutex<Memory>>,
    notifier: Option<Notifier>,
}

impl AppState {
    fn notify(&self, event: serde_json::Value) {
        if let Some(notifier) = &self.notifier {
            notifier.notify(event);
        }
    }
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or(0)
}

type ApiError = (StatusCode, Json<ErrorBody>);

fn bad_request(message: &str) -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorBody {
            message: message.to_string(),
        }),
    )
}

fn error_response(err: LedgerError) -> ApiError {
    let status = if err.is_internal() {
        error!(%err, "settlement operation failed");
        StatusCode::INTERNAL_SERVER_ERROR
    } else if err.is_not_found() {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::BAD_REQUEST
    };
    (
        status,
        Json(ErrorBody {
            message: err.to_string(),
        }),
    )
}

fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/api/users", post(register_user))
        .route("/api/users/:id/deposit", post(deposit))
        .route("/api/users/:id/balance", get(balance))
        .route("/api/users/:id/transactions", get(transactions))
        .route("/api/bet-rounds/place", post(place_bet))
        .route("/api/bet-rounds/history", get(bet_history))
        .route("/api/admin/game-rounds", get(recent_rounds))
        .route("/api/admin/game-rounds/start", post(start_round))
        .route("/api/admin/game-rounds/crash", post(crash_round))
        .route("/api/admin/game-rounds/current", get(current_round))
        .route("/api/admin/game-rounds/:round", get(round_details))
        .route("/api/admin/game-rounds/:round/statistics", get(round_statistics))
        .route("/api/admin/game-rounds/:round/complete", post(complete_round))
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let config = ApiConfig::from_env();
    let state = AppState {
        store: Arc::new(Mutex::new(Memory::default())),
        notifier: config.webhook_url.clone().map(Notifier::new),
    };

    let app = router(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .context("invalid listen addr")?;
    info!(%addr, "crashpoint api listening");

    axum::serve(tokio::net::TcpListener::bind(addr).await?, app).await?;
    Ok(())
}

async fn healthz() -> &'static str {
    "ok"
}

// --- Users -------------------------------------------------------------

async fn register_user(
    AxumState(state): AxumState<AppState>,
    Json(request): Json<RegisterUserRequest>,
) -> Result<(StatusCode, Json<RegisterUserResponse>), ApiError> {
    let name = request.name.trim();
    if name.is_empty() {
        return Err(bad_request("name is required"));
    }

    let mut store = state.store.lock().await;
    let user = ops::register_user(&mut *store, now_ms(), name.to_string())
        .await
        .map_err(error_response)?;
    Ok((
        StatusCode::CREATED,
        Json(RegisterUserResponse {
            message: "User registered successfully".to_string(),
            user: UserView::from(&user),
        }),
    ))
}

async fn deposit(
    AxumState(state): AxumState<AppState>,
    Path(user_id): Path<UserId>,
    Json(request): Json<DepositRequest>,
) -> Result<Json<BalanceResponse>, ApiError> {
    let Some(amount_cents) = amount_to_cents(request.amount) else {
        return Err(bad_request("amount must be a positive number"));
    };

    let mut store = state.store.lock().await;
    let user = ops::deposit(&mut *store, now_ms(), user_id, amount_cents)
        .await
        .map_err(error_response)?;
    Ok(Json(BalanceResponse {
        balance: cents_to_amount(user.balance_cents),
        bonus_balance: cents_to_amount(user.bonus_balance_cents),
    }))
}

async fn balance(
    AxumState(state): AxumState<AppState>,
    Path(user_id): Path<UserId>,
) -> Result<Json<BalanceResponse>, ApiError> {
    let store = state.store.lock().await;
    let user = round_query::user_balance(&*store, user_id)
        .await
        .map_err(error_response)?;
    Ok(Json(BalanceResponse {
        balance: cents_to_amount(user.balance_cents),
        bonus_balance: cents_to_amount(user.bonus_balance_cents),
    }))
}

async fn transactions(
    AxumState(state): AxumState<AppState>,
    Path(user_id): Path<UserId>,
) -> Result<Json<LedgerResponse>, ApiError> {
    let store = state.store.lock().await;
    round_query::user_balance(&*store, user_id)
        .await
        .map_err(error_response)?;
    let entries = round_query::user_ledger(&*store, user_id)
        .await
        .map_err(error_response)?;
    Ok(Json(LedgerResponse {
        entries: entries.iter().map(LedgerEntryView::from).collect(),
    }))
}

// --- Bets --------------------------------------------------------------

async fn place_bet(
    AxumState(state): AxumState<AppState>,
    Json(request): Json<PlaceBetRequest>,
) -> Result<(StatusCode, Json<PlaceBetResponse>), ApiError> {
    let Some(bet_amount_cents) = amount_to_cents(request.bet_amount) else {
        return Err(bad_request("betAmount must be a positive number"));
    };
    if !request.percentage.is_finite() {
        return Err(bad_request("percentage must be a number"));
    }

    let mut store = state.store.lock().await;
    let placed = ops::place_bet(
        &mut *store,
        now_ms(),
        request.user_id,
        request.game_round_number,
        bet_amount_cents,
        request.percentage,
        request.game_id.as_deref(),
    )
    .await
    .map_err(error_response)?;
    drop(store);

    state.notify(bet_settled_event(&placed));

    Ok((
        StatusCode::CREATED,
        Json(PlaceBetResponse {
            message: "Bet placed successfully".to_string(),
            balance: cents_to_amount(placed.bet.balance_after_cents),
            bet_round: BetRoundView::from(&placed.bet),
            game_round: GameRoundView::from(&placed.round),
        }),
    ))
}

fn bet_settled_event(placed: &crashpoint_engine::BetPlaced) -> serde_json::Value {
    serde_json::json!({
        "event": "bet.settled",
        "betId": placed.bet.id,
        "userId": placed.bet.user,
        "roundNumber": placed.round.round_number,
        "resultType": placed.bet.result_type,
        "amountChange": cents_to_signed_amount(placed.bet.amount_change_cents),
    })
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HistoryQuery {
    user_id: UserId,
    page: Option<u64>,
    limit: Option<u64>,
    result_type: Option<String>,
}

async fn bet_history(
    AxumState(state): AxumState<AppState>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<BetHistoryResponse>, ApiError> {
    let result_type = match &query.result_type {
        Some(raw) => Some(
            raw.parse::<ResultType>()
                .map_err(|_| bad_request("invalid resultType filter"))?,
        ),
        None => None,
    };

    let store = state.store.lock().await;
    let page = round_query::bet_history(
        &*store,
        query.user_id,
        query.page.unwrap_or(1),
        query.limit.unwrap_or(20),
        result_type,
    )
    .await
    .map_err(error_response)?;
    Ok(Json(BetHistoryResponse {
        bets: page.items.iter().map(BetRoundView::from).collect(),
        total_pages: page.total_pages,
        current_page: page.current_page,
        total: page.total,
    }))
}

// --- Admin rounds ------------------------------------------------------

async fn start_round(
    AxumState(state): AxumState<AppState>,
    Json(request): Json<StartRoundRequest>,
) -> Result<(StatusCode, Json<RoundResponse>), ApiError> {
    let mut store = state.store.lock().await;
    let round = ops::start_round(&mut *store, now_ms(), request.admin_id)
        .await
        .map_err(error_response)?;
    drop(store);

    info!(round = round.round_number, admin = %request.admin_id, "admin started round");
    state.notify(serde_json::json!({
        "event": "round.started",
        "roundNumber": round.round_number,
    }));

    Ok((
        StatusCode::CREATED,
        Json(RoundResponse {
            message: format!("Round #{} started successfully", round.round_number),
            round: GameRoundView::from(&round),
        }),
    ))
}

async fn crash_round(
    AxumState(state): AxumState<AppState>,
    Json(request): Json<CrashRoundRequest>,
) -> Result<Json<RoundResponse>, ApiError> {
    let mut store = state.store.lock().await;
    let round = ops::crash_round(&mut *store, now_ms(), request.admin_id, request.multiplier)
        .await
        .map_err(error_response)?;
    drop(store);

    info!(round = round.round_number, admin = %request.admin_id, "admin crashed round");
    state.notify(serde_json::json!({
        "event": "round.crashed",
        "roundNumber": round.round_number,
        "multiplier": round.multiplier,
    }));

    Ok(Json(RoundResponse {
        message: format!(
            "Round #{} crashed at multiplier {}",
            round.round_number, round.multiplier
        ),
        round: GameRoundView::from(&round),
    }))
}

async fn complete_round(
    AxumState(state): AxumState<AppState>,
    Path(round_number): Path<u64>,
) -> Result<Json<RoundResponse>, ApiError> {
    let mut store = state.store.lock().await;
    let round = ops::complete_round(&mut *store, now_ms(), round_number)
        .await
        .map_err(error_response)?;
    drop(store);

    state.notify(serde_json::json!({
        "event": "round.completed",
        "roundNumber": round.round_number,
    }));

    Ok(Json(RoundResponse {
        message: format!("Round #{} completed successfully", round.round_number),
        round: GameRoundView::from(&round),
    }))
}

async fn current_round(
    AxumState(state): AxumState<AppState>,
) -> Result<Json<CurrentRoundResponse>, ApiError> {
    let store = state.store.lock().await;
    let current = round_query::current_round(&*store)
        .await
        .map_err(error_response)?;
    Ok(Json(match current {
        Some((round, statistics)) => CurrentRoundResponse {
            message: None,
            round: Some(GameRoundView::from(&round)),
            statistics: Some(RoundStatisticsView::from(&statistics)),
        },
        None => CurrentRoundResponse {
            message: Some("No active round".to_string()),
            round: None,
            statistics: None,
        },
    }))
}

async fn round_statistics(
    AxumState(state): AxumState<AppState>,
    Path(round_number): Path<u64>,
) -> Result<Json<StatisticsResponse>, ApiError> {
    let store = state.store.lock().await;
    let statistics = round_query::round_statistics(&*store, round_number)
        .await
        .map_err(error_response)?;
    Ok(Json(StatisticsResponse {
        statistics: RoundStatisticsView::from(&statistics),
    }))
}

async fn round_details(
    AxumState(state): AxumState<AppState>,
    Path(round_number): Path<u64>,
) -> Result<Json<RoundDetailsResponse>, ApiError> {
    let store = state.store.lock().await;
    let (round, bets, statistics) = round_query::round_details(&*store, round_number)
        .await
        .map_err(error_response)?;
    Ok(Json(RoundDetailsResponse {
        round: GameRoundView::from(&round),
        bets: bets.iter().map(BetRoundView::from).collect(),
        statistics: RoundStatisticsView::from(&statistics),
    }))
}

#[derive(Debug, Deserialize)]
struct RoundsQuery {
    page: Option<u64>,
    limit: Option<u64>,
    status: Option<String>,
}

async fn recent_rounds(
    AxumState(state): AxumState<AppState>,
    Query(query): Query<RoundsQuery>,
) -> Result<Json<RecentRoundsResponse>, ApiError> {
    let status = match &query.status {
        Some(raw) => Some(
            raw.parse::<RoundStatus>()
                .map_err(|_| bad_request("invalid status filter"))?,
        ),
        None => None,
    };

    let store = state.store.lock().await;
    let page = round_query::recent_rounds(
        &*store,
        query.page.unwrap_or(1),
        query.limit.unwrap_or(20),
        status,
    )
    .await
    .map_err(error_response)?;
    Ok(Json(RecentRoundsResponse {
        rounds: page.items.iter().map(GameRoundView::from).collect(),
        total_pages: page.total_pages,
        current_page: page.current_page,
        total: page.total,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use crashpoint_engine::mocks::seed_funded_user;
    use tower::ServiceExt;

    fn test_state() -> AppState {
        AppState {
            store: Arc::new(Mutex::new(Memory::default())),
            notifier: None,
        }
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn send(state: &AppState, request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = router(state.clone()).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn test_healthz() {
        let response = router(test_state())
            .oneshot(get_request("/healthz"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_register_deposit_and_balance() {
        let state = test_state();

        let (status, body) =
            send(&state, post_json("/api/users", serde_json::json!({"name": "alice"}))).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["message"], "User registered successfully");
        let user_id = body["user"]["id"].as_str().unwrap().to_string();

        let (status, body) = send(
            &state,
            post_json(
                &format!("/api/users/{user_id}/deposit"),
                serde_json::json!({"amount": 250.0}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["balance"], 250.0);

        let (status, body) =
            send(&state, get_request(&format!("/api/users/{user_id}/balance"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["balance"], 250.0);
        assert_eq!(body["bonusBalance"], 0.0);

        let (status, body) = send(
            &state,
            get_request(&format!("/api/users/{user_id}/transactions")),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["entries"].as_array().unwrap().len(), 1);
        assert_eq!(body["entries"][0]["kind"], "deposit");
    }

    #[tokio::test]
    async fn test_register_rejects_blank_name() {
        let (status, body) = send(
            &test_state(),
            post_json("/api/users", serde_json::json!({"name": "  "})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "name is required");
    }

    #[tokio::test]
    async fn test_full_bet_flow_over_http() {
        let state = test_state();
        let user_id = {
            let mut store = state.store.lock().await;
            seed_funded_user(&mut store, 20_000).await.unwrap()
        };
        let admin = UserId::generate();

        let (status, body) = send(
            &state,
            post_json(
                "/api/admin/game-rounds/start",
                serde_json::json!({"adminId": admin}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["round"]["roundNumber"], 1);
        assert_eq!(body["round"]["status"], "in-progress");

        let (status, body) = send(
            &state,
            post_json(
                "/api/bet-rounds/place",
                serde_json::json!({
                    "userId": user_id,
                    "gameRoundNumber": 1,
                    "betAmount": 100.0,
                    "percentage": 50.0,
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["message"], "Bet placed successfully");
        assert_eq!(body["betRound"]["resultType"], "win");
        assert_eq!(body["betRound"]["amountChange"], 50.0);
        assert_eq!(body["balance"], 150.0);

        let (status, body) = send(
            &state,
            post_json(
                "/api/admin/game-rounds/crash",
                serde_json::json!({"adminId": admin, "multiplier": 2.0}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Round #1 crashed at multiplier 2");
        assert_eq!(body["round"]["status"], "crashed");

        // Win reversed by the crash: 150 - 50 = 100.
        let (_, body) =
            send(&state, get_request(&format!("/api/users/{user_id}/balance"))).await;
        assert_eq!(body["balance"], 100.0);

        let (status, body) = send(
            &state,
            get_request("/api/admin/game-rounds/1/statistics"),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["statistics"]["losses"], 1);
        assert_eq!(body["statistics"]["wins"], 0);

        let (status, body) = send(
            &state,
            get_request(&format!("/api/bet-rounds/history?userId={user_id}")),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 1);
        assert_eq!(body["bets"][0]["resultType"], "loss");
    }

    #[tokio::test]
    async fn test_history_tolerates_huge_page_numbers() {
        let state = test_state();
        let user_id = {
            let mut store = state.store.lock().await;
            seed_funded_user(&mut store, 20_000).await.unwrap()
        };

        let (status, body) = send(
            &state,
            get_request(&format!(
                "/api/bet-rounds/history?userId={user_id}&page={}&limit=2",
                u64::MAX
            )),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["bets"].as_array().unwrap().is_empty());
        assert_eq!(body["total"], 0);
    }

    #[tokio::test]
    async fn test_error_statuses() {
        let state = test_state();
        let unknown = UserId::generate();

        let (status, _) = send(
            &state,
            get_request(&format!("/api/users/{unknown}/balance")),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = send(
            &state,
            post_json(
                "/api/admin/game-rounds/crash",
                serde_json::json!({"adminId": unknown}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "No active round found");

        let (status, _) = send(
            &state,
            post_json(
                "/api/bet-rounds/place",
                serde_json::json!({
                    "userId": unknown,
                    "betAmount": -3.0,
                    "percentage": 10.0,
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(&state, get_request("/api/admin/game-rounds/9")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_current_round_endpoint() {
        let state = test_state();

        let (status, body) = send(&state, get_request("/api/admin/game-rounds/current")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "No active round");

        send(
            &state,
            post_json(
                "/api/admin/game-rounds/start",
                serde_json::json!({"adminId": UserId::generate()}),
            ),
        )
        .await;

        let (status, body) = send(&state, get_request("/api/admin/game-rounds/current")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["round"]["roundNumber"], 1);
        assert_eq!(body["statistics"]["totalBets"], 0);
    }

    #[tokio::test]
    async fn test_webhook_receives_lifecycle_and_settlement_events() {
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel::<serde_json::Value>();
        let sink = Router::new().route(
            "/hook",
            post(move |Json(event): Json<serde_json::Value>| {
                let tx = tx.clone();
                async move {
                    let _ = tx.send(event);
                    StatusCode::OK
                }
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let _ = axum::serve(listener, sink).await;
        });

        let state = AppState {
            store: Arc::new(Mutex::new(Memory::default())),
            notifier: Some(Notifier::new(format!("http://{addr}/hook"))),
        };
        let user_id = {
            let mut store = state.store.lock().await;
            seed_funded_user(&mut store, 20_000).await.unwrap()
        };
        let admin = UserId::generate();

        send(
            &state,
            post_json(
                "/api/admin/game-rounds/start",
                serde_json::json!({"adminId": admin}),
            ),
        )
        .await;
        let event = tokio::time::timeout(std::time::Duration::from_secs(5), rx.recv())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(event["event"], "round.started");
        assert_eq!(event["roundNumber"], 1);

        send(
            &state,
            post_json(
                "/api/bet-rounds/place",
                serde_json::json!({
                    "userId": user_id,
                    "betAmount": 100.0,
                    "percentage": 50.0,
                }),
            ),
        )
        .await;
        let event = tokio::time::timeout(std::time::Duration::from_secs(5), rx.recv())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(event["event"], "bet.settled");
        assert_eq!(event["betId"], 1);
        assert_eq!(event["roundNumber"], 1);
        assert_eq!(event["resultType"], "win");
        assert_eq!(event["amountChange"], 50.0);
    }

    #[tokio::test]
    async fn test_recent_rounds_listing() {
        let state = test_state();
        let admin = UserId::generate();
        for _ in 0..3 {
            send(
                &state,
                post_json(
                    "/api/admin/game-rounds/start",
                    serde_json::json!({"adminId": admin}),
                ),
            )
            .await;
            send(
                &state,
                post_json(
                    "/api/admin/game-rounds/crash",
                    serde_json::json!({"adminId": admin}),
                ),
            )
            .await;
        }

        let (status, body) = send(
            &state,
            get_request("/api/admin/game-rounds?page=1&limit=2&status=crashed"),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 3);
        assert_eq!(body["totalPages"], 2);
        assert_eq!(body["rounds"][0]["roundNumber"], 3);

        let (status, _) = send(&state, get_request("/api/admin/game-rounds?status=bogus")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
