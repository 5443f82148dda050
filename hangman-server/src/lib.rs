use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;
use warp::Filter;
use warp::http::StatusCode;

use crate::error::ServiceError;
use crate::game_manager::GameManager;
use hangman_types::{
    ApiError, CreateUserRequest, ErrorKind, MakeMoveRequest, NewGameRequest, StringMessage,
};

pub mod config;
pub mod error;
pub mod game_manager;
pub mod stats;

const MAX_BODY_BYTES: u64 = 16 * 1024;

type JsonReply = warp::reply::WithStatus<warp::reply::Json>;

pub fn create_routes(
    game_manager: Arc<GameManager>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    let game_manager_filter = warp::any().map({
        let game_manager = game_manager.clone();
        move || game_manager.clone()
    });

    // Health check endpoint
    let health = warp::path("health")
        .and(warp::get())
        .map(|| warp::reply::with_status("OK", StatusCode::OK));

    let create_user = warp::path!("user")
        .and(warp::post())
        .and(warp::body::content_length_limit(MAX_BODY_BYTES))
        .and(warp::body::json::<CreateUserRequest>())
        .and(game_manager_filter.clone())
        .and_then(handle_create_user);

    let new_game = warp::path!("game")
        .and(warp::post())
        .and(warp::body::content_length_limit(MAX_BODY_BYTES))
        .and(warp::body::json::<NewGameRequest>())
        .and(game_manager_filter.clone())
        .and_then(handle_new_game);

    let get_game = warp::path!("game" / String)
        .and(warp::get())
        .and(game_manager_filter.clone())
        .and_then(handle_get_game);

    let make_move = warp::path!("game" / String)
        .and(warp::put())
        .and(warp::body::content_length_limit(MAX_BODY_BYTES))
        .and(warp::body::json::<MakeMoveRequest>())
        .and(game_manager_filter.clone())
        .and_then(handle_make_move);

    let scores = warp::path!("scores")
        .and(warp::get())
        .and(game_manager_filter.clone())
        .and_then(handle_scores);

    let user_scores = warp::path!("scores" / "user" / String)
        .and(warp::get())
        .and(game_manager_filter.clone())
        .and_then(handle_user_scores);

    let average_attempts = warp::path!("games" / "average_attempts")
        .and(warp::get())
        .and(game_manager_filter.clone())
        .map(|game_manager: Arc<GameManager>| {
            warp::reply::json(&StringMessage::new(game_manager.get_average_remaining()))
        });

    // Out-of-band hook for schedulers; the background refresher covers the normal case
    let cache_task = warp::path!("tasks" / "cache_average_attempts")
        .and(warp::post())
        .and(game_manager_filter.clone())
        .and_then(handle_cache_average_attempts);

    // CORS configuration
    let cors = warp::cors()
        .allow_any_origin()
        .allow_headers(vec!["content-type"])
        .allow_methods(vec!["GET", "POST", "PUT"]);

    health
        .or(create_user)
        .or(new_game)
        .or(get_game)
        .or(make_move)
        .or(scores)
        .or(user_scores)
        .or(average_attempts)
        .or(cache_task)
        .with(cors)
        .with(warp::log("hangman"))
}

fn json_reply<T: Serialize>(value: &T) -> JsonReply {
    warp::reply::with_status(warp::reply::json(value), StatusCode::OK)
}

fn error_reply(err: ServiceError) -> JsonReply {
    match &err {
        ServiceError::Storage(_) => tracing::error!("Request failed: {}", err),
        _ => tracing::debug!("Request rejected: {}", err),
    }
    warp::reply::with_status(warp::reply::json(&err.to_api_error()), err.status_code())
}

fn into_reply<T: Serialize>(result: Result<T, ServiceError>) -> JsonReply {
    match result {
        Ok(value) => json_reply(&value),
        Err(err) => error_reply(err),
    }
}

fn parse_game_id(game_id: &str) -> Result<Uuid, JsonReply> {
    Uuid::parse_str(game_id).map_err(|_| {
        warp::reply::with_status(
            warp::reply::json(&ApiError::new(
                ErrorKind::InvalidInput,
                "Invalid game ID format",
            )),
            StatusCode::BAD_REQUEST,
        )
    })
}

async fn handle_create_user(
    request: CreateUserRequest,
    game_manager: Arc<GameManager>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let result = game_manager
        .create_user(&request.user_name, request.email)
        .await
        .map(|user| StringMessage::new(format!("User {} created!", user.name)));

    Ok(into_reply(result))
}

async fn handle_new_game(
    request: NewGameRequest,
    game_manager: Arc<GameManager>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let result = game_manager
        .create_game(&request.user_name, &request.phrase, request.mistakes_allowed)
        .await;

    Ok(into_reply(result))
}

async fn handle_get_game(
    game_id: String,
    game_manager: Arc<GameManager>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let game_id = match parse_game_id(&game_id) {
        Ok(id) => id,
        Err(reply) => return Ok(reply),
    };

    Ok(into_reply(game_manager.get_game(game_id).await))
}

async fn handle_make_move(
    game_id: String,
    request: MakeMoveRequest,
    game_manager: Arc<GameManager>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let game_id = match parse_game_id(&game_id) {
        Ok(id) => id,
        Err(reply) => return Ok(reply),
    };

    Ok(into_reply(
        game_manager.make_move(game_id, &request.guess_letter).await,
    ))
}

async fn handle_scores(game_manager: Arc<GameManager>) -> Result<impl warp::Reply, warp::Rejection> {
    Ok(into_reply(game_manager.list_scores().await))
}

async fn handle_user_scores(
    user_name: String,
    game_manager: Arc<GameManager>,
) -> Result<impl warp::Reply, warp::Rejection> {
    Ok(into_reply(game_manager.list_user_scores(&user_name).await))
}

async fn handle_cache_average_attempts(
    game_manager: Arc<GameManager>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let result = game_manager
        .cache_average_attempts()
        .await
        .map(|_| StringMessage::new(game_manager.get_average_remaining()));

    Ok(into_reply(result))
}

#[cfg(test)]
mod integration_tests {
    use super::*;
    use hangman_core::StatisticsCache;
    use hangman_types::{GameStatus, GameView, ScoreView};
    use migration::{Migrator, MigratorTrait};

    type Response = warp::http::Response<warp::hyper::body::Bytes>;

    async fn create_test_app()
    -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
        // Create in-memory database for tests
        let db = hangman_persistence::connection::connect_to_memory_database()
            .await
            .unwrap();
        Migrator::up(&db, None).await.unwrap();

        let game_manager = Arc::new(GameManager::new(db, Arc::new(StatisticsCache::new())));
        create_routes(game_manager)
    }

    async fn post_user<F>(app: &F, name: &str) -> Response
    where
        F: Filter + 'static,
        F::Extract: warp::Reply + Send,
    {
        warp::test::request()
            .method("POST")
            .path("/user")
            .json(&serde_json::json!({ "user_name": name }))
            .reply(app)
            .await
    }

    async fn post_game<F>(app: &F, name: &str, phrase: &str, mistakes: i32) -> GameView
    where
        F: Filter + 'static,
        F::Extract: warp::Reply + Send,
    {
        let response = warp::test::request()
            .method("POST")
            .path("/game")
            .json(&serde_json::json!({
                "user_name": name,
                "phrase": phrase,
                "mistakes_allowed": mistakes,
            }))
            .reply(app)
            .await;
        assert_eq!(response.status(), 200);
        serde_json::from_slice(response.body()).expect("Should parse GameView")
    }

    async fn put_guess<F>(app: &F, game_id: Uuid, letter: &str) -> Response
    where
        F: Filter + 'static,
        F::Extract: warp::Reply + Send,
    {
        warp::test::request()
            .method("PUT")
            .path(&format!("/game/{}", game_id))
            .json(&serde_json::json!({ "guess_letter": letter }))
            .reply(app)
            .await
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = create_test_app().await;

        let response = warp::test::request()
            .method("GET")
            .path("/health")
            .reply(&app)
            .await;

        assert_eq!(response.status(), 200);
        assert_eq!(response.body(), "OK");
    }

    #[tokio::test]
    async fn test_create_user_and_conflict() {
        let app = create_test_app().await;

        let response = post_user(&app, "alice").await;
        assert_eq!(response.status(), 200);
        let message: StringMessage = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(message.message, "User alice created!");

        let response = post_user(&app, "alice").await;
        assert_eq!(response.status(), 409);
        let error: ApiError = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(error.kind, ErrorKind::Conflict);
        assert_eq!(error.message, "A User with that name already exists!");
    }

    #[tokio::test]
    async fn test_new_game_for_unknown_user() {
        let app = create_test_app().await;

        let response = warp::test::request()
            .method("POST")
            .path("/game")
            .json(&serde_json::json!({ "user_name": "nobody", "phrase": "cat" }))
            .reply(&app)
            .await;

        assert_eq!(response.status(), 404);
        let error: ApiError = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(error.message, "A User with that name does not exist!");
    }

    #[tokio::test]
    async fn test_full_game_over_http() {
        let app = create_test_app().await;
        post_user(&app, "alice").await;

        let game = post_game(&app, "alice", "cat", 6).await;
        assert_eq!(game.visible_so_far, "???");
        assert_eq!(game.message, "Good luck playing Hangman!");

        for letter in ["c", "a"] {
            let response = put_guess(&app, game.id, letter).await;
            assert_eq!(response.status(), 200);
        }
        let response = put_guess(&app, game.id, "t").await;
        let finished: GameView = serde_json::from_slice(response.body()).unwrap();
        assert!(finished.game_over);
        assert_eq!(finished.status, GameStatus::Won);
        assert_eq!(
            finished.message,
            "Congratulations, you win! You guessed the word: cat"
        );

        let response = warp::test::request()
            .method("GET")
            .path(&format!("/game/{}", game.id))
            .reply(&app)
            .await;
        let fetched: GameView = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(fetched.visible_so_far, "cat");
        assert_eq!(fetched.message, "Time to make a move!");

        let response = warp::test::request()
            .method("GET")
            .path("/scores/user/alice")
            .reply(&app)
            .await;
        assert_eq!(response.status(), 200);
        let scores: Vec<ScoreView> = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(scores.len(), 1);
        assert!(scores[0].won);
        assert_eq!(scores[0].phrase_length, 3);
    }

    #[tokio::test]
    async fn test_invalid_guess_is_bad_request() {
        let app = create_test_app().await;
        post_user(&app, "bob").await;
        let game = post_game(&app, "bob", "dog", 3).await;

        let response = put_guess(&app, game.id, "do").await;
        assert_eq!(response.status(), 400);
        let error: ApiError = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(error.kind, ErrorKind::InvalidInput);
    }

    #[tokio::test]
    async fn test_game_id_validation() {
        let app = create_test_app().await;

        let response = warp::test::request()
            .method("GET")
            .path("/game/not-a-uuid")
            .reply(&app)
            .await;
        assert_eq!(response.status(), 400);
        let error: ApiError = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(error.message, "Invalid game ID format");

        let response = put_guess(&app, Uuid::new_v4(), "a").await;
        assert_eq!(response.status(), 404);
        let error: ApiError = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(error.message, "Game not found!");
    }

    #[tokio::test]
    async fn test_user_scores_for_unknown_user() {
        let app = create_test_app().await;

        let response = warp::test::request()
            .method("GET")
            .path("/scores/user/ghost")
            .reply(&app)
            .await;

        assert_eq!(response.status(), 404);
    }

    #[tokio::test]
    async fn test_average_attempts_endpoint() {
        let app = create_test_app().await;

        let response = warp::test::request()
            .method("GET")
            .path("/games/average_attempts")
            .reply(&app)
            .await;
        let message: StringMessage = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(message.message, "");

        post_user(&app, "carol").await;
        post_game(&app, "carol", "cat", 3).await;
        post_game(&app, "carol", "dog", 4).await;

        let response = warp::test::request()
            .method("POST")
            .path("/tasks/cache_average_attempts")
            .reply(&app)
            .await;
        assert_eq!(response.status(), 200);

        let response = warp::test::request()
            .method("GET")
            .path("/games/average_attempts")
            .reply(&app)
            .await;
        let message: StringMessage = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(message.message, "The average moves remaining is 3.50");
    }
}
