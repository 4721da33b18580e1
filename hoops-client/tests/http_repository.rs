//! HttpRepository against an in-process fake of the remote API

use std::time::Duration;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use hoops_client::{ApiClient, ClientError, MemoryRepository, Repository};
use hoops_core::Entity;
use hoops_core::domain::{Position, Team};
use tokio_util::sync::CancellationToken;

// =============================================================================
// Fake remote API
// =============================================================================

fn fake_api<T: Entity>(repo: MemoryRepository<T>) -> Router {
    Router::new()
        .route(
            &format!("/api/{}", T::RESOURCE),
            get(list::<T>).post(create::<T>),
        )
        .route(
            &format!("/api/{}/{{id}}", T::RESOURCE),
            get(read::<T>).put(replace::<T>).delete(remove::<T>),
        )
        .with_state(repo)
}

async fn list<T: Entity>(State(repo): State<MemoryRepository<T>>) -> Json<Vec<T>> {
    Json(repo.get_all(&CancellationToken::new()).await.unwrap())
}

async fn read<T: Entity>(
    State(repo): State<MemoryRepository<T>>,
    Path(id): Path<i32>,
) -> Result<Json<T>, StatusCode> {
    repo.get(id, &CancellationToken::new())
        .await
        .unwrap()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn create<T: Entity>(
    State(repo): State<MemoryRepository<T>>,
    Json(entity): Json<T>,
) -> (StatusCode, Json<T>) {
    (StatusCode::CREATED, Json(repo.insert(entity)))
}

async fn replace<T: Entity>(
    State(repo): State<MemoryRepository<T>>,
    Path(id): Path<i32>,
    Json(mut entity): Json<T>,
) -> StatusCode {
    entity.set_id(id);
    match repo.update(&entity, &CancellationToken::new()).await {
        Ok(()) => StatusCode::NO_CONTENT,
        Err(_) => StatusCode::NOT_FOUND,
    }
}

async fn remove<T: Entity>(
    State(repo): State<MemoryRepository<T>>,
    Path(id): Path<i32>,
) -> StatusCode {
    match repo.delete(id, &CancellationToken::new()).await {
        Ok(()) => StatusCode::NO_CONTENT,
        Err(_) => StatusCode::NOT_FOUND,
    }
}

async fn spawn(router: Router) -> ApiClient {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    ApiClient::new(format!("http://{addr}/api"))
}

fn team(name: &str, wins: i32, losses: i32) -> Team {
    Team {
        name: name.to_string(),
        season_wins: wins,
        season_loss: losses,
        ..Default::default()
    }
}

// =============================================================================
// Round trips
// =============================================================================

#[tokio::test]
async fn test_add_then_get_returns_same_fields() {
    let client = spawn(fake_api(MemoryRepository::<Team>::new())).await;
    let teams = client.repository::<Team>();
    let cancel = CancellationToken::new();

    let celtics = Team {
        national_rank: 1,
        ..team("Celtics", 64, 18)
    };
    teams.add(&celtics, &cancel).await.unwrap();

    let all = teams.get_all(&cancel).await.unwrap();
    assert_eq!(all.len(), 1);
    let id = all[0].id;
    assert!(id > 0);

    let fetched = teams.get(id, &cancel).await.unwrap().unwrap();
    assert_eq!(fetched, Team { id, ..celtics });
}

#[tokio::test]
async fn test_get_all_counts_adds_minus_deletes() {
    let client = spawn(fake_api(MemoryRepository::<Team>::new())).await;
    let teams = client.repository::<Team>();
    let cancel = CancellationToken::new();

    for (i, name) in ["Bucks", "Magic", "Pistons", "Pacers"].iter().enumerate() {
        teams.add(&team(name, i as i32, 0), &cancel).await.unwrap();
    }
    teams.delete(1, &cancel).await.unwrap();

    assert_eq!(teams.get_all(&cancel).await.unwrap().len(), 3);
    assert!(teams.get(1, &cancel).await.unwrap().is_none());
}

#[tokio::test]
async fn test_update_replaces_stored_entity() {
    let backing = MemoryRepository::<Position>::new();
    let stored = backing.insert(Position {
        name: "Guard".to_string(),
        ..Default::default()
    });
    let client = spawn(fake_api(backing.clone())).await;
    let positions = client.repository::<Position>();
    let cancel = CancellationToken::new();

    let renamed = Position {
        id: stored.id,
        name: "Shooting Guard".to_string(),
    };
    positions.update(&renamed, &cancel).await.unwrap();

    let fetched = positions.get(stored.id, &cancel).await.unwrap();
    assert_eq!(fetched, Some(renamed));
}

#[tokio::test]
async fn test_missing_entities() {
    let client = spawn(fake_api(MemoryRepository::<Position>::new())).await;
    let positions = client.repository::<Position>();
    let cancel = CancellationToken::new();

    assert!(positions.get(7, &cancel).await.unwrap().is_none());

    let err = positions.delete(7, &cancel).await.unwrap_err();
    assert!(matches!(err, ClientError::NotFound(_)));

    let ghost = Position {
        id: 7,
        name: "Center".to_string(),
    };
    let err = positions.update(&ghost, &cancel).await.unwrap_err();
    assert!(err.is_not_found());
}

// =============================================================================
// Failure kinds
// =============================================================================

#[tokio::test]
async fn test_empty_collection_responses() {
    let router = Router::new()
        .route("/api/Teams", get(|| async { StatusCode::NO_CONTENT }))
        .route("/api/Positions", get(|| async { "" }));
    let client = spawn(router).await;
    let cancel = CancellationToken::new();

    let teams = client.repository::<Team>().get_all(&cancel).await.unwrap();
    assert!(teams.is_empty());

    let positions = client.repository::<Position>().get_all(&cancel).await.unwrap();
    assert!(positions.is_empty());
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let router = Router::new().route("/api/Teams", get(|| async { "<html>oops</html>" }));
    let client = spawn(router).await;

    let result = client
        .repository::<Team>()
        .get_all(&CancellationToken::new())
        .await;
    assert!(matches!(result, Err(ClientError::Decode(_))));
}

#[tokio::test]
async fn test_rejected_payload() {
    let router = Router::new().route(
        "/api/Teams",
        get(|| async { StatusCode::INTERNAL_SERVER_ERROR })
            .post(|| async { (StatusCode::BAD_REQUEST, "name is required") }),
    );
    let client = spawn(router).await;
    let teams = client.repository::<Team>();
    let cancel = CancellationToken::new();

    let err = teams.add(&Team::default(), &cancel).await.unwrap_err();
    match err {
        ClientError::Rejected { status, message } => {
            assert_eq!(status, 400);
            assert_eq!(message, "name is required");
        }
        other => panic!("unexpected error: {other:?}"),
    }

    let err = teams.get_all(&cancel).await.unwrap_err();
    assert!(matches!(err, ClientError::Rejected { status: 500, .. }));
}

#[tokio::test]
async fn test_cancellation_aborts_pending_call() {
    let router = Router::new().route(
        "/api/Teams",
        get(|| async {
            tokio::time::sleep(Duration::from_secs(30)).await;
            "[]"
        }),
    );
    let client = spawn(router).await;
    let teams = client.repository::<Team>();

    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        trigger.cancel();
    });

    let result = tokio::time::timeout(Duration::from_secs(5), teams.get_all(&cancel))
        .await
        .expect("cancelled call should return promptly");
    assert!(matches!(result, Err(ClientError::Cancelled)));
}

#[tokio::test]
async fn test_cancellation_aborts_stalled_rejection_body() {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    // Error headers promise a body that never finishes arriving
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = [0u8; 1024];
        let _ = socket.read(&mut request).await;
        socket
            .write_all(b"HTTP/1.1 500 Internal Server Error\r\nContent-Length: 100\r\n\r\npartial")
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_secs(30)).await;
        drop(socket);
    });

    let client = ApiClient::new(format!("http://{addr}/api"));
    let teams = client.repository::<Team>();

    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        trigger.cancel();
    });

    let result = tokio::time::timeout(Duration::from_secs(5), teams.get_all(&cancel))
        .await
        .expect("cancelled call should return promptly");
    assert!(matches!(result, Err(ClientError::Cancelled)));
}
