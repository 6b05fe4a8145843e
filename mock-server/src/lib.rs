use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::{
    extract::{Path, Query, Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Accommodation {
    pub id: u64,
    pub name: String,
    pub city: String,
    pub accommodation_type: String,
    pub price_per_night: u32,
    pub description: String,
    pub amenities: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub safety_rating: Option<u8>,
    pub verified: bool,
    pub is_active: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub full_name: String,
    pub email: String,
    pub age: u32,
    pub gender: String,
    pub interests: Vec<String>,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct SignupRequest {
    pub full_name: String,
    pub age: u32,
    pub email: String,
    pub gender: String,
    pub password: String,
    #[serde(default)]
    pub interests: Vec<String>,
}

#[derive(Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

#[derive(Serialize, Deserialize)]
pub struct SearchResponse {
    pub accommodations: Vec<Accommodation>,
}

#[derive(Serialize, Deserialize)]
pub struct AccommodationResponse {
    pub accommodation: Accommodation,
}

#[derive(Deserialize)]
pub struct SearchQuery {
    pub city: Option<String>,
    // checkin / checkout are accepted and ignored
}

struct StoredUser {
    user: User,
    password: String,
}

pub struct AppState {
    accommodations: Vec<Accommodation>,
    users: RwLock<Vec<StoredUser>>,
    cold_starts: AtomicUsize,
}

type SharedState = Arc<AppState>;

pub fn app() -> Router {
    app_with_cold_starts(0)
}

/// Build the app with the first `cold_starts` requests answered 503, which
/// simulates a dormant backend warming up.
pub fn app_with_cold_starts(cold_starts: usize) -> Router {
    let state: SharedState = Arc::new(AppState {
        accommodations: seed_accommodations(),
        users: RwLock::new(Vec::new()),
        cold_starts: AtomicUsize::new(cold_starts),
    });
    Router::new()
        .route("/health", get(health))
        .route("/auth/login", post(login))
        .route("/auth/signup", post(signup))
        .route("/accommodations/search", get(search))
        .route("/accommodations/{id}", get(get_accommodation))
        .layer(middleware::from_fn_with_state(state.clone(), cold_start_gate))
        .with_state(state)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

pub async fn run_with_cold_starts(
    listener: TcpListener,
    cold_starts: usize,
) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with_cold_starts(cold_starts)).await
}

fn seed_accommodations() -> Vec<Accommodation> {
    vec![
        Accommodation {
            id: 101,
            name: "Harbor View Hostel".to_string(),
            city: "Kochi".to_string(),
            accommodation_type: "hostel".to_string(),
            price_per_night: 1500,
            description: "Budget hostel near the harbor with a rooftop terrace.".to_string(),
            amenities: vec!["WiFi".to_string(), "Lockers".to_string()],
            safety_rating: Some(4),
            verified: true,
            is_active: true,
        },
        Accommodation {
            id: 102,
            name: "Lakeside Guesthouse".to_string(),
            city: "Udaipur".to_string(),
            accommodation_type: "guesthouse".to_string(),
            price_per_night: 2200,
            description: "Family-run guesthouse overlooking the lake.".to_string(),
            amenities: vec!["WiFi".to_string(), "Breakfast".to_string()],
            safety_rating: Some(5),
            verified: true,
            is_active: true,
        },
        Accommodation {
            id: 103,
            name: "City Central Hotel".to_string(),
            city: "Bangalore".to_string(),
            accommodation_type: "hotel".to_string(),
            price_per_night: 3400,
            description: "Business hotel in the city center.".to_string(),
            amenities: vec![
                "WiFi".to_string(),
                "Room Service".to_string(),
                "Gym".to_string(),
            ],
            safety_rating: Some(5),
            verified: true,
            is_active: true,
        },
        Accommodation {
            id: 104,
            name: "Old Town Homestay".to_string(),
            city: "Jaipur".to_string(),
            accommodation_type: "homestay".to_string(),
            price_per_night: 1900,
            description: "Quiet homestay in the old town.".to_string(),
            amenities: vec!["WiFi".to_string(), "Home-cooked meals".to_string()],
            // no safety rating on the wire; clients fall back to their default
            safety_rating: None,
            verified: false,
            is_active: true,
        },
    ]
}

async fn cold_start_gate(State(state): State<SharedState>, request: Request, next: Next) -> Response {
    let starting = state
        .cold_starts
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
        .is_ok();
    if starting {
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({"message": "service starting"})),
        )
            .into_response();
    }
    next.run(request).await
}

async fn health() -> Json<Value> {
    Json(json!({"status": "ok"}))
}

async fn login(
    State(state): State<SharedState>,
    Json(input): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, (StatusCode, Json<Value>)> {
    let users = state.users.read().await;
    users
        .iter()
        .find(|u| u.user.email == input.email && u.password == input.password)
        .map(|stored| {
            Json(AuthResponse {
                token: Uuid::new_v4().to_string(),
                user: stored.user.clone(),
            })
        })
        .ok_or((
            StatusCode::UNAUTHORIZED,
            Json(json!({"message": "Invalid email or password"})),
        ))
}

async fn signup(
    State(state): State<SharedState>,
    Json(input): Json<SignupRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), (StatusCode, Json<Value>)> {
    let mut users = state.users.write().await;
    if users.iter().any(|u| u.user.email == input.email) {
        return Err((
            StatusCode::CONFLICT,
            Json(json!({"message": "An account with this email already exists"})),
        ));
    }
    let user = User {
        id: users.len() as u64 + 1,
        full_name: input.full_name,
        email: input.email,
        age: input.age,
        gender: input.gender,
        interests: input.interests,
    };
    users.push(StoredUser {
        user: user.clone(),
        password: input.password,
    });
    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            token: Uuid::new_v4().to_string(),
            user,
        }),
    ))
}

async fn search(
    State(state): State<SharedState>,
    Query(query): Query<SearchQuery>,
) -> Json<SearchResponse> {
    let needle = query
        .city
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_lowercase);
    let accommodations = state
        .accommodations
        .iter()
        .filter(|acc| match &needle {
            Some(needle) => acc.city.to_lowercase().contains(needle),
            None => true,
        })
        .cloned()
        .collect();
    Json(SearchResponse { accommodations })
}

async fn get_accommodation(
    State(state): State<SharedState>,
    Path(id): Path<u64>,
) -> Result<Json<AccommodationResponse>, (StatusCode, Json<Value>)> {
    state
        .accommodations
        .iter()
        .find(|acc| acc.id == id)
        .map(|acc| {
            Json(AccommodationResponse {
                accommodation: acc.clone(),
            })
        })
        .ok_or((
            StatusCode::NOT_FOUND,
            Json(json!({"message": "Accommodation not found"})),
        ))
}
