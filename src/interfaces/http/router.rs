//! API Router with Swagger UI

use axum::{
    extract::FromRef,
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::application::{IdentityService, ProductService, PvzService, ReceptionService};
use crate::domain::UserRole;
use crate::infrastructure::crypto::jwt::JwtConfig;
use crate::infrastructure::TxManager;
use crate::interfaces::http::common::{ErrorResponse, MessageResponse};
use crate::interfaces::http::middleware::{auth_middleware, require_role, AuthState};
use crate::interfaces::http::modules::{
    auth, health, metrics, products, pvz, receptions, request_id::request_id_middleware,
};

const EMPLOYEE: &[UserRole] = &[UserRole::Employee];
const MODERATOR: &[UserRole] = &[UserRole::Moderator];
const STAFF: &[UserRole] = &[UserRole::Employee, UserRole::Moderator];

/// Everything the API routes need. Handlers pull their own slice of it
/// through `FromRef`.
#[derive(Clone)]
pub struct AppState {
    pub pvz: PvzService,
    pub receptions: ReceptionService,
    pub products: ProductService,
    pub identity: IdentityService,
    pub health: health::HealthState,
}

impl AppState {
    pub fn new(tx: TxManager, jwt_config: JwtConfig) -> Self {
        Self {
            pvz: PvzService::new(tx.clone()),
            receptions: ReceptionService::new(tx.clone()),
            products: ProductService::new(tx.clone()),
            health: health::HealthState::new(tx.shared_connection()),
            identity: IdentityService::new(tx, jwt_config),
        }
    }
}

impl FromRef<AppState> for pvz::PvzHandlerState {
    fn from_ref(s: &AppState) -> Self {
        Self { pvz: s.pvz.clone() }
    }
}

impl FromRef<AppState> for receptions::ReceptionHandlerState {
    fn from_ref(s: &AppState) -> Self {
        Self {
            receptions: s.receptions.clone(),
        }
    }
}

impl FromRef<AppState> for products::ProductHandlerState {
    fn from_ref(s: &AppState) -> Self {
        Self {
            products: s.products.clone(),
        }
    }
}

impl FromRef<AppState> for auth::AuthHandlerState {
    fn from_ref(s: &AppState) -> Self {
        Self {
            identity: s.identity.clone(),
        }
    }
}

impl FromRef<AppState> for health::HealthState {
    fn from_ref(s: &AppState) -> Self {
        s.health.clone()
    }
}

/// Security scheme modifier for OpenAPI
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Token from /dummyLogin or /login"))
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::dummy_login,
        auth::register,
        auth::login,
        pvz::create_pvz,
        pvz::list_pvz,
        receptions::create_reception,
        receptions::close_last_reception,
        products::add_product,
        products::delete_last_product,
    ),
    components(
        schemas(
            ErrorResponse,
            MessageResponse,
            auth::DummyLoginRequest,
            auth::RegisterRequest,
            auth::LoginRequest,
            auth::UserDto,
            pvz::CreatePvzRequest,
            pvz::PvzDto,
            pvz::PvzWithReceptionsDto,
            pvz::PvzListResponse,
            receptions::CreateReceptionRequest,
            receptions::ReceptionDto,
            receptions::ReceptionWithProductsDto,
            products::AddProductRequest,
            products::ProductDto,
            health::HealthResponse,
            health::ComponentHealth,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Liveness and database reachability"),
        (name = "Authentication", description = "Tokens for employees and moderators"),
        (name = "Pickup Points", description = "Pickup point registration and listing"),
        (name = "Receptions", description = "Opening and closing goods receptions"),
        (name = "Products", description = "Products inside the open reception"),
    ),
    info(
        title = "PVZ Service API",
        version = "1.0.0",
        description = "Pickup points, goods receptions and products"
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes
pub fn create_api_router(state: AppState) -> Router {
    let auth_state = AuthState {
        jwt_config: state.identity.jwt_config().clone(),
    };

    let public_routes = Router::new()
        .route("/dummyLogin", post(auth::dummy_login))
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/health", get(health::health_check));

    // Role guards sit on each method router; the token check wraps them all.
    let protected_routes = Router::new()
        .route(
            "/pvz",
            post(pvz::create_pvz)
                .route_layer(from_fn_with_state(MODERATOR, require_role))
                .merge(get(pvz::list_pvz).route_layer(from_fn_with_state(STAFF, require_role))),
        )
        .route(
            "/receptions",
            post(receptions::create_reception)
                .route_layer(from_fn_with_state(EMPLOYEE, require_role)),
        )
        .route(
            "/pvz/{pvzId}/close_last_reception",
            post(receptions::close_last_reception)
                .route_layer(from_fn_with_state(EMPLOYEE, require_role)),
        )
        .route(
            "/products",
            post(products::add_product).route_layer(from_fn_with_state(EMPLOYEE, require_role)),
        )
        .route(
            "/pvz/{pvzId}/delete_last_product",
            post(products::delete_last_product)
                .route_layer(from_fn_with_state(EMPLOYEE, require_role)),
        )
        .route_layer(from_fn_with_state(auth_state, auth_middleware));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(from_fn(metrics::http_metrics_middleware))
        .with_state(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(from_fn(request_id_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Router for the metrics port
pub fn create_metrics_router(handle: PrometheusHandle) -> Router {
    Router::new()
        .route("/metrics", get(metrics::prometheus_metrics))
        .with_state(metrics::MetricsState { handle })
}
