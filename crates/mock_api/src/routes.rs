use axum::http::{header, Method};
use axum::{
    middleware,
    routing::{get, patch, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::shared::state::AppState;
use crate::socket::socket_handler;
use crate::system::auth::require_bearer;

/// Every route the console calls, nested under the configured API prefix.
fn api_routes() -> Router<AppState> {
    Router::new()
        // A001 Sales
        .route("/sale/getAll", get(handlers::a001_sale::list))
        .route("/sale/upcoming-sales", get(handlers::a001_sale::upcoming))
        .route("/sale/create", post(handlers::a001_sale::create))
        .route("/sale/update/:id", put(handlers::a001_sale::update))
        .route("/sale/addToken/:id", patch(handlers::a001_sale::add_token))
        .route(
            "/sale/upload-image/:id",
            patch(handlers::a001_sale::upload_invoice),
        )
        .route(
            "/sale/mark-completed/:id",
            patch(handlers::a001_sale::mark_completed),
        )
        // A002 Assignments
        .route("/assined/get-assined", get(handlers::a002_assignment::list))
        .route("/assined/create", post(handlers::a002_assignment::create))
        .route("/assined/update/:id", patch(handlers::a002_assignment::update))
        .route(
            "/assined/update-status/:id",
            patch(handlers::a002_assignment::update_status),
        )
        .route(
            "/assined/delete/:id",
            axum::routing::delete(handlers::a002_assignment::delete),
        )
        // A003 Production processes
        .route(
            "/production-process/all",
            get(handlers::a003_production_process::list),
        )
        .route(
            "/production-process/allocation",
            post(handlers::a003_production_process::request_allocation),
        )
        .route(
            "/production-process/start-production",
            put(handlers::a003_production_process::start),
        )
        .route(
            "/production-process/pause",
            put(handlers::a003_production_process::pause),
        )
        .route(
            "/production-process/move-to-inventory",
            put(handlers::a003_production_process::move_to_inventory),
        )
        .route(
            "/production-process/out-finish-goods",
            put(handlers::a003_production_process::out_finish_goods),
        )
        .route(
            "/production-process/update-status",
            put(handlers::a003_production_process::update_progress),
        )
        .route(
            "/production-process/bulk-delete",
            post(handlers::a003_production_process::bulk_delete),
        )
        .route(
            "/production-process/:id",
            get(handlers::a003_production_process::get_by_id),
        )
        // A004 BOMs
        .route("/bom", get(handlers::a004_bom::list))
        .route("/bom/", get(handlers::a004_bom::list))
        .route(
            "/bom/sales-order-status/:id",
            get(handlers::a004_bom::sales_order_status),
        )
        .route(
            "/bom/approve/inventory/raw-materials",
            post(handlers::a004_bom::approve_raw_materials),
        )
        // A005 Payments
        .route("/payment/all", get(handlers::a005_payment::list))
        .route("/payment/:id", get(handlers::a005_payment::get_by_id))
        // A006 Invoices
        .route("/invoice/:id", get(handlers::a006_invoice::get_by_id))
        // A007 Employees
        .route("/auth/user", get(handlers::a007_employee::current_user))
        .route("/auth/user/:id", get(handlers::a007_employee::get_by_id))
        .route("/auth/all", get(handlers::a007_employee::list))
        // A008 Roles
        .route(
            "/role",
            get(handlers::a008_role::list).post(handlers::a008_role::create),
        )
        .route(
            "/role/",
            get(handlers::a008_role::list).post(handlers::a008_role::create),
        )
        // D400 Sensors
        .route(
            "/devicedata/get-device-data",
            get(handlers::d400_sensors::history),
        )
        .route(
            "/devicedata/dashboardtodb",
            post(handlers::d400_sensors::write_control),
        )
        // D401 Machine status
        .route(
            "/dashboard/machine-data",
            get(handlers::d401_machine_status::machine_data),
        )
        .route_layer(middleware::from_fn(require_bearer))
}

/// Full application: API, Socket.IO, uploaded files and the built console.
pub fn configure_routes(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::AUTHORIZATION]);

    let prefix = state.config.api_prefix();
    let router = if prefix.is_empty() {
        Router::new().merge(api_routes())
    } else {
        Router::new().nest(&prefix, api_routes())
    };

    router
        .route("/health", get(|| async { "ok" }))
        .route("/socket.io", get(socket_handler))
        .route("/socket.io/", get(socket_handler))
        .route("/uploads/:name", get(handlers::a006_invoice::serve_upload))
        .fallback_service(ServeDir::new(state.config.static_dir()))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use crate::test_support::{read_json, send, test_app};
    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode};
    use serde_json::json;
    use tower::util::ServiceExt;

    #[tokio::test]
    async fn test_api_requires_bearer_token() {
        let app = test_app();
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/api/sale/getAll")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = read_json(response).await;
        assert_eq!(body["success"], json!(false));
        assert_eq!(body["message"], json!("Not authorized, token missing"));

        let response = send(&app, Method::GET, "/api/sale/getAll", None).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_and_unknown_routes() {
        let app = test_app();
        let response = app
            .clone()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = send(&app, Method::GET, "/api/nothing-here", None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_malformed_json_is_enveloped() {
        let app = test_app();
        let response = app
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/api/sale/create")
                    .header("Authorization", "Bearer t")
                    .header("Content-Type", "application/json")
                    .body(Body::from("{not json"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(read_json(response).await["success"], json!(false));
    }
}
