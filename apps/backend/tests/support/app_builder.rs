use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{test, web, App, Error};
use tycoon_backend::middleware::RequestTrace;
use tycoon_backend::routes;
use tycoon_backend::state::app_state::AppState;
use tycoon_backend::AppError;

/// Type alias for route configuration functions
type RouteConfigFn = Box<dyn Fn(&mut web::ServiceConfig) + Send + Sync>;

/// Builder for test Actix services wired like `main.rs` (minus CORS).
pub struct TestAppBuilder {
    state: web::Data<AppState>,
    route_config: Option<RouteConfigFn>,
}

impl TestAppBuilder {
    pub fn new(state: web::Data<AppState>) -> Self {
        Self {
            state,
            route_config: None,
        }
    }

    /// Register the production route table
    pub fn with_prod_routes(mut self) -> Self {
        self.route_config = Some(Box::new(routes::configure) as RouteConfigFn);
        self
    }

    /// Register custom routes
    pub fn with_routes<F>(mut self, config_fn: F) -> Self
    where
        F: Fn(&mut web::ServiceConfig) + Send + Sync + 'static,
    {
        self.route_config = Some(Box::new(config_fn) as RouteConfigFn);
        self
    }

    pub async fn build(
        self,
    ) -> Result<impl Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>, AppError>
    {
        let route_config = self.route_config;

        let service = test::init_service(
            App::new()
                .wrap(RequestTrace)
                .app_data(self.state)
                .configure(move |cfg| {
                    if let Some(config_fn) = &route_config {
                        config_fn(cfg);
                    }
                }),
        )
        .await;

        Ok(service)
    }
}

/// Test app builder over a shared `AppState`; keep a clone of the
/// `web::Data` to reach the database from the test body.
pub fn create_test_app(state: web::Data<AppState>) -> TestAppBuilder {
    TestAppBuilder::new(state)
}
