//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Pixmerge API",
        version = "0.1.0",
        description = "Combines two uploaded images with eight pixel-wise operations (xor, add, sub, avg, max, min, and, or) and serves the resulting PNG files."
    ),
    paths(
        handlers::combine::combine,
        handlers::output::get_output,
        handlers::health::health_check,
    ),
    components(
        schemas(
            handlers::combine::CombineResponse,
            handlers::health::HealthCheckResponse,
            error::ErrorResponse,
        )
    ),
    tags(
        (name = "combine", description = "Image combination"),
        (name = "output", description = "Combination results"),
        (name = "health", description = "Service health")
    )
)]
pub struct ApiDoc;
