pub mod config_env;
pub mod json_api;

pub use config_env::{config_from_env, CONFIG_PATH_ENV};
pub use json_api::{
    fingerprint, plan_route_json, plan_route_json_envelope, plan_route_request,
    route_document_schema, ApiError, ApiResponse, RouteDocument, RouteInfo, RouteRequest,
};
