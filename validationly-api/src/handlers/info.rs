use crate::response::ApiResponse;
use serde::Serialize;

#[derive(Serialize)]
pub struct Endpoint {
    path: &'static str,
    method: &'static str,
    description: &'static str,
}

#[derive(Serialize)]
pub struct ServiceInfo {
    service: &'static str,
    description: &'static str,
    status: &'static str,
    version: &'static str,
    endpoints: Vec<Endpoint>,
}

const ENDPOINTS: &[(&str, &str, &str)] = &[
    ("/api/validate", "POST", "Validate a startup idea across social platforms"),
    ("/api/message-simulator", "POST", "Draft launch messaging for an idea"),
    ("/api/auth/issue-token", "POST", "Issue a bearer token"),
    ("/api/auth/start-trial", "POST", "Start a 7-day pro trial"),
    ("/api/billing/create-checkout", "POST", "Create a Stripe checkout session"),
    ("/api/billing/webhook", "POST", "Stripe webhook receiver"),
    ("/api/feedback", "GET, POST", "Submit or list recent feedback"),
    ("/api/waitlist", "POST", "Join a landing page waitlist"),
    ("/api/reddit/ideas", "GET", "Browse ideas mined from Reddit"),
    ("/api/reddit/pain", "POST", "Score an idea against recent Reddit pain points"),
];

pub async fn service_info() -> ApiResponse<ServiceInfo> {
    ApiResponse(ServiceInfo {
        service: "Validationly API",
        description: "AI-powered startup idea validation service",
        status: "operational",
        version: env!("CARGO_PKG_VERSION"),
        endpoints: ENDPOINTS
            .iter()
            .map(|&(path, method, description)| Endpoint {
                path,
                method,
                description,
            })
            .collect(),
    })
}
