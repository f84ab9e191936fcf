use common::session::{LoginRequest, LoginResponse};

use crate::http_utils::query_service::QueryService;

pub async fn login(service: &QueryService, request: LoginRequest) -> anyhow::Result<LoginResponse> {
    if request.email.trim().is_empty() || request.password.is_empty() {
        anyhow::bail!("email and password are required");
    }
    let request = LoginRequest { email: request.email.trim().to_string(), password: request.password };
    let response: LoginResponse = service.post("/api/auth/login", &request).await?;
    tracing::info!("signed in {} as {}", response.user.email, response.user.role.as_str());
    Ok(response)
}
