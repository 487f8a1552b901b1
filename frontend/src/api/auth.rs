use super::{
    client::ApiClient,
    types::{
        ApiError, DriverApplicationRequest, LoginRequest, LoginResponse, MessageResponse,
        SignupRequest, VerifyResponse,
    },
};
use crate::api::types::Role;

impl ApiClient {
    /// Token check against the backend; the bearer header is attached from
    /// session storage by the client.
    pub async fn verify(&self) -> Result<VerifyResponse, ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self.send_get(&format!("{}/verify", base_url)).await?;
        self.map_json_response(response).await
    }

    pub async fn customer_signup(
        &self,
        request: &SignupRequest,
    ) -> Result<MessageResponse, ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .send_post(&format!("{}/customer/signup", base_url), request)
            .await?;
        self.map_json_response(response).await
    }

    pub async fn driver_signup(
        &self,
        request: &SignupRequest,
    ) -> Result<MessageResponse, ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .send_post(&format!("{}/driver/signup", base_url), request)
            .await?;
        self.map_json_response(response).await
    }

    pub async fn signup(&self, role: Role, request: &SignupRequest) -> Result<MessageResponse, ApiError> {
        match role {
            Role::Customer => self.customer_signup(request).await,
            Role::Driver => self.driver_signup(request).await,
        }
    }

    /// Full driver application from the registration page; shares the driver
    /// signup endpoint.
    pub async fn driver_application(
        &self,
        request: &DriverApplicationRequest,
    ) -> Result<MessageResponse, ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .send_post(&format!("{}/driver/signup", base_url), request)
            .await?;
        self.map_json_response(response).await
    }

    pub async fn customer_login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .send_post(&format!("{}/customer/login", base_url), request)
            .await?;
        self.map_json_response(response).await
    }

    pub async fn driver_login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .send_post(&format!("{}/driver/login", base_url), request)
            .await?;
        self.map_json_response(response).await
    }

    pub async fn login_as(&self, role: Role, request: &LoginRequest) -> Result<LoginResponse, ApiError> {
        match role {
            Role::Customer => self.customer_login(request).await,
            Role::Driver => self.driver_login(request).await,
        }
    }
}
