#[cfg(all(test, not(target_arch = "wasm32")))]
pub mod ssr;

#[cfg(test)]
pub mod helpers {
    use crate::api::types::UserResponse;
    use crate::state::auth::AuthState;
    use leptos::*;

    pub fn customer_user() -> UserResponse {
        UserResponse {
            id: Some("cust-1".into()),
            name: Some("Asha".into()),
            email: Some("asha@example.com".into()),
            role: Some("customer".into()),
        }
    }

    pub fn driver_user() -> UserResponse {
        UserResponse {
            id: Some("drv-7".into()),
            name: Some("Ravi".into()),
            email: Some("ravi@example.com".into()),
            role: Some("driver".into()),
        }
    }

    pub fn provide_auth(
        user: Option<UserResponse>,
    ) -> (ReadSignal<AuthState>, WriteSignal<AuthState>) {
        let is_authenticated = user.is_some();
        let (auth, set_auth) = create_signal(AuthState {
            user,
            role_hint: None,
            is_authenticated,
            loading: false,
        });
        provide_context((auth, set_auth));
        (auth, set_auth)
    }

    pub fn provide_auth_loading() -> (ReadSignal<AuthState>, WriteSignal<AuthState>) {
        let (auth, set_auth) = create_signal(AuthState {
            user: None,
            role_hint: None,
            is_authenticated: false,
            loading: true,
        });
        provide_context((auth, set_auth));
        (auth, set_auth)
    }
}
