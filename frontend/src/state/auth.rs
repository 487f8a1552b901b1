use leptos::*;

use crate::{
    api::{ApiClient, ApiError, Role, UserResponse},
    utils::{jwt, storage},
};

pub type AuthContext = (ReadSignal<AuthState>, WriteSignal<AuthState>);

#[derive(Debug, Clone, Default)]
pub struct AuthState {
    pub user: Option<UserResponse>,
    /// Role decoded from the stored token. UI hint only; authorization is
    /// the backend's call on every request.
    pub role_hint: Option<Role>,
    pub is_authenticated: bool,
    pub loading: bool,
}

impl AuthState {
    /// Name shown in the navbar and greetings.
    pub fn display_name(&self) -> String {
        self.user
            .as_ref()
            .and_then(|user| user.name.clone())
            .unwrap_or_else(|| "User".to_string())
    }

    /// Verified role when the backend returned one, otherwise the decoded
    /// hint.
    pub fn role(&self) -> Option<Role> {
        self.user
            .as_ref()
            .and_then(|user| user.role.as_deref())
            .and_then(Role::parse)
            .or(self.role_hint)
    }
}

fn create_auth_context() -> AuthContext {
    let (auth_state, set_auth_state) = create_signal(AuthState {
        loading: true,
        ..AuthState::default()
    });

    let api_client = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
    if storage::read_access_token().is_some() {
        spawn_local(async move {
            if let Err(error) = refresh_auth(&api_client, set_auth_state).await {
                log::debug!("session verify failed: {error}");
            }
        });
    } else {
        // No stored token means anonymous; skip the verify round trip.
        set_auth_state.update(|state| state.loading = false);
    }

    (auth_state, set_auth_state)
}

#[component]
pub fn AuthProvider(children: Children) -> impl IntoView {
    let ctx = create_auth_context();
    provide_context::<AuthContext>(ctx);
    view! { <>{children()}</> }
}

pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().unwrap_or_else(|| create_signal(AuthState::default()))
}

/// Checks the stored token against `/verify` and settles the auth state.
/// Any failure purges the token so the next load starts anonymous.
pub async fn refresh_auth(
    api_client: &ApiClient,
    set_auth_state: WriteSignal<AuthState>,
) -> Result<(), ApiError> {
    let Some(token) = storage::read_access_token() else {
        set_auth_state.update(|state| *state = AuthState::default());
        return Ok(());
    };

    let role_hint = jwt::decode_claims(&token)
        .and_then(|claims| claims.role)
        .and_then(|role| Role::parse(&role));
    set_auth_state.update(|state| {
        state.loading = true;
        state.role_hint = role_hint;
    });

    match api_client.verify().await {
        Ok(response) => {
            set_auth_state.update(|state| {
                state.user = Some(response.user);
                state.is_authenticated = true;
                state.loading = false;
            });
            Ok(())
        }
        Err(error) => {
            storage::clear_access_token();
            set_auth_state.update(|state| *state = AuthState::default());
            Err(error)
        }
    }
}

/// Stores a fresh login token, then re-verifies it so the state reflects the
/// backend's view of the user rather than whatever the token claims.
pub async fn complete_login(
    api_client: &ApiClient,
    token: &str,
    set_auth_state: WriteSignal<AuthState>,
) -> Result<(), ApiError> {
    storage::store_access_token(token).map_err(ApiError::validation)?;
    refresh_auth(api_client, set_auth_state).await
}

/// Drops the session locally. The backend holds no session record, so no
/// request is made.
pub fn logout(set_auth_state: WriteSignal<AuthState>) {
    storage::clear_access_token();
    set_auth_state.update(|state| *state = AuthState::default());
}

#[cfg(test)]
mod tests {
    use super::*;
    use leptos::create_runtime;

    fn with_runtime<T>(test: impl FnOnce() -> T) -> T {
        let runtime = create_runtime();
        let result = test();
        runtime.dispose();
        result
    }

    #[test]
    fn use_auth_returns_default_without_context() {
        with_runtime(|| {
            let (state, _set_state) = use_auth();
            let snapshot = state.get_untracked();
            assert!(!snapshot.is_authenticated);
            assert!(snapshot.user.is_none());
        });
    }

    #[test]
    fn display_name_falls_back_when_unnamed() {
        let mut state = AuthState::default();
        assert_eq!(state.display_name(), "User");

        state.user = Some(UserResponse {
            id: Some("u1".into()),
            name: Some("Asha".into()),
            email: None,
            role: None,
        });
        assert_eq!(state.display_name(), "Asha");
    }

    #[test]
    fn verified_role_wins_over_the_token_hint() {
        let mut state = AuthState {
            role_hint: Some(Role::Customer),
            ..AuthState::default()
        };
        assert_eq!(state.role(), Some(Role::Customer));

        state.user = Some(UserResponse {
            id: None,
            name: None,
            email: None,
            role: Some("driver".into()),
        });
        assert_eq!(state.role(), Some(Role::Driver));
    }
}
