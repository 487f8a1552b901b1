use crate::{
    api::{
        client::ApiClient,
        types::{ApiError, LoginRequest, Role},
    },
    pages::login::components::form::LoginForm,
    state::auth::{self, use_auth},
    utils::validate,
};
use leptos::{ev::SubmitEvent, *};

#[component]
pub fn LoginPanel() -> impl IntoView {
    let (_, set_auth) = use_auth();
    let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);

    let (role, set_role) = create_signal(Role::Customer);
    let (email, set_email) = create_signal(String::new());
    let (password, set_password) = create_signal(String::new());
    let (show_password, set_show_password) = create_signal(false);
    let error = create_rw_signal(None::<ApiError>);
    let success = create_rw_signal(None::<String>);

    let login_action = create_action(move |input: &(Role, LoginRequest)| {
        let api = api.clone();
        let (role, request) = input.clone();
        async move {
            let response = api.login_as(role, &request).await?;
            auth::complete_login(&api, &response.token, set_auth).await
        }
    });
    let pending = login_action.pending();

    create_effect(move |_| {
        if let Some(result) = login_action.value().get() {
            match result {
                Ok(()) => {
                    error.set(None);
                    success.set(Some("Login successful!".to_string()));
                    if let Some(win) = web_sys::window() {
                        let _ = win.location().set_href("/");
                    }
                }
                Err(err) => {
                    success.set(None);
                    error.set(Some(err));
                }
            }
        }
    });

    let handle_submit = Callback::new(move |ev: SubmitEvent| {
        ev.prevent_default();
        if pending.get_untracked() {
            return;
        }
        let email_value = email.get_untracked();
        let password_value = password.get_untracked();
        if let Err(message) = validate::validate_login(&email_value, &password_value) {
            error.set(Some(ApiError::validation(message)));
            return;
        }
        error.set(None);
        login_action.dispatch((
            role.get_untracked(),
            LoginRequest {
                email: email_value,
                password: password_value,
            },
        ));
    });

    let on_role_change = Callback::new(move |value: String| {
        if let Some(parsed) = Role::parse(&value) {
            set_role.set(parsed);
        }
    });
    let on_email_input = Callback::new(move |value: String| set_email.set(value));
    let on_password_input = Callback::new(move |value: String| set_password.set(value));
    let on_toggle_password = Callback::new(move |_: ()| {
        set_show_password.update(|visible| *visible = !*visible);
    });

    view! {
        <LoginForm
            role=role
            email=email
            password=password
            show_password=show_password
            error=error.read_only().into()
            success=success.read_only().into()
            pending=pending.into()
            on_role_change=on_role_change
            on_email_input=on_email_input
            on_password_input=on_password_input
            on_toggle_password=on_toggle_password
            on_submit=handle_submit
        />
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::helpers::provide_auth;
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn renders_the_login_form_with_both_roles() {
        let html = render_to_string(move || {
            provide_auth(None);
            view! { <LoginPanel /> }
        });
        assert!(html.contains("Login to Your Account"));
        assert!(html.contains("Login As"));
        assert!(html.contains("Customer"));
        assert!(html.contains("Driver"));
        assert!(html.contains("Sign Up"));
    }
}
