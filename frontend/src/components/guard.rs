use crate::{
    api::types::{Role, UserResponse},
    components::layout::LoadingSpinner,
    state::auth::use_auth,
};
use leptos::*;

#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    let (auth, _) = use_auth();
    let is_authenticated = create_memo(move |_| auth.get().is_authenticated);
    let is_loading = create_memo(move |_| auth.get().loading);
    create_effect(move |_| {
        let state = auth.get();
        if state.loading || state.is_authenticated {
            return;
        }
        if let Some(win) = web_sys::window() {
            let _ = win.location().set_href("/login");
        }
    });
    view! {
        <Show
            when=move || should_render_children(is_authenticated.get(), is_loading.get())
            fallback=move || {
                if is_loading.get() {
                    view! { <LoadingSpinner /> }.into_view()
                } else {
                    ().into_view()
                }
            }
        >
            {children()}
        </Show>
    }
}

fn should_render_children(is_authenticated: bool, is_loading: bool) -> bool {
    is_authenticated && !is_loading
}

/// Gate on the verified role from the session check, not the token hint,
/// so a stale or hand-edited token cannot flip the page.
#[component]
pub fn RequireRole(role: Role, children: ChildrenFn) -> impl IntoView {
    let (auth, _) = use_auth();
    let is_authenticated = create_memo(move |_| auth.get().is_authenticated);
    let is_loading = create_memo(move |_| auth.get().loading);
    let has_role = create_memo(move |_| holds_role(auth.get().user.as_ref(), role));
    create_effect(move |_| {
        let state = auth.get();
        if state.loading {
            return;
        }
        // Anonymous visitors go to login; a signed-in user with the wrong
        // role goes home instead.
        let target = if !state.is_authenticated {
            "/login"
        } else if !holds_role(state.user.as_ref(), role) {
            "/"
        } else {
            return;
        };
        if let Some(win) = web_sys::window() {
            let _ = win.location().set_href(target);
        }
    });
    view! {
        <Show
            when=move || {
                should_render_role_children(is_authenticated.get(), is_loading.get(), has_role.get())
            }
            fallback=move || {
                if is_loading.get() {
                    view! { <LoadingSpinner /> }.into_view()
                } else {
                    ().into_view()
                }
            }
        >
            {children()}
        </Show>
    }
}

fn holds_role(user: Option<&UserResponse>, required: Role) -> bool {
    user.and_then(|u| u.role.as_deref())
        .and_then(Role::parse)
        .map(|role| role == required)
        .unwrap_or(false)
}

fn should_render_role_children(is_authenticated: bool, is_loading: bool, has_role: bool) -> bool {
    is_authenticated && has_role && !is_loading
}


#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::{RequireAuth, RequireRole};
    use crate::api::types::Role;
    use crate::test_support::helpers::{customer_user, driver_user, provide_auth, provide_auth_loading};
    use crate::test_support::ssr::render_to_string;
    use leptos::*;

    #[test]
    fn require_auth_renders_children_when_authenticated() {
        let html = render_to_string(move || {
            provide_auth(Some(customer_user()));
            view! {
                <RequireAuth>
                    {|| view! { <div>"protected-content"</div> }}
                </RequireAuth>
            }
        });
        assert!(html.contains("protected-content"));
    }

    #[test]
    fn require_auth_hides_children_when_unauthenticated() {
        let html = render_to_string(move || {
            provide_auth(None);
            view! {
                <RequireAuth>
                    {|| view! { <div>"protected-content"</div> }}
                </RequireAuth>
            }
        });
        assert!(!html.contains("protected-content"));
    }

    #[test]
    fn require_auth_shows_loading_spinner_while_loading() {
        let html = render_to_string(move || {
            provide_auth_loading();
            view! {
                <RequireAuth>
                    {|| view! { <div>"protected-content"</div> }}
                </RequireAuth>
            }
        });
        assert!(html.contains("animate-spin"));
        assert!(!html.contains("protected-content"));
    }

    #[test]
    fn require_role_renders_children_for_the_matching_role() {
        let html = render_to_string(move || {
            provide_auth(Some(driver_user()));
            view! {
                <RequireRole role=Role::Driver>
                    {|| view! { <div>"duty-board"</div> }}
                </RequireRole>
            }
        });
        assert!(html.contains("duty-board"));
    }

    #[test]
    fn require_role_hides_children_from_other_roles() {
        let html = render_to_string(move || {
            provide_auth(Some(customer_user()));
            view! {
                <RequireRole role=Role::Driver>
                    {|| view! { <div>"duty-board"</div> }}
                </RequireRole>
            }
        });
        assert!(!html.contains("duty-board"));
    }
}
