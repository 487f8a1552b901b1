#[cfg(target_arch = "wasm32")]
use web_sys::{Storage, Window};

pub const ACCESS_TOKEN_KEY: &str = "access_token";

#[cfg(target_arch = "wasm32")]
pub fn window() -> Result<Window, String> {
    web_sys::window().ok_or_else(|| "No window object".to_string())
}

/// Per-tab storage; the session token never outlives the tab.
#[cfg(target_arch = "wasm32")]
fn session_storage() -> Result<Storage, String> {
    window()?
        .session_storage()
        .map_err(|_| "No sessionStorage".to_string())?
        .ok_or_else(|| "No sessionStorage".to_string())
}

// Outside the browser the token lives in a thread local, which keeps
// server rendering and the host test suite working.
#[cfg(not(target_arch = "wasm32"))]
mod host {
    use std::cell::RefCell;

    thread_local! {
        pub static TOKEN: RefCell<Option<String>> = const { RefCell::new(None) };
    }
}

pub fn read_access_token() -> Option<String> {
    #[cfg(target_arch = "wasm32")]
    {
        session_storage()
            .ok()
            .and_then(|storage| storage.get_item(ACCESS_TOKEN_KEY).ok().flatten())
            .filter(|token| !token.is_empty())
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        host::TOKEN
            .with(|cell| cell.borrow().clone())
            .filter(|token| !token.is_empty())
    }
}

pub fn store_access_token(token: &str) -> Result<(), String> {
    #[cfg(target_arch = "wasm32")]
    {
        session_storage()?
            .set_item(ACCESS_TOKEN_KEY, token)
            .map_err(|_| "Failed to persist session token".to_string())
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        host::TOKEN.with(|cell| *cell.borrow_mut() = Some(token.to_string()));
        Ok(())
    }
}

pub fn clear_access_token() {
    #[cfg(target_arch = "wasm32")]
    {
        if let Ok(storage) = session_storage() {
            let _ = storage.remove_item(ACCESS_TOKEN_KEY);
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        host::TOKEN.with(|cell| *cell.borrow_mut() = None);
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    #[test]
    fn round_trips_and_clears_the_token() {
        clear_access_token();
        assert_eq!(read_access_token(), None);

        store_access_token("abc.def.ghi").unwrap();
        assert_eq!(read_access_token().as_deref(), Some("abc.def.ghi"));

        clear_access_token();
        assert_eq!(read_access_token(), None);
    }

    #[test]
    fn empty_tokens_read_as_absent() {
        store_access_token("").unwrap();
        assert_eq!(read_access_token(), None);
        clear_access_token();
    }
}
