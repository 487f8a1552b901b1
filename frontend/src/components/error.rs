use crate::api::ApiError;
use leptos::*;

#[component]
pub fn InlineErrorMessage(error: Signal<Option<ApiError>>) -> impl IntoView {
    view! {
        <Show when=move || error.get().is_some() fallback=|| ()>
            <div class="bg-red-100 border border-red-300 text-red-700 px-4 py-3 rounded space-y-1 my-2">
                <div class="font-bold">{move || error.get().map(|e| e.error).unwrap_or_default()}</div>
                {move || error.get().map(|e| {
                    let code = &e.code;
                    let details = e.details.as_ref();
                    if code == "VALIDATION_ERROR" {
                        if let Some(details) = details {
                            if let Some(errors) = details.get("errors").and_then(|v| v.as_array()) {
                                return view! {
                                    <ul class="list-disc list-inside text-sm">
                                        {errors.iter().map(|err| {
                                            view! { <li>{err.as_str().unwrap_or_default().to_string()}</li> }
                                        }).collect_view()}
                                    </ul>
                                }.into_view();
                            }
                        }
                    }
                    if code == "REQUEST_FAILED" {
                        view! { <div class="text-xs opacity-75">{"The server could not be reached. Please try again."}</div> }.into_view()
                    } else {
                        ().into_view()
                    }
                }).unwrap_or_else(|| ().into_view())}
            </div>
        </Show>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::render_to_string;
    use serde_json::json;

    #[test]
    fn renders_validation_details_as_a_list() {
        let html = render_to_string(move || {
            let error = ApiError {
                error: "Validation failed".into(),
                code: "VALIDATION_ERROR".into(),
                details: Some(json!({
                    "errors": ["Pickup location is required", "Drop-off location is required"]
                })),
            };
            let signal = create_rw_signal(Some(error));
            view! { <InlineErrorMessage error={signal.into()} /> }
        });
        assert!(html.contains("Validation failed"));
        assert!(html.contains("Pickup location is required"));
        assert!(html.contains("Drop-off location is required"));
    }

    #[test]
    fn adds_a_retry_hint_for_failed_requests() {
        let html = render_to_string(move || {
            let error = ApiError::request_failed("Failed to connect to server");
            let signal = create_rw_signal(Some(error));
            view! { <InlineErrorMessage error={signal.into()} /> }
        });
        assert!(html.contains("Failed to connect to server"));
        assert!(html.contains("could not be reached"));
    }

    #[test]
    fn renders_nothing_without_an_error() {
        let html = render_to_string(move || {
            let signal = create_rw_signal(None::<ApiError>);
            view! { <InlineErrorMessage error={signal.into()} /> }
        });
        assert!(!html.contains("bg-red-100"));
    }
}
