use axum::response::Html;

use crate::api::fragments;

/// Static page shell; all dynamic content arrives as htmx fragments.
pub async fn dashboard() -> Html<String> {
    Html(fragments::dashboard_page())
}
