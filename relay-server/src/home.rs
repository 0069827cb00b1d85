use axum::response::Html;

/// GET / - Chat page, embedded at compile time so the binary is
/// self-contained
pub async fn index() -> Html<&'static str> {
    Html(include_str!("../static/chat.html"))
}
