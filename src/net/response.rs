use axum::response::{Html, IntoResponse, Response};

use crate::widget::RenderOutput;

/// Empty output is still a successful render from the page's point of view
impl IntoResponse for RenderOutput {
    fn into_response(self) -> Response {
        Html(self.into_html()).into_response()
    }
}
