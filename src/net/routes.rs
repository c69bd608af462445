use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::Uri,
    routing::get,
    Json, Router,
};
use tracing::instrument;

use crate::{
    host::WidgetHost,
    widget::{
        ComponentViewModel, RenderOutput, WidgetProperties, WidgetRegistration,
        GOOGLE_MAP_REGISTRATION,
    },
};

pub type SharedHost = Arc<WidgetHost>;

pub fn router(host: SharedHost) -> Router {
    Router::new()
        .route(
            "/widgets/google-map",
            get(render_from_query).post(render_from_body),
        )
        .route("/widgets/google-map/registration", get(registration))
        .with_state(host)
}

// An empty query string, or one that doesn't deserialize, renders the same as a missing body
#[instrument(skip(host))]
async fn render_from_query(State(host): State<SharedHost>, uri: Uri) -> RenderOutput {
    let input = uri
        .query()
        .filter(|query| !query.is_empty())
        .and_then(|_| Query::<WidgetProperties>::try_from_uri(&uri).ok())
        .map(|Query(properties)| ComponentViewModel::new(properties));
    host.google_map_widget().invoke(input.as_ref())
}

#[instrument(skip(host))]
#[axum::debug_handler]
async fn render_from_body(
    State(host): State<SharedHost>,
    body: Option<Json<ComponentViewModel<WidgetProperties>>>,
) -> RenderOutput {
    let input = body.map(|Json(envelope)| envelope);
    host.google_map_widget().invoke(input.as_ref())
}

async fn registration() -> Json<WidgetRegistration> {
    Json(GOOGLE_MAP_REGISTRATION)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        host::{config::MemoryConfiguration, views::HandlebarsViews},
        testing::RecordingLog,
        widget::API_KEY_SETTING,
    };
    use axum::{
        body::Body,
        http::{header, Method, Request, StatusCode},
        response::Response,
    };
    use color_eyre::eyre::Result;
    use tower::ServiceExt;

    fn app(log: Arc<RecordingLog>) -> Result<Router> {
        let config: MemoryConfiguration = [(API_KEY_SETTING, "XYZ")].into_iter().collect();
        let host = WidgetHost::new(config, log, HandlebarsViews::new()?);
        Ok(router(Arc::new(host)))
    }

    async fn body_text(response: Response) -> Result<String> {
        let bytes = hyper::body::to_bytes(response.into_body()).await?;
        Ok(String::from_utf8(bytes.to_vec())?)
    }

    #[tokio::test]
    async fn renders_from_query_string() -> Result<()> {
        let log = Arc::new(RecordingLog::default());
        let response = app(log.clone())?
            .oneshot(
                Request::builder()
                    .uri("/widgets/google-map?Latitude=12.97&Longitude=77.59&CssClassName=map")
                    .body(Body::empty())?,
            )
            .await?;

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await?;
        assert!(html.contains(r#"<div class="map">"#));
        assert!(html.contains("key=XYZ&q=12.97,77.59"));
        assert!(log.entries().is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn hidden_widget_renders_no_map() -> Result<()> {
        let log = Arc::new(RecordingLog::default());
        let response = app(log.clone())?
            .oneshot(
                Request::builder()
                    .uri("/widgets/google-map?IsVisible=false&Latitude=1&Longitude=2")
                    .body(Body::empty())?,
            )
            .await?;

        assert_eq!(response.status(), StatusCode::OK);
        assert!(!body_text(response).await?.contains("iframe"));
        assert!(log.entries().is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn bare_query_counts_as_missing_input() -> Result<()> {
        for uri in ["/widgets/google-map", "/widgets/google-map?"] {
            let log = Arc::new(RecordingLog::default());
            let response = app(log.clone())?
                .oneshot(Request::builder().uri(uri).body(Body::empty())?)
                .await?;

            assert_eq!(response.status(), StatusCode::OK);
            assert_eq!(body_text(response).await?, "");
            let entries = log.entries();
            assert_eq!(entries.len(), 1);
            assert_eq!(
                entries[0].description,
                "Widget properties were not provided or are null."
            );
        }
        Ok(())
    }

    #[tokio::test]
    async fn malformed_query_counts_as_missing_input() -> Result<()> {
        let log = Arc::new(RecordingLog::default());
        let response = app(log.clone())?
            .oneshot(
                Request::builder()
                    .uri("/widgets/google-map?IsVisible=maybe&Latitude=1")
                    .body(Body::empty())?,
            )
            .await?;

        assert_eq!(body_text(response).await?, "");
        assert_eq!(log.entries().len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn renders_from_json_body() -> Result<()> {
        let log = Arc::new(RecordingLog::default());
        let body = serde_json::json!({
            "Properties": { "Latitude": 12.97, "Longitude": "77.59" }
        });
        let response = app(log.clone())?
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/widgets/google-map")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))?,
            )
            .await?;

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await?;
        assert!(html.contains(r#"class="googlemap""#));
        assert!(html.contains("q=12.97,77.59"));
        Ok(())
    }

    #[tokio::test]
    async fn null_properties_render_empty_body() -> Result<()> {
        let log = Arc::new(RecordingLog::default());
        let response = app(log.clone())?
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/widgets/google-map")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"Properties":null}"#))?,
            )
            .await?;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await?, "");
        let entries = log.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(
            entries[0].description,
            "Widget properties were not provided or are null."
        );
        Ok(())
    }

    #[tokio::test]
    async fn unreadable_body_counts_as_missing_input() -> Result<()> {
        let log = Arc::new(RecordingLog::default());
        let response = app(log.clone())?
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/widgets/google-map")
                    .body(Body::from("not json"))?,
            )
            .await?;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await?, "");
        assert_eq!(log.entries().len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn serves_registration_metadata() -> Result<()> {
        let log = Arc::new(RecordingLog::default());
        let response = app(log)?
            .oneshot(
                Request::builder()
                    .uri("/widgets/google-map/registration")
                    .body(Body::empty())?,
            )
            .await?;

        assert_eq!(response.status(), StatusCode::OK);
        let registration: serde_json::Value = serde_json::from_str(&body_text(response).await?)?;
        assert_eq!(registration["identifier"], "DotStark.XBK.Widget.GoogleMap");
        assert_eq!(registration["name"], "Google Map");
        assert_eq!(registration["iconClass"], "icon-map-marker");
        assert_eq!(registration["allowCache"], true);
        assert_eq!(registration["properties"][1]["name"], "Latitude");
        assert_eq!(registration["properties"][1]["required"], true);
        assert_eq!(registration["properties"][3]["default"], "googlemap");
        Ok(())
    }
}
