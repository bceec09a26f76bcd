use crate::http::HttpError;
use actix_web::web::{Data, Query};
use actix_web::HttpResponse;
use media_processors::{CancellationToken, MediaEngine};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

#[derive(Deserialize)]
pub(crate) struct QueryParams {
    #[serde(default)]
    query: String,
}

pub(crate) async fn search_tracks(
    engine: Data<Arc<MediaEngine>>,
    shutdown: Data<CancellationToken>,
    params: Query<QueryParams>,
) -> Result<HttpResponse, HttpError> {
    let request_id = Uuid::new_v4();
    let cancel = shutdown.child_token();
    let _guard = cancel.clone().drop_guard();

    info!(%request_id, query = %params.query, "Search requested");

    match engine.search(&params.query, &cancel).await {
        Ok(results) => {
            info!(%request_id, results = results.len(), "Search finished");
            Ok(HttpResponse::Ok().json(results))
        }
        Err(error) => {
            warn!(%request_id, %error, "Search failed");
            Err(error.into())
        }
    }
}

pub(crate) async fn get_track(
    engine: Data<Arc<MediaEngine>>,
    shutdown: Data<CancellationToken>,
    params: Query<QueryParams>,
) -> Result<HttpResponse, HttpError> {
    let request_id = Uuid::new_v4();
    let cancel = shutdown.child_token();
    let _guard = cancel.clone().drop_guard();

    info!(%request_id, query = %params.query, "Track metadata requested");

    match engine.resolve(&params.query, &cancel).await {
        Ok(track) => Ok(HttpResponse::Ok().json(track)),
        Err(error) => {
            warn!(%request_id, %error, "Unable to resolve track");
            Err(error.into())
        }
    }
}
