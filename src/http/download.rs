use crate::http::HttpError;
use actix_web::web::{Data, Json};
use actix_web::HttpResponse;
use media_processors::{CancellationToken, MediaEngine, MediaMode, TrackInfo};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info};
use uuid::Uuid;

#[derive(Deserialize)]
pub(crate) struct DownloadRequest {
    query: String,
    #[serde(default)]
    video: bool,
}

#[derive(Serialize)]
struct DownloadResponse {
    path: String,
    track: TrackInfo,
}

pub(crate) async fn download_track(
    engine: Data<Arc<MediaEngine>>,
    shutdown: Data<CancellationToken>,
    request: Json<DownloadRequest>,
) -> Result<HttpResponse, HttpError> {
    let request_id = Uuid::new_v4();
    let cancel = shutdown.child_token();
    let _guard = cancel.clone().drop_guard();
    let mode = if request.video {
        MediaMode::Video
    } else {
        MediaMode::Audio
    };

    info!(%request_id, query = %request.query, %mode, "Download requested");

    match engine.fetch(&request.query, mode, &cancel).await {
        Ok((track, path)) => {
            info!(%request_id, ?path, "Download finished");

            Ok(HttpResponse::Ok().json(DownloadResponse {
                path: path.to_string_lossy().to_string(),
                track,
            }))
        }
        Err(err) => {
            error!(%request_id, error = %err, "Download failed");
            Err(err.into())
        }
    }
}
