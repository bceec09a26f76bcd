mod download;
mod error;
mod health;
mod search;

use actix_web::web;

pub(crate) use download::download_track;
pub(crate) use error::HttpError;
pub(crate) use health::readiness_check;
pub(crate) use search::{get_track, search_tracks};

pub(crate) fn configure(config: &mut web::ServiceConfig) {
    config
        .service(web::resource("/health").route(web::get().to(readiness_check)))
        .service(web::resource("/search").route(web::get().to(search_tracks)))
        .service(web::resource("/track").route(web::get().to(get_track)))
        .service(web::resource("/download").route(web::post().to(download_track)));
}
