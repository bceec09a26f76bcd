mod api;
mod ytdlp;

pub(crate) use api::RemoteApi;
pub(crate) use ytdlp::LocalExtractor;
