pub mod api;
pub mod ytdlp;

pub use api::{ApiClient, ApiClientError};
pub use ytdlp::{YtDlpClient, YtDlpError};
