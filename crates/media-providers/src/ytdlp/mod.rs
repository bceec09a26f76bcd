pub mod args;
mod client;
mod evasion;
pub mod parser;
mod process;

pub use args::DownloadKind;
pub use client::*;
pub use evasion::*;
pub use parser::VideoInfo;
pub use process::*;
