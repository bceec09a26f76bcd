pub mod cache;

mod locks;
pub use locks::*;

mod remote;
pub use remote::*;

mod downloader;
pub use downloader::*;
