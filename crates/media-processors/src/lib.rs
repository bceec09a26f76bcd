mod errors;
pub use errors::*;

mod traits;
pub use traits::*;

mod types;
pub use types::*;

pub mod link;

mod search;
pub use search::*;

mod acquisition;
pub use acquisition::*;

mod engine;
pub use engine::*;

pub use tokio_util::sync::CancellationToken;

#[cfg(test)]
mod test_support;
