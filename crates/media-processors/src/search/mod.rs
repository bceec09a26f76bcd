mod resolver;
pub use resolver::*;

mod metadata;
pub use metadata::*;

#[cfg(test)]
mod resolver_tests;
