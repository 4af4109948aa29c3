//! Helper functions shared by the loader and the commands

mod url;

pub use url::*;
