mod changelog_handler;

pub use changelog_handler::*;
