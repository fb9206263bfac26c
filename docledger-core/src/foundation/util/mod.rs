pub mod encoding;
pub mod guard;
pub mod time;
