pub mod logger;
pub mod types;
pub mod consts;
pub mod room;

pub mod player;
pub mod observer;
pub mod input;
