pub mod footer;
pub mod header;
pub mod history_strip;
pub mod input;
pub mod intent_bus;
pub mod layout;
pub mod mvi;
pub mod poster;
pub mod render;
pub mod runtime;
pub mod screen;
pub mod search;
pub mod terminal_guard;
pub mod theme;
