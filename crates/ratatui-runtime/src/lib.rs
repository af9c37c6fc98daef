pub use self::{
    app::App,
    keyboard::{DEFAULT_FIRST_REPEAT_WINDOW, DEFAULT_RELEASE_TIMEOUT, HeldKeys, KeyboardState},
    runtime::Runtime,
};

mod app;
mod event_loop;
mod keyboard;
mod runtime;
