// App module for the indoor analytics dashboard
// Handles application state and keyboard input

pub mod input;
pub mod state;

pub use input::handle_input;
pub use state::{App, FilterField, Focus};
