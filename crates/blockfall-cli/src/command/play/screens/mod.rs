pub use self::{game::GameScreen, help::HelpScreen};

mod game;
mod help;
