pub mod fake_browser;
pub mod helpers;

pub use fake_browser::{default_parameters, FakeBrowser, Received, ServedBrowser};
pub use helpers::TestProxy;
