pub mod connection;
pub mod launcher;

pub use connection::{connect_to_browser_and_page, switch_to_latest_page};
pub use launcher::launch_browser;
