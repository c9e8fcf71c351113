mod command;
pub use command::{Access, Command};

mod dashboard;
pub use dashboard::Dashboard;

mod error;
pub use error::Error;

pub type Result<T> = std::result::Result<T, Error>;
