pub mod config;
pub mod round;
pub mod ticket;
pub mod tier;
pub mod user;

pub use config::*;
pub use round::*;
pub use ticket::*;
pub use tier::*;
pub use user::*;
