pub mod admin;
pub mod buy_ticket;
pub mod round;
pub mod user;

pub use admin::*;
pub use buy_ticket::*;
pub use round::*;
pub use user::*;
