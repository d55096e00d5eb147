//! 订单确认邮件

pub mod email;
pub mod model;
pub mod notifier;

pub use model::{Order, OrderLine};
pub use notifier::{Mailer, OrderNotifier, OutgoingEmail};
