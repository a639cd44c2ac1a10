//! Formattable content: notification and activity JSON parsed into typed,
//! range-annotated blocks, grouped for display.
//!
//! Data flows one way: raw blocks go through a
//! [`NotificationContentFactory`](factory::NotificationContentFactory),
//! come out as [`ContentBlock`](content::ContentBlock)s, get grouped into
//! [`ContentGroup`](content::ContentGroup)s by a
//! [`Notification`](notification::Notification), and are finally rendered
//! to [`StyledText`](render::StyledText).

pub mod config;
pub mod content;
pub mod factory;
pub mod notification;
pub mod render;

pub use config::Config;
pub use content::{ContentBlock, ContentGroup, FormattableContent};
pub use factory::NotificationContentFactory;
pub use notification::Notification;
