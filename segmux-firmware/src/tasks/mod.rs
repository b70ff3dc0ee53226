//! Embassy async tasks

pub mod display;
pub mod text_rx;

pub use display::{display_task, Driver};
pub use text_rx::text_rx_task;
