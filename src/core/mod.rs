//! 核心原语
//!
//! - signal: 一次性完成信号（Completion Signal）
//! - event: 关闭请求事件与订阅守卫
//! - error: 窗口编排错误类型

pub mod error;
pub mod event;
pub mod signal;

pub use error::{Result, WindowError};
pub use event::{EventSource, Subscription};
pub use signal::{completion_signal, Completer, CompletionSignal, SignalAbandoned};
