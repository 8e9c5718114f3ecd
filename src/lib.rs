//! winhost - IDE 窗口/对话框编排库
//!
//! 模块结构：
//! - core: 原语（完成信号、关闭请求事件、错误类型）
//! - kernel: 编排层（内容契约、虚拟窗口宿主、展示策略、WindowManager）
//! - kernel::services: 端口与适配器（运行环境、桌面平台、设置）

pub mod core;
pub mod kernel;
