//! 工具模块
//!
//! - logger: 日志系统初始化与结构化日志宏

pub mod logger;
