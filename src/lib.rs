//! Clipkeep
//!
//! 剪贴板历史管理器：轮询系统剪贴板，保存文本与图片历史，支持置顶、搜索和回写。

pub mod bootstrap;
