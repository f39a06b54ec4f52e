use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for operations that can produce FindError
pub type FindResult<T> = Result<T, FindError>;

/// rust-sniff 的自定义错误类型
#[derive(Debug, Error)]
pub enum FindError {
    /// 目录不可读（权限不足、不是目录、遍历期间被删除）
    #[error("无法打开目录 {}: {source}", .path.display())]
    DirectoryUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// 互斥的选项被同时指定
    #[error("参数冲突: {0}")]
    ConfigurationConflict(String),

    /// 参数值无效
    #[error("无效参数: {0}")]
    InvalidArgument(String),

    /// 无法确定当前工作目录
    #[error("无法获取当前工作目录: {0}")]
    CurrentDirUnavailable(#[source] io::Error),

    /// 无法创建输出文件
    #[error("无法打开输出文件 {}: {source}", .path.display())]
    OutputUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// 写入匹配结果失败
    #[error("写入输出失败: {0}")]
    Output(#[from] io::Error),
}
