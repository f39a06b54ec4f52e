//! 按文件名查找文件的库
//!
//! 本库从一个起始目录开始深度优先遍历，对每个普通文件应用文件名匹配，
//! 并输出匹配的路径。支持：
//! - 精确匹配、部分匹配（子串）和扩展名匹配
//! - 最大深度和最大结果数限制（达到上限立即停止遍历）
//! - 无法读取的目录只报告、不中断遍历
//! - 输出到标准输出或文件
//!
//! # 示例
//!
//! 基本用法：
//! ```no_run
//! use rust_sniff::finder::{Finder, MatchTarget, WalkRequest};
//!
//! // 创建搜索请求
//! let request = WalkRequest::new(".")
//!     .with_target(MatchTarget::Extension { ext: ".md".to_string(), known_only: false })
//!     .with_max_depth(Some(3))    // 最大搜索深度
//!     .with_max_results(Some(10)); // 最多 10 个结果
//!
//! let finder = Finder::new(request);
//!
//! // 惰性遍历，结果按文件系统的枚举顺序产出
//! for path in finder.walk() {
//!     println!("找到文件: {}", path.display());
//! }
//! ```
//!
//! 更多用法请参考各模块文档。

pub mod cli;
pub mod errors;
pub mod finder;

// Re-export main types for convenience
pub use errors::{FindError, FindResult};
pub use finder::Finder;
