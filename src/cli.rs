//! rust-sniff 的命令行接口
//!
//! 本模块提供了命令行参数的解析和验证，
//! 并把参数转换成一次搜索请求。

use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser};
use log::warn;

use crate::errors::{FindError, FindResult};
use crate::finder::filter::MatchTarget;
use crate::finder::options::WalkRequest;

/// 按文件名在目录树中查找文件
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None, disable_version_flag = true)]
pub struct Cli {
    /// 搜索起始路径（默认：当前目录）；只给出一个参数且它不是目录时，作为文件名处理
    #[arg(value_name = "PATH")]
    pub path: Option<String>,

    /// 要查找的文件名（为空时匹配所有文件）
    #[arg(value_name = "NAME")]
    pub name: Option<String>,

    /// 要查找的文件名（与位置参数 NAME 相同）
    #[arg(short = 'f', long = "file", value_name = "NAME")]
    pub file: Option<String>,

    /// 部分匹配：文件名包含 NAME 即可
    #[arg(short = 'p', long)]
    pub partial: bool,

    /// 按扩展名匹配（例如 .c）
    #[arg(short = 'e', long = "ext", value_name = "EXT")]
    pub extension: Option<String>,

    /// 只接受常见扩展名（.pdf .txt .c .h .jpg .png .jpeg .go .java .md .odt）
    #[arg(short = 'k', long)]
    pub known_only: bool,

    /// 最大搜索深度（起始目录中的文件位于第 1 层）
    #[arg(short = 'd', long, value_name = "NUM")]
    pub max_depth: Option<usize>,

    /// 找到 NUM 个结果后停止
    #[arg(short = 'l', long, value_name = "NUM")]
    pub limit: Option<usize>,

    /// 把结果写入文件而不是标准输出
    #[arg(short = 'o', long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// 启用调试日志
    #[arg(long)]
    pub debug: bool,

    /// 显示版本
    #[arg(short = 'v', long, action = ArgAction::Version)]
    pub version: Option<bool>,
}

impl Cli {
    /// 验证命令行参数
    pub fn validate(&self) -> Result<(), FindError> {
        if self.limit == Some(0) {
            return Err(FindError::InvalidArgument(
                "--limit must be greater than 0".to_string(),
            ));
        }

        if self.extension.is_some() {
            if self.partial {
                return Err(FindError::ConfigurationConflict(
                    "-e/--ext cannot be combined with -p/--partial".to_string(),
                ));
            }
            if self.file.is_some() {
                return Err(FindError::ConfigurationConflict(
                    "-e/--ext cannot be combined with -f/--file".to_string(),
                ));
            }
        } else if self.known_only {
            return Err(FindError::ConfigurationConflict(
                "-k/--known-only requires -e/--ext".to_string(),
            ));
        }

        if self.file.is_some() && self.name.is_some() {
            return Err(FindError::ConfigurationConflict(
                "file name given both as -f/--file and as a positional argument".to_string(),
            ));
        }

        Ok(())
    }

    /// 构建搜索请求
    pub fn build_request(&self) -> FindResult<WalkRequest> {
        self.validate()?;

        let (path, name) = self.positionals();
        if self.extension.is_some() && name.is_some() {
            return Err(FindError::ConfigurationConflict(
                "-e/--ext cannot be combined with a file name".to_string(),
            ));
        }

        if let (None, Some(lone)) = (path, self.path.as_deref()) {
            if !Path::new(lone).exists() {
                warn!("'{}' 不存在，按文件名在当前目录中查找", lone);
            }
        }

        let root = match path {
            Some(path) => PathBuf::from(path),
            None => std::env::current_dir().map_err(FindError::CurrentDirUnavailable)?,
        };

        Ok(WalkRequest::new(root)
            .with_target(self.match_target(name.or(self.file.as_deref())))
            .with_max_depth(self.max_depth)
            .with_max_results(self.limit))
    }

    /// 区分起始路径和文件名
    ///
    /// 单独一个位置参数，若不是已存在的目录且不含路径分隔符，则视为文件名。
    fn positionals(&self) -> (Option<&str>, Option<&str>) {
        match (self.path.as_deref(), self.name.as_deref()) {
            (Some(only), None) if self.takes_lone_name() && looks_like_name(only) => {
                (None, Some(only))
            }
            other => other,
        }
    }

    fn takes_lone_name(&self) -> bool {
        self.file.is_none() && self.extension.is_none()
    }

    fn match_target(&self, name: Option<&str>) -> MatchTarget {
        if let Some(ext) = &self.extension {
            return MatchTarget::Extension {
                ext: ext.clone(),
                known_only: self.known_only,
            };
        }

        match name {
            Some(name) if self.partial => MatchTarget::Partial(name.to_string()),
            Some(name) => MatchTarget::Exact(name.to_string()),
            None => MatchTarget::All,
        }
    }
}

fn looks_like_name(arg: &str) -> bool {
    !arg.chars().any(std::path::is_separator) && !Path::new(arg).is_dir()
}
