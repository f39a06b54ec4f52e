//! 文件系统遍历功能
//!
//! 深度优先遍历目录树，逐个产出匹配的文件路径。遍历使用显式的目录栈，
//! 而不是函数递归，因此很深的目录树不会耗尽调用栈。每个栈帧持有一个
//! 打开的目录句柄，帧出栈时句柄随之关闭。

use std::ffi::OsStr;
use std::fs::{self, FileType, ReadDir};
use std::path::{Path, PathBuf};

use log::{debug, error, trace, warn};

use super::filter::FileFilter;
use super::options::WalkRequest;
use super::path;
use crate::errors::FindError;

/// 目录项的类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// 目录，会被继续遍历
    Directory,
    /// 普通文件，会被过滤器检查
    File,
    /// 其他（符号链接、套接字、设备等），既不匹配也不遍历
    Other,
}

impl From<FileType> for EntryKind {
    fn from(file_type: FileType) -> Self {
        if file_type.is_dir() {
            EntryKind::Directory
        } else if file_type.is_file() {
            EntryKind::File
        } else {
            EntryKind::Other
        }
    }
}

impl EntryKind {
    /// 优先使用目录项自带的类型信息，取不到时退回到 lstat
    fn of(entry: &fs::DirEntry, path: &Path) -> Self {
        match entry.file_type() {
            Ok(file_type) => file_type.into(),
            Err(err) => {
                debug!("No type hint for {} ({}), falling back to lstat", path.display(), err);
                fs::symlink_metadata(path)
                    .map(|meta| meta.file_type().into())
                    .unwrap_or(EntryKind::Other)
            }
        }
    }
}

/// 一次遍历的统计信息
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkSummary {
    /// 产出的匹配数
    pub found: usize,
    /// 无法打开的目录数
    pub unreadable: usize,
    /// 是否因为达到结果上限而提前停止
    pub limit_reached: bool,
}

#[derive(Debug)]
struct DirFrame {
    entries: ReadDir,
    path: PathBuf,
    depth: usize,
}

/// 遍历过程中的可变状态，只属于当前这一次遍历
#[derive(Debug, Default)]
struct WalkState {
    stack: Vec<DirFrame>,
    found: usize,
    unreadable: usize,
}

/// 惰性的遍历迭代器，每次产出一个匹配的文件路径
///
/// 产出顺序就是文件系统枚举目录项的顺序，不做排序。
pub struct Walk<'a> {
    filter: &'a dyn FileFilter,
    max_depth: Option<usize>,
    max_results: Option<usize>,
    root: Option<PathBuf>,
    state: WalkState,
}

impl<'a> Walk<'a> {
    /// 使用给定请求和过滤器创建新的遍历
    pub fn new(request: &WalkRequest, filter: &'a dyn FileFilter) -> Self {
        Self {
            filter,
            max_depth: request.max_depth,
            max_results: request.max_results,
            root: Some(request.root.clone()),
            state: WalkState::default(),
        }
    }

    /// 到目前为止的统计信息
    pub fn summary(&self) -> WalkSummary {
        WalkSummary {
            found: self.state.found,
            unreadable: self.state.unreadable,
            limit_reached: self.limit_reached(),
        }
    }

    fn limit_reached(&self) -> bool {
        self.max_results.is_some_and(|max| self.state.found >= max)
    }

    /// 深度为 `depth` 的目录是否可以打开；它的目录项位于 `depth + 1`
    fn may_enter(&self, depth: usize) -> bool {
        self.max_depth.map_or(true, |max| depth < max)
    }

    fn descend(&mut self, path: PathBuf, depth: usize) {
        match fs::read_dir(&path) {
            Ok(entries) => {
                trace!("Entering {} at depth {}", path.display(), depth);
                self.state.stack.push(DirFrame {
                    entries,
                    path,
                    depth,
                });
            }
            Err(source) => {
                self.state.unreadable += 1;
                error!("{}", FindError::DirectoryUnreadable { path, source });
            }
        }
    }

    /// 关闭所有仍然打开的目录，之后不再读取任何目录
    fn halt(&mut self) {
        self.root = None;
        if self.state.stack.is_empty() {
            return;
        }
        debug!(
            "Result limit reached after {} matches, closing {} open directories",
            self.state.found,
            self.state.stack.len()
        );
        self.state.stack.clear();
    }
}

impl<'a> Iterator for Walk<'a> {
    type Item = PathBuf;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(root) = self.root.take() {
            if !self.limit_reached() && self.may_enter(0) {
                self.descend(root, 0);
            }
        }

        loop {
            if self.limit_reached() {
                self.halt();
                return None;
            }

            let frame = self.state.stack.last_mut()?;
            let entry = match frame.entries.next() {
                None => {
                    if let Some(done) = self.state.stack.pop() {
                        trace!("Leaving {}", done.path.display());
                    }
                    continue;
                }
                Some(Err(err)) => {
                    warn!("无法读取目录项 {}: {}", frame.path.display(), err);
                    continue;
                }
                Some(Ok(entry)) => entry,
            };

            let name = entry.file_name();
            if is_dot_entry(&name) {
                continue;
            }

            let child = path::join(&frame.path, &name);
            let depth = frame.depth + 1;

            match EntryKind::of(&entry, &child) {
                EntryKind::File => {
                    if self.filter.matches(&name) {
                        self.state.found += 1;
                        if self.limit_reached() {
                            self.halt();
                        }
                        return Some(child);
                    }
                }
                EntryKind::Directory => {
                    if self.may_enter(depth) {
                        self.descend(child, depth);
                    }
                }
                EntryKind::Other => trace!("Skipping {}", child.display()),
            }
        }
    }
}

fn is_dot_entry(name: &OsStr) -> bool {
    matches!(name.as_encoded_bytes(), b"." | b"..")
}
