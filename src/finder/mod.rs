//! 文件查找模块
//!
//! 这个模块把一次搜索请求（起始路径、匹配目标、深度与数量上限）
//! 交给遍历器执行，并把匹配结果送到输出目标。

pub mod filter;
pub mod options;
pub mod path;
pub mod sink;
pub mod walker;

use std::fmt;
use std::io;
use std::path::PathBuf;

use log::{debug, info};

use crate::errors::FindResult;

pub use self::filter::{FileFilter, FilterFactory, MatchTarget};
pub use self::options::WalkRequest;
pub use self::sink::{LineSink, Sink};
pub use self::walker::{Walk, WalkSummary};

/// 文件查找器
///
/// 持有一次搜索请求及其过滤器，可以多次执行。
pub struct Finder {
    request: WalkRequest,
    filter: Box<dyn FileFilter + Send + Sync>,
}

impl Finder {
    /// 创建新的文件查找器实例，过滤器由请求中的匹配目标决定
    pub fn new(request: WalkRequest) -> Self {
        let filter = FilterFactory::create_filter(&request.target);
        Self { request, filter }
    }

    /// 替换过滤器
    pub fn with_filter<F>(mut self, filter: F) -> Self
    where
        F: FileFilter + Send + Sync + 'static,
    {
        self.filter = Box::new(filter);
        self
    }

    /// 当前的搜索请求
    pub fn request(&self) -> &WalkRequest {
        &self.request
    }

    /// 惰性遍历，逐个产出匹配的路径
    pub fn walk(&self) -> Walk<'_> {
        Walk::new(&self.request, self.filter.as_ref())
    }

    /// 在起始目录中查找符合条件的文件
    pub fn find(&self) -> Vec<PathBuf> {
        self.walk().collect()
    }

    /// 查找并把每个匹配写入 `sink`
    pub fn find_into<S>(&self, sink: &mut S) -> FindResult<WalkSummary>
    where
        S: Sink + ?Sized,
    {
        info!(
            "Starting search in {} ({})",
            self.request.root.display(),
            self.filter.description()
        );

        let mut walk = self.walk();
        let mut count = 0;
        let mut closed = false;
        for path in walk.by_ref() {
            count += 1;
            if output_closed(sink.emit(&path, count))? {
                closed = true;
                break;
            }
        }
        if !closed {
            closed = output_closed(sink.finish())?;
        }
        if closed {
            debug!("Output closed by reader after {} matches, stopping", count);
        }

        let summary = walk.summary();
        debug!(
            "Search finished: {} matches, {} unreadable directories",
            summary.found, summary.unreadable
        );
        Ok(summary)
    }
}

/// 读端已关闭（如 `| head -1`）时视为提前结束，其他写入错误照常返回
fn output_closed(result: io::Result<()>) -> FindResult<bool> {
    match result {
        Ok(()) => Ok(false),
        Err(err) if err.kind() == io::ErrorKind::BrokenPipe => Ok(true),
        Err(err) => Err(err.into()),
    }
}

impl fmt::Debug for Finder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Finder")
            .field("request", &self.request)
            .field("filter", &self.filter.description())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::ffi::OsStr;
    use std::fs::{self, File};
    use tempfile::tempdir;

    #[test]
    fn test_finder_basic() {
        let temp_dir = tempdir().unwrap();
        let base_path = temp_dir.path();

        fs::create_dir(base_path.join("dir1")).unwrap();
        fs::create_dir(base_path.join("dir2")).unwrap();
        File::create(base_path.join("dir1/test1.txt")).unwrap();
        File::create(base_path.join("dir2/test2.txt")).unwrap();
        File::create(base_path.join("dir2/notes.md")).unwrap();

        let request = WalkRequest::new(base_path).with_target(MatchTarget::Extension {
            ext: ".txt".to_string(),
            known_only: false,
        });
        let results = Finder::new(request).find();

        assert_eq!(results.len(), 2);
        assert!(results.iter().any(|p| p.ends_with("dir1/test1.txt")));
        assert!(results.iter().any(|p| p.ends_with("dir2/test2.txt")));
    }

    #[test]
    fn test_finder_hidden_files_are_not_special() {
        let temp_dir = tempdir().unwrap();
        let base_path = temp_dir.path();

        File::create(base_path.join(".hidden.txt")).unwrap();
        File::create(base_path.join("normal.txt")).unwrap();

        let request = WalkRequest::new(base_path)
            .with_target(MatchTarget::Partial(".txt".to_string()));
        let results = Finder::new(request).find();
        assert_eq!(results.len(), 2);
    }

    #[test]
    fn test_finder_custom_filter() {
        struct ShortNames;
        impl FileFilter for ShortNames {
            fn matches(&self, name: &OsStr) -> bool {
                name.len() <= 3
            }

            fn description(&self) -> String {
                "short names".to_string()
            }
        }

        let temp_dir = tempdir().unwrap();
        File::create(temp_dir.path().join("a.c")).unwrap();
        File::create(temp_dir.path().join("long.c")).unwrap();

        let finder = Finder::new(WalkRequest::new(temp_dir.path())).with_filter(ShortNames);
        assert_eq!(finder.find(), vec![temp_dir.path().join("a.c")]);
        assert!(format!("{:?}", finder).contains("short names"));
    }

    #[test]
    fn test_find_into_sink_counts() -> Result<(), Box<dyn std::error::Error>> {
        let temp_dir = tempdir()?;
        for name in ["one.log", "two.log", "three.log"] {
            File::create(temp_dir.path().join(name))?;
        }

        let request = WalkRequest::new(temp_dir.path()).with_max_results(Some(2));
        let mut found: Vec<PathBuf> = Vec::new();
        let summary = Finder::new(request).find_into(&mut found)?;

        assert_eq!(found.len(), 2);
        assert_eq!(summary.found, 2);
        assert!(summary.limit_reached);
        assert_eq!(summary.unreadable, 0);
        Ok(())
    }

    /// 接受 `accept` 个路径后返回 `kind` 错误
    struct FailingSink {
        accept: usize,
        kind: io::ErrorKind,
        seen: Vec<PathBuf>,
    }

    impl Sink for FailingSink {
        fn emit(&mut self, path: &std::path::Path, _count: usize) -> io::Result<()> {
            if self.seen.len() == self.accept {
                return Err(io::Error::new(self.kind, "sink failed"));
            }
            self.seen.push(path.to_path_buf());
            Ok(())
        }
    }

    fn many_files(n: usize) -> tempfile::TempDir {
        let temp_dir = tempdir().unwrap();
        for i in 0..n {
            File::create(temp_dir.path().join(format!("f{}.txt", i))).unwrap();
        }
        temp_dir
    }

    #[test]
    fn test_find_into_stops_quietly_on_broken_pipe() -> Result<(), Box<dyn std::error::Error>> {
        let temp_dir = many_files(5);
        let mut sink = FailingSink {
            accept: 1,
            kind: io::ErrorKind::BrokenPipe,
            seen: Vec::new(),
        };

        let summary = Finder::new(WalkRequest::new(temp_dir.path())).find_into(&mut sink)?;

        assert_eq!(sink.seen.len(), 1);
        assert_eq!(summary.found, 2);
        Ok(())
    }

    #[test]
    fn test_find_into_other_write_errors_are_fatal() {
        let temp_dir = many_files(3);
        let mut sink = FailingSink {
            accept: 1,
            kind: io::ErrorKind::Other,
            seen: Vec::new(),
        };

        match Finder::new(WalkRequest::new(temp_dir.path())).find_into(&mut sink) {
            Err(crate::errors::FindError::Output(err)) => {
                assert_eq!(err.kind(), io::ErrorKind::Other)
            }
            other => panic!("Expected Output error, got {:?}", other),
        }
    }

    #[test]
    fn test_finder_is_idempotent() {
        let temp_dir = tempdir().unwrap();
        fs::create_dir_all(temp_dir.path().join("x/y")).unwrap();
        File::create(temp_dir.path().join("x/y/z.txt")).unwrap();
        File::create(temp_dir.path().join("x/w.txt")).unwrap();

        let finder = Finder::new(WalkRequest::new(temp_dir.path()));
        let first: HashSet<_> = finder.find().into_iter().collect();
        let second: HashSet<_> = finder.find().into_iter().collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
    }
}
