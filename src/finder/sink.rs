//! 匹配结果的输出目标
//!
//! 默认每个匹配路径写一行到标准输出，也可以写入一个以截断模式打开的文件。

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use log::debug;

use crate::errors::{FindError, FindResult};

/// 接收匹配路径的目标
pub trait Sink {
    /// 接收第 `count` 个匹配（从 1 开始计数）
    fn emit(&mut self, path: &Path, count: usize) -> io::Result<()>;

    /// 遍历结束后调用，用于刷新缓冲区
    fn finish(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// 每个路径一行的输出
#[derive(Debug)]
pub struct LineSink<W: Write> {
    writer: W,
}

impl<W: Write> LineSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// 取回底层的 writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl LineSink<BufWriter<io::Stdout>> {
    /// 写到标准输出
    pub fn stdout() -> Self {
        Self::new(BufWriter::new(io::stdout()))
    }
}

impl LineSink<BufWriter<File>> {
    /// 创建（或截断）文件并写入其中
    pub fn create<P: AsRef<Path>>(path: P) -> FindResult<Self> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| FindError::OutputUnavailable {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Writing matches to {}", path.display());
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> Sink for LineSink<W> {
    fn emit(&mut self, path: &Path, _count: usize) -> io::Result<()> {
        write_path(&mut self.writer, path)?;
        self.writer.write_all(b"\n")
    }

    fn finish(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

impl Sink for Vec<PathBuf> {
    fn emit(&mut self, path: &Path, _count: usize) -> io::Result<()> {
        self.push(path.to_path_buf());
        Ok(())
    }
}

/// 根据 `-o` 参数选择输出目标
pub fn open_sink(output: Option<&Path>) -> FindResult<Box<dyn Sink>> {
    Ok(match output {
        Some(path) => Box::new(LineSink::create(path)?),
        None => Box::new(LineSink::stdout()),
    })
}

#[cfg(unix)]
fn write_path<W: Write>(writer: &mut W, path: &Path) -> io::Result<()> {
    use std::os::unix::ffi::OsStrExt;
    writer.write_all(path.as_os_str().as_bytes())
}

#[cfg(not(unix))]
fn write_path<W: Write>(writer: &mut W, path: &Path) -> io::Result<()> {
    writer.write_all(path.to_string_lossy().as_bytes())
}
