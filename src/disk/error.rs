//! Error types for disk-guard
//!
//! disk-guard 的错误类型

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Error type for device introspection operations
///
/// 设备自省操作的错误类型
///
/// Locking never produces these: lock acquisition retries internally and
/// lock release reports failure through its boolean return.
///
/// 锁操作不会产生这些错误：加锁在内部重试，解锁通过布尔返回值报告失败。
#[derive(Debug)]
pub enum Error {
    /// Directory metadata could not be read
    ///
    /// 无法读取目录元数据
    DirStat {
        dir: PathBuf,
        source: io::Error,
    },

    /// Block-device path could not be canonicalized
    ///
    /// 块设备路径无法规范化
    DeviceResolution {
        block: PathBuf,
        source: io::Error,
    },

    /// Rotational attribute file could not be opened
    ///
    /// 旋转性属性文件无法打开
    RotationalQuery {
        path: PathBuf,
        source: io::Error,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::DirStat { dir, source } => {
                write!(
                    f,
                    "unable to find device for directory {}: {}",
                    dir.display(),
                    source
                )
            }
            Error::DeviceResolution { block, source } => {
                write!(
                    f,
                    "unable to resolve block device {}: {}",
                    block.display(),
                    source
                )
            }
            Error::RotationalQuery { path, source } => {
                write!(
                    f,
                    "unable to open {} for reading: {}",
                    path.display(),
                    source
                )
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::DirStat { source, .. }
            | Error::DeviceResolution { source, .. }
            | Error::RotationalQuery { source, .. } => Some(source),
        }
    }
}

/// Convert from Error to io::Error for compatibility
///
/// 从 Error 转换到 io::Error 以保持兼容性
impl From<Error> for io::Error {
    fn from(err: Error) -> Self {
        let kind = match &err {
            Error::DirStat { source, .. }
            | Error::DeviceResolution { source, .. }
            | Error::RotationalQuery { source, .. } => source.kind(),
        };
        io::Error::new(kind, err.to_string())
    }
}

/// Result type alias using our custom Error type
///
/// 使用自定义 Error 类型的 Result 类型别名
pub type Result<T> = std::result::Result<T, Error>;
