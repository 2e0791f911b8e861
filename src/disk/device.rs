//! Block-device resolution for directories
//!
//! 目录的块设备解析
//!
//! Maps a directory to the block device backing it, through the
//! `/sys/dev/block/<major>:<minor>` symbolic-link tree. The resolved
//! identifier is valid for the duration of a single call only; nothing is
//! cached.
//!
//! 通过 `/sys/dev/block/<major>:<minor>` 符号链接树，把目录映射到
//! 背后的块设备。解析出的标识只在单次调用内有效，不做任何缓存。

use std::fs;
use std::io;
use std::os::unix::fs::MetadataExt;
use std::path::{Path, PathBuf};

use super::error::{Error, Result};

/// Resolve the canonical block-device path backing a directory
///
/// 解析目录背后块设备的规范路径
///
/// Reads the directory's device number, decomposes it into major/minor,
/// and canonicalizes `/sys/dev/block/<major>:<minor>`. The resulting path
/// ends in the device name, e.g. `/sys/devices/.../block/sda`.
///
/// 读取目录的设备号，拆分为 major/minor，再规范化
/// `/sys/dev/block/<major>:<minor>`。结果路径以设备名结尾，
/// 例如 `/sys/devices/.../block/sda`。
///
/// # Parameters
/// - `dir`: Directory to resolve; must exist at call time
///
/// # 参数
/// - `dir`: 要解析的目录；调用时必须存在
///
/// # Examples
///
/// ```no_run
/// use disk_guard::device_of_dir;
///
/// # fn main() -> disk_guard::Result<()> {
/// let device = device_of_dir("/var/tmp")?;
/// println!("backed by {}", device.display());
/// # Ok(())
/// # }
/// ```
///
/// # Errors
/// - [`Error::DirStat`] if the directory cannot be stat'ed
/// - [`Error::DeviceResolution`] if the sysfs entry cannot be
///   canonicalized, which is the expected outcome on restricted
///   environments whose backing device has no sysfs entry
///
/// # Errors
/// - 目录无法 stat 时返回 [`Error::DirStat`]
/// - sysfs 条目无法规范化时返回 [`Error::DeviceResolution`]，
///   在背后设备没有 sysfs 条目的受限环境中属于预期结果
pub fn device_of_dir(dir: impl AsRef<Path>) -> Result<PathBuf> {
    let dir = dir.as_ref();

    let meta = fs::metadata(dir).map_err(|source| Error::DirStat {
        dir: dir.to_path_buf(),
        source,
    })?;

    let dev = meta.dev();
    let block = PathBuf::from(format!(
        "/sys/dev/block/{}:{}",
        libc::major(dev),
        libc::minor(dev)
    ));

    fs::canonicalize(&block).map_err(|source| Error::DeviceResolution { block, source })
}

/// Resolve the bare device name backing a directory
///
/// 解析目录背后的设备名
///
/// The final component of [`device_of_dir`]'s result (e.g. `sda`), which is
/// the form the kernel's `/sys/block/<name>` tree is keyed by.
///
/// [`device_of_dir`] 结果的最后一段（例如 `sda`），即内核
/// `/sys/block/<name>` 树所用的键。
///
/// # Errors
/// Fails like [`device_of_dir`], plus [`Error::DeviceResolution`] if the
/// canonical path has no final component.
///
/// # Errors
/// 与 [`device_of_dir`] 相同，另外规范路径没有最后一段时返回
/// [`Error::DeviceResolution`]。
pub fn device_name_of_dir(dir: impl AsRef<Path>) -> Result<String> {
    let device = device_of_dir(dir)?;

    match device.file_name() {
        Some(name) => Ok(name.to_string_lossy().into_owned()),
        None => Err(Error::DeviceResolution {
            source: io::Error::new(
                io::ErrorKind::InvalidData,
                "canonical device path has no final component",
            ),
            block: device,
        }),
    }
}
