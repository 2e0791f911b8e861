//! Lockability policy
//!
//! 加锁策略

use std::path::Path;

use super::error::Result;

#[cfg(target_os = "linux")]
use super::device::device_name_of_dir;
#[cfg(target_os = "linux")]
use super::rotational::is_rotational;

/// Decide whether a directory should be lock-guarded
///
/// 判断目录是否应该加锁保护
///
/// Resolves the directory's backing device and returns `true` exactly when
/// that device is rotational: spinning disks want a single sequential
/// writer, solid-state devices tolerate concurrent ones, so exclusion is
/// unnecessary there.
///
/// 解析目录背后的设备，仅当它是旋转设备时返回 `true`：
/// 机械硬盘需要单一顺序写入者，固态硬盘可以容忍并发写入者，
/// 因此无需互斥。
///
/// Resolution or classification failures propagate unchanged; a failure is
/// never quietly treated as "no lock needed".
///
/// 解析或分类失败会原样向上传播；失败绝不会被悄悄当成“不需要加锁”。
///
/// # Examples
///
/// ```no_run
/// use disk_guard::should_lock;
///
/// # fn main() -> disk_guard::Result<()> {
/// if should_lock("/mnt/scratch")? {
///     // acquire a DirectoryLock before writing
///     // 写入前先获取 DirectoryLock
/// }
/// # Ok(())
/// # }
/// ```
#[cfg(target_os = "linux")]
pub fn should_lock(dir: impl AsRef<Path>) -> Result<bool> {
    let device = device_name_of_dir(dir)?;
    is_rotational(&device)
}

/// Decide whether a directory should be lock-guarded
///
/// 判断目录是否应该加锁保护
///
/// This platform has no `/sys` block-device introspection, so locking is
/// considered unnecessary: always `Ok(false)`, never an error.
///
/// 此平台没有 `/sys` 块设备自省机制，因此认为无需加锁：
/// 恒为 `Ok(false)`，不会出错。
#[cfg(not(target_os = "linux"))]
pub fn should_lock(_dir: impl AsRef<Path>) -> Result<bool> {
    Ok(false)
}
