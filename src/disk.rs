//! Device introspection and cross-process directory locking
//!
//! 设备自省与跨进程目录锁定
//!
//! Two independent services live here:
//!
//! - [`should_lock`] composes block-device resolution and the kernel's
//!   rotational attribute into a single yes/no: rotational devices get an
//!   exclusive writer, solid-state devices tolerate concurrent ones.
//! - [`DirectoryLock`] is the exclusive guard itself, usable on its own
//!   whenever the caller has already decided to lock.
//!
//! 这里有两个相互独立的服务：
//!
//! - [`should_lock`] 把块设备解析和内核的旋转性属性合成一个是/否判断：
//!   机械硬盘需要独占写入者，固态硬盘可以容忍并发写入者。
//! - [`DirectoryLock`] 是独占守卫本身，调用者决定加锁后可单独使用。
//!
//! # Platform Support
//!
//! Device resolution and rotational classification read the `/sys`
//! pseudo-filesystem and are compiled on Linux only. On other platforms
//! [`should_lock`] answers `false` unconditionally and the introspection
//! functions are absent.
//!
//! # 平台支持
//!
//! 设备解析和旋转性分类读取 `/sys` 伪文件系统，仅在 Linux 上编译。
//! 其他平台上 [`should_lock`] 恒为 `false`，自省函数不存在。

#[cfg(target_os = "linux")]
mod device;
mod error;
mod lock;
mod policy;
#[cfg(target_os = "linux")]
mod rotational;

#[cfg(test)]
mod tests;

// Re-export public API
// 重新导出公共 API
#[cfg(target_os = "linux")]
pub use device::{device_name_of_dir, device_of_dir};
pub use error::{Error, Result};
pub use lock::DirectoryLock;
pub use policy::should_lock;
#[cfg(target_os = "linux")]
pub use rotational::is_rotational;
