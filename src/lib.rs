//! Storage-aware directory guarding for large temporary file writers
//!
//! 面向大型临时文件写入器的存储感知目录守护
//!
//! This library answers two questions for a process that streams large
//! temporary files into a working directory: "is the device behind this
//! directory a spinning disk, so parallel writes would hurt?" and "can I
//! reserve this directory for exclusive use across processes?".
//!
//! 本库为向工作目录写入大型临时文件的进程回答两个问题：
//! “这个目录背后的设备是不是机械硬盘，并行写入会不会拖慢速度？”
//! 以及“我能不能跨进程独占这个目录？”
//!
//! # Features
//!
//! - **Rotational classification**: Reads the kernel's per-device
//!   `queue/rotational` attribute to tell HDDs from SSDs
//! - **Conservative defaults**: Any ambiguous rotational signal is treated
//!   as a spinning disk, so parallel writing is never assumed by accident
//! - **Cross-process locking**: Exclusive advisory lock on a directory,
//!   blocking with a fixed retry interval until acquired
//! - **Scope-based release**: A held lock is released when its guard goes
//!   out of scope, on every exit path
//! - **Platform gated**: One policy function answers whether locking is
//!   worthwhile at all; on platforms without sysfs it is always `false`
//!
//! # 特性
//!
//! - **旋转性分类**：读取内核的 `queue/rotational` 设备属性，区分机械硬盘与固态硬盘
//! - **保守默认值**：任何含糊的旋转性信号都按机械硬盘处理，绝不误判为可并行写入
//! - **跨进程锁定**：对目录加独占 advisory 锁，按固定间隔阻塞重试直到成功
//! - **作用域释放**：持有的锁在守卫离开作用域时释放，覆盖所有退出路径
//! - **平台门控**：单一策略函数回答是否值得加锁；没有 sysfs 的平台恒为 `false`
//!
//! # Quick Start
//!
//! ## Deciding whether to lock
//!
//! Ask [`should_lock`] before reserving a directory. Solid-state devices
//! tolerate concurrent writers, so exclusion is skipped for them.
//!
//! ## 判断是否需要加锁
//!
//! 在独占目录之前先调用 [`should_lock`]。固态设备可以容忍并发写入，
//! 因此对它们跳过互斥。
//!
//! ```no_run
//! use disk_guard::{DirectoryLock, should_lock};
//!
//! # fn main() -> disk_guard::Result<()> {
//! let workdir = "/mnt/scratch/plots";
//!
//! if should_lock(workdir)? {
//!     // Blocks until the directory is ours
//!     // 阻塞直到目录归我们所有
//!     let _guard = DirectoryLock::new(workdir);
//!     // ... write the large files ...
//! } // lock released here / 锁在这里释放
//! # Ok(())
//! # }
//! ```
//!
//! ## Locking directly
//!
//! [`DirectoryLock`] is usable on its own wherever the platform has an
//! advisory-lock primitive:
//!
//! ## 直接加锁
//!
//! 只要平台有 advisory 锁原语，[`DirectoryLock`] 就可以单独使用：
//!
//! ```
//! use disk_guard::DirectoryLock;
//! # use tempfile::tempdir;
//! # fn main() -> std::io::Result<()> {
//! # let dir = tempdir()?;
//! let mut lock = DirectoryLock::new(dir.path());
//! assert!(lock.is_locked());
//!
//! // Release early instead of waiting for scope exit
//! // 提前释放而不是等待作用域结束
//! assert!(lock.unlock());
//! # Ok(())
//! # }
//! ```
//!
//! # Main Types
//!
//! - [`DirectoryLock`]: Exclusive cross-process guard over a directory
//! - [`should_lock`]: Policy check: lock rotational devices, skip solid-state
//! - [`is_rotational`]: Per-device rotational query (Linux)
//! - [`device_of_dir`] / [`device_name_of_dir`]: Block-device resolution
//!   for a directory (Linux)
//! - [`Error`] / [`Result`]: Introspection error taxonomy
//!
//! # 主要类型
//!
//! - [`DirectoryLock`][]: 目录上的跨进程独占守卫
//! - [`should_lock`][]: 策略检查：机械硬盘加锁，固态硬盘跳过
//! - [`is_rotational`][]: 单个设备的旋转性查询（Linux）
//! - [`device_of_dir`] / [`device_name_of_dir`]: 目录的块设备解析（Linux）
//! - [`Error`] / [`Result`]: 自省操作的错误分类

mod disk;

#[cfg(target_os = "linux")]
pub use disk::{device_name_of_dir, device_of_dir, is_rotational};
pub use disk::{DirectoryLock, Error, Result, should_lock};
