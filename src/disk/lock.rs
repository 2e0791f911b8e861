//! Exclusive cross-process directory lock
//!
//! 跨进程的目录独占锁

use std::fs::File;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use fs2::FileExt;

/// Interval between acquisition attempts
/// 两次尝试加锁之间的间隔
const DEFAULT_RETRY_INTERVAL: Duration = Duration::from_secs(60);

/// Exclusive cross-process guard over a directory
///
/// 目录上的跨进程独占守卫
///
/// Holds an open handle to the directory with an exclusive advisory lock
/// on it. The lock constrains cooperating processes only: anyone who does
/// not check it can still touch the directory.
///
/// 持有目录的打开句柄及其上的独占 advisory 锁。
/// 该锁只约束协作进程：不检查锁的进程仍然可以访问目录。
///
/// # Features
///
/// - **Blocking acquisition**: [`lock`](Self::lock) retries on a fixed
///   interval until the directory is free, for as long as it takes
/// - **Scope-based release**: A held lock is released when the guard goes
///   out of scope, on every exit path
/// - **Observable waits**: Each failed attempt emits a `tracing` notice so
///   an operator can diagnose a stuck process
///
/// # 特性
///
/// - **阻塞式获取**：[`lock`](Self::lock) 按固定间隔重试直到目录空闲，
///   等待时间没有上限
/// - **作用域释放**：守卫离开作用域时释放持有的锁，覆盖所有退出路径
/// - **可观察的等待**：每次尝试失败都会发出 `tracing` 通知，
///   便于运维人员诊断卡住的进程
///
/// # Concurrency
///
/// One instance owns at most one held handle. The `&mut self` receivers
/// mean two threads cannot race [`lock`](Self::lock) and
/// [`unlock`](Self::unlock) on the same instance without external
/// synchronization; there is no internal mutex.
///
/// # 并发
///
/// 一个实例最多持有一个句柄。`&mut self` 接收者意味着两个线程
/// 不可能在没有外部同步的情况下对同一实例并发调用
/// [`lock`](Self::lock) 和 [`unlock`](Self::unlock)；内部没有互斥锁。
///
/// # Examples
///
/// ```
/// use disk_guard::DirectoryLock;
/// # use tempfile::tempdir;
/// # fn main() -> std::io::Result<()> {
/// # let dir = tempdir()?;
/// // Construction acquires immediately
/// // 构造时立即获取
/// let mut lock = DirectoryLock::new(dir.path());
/// assert!(lock.is_locked());
///
/// // Explicit release; a second call is a no-op
/// // 显式释放；第二次调用是空操作
/// assert!(lock.unlock());
/// assert!(!lock.unlock());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct DirectoryLock {
    /// Directory the lock is associated with
    ///
    /// 锁所关联的目录
    dir: PathBuf,

    /// Open directory handle while locked, `None` while unlocked
    ///
    /// 加锁期间的目录句柄，未加锁时为 `None`
    handle: Option<File>,

    /// Sleep between acquisition attempts
    ///
    /// 两次尝试之间的睡眠时长
    retry_interval: Duration,
}

impl DirectoryLock {
    /// Create a guard and immediately acquire the lock
    ///
    /// 创建守卫并立即获取锁
    ///
    /// Blocks the calling thread until the lock is acquired; construction
    /// never skips locking. See [`lock`](Self::lock) for the retry policy.
    ///
    /// 阻塞调用线程直到获取成功；构造绝不会跳过加锁。
    /// 重试策略见 [`lock`](Self::lock)。
    ///
    /// # Parameters
    /// - `dir`: Directory to guard; must be openable for the lock to
    ///   ever succeed
    ///
    /// # 参数
    /// - `dir`: 要守护的目录；必须能被打开，加锁才可能成功
    ///
    /// # Examples
    ///
    /// ```
    /// use disk_guard::DirectoryLock;
    /// # use tempfile::tempdir;
    /// # fn main() -> std::io::Result<()> {
    /// # let dir = tempdir()?;
    /// let guard = DirectoryLock::new(dir.path());
    /// assert!(guard.is_locked());
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let mut lock = Self::unlocked(dir);
        lock.lock();
        lock
    }

    /// Create a guard without acquiring the lock
    ///
    /// 创建守卫但不获取锁
    ///
    /// The caller decides when (and whether) to call
    /// [`lock`](Self::lock).
    ///
    /// 由调用者决定何时（以及是否）调用 [`lock`](Self::lock)。
    ///
    /// # Examples
    ///
    /// ```
    /// use disk_guard::DirectoryLock;
    /// # use tempfile::tempdir;
    /// # fn main() -> std::io::Result<()> {
    /// # let dir = tempdir()?;
    /// let mut guard = DirectoryLock::unlocked(dir.path());
    /// assert!(!guard.is_locked());
    ///
    /// assert!(guard.lock());
    /// assert!(guard.is_locked());
    /// # Ok(())
    /// # }
    /// ```
    pub fn unlocked(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            handle: None,
            retry_interval: DEFAULT_RETRY_INTERVAL,
        }
    }

    /// Override the interval between acquisition attempts
    ///
    /// 覆盖两次尝试加锁之间的间隔
    ///
    /// Defaults to 60 seconds. Shorter intervals poll the contended lock
    /// more aggressively; they do not change the wait-forever semantics.
    ///
    /// 默认 60 秒。更短的间隔会更频繁地探测被占用的锁；
    /// 不改变“永远等待”的语义。
    #[inline]
    pub fn retry_interval(mut self, interval: Duration) -> Self {
        self.retry_interval = interval;
        self
    }

    /// Acquire the exclusive lock, blocking until it succeeds
    ///
    /// 获取独占锁，阻塞直到成功
    ///
    /// A no-op returning `true` when already locked. Otherwise opens the
    /// directory read-only and takes a non-blocking exclusive advisory
    /// lock on the handle, retrying on the configured interval:
    ///
    /// - Lock held elsewhere: logs a waiting notice and retries
    /// - Any other open or lock failure: logs the error and retries all
    ///   the same
    ///
    /// 已加锁时是空操作并返回 `true`。否则以只读方式打开目录，
    /// 在句柄上尝试非阻塞的独占 advisory 锁，按配置的间隔重试：
    ///
    /// - 锁被他人持有：记录等待通知后重试
    /// - 其他打开或加锁失败：记录错误后同样重试
    ///
    /// There is no timeout and no cancellation path; under contention or
    /// persistent errors this call blocks the thread for an unbounded
    /// duration. The only way out is the other holder releasing, the
    /// error clearing, or process termination.
    ///
    /// 没有超时，也没有取消路径；在争用或持续错误下，
    /// 此调用会无限期阻塞线程。唯一的出路是持有者释放、
    /// 错误消失或进程终止。
    ///
    /// # Returns
    /// `true` once the lock is held. Never returns `false`.
    ///
    /// # 返回值
    /// 持有锁后返回 `true`。永远不会返回 `false`。
    pub fn lock(&mut self) -> bool {
        if self.handle.is_some() {
            return true;
        }

        loop {
            match File::open(&self.dir) {
                Ok(file) => match file.try_lock_exclusive() {
                    Ok(()) => {
                        self.handle = Some(file);
                        return true;
                    }
                    Err(err)
                        if err.raw_os_error()
                            == fs2::lock_contended_error().raw_os_error() =>
                    {
                        tracing::info!(
                            "directory locked, waiting (retrying in {}s): {}",
                            self.retry_interval.as_secs(),
                            self.dir.display()
                        );
                    }
                    Err(err) => {
                        tracing::warn!(
                            "unable to lock directory {} (retrying in {}s): {}",
                            self.dir.display(),
                            self.retry_interval.as_secs(),
                            err
                        );
                    }
                },
                Err(err) => {
                    tracing::warn!(
                        "unable to open directory for locking {} (retrying in {}s): {}",
                        self.dir.display(),
                        self.retry_interval.as_secs(),
                        err
                    );
                }
            }

            thread::sleep(self.retry_interval);
        }
    }

    /// Release the lock and close the directory handle
    ///
    /// 释放锁并关闭目录句柄
    ///
    /// A no-op returning `false` when already unlocked. If the OS refuses
    /// the release, the error is logged, the handle is kept, and the
    /// instance still considers itself locked; repeated failures here mean
    /// the process can no longer manage this resource.
    ///
    /// 未加锁时是空操作并返回 `false`。若操作系统拒绝释放，
    /// 则记录错误、保留句柄，实例仍视自己为已加锁；
    /// 此处反复失败意味着进程已无法管理该资源。
    ///
    /// # Returns
    /// `true` when the lock was held and is now released
    ///
    /// # 返回值
    /// 原本持有锁且现已释放时返回 `true`
    pub fn unlock(&mut self) -> bool {
        let Some(file) = self.handle.take() else {
            return false;
        };

        if let Err(err) = FileExt::unlock(&file) {
            tracing::warn!(
                "failed to unlock directory {}: {}",
                self.dir.display(),
                err
            );
            self.handle = Some(file);
            return false;
        }

        // Dropping the handle closes the descriptor
        // 丢弃句柄即关闭描述符
        true
    }

    /// Whether this instance currently holds the lock
    ///
    /// 此实例当前是否持有锁
    #[inline]
    pub fn is_locked(&self) -> bool {
        self.handle.is_some()
    }

    /// The directory this guard is associated with
    ///
    /// 此守卫关联的目录
    #[inline]
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

/// Release on scope exit
///
/// 作用域结束时释放
///
/// Failures are logged by [`unlock`](DirectoryLock::unlock) and otherwise
/// ignored; teardown never panics.
///
/// 失败由 [`unlock`](DirectoryLock::unlock) 记录日志，此外不做处理；
/// 清理过程绝不 panic。
impl Drop for DirectoryLock {
    fn drop(&mut self) {
        self.unlock();
    }
}
