//! 测试模块

use super::*;
use tempfile::tempdir;

/// DirectoryLock 测试
#[cfg(test)]
mod lock_tests {
    use super::*;
    use std::sync::mpsc;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_new_acquires_immediately() {
        let dir = tempdir().unwrap();

        let mut lock = DirectoryLock::new(dir.path());
        assert!(lock.is_locked());
        assert_eq!(lock.dir(), dir.path());

        assert!(lock.unlock());
    }

    #[test]
    fn test_unlocked_constructor_does_not_acquire() {
        let dir = tempdir().unwrap();

        let mut lock = DirectoryLock::unlocked(dir.path());
        assert!(!lock.is_locked());

        assert!(lock.lock());
        assert!(lock.is_locked());
    }

    #[test]
    fn test_lock_is_idempotent() {
        let dir = tempdir().unwrap();

        let mut lock = DirectoryLock::new(dir.path());
        assert!(lock.lock());
        assert!(lock.lock());
        assert!(lock.is_locked());
    }

    #[test]
    fn test_unlock_twice_returns_true_then_false() {
        let dir = tempdir().unwrap();

        let mut lock = DirectoryLock::new(dir.path());
        assert!(lock.unlock());
        assert!(!lock.unlock());
        assert!(!lock.is_locked());
    }

    #[test]
    fn test_lock_unlock_round_trip() {
        let dir = tempdir().unwrap();

        // 没有竞争者时，释放后立即重新加锁不会阻塞
        let mut lock = DirectoryLock::new(dir.path());
        assert!(lock.unlock());
        assert!(lock.lock());
        assert!(lock.unlock());
    }

    #[test]
    fn test_drop_releases_lock() {
        let dir = tempdir().unwrap();

        {
            let lock = DirectoryLock::new(dir.path());
            assert!(lock.is_locked());
        }

        // 作用域结束后锁已释放，新实例立即获取成功
        let mut fresh = DirectoryLock::unlocked(dir.path());
        assert!(fresh.lock());
        assert!(fresh.unlock());
    }

    #[test]
    fn test_contending_lock_waits_for_release() {
        let dir = tempdir().unwrap();

        let mut first = DirectoryLock::new(dir.path());
        assert!(first.is_locked());

        let path = dir.path().to_path_buf();
        let (tx, rx) = mpsc::channel();
        let waiter = thread::spawn(move || {
            let mut second = DirectoryLock::unlocked(path)
                .retry_interval(Duration::from_millis(20));
            second.lock();
            tx.send(()).unwrap();
            second.unlock();
        });

        // 第一个实例持有期间，第二个实例的 lock() 不会返回
        assert!(rx.recv_timeout(Duration::from_millis(200)).is_err());

        assert!(first.unlock());

        // 释放后，等待中的调用完成
        rx.recv_timeout(Duration::from_secs(10))
            .expect("waiter should acquire after release");
        waiter.join().unwrap();
    }

    #[test]
    fn test_independent_directories_do_not_contend() {
        let dir_a = tempdir().unwrap();
        let dir_b = tempdir().unwrap();

        let mut lock_a = DirectoryLock::new(dir_a.path());
        let mut lock_b = DirectoryLock::new(dir_b.path());

        assert!(lock_a.is_locked());
        assert!(lock_b.is_locked());

        assert!(lock_a.unlock());
        assert!(lock_b.unlock());
    }
}

/// 设备解析测试
#[cfg(all(test, target_os = "linux"))]
mod device_tests {
    use super::*;

    #[test]
    fn test_missing_dir_fails_with_dir_stat() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("definitely-not-here");

        match device_of_dir(&missing) {
            Err(Error::DirStat { dir: stat_dir, .. }) => assert_eq!(stat_dir, missing),
            other => panic!("expected DirStat error, got {other:?}"),
        }
    }

    #[test]
    fn test_existing_dir_resolves_or_reports_resolution_error() {
        let dir = tempdir().unwrap();

        match device_of_dir(dir.path()) {
            Ok(device) => {
                assert!(device.is_absolute());
                assert!(device.file_name().is_some());
            }
            // 受限环境（容器 overlay 等）的设备没有 sysfs 条目
            Err(Error::DeviceResolution { .. }) => {}
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_device_name_is_final_component() {
        let dir = tempdir().unwrap();

        if let (Ok(device), Ok(name)) =
            (device_of_dir(dir.path()), device_name_of_dir(dir.path()))
        {
            assert!(!name.is_empty());
            assert_eq!(device.file_name().unwrap().to_string_lossy(), name);
        }
    }
}

/// 旋转性分类测试
#[cfg(all(test, target_os = "linux"))]
mod rotational_tests {
    use super::*;
    use crate::disk::rotational::rotational_first_line;

    #[test]
    fn test_unknown_device_fails_with_rotational_query() {
        match is_rotational("no-such-device-zzz") {
            Err(Error::RotationalQuery { path, .. }) => {
                assert!(path.ends_with("queue/rotational"));
            }
            other => panic!("expected RotationalQuery error, got {other:?}"),
        }
    }

    #[test]
    fn test_leading_zero_is_non_rotational() {
        assert!(!rotational_first_line("0"));
        assert!(!rotational_first_line("0\n"));
        assert!(!rotational_first_line("0 trailing"));
    }

    #[test]
    fn test_everything_else_is_rotational() {
        // 含糊信号一律按旋转设备处理
        assert!(rotational_first_line("1"));
        assert!(rotational_first_line("1\n"));
        assert!(rotational_first_line(""));
        assert!(rotational_first_line("\n"));
        assert!(rotational_first_line("x0"));
        assert!(rotational_first_line("garbage"));
    }
}

/// 加锁策略测试
#[cfg(test)]
mod policy_tests {
    use super::*;

    #[cfg(target_os = "linux")]
    #[test]
    fn test_missing_dir_propagates_resolver_error() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("gone");

        assert!(matches!(should_lock(&missing), Err(Error::DirStat { .. })));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_existing_dir_answers_or_propagates() {
        let dir = tempdir().unwrap();

        // 答案取决于宿主硬件；只验证不会被吞掉的错误类别
        match should_lock(dir.path()) {
            Ok(_) => {}
            Err(Error::DeviceResolution { .. }) | Err(Error::RotationalQuery { .. }) => {}
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    #[cfg(not(target_os = "linux"))]
    #[test]
    fn test_always_false_without_sysfs() {
        assert!(!should_lock("/definitely/missing").unwrap());
    }
}

/// 错误类型测试
#[cfg(test)]
mod error_tests {
    use super::*;
    use std::io;
    use std::path::PathBuf;

    #[test]
    fn test_display_carries_os_error_text() {
        let err = Error::RotationalQuery {
            path: PathBuf::from("/sys/block/sda/queue/rotational"),
            source: io::Error::new(io::ErrorKind::NotFound, "boom"),
        };

        let text = err.to_string();
        assert!(text.contains("/sys/block/sda/queue/rotational"));
        assert!(text.contains("boom"));
    }

    #[test]
    fn test_conversion_to_io_error_keeps_kind() {
        let err = Error::DirStat {
            dir: PathBuf::from("/nowhere"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };

        let io_err: io::Error = err.into();
        assert_eq!(io_err.kind(), io::ErrorKind::PermissionDenied);
    }

    #[test]
    fn test_source_is_the_os_error() {
        use std::error::Error as _;

        let err = Error::DeviceResolution {
            block: PathBuf::from("/sys/dev/block/8:0"),
            source: io::Error::new(io::ErrorKind::NotFound, "absent"),
        };

        assert!(err.source().is_some());
    }
}
