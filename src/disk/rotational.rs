//! Rotational classification of block devices
//!
//! 块设备的旋转性分类
//!
//! For HDDs sequential writing is preferred; parallel writing is slow and
//! causes fragmentation. For SSDs parallel writing is as fast or faster.
//! The kernel exposes the distinction per device as
//! `/sys/block/<name>/queue/rotational`.
//!
//! 机械硬盘适合顺序写入，并行写入既慢又会造成碎片。
//! 固态硬盘的并行写入同样快甚至更快。内核以
//! `/sys/block/<name>/queue/rotational` 按设备暴露这一区别。

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;

use super::error::{Error, Result};

/// Query whether a block device reports itself as rotational
///
/// 查询块设备是否自报为旋转设备
///
/// Opens `/sys/block/<device>/queue/rotational` and inspects the first
/// line. A leading `'0'` means non-rotational (solid-state); everything
/// else, including an empty or unreadable line, counts as rotational. The
/// ambiguous cases deliberately land on the slow-device side so a caller
/// never assumes parallel writing by accident.
///
/// 打开 `/sys/block/<device>/queue/rotational` 并检查第一行。
/// 行首为 `'0'` 表示非旋转（固态）；其余情况，包括空行或读不出的行，
/// 都算旋转设备。含糊情况刻意落在慢设备一侧，调用者绝不会误判为
/// 可并行写入。
///
/// # Parameters
/// - `device`: Bare device name as listed under `/sys/block`, e.g. `sda`
///
/// # 参数
/// - `device`: `/sys/block` 下列出的设备名，例如 `sda`
///
/// # Examples
///
/// ```no_run
/// use disk_guard::is_rotational;
///
/// # fn main() -> disk_guard::Result<()> {
/// if is_rotational("sda")? {
///     println!("spinning disk, write sequentially");
/// }
/// # Ok(())
/// # }
/// ```
///
/// # Errors
/// [`Error::RotationalQuery`] if the attribute file cannot be opened. This
/// is not defaulted away: an unopenable attribute is a hard failure the
/// caller must observe.
///
/// # Errors
/// 属性文件无法打开时返回 [`Error::RotationalQuery`]。
/// 这不会被默认值吞掉：打不开属性文件是调用者必须看到的硬错误。
pub fn is_rotational(device: &str) -> Result<bool> {
    let path = PathBuf::from(format!("/sys/block/{device}/queue/rotational"));

    let file = File::open(&path).map_err(|source| Error::RotationalQuery {
        path: path.clone(),
        source,
    })?;

    let mut line = String::new();
    if BufReader::new(file).read_line(&mut line).is_err() {
        // A readable open but unreadable content is an ambiguous signal
        // 打得开却读不出内容，属于含糊信号
        return Ok(true);
    }

    Ok(rotational_first_line(&line))
}

/// Interpret the first line of a `queue/rotational` attribute file
///
/// 解读 `queue/rotational` 属性文件的第一行
#[inline]
pub(crate) fn rotational_first_line(line: &str) -> bool {
    !line.starts_with('0')
}
