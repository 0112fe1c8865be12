use chrono::{DateTime, TimeZone, Utc};
use std::fmt::Display;
use std::sync::{PoisonError, RwLock};

/// 页面展示用的检索时间格式 (日 月 年 时:分:秒，24 小时制)。
pub const RETRIEVAL_TIME_FORMAT: &str = "%d %b %Y %H:%M:%S";

/// # Summary
/// 时间供给器接口，用于隔离物理系统时钟。
/// 查询结果的检索时间戳必须通过此接口获取，以便测试固定时间。
pub trait TimeProvider: Send + Sync {
    /// 获取当前时间
    fn now(&self) -> DateTime<Utc>;
}

/// # Summary
/// 真实时钟，直接返回操作系统当前时间。
pub struct RealTimeProvider;

impl TimeProvider for RealTimeProvider {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// # Summary
/// 测试专用虚拟时钟，时间由调用方显式拨动。
///
/// # Invariants
/// - 并发安全：内部利用 `RwLock` 提供给多线程安全修改和读取时间的权限。
pub struct FakeClockProvider {
    current_time: RwLock<DateTime<Utc>>,
}

impl FakeClockProvider {
    /// 使用指定的初始时间创建虚拟时钟
    pub fn new(initial_time: DateTime<Utc>) -> Self {
        Self {
            current_time: RwLock::new(initial_time),
        }
    }

    /// 强制修改时钟的当前时间
    pub fn set_time(&self, new_time: DateTime<Utc>) {
        let mut time = self
            .current_time
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *time = new_time;
    }
}

impl TimeProvider for FakeClockProvider {
    fn now(&self) -> DateTime<Utc> {
        *self
            .current_time
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

/// # Summary
/// 按 [`RETRIEVAL_TIME_FORMAT`] 格式化检索时间。
///
/// # Arguments
/// * `at`: 任意时区的时间点，调用方决定展示时区。
///
/// # Returns
/// 形如 `07 Mar 2025 14:05:09` 的字符串。
pub fn format_retrieval_time<Tz>(at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    at.format(RETRIEVAL_TIME_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fake_clock_set_time() {
        let t0 = Utc.with_ymd_and_hms(2025, 3, 7, 14, 5, 9).unwrap();
        let clock = FakeClockProvider::new(t0);
        assert_eq!(clock.now(), t0);

        let t1 = Utc.with_ymd_and_hms(2025, 3, 8, 0, 0, 0).unwrap();
        clock.set_time(t1);
        assert_eq!(clock.now(), t1);
    }

    #[test]
    fn test_format_is_24_hour_day_month_year() {
        let at = Utc.with_ymd_and_hms(2025, 3, 7, 21, 5, 9).unwrap();
        assert_eq!(format_retrieval_time(&at), "07 Mar 2025 21:05:09");
    }
}
