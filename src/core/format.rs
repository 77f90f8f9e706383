// ============================================================================
// UEnergy i18n - 本地化时间格式
// ============================================================================
//
// 文件: src/core/format.rs
// 职责: 按当前语言格式化相对时间与日期
// 边界:
//   - ✅ 相对时间（刚刚 / N 分钟前 / N 小时前）
//   - ✅ 各语言日期写法
//   - ❌ 不应读取系统时钟（由调用方传入当前时间）
//
// ============================================================================

use chrono::{DateTime, Datelike, TimeZone};

use crate::i18n::Resolver;

const MINUTE_MS: i64 = 60_000;
const HOUR_MS: i64 = 3_600_000;
const DAY_MS: i64 = 86_400_000;

/// 语言对应的日期区域标记，未知语言按 zh-CN
pub fn date_locale(language: &str) -> &'static str {
    match language {
        "en" => "en-US",
        "ja" => "ja-JP",
        "ko" => "ko-KR",
        _ => "zh-CN",
    }
}

/// 格式化时间
///
/// `relative` 为真且时间差在 24 小时内时输出相对时间，否则输出日期。
pub fn format_time<Tz: TimeZone>(
    resolver: &Resolver,
    language: &str,
    at: &DateTime<Tz>,
    now: &DateTime<Tz>,
    relative: bool,
) -> String {
    if relative {
        let diff = now
            .clone()
            .signed_duration_since(at.clone())
            .num_milliseconds();
        if diff < MINUTE_MS {
            return resolver.resolve(language, "notification.justNow");
        } else if diff < HOUR_MS {
            let minutes = diff / MINUTE_MS;
            return format!("{} {}", minutes, resolver.resolve(language, "notification.minutesAgo"));
        } else if diff < DAY_MS {
            let hours = diff / HOUR_MS;
            return format!("{} {}", hours, resolver.resolve(language, "notification.hoursAgo"));
        }
    }
    format_date(language, at)
}

/// 按语言习惯输出数字日期
pub fn format_date<Tz: TimeZone>(language: &str, at: &DateTime<Tz>) -> String {
    let (year, month, day) = (at.year(), at.month(), at.day());
    match date_locale(language) {
        "en-US" => format!("{}/{}/{}", month, day, year),
        "ko-KR" => format!("{}. {}. {}.", year, month, day),
        _ => format!("{}/{}/{}", year, month, day),
    }
}
