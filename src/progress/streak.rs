//! 连续出勤统计

use std::collections::BTreeSet;

use crate::models::progress::responses::AttendanceStreak;

/// 根据班级的周序号列表和学员已出勤的周计算连续出勤
///
/// - 当前连续：从最后一次有考勤的周开始向前数，遇到缺勤即停止；
/// - 最长连续：按周顺序扫描，出勤 +1，缺勤清零，记录最大值；
/// - 全勤：出勤周数等于总周数且总周数大于 0。
pub fn calculate_streak(weeks: &[i32], attended: &BTreeSet<i32>) -> AttendanceStreak {
    let weeks: Vec<i32> = weeks
        .iter()
        .copied()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let present: Vec<bool> = weeks.iter().map(|w| attended.contains(w)).collect();

    let current_streak = match present.iter().rposition(|&p| p) {
        Some(last) => present[..=last].iter().rev().take_while(|&&p| p).count() as u32,
        None => 0,
    };

    let mut longest_streak = 0u32;
    let mut running = 0u32;
    for &p in &present {
        if p {
            running += 1;
            longest_streak = longest_streak.max(running);
        } else {
            running = 0;
        }
    }

    let attended_weeks = present.iter().filter(|&&p| p).count() as u32;
    let total_weeks = weeks.len() as u32;

    AttendanceStreak {
        current_streak,
        longest_streak,
        perfect_attendance: total_weeks > 0 && attended_weeks == total_weeks,
        attended_weeks,
        total_weeks,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(weeks: &[i32]) -> BTreeSet<i32> {
        weeks.iter().copied().collect()
    }

    #[test]
    fn test_gap_in_the_middle() {
        let streak = calculate_streak(&[1, 2, 3, 4, 5], &set(&[1, 2, 4, 5]));
        assert_eq!(streak.longest_streak, 2);
        assert_eq!(streak.current_streak, 2);
        assert!(!streak.perfect_attendance);
    }

    #[test]
    fn test_no_attendance() {
        let streak = calculate_streak(&[1, 2, 3], &set(&[]));
        assert_eq!(streak.current_streak, 0);
        assert_eq!(streak.longest_streak, 0);
        assert!(!streak.perfect_attendance);
    }

    #[test]
    fn test_current_streak_counts_from_last_attended_week() {
        // 第 5 周尚未出勤，当前连续从第 4 周往前数
        let streak = calculate_streak(&[1, 2, 3, 4, 5], &set(&[2, 3, 4]));
        assert_eq!(streak.current_streak, 3);
        assert_eq!(streak.longest_streak, 3);
    }

    #[test]
    fn test_perfect_attendance() {
        let streak = calculate_streak(&[3, 1, 2], &set(&[1, 2, 3]));
        assert!(streak.perfect_attendance);
        assert_eq!(streak.current_streak, 3);
        assert_eq!(streak.longest_streak, 3);
    }

    #[test]
    fn test_empty_class_is_not_perfect() {
        let streak = calculate_streak(&[], &set(&[]));
        assert_eq!(streak, AttendanceStreak::default());
    }

    #[test]
    fn test_longest_earlier_than_current() {
        let streak = calculate_streak(&[1, 2, 3, 4, 5, 6], &set(&[1, 2, 3, 5, 6]));
        assert_eq!(streak.longest_streak, 3);
        assert_eq!(streak.current_streak, 2);
        assert_eq!(streak.attended_weeks, 5);
    }
}
