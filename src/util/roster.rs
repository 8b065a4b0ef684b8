use crate::models::theme::ThemeSettings;
use chrono::{Local, NaiveDate};

/// Daily three-state readiness indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RosterStatus {
    Green,
    Yellow,
    Blue,
}

impl RosterStatus {
    pub fn color(&self) -> &'static str {
        match self {
            Self::Green  => "#10b981",
            Self::Yellow => "#f59e0b",
            Self::Blue   => "#3b82f6",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Green  => "GREEN",
            Self::Yellow => "YELLOW",
            Self::Blue   => "BLUE",
        }
    }
}

fn epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 1, 1).unwrap_or_default()
}

/// Roster for a calendar date. Cycles green → yellow → blue from 2026-01-01.
pub fn roster_for(date: NaiveDate) -> RosterStatus {
    let days = date.signed_duration_since(epoch()).num_days();
    match days.rem_euclid(3) {
        0 => RosterStatus::Green,
        1 => RosterStatus::Yellow,
        _ => RosterStatus::Blue,
    }
}

/// Roster for today's local date.
pub fn current_roster() -> RosterStatus {
    roster_for(Local::now().date_naive())
}

/// Accent actually shown: the theme's own colour when fixed, else the roster's.
pub fn effective_accent(theme: &ThemeSettings, roster: RosterStatus) -> String {
    if theme.is_fixed {
        theme.accent.clone()
    } else {
        roster.color().to_string()
    }
}

/// Copy of `theme` with its stored accent replaced by the effective accent.
pub fn annotate(theme: &ThemeSettings, roster: RosterStatus) -> ThemeSettings {
    ThemeSettings { accent: effective_accent(theme, roster), ..theme.clone() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::theme::find_preset;
    use chrono::{Duration, NaiveDateTime, TimeZone};

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn epoch_cycle() {
        assert_eq!(roster_for(d(2026, 1, 1)), RosterStatus::Green);
        assert_eq!(roster_for(d(2026, 1, 2)), RosterStatus::Yellow);
        assert_eq!(roster_for(d(2026, 1, 3)), RosterStatus::Blue);
        assert_eq!(roster_for(d(2026, 1, 4)), RosterStatus::Green);
    }

    #[test]
    fn dates_before_epoch_resolve() {
        assert_eq!(roster_for(d(2025, 12, 31)), RosterStatus::Blue);
        assert_eq!(roster_for(d(2025, 12, 30)), RosterStatus::Yellow);
        assert_eq!(roster_for(d(2025, 12, 29)), RosterStatus::Green);
    }

    #[test]
    fn three_day_period_over_a_long_range() {
        let mut date = d(2020, 1, 1);
        for _ in 0..3000 {
            assert_eq!(roster_for(date), roster_for(date + Duration::days(3)));
            date += Duration::days(1);
        }
    }

    #[test]
    fn time_of_day_does_not_matter() {
        let morning = NaiveDateTime::parse_from_str("2026-03-10 00:00:01", "%Y-%m-%d %H:%M:%S").unwrap();
        let night   = NaiveDateTime::parse_from_str("2026-03-10 23:59:59", "%Y-%m-%d %H:%M:%S").unwrap();
        let m = Local.from_local_datetime(&morning).earliest().unwrap();
        let n = Local.from_local_datetime(&night).earliest().unwrap();
        assert_eq!(roster_for(m.date_naive()), roster_for(n.date_naive()));
    }

    #[test]
    fn fixed_theme_keeps_its_accent() {
        let crimson = find_preset("crimson-protocol").unwrap();
        assert_eq!(effective_accent(&crimson, RosterStatus::Yellow), "#ef4444");
    }

    #[test]
    fn roster_theme_follows_roster() {
        let readiness = ThemeSettings::default();
        assert_eq!(effective_accent(&readiness, RosterStatus::Yellow), "#f59e0b");
        assert_eq!(annotate(&readiness, RosterStatus::Green).accent, "#10b981");
    }
}
