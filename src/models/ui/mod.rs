// UI models module
// View kinds and navigation steps

use serde::{Deserialize, Serialize};

/// Built-in views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViewType {
    Day,
    #[default]
    Week,
    MonthGrid,
    MonthAgenda,
}

impl ViewType {
    pub const ALL: [ViewType; 4] = [
        ViewType::Day,
        ViewType::Week,
        ViewType::MonthGrid,
        ViewType::MonthAgenda,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ViewType::Day => "day",
            ViewType::Week => "week",
            ViewType::MonthGrid => "month-grid",
            ViewType::MonthAgenda => "month-agenda",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|view| view.name() == name)
    }

    pub fn layout_kind(self) -> LayoutKind {
        match self {
            ViewType::Day | ViewType::Week => LayoutKind::TimeGrid,
            ViewType::MonthGrid => LayoutKind::MonthGrid,
            ViewType::MonthAgenda => LayoutKind::MonthAgenda,
        }
    }

    /// Step applied by the backward/forward buttons
    pub fn navigation(self) -> Navigation {
        match self {
            ViewType::Day => Navigation::days(1),
            ViewType::Week => Navigation::days(7),
            ViewType::MonthGrid | ViewType::MonthAgenda => Navigation::months(1),
        }
    }
}

/// Which positioning algorithm a view feeds its events through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutKind {
    /// Date grid bars above a time grid, one column per day
    TimeGrid,
    MonthGrid,
    MonthAgenda,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NavigationUnit {
    Days,
    Months,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Navigation {
    pub unit: NavigationUnit,
    pub amount: i32,
}

impl Navigation {
    pub fn days(amount: i32) -> Self {
        Self {
            unit: NavigationUnit::Days,
            amount,
        }
    }

    pub fn months(amount: i32) -> Self {
        Self {
            unit: NavigationUnit::Months,
            amount,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forwards,
    Backwards,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_names_round_trip() {
        for view in ViewType::ALL {
            assert_eq!(ViewType::from_name(view.name()), Some(view));
        }
        assert_eq!(ViewType::from_name("year"), None);
    }

    #[test]
    fn test_layout_kind_per_view() {
        assert_eq!(ViewType::Day.layout_kind(), LayoutKind::TimeGrid);
        assert_eq!(ViewType::Week.layout_kind(), LayoutKind::TimeGrid);
        assert_eq!(ViewType::MonthGrid.layout_kind(), LayoutKind::MonthGrid);
        assert_eq!(ViewType::MonthAgenda.layout_kind(), LayoutKind::MonthAgenda);
    }

    #[test]
    fn test_navigation_steps() {
        assert_eq!(ViewType::Week.navigation(), Navigation::days(7));
        assert_eq!(ViewType::MonthGrid.navigation(), Navigation::months(1));
    }
}
