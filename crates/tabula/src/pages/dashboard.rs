//! Dashboard summary cards.

pub const DASHBOARD_TITLE: &str = "대시보드";
pub const DASHBOARD_DESCRIPTION: &str = "사용자 통계 및 활동";

/// One summary card.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StatCard {
    pub title: &'static str,
    pub value: &'static str,
    /// Trend or unit line under the value.
    pub caption: &'static str,
}

const STAT_CARDS: [StatCard; 4] = [
    StatCard {
        title: "전체 사용자",
        value: "1,234",
        caption: "+12% 이번 달",
    },
    StatCard {
        title: "활성 사용자",
        value: "1,080",
        caption: "+8% 이번 달",
    },
    StatCard {
        title: "새로운 가입",
        value: "89",
        caption: "+23% 이번 달",
    },
    StatCard {
        title: "평균 로그인",
        value: "5.2h",
        caption: "일일 평균",
    },
];

/// The cards shown on the dashboard, in display order.
pub fn stat_cards() -> &'static [StatCard] {
    &STAT_CARDS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cards() {
        let cards = stat_cards();
        assert_eq!(cards.len(), 4);
        assert_eq!(cards[0].title, "전체 사용자");
        assert_eq!(cards[3].value, "5.2h");
    }
}
