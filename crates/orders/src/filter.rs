//! Order list filtering and dashboard statistics.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Order, OrderStatus};

/// Criteria applied to order lists (customer detail page).
///
/// All fields are optional; an empty filter matches every order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderFilter {
    pub status: Option<OrderStatus>,
    pub placed_after: Option<DateTime<Utc>>,
    pub placed_before: Option<DateTime<Utc>>,
    /// Case-insensitive substring match against the order note.
    pub note_contains: Option<String>,
}

impl OrderFilter {
    pub fn is_empty(&self) -> bool {
        self.status.is_none()
            && self.placed_after.is_none()
            && self.placed_before.is_none()
            && self.note_contains.is_none()
    }

    pub fn matches(&self, order: &Order) -> bool {
        if let Some(status) = self.status {
            if order.status() != status {
                return false;
            }
        }
        if let Some(after) = self.placed_after {
            if order.placed_at() < after {
                return false;
            }
        }
        if let Some(before) = self.placed_before {
            if order.placed_at() > before {
                return false;
            }
        }
        if let Some(needle) = &self.note_contains {
            let needle = needle.to_lowercase();
            match order.note() {
                Some(note) if note.to_lowercase().contains(&needle) => {}
                _ => return false,
            }
        }
        true
    }

    pub fn apply(&self, orders: impl IntoIterator<Item = Order>) -> Vec<Order> {
        orders.into_iter().filter(|o| self.matches(o)).collect()
    }
}

/// Aggregate order counts for the dashboard and the user page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderStats {
    pub total: usize,
    pub pending: usize,
    pub delivered: usize,
}

impl OrderStats {
    pub fn from_orders<'a>(orders: impl IntoIterator<Item = &'a Order>) -> Self {
        let mut stats = Self::default();
        for order in orders {
            stats.total += 1;
            match order.status() {
                OrderStatus::Pending => stats.pending += 1,
                OrderStatus::Delivered => stats.delivered += 1,
                OrderStatus::OutForDelivery => {}
            }
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use crm_core::OrderId;

    fn order(status: OrderStatus, note: Option<&str>, placed_at: DateTime<Utc>) -> Order {
        Order::place(
            OrderId::new(),
            None,
            None,
            status,
            note.map(|n| n.to_string()),
            placed_at,
        )
        .unwrap()
    }

    #[test]
    fn empty_filter_matches_everything() {
        let filter = OrderFilter::default();
        assert!(filter.is_empty());
        assert!(filter.matches(&order(OrderStatus::Pending, None, Utc::now())));
    }

    #[test]
    fn status_filter_selects_matching_orders() {
        let now = Utc::now();
        let orders = vec![
            order(OrderStatus::Pending, None, now),
            order(OrderStatus::Delivered, None, now),
            order(OrderStatus::Pending, None, now),
        ];

        let filter = OrderFilter {
            status: Some(OrderStatus::Pending),
            ..Default::default()
        };
        assert_eq!(filter.apply(orders).len(), 2);
    }

    #[test]
    fn date_window_is_inclusive() {
        let now = Utc::now();
        let filter = OrderFilter {
            placed_after: Some(now - Duration::days(1)),
            placed_before: Some(now + Duration::days(1)),
            ..Default::default()
        };

        assert!(filter.matches(&order(OrderStatus::Pending, None, now)));
        assert!(filter.matches(&order(OrderStatus::Pending, None, now - Duration::days(1))));
        assert!(!filter.matches(&order(OrderStatus::Pending, None, now - Duration::days(2))));
        assert!(!filter.matches(&order(OrderStatus::Pending, None, now + Duration::days(2))));
    }

    #[test]
    fn note_filter_is_case_insensitive_and_skips_noteless_orders() {
        let now = Utc::now();
        let filter = OrderFilter {
            note_contains: Some("URGENT".to_string()),
            ..Default::default()
        };

        assert!(filter.matches(&order(OrderStatus::Pending, Some("please deliver urgently"), now)));
        assert!(!filter.matches(&order(OrderStatus::Pending, Some("no rush"), now)));
        assert!(!filter.matches(&order(OrderStatus::Pending, None, now)));
    }

    #[test]
    fn stats_count_pending_and_delivered() {
        let now = Utc::now();
        let orders = vec![
            order(OrderStatus::Pending, None, now),
            order(OrderStatus::Pending, None, now),
            order(OrderStatus::OutForDelivery, None, now),
            order(OrderStatus::Delivered, None, now),
        ];

        let stats = OrderStats::from_orders(&orders);
        assert_eq!(stats.total, 4);
        assert_eq!(stats.pending, 2);
        assert_eq!(stats.delivered, 1);
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn arb_status() -> impl Strategy<Value = OrderStatus> {
            prop_oneof![
                Just(OrderStatus::Pending),
                Just(OrderStatus::OutForDelivery),
                Just(OrderStatus::Delivered),
            ]
        }

        proptest! {
            /// Property: stats counts partition the order list.
            #[test]
            fn stats_counts_never_exceed_total(statuses in proptest::collection::vec(arb_status(), 0..50)) {
                let now = Utc::now();
                let orders: Vec<Order> = statuses
                    .into_iter()
                    .map(|s| order(s, None, now))
                    .collect();

                let stats = OrderStats::from_orders(&orders);
                prop_assert_eq!(stats.total, orders.len());
                prop_assert!(stats.pending + stats.delivered <= stats.total);
            }

            /// Property: a status filter keeps exactly the orders with that status.
            #[test]
            fn status_filter_keeps_only_matching(statuses in proptest::collection::vec(arb_status(), 0..50)) {
                let now = Utc::now();
                let orders: Vec<Order> = statuses
                    .iter()
                    .map(|s| order(*s, None, now))
                    .collect();
                let expected = statuses.iter().filter(|s| **s == OrderStatus::Pending).count();

                let filter = OrderFilter {
                    status: Some(OrderStatus::Pending),
                    ..Default::default()
                };
                let kept = filter.apply(orders);
                prop_assert_eq!(kept.len(), expected);
                prop_assert!(kept.iter().all(|o| o.status() == OrderStatus::Pending));
            }
        }
    }
}
