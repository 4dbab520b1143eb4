// ==========================================
// 工厂管理后台 - 交付率与出库对账
// ==========================================
// 交付率: delivered / ordered × 100 (一位小数)
// 出库状态以录入值为准; 推导状态与对账结果仅供提示
// ==========================================

use crate::domain::{DeliveryStatus, OutwardDelivery};
use crate::engine::number_format::percent;
use serde::Serialize;
use std::fmt;

/// 交付率,订购数为 0 时为 "0"
pub fn delivery_rate(delivered: u32, ordered: u32) -> String {
    percent(delivered as f64, ordered as f64)
}

/// 由数量推导出库状态
///
/// - 订购为 0 或已交付 >= 订购: Complete
/// - 有损耗: Partial
/// - 其余: Shortage
pub fn derive_delivery_status(ordered: u32, delivered: u32, spoilt: u32) -> DeliveryStatus {
    if ordered == 0 || delivered >= ordered {
        DeliveryStatus::Complete
    } else if spoilt > 0 {
        DeliveryStatus::Partial
    } else {
        DeliveryStatus::Shortage
    }
}

// ==========================================
// ReconciliationIssue - 对账提示
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReconciliationIssue {
    /// 交付 + 短缺 + 损耗 与订购数不一致
    QuantityMismatch { ordered: u32, accounted: u32 },
    /// 录入状态与数量推导状态不一致
    StatusMismatch {
        asserted: DeliveryStatus,
        derived: DeliveryStatus,
    },
}

impl fmt::Display for ReconciliationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReconciliationIssue::QuantityMismatch { ordered, accounted } => {
                write!(f, "quantities account for {} of {} ordered", accounted, ordered)
            }
            ReconciliationIssue::StatusMismatch { asserted, derived } => {
                write!(f, "status {} differs from derived {}", asserted, derived)
            }
        }
    }
}

/// 对账 (不拒绝,只报告)
pub fn reconcile(delivery: &OutwardDelivery) -> Vec<ReconciliationIssue> {
    let mut issues = Vec::new();

    let accounted = delivery
        .delivered_qty
        .saturating_add(delivery.shortage_qty)
        .saturating_add(delivery.spoilt_qty);
    if accounted != delivery.ordered_qty {
        issues.push(ReconciliationIssue::QuantityMismatch {
            ordered: delivery.ordered_qty,
            accounted,
        });
    }

    let derived = derive_delivery_status(delivery.ordered_qty, delivery.delivered_qty, delivery.spoilt_qty);
    if derived != delivery.status {
        issues.push(ReconciliationIssue::StatusMismatch {
            asserted: delivery.status,
            derived,
        });
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::SeedData;

    #[test]
    fn test_delivery_rate() {
        assert_eq!(delivery_rate(95, 100), "95.0");
        assert_eq!(delivery_rate(70, 75), "93.3");
        assert_eq!(delivery_rate(10, 0), "0");
        assert_eq!(delivery_rate(0, 0), "0");
    }

    #[test]
    fn test_derive_status() {
        assert_eq!(derive_delivery_status(100, 95, 2), DeliveryStatus::Partial);
        assert_eq!(derive_delivery_status(50, 50, 0), DeliveryStatus::Complete);
        assert_eq!(derive_delivery_status(75, 70, 0), DeliveryStatus::Shortage);
        assert_eq!(derive_delivery_status(0, 0, 0), DeliveryStatus::Complete);
    }

    #[test]
    fn test_sample_deliveries_reconcile_cleanly() {
        let seed = SeedData::sample();
        for delivery in &seed.outward_deliveries {
            assert!(reconcile(delivery).is_empty(), "{} should reconcile", delivery.id);
        }
    }

    #[test]
    fn test_reconcile_reports_both_mismatches() {
        let mut delivery = SeedData::sample().outward_deliveries[0].clone();
        delivery.shortage_qty = 10;
        delivery.status = DeliveryStatus::Complete;

        let issues = reconcile(&delivery);
        assert_eq!(issues.len(), 2);
        assert_eq!(
            issues[0],
            ReconciliationIssue::QuantityMismatch {
                ordered: 100,
                accounted: 107
            }
        );
        assert_eq!(
            issues[1],
            ReconciliationIssue::StatusMismatch {
                asserted: DeliveryStatus::Complete,
                derived: DeliveryStatus::Partial
            }
        );
    }
}
