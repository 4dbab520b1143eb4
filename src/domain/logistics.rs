// ==========================================
// 工厂管理后台 - 出入库领域模型
// ==========================================
// 入库: 采购单到料登记
// 出库: 向客户公司的交付记录
// ==========================================

use crate::domain::entity::Entity;
use crate::domain::types::{DeliveryStatus, InwardStatus, PurchaseOrderStatus};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// PurchaseOrder - 采购单
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseOrder {
    pub id: String, // PO001
    pub supplier: String,
    pub date: NaiveDate,
    pub status: PurchaseOrderStatus,
}

// ==========================================
// ProviderCompany - 客户公司
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderCompany {
    pub id: String, // PC001
    pub name: String,
    pub contact: String,
    pub email: String,
}

// ==========================================
// InwardEntry - 入库记录
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InwardEntry {
    pub id: String,
    pub date: NaiveDate,
    pub po_number: String, // 关联 PurchaseOrder.id
    pub supplier: String,
    pub article_variant_id: String,
    pub article_name: String,
    pub materials: Vec<MaterialLine>,
    pub status: InwardStatus,
}

/// 入库物料行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialLine {
    pub name: String,
    pub quantity: f64,
    pub unit: String, // "sq ft" / "pairs" / ...
}

impl Entity for InwardEntry {
    const ENTITY: &'static str = "inward_entry";

    fn id(&self) -> &str {
        &self.id
    }
}

// ==========================================
// OutwardDelivery - 出库交付
// ==========================================
// status 为录入值; 数量之间不强制平衡 (见 engine::delivery::reconcile)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutwardDelivery {
    pub id: String,
    pub date: NaiveDate,
    pub provider: String,
    pub article_variant_id: String,
    pub article_name: String,
    pub ordered_qty: u32,
    pub delivered_qty: u32,
    pub shortage_qty: u32,
    pub spoilt_qty: u32,
    pub status: DeliveryStatus,
    pub notes: String,
}

impl Entity for OutwardDelivery {
    const ENTITY: &'static str = "outward_delivery";

    fn id(&self) -> &str {
        &self.id
    }
}
