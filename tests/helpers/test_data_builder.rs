// ==========================================
// 测试数据构建器 - 用于集成测试
// ==========================================

#![allow(dead_code)]

use chrono::NaiveDate;
use factory_admin::domain::types::{DeliveryStatus, ProductionStage, WorkStatus};
use factory_admin::domain::{OutwardDelivery, WorkHistoryEntry};

// ==========================================
// WorkHistoryEntry 构建器
// ==========================================

pub struct WorkHistoryBuilder {
    id: String,
    worker_id: String,
    worker_name: String,
    article_variant_id: String,
    stage: ProductionStage,
    start_date: NaiveDate,
    hours_worked: f64,
    quantity: u32,
    quality_score: f64,
    payable_amount: f64,
    is_rework: bool,
}

impl WorkHistoryBuilder {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            worker_id: "W001".to_string(),
            worker_name: "John Smith".to_string(),
            article_variant_id: "AV001".to_string(),
            stage: ProductionStage::Cutting,
            start_date: NaiveDate::from_ymd_opt(2024, 1, 20).unwrap(),
            hours_worked: 8.0,
            quantity: 10,
            quality_score: 90.0,
            payable_amount: 120.0,
            is_rework: false,
        }
    }

    pub fn worker(mut self, id: &str, name: &str) -> Self {
        self.worker_id = id.to_string();
        self.worker_name = name.to_string();
        self
    }

    pub fn variant(mut self, id: &str) -> Self {
        self.article_variant_id = id.to_string();
        self
    }

    pub fn stage(mut self, stage: ProductionStage) -> Self {
        self.stage = stage;
        self
    }

    pub fn start(mut self, date: NaiveDate) -> Self {
        self.start_date = date;
        self
    }

    pub fn hours(mut self, hours: f64) -> Self {
        self.hours_worked = hours;
        self
    }

    pub fn quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn quality(mut self, score: f64) -> Self {
        self.quality_score = score;
        self
    }

    pub fn payable(mut self, amount: f64) -> Self {
        self.payable_amount = amount;
        self
    }

    /// 返工记录不计薪
    pub fn rework(mut self) -> Self {
        self.is_rework = true;
        self.payable_amount = 0.0;
        self
    }

    pub fn build(self) -> WorkHistoryEntry {
        WorkHistoryEntry {
            task_id: format!("TASK-{}", self.id),
            article_name: self.article_variant_id.clone(),
            end_date: self.start_date,
            status: if self.is_rework { WorkStatus::Rework } else { WorkStatus::Completed },
            id: self.id,
            worker_id: self.worker_id,
            worker_name: self.worker_name,
            article_variant_id: self.article_variant_id,
            stage: self.stage,
            start_date: self.start_date,
            hours_worked: self.hours_worked,
            quantity: self.quantity,
            is_rework: self.is_rework,
            quality_score: self.quality_score,
            payable_amount: self.payable_amount,
        }
    }
}

// ==========================================
// OutwardDelivery 构建器
// ==========================================

pub struct DeliveryBuilder {
    id: String,
    provider: String,
    article_variant_id: String,
    quantities: (u32, u32, u32, u32),
    status: DeliveryStatus,
}

impl DeliveryBuilder {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            provider: "Global Shoe Distributors".to_string(),
            article_variant_id: "AV001".to_string(),
            quantities: (100, 100, 0, 0),
            status: DeliveryStatus::Complete,
        }
    }

    /// (ordered, delivered, shortage, spoilt)
    pub fn quantities(mut self, ordered: u32, delivered: u32, shortage: u32, spoilt: u32) -> Self {
        self.quantities = (ordered, delivered, shortage, spoilt);
        self
    }

    pub fn status(mut self, status: DeliveryStatus) -> Self {
        self.status = status;
        self
    }

    pub fn build(self) -> OutwardDelivery {
        let (ordered_qty, delivered_qty, shortage_qty, spoilt_qty) = self.quantities;
        OutwardDelivery {
            id: self.id,
            date: NaiveDate::from_ymd_opt(2024, 1, 20).unwrap(),
            provider: self.provider,
            article_name: self.article_variant_id.clone(),
            article_variant_id: self.article_variant_id,
            ordered_qty,
            delivered_qty,
            shortage_qty,
            spoilt_qty,
            status: self.status,
            notes: String::new(),
        }
    }
}
