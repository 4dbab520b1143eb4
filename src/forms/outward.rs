// ==========================================
// 工厂管理后台 - 出库表单
// ==========================================
// 表单不录入状态,提交时由数量推导
// ==========================================

use super::{parse_quantity, FormContext, FormPhase, FormResult};
use crate::domain::OutwardDelivery;
use crate::engine::delivery::derive_delivery_status;
use chrono::NaiveDate;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OutwardForm {
    phase: FormPhase,
    pub date: Option<NaiveDate>,
    pub provider: String,
    pub article_variant_id: String,
    pub ordered_qty: String,
    pub delivered_qty: String,
    pub shortage_qty: String,
    pub spoilt_qty: String,
    pub notes: String,
}

impl OutwardForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn set_date(&mut self, date: NaiveDate) {
        self.phase = FormPhase::Editing;
        self.date = Some(date);
    }

    pub fn set_provider(&mut self, provider: &str) {
        self.phase = FormPhase::Editing;
        self.provider = provider.to_string();
    }

    pub fn set_variant(&mut self, variant_id: &str) {
        self.phase = FormPhase::Editing;
        self.article_variant_id = variant_id.to_string();
    }

    /// 录入数量 (订购/交付/短缺/损耗),原样保存到提交时解析
    pub fn set_quantities(&mut self, ordered: &str, delivered: &str, shortage: &str, spoilt: &str) {
        self.phase = FormPhase::Editing;
        self.ordered_qty = ordered.to_string();
        self.delivered_qty = delivered.to_string();
        self.shortage_qty = shortage.to_string();
        self.spoilt_qty = spoilt.to_string();
    }

    pub fn set_notes(&mut self, notes: &str) {
        self.phase = FormPhase::Editing;
        self.notes = notes.to_string();
    }

    pub fn submit(&mut self, ctx: &FormContext<'_>, id: &str) -> FormResult<OutwardDelivery> {
        let ordered = parse_quantity("ordered_qty", &self.ordered_qty)?;
        let delivered = parse_quantity("delivered_qty", &self.delivered_qty)?;
        let shortage = parse_quantity("shortage_qty", &self.shortage_qty)?;
        let spoilt = parse_quantity("spoilt_qty", &self.spoilt_qty)?;

        let delivery = OutwardDelivery {
            id: id.to_string(),
            date: self.date.unwrap_or(ctx.today),
            provider: self.provider.clone(),
            article_variant_id: self.article_variant_id.clone(),
            article_name: ctx.variant_name(&self.article_variant_id),
            ordered_qty: ordered,
            delivered_qty: delivered,
            shortage_qty: shortage,
            spoilt_qty: spoilt,
            status: derive_delivery_status(ordered, delivered, spoilt),
            notes: self.notes.clone(),
        };

        *self = Self {
            phase: FormPhase::Submitted,
            ..Self::default()
        };
        Ok(delivery)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DeliveryStatus;
    use crate::forms::FormError;
    use crate::seed::SeedData;

    #[test]
    fn test_submit_derives_status() {
        let seed = SeedData::sample();
        let ctx = FormContext::new(&seed, &seed.article_variants, NaiveDate::from_ymd_opt(2024, 1, 20).unwrap());

        let mut form = OutwardForm::new();
        form.set_provider("Sports Gear Ltd");
        form.set_variant("AV005");
        form.set_quantities("40", "38", "2", "");
        form.set_notes("two pairs short");

        let delivery = form.submit(&ctx, "OUT004").unwrap();
        assert_eq!(delivery.status, DeliveryStatus::Shortage);
        assert_eq!(delivery.spoilt_qty, 0);
        assert_eq!(delivery.notes, "two pairs short");
        assert_eq!(form, OutwardForm { phase: FormPhase::Submitted, ..OutwardForm::default() });
    }

    #[test]
    fn test_invalid_quantity() {
        let seed = SeedData::sample();
        let ctx = FormContext::new(&seed, &seed.article_variants, NaiveDate::from_ymd_opt(2024, 1, 20).unwrap());

        let mut form = OutwardForm::new();
        form.set_quantities("100", "9x", "", "");
        assert_eq!(
            form.submit(&ctx, "OUT004"),
            Err(FormError::InvalidNumber {
                field: "delivered_qty".to_string(),
                value: "9x".to_string()
            })
        );
        // 失败时保留输入
        form.set_notes("retry");
        assert_eq!(form.ordered_qty, "100");
        assert_eq!(form.phase(), FormPhase::Editing);
    }
}
