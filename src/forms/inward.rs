// ==========================================
// 工厂管理后台 - 入库表单
// ==========================================
// 采购单 + 款式变体 + 各物料 (数量, 单位)
// 数量为空的物料行不计入
// ==========================================

use super::{parse_amount, FormContext, FormPhase, FormResult};
use crate::domain::{InwardEntry, InwardStatus, MaterialLine};
use chrono::NaiveDate;

/// 单个物料的输入 (原始文本)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MaterialInput {
    pub quantity: String,
    pub unit: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct InwardForm {
    phase: FormPhase,
    pub date: Option<NaiveDate>,
    pub po_number: String,
    pub article_variant_id: String,
    materials: Vec<(String, MaterialInput)>,
}

impl InwardForm {
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

    pub fn set_po(&mut self, po_number: &str) {
        self.phase = FormPhase::Editing;
        self.po_number = po_number.to_string();
    }

    pub fn set_variant(&mut self, variant_id: &str) {
        self.phase = FormPhase::Editing;
        self.article_variant_id = variant_id.to_string();
    }

    /// 录入某物料的数量与单位 (重复录入覆盖)
    pub fn set_material(&mut self, material: &str, quantity: &str, unit: &str) {
        self.phase = FormPhase::Editing;
        let input = MaterialInput {
            quantity: quantity.to_string(),
            unit: unit.to_string(),
        };
        match self.materials.iter_mut().find(|(name, _)| name == material) {
            Some((_, existing)) => *existing = input,
            None => self.materials.push((material.to_string(), input)),
        }
    }

    pub fn material(&self, material: &str) -> Option<&MaterialInput> {
        self.materials.iter().find(|(name, _)| name == material).map(|(_, m)| m)
    }

    /// 组装入库记录 (新入库为 Pending)
    pub fn submit(&mut self, ctx: &FormContext<'_>, id: &str) -> FormResult<InwardEntry> {
        let mut lines = Vec::new();
        for (name, input) in &self.materials {
            if input.quantity.trim().is_empty() {
                continue;
            }
            lines.push(MaterialLine {
                name: name.clone(),
                quantity: parse_amount(name, &input.quantity)?,
                unit: input.unit.clone(),
            });
        }

        let supplier = ctx
            .catalog
            .purchase_order(&self.po_number)
            .map(|po| po.supplier.clone())
            .unwrap_or_default();

        let entry = InwardEntry {
            id: id.to_string(),
            date: self.date.unwrap_or(ctx.today),
            po_number: self.po_number.clone(),
            supplier,
            article_variant_id: self.article_variant_id.clone(),
            article_name: ctx.variant_name(&self.article_variant_id),
            materials: lines,
            status: InwardStatus::Pending,
        };

        *self = Self {
            phase: FormPhase::Submitted,
            ..Self::default()
        };
        Ok(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::FormError;
    use crate::seed::SeedData;

    #[test]
    fn test_submit_resolves_supplier_and_skips_empty_lines() {
        let seed = SeedData::sample();
        let today = NaiveDate::from_ymd_opt(2024, 1, 20).unwrap();
        let ctx = FormContext::new(&seed, &seed.article_variants, today);

        let mut form = InwardForm::new();
        form.set_po("PO003");
        form.set_variant("AV004");
        form.set_material("Zipper", "40", "pieces");
        form.set_material("Insole", "", "pairs");
        form.set_material("Zipper", "45", "pieces");

        let entry = form.submit(&ctx, "IN003").unwrap();
        assert_eq!(entry.supplier, "Hardware Supplies Inc");
        assert_eq!(entry.date, today);
        assert_eq!(entry.materials.len(), 1);
        assert_eq!(entry.materials[0].quantity, 45.0);
        assert_eq!(entry.status, InwardStatus::Pending);
        assert!(entry.article_name.starts_with("Casual Boot"));
        assert_eq!(form.phase(), FormPhase::Submitted);
        assert!(form.material("Zipper").is_none());
    }

    #[test]
    fn test_invalid_quantity_keeps_form() {
        let seed = SeedData::sample();
        let ctx = FormContext::new(&seed, &seed.article_variants, NaiveDate::from_ymd_opt(2024, 1, 20).unwrap());

        let mut form = InwardForm::new();
        form.set_material("Upper Leather", "lots", "sq ft");
        let err = form.submit(&ctx, "IN003").unwrap_err();
        assert!(matches!(err, FormError::InvalidNumber { .. }));
        assert!(form.material("Upper Leather").is_some());
    }
}
