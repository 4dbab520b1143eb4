// ==========================================
// 工厂管理后台 - 厂内质检表单
// ==========================================
// 通过: 仅在未勾选任何缺陷时可用
// 驳回: 仅在至少勾选一个缺陷时可用
// ==========================================

use super::{toggle, FormError, FormPhase, FormResult};

/// 质检结论
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QcDecision {
    Approve {
        item_id: String,
    },
    Reject {
        item_id: String,
        defects: Vec<String>,
        notes: String,
    },
}

impl QcDecision {
    pub fn item_id(&self) -> &str {
        match self {
            QcDecision::Approve { item_id } | QcDecision::Reject { item_id, .. } => item_id,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct QualityCheckForm {
    phase: FormPhase,
    selected_item: Option<String>,
    pub defects: Vec<String>,
    pub notes: String,
}

impl QualityCheckForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn selected_item(&self) -> Option<&str> {
        self.selected_item.as_deref()
    }

    /// 选择待审条目 (清空上一次的勾选与备注)
    pub fn select(&mut self, item_id: &str) {
        *self = Self {
            selected_item: Some(item_id.to_string()),
            ..Self::default()
        };
    }

    pub fn toggle_defect(&mut self, defect: &str) {
        self.phase = FormPhase::Editing;
        toggle(&mut self.defects, defect.to_string());
    }

    pub fn set_notes(&mut self, notes: &str) {
        self.phase = FormPhase::Editing;
        self.notes = notes.to_string();
    }

    pub fn can_approve(&self) -> bool {
        self.selected_item.is_some() && self.defects.is_empty()
    }

    pub fn can_reject(&self) -> bool {
        self.selected_item.is_some() && !self.defects.is_empty()
    }

    pub fn approve(&mut self) -> FormResult<QcDecision> {
        if !self.can_approve() {
            return Err(FormError::ActionNotAllowed(
                "approve requires a selected item and no defects".to_string(),
            ));
        }
        let item_id = self.finish();
        Ok(QcDecision::Approve { item_id })
    }

    pub fn reject(&mut self) -> FormResult<QcDecision> {
        if !self.can_reject() {
            return Err(FormError::ActionNotAllowed(
                "reject requires a selected item and at least one defect".to_string(),
            ));
        }
        let defects = std::mem::take(&mut self.defects);
        let notes = std::mem::take(&mut self.notes);
        let item_id = self.finish();
        Ok(QcDecision::Reject {
            item_id,
            defects,
            notes,
        })
    }

    // 清空并返回所选条目ID
    fn finish(&mut self) -> String {
        let item_id = self.selected_item.take().unwrap_or_default();
        *self = Self {
            phase: FormPhase::Submitted,
            ..Self::default()
        };
        item_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enablement_rules() {
        let mut form = QualityCheckForm::new();
        assert!(!form.can_approve());
        assert!(!form.can_reject());

        form.select("QC001");
        assert!(form.can_approve());
        assert!(!form.can_reject());

        form.toggle_defect("Poor stitching");
        assert!(!form.can_approve());
        assert!(form.can_reject());

        form.toggle_defect("Poor stitching");
        assert!(form.can_approve());
    }

    #[test]
    fn test_approve_with_defects_is_refused() {
        let mut form = QualityCheckForm::new();
        form.select("QC001");
        form.toggle_defect("Color mismatch");
        assert!(matches!(form.approve(), Err(FormError::ActionNotAllowed(_))));
        assert_eq!(form.selected_item(), Some("QC001"));
    }

    #[test]
    fn test_reject_returns_defects_and_resets() {
        let mut form = QualityCheckForm::new();
        form.select("QC001");
        form.toggle_defect("Uneven lasting");
        form.set_notes("heel misaligned");

        let decision = form.reject().unwrap();
        assert_eq!(
            decision,
            QcDecision::Reject {
                item_id: "QC001".to_string(),
                defects: vec!["Uneven lasting".to_string()],
                notes: "heel misaligned".to_string(),
            }
        );
        assert_eq!(form.phase(), FormPhase::Submitted);
        assert_eq!(form.selected_item(), None);
    }
}
