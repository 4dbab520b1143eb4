// ==========================================
// 工厂管理后台 - 表单状态控制器
// ==========================================
// 每个表单只有两种状态: 编辑中 / 已提交
// 提交: 组装记录 -> 清空字段 -> 进入 Submitted; 再次编辑回到 Editing
// 校验: 仅数量字段的数字解析,以及质检页的通过/驳回启用规则
// ==========================================

pub mod article;
pub mod inward;
pub mod login;
pub mod outward;
pub mod provider_qc;
pub mod quality_check;
pub mod report_request;

use crate::domain::ArticleVariant;
use crate::seed::SeedData;
use chrono::NaiveDate;
use thiserror::Error;

pub use article::{ArticleForm, ArticleSubmission};
pub use inward::InwardForm;
pub use login::{Credentials, LoginForm};
pub use outward::OutwardForm;
pub use provider_qc::ProviderQcForm;
pub use quality_check::{QcDecision, QualityCheckForm};
pub use report_request::ReportRequestForm;

// ==========================================
// FormPhase - 表单状态
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormPhase {
    #[default]
    Editing,
    Submitted,
}

// ==========================================
// FormError - 表单错误
// ==========================================
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("无效数字: field={field}, value={value}")]
    InvalidNumber { field: String, value: String },

    #[error("缺少必填项: {0}")]
    MissingField(String),

    #[error("操作不可用: {0}")]
    ActionNotAllowed(String),
}

pub type FormResult<T> = Result<T, FormError>;

// ==========================================
// FormContext - 提交时的查找上下文
// ==========================================
/// 目录数据 (采购单、基础款、颜色等) + 当前款式变体 + 默认日期
#[derive(Debug, Clone, Copy)]
pub struct FormContext<'a> {
    pub catalog: &'a SeedData,
    pub variants: &'a [ArticleVariant],
    pub today: NaiveDate,
}

impl<'a> FormContext<'a> {
    pub fn new(catalog: &'a SeedData, variants: &'a [ArticleVariant], today: NaiveDate) -> Self {
        Self {
            catalog,
            variants,
            today,
        }
    }

    /// 变体展示名称,找不到时回落到ID
    pub fn variant_name(&self, id: &str) -> String {
        self.variants
            .iter()
            .find(|v| v.id == id)
            .map(|v| v.display_name.clone())
            .unwrap_or_else(|| id.to_string())
    }
}

/// 解析整数数量 (空串视为 0)
pub fn parse_quantity(field: &str, raw: &str) -> FormResult<u32> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(0);
    }
    raw.parse::<u32>().map_err(|_| FormError::InvalidNumber {
        field: field.to_string(),
        value: raw.to_string(),
    })
}

/// 解析小数数量 (空串视为 0,负数无效)
pub fn parse_amount(field: &str, raw: &str) -> FormResult<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(0.0);
    }
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => Ok(v),
        _ => Err(FormError::InvalidNumber {
            field: field.to_string(),
            value: raw.to_string(),
        }),
    }
}

/// 多选切换: 已选则移除,未选则追加
pub(crate) fn toggle<T: PartialEq>(items: &mut Vec<T>, value: T) {
    if let Some(pos) = items.iter().position(|x| *x == value) {
        items.remove(pos);
    } else {
        items.push(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity("ordered_qty", " 100 "), Ok(100));
        assert_eq!(parse_quantity("ordered_qty", ""), Ok(0));
        assert_eq!(
            parse_quantity("ordered_qty", "ten"),
            Err(FormError::InvalidNumber {
                field: "ordered_qty".to_string(),
                value: "ten".to_string()
            })
        );
        assert!(parse_quantity("spoilt_qty", "-1").is_err());
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("Upper Leather", "12.5"), Ok(12.5));
        assert!(parse_amount("Upper Leather", "-3").is_err());
        assert!(parse_amount("Upper Leather", "NaN").is_err());
    }

    #[test]
    fn test_toggle() {
        let mut v = vec!["a", "b"];
        toggle(&mut v, "a");
        assert_eq!(v, vec!["b"]);
        toggle(&mut v, "c");
        assert_eq!(v, vec!["b", "c"]);
    }
}
