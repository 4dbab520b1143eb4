// ==========================================
// 工厂管理后台 - 款式领域模型
// ==========================================
// 款式变体 = 基础款 + 颜色 + 尺码 + 性别 + 左右脚
// 名称由属性派生,不单独录入
// ==========================================

use crate::domain::entity::Entity;
use crate::domain::types::ProductionStage;
use serde::{Deserialize, Serialize};

// ==========================================
// ArticleBase - 基础款
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleBase {
    pub id: String,       // 款号 (ART001)
    pub name: String,     // 款名
    pub category: String, // 品类 (Formal/Athletic/Casual)
    pub base_price: f64,
}

// ==========================================
// 属性目录项
// ==========================================

/// 颜色
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorOption {
    pub id: String,
    pub name: String,
    pub hex: String,
}

/// 通用的 id/name 选项 (性别、左右脚)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedOption {
    pub id: String,
    pub name: String,
}

// ==========================================
// ArticleVariant - 款式变体
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleVariant {
    pub id: String,             // AV001
    pub article_number: String, // 关联 ArticleBase.id
    pub article_name: String,
    pub color: String,
    pub color_name: String,
    pub size: String,
    pub gender: String,
    pub gender_name: String,
    pub side: String,
    pub side_name: String,
    pub full_name: String,    // "ART001 - Black - 9 - Male - Both"
    pub display_name: String, // "Classic Oxford - Black - 9 - Male - Both"
    pub materials: Vec<String>,
    pub stages: Vec<ProductionStage>,
    pub price: f64,
}

/// 变体属性 (派生名称所需的最小信息)
#[derive(Debug, Clone, Copy)]
pub struct VariantAttributes<'a> {
    pub article_number: &'a str,
    pub article_name: &'a str,
    pub color_name: &'a str,
    pub size: &'a str,
    pub gender_name: &'a str,
    pub side_name: &'a str,
}

impl VariantAttributes<'_> {
    /// 完整名称: 款号开头
    pub fn full_name(&self) -> String {
        format!(
            "{} - {} - {} - {} - {}",
            self.article_number, self.color_name, self.size, self.gender_name, self.side_name
        )
    }

    /// 展示名称: 款名开头
    pub fn display_name(&self) -> String {
        format!(
            "{} - {} - {} - {} - {}",
            self.article_name, self.color_name, self.size, self.gender_name, self.side_name
        )
    }
}

impl ArticleVariant {
    /// 当前属性视图
    pub fn attributes(&self) -> VariantAttributes<'_> {
        VariantAttributes {
            article_number: &self.article_number,
            article_name: &self.article_name,
            color_name: &self.color_name,
            size: &self.size,
            gender_name: &self.gender_name,
            side_name: &self.side_name,
        }
    }

    /// 按当前属性重算派生名称
    pub fn refresh_names(&mut self) {
        let attrs = self.attributes();
        let full_name = attrs.full_name();
        let display_name = attrs.display_name();
        self.full_name = full_name;
        self.display_name = display_name;
    }

    /// 搜索匹配 (完整名称或ID,不区分大小写)
    pub fn matches_search(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        term.is_empty()
            || self.full_name.to_lowercase().contains(&term)
            || self.id.to_lowercase().contains(&term)
    }

    /// 是否需要某道工序
    pub fn requires_stage(&self, stage: ProductionStage) -> bool {
        self.stages.contains(&stage)
    }
}

impl Entity for ArticleVariant {
    const ENTITY: &'static str = "article_variant";

    fn id(&self) -> &str {
        &self.id
    }
}
