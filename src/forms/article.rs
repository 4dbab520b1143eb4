// ==========================================
// 工厂管理后台 - 款式表单
// ==========================================
// 新建: 选择基础款/颜色/尺码/性别/左右脚 + 物料与工序多选
// 编辑: 从已有变体载入,提交时保留原ID
// ==========================================

use super::{toggle, FormContext, FormError, FormPhase, FormResult};
use crate::domain::{ArticleVariant, ProductionStage};

/// 提交结果: 新建或更新
#[derive(Debug, Clone, PartialEq)]
pub enum ArticleSubmission {
    Create(ArticleVariant),
    Update(ArticleVariant),
}

impl ArticleSubmission {
    pub fn variant(&self) -> &ArticleVariant {
        match self {
            ArticleSubmission::Create(v) | ArticleSubmission::Update(v) => v,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArticleForm {
    phase: FormPhase,
    editing_id: Option<String>,
    pub base_id: String,
    pub base_name: String,
    pub color: String,
    pub size: String,
    pub gender: String,
    pub side: String,
    pub materials: Vec<String>,
    pub stages: Vec<ProductionStage>,
    pub notes: String,
}

impl ArticleForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    /// 是否处于编辑已有变体模式
    pub fn is_editing(&self) -> bool {
        self.editing_id.is_some()
    }

    /// 选择基础款,同步款名 (目录中不存在时款名为空)
    pub fn set_base(&mut self, ctx: &FormContext<'_>, base_id: &str) {
        self.touch();
        self.base_id = base_id.to_string();
        self.base_name = ctx
            .catalog
            .article_base(base_id)
            .map(|b| b.name.clone())
            .unwrap_or_default();
    }

    pub fn set_color(&mut self, color: &str) {
        self.touch();
        self.color = color.to_string();
    }

    pub fn set_size(&mut self, size: &str) {
        self.touch();
        self.size = size.to_string();
    }

    pub fn set_gender(&mut self, gender: &str) {
        self.touch();
        self.gender = gender.to_string();
    }

    pub fn set_side(&mut self, side: &str) {
        self.touch();
        self.side = side.to_string();
    }

    pub fn set_notes(&mut self, notes: &str) {
        self.touch();
        self.notes = notes.to_string();
    }

    pub fn toggle_material(&mut self, material: &str) {
        self.touch();
        toggle(&mut self.materials, material.to_string());
    }

    pub fn toggle_stage(&mut self, stage: ProductionStage) {
        self.touch();
        toggle(&mut self.stages, stage);
    }

    /// 载入已有变体进入编辑模式
    pub fn load(&mut self, variant: &ArticleVariant) {
        *self = Self {
            phase: FormPhase::Editing,
            editing_id: Some(variant.id.clone()),
            base_id: variant.article_number.clone(),
            base_name: variant.article_name.clone(),
            color: variant.color.clone(),
            size: variant.size.clone(),
            gender: variant.gender.clone(),
            side: variant.side.clone(),
            materials: variant.materials.clone(),
            stages: variant.stages.clone(),
            notes: String::new(),
        };
    }

    /// 放弃编辑
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// 组装变体
    ///
    /// # 参数
    /// - `new_id`: 新建时使用的ID (编辑模式忽略)
    ///
    /// # 错误
    /// - 未选择基础款时返回 MissingField (名称与价格都依赖基础款)
    pub fn submit(&mut self, ctx: &FormContext<'_>, new_id: &str) -> FormResult<ArticleSubmission> {
        if self.base_id.trim().is_empty() {
            return Err(FormError::MissingField("base".to_string()));
        }

        let catalog = ctx.catalog;
        let price = catalog.article_base(&self.base_id).map_or(0.0, |b| b.base_price);
        let color_name = catalog
            .color(&self.color)
            .map_or_else(|| self.color.clone(), |c| c.name.clone());
        let gender_name = catalog
            .gender(&self.gender)
            .map_or_else(|| self.gender.clone(), |g| g.name.clone());
        let side_name = catalog
            .side(&self.side)
            .map_or_else(|| self.side.clone(), |s| s.name.clone());

        let mut variant = ArticleVariant {
            id: self.editing_id.clone().unwrap_or_else(|| new_id.to_string()),
            article_number: self.base_id.clone(),
            article_name: self.base_name.clone(),
            color: self.color.clone(),
            color_name,
            size: self.size.clone(),
            gender: self.gender.clone(),
            gender_name,
            side: self.side.clone(),
            side_name,
            full_name: String::new(),
            display_name: String::new(),
            materials: self.materials.clone(),
            stages: self.stages.clone(),
            price,
        };
        variant.refresh_names();

        let submission = if self.is_editing() {
            ArticleSubmission::Update(variant)
        } else {
            ArticleSubmission::Create(variant)
        };

        *self = Self {
            phase: FormPhase::Submitted,
            ..Self::default()
        };
        Ok(submission)
    }

    fn touch(&mut self) {
        self.phase = FormPhase::Editing;
    }
}
