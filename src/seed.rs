// ==========================================
// 工厂管理后台 - 样例数据提供者
// ==========================================
// 职责: 提供进程启动时加载一次的只读样例集合
// 用途: 内存仓储初始化、seed_db 写库、测试夹具
// ==========================================

use crate::domain::{
    ArticleBase, ArticleVariant, ColorOption, CompanyProfile, DeliveryStatus, Factory,
    FactoryStatus, InwardEntry, InwardStatus, MaterialLine, NamedOption, OutwardDelivery, Priority,
    ProductionStage, ProductionTask, ProviderCompany, ProviderQcIssue, PurchaseOrder,
    PurchaseOrderStatus, QcIssueStatus, QcItem, QcReviewStatus, ReportTemplate, TaskStatus,
    VariantAttributes, WorkHistoryEntry, WorkStatus, Worker, WorkerStatus,
};
use chrono::NaiveDate;

/// 全部样例集合
#[derive(Debug, Clone)]
pub struct SeedData {
    pub company: CompanyProfile,
    pub factories: Vec<Factory>,
    pub article_bases: Vec<ArticleBase>,
    pub colors: Vec<ColorOption>,
    pub sizes: Vec<String>,
    pub genders: Vec<NamedOption>,
    pub sides: Vec<NamedOption>,
    pub article_variants: Vec<ArticleVariant>,
    pub workers: Vec<Worker>,
    pub work_history: Vec<WorkHistoryEntry>,
    pub raw_materials: Vec<String>,
    pub purchase_orders: Vec<PurchaseOrder>,
    pub provider_companies: Vec<ProviderCompany>,
    pub defect_types: Vec<String>,
    pub report_templates: Vec<ReportTemplate>,
    pub inward_entries: Vec<InwardEntry>,
    pub outward_deliveries: Vec<OutwardDelivery>,
    pub provider_qc_issues: Vec<ProviderQcIssue>,
    pub production_tasks: Vec<ProductionTask>,
    pub qc_items: Vec<QcItem>,
}

// 样例日期均为合法常量,解析失败回落到 1970-01-01
fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap_or_default()
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn named(id: &str, name: &str) -> NamedOption {
    NamedOption {
        id: id.to_string(),
        name: name.to_string(),
    }
}

impl SeedData {
    /// 构建样例数据
    pub fn sample() -> Self {
        let article_bases = article_bases();
        let article_variants = article_variants(&article_bases);
        let workers = workers();
        let work_history = work_history(&workers, &article_variants);

        Self {
            company: CompanyProfile {
                name: "Premier Footwear Manufacturing Ltd".to_string(),
                total_revenue: 2_450_000.0,
                total_items_produced: 15_420,
                total_defects: 892,
                quality_score: 94.2,
                total_profit: 485_000.0,
                monthly_growth: 12.5,
            },
            factories: factories(),
            colors: colors(),
            sizes: strings(&["5", "6", "7", "8", "9", "10", "11", "12"]),
            genders: vec![
                named("male", "Male"),
                named("female", "Female"),
                named("unisex", "Unisex"),
                named("kids", "Kids"),
            ],
            sides: vec![named("left", "Left"), named("right", "Right"), named("both", "Both")],
            raw_materials: strings(&[
                "Upper Leather",
                "Synthetic Upper",
                "Insole",
                "Foam Insole",
                "Outsole",
                "Rubber Outsole",
                "Lace",
                "Eyelet",
                "Thread",
                "Glue",
                "Polish",
                "Zipper",
            ]),
            purchase_orders: purchase_orders(),
            provider_companies: provider_companies(),
            defect_types: strings(&[
                "Poor stitching",
                "Uneven cutting",
                "Color mismatch",
                "Size variation",
                "Material defect",
                "Alignment issue",
                "Finishing problem",
                "Sole detachment",
                "Other",
            ]),
            report_templates: report_templates(),
            inward_entries: inward_entries(&article_variants),
            outward_deliveries: outward_deliveries(&article_variants),
            provider_qc_issues: provider_qc_issues(&article_variants),
            production_tasks: production_tasks(&workers),
            qc_items: qc_items(),
            article_bases,
            article_variants,
            workers,
            work_history,
        }
    }

    /// 按ID查找工厂
    pub fn factory(&self, id: &str) -> Option<&Factory> {
        self.factories.iter().find(|f| f.id == id)
    }

    /// 按ID查找基础款
    pub fn article_base(&self, id: &str) -> Option<&ArticleBase> {
        self.article_bases.iter().find(|b| b.id == id)
    }

    /// 按ID查找颜色
    pub fn color(&self, id: &str) -> Option<&ColorOption> {
        self.colors.iter().find(|c| c.id == id)
    }

    /// 按ID查找性别选项
    pub fn gender(&self, id: &str) -> Option<&NamedOption> {
        self.genders.iter().find(|g| g.id == id)
    }

    /// 按ID查找左右脚选项
    pub fn side(&self, id: &str) -> Option<&NamedOption> {
        self.sides.iter().find(|s| s.id == id)
    }

    /// 按ID查找采购单
    pub fn purchase_order(&self, id: &str) -> Option<&PurchaseOrder> {
        self.purchase_orders.iter().find(|po| po.id == id)
    }
}

fn factories() -> Vec<Factory> {
    let factory = |id: &str, name: &str, location: &str, capacity, current, eff, quality, employees, revenue| Factory {
        id: id.to_string(),
        name: name.to_string(),
        location: location.to_string(),
        capacity,
        current_production: current,
        efficiency: eff,
        quality_score: quality,
        employee_count: employees,
        monthly_revenue: revenue,
        status: FactoryStatus::Active,
    };

    vec![
        factory("factory-1", "Main Production Unit - Mumbai", "Mumbai", 1000, 850, 92.5, 95.2, 120, 850_000.0),
        factory("factory-2", "Secondary Unit - Bangalore", "Bangalore", 800, 720, 90.0, 93.8, 95, 720_000.0),
        factory("factory-3", "Export Unit - Chennai", "Chennai", 1200, 1100, 91.7, 94.5, 140, 980_000.0),
    ]
}

fn article_bases() -> Vec<ArticleBase> {
    let base = |id: &str, name: &str, category: &str, price| ArticleBase {
        id: id.to_string(),
        name: name.to_string(),
        category: category.to_string(),
        base_price: price,
    };

    vec![
        base("ART001", "Classic Oxford", "Formal", 45.0),
        base("ART002", "Sports Sneaker", "Athletic", 35.0),
        base("ART003", "Casual Boot", "Casual", 55.0),
        base("ART004", "Running Shoe", "Athletic", 40.0),
        base("ART005", "Dress Pump", "Formal", 50.0),
    ]
}

fn colors() -> Vec<ColorOption> {
    [
        ("black", "Black", "#000000"),
        ("brown", "Brown", "#8B4513"),
        ("white", "White", "#FFFFFF"),
        ("tan", "Tan", "#D2B48C"),
        ("navy", "Navy", "#000080"),
        ("red", "Red", "#DC143C"),
        ("gray", "Gray", "#808080"),
    ]
    .iter()
    .map(|(id, name, hex)| ColorOption {
        id: id.to_string(),
        name: name.to_string(),
        hex: hex.to_string(),
    })
    .collect()
}

// (id, base, size, color, gender, side, materials, stages, price)
type VariantRow<'a> = (
    &'a str,
    &'a str,
    &'a str,
    (&'a str, &'a str),
    (&'a str, &'a str),
    (&'a str, &'a str),
    &'a [&'a str],
    &'a [ProductionStage],
    f64,
);

fn article_variants(bases: &[ArticleBase]) -> Vec<ArticleVariant> {
    use ProductionStage::*;

    let leather = ["Upper Leather", "Insole", "Outsole", "Lace"];
    let synthetic = ["Synthetic Upper", "Foam Insole", "Rubber Outsole", "Lace"];
    let boot = ["Leather Upper", "Insole", "Outsole", "Zipper"];
    let oxford_stages = [Cutting, Stitching, Lasting, SoleAttachment, Finishing];
    let sneaker_stages = [Cutting, Stitching, SoleAttachment, QualityCheck];
    let boot_stages = [Cutting, Stitching, Lasting, Finishing];

    let rows: [VariantRow; 5] = [
        ("AV001", "ART001", "9", ("black", "Black"), ("male", "Male"), ("both", "Both"), &leather, &oxford_stages, 45.0),
        ("AV002", "ART001", "10", ("brown", "Brown"), ("male", "Male"), ("both", "Both"), &leather, &oxford_stages, 45.0),
        ("AV003", "ART002", "8", ("white", "White"), ("unisex", "Unisex"), ("both", "Both"), &synthetic, &sneaker_stages, 35.0),
        ("AV004", "ART003", "9", ("brown", "Brown"), ("female", "Female"), ("left", "Left"), &boot, &boot_stages, 55.0),
        ("AV005", "ART002", "7", ("red", "Red"), ("female", "Female"), ("both", "Both"), &synthetic, &sneaker_stages, 35.0),
    ];

    rows.iter()
        .map(|(id, base_id, size, color, gender, side, materials, stages, price)| {
            let article_name = bases
                .iter()
                .find(|b| b.id == *base_id)
                .map(|b| b.name.clone())
                .unwrap_or_default();
            let attrs = VariantAttributes {
                article_number: base_id,
                article_name: &article_name,
                color_name: color.1,
                size,
                gender_name: gender.1,
                side_name: side.1,
            };

            ArticleVariant {
                id: id.to_string(),
                article_number: base_id.to_string(),
                full_name: attrs.full_name(),
                display_name: attrs.display_name(),
                article_name: article_name.clone(),
                color: color.0.to_string(),
                color_name: color.1.to_string(),
                size: size.to_string(),
                gender: gender.0.to_string(),
                gender_name: gender.1.to_string(),
                side: side.0.to_string(),
                side_name: side.1.to_string(),
                materials: strings(materials),
                stages: stages.to_vec(),
                price: *price,
            }
        })
        .collect()
}

fn workers() -> Vec<Worker> {
    use ProductionStage::*;

    let rows = [
        ("W001", "John Smith", Cutting, WorkerStatus::Available, 15.0, "EMP001", "2023-01-15", "+91-9876543210", "123 Main St, Mumbai"),
        ("W002", "Maria Garcia", Stitching, WorkerStatus::Busy, 18.0, "EMP002", "2023-02-20", "+91-9876543211", "456 Oak Ave, Mumbai"),
        ("W003", "David Chen", Lasting, WorkerStatus::Available, 20.0, "EMP003", "2023-03-10", "+91-9876543212", "789 Pine Rd, Mumbai"),
        ("W004", "Sarah Johnson", Finishing, WorkerStatus::Available, 16.0, "EMP004", "2023-04-05", "+91-9876543213", "321 Elm St, Mumbai"),
        ("W005", "Ahmed Hassan", QualityCheck, WorkerStatus::Busy, 22.0, "EMP005", "2023-05-12", "+91-9876543214", "654 Maple Dr, Mumbai"),
    ];

    rows.iter()
        .map(|(id, name, skill, status, rate, emp, joined, phone, address)| Worker {
            id: id.to_string(),
            name: name.to_string(),
            skill: *skill,
            status: *status,
            hourly_rate: *rate,
            employee_id: emp.to_string(),
            join_date: day(joined),
            phone: phone.to_string(),
            address: address.to_string(),
        })
        .collect()
}

fn work_history(workers: &[Worker], variants: &[ArticleVariant]) -> Vec<WorkHistoryEntry> {
    // (id, worker, task, variant, stage, start, end, hours, qty, status, quality, payable)
    let rows = [
        ("WH001", "W001", "TASK001", "AV001", ProductionStage::Cutting, "2024-01-15", "2024-01-17", 16.0, 50, WorkStatus::Completed, 95.0, 240.0),
        ("WH002", "W002", "TASK002", "AV003", ProductionStage::Stitching, "2024-01-14", "2024-01-16", 20.0, 30, WorkStatus::Completed, 92.0, 360.0),
        ("WH003", "W001", "TASK003", "AV002", ProductionStage::Cutting, "2024-01-13", "2024-01-15", 12.0, 25, WorkStatus::Rework, 70.0, 0.0),
    ];

    rows.iter()
        .map(|(id, worker_id, task_id, variant_id, stage, start, end, hours, qty, status, quality, payable)| {
            let is_rework = *status == WorkStatus::Rework;
            WorkHistoryEntry {
                id: id.to_string(),
                worker_id: worker_id.to_string(),
                worker_name: workers
                    .iter()
                    .find(|w| w.id == *worker_id)
                    .map(|w| w.name.clone())
                    .unwrap_or_default(),
                task_id: task_id.to_string(),
                article_variant_id: variant_id.to_string(),
                article_name: variant_display_name(variants, variant_id),
                stage: *stage,
                start_date: day(start),
                end_date: day(end),
                hours_worked: *hours,
                quantity: *qty,
                status: *status,
                is_rework,
                quality_score: *quality,
                // 返工不计薪
                payable_amount: if is_rework { 0.0 } else { *payable },
            }
        })
        .collect()
}

fn variant_display_name(variants: &[ArticleVariant], id: &str) -> String {
    variants
        .iter()
        .find(|v| v.id == id)
        .map(|v| v.display_name.clone())
        .unwrap_or_default()
}

fn purchase_orders() -> Vec<PurchaseOrder> {
    [
        ("PO001", "Leather Suppliers Ltd", "2024-01-15", PurchaseOrderStatus::Active),
        ("PO002", "Sole Manufacturing Co", "2024-01-14", PurchaseOrderStatus::Pending),
        ("PO003", "Hardware Supplies Inc", "2024-01-13", PurchaseOrderStatus::Active),
        ("PO004", "Synthetic Materials Corp", "2024-01-12", PurchaseOrderStatus::Completed),
    ]
    .iter()
    .map(|(id, supplier, date, status)| PurchaseOrder {
        id: id.to_string(),
        supplier: supplier.to_string(),
        date: day(date),
        status: *status,
    })
    .collect()
}

fn provider_companies() -> Vec<ProviderCompany> {
    [
        ("PC001", "Global Shoe Distributors", "John Doe", "john@globalshoe.com"),
        ("PC002", "Fashion Forward Inc", "Jane Smith", "jane@fashionforward.com"),
        ("PC003", "Sports Gear Ltd", "Mike Johnson", "mike@sportsgear.com"),
    ]
    .iter()
    .map(|(id, name, contact, email)| ProviderCompany {
        id: id.to_string(),
        name: name.to_string(),
        contact: contact.to_string(),
        email: email.to_string(),
    })
    .collect()
}

fn report_templates() -> Vec<ReportTemplate> {
    [
        ("RPT001", "Production Summary", "Overall production metrics by factory"),
        ("RPT002", "Quality Analysis", "Defect rates and quality scores"),
        ("RPT003", "Worker Performance", "Individual worker productivity and quality"),
        ("RPT004", "Article Performance", "Production and quality by article variant"),
        ("RPT005", "Payroll Summary", "Worker wages and payment details"),
    ]
    .iter()
    .map(|(id, name, description)| ReportTemplate {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
    })
    .collect()
}

fn inward_entries(variants: &[ArticleVariant]) -> Vec<InwardEntry> {
    let line = |name: &str, quantity, unit: &str| MaterialLine {
        name: name.to_string(),
        quantity,
        unit: unit.to_string(),
    };

    vec![
        InwardEntry {
            id: "IN001".to_string(),
            date: day("2024-01-15"),
            po_number: "PO001".to_string(),
            supplier: "Leather Suppliers Ltd".to_string(),
            article_variant_id: "AV001".to_string(),
            article_name: variant_display_name(variants, "AV001"),
            materials: vec![line("Upper Leather", 100.0, "sq ft"), line("Insole", 50.0, "pairs")],
            status: InwardStatus::Completed,
        },
        InwardEntry {
            id: "IN002".to_string(),
            date: day("2024-01-14"),
            po_number: "PO002".to_string(),
            supplier: "Sole Manufacturing Co".to_string(),
            article_variant_id: "AV003".to_string(),
            article_name: variant_display_name(variants, "AV003"),
            materials: vec![line("Rubber Outsole", 75.0, "pairs")],
            status: InwardStatus::Pending,
        },
    ]
}

fn outward_deliveries(variants: &[ArticleVariant]) -> Vec<OutwardDelivery> {
    // (id, date, provider, variant, ordered, delivered, shortage, spoilt, status, notes)
    let rows = [
        ("OUT001", "2024-01-15", "Global Shoe Distributors", "AV001", 100, 95, 3, 2, DeliveryStatus::Partial, "Minor quality issues with 2 pairs"),
        ("OUT002", "2024-01-14", "Fashion Forward Inc", "AV003", 50, 50, 0, 0, DeliveryStatus::Complete, "Full delivery completed successfully"),
        ("OUT003", "2024-01-13", "Sports Gear Ltd", "AV004", 75, 70, 5, 0, DeliveryStatus::Shortage, "Production delay caused shortage"),
    ];

    rows.iter()
        .map(|(id, date, provider, variant_id, ordered, delivered, shortage, spoilt, status, notes)| OutwardDelivery {
            id: id.to_string(),
            date: day(date),
            provider: provider.to_string(),
            article_variant_id: variant_id.to_string(),
            article_name: variant_display_name(variants, variant_id),
            ordered_qty: *ordered,
            delivered_qty: *delivered,
            shortage_qty: *shortage,
            spoilt_qty: *spoilt,
            status: *status,
            notes: notes.to_string(),
        })
        .collect()
}

fn provider_qc_issues(variants: &[ArticleVariant]) -> Vec<ProviderQcIssue> {
    let rows = [
        (
            "PQC001", "2024-01-15", "Global Shoe Distributors", "AV001", "OUT001", 5,
            &["Poor stitching", "Color mismatch"][..],
            "Stitching quality below standard, slight color variation",
            QcIssueStatus::PendingRework, Priority::Medium, "John Doe",
        ),
        (
            "PQC002", "2024-01-14", "Fashion Forward Inc", "AV003", "OUT002", 2,
            &["Sole detachment"][..],
            "Sole separation noticed after minimal use",
            QcIssueStatus::ReworkComplete, Priority::High, "Jane Smith",
        ),
        (
            "PQC003", "2024-01-13", "Sports Gear Ltd", "AV004", "OUT003", 3,
            &["Size variation", "Finishing problem"][..],
            "Inconsistent sizing and poor finishing on heel area",
            QcIssueStatus::UnderReview, Priority::Low, "Mike Johnson",
        ),
    ];

    rows.iter()
        .map(|(id, date, provider, variant_id, delivery_id, qty, defects, description, status, priority, reporter)| {
            ProviderQcIssue {
                id: id.to_string(),
                date: day(date),
                provider: provider.to_string(),
                article_variant_id: variant_id.to_string(),
                article_name: variant_display_name(variants, variant_id),
                delivery_id: delivery_id.to_string(),
                issue_qty: *qty,
                defects: strings(defects),
                description: description.to_string(),
                status: *status,
                priority: *priority,
                reported_by: reporter.to_string(),
            }
        })
        .collect()
}

fn production_tasks(workers: &[Worker]) -> Vec<ProductionTask> {
    use ProductionStage::*;

    let rows = [
        ("TASK001", "Classic Oxford - Black - Men", Cutting, "John Smith", "2024-01-15", "2024-01-17", 75, TaskStatus::InProgress, 50),
        ("TASK002", "Sports Sneaker - White - Unisex", Stitching, "Maria Garcia", "2024-01-14", "2024-01-16", 90, TaskStatus::InProgress, 30),
        ("TASK003", "Classic Oxford - Black - Men", Lasting, "David Chen", "2024-01-13", "2024-01-15", 100, TaskStatus::Completed, 25),
    ];

    rows.iter()
        .map(|(id, article, stage, worker, start, end, progress, status, qty)| ProductionTask {
            id: id.to_string(),
            article: article.to_string(),
            stage: *stage,
            worker: worker.to_string(),
            worker_id: workers
                .iter()
                .find(|w| w.name == *worker)
                .map(|w| w.id.clone())
                .unwrap_or_default(),
            start_date: day(start),
            end_date: day(end),
            progress: *progress,
            status: *status,
            quantity: *qty,
        })
        .collect()
}

fn qc_items() -> Vec<QcItem> {
    use ProductionStage::*;

    let rows = [
        ("QC001", "TASK001", "Classic Oxford - Black - Men", "John Smith", Cutting, 50, "2024-01-15", QcReviewStatus::PendingReview, &[][..]),
        ("QC002", "TASK002", "Sports Sneaker - White - Unisex", "Maria Garcia", Stitching, 30, "2024-01-14", QcReviewStatus::Approved, &[][..]),
        ("QC003", "TASK003", "Classic Oxford - Black - Men", "David Chen", Lasting, 25, "2024-01-13", QcReviewStatus::Rejected, &["Uneven lasting", "Poor alignment"][..]),
    ];

    rows.iter()
        .map(|(id, task_id, article, worker, stage, qty, completed, status, defects)| QcItem {
            id: id.to_string(),
            task_id: task_id.to_string(),
            article: article.to_string(),
            worker: worker.to_string(),
            stage: *stage,
            quantity: *qty,
            completed_date: day(completed),
            status: *status,
            defects: strings(defects),
            notes: String::new(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_counts() {
        let seed = SeedData::sample();
        assert_eq!(seed.factories.len(), 3);
        assert_eq!(seed.article_variants.len(), 5);
        assert_eq!(seed.workers.len(), 5);
        assert_eq!(seed.work_history.len(), 3);
        assert_eq!(seed.outward_deliveries.len(), 3);
        assert_eq!(seed.provider_qc_issues.len(), 3);
    }

    #[test]
    fn test_rework_entries_are_not_payable() {
        let seed = SeedData::sample();
        assert!(seed.work_history.iter().all(|e| e.payable_invariant_holds()));
    }

    #[test]
    fn test_variant_names_derived() {
        let seed = SeedData::sample();
        let av001 = &seed.article_variants[0];
        assert_eq!(av001.full_name, "ART001 - Black - 9 - Male - Both");
        assert_eq!(av001.display_name, "Classic Oxford - Black - 9 - Male - Both");
        assert_eq!(seed.work_history[0].article_name, av001.display_name);
    }

    #[test]
    fn test_lookups_return_none_for_unknown() {
        let seed = SeedData::sample();
        assert!(seed.factory("factory-9").is_none());
        assert!(seed.article_base("ART999").is_none());
        assert_eq!(seed.factory("factory-2").map(|f| f.location.as_str()), Some("Bangalore"));
    }
}
