// ==========================================
// 工厂管理后台 - 数值格式化
// ==========================================
// 比率类指标统一输出为字符串,分母为 0 时输出 "0"
// ==========================================

/// 固定小数位
pub fn fixed(value: f64, digits: usize) -> String {
    format!("{:.*}", digits, value)
}

/// 百分比 (numerator / denominator * 100, 一位小数)
///
/// 分母为 0 时返回 "0",不做除法
pub fn percent(numerator: f64, denominator: f64) -> String {
    if denominator == 0.0 {
        return "0".to_string();
    }
    fixed(numerator / denominator * 100.0, 1)
}

/// 金额 (千分位 + 两位小数),如 "$2,450,000.00"
pub fn currency(amount: f64, symbol: &str) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let raw = fixed(amount.abs(), 2);
    let (int_part, frac_part) = raw.split_once('.').unwrap_or((raw.as_str(), "00"));
    format!("{}{}{}.{}", sign, symbol, group_thousands(int_part), frac_part)
}

/// 整数千分位,如 15420 -> "15,420"
pub fn thousands(value: u64) -> String {
    group_thousands(&value.to_string())
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_zero_denominator() {
        assert_eq!(percent(5.0, 0.0), "0");
        assert_eq!(percent(95.0, 100.0), "95.0");
        assert_eq!(percent(2.0, 50.0), "4.0");
    }

    #[test]
    fn test_currency_and_thousands() {
        assert_eq!(currency(2_450_000.0, "$"), "$2,450,000.00");
        assert_eq!(currency(240.0, "$"), "$240.00");
        assert_eq!(currency(-12.5, "$"), "-$12.50");
        assert_eq!(thousands(15420), "15,420");
        assert_eq!(thousands(892), "892");
    }
}
