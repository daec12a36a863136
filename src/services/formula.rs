//! 电子表格公式构建 - 业务能力层
//!
//! 所有拼接单元格地址和公式字符串的逻辑集中在这里，
//! 布局引擎和评分表构建器只调用这些函数，不自己拼字符串

/// 默认数值比较阈值（未指定容差的数值题按绝对差 0.01 判分）
pub const DEFAULT_NUMERIC_THRESHOLD: f64 = 0.01;

/// 把 0 起始的列索引转换为列字母，如 0 -> "A"，3 -> "D"，26 -> "AA"
pub fn column_letter(col: u16) -> String {
    let mut col = col as u32 + 1;
    let mut letters = Vec::new();
    while col > 0 {
        let rem = ((col - 1) % 26) as u8;
        letters.push((b'A' + rem) as char);
        col = (col - 1) / 26;
    }
    letters.iter().rev().collect()
}

/// 把 0 起始的行列索引转换为单元格地址，如 (4, 3) -> "D5"
pub fn cell_address(row: u32, col: u16) -> String {
    format!("{}{}", column_letter(col), row + 1)
}

/// 引用另一张工作表单元格的公式，如 `=Student!D5`
pub fn reference_formula(sheet: &str, address: &str) -> String {
    format!("={}!{}", sheet, address)
}

/// 带相对容差的数值判分公式
///
/// 正确答案与学生答案的绝对差不超过 `tolerance * |正确答案|` 记 1 分，否则 0 分；
/// 学生答案为空或无法转为数字时按 0 分处理（IFERROR 包裹）
pub fn tolerance_formula(correct_ref: &str, student_ref: &str, tolerance: f64) -> String {
    format!(
        "=IFERROR(IF(ABS(VALUE({c})-VALUE({s}))<=({t}*ABS(VALUE({c}))),1,0),0)",
        c = correct_ref,
        s = student_ref,
        t = tolerance
    )
}

/// 文本精确匹配判分公式（区分大小写）
///
/// 两边都经过 TEXT(..,"@") 转换，避免数字与字符串比较不一致
pub fn exact_match_formula(student_ref: &str, correct_ref: &str) -> String {
    format!(
        "=IF(TEXT({s},\"@\")=TEXT({c},\"@\"),1,0)",
        s = student_ref,
        c = correct_ref
    )
}

/// 默认数值判分公式（绝对差阈值 0.01）
///
/// 学生答案为空或无法转为数字时按 0 分处理（IFERROR 包裹）
pub fn default_tolerance_formula(correct_ref: &str, student_ref: &str) -> String {
    format!(
        "=IFERROR(IF(ABS(VALUE({c})-VALUE({s}))<={t},1,0),0)",
        c = correct_ref,
        s = student_ref,
        t = DEFAULT_NUMERIC_THRESHOLD
    )
}

/// 对一列区间求和的公式，如 `=SUM(L2:L9)`
pub fn sum_formula(col: &str, first_row: u32, last_row: u32) -> String {
    format!("=SUM({col}{first_row}:{col}{last_row})")
}

/// 清洗下拉选项中的引号
///
/// 列表约束以引号包裹，选项内嵌的双引号会破坏约束格式，统一替换为单引号
pub fn escape_options(options: &[String]) -> Vec<String> {
    options.iter().map(|opt| opt.replace('"', "'")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_letter() {
        assert_eq!(column_letter(0), "A");
        assert_eq!(column_letter(2), "C");
        assert_eq!(column_letter(3), "D");
        assert_eq!(column_letter(25), "Z");
        assert_eq!(column_letter(26), "AA");
        assert_eq!(column_letter(27), "AB");
    }

    #[test]
    fn test_cell_address() {
        // 行列都是 0 起始，地址是 1 起始
        assert_eq!(cell_address(0, 0), "A1");
        assert_eq!(cell_address(4, 3), "D5");
        assert_eq!(cell_address(9, 2), "C10");
    }

    #[test]
    fn test_reference_formula() {
        assert_eq!(reference_formula("Student", "D5"), "=Student!D5");
    }

    #[test]
    fn test_tolerance_formula() {
        // 正确答案 100、容差 2%：98 和 102 得分，97.9 和 102.1 不得分
        assert_eq!(
            tolerance_formula("K2", "J2", 0.02),
            "=IFERROR(IF(ABS(VALUE(K2)-VALUE(J2))<=(0.02*ABS(VALUE(K2))),1,0),0)"
        );
    }

    #[test]
    fn test_exact_match_formula() {
        assert_eq!(
            exact_match_formula("J3", "K3"),
            "=IF(TEXT(J3,\"@\")=TEXT(K3,\"@\"),1,0)"
        );
    }

    #[test]
    fn test_default_tolerance_formula() {
        // 固定绝对阈值 0.01：50.009 得分，50.02 不得分
        assert_eq!(
            default_tolerance_formula("K4", "J4"),
            "=IFERROR(IF(ABS(VALUE(K4)-VALUE(J4))<=0.01,1,0),0)"
        );
    }

    #[test]
    fn test_sum_formula() {
        assert_eq!(sum_formula("L", 2, 9), "=SUM(L2:L9)");
    }

    #[test]
    fn test_escape_options() {
        let options = vec![
            "Plain".to_string(),
            "Say \"hello\"".to_string(),
        ];
        let escaped = escape_options(&options);
        assert_eq!(escaped[0], "Plain");
        assert_eq!(escaped[1], "Say 'hello'");
    }
}
