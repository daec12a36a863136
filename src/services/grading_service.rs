//! 评分表构建器 - 业务能力层
//!
//! 职责：
//! - 读取布局引擎交出的答案登记表
//! - 在 Solution 工作表为每条记录生成四列：题目标识、学生答案引用、正确答案、判分公式
//! - 在末尾生成总分行
//! - 不负责学生表，不负责保存文件

use anyhow::Result;
use rust_xlsxwriter::{Formula, Worksheet};
use tracing::debug;

use crate::models::answer::AnswerRecord;
use crate::services::formula::{
    column_letter, default_tolerance_formula, exact_match_formula, reference_formula, sum_formula,
    tolerance_formula,
};
use crate::services::layout_service::{apply_column_widths, STUDENT_SHEET_NAME};
use crate::styles::StyleConfig;

/// 评分表名称
pub const SOLUTION_SHEET_NAME: &str = "Solution";

/// 评分表四列的起始位置（I 列）
const ID_COL: u16 = 8;
const STUDENT_COL: u16 = 9;
const SOLUTION_COL: u16 = 10;
const POINTS_COL: u16 = 11;

/// 评分表表头
const GRADING_HEADERS: [&str; 4] = ["Question", "Student", "Solution", "Points"];

/// 评分表构建器
pub struct GradingSheetBuilder {
    styles: StyleConfig,
}

impl GradingSheetBuilder {
    /// 创建新的评分表构建器
    pub fn new(styles: &StyleConfig) -> Self {
        Self {
            styles: styles.clone(),
        }
    }

    /// 根据答案登记表构建完整的评分表
    ///
    /// 每条记录占一行，从第 2 行开始（第 1 行是表头）；
    /// 登记表为空时只有表头，不生成总分行
    pub fn build(&self, records: &[AnswerRecord]) -> Result<Worksheet> {
        let mut sheet = Worksheet::new();
        sheet.set_name(SOLUTION_SHEET_NAME)?;
        apply_column_widths(&mut sheet)?;

        for (i, header) in GRADING_HEADERS.iter().enumerate() {
            sheet.write_string_with_format(
                0,
                ID_COL + i as u16,
                *header,
                &self.styles.grading_header,
            )?;
        }

        for (i, record) in records.iter().enumerate() {
            let row = i as u32 + 1;
            self.write_grading_row(&mut sheet, record, row)?;
        }

        if !records.is_empty() {
            self.write_total_row(&mut sheet, records.len() as u32)?;
        }

        debug!("评分表构建完成，共 {} 条记录", records.len());

        Ok(sheet)
    }

    /// 写入一条评分记录
    fn write_grading_row(
        &self,
        sheet: &mut Worksheet,
        record: &AnswerRecord,
        row: u32,
    ) -> Result<()> {
        sheet.write_string_with_format(row, ID_COL, &record.question_id, &self.styles.grading_id)?;

        // 学生答案：实时引用学生表对应单元格
        let student_ref = reference_formula(STUDENT_SHEET_NAME, &record.cell_address);
        sheet.write_formula_with_format(
            row,
            STUDENT_COL,
            Formula::new(student_ref),
            &self.styles.grading_cell,
        )?;

        sheet.write_string_with_format(
            row,
            SOLUTION_COL,
            &record.correct_answer,
            &self.styles.grading_cell,
        )?;

        let grading = grading_formula(record, row + 1);
        sheet.write_formula_with_format(
            row,
            POINTS_COL,
            Formula::new(grading),
            &self.styles.grading_cell,
        )?;

        Ok(())
    }

    /// 写入总分行：标签 + 对判分列求和的公式
    fn write_total_row(&self, sheet: &mut Worksheet, record_count: u32) -> Result<()> {
        // 数据行占第 2 到 record_count+1 行（1 起始），总分行再空一行
        let total_row = record_count + 2;
        sheet.write_string_with_format(
            total_row,
            SOLUTION_COL,
            "Total Score:",
            &self.styles.total_label,
        )?;

        let total = sum_formula(&column_letter(POINTS_COL), 2, record_count + 1);
        sheet.write_formula_with_format(
            total_row,
            POINTS_COL,
            Formula::new(total),
            &self.styles.total_value,
        )?;

        Ok(())
    }
}

/// 按优先级选择判分公式
///
/// 1. 有容差且有效类型为数值题 → 相对容差判分
/// 2. 选择类题型 → 文本精确匹配（区分大小写）
/// 3. 其余 → 默认绝对阈值 0.01 判分
///
/// `row` 为 1 起始的评分表行号
pub(crate) fn grading_formula(record: &AnswerRecord, row: u32) -> String {
    let student_ref = format!("{}{}", column_letter(STUDENT_COL), row);
    let correct_ref = format!("{}{}", column_letter(SOLUTION_COL), row);

    let effective_type = record.effective_type();

    if let Some(tolerance) = record.tolerance {
        if effective_type == crate::models::question::QuestionType::Numerical {
            return tolerance_formula(&correct_ref, &student_ref, tolerance);
        }
    }

    if effective_type.is_choice() {
        return exact_match_formula(&student_ref, &correct_ref);
    }

    default_tolerance_formula(&correct_ref, &student_ref)
}
