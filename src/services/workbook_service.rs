//! 工作簿装配服务 - 业务能力层
//!
//! 职责：
//! - 编排布局引擎和评分表构建器，组装出两张工作表
//! - 隐藏评分表，保存最终的 xlsx 文件
//! - 一次构建对应一个全新的工作簿和一份全新的答案登记表

use anyhow::Result;
use rust_xlsxwriter::Workbook;
use std::path::Path;
use tracing::info;

use crate::error::{AppError, WorkbookError};
use crate::models::question::ExamPaper;
use crate::services::grading_service::GradingSheetBuilder;
use crate::services::layout_service::LayoutEngine;
use crate::styles::StyleConfig;

/// 工作簿装配服务
pub struct WorkbookService {
    styles: StyleConfig,
}

impl WorkbookService {
    /// 使用默认样式创建装配服务
    pub fn new() -> Self {
        Self {
            styles: StyleConfig::default(),
        }
    }

    /// 使用自定义样式创建装配服务
    pub fn with_styles(styles: StyleConfig) -> Self {
        Self { styles }
    }

    /// 构建一份试卷工作簿并保存到指定路径
    ///
    /// # 参数
    /// - `paper`: 试卷数据（标题 + 有序题目列表）
    /// - `output_path`: 输出文件路径（.xlsx）
    ///
    /// 工作簿要么完整构建并保存，要么不产生任何文件，没有部分成功
    pub fn build_workbook(&self, paper: &ExamPaper, output_path: &Path) -> Result<()> {
        info!(
            "开始构建工作簿: {} ({} 个题目)",
            paper.exam_title,
            paper.questions.len()
        );

        let mut layout = LayoutEngine::new(&paper.exam_title, &self.styles)?;
        for (i, question) in paper.questions.iter().enumerate() {
            layout.render_question(question, i + 1)?;
        }
        let (student_sheet, answer_records) = layout.finish();

        info!("布局完成，登记 {} 个答案单元格", answer_records.len());

        let grading = GradingSheetBuilder::new(&self.styles);
        let mut solution_sheet = grading.build(&answer_records)?;
        solution_sheet.set_hidden(true);

        // 学生表不加保护，保持可编辑
        let mut workbook = Workbook::new();
        workbook.push_worksheet(student_sheet);
        workbook.push_worksheet(solution_sheet);

        workbook.save(output_path).map_err(|e| {
            AppError::Workbook(WorkbookError::SaveFailed {
                path: output_path.to_string_lossy().to_string(),
                source: Box::new(e),
            })
        })?;

        info!("✓ 工作簿已保存: {}", output_path.display());

        Ok(())
    }
}

impl Default for WorkbookService {
    fn default() -> Self {
        Self::new()
    }
}

/// 根据试卷标题生成输出文件名
///
/// 替换文件系统不允许的字符，标题为空时使用固定名称
pub fn output_filename(exam_title: &str) -> String {
    let sanitized: String = exam_title
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            other => other,
        })
        .collect();

    let trimmed = sanitized.trim();
    if trimmed.is_empty() {
        "Professional_Exam.xlsx".to_string()
    } else {
        format!("{}.xlsx", trimmed.replace(' ', "_"))
    }
}
