//! 学生表布局引擎 - 业务能力层
//!
//! 职责：
//! - 把有序题目列表渲染到学生表（Student 工作表）
//! - 维护只增不减的行游标
//! - 每写入一个答案输入单元格就登记一条 AnswerRecord
//! - 不负责评分表，不负责保存文件

use anyhow::Result;
use rust_xlsxwriter::{DataValidation, Worksheet};
use tracing::{debug, warn};

use crate::models::answer::AnswerRecord;
use crate::models::question::{DataTable, Question, SubQuestion};
use crate::services::formula::{cell_address, escape_options};
use crate::styles::StyleConfig;

/// 学生表名称
pub const STUDENT_SHEET_NAME: &str = "Student";

/// 题干所在列（B 列）
const QUESTION_COL: u16 = 1;
/// 简单题答案输入列（C 列）
const SIMPLE_ANSWER_COL: u16 = 2;
/// 子题答案输入列（D 列）
const SUB_ANSWER_COL: u16 = 3;
/// 数据表格起始列（C 列）
const TABLE_START_COL: u16 = 2;

/// 白色底色预填充的行数和列数
const PREFILL_ROWS: u32 = 100;
const PREFILL_COLS: u16 = 20;

/// 给工作表应用统一的列宽（学生表和评分表共用）
pub(crate) fn apply_column_widths(sheet: &mut Worksheet) -> Result<()> {
    sheet.set_column_width(0, 3)?;
    sheet.set_column_width(1, 50)?;
    for col in 2..=5u16 {
        sheet.set_column_width(col, 15)?;
    }
    Ok(())
}

/// 学生表布局引擎
///
/// 持有学生表和答案登记表，按题目顺序渲染；
/// 渲染完成后通过 [`LayoutEngine::finish`] 一次性交出两者
pub struct LayoutEngine {
    sheet: Worksheet,
    styles: StyleConfig,
    /// 行游标（0 起始），只增不减
    current_row: u32,
    answer_records: Vec<AnswerRecord>,
}

impl LayoutEngine {
    /// 创建布局引擎并初始化学生表
    ///
    /// 初始化内容：表名、列宽、空白区域白色底色、标题行
    pub fn new(exam_title: &str, styles: &StyleConfig) -> Result<Self> {
        let mut sheet = Worksheet::new();
        sheet.set_name(STUDENT_SHEET_NAME)?;

        apply_column_widths(&mut sheet)?;

        // 学生表可见区域统一铺白底
        for row in 0..PREFILL_ROWS {
            for col in 0..PREFILL_COLS {
                sheet.write_blank(row, col, &styles.white)?;
            }
        }

        // 标题固定写在 B1
        sheet.write_string_with_format(0, QUESTION_COL, exam_title, &styles.title)?;
        sheet.set_row_height(0, 30)?;

        Ok(Self {
            sheet,
            styles: styles.clone(),
            current_row: 1,
            answer_records: Vec::new(),
        })
    }

    /// 渲染一道题目
    ///
    /// # 参数
    /// - `question`: 题目数据
    /// - `number`: 题号（1 起始）
    ///
    /// 复合题型渲染题头 + 数据表格 + 子题；其余题型渲染题干 + 答案输入单元格
    pub fn render_question(&mut self, question: &Question, number: usize) -> Result<()> {
        if question.question_type.is_compound() {
            self.add_question_header(number, &question.question)?;

            match &question.data_table {
                Some(table) => self.add_data_table(table)?,
                None => {
                    // 复合题缺少数据表格时跳过该部分，只记录警告
                    warn!("题目 {} ({}) 缺少 data_table，跳过表格渲染", number, question.question_type);
                }
            }

            match &question.subquestions {
                Some(subs) => {
                    for sub in subs {
                        self.add_subquestion(sub, number)?;
                    }
                }
                None => {
                    warn!("题目 {} ({}) 缺少 subquestions，不产生答案单元格", number, question.question_type);
                }
            }
        } else {
            self.add_simple_question(question, number)?;
        }

        Ok(())
    }

    /// 结束布局，交出学生表和答案登记表
    ///
    /// 登记表的顺序即学生看到答案单元格的顺序
    pub fn finish(self) -> (Worksheet, Vec<AnswerRecord>) {
        (self.sheet, self.answer_records)
    }

    /// 插入空行改善排版
    fn add_spacing(&mut self, rows: u32) {
        self.current_row += rows;
    }

    /// 写入主题目题头（加粗）
    fn add_question_header(&mut self, number: usize, text: &str) -> Result<()> {
        self.add_spacing(1);

        self.sheet.write_string_with_format(
            self.current_row,
            QUESTION_COL,
            format!("{}. {}", number, text),
            &self.styles.question_header,
        )?;
        self.sheet.set_row_height(self.current_row, 20)?;

        self.current_row += 1;
        Ok(())
    }

    /// 写入数据表格：一行列标题 + M 行数据，带边框居中
    ///
    /// 表格本身不产生 AnswerRecord
    fn add_data_table(&mut self, table: &DataTable) -> Result<()> {
        self.add_spacing(1);

        for (i, header) in table.headers.iter().enumerate() {
            self.sheet.write_string_with_format(
                self.current_row,
                TABLE_START_COL + i as u16,
                header,
                &self.styles.table_header,
            )?;
        }
        self.current_row += 1;

        for row_data in &table.rows {
            for (i, value) in row_data.iter().enumerate() {
                self.write_table_value(self.current_row, TABLE_START_COL + i as u16, value)?;
            }
            self.current_row += 1;
        }

        self.add_spacing(1);
        Ok(())
    }

    /// 写入单个表格单元格，数字按数字写入，其余按文本写入
    fn write_table_value(&mut self, row: u32, col: u16, value: &serde_json::Value) -> Result<()> {
        match value {
            serde_json::Value::Number(n) => {
                if let Some(f) = n.as_f64() {
                    self.sheet
                        .write_number_with_format(row, col, f, &self.styles.table_cell)?;
                }
            }
            serde_json::Value::String(s) => {
                self.sheet
                    .write_string_with_format(row, col, s, &self.styles.table_cell)?;
            }
            other => {
                self.sheet.write_string_with_format(
                    row,
                    col,
                    other.to_string(),
                    &self.styles.table_cell,
                )?;
            }
        }
        Ok(())
    }

    /// 写入一个子题：子题题干 + 下一行 D 列的答案输入单元格
    ///
    /// # 返回
    /// 返回答案单元格地址，如 "D5"
    fn add_subquestion(&mut self, sub: &SubQuestion, number: usize) -> Result<String> {
        self.sheet.write_string_with_format(
            self.current_row,
            QUESTION_COL,
            format!("{}. {}", sub.part, sub.question),
            &self.styles.question_text,
        )?;

        let answer_row = self.current_row + 1;
        let address = cell_address(answer_row, SUB_ANSWER_COL);
        self.sheet
            .write_blank(answer_row, SUB_ANSWER_COL, &self.styles.answer_input)?;

        debug!("登记答案单元格: {}{} -> {}", number, sub.part, address);
        self.answer_records.push(AnswerRecord {
            question_id: format!("{}{}", number, sub.part),
            cell_address: address.clone(),
            correct_answer: sub.answer.clone(),
            tolerance: sub.tolerance,
            question_type: None,
        });

        self.current_row += 2;
        self.add_spacing(1);

        Ok(address)
    }

    /// 写入一个简单题：题干 + 下一行 C 列的答案输入单元格
    ///
    /// 选择类题型会给答案单元格附加下拉列表约束
    ///
    /// # 返回
    /// 返回答案单元格地址，如 "C4"
    fn add_simple_question(&mut self, question: &Question, number: usize) -> Result<String> {
        self.add_spacing(1);

        self.sheet.write_string_with_format(
            self.current_row,
            QUESTION_COL,
            format!("{}. {}", number, question.question),
            &self.styles.question_text,
        )?;
        self.current_row += 1;

        let answer_row = self.current_row;
        let address = cell_address(answer_row, SIMPLE_ANSWER_COL);
        self.sheet
            .write_blank(answer_row, SIMPLE_ANSWER_COL, &self.styles.answer_input)?;

        if let Some(options) = self.validation_options(question) {
            let validation = DataValidation::new().allow_list_strings(&options)?;
            self.sheet.add_data_validation(
                answer_row,
                SIMPLE_ANSWER_COL,
                answer_row,
                SIMPLE_ANSWER_COL,
                &validation,
            )?;
        }

        debug!("登记答案单元格: {} -> {}", number, address);
        self.answer_records.push(AnswerRecord {
            question_id: number.to_string(),
            cell_address: address.clone(),
            correct_answer: question.answer.clone().unwrap_or_default(),
            tolerance: question.tolerance,
            question_type: Some(question.question_type),
        });

        self.current_row += 1;
        self.add_spacing(1);

        Ok(address)
    }

    /// 选择类题型的下拉约束选项
    ///
    /// 判断题固定为 True/False，其余选择题取题目自带的选项（引号已清洗）
    fn validation_options(&self, question: &Question) -> Option<Vec<String>> {
        use crate::models::question::QuestionType;

        match question.question_type {
            QuestionType::TrueFalse => {
                Some(vec!["True".to_string(), "False".to_string()])
            }
            QuestionType::MultipleChoice | QuestionType::Dropdown => question
                .options
                .as_ref()
                .map(|options| escape_options(options)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::question::QuestionType;

    fn simple_question(qtype: QuestionType, answer: &str) -> Question {
        Question {
            question_type: qtype,
            question: "示例题干".to_string(),
            answer: Some(answer.to_string()),
            options: None,
            tolerance: None,
            data_table: None,
            subquestions: None,
        }
    }

    fn sample_table() -> DataTable {
        DataTable {
            headers: vec!["Year".to_string(), "GDP".to_string()],
            rows: vec![
                vec![serde_json::json!(2020), serde_json::json!(21.4)],
                vec![serde_json::json!(2021), serde_json::json!(23.3)],
            ],
        }
    }

    fn multipart_question() -> Question {
        Question {
            question_type: QuestionType::DataTable,
            question: "Analyze the data:".to_string(),
            answer: None,
            options: None,
            tolerance: None,
            data_table: Some(sample_table()),
            subquestions: Some(vec![
                SubQuestion {
                    part: "A".to_string(),
                    question: "Growth 2020-2021?".to_string(),
                    answer: "8.9".to_string(),
                    tolerance: Some(0.02),
                },
                SubQuestion {
                    part: "B".to_string(),
                    question: "Total GDP?".to_string(),
                    answer: "44.7".to_string(),
                    tolerance: None,
                },
            ]),
        }
    }

    fn render_all(questions: &[Question]) -> Vec<AnswerRecord> {
        let styles = StyleConfig::default();
        let mut layout = LayoutEngine::new("Test Exam", &styles).expect("创建布局引擎失败");
        for (i, q) in questions.iter().enumerate() {
            layout.render_question(q, i + 1).expect("渲染题目失败");
        }
        let (_sheet, records) = layout.finish();
        records
    }

    #[test]
    fn test_simple_question_registers_one_record() {
        let records = render_all(&[simple_question(QuestionType::Numerical, "42")]);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].question_id, "1");
        assert_eq!(records[0].cell_address, "C4");
        assert_eq!(records[0].correct_answer, "42");
        assert_eq!(records[0].question_type, Some(QuestionType::Numerical));
    }

    #[test]
    fn test_multipart_records_carry_part_suffix() {
        let records = render_all(&[multipart_question()]);

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].question_id, "1A");
        assert_eq!(records[1].question_id, "1B");
        // 子题不携带题目类型，评分时按数值题处理
        assert!(records[0].question_type.is_none());
        assert_eq!(records[0].effective_type(), QuestionType::Numerical);
        assert_eq!(records[0].tolerance, Some(0.02));
        // 子题答案单元格固定在 D 列
        assert!(records[0].cell_address.starts_with('D'));
        assert!(records[1].cell_address.starts_with('D'));
    }

    #[test]
    fn test_data_table_itself_contributes_no_records() {
        let mut question = multipart_question();
        question.subquestions = None;

        let records = render_all(&[question]);
        assert!(records.is_empty(), "数据表格本身不应产生答案记录");
    }

    #[test]
    fn test_data_table_advances_cursor_by_rows_plus_header() {
        // 同一个子题，带表格和不带表格各渲染一次，
        // 答案行号之差应等于 表格行数 + 标题行 + 间隔
        let with_table = render_all(&[multipart_question()]);

        let mut without = multipart_question();
        without.data_table = None;
        let without_table = render_all(&[without]);

        let row = |addr: &str| addr[1..].parse::<u32>().unwrap();
        let diff = row(&with_table[0].cell_address) - row(&without_table[0].cell_address);
        // 间隔 1 + 标题行 1 + 数据行 2 + 间隔 1
        assert_eq!(diff, 5);
    }

    #[test]
    fn test_addresses_unique_and_in_order() {
        let questions = vec![
            simple_question(QuestionType::Numerical, "1"),
            multipart_question(),
            simple_question(QuestionType::TrueFalse, "True"),
        ];
        let records = render_all(&questions);

        assert_eq!(records.len(), 4);
        assert_eq!(
            records.iter().map(|r| r.question_id.as_str()).collect::<Vec<_>>(),
            vec!["1", "2A", "2B", "3"]
        );

        // 地址唯一且行号严格递增
        let rows: Vec<u32> = records
            .iter()
            .map(|r| r.cell_address[1..].parse::<u32>().unwrap())
            .collect();
        for pair in rows.windows(2) {
            assert!(pair[0] < pair[1], "行游标必须只增不减");
        }

        let mut addresses: Vec<&str> = records.iter().map(|r| r.cell_address.as_str()).collect();
        addresses.sort();
        addresses.dedup();
        assert_eq!(addresses.len(), records.len(), "答案单元格地址必须唯一");
    }

    #[test]
    fn test_choice_question_with_quoted_options() {
        let mut question = simple_question(QuestionType::Dropdown, "Say 'yes'");
        question.options = Some(vec![
            "Say \"yes\"".to_string(),
            "Say \"no\"".to_string(),
        ]);

        // 选项内嵌引号不应导致渲染失败
        let records = render_all(&[question]);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].question_type, Some(QuestionType::Dropdown));
    }

    #[test]
    fn test_rendering_twice_yields_identical_registry() {
        let questions = vec![
            simple_question(QuestionType::Numerical, "3.14"),
            multipart_question(),
        ];

        let first = render_all(&questions);
        let second = render_all(&questions);
        assert_eq!(first, second, "相同输入必须产生相同的答案登记表");
    }
}
