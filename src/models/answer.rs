//! 答案单元格登记表数据模型
//!
//! 布局引擎每写入一个可填写的答案单元格就登记一条记录，
//! 评分表构建器按登记顺序逐条生成评分公式

use crate::models::question::QuestionType;

/// 一条答案单元格记录
///
/// 创建后不可变；`cell_address` 必须指向学生表中一个
/// 已经写入"可填写答案"样式的单元格
#[derive(Debug, Clone, PartialEq)]
pub struct AnswerRecord {
    /// 题目标识：题号 + 可选部分标号，如 "3" 或 "3A"
    pub question_id: String,
    /// 学生表内的单元格地址，如 "D5"
    pub cell_address: String,
    /// 正确答案原文
    pub correct_answer: String,
    /// 数值容差（小数形式）
    pub tolerance: Option<f64>,
    /// 题目类型；子题不携带类型，评分时按数值题处理
    pub question_type: Option<QuestionType>,
}

impl AnswerRecord {
    /// 评分时的有效题目类型（缺省按数值题处理）
    pub fn effective_type(&self) -> QuestionType {
        self.question_type.unwrap_or(QuestionType::Numerical)
    }
}
