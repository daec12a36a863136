//! 试卷与题目数据模型
//!
//! 对应 AI 生成接口的 JSON 结构，同时支持从 TOML 文件反序列化

use serde::{Deserialize, Serialize};

/// 题目类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuestionType {
    /// 单选题
    #[serde(rename = "multiplechoice")]
    MultipleChoice,
    /// 下拉选择题
    #[serde(rename = "dropdown")]
    Dropdown,
    /// 判断题
    #[serde(rename = "truefalse")]
    TrueFalse,
    /// 数值计算题
    #[serde(rename = "numerical")]
    Numerical,
    /// 数据表格题（带子题）
    #[serde(rename = "data_table")]
    DataTable,
    /// 多部分题（带子题）
    #[serde(rename = "multipart")]
    MultiPart,
}

impl QuestionType {
    /// 是否为选择类题型（答案单元格需要附加下拉约束）
    pub fn is_choice(&self) -> bool {
        matches!(
            self,
            QuestionType::MultipleChoice | QuestionType::Dropdown | QuestionType::TrueFalse
        )
    }

    /// 是否为复合题型（题头 + 数据表格 + 子题）
    pub fn is_compound(&self) -> bool {
        matches!(self, QuestionType::DataTable | QuestionType::MultiPart)
    }
}

impl std::fmt::Display for QuestionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            QuestionType::MultipleChoice => "multiplechoice",
            QuestionType::Dropdown => "dropdown",
            QuestionType::TrueFalse => "truefalse",
            QuestionType::Numerical => "numerical",
            QuestionType::DataTable => "data_table",
            QuestionType::MultiPart => "multipart",
        };
        write!(f, "{}", name)
    }
}

/// 数据表格
///
/// `rows` 中的单元格按位置与 `headers` 对齐，数量不一致属于调用方错误，
/// 布局引擎不做校验
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataTable {
    /// 列标题
    pub headers: Vec<String>,
    /// 数据行，单元格可以是数字或字符串
    pub rows: Vec<Vec<serde_json::Value>>,
}

/// 子题
///
/// 隶属于一个复合题，自带答案和可选容差
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubQuestion {
    /// 部分标号，如 "A"、"B"
    pub part: String,
    /// 子题题干
    pub question: String,
    /// 正确答案
    pub answer: String,
    /// 数值容差（小数形式，0.02 = 2%）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tolerance: Option<f64>,
}

/// 题目
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    /// 题目类型
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    /// 题干
    pub question: String,
    /// 正确答案（简单题型）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
    /// 选项列表（选择类题型）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    /// 数值容差（小数形式，0.02 = 2%）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tolerance: Option<f64>,
    /// 数据表格（data_table 题型）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_table: Option<DataTable>,
    /// 子题列表（复合题型）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subquestions: Option<Vec<SubQuestion>>,
}

/// 一份试卷：标题 + 有序题目列表
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExamPaper {
    /// 试卷标题
    #[serde(default = "default_exam_title")]
    pub exam_title: String,
    /// 题目列表，按出题顺序排列
    pub questions: Vec<Question>,
    /// 来源文件路径（仅内部使用）
    #[serde(skip_serializing, skip_deserializing)]
    pub file_path: Option<String>,
}

fn default_exam_title() -> String {
    "Professional Exam".to_string()
}

impl ExamPaper {
    /// 从题目列表创建试卷
    pub fn new(exam_title: impl Into<String>, questions: Vec<Question>) -> Self {
        Self {
            exam_title: exam_title.into(),
            questions,
            file_path: None,
        }
    }

    /// 设置来源文件路径
    pub fn with_file_path(mut self, file_path: String) -> Self {
        self.file_path = Some(file_path);
        self
    }
}
