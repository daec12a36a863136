//! 工作簿样式配置
//!
//! 一份不可变的样式集合，在构建时传入布局引擎和评分表构建器，
//! 避免进程级的可变样式状态

use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder};

/// 边框颜色
const BORDER_COLOR: Color = Color::RGB(0xCCCCCC);

/// 工作簿样式集合
#[derive(Debug, Clone)]
pub struct StyleConfig {
    /// 试卷标题（B1 单元格）
    pub title: Format,
    /// 主题目题头（加粗）
    pub question_header: Format,
    /// 题干正文
    pub question_text: Format,
    /// 数据表格列标题
    pub table_header: Format,
    /// 数据表格数据单元格
    pub table_cell: Format,
    /// 学生可填写的答案输入单元格
    pub answer_input: Format,
    /// 学生表空白区域的白色底色
    pub white: Format,
    /// 评分表表头
    pub grading_header: Format,
    /// 评分表题目标识列
    pub grading_id: Format,
    /// 评分表普通单元格
    pub grading_cell: Format,
    /// 总分标签
    pub total_label: Format,
    /// 总分数值单元格
    pub total_value: Format,
}

impl Default for StyleConfig {
    fn default() -> Self {
        let thin_border = |f: Format| f.set_border(FormatBorder::Thin).set_border_color(BORDER_COLOR);

        Self {
            title: Format::new()
                .set_bold()
                .set_font_size(14)
                .set_font_color(Color::RGB(0x1F4E79))
                .set_align(FormatAlign::Center)
                .set_align(FormatAlign::VerticalCenter)
                .set_background_color(Color::White),
            question_header: Format::new()
                .set_bold()
                .set_font_size(11)
                .set_align(FormatAlign::Left)
                .set_align(FormatAlign::Top)
                .set_text_wrap()
                .set_background_color(Color::White),
            question_text: Format::new()
                .set_font_size(11)
                .set_font_color(Color::RGB(0x2F2F2F))
                .set_align(FormatAlign::Left)
                .set_align(FormatAlign::Top)
                .set_text_wrap()
                .set_background_color(Color::White),
            table_header: thin_border(
                Format::new()
                    .set_bold()
                    .set_font_size(11)
                    .set_align(FormatAlign::Center)
                    .set_align(FormatAlign::VerticalCenter)
                    .set_background_color(Color::RGB(0xE8F4FD)),
            ),
            table_cell: thin_border(
                Format::new()
                    .set_align(FormatAlign::Center)
                    .set_align(FormatAlign::VerticalCenter)
                    .set_text_wrap()
                    .set_background_color(Color::RGB(0xF8F9FA)),
            ),
            answer_input: thin_border(
                Format::new()
                    .set_align(FormatAlign::Center)
                    .set_align(FormatAlign::VerticalCenter)
                    .set_background_color(Color::RGB(0xFFFEE9)),
            ),
            white: Format::new().set_background_color(Color::White),
            grading_header: thin_border(
                Format::new()
                    .set_bold()
                    .set_font_size(11)
                    .set_align(FormatAlign::Center)
                    .set_align(FormatAlign::VerticalCenter)
                    .set_background_color(Color::RGB(0xE8F4FD)),
            ),
            grading_id: thin_border(
                Format::new()
                    .set_bold()
                    .set_font_size(11)
                    .set_align(FormatAlign::Center)
                    .set_align(FormatAlign::VerticalCenter),
            ),
            grading_cell: thin_border(
                Format::new()
                    .set_align(FormatAlign::Center)
                    .set_align(FormatAlign::VerticalCenter),
            ),
            total_label: Format::new()
                .set_bold()
                .set_font_size(11)
                .set_align(FormatAlign::Center)
                .set_align(FormatAlign::VerticalCenter),
            total_value: thin_border(
                Format::new()
                    .set_bold()
                    .set_font_size(11)
                    .set_align(FormatAlign::Center)
                    .set_align(FormatAlign::VerticalCenter),
            ),
        }
    }
}
