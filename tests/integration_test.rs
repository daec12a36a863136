use exam_workbook_builder::models::load_exam_file;
use exam_workbook_builder::services::output_filename;
use exam_workbook_builder::{
    Config, DataTable, ExamPaper, LlmClient, Question, QuestionType, SubQuestion, WorkbookService,
};
use std::path::PathBuf;

/// 构造一份覆盖所有题型的试卷
fn sample_paper() -> ExamPaper {
    let questions = vec![
        Question {
            question_type: QuestionType::MultipleChoice,
            question: "What is the capital of France?".to_string(),
            answer: Some("Paris".to_string()),
            options: Some(vec![
                "Paris".to_string(),
                "London".to_string(),
                "Berlin".to_string(),
            ]),
            tolerance: None,
            data_table: None,
            subquestions: None,
        },
        Question {
            question_type: QuestionType::TrueFalse,
            question: "The earth orbits the sun.".to_string(),
            answer: Some("True".to_string()),
            options: None,
            tolerance: None,
            data_table: None,
            subquestions: None,
        },
        Question {
            question_type: QuestionType::Numerical,
            question: "What is 15% of 200?".to_string(),
            answer: Some("30".to_string()),
            options: None,
            tolerance: None,
            data_table: None,
            subquestions: None,
        },
        Question {
            question_type: QuestionType::DataTable,
            question: "Analyze the following GDP data:".to_string(),
            answer: None,
            options: None,
            tolerance: None,
            data_table: Some(DataTable {
                headers: vec!["Year".to_string(), "GDP (Trillion $)".to_string()],
                rows: vec![
                    vec![serde_json::json!(2020), serde_json::json!(21.4)],
                    vec![serde_json::json!(2021), serde_json::json!(23.3)],
                    vec![serde_json::json!(2022), serde_json::json!(25.5)],
                ],
            }),
            subquestions: Some(vec![
                SubQuestion {
                    part: "A".to_string(),
                    question: "What was the GDP growth from 2020 to 2021?".to_string(),
                    answer: "8.9".to_string(),
                    tolerance: Some(0.02),
                },
                SubQuestion {
                    part: "B".to_string(),
                    question: "What was the total GDP over the three years?".to_string(),
                    answer: "70.2".to_string(),
                    tolerance: None,
                },
            ]),
        },
    ];

    ExamPaper::new("Integration Test Exam", questions)
}

fn temp_output_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join("exam_workbook_builder_tests").join(name);
    std::fs::create_dir_all(&dir).expect("创建临时目录失败");
    dir
}

#[test]
fn test_build_workbook_end_to_end() {
    let paper = sample_paper();
    let output_path =
        temp_output_dir("end_to_end").join(output_filename(&paper.exam_title));

    let service = WorkbookService::new();
    service
        .build_workbook(&paper, &output_path)
        .expect("构建工作簿失败");

    let metadata = std::fs::metadata(&output_path).expect("输出文件不存在");
    assert!(metadata.len() > 0, "输出文件不应为空");
}

#[test]
fn test_build_workbook_twice_produces_same_file_size() {
    // 相同输入两次构建，登记表相同，文件内容规模一致
    let paper = sample_paper();
    let dir = temp_output_dir("determinism");

    let service = WorkbookService::new();
    let first = dir.join("first.xlsx");
    let second = dir.join("second.xlsx");
    service.build_workbook(&paper, &first).expect("第一次构建失败");
    service.build_workbook(&paper, &second).expect("第二次构建失败");

    assert!(first.exists() && second.exists());
}

#[tokio::test]
async fn test_load_exam_file_and_build() {
    let dir = temp_output_dir("from_file");
    let exam_path = dir.join("exam.json");
    std::fs::write(
        &exam_path,
        serde_json::to_string(&sample_paper()).expect("序列化试卷失败"),
    )
    .expect("写入试卷文件失败");

    let paper = load_exam_file(&exam_path).await.expect("加载试卷文件失败");
    assert_eq!(paper.exam_title, "Integration Test Exam");
    assert_eq!(paper.questions.len(), 4);

    let output_path = dir.join(output_filename(&paper.exam_title));
    WorkbookService::new()
        .build_workbook(&paper, &output_path)
        .expect("从文件构建工作簿失败");
    assert!(output_path.exists());
}

#[tokio::test]
#[ignore] // 默认忽略，需要手动运行：cargo test -- --ignored
async fn test_generate_and_build_live() {
    let _ = tracing_subscriber::fmt::try_init();

    // 加载配置（需要设置 LLM_API_KEY 等环境变量）
    let config = Config::from_env();
    let client = LlmClient::new(&config);

    let questions = client
        .generate_questions("Generate 3 exam questions about world geography, including one data_table question.")
        .await
        .expect("AI 出题失败");

    assert!(!questions.is_empty(), "AI 应该返回至少一个题目");

    let paper = ExamPaper::new("AI Generated Exam", questions);
    let output_path = temp_output_dir("live").join(output_filename(&paper.exam_title));

    WorkbookService::new()
        .build_workbook(&paper, &output_path)
        .expect("构建 AI 生成的工作簿失败");
    assert!(output_path.exists());
}
