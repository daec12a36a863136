/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    /// 试卷定义文件存放目录（.json / .toml）
    pub exams_folder: String,
    /// 工作簿输出目录
    pub output_folder: String,
    /// 生成提示词（非空时先调用 AI 生成一份试卷）
    pub generation_prompt: String,
    /// AI 生成的试卷标题
    pub generated_exam_title: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    // --- LLM 配置 ---
    pub llm_api_key: String,
    pub llm_api_base_url: String,
    pub llm_model_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            exams_folder: "exams".to_string(),
            output_folder: "output".to_string(),
            generation_prompt: String::new(),
            generated_exam_title: "Professional Exam".to_string(),
            verbose_logging: false,
            llm_api_key: String::new(),
            llm_api_base_url: "https://api.openai.com/v1".to_string(),
            llm_model_name: "gpt-4".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            exams_folder: std::env::var("EXAMS_FOLDER").unwrap_or(default.exams_folder),
            output_folder: std::env::var("OUTPUT_FOLDER").unwrap_or(default.output_folder),
            generation_prompt: std::env::var("GENERATION_PROMPT")
                .unwrap_or(default.generation_prompt),
            generated_exam_title: std::env::var("GENERATED_EXAM_TITLE")
                .unwrap_or(default.generated_exam_title),
            verbose_logging: std::env::var("VERBOSE_LOGGING")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.verbose_logging),
            llm_api_key: std::env::var("LLM_API_KEY").unwrap_or(default.llm_api_key),
            llm_api_base_url: std::env::var("LLM_API_BASE_URL")
                .unwrap_or(default.llm_api_base_url),
            llm_model_name: std::env::var("LLM_MODEL_NAME").unwrap_or(default.llm_model_name),
        }
    }
}
