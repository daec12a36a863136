//! LLM 出题客户端 - 业务能力层
//!
//! 只负责"让 AI 出题"能力，不关心流程
//!
//! ## 技术栈
//! - 使用 `async-openai` crate 进行 API 调用
//! - 支持自定义 API 端点和模型
//! - 兼容 OpenAI API 的服务

use anyhow::Result;
use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
    },
    Client,
};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{AppError, LlmError};
use crate::models::question::Question;
use crate::utils::logging::truncate_text;

/// 出题用的系统提示词，约定返回的 JSON 结构
const GENERATION_SYSTEM_PROMPT: &str = r#"You are an AI that generates sophisticated exam questions with data tables.

IMPORTANT: Return ONLY valid JSON. No markdown, no explanations, no extra text.

For BULK requests (multiple questions), return a JSON ARRAY like this:
[
 {
   "type": "data_table",
   "question": "Analyze the following GDP data:",
   "data_table": {
     "headers": ["Year", "GDP (Trillion $)"],
     "rows": [
       [2020, 21.4],
       [2021, 23.3],
       [2022, 25.5]
     ]
   },
   "subquestions": [
     {"part": "A", "question": "What was the GDP growth from 2020 to 2021?", "answer": "8.9", "tolerance": 0.02}
   ]
  }
]

Other supported types: "multiplechoice", "dropdown", "truefalse", "numerical", "multipart".
Simple types carry "question", "answer" and (for choice types) "options".

- Make subquestions that require actual calculation
- Return ONLY the JSON, nothing else"#;

/// AI 返回的题目：单个对象或数组都可接受
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum GeneratedQuestions {
    Single(Box<Question>),
    Multiple(Vec<Question>),
}

impl From<GeneratedQuestions> for Vec<Question> {
    fn from(generated: GeneratedQuestions) -> Self {
        match generated {
            GeneratedQuestions::Single(q) => vec![*q],
            GeneratedQuestions::Multiple(qs) => qs,
        }
    }
}

/// LLM 出题客户端
pub struct LlmClient {
    client: Client<OpenAIConfig>,
    model_name: String,
}

impl LlmClient {
    /// 创建新的 LLM 客户端
    pub fn new(config: &Config) -> Self {
        // 配置 OpenAI 客户端（兼容 OpenAI API 的服务）
        let openai_config = OpenAIConfig::new()
            .with_api_key(&config.llm_api_key)
            .with_api_base(&config.llm_api_base_url);

        let client = Client::with_config(openai_config);

        Self {
            client,
            model_name: config.llm_model_name.clone(),
        }
    }

    /// 根据自由文本提示词生成题目列表
    ///
    /// 单次调用，不重试；AI 返回的 JSON 清洗后仍无法解析时
    /// 原样携带解析错误文本向上报错
    ///
    /// # 参数
    /// - `prompt`: 出题提示词
    ///
    /// # 返回
    /// 返回按顺序排列的题目列表
    pub async fn generate_questions(&self, prompt: &str) -> Result<Vec<Question>> {
        let raw = self
            .send_to_llm(prompt, Some(GENERATION_SYSTEM_PROMPT))
            .await?;

        debug!("LLM 原始响应长度: {} 字符", raw.len());

        let questions = parse_questions(&raw)?;
        debug!("解析出 {} 个题目", questions.len());

        Ok(questions)
    }

    /// 通用的 LLM 调用函数
    ///
    /// # 参数
    /// - `user_message`: 用户消息内容
    /// - `system_message`: 系统消息（可选）
    ///
    /// # 返回
    /// 返回 LLM 的响应内容（字符串）
    pub async fn send_to_llm(
        &self,
        user_message: &str,
        system_message: Option<&str>,
    ) -> Result<String> {
        debug!("调用 LLM API，模型: {}", self.model_name);
        debug!("用户消息长度: {} 字符", user_message.len());

        // 构建消息列表
        let mut messages = Vec::new();

        // 添加系统消息（如果提供）
        if let Some(sys_msg) = system_message {
            let system_msg = ChatCompletionRequestSystemMessageArgs::default()
                .content(sys_msg)
                .build()?;
            messages.push(ChatCompletionRequestMessage::System(system_msg));
        }

        let user_msg = ChatCompletionRequestUserMessageArgs::default()
            .content(user_message)
            .build()?;
        messages.push(ChatCompletionRequestMessage::User(user_msg));

        // 构建请求
        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model_name)
            .messages(messages)
            .temperature(0.7)
            .max_tokens(2000u32)
            .build()?;

        // 调用 API
        let response = self.client.chat().create(request).await.map_err(|e| {
            warn!("LLM API 调用失败: {}", e);
            AppError::llm_api_failed(&self.model_name, e)
        })?;

        debug!("LLM API 调用成功");

        // 提取响应内容
        let content = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .ok_or_else(|| {
                AppError::Llm(LlmError::EmptyContent {
                    model: self.model_name.clone(),
                })
            })?;

        Ok(content.trim().to_string())
    }
}

/// 从 LLM 原始响应中解析题目列表
///
/// 先做尽力而为的清洗（剥掉代码围栏和 JSON 之外的文字），
/// 清洗后仍解析失败则携带解析错误文本报错，不重试不修补
pub(crate) fn parse_questions(raw: &str) -> Result<Vec<Question>> {
    let payload = extract_json_payload(raw);

    let generated: GeneratedQuestions = serde_json::from_str(&payload).map_err(|e| {
        AppError::Llm(LlmError::InvalidJson {
            message: e.to_string(),
            payload_preview: truncate_text(&payload, 200),
        })
    })?;

    Ok(generated.into())
}

/// 尽力而为地从响应文本中抠出 JSON 部分
///
/// 1. 若包含 ``` 代码围栏，取第一个围栏内的内容（允许 "json" 语言标记）
/// 2. 截取第一个 `{` 或 `[` 到最后一个 `}` 或 `]` 之间的内容
///
/// 找不到 JSON 定界符时原样返回，交给解析器报错
pub(crate) fn extract_json_payload(raw: &str) -> String {
    let mut cleaned = raw.trim().to_string();

    if cleaned.contains("```") {
        let parts: Vec<&str> = cleaned.split("```").collect();
        if parts.len() >= 3 {
            let mut inner = parts[1].trim();
            if let Some(stripped) = inner.strip_prefix("json") {
                inner = stripped.trim();
            }
            cleaned = inner.to_string();
        }
    }

    let start = cleaned.find(['{', '[']);
    let end = cleaned.rfind(['}', ']']);

    match (start, end) {
        (Some(s), Some(e)) if e >= s => cleaned[s..=e].to_string(),
        _ => cleaned,
    }
}
