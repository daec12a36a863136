use crate::error::{AppError, FileError};
use crate::models::question::ExamPaper;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;

/// 从单个试卷文件加载数据并转换为 ExamPaper 对象
///
/// 按扩展名区分格式：`.json`（AI 生成接口的原始格式）或 `.toml`（手工编写）
pub async fn load_exam_file(path: &Path) -> Result<ExamPaper> {
    let content = fs::read_to_string(path)
        .await
        .with_context(|| format!("无法读取试卷文件: {}", path.display()))?;

    let extension = path.extension().and_then(|s| s.to_str()).unwrap_or("");

    let paper: ExamPaper = match extension {
        "json" => serde_json::from_str(&content)
            .with_context(|| format!("无法解析JSON试卷文件: {}", path.display()))?,
        "toml" => toml::from_str(&content)
            .with_context(|| format!("无法解析TOML试卷文件: {}", path.display()))?,
        other => anyhow::bail!("不支持的试卷文件格式: .{} ({})", other, path.display()),
    };

    Ok(paper.with_file_path(path.to_string_lossy().to_string()))
}

/// 从文件夹中加载所有试卷文件并转换为 ExamPaper 对象列表
///
/// 单个文件加载失败只记录警告，不中断其余文件
pub async fn load_all_exam_files(folder_path: &str) -> Result<Vec<ExamPaper>> {
    let folder = PathBuf::from(folder_path);

    if !folder.exists() {
        return Err(AppError::File(FileError::DirectoryNotFound {
            path: folder_path.to_string(),
        })
        .into());
    }

    let mut papers = Vec::new();
    let mut entries = fs::read_dir(&folder)
        .await
        .with_context(|| format!("无法读取文件夹: {}", folder_path))?;

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        let extension = path.extension().and_then(|s| s.to_str());
        if extension != Some("json") && extension != Some("toml") {
            continue;
        }

        tracing::info!(
            "正在加载: {}",
            path.file_name().unwrap_or_default().to_string_lossy()
        );

        match load_exam_file(&path).await {
            Ok(paper) => {
                tracing::info!("成功加载 {} 个题目", paper.questions.len());
                papers.push(paper);
            }
            Err(e) => {
                tracing::warn!("加载文件失败 {}: {}", path.display(), e);
            }
        }
    }

    Ok(papers)
}
