use crate::clients::LlmClient;
use crate::config::Config;
use crate::error::AppError;
use crate::models::loaders::load_all_exam_files;
use crate::models::question::ExamPaper;
use crate::services::workbook_service::{output_filename, WorkbookService};
use crate::utils::logging::{log_exams_loaded, log_startup, print_final_stats, truncate_text};
use anyhow::Result;
use std::path::Path;
use tracing::{error, info, warn};

/// 应用主结构
pub struct App {
    config: Config,
    workbook_service: WorkbookService,
}

impl App {
    /// 初始化应用
    pub fn initialize(config: Config) -> Result<Self> {
        log_startup(&config.exams_folder, &config.output_folder);

        // 确保输出目录存在
        std::fs::create_dir_all(&config.output_folder)
            .map_err(|e| AppError::file_write_failed(&config.output_folder, e))?;

        Ok(Self {
            config,
            workbook_service: WorkbookService::new(),
        })
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> Result<()> {
        let papers = self.collect_papers().await?;

        if papers.is_empty() {
            warn!("⚠️ 没有找到待构建的试卷，程序结束");
            return Ok(());
        }

        log_exams_loaded(papers.len());

        let stats = self.build_all(&papers);

        print_final_stats(
            stats.success,
            stats.failed,
            stats.total,
            &self.config.output_folder,
        );

        Ok(())
    }

    /// 收集所有待构建的试卷：AI 生成（可选）+ 目录中的试卷文件
    async fn collect_papers(&self) -> Result<Vec<ExamPaper>> {
        let mut papers = Vec::new();

        if !self.config.generation_prompt.is_empty() {
            info!("🤖 正在调用 AI 出题...");
            let client = LlmClient::new(&self.config);
            let questions = client
                .generate_questions(&self.config.generation_prompt)
                .await?;
            info!("✓ AI 生成 {} 个题目", questions.len());
            papers.push(ExamPaper::new(
                &self.config.generated_exam_title,
                questions,
            ));
        }

        match load_all_exam_files(&self.config.exams_folder).await {
            Ok(loaded) => papers.extend(loaded),
            Err(e) => warn!("⚠️ 加载试卷目录失败: {}", e),
        }

        Ok(papers)
    }

    /// 逐份构建工作簿，单份失败不影响其余
    fn build_all(&self, papers: &[ExamPaper]) -> ProcessingStats {
        let mut stats = ProcessingStats {
            total: papers.len(),
            ..Default::default()
        };

        for (i, paper) in papers.iter().enumerate() {
            info!(
                "📄 [{}/{}] {}",
                i + 1,
                papers.len(),
                truncate_text(&paper.exam_title, 40)
            );

            let filename = output_filename(&paper.exam_title);
            let output_path = Path::new(&self.config.output_folder).join(filename);

            match self.workbook_service.build_workbook(paper, &output_path) {
                Ok(()) => stats.success += 1,
                Err(e) => {
                    error!("❌ 构建失败 ({}): {}", paper.exam_title, e);
                    stats.failed += 1;
                }
            }
        }

        stats
    }
}

/// 处理统计
#[derive(Debug, Default)]
struct ProcessingStats {
    success: usize,
    failed: usize,
    total: usize,
}
