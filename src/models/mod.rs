pub mod answer;
pub mod loaders;
pub mod question;

pub use answer::AnswerRecord;
pub use loaders::{load_all_exam_files, load_exam_file};
pub use question::{DataTable, ExamPaper, Question, QuestionType, SubQuestion};
