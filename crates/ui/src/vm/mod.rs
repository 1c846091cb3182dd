mod chapter_vm;
mod html;
mod question_vm;
mod results_vm;
mod time_fmt;

pub use chapter_vm::{AllChaptersCardVm, ChapterCardVm, ChapterListVm, map_chapter_list};
pub use html::sanitize_html;
pub use question_vm::{OptionVm, ProgressVm, QuestionVm, map_question};
pub use results_vm::{ResultsVm, ReviewRowVm, ReviewStatus, map_results};
pub use time_fmt::timer_label;
