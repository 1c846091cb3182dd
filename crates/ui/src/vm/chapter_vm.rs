use quiz_core::model::{ChapterDescriptor, ChapterId};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChapterCardVm {
    pub id: ChapterId,
    pub badge: Option<String>,
    pub title: String,
    pub instructor: String,
    pub date: String,
    pub description: String,
    pub question_count_label: String,
}

/// The synthetic "All chapters" card shown after the catalog entries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AllChaptersCardVm {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub description: &'static str,
    pub question_count_label: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChapterListVm {
    pub cards: Vec<ChapterCardVm>,
    pub all_chapters: AllChaptersCardVm,
}

impl ChapterListVm {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

fn count_label(count: usize) -> String {
    if count == 1 {
        "1 question".to_string()
    } else {
        format!("{count} questions")
    }
}

#[must_use]
pub fn map_chapter_list(chapters: &[ChapterDescriptor], all_chapters_sample: usize) -> ChapterListVm {
    let cards = chapters
        .iter()
        .map(|chapter| ChapterCardVm {
            id: chapter.id.clone(),
            badge: chapter
                .week
                .as_deref()
                .map(str::trim)
                .filter(|week| !week.is_empty())
                .map(str::to_owned),
            title: chapter.title.clone(),
            instructor: chapter.instructor.clone(),
            date: chapter.date.clone(),
            description: chapter.description.clone(),
            question_count_label: count_label(chapter.question_count as usize),
        })
        .collect();

    ChapterListVm {
        cards,
        all_chapters: AllChaptersCardVm {
            title: "All chapters",
            subtitle: "All weeks",
            description: "Random questions drawn from every chapter",
            question_count_label: count_label(all_chapters_sample),
        },
    }
}
