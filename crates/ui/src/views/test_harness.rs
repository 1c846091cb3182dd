use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use quiz_core::model::{AnswerOption, ChapterDescriptor, ChapterId, Question, QuizSettings};
use services::{SessionController, SessionPhase};
use storage::InMemorySource;

use crate::app::QuizRoot;
use crate::bridge::UiBridge;
use crate::context::{UiApp, build_app_context};
use crate::quiz::QuizIntent;

struct TestApp {
    source: InMemorySource,
}

impl UiApp for TestApp {
    fn question_source(&self) -> Arc<dyn storage::QuestionSource> {
        Arc::new(self.source.clone())
    }

    fn settings(&self) -> QuizSettings {
        QuizSettings::default()
    }

    fn seed(&self) -> Option<u64> {
        Some(11)
    }
}

/// Lets tests drive the quiz the way view events would.
#[derive(Clone, Default)]
pub(crate) struct QuizTestHandles {
    dispatch: Rc<RefCell<Option<Callback<QuizIntent>>>>,
    controller: Rc<RefCell<Option<Signal<SessionController<UiBridge>>>>>,
}

impl QuizTestHandles {
    pub(crate) fn register(
        &self,
        dispatch: Callback<QuizIntent>,
        controller: Signal<SessionController<UiBridge>>,
    ) {
        *self.dispatch.borrow_mut() = Some(dispatch);
        *self.controller.borrow_mut() = Some(controller);
    }

    pub(crate) fn dispatch(&self) -> Callback<QuizIntent> {
        (*self.dispatch.borrow()).expect("quiz dispatch registered")
    }

    pub(crate) fn controller(&self) -> Signal<SessionController<UiBridge>> {
        (*self.controller.borrow()).expect("quiz controller registered")
    }
}

#[derive(Props, Clone)]
struct HarnessProps {
    app: Arc<TestApp>,
    handles: QuizTestHandles,
}

impl PartialEq for HarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn QuizHarness(props: HarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(app));
    use_context_provider(|| props.handles.clone());
    rsx! { QuizRoot {} }
}

pub(crate) struct ViewHarness {
    pub dom: VirtualDom,
    pub source: InMemorySource,
    pub handles: QuizTestHandles,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    pub async fn send(&mut self, intent: QuizIntent) {
        let dispatch = self.handles.dispatch();
        self.dom.in_runtime(|| dispatch.call(intent));
        // One pass renders the synchronous change, the next picks up spawned loads.
        self.drive_async().await;
        self.drive_async().await;
    }

    pub fn phase(&self) -> SessionPhase {
        let controller = self.handles.controller();
        self.dom.in_runtime(|| controller.peek().phase())
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub(crate) fn sample_source() -> InMemorySource {
    let chapter = |id: &str, title: &str, week: &str| ChapterDescriptor {
        id: ChapterId::new(id),
        title: title.into(),
        instructor: "Dr. Okafor".into(),
        date: "2024-10-07".into(),
        description: format!("{title} lecture"),
        question_count: 3,
        source_file: format!("week{id}.json"),
        week: Some(week.into()),
    };
    let bank = |topic: &str| -> Vec<Question> {
        (1..=3)
            .map(|i| {
                Question::new(
                    format!("{topic} question {i}"),
                    vec![
                        AnswerOption::new("<code>Box</code>", true)
                            .with_reason("heap allocation"),
                        AnswerOption::new("Rc", false),
                    ],
                )
            })
            .collect()
    };
    InMemorySource::new()
        .with_chapter(chapter("1", "Ownership", "Week 1"), bank("ownership"))
        .with_chapter(chapter("2", "Lifetimes", "Week 2"), bank("lifetimes"))
}

pub(crate) async fn setup_view_harness(source: InMemorySource) -> ViewHarness {
    let handles = QuizTestHandles::default();
    let dom = VirtualDom::new_with_props(
        QuizHarness,
        HarnessProps {
            app: Arc::new(TestApp {
                source: source.clone(),
            }),
            handles: handles.clone(),
        },
    );
    let mut harness = ViewHarness {
        dom,
        source,
        handles,
    };
    harness.rebuild();
    harness.drive_async().await;
    harness
}
