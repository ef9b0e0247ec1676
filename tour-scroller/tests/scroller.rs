use anyhow::{Result, anyhow};
use async_trait::async_trait;
use std::collections::HashMap;
use std::io::Write;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::Instant;
use tour_common::TourError;
use tour_scroller::{
    ScrollBehavior, ScrollBlock, ScrollHost, ScrollOptions, SectionId, SequentialScroller,
    StepOutcome,
};

/// In-memory document: selectors map to the vertical offset of their start edge.
struct FakeDocument {
    offsets: HashMap<String, u64>,
    broken: Option<String>,
    started: Instant,
    viewport_top: Mutex<u64>,
    lookups: Mutex<Vec<(String, Duration)>>,
    scrolls: Mutex<Vec<(String, ScrollOptions, Duration)>>,
}

impl FakeDocument {
    fn with_sections(sections: &[(&str, u64)]) -> Self {
        Self {
            offsets: sections
                .iter()
                .map(|(s, off)| (s.to_string(), *off))
                .collect(),
            broken: None,
            started: Instant::now(),
            viewport_top: Mutex::new(0),
            lookups: Mutex::new(Vec::new()),
            scrolls: Mutex::new(Vec::new()),
        }
    }

    fn all_five() -> Self {
        Self::with_sections(&[
            ("#profile", 0),
            ("#career", 800),
            ("#experience", 1600),
            ("#coaching-experience", 2400),
            ("#qualifications", 3200),
        ])
    }

    fn scrolled_selectors(&self) -> Vec<String> {
        self.scrolls
            .lock()
            .unwrap()
            .iter()
            .map(|(s, _, _)| s.clone())
            .collect()
    }

    fn lookup_times(&self) -> Vec<Duration> {
        self.lookups.lock().unwrap().iter().map(|(_, t)| *t).collect()
    }

    fn viewport_top(&self) -> u64 {
        *self.viewport_top.lock().unwrap()
    }
}

#[async_trait]
impl ScrollHost for FakeDocument {
    type Element = String;

    async fn query_selector(&self, section: &SectionId) -> Result<Option<String>> {
        if self.broken.as_deref() == Some(section.as_str()) {
            return Err(anyhow!("session deleted"));
        }
        self.lookups
            .lock()
            .unwrap()
            .push((section.to_string(), self.started.elapsed()));
        Ok(self
            .offsets
            .contains_key(section.as_str())
            .then(|| section.to_string()))
    }

    async fn scroll_into_view(&self, element: &String, options: ScrollOptions) -> Result<()> {
        if options.block == ScrollBlock::Start {
            *self.viewport_top.lock().unwrap() = self.offsets[element];
        }
        self.scrolls
            .lock()
            .unwrap()
            .push((element.clone(), options, self.started.elapsed()));
        Ok(())
    }
}

/// Buffer the fmt subscriber writes formatted events into.
#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl LogBuffer {
    fn lines(&self) -> Vec<String> {
        String::from_utf8(self.0.lock().unwrap().clone())
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }
}

/// Run `scroller` against `doc` with a TRACE-level subscriber scoped to this thread.
async fn run_capturing_logs(scroller: &SequentialScroller, doc: &FakeDocument) -> Vec<String> {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_ansi(false)
        .without_time()
        .with_writer(move || writer.clone())
        .finish();

    let _guard = tracing::subscriber::set_default(subscriber);
    scroller.run(doc).await.unwrap();
    buffer.lines()
}

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

#[tokio::test(start_paused = true)]
async fn visits_all_present_sections_in_order() {
    let doc = FakeDocument::all_five();
    let scroller = SequentialScroller::new(SectionId::defaults(), ms(1000));

    let report = scroller.run(&doc).await.unwrap();

    assert_eq!(
        doc.scrolled_selectors(),
        vec![
            "#profile",
            "#career",
            "#experience",
            "#coaching-experience",
            "#qualifications"
        ]
    );
    assert_eq!(report.scrolled(), 5);
    assert_eq!(report.skipped(), 0);
    assert_eq!(report.elapsed, ms(5000));

    let times: Vec<Duration> = doc.scrolls.lock().unwrap().iter().map(|(_, _, t)| *t).collect();
    assert_eq!(times, vec![ms(0), ms(1000), ms(2000), ms(3000), ms(4000)]);
}

#[tokio::test(start_paused = true)]
async fn scroll_requests_are_smooth_and_start_aligned() {
    let doc = FakeDocument::all_five();
    SequentialScroller::default().run(&doc).await.unwrap();

    for (_, options, _) in doc.scrolls.lock().unwrap().iter() {
        assert_eq!(options.behavior, ScrollBehavior::Smooth);
        assert_eq!(options.block, ScrollBlock::Start);
    }
}

#[tokio::test(start_paused = true)]
async fn missing_section_still_costs_a_full_step() {
    let doc = FakeDocument::with_sections(&[
        ("#profile", 0),
        ("#experience", 1600),
        ("#coaching-experience", 2400),
        ("#qualifications", 3200),
    ]);
    let scroller = SequentialScroller::new(SectionId::defaults(), ms(1000));

    let report = scroller.run(&doc).await.unwrap();

    assert_eq!(
        doc.scrolled_selectors(),
        vec![
            "#profile",
            "#experience",
            "#coaching-experience",
            "#qualifications"
        ]
    );
    assert_eq!(
        report.steps[1],
        StepOutcome::Skipped(SectionId::new("#career").unwrap())
    );
    let visited: Vec<&str> = report.steps.iter().map(|s| s.section().as_str()).collect();
    assert_eq!(visited, tour_scroller::section::DEFAULT_SECTIONS);
    // `#experience` is looked up only after the pause that follows `#career`.
    assert_eq!(
        doc.lookup_times(),
        vec![ms(0), ms(1000), ms(2000), ms(3000), ms(4000)]
    );
    assert_eq!(report.elapsed, ms(5000));
}

#[tokio::test(start_paused = true)]
async fn duration_does_not_depend_on_how_many_resolve() {
    let empty = FakeDocument::with_sections(&[]);
    let scroller = SequentialScroller::new(SectionId::defaults(), ms(250));

    let report = scroller.run(&empty).await.unwrap();

    assert!(empty.scrolled_selectors().is_empty());
    assert_eq!(report.skipped(), 5);
    assert_eq!(report.elapsed, scroller.expected_duration());
    assert_eq!(empty.viewport_top(), 0);
}

#[tokio::test(start_paused = true)]
async fn each_step_leaves_its_section_at_viewport_start() {
    let doc = FakeDocument::all_five();
    let scroller = SequentialScroller::new(SectionId::defaults(), ms(1000));

    let run = scroller.run(&doc);
    tokio::pin!(run);

    let expected = [0, 800, 1600, 2400, 3200];
    for (step, offset) in expected.iter().enumerate() {
        let deadline = Instant::now() + ms(999);
        tokio::select! {
            _ = &mut run => panic!("run finished early at step {step}"),
            _ = tokio::time::sleep_until(deadline) => {}
        }
        assert_eq!(doc.viewport_top(), *offset, "step {step}");
        tokio::select! {
            _ = &mut run => {}
            _ = tokio::time::sleep(ms(1)) => {}
        }
    }
}

#[tokio::test(start_paused = true)]
async fn running_twice_ends_at_the_same_place() {
    let doc = FakeDocument::all_five();
    let scroller = SequentialScroller::new(SectionId::defaults(), ms(100));

    let first = scroller.run(&doc).await.unwrap();
    let after_first = doc.viewport_top();
    let second = scroller.run(&doc).await.unwrap();

    assert_eq!(after_first, 3200);
    assert_eq!(doc.viewport_top(), after_first);
    assert_eq!(first.steps, second.steps);
}

#[tokio::test(start_paused = true)]
async fn empty_section_list_is_a_no_op() {
    let doc = FakeDocument::all_five();
    let report = SequentialScroller::new(Vec::new(), ms(1000))
        .run(&doc)
        .await
        .unwrap();

    assert!(report.steps.is_empty());
    assert_eq!(report.elapsed, Duration::ZERO);
    assert!(doc.lookup_times().is_empty());
}

#[tokio::test(start_paused = true)]
async fn host_failure_abandons_remaining_steps() {
    let mut doc = FakeDocument::all_five();
    doc.broken = Some("#experience".to_string());
    let scroller = SequentialScroller::new(SectionId::defaults(), ms(1000));

    let err = scroller.run(&doc).await.unwrap_err();

    assert!(matches!(err, TourError::Host(_)));
    assert_eq!(doc.scrolled_selectors(), vec!["#profile", "#career"]);
}

#[tokio::test(start_paused = true)]
async fn custom_options_are_forwarded() {
    let doc = FakeDocument::all_five();
    let options = ScrollOptions {
        behavior: ScrollBehavior::Instant,
        block: ScrollBlock::Center,
    };
    let scroller = SequentialScroller::new(SectionId::parse_list(["#career"]).unwrap(), ms(10))
        .with_options(options);

    scroller.run(&doc).await.unwrap();

    let scrolls = doc.scrolls.lock().unwrap();
    assert_eq!(scrolls.len(), 1);
    assert_eq!(scrolls[0].1, options);
}

#[test]
fn scroll_options_serialize_as_dom_dictionary() {
    let json = serde_json::to_value(ScrollOptions::default()).unwrap();
    assert_eq!(
        json,
        serde_json::json!({ "behavior": "smooth", "block": "start" })
    );
}

#[tokio::test(start_paused = true)]
async fn skipped_sections_emit_no_log_events() {
    let doc = FakeDocument::with_sections(&[]);
    let scroller = SequentialScroller::new(SectionId::defaults(), ms(1000));

    let lines = run_capturing_logs(&scroller, &doc).await;

    assert_eq!(lines.len(), 2, "{lines:#?}");
    assert!(lines[0].contains("tour.scroller: starting section tour"));
    assert!(lines[1].contains("tour.scroller: section tour finished"));
    assert!(lines[1].contains("skipped=5"));
    for section in SectionId::defaults() {
        assert!(
            lines.iter().all(|l| !l.contains(section.as_str())),
            "{section} appeared in {lines:#?}"
        );
    }
}

#[tokio::test(start_paused = true)]
async fn each_scrolled_section_emits_one_debug_event() {
    let doc = FakeDocument::with_sections(&[("#profile", 0), ("#experience", 1600)]);
    let scroller = SequentialScroller::new(SectionId::defaults(), ms(1000));

    let lines = run_capturing_logs(&scroller, &doc).await;

    let scrolled: Vec<&String> = lines
        .iter()
        .filter(|l| l.contains("scrolled section into view"))
        .collect();
    assert_eq!(scrolled.len(), 2, "{lines:#?}");
    assert!(scrolled[0].contains("DEBUG tour.scroller"));
    assert!(scrolled[0].contains("section=#profile"));
    assert!(scrolled[1].contains("section=#experience"));
    assert_eq!(lines.len(), 4, "{lines:#?}");
    assert!(lines.iter().all(|l| !l.contains("#career")));
}
