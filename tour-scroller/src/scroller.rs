use crate::host::{ScrollHost, ScrollOptions};
use crate::section::SectionId;
use std::time::Duration;
use tokio::time::{Instant, sleep};
use tour_common::Result;
use tracing::{debug, info};

/// Delay between sections when none is configured.
pub const DEFAULT_STEP_DELAY: Duration = Duration::from_millis(1000);

/// What happened to a single section during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// The section resolved and a scroll was requested.
    Scrolled(SectionId),
    /// Nothing matched the selector.
    Skipped(SectionId),
}

impl StepOutcome {
    pub fn section(&self) -> &SectionId {
        match self {
            StepOutcome::Scrolled(id) | StepOutcome::Skipped(id) => id,
        }
    }
}

/// Ordered outcomes of one completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TourReport {
    pub steps: Vec<StepOutcome>,
    pub elapsed: Duration,
}

impl TourReport {
    pub fn scrolled(&self) -> usize {
        self.steps
            .iter()
            .filter(|s| matches!(s, StepOutcome::Scrolled(_)))
            .count()
    }

    pub fn skipped(&self) -> usize {
        self.steps.len() - self.scrolled()
    }
}

/// Visits an ordered list of sections, scrolling each into view and pausing
/// a fixed delay after every step.
///
/// Steps run strictly one after another. A section that does not resolve
/// costs the same delay as one that does.
#[derive(Debug, Clone)]
pub struct SequentialScroller {
    sections: Vec<SectionId>,
    delay: Duration,
    options: ScrollOptions,
}

impl Default for SequentialScroller {
    fn default() -> Self {
        Self::new(SectionId::defaults(), DEFAULT_STEP_DELAY)
    }
}

impl SequentialScroller {
    /// Scroller with smooth, start-aligned scrolling.
    pub fn new(sections: Vec<SectionId>, delay: Duration) -> Self {
        Self {
            sections,
            delay,
            options: ScrollOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ScrollOptions) -> Self {
        self.options = options;
        self
    }

    pub fn sections(&self) -> &[SectionId] {
        &self.sections
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn options(&self) -> ScrollOptions {
        self.options
    }

    /// Wall-clock time of a full run, ignoring host latency.
    pub fn expected_duration(&self) -> Duration {
        self.delay * self.sections.len() as u32
    }

    /// Run the tour once against `host`.
    ///
    /// Missing sections are skipped without an error or log event. A host
    /// failure aborts the remaining steps and is returned as
    /// [`tour_common::TourError::Host`].
    pub async fn run<H: ScrollHost + ?Sized>(&self, host: &H) -> Result<TourReport> {
        let started = Instant::now();
        info!(
            target: "tour.scroller",
            sections = self.sections.len(),
            delay_ms = self.delay.as_millis() as u64,
            "starting section tour"
        );

        let mut steps = Vec::with_capacity(self.sections.len());
        for (index, section) in self.sections.iter().enumerate() {
            let outcome = match host.query_selector(section).await? {
                Some(element) => {
                    host.scroll_into_view(&element, self.options).await?;
                    debug!(target: "tour.scroller", index, %section, "scrolled section into view");
                    StepOutcome::Scrolled(section.clone())
                }
                None => StepOutcome::Skipped(section.clone()),
            };
            steps.push(outcome);
            sleep(self.delay).await;
        }

        let report = TourReport {
            steps,
            elapsed: started.elapsed(),
        };
        info!(
            target: "tour.scroller",
            scrolled = report.scrolled(),
            skipped = report.skipped(),
            elapsed_ms = report.elapsed.as_millis() as u64,
            "section tour finished"
        );
        Ok(report)
    }
}
