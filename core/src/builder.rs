//! Configuration builder.
//!
//! Owns the ordered question sets and the scalar paper fields, keeps the
//! running total honest, and turns the whole thing into a generation request
//! scoped to an upload session.
//!
//! ```text
//! Building ──submit──▶ Validating ──violation──▶ Blocked ──▶ Building
//!                          │
//!                          └──ok──▶ Submitting ──▶ Succeeded
//!                                        └──failure──▶ Building
//! ```

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::{ClientConfig, GENERATION_REDIRECT_DELAY_MS};
use crate::error::{ConfigError, ConfigResult, SubmitError, MARKS_TOLERANCE};
use crate::host::{Clock, Host, NotificationKind, Shell, Transport};
use crate::progress::GENERATION_PROGRESS;
use crate::protocol::{Form, PreparedRequest, ServerReply};
use crate::question::{QuestionConfig, QuestionSet, QuestionSetSpec, QuestionSetUpdate};

/// Target marks offered on page load.
pub const DEFAULT_TARGET_MARKS: u32 = 100;

/// Difficulty offered on page load.
pub const DEFAULT_DIFFICULTY: u32 = 5;

// =============================================================================
// Session identifier
// =============================================================================

/// Opaque token minted by the upload endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(String);

impl SessionId {
    /// Read the identifier from page state; absent or empty means no session.
    pub fn from_page(raw: Option<&str>) -> Option<Self> {
        raw.filter(|s| !s.is_empty()).map(|s| Self(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// =============================================================================
// Totals
// =============================================================================

/// Running total vs target, for the pass/fail indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TotalCheck {
    pub total: u32,
    pub target: u32,
    pub within_tolerance: bool,
}

/// `|total - target| <= 5`.
pub fn within_tolerance(total: u32, target: u32) -> bool {
    total.abs_diff(target) <= MARKS_TOLERANCE
}

// =============================================================================
// Builder
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuilderPhase {
    Building,
    Submitting,
    Succeeded,
}

/// Paper configuration as stored on disk by the CLI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaperDraft {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default = "default_target")]
    pub total_marks: u32,
    #[serde(default = "default_difficulty")]
    pub difficulty: u32,
    #[serde(default)]
    pub priority_topics: Vec<String>,
    #[serde(default)]
    pub instructions: String,
    pub question_sets: Vec<QuestionSetSpec>,
}

fn default_target() -> u32 {
    DEFAULT_TARGET_MARKS
}

fn default_difficulty() -> u32 {
    DEFAULT_DIFFICULTY
}

/// In-memory configuration state for one configure page.
#[derive(Debug, Clone)]
pub struct ConfigurationBuilder {
    sets: Vec<QuestionSet>,
    next_id: u32,
    title: String,
    subject: String,
    target_marks: u32,
    difficulty: u32,
    priority_topics: Vec<String>,
    available_topics: Vec<String>,
    instructions: String,
    phase: BuilderPhase,
}

impl Default for ConfigurationBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigurationBuilder {
    /// Fresh builder holding one default question set.
    pub fn new() -> Self {
        let mut builder = Self {
            sets: Vec::new(),
            next_id: 0,
            title: String::new(),
            subject: String::new(),
            target_marks: DEFAULT_TARGET_MARKS,
            difficulty: DEFAULT_DIFFICULTY,
            priority_topics: Vec::new(),
            available_topics: Vec::new(),
            instructions: String::new(),
            phase: BuilderPhase::Building,
        };
        builder.add_question_set();
        builder
    }

    /// Builder pre-filled from a saved draft.
    pub fn from_draft(draft: &PaperDraft) -> ConfigResult<Self> {
        let mut builder = Self::new();
        builder.set_title(&draft.title);
        builder.set_subject(&draft.subject);
        builder.set_target_marks(draft.total_marks)?;
        builder.set_difficulty(draft.difficulty)?;
        builder.set_instructions(&draft.instructions);
        for topic in &draft.priority_topics {
            if !builder.is_topic_selected(topic) {
                builder.toggle_topic(topic);
            }
        }
        if draft.question_sets.is_empty() {
            return Err(ConfigError::NoQuestionSets);
        }
        builder.apply_patterns(&draft.question_sets);
        Ok(builder)
    }

    // -------------------------------------------------------------------------
    // Question sets
    // -------------------------------------------------------------------------

    pub fn question_sets(&self) -> &[QuestionSet] {
        &self.sets
    }

    pub fn question_set(&self, id: u32) -> Option<&QuestionSet> {
        self.sets.iter().find(|s| s.id == id)
    }

    /// Append a default set (short answer, 5 marks, 1 question). Returns its id.
    pub fn add_question_set(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        self.sets.push(QuestionSet::with_defaults(id));
        log::debug!("➕ question set {} added (total {})", id, self.compute_total());
        id
    }

    /// Change one field of set `id`. Returns `false` if no such set is live.
    pub fn update_question_set(&mut self, id: u32, update: QuestionSetUpdate) -> bool {
        match self.sets.iter_mut().find(|s| s.id == id) {
            Some(set) => {
                set.apply(update);
                true
            }
            None => false,
        }
    }

    /// Remove set `id`. The last remaining set cannot be removed.
    ///
    /// Returns `Ok(false)` when `id` is unknown.
    pub fn remove_question_set(&mut self, id: u32) -> ConfigResult<bool> {
        let Some(index) = self.sets.iter().position(|s| s.id == id) else {
            return Ok(false);
        };
        if self.sets.len() == 1 {
            return Err(ConfigError::LastQuestionSet);
        }
        self.sets.remove(index);
        Ok(true)
    }

    /// Replace the sets with suggested patterns, each under a fresh id.
    ///
    /// Leaves the builder untouched when `patterns` is empty.
    pub fn apply_patterns(&mut self, patterns: &[QuestionSetSpec]) -> usize {
        if patterns.is_empty() {
            return 0;
        }
        self.sets = patterns
            .iter()
            .map(|spec| {
                let id = self.next_id;
                self.next_id += 1;
                QuestionSet {
                    id,
                    question_type: spec.question_type,
                    marks: spec.marks,
                    count: spec.count,
                }
            })
            .collect();
        self.sets.len()
    }

    /// Like [`Self::apply_patterns`] but from loosely-typed server JSON;
    /// entries that do not parse are skipped.
    pub fn apply_suggested(&mut self, suggested: &[serde_json::Value]) -> usize {
        let patterns: Vec<QuestionSetSpec> = suggested
            .iter()
            .filter_map(|value| serde_json::from_value(value.clone()).ok())
            .collect();
        self.apply_patterns(&patterns)
    }

    // -------------------------------------------------------------------------
    // Totals
    // -------------------------------------------------------------------------

    /// Σ marks × count over the live sets.
    pub fn compute_total(&self) -> u32 {
        self.sets.iter().map(QuestionSet::subtotal).sum()
    }

    pub fn validate_total(&self, target: u32) -> bool {
        within_tolerance(self.compute_total(), target)
    }

    pub fn total_check(&self) -> TotalCheck {
        let total = self.compute_total();
        TotalCheck {
            total,
            target: self.target_marks,
            within_tolerance: within_tolerance(total, self.target_marks),
        }
    }

    // -------------------------------------------------------------------------
    // Scalar fields
    // -------------------------------------------------------------------------

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn set_subject(&mut self, subject: &str) {
        self.subject = subject.to_string();
    }

    pub fn target_marks(&self) -> u32 {
        self.target_marks
    }

    pub fn set_target_marks(&mut self, target: u32) -> ConfigResult<()> {
        if target == 0 {
            return Err(ConfigError::InvalidTargetMarks);
        }
        self.target_marks = target;
        Ok(())
    }

    pub fn difficulty(&self) -> u32 {
        self.difficulty
    }

    pub fn set_difficulty(&mut self, difficulty: u32) -> ConfigResult<()> {
        if !(1..=10).contains(&difficulty) {
            return Err(ConfigError::InvalidDifficulty(difficulty));
        }
        self.difficulty = difficulty;
        Ok(())
    }

    pub fn instructions(&self) -> &str {
        &self.instructions
    }

    pub fn set_instructions(&mut self, instructions: &str) {
        self.instructions = instructions.to_string();
    }

    // -------------------------------------------------------------------------
    // Topics
    // -------------------------------------------------------------------------

    /// Topics the server extracted from the uploaded syllabus.
    pub fn available_topics(&self) -> &[String] {
        &self.available_topics
    }

    pub fn set_available_topics(&mut self, topics: Vec<String>) {
        self.available_topics = topics;
    }

    pub fn priority_topics(&self) -> &[String] {
        &self.priority_topics
    }

    pub fn is_topic_selected(&self, topic: &str) -> bool {
        self.priority_topics.iter().any(|t| t == topic)
    }

    /// Select or deselect `topic`. Returns whether it is now selected.
    pub fn toggle_topic(&mut self, topic: &str) -> bool {
        if let Some(index) = self.priority_topics.iter().position(|t| t == topic) {
            self.priority_topics.remove(index);
            false
        } else {
            self.priority_topics.push(topic.to_string());
            true
        }
    }

    /// Comma-joined form sent as `priority_topics`.
    pub fn priority_topics_field(&self) -> String {
        self.priority_topics.join(",")
    }

    // -------------------------------------------------------------------------
    // Submission
    // -------------------------------------------------------------------------

    pub fn phase(&self) -> BuilderPhase {
        self.phase
    }

    pub fn question_config(&self) -> QuestionConfig {
        QuestionConfig {
            question_sets: self.sets.iter().map(QuestionSet::spec).collect(),
        }
    }

    /// Check the preconditions and serialize the form, first failure wins.
    ///
    /// No state changes on failure.
    pub fn validate_submission<'a>(
        &self,
        session: Option<&'a SessionId>,
    ) -> ConfigResult<&'a SessionId> {
        match self.phase {
            BuilderPhase::Submitting => return Err(ConfigError::AlreadySubmitting),
            BuilderPhase::Succeeded => return Err(ConfigError::AlreadySubmitted),
            BuilderPhase::Building => {}
        }
        let session = session.ok_or(ConfigError::MissingSession)?;
        if self.sets.is_empty() {
            return Err(ConfigError::NoQuestionSets);
        }
        let total = self.compute_total();
        if !within_tolerance(total, self.target_marks) {
            return Err(ConfigError::MarksOutOfTolerance {
                actual: total,
                target: self.target_marks,
            });
        }
        Ok(session)
    }

    /// Validate, then enter `Submitting` and return the generation request.
    pub fn begin_submit<F>(
        &mut self,
        session: Option<&SessionId>,
        config: &ClientConfig,
    ) -> ConfigResult<PreparedRequest<F>> {
        let session = self.validate_submission(session)?;
        let question_config = serde_json::to_string(&self.question_config())
            .map_err(|e| ConfigError::Serialization(e.to_string()))?;

        let form = Form::new()
            .text("title", &self.title)
            .text("subject", &self.subject)
            .text("total_marks", self.target_marks.to_string())
            .text("difficulty", self.difficulty.to_string())
            .text("priority_topics", self.priority_topics_field())
            .text("instructions", &self.instructions)
            .text("question_config", question_config);

        let request = PreparedRequest {
            url: config.generate_url(session.as_str()),
            form,
        };
        self.phase = BuilderPhase::Submitting;
        Ok(request)
    }

    /// Record the outcome; a failure returns to `Building` with state intact.
    pub fn settle(&mut self, outcome: &Result<ServerReply, SubmitError>) {
        self.phase = match outcome {
            Ok(_) => BuilderPhase::Succeeded,
            Err(_) => BuilderPhase::Building,
        };
    }

    /// Run the whole generation flow against `host`.
    ///
    /// Precondition violations are notified and return `Err` without any
    /// network call.
    pub async fn submit<T, C, S, R>(
        &mut self,
        session: Option<&SessionId>,
        host: &Host<T, C, S>,
        rng: &mut R,
    ) -> Result<ServerReply, GenerationFailure>
    where
        T: Transport,
        C: Clock,
        S: Shell,
        R: Rng + ?Sized,
    {
        let request = match self.begin_submit(session, &host.config) {
            Ok(request) => request,
            Err(e) => {
                log::warn!("🚫 generation blocked: {}", e);
                host.shell.notify(&e.to_string(), NotificationKind::Error);
                return Err(GenerationFailure::Blocked(e));
            }
        };
        let outcome = perform_generation(host, request, rng).await;
        self.settle(&outcome);
        outcome.map_err(GenerationFailure::Failed)
    }
}

/// Why [`ConfigurationBuilder::submit`] did not succeed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerationFailure {
    #[error(transparent)]
    Blocked(ConfigError),
    #[error(transparent)]
    Failed(SubmitError),
}

/// Network half of the generation flow; touches no builder state.
///
/// Disables submit and drives the blocking modal, then either navigates to
/// the preview after the redirect delay or restores the page and reports
/// the failure.
pub async fn perform_generation<T, C, S, R>(
    host: &Host<T, C, S>,
    request: PreparedRequest<T::File>,
    rng: &mut R,
) -> Result<ServerReply, SubmitError>
where
    T: Transport,
    C: Clock,
    S: Shell,
    R: Rng + ?Sized,
{
    host.shell.set_submit_enabled(false);

    match host.dispatch(request, GENERATION_PROGRESS, rng).await {
        Ok(reply) => {
            log::info!("✅ paper generated: {:?}", reply.paper_id);
            host.shell.notify(
                reply.message.as_deref().unwrap_or("Question paper generated successfully!"),
                NotificationKind::Success,
            );
            if let Some(redirect) = reply.redirect.as_deref() {
                host.clock.sleep(GENERATION_REDIRECT_DELAY_MS).await;
                host.shell.navigate(&host.config.resolve(redirect));
            }
            Ok(reply)
        }
        Err(e) => {
            log::error!("❌ generation failed: {}", e);
            host.shell.hide_progress();
            host.shell.set_submit_enabled(true);
            host.shell.notify(&e.user_message("Generation failed"), NotificationKind::Error);
            Err(e)
        }
    }
}
