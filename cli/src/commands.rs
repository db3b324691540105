//! Command implementations. Each one drives a `qgen_core` flow against a
//! [`CliHost`] and returns the server reply.

use std::path::{Path, PathBuf};

use qgen_core::{
    ConfigurationBuilder, PaperDraft, QuestionSetSpec, QuestionType, ServerReply, SessionId,
    UploadSession,
};

use crate::error::{CliError, CliResult};
use crate::files::LocalFile;
use crate::transport::CliHost;

/// Upload `paths` as one session.
pub async fn upload(host: &CliHost, paths: &[PathBuf]) -> CliResult<ServerReply> {
    let files = paths
        .iter()
        .map(|p| LocalFile::open(p))
        .collect::<CliResult<Vec<_>>>()?;

    let mut session = UploadSession::new();
    session.acquire(files);

    eprintln!("📤 Uploading {} file(s) to {}", session.len(), host.config.upload_url());
    for file in session.files() {
        eprintln!("   📄 {} ({})", file.name, file.display_size());
    }

    let mut rng = rand::thread_rng();
    match session.submit(host, &mut rng).await {
        Some(outcome) => Ok(outcome?),
        None => Err(CliError::NoFiles),
    }
}

/// Generate a paper for `session_id` from the draft at `draft_path`.
pub async fn generate(host: &CliHost, session_id: &str, draft_path: &Path) -> CliResult<ServerReply> {
    let mut builder = builder_from(draft_path)?;
    print_summary(&builder);

    let session = SessionId::from_page(Some(session_id));
    let mut rng = rand::thread_rng();
    let reply = builder.submit(session.as_ref(), host, &mut rng).await?;
    Ok(reply)
}

/// Upload, then generate for the session the upload created.
pub async fn run(host: &CliHost, paths: &[PathBuf], draft_path: &Path) -> CliResult<ServerReply> {
    // Fail on a bad draft before anything is uploaded.
    builder_from(draft_path)?;

    let uploaded = upload(host, paths).await?;
    let session = uploaded.session().ok_or(CliError::MissingSession)?;
    tracing::info!(session = %session, "upload session created");

    generate(host, &session, draft_path).await
}

/// Validate a draft offline: ranges, at least one set, marks tolerance.
pub fn check(draft_path: &Path) -> CliResult<ConfigurationBuilder> {
    let builder = builder_from(draft_path)?;
    print_summary(&builder);

    let placeholder = SessionId::from_page(Some("offline-check"));
    builder.validate_submission(placeholder.as_ref())?;
    eprintln!("✅ Draft is ready to submit");
    Ok(builder)
}

/// A complete draft users can start from.
pub fn example_draft() -> PaperDraft {
    let spec = |question_type: QuestionType, marks: u32, count: u32| -> Option<QuestionSetSpec> {
        Some(QuestionSetSpec {
            question_type,
            marks: qgen_core::Marks::new(marks).ok()?,
            count: qgen_core::QuestionCount::new(count).ok()?,
        })
    };

    PaperDraft {
        title: "Mid-term examination".to_string(),
        subject: "Physics".to_string(),
        total_marks: 50,
        difficulty: 6,
        priority_topics: vec!["Kinematics".to_string(), "Optics".to_string()],
        instructions: "Answer all questions.".to_string(),
        question_sets: [
            spec(QuestionType::MultipleChoice, 1, 10),
            spec(QuestionType::ShortAnswer, 5, 4),
            spec(QuestionType::LongAnswer, 10, 2),
        ]
        .into_iter()
        .flatten()
        .collect(),
    }
}

/// Read and parse a paper draft file.
pub fn load_draft(path: &Path) -> CliResult<PaperDraft> {
    let content = std::fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| CliError::Draft {
        path: path.to_path_buf(),
        source,
    })
}

fn builder_from(draft_path: &Path) -> CliResult<ConfigurationBuilder> {
    let draft = load_draft(draft_path)?;
    Ok(ConfigurationBuilder::from_draft(&draft)?)
}

fn print_summary(builder: &ConfigurationBuilder) {
    let check = builder.total_check();
    eprintln!("📝 {} question set(s)", builder.question_sets().len());
    for set in builder.question_sets() {
        eprintln!(
            "   • {} × {} ({} marks each) = {}",
            set.count.get(),
            set.question_type,
            set.marks.get(),
            set.subtotal()
        );
    }
    let marker = if check.within_tolerance { "✅" } else { "⚠️" };
    eprintln!("   {} Total: {} / {} marks", marker, check.total, check.target);
}
