//! The owned application store.
//!
//! `Store` wraps the workbook, conversation and settings behind a command
//! interface. Workbook events become notifications after every mutation.
//! Work that suspends (file ingestion, assistant replies) is split into a
//! job the caller runs on its executor and a `complete_*`/`deliver_*` call
//! that applies the result. Jobs carry the store generation they were
//! started in; `dispose` bumps it so late results are rejected as `Stale`.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use gridpad_config::Settings;
use gridpad_core::CellPos;
use gridpad_engine::grid::GridView;
use gridpad_engine::{ParsedFile, Scalar, SheetId, Workbook};
use gridpad_io::{
    ingest_batch, ingest_paths, BinaryReader, FileOutcome, IngestError, IngestReport,
    PlaceholderBinaryReader, UploadedFile,
};

use crate::assistant::{compose_reply, Assistant, Conversation, KeywordAssistant, Role};
use crate::error::{AssistantError, StoreError};
use crate::notify::Notification;

/// Synchronous operations on the workbook.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Select { row: usize, col: usize },
    BeginEdit { row: usize, col: usize },
    UpdateText(String),
    Commit,
    Cancel,
    CommitCellEdit { row: usize, col: usize, text: String },
    AddSheet { name: Option<String> },
    SetActive(SheetId),
    ImportMerge(Vec<ParsedFile>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    Done,
    Committed(CellPos),
    Cancelled(CellPos),
    SheetAdded(SheetId),
    Imported(Vec<SheetId>),
}

/// Proof that an import was started by this store, in a given generation.
/// Consumed by [`Store::complete_import`].
#[derive(Debug, PartialEq, Eq)]
pub struct ImportTicket {
    generation: u64,
}

/// Proof that a reply was requested for one user message. Consumed by
/// [`Store::deliver_reply`].
#[derive(Debug, PartialEq, Eq)]
pub struct ReplyTicket {
    generation: u64,
    message_id: u64,
}

#[derive(Debug)]
enum ImportSource {
    Files(Vec<UploadedFile>),
    Paths(Vec<PathBuf>),
}

/// Pending file ingestion. Run it off the store, then hand the report to
/// [`Store::complete_import`].
pub struct ImportJob {
    ticket: ImportTicket,
    source: ImportSource,
    reader: Arc<dyn BinaryReader>,
}

impl ImportJob {
    /// Read and parse every file on the blocking pool. Resolves once all
    /// files have resolved.
    pub async fn run(self) -> (ImportTicket, IngestReport) {
        let ImportJob {
            ticket,
            source,
            reader,
        } = self;
        let report = smol::unblock(move || match source {
            ImportSource::Files(files) => ingest_batch(&files, reader.as_ref()),
            ImportSource::Paths(paths) => ingest_paths(&paths, reader.as_ref()),
        })
        .await;
        (ticket, report)
    }
}

/// Pending assistant reply. Run it, then hand the text to [`Store::deliver_reply`].
pub struct ReplyJob {
    ticket: ReplyTicket,
    input: String,
    matrix: Vec<Vec<Scalar>>,
    assistant: Arc<dyn Assistant>,
    delay: Duration,
}

impl ReplyJob {
    pub async fn run(self) -> (ReplyTicket, String) {
        let text = compose_reply(self.assistant, self.input, self.matrix, self.delay).await;
        (self.ticket, text)
    }
}

pub struct Store {
    workbook: Workbook,
    conversation: Conversation,
    settings: Settings,
    assistant: Arc<dyn Assistant>,
    binary_reader: Arc<dyn BinaryReader>,
    notifications: Vec<Notification>,
    generation: u64,
}

impl Default for Store {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

impl Store {
    pub fn new(settings: Settings) -> Self {
        Self::with_parts(
            settings,
            Arc::new(KeywordAssistant),
            Arc::new(PlaceholderBinaryReader),
        )
    }

    pub fn with_parts(
        settings: Settings,
        assistant: Arc<dyn Assistant>,
        binary_reader: Arc<dyn BinaryReader>,
    ) -> Self {
        Self {
            workbook: Workbook::new(),
            conversation: Conversation::new(),
            settings,
            assistant,
            binary_reader,
            notifications: Vec::new(),
            generation: 0,
        }
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn workbook(&self) -> &Workbook {
        &self.workbook
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The active sheet padded to the configured minimum extent.
    pub fn active_view(&self) -> GridView<'_> {
        self.workbook
            .active_sheet()
            .grid
            .view(self.settings.min_rows, self.settings.min_cols)
    }

    // ========================================================================
    // Commands
    // ========================================================================

    pub fn dispatch(&mut self, command: Command) -> Result<CommandOutcome, StoreError> {
        log::trace!("dispatch {:?}", command);
        let result = self.apply(command);
        self.flush_events();
        result
    }

    fn apply(&mut self, command: Command) -> Result<CommandOutcome, StoreError> {
        let outcome = match command {
            Command::Select { row, col } => {
                self.workbook.select(row, col);
                CommandOutcome::Done
            }
            Command::BeginEdit { row, col } => {
                self.workbook.begin_edit(row, col);
                CommandOutcome::Done
            }
            Command::UpdateText(text) => {
                self.workbook.update_edit_text(text)?;
                CommandOutcome::Done
            }
            Command::Commit => CommandOutcome::Committed(self.workbook.commit_edit()?),
            Command::Cancel => CommandOutcome::Cancelled(self.workbook.cancel_edit()?),
            Command::CommitCellEdit { row, col, text } => {
                self.workbook.commit_cell_edit(row, col, text)?;
                CommandOutcome::Committed(CellPos::new(row, col))
            }
            Command::AddSheet { name } => {
                CommandOutcome::SheetAdded(self.workbook.add_sheet(name.as_deref()))
            }
            Command::SetActive(id) => {
                self.workbook.set_active(id)?;
                CommandOutcome::Done
            }
            Command::ImportMerge(files) => CommandOutcome::Imported(self.merge(files)?),
        };
        Ok(outcome)
    }

    fn merge(&mut self, files: Vec<ParsedFile>) -> Result<Vec<SheetId>, StoreError> {
        let ids = self.workbook.import_merge(files);
        if self.settings.activate_first_imported_sheet {
            if let Some(&first) = ids.first() {
                self.workbook.set_active(first)?;
            }
        }
        Ok(ids)
    }

    fn flush_events(&mut self) {
        for event in self.workbook.take_events() {
            log::debug!("workbook event: {:?}", event);
            if let Some(notification) = Notification::for_event(&event) {
                self.notifications.push(notification);
            }
        }
    }

    fn check_generation(&self, generation: u64) -> Result<(), StoreError> {
        if generation == self.generation {
            Ok(())
        } else {
            log::debug!(
                "dropping result from generation {} (current {})",
                generation,
                self.generation
            );
            Err(StoreError::Stale)
        }
    }

    // ========================================================================
    // Import
    // ========================================================================

    /// Start ingesting in-memory uploads.
    pub fn begin_import(&mut self, files: Vec<UploadedFile>) -> ImportJob {
        self.notifications
            .push(Notification::files_uploaded(files.len()));
        ImportJob {
            ticket: ImportTicket {
                generation: self.generation,
            },
            source: ImportSource::Files(files),
            reader: Arc::clone(&self.binary_reader),
        }
    }

    /// Start ingesting files from disk.
    pub fn begin_import_paths(&mut self, paths: Vec<PathBuf>) -> ImportJob {
        self.notifications
            .push(Notification::files_uploaded(paths.len()));
        ImportJob {
            ticket: ImportTicket {
                generation: self.generation,
            },
            source: ImportSource::Paths(paths),
            reader: Arc::clone(&self.binary_reader),
        }
    }

    /// Upload from the chat panel: also logged in the conversation.
    pub fn upload_from_chat(&mut self, files: Vec<UploadedFile>) -> ImportJob {
        let names: Vec<&str> = files.iter().map(|f| f.name.as_str()).collect();
        self.conversation.record_upload(&names);
        self.begin_import(files)
    }

    /// Apply an ingestion report: one notice per file, then merge whatever parsed.
    pub fn complete_import(
        &mut self,
        ticket: ImportTicket,
        report: IngestReport,
    ) -> Result<Vec<SheetId>, StoreError> {
        self.check_generation(ticket.generation)?;

        for outcome in &report.outcomes {
            let notification = match outcome {
                FileOutcome::Loaded { file, .. } => Notification::file_loaded(file),
                FileOutcome::Failed(IngestError::UnsupportedFileType(file)) => {
                    Notification::unsupported_file(file)
                }
                FileOutcome::Failed(err) => Notification::file_failed(err.file_name()),
            };
            self.notifications.push(notification);
        }

        if report.parsed.is_empty() {
            return Ok(Vec::new());
        }
        match self.dispatch(Command::ImportMerge(report.parsed))? {
            CommandOutcome::Imported(ids) => Ok(ids),
            _ => Ok(Vec::new()),
        }
    }

    /// Ingest uploads and apply the result.
    pub async fn import_files(
        &mut self,
        files: Vec<UploadedFile>,
    ) -> Result<Vec<SheetId>, StoreError> {
        let (ticket, report) = self.begin_import(files).run().await;
        self.complete_import(ticket, report)
    }

    // ========================================================================
    // Assistant
    // ========================================================================

    /// Log a user message and start composing the reply against the active
    /// sheet's stored values.
    pub fn send_message(&mut self, text: &str) -> Result<ReplyJob, StoreError> {
        if text.trim().is_empty() {
            return Err(AssistantError::EmptyMessage.into());
        }
        if self.conversation.is_pending() {
            return Err(AssistantError::ReplyPending.into());
        }

        let message_id = self.conversation.push(Role::User, text);
        self.conversation.set_pending_reply(Some(message_id));

        Ok(ReplyJob {
            ticket: ReplyTicket {
                generation: self.generation,
                message_id,
            },
            input: text.to_string(),
            matrix: self.workbook.active_sheet().grid.to_scalars(),
            assistant: Arc::clone(&self.assistant),
            delay: Duration::from_millis(self.settings.response_delay_ms),
        })
    }

    /// Append the reply for the message the ticket was issued for. Each
    /// user message gets at most one reply.
    pub fn deliver_reply(&mut self, ticket: ReplyTicket, text: String) -> Result<(), StoreError> {
        self.check_generation(ticket.generation)?;
        if self.conversation.pending_reply() != Some(ticket.message_id) {
            return Err(AssistantError::NoPendingReply(ticket.message_id).into());
        }
        self.conversation.push(Role::Assistant, text);
        self.conversation.set_pending_reply(None);
        Ok(())
    }

    /// Send a message and wait for its reply.
    pub async fn ask(&mut self, text: &str) -> Result<String, StoreError> {
        let (ticket, reply) = self.send_message(text)?.run().await;
        self.deliver_reply(ticket, reply.clone())?;
        Ok(reply)
    }

    /// Invalidate every job in flight. Their results come back `Stale`.
    pub fn dispose(&mut self) {
        self.generation += 1;
        self.conversation.set_pending_reply(None);
        log::debug!("store disposed, generation {}", self.generation);
    }
}
