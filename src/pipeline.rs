use crate::cancel::CancellationToken;
use crate::config::Config;
use crate::engine::SubstringFrequencyEngine;
use crate::error::LsResult;
use crate::extractor::source::TextSource;
use crate::extractor::{BatchSink, ChunkedWordExtractor};
use crate::types::{ExtractionStatus, RankedSubstring, RankingUpdate, RunningAggregates, WordBatch};
use serde::Serialize;
use std::path::Path;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};
use tracing::{debug, info, warn};

/// What the pipeline reports back to its caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineEvent {
    Status(ExtractionStatus),
    TotalSubstrings(u64),
    WordsProcessed(u64),
    TopK(Vec<RankedSubstring>),
    FinalTopK(Vec<RankedSubstring>),
}

enum EngineCommand {
    Batch(WordBatch),
    Finish,
    Reset,
}

struct ChannelSink(Sender<EngineCommand>);

impl BatchSink for ChannelSink {
    fn on_batch(&mut self, batch: WordBatch) {
        // The engine thread only goes away once this sender is dropped.
        let _ = self.0.send(EngineCommand::Batch(batch));
    }
}

/// Everything the caller saw, folded together.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PipelineSummary {
    pub status: Option<ExtractionStatus>,
    pub aggregates: RunningAggregates,
    /// Last non-empty ranking received.
    pub ranking: Vec<RankedSubstring>,
    pub completed: bool,
}

impl PipelineSummary {
    pub fn apply(&mut self, event: &PipelineEvent) {
        match event {
            PipelineEvent::Status(status) => self.status = Some(*status),
            PipelineEvent::TotalSubstrings(n) => self.aggregates.total_substrings = *n,
            PipelineEvent::WordsProcessed(n) => self.aggregates.words_processed = *n,
            PipelineEvent::TopK(list) => self.ranking = list.clone(),
            PipelineEvent::FinalTopK(list) => {
                if !list.is_empty() {
                    self.ranking = list.clone();
                }
                self.completed = true;
            }
        }
    }
}

/// A running analysis: extractor and engine on their own threads.
pub struct PipelineHandle {
    cancel: CancellationToken,
    events: Receiver<PipelineEvent>,
    workers: Vec<JoinHandle<()>>,
}

impl PipelineHandle {
    /// Asks the extractor to stop before its next read.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn events(&self) -> &Receiver<PipelineEvent> {
        &self.events
    }

    pub fn wait(self) -> PipelineSummary {
        self.wait_with(|_| {})
    }

    /// Drains events until both workers are done, handing each to `on_event`.
    pub fn wait_with<F: FnMut(&PipelineEvent)>(self, mut on_event: F) -> PipelineSummary {
        let mut summary = PipelineSummary::default();
        for event in self.events.iter() {
            on_event(&event);
            summary.apply(&event);
        }
        for worker in self.workers {
            let name = worker.thread().name().unwrap_or("worker").to_string();
            if worker.join().is_err() {
                warn!("Pipeline thread '{}' panicked", name);
            }
        }
        summary
    }
}

pub struct Pipeline;

impl Pipeline {
    /// Analyzes the file at `path`.
    pub fn spawn<P: AsRef<Path>>(path: P, config: Config) -> LsResult<PipelineHandle> {
        let path = path.as_ref().to_path_buf();
        Self::launch(config, move |extractor, cancel, sink| {
            extractor.run_path(&path, cancel, sink)
        })
    }

    /// Analyzes an already opened source.
    pub fn spawn_source<T>(mut source: T, config: Config) -> LsResult<PipelineHandle>
    where
        T: TextSource + Send + 'static,
    {
        Self::launch(config, move |extractor, cancel, sink| {
            extractor.run(&mut source, cancel, sink)
        })
    }

    fn launch<F>(config: Config, read: F) -> LsResult<PipelineHandle>
    where
        F: FnOnce(&mut ChunkedWordExtractor, &CancellationToken, &mut ChannelSink) -> ExtractionStatus
            + Send
            + 'static,
    {
        config.validate()?;

        let cancel = CancellationToken::new();
        let (event_tx, event_rx) = mpsc::channel::<PipelineEvent>();
        let (command_tx, command_rx) = mpsc::channel::<EngineCommand>();

        let engine = {
            let events = event_tx.clone();
            let params = config.engine.clone();
            thread::Builder::new()
                .name("lexiscan-engine".into())
                .spawn(move || engine_worker(SubstringFrequencyEngine::new(params), command_rx, events))?
        };

        let extractor = {
            let cancel = cancel.clone();
            let params = config.extractor.clone();
            thread::Builder::new()
                .name("lexiscan-extractor".into())
                .spawn(move || {
                    let mut extractor = ChunkedWordExtractor::new(params);
                    let mut sink = ChannelSink(command_tx);
                    let status = read(&mut extractor, &cancel, &mut sink);
                    debug!("Extractor reported '{}'", status);
                    let _ = event_tx.send(PipelineEvent::Status(status));

                    let ChannelSink(commands) = sink;
                    if status == ExtractionStatus::Finished {
                        let _ = commands.send(EngineCommand::Finish);
                    }
                    let _ = commands.send(EngineCommand::Reset);
                })?
        };

        Ok(PipelineHandle {
            cancel,
            events: event_rx,
            workers: vec![extractor, engine],
        })
    }
}

fn engine_worker(
    mut engine: SubstringFrequencyEngine,
    commands: Receiver<EngineCommand>,
    events: Sender<PipelineEvent>,
) {
    let publish = |update: RankingUpdate| {
        let _ = events.send(PipelineEvent::TotalSubstrings(
            update.aggregates.total_substrings,
        ));
        let _ = events.send(PipelineEvent::WordsProcessed(
            update.aggregates.words_processed,
        ));
        let event = if update.is_final() {
            PipelineEvent::FinalTopK(update.ranking)
        } else {
            PipelineEvent::TopK(update.ranking)
        };
        let _ = events.send(event);
    };

    for command in commands {
        match command {
            EngineCommand::Batch(batch) => {
                if let Some(update) = engine.process_batch(&batch) {
                    publish(update);
                }
            }
            EngineCommand::Finish => {
                let update = engine.finalize();
                info!(
                    "Analysis finished: {} words, {} letter combinations",
                    update.aggregates.words_processed, update.aggregates.total_substrings
                );
                publish(update);
            }
            EngineCommand::Reset => engine.reset(),
        }
    }
    debug!("Engine worker exiting");
}
