// Coordinator - wires the queue group, producer and consumers together
//
// Owns the worker pool and therefore the shutdown signal. Shutdown is
// cooperative: units notice it at their next blocking or idling point, and
// anything still buffered is simply left in the queues.

use super::consumer::Consumer;
use super::diagnostic::DiagnosticTask;
use super::producer::{Producer, PRODUCER_LABEL};
use super::report::{PipelineReport, StopReason, UnitReport};
use super::worker::constants::*;
use super::worker::WorkerPool;
use crate::config::PipelineConfig;
use crate::domain::{BoundedQueue, QueueGroup, QueueId};
use crate::error::Result;
use crate::port::RngProvider;
use rand::Rng;
use std::sync::Arc;
use tokio::task::{JoinError, JoinHandle};
use tokio::time::{timeout_at, Instant};
use tracing::{error, info, warn};

/// Builds and launches the pipeline
pub struct Coordinator {
    config: PipelineConfig,
    rng_provider: Arc<dyn RngProvider>,
}

impl Coordinator {
    /// Create a coordinator (configuration is validated here)
    pub fn new(config: PipelineConfig, rng_provider: Arc<dyn RngProvider>) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            rng_provider,
        })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Create the queues with ids `1..=queue_count` and random capacities
    /// drawn from `[MIN_QUEUE_CAPACITY, max_capacity]`
    pub fn build_group(&self) -> Result<QueueGroup> {
        let mut rng = self.rng_provider.rng_for(COORDINATOR_RNG_STREAM);

        let mut queues = Vec::with_capacity(self.config.queue_count);
        for id in 1..=self.config.queue_count as QueueId {
            let capacity = rng.gen_range(MIN_QUEUE_CAPACITY..=self.config.max_capacity);
            queues.push(BoundedQueue::new(id, capacity)?);
        }

        Ok(QueueGroup::new(queues)?)
    }

    /// Build a fresh group and start every unit (requires a tokio runtime)
    pub fn start(&self) -> Result<RunningPipeline> {
        let group = Arc::new(self.build_group()?);
        Ok(self.start_with_group(group))
    }

    /// Start the producer and one consumer per queue on an existing group
    pub fn start_with_group(&self, group: Arc<QueueGroup>) -> RunningPipeline {
        let pool = WorkerPool::new();

        let producer = Producer::new(
            Arc::clone(&group),
            self.rng_provider.rng_for(PRODUCER_RNG_STREAM),
            self.config.producer_max_idle(),
        )
        .with_limit(self.config.produce_limit);
        let producer = pool.submit(producer);

        let consumers = group
            .iter()
            .map(|queue| {
                let stream = CONSUMER_RNG_STREAM_BASE + u64::from(queue.id());
                let consumer = Consumer::new(
                    Arc::clone(queue),
                    self.rng_provider.rng_for(stream),
                    self.config.consumer_max_idle(),
                );
                (format!("consumer-{}", queue.id()), pool.submit(consumer))
            })
            .collect();

        let capacities: Vec<(QueueId, usize)> =
            group.iter().map(|q| (q.id(), q.capacity())).collect();
        info!(
            queues = group.len(),
            capacities = ?capacities,
            produce_limit = ?self.config.produce_limit,
            "Pipeline started"
        );

        RunningPipeline {
            group,
            pool,
            producer: ProducerSlot::Running(producer),
            consumers,
        }
    }
}

enum ProducerSlot {
    Running(JoinHandle<UnitReport>),
    Done(UnitReport),
}

/// Handle to a started pipeline
pub struct RunningPipeline {
    group: Arc<QueueGroup>,
    pool: WorkerPool,
    producer: ProducerSlot,
    consumers: Vec<(String, JoinHandle<UnitReport>)>,
}

impl RunningPipeline {
    pub fn group(&self) -> &Arc<QueueGroup> {
        &self.group
    }

    /// Run the stock diagnostic: report every queue's capacity and length
    pub async fn run_diagnostic(&self) -> String {
        let group = Arc::clone(&self.group);
        let task = DiagnosticTask::new("diagnostic", move || {
            let queues: Vec<String> = group
                .iter()
                .map(|q| format!("queue {}: {}/{}", q.id(), q.len(), q.capacity()))
                .collect();
            Ok(format!("Pipeline diagnostic: {}", queues.join(", ")))
        });
        self.run_adhoc(task).await
    }

    /// Submit a one-shot task and wait for its result
    ///
    /// Failures are reported as a plain message; they never touch the
    /// producer or consumers.
    pub async fn run_adhoc(&self, task: DiagnosticTask) -> String {
        match self.pool.submit(task).await {
            Ok(Ok(result)) => result,
            Ok(Err(e)) => {
                warn!(error = %e, "Diagnostic task failed");
                format!("Something went wrong: {}", e)
            }
            Err(join_err) if join_err.is_panic() => {
                error!(error = %join_err, "Diagnostic task panicked");
                "Something went wrong: diagnostic task panicked".to_string()
            }
            Err(join_err) => {
                warn!(error = %join_err, "Diagnostic task was interrupted");
                "Thread running the diagnostic task was interrupted".to_string()
            }
        }
    }

    /// Wait for the producer to stop on its own (production limit)
    ///
    /// Without a limit this only resolves after shutdown. Cancel-safe: it can
    /// be raced against a signal and called again.
    pub async fn producer_finished(&mut self) -> UnitReport {
        let report = match &mut self.producer {
            ProducerSlot::Running(handle) => report_from_join(PRODUCER_LABEL, handle.await),
            ProducerSlot::Done(report) => return report.clone(),
        };
        self.producer = ProducerSlot::Done(report.clone());
        report
    }

    /// Signal shutdown, then collect every unit's report
    ///
    /// Units get a shared grace period to observe the signal; stragglers are
    /// aborted and reported as failed.
    pub async fn shutdown(self) -> PipelineReport {
        info!("Shutdown requested");
        self.pool.shutdown();
        let deadline = Instant::now() + SHUTDOWN_GRACE_PERIOD;

        let producer = match self.producer {
            ProducerSlot::Running(handle) => join_until(PRODUCER_LABEL, handle, deadline).await,
            ProducerSlot::Done(report) => report,
        };

        let mut consumers = Vec::with_capacity(self.consumers.len());
        for (label, handle) in self.consumers {
            consumers.push(join_until(&label, handle, deadline).await);
        }

        let leftover = self.group.iter().map(|q| (q.id(), q.len())).collect();
        let report = PipelineReport {
            producer,
            consumers,
            leftover,
        };

        info!(
            produced = report.produced(),
            consumed = report.consumed(),
            buffered = report.buffered(),
            "Pipeline stopped"
        );
        report
    }
}

async fn join_until(
    label: &str,
    handle: JoinHandle<UnitReport>,
    deadline: Instant,
) -> UnitReport {
    let abort = handle.abort_handle();
    match timeout_at(deadline, handle).await {
        Ok(joined) => report_from_join(label, joined),
        Err(_) => {
            abort.abort();
            warn!(actor = %label, "Unit did not stop within grace period, aborted");
            UnitReport::new(label, 0, StopReason::Failed("shutdown timed out".into()))
        }
    }
}

fn report_from_join(
    label: &str,
    joined: std::result::Result<UnitReport, JoinError>,
) -> UnitReport {
    joined.unwrap_or_else(|join_err| {
        error!(actor = %label, error = %join_err, "Unit ended abnormally");
        UnitReport::new(label, 0, StopReason::Failed(join_err.to_string()))
    })
}
