// Pipeline constants (no magic values in the units themselves)
use std::time::Duration;

/// Number of queues (and consumers) in the stock pipeline
pub const DEFAULT_QUEUE_COUNT: usize = 3;

/// Smallest capacity a queue may be created with
pub const MIN_QUEUE_CAPACITY: usize = 1;

/// Largest randomly drawn queue capacity
pub const DEFAULT_MAX_QUEUE_CAPACITY: usize = 30;

/// Exclusive upper bound of producer and consumer idle pauses (1s)
pub const DEFAULT_MAX_IDLE: Duration = Duration::from_secs(1);

/// Pool slots beyond one per consumer: the producer plus one ad-hoc task
pub const EXTRA_POOL_SLOTS: usize = 2;

/// How long shutdown waits for units before aborting them (5s)
pub const SHUTDOWN_GRACE_PERIOD: Duration = Duration::from_secs(5);

/// Random stream reserved for drawing queue capacities
pub const COORDINATOR_RNG_STREAM: u64 = 0;

/// Random stream of the producer
pub const PRODUCER_RNG_STREAM: u64 = 1;

/// Consumer streams start here, offset by queue id
pub const CONSUMER_RNG_STREAM_BASE: u64 = 1_000;
