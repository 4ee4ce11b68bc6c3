/// BatchScheduler — chunked parallel map on a dedicated rayon pool.
///
/// Inputs are split into fixed-size chunks, each chunk runs as one pool
/// task and sends its outputs back over a crossbeam channel tagged with
/// the chunk index. `JobHandle::complete` is the barrier: it blocks until
/// every chunk reported and returns the outputs in input order.

use std::sync::Arc;
use crossbeam_channel::{self as channel, Receiver};
use rayon::{ThreadPool, ThreadPoolBuilder};
use crate::engine_error;
use crate::error::{Error, Result};

/// Entities per chunk when nothing else is configured.
pub const DEFAULT_BATCH_SIZE: usize = 64;

pub struct BatchScheduler {
    pool: ThreadPool,
    batch_size: usize,
}

impl BatchScheduler {
    /// Build the worker pool. `worker_threads == 0` lets rayon pick.
    pub fn new(worker_threads: usize, batch_size: usize) -> Result<Self> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(worker_threads)
            .thread_name(|i| format!("galaxy3d-visibility-{}", i))
            .build()
            .map_err(|e| Error::InvalidConfiguration(format!("failed to build worker pool: {}", e)))?;

        Ok(Self {
            pool,
            batch_size: batch_size.max(1),
        })
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub fn thread_count(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Run `job` over every input. Inputs mapping to `None` produce no output.
    pub fn schedule<I, O, F>(&self, inputs: Vec<I>, job: F) -> JobHandle<O>
    where
        I: Send + 'static,
        O: Send + 'static,
        F: Fn(I) -> Option<O> + Send + Sync + 'static,
    {
        let (sender, receiver) = channel::unbounded();
        let job = Arc::new(job);
        let mut inputs = inputs.into_iter();
        let mut chunk_count = 0;

        loop {
            let chunk: Vec<I> = inputs.by_ref().take(self.batch_size).collect();
            if chunk.is_empty() {
                break;
            }
            let chunk_index = chunk_count;
            chunk_count += 1;

            let sender = sender.clone();
            let job = Arc::clone(&job);
            self.pool.spawn(move || {
                let outputs: Vec<O> = chunk.into_iter().filter_map(|input| job(input)).collect();
                // Receiver dropped means the handle was abandoned
                let _ = sender.send((chunk_index, outputs));
            });
        }

        JobHandle {
            receiver,
            chunk_count,
        }
    }
}

/// Outstanding batch job.
pub struct JobHandle<O> {
    receiver: Receiver<(usize, Vec<O>)>,
    chunk_count: usize,
}

impl<O> JobHandle<O> {
    pub fn chunk_count(&self) -> usize {
        self.chunk_count
    }

    /// True once every chunk has reported (non-blocking).
    pub fn is_finished(&self) -> bool {
        self.receiver.len() >= self.chunk_count
    }

    /// Block until all chunks are done and return outputs in input order.
    pub fn complete(self) -> Vec<O> {
        let mut chunks = Vec::with_capacity(self.chunk_count);
        for _ in 0..self.chunk_count {
            match self.receiver.recv() {
                Ok(chunk) => chunks.push(chunk),
                Err(_) => {
                    engine_error!(
                        "galaxy3d::BatchScheduler",
                        "Worker channel closed with {} of {} chunks received",
                        chunks.len(),
                        self.chunk_count
                    );
                    break;
                }
            }
        }
        chunks.sort_by_key(|(index, _)| *index);
        chunks.into_iter().flat_map(|(_, outputs)| outputs).collect()
    }
}

#[cfg(test)]
#[path = "batch_scheduler_tests.rs"]
mod tests;
